pub mod config;
pub mod db;
pub mod error;

// Matching and ranking
pub mod search;

// HTTP API
pub mod api;

// Chat front end
pub mod bot;

// Command line
pub mod cli;

// Utilities
pub mod utils;

// Re-exports
pub use config::Settings;
pub use error::{Error, Result};
