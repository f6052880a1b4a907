// Command-line interface

pub mod commands;

use clap::{Parser, Subcommand};

#[derive(Parser, Debug)]
#[command(name = "cookwizard")]
#[command(about = "CookWizard - Find recipes by ingredients", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Start the API server
    Serve {
        /// Port to listen on
        #[arg(short, long, env = "PORT")]
        port: Option<u16>,

        /// Host to bind to
        #[arg(long, env = "HOST")]
        host: Option<String>,
    },

    /// Run database migrations
    Migrate,

    /// Load sample recipes into an empty database
    Seed,

    /// Search a running server for recipes
    Search {
        /// Comma-separated ingredient list
        #[arg(short, long)]
        ingredients: Option<String>,

        /// Title fragment
        #[arg(short, long)]
        title: Option<String>,

        /// Maximum cooking time in minutes
        #[arg(long)]
        max_time: Option<u32>,

        /// Difficulty: easy, medium or hard
        #[arg(short, long)]
        difficulty: Option<String>,
    },
}
