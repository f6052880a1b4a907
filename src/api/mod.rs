// HTTP API
// JSON endpoints for search, recipe storage and the chat bot

pub mod handlers;
pub mod models;
pub mod routes;

pub use handlers::AppState;
pub use routes::create_router;
