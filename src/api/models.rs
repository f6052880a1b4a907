use serde::{Deserialize, Serialize};

/// Query parameters for listing stored recipes
#[derive(Debug, Clone, Deserialize)]
pub struct ListParams {
    #[serde(default)]
    pub skip: usize,
    #[serde(default)]
    pub limit: Option<usize>,
}

/// Incoming chat message
#[derive(Debug, Clone, Deserialize)]
pub struct BotMessage {
    pub conversation_id: String,
    pub text: String,
}

/// Reply to a chat message
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BotReply {
    pub reply: String,
}

/// Health check response
#[derive(Debug, Clone, Serialize)]
pub struct HealthResponse {
    pub status: String,
}

/// Readiness check response
#[derive(Debug, Clone, Serialize)]
pub struct ReadinessResponse {
    pub ready: bool,
    pub database: String,
}

/// Service banner served at the root path
#[derive(Debug, Clone, Serialize)]
pub struct ServiceInfo {
    pub message: String,
    pub endpoints: Endpoints,
}

#[derive(Debug, Clone, Serialize)]
pub struct Endpoints {
    pub search: String,
    pub search_by_title: String,
    pub all_recipes: String,
    pub get_recipe: String,
    pub bot: String,
}
