use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    Json,
};
use tracing::{debug, info};

use crate::{
    api::models::*,
    bot::ChatBot,
    db::{
        self,
        models::{NewRecipe, Recipe},
        recipes::SqliteRecipeStore,
    },
    search::{self, SearchEngine, SearchParams},
    Error, Result,
};

/// Shared application state
#[derive(Clone)]
pub struct AppState {
    pub pool: sqlx::SqlitePool,
    pub engine: SearchEngine<SqliteRecipeStore>,
    pub bot: ChatBot<SqliteRecipeStore>,
    pub settings: crate::config::Settings,
}

impl AppState {
    pub fn new(pool: sqlx::SqlitePool, settings: crate::config::Settings) -> Self {
        let engine = SearchEngine::new(SqliteRecipeStore::new(pool.clone()));
        let bot = ChatBot::new(
            engine.clone(),
            crate::bot::SessionStore::new(settings.session.ttl()),
            settings.search.timeout(),
        );

        Self {
            pool,
            engine,
            bot,
            settings,
        }
    }
}

/// GET /api/search - Search recipes by ingredients, title, time and difficulty
pub async fn search_recipes(
    State(state): State<AppState>,
    Query(params): Query<SearchParams>,
) -> Result<Json<Vec<Recipe>>> {
    debug!("Search request: {:?}", params);

    let query = search::Query::try_from(params)?;
    let results = state
        .engine
        .search_with_timeout(&query, state.settings.search.timeout())
        .await?;

    info!("Search found {} recipes", results.len());
    Ok(Json(results))
}

/// GET /api/search/title/:title_part - Search recipes by title fragment
pub async fn search_by_title(
    State(state): State<AppState>,
    Path(title_part): Path<String>,
) -> Result<Json<Vec<Recipe>>> {
    debug!("Title search request: {}", title_part);

    let query = search::Query::new().with_title(&title_part);
    if query.title_substring.is_none() {
        // A blank fragment names no title
        return Ok(Json(Vec::new()));
    }

    let results = state
        .engine
        .search_with_timeout(&query, state.settings.search.timeout())
        .await?;

    Ok(Json(results))
}

/// GET /api/recipes - List stored recipes
pub async fn list_recipes(
    State(state): State<AppState>,
    Query(params): Query<ListParams>,
) -> Result<Json<Vec<Recipe>>> {
    debug!("List recipes request: {:?}", params);

    let pagination = &state.settings.pagination;
    let limit = params
        .limit
        .unwrap_or(pagination.api_default_limit)
        .min(pagination.api_max_limit);

    let offset = i64::try_from(params.skip)
        .map_err(|_| Error::Validation(format!("Invalid skip: {}", params.skip)))?;
    let limit = i64::try_from(limit).unwrap_or(i64::MAX);

    let recipes = db::recipes::list_recipes(&state.pool, limit, offset).await?;
    Ok(Json(recipes))
}

/// GET /api/recipes/:id - Get one recipe
pub async fn get_recipe(State(state): State<AppState>, Path(id): Path<i64>) -> Result<Json<Recipe>> {
    debug!("Get recipe request: {}", id);

    let recipe = db::recipes::get_recipe(&state.pool, id).await?;
    Ok(Json(recipe))
}

/// POST /api/recipes - Create a recipe
pub async fn create_recipe(
    State(state): State<AppState>,
    Json(new_recipe): Json<NewRecipe>,
) -> Result<(StatusCode, Json<Recipe>)> {
    debug!("Create recipe request: {}", new_recipe.title);

    let recipe = db::recipes::create_recipe(&state.pool, &new_recipe).await?;
    info!("Created recipe {} ({})", recipe.id, recipe.title);

    Ok((StatusCode::CREATED, Json(recipe)))
}

/// POST /api/bot/messages - Answer a chat message
pub async fn bot_message(
    State(state): State<AppState>,
    Json(message): Json<BotMessage>,
) -> Result<Json<BotReply>> {
    let reply = state
        .bot
        .handle_message(&message.conversation_id, &message.text)
        .await;

    Ok(Json(BotReply { reply }))
}

/// GET /health - Health check endpoint
pub async fn health_check() -> Result<Json<HealthResponse>> {
    Ok(Json(HealthResponse {
        status: "healthy".to_string(),
    }))
}

/// GET /ready - Readiness check endpoint
pub async fn readiness_check(State(state): State<AppState>) -> Result<Json<ReadinessResponse>> {
    let db_healthy = sqlx::query("SELECT 1").fetch_one(&state.pool).await.is_ok();

    Ok(Json(ReadinessResponse {
        ready: db_healthy,
        database: if db_healthy { "ok" } else { "error" }.to_string(),
    }))
}

/// GET / - Service banner
pub async fn root() -> Json<ServiceInfo> {
    Json(ServiceInfo {
        message: format!("CookWizard API v{}", env!("CARGO_PKG_VERSION")),
        endpoints: Endpoints {
            search: "/api/search?ingredients=курица,картошка&title=курица&maxTime=60&difficulty=easy"
                .to_string(),
            search_by_title: "/api/search/title/{title_part}".to_string(),
            all_recipes: "/api/recipes".to_string(),
            get_recipe: "/api/recipes/{id}".to_string(),
            bot: "/api/bot/messages".to_string(),
        },
    })
}
