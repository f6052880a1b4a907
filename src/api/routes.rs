use axum::http::{header, HeaderValue, Method};
use axum::{
    routing::{get, post},
    Router,
};
use std::time::Duration;
use tower_http::{
    compression::CompressionLayer, cors::CorsLayer, limit::RequestBodyLimitLayer,
    set_header::SetResponseHeaderLayer, trace::TraceLayer,
};

use axum::extract::ConnectInfo;
use std::net::{IpAddr, Ipv4Addr, SocketAddr};
use tower_governor::key_extractor::KeyExtractor;

#[cfg(not(test))]
use {
    std::sync::Arc,
    tower_governor::{governor::GovernorConfigBuilder, GovernorLayer},
};

use crate::api::handlers::{self, AppState};
use crate::config::Settings;

/// Rate-limit key: the peer address recorded by
/// `into_make_service_with_connect_info`, or localhost when absent
#[derive(Clone, Copy, Debug)]
pub struct FallbackIpKeyExtractor;

impl KeyExtractor for FallbackIpKeyExtractor {
    type Key = IpAddr;

    fn extract<B>(
        &self,
        req: &axum::http::Request<B>,
    ) -> Result<Self::Key, tower_governor::GovernorError> {
        if let Some(ConnectInfo(addr)) = req.extensions().get::<ConnectInfo<SocketAddr>>() {
            return Ok(addr.ip());
        }

        Ok(IpAddr::V4(Ipv4Addr::LOCALHOST))
    }
}

/// Create the router with all endpoints
pub fn create_router(state: AppState, settings: &Settings) -> Router {
    #[cfg_attr(test, allow(unused_mut))]
    let mut api_routes = Router::new()
        // Search
        .route("/search", get(handlers::search_recipes))
        .route("/search/title/:title_part", get(handlers::search_by_title))
        // Recipes
        .route(
            "/recipes",
            get(handlers::list_recipes).post(handlers::create_recipe),
        )
        .route("/recipes/:id", get(handlers::get_recipe))
        // Chat
        .route("/bot/messages", post(handlers::bot_message))
        .with_state(state.clone());

    // Rate limiting is left out of test builds, which have no peer address
    #[cfg(not(test))]
    {
        let per_second = settings.server.api_rate_limit.max(1);
        let burst_size = u32::try_from(per_second.saturating_mul(2)).unwrap_or(u32::MAX);

        if let Some(config) = GovernorConfigBuilder::default()
            .key_extractor(FallbackIpKeyExtractor)
            .per_second(per_second)
            .burst_size(burst_size)
            .finish()
        {
            api_routes = api_routes.layer(GovernorLayer {
                config: Arc::new(config),
            });
        } else {
            tracing::warn!("Invalid rate limit configuration, API rate limiting disabled");
        }
    }

    let api_routes = api_routes;

    let service_routes = Router::new()
        .route("/", get(handlers::root))
        .route("/health", get(handlers::health_check))
        .route("/ready", get(handlers::readiness_check))
        .with_state(state);

    Router::new()
        .merge(service_routes)
        .nest("/api", api_routes)
        .layer(
            // Request body size limit
            RequestBodyLimitLayer::new(settings.pagination.max_request_body_size),
        )
        .layer(
            CorsLayer::new()
                .allow_methods([Method::GET, Method::POST, Method::OPTIONS])
                .allow_headers([header::CONTENT_TYPE, header::ACCEPT])
                .allow_origin(tower_http::cors::Any)
                .max_age(Duration::from_secs(3600)),
        )
        .layer(SetResponseHeaderLayer::if_not_present(
            header::X_CONTENT_TYPE_OPTIONS,
            HeaderValue::from_static("nosniff"),
        ))
        .layer(SetResponseHeaderLayer::if_not_present(
            header::X_FRAME_OPTIONS,
            HeaderValue::from_static("DENY"),
        ))
        .layer(CompressionLayer::new())
        .layer(TraceLayer::new_for_http())
}
