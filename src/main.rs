use clap::Parser;
use cookwizard::{
    api::{handlers::AppState, routes},
    cli::{Cli, Commands},
    config::Settings,
    db,
    search::SearchParams,
    Error, Result,
};
use std::net::SocketAddr;
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> Result<()> {
    // Load environment variables from .env file if it exists
    let _ = dotenvy::dotenv();

    // Initialize logging
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info,cookwizard=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let cli = Cli::parse();

    let settings = Settings::from_env()?;
    settings.validate()?;

    match cli.command {
        Commands::Serve { port, host } => {
            serve(settings, port, host).await?;
        }
        Commands::Migrate => {
            migrate(settings).await?;
        }
        Commands::Seed => {
            seed(settings).await?;
        }
        Commands::Search {
            ingredients,
            title,
            max_time,
            difficulty,
        } => {
            let params = SearchParams {
                ingredients,
                title,
                max_time: max_time.map(|minutes| minutes.to_string()),
                difficulty,
            };
            cookwizard::cli::commands::search(&settings.server_url(), params).await?;
        }
    }

    Ok(())
}

async fn serve(mut settings: Settings, port: Option<u16>, host: Option<String>) -> Result<()> {
    // Override settings with CLI arguments
    if let Some(port) = port {
        settings.server.port = port;
    }
    if let Some(host) = host {
        settings.server.host = host;
    }

    info!("Starting CookWizard server");
    info!("Database: {}", settings.database.url);
    info!("Server: {}:{}", settings.server.host, settings.server.port);

    let pool = db::init_pool_with_config(&settings.database).await?;
    info!(
        "Database connection established (max_connections: {}, min_connections: {})",
        settings.database.max_connections, settings.database.min_connections
    );

    db::run_migrations(&pool).await?;
    info!("Database migrations completed");

    let seeded = db::seed::seed_database(&pool).await?;
    if seeded > 0 {
        info!("Loaded {} sample recipes into empty database", seeded);
    }

    let state = AppState::new(pool, settings.clone());

    // Expired conversations are dropped in the background
    let _sweeper = state
        .bot
        .sessions()
        .start_sweeper(settings.session.sweep_interval());

    let app = routes::create_router(state, &settings);

    let addr = format!("{}:{}", settings.server.host, settings.server.port);
    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .map_err(|e| Error::Internal(format!("Failed to bind to {addr}: {e}")))?;

    println!("\n========================================");
    println!("CookWizard Server");
    println!("========================================");
    println!("Status: Running");
    println!("Address: http://{addr}");
    println!("Database: Connected");
    println!("Search timeout: {}s", settings.search.timeout_seconds);
    println!("\nAPI Endpoints:");
    println!("  GET  /api/search");
    println!("  GET  /api/search/title/:title_part");
    println!("  GET  /api/recipes");
    println!("  POST /api/recipes");
    println!("  GET  /api/recipes/:id");
    println!("  POST /api/bot/messages");
    println!("\nPress Ctrl+C to stop");
    println!("========================================\n");

    info!("Server listening on {}", addr);

    // Peer addresses feed the per-client rate limit
    axum::serve(
        listener,
        app.into_make_service_with_connect_info::<SocketAddr>(),
    )
    .await
        .map_err(|e| Error::Internal(format!("Server error: {e}")))?;

    info!("Shutting down...");
    Ok(())
}

async fn migrate(settings: Settings) -> Result<()> {
    info!("Running database migrations");

    let pool = db::init_pool(&settings.database.url).await?;
    db::run_migrations(&pool).await?;

    println!("✓ Database migrations completed successfully");
    Ok(())
}

async fn seed(settings: Settings) -> Result<()> {
    let pool = db::init_pool(&settings.database.url).await?;
    db::run_migrations(&pool).await?;

    match db::seed::seed_database(&pool).await? {
        0 => println!("Database already has recipes, nothing to seed"),
        count => println!("✓ Seeded {count} sample recipes"),
    }
    Ok(())
}
