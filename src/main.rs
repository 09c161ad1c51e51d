//! Local Library Server
//!
//! REST API server for the library catalog and its administration.

use anyhow::Context;
use axum::{
    routing::get,
    Router,
};
use sqlx::postgres::PgPoolOptions;
use std::net::SocketAddr;
use std::sync::Arc;
use tower_http::{
    compression::CompressionLayer,
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use locallibrary_server::{
    api,
    config::{AppConfig, SessionBackend},
    repository::Repository,
    services::{
        session::{MemorySessionStore, RedisSessionStore, SessionStore},
        Services,
    },
    AppState,
};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load environment variables from .env file
    dotenvy::dotenv().ok();

    // Load configuration
    let config = AppConfig::load().context("Failed to load configuration")?;

    // Initialize tracing
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| format!("locallibrary_server={},tower_http=debug", config.logging.level).into());

    let registry = tracing_subscriber::registry().with(filter);
    if config.logging.format == "json" {
        registry.with(tracing_subscriber::fmt::layer().json()).init();
    } else {
        registry.with(tracing_subscriber::fmt::layer()).init();
    }

    tracing::info!("Starting Local Library Server v{}", env!("CARGO_PKG_VERSION"));

    // Create database connection pool
    let pool = PgPoolOptions::new()
        .max_connections(config.database.max_connections)
        .min_connections(config.database.min_connections)
        .connect(&config.database.url)
        .await
        .context("Failed to connect to database")?;

    tracing::info!("Connected to database");

    // Run migrations
    sqlx::migrate!("./migrations")
        .run(&pool)
        .await
        .context("Failed to run database migrations")?;

    tracing::info!("Database migrations completed");

    // Session store for visit counters
    let sessions: Arc<dyn SessionStore> = match config.session.backend {
        SessionBackend::Redis => {
            let store = RedisSessionStore::new(&config.session.redis_url, config.session.ttl_seconds)
                .await
                .context("Failed to connect to Redis")?;
            tracing::info!("Connected to Redis");
            Arc::new(store)
        }
        SessionBackend::Memory => {
            tracing::warn!("Using in-memory session store; visit counters are lost on restart");
            Arc::new(MemorySessionStore::default())
        }
    };

    let addr = SocketAddr::new(
        config.server.host.parse().context("Invalid host address")?,
        config.server.port,
    );

    // Create repository and services
    let repository = Repository::new(pool);
    let services = Services::new(repository, &config.catalog, sessions);

    // Create application state
    let state = AppState {
        config: Arc::new(config),
        services: Arc::new(services),
    };

    // Build router
    let app = create_router(state);

    tracing::info!("Server listening on http://{}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}

/// Create the application router with all routes
fn create_router(state: AppState) -> Router {
    // CORS configuration
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    // API v1 routes
    let api_v1 = Router::new()
        // Health check
        .route("/health", get(api::health::health_check))
        .route("/ready", get(api::health::readiness_check))
        // Catalog
        .route("/catalog", get(api::catalog::index))
        .route("/catalog/books", get(api::catalog::list_books))
        .route("/catalog/books/:id", get(api::catalog::get_book))
        .route("/catalog/authors", get(api::catalog::list_authors))
        .route("/catalog/authors/:id", get(api::catalog::get_author))
        // Admin: genres
        .route(
            "/admin/genres",
            get(api::genres::list_genres).post(api::genres::create_genre),
        )
        .route(
            "/admin/genres/:id",
            get(api::genres::get_genre)
                .put(api::genres::update_genre)
                .delete(api::genres::delete_genre),
        )
        // Admin: languages
        .route(
            "/admin/languages",
            get(api::languages::list_languages).post(api::languages::create_language),
        )
        .route(
            "/admin/languages/:id",
            get(api::languages::get_language)
                .put(api::languages::update_language)
                .delete(api::languages::delete_language),
        )
        // Admin: authors
        .route(
            "/admin/authors",
            get(api::authors::list_authors).post(api::authors::create_author),
        )
        .route(
            "/admin/authors/:id",
            get(api::authors::get_author)
                .put(api::authors::update_author)
                .delete(api::authors::delete_author),
        )
        // Admin: books
        .route(
            "/admin/books",
            get(api::books::list_books).post(api::books::create_book),
        )
        .route(
            "/admin/books/:id",
            get(api::books::get_book)
                .put(api::books::update_book)
                .delete(api::books::delete_book),
        )
        // Admin: book instances
        .route(
            "/admin/book-instances",
            get(api::book_instances::list_book_instances).post(api::book_instances::create_book_instance),
        )
        .route(
            "/admin/book-instances/:id",
            get(api::book_instances::get_book_instance)
                .put(api::book_instances::update_book_instance)
                .delete(api::book_instances::delete_book_instance),
        )
        // Admin: layouts and choices
        .route("/admin/layouts/:model", get(api::admin::get_layout))
        .route("/admin/borrowers", get(api::admin::list_borrowers))
        .with_state(state);

    // OpenAPI documentation
    let openapi = api::openapi::create_openapi_router();

    Router::new()
        .nest("/api/v1", api_v1)
        .merge(openapi)
        .layer(TraceLayer::new_for_http())
        .layer(CompressionLayer::new())
        .layer(cors)
}
