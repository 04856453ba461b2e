//! Stargaze - Application Entry Point
//!
//! This is the main entry point for the Stargaze user service.

use std::net::SocketAddr;
use std::sync::Arc;

use axum::{middleware, Router};
use redis::Client as RedisClient;
use tokio::net::TcpListener;
use tower_http::{
    compression::CompressionLayer,
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use stargaze::{
    config::Config,
    constants::API_BASE_PATH,
    db,
    db::repositories::{PgFollowStore, PgUserStore},
    handlers,
    middleware::{logging_middleware, RedisRateLimiter},
    services::{FollowService, UserService},
    state::AppState,
};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = Config::from_env()?;

    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| config.server.rust_log.clone().into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    tracing::info!("Starting Stargaze user service...");

    // Initialize database connection pool
    tracing::info!("Connecting to database...");
    let db_pool = db::create_pool(&config.database).await?;
    db::test_connection(&db_pool).await?;

    // Run database migrations
    tracing::info!("Running database migrations...");
    db::run_migrations(&db_pool).await?;

    // Initialize Redis connection
    tracing::info!("Connecting to Redis...");
    let redis_client = RedisClient::open(config.redis.url.as_str())?;
    let redis_conn = redis::aio::ConnectionManager::new(redis_client).await?;

    // Wire up services over the Postgres stores
    let user_store = Arc::new(PgUserStore::new(db_pool.clone()));
    let follow_store = Arc::new(PgFollowStore::new(db_pool));
    let user_service = UserService::new(user_store.clone(), config.storage.clone());
    let follow_service = FollowService::new(follow_store, user_store);
    let limiter = Arc::new(RedisRateLimiter::new(redis_conn));

    // Create application state
    let state = AppState::new(user_service, follow_service, limiter, config.clone());

    // Build the router
    let app = Router::new()
        .nest(API_BASE_PATH, handlers::routes(state.clone()))
        .layer(middleware::from_fn(logging_middleware))
        .layer(TraceLayer::new_for_http())
        .layer(CompressionLayer::new())
        .layer(
            CorsLayer::new()
                .allow_origin(Any)
                .allow_methods(Any)
                .allow_headers(Any),
        )
        .with_state(state);

    // Start the server
    let addr = SocketAddr::new(config.server.host.parse()?, config.server.port);
    let listener = TcpListener::bind(addr).await?;

    tracing::info!("Server listening on http://{}", addr);

    axum::serve(listener, app).await?;

    Ok(())
}
