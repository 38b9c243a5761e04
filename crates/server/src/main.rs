//! Food catalog server entry point.

use std::sync::Arc;
use std::time::Duration;

use axum::{Router, middleware, routing::get};
use catalog_api::{health, middleware::AppState, router as api_router};
use catalog_common::Config;
use catalog_core::{FoodGroupService, ProductService, UserService};
use catalog_db::repositories::{
    CategoryRepository, FoodGroupRepository, ProductRepository, UserRepository,
};
use tokio::signal;
use tower_http::{
    cors::{Any, CorsLayer},
    timeout::TimeoutLayer,
    trace::TraceLayer,
};
use tracing::{error, info};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

/// Waits for a shutdown signal (SIGINT or SIGTERM).
///
/// On Unix systems, this listens for both SIGINT (Ctrl+C) and SIGTERM.
/// On Windows, this only listens for Ctrl+C.
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = signal::ctrl_c().await {
            error!(error = %e, "Failed to install Ctrl+C handler");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut stream) => {
                stream.recv().await;
            }
            Err(e) => {
                error!(error = %e, "Failed to install SIGTERM handler");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        () = ctrl_c => {
            info!("Received SIGINT, initiating graceful shutdown...");
        },
        () = terminate => {
            info!("Received SIGTERM, initiating graceful shutdown...");
        },
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // A missing .env file is fine
    dotenvy::dotenv().ok();

    tracing_subscriber::registry()
        .with(tracing_subscriber::fmt::layer())
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "catalog=debug,tower_http=debug".into()),
        )
        .init();

    info!("Starting food catalog server...");

    let config = Config::load()?;

    let db = catalog_db::init(&config).await?;
    info!("Connected to database");

    if config.database.run_migrations {
        info!("Running database migrations...");
        catalog_db::migrate(&db).await?;
        info!("Migrations completed");
    }

    let db = Arc::new(db);

    // Repositories
    let category_repo = CategoryRepository::new(Arc::clone(&db));
    let food_group_repo = FoodGroupRepository::new(Arc::clone(&db));
    let product_repo = ProductRepository::new(Arc::clone(&db));
    let user_repo = UserRepository::new(Arc::clone(&db));

    // Services
    let state = AppState {
        food_group_service: FoodGroupService::new(food_group_repo.clone()),
        product_service: ProductService::new(product_repo, category_repo, food_group_repo),
        user_service: UserService::new(user_repo),
    };

    let app = Router::new()
        .route("/health", get(health))
        .nest("/api", api_router())
        .layer(middleware::from_fn_with_state(
            state.clone(),
            catalog_api::middleware::auth_middleware,
        ))
        .layer(TimeoutLayer::new(Duration::from_secs(
            config.server.request_timeout_secs,
        )))
        .layer(TraceLayer::new_for_http())
        .layer(
            CorsLayer::new()
                .allow_origin(Any)
                .allow_methods(Any)
                .allow_headers(Any),
        )
        .with_state(state);

    let addr = config.bind_address();
    info!("Listening on {}", addr);

    let listener = tokio::net::TcpListener::bind(&addr).await?;
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("Server shutdown complete");
    Ok(())
}
