//! Userbase Server
//!
//! HTTP service exposing create/list/get over the user resource, backed by
//! either an in-memory map or an embedded SQLite table.

mod error;
mod handlers;
mod logging;
mod settings;
mod storage;

use anyhow::{Context, Result};
use axum::{response::IntoResponse, response::Response, routing::get, Router};
use std::any::Any;
use std::path::Path;
use std::sync::Arc;
use tower_http::catch_panic::CatchPanicLayer;
use tower_http::trace::TraceLayer;
use tracing::{error, info, warn};
use userbase_core::UserRepository;

use error::ApiError;
use settings::{ServerConfig, StorageKind};
use storage::{MemoryUserRepository, SqliteUserRepository};

/// `DATABASE_PATH` value selecting a private in-memory SQLite database.
const IN_MEMORY_DATABASE: &str = ":memory:";

/// Application state shared across handlers
#[derive(Clone)]
pub struct AppState {
    pub users: Arc<dyn UserRepository>,
}

#[tokio::main]
async fn main() {
    // Set up panic hook to log crashes
    std::panic::set_hook(Box::new(|info| {
        let location = info
            .location()
            .map(|l| format!("{}:{}", l.file(), l.line()));
        let payload = panic_message(info.payload());
        eprintln!("[PANIC] at {:?}: {}", location, payload);
        tracing::error!("PANIC at {:?}: {}", location, payload);
    }));

    let config = match ServerConfig::from_env() {
        Ok(config) => config,
        Err(e) => {
            eprintln!("[FATAL] {}", e);
            std::process::exit(1);
        }
    };

    if let Err(e) = logging::init_tracing(&config.log_level) {
        eprintln!("[FATAL] {:#}", e);
        std::process::exit(1);
    }

    info!("Starting Userbase Server v{}", env!("CARGO_PKG_VERSION"));
    info!("PID: {}", std::process::id());

    if let Err(e) = run_server(config).await {
        error!("Server failed: {:#}", e);
        std::process::exit(1);
    }
}

async fn run_server(config: ServerConfig) -> Result<()> {
    info!(
        "Config loaded: bind={}, storage={}",
        config.bind_address, config.storage
    );

    let (users, database) = open_storage(&config)
        .await
        .context("Failed to initialize storage")?;

    let app = router(AppState { users });

    let listener = tokio::net::TcpListener::bind(config.bind_address)
        .await
        .context("Failed to bind to address")?;
    info!("Server listening on {}", config.bind_address);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("Server error")?;

    if let Some(database) = database {
        database.close().await;
        info!("Database connections closed");
    }

    info!("Server stopped");
    Ok(())
}

/// Build the configured repository. The SQLite handle is also returned on
/// its own so its pool can be closed on shutdown.
async fn open_storage(
    config: &ServerConfig,
) -> Result<(Arc<dyn UserRepository>, Option<Arc<SqliteUserRepository>>)> {
    match config.storage {
        StorageKind::Memory => {
            info!("Using in-memory user store");
            let users: Arc<dyn UserRepository> = Arc::new(MemoryUserRepository::new());
            Ok((users, None))
        }
        StorageKind::Sqlite => {
            let database = if config.database_path == Path::new(IN_MEMORY_DATABASE) {
                warn!("Using in-memory SQLite database, data will not persist");
                SqliteUserRepository::in_memory().await?
            } else {
                SqliteUserRepository::new(&config.database_path, config.max_connections).await?
            };
            let database = Arc::new(database);
            let users: Arc<dyn UserRepository> = database.clone();
            Ok((users, Some(database)))
        }
    }
}

pub fn router(state: AppState) -> Router {
    with_middleware(routes()).with_state(state)
}

fn routes() -> Router<AppState> {
    Router::new()
        .route("/health", get(handlers::health))
        .route(
            "/users",
            get(handlers::users::list).post(handlers::users::create),
        )
        .route("/user/:id", get(handlers::users::get))
}

fn with_middleware(routes: Router<AppState>) -> Router<AppState> {
    routes
        .layer(CatchPanicLayer::custom(handle_panic))
        .layer(TraceLayer::new_for_http())
}

fn handle_panic(err: Box<dyn Any + Send + 'static>) -> Response {
    error!("Handler panicked: {}", panic_message(err.as_ref()));
    ApiError::internal("Internal Server Error").into_response()
}

fn panic_message(payload: &(dyn Any + Send)) -> String {
    if let Some(s) = payload.downcast_ref::<&str>() {
        s.to_string()
    } else if let Some(s) = payload.downcast_ref::<String>() {
        s.clone()
    } else {
        "Unknown panic".to_string()
    }
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        warn!("Failed to listen for shutdown signal: {}", e);
        std::future::pending::<()>().await;
    }
    info!("Shutdown signal received");
}
