//! HTTP surface of the classification service.
//!
//! The router is built around an immutable [`AppState`] that every handler
//! receives by clone. Inference runs on tokio's blocking pool.

pub mod error;
pub mod handlers;
pub mod upload;

pub use error::ApiError;

use crate::core::{EcgError, ServerConfig};
use crate::registry::ModelRegistry;
use axum::Router;
use axum::extract::DefaultBodyLimit;
use axum::http::{HeaderValue, Method, header};
use axum::routing::{get, post};
use std::sync::Arc;
use std::time::Duration;
use tokio::signal;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;
use tracing::{info, warn};

/// State shared by all handlers.
#[derive(Debug, Clone)]
pub struct AppState {
    pub registry: Arc<ModelRegistry>,
}

impl AppState {
    pub fn new(registry: ModelRegistry) -> Self {
        Self {
            registry: Arc::new(registry),
        }
    }
}

/// Builds the application router.
pub fn build_app(state: AppState, config: &ServerConfig) -> Router {
    Router::new()
        .route("/", get(handlers::root))
        .route("/health", get(handlers::health))
        .route("/classes", get(handlers::classes))
        .route("/predict", post(handlers::predict))
        .route("/predict/", post(handlers::predict))
        .route("/predict-batch", post(handlers::predict_batch))
        .route("/predict-batch/", post(handlers::predict_batch))
        .layer(DefaultBodyLimit::max(config.max_upload_bytes))
        .layer(create_cors_layer(&config.cors_allowed_origins))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

fn create_cors_layer(allowed_origins: &[String]) -> CorsLayer {
    let cors = if allowed_origins.is_empty() {
        CorsLayer::new()
            .allow_origin(Any)
            .allow_methods(Any)
            .allow_headers(Any)
    } else {
        let origins: Vec<HeaderValue> = allowed_origins
            .iter()
            .filter_map(|origin| match origin.parse() {
                Ok(value) => Some(value),
                Err(_) => {
                    warn!("ignoring invalid CORS origin '{origin}'");
                    None
                }
            })
            .collect();

        CorsLayer::new()
            .allow_origin(origins)
            .allow_methods([Method::GET, Method::POST, Method::OPTIONS])
            .allow_headers([header::CONTENT_TYPE, header::AUTHORIZATION])
    };

    cors.max_age(Duration::from_secs(3600))
}

/// Binds the listener and serves until Ctrl+C or SIGTERM.
pub async fn serve(config: &ServerConfig, registry: ModelRegistry) -> Result<(), EcgError> {
    let app = build_app(AppState::new(registry), config);
    let addr = config.bind_address();
    let listener = tokio::net::TcpListener::bind(&addr).await?;
    info!("listening on {}", listener.local_addr()?);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("server stopped");
    Ok(())
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = signal::ctrl_c().await {
            warn!("failed to listen for Ctrl+C: {e}");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut sigterm) => {
                sigterm.recv().await;
            }
            Err(e) => {
                warn!("failed to install SIGTERM handler: {e}");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => info!("received Ctrl+C, starting graceful shutdown"),
        _ = terminate => info!("received terminate signal, starting graceful shutdown"),
    }
}
