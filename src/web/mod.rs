//! HTTP surface: the form page, its submission, a JSON API and a health check.

pub mod error;
pub mod handlers;
pub mod render;

use axum::{
    routing::{get, post},
    Router,
};
use std::path::PathBuf;
use std::sync::Arc;
use tower_http::trace::TraceLayer;

use crate::model::RiskModel;
use crate::pipeline::RiskPredictor;

pub use error::{AppError, AppResult};

/// Shared application state
pub struct AppState<M> {
    pub predictor: Arc<RiskPredictor<M>>,
    pub model_path: PathBuf,
    /// Artifact fingerprint taken at startup
    pub model_digest: Option<String>,
}

impl<M> Clone for AppState<M> {
    fn clone(&self) -> Self {
        Self {
            predictor: Arc::clone(&self.predictor),
            model_path: self.model_path.clone(),
            model_digest: self.model_digest.clone(),
        }
    }
}

pub fn create_router<M: RiskModel + 'static>(state: AppState<M>) -> Router {
    Router::new()
        .route("/", get(handlers::index))
        .route("/predict", post(handlers::predict_form::<M>))
        .route("/api/v1/predict", post(handlers::predict_json::<M>))
        .route("/health", get(handlers::health::<M>))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// Serve until Ctrl-C.
pub async fn serve(listener: tokio::net::TcpListener, app: Router) -> std::io::Result<()> {
    axum::serve(listener, app)
        .with_graceful_shutdown(async {
            if let Err(e) = tokio::signal::ctrl_c().await {
                tracing::warn!(error = %e, "failed to listen for shutdown signal");
                std::future::pending::<()>().await;
            }
            tracing::info!("shutdown requested");
        })
        .await
}
