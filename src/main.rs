//! CVD risk predictor entrypoint: loads config and artifacts, then serves the
//! form until Ctrl-C.

use anyhow::Context;
use cvd_risk::{
    config::AppConfig,
    features::{FeatureEncoder, MODEL_FEATURES},
    logging,
    model::{artifact_digest, OnnxClassifier},
    pipeline::RiskPredictor,
    web::{self, AppState},
};
use std::sync::Arc;
use tracing::{info, warn};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config_path = AppConfig::default_path();
    let config = AppConfig::load(&config_path)?;

    logging::init(&config.log)?;
    info!(config = %config_path.display(), "CVD risk predictor starting");

    let encoder = FeatureEncoder::from_config(&config.preprocessing)
        .context("loading preprocessing artifact")?;
    let model = OnnxClassifier::open(&config.model, MODEL_FEATURES.len())
        .context("loading model")?;

    let model_digest = match artifact_digest(&config.model.path) {
        Ok(d) => {
            info!(path = %config.model.path.display(), sha256 = %d, cached = model.is_cached(), "model artifact");
            Some(d)
        }
        Err(e) => {
            warn!(path = %config.model.path.display(), error = %e, "model artifact unreadable");
            None
        }
    };

    let state = AppState {
        predictor: Arc::new(RiskPredictor::new(encoder, model)),
        model_path: config.model.path.clone(),
        model_digest,
    };
    let app = web::create_router(state);

    let addr = config.bind_addr();
    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .with_context(|| format!("binding {addr}"))?;
    info!(%addr, "listening");

    web::serve(listener, app).await?;
    info!("CVD risk predictor stopped");
    Ok(())
}
