//! HTTP handlers

use axum::{
    extract::{rejection::JsonRejection, State},
    http::StatusCode,
    response::{Html, IntoResponse, Response},
    Form, Json,
};
use serde::Serialize;
use std::collections::HashMap;
use std::sync::Arc;

use super::error::{AppError, AppResult};
use super::render::{self, Banner};
use super::AppState;
use crate::form::{HealthRecord, InputRecord};
use crate::model::RiskModel;
use crate::pipeline::{PredictionOutcome, RiskPredictor};
use crate::risk::RiskLevel;

async fn run_blocking<M: RiskModel + 'static>(
    predictor: Arc<RiskPredictor<M>>,
    record: InputRecord,
) -> AppResult<PredictionOutcome> {
    let outcome = tokio::task::spawn_blocking(move || predictor.predict_risk(&record)).await??;
    Ok(outcome)
}

pub async fn index() -> Html<String> {
    let values = render::display_values(&InputRecord::from(HealthRecord::default()));
    Html(render::page(&values, None))
}

pub async fn predict_form<M: RiskModel + 'static>(
    State(state): State<AppState<M>>,
    Form(form): Form<HashMap<String, String>>,
) -> Response {
    let mut values = render::display_values(&InputRecord::from(HealthRecord::default()));
    values.extend(form.iter().map(|(k, v)| (k.clone(), v.clone())));

    let outcome = match InputRecord::from_form(&form) {
        Err(e) => Err(AppError::Unprocessable(e.to_string())),
        Ok(record) => run_blocking(state.predictor.clone(), record).await,
    };
    let (status, banner) = match outcome {
        Ok(PredictionOutcome::Scored(a)) => (StatusCode::OK, Banner::Result(a)),
        Ok(PredictionOutcome::Rejected { message }) | Err(AppError::Unprocessable(message)) => {
            (StatusCode::OK, Banner::Error(message))
        }
        Err(AppError::Internal(msg)) => {
            tracing::error!(error = %msg, "prediction failed");
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                Banner::Error("Prediction failed".to_string()),
            )
        }
    };
    (status, Html(render::page(&values, Some(&banner)))).into_response()
}

#[derive(Debug, Serialize)]
pub struct PredictResponse {
    pub request_id: String,
    pub probability: f32,
    pub risk_level: RiskLevel,
    pub score_percent: u8,
}

pub async fn predict_json<M: RiskModel + 'static>(
    State(state): State<AppState<M>>,
    payload: Result<Json<InputRecord>, JsonRejection>,
) -> AppResult<Json<PredictResponse>> {
    let Json(record) = payload.map_err(|rej| AppError::Unprocessable(rej.body_text()))?;
    match run_blocking(state.predictor.clone(), record).await? {
        PredictionOutcome::Scored(a) => Ok(Json(PredictResponse {
            score_percent: a.score_percent(),
            request_id: a.request_id,
            probability: a.probability,
            risk_level: a.level,
        })),
        PredictionOutcome::Rejected { message } => Err(AppError::Unprocessable(message)),
    }
}

#[derive(Debug, Serialize)]
pub struct HealthResponse {
    status: &'static str,
    version: &'static str,
    timestamp: i64,
    model_present: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    model_sha256: Option<String>,
    preprocessing: &'static str,
}

pub async fn health<M: RiskModel + 'static>(State(state): State<AppState<M>>) -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "healthy",
        version: env!("CARGO_PKG_VERSION"),
        timestamp: chrono::Utc::now().timestamp(),
        model_present: state.model_path.exists(),
        model_sha256: state.model_digest.clone(),
        preprocessing: state.predictor.encoder().mode(),
    })
}
