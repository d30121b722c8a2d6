//! CVD risk predictor: health form → feature encoding → ONNX classifier → risk level.
//!
//! Modular structure:
//! - [`form`] — Field catalog, typed health record, flat input record
//! - [`features`] — Column selection, label encoding, standardization
//! - [`model`] — ONNX classifier behind the [`RiskModel`] trait
//! - [`risk`] — Probability → Low / Medium / High
//! - [`pipeline`] — The above, end to end, for one request
//! - [`web`] — Axum routes and HTML rendering
//! - [`logging`] — Structured JSON logging

pub mod config;
pub mod features;
pub mod form;
pub mod logging;
pub mod model;
pub mod pipeline;
pub mod risk;
pub mod web;

pub use config::AppConfig;
pub use features::{FeatureEncoder, FeatureVector};
pub use form::{HealthRecord, InputRecord};
pub use model::{OnnxClassifier, RiskModel};
pub use pipeline::{PredictionOutcome, RiskPredictor};
pub use risk::{RiskAssessment, RiskLevel};
