//! Pre-trained heart-attack classifier.

mod onnx;

pub use onnx::{artifact_digest, OnnxClassifier};

use crate::features::FeatureVector;
use std::path::PathBuf;

#[derive(Debug, thiserror::Error, PartialEq)]
pub enum ModelError {
    #[error("model artifact not found: {0}")]
    NotFound(PathBuf),
    #[error("inference failed: {0}")]
    Runtime(String),
    #[error("model expects {expected} features, got {actual}")]
    InputWidth { expected: usize, actual: usize },
    #[error("model produced no output")]
    EmptyOutput,
    #[error("model produced a non-finite probability: {0}")]
    NonFinite(f32),
    #[error("model session lock poisoned")]
    Poisoned,
}

/// Anything that turns an encoded row into a probability in [0, 1].
pub trait RiskModel: Send + Sync {
    fn predict(&self, features: &FeatureVector) -> Result<f32, ModelError>;
}
