//! ONNX Runtime classifier. Input: [1, input_dim] f32, output: probability.
//! By default the artifact is loaded on every prediction so a replaced file
//! takes effect immediately; `cache_session` keeps one session instead.

use ndarray::Array2;
use ort::session::{builder::GraphOptimizationLevel, Session};
use ort::value::Tensor;
use sha2::{Digest, Sha256};
use std::path::{Path, PathBuf};
use std::sync::Mutex;

use super::{ModelError, RiskModel};
use crate::config::ModelConfig;
use crate::features::FeatureVector;

fn runtime(e: impl std::fmt::Display) -> ModelError {
    ModelError::Runtime(e.to_string())
}

fn open_session(path: &Path) -> Result<Session, ModelError> {
    if !path.exists() {
        return Err(ModelError::NotFound(path.to_path_buf()));
    }
    let session = Session::builder()
        .map_err(runtime)?
        .with_optimization_level(GraphOptimizationLevel::Level3)
        .map_err(runtime)?
        .commit_from_file(path)
        .map_err(runtime)?;
    tracing::debug!(path = %path.display(), "ONNX session ready");
    Ok(session)
}

fn run(session: &mut Session, features: &FeatureVector) -> Result<f32, ModelError> {
    let input_name = session
        .inputs
        .first()
        .map(|i| i.name.clone())
        .unwrap_or_else(|| "input".to_string());
    let output_name = session
        .outputs
        .first()
        .map(|o| o.name.clone())
        .ok_or(ModelError::EmptyOutput)?;

    let arr = Array2::from_shape_vec((1, features.dim()), features.values.clone())
        .map_err(runtime)?;
    let input = Tensor::from_array(arr).map_err(runtime)?;

    let outputs = session
        .run(ort::inputs![input_name.as_str() => input])
        .map_err(runtime)?;
    let out = outputs
        .get(output_name.as_str())
        .ok_or(ModelError::EmptyOutput)?;
    let (_, data) = out.try_extract_tensor::<f32>().map_err(runtime)?;
    let score = data.first().copied().ok_or(ModelError::EmptyOutput)?;

    if !score.is_finite() {
        return Err(ModelError::NonFinite(score));
    }
    Ok(score.clamp(0.0, 1.0))
}

pub struct OnnxClassifier {
    path: PathBuf,
    input_dim: usize,
    cached: Option<Mutex<Session>>,
}

impl OnnxClassifier {
    /// With `cache_session` the artifact is loaded now and must exist;
    /// otherwise loading is deferred to each prediction.
    pub fn open(config: &ModelConfig, input_dim: usize) -> Result<Self, ModelError> {
        let cached = if config.cache_session {
            Some(Mutex::new(open_session(&config.path)?))
        } else {
            if !config.path.exists() {
                tracing::warn!(path = %config.path.display(), "ONNX model not found; predictions will fail until it is present");
            }
            None
        };
        Ok(Self {
            path: config.path.clone(),
            input_dim,
            cached,
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn is_cached(&self) -> bool {
        self.cached.is_some()
    }
}

impl RiskModel for OnnxClassifier {
    fn predict(&self, features: &FeatureVector) -> Result<f32, ModelError> {
        if features.dim() != self.input_dim {
            return Err(ModelError::InputWidth {
                expected: self.input_dim,
                actual: features.dim(),
            });
        }
        match &self.cached {
            Some(session) => {
                let mut guard = session.lock().map_err(|_| ModelError::Poisoned)?;
                run(&mut guard, features)
            }
            None => {
                let mut session = open_session(&self.path)?;
                run(&mut session, features)
            }
        }
    }
}

/// SHA-256 of the artifact, hex encoded.
pub fn artifact_digest(path: &Path) -> std::io::Result<String> {
    let bytes = std::fs::read(path)?;
    Ok(format!("{:x}", Sha256::digest(&bytes)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    fn features(dim: usize) -> FeatureVector {
        FeatureVector {
            values: vec![0.0; dim],
            request_id: "t".into(),
        }
    }

    #[test]
    fn absent_artifact_fails_at_prediction_time() {
        let config = ModelConfig {
            path: PathBuf::from("nonexistent.onnx"),
            cache_session: false,
        };
        let model = OnnxClassifier::open(&config, 37).unwrap();
        assert!(!model.is_cached());
        assert!(matches!(model.predict(&features(37)), Err(ModelError::NotFound(_))));
    }

    #[test]
    fn absent_artifact_fails_at_open_when_cached() {
        let config = ModelConfig {
            path: PathBuf::from("nonexistent.onnx"),
            cache_session: true,
        };
        assert!(matches!(
            OnnxClassifier::open(&config, 37),
            Err(ModelError::NotFound(_))
        ));
    }

    #[test]
    fn width_is_checked_before_loading() {
        let config = ModelConfig {
            path: PathBuf::from("nonexistent.onnx"),
            cache_session: false,
        };
        let model = OnnxClassifier::open(&config, 37).unwrap();
        assert_eq!(
            model.predict(&features(5)).unwrap_err(),
            ModelError::InputWidth {
                expected: 37,
                actual: 5
            }
        );
    }

    #[test]
    fn digest_is_sha256_hex() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(b"abc").unwrap();
        assert_eq!(
            artifact_digest(file.path()).unwrap(),
            "ba7816bf8f01cfea414140de5dae2223b00361a396177a9cb410ff61f20015ad"
        );
    }
}
