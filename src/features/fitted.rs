//! Encoding vocabularies and scaler statistics fitted at training time and
//! shipped next to the model as JSON.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use super::encoder::EncodeError;
use crate::form::FieldValue;

#[derive(Debug, thiserror::Error)]
pub enum ArtifactError {
    #[error("failed to read preprocessing artifact {path}: {source}")]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("malformed preprocessing artifact {path}: {source}")]
    Parse {
        path: PathBuf,
        source: serde_json::Error,
    },
    #[error("inconsistent preprocessing artifact: {0}")]
    Inconsistent(String),
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FittedPreprocessing {
    /// Column order the statistics were fitted on
    pub features: Vec<String>,
    /// Label-encoding classes per textual column; code = position
    #[serde(default)]
    pub vocabularies: BTreeMap<String, Vec<String>>,
    pub mean: Vec<f64>,
    pub scale: Vec<f64>,
}

impl FittedPreprocessing {
    pub fn load(path: &Path) -> Result<Self, ArtifactError> {
        let data = std::fs::read_to_string(path).map_err(|source| ArtifactError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        let params: Self = serde_json::from_str(&data).map_err(|source| ArtifactError::Parse {
            path: path.to_path_buf(),
            source,
        })?;
        params.check()?;
        Ok(params)
    }

    /// Structural consistency: one mean/scale per feature, finite statistics,
    /// vocabularies only for known columns.
    pub fn check(&self) -> Result<(), ArtifactError> {
        let n = self.features.len();
        if self.mean.len() != n || self.scale.len() != n {
            return Err(ArtifactError::Inconsistent(format!(
                "{n} features but {} means and {} scales",
                self.mean.len(),
                self.scale.len()
            )));
        }
        if let Some(i) = self
            .mean
            .iter()
            .chain(self.scale.iter())
            .position(|v| !v.is_finite())
        {
            return Err(ArtifactError::Inconsistent(format!(
                "non-finite statistic at index {}",
                i % n.max(1)
            )));
        }
        if let Some(col) = self
            .vocabularies
            .keys()
            .find(|k| !self.features.iter().any(|f| f == *k))
        {
            return Err(ArtifactError::Inconsistent(format!(
                "vocabulary for unknown column {col}"
            )));
        }
        Ok(())
    }

    /// Encode one selected row, columns already in `features` order.
    pub(crate) fn transform(&self, row: &[&FieldValue]) -> Result<Vec<f32>, EncodeError> {
        row.iter()
            .enumerate()
            .map(|(i, value)| {
                let feature = &self.features[i];
                let raw = match self.vocabularies.get(feature) {
                    Some(classes) => {
                        let text = value.to_string();
                        classes
                            .iter()
                            .position(|c| *c == text)
                            .ok_or_else(|| EncodeError::UnknownCategory {
                                feature: feature.clone(),
                                value: text,
                            })? as f64
                    }
                    None => value.as_number().ok_or_else(|| EncodeError::NotNumeric {
                        feature: feature.clone(),
                        value: value.to_string(),
                    })?,
                };
                let scale = if self.scale[i] == 0.0 { 1.0 } else { self.scale[i] };
                Ok(((raw - self.mean[i]) / scale) as f32)
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    fn params() -> FittedPreprocessing {
        FittedPreprocessing {
            features: vec!["Sex".into(), "BMI".into()],
            vocabularies: BTreeMap::from([(
                "Sex".to_string(),
                vec!["Female".to_string(), "Male".to_string()],
            )]),
            mean: vec![0.5, 28.0],
            scale: vec![0.5, 4.0],
        }
    }

    #[test]
    fn transform_applies_vocabulary_then_scaling() {
        let sex = FieldValue::Text("Male".into());
        let bmi = FieldValue::Float(32.0);
        let out = params().transform(&[&sex, &bmi]).unwrap();
        assert_eq!(out, vec![1.0, 1.0]);
    }

    #[test]
    fn unseen_category_is_rejected() {
        let sex = FieldValue::Text("Other".into());
        let bmi = FieldValue::Float(32.0);
        let err = params().transform(&[&sex, &bmi]).unwrap_err();
        assert!(matches!(err, EncodeError::UnknownCategory { ref feature, .. } if feature == "Sex"));
    }

    #[test]
    fn text_in_numeric_column_is_rejected() {
        let sex = FieldValue::Text("Female".into());
        let bmi = FieldValue::Text("heavy".into());
        let err = params().transform(&[&sex, &bmi]).unwrap_err();
        assert!(matches!(err, EncodeError::NotNumeric { .. }));
    }

    #[test]
    fn load_rejects_length_mismatch() {
        let mut p = params();
        p.scale.pop();
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, "{}", serde_json::to_string(&p).unwrap()).unwrap();
        assert!(matches!(
            FittedPreprocessing::load(file.path()),
            Err(ArtifactError::Inconsistent(_))
        ));
    }

    #[test]
    fn load_reads_valid_artifact() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, "{}", serde_json::to_string(&params()).unwrap()).unwrap();
        assert_eq!(FittedPreprocessing::load(file.path()).unwrap(), params());
    }
}
