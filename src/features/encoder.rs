//! Input record → selected columns → label encoding → standardization → vector.

use std::collections::BTreeSet;

use super::fitted::{ArtifactError, FittedPreprocessing};
use super::{FeatureVector, MODEL_FEATURES};
use crate::config::PreprocessingConfig;
use crate::form::{lookup, FieldKind, FieldValue, InputRecord};

/// Variances below this are treated as zero (scale 1).
const MIN_VARIANCE: f64 = 1e-12;

#[derive(Debug, thiserror::Error, PartialEq)]
pub enum EncodeError {
    #[error("Missing required feature: {}", .0.join(", "))]
    MissingFeature(Vec<String>),
    #[error("Unknown value '{value}' for {feature}")]
    UnknownCategory { feature: String, value: String },
    #[error("Expected a number for {feature}, got '{value}'")]
    NotNumeric { feature: String, value: String },
}

/// How textual columns are encoded and how columns are scaled.
#[derive(Debug, Clone)]
pub enum Preprocessing {
    /// Label encoding and scaling fitted on the submitted row itself. A single
    /// row always standardizes to zeros, so the model sees the same input for
    /// every request. Kept for artifacts exported without fitted statistics.
    PerRequest,
    /// Statistics fitted at training time.
    Fitted(FittedPreprocessing),
}

pub struct FeatureEncoder {
    features: Vec<String>,
    preprocessing: Preprocessing,
}

impl FeatureEncoder {
    pub fn new(features: &[&str], preprocessing: Preprocessing) -> Result<Self, ArtifactError> {
        let features: Vec<String> = features.iter().map(|f| f.to_string()).collect();
        if let Preprocessing::Fitted(ref params) = preprocessing {
            if params.features != features {
                return Err(ArtifactError::Inconsistent(
                    "feature order differs from the model input".to_string(),
                ));
            }
            check_vocabularies(params)?;
        }
        Ok(Self {
            features,
            preprocessing,
        })
    }

    /// Model feature order, fitted artifact when present on disk.
    pub fn from_config(config: &PreprocessingConfig) -> Result<Self, ArtifactError> {
        let preprocessing = if config.path.exists() {
            let params = FittedPreprocessing::load(&config.path)?;
            tracing::info!(path = %config.path.display(), "loaded fitted preprocessing");
            Preprocessing::Fitted(params)
        } else {
            tracing::warn!(
                path = %config.path.display(),
                "preprocessing artifact not found; encoding is fitted per request and degenerate for single rows"
            );
            Preprocessing::PerRequest
        };
        Self::new(&MODEL_FEATURES, preprocessing)
    }

    pub fn features(&self) -> &[String] {
        &self.features
    }

    pub fn mode(&self) -> &'static str {
        match self.preprocessing {
            Preprocessing::PerRequest => "per_request",
            Preprocessing::Fitted(_) => "fitted",
        }
    }

    /// Pick the configured columns in order; every absent one is reported.
    pub fn select<'a>(&self, record: &'a InputRecord) -> Result<Vec<&'a FieldValue>, EncodeError> {
        let mut row = Vec::with_capacity(self.features.len());
        let mut missing = Vec::new();
        for name in &self.features {
            match record.get(name) {
                Some(v) => row.push(v),
                None => missing.push(name.clone()),
            }
        }
        if missing.is_empty() {
            Ok(row)
        } else {
            Err(EncodeError::MissingFeature(missing))
        }
    }

    pub fn encode(&self, record: &InputRecord, request_id: &str) -> Result<FeatureVector, EncodeError> {
        let row = self.select(record)?;
        let values = match &self.preprocessing {
            Preprocessing::PerRequest => fit_transform(&[row])
                .pop()
                .unwrap_or_default(),
            Preprocessing::Fitted(params) => params.transform(&row)?,
        };
        tracing::debug!(request_id, mode = self.mode(), dim = values.len(), "encoded features");
        Ok(FeatureVector {
            values,
            request_id: request_id.to_string(),
        })
    }
}

/// Every choice field the form can submit must have a vocabulary covering
/// all of its options; numeric fields must have none.
fn check_vocabularies(params: &FittedPreprocessing) -> Result<(), ArtifactError> {
    for name in &params.features {
        let Some(spec) = lookup(name) else {
            continue;
        };
        let vocabulary = params.vocabularies.get(name);
        match (spec.kind, vocabulary) {
            (FieldKind::Choice(_), None) => {
                return Err(ArtifactError::Inconsistent(format!(
                    "no vocabulary for categorical column {name}"
                )));
            }
            (FieldKind::Choice(options), Some(classes)) => {
                if let Some(missing) = options.iter().find(|o| !classes.iter().any(|c| c == *o)) {
                    return Err(ArtifactError::Inconsistent(format!(
                        "vocabulary for {name} lacks '{missing}'"
                    )));
                }
            }
            (_, Some(_)) => {
                return Err(ArtifactError::Inconsistent(format!(
                    "vocabulary given for numeric column {name}"
                )));
            }
            (_, None) => {}
        }
    }
    Ok(())
}

/// Label-encode textual columns and standardize every column, with all
/// statistics taken from `rows`. A column counts as textual when any of
/// its values is text; numbers in such a column are encoded by their
/// string form.
fn fit_transform(rows: &[Vec<&FieldValue>]) -> Vec<Vec<f32>> {
    let width = rows.first().map_or(0, Vec::len);
    let mut out = vec![vec![0.0f32; width]; rows.len()];

    for col in 0..width {
        let column: Vec<&FieldValue> = rows.iter().map(|r| r[col]).collect();
        let raw: Vec<f64> = if column.iter().any(|v| v.is_text()) {
            let text: Vec<String> = column.iter().map(|v| v.to_string()).collect();
            let classes: BTreeSet<&str> = text.iter().map(String::as_str).collect();
            text.iter()
                .map(|t| classes.iter().position(|c| *c == t.as_str()).unwrap_or(0) as f64)
                .collect()
        } else {
            column.iter().map(|v| v.as_number().unwrap_or(0.0)).collect()
        };

        let n = raw.len() as f64;
        let mean = raw.iter().sum::<f64>() / n;
        let var = raw.iter().map(|x| (x - mean).powi(2)).sum::<f64>() / n;
        let scale = if var < MIN_VARIANCE { 1.0 } else { var.sqrt() };
        for (r, x) in raw.iter().enumerate() {
            out[r][col] = ((x - mean) / scale) as f32;
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::form::HealthRecord;
    use std::collections::BTreeMap;

    fn full_record() -> InputRecord {
        InputRecord::from(HealthRecord::default())
    }

    #[test]
    fn missing_features_are_all_named_in_model_order() {
        let enc = FeatureEncoder::new(&MODEL_FEATURES, Preprocessing::PerRequest).unwrap();
        let mut r = full_record();
        r.remove("CovidPos");
        r.remove("Sex");
        let err = enc.encode(&r, "t").unwrap_err();
        assert_eq!(
            err,
            EncodeError::MissingFeature(vec!["Sex".into(), "CovidPos".into()])
        );
        assert_eq!(err.to_string(), "Missing required feature: Sex, CovidPos");
    }

    #[test]
    fn per_request_single_row_collapses_to_zeros() {
        let enc = FeatureEncoder::new(&MODEL_FEATURES, Preprocessing::PerRequest).unwrap();
        let fv = enc.encode(&full_record(), "t").unwrap();
        assert_eq!(fv.dim(), 37);
        assert!(fv.as_slice().iter().all(|v| *v == 0.0));
    }

    #[test]
    fn per_request_labels_follow_sorted_classes() {
        let a = FieldValue::Text("No".into());
        let b = FieldValue::Text("Yes".into());
        let x = FieldValue::Integer(1);
        let y = FieldValue::Integer(3);
        let out = fit_transform(&[vec![&b, &x], vec![&a, &y]]);
        // "No" → 0, "Yes" → 1; both columns standardize to ±1
        assert_eq!(out, vec![vec![1.0, -1.0], vec![-1.0, 1.0]]);
    }

    #[test]
    fn fitted_order_must_match() {
        let params = FittedPreprocessing {
            features: vec!["BMI".into()],
            vocabularies: BTreeMap::new(),
            mean: vec![0.0],
            scale: vec![1.0],
        };
        assert!(FeatureEncoder::new(&["Sex"], Preprocessing::Fitted(params.clone())).is_err());
        let enc = FeatureEncoder::new(&["BMI"], Preprocessing::Fitted(params)).unwrap();
        assert_eq!(enc.mode(), "fitted");
    }

    fn sex_and_bmi(vocabularies: BTreeMap<String, Vec<String>>) -> FittedPreprocessing {
        FittedPreprocessing {
            features: vec!["Sex".into(), "BMI".into()],
            vocabularies,
            mean: vec![0.0, 0.0],
            scale: vec![1.0, 1.0],
        }
    }

    #[test]
    fn fitted_vocabulary_must_cover_every_option() {
        let partial = sex_and_bmi(BTreeMap::from([("Sex".to_string(), vec!["Male".to_string()])]));
        let err = FeatureEncoder::new(&["Sex", "BMI"], Preprocessing::Fitted(partial))
            .err()
            .unwrap();
        assert!(err.to_string().contains("lacks 'Female'"), "{err}");

        let absent = sex_and_bmi(BTreeMap::new());
        assert!(FeatureEncoder::new(&["Sex", "BMI"], Preprocessing::Fitted(absent)).is_err());

        let full = sex_and_bmi(BTreeMap::from([(
            "Sex".to_string(),
            vec!["Female".to_string(), "Male".to_string()],
        )]));
        assert!(FeatureEncoder::new(&["Sex", "BMI"], Preprocessing::Fitted(full)).is_ok());
    }

    #[test]
    fn fitted_vocabulary_on_numeric_column_is_rejected() {
        let params = sex_and_bmi(BTreeMap::from([
            ("Sex".to_string(), vec!["Female".to_string(), "Male".to_string()]),
            ("BMI".to_string(), vec!["24".to_string()]),
        ]));
        let err = FeatureEncoder::new(&["Sex", "BMI"], Preprocessing::Fitted(params))
            .err()
            .unwrap();
        assert!(matches!(err, ArtifactError::Inconsistent(ref m) if m.contains("numeric column BMI")));
    }

    #[test]
    fn selection_ignores_extra_fields() {
        let enc = FeatureEncoder::new(&["BMI", "Sex"], Preprocessing::PerRequest).unwrap();
        let record = full_record();
        let row = enc.select(&record).unwrap();
        assert_eq!(row.len(), 2);
        assert_eq!(row[0], &FieldValue::Float(24.0));
    }

    #[test]
    fn from_config_without_artifact_falls_back() {
        let dir = tempfile::tempdir().unwrap();
        let config = PreprocessingConfig {
            path: dir.path().join("absent.json"),
        };
        let enc = FeatureEncoder::from_config(&config).unwrap();
        assert_eq!(enc.mode(), "per_request");
        assert_eq!(enc.features().len(), MODEL_FEATURES.len());
    }
}
