//! Input record → feature encoder → classifier → risk level.

use chrono::Utc;
use serde::Serialize;
use tracing::info;
use uuid::Uuid;

use crate::features::{EncodeError, FeatureEncoder};
use crate::form::{self, FormError, InputRecord};
use crate::model::{ModelError, OnnxClassifier, RiskModel};
use crate::risk::RiskAssessment;

#[derive(Debug, thiserror::Error)]
pub enum PredictError {
    #[error(transparent)]
    Form(#[from] FormError),
    #[error(transparent)]
    Encode(#[from] EncodeError),
    #[error(transparent)]
    Model(#[from] ModelError),
}

impl PredictError {
    /// Errors caused by the submitted values, shown back to the user.
    /// Vocabulary and type failures after validation point at the
    /// preprocessing artifact, not the input.
    pub fn is_user_facing(&self) -> bool {
        matches!(
            self,
            PredictError::Form(_) | PredictError::Encode(EncodeError::MissingFeature(_))
        )
    }
}

/// Either a scored assessment or the message shown instead of a score.
#[derive(Debug, Clone, Serialize)]
#[serde(tag = "outcome", rename_all = "snake_case")]
pub enum PredictionOutcome {
    Scored(RiskAssessment),
    Rejected { message: String },
}

impl PredictionOutcome {
    pub fn probability(&self) -> Option<f32> {
        match self {
            PredictionOutcome::Scored(a) => Some(a.probability),
            PredictionOutcome::Rejected { .. } => None,
        }
    }
}

pub struct RiskPredictor<M = OnnxClassifier> {
    encoder: FeatureEncoder,
    model: M,
}

impl<M: RiskModel> RiskPredictor<M> {
    pub fn new(encoder: FeatureEncoder, model: M) -> Self {
        Self { encoder, model }
    }

    pub fn encoder(&self) -> &FeatureEncoder {
        &self.encoder
    }

    pub fn model(&self) -> &M {
        &self.model
    }

    /// Validate, encode and score one record.
    pub fn assess(&self, record: &InputRecord) -> Result<RiskAssessment, PredictError> {
        form::validate(record)?;
        let request_id = Uuid::new_v4().to_string();
        let features = self.encoder.encode(record, &request_id)?;
        let probability = self.model.predict(&features)?;
        let assessment = RiskAssessment::new(request_id, probability, Utc::now().timestamp_millis());
        info!(
            request_id = %assessment.request_id,
            probability = assessment.probability,
            level = %assessment.level,
            "risk assessed"
        );
        Ok(assessment)
    }

    /// Like [`assess`](Self::assess), but input problems become a
    /// `Rejected` outcome; model failures still propagate.
    pub fn predict_risk(&self, record: &InputRecord) -> Result<PredictionOutcome, PredictError> {
        match self.assess(record) {
            Ok(a) => Ok(PredictionOutcome::Scored(a)),
            Err(e) if e.is_user_facing() => {
                info!(error = %e, "prediction rejected");
                Ok(PredictionOutcome::Rejected {
                    message: e.to_string(),
                })
            }
            Err(e) => Err(e),
        }
    }
}
