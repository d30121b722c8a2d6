//! Feature encoding: input record → fixed-order model input.

mod encoder;
mod fitted;

pub use encoder::{EncodeError, FeatureEncoder, Preprocessing};
pub use fitted::{ArtifactError, FittedPreprocessing};

use serde::{Deserialize, Serialize};

/// Model input columns, in training order.
pub const MODEL_FEATURES: [&str; 37] = [
    "Sex",
    "GeneralHealth",
    "PhysicalHealthDays",
    "MentalHealthDays",
    "LastCheckupTime",
    "PhysicalActivities",
    "SleepHours",
    "HadAngina",
    "HadStroke",
    "HadAsthma",
    "HadSkinCancer",
    "HadCOPD",
    "HadDepressiveDisorder",
    "HadKidneyDisease",
    "HadArthritis",
    "HadDiabetes",
    "DeafOrHardOfHearing",
    "BlindOrVisionDifficulty",
    "DifficultyConcentrating",
    "DifficultyWalking",
    "DifficultyDressingBathing",
    "DifficultyErrands",
    "SmokerStatus",
    "ChestScan",
    "AgeCategory",
    "BMI",
    "AlcoholDrinkers",
    "HIVTesting",
    "FluVaxLast12",
    "PneumoVaxEver",
    "TetanusLast10Tdap",
    "HighRiskLastYear",
    "CovidPos",
    "SystolicBP",
    "DiastolicBP",
    "Cholesterol",
    "PrematureFamilyHistory",
];

/// Fields shown in the form's first section. All of them are also model
/// features; the split is presentational.
pub const MANDATORY_FIELDS: [&str; 13] = [
    "Sex",
    "AgeCategory",
    "SystolicBP",
    "DiastolicBP",
    "Cholesterol",
    "BMI",
    "SmokerStatus",
    "AlcoholDrinkers",
    "HadDiabetes",
    "HadAngina",
    "HadStroke",
    "PhysicalActivities",
    "PrematureFamilyHistory",
];

/// Columns the training pipeline treated as categorical.
pub const CATEGORICAL_INPUTS: [&str; 13] = [
    "Sex",
    "GeneralHealth",
    "SmokerStatus",
    "AlcoholDrinkers",
    "ChestScan",
    "AgeCategory",
    "HIVTesting",
    "FluVaxLast12",
    "PneumoVaxEver",
    "TetanusLast10Tdap",
    "HighRiskLastYear",
    "CovidPos",
    "LastCheckupTime",
];

/// One encoded row for model input
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FeatureVector {
    pub values: Vec<f32>,
    pub request_id: String,
}

impl FeatureVector {
    pub fn dim(&self) -> usize {
        self.values.len()
    }

    pub fn as_slice(&self) -> &[f32] {
        &self.values
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn mandatory_and_categorical_fields_are_model_features() {
        for name in MANDATORY_FIELDS.iter().chain(CATEGORICAL_INPUTS.iter()) {
            assert!(MODEL_FEATURES.contains(name), "{name}");
        }
    }
}
