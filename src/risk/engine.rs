//! Maps the model probability to a risk level with fixed cut points.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Below this: Low
pub const MEDIUM_THRESHOLD: f32 = 0.33;
/// Below this: Medium; at or above: High
pub const HIGH_THRESHOLD: f32 = 0.66;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum RiskLevel {
    Low,
    Medium,
    High,
}

impl RiskLevel {
    pub fn from_probability(probability: f32) -> Self {
        if probability < MEDIUM_THRESHOLD {
            RiskLevel::Low
        } else if probability < HIGH_THRESHOLD {
            RiskLevel::Medium
        } else {
            RiskLevel::High
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            RiskLevel::Low => "Low",
            RiskLevel::Medium => "Medium",
            RiskLevel::High => "High",
        }
    }
}

impl fmt::Display for RiskLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Outcome of one prediction request
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RiskAssessment {
    pub request_id: String,
    pub probability: f32,
    pub level: RiskLevel,
    pub ts: i64,
}

impl RiskAssessment {
    pub fn new(request_id: String, probability: f32, ts: i64) -> Self {
        Self {
            request_id,
            probability,
            level: RiskLevel::from_probability(probability),
            ts,
        }
    }

    /// Progress-bar fill, 0..=100.
    pub fn score_percent(&self) -> u8 {
        (self.probability * 100.0).clamp(0.0, 100.0) as u8
    }
}
