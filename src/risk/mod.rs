//! Risk classification policy.

mod engine;

pub use engine::{RiskAssessment, RiskLevel, HIGH_THRESHOLD, MEDIUM_THRESHOLD};
