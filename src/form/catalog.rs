//! Field catalog: every input the form renders, with its label, kind and
//! accepted values. Order here is display order.

use super::input::{FieldValue, InputRecord};
use super::record::{AgeCategory, GeneralHealth, LastCheckupTime, Sex, SmokerStatus, YES_NO};
use Section::{Mandatory, Optional};

#[derive(Debug, thiserror::Error, PartialEq)]
pub enum FormError {
    #[error("Invalid value for {field}: {reason}")]
    InvalidValue { field: String, reason: String },
}

impl FormError {
    fn invalid(field: &str, reason: impl Into<String>) -> Self {
        FormError::InvalidValue {
            field: field.to_string(),
            reason: reason.into(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Section {
    Mandatory,
    Optional,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum FieldKind {
    Choice(&'static [&'static str]),
    Integer { min: i64, max: i64 },
    Float { min: f64, max: f64 },
}

#[derive(Debug, Clone, Copy)]
pub struct FieldSpec {
    pub name: &'static str,
    pub label: &'static str,
    pub kind: FieldKind,
    pub section: Section,
    /// Rendered inside the collapsible block of the optional section
    pub collapsed: bool,
}

const fn field(name: &'static str, label: &'static str, kind: FieldKind, section: Section) -> FieldSpec {
    FieldSpec {
        name,
        label,
        kind,
        section,
        collapsed: false,
    }
}

const fn yes_no(name: &'static str, label: &'static str, section: Section) -> FieldSpec {
    field(name, label, FieldKind::Choice(YES_NO), section)
}

const fn extra(name: &'static str, label: &'static str) -> FieldSpec {
    FieldSpec {
        name,
        label,
        kind: FieldKind::Choice(YES_NO),
        section: Section::Optional,
        collapsed: true,
    }
}

pub static FIELDS: &[FieldSpec] = &[
    field("Sex", "Sex", FieldKind::Choice(Sex::LABELS), Mandatory),
    field("AgeCategory", "Age Category", FieldKind::Choice(AgeCategory::LABELS), Mandatory),
    field("SystolicBP", "Systolic Blood Pressure", FieldKind::Integer { min: 80, max: 250 }, Mandatory),
    field("DiastolicBP", "Diastolic Blood Pressure", FieldKind::Integer { min: 40, max: 150 }, Mandatory),
    field("Cholesterol", "Cholesterol (mg/dL)", FieldKind::Integer { min: 100, max: 400 }, Mandatory),
    field("BMI", "Body Mass Index", FieldKind::Float { min: 10.0, max: 60.0 }, Mandatory),
    field("SmokerStatus", "Smoker status", FieldKind::Choice(SmokerStatus::LABELS), Mandatory),
    yes_no("AlcoholDrinkers", "Do you drink alcohol?", Mandatory),
    yes_no("HadDiabetes", "Do you have diabetes?", Mandatory),
    yes_no("HadAngina", "Have you had angina?", Mandatory),
    yes_no("HadStroke", "Have you had a stroke?", Mandatory),
    yes_no("PhysicalActivities", "Do you exercise regularly?", Mandatory),
    yes_no("PrematureFamilyHistory", "Family history of early heart disease?", Mandatory),
    field("GeneralHealth", "General Health", FieldKind::Choice(GeneralHealth::LABELS), Optional),
    field("MentalHealthDays", "Mental Health (days/month)", FieldKind::Integer { min: 0, max: 30 }, Optional),
    field("PhysicalHealthDays", "Physical Health (days/month)", FieldKind::Integer { min: 0, max: 30 }, Optional),
    field("SleepHours", "Average Sleep Hours", FieldKind::Integer { min: 0, max: 24 }, Optional),
    field("LastCheckupTime", "Last checkup", FieldKind::Choice(LastCheckupTime::LABELS), Optional),
    extra("HadAsthma", "Do you have asthma?"),
    extra("HadSkinCancer", "Do you have skin cancer?"),
    extra("HadCOPD", "Do you have COPD?"),
    extra("HadDepressiveDisorder", "Depressive disorder?"),
    extra("HadKidneyDisease", "Kidney disease?"),
    extra("HadArthritis", "Arthritis?"),
    extra("DeafOrHardOfHearing", "Deaf or hearing difficulty?"),
    extra("BlindOrVisionDifficulty", "Vision difficulty?"),
    extra("DifficultyConcentrating", "Difficulty concentrating?"),
    extra("DifficultyWalking", "Difficulty walking?"),
    extra("DifficultyDressingBathing", "Difficulty dressing/bathing?"),
    extra("DifficultyErrands", "Difficulty doing errands?"),
    extra("ChestScan", "Had chest scan recently?"),
    extra("HIVTesting", "Ever tested for HIV?"),
    extra("FluVaxLast12", "Got flu vaccine in past year?"),
    extra("PneumoVaxEver", "Ever had pneumococcal vaccine?"),
    extra("TetanusLast10Tdap", "Had Tetanus/Tdap in past 10 yrs?"),
    extra("HighRiskLastYear", "High risk behavior last year?"),
    extra("CovidPos", "Ever tested COVID-19 positive?"),
];

pub fn lookup(name: &str) -> Option<&'static FieldSpec> {
    FIELDS.iter().find(|f| f.name == name)
}

impl FieldSpec {
    /// Parse a raw form string according to the field kind.
    pub fn parse(&self, raw: &str) -> Result<FieldValue, FormError> {
        let raw = raw.trim();
        let value = match self.kind {
            FieldKind::Choice(_) => FieldValue::Text(raw.to_string()),
            FieldKind::Integer { .. } => raw
                .parse::<i64>()
                .map(FieldValue::Integer)
                .map_err(|_| FormError::invalid(self.name, format!("'{raw}' is not a whole number")))?,
            FieldKind::Float { .. } => raw
                .parse::<f64>()
                .map(FieldValue::Float)
                .map_err(|_| FormError::invalid(self.name, format!("'{raw}' is not a number")))?,
        };
        self.check(&value)?;
        Ok(value)
    }

    /// Check an already typed value against options and bounds.
    pub fn check(&self, value: &FieldValue) -> Result<(), FormError> {
        match (self.kind, value) {
            (FieldKind::Choice(options), FieldValue::Text(s)) => {
                if options.contains(&s.as_str()) {
                    Ok(())
                } else {
                    Err(FormError::invalid(
                        self.name,
                        format!("'{s}' is not one of: {}", options.join(", ")),
                    ))
                }
            }
            (FieldKind::Integer { min, max }, FieldValue::Integer(i)) => {
                if (min..=max).contains(i) {
                    Ok(())
                } else {
                    Err(FormError::invalid(self.name, format!("{i} is outside {min}..={max}")))
                }
            }
            (FieldKind::Float { min, max }, v @ (FieldValue::Integer(_) | FieldValue::Float(_))) => {
                let f = v.as_number().unwrap_or(f64::NAN);
                if f.is_finite() && f >= min && f <= max {
                    Ok(())
                } else {
                    Err(FormError::invalid(self.name, format!("{f} is outside {min}..={max}")))
                }
            }
            (FieldKind::Choice(_), _) => Err(FormError::invalid(self.name, "expected text")),
            _ => Err(FormError::invalid(self.name, "expected a number")),
        }
    }
}

/// Validate every catalog field present in `record`. Unknown keys pass
/// through untouched; presence is the encoder's concern.
pub fn validate(record: &InputRecord) -> Result<(), FormError> {
    for (name, value) in record.iter() {
        if let Some(spec) = lookup(name) {
            spec.check(value)?;
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::features::MODEL_FEATURES;

    #[test]
    fn catalog_covers_exactly_the_model_features() {
        assert_eq!(FIELDS.len(), MODEL_FEATURES.len());
        for name in MODEL_FEATURES {
            assert!(lookup(name).is_some(), "{name} missing from catalog");
        }
    }

    #[test]
    fn mandatory_section_has_thirteen_fields() {
        let mandatory: Vec<_> = FIELDS.iter().filter(|f| f.section == Section::Mandatory).collect();
        assert_eq!(mandatory.len(), 13);
        assert_eq!(FIELDS.iter().filter(|f| f.collapsed).count(), 19);
    }

    #[test]
    fn choice_rejects_unknown_option() {
        let spec = lookup("GeneralHealth").unwrap();
        assert!(spec.parse("Very Good").is_ok());
        assert!(matches!(spec.parse("Great"), Err(FormError::InvalidValue { .. })));
    }

    #[test]
    fn float_field_accepts_integer_json_value() {
        let spec = lookup("BMI").unwrap();
        assert!(spec.check(&FieldValue::Integer(29)).is_ok());
        assert!(spec.check(&FieldValue::Float(75.0)).is_err());
        assert!(spec.check(&FieldValue::Text("29".into())).is_err());
    }

    #[test]
    fn integer_field_rejects_fraction() {
        let spec = lookup("SleepHours").unwrap();
        assert!(spec.parse("7.5").is_err());
        assert_eq!(spec.parse(" 8 ").unwrap(), FieldValue::Integer(8));
    }
}
