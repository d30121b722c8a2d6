//! Typed health record: one field per model feature. `Default` matches what
//! the form shows before the user touches anything.

use serde::{Deserialize, Serialize};

use super::input::InputRecord;

pub const YES_NO: &[&str] = &["Yes", "No"];

/// Declares a label-backed enum: `LABELS` keeps option order, `as_str`
/// returns the exact text the model was trained on.
macro_rules! labelled_enum {
    ($(#[$meta:meta])* $name:ident { $($variant:ident => $label:literal),+ $(,)? }) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
        pub enum $name {
            $(#[serde(rename = $label)] $variant),+
        }

        impl $name {
            pub const LABELS: &'static [&'static str] = &[$($label),+];

            pub fn as_str(self) -> &'static str {
                match self {
                    $($name::$variant => $label),+
                }
            }
        }
    };
}

labelled_enum!(Sex {
    Male => "Male",
    Female => "Female",
});

labelled_enum!(AgeCategory {
    From18To24 => "18-24",
    From25To29 => "25-29",
    From30To34 => "30-34",
    From35To39 => "35-39",
    From40To44 => "40-44",
    From45To49 => "45-49",
    From50To54 => "50-54",
    From55To59 => "55-59",
    From60To64 => "60-64",
    From65To69 => "65-69",
    From70To74 => "70-74",
    From75To79 => "75-79",
    Over80 => "80+",
});

labelled_enum!(SmokerStatus {
    Former => "Former smoker",
    Never => "Never smoked",
    EveryDay => "Current smoker - now smokes every day",
    SomeDays => "Current smoker - now smokes some days",
});

labelled_enum!(GeneralHealth {
    Excellent => "Excellent",
    VeryGood => "Very Good",
    Good => "Good",
    Fair => "Fair",
    Poor => "Poor",
});

labelled_enum!(LastCheckupTime {
    WithinYear => "Within past year (anytime less than 12 months ago)",
    WithinTwoYears => "Within past 2 years (1 year but less than 2 years ago)",
    WithinFiveYears => "Within past 5 years (2 years but less than 5 years ago)",
    FiveOrMoreYears => "5 or more years ago",
});

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct HealthRecord {
    pub sex: Sex,
    pub age_category: AgeCategory,
    #[serde(rename = "SystolicBP")]
    pub systolic_bp: u16,
    #[serde(rename = "DiastolicBP")]
    pub diastolic_bp: u16,
    pub cholesterol: u16,
    #[serde(rename = "BMI")]
    pub bmi: f64,
    pub smoker_status: SmokerStatus,
    pub alcohol_drinkers: bool,
    pub had_diabetes: bool,
    pub had_angina: bool,
    pub had_stroke: bool,
    pub physical_activities: bool,
    pub premature_family_history: bool,

    pub general_health: GeneralHealth,
    pub mental_health_days: u8,
    pub physical_health_days: u8,
    pub sleep_hours: u8,
    pub last_checkup_time: LastCheckupTime,
    pub had_asthma: bool,
    pub had_skin_cancer: bool,
    #[serde(rename = "HadCOPD")]
    pub had_copd: bool,
    pub had_depressive_disorder: bool,
    pub had_kidney_disease: bool,
    pub had_arthritis: bool,
    pub deaf_or_hard_of_hearing: bool,
    pub blind_or_vision_difficulty: bool,
    pub difficulty_concentrating: bool,
    pub difficulty_walking: bool,
    pub difficulty_dressing_bathing: bool,
    pub difficulty_errands: bool,
    pub chest_scan: bool,
    #[serde(rename = "HIVTesting")]
    pub hiv_testing: bool,
    pub flu_vax_last12: bool,
    pub pneumo_vax_ever: bool,
    pub tetanus_last10_tdap: bool,
    pub high_risk_last_year: bool,
    pub covid_pos: bool,
}

impl Default for HealthRecord {
    fn default() -> Self {
        Self {
            sex: Sex::Male,
            age_category: AgeCategory::From18To24,
            systolic_bp: 120,
            diastolic_bp: 80,
            cholesterol: 200,
            bmi: 24.0,
            smoker_status: SmokerStatus::Former,
            alcohol_drinkers: true,
            had_diabetes: true,
            had_angina: true,
            had_stroke: true,
            physical_activities: true,
            premature_family_history: true,
            general_health: GeneralHealth::Excellent,
            mental_health_days: 0,
            physical_health_days: 0,
            sleep_hours: 7,
            last_checkup_time: LastCheckupTime::WithinYear,
            had_asthma: true,
            had_skin_cancer: true,
            had_copd: true,
            had_depressive_disorder: true,
            had_kidney_disease: true,
            had_arthritis: true,
            deaf_or_hard_of_hearing: true,
            blind_or_vision_difficulty: true,
            difficulty_concentrating: true,
            difficulty_walking: true,
            difficulty_dressing_bathing: true,
            difficulty_errands: true,
            chest_scan: true,
            hiv_testing: true,
            flu_vax_last12: true,
            pneumo_vax_ever: true,
            tetanus_last10_tdap: true,
            high_risk_last_year: true,
            covid_pos: true,
        }
    }
}

impl From<&HealthRecord> for InputRecord {
    fn from(h: &HealthRecord) -> Self {
        let mut r = InputRecord::new();
        r.insert("Sex", h.sex.as_str());
        r.insert("AgeCategory", h.age_category.as_str());
        r.insert("SystolicBP", i64::from(h.systolic_bp));
        r.insert("DiastolicBP", i64::from(h.diastolic_bp));
        r.insert("Cholesterol", i64::from(h.cholesterol));
        r.insert("BMI", h.bmi);
        r.insert("SmokerStatus", h.smoker_status.as_str());
        r.insert("AlcoholDrinkers", h.alcohol_drinkers);
        r.insert("HadDiabetes", h.had_diabetes);
        r.insert("HadAngina", h.had_angina);
        r.insert("HadStroke", h.had_stroke);
        r.insert("PhysicalActivities", h.physical_activities);
        r.insert("PrematureFamilyHistory", h.premature_family_history);
        r.insert("GeneralHealth", h.general_health.as_str());
        r.insert("MentalHealthDays", i64::from(h.mental_health_days));
        r.insert("PhysicalHealthDays", i64::from(h.physical_health_days));
        r.insert("SleepHours", i64::from(h.sleep_hours));
        r.insert("LastCheckupTime", h.last_checkup_time.as_str());
        r.insert("HadAsthma", h.had_asthma);
        r.insert("HadSkinCancer", h.had_skin_cancer);
        r.insert("HadCOPD", h.had_copd);
        r.insert("HadDepressiveDisorder", h.had_depressive_disorder);
        r.insert("HadKidneyDisease", h.had_kidney_disease);
        r.insert("HadArthritis", h.had_arthritis);
        r.insert("DeafOrHardOfHearing", h.deaf_or_hard_of_hearing);
        r.insert("BlindOrVisionDifficulty", h.blind_or_vision_difficulty);
        r.insert("DifficultyConcentrating", h.difficulty_concentrating);
        r.insert("DifficultyWalking", h.difficulty_walking);
        r.insert("DifficultyDressingBathing", h.difficulty_dressing_bathing);
        r.insert("DifficultyErrands", h.difficulty_errands);
        r.insert("ChestScan", h.chest_scan);
        r.insert("HIVTesting", h.hiv_testing);
        r.insert("FluVaxLast12", h.flu_vax_last12);
        r.insert("PneumoVaxEver", h.pneumo_vax_ever);
        r.insert("TetanusLast10Tdap", h.tetanus_last10_tdap);
        r.insert("HighRiskLastYear", h.high_risk_last_year);
        r.insert("CovidPos", h.covid_pos);
        r
    }
}

impl From<HealthRecord> for InputRecord {
    fn from(h: HealthRecord) -> Self {
        InputRecord::from(&h)
    }
}
