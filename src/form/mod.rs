//! Form inputs: field catalog, typed health record, and the flat record the
//! encoder consumes.

mod catalog;
mod input;
mod record;

pub use catalog::{lookup, validate, FieldKind, FieldSpec, FormError, Section, FIELDS};
pub use input::{FieldValue, InputRecord};
pub use record::{
    AgeCategory, GeneralHealth, HealthRecord, LastCheckupTime, Sex, SmokerStatus, YES_NO,
};
