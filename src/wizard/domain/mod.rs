//! Wizard domain types: steps, field data, schemas, and the draft.

pub mod draft;
pub mod fields;
pub mod schema;
pub mod step;

pub use draft::Draft;
pub use fields::{FieldError, StepData};
pub use schema::validate_step;
pub use step::WizardStep;
