//! Port over the application endpoints of the REST backend.
//!
//! Step persistence is per step, not atomic at submit: each completed
//! step is saved as the applicant advances, and final submission is a
//! local terminal transition over data the backend already holds.

use crate::http::HttpError;
use crate::wizard::domain::{StepData, WizardStep};
use async_trait::async_trait;

/// Result type for application API operations.
pub type ApplicationApiResult<T> = Result<T, HttpError>;

/// Backend operations for the application wizard.
#[async_trait]
pub trait ApplicationApi: Send + Sync {
    /// Persists one step's field values.
    ///
    /// # Errors
    ///
    /// Returns [`HttpError`] when the save fails.
    async fn save_step(&self, step: WizardStep, data: &StepData) -> ApplicationApiResult<()>;
}
