//! In-memory [`ApplicationApi`] for behavioural tests.

use crate::http::HttpError;
use crate::wizard::domain::{StepData, WizardStep};
use crate::wizard::ports::{ApplicationApi, ApplicationApiResult};
use async_trait::async_trait;
use std::sync::RwLock;
use std::sync::atomic::{AtomicBool, Ordering};

/// Simulated application backend that records per-step saves.
#[derive(Default)]
pub struct InMemoryApplicationApi {
    saves: RwLock<Vec<(WizardStep, StepData)>>,
    fail_save: AtomicBool,
}

impl InMemoryApplicationApi {
    /// Creates an empty backend.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Makes subsequent saves fail.
    pub fn fail_save(&self, enabled: bool) {
        self.fail_save.store(enabled, Ordering::SeqCst);
    }

    /// Returns every recorded save, in order.
    #[must_use]
    pub fn recorded_saves(&self) -> Vec<(WizardStep, StepData)> {
        self.saves
            .read()
            .map(|guard| guard.clone())
            .unwrap_or_default()
    }
}

#[async_trait]
impl ApplicationApi for InMemoryApplicationApi {
    async fn save_step(&self, step: WizardStep, data: &StepData) -> ApplicationApiResult<()> {
        if self.fail_save.load(Ordering::SeqCst) {
            return Err(HttpError::Status {
                status: 500,
                body: "application store unavailable".to_owned(),
            });
        }
        if let Ok(mut guard) = self.saves.write() {
            guard.push((step, data.clone()));
        }
        Ok(())
    }
}
