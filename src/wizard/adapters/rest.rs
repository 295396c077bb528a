//! REST adapter for the application endpoints.

use crate::http::ApiClient;
use crate::wizard::domain::{StepData, WizardStep};
use crate::wizard::ports::{ApplicationApi, ApplicationApiResult};
use async_trait::async_trait;
use serde_json::json;

/// [`ApplicationApi`] over the shared [`ApiClient`].
#[derive(Clone)]
pub struct RestApplicationApi {
    client: ApiClient,
}

impl RestApplicationApi {
    /// Creates the adapter over the shared client.
    #[must_use]
    pub const fn new(client: ApiClient) -> Self {
        Self { client }
    }
}

#[async_trait]
impl ApplicationApi for RestApplicationApi {
    async fn save_step(&self, step: WizardStep, data: &StepData) -> ApplicationApiResult<()> {
        self.client
            .post(
                &format!("/applications/steps/{}", step.number()),
                json!({ "fields": data }),
            )
            .await
    }
}
