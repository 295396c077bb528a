//! Step transitions, the review/submit gate, and the terminal state.

use crate::wizard::domain::draft::Draft;
use crate::wizard::domain::fields::{FieldError, StepData};
use crate::wizard::domain::schema::validate_step;
use crate::wizard::domain::step::WizardStep;
use crate::wizard::ports::ApplicationApi;
use std::sync::Arc;
use thiserror::Error;
use tokio::sync::mpsc;
use tracing::warn;

/// User-visible effects raised while driving the wizard.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum WizardEvent {
    /// A transient toast.
    Toast {
        /// Toast text.
        text: String,
    },
}

/// Outcome of the review/submit completeness gate.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GateOutcome {
    /// Steps one through eight are all complete.
    Ready,
    /// At least one step is incomplete; navigation has moved to the
    /// lowest-numbered one.
    Blocked {
        /// The incomplete steps, in wizard order.
        missing: Vec<WizardStep>,
    },
}

/// Errors raised by wizard transitions.
#[derive(Debug, Error)]
pub enum WizardError {
    /// Step data failed its schema validation.
    #[error("step '{step}' failed validation")]
    Invalid {
        /// The step whose schema rejected the data.
        step: WizardStep,
        /// Per-field failures, in schema order.
        errors: Vec<FieldError>,
    },
    /// The application has already been submitted.
    #[error("the application has already been submitted")]
    AlreadySubmitted,
}

/// The nine-step application wizard.
///
/// One instance per application session; the draft is in-memory only, so
/// abandoning the session discards all progress. Navigation is free: any
/// step indicator jump is honoured regardless of completion. Only the
/// review/submit gate cares about completeness.
pub struct Wizard {
    draft: Draft,
    current: WizardStep,
    submitted: bool,
    api: Option<Arc<dyn ApplicationApi>>,
    events: mpsc::UnboundedSender<WizardEvent>,
}

impl Wizard {
    /// Opens a fresh wizard at the first step, without backend
    /// persistence.
    ///
    /// Returns the wizard and the receiving end of its event stream.
    #[must_use]
    pub fn open() -> (Self, mpsc::UnboundedReceiver<WizardEvent>) {
        Self::build(None)
    }

    /// Opens a fresh wizard that persists each saved step through the
    /// given backend.
    #[must_use]
    pub fn open_with_api(
        api: Arc<dyn ApplicationApi>,
    ) -> (Self, mpsc::UnboundedReceiver<WizardEvent>) {
        Self::build(Some(api))
    }

    fn build(
        api: Option<Arc<dyn ApplicationApi>>,
    ) -> (Self, mpsc::UnboundedReceiver<WizardEvent>) {
        let (events, receiver) = mpsc::unbounded_channel();
        (
            Self {
                draft: Draft::new(),
                current: WizardStep::PersonalDetails,
                submitted: false,
                api,
                events,
            },
            receiver,
        )
    }

    /// Validates, merges, marks the step complete, persists, and
    /// advances.
    ///
    /// Validation runs against the step's merged field set, so fields
    /// already in the draft count towards required-field rules. The final
    /// step has nowhere to advance to and stays put. Backend persistence
    /// is fire-and-forget: a failed save is logged and does not block
    /// advancement.
    ///
    /// # Errors
    ///
    /// Returns [`WizardError::Invalid`] with the per-field failures when
    /// validation rejects the data, leaving the draft untouched, or
    /// [`WizardError::AlreadySubmitted`] after submission.
    pub async fn save_and_continue(
        &mut self,
        step: WizardStep,
        data: &StepData,
    ) -> Result<(), WizardError> {
        self.ensure_not_submitted()?;
        let candidate = self.draft.merged_candidate(step, data);
        validate_step(step, &candidate)
            .map_err(|errors| WizardError::Invalid { step, errors })?;
        self.draft.merge(step, data);
        self.draft.mark_complete(step);
        self.persist_step(step).await;
        self.current = step.next().unwrap_or(step);
        Ok(())
    }

    /// Merges partial step data without validation or advancement,
    /// persisting the merged step when a backend is wired.
    ///
    /// # Errors
    ///
    /// Returns [`WizardError::AlreadySubmitted`] after submission.
    pub async fn save(&mut self, step: WizardStep, data: &StepData) -> Result<(), WizardError> {
        self.ensure_not_submitted()?;
        self.draft.merge(step, data);
        self.persist_step(step).await;
        Ok(())
    }

    /// Steps back without altering completion state. A no-op on the first
    /// step.
    pub fn back(&mut self) {
        self.current = self.current.previous().unwrap_or(self.current);
    }

    /// Jumps straight to a step, regardless of completion.
    pub fn go_to(&mut self, step: WizardStep) {
        self.current = step;
    }

    /// Opens the review summary if steps one through eight are complete.
    ///
    /// When blocked, navigation moves to the lowest incomplete step and a
    /// toast names every incomplete step label.
    #[must_use]
    pub fn review(&mut self) -> GateOutcome {
        self.gate()
    }

    /// Submits the application, entering the terminal submitted state.
    ///
    /// The completeness gate is the same as [`Self::review`]'s; a blocked
    /// submit navigates and toasts identically. Submission is a local
    /// terminal transition: step data was already persisted per step.
    ///
    /// # Errors
    ///
    /// Returns [`WizardError::AlreadySubmitted`] on a repeat call.
    pub fn submit(&mut self) -> Result<GateOutcome, WizardError> {
        self.ensure_not_submitted()?;
        let outcome = self.gate();
        if outcome == GateOutcome::Ready {
            self.submitted = true;
        }
        Ok(outcome)
    }

    /// Returns the step currently shown.
    #[must_use]
    pub const fn current_step(&self) -> WizardStep {
        self.current
    }

    /// Returns whether the application has been submitted.
    #[must_use]
    pub const fn is_submitted(&self) -> bool {
        self.submitted
    }

    /// Returns whether a step has been completed.
    #[must_use]
    pub fn is_complete(&self, step: WizardStep) -> bool {
        self.draft.is_complete(step)
    }

    /// Returns a step's stored field values.
    #[must_use]
    pub fn step_data(&self, step: WizardStep) -> StepData {
        self.draft.step_data(step)
    }

    /// Returns the accumulated draft, for embedders that snapshot it.
    #[must_use]
    pub const fn draft(&self) -> &Draft {
        &self.draft
    }

    /// Fire-and-forget step persistence: failures are logged and never
    /// block the applicant's progress.
    async fn persist_step(&self, step: WizardStep) {
        let Some(api) = self.api.as_ref() else {
            return;
        };
        let data = self.draft.step_data(step);
        if let Err(error) = api.save_step(step, &data).await {
            warn!(step = %step, %error, "failed to persist application step");
        }
    }

    fn gate(&mut self) -> GateOutcome {
        let missing = self.draft.incomplete_before_submit();
        let Some(lowest) = missing.first().copied() else {
            return GateOutcome::Ready;
        };
        self.current = lowest;
        let labels: Vec<&str> = missing.iter().map(|step| step.label()).collect();
        self.emit(WizardEvent::Toast {
            text: format!("Please complete the following steps: {}", labels.join(", ")),
        });
        GateOutcome::Blocked { missing }
    }

    const fn ensure_not_submitted(&self) -> Result<(), WizardError> {
        if self.submitted {
            return Err(WizardError::AlreadySubmitted);
        }
        Ok(())
    }

    fn emit(&self, event: WizardEvent) {
        self.events.send(event).ok();
    }
}
