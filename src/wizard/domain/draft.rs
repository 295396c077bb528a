//! The in-memory application draft.

use crate::wizard::domain::fields::StepData;
use crate::wizard::domain::step::{ALL_STEPS, WizardStep};
use std::collections::{BTreeSet, HashMap};

/// Accumulated step data plus the set of completed steps.
///
/// A step counts as complete only once its schema validation has passed
/// and the applicant explicitly advanced; merging partial data or visiting
/// a step never completes it. The draft lives for the session only.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Draft {
    data: HashMap<WizardStep, StepData>,
    completed: BTreeSet<WizardStep>,
}

impl Draft {
    /// Creates an empty draft.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Merges a step's incoming fields over whatever is already stored.
    pub fn merge(&mut self, step: WizardStep, incoming: &StepData) {
        self.data.entry(step).or_default().merge(incoming);
    }

    /// Returns a step's stored fields.
    #[must_use]
    pub fn step_data(&self, step: WizardStep) -> StepData {
        self.data.get(&step).cloned().unwrap_or_default()
    }

    /// Returns what a step's fields would hold after merging `incoming`.
    #[must_use]
    pub fn merged_candidate(&self, step: WizardStep, incoming: &StepData) -> StepData {
        let mut candidate = self.step_data(step);
        candidate.merge(incoming);
        candidate
    }

    /// Flags a step complete.
    pub fn mark_complete(&mut self, step: WizardStep) {
        self.completed.insert(step);
    }

    /// Returns whether a step has been completed.
    #[must_use]
    pub fn is_complete(&self, step: WizardStep) -> bool {
        self.completed.contains(&step)
    }

    /// Returns the steps before the final one that are not yet complete,
    /// in wizard order.
    #[must_use]
    pub fn incomplete_before_submit(&self) -> Vec<WizardStep> {
        ALL_STEPS
            .into_iter()
            .filter(|step| *step != WizardStep::TermsAndSubmit && !self.is_complete(*step))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::Draft;
    use crate::wizard::domain::fields::StepData;
    use crate::wizard::domain::step::WizardStep;
    use rstest::rstest;

    #[rstest]
    fn merging_never_completes_a_step() {
        let mut draft = Draft::new();
        draft.merge(
            WizardStep::Address,
            &StepData::new().with("city", "Leeds"),
        );
        assert!(!draft.is_complete(WizardStep::Address));
        assert_eq!(draft.step_data(WizardStep::Address).value("city"), Some("Leeds"));
    }

    #[rstest]
    fn incomplete_list_excludes_the_final_step() {
        let mut draft = Draft::new();
        for number in 1..=7 {
            if let Some(step) = WizardStep::from_number(number) {
                draft.mark_complete(step);
            }
        }
        assert_eq!(
            draft.incomplete_before_submit(),
            vec![WizardStep::Documents]
        );
    }
}
