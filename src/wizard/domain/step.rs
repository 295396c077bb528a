//! The fixed step sequence of the application wizard.

use serde::{Deserialize, Serialize};
use std::fmt;

/// One step of the nine-step application wizard, in order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum WizardStep {
    /// Step 1: applicant name, birth date, nationality.
    PersonalDetails,
    /// Step 2: residential address.
    Address,
    /// Step 3: institution and course selection.
    CourseDetails,
    /// Step 4: email and phone contact details.
    Contact,
    /// Step 5: prior education history.
    Education,
    /// Step 6: employment history.
    Employment,
    /// Step 7: visa and declaration questions.
    Compliance,
    /// Step 8: supporting document references.
    Documents,
    /// Step 9: terms acceptance and final submission.
    TermsAndSubmit,
}

/// Every step, in wizard order.
pub const ALL_STEPS: [WizardStep; 9] = [
    WizardStep::PersonalDetails,
    WizardStep::Address,
    WizardStep::CourseDetails,
    WizardStep::Contact,
    WizardStep::Education,
    WizardStep::Employment,
    WizardStep::Compliance,
    WizardStep::Documents,
    WizardStep::TermsAndSubmit,
];

impl WizardStep {
    /// Returns the step's one-based position in the sequence.
    #[must_use]
    pub const fn number(self) -> u8 {
        match self {
            Self::PersonalDetails => 1,
            Self::Address => 2,
            Self::CourseDetails => 3,
            Self::Contact => 4,
            Self::Education => 5,
            Self::Employment => 6,
            Self::Compliance => 7,
            Self::Documents => 8,
            Self::TermsAndSubmit => 9,
        }
    }

    /// Returns the step at a one-based position, if it exists.
    #[must_use]
    pub fn from_number(number: u8) -> Option<Self> {
        ALL_STEPS
            .into_iter()
            .find(|step| step.number() == number)
    }

    /// Returns the label shown on the step indicator and in gate toasts.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::PersonalDetails => "Personal Details",
            Self::Address => "Address",
            Self::CourseDetails => "Course Details",
            Self::Contact => "Contact",
            Self::Education => "Education",
            Self::Employment => "Employment",
            Self::Compliance => "Compliance",
            Self::Documents => "Documents",
            Self::TermsAndSubmit => "Terms & Submit",
        }
    }

    /// Returns the following step, or `None` from the final step.
    #[must_use]
    pub fn next(self) -> Option<Self> {
        Self::from_number(self.number().saturating_add(1))
    }

    /// Returns the preceding step, or `None` from the first step.
    #[must_use]
    pub fn previous(self) -> Option<Self> {
        Self::from_number(self.number().saturating_sub(1))
    }
}

impl fmt::Display for WizardStep {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.label())
    }
}
