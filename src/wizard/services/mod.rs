//! The wizard state machine.

pub mod machine;

pub use machine::{GateOutcome, Wizard, WizardError, WizardEvent};
