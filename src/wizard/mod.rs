//! Multi-step student application wizard.
//!
//! Nine fixed steps, each with its own field schema. The draft accumulates
//! validated step data in memory only; a fresh session starts blank. Steps
//! advance through explicit save-and-continue, free navigation jumps
//! anywhere, and review/submit gate on steps one through eight being
//! complete.

pub mod adapters;
pub mod domain;
pub mod ports;
pub mod services;

pub use domain::{Draft, FieldError, StepData, WizardStep};
pub use services::{GateOutcome, Wizard, WizardError, WizardEvent};

#[cfg(test)]
mod tests;
