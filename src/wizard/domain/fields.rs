//! Per-step form field data and validation errors.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// One step's field values, keyed by schema field name.
///
/// Stored as entered; blank entries count as absent for required-field
/// checks. Merging overwrites per field, so a partial save never discards
/// sibling fields already in the draft.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct StepData(BTreeMap<String, String>);

impl StepData {
    /// Creates an empty field set.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder-style field assignment.
    #[must_use]
    pub fn with(mut self, field: impl Into<String>, value: impl Into<String>) -> Self {
        self.0.insert(field.into(), value.into());
        self
    }

    /// Overwrites this set's fields with `incoming`'s, field by field.
    pub fn merge(&mut self, incoming: &Self) {
        for (field, value) in &incoming.0 {
            self.0.insert(field.clone(), value.clone());
        }
    }

    /// Returns a field's trimmed value, treating blank as absent.
    #[must_use]
    pub fn value(&self, field: &str) -> Option<&str> {
        self.0
            .get(field)
            .map(|value| value.trim())
            .filter(|value| !value.is_empty())
    }

    /// Returns whether no fields are set.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

/// A single field-level validation failure.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FieldError {
    /// Schema name of the failing field.
    pub field: String,
    /// Message shown inline next to the field.
    pub message: String,
}

impl FieldError {
    /// Creates a field error.
    #[must_use]
    pub fn new(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            message: message.into(),
        }
    }
}
