//! Unit tests for the wizard module.
