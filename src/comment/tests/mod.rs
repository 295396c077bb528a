//! Unit tests for the comment module.

mod sync_tests;
