//! Unit tests for the issue module.
