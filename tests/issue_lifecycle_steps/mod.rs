//! Step definitions for issue lifecycle BDD scenarios.

pub mod when;
