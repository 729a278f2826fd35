//! Port contracts for issue tracking.
//!
//! Ports define infrastructure-agnostic interfaces used by issue services.
//! The read-only [`UserDirectory`](crate::issue::domain::UserDirectory) lives
//! in the domain because the lifecycle rules consult it directly.

pub mod repository;

pub use repository::{IssueRepository, IssueRepositoryError, IssueRepositoryResult};
