//! Domain model for issue tracking.
//!
//! Holds the issue aggregate, its status lifecycle and the pure rules that
//! decide how creates and patches change an issue. Locking, storage and
//! transport stay outside of this boundary.

mod error;
mod ids;
mod issue;
mod lifecycle;
mod status;
mod user;

pub use error::{IssueDomainError, ParseIssueStatusError};
pub use ids::{IssueId, UserId};
pub use issue::{Issue, NewIssue};
pub use lifecycle::{IssueDraft, IssuePatch, UNASSIGN, apply_patch, plan_creation};
pub use status::IssueStatus;
pub use user::{User, UserDirectory};
