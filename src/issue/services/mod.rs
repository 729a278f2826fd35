//! Application services for issue tracking.

mod tracker;

pub use tracker::{IssueErrorKind, IssueTrackerError, IssueTrackerResult, IssueTrackerService};
