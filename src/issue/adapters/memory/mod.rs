//! In-memory adapters for the issue tracker.
//!
//! Nothing here survives a restart.

mod directory;
mod issue;

pub use directory::StaticUserDirectory;
pub use issue::InMemoryIssueRepository;
