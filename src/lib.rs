//! Itops: a small in-memory issue tracker.
//!
//! Issues move through a four-state lifecycle (`PENDING`, `IN_PROGRESS`,
//! `COMPLETED`, `CANCELLED`) that is tied to whether the issue has an
//! assignee. Every issue with a status other than `PENDING` has an assignee.
//!
//! # Architecture
//!
//! The crate follows hexagonal architecture principles:
//!
//! - **Domain**: Lifecycle rules as pure functions over issue snapshots
//! - **Ports**: The issue repository trait
//! - **Adapters**: In-memory repository and static user directory
//! - **Services**: Orchestration of lookups, rules, and storage
//!
//! # Modules
//!
//! - [`issue`]: Issue lifecycle, storage, and the tracker service
//! - [`api`]: JSON-over-HTTP routes for the tracker
//! - [`config`]: Server settings from TOML and the environment

pub mod api;
pub mod config;
pub mod issue;
