//! Issue tracking for itops.
//!
//! Issues are created, listed, fetched and partially updated while moving
//! through the `PENDING` / `IN_PROGRESS` / `COMPLETED` / `CANCELLED`
//! lifecycle. The module follows hexagonal architecture:
//!
//! - Domain types and the pure lifecycle rules in [`domain`]
//! - Port contracts in [`ports`]
//! - Adapter implementations in [`adapters`]
//! - Orchestration services in [`services`]

pub mod adapters;
pub mod domain;
pub mod ports;
pub mod services;

#[cfg(test)]
mod tests;
