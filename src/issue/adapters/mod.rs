//! Adapter implementations of the issue ports.

pub mod memory;
