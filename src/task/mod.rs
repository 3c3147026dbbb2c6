//! Task intake and asynchronous processing for Majordomo.
//!
//! This module owns the task record, its forward-only lifecycle, and the two
//! services that drive it: intake (create plus read-side queries, firing the
//! asynchronous hand-off) and processing (one agent turn per accepted
//! hand-off, recording the outcome). The module follows hexagonal
//! architecture:
//!
//! - Domain types in [`domain`]
//! - Port contracts in [`ports`]
//! - Adapter implementations in [`adapters`]
//! - Orchestration services in [`services`]

pub mod adapters;
pub mod domain;
pub mod ports;
pub mod services;

#[cfg(test)]
mod tests;
