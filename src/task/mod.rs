//! Task lifecycle for taskmate.
//!
//! Tasks belong to exactly one user and every read or write is scoped to
//! that owner; touching someone else's task is a silent no-op. Completing a
//! task credits the owner's points and pushes a `taskCompleted` event to the
//! notification channel. The module follows hexagonal architecture:
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
