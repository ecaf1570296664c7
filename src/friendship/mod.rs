//! Friend graph for taskmate.
//!
//! Friendship is stored as directed edges. A request is a single `pending`
//! edge from requester to target; accepting it flips that edge to `accepted`
//! and inserts the `accepted` reverse edge in the same atomic unit, so a
//! mutual friendship is always two accepted edges.
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
