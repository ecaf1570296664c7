//! User directory for taskmate.
//!
//! Users are registered with a credential hash produced by the external
//! authentication collaborator; this module never checks credentials. It
//! owns profile edits, the point balance credited by task completion, and
//! content-addressed avatar storage. The module follows hexagonal
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
