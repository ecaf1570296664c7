//! Per-user notification channel.
//!
//! Listeners connect under a user identity and receive events published to
//! that user. Delivery is best effort and at most once: nothing is persisted
//! or replayed, and a listener that is absent or slow simply misses events.
//!
//! - Event and connection types in [`domain`]
//! - The publishing port consumed by other contexts in [`ports`]
//! - The connection registry in [`services`]

pub mod domain;
pub mod ports;
pub mod services;

#[cfg(test)]
mod tests;
