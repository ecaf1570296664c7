//! Step definitions for friendship handshake scenarios.

pub mod world;

mod given;
mod then;
mod when;
