//! Adapter implementations for user directory ports.

pub mod filesystem;
pub mod memory;
pub mod postgres;
