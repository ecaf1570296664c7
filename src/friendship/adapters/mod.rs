//! Adapter implementations for friend edge ports.

pub mod memory;
pub mod postgres;
