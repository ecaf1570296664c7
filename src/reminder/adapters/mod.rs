//! Adapter implementations for reminder ports.

pub mod memory;
