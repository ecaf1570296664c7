//! Step definitions for task completion scenarios.

pub mod world;

mod given;
mod then;
mod when;
