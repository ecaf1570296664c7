//! Deadline reminder batch job.
//!
//! Collects pending tasks whose deadline falls inside a look-ahead window,
//! renders one plain-text message per owner, and hands each to an external
//! delivery port. A failed delivery is logged and counted; the batch always
//! runs to the end.

pub mod adapters;
pub mod domain;
pub mod ports;
pub mod services;

#[cfg(test)]
mod tests;
