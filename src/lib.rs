//! Taskmate: task lifecycle, friend graph, and leaderboard core for a
//! personal productivity application.
//!
//! Authentication, password hashing, email delivery, and the web frontend
//! are external collaborators; this crate receives an authenticated user
//! identity with every call and owns the rules behind it.
//!
//! # Architecture
//!
//! Each bounded context follows hexagonal architecture:
//!
//! - **Domain**: Pure business logic with no infrastructure dependencies
//! - **Ports**: Abstract trait interfaces for persistence and delivery
//! - **Adapters**: In-memory and `PostgreSQL` implementations of ports
//! - **Services**: Orchestration over ports
//!
//! # Modules
//!
//! - [`user`]: Registration, profiles, points, and avatars
//! - [`task`]: Owner-scoped task CRUD and completion rewards
//! - [`friendship`]: Friend request handshake over directed edges
//! - [`leaderboard`]: Completion rankings, global or among friends
//! - [`notification`]: Per-user push channel for task events
//! - [`reminder`]: Deadline reminder batch job
//! - [`config`]: Runtime configuration
//! - [`error`]: Caller-facing error classification

pub mod config;
pub mod error;
pub mod friendship;
pub mod leaderboard;
pub mod migrations;
pub mod notification;
pub mod reminder;
pub mod task;
pub mod user;
