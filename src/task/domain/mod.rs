//! Domain model for the task lifecycle.
//!
//! Tasks are owned by exactly one user and move between `Pending` and
//! `Completed`; completing a task is what earns points.

mod error;
mod fields;
mod ids;
mod patch;
mod priority;
mod status;
mod task;

pub use error::TaskDomainError;
pub use fields::{Deadline, TaskTitle};
pub use ids::TaskId;
pub use patch::{CompletionCounts, TaskPatch};
pub use priority::TaskPriority;
pub use status::TaskStatus;
pub use task::{NewTaskData, PersistedTaskData, Task};

pub(crate) use task::normalize_description;
