//! Application services for task lifecycle orchestration.

mod lifecycle;

pub use lifecycle::{
    CreateTaskRequest, TaskLifecycleError, TaskLifecycleResult, TaskLifecycleService,
    TaskWriteOutcome, UpdateTaskRequest,
};
