//! Partial task edits.

use super::{Deadline, TaskPriority, TaskStatus, TaskTitle};

/// Validated set of fields to overwrite on a task.
///
/// Absent fields are left untouched. A present description of `None` clears
/// the description.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TaskPatch {
    /// New title.
    pub title: Option<TaskTitle>,
    /// New description; `Some(None)` clears it.
    pub description: Option<Option<String>>,
    /// New deadline.
    pub deadline: Option<Deadline>,
    /// New priority.
    pub priority: Option<TaskPriority>,
    /// New status.
    pub status: Option<TaskStatus>,
}

impl TaskPatch {
    /// Returns `true` when no field is set.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.title.is_none()
            && self.description.is_none()
            && self.deadline.is_none()
            && self.priority.is_none()
            && self.status.is_none()
    }

    /// Returns `true` when the patch marks the task completed.
    #[must_use]
    pub fn completes(&self) -> bool {
        self.status.is_some_and(TaskStatus::is_completed)
    }
}

/// Per-user task tallies used by the leaderboard.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct CompletionCounts {
    /// Tasks with status `Completed`.
    pub completed: u64,
    /// Tasks with any other status.
    pub incomplete: u64,
}

impl CompletionCounts {
    /// Adds one task with the given status to the tally.
    pub const fn record(&mut self, status: TaskStatus) {
        if status.is_completed() {
            self.completed = self.completed.saturating_add(1);
        } else {
            self.incomplete = self.incomplete.saturating_add(1);
        }
    }
}
