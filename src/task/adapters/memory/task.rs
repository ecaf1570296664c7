//! In-memory repository for task lifecycle tests.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use std::collections::{BTreeMap, HashMap};
use std::sync::{Arc, RwLock};

use crate::task::{
    domain::{CompletionCounts, Task, TaskId, TaskPatch, TaskStatus},
    ports::{TaskRepository, TaskRepositoryError, TaskRepositoryResult},
};
use crate::user::domain::UserId;

/// Thread-safe in-memory task repository.
///
/// Tasks are kept ordered by their time-ordered identifier so listings can
/// walk the map in reverse to return the newest first.
#[derive(Debug, Clone, Default)]
pub struct InMemoryTaskRepository {
    state: Arc<RwLock<BTreeMap<TaskId, Task>>>,
}

impl InMemoryTaskRepository {
    /// Creates an empty in-memory repository.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    fn collect_newest_first(
        &self,
        predicate: impl Fn(&Task) -> bool,
    ) -> TaskRepositoryResult<Vec<Task>> {
        let state = self.state.read().map_err(lock_error)?;
        Ok(state
            .values()
            .rev()
            .filter(|task| predicate(task))
            .cloned()
            .collect())
    }
}

fn lock_error(err: impl ToString) -> TaskRepositoryError {
    TaskRepositoryError::persistence(std::io::Error::other(err.to_string()))
}

#[async_trait]
impl TaskRepository for InMemoryTaskRepository {
    async fn store(&self, task: &Task) -> TaskRepositoryResult<()> {
        let mut state = self.state.write().map_err(lock_error)?;
        if state.contains_key(&task.id()) {
            return Err(TaskRepositoryError::DuplicateTask(task.id()));
        }
        state.insert(task.id(), task.clone());
        Ok(())
    }

    async fn find_owned(&self, owner: UserId, id: TaskId) -> TaskRepositoryResult<Option<Task>> {
        let state = self.state.read().map_err(lock_error)?;
        Ok(state
            .get(&id)
            .filter(|task| task.owner_id() == owner)
            .cloned())
    }

    async fn list_by_owner(&self, owner: UserId) -> TaskRepositoryResult<Vec<Task>> {
        self.collect_newest_first(|task| task.owner_id() == owner)
    }

    async fn search_titles(&self, owner: UserId, query: &str) -> TaskRepositoryResult<Vec<Task>> {
        self.collect_newest_first(|task| {
            task.owner_id() == owner && task.title().contains_ignore_case(query)
        })
    }

    async fn list_by_status(
        &self,
        owner: UserId,
        status: TaskStatus,
    ) -> TaskRepositoryResult<Vec<Task>> {
        self.collect_newest_first(|task| task.owner_id() == owner && task.status() == status)
    }

    async fn apply_patch(
        &self,
        owner: UserId,
        id: TaskId,
        patch: &TaskPatch,
        updated_at: DateTime<Utc>,
    ) -> TaskRepositoryResult<bool> {
        let mut state = self.state.write().map_err(lock_error)?;
        let Some(task) = state.get_mut(&id).filter(|task| task.owner_id() == owner) else {
            return Ok(false);
        };
        task.apply(patch, updated_at);
        Ok(true)
    }

    async fn delete_owned(&self, owner: UserId, id: TaskId) -> TaskRepositoryResult<bool> {
        let mut state = self.state.write().map_err(lock_error)?;
        let owned = state.get(&id).is_some_and(|task| task.owner_id() == owner);
        if owned {
            state.remove(&id);
        }
        Ok(owned)
    }

    async fn completion_counts(
        &self,
        owners: &[UserId],
    ) -> TaskRepositoryResult<HashMap<UserId, CompletionCounts>> {
        let state = self.state.read().map_err(lock_error)?;
        let mut counts: HashMap<UserId, CompletionCounts> = HashMap::new();
        for task in state.values().filter(|task| owners.contains(&task.owner_id())) {
            counts.entry(task.owner_id()).or_default().record(task.status());
        }
        Ok(counts)
    }

    async fn list_all_by_status(&self, status: TaskStatus) -> TaskRepositoryResult<Vec<Task>> {
        self.collect_newest_first(|task| task.status() == status)
    }
}
