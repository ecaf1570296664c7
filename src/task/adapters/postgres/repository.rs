//! `PostgreSQL` repository implementation for task lifecycle storage.

use super::{
    models::{CompletionCountRow, NewTaskRow, TaskChangeset, TaskRow},
    schema::tasks,
};
use crate::task::{
    domain::{
        CompletionCounts, Deadline, PersistedTaskData, Task, TaskId, TaskPatch, TaskPriority,
        TaskStatus, TaskTitle, normalize_description,
    },
    ports::{TaskRepository, TaskRepositoryError, TaskRepositoryResult},
};
use crate::user::domain::UserId;
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use diesel::pg::PgConnection;
use diesel::prelude::*;
use diesel::r2d2::{ConnectionManager, Pool};
use diesel::result::{DatabaseErrorKind, Error as DieselError};
use diesel::sql_types::{Array, Uuid as SqlUuid};
use std::collections::HashMap;

/// `PostgreSQL` connection pool type used by task adapters.
pub type TaskPgPool = Pool<ConnectionManager<PgConnection>>;

const COMPLETION_COUNTS_SQL: &str = "\
    SELECT owner_id, \
           COUNT(*) FILTER (WHERE status = 'Completed') AS completed, \
           COUNT(*) FILTER (WHERE status <> 'Completed') AS incomplete \
    FROM tasks \
    WHERE owner_id = ANY($1) \
    GROUP BY owner_id";

/// `PostgreSQL`-backed task repository.
#[derive(Debug, Clone)]
pub struct PostgresTaskRepository {
    pool: TaskPgPool,
}

impl PostgresTaskRepository {
    /// Creates a new repository from a `PostgreSQL` connection pool.
    #[must_use]
    pub const fn new(pool: TaskPgPool) -> Self {
        Self { pool }
    }

    async fn run_blocking<F, T>(&self, f: F) -> TaskRepositoryResult<T>
    where
        F: FnOnce(&mut PgConnection) -> TaskRepositoryResult<T> + Send + 'static,
        T: Send + 'static,
    {
        let pool = self.pool.clone();
        tokio::task::spawn_blocking(move || {
            let mut connection = pool.get().map_err(TaskRepositoryError::persistence)?;
            f(&mut connection)
        })
        .await
        .map_err(TaskRepositoryError::persistence)?
    }
}

#[async_trait]
impl TaskRepository for PostgresTaskRepository {
    async fn store(&self, task: &Task) -> TaskRepositoryResult<()> {
        let task_id = task.id();
        let owner_id = task.owner_id();
        let new_row = to_new_row(task);

        self.run_blocking(move |connection| {
            diesel::insert_into(tasks::table)
                .values(&new_row)
                .execute(connection)
                .map_err(|err| match err {
                    DieselError::DatabaseError(DatabaseErrorKind::UniqueViolation, _) => {
                        TaskRepositoryError::DuplicateTask(task_id)
                    }
                    DieselError::DatabaseError(DatabaseErrorKind::ForeignKeyViolation, _) => {
                        TaskRepositoryError::UnknownOwner(owner_id)
                    }
                    _ => TaskRepositoryError::persistence(err),
                })?;
            Ok(())
        })
        .await
    }

    async fn find_owned(&self, owner: UserId, id: TaskId) -> TaskRepositoryResult<Option<Task>> {
        self.run_blocking(move |connection| {
            let row = tasks::table
                .filter(tasks::id.eq(id.into_inner()))
                .filter(tasks::owner_id.eq(owner.into_inner()))
                .select(TaskRow::as_select())
                .first::<TaskRow>(connection)
                .optional()
                .map_err(TaskRepositoryError::persistence)?;
            row.map(row_to_task).transpose()
        })
        .await
    }

    async fn list_by_owner(&self, owner: UserId) -> TaskRepositoryResult<Vec<Task>> {
        self.run_blocking(move |connection| {
            let rows = tasks::table
                .filter(tasks::owner_id.eq(owner.into_inner()))
                .order(tasks::id.desc())
                .select(TaskRow::as_select())
                .load::<TaskRow>(connection)
                .map_err(TaskRepositoryError::persistence)?;
            rows.into_iter().map(row_to_task).collect()
        })
        .await
    }

    async fn search_titles(&self, owner: UserId, query: &str) -> TaskRepositoryResult<Vec<Task>> {
        let pattern = format!("%{}%", escape_like(query));
        self.run_blocking(move |connection| {
            let rows = tasks::table
                .filter(tasks::owner_id.eq(owner.into_inner()))
                .filter(tasks::title.ilike(&pattern))
                .order(tasks::id.desc())
                .select(TaskRow::as_select())
                .load::<TaskRow>(connection)
                .map_err(TaskRepositoryError::persistence)?;
            rows.into_iter().map(row_to_task).collect()
        })
        .await
    }

    async fn list_by_status(
        &self,
        owner: UserId,
        status: TaskStatus,
    ) -> TaskRepositoryResult<Vec<Task>> {
        self.run_blocking(move |connection| {
            let rows = tasks::table
                .filter(tasks::owner_id.eq(owner.into_inner()))
                .filter(tasks::status.eq(status.as_str()))
                .order(tasks::id.desc())
                .select(TaskRow::as_select())
                .load::<TaskRow>(connection)
                .map_err(TaskRepositoryError::persistence)?;
            rows.into_iter().map(row_to_task).collect()
        })
        .await
    }

    async fn apply_patch(
        &self,
        owner: UserId,
        id: TaskId,
        patch: &TaskPatch,
        updated_at: DateTime<Utc>,
    ) -> TaskRepositoryResult<bool> {
        let changeset = to_changeset(patch, updated_at);
        self.run_blocking(move |connection| {
            let updated_count = diesel::update(
                tasks::table
                    .filter(tasks::id.eq(id.into_inner()))
                    .filter(tasks::owner_id.eq(owner.into_inner())),
            )
            .set(&changeset)
            .execute(connection)
            .map_err(TaskRepositoryError::persistence)?;
            Ok(updated_count > 0)
        })
        .await
    }

    async fn delete_owned(&self, owner: UserId, id: TaskId) -> TaskRepositoryResult<bool> {
        self.run_blocking(move |connection| {
            let deleted_count = diesel::delete(
                tasks::table
                    .filter(tasks::id.eq(id.into_inner()))
                    .filter(tasks::owner_id.eq(owner.into_inner())),
            )
            .execute(connection)
            .map_err(TaskRepositoryError::persistence)?;
            Ok(deleted_count > 0)
        })
        .await
    }

    async fn completion_counts(
        &self,
        owners: &[UserId],
    ) -> TaskRepositoryResult<HashMap<UserId, CompletionCounts>> {
        if owners.is_empty() {
            return Ok(HashMap::new());
        }
        let uuids: Vec<uuid::Uuid> = owners.iter().map(|id| id.into_inner()).collect();
        self.run_blocking(move |connection| {
            let rows = diesel::sql_query(COMPLETION_COUNTS_SQL)
                .bind::<Array<SqlUuid>, _>(uuids)
                .load::<CompletionCountRow>(connection)
                .map_err(TaskRepositoryError::persistence)?;
            rows.into_iter()
                .map(|row| {
                    let counts = CompletionCounts {
                        completed: u64::try_from(row.completed)
                            .map_err(TaskRepositoryError::persistence)?,
                        incomplete: u64::try_from(row.incomplete)
                            .map_err(TaskRepositoryError::persistence)?,
                    };
                    Ok((UserId::from_uuid(row.owner_id), counts))
                })
                .collect()
        })
        .await
    }

    async fn list_all_by_status(&self, status: TaskStatus) -> TaskRepositoryResult<Vec<Task>> {
        self.run_blocking(move |connection| {
            let rows = tasks::table
                .filter(tasks::status.eq(status.as_str()))
                .order(tasks::id.desc())
                .select(TaskRow::as_select())
                .load::<TaskRow>(connection)
                .map_err(TaskRepositoryError::persistence)?;
            rows.into_iter().map(row_to_task).collect()
        })
        .await
    }
}

fn to_new_row(task: &Task) -> NewTaskRow {
    NewTaskRow {
        id: task.id().into_inner(),
        owner_id: task.owner_id().into_inner(),
        title: task.title().as_str().to_owned(),
        description: task.description().map(str::to_owned),
        deadline: task.deadline().as_str().to_owned(),
        priority: task.priority().as_str().to_owned(),
        status: task.status().as_str().to_owned(),
        created_at: task.created_at(),
        updated_at: task.updated_at(),
    }
}

fn to_changeset(patch: &TaskPatch, updated_at: DateTime<Utc>) -> TaskChangeset {
    TaskChangeset {
        title: patch.title.as_ref().map(|title| title.as_str().to_owned()),
        description: patch
            .description
            .clone()
            .map(normalize_description),
        deadline: patch
            .deadline
            .as_ref()
            .map(|deadline| deadline.as_str().to_owned()),
        priority: patch.priority.map(|priority| priority.as_str().to_owned()),
        status: patch.status.map(|status| status.as_str().to_owned()),
        updated_at,
    }
}

fn row_to_task(row: TaskRow) -> TaskRepositoryResult<Task> {
    let TaskRow {
        id,
        owner_id,
        title,
        description,
        deadline,
        priority,
        status,
        created_at,
        updated_at,
    } = row;

    let data = PersistedTaskData {
        id: TaskId::from_uuid(id),
        owner_id: UserId::from_uuid(owner_id),
        title: TaskTitle::new(title).map_err(TaskRepositoryError::persistence)?,
        description,
        deadline: Deadline::new(deadline).map_err(TaskRepositoryError::persistence)?,
        priority: TaskPriority::try_from(priority.as_str())
            .map_err(TaskRepositoryError::persistence)?,
        status: TaskStatus::try_from(status.as_str()).map_err(TaskRepositoryError::persistence)?,
        created_at,
        updated_at,
    };
    Ok(Task::from_persisted(data))
}

/// Escapes `LIKE` metacharacters so the query matches literally.
fn escape_like(query: &str) -> String {
    let mut escaped = String::with_capacity(query.len());
    for ch in query.chars() {
        if matches!(ch, '%' | '_' | '\\') {
            escaped.push('\\');
        }
        escaped.push(ch);
    }
    escaped
}
