//! `PostgreSQL` repository implementation for friend edges.

use super::{
    models::{FriendEdgeRow, NewFriendEdgeRow},
    schema::friend_edges,
};
use crate::friendship::{
    domain::{EdgeStatus, FriendEdge, FriendEdgeId, PersistedFriendEdgeData},
    ports::{FriendEdgeRepository, FriendEdgeRepositoryError, FriendEdgeRepositoryResult},
};
use crate::user::domain::UserId;
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use diesel::pg::PgConnection;
use diesel::prelude::*;
use diesel::r2d2::{ConnectionManager, Pool};
use diesel::result::{DatabaseErrorKind, Error as DieselError};

/// `PostgreSQL` connection pool type used by friendship adapters.
pub type FriendEdgePgPool = Pool<ConnectionManager<PgConnection>>;

/// `PostgreSQL`-backed friend edge repository.
#[derive(Debug, Clone)]
pub struct PostgresFriendEdgeRepository {
    pool: FriendEdgePgPool,
}

impl PostgresFriendEdgeRepository {
    /// Creates a new repository from a `PostgreSQL` connection pool.
    #[must_use]
    pub const fn new(pool: FriendEdgePgPool) -> Self {
        Self { pool }
    }

    async fn run_blocking<F, T>(&self, f: F) -> FriendEdgeRepositoryResult<T>
    where
        F: FnOnce(&mut PgConnection) -> FriendEdgeRepositoryResult<T> + Send + 'static,
        T: Send + 'static,
    {
        let pool = self.pool.clone();
        tokio::task::spawn_blocking(move || {
            let mut connection = pool.get().map_err(FriendEdgeRepositoryError::persistence)?;
            f(&mut connection)
        })
        .await
        .map_err(FriendEdgeRepositoryError::persistence)?
    }
}

#[async_trait]
impl FriendEdgeRepository for PostgresFriendEdgeRepository {
    async fn insert_if_absent(&self, edge: &FriendEdge) -> FriendEdgeRepositoryResult<bool> {
        let new_row = to_new_row(edge);
        self.run_blocking(move |connection| {
            let inserted = diesel::insert_into(friend_edges::table)
                .values(&new_row)
                .on_conflict((friend_edges::source_id, friend_edges::target_id))
                .do_nothing()
                .execute(connection)
                .map_err(map_write_error)?;
            Ok(inserted > 0)
        })
        .await
    }

    async fn accept_request(
        &self,
        requester: UserId,
        accepter: UserId,
        reverse: &FriendEdge,
        accepted_at: DateTime<Utc>,
    ) -> FriendEdgeRepositoryResult<bool> {
        let reverse_row = to_new_row(reverse);
        self.run_blocking(move |connection| {
            connection
                .transaction::<bool, DieselError, _>(|tx| {
                    let accepted = diesel::update(
                        friend_edges::table
                            .filter(friend_edges::source_id.eq(requester.into_inner()))
                            .filter(friend_edges::target_id.eq(accepter.into_inner()))
                            .filter(friend_edges::status.eq(EdgeStatus::Pending.as_str())),
                    )
                    .set((
                        friend_edges::status.eq(EdgeStatus::Accepted.as_str()),
                        friend_edges::updated_at.eq(accepted_at),
                    ))
                    .execute(tx)?;
                    if accepted == 0 {
                        return Ok(false);
                    }

                    diesel::insert_into(friend_edges::table)
                        .values(&reverse_row)
                        .on_conflict((friend_edges::source_id, friend_edges::target_id))
                        .do_update()
                        .set((
                            friend_edges::status.eq(EdgeStatus::Accepted.as_str()),
                            friend_edges::updated_at.eq(accepted_at),
                        ))
                        .execute(tx)?;
                    Ok(true)
                })
                .map_err(map_write_error)
        })
        .await
    }

    async fn find_edge(
        &self,
        source: UserId,
        target: UserId,
    ) -> FriendEdgeRepositoryResult<Option<FriendEdge>> {
        self.run_blocking(move |connection| {
            let row = friend_edges::table
                .filter(friend_edges::source_id.eq(source.into_inner()))
                .filter(friend_edges::target_id.eq(target.into_inner()))
                .select(FriendEdgeRow::as_select())
                .first::<FriendEdgeRow>(connection)
                .optional()
                .map_err(FriendEdgeRepositoryError::persistence)?;
            row.map(row_to_edge).transpose()
        })
        .await
    }

    async fn list_accepted_targets(&self, source: UserId) -> FriendEdgeRepositoryResult<Vec<UserId>> {
        self.run_blocking(move |connection| {
            let targets = friend_edges::table
                .filter(friend_edges::source_id.eq(source.into_inner()))
                .filter(friend_edges::status.eq(EdgeStatus::Accepted.as_str()))
                .select(friend_edges::target_id)
                .load::<uuid::Uuid>(connection)
                .map_err(FriendEdgeRepositoryError::persistence)?;
            Ok(targets.into_iter().map(UserId::from_uuid).collect())
        })
        .await
    }

    async fn list_pending_sources(&self, target: UserId) -> FriendEdgeRepositoryResult<Vec<UserId>> {
        self.run_blocking(move |connection| {
            let sources = friend_edges::table
                .filter(friend_edges::target_id.eq(target.into_inner()))
                .filter(friend_edges::status.eq(EdgeStatus::Pending.as_str()))
                .select(friend_edges::source_id)
                .load::<uuid::Uuid>(connection)
                .map_err(FriendEdgeRepositoryError::persistence)?;
            Ok(sources.into_iter().map(UserId::from_uuid).collect())
        })
        .await
    }
}

fn map_write_error(err: DieselError) -> FriendEdgeRepositoryError {
    match err {
        DieselError::DatabaseError(DatabaseErrorKind::ForeignKeyViolation, _) => {
            FriendEdgeRepositoryError::UnknownUser
        }
        _ => FriendEdgeRepositoryError::persistence(err),
    }
}

fn to_new_row(edge: &FriendEdge) -> NewFriendEdgeRow {
    NewFriendEdgeRow {
        id: edge.id().into_inner(),
        source_id: edge.source_id().into_inner(),
        target_id: edge.target_id().into_inner(),
        status: edge.status().as_str().to_owned(),
        created_at: edge.created_at(),
        updated_at: edge.updated_at(),
    }
}

fn row_to_edge(row: FriendEdgeRow) -> FriendEdgeRepositoryResult<FriendEdge> {
    let data = PersistedFriendEdgeData {
        id: FriendEdgeId::from_uuid(row.id),
        source_id: UserId::from_uuid(row.source_id),
        target_id: UserId::from_uuid(row.target_id),
        status: EdgeStatus::try_from(row.status.as_str())
            .map_err(FriendEdgeRepositoryError::persistence)?,
        created_at: row.created_at,
        updated_at: row.updated_at,
    };
    Ok(FriendEdge::from_persisted(data))
}
