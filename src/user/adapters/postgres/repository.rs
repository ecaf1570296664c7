//! `PostgreSQL` repository implementation for user storage.

use super::{
    models::{NewUserRow, UserProfileChangeset, UserRow},
    schema::users,
};
use crate::user::{
    domain::{
        AvatarRef, CredentialHash, DisplayName, EmailAddress, PersistedUserData, ProfileChanges,
        User, UserId,
    },
    ports::{UserRepository, UserRepositoryError, UserRepositoryResult},
};
use async_trait::async_trait;
use diesel::pg::PgConnection;
use diesel::prelude::*;
use diesel::r2d2::{ConnectionManager, Pool};
use diesel::result::{DatabaseErrorInformation, DatabaseErrorKind, Error as DieselError};

/// `PostgreSQL` connection pool type used by user adapters.
pub type UserPgPool = Pool<ConnectionManager<PgConnection>>;

const EMAIL_UNIQUE_INDEX: &str = "idx_users_email_unique";

/// `PostgreSQL`-backed user repository.
#[derive(Debug, Clone)]
pub struct PostgresUserRepository {
    pool: UserPgPool,
}

impl PostgresUserRepository {
    /// Creates a new repository from a `PostgreSQL` connection pool.
    #[must_use]
    pub const fn new(pool: UserPgPool) -> Self {
        Self { pool }
    }

    async fn run_blocking<F, T>(&self, f: F) -> UserRepositoryResult<T>
    where
        F: FnOnce(&mut PgConnection) -> UserRepositoryResult<T> + Send + 'static,
        T: Send + 'static,
    {
        let pool = self.pool.clone();
        tokio::task::spawn_blocking(move || {
            let mut connection = pool.get().map_err(UserRepositoryError::persistence)?;
            f(&mut connection)
        })
        .await
        .map_err(UserRepositoryError::persistence)?
    }
}

#[async_trait]
impl UserRepository for PostgresUserRepository {
    async fn store(&self, user: &User) -> UserRepositoryResult<()> {
        let user_id = user.id();
        let email = user.email().clone();
        let new_row = to_new_row(user)?;

        self.run_blocking(move |connection| {
            diesel::insert_into(users::table)
                .values(&new_row)
                .execute(connection)
                .map_err(|err| match err {
                    DieselError::DatabaseError(DatabaseErrorKind::UniqueViolation, ref info)
                        if is_email_unique_violation(info.as_ref()) =>
                    {
                        UserRepositoryError::DuplicateEmail(email.clone())
                    }
                    DieselError::DatabaseError(DatabaseErrorKind::UniqueViolation, _) => {
                        UserRepositoryError::DuplicateUser(user_id)
                    }
                    _ => UserRepositoryError::persistence(err),
                })?;
            Ok(())
        })
        .await
    }

    async fn update_profile(
        &self,
        id: UserId,
        changes: &ProfileChanges,
    ) -> UserRepositoryResult<User> {
        let email = changes.email.clone();
        let changeset = UserProfileChangeset {
            name: changes.name.as_ref().map(|name| name.as_str().to_owned()),
            email: changes.email.as_ref().map(|email| email.as_str().to_owned()),
            avatar_ref: changes
                .avatar_ref
                .as_ref()
                .map(|avatar| avatar.as_str().to_owned()),
            updated_at: changes.updated_at,
        };

        self.run_blocking(move |connection| {
            let row = diesel::update(users::table.filter(users::id.eq(id.into_inner())))
                .set(&changeset)
                .returning(UserRow::as_returning())
                .get_result::<UserRow>(connection)
                .optional()
                .map_err(|err| match (err, email.as_ref()) {
                    (
                        DieselError::DatabaseError(DatabaseErrorKind::UniqueViolation, ref info),
                        Some(taken),
                    ) if is_email_unique_violation(info.as_ref()) => {
                        UserRepositoryError::DuplicateEmail(taken.clone())
                    }
                    (other, _) => UserRepositoryError::persistence(other),
                })?
                .ok_or(UserRepositoryError::NotFound(id))?;
            row_to_user(row)
        })
        .await
    }

    async fn find_by_id(&self, id: UserId) -> UserRepositoryResult<Option<User>> {
        self.run_blocking(move |connection| {
            let row = users::table
                .filter(users::id.eq(id.into_inner()))
                .select(UserRow::as_select())
                .first::<UserRow>(connection)
                .optional()
                .map_err(UserRepositoryError::persistence)?;
            row.map(row_to_user).transpose()
        })
        .await
    }

    async fn find_by_email(&self, email: &EmailAddress) -> UserRepositoryResult<Option<User>> {
        let lookup = email.as_str().to_owned();
        self.run_blocking(move |connection| {
            let row = users::table
                .filter(users::email.eq(&lookup))
                .select(UserRow::as_select())
                .first::<UserRow>(connection)
                .optional()
                .map_err(UserRepositoryError::persistence)?;
            row.map(row_to_user).transpose()
        })
        .await
    }

    async fn find_many(&self, ids: &[UserId]) -> UserRepositoryResult<Vec<User>> {
        if ids.is_empty() {
            return Ok(Vec::new());
        }
        let uuids: Vec<uuid::Uuid> = ids.iter().map(|id| id.into_inner()).collect();
        self.run_blocking(move |connection| {
            let rows = users::table
                .filter(users::id.eq_any(uuids))
                .select(UserRow::as_select())
                .load::<UserRow>(connection)
                .map_err(UserRepositoryError::persistence)?;
            rows.into_iter().map(row_to_user).collect()
        })
        .await
    }

    async fn list_all(&self) -> UserRepositoryResult<Vec<User>> {
        self.run_blocking(move |connection| {
            let rows = users::table
                .select(UserRow::as_select())
                .load::<UserRow>(connection)
                .map_err(UserRepositoryError::persistence)?;
            rows.into_iter().map(row_to_user).collect()
        })
        .await
    }

    async fn add_points(&self, id: UserId, amount: u64) -> UserRepositoryResult<u64> {
        let increment = i64::try_from(amount).map_err(UserRepositoryError::persistence)?;
        self.run_blocking(move |connection| {
            let balance = diesel::update(users::table.filter(users::id.eq(id.into_inner())))
                .set(users::points.eq(users::points + increment))
                .returning(users::points)
                .get_result::<i64>(connection)
                .optional()
                .map_err(UserRepositoryError::persistence)?
                .ok_or(UserRepositoryError::NotFound(id))?;
            u64::try_from(balance).map_err(UserRepositoryError::persistence)
        })
        .await
    }
}

fn to_new_row(user: &User) -> UserRepositoryResult<NewUserRow> {
    let points = i64::try_from(user.points()).map_err(UserRepositoryError::persistence)?;
    Ok(NewUserRow {
        id: user.id().into_inner(),
        name: user.name().as_str().to_owned(),
        email: user.email().as_str().to_owned(),
        credential_hash: user.credential_hash().as_str().to_owned(),
        avatar_ref: user.avatar_ref().map(|avatar| avatar.as_str().to_owned()),
        points,
        created_at: user.created_at(),
        updated_at: user.updated_at(),
    })
}

fn row_to_user(row: UserRow) -> UserRepositoryResult<User> {
    let UserRow {
        id,
        name,
        email,
        credential_hash,
        avatar_ref,
        points,
        created_at,
        updated_at,
    } = row;

    let data = PersistedUserData {
        id: UserId::from_uuid(id),
        name: DisplayName::new(name).map_err(UserRepositoryError::persistence)?,
        email: EmailAddress::new(email).map_err(UserRepositoryError::persistence)?,
        credential_hash: CredentialHash::new(credential_hash)
            .map_err(UserRepositoryError::persistence)?,
        avatar_ref: avatar_ref
            .map(AvatarRef::parse)
            .transpose()
            .map_err(UserRepositoryError::persistence)?,
        points: u64::try_from(points).map_err(UserRepositoryError::persistence)?,
        created_at,
        updated_at,
    };
    Ok(User::from_persisted(data))
}

fn is_email_unique_violation(info: &dyn DatabaseErrorInformation) -> bool {
    info.constraint_name()
        .is_some_and(|name| name == EMAIL_UNIQUE_INDEX)
}
