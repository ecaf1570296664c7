//! Shared test helpers for `PostgreSQL` integration tests.

use diesel::connection::SimpleConnection;
use diesel::prelude::*;
use diesel::r2d2::{ConnectionManager, CustomizeConnection, Pool};
use mockable::DefaultClock;
use rstest::fixture;
use taskmate::friendship::adapters::postgres::PostgresFriendEdgeRepository;
use taskmate::migrations::CREATE_TABLES_SQL;
use taskmate::task::adapters::postgres::PostgresTaskRepository;
use taskmate::user::{
    adapters::postgres::PostgresUserRepository,
    domain::{CredentialHash, DisplayName, EmailAddress, User},
    ports::UserRepository,
};
use uuid::Uuid;

/// Boxed error used throughout the `PostgreSQL` tests.
pub type BoxError = Box<dyn std::error::Error + Send + Sync>;

/// Environment variable naming the test database.
pub const TEST_DATABASE_URL_ENV: &str = "TASKMATE_TEST_DATABASE_URL";

type TestPool = Pool<ConnectionManager<PgConnection>>;

#[derive(Debug)]
struct SearchPath {
    schema: String,
}

impl CustomizeConnection<PgConnection, diesel::r2d2::Error> for SearchPath {
    fn on_acquire(&self, conn: &mut PgConnection) -> Result<(), diesel::r2d2::Error> {
        conn.batch_execute(&format!("SET search_path TO {}", self.schema))
            .map_err(diesel::r2d2::Error::QueryError)
    }
}

/// Throwaway schema holding a freshly migrated copy of the tables.
pub struct TestSchema {
    url: String,
    schema: String,
    pool: TestPool,
}

impl TestSchema {
    fn create(url: String) -> Result<Self, BoxError> {
        let schema = format!("taskmate_test_{}", Uuid::new_v4().simple());
        let mut admin = PgConnection::establish(&url)?;
        admin.batch_execute(&format!("CREATE SCHEMA {schema}"))?;

        let pool = Pool::builder()
            .max_size(2)
            .connection_customizer(Box::new(SearchPath {
                schema: schema.clone(),
            }))
            .build(ConnectionManager::<PgConnection>::new(url.clone()))?;
        let mut conn = pool.get()?;
        conn.batch_execute(CREATE_TABLES_SQL)?;
        drop(conn);

        Ok(Self { url, schema, pool })
    }

    /// Returns a user repository bound to this schema.
    #[must_use]
    pub fn users(&self) -> PostgresUserRepository {
        PostgresUserRepository::new(self.pool.clone())
    }

    /// Returns a task repository bound to this schema.
    #[must_use]
    pub fn tasks(&self) -> PostgresTaskRepository {
        PostgresTaskRepository::new(self.pool.clone())
    }

    /// Returns a friend edge repository bound to this schema.
    #[must_use]
    pub fn edges(&self) -> PostgresFriendEdgeRepository {
        PostgresFriendEdgeRepository::new(self.pool.clone())
    }
}

impl Drop for TestSchema {
    fn drop(&mut self) {
        let statement = format!("DROP SCHEMA IF EXISTS {} CASCADE", self.schema);
        let outcome = PgConnection::establish(&self.url)
            .map_err(BoxError::from)
            .and_then(|mut conn| conn.batch_execute(&statement).map_err(BoxError::from));
        if let Err(err) = outcome {
            tracing::warn!(schema = %self.schema, error = %err, "failed to drop test schema");
        }
    }
}

/// Provisions a schema when a test database is configured.
///
/// Resolves to `None` when [`TEST_DATABASE_URL_ENV`] is unset.
///
/// # Errors
///
/// Returns an error if the schema cannot be created or migrated.
#[fixture]
pub async fn schema() -> Result<Option<TestSchema>, BoxError> {
    let Some(url) = std::env::var(TEST_DATABASE_URL_ENV)
        .ok()
        .filter(|value| !value.trim().is_empty())
    else {
        return Ok(None);
    };
    let created = tokio::task::spawn_blocking(move || TestSchema::create(url)).await??;
    Ok(Some(created))
}

/// Stores a user named `name` with address `<name>@example.com`.
///
/// # Errors
///
/// Returns an error if validation or the insert fails.
pub async fn insert_user(repo: &impl UserRepository, name: &str) -> Result<User, BoxError> {
    let user = User::register(
        DisplayName::new(name)?,
        EmailAddress::new(format!("{}@example.com", name.to_lowercase()))?,
        CredentialHash::new("argon2-hash")?,
        &DefaultClock,
    );
    repo.store(&user).await?;
    Ok(user)
}
