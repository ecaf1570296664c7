//! In-memory repository for user directory tests.

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::{Arc, RwLock};

use crate::user::{
    domain::{EmailAddress, PersistedUserData, ProfileChanges, User, UserId},
    ports::{UserRepository, UserRepositoryError, UserRepositoryResult},
};

/// Thread-safe in-memory user repository.
#[derive(Debug, Clone, Default)]
pub struct InMemoryUserRepository {
    state: Arc<RwLock<InMemoryUserState>>,
}

#[derive(Debug, Default)]
struct InMemoryUserState {
    users: HashMap<UserId, User>,
    email_index: HashMap<EmailAddress, UserId>,
}

impl InMemoryUserRepository {
    /// Creates an empty in-memory repository.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

fn lock_error(err: impl ToString) -> UserRepositoryError {
    UserRepositoryError::persistence(std::io::Error::other(err.to_string()))
}

#[async_trait]
impl UserRepository for InMemoryUserRepository {
    async fn store(&self, user: &User) -> UserRepositoryResult<()> {
        let mut state = self.state.write().map_err(lock_error)?;
        if state.users.contains_key(&user.id()) {
            return Err(UserRepositoryError::DuplicateUser(user.id()));
        }
        if state.email_index.contains_key(user.email()) {
            return Err(UserRepositoryError::DuplicateEmail(user.email().clone()));
        }

        state.email_index.insert(user.email().clone(), user.id());
        state.users.insert(user.id(), user.clone());
        Ok(())
    }

    async fn update_profile(
        &self,
        id: UserId,
        changes: &ProfileChanges,
    ) -> UserRepositoryResult<User> {
        let mut state = self.state.write().map_err(lock_error)?;
        let current_email = state
            .users
            .get(&id)
            .ok_or(UserRepositoryError::NotFound(id))?
            .email()
            .clone();

        if let Some(email) = changes.email.as_ref().filter(|email| **email != current_email) {
            if state.email_index.contains_key(email) {
                return Err(UserRepositoryError::DuplicateEmail(email.clone()));
            }
            state.email_index.remove(&current_email);
            state.email_index.insert(email.clone(), id);
        }

        let user = state
            .users
            .get_mut(&id)
            .ok_or(UserRepositoryError::NotFound(id))?;
        user.apply(changes);
        Ok(user.clone())
    }

    async fn find_by_id(&self, id: UserId) -> UserRepositoryResult<Option<User>> {
        let state = self.state.read().map_err(lock_error)?;
        Ok(state.users.get(&id).cloned())
    }

    async fn find_by_email(&self, email: &EmailAddress) -> UserRepositoryResult<Option<User>> {
        let state = self.state.read().map_err(lock_error)?;
        Ok(state
            .email_index
            .get(email)
            .and_then(|id| state.users.get(id))
            .cloned())
    }

    async fn find_many(&self, ids: &[UserId]) -> UserRepositoryResult<Vec<User>> {
        let state = self.state.read().map_err(lock_error)?;
        Ok(ids
            .iter()
            .filter_map(|id| state.users.get(id).cloned())
            .collect())
    }

    async fn list_all(&self) -> UserRepositoryResult<Vec<User>> {
        let state = self.state.read().map_err(lock_error)?;
        Ok(state.users.values().cloned().collect())
    }

    async fn add_points(&self, id: UserId, amount: u64) -> UserRepositoryResult<u64> {
        let mut state = self.state.write().map_err(lock_error)?;
        let user = state
            .users
            .get(&id)
            .ok_or(UserRepositoryError::NotFound(id))?;
        let balance = user.points().saturating_add(amount);
        let updated = User::from_persisted(PersistedUserData {
            id: user.id(),
            name: user.name().clone(),
            email: user.email().clone(),
            credential_hash: user.credential_hash().clone(),
            avatar_ref: user.avatar_ref().cloned(),
            points: balance,
            created_at: user.created_at(),
            updated_at: user.updated_at(),
        });
        state.users.insert(id, updated);
        Ok(balance)
    }
}
