//! Explicit registry of listener connections keyed by user.

use crate::config::{DEFAULT_NOTIFICATION_BUFFER, TaskmateConfig};
use crate::notification::{
    domain::{ConnectionId, NotificationEvent},
    ports::NotificationPublisher,
};
use crate::user::domain::UserId;
use std::collections::HashMap;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError, Weak};
use tokio::sync::mpsc::{self, error::TrySendError};

type Registry = HashMap<UserId, HashMap<ConnectionId, mpsc::Sender<NotificationEvent>>>;

/// Registry mapping each user to their live listener connections.
///
/// The hub holds only the sending half of each connection. A listener leaves
/// either explicitly through [`Self::disconnect`] or by dropping its
/// [`Subscription`], which removes the connection immediately.
#[derive(Debug, Clone)]
pub struct NotificationHub {
    registry: Arc<Mutex<Registry>>,
    buffer: usize,
}

/// Receiving side of one listener connection.
#[derive(Debug)]
pub struct Subscription {
    user_id: UserId,
    connection_id: ConnectionId,
    receiver: mpsc::Receiver<NotificationEvent>,
    registry: Weak<Mutex<Registry>>,
}

impl Subscription {
    /// Returns the user this connection listens for.
    #[must_use]
    pub const fn user_id(&self) -> UserId {
        self.user_id
    }

    /// Returns the connection identifier used to disconnect.
    #[must_use]
    pub const fn connection_id(&self) -> ConnectionId {
        self.connection_id
    }

    /// Waits for the next event.
    ///
    /// Returns `None` once the hub has dropped this connection.
    pub async fn recv(&mut self) -> Option<NotificationEvent> {
        self.receiver.recv().await
    }

    /// Returns a buffered event without waiting.
    pub fn try_recv(&mut self) -> Option<NotificationEvent> {
        self.receiver.try_recv().ok()
    }
}

impl Drop for Subscription {
    fn drop(&mut self) {
        let Some(registry) = self.registry.upgrade() else {
            return;
        };
        let removed = remove_connection(
            &mut registry.lock().unwrap_or_else(PoisonError::into_inner),
            self.user_id,
            self.connection_id,
        );
        if removed {
            tracing::debug!(
                user_id = %self.user_id,
                connection_id = %self.connection_id,
                "notification listener dropped"
            );
        }
    }
}

fn remove_connection(
    registry: &mut Registry,
    user_id: UserId,
    connection_id: ConnectionId,
) -> bool {
    let Some(connections) = registry.get_mut(&user_id) else {
        return false;
    };
    let removed = connections.remove(&connection_id).is_some();
    if connections.is_empty() {
        registry.remove(&user_id);
    }
    removed
}

impl NotificationHub {
    /// Creates an empty hub with the given per-connection buffer.
    ///
    /// A buffer of zero is raised to one.
    #[must_use]
    pub fn new(buffer: usize) -> Self {
        Self {
            registry: Arc::new(Mutex::new(HashMap::new())),
            buffer: buffer.max(1),
        }
    }

    /// Creates an empty hub sized by `notification_buffer`.
    #[must_use]
    pub fn from_config(config: &TaskmateConfig) -> Self {
        Self::new(config.notification_buffer)
    }

    /// Registers a new listener connection for `user_id`.
    #[must_use]
    pub fn connect(&self, user_id: UserId) -> Subscription {
        let (sender, receiver) = mpsc::channel(self.buffer);
        let connection_id = ConnectionId::new();
        self.registry()
            .entry(user_id)
            .or_default()
            .insert(connection_id, sender);
        tracing::debug!(%user_id, %connection_id, "notification listener connected");
        Subscription {
            user_id,
            connection_id,
            receiver,
            registry: Arc::downgrade(&self.registry),
        }
    }

    /// Removes a listener connection.
    ///
    /// Returns `false` when the connection was not registered.
    pub fn disconnect(&self, user_id: UserId, connection_id: ConnectionId) -> bool {
        let removed = remove_connection(&mut self.registry(), user_id, connection_id);
        if removed {
            tracing::debug!(%user_id, %connection_id, "notification listener disconnected");
        }
        removed
    }

    /// Returns the number of registered connections for `user_id`.
    #[must_use]
    pub fn connection_count(&self, user_id: UserId) -> usize {
        self.registry().get(&user_id).map_or(0, HashMap::len)
    }

    /// Returns the number of users with at least one connection.
    #[must_use]
    pub fn connected_users(&self) -> usize {
        self.registry().len()
    }

    fn registry(&self) -> MutexGuard<'_, Registry> {
        // A panic while holding the lock cannot leave the map half-updated.
        self.registry.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

impl Default for NotificationHub {
    fn default() -> Self {
        Self::new(DEFAULT_NOTIFICATION_BUFFER)
    }
}

impl NotificationPublisher for NotificationHub {
    fn publish(&self, user_id: UserId, event: NotificationEvent) -> usize {
        let mut registry = self.registry();
        let Some(connections) = registry.get_mut(&user_id) else {
            tracing::debug!(%user_id, event = event.name(), "no listeners; event dropped");
            return 0;
        };

        let mut delivered = 0;
        connections.retain(|connection_id, sender| match sender.try_send(event) {
            Ok(()) => {
                delivered += 1;
                true
            }
            Err(TrySendError::Full(_)) => {
                tracing::debug!(%user_id, %connection_id, "listener buffer full; event dropped");
                true
            }
            Err(TrySendError::Closed(_)) => false,
        });
        if connections.is_empty() {
            registry.remove(&user_id);
        }
        delivered
    }
}
