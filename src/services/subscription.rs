use crate::domain::ids::UserId;
use crate::domain::models::ToggleAction;
use crate::error::{ServiceError, ServiceResult};
use crate::repository::SubscriptionStore;
use std::sync::Arc;
use tracing::debug;

/// The single mutating entry point for the subscription graph.
#[derive(Clone)]
pub struct SubscriptionService {
    store: Arc<dyn SubscriptionStore>,
}

impl SubscriptionService {
    pub fn new(store: Arc<dyn SubscriptionStore>) -> Self {
        Self { store }
    }

    /// Flip edge presence for (subscriber, channel).
    ///
    /// The subscriber is the caller's resolved identity; `None` means the
    /// request carried no authenticated user and is rejected. Self
    /// subscription is rejected. The delete leg is atomic on its own; the
    /// create leg relies on the store's pair constraint, and losing that
    /// race to a concurrent subscribe is collapsed into `Subscribed` -- the
    /// edge the caller asked for exists either way, and never twice.
    pub async fn toggle(
        &self,
        subscriber: Option<UserId>,
        channel: UserId,
    ) -> ServiceResult<ToggleAction> {
        let subscriber = subscriber.ok_or(ServiceError::Unauthenticated)?;

        if subscriber == channel {
            return Err(ServiceError::InvalidOperation(
                "cannot subscribe to own channel".to_string(),
            ));
        }

        if self.store.delete_edge(subscriber, channel).await? {
            debug!("Toggle: {} unsubscribed from {}", subscriber, channel);
            return Ok(ToggleAction::Unsubscribed);
        }

        match self.store.create_edge(subscriber, channel).await {
            Ok(_) => {
                debug!("Toggle: {} subscribed to {}", subscriber, channel);
                Ok(ToggleAction::Subscribed)
            }
            Err(ServiceError::DuplicateEdge { .. }) => {
                debug!(
                    "Toggle: {} -> {} raced a concurrent subscribe",
                    subscriber, channel
                );
                Ok(ToggleAction::Subscribed)
            }
            Err(e) => Err(e),
        }
    }

    /// Edge presence for a pair
    pub async fn is_subscribed(&self, subscriber: UserId, channel: UserId) -> ServiceResult<bool> {
        self.store.edge_exists(subscriber, channel).await
    }

    /// Remove every edge touching a user, both as subscriber and as channel.
    /// Called when an account is deleted; returns the number of edges removed.
    pub async fn purge_user(&self, user: UserId) -> ServiceResult<u64> {
        let removed = self.store.delete_edges_for_user(user).await?;
        debug!("Purged {} edges for deleted user {}", removed, user);
        Ok(removed)
    }
}
