use crate::domain::ids::{ContentId, UserId};
use crate::domain::models::{ContentRecord, Subscription, UserRecord};
use crate::error::ServiceResult;

/// Interface for the subscription edge store.
/// Both the PostgreSQL and the in-memory implementations provide the same
/// per-pair atomicity: `create_edge` either inserts the one edge for the
/// pair or fails with `DuplicateEdge`, never a second row.
#[async_trait::async_trait]
pub trait SubscriptionStore: Send + Sync {
    /// Check edge presence for an ordered pair
    async fn edge_exists(&self, subscriber: UserId, channel: UserId) -> ServiceResult<bool>;

    /// Create the edge for a pair; `DuplicateEdge` when it already exists
    async fn create_edge(&self, subscriber: UserId, channel: UserId)
        -> ServiceResult<Subscription>;

    /// Delete the edge for a pair; true iff an edge was removed
    async fn delete_edge(&self, subscriber: UserId, channel: UserId) -> ServiceResult<bool>;

    /// All edges pointing at a channel (its subscriber list), newest first
    async fn edges_by_channel(&self, channel: UserId) -> ServiceResult<Vec<Subscription>>;

    /// All edges originating from a subscriber (channels they follow), newest first
    async fn edges_by_subscriber(&self, subscriber: UserId) -> ServiceResult<Vec<Subscription>>;

    /// Cardinality of `edges_by_channel`, consistent with create/delete
    async fn count_by_channel(&self, channel: UserId) -> ServiceResult<i64>;

    /// Cardinality of `edges_by_subscriber`, consistent with create/delete
    async fn count_by_subscriber(&self, subscriber: UserId) -> ServiceResult<i64>;

    /// Remove every edge where the user is either endpoint.
    /// Cascade hook for account deletion; returns the number of edges removed.
    async fn delete_edges_for_user(&self, user: UserId) -> ServiceResult<u64>;
}

/// Read access to user records, owned by the identity/user collaborator.
#[async_trait::async_trait]
pub trait UserDirectory: Send + Sync {
    async fn find_user(&self, id: UserId) -> ServiceResult<Option<UserRecord>>;

    /// Batch lookup for joins; result order is unspecified
    async fn find_users(&self, ids: &[UserId]) -> ServiceResult<Vec<UserRecord>>;
}

/// Read access to content records and per-user watch history, owned by the
/// content collaborator. History order is the stored order; this layer never
/// re-sorts it.
#[async_trait::async_trait]
pub trait ContentCatalog: Send + Sync {
    async fn watch_history(&self, user: UserId) -> ServiceResult<Vec<ContentId>>;

    /// Batch lookup for joins; result order is unspecified
    async fn find_contents(&self, ids: &[ContentId]) -> ServiceResult<Vec<ContentRecord>>;
}
