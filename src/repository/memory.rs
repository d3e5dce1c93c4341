//! In-process repository implementations.
//!
//! Observable semantics match the PostgreSQL implementations, including
//! newest-first edge listings and `DuplicateEdge` on a repeated pair. The
//! edge store serializes check-then-act under one async mutex, which is the
//! in-memory equivalent of the composite-key constraint. Used by unit and
//! integration tests and by local tooling that runs without a database.

use crate::domain::ids::{ContentId, UserId};
use crate::domain::models::{ContentRecord, Subscription, UserRecord};
use crate::error::{ServiceError, ServiceResult};
use crate::repository::r#trait::{ContentCatalog, SubscriptionStore, UserDirectory};
use std::collections::HashMap;
use tokio::sync::Mutex;

/// In-memory subscription edge store
#[derive(Default)]
pub struct InMemorySubscriptionStore {
    edges: Mutex<Vec<Subscription>>,
}

impl InMemorySubscriptionStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait::async_trait]
impl SubscriptionStore for InMemorySubscriptionStore {
    async fn edge_exists(&self, subscriber: UserId, channel: UserId) -> ServiceResult<bool> {
        let edges = self.edges.lock().await;
        Ok(edges
            .iter()
            .any(|e| e.subscriber == subscriber && e.channel == channel))
    }

    async fn create_edge(
        &self,
        subscriber: UserId,
        channel: UserId,
    ) -> ServiceResult<Subscription> {
        let mut edges = self.edges.lock().await;
        if edges
            .iter()
            .any(|e| e.subscriber == subscriber && e.channel == channel)
        {
            return Err(ServiceError::DuplicateEdge {
                subscriber,
                channel,
            });
        }

        let edge = Subscription::new(subscriber, channel);
        edges.push(edge.clone());
        Ok(edge)
    }

    async fn delete_edge(&self, subscriber: UserId, channel: UserId) -> ServiceResult<bool> {
        let mut edges = self.edges.lock().await;
        let before = edges.len();
        edges.retain(|e| !(e.subscriber == subscriber && e.channel == channel));
        Ok(edges.len() < before)
    }

    async fn edges_by_channel(&self, channel: UserId) -> ServiceResult<Vec<Subscription>> {
        let edges = self.edges.lock().await;
        // insertion order stands in for created_at; newest first
        Ok(edges
            .iter()
            .rev()
            .filter(|e| e.channel == channel)
            .cloned()
            .collect())
    }

    async fn edges_by_subscriber(&self, subscriber: UserId) -> ServiceResult<Vec<Subscription>> {
        let edges = self.edges.lock().await;
        Ok(edges
            .iter()
            .rev()
            .filter(|e| e.subscriber == subscriber)
            .cloned()
            .collect())
    }

    async fn count_by_channel(&self, channel: UserId) -> ServiceResult<i64> {
        let edges = self.edges.lock().await;
        Ok(edges.iter().filter(|e| e.channel == channel).count() as i64)
    }

    async fn count_by_subscriber(&self, subscriber: UserId) -> ServiceResult<i64> {
        let edges = self.edges.lock().await;
        Ok(edges.iter().filter(|e| e.subscriber == subscriber).count() as i64)
    }

    async fn delete_edges_for_user(&self, user: UserId) -> ServiceResult<u64> {
        let mut edges = self.edges.lock().await;
        let before = edges.len();
        edges.retain(|e| e.subscriber != user && e.channel != user);
        Ok((before - edges.len()) as u64)
    }
}

/// In-memory user directory
#[derive(Default)]
pub struct InMemoryUserDirectory {
    users: Mutex<HashMap<UserId, UserRecord>>,
}

impl InMemoryUserDirectory {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn insert(&self, user: UserRecord) {
        self.users.lock().await.insert(user.id, user);
    }
}

#[async_trait::async_trait]
impl UserDirectory for InMemoryUserDirectory {
    async fn find_user(&self, id: UserId) -> ServiceResult<Option<UserRecord>> {
        Ok(self.users.lock().await.get(&id).cloned())
    }

    async fn find_users(&self, ids: &[UserId]) -> ServiceResult<Vec<UserRecord>> {
        let users = self.users.lock().await;
        Ok(ids.iter().filter_map(|id| users.get(id).cloned()).collect())
    }
}

/// In-memory content catalog with per-user watch history
#[derive(Default)]
pub struct InMemoryContentCatalog {
    contents: Mutex<HashMap<ContentId, ContentRecord>>,
    histories: Mutex<HashMap<UserId, Vec<ContentId>>>,
}

impl InMemoryContentCatalog {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn insert_content(&self, content: ContentRecord) {
        self.contents.lock().await.insert(content.id, content);
    }

    /// Append a content id to a user's watch history, preserving view order
    pub async fn record_view(&self, user: UserId, content: ContentId) {
        self.histories
            .lock()
            .await
            .entry(user)
            .or_default()
            .push(content);
    }
}

#[async_trait::async_trait]
impl ContentCatalog for InMemoryContentCatalog {
    async fn watch_history(&self, user: UserId) -> ServiceResult<Vec<ContentId>> {
        Ok(self
            .histories
            .lock()
            .await
            .get(&user)
            .cloned()
            .unwrap_or_default())
    }

    async fn find_contents(&self, ids: &[ContentId]) -> ServiceResult<Vec<ContentRecord>> {
        let contents = self.contents.lock().await;
        Ok(ids
            .iter()
            .filter_map(|id| contents.get(id).cloned())
            .collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_create_then_duplicate() {
        let store = InMemorySubscriptionStore::new();
        let s = UserId::random();
        let c = UserId::random();

        store.create_edge(s, c).await.unwrap();
        let err = store.create_edge(s, c).await.unwrap_err();
        assert!(matches!(err, ServiceError::DuplicateEdge { .. }));

        assert!(store.edge_exists(s, c).await.unwrap());
        assert_eq!(store.count_by_channel(c).await.unwrap(), 1);
    }

    #[tokio::test]
    async fn test_delete_is_idempotent() {
        let store = InMemorySubscriptionStore::new();
        let s = UserId::random();
        let c = UserId::random();

        store.create_edge(s, c).await.unwrap();
        assert!(store.delete_edge(s, c).await.unwrap());
        assert!(!store.delete_edge(s, c).await.unwrap());
        assert!(!store.edge_exists(s, c).await.unwrap());
    }

    #[tokio::test]
    async fn test_edge_listings_are_newest_first() {
        let store = InMemorySubscriptionStore::new();
        let c = UserId::random();
        let first = UserId::random();
        let second = UserId::random();

        store.create_edge(first, c).await.unwrap();
        store.create_edge(second, c).await.unwrap();

        let edges = store.edges_by_channel(c).await.unwrap();
        assert_eq!(edges.len(), 2);
        assert_eq!(edges[0].subscriber, second);
        assert_eq!(edges[1].subscriber, first);
    }

    #[tokio::test]
    async fn test_reverse_edge_is_distinct() {
        let store = InMemorySubscriptionStore::new();
        let a = UserId::random();
        let b = UserId::random();

        store.create_edge(a, b).await.unwrap();
        assert!(!store.edge_exists(b, a).await.unwrap());
        store.create_edge(b, a).await.unwrap();

        assert_eq!(store.count_by_channel(a).await.unwrap(), 1);
        assert_eq!(store.count_by_subscriber(a).await.unwrap(), 1);
    }
}
