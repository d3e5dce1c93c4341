//! Read-only composition of edges with user and content data.
//!
//! Each view is an explicit join: fetch edges, batch-fetch the referenced
//! records, project. Views take no locks and run fully concurrently with
//! each other and with toggles. An empty result is a success, never an
//! error; typed errors are reserved for missing profile records and store
//! faults.

use crate::domain::ids::UserId;
use crate::domain::models::{
    ChannelProfile, ContentWithOwner, OwnerSummary, Subscription, UserSummary,
};
use crate::error::{ServiceError, ServiceResult};
use crate::repository::{ContentCatalog, SubscriptionStore, UserDirectory};
use std::collections::HashMap;
use std::sync::Arc;
use tracing::debug;

#[derive(Clone)]
pub struct ViewService {
    store: Arc<dyn SubscriptionStore>,
    users: Arc<dyn UserDirectory>,
    contents: Arc<dyn ContentCatalog>,
}

impl ViewService {
    pub fn new(
        store: Arc<dyn SubscriptionStore>,
        users: Arc<dyn UserDirectory>,
        contents: Arc<dyn ContentCatalog>,
    ) -> Self {
        Self {
            store,
            users,
            contents,
        }
    }

    /// Users subscribed to a channel, projected to summaries in edge order.
    pub async fn channel_subscribers(&self, channel: UserId) -> ServiceResult<Vec<UserSummary>> {
        let edges = self.store.edges_by_channel(channel).await?;
        let summaries = self
            .join_users(&edges, |edge| edge.subscriber)
            .await?;

        debug!(
            "Channel {} has {} subscribers in view",
            channel,
            summaries.len()
        );
        Ok(summaries)
    }

    /// Channels a user subscribes to, projected to summaries in edge order.
    pub async fn subscribed_channels(&self, subscriber: UserId) -> ServiceResult<Vec<UserSummary>> {
        let edges = self.store.edges_by_subscriber(subscriber).await?;
        let summaries = self.join_users(&edges, |edge| edge.channel).await?;

        debug!(
            "Subscriber {} follows {} channels in view",
            subscriber,
            summaries.len()
        );
        Ok(summaries)
    }

    /// Channel profile: user record plus counts derived from the edge set,
    /// and whether the viewing user is subscribed. `NotFound` when no user
    /// record matches the channel id.
    pub async fn channel_profile(
        &self,
        channel: UserId,
        viewer: Option<UserId>,
    ) -> ServiceResult<ChannelProfile> {
        let user = self
            .users
            .find_user(channel)
            .await?
            .ok_or_else(|| ServiceError::NotFound(format!("channel {}", channel)))?;

        let subscribers_count = self.store.count_by_channel(channel).await?;
        let subscribed_to_count = self.store.count_by_subscriber(channel).await?;

        let is_subscribed = match viewer {
            Some(viewer) => self.store.edge_exists(viewer, channel).await?,
            None => false,
        };

        Ok(ChannelProfile {
            username: user.username,
            email: user.email,
            full_name: user.full_name,
            avatar: user.avatar,
            cover_image: user.cover_image,
            created_at: user.created_at,
            subscribers_count,
            subscribed_to_count,
            is_subscribed,
        })
    }

    /// A user's watch history in stored order, each entry carrying its
    /// owner's summary. Entries whose content or owner record is gone are
    /// dropped rather than surfaced as errors.
    pub async fn watch_history(&self, user: UserId) -> ServiceResult<Vec<ContentWithOwner>> {
        let history = self.contents.watch_history(user).await?;
        if history.is_empty() {
            return Ok(Vec::new());
        }

        let records = self.contents.find_contents(&history).await?;
        let by_id: HashMap<_, _> = records.into_iter().map(|c| (c.id, c)).collect();

        let owner_ids: Vec<UserId> = by_id.values().map(|c| c.owner).collect();
        let owners: HashMap<_, _> = self
            .users
            .find_users(&owner_ids)
            .await?
            .into_iter()
            .map(|u| (u.id, u))
            .collect();

        // walk the stored history so the view order is the stored order
        let entries = history
            .iter()
            .filter_map(|id| {
                let content = by_id.get(id)?;
                let owner = owners.get(&content.owner)?;
                Some(ContentWithOwner {
                    id: content.id,
                    title: content.title.clone(),
                    media_url: content.media_url.clone(),
                    created_at: content.created_at,
                    owner: OwnerSummary::from(owner),
                })
            })
            .collect();

        Ok(entries)
    }

    /// Join one endpoint of each edge to the user directory, preserving
    /// edge order and dropping edges whose user record is missing.
    async fn join_users(
        &self,
        edges: &[Subscription],
        endpoint: impl Fn(&Subscription) -> UserId,
    ) -> ServiceResult<Vec<UserSummary>> {
        if edges.is_empty() {
            return Ok(Vec::new());
        }

        let ids: Vec<UserId> = edges.iter().map(&endpoint).collect();
        let users: HashMap<_, _> = self
            .users
            .find_users(&ids)
            .await?
            .into_iter()
            .map(|u| (u.id, u))
            .collect();

        Ok(edges
            .iter()
            .filter_map(|edge| users.get(&endpoint(edge)).map(UserSummary::from))
            .collect())
    }
}
