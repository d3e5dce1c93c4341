use crate::domain::ids::{ContentId, UserId};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Outcome of a subscription toggle
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ToggleAction {
    Subscribed,
    Unsubscribed,
}

/// Subscription edge (directed: subscriber -> channel)
///
/// The ordered pair is the natural key; at most one edge exists per pair.
/// Edges are immutable once created and only the toggle path mutates them.
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct Subscription {
    pub subscriber: UserId,
    pub channel: UserId,
    pub created_at: DateTime<Utc>,
}

impl Subscription {
    pub fn new(subscriber: UserId, channel: UserId) -> Self {
        Self {
            subscriber,
            channel,
            created_at: Utc::now(),
        }
    }
}

/// User row as owned by the user directory; read-only here
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct UserRecord {
    pub id: UserId,
    pub username: String,
    pub email: String,
    pub full_name: String,
    pub avatar: Option<String>,
    pub cover_image: Option<String>,
    pub created_at: DateTime<Utc>,
}

/// Flattened per-query projection of a user; never persisted
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserSummary {
    pub username: String,
    pub email: String,
    pub full_name: String,
    pub avatar: Option<String>,
    pub cover_image: Option<String>,
}

impl From<&UserRecord> for UserSummary {
    fn from(user: &UserRecord) -> Self {
        Self {
            username: user.username.clone(),
            email: user.email.clone(),
            full_name: user.full_name.clone(),
            avatar: user.avatar.clone(),
            cover_image: user.cover_image.clone(),
        }
    }
}

/// Minimal owner projection embedded in watch-history entries
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OwnerSummary {
    pub full_name: String,
    pub username: String,
    pub avatar: Option<String>,
}

impl From<&UserRecord> for OwnerSummary {
    fn from(user: &UserRecord) -> Self {
        Self {
            full_name: user.full_name.clone(),
            username: user.username.clone(),
            avatar: user.avatar.clone(),
        }
    }
}

/// Channel profile view, derived from the edge set at query time
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChannelProfile {
    pub username: String,
    pub email: String,
    pub full_name: String,
    pub avatar: Option<String>,
    pub cover_image: Option<String>,
    pub created_at: DateTime<Utc>,
    pub subscribers_count: i64,
    pub subscribed_to_count: i64,
    pub is_subscribed: bool,
}

/// Content row (tweet or video) as owned by the content catalog; read-only here
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct ContentRecord {
    pub id: ContentId,
    pub owner: UserId,
    pub title: String,
    pub media_url: Option<String>,
    pub created_at: DateTime<Utc>,
}

/// Watch-history entry: a content record with its owner flattened in.
/// The join is one-to-one; each content item has exactly one owner.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ContentWithOwner {
    pub id: ContentId,
    pub title: String,
    pub media_url: Option<String>,
    pub created_at: DateTime<Utc>,
    pub owner: OwnerSummary,
}
