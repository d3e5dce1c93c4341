pub mod ids;
pub mod models;

pub use ids::{ContentId, UserId};
pub use models::{
    ChannelProfile, ContentRecord, ContentWithOwner, OwnerSummary, Subscription, ToggleAction,
    UserRecord, UserSummary,
};
