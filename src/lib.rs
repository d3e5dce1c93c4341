pub mod config;
pub mod db;
pub mod domain;
pub mod error;
pub mod repository;
pub mod services;

pub use domain::{ContentId, Subscription, ToggleAction, UserId};
pub use error::{ServiceError, ServiceResult};
pub use services::{SubscriptionService, ViewService};

use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

/// Initialize the tracing subscriber for the embedding binary.
/// Safe to call more than once; later calls are no-ops.
pub fn init_tracing() {
    let _ = tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "subscription_service=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .try_init();
}
