mod memory;
mod postgres;
mod r#trait;

pub use memory::{InMemoryContentCatalog, InMemorySubscriptionStore, InMemoryUserDirectory};
pub use postgres::{
    ensure_schema, PostgresContentCatalog, PostgresSubscriptionStore, PostgresUserDirectory,
};
pub use r#trait::{ContentCatalog, SubscriptionStore, UserDirectory};
