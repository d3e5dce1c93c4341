//! Typed identifiers for users and content items.
//!
//! Raw identifiers arriving from the request layer are validated exactly
//! once, through `parse`, before they can reach a repository. A malformed
//! identifier fails closed with `ServiceError::InvalidReference`; past that
//! point an id is opaque and only compared for equality.

use crate::error::{ServiceError, ServiceResult};
use serde::{Deserialize, Serialize};
use std::fmt;
use uuid::Uuid;

/// Identifier of a user (a channel is a user on the receiving end of edges).
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, sqlx::Type,
)]
#[serde(transparent)]
#[sqlx(transparent)]
pub struct UserId(Uuid);

impl UserId {
    /// Validate a raw identifier; the only way external input becomes a `UserId`.
    pub fn parse(input: &str) -> ServiceResult<Self> {
        Uuid::parse_str(input)
            .map(Self)
            .map_err(|e| ServiceError::InvalidReference(format!("user id '{}': {}", input, e)))
    }

    /// Fresh random id, for new records and tests.
    pub fn random() -> Self {
        Self(Uuid::new_v4())
    }

    pub fn as_uuid(&self) -> Uuid {
        self.0
    }
}

impl fmt::Display for UserId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

/// Identifier of a content item (tweet or video).
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, sqlx::Type,
)]
#[serde(transparent)]
#[sqlx(transparent)]
pub struct ContentId(Uuid);

impl ContentId {
    pub fn parse(input: &str) -> ServiceResult<Self> {
        Uuid::parse_str(input)
            .map(Self)
            .map_err(|e| ServiceError::InvalidReference(format!("content id '{}': {}", input, e)))
    }

    pub fn random() -> Self {
        Self(Uuid::new_v4())
    }

    pub fn as_uuid(&self) -> Uuid {
        self.0
    }
}

impl fmt::Display for ContentId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}
