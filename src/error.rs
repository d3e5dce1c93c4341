/// Error types for subscription-service
use crate::domain::ids::UserId;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ServiceError {
    #[error("Invalid reference: {0}")]
    InvalidReference(String),

    #[error("Unauthenticated: no resolved subscriber identity")]
    Unauthenticated,

    #[error("Invalid operation: {0}")]
    InvalidOperation(String),

    #[error("Duplicate edge: {subscriber} -> {channel}")]
    DuplicateEdge { subscriber: UserId, channel: UserId },

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),
}

impl ServiceError {
    /// Transient store faults the caller may retry; the service never
    /// retries internally.
    pub fn is_transient(&self) -> bool {
        matches!(self, ServiceError::Database(_))
    }
}

/// Result type alias for service operations
pub type ServiceResult<T> = Result<T, ServiceError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_only_store_faults_are_transient() {
        // callers key their retry policy off this; client-input faults and
        // lookup misses must never be retried
        assert!(ServiceError::Database(sqlx::Error::PoolTimedOut).is_transient());

        assert!(!ServiceError::InvalidReference("bad id".to_string()).is_transient());
        assert!(!ServiceError::Unauthenticated.is_transient());
        assert!(!ServiceError::NotFound("channel".to_string()).is_transient());
        assert!(!ServiceError::DuplicateEdge {
            subscriber: UserId::random(),
            channel: UserId::random(),
        }
        .is_transient());
    }
}
