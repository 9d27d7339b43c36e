//! Service Layer Error Types
//!
//! "No matching row" is not an error for the resolvers; they return
//! `Ok(None)`. The variants here cover broken preconditions, explicit id
//! lookups and store failures, which are passed through unchanged.

use crate::db::DatabaseError;
use crate::models::ValidationError;
use thiserror::Error;

/// Service operation errors
#[derive(Error, Debug)]
pub enum NodeTreeError {
    /// Content was attached before it had a persisted identity. Not
    /// retryable: persist the content first.
    #[error("The entity of type {type_name} has no id, it must be persisted first")]
    InvalidState { type_name: String },

    /// Node requested by id does not exist or is tombstoned
    #[error("Node not found: {id}")]
    NodeNotFound { id: String },

    /// Validation failed for a model value
    #[error("Validation failed: {0}")]
    ValidationFailed(#[from] ValidationError),

    /// Configuration rejected by `NodeTreeConfig::validate`
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    /// Database setup failed
    #[error("Database operation failed: {0}")]
    DatabaseError(#[from] DatabaseError),

    /// Store operation failed; the original error is kept as the source
    #[error("Store operation failed: {0:#}")]
    Store(#[from] anyhow::Error),
}

impl NodeTreeError {
    pub fn invalid_state(type_name: impl Into<String>) -> Self {
        Self::InvalidState {
            type_name: type_name.into(),
        }
    }

    pub fn node_not_found(id: impl Into<String>) -> Self {
        Self::NodeNotFound { id: id.into() }
    }

    pub fn invalid_config(msg: impl Into<String>) -> Self {
        Self::InvalidConfig(msg.into())
    }

    /// Whether the caller must change something before trying again
    pub fn is_caller_error(&self) -> bool {
        matches!(
            self,
            Self::InvalidState { .. }
                | Self::NodeNotFound { .. }
                | Self::ValidationFailed(_)
                | Self::InvalidConfig(_)
        )
    }
}
