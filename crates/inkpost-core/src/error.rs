//! Store-level error types.

use thiserror::Error;
use uuid::Uuid;

/// Failures surfaced by a [`PostStore`](crate::ports::PostStore).
#[derive(Debug, Error)]
pub enum StoreError {
    /// The referenced post is not in the collection.
    #[error("Post not found: {0}")]
    NotFound(Uuid),

    /// The collection could not be written; the mutation was not applied.
    #[error("Failed to persist post collection: {0}")]
    PersistFailure(String),

    /// The collection could not be read back from storage.
    #[error("Failed to read post collection: {0}")]
    ReadDegraded(String),
}

impl StoreError {
    pub fn is_not_found(&self) -> bool {
        matches!(self, StoreError::NotFound(_))
    }
}
