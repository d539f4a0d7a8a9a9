use async_trait::async_trait;
use uuid::Uuid;

use crate::domain::Post;
use crate::error::StoreError;

/// Durable, ordered post collection.
///
/// Implementations keep the collection newest-first and must serialize
/// mutations so that no read-modify-write cycle interleaves with another.
#[async_trait]
pub trait PostStore: Send + Sync {
    /// All posts, newest first. A storage read failure is logged and yields
    /// an empty list.
    async fn list(&self) -> Vec<Post>;

    /// Like [`list`](Self::list), but a read failure is returned as
    /// [`StoreError::ReadDegraded`].
    async fn try_list(&self) -> Result<Vec<Post>, StoreError>;

    /// Find a post by its id.
    async fn get(&self, id: Uuid) -> Result<Post, StoreError>;

    /// Create a post with a fresh id and prepend it to the collection.
    async fn create(&self, title: String, content: String) -> Result<Post, StoreError>;

    /// Replace title and content of an existing post in place.
    async fn update(&self, id: Uuid, title: String, content: String) -> Result<Post, StoreError>;

    /// Remove a post, returning it.
    async fn delete(&self, id: Uuid) -> Result<Post, StoreError>;
}
