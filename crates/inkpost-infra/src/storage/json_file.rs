//! JSON file post store.

use std::io;
use std::path::{Path, PathBuf};

use async_trait::async_trait;
use tokio::fs;
use tokio::io::AsyncWriteExt;
use tokio::sync::RwLock;
use uuid::Uuid;

use inkpost_core::domain::Post;
use inkpost_core::error::StoreError;
use inkpost_core::ports::PostStore;

/// Post store persisting the whole collection as one JSON array.
///
/// Every mutation reads the full collection, applies the change in memory and
/// writes the full collection back through a temporary file that is renamed
/// over the target. The write half of `lock` is held across that entire
/// cycle; readers take the read half, so they observe either the snapshot
/// before a mutation or the one after it.
pub struct JsonFilePostStore {
    path: PathBuf,
    tmp_path: PathBuf,
    lock: RwLock<()>,
}

impl JsonFilePostStore {
    /// Open the store at `path`, creating the parent directory and an empty
    /// collection file when they do not exist yet.
    pub async fn open(path: impl Into<PathBuf>) -> Result<Self, StoreError> {
        let path = path.into();
        let file_name = path.file_name().ok_or_else(|| {
            StoreError::PersistFailure(format!("{} has no file name", path.display()))
        })?;
        let tmp_path = path.with_file_name(format!("{}.tmp", file_name.to_string_lossy()));

        if let Some(dir) = path.parent().filter(|d| !d.as_os_str().is_empty()) {
            fs::create_dir_all(dir).await.map_err(|e| {
                StoreError::PersistFailure(format!("create {}: {e}", dir.display()))
            })?;
        }

        let exists = fs::try_exists(&path)
            .await
            .map_err(|e| StoreError::PersistFailure(format!("stat {}: {e}", path.display())))?;
        if !exists {
            write_atomic(&tmp_path, &path, b"[]").await.map_err(|e| {
                StoreError::PersistFailure(format!("initialize {}: {e}", path.display()))
            })?;
            tracing::info!(path = %path.display(), "Initialized empty post collection");
        }

        tracing::info!(path = %path.display(), "Post store opened");

        Ok(Self {
            path,
            tmp_path,
            lock: RwLock::new(()),
        })
    }

    /// Location of the collection file.
    pub fn path(&self) -> &Path {
        &self.path
    }

    async fn read_all(&self) -> Result<Vec<Post>, StoreError> {
        let bytes = match fs::read(&self.path).await {
            Ok(bytes) => bytes,
            // Removed behind our back: an absent file is an empty collection.
            Err(e) if e.kind() == io::ErrorKind::NotFound => return Ok(Vec::new()),
            Err(e) => {
                return Err(StoreError::ReadDegraded(format!(
                    "read {}: {e}",
                    self.path.display()
                )));
            }
        };

        serde_json::from_slice(&bytes).map_err(|e| {
            StoreError::ReadDegraded(format!("parse {}: {e}", self.path.display()))
        })
    }

    async fn write_all(&self, posts: &[Post]) -> Result<(), StoreError> {
        let bytes = serde_json::to_vec_pretty(posts)
            .map_err(|e| StoreError::PersistFailure(format!("serialize posts: {e}")))?;

        if let Err(e) = write_atomic(&self.tmp_path, &self.path, &bytes).await {
            let _ = fs::remove_file(&self.tmp_path).await;
            return Err(StoreError::PersistFailure(format!(
                "write {}: {e}",
                self.path.display()
            )));
        }

        Ok(())
    }
}

/// Pick a v4 id that is not already present in `posts`.
fn allocate_id(posts: &[Post]) -> Uuid {
    loop {
        let id = Uuid::new_v4();
        if !posts.iter().any(|p| p.id == id) {
            return id;
        }
    }
}

async fn write_atomic(tmp_path: &Path, path: &Path, bytes: &[u8]) -> io::Result<()> {
    {
        let mut file = fs::File::create(tmp_path).await?;
        file.write_all(bytes).await?;
        file.sync_all().await?;
    }
    fs::rename(tmp_path, path).await
}

#[async_trait]
impl PostStore for JsonFilePostStore {
    async fn list(&self) -> Vec<Post> {
        match self.try_list().await {
            Ok(posts) => posts,
            Err(e) => {
                tracing::error!(error = %e, "Failed to read posts, serving an empty list");
                Vec::new()
            }
        }
    }

    async fn try_list(&self) -> Result<Vec<Post>, StoreError> {
        let _guard = self.lock.read().await;
        let posts = self.read_all().await?;
        tracing::debug!(count = posts.len(), "Listed posts");
        Ok(posts)
    }

    async fn get(&self, id: Uuid) -> Result<Post, StoreError> {
        let _guard = self.lock.read().await;
        tracing::debug!(post_id = %id, "Finding post by id");

        self.read_all()
            .await?
            .into_iter()
            .find(|p| p.id == id)
            .ok_or(StoreError::NotFound(id))
    }

    async fn create(&self, title: String, content: String) -> Result<Post, StoreError> {
        let _guard = self.lock.write().await;

        let mut posts = self.read_all().await?;
        let post = Post::new(allocate_id(&posts), title, content);
        posts.insert(0, post.clone());
        self.write_all(&posts).await?;

        tracing::info!(post_id = %post.id, total = posts.len(), "Post created");
        Ok(post)
    }

    async fn update(&self, id: Uuid, title: String, content: String) -> Result<Post, StoreError> {
        let _guard = self.lock.write().await;

        let mut posts = self.read_all().await?;
        let post = posts
            .iter_mut()
            .find(|p| p.id == id)
            .ok_or(StoreError::NotFound(id))?;
        post.revise(title, content);
        let updated = post.clone();
        self.write_all(&posts).await?;

        tracing::info!(post_id = %id, "Post updated");
        Ok(updated)
    }

    async fn delete(&self, id: Uuid) -> Result<Post, StoreError> {
        let _guard = self.lock.write().await;

        let mut posts = self.read_all().await?;
        let index = posts
            .iter()
            .position(|p| p.id == id)
            .ok_or(StoreError::NotFound(id))?;
        let removed = posts.remove(index);
        self.write_all(&posts).await?;

        tracing::info!(post_id = %id, total = posts.len(), "Post deleted");
        Ok(removed)
    }
}
