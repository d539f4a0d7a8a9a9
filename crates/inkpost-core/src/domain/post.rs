use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Post entity - a short titled text record.
///
/// Serialized with camelCase keys; this is also the on-disk record shape.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Post {
    pub id: Uuid,
    pub title: String,
    pub content: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Post {
    /// Create a new post with the given identity. Both timestamps share one instant.
    pub fn new(id: Uuid, title: String, content: String) -> Self {
        let now = Utc::now();
        Self {
            id,
            title,
            content,
            created_at: now,
            updated_at: now,
        }
    }

    /// Replace title and content, refreshing `updated_at`.
    ///
    /// `updated_at` never moves backwards, even if the wall clock does.
    pub fn revise(&mut self, title: String, content: String) {
        self.title = title;
        self.content = content;
        self.updated_at = Utc::now().max(self.updated_at);
    }

    pub fn is_edited(&self) -> bool {
        self.updated_at > self.created_at
    }
}
