use async_trait::async_trait;
use mongodb::bson::oid::ObjectId;
use tokio::sync::RwLock;

use crate::post::post_model::{NewPost, Post};
use crate::post::post_store::{PostStore, StoreError};

/// Process-local store, kept in insertion order.
#[derive(Default)]
pub struct InMemoryPostStore {
    posts: RwLock<Vec<Post>>,
}

impl InMemoryPostStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Start from existing posts; the last element counts as the latest insert.
    pub fn with_posts(posts: Vec<Post>) -> Self {
        Self {
            posts: RwLock::new(posts),
        }
    }

    pub async fn len(&self) -> usize {
        self.posts.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.posts.read().await.is_empty()
    }
}

#[async_trait]
impl PostStore for InMemoryPostStore {
    async fn latest_author_id(&self) -> Result<Option<i64>, StoreError> {
        Ok(self.posts.read().await.last().map(|p| p.author_id))
    }

    async fn insert(&self, post: NewPost) -> Result<ObjectId, StoreError> {
        let id = ObjectId::new();
        self.posts.write().await.push(Post {
            id,
            author_id: post.author_id,
            content: post.content,
            created_at: post.created_at,
            likes: post.likes,
            comments: post.comments,
            shares: post.shares,
        });
        Ok(id)
    }

    async fn recent_posts(&self, limit: usize) -> Result<Vec<Post>, StoreError> {
        let mut posts = self.posts.read().await.clone();
        // stable: equal timestamps keep insertion order
        posts.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        posts.truncate(limit);
        Ok(posts)
    }
}
