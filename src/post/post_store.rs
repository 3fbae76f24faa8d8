use async_trait::async_trait;
use mongodb::bson::oid::ObjectId;
use thiserror::Error;

use crate::post::post_model::{NewPost, Post};

#[derive(Debug, Error, Clone, PartialEq)]
pub enum StoreError {
    #[error("store unavailable: {0}")]
    Unavailable(String),

    #[error("constraint violation: {0}")]
    ConstraintViolation(String),

    #[error("malformed record: {0}")]
    Malformed(String),
}

/// Persistence the ranking pipeline depends on.
///
/// Implementations own their connection lifecycle; the pipeline only borrows
/// the handle for the duration of one operation.
#[async_trait]
pub trait PostStore: Send + Sync {
    /// Author id of the most recently inserted post, `None` when the store is empty.
    async fn latest_author_id(&self) -> Result<Option<i64>, StoreError>;

    async fn insert(&self, post: NewPost) -> Result<ObjectId, StoreError>;

    /// At most `limit` posts, newest `created_at` first.
    async fn recent_posts(&self, limit: usize) -> Result<Vec<Post>, StoreError>;
}
