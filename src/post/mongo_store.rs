use async_trait::async_trait;
use chrono::{DateTime, Utc};
use futures_util::TryStreamExt;
use log::{error, warn};
use mongodb::bson::{self, doc, oid::ObjectId};
use mongodb::error::{ErrorKind, WriteFailure};
use mongodb::{Collection, IndexModel};
use serde::{Deserialize, Serialize};

use crate::database::Database;
use crate::post::post_model::{NewPost, Post};
use crate::post::post_store::{PostStore, StoreError};

const COLLECTION: &str = "posts";
const DUPLICATE_KEY: i32 = 11000;

#[derive(Debug, Serialize, Deserialize)]
struct PostDocument {
    #[serde(rename = "_id", skip_serializing_if = "Option::is_none")]
    id: Option<ObjectId>,
    user_id: i64,
    content: String,
    created_at: bson::DateTime,
    likes: i64,
    comments: i64,
    shares: i64,
}

impl From<NewPost> for PostDocument {
    fn from(post: NewPost) -> Self {
        Self {
            id: None,
            user_id: post.author_id,
            content: post.content,
            created_at: bson::DateTime::from_millis(post.created_at.timestamp_millis()),
            likes: post.likes,
            comments: post.comments,
            shares: post.shares,
        }
    }
}

impl PostDocument {
    fn into_post(self) -> Result<Post, StoreError> {
        let id = self
            .id
            .ok_or_else(|| StoreError::Malformed("post document without _id".into()))?;
        let millis = self.created_at.timestamp_millis();
        let created_at = DateTime::<Utc>::from_timestamp_millis(millis).ok_or_else(|| {
            StoreError::Malformed(format!("post {id} has out-of-range created_at ({millis} ms)"))
        })?;

        Ok(Post {
            id,
            author_id: self.user_id,
            content: self.content,
            created_at,
            likes: self.likes,
            comments: self.comments,
            shares: self.shares,
        })
    }
}

fn is_duplicate_key(code: i32) -> bool {
    code == DUPLICATE_KEY
}

fn store_error(context: &str, err: mongodb::error::Error) -> StoreError {
    if let ErrorKind::Write(WriteFailure::WriteError(write_error)) = &*err.kind {
        if is_duplicate_key(write_error.code) {
            warn!("{context}: {}", write_error.message);
            return StoreError::ConstraintViolation(format!("{context}: {}", write_error.message));
        }
    }
    error!("{context}: {err}");
    StoreError::Unavailable(format!("{context}: {err}"))
}

pub struct MongoPostStore {
    collection: Collection<PostDocument>,
}

impl MongoPostStore {
    pub fn new(database: &Database) -> Self {
        let collection = database.database().collection::<PostDocument>(COLLECTION);
        MongoPostStore { collection }
    }

    /// Index backing the newest-first candidate scan.
    pub async fn ensure_indexes(&self) -> Result<(), StoreError> {
        let index = IndexModel::builder()
            .keys(doc! { "created_at": -1 })
            .build();

        self.collection
            .create_index(index)
            .await
            .map_err(|e| store_error("Failed to create created_at index", e))?;

        Ok(())
    }
}

#[async_trait]
impl PostStore for MongoPostStore {
    async fn latest_author_id(&self) -> Result<Option<i64>, StoreError> {
        let latest = self
            .collection
            .find_one(doc! {})
            .sort(doc! { "_id": -1 })
            .await
            .map_err(|e| store_error("Failed to fetch latest post", e))?;

        Ok(latest.map(|document| document.user_id))
    }

    async fn insert(&self, post: NewPost) -> Result<ObjectId, StoreError> {
        let result = self
            .collection
            .insert_one(PostDocument::from(post))
            .await
            .map_err(|e| store_error("Failed to create post", e))?;

        result
            .inserted_id
            .as_object_id()
            .ok_or_else(|| StoreError::Malformed("Failed to get inserted post ID".into()))
    }

    async fn recent_posts(&self, limit: usize) -> Result<Vec<Post>, StoreError> {
        let limit = i64::try_from(limit).unwrap_or(i64::MAX);

        let cursor = self
            .collection
            .find(doc! {})
            .sort(doc! { "created_at": -1 })
            .limit(limit)
            .await
            .map_err(|e| store_error("Failed to fetch recent posts", e))?;

        let documents: Vec<PostDocument> = cursor
            .try_collect()
            .await
            .map_err(|e| store_error("Failed to collect recent posts", e))?;

        documents.into_iter().map(PostDocument::into_post).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn new_post_maps_to_document_fields() {
        let created_at = Utc.with_ymd_and_hms(2024, 3, 1, 8, 30, 0).unwrap();
        let document = PostDocument::from(NewPost {
            author_id: 3,
            content: "hello".into(),
            created_at,
            likes: 10,
            comments: 5,
            shares: 2,
        });

        let raw = bson::to_document(&document).unwrap();
        assert!(!raw.contains_key("_id"));
        assert_eq!(raw.get_i64("user_id").unwrap(), 3);
        assert_eq!(
            raw.get_datetime("created_at").unwrap().timestamp_millis(),
            created_at.timestamp_millis()
        );
    }

    #[test]
    fn only_duplicate_key_code_is_a_constraint_violation() {
        assert!(is_duplicate_key(11000));
        assert!(!is_duplicate_key(11001));
        assert!(!is_duplicate_key(121));
    }

    #[test]
    fn document_without_id_is_malformed() {
        let document = PostDocument {
            id: None,
            user_id: 1,
            content: String::new(),
            created_at: bson::DateTime::from_millis(0),
            likes: 0,
            comments: 0,
            shares: 0,
        };

        assert!(matches!(document.into_post(), Err(StoreError::Malformed(_))));
    }

    #[test]
    fn document_round_trips_to_post() {
        let id = ObjectId::new();
        let document = PostDocument {
            id: Some(id),
            user_id: 2,
            content: "c".into(),
            created_at: bson::DateTime::from_millis(1_700_000_000_123),
            likes: 4,
            comments: 5,
            shares: 6,
        };

        let post = document.into_post().unwrap();
        assert_eq!(post.id, id);
        assert_eq!(post.author_id, 2);
        assert_eq!(post.created_at.timestamp_millis(), 1_700_000_000_123);
        assert_eq!((post.likes, post.comments, post.shares), (4, 5, 6));
    }
}
