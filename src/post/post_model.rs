use chrono::{DateTime, Utc};
use mongodb::bson::oid::ObjectId;
use serde::{Deserialize, Serialize, Serializer};

/// A stored post as the ranking pipeline sees it.
///
/// The engagement score is not part of the post; it is computed per request
/// and attached by [`RankedPost`](crate::ranking::top_k::RankedPost).
#[derive(Debug, Serialize, Clone, PartialEq)]
pub struct Post {
    #[serde(serialize_with = "object_id_as_hex")]
    pub id: ObjectId,
    #[serde(rename = "user_id")]
    pub author_id: i64,
    pub content: String,
    pub created_at: DateTime<Utc>,
    pub likes: i64,
    pub comments: i64,
    pub shares: i64,
}

/// Everything the store needs to persist a post; the id is assigned on insert.
#[derive(Debug, Clone, PartialEq)]
pub struct NewPost {
    pub author_id: i64,
    pub content: String,
    pub created_at: DateTime<Utc>,
    pub likes: i64,
    pub comments: i64,
    pub shares: i64,
}

#[derive(Deserialize)]
pub struct CreatePostRequest {
    pub content: String,
}

pub fn object_id_as_hex<S: Serializer>(id: &ObjectId, serializer: S) -> Result<S::Ok, S::Error> {
    serializer.serialize_str(&id.to_hex())
}
