//! Candidate retrieval bound.
//!
//! Only the most recent `limit` posts are ever ranked. Top-K is exact within
//! the most recent `limit` items; it is not guaranteed to be the global top-K
//! over all-time history. An older post with a higher score than everything in
//! the window is simply not a candidate.

use crate::post::post_model::Post;
use crate::post::post_store::{PostStore, StoreError};

pub const DEFAULT_CANDIDATE_LIMIT: usize = 25_000;

/// Maximum number of newest posts considered per ranking operation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CandidateBound(usize);

impl CandidateBound {
    pub fn new(limit: usize) -> Self {
        Self(limit)
    }

    pub fn limit(self) -> usize {
        self.0
    }
}

impl Default for CandidateBound {
    fn default() -> Self {
        Self(DEFAULT_CANDIDATE_LIMIT)
    }
}

/// Newest-first posts, never more than `bound` of them.
pub async fn bounded_candidates(
    store: &dyn PostStore,
    bound: CandidateBound,
) -> Result<Vec<Post>, StoreError> {
    let mut posts = store.recent_posts(bound.limit()).await?;
    posts.truncate(bound.limit());
    Ok(posts)
}
