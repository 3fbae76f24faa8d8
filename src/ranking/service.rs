use std::future::Future;
use std::sync::Arc;
use std::time::Duration;

use chrono::{DateTime, Utc};
use log::{debug, info};
use mongodb::bson::oid::ObjectId;

use crate::config::AppConfig;
use crate::post::post_model::NewPost;
use crate::post::post_store::{PostStore, StoreError};
use crate::ranking::candidates::{CandidateBound, bounded_candidates};
use crate::ranking::error::RankingError;
use crate::ranking::random_source::RandomSource;
use crate::ranking::score::engagement_score;
use crate::ranking::top_k::{RankingResult, top_k};

pub const DEFAULT_TOP_K: usize = 10;

/// Outcome of one write: the new post id and the refreshed leaderboard.
#[derive(Debug, Clone, PartialEq)]
pub struct CreateAndRank {
    pub post_id: ObjectId,
    pub top_posts: RankingResult,
}

/// Stateless between calls; all state lives in the store.
pub struct RankingService {
    store: Arc<dyn PostStore>,
    random: Arc<dyn RandomSource>,
    bound: CandidateBound,
    top_k: usize,
    store_timeout: Duration,
}

impl RankingService {
    pub fn new(store: Arc<dyn PostStore>, random: Arc<dyn RandomSource>) -> Self {
        RankingService {
            store,
            random,
            bound: CandidateBound::default(),
            top_k: DEFAULT_TOP_K,
            store_timeout: Duration::from_secs(5),
        }
    }

    pub fn from_config(
        config: &AppConfig,
        store: Arc<dyn PostStore>,
        random: Arc<dyn RandomSource>,
    ) -> Self {
        Self::new(store, random)
            .with_bound(CandidateBound::new(config.candidate_limit))
            .with_top_k(config.top_k)
            .with_store_timeout(config.store_timeout)
    }

    pub fn with_bound(mut self, bound: CandidateBound) -> Self {
        self.bound = bound;
        self
    }

    pub fn with_top_k(mut self, top_k: usize) -> Self {
        self.top_k = top_k;
        self
    }

    pub fn with_store_timeout(mut self, store_timeout: Duration) -> Self {
        self.store_timeout = store_timeout;
        self
    }

    /// Store a new post and rank the bounded candidate set, all against one `now`.
    ///
    /// Blank content is rejected before the store is touched. Any store
    /// failure aborts the operation and is returned unchanged.
    pub async fn create_and_rank(
        &self,
        content: &str,
        now: DateTime<Utc>,
    ) -> Result<CreateAndRank, RankingError> {
        if content.trim().is_empty() {
            return Err(RankingError::InvalidInput(
                "content must not be empty".to_string(),
            ));
        }

        // Placeholder identity: previous author + 1, no uniqueness guarantee.
        let author_id = match self
            .timed("latest author lookup", self.store.latest_author_id())
            .await?
        {
            None => 1,
            Some(last) => last.checked_add(1).ok_or_else(|| {
                StoreError::Malformed(format!("author id overflow after {last}"))
            })?,
        };

        let seed = self.random.seed_engagement(now);
        let post_id = self
            .timed(
                "insert",
                self.store.insert(NewPost {
                    author_id,
                    content: content.to_string(),
                    created_at: seed.created_at,
                    likes: seed.likes,
                    comments: seed.comments,
                    shares: seed.shares,
                }),
            )
            .await?;
        info!("Created post {post_id} for author {author_id}");

        let candidates = self
            .timed(
                "candidate fetch",
                bounded_candidates(self.store.as_ref(), self.bound),
            )
            .await?;
        debug!(
            "Ranking {} candidates (bound {}) for top {}",
            candidates.len(),
            self.bound.limit(),
            self.top_k
        );

        let top_posts = top_k(&candidates, self.top_k, engagement_score, now);

        Ok(CreateAndRank { post_id, top_posts })
    }

    async fn timed<T, F>(&self, step: &str, fut: F) -> Result<T, StoreError>
    where
        F: Future<Output = Result<T, StoreError>>,
    {
        tokio::time::timeout(self.store_timeout, fut)
            .await
            .map_err(|_| {
                StoreError::Unavailable(format!(
                    "{step} timed out after {}ms",
                    self.store_timeout.as_millis()
                ))
            })?
    }
}
