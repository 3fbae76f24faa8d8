//! Ranking pipeline: score, bound, select.
//!
//! - [`score`]: engagement score of one post at a fixed `now`
//! - [`candidates`]: newest-first retrieval capped by [`candidates::CandidateBound`]
//! - [`top_k`]: heap-based, tie-stable top-K selection
//! - [`random_source`]: injected demo engagement for new posts
//! - [`service`]: write-then-rank orchestration

pub mod candidates;
pub mod error;
pub mod random_source;
pub mod score;
pub mod service;
pub mod top_k;

pub use self::candidates::{CandidateBound, DEFAULT_CANDIDATE_LIMIT, bounded_candidates};
pub use self::error::RankingError;
pub use self::random_source::{EngagementSeed, FixedRandomSource, RandomSource, ThreadRandomSource};
pub use self::score::engagement_score;
pub use self::service::{CreateAndRank, RankingService};
pub use self::top_k::{RankedPost, RankingResult, top_k};
