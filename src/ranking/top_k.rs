//! Top-K selection over a bounded candidate set.
//!
//! A min-heap holds the best `k` candidates seen so far, so selection costs
//! `O(n log k)` instead of sorting every candidate. Output is descending by
//! score, and equal scores keep their input order.

use std::cmp::{Ordering, Reverse};
use std::collections::BinaryHeap;

use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::post::post_model::Post;

#[derive(Debug, Serialize, Clone, PartialEq)]
pub struct RankedPost {
    #[serde(flatten)]
    pub post: Post,
    pub engagement_score: f64,
}

/// Ranked posts, best first.
#[derive(Debug, Serialize, Clone, PartialEq, Default)]
#[serde(transparent)]
pub struct RankingResult(Vec<RankedPost>);

impl RankingResult {
    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, RankedPost> {
        self.0.iter()
    }

    pub fn scores(&self) -> Vec<f64> {
        self.0.iter().map(|r| r.engagement_score).collect()
    }

    pub fn into_inner(self) -> Vec<RankedPost> {
        self.0
    }
}

impl<'a> IntoIterator for &'a RankingResult {
    type Item = &'a RankedPost;
    type IntoIter = std::slice::Iter<'a, RankedPost>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}

/// Greater means "ranks higher": bigger score, then earlier input position.
#[derive(Debug, Clone, Copy)]
struct Slot {
    score: f64,
    index: usize,
}

impl Ord for Slot {
    fn cmp(&self, other: &Self) -> Ordering {
        self.score
            .total_cmp(&other.score)
            .then_with(|| other.index.cmp(&self.index))
    }
}

impl PartialOrd for Slot {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl PartialEq for Slot {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for Slot {}

/// The `k` highest-scoring candidates, descending, ties in input order.
///
/// Every candidate is scored exactly once against the same `now`.
pub fn top_k<F>(candidates: &[Post], k: usize, score_fn: F, now: DateTime<Utc>) -> RankingResult
where
    F: Fn(&Post, DateTime<Utc>) -> f64,
{
    if k == 0 || candidates.is_empty() {
        return RankingResult::default();
    }

    let mut heap: BinaryHeap<Reverse<Slot>> = BinaryHeap::with_capacity(k.min(candidates.len()));

    for (index, candidate) in candidates.iter().enumerate() {
        let slot = Slot {
            score: score_fn(candidate, now),
            index,
        };

        if heap.len() < k {
            heap.push(Reverse(slot));
        } else if let Some(mut worst) = heap.peek_mut() {
            if slot > worst.0 {
                *worst = Reverse(slot);
            }
        }
    }

    // ascending Reverse<Slot> == best first
    let ranked = heap
        .into_sorted_vec()
        .into_iter()
        .map(|Reverse(slot)| RankedPost {
            post: candidates[slot.index].clone(),
            engagement_score: slot.score,
        })
        .collect();

    RankingResult(ranked)
}
