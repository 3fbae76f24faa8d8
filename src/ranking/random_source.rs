use chrono::{DateTime, Duration, Utc};
use rand::Rng;

/// Initial counters and creation time for a freshly written post.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct EngagementSeed {
    pub created_at: DateTime<Utc>,
    pub likes: i64,
    pub comments: i64,
    pub shares: i64,
}

/// Supplies demo engagement for new posts.
///
/// Injected into [`RankingService`](crate::ranking::service::RankingService)
/// so that nondeterminism stays outside the ranking pipeline.
pub trait RandomSource: Send + Sync {
    fn seed_engagement(&self, now: DateTime<Utc>) -> EngagementSeed;
}

/// Backdating window: up to 30 days, in whole hours.
pub const MAX_BACKDATE_HOURS: i64 = 720;
pub const MAX_LIKES: i64 = 100;
pub const MAX_COMMENTS: i64 = 50;
pub const MAX_SHARES: i64 = 20;

/// Uniformly random engagement from the thread-local RNG.
#[derive(Debug, Default, Clone, Copy)]
pub struct ThreadRandomSource;

impl RandomSource for ThreadRandomSource {
    fn seed_engagement(&self, now: DateTime<Utc>) -> EngagementSeed {
        let mut rng = rand::rng();
        EngagementSeed {
            created_at: now - Duration::hours(rng.random_range(0..MAX_BACKDATE_HOURS)),
            likes: rng.random_range(0..=MAX_LIKES),
            comments: rng.random_range(0..=MAX_COMMENTS),
            shares: rng.random_range(0..=MAX_SHARES),
        }
    }
}

/// Always the same counters, created a fixed `age` before `now`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FixedRandomSource {
    pub age: Duration,
    pub likes: i64,
    pub comments: i64,
    pub shares: i64,
}

impl RandomSource for FixedRandomSource {
    fn seed_engagement(&self, now: DateTime<Utc>) -> EngagementSeed {
        EngagementSeed {
            created_at: now - self.age,
            likes: self.likes,
            comments: self.comments,
            shares: self.shares,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn thread_source_stays_in_range() {
        let now = Utc.with_ymd_and_hms(2024, 7, 1, 0, 0, 0).unwrap();
        let source = ThreadRandomSource;

        for _ in 0..500 {
            let seed = source.seed_engagement(now);
            assert!((0..=MAX_LIKES).contains(&seed.likes));
            assert!((0..=MAX_COMMENTS).contains(&seed.comments));
            assert!((0..=MAX_SHARES).contains(&seed.shares));
            assert!(seed.created_at <= now);
            assert!(seed.created_at > now - Duration::hours(MAX_BACKDATE_HOURS));
        }
    }

    #[test]
    fn fixed_source_is_deterministic() {
        let now = Utc.with_ymd_and_hms(2024, 7, 1, 0, 0, 0).unwrap();
        let source = FixedRandomSource {
            age: Duration::hours(2),
            likes: 10,
            comments: 5,
            shares: 2,
        };

        let seed = source.seed_engagement(now);
        assert_eq!(seed, source.seed_engagement(now));
        assert_eq!(seed.created_at, now - Duration::hours(2));
        assert_eq!((seed.likes, seed.comments, seed.shares), (10, 5, 2));
    }
}
