use chrono::{DateTime, Utc};

use crate::post::post_model::Post;

pub const LIKE_WEIGHT: f64 = 2.0;
pub const COMMENT_WEIGHT: f64 = 3.0;
pub const SHARE_WEIGHT: f64 = 5.0;

const SECONDS_PER_HOUR: f64 = 3600.0;
const NANOS_PER_SECOND: f64 = 1_000_000_000.0;

/// Fractional hours between `created_at` and `now`.
///
/// Negative when the post is dated in the future.
pub fn age_hours(created_at: DateTime<Utc>, now: DateTime<Utc>) -> f64 {
    let age = now - created_at;
    let seconds = age.num_seconds() as f64 + f64::from(age.subsec_nanos()) / NANOS_PER_SECOND;
    seconds / SECONDS_PER_HOUR
}

/// `2*likes + 3*comments + 5*shares - age_hours`.
///
/// Counters are scored exactly as stored, and future-dated posts keep the
/// resulting boost.
pub fn engagement_score(post: &Post, now: DateTime<Utc>) -> f64 {
    LIKE_WEIGHT * post.likes as f64
        + COMMENT_WEIGHT * post.comments as f64
        + SHARE_WEIGHT * post.shares as f64
        - age_hours(post.created_at, now)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Duration, TimeZone};
    use mongodb::bson::oid::ObjectId;

    fn now() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 5, 20, 12, 0, 0).unwrap()
    }

    fn post(likes: i64, comments: i64, shares: i64, created_at: DateTime<Utc>) -> Post {
        Post {
            id: ObjectId::new(),
            author_id: 1,
            content: "hello".into(),
            created_at,
            likes,
            comments,
            shares,
        }
    }

    #[test]
    fn weighted_counters_minus_age() {
        let p = post(10, 5, 2, now() - Duration::hours(2));
        assert_eq!(engagement_score(&p, now()), 43.0);
    }

    #[test]
    fn age_is_fractional() {
        let p = post(0, 0, 0, now() - Duration::minutes(90));
        assert_eq!(engagement_score(&p, now()), -1.5);

        let p = post(0, 0, 0, now() - Duration::seconds(36));
        assert!((engagement_score(&p, now()) + 0.01).abs() < 1e-12);
    }

    #[test]
    fn sub_second_age_is_kept() {
        let p = post(0, 0, 0, now() - Duration::milliseconds(1800));
        assert!((age_hours(p.created_at, now()) - 0.0005).abs() < 1e-12);
    }

    #[test]
    fn future_post_gets_boost() {
        let p = post(1, 0, 0, now() + Duration::hours(3));
        assert_eq!(engagement_score(&p, now()), 5.0);

        let p = post(0, 0, 0, now() + Duration::milliseconds(1800));
        assert!((age_hours(p.created_at, now()) + 0.0005).abs() < 1e-12);
    }

    #[test]
    fn negative_counters_are_scored_as_given() {
        let p = post(-1, 0, 0, now());
        assert_eq!(engagement_score(&p, now()), -2.0);
    }

    #[test]
    fn scoring_is_repeatable() {
        let p = post(7, 3, 1, now() - Duration::minutes(45));
        assert_eq!(engagement_score(&p, now()), engagement_score(&p, now()));
    }
}
