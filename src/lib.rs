//! Engagement leaderboard service.
//!
//! Every write stores a new post and recomputes the top posts over the most
//! recent candidates using a time-decayed engagement score.

pub mod config;
pub mod database;
pub mod middleware;
pub mod post;
pub mod ranking;
pub mod router;
pub mod utils;
