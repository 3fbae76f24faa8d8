use std::env;

pub const DEFAULT_SERVICE_NAME: &str = "post-leaderboard";

/// Name reported in every response envelope.
pub fn service_name() -> String {
    env::var("SERVICE_NAME").unwrap_or_else(|_| DEFAULT_SERVICE_NAME.to_string())
}
