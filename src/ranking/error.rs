use thiserror::Error;

use crate::post::post_store::StoreError;

#[derive(Debug, Error, Clone, PartialEq)]
pub enum RankingError {
    #[error("invalid input: {0}")]
    InvalidInput(String),

    #[error(transparent)]
    Store(#[from] StoreError),
}
