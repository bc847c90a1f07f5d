//! Error types for item-quiz

use thiserror::Error;

#[derive(Debug, Error)]
pub enum QuizError {
    #[error("Catalog request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Catalog returned no usable version")]
    NoVersion,

    #[error("Catalog not loaded yet")]
    CatalogNotReady,

    #[error("Catalog is empty")]
    EmptyCatalog,

    #[error("No round is awaiting a guess")]
    NoActiveRound,

    #[error("Time limit {0} ms outside supported range")]
    InvalidTimeLimit(u64),
}

pub type Result<T> = std::result::Result<T, QuizError>;
