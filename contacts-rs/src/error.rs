use thiserror::Error;

#[derive(Error, Debug)]
pub enum ContactError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("upstream authentication expired: {0}")]
    UpstreamAuth(String),

    #[error("upstream rate limit: {0}")]
    RateLimited(String),

    #[error("classification backend error: {0}")]
    Classification(String),

    #[error("configuration error: {0}")]
    Config(String),

    #[error("internal task failure: {0}")]
    Internal(String),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),
}

pub type Result<T> = std::result::Result<T, ContactError>;
