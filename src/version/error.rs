use thiserror::Error;

#[derive(Debug, Error)]
pub enum FetchError {
    #[error("HTTP request failed: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("Unexpected status: {0}")]
    UnexpectedStatus(reqwest::StatusCode),

    #[error("Invalid response: {0}")]
    InvalidResponse(String),
}
