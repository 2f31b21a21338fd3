// src/error.rs
use thiserror::Error;

/// User input did not match the expected store-URL shape.
/// Fatal to the operation; raised before any network call.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
#[error("unrecognized {store} URL (expected {expected})")]
pub struct MalformedUrlError {
    pub store: &'static str,
    pub expected: &'static str,
}

/// Failure while fetching one storefront. Never fatal to a collection run;
/// the collector records it in the manifest and moves on.
#[derive(Debug, Error)]
pub enum FetchError {
    #[error("request failed: {0}")]
    Http(String),

    #[error("HTTP status {0}")]
    Status(u16),

    #[error("unexpected payload: {0}")]
    Parse(String),

    /// The source answered with a robot check instead of content.
    #[error("source blocked the request (robot check)")]
    Blocked,
}

impl From<ureq::Error> for FetchError {
    fn from(e: ureq::Error) -> Self {
        match e {
            ureq::Error::Status(code, _) => FetchError::Status(code),
            ureq::Error::Transport(t) => FetchError::Http(t.to_string()),
        }
    }
}

impl From<std::io::Error> for FetchError {
    fn from(e: std::io::Error) -> Self {
        FetchError::Http(e.to_string())
    }
}

impl From<serde_json::Error> for FetchError {
    fn from(e: serde_json::Error) -> Self {
        FetchError::Parse(e.to_string())
    }
}

/// Export-side failures (file IO, JSON encoding).
#[derive(Debug, Error)]
pub enum ExportError {
    #[error(transparent)]
    Io(#[from] std::io::Error),

    #[error(transparent)]
    Json(#[from] serde_json::Error),
}
