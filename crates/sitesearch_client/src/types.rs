use serde::{Deserialize, Serialize};
use thiserror::Error;

pub type RequestId = u64;

/// Message surfaced for any non-success status. Backend detail is not shown.
pub const SEARCH_FAILED_MESSAGE: &str = "Search failed";

/// JSON body of `POST /search`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SearchQuery {
    pub url: String,
    pub query: String,
}

/// One element of the service's JSON result array.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct SearchHit {
    #[serde(default)]
    pub id: Option<String>,
    pub path: String,
    pub chunk: String,
    pub html: String,
    pub score: f64,
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SearchError {
    #[error("invalid search endpoint {url}: {message}")]
    InvalidEndpoint { url: String, message: String },
    /// No response was obtained (connect failure, timeout, broken body).
    #[error("{0}")]
    Transport(String),
    /// The service answered with a non-success status.
    #[error("Search failed")]
    Service { status: u16 },
    /// A success response whose body is not a result array.
    #[error("{0}")]
    Decode(String),
    #[error("response too large (max {max_bytes} bytes)")]
    TooLarge { max_bytes: u64 },
}

#[derive(Debug, Clone, PartialEq)]
pub enum ClientEvent {
    SearchCompleted {
        request_id: RequestId,
        result: Result<Vec<SearchHit>, SearchError>,
    },
    /// A newer request superseded this one before it settled.
    SearchCancelled { request_id: RequestId },
}
