//! Error handling for the Saveurs client

use std::fmt;
use thiserror::Error;

/// Unified error type for the Saveurs client
#[derive(Error, Debug)]
pub enum Error {
    /// Network or HTTP transport errors
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// JSON serialization or deserialization errors
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// URL parsing errors
    #[error("URL error: {0}")]
    Url(#[from] url::ParseError),

    /// Any non-2xx API response, carrying the server-supplied message
    /// or a generic status-coded message
    #[error("API error: {message} (status {status})")]
    Api { status: u16, message: String },

    /// An action that requires a logged-in user was attempted without one
    #[error("not logged in")]
    Unauthenticated,

    /// A review rating outside the accepted 1..=5 range
    #[error("rating must be between 1 and 5, got {0}")]
    InvalidRating(i32),

    /// An update was attempted on an item with no identifier
    #[error("item must have an id")]
    MissingIdentifier,
}

impl Error {
    /// Create a new API error from a status code and message
    pub fn api<T: fmt::Display>(status: u16, msg: T) -> Self {
        Error::Api {
            status,
            message: msg.to_string(),
        }
    }

    /// True if this is an API error with a 404 status
    pub fn is_not_found(&self) -> bool {
        matches!(self, Error::Api { status: 404, .. })
    }
}
