//! API errors.

use thiserror::Error;

/// Fallback text when a failed response carries no message.
pub const DEFAULT_FAILURE_MESSAGE: &str = "request failed";

/// Errors raised while talking to the ordering API.
#[derive(Debug, Error)]
pub enum ApiError {
    /// The request could not be sent or the response could not be read.
    #[error("{0}")]
    Transport(#[from] reqwest::Error),

    /// The server answered with a non-success status.
    #[error("{message}")]
    Rejected {
        /// HTTP status code
        status: u16,

        /// Server supplied message, or the fallback text
        message: String,
    },

    /// The server rejected the credentials or session token.
    #[error("{0}")]
    Unauthorized(String),

    /// The response body did not have the expected shape.
    #[error("unexpected response body: {0}")]
    Decode(#[from] serde_json::Error),

    /// The response envelope had no `data`.
    #[error("response did not include data")]
    MissingData,

    /// An image could not be read for upload.
    #[error("failed to read image: {0}")]
    Image(#[from] std::io::Error),
}

impl ApiError {
    /// Whether the server rejected the session.
    pub fn is_unauthorized(&self) -> bool {
        matches!(self, ApiError::Unauthorized(_))
    }
}
