//! Error types for reporting API operations.

use reqwest::StatusCode;

/// Result type alias for reporting API operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors raised by the reporting client.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// HTTP transport error.
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// JSON parsing error.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// URL parsing error.
    #[error("URL error: {0}")]
    Url(#[from] url::ParseError),

    /// Token endpoint rejected the refresh exchange.
    #[error("Authentication failed with status {status}: {body}")]
    AuthExchange {
        /// HTTP status returned by the token endpoint.
        status: StatusCode,
        /// Response body text.
        body: String,
    },

    /// Report endpoint returned a non-success status.
    #[error("Report request failed with status {status}: {body}")]
    Report {
        /// HTTP status returned by the report endpoint.
        status: StatusCode,
        /// Response body text.
        body: String,
    },

    /// Access token is not a structurally valid JWT.
    #[error("Malformed access token: {0}")]
    MalformedToken(String),

    /// Token endpoint answered with success but the body lacks the
    /// expected fields.
    #[error("Unexpected token response shape: {0}")]
    UnexpectedResponse(String),
}
