//! Error types for BlobView

use thiserror::Error;

/// Errors that can occur while loading a blob
#[derive(Debug, Error)]
pub enum ViewError {
    /// URL does not have the `owner/repo/blob/branch/path` shape
    #[error("Failed to parse blob URL: {0}")]
    UrlParse(String),

    /// No provider recognizes the URL host
    #[error("Unsupported host: {0}")]
    UnsupportedHost(String),

    /// Failed to build HTTP client
    #[error("Failed to create HTTP client")]
    ClientBuildError(#[source] reqwest::Error),

    /// Failed to connect to server
    #[error("Failed to connect to server")]
    ConnectError(#[source] reqwest::Error),

    /// Other request error
    #[error("Request failed: {0}")]
    RequestError(String),

    /// Server answered with a non-success status
    #[error("HTTP {status} from {url}")]
    HttpStatus { status: u16, url: String },

    /// Response body did not have the expected shape
    #[error("Invalid response: {0}")]
    InvalidResponse(String),

    /// Payload was not valid base64
    #[error("Failed to decode content")]
    Decode(#[from] base64::DecodeError),
}

impl ViewError {
    /// Create an error from a reqwest error
    pub fn from_reqwest(err: reqwest::Error) -> Self {
        if err.is_connect() {
            ViewError::ConnectError(err)
        } else if err.is_decode() {
            ViewError::InvalidResponse(err.to_string())
        } else {
            ViewError::RequestError(err.to_string())
        }
    }
}
