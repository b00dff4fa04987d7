// Error taxonomy for remote calls.

use thiserror::Error;

pub type ApiResult<T> = Result<T, ApiError>;

#[derive(Debug, Error)]
pub enum ApiError {
    /// The request never produced a response (unreachable host, timeout,
    /// connection reset while reading the body).
    #[error("network error for {url}: {source}")]
    Network {
        url: String,
        source: reqwest::Error,
    },

    /// The server answered with a non-success status.
    #[error("server returned {status}: {message}")]
    Remote { status: u16, message: String },

    /// A success status whose body does not have the expected shape.
    #[error("malformed response from {url}: {message}")]
    Malformed { url: String, message: String },

    #[error("failed to build HTTP client: {0}")]
    ClientBuild(reqwest::Error),
}

impl ApiError {
    /// Transport failures and non-success statuses; the cases a caller
    /// degrades to "no data" for.
    pub fn is_network(&self) -> bool {
        matches!(self, ApiError::Network { .. } | ApiError::Remote { .. })
    }

    pub fn status(&self) -> Option<u16> {
        match self {
            ApiError::Remote { status, .. } => Some(*status),
            ApiError::Network { source, .. } => source.status().map(|s| s.as_u16()),
            _ => None,
        }
    }
}
