//! Error types for the job service client

use thiserror::Error;

/// Result type alias for client operations
pub type Result<T> = std::result::Result<T, ClientError>;

/// Errors that can occur when talking to the job service
#[derive(Debug, Error)]
pub enum ClientError {
    /// The request could not complete (connection refused, timeout, reset)
    #[error("{0}")]
    Transport(#[from] reqwest::Error),

    /// The service answered with a non-success status
    #[error("{message}")]
    RemoteRejection {
        /// HTTP status code
        status: u16,
        /// Message extracted from the service's error body
        message: String,
    },

    /// The base URL cannot have endpoint paths appended to it
    #[error("invalid base URL {0}")]
    InvalidUrl(String),

    /// The response body was not what the endpoint promises
    #[error("malformed response: {0}")]
    Protocol(String),
}

impl ClientError {
    /// Create a rejection from status code and message
    pub fn rejection(status: u16, message: impl Into<String>) -> Self {
        Self::RemoteRejection {
            status,
            message: message.into(),
        }
    }

    /// HTTP status of a rejection, if this is one
    pub fn status(&self) -> Option<u16> {
        match self {
            Self::RemoteRejection { status, .. } => Some(*status),
            Self::Transport(e) => e.status().map(|s| s.as_u16()),
            Self::InvalidUrl(_) | Self::Protocol(_) => None,
        }
    }

    /// Check if this error is a "not found" error
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::RemoteRejection { status: 404, .. })
    }

    /// Check if this error is a client error (4xx status)
    pub fn is_client_error(&self) -> bool {
        matches!(self, Self::RemoteRejection { status, .. } if (400..500).contains(status))
    }

    /// Check if this error is a server error (5xx status)
    pub fn is_server_error(&self) -> bool {
        matches!(self, Self::RemoteRejection { status, .. } if *status >= 500)
    }
}
