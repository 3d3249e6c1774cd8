//! Client error types for the PawMatch SDK

use reqwest::StatusCode;

/// Error type for dog adoption service calls
#[derive(Debug, thiserror::Error)]
pub enum ClientError {
    #[error("session is not authorized")]
    Unauthorized,

    #[error("request failed with status {status}: {body}")]
    RequestFailed { status: u16, body: String },

    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("invalid url: {0}")]
    InvalidUrl(#[from] url::ParseError),
}

impl ClientError {
    /// Build an error from a non-success status and its body
    pub fn from_status(status: StatusCode, body: String) -> Self {
        if status == StatusCode::UNAUTHORIZED {
            Self::Unauthorized
        } else {
            Self::RequestFailed {
                status: status.as_u16(),
                body,
            }
        }
    }

    /// Whether the service rejected the session cookie
    pub fn is_unauthorized(&self) -> bool {
        match self {
            Self::Unauthorized => true,
            Self::Http(e) => e.status() == Some(StatusCode::UNAUTHORIZED),
            _ => false,
        }
    }
}

pub type Result<T> = std::result::Result<T, ClientError>;
