//! Error types of the core.
//!
//! None of these ever leave an update handler: they are converted into a
//! notice on the model or logged and dropped.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Failure of a single device API call
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Error)]
pub enum ApiError {
    /// The request never got an answer (network failure or timeout)
    #[error("{action} failed: {message}")]
    Transport {
        action: String,
        message: String,
        timeout: bool,
    },

    /// The device answered with a non-success status or payload
    #[error("{action} rejected by device: {message}")]
    Rejected { action: String, message: String },

    /// The device answered with something we could not read
    #[error("{action}: malformed response: {message}")]
    Parse { action: String, message: String },
}

impl ApiError {
    pub fn is_timeout(&self) -> bool {
        matches!(self, Self::Transport { timeout: true, .. })
    }
}

/// Invalid `ApiConfig` input
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConfigError {
    #[error("invalid base URL {url:?}: {reason}")]
    InvalidBaseUrl { url: String, reason: String },

    #[error("unsupported URL scheme {0:?}, expected http or https")]
    UnsupportedScheme(String),
}
