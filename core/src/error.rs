//! Error types for the bar API client.
//!
//! # Design
//! Two failure classes reach the caller. `Connectivity` means no response
//! arrived at all (refused connection, DNS failure, timeout); its message is
//! always the same and the transport detail is kept only as `cause`.
//! `Server` means a response arrived with a non-2xx status; status and body
//! are passed through untouched, and 4xx is not distinguished from 5xx.

use thiserror::Error;

/// Fixed, user-facing text for every connectivity failure.
pub const CONNECTIVITY_MESSAGE: &str =
    "Failed to connect to the server. Please check that the server is running.";

/// Errors returned by the access layer.
#[derive(Debug, Error)]
pub enum ApiError {
    /// No response was received.
    #[error("{}", CONNECTIVITY_MESSAGE)]
    Connectivity { cause: String },

    /// The server answered with a non-2xx status.
    #[error("Request failed with status code {status}")]
    Server { status: u16, body: String },

    /// The response body could not be deserialized into the expected type.
    #[error("deserialization failed: {0}")]
    Deserialization(String),

    /// The request payload could not be serialized to JSON.
    #[error("serialization failed: {0}")]
    Serialization(String),
}

impl ApiError {
    pub fn connectivity(cause: impl ToString) -> Self {
        ApiError::Connectivity {
            cause: cause.to_string(),
        }
    }

    pub fn is_connectivity(&self) -> bool {
        matches!(self, ApiError::Connectivity { .. })
    }

    /// HTTP status of a server-reported failure.
    pub fn status(&self) -> Option<u16> {
        match self {
            ApiError::Server { status, .. } => Some(*status),
            _ => None,
        }
    }
}
