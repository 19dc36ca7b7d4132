//! Error types for the checklist API client.
//!
//! # Design
//! `NotFound` gets a dedicated variant because the page controller treats a
//! vanished item differently from a server fault. All other non-2xx responses
//! land in `Http` with the raw status code and body for logging.

use thiserror::Error;

/// Errors returned by `ChecklistClient` parse methods and by transports.
#[derive(Debug, Error)]
pub enum ApiError {
    /// The server returned 404: the requested item does not exist.
    #[error("resource not found")]
    NotFound,

    /// The server returned a non-2xx status other than 404.
    #[error("HTTP {status}: {body}")]
    Http { status: u16, body: String },

    /// The response body could not be deserialized into the expected type.
    #[error("deserialization failed: {0}")]
    Deserialization(String),

    /// The request payload could not be serialized to JSON.
    #[error("serialization failed: {0}")]
    Serialization(String),

    /// The request never produced a response (connection refused, DNS, ...).
    #[error("transport failed: {0}")]
    Transport(String),
}

pub type ApiResult<T> = Result<T, ApiError>;
