//! API error types for the Earth Engine data client.

use thiserror::Error;

/// Error type for every client operation.
///
/// Nothing here is retried by the client; each variant is surfaced to the
/// caller as soon as it happens.
#[derive(Debug, Error)]
pub enum ApiError {
    /// Request method other than GET or POST. Raised before any I/O.
    #[error("Unexpected request method: {0}")]
    InvalidMethod(String),

    /// Connection, DNS, TLS or timeout failure in the transport.
    #[error("Unexpected HTTP error: {0}")]
    Transport(String),

    /// Response status other than 200.
    #[error("Server returned HTTP code: {0}")]
    HttpStatus(u16),

    /// The envelope carried an `error` field.
    #[error("{0}")]
    Server(String),

    /// The envelope carried neither `data` nor `error`.
    #[error("Missing data in response: {0}")]
    MissingData(String),

    /// The body was not valid JSON.
    #[error("Malformed JSON in response: {0}")]
    MalformedJson(String),

    /// `data` did not have the shape the operation expects.
    #[error("Deserialization error: {0}")]
    Deserialize(String),

    /// A request parameter could not be used.
    #[error("Invalid parameter: {0}")]
    InvalidParameter(String),

    /// The client configuration is incomplete.
    #[error("Configuration error: {0}")]
    Config(String),

    /// Credentials failed to authorize the request.
    #[error("Authorization error: {0}")]
    Auth(String),
}

impl ApiError {
    /// HTTP status code carried by this error, if any.
    pub fn status_code(&self) -> Option<u16> {
        match self {
            ApiError::HttpStatus(code) => Some(*code),
            _ => None,
        }
    }
}

/// Result type alias for API operations.
pub type ApiResult<T> = Result<T, ApiError>;
