//! Typed error hierarchy for the lineups client.
//!
//! Three enums cover the three failure surfaces:
//! - `ApiError` - remote data client failures (transport, status, body)
//! - `ValidationError` - client-side checks on the creation form
//! - `SubmitError` - the creation path, which can fail either way

use thiserror::Error;

/// Errors from the remote data client.
///
/// `Clone` so a failure can live inside a published fetch snapshot.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ApiError {
    #[error("Request could not be completed: {message}")]
    TransportFailed { message: String },

    #[error("API call failed with status: {status}")]
    RequestFailed { status: u16 },

    #[error("Response body is not valid JSON: {message}")]
    InvalidBody { message: String },
}

impl ApiError {
    /// HTTP status carried by the error, if the server answered at all.
    pub fn status(&self) -> Option<u16> {
        match self {
            ApiError::RequestFailed { status } => Some(*status),
            _ => None,
        }
    }
}

impl From<reqwest::Error> for ApiError {
    fn from(err: reqwest::Error) -> Self {
        if let Some(status) = err.status() {
            return ApiError::RequestFailed {
                status: status.as_u16(),
            };
        }
        if err.is_decode() {
            return ApiError::InvalidBody {
                message: err.to_string(),
            };
        }
        ApiError::TransportFailed {
            message: err.to_string(),
        }
    }
}

/// Client-side validation failures, raised before any network call.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("Please fill out all required fields (missing: {})", .fields.join(", "))]
    MissingFields { fields: Vec<&'static str> },
}

/// Errors from submitting a new lineup.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SubmitError {
    #[error(transparent)]
    Validation(#[from] ValidationError),

    #[error(transparent)]
    Api(#[from] ApiError),
}
