//! Handler errors carrying an HTTP status.

use serde::Serialize;
use thiserror::Error;

/// Error returned by a handler, ready to be sent to a client.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("{status}: {message}")]
pub struct ApiError {
    pub status: u16,
    pub message: String,
    pub details: Option<String>,
}

/// JSON body of an error response.
#[derive(Debug, Serialize)]
pub struct ErrorBody<'a> {
    pub error: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<&'a str>,
}

impl ApiError {
    /// 400 with a message meant for the user.
    pub fn bad_request(message: impl Into<String>) -> Self {
        Self {
            status: 400,
            message: message.into(),
            details: None,
        }
    }

    /// 500 with a generic message and the underlying cause as details.
    pub fn internal(message: impl Into<String>, cause: impl ToString) -> Self {
        Self {
            status: 500,
            message: message.into(),
            details: Some(cause.to_string()),
        }
    }

    /// Map a core error, using `context` as the message for server faults.
    pub fn from_core(e: deckgen_core::Error, context: &str) -> Self {
        match e {
            deckgen_core::Error::InvalidInput(message) => Self::bad_request(message),
            other => Self::internal(context, other),
        }
    }

    pub fn body(&self) -> ErrorBody<'_> {
        ErrorBody {
            error: &self.message,
            details: self.details.as_deref(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_invalid_input_is_bad_request() {
        let err = ApiError::from_core(
            deckgen_core::Error::InvalidInput("Topic and slide count required".to_string()),
            "Failed to generate presentation",
        );
        assert_eq!(err.status, 400);
        assert_eq!(
            serde_json::to_value(err.body()).unwrap(),
            serde_json::json!({"error": "Topic and slide count required"})
        );
    }

    #[test]
    fn test_other_errors_are_internal() {
        let err = ApiError::from_core(
            deckgen_core::Error::RenderFailure("disk full".to_string()),
            "Failed to generate presentation",
        );
        assert_eq!(err.status, 500);
        assert_eq!(err.message, "Failed to generate presentation");
        assert_eq!(err.details.as_deref(), Some("Failed to render presentation: disk full"));
    }
}
