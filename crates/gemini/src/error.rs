//! Error types for the Gemini client.

use deckgen_core::UpstreamStatus;
use thiserror::Error;

/// Result type alias using the client's error type.
pub type Result<T> = std::result::Result<T, GeminiError>;

/// Errors raised while talking to Gemini.
#[derive(Error, Debug)]
pub enum GeminiError {
    /// Connection failure, timeout or unreadable body. The request URL is
    /// stripped before wrapping.
    #[error("Transport error: {0}")]
    Transport(reqwest::Error),

    /// The service answered with a non-success status.
    #[error("HTTP {status}: {message}")]
    Status { status: u16, message: String },

    /// The service answered but returned no text.
    #[error("Empty response")]
    EmptyResponse,

    /// The response body was not the expected JSON.
    #[error("Unexpected response payload: {0}")]
    Payload(String),
}

impl From<reqwest::Error> for GeminiError {
    fn from(e: reqwest::Error) -> Self {
        GeminiError::Transport(e.without_url())
    }
}

impl GeminiError {

    /// Credential status this error implies.
    pub fn upstream_status(&self) -> UpstreamStatus {
        match self {
            GeminiError::Status { status, .. } => UpstreamStatus::from_http_status(*status),
            GeminiError::Transport(e) => e
                .status()
                .map(|status| UpstreamStatus::from_http_status(status.as_u16()))
                .unwrap_or(UpstreamStatus::Error),
            GeminiError::EmptyResponse | GeminiError::Payload(_) => UpstreamStatus::Error,
        }
    }
}

impl From<GeminiError> for deckgen_core::Error {
    fn from(e: GeminiError) -> Self {
        deckgen_core::Error::UpstreamUnavailable(e.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_mapping() {
        let status = |code| GeminiError::Status {
            status: code,
            message: String::new(),
        };
        assert_eq!(status(403).upstream_status(), UpstreamStatus::PermissionDenied);
        assert_eq!(status(429).upstream_status(), UpstreamStatus::QuotaExceeded);
        assert_eq!(status(503).upstream_status(), UpstreamStatus::ServiceUnavailable);
        assert_eq!(status(400).upstream_status(), UpstreamStatus::Error);
        assert_eq!(GeminiError::EmptyResponse.upstream_status(), UpstreamStatus::Error);
    }

    #[test]
    fn test_converts_to_core_error() {
        let err: deckgen_core::Error = GeminiError::EmptyResponse.into();
        assert!(matches!(err, deckgen_core::Error::UpstreamUnavailable(_)));
    }
}
