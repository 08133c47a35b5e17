//! Error types for slide-deck generation.

use thiserror::Error;

/// Result type alias using our Error type.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur while generating or rendering a deck.
#[derive(Error, Debug)]
pub enum Error {
    /// Bad request input (missing topic, slide count out of range, ...).
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// The generative-text service could not be used for this request.
    #[error("Generative service unavailable: {0}")]
    UpstreamUnavailable(String),

    /// The generated text could not be turned into enough slides.
    #[error("Could not parse generated slides: {0}")]
    ParseFailure(String),

    /// Building or writing the presentation file failed.
    #[error("Failed to render presentation: {0}")]
    RenderFailure(String),

    /// Failed to read or write a file.
    #[error("I/O error: {0}")]
    IoError(#[from] std::io::Error),

    /// ZIP archive error (for PPTX).
    #[error("ZIP error: {0}")]
    ZipError(String),

    /// XML error (for PPTX).
    #[error("XML error: {0}")]
    XmlError(String),
}
