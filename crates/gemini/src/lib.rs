//! Google Gemini backend for deck generation.
//!
//! Validates the API key, verifies it with a live probe, and implements
//! [`deckgen_core::TextGenerator`] over the `generateContent` REST call.

pub mod client;
pub mod credential;
pub mod error;

pub use client::{bootstrap_capability, GeminiClient, GeminiConfig, DEFAULT_MODEL, GEMINI_API_BASE_URL};
pub use credential::Credential;
pub use error::{GeminiError, Result};
