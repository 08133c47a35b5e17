//! Deck generator service layer.
//!
//! Wires the orchestrator, the Gemini backend and the PPTX writer together
//! behind handlers that take and return plain serde bodies, so any
//! transport can expose them.

pub mod api;
pub mod config;
pub mod error;
pub mod handlers;

pub use api::{
    GenerateRequest, GenerateResponse, RegenerateRequest, RegenerateResponse, StatusResponse,
    ThemesResponse,
};
pub use config::Config;
pub use error::{ApiError, ErrorBody};
pub use handlers::{DeckService, DOWNLOADS_ROUTE};
