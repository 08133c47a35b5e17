//! Core of the deck generator: domain types, topic classification, prompt
//! building, response parsing, fallback content, orchestration, themes and
//! deck editing.

pub mod classify;
pub mod edit;
pub mod error;
pub mod fallback;
pub mod library;
pub mod normalize;
pub mod orchestrator;
pub mod parser;
pub mod prompt;
pub mod theme;
pub mod types;

pub use classify::classify_topic;
pub use edit::{EditMode, EditSession, EditedDeck};
pub use error::{Error, Result};
pub use fallback::FallbackEngine;
pub use library::{ContentLibraries, ContentLibrary};
pub use normalize::TextNormalizer;
pub use orchestrator::{Capability, Orchestrator, TextGenerator};
pub use parser::{ParseOptions, ResponseParser};
pub use prompt::{PromptBuilder, Sampling};
pub use theme::{ThemeDefinition, ThemeSummary};
pub use types::{
    Deck, DeckRequest, Detail, GenerationMethod, Slide, SlideType, TitleStyle, TopicCategory,
    TopicSummary, UpstreamStatus,
};
