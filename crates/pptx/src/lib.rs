//! PPTX (Office Open XML) rendering for generated decks.
//!
//! Slides are laid out into a [`Document`], packaged as a ZIP of XML parts,
//! and written to a collision-free file. [`DeckReader`] reads the text of a
//! rendered deck back for inspection.

pub mod document;
pub mod output;
pub mod package;
pub mod reader;

pub use document::Document;
pub use output::{DeckWriter, OutputKind, RenderedDeck};
pub use package::write_package;
pub use reader::{DeckReader, InspectedSlide};
