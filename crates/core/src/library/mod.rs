//! Content libraries: deterministic slide text keyed by topic.
//!
//! A library supplies everything topic-specific the generator needs when the
//! model cannot be used or under-delivers: complete fallback slides, titles
//! for untitled parsed blocks, filler bullets, and optionally a richer
//! prompt. Libraries are tried in registration order; the generic library
//! answers for every topic nobody else claims.

mod apriori;
mod generic;

pub use apriori::AprioriLibrary;
pub use generic::{GenericLibrary, ASPECT_LABELS};

use crate::types::{Detail, Slide, TitleStyle, TopicCategory};
use std::fmt;

/// Topic-specific source of deterministic slide text.
pub trait ContentLibrary: Send + Sync + fmt::Debug {
    /// Short identifier used in logs.
    fn name(&self) -> &'static str;

    /// Whether this library covers the topic.
    fn matches(&self, topic: &str) -> bool;

    /// The content slide at `index` (0-based, title slide excluded).
    fn content_slide(&self, topic: &str, index: usize, style: TitleStyle, detail: Detail)
        -> Slide;

    /// Title for a parsed block at `index` that came without a usable one.
    fn fallback_title(&self, topic: &str, index: usize, style: TitleStyle) -> String;

    /// Pool of filler bullets cycled into parsed slides that are too thin.
    fn filler_bullets(&self, topic: &str) -> Vec<String>;

    /// A specialized prompt, if this library has one.
    fn prompt(
        &self,
        _topic: &str,
        _content_count: usize,
        _category: TopicCategory,
        _style: TitleStyle,
        _detail: Detail,
    ) -> Option<String> {
        None
    }
}

/// Ordered registry of content libraries with a generic default.
#[derive(Debug)]
pub struct ContentLibraries {
    libraries: Vec<Box<dyn ContentLibrary>>,
    default: GenericLibrary,
}

impl Default for ContentLibraries {
    fn default() -> Self {
        Self::generic_only().with_library(AprioriLibrary)
    }
}

impl ContentLibraries {
    /// A registry that only knows the generic library.
    pub fn generic_only() -> Self {
        Self {
            libraries: Vec::new(),
            default: GenericLibrary,
        }
    }

    /// Register a library. Earlier registrations win on overlapping topics.
    pub fn with_library(mut self, library: impl ContentLibrary + 'static) -> Self {
        self.libraries.push(Box::new(library));
        self
    }

    /// The library responsible for a topic.
    pub fn lookup(&self, topic: &str) -> &dyn ContentLibrary {
        self.libraries
            .iter()
            .find(|library| library.matches(topic))
            .map(|library| library.as_ref())
            .unwrap_or(&self.default)
    }
}
