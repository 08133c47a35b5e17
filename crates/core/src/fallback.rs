//! Deterministic deck generation without the generative service.

use crate::library::ContentLibraries;
use crate::types::{Detail, Slide, TitleStyle};
use log::debug;

/// Builds complete decks from the registered content libraries.
#[derive(Debug, Default)]
pub struct FallbackEngine {
    libraries: ContentLibraries,
}

impl FallbackEngine {
    pub fn new(libraries: ContentLibraries) -> Self {
        Self { libraries }
    }

    /// The libraries this engine draws from.
    pub fn libraries(&self) -> &ContentLibraries {
        &self.libraries
    }

    /// A full deck of `total` slides: the title slide followed by
    /// `total - 1` content slides.
    pub fn deck(&self, topic: &str, total: usize, detail: Detail) -> Vec<Slide> {
        let content_count = total.saturating_sub(1);
        let style = TitleStyle::for_content_count(content_count);

        let mut slides = Vec::with_capacity(total);
        slides.push(Slide::title(topic));
        slides.extend(self.content_slides(topic, 0, content_count, style, detail));
        slides
    }

    /// `count` content slides starting at content index `start`.
    ///
    /// Used to top up a deck whose generated part came up short.
    pub fn content_slides(
        &self,
        topic: &str,
        start: usize,
        count: usize,
        style: TitleStyle,
        detail: Detail,
    ) -> Vec<Slide> {
        let library = self.libraries.lookup(topic);
        debug!(
            "Building {} fallback slides from index {} with the {} library",
            count,
            start,
            library.name()
        );

        (start..start + count)
            .map(|index| library.content_slide(topic, index, style, detail))
            .collect()
    }
}
