//! In-memory editing of a generated deck before it is re-rendered.

use crate::error::{Error, Result};
use crate::types::{Slide, TopicSummary};

/// Separator between bullets in the draft content text.
pub const BULLET_SEPARATOR: &str = "\n\n";

/// Whether a slide is being edited, and the drafts if so.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EditMode {
    Viewing,
    Editing {
        index: usize,
        draft_title: String,
        draft_content: String,
    },
}

/// A deck ready to be re-rendered after editing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EditedDeck {
    pub slides: Vec<Slide>,
    pub topic: String,
    pub topic_summary: TopicSummary,
}

/// Editing state for one deck.
///
/// Navigation and edits are applied synchronously to the in-memory slide
/// list; nothing is rendered until [`EditSession::finish`] hands the deck on.
#[derive(Debug, Clone)]
pub struct EditSession {
    slides: Vec<Slide>,
    topic: String,
    focus: usize,
    mode: EditMode,
}

impl EditSession {
    /// Start a session over a non-empty slide list.
    pub fn new(slides: Vec<Slide>, topic: impl Into<String>) -> Result<Self> {
        if slides.is_empty() {
            return Err(Error::InvalidInput("No slides to edit".to_string()));
        }
        Ok(Self {
            slides,
            topic: topic.into(),
            focus: 0,
            mode: EditMode::Viewing,
        })
    }

    pub fn slides(&self) -> &[Slide] {
        &self.slides
    }

    pub fn topic(&self) -> &str {
        &self.topic
    }

    /// Index of the focused slide.
    pub fn focus(&self) -> usize {
        self.focus
    }

    pub fn focused(&self) -> &Slide {
        &self.slides[self.focus]
    }

    pub fn mode(&self) -> &EditMode {
        &self.mode
    }

    pub fn is_editing(&self) -> bool {
        matches!(self.mode, EditMode::Editing { .. })
    }

    /// Move to the next slide. Stays put on the last one.
    pub fn next(&mut self) -> bool {
        self.go_to(self.focus + 1)
    }

    /// Move to the previous slide. Stays put on the first one.
    pub fn prev(&mut self) -> bool {
        match self.focus.checked_sub(1) {
            Some(index) => self.go_to(index),
            None => false,
        }
    }

    /// Focus a slide, discarding any unsaved edit. Returns false when the
    /// index is past the end.
    pub fn go_to(&mut self, index: usize) -> bool {
        if index >= self.slides.len() {
            return false;
        }
        self.cancel_edit();
        self.focus = index;
        true
    }

    /// Load the focused slide into the drafts.
    pub fn begin_edit(&mut self) {
        let slide = &self.slides[self.focus];
        let draft_title = if slide.is_title() && slide.title.trim().is_empty() {
            self.topic.clone()
        } else {
            slide.title.clone()
        };

        self.mode = EditMode::Editing {
            index: self.focus,
            draft_title,
            draft_content: slide.bullets().join(BULLET_SEPARATOR),
        };
    }

    /// Replace the draft title. Ignored outside edit mode.
    pub fn set_draft_title(&mut self, title: impl Into<String>) {
        if let EditMode::Editing { draft_title, .. } = &mut self.mode {
            *draft_title = title.into();
        }
    }

    /// Replace the draft content. Ignored outside edit mode.
    pub fn set_draft_content(&mut self, content: impl Into<String>) {
        if let EditMode::Editing { draft_content, .. } = &mut self.mode {
            *draft_content = content.into();
        }
    }

    /// Write the drafts back into the slide and leave edit mode.
    ///
    /// Returns false when nothing was being edited.
    pub fn save_edit(&mut self) -> bool {
        let EditMode::Editing {
            index,
            draft_title,
            draft_content,
        } = std::mem::replace(&mut self.mode, EditMode::Viewing)
        else {
            return false;
        };

        let slide = &mut self.slides[index];
        let trimmed = draft_title.trim();

        if slide.is_title() {
            let title = if trimmed.is_empty() {
                self.topic.clone()
            } else {
                trimmed.to_string()
            };
            // The title slide names the deck.
            self.topic = title.clone();
            slide.title = title;
            return true;
        }

        if !trimmed.is_empty() {
            slide.title = trimmed.to_string();
        } else if slide.title.trim().is_empty() {
            slide.title = format!("Slide {}", index + 1);
        }

        slide.content = Some(
            draft_content
                .split(BULLET_SEPARATOR)
                .map(str::trim)
                .filter(|bullet| !bullet.is_empty())
                .map(str::to_string)
                .collect(),
        );
        true
    }

    /// Discard the drafts.
    pub fn cancel_edit(&mut self) {
        self.mode = EditMode::Viewing;
    }

    /// End the session, yielding the deck for re-rendering. Unsaved drafts
    /// are dropped.
    pub fn finish(self) -> EditedDeck {
        let topic_summary = TopicSummary::for_edited(&self.topic);
        EditedDeck {
            slides: self.slides,
            topic: self.topic,
            topic_summary,
        }
    }
}
