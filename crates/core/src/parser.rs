//! Response parsing: turn free-form generated text into content slides.
//!
//! The response is first normalized, then split into per-slide blocks by the
//! first strategy in [`STRATEGIES`] that finds any. Each block yields a title
//! and a list of bullets; blocks that stay too thin after padding are dropped.

use crate::library::ContentLibrary;
use crate::normalize::{strip_brackets, strip_wrapping, TextNormalizer};
use crate::types::{Slide, TitleStyle, MAX_BULLETS, MIN_BULLETS};
use log::debug;
use regex::Regex;
use std::sync::LazyLock;

/// Matches a `SLIDE <n>: CONTENT` marker anywhere in the text.
static SLIDE_MARKER_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)SLIDE\s+\d+\s*:\s*CONTENT").unwrap());

/// Captures the text after the first `Title:` label of a block.
static TITLE_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)Title:[ \t]*([^\n]*)").unwrap());

/// Characters that open a bullet line.
const BULLET_GLYPHS: &[char] = &['•', '-', '*'];

/// Titles shorter than this are replaced by the library's fallback title.
const MIN_TITLE_CHARS: usize = 8;

/// Bullets shorter than this many characters are discarded.
const MIN_BULLET_CHARS: usize = 40;

/// Bullets padded up to this many when a block is too thin.
const PADDED_BULLETS: usize = 4;

/// Splits normalized text into raw per-slide blocks.
///
/// Returns `None` when the strategy does not recognize the text at all.
pub type SplitStrategy = fn(&str) -> Option<Vec<String>>;

/// Split strategies in the order they are tried.
pub const STRATEGIES: [(&str, SplitStrategy); 2] = [
    ("slide markers", split_on_markers),
    ("titled bullet runs", split_on_titled_bullets),
];

/// Split at every `SLIDE <n>: CONTENT` marker.
///
/// Text before the first marker is ignored; each block runs to the next
/// marker or the end of the text.
pub fn split_on_markers(text: &str) -> Option<Vec<String>> {
    let markers: Vec<_> = SLIDE_MARKER_REGEX.find_iter(text).collect();
    if markers.is_empty() {
        return None;
    }

    let blocks = markers
        .iter()
        .enumerate()
        .map(|(i, marker)| {
            let end = markers.get(i + 1).map_or(text.len(), |next| next.start());
            text[marker.end()..end].trim().to_string()
        })
        .collect();
    Some(blocks)
}

/// Find `Title:` lines followed by at least three bullet lines.
///
/// Blank lines between the title and its bullets are skipped.
pub fn split_on_titled_bullets(text: &str) -> Option<Vec<String>> {
    let lines: Vec<&str> = text.lines().collect();
    let mut blocks = Vec::new();
    let mut i = 0;

    while i < lines.len() {
        if !is_title_line(lines[i]) {
            i += 1;
            continue;
        }

        let mut block = vec![lines[i].trim()];
        let mut j = i + 1;
        let mut bullet_count = 0;
        while j < lines.len() {
            let line = lines[j].trim();
            if line.is_empty() && bullet_count == 0 {
                j += 1;
                continue;
            }
            if !is_bullet_line(line) {
                break;
            }
            block.push(line);
            bullet_count += 1;
            j += 1;
        }

        if bullet_count >= MIN_BULLETS {
            blocks.push(block.join("\n"));
            i = j;
        } else {
            i += 1;
        }
    }

    if blocks.is_empty() {
        None
    } else {
        Some(blocks)
    }
}

fn is_title_line(line: &str) -> bool {
    let line = line.trim_start();
    line.get(..6)
        .is_some_and(|label| label.eq_ignore_ascii_case("title:"))
}

fn is_bullet_line(line: &str) -> bool {
    line.trim_start().starts_with(BULLET_GLYPHS)
}

/// What the caller expects back from a parse.
#[derive(Debug, Clone, Copy)]
pub struct ParseOptions {
    /// Number of content slides requested. Extra records are dropped.
    pub expected: usize,

    /// Style used for synthesized titles.
    pub title_style: TitleStyle,
}

impl ParseOptions {
    pub fn new(expected: usize) -> Self {
        Self {
            expected,
            title_style: TitleStyle::for_content_count(expected),
        }
    }
}

/// Parser for generated slide text.
#[derive(Debug, Clone)]
pub struct ResponseParser {
    normalizer: TextNormalizer,
}

impl Default for ResponseParser {
    fn default() -> Self {
        Self::new()
    }
}

impl ResponseParser {
    /// Create a parser with default settings.
    pub fn new() -> Self {
        Self {
            normalizer: TextNormalizer::new(),
        }
    }

    /// Parse a response into at most `options.expected` content slides.
    ///
    /// Returns an empty list when no strategy recognizes the text.
    pub fn parse(
        &self,
        text: &str,
        topic: &str,
        options: &ParseOptions,
        library: &dyn ContentLibrary,
    ) -> Vec<Slide> {
        let normalized = self.normalizer.normalize_response(text);

        let Some((strategy, blocks)) = STRATEGIES
            .iter()
            .find_map(|(name, split)| split(&normalized).map(|blocks| (*name, blocks)))
        else {
            debug!("No slide blocks recognized in {} chars of text", normalized.len());
            return Vec::new();
        };
        debug!("Split response into {} blocks using {}", blocks.len(), strategy);

        let mut slides: Vec<Slide> = blocks
            .iter()
            .enumerate()
            .filter_map(|(index, block)| self.parse_block(block, index, topic, options, library))
            .collect();

        slides.truncate(options.expected);
        slides
    }

    fn parse_block(
        &self,
        block: &str,
        index: usize,
        topic: &str,
        options: &ParseOptions,
        library: &dyn ContentLibrary,
    ) -> Option<Slide> {
        let title = TITLE_REGEX
            .captures(block)
            .and_then(|caps| caps.get(1))
            .map(|m| strip_wrapping(m.as_str()).to_string())
            .filter(|title| title.chars().count() >= MIN_TITLE_CHARS)
            .unwrap_or_else(|| library.fallback_title(topic, index, options.title_style));

        let mut bullets: Vec<String> = collect_bullets(block)
            .iter()
            .map(|bullet| strip_brackets(bullet).to_string())
            .filter(|bullet| bullet.chars().count() >= MIN_BULLET_CHARS)
            .collect();

        if bullets.len() < MIN_BULLETS {
            let pool = library.filler_bullets(topic);
            if !pool.is_empty() {
                debug!("Block {} has {} bullets, padding from {}", index, bullets.len(), library.name());
                while bullets.len() < PADDED_BULLETS {
                    bullets.push(pool[bullets.len() % pool.len()].clone());
                }
            }
        }
        bullets.truncate(MAX_BULLETS);

        if title.is_empty() || bullets.len() < MIN_BULLETS {
            debug!("Dropping block {}: title {:?}, {} bullets", index, title, bullets.len());
            return None;
        }

        Some(Slide::content(title, bullets))
    }
}

/// Collect bullet texts of a block, glyphs removed.
///
/// A non-bullet line directly after a bullet continues it; a blank line ends it.
fn collect_bullets(block: &str) -> Vec<String> {
    let mut bullets: Vec<String> = Vec::new();
    let mut open = false;

    for line in block.lines() {
        let line = line.trim();
        if line.is_empty() {
            open = false;
            continue;
        }
        if is_title_line(line) || SLIDE_MARKER_REGEX.is_match(line) {
            open = false;
            continue;
        }

        if let Some(rest) = line.strip_prefix(BULLET_GLYPHS) {
            bullets.push(rest.trim().to_string());
            open = true;
        } else if open {
            if let Some(last) = bullets.last_mut() {
                last.push(' ');
                last.push_str(line);
            }
        }
    }

    bullets
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::library::{AprioriLibrary, GenericLibrary};

    fn bullet(n: usize) -> String {
        format!("Specific factual statement number {} with enough detail to count as a bullet", n)
    }

    fn block(marker: usize, title: &str, bullets: usize) -> String {
        let mut text = format!("SLIDE {}: CONTENT\nTitle: {}\n", marker, title);
        for n in 0..bullets {
            text.push_str(&format!("• {}\n", bullet(n)));
        }
        text.push('\n');
        text
    }

    #[test]
    fn test_parse_well_formed_blocks() {
        let text = format!(
            "Here are your slides.\n\n{}{}{}",
            block(2, "Hive Placement on Rooftops", 4),
            block(3, "[Seasonal Colony Management]", 4),
            block(4, "\"Honey Yield Economics\"", 5),
        );

        let slides = ResponseParser::new().parse(
            &text,
            "urban beekeeping",
            &ParseOptions::new(3),
            &GenericLibrary,
        );

        assert_eq!(slides.len(), 3);
        assert_eq!(slides[0].title, "Hive Placement on Rooftops");
        assert_eq!(slides[1].title, "Seasonal Colony Management");
        assert_eq!(slides[2].title, "Honey Yield Economics");
        assert_eq!(slides[0].bullets().len(), 4);
        assert_eq!(slides[2].bullets().len(), 5);
        assert_eq!(slides[0].bullets()[0], bullet(0));
        assert!(slides.iter().all(|s| s.editable && !s.is_title()));
    }

    #[test]
    fn test_title_inner_whitespace_is_preserved() {
        let text = block(2, "[Q1  vs  Q2 Revenue]", 4);
        let slides = ResponseParser::new().parse(&text, "Rust", &ParseOptions::new(3), &GenericLibrary);
        assert_eq!(slides[0].title, "Q1  vs  Q2 Revenue");
    }

    #[test]
    fn test_bullet_length_threshold_is_inclusive() {
        let exact = "x".repeat(MIN_BULLET_CHARS);
        let text = format!(
            "SLIDE 2: CONTENT\nTitle: Threshold Checking Slide\n• {}\n• {}\n• {}\n• {}\n",
            exact,
            exact,
            exact,
            "y".repeat(MIN_BULLET_CHARS - 1)
        );
        let slides = ResponseParser::new().parse(&text, "Rust", &ParseOptions::new(3), &GenericLibrary);
        assert_eq!(slides[0].bullets(), [exact.clone(), exact.clone(), exact]);
    }

    #[test]
    fn test_markers_are_case_insensitive() {
        let text = block(2, "Lowercase Marker Slide", 3).replace("SLIDE 2: CONTENT", "slide 2: content");
        let slides = ResponseParser::new().parse(&text, "Rust", &ParseOptions::new(3), &GenericLibrary);
        assert_eq!(slides.len(), 1);
    }

    #[test]
    fn test_unrecognized_text_yields_nothing() {
        let slides = ResponseParser::new().parse(
            "I'm sorry, I can't help with that request today.",
            "Rust",
            &ParseOptions::new(4),
            &GenericLibrary,
        );
        assert!(slides.is_empty());
    }

    #[test]
    fn test_truncates_to_expected_count() {
        let text: String = (2..8).map(|n| block(n, "Another Distinct Slide", 4)).collect();
        let slides = ResponseParser::new().parse(&text, "Rust", &ParseOptions::new(4), &GenericLibrary);
        assert_eq!(slides.len(), 4);
    }

    #[test]
    fn test_short_title_replaced_for_generic_topic() {
        let text = format!("{}{}", block(2, "Intro", 4), block(3, "", 4));
        let slides = ResponseParser::new().parse(&text, "Rust", &ParseOptions::new(2), &GenericLibrary);

        assert_eq!(slides[0].title, "Rust - Key Aspect 1");
        assert_eq!(slides[1].title, "Rust - Key Aspect 2");
    }

    #[test]
    fn test_short_title_replaced_for_apriori_topic() {
        let text = block(2, "Apriori", 4);
        let slides =
            ResponseParser::new().parse(&text, "Apriori", &ParseOptions::new(4), &AprioriLibrary);
        assert_eq!(slides[0].title, "Fundamental Apriori Algorithm Concepts");
    }

    #[test]
    fn test_thin_block_is_padded_to_four() {
        let text = "SLIDE 2: CONTENT\nTitle: A Thin Generated Slide\n• too short\n• also short\n";
        let slides = ResponseParser::new().parse(text, "Rust", &ParseOptions::new(3), &GenericLibrary);

        assert_eq!(slides.len(), 1);
        assert_eq!(slides[0].bullets().len(), 4);
        assert!(slides[0].bullets()[0].starts_with("Important aspect of Rust"));
    }

    #[test]
    fn test_bullets_capped_at_five() {
        let text = block(2, "A Very Long Generated Slide", 8);
        let slides = ResponseParser::new().parse(&text, "Rust", &ParseOptions::new(3), &GenericLibrary);
        assert_eq!(slides[0].bullets().len(), MAX_BULLETS);
    }

    #[test]
    fn test_continuation_lines_are_joined() {
        let text = format!(
            "SLIDE 2: CONTENT\nTitle: Wrapped Bullet Slide\n- {}\ncontinued on the next line\n* {}\n• {}\n",
            bullet(0),
            bullet(1),
            bullet(2)
        );
        let slides = ResponseParser::new().parse(&text, "Rust", &ParseOptions::new(3), &GenericLibrary);

        assert_eq!(
            slides[0].bullets()[0],
            format!("{} continued on the next line", bullet(0))
        );
        assert_eq!(slides[0].bullets().len(), 3);
    }

    #[test]
    fn test_titled_bullet_runs_without_markers() {
        let text = format!(
            "Title: Pollinator Corridors in Cities\n\n• {}\n• {}\n• {}\n\nTitle: Not a slide\n• {}\n",
            bullet(0),
            bullet(1),
            bullet(2),
            bullet(3)
        );
        let slides = ResponseParser::new().parse(
            &text,
            "urban beekeeping",
            &ParseOptions::new(3),
            &GenericLibrary,
        );

        assert_eq!(slides.len(), 1);
        assert_eq!(slides[0].title, "Pollinator Corridors in Cities");
        assert_eq!(slides[0].bullets().len(), 3);
    }

    #[test]
    fn test_marker_strategy_wins_over_titled_runs() {
        let text = block(2, "Marker Based Slide Title", 3);
        let blocks = split_on_markers(&text).unwrap();
        assert_eq!(blocks.len(), 1);
        assert!(blocks[0].starts_with("Title: Marker Based Slide Title"));
    }
}
