//! Text normalization for generated slide text.
//!
//! Cleans raw model output before pattern matching, strips wrapper
//! characters from titles and bullets, shortens over-long bullets for
//! rendering, and turns topics into safe file names.

use regex::Regex;
use std::borrow::Cow;
use std::sync::LazyLock;
use unicode_normalization::UnicodeNormalization;

/// Regex matching every character that may not appear in an output file name.
static FILENAME_UNSAFE_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[^a-zA-Z0-9]").unwrap());

/// Longest bullet, in characters, that is rendered without shortening.
pub const MAX_BULLET_CHARS: usize = 350;

/// Leading characters stripped from titles and bullets.
const OPENING_WRAPPERS: &[char] = &['[', '"'];

/// Trailing characters stripped from titles and bullets.
const CLOSING_WRAPPERS: &[char] = &[']', '"'];

/// Text normalizer for model output.
///
/// Inner whitespace is left alone so generated titles survive verbatim.
#[derive(Debug, Clone, Default)]
pub struct TextNormalizer;

impl TextNormalizer {
    /// Create a new text normalizer.
    pub fn new() -> Self {
        Self
    }

    /// Normalize a whole response before it is split into slides.
    ///
    /// - Applies Unicode NFC so composed and decomposed glyphs compare equal
    /// - Normalizes line endings to `\n`
    /// - Trims trailing whitespace on each line
    pub fn normalize_response(&self, text: &str) -> String {
        let composed: String = text.nfc().collect();
        let unified = composed.replace("\r\n", "\n").replace('\r', "\n");

        unified
            .lines()
            .map(str::trim_end)
            .collect::<Vec<_>>()
            .join("\n")
    }
}

/// Strip one wrapping bracket or quote from each end of a string.
///
/// `[Title]` becomes `Title`, `"Title"` becomes `Title`. Only a single
/// character is removed per side.
pub fn strip_wrapping(text: &str) -> &str {
    let text = text.trim();
    let text = text
        .strip_prefix(OPENING_WRAPPERS)
        .unwrap_or(text);
    text.strip_suffix(CLOSING_WRAPPERS).unwrap_or(text).trim()
}

/// Strip one square bracket from each end of a string.
pub fn strip_brackets(text: &str) -> &str {
    let text = text.trim();
    let text = text.strip_prefix('[').unwrap_or(text);
    text.strip_suffix(']').unwrap_or(text).trim()
}

/// Shorten a bullet for rendering.
///
/// Bullets within `max_chars` are returned unchanged. Longer ones are cut at
/// the last full sentence that fits; when not even the first sentence fits,
/// the text is hard-cut and an ellipsis appended so the result is exactly
/// `max_chars` long.
pub fn truncate_bullet(text: &str, max_chars: usize) -> Cow<'_, str> {
    if text.chars().count() <= max_chars {
        return Cow::Borrowed(text);
    }

    let mut kept = String::new();
    let mut kept_chars = 0;
    for sentence in text.split('.') {
        let sentence_chars = sentence.chars().count() + 1;
        if kept_chars + sentence_chars > max_chars {
            break;
        }
        kept.push_str(sentence);
        kept.push('.');
        kept_chars += sentence_chars;
    }

    if kept.is_empty() {
        let cut: String = text.chars().take(max_chars.saturating_sub(3)).collect();
        Cow::Owned(format!("{}...", cut))
    } else {
        Cow::Owned(kept)
    }
}

/// Turn a topic into a file-name-safe stem.
///
/// Every character outside `[A-Za-z0-9]` becomes `_`.
pub fn sanitize_filename(topic: &str) -> String {
    FILENAME_UNSAFE_REGEX.replace_all(topic, "_").into_owned()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalize_response_line_endings() {
        let normalizer = TextNormalizer::new();
        let input = "SLIDE 2: CONTENT\r\nTitle: Hello \t\r\n• one\rtwo";
        assert_eq!(
            normalizer.normalize_response(input),
            "SLIDE 2: CONTENT\nTitle: Hello\n• one\ntwo"
        );
    }

    #[test]
    fn test_normalize_response_keeps_inner_whitespace() {
        let normalizer = TextNormalizer::new();
        assert_eq!(
            normalizer.normalize_response("Title: Q1  vs  Q2\t Revenue  "),
            "Title: Q1  vs  Q2\t Revenue"
        );
    }

    #[test]
    fn test_normalize_response_composes_unicode() {
        let normalizer = TextNormalizer::new();
        // "e" + combining acute accent
        let decomposed = "Caf\u{0065}\u{0301}";
        assert_eq!(normalizer.normalize_response(decomposed), "Caf\u{00e9}");
    }

    #[test]
    fn test_strip_wrapping() {
        assert_eq!(strip_wrapping("[unique title]"), "unique title");
        assert_eq!(strip_wrapping("\"Quoted\""), "Quoted");
        assert_eq!(strip_wrapping("  plain  "), "plain");
        assert_eq!(strip_wrapping("[[double]]"), "[double]");
    }

    #[test]
    fn test_strip_brackets_keeps_quotes() {
        assert_eq!(strip_brackets("[ specific fact ]"), "specific fact");
        assert_eq!(strip_brackets("\"beer and diapers\" lift"), "\"beer and diapers\" lift");
    }

    #[test]
    fn test_truncate_short_bullet_untouched() {
        let text = "Short bullet.";
        assert!(matches!(truncate_bullet(text, MAX_BULLET_CHARS), Cow::Borrowed(_)));
    }

    #[test]
    fn test_truncate_at_sentence_boundary() {
        let text = format!("{}.{}", "a".repeat(299), "b".repeat(60));
        assert_eq!(text.chars().count(), 360);

        let truncated = truncate_bullet(&text, MAX_BULLET_CHARS);
        assert_eq!(truncated.chars().count(), 300);
        assert_eq!(truncated, format!("{}.", "a".repeat(299)));
    }

    #[test]
    fn test_truncate_hard_cut_with_ellipsis() {
        let text = "c".repeat(360);
        let truncated = truncate_bullet(&text, MAX_BULLET_CHARS);
        assert_eq!(truncated, format!("{}...", "c".repeat(347)));
        assert_eq!(truncated.chars().count(), MAX_BULLET_CHARS);
    }

    #[test]
    fn test_truncate_counts_characters_not_bytes() {
        // 349 multi-byte characters fit even though they exceed 350 bytes.
        let text = "∪".repeat(349);
        assert_eq!(truncate_bullet(&text, MAX_BULLET_CHARS), text);
    }

    #[test]
    fn test_sanitize_filename() {
        assert_eq!(sanitize_filename("Apriori algorithm"), "Apriori_algorithm");
        assert_eq!(sanitize_filename("C++ & Rust!"), "C_____Rust_");
        assert_eq!(sanitize_filename("café"), "caf_");
    }
}
