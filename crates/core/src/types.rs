//! Domain types for representing generated decks.

use crate::error::{Error, Result};
use serde::{Deserialize, Serialize, Serializer};
use std::fmt;

/// Smallest deck a user may request (title slide included).
pub const MIN_SLIDES: usize = 3;

/// Largest deck a user may request (title slide included).
pub const MAX_SLIDES: usize = 20;

/// Maximum bullets kept on a content slide.
pub const MAX_BULLETS: usize = 5;

/// Minimum bullets a content slide must carry after padding.
pub const MIN_BULLETS: usize = 3;

/// Whether a slide is the deck's title slide or a content slide.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SlideType {
    /// The single opening slide carrying the topic.
    Title,
    /// A titled slide with bullets.
    Content,
}

/// A single slide of a deck.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Slide {
    /// Slide heading. Equals the topic on the title slide.
    pub title: String,

    /// Bullet texts, `None` on the title slide.
    pub content: Option<Vec<String>>,

    /// Title or content slide.
    pub slide_type: SlideType,

    /// Whether the client offers in-place editing for this slide.
    #[serde(default)]
    pub editable: bool,
}

impl Slide {
    /// Create the title slide for a topic.
    pub fn title(topic: impl Into<String>) -> Self {
        Self {
            title: topic.into(),
            content: None,
            slide_type: SlideType::Title,
            editable: false,
        }
    }

    /// Create an editable content slide.
    pub fn content(title: impl Into<String>, bullets: Vec<String>) -> Self {
        Self {
            title: title.into(),
            content: Some(bullets),
            slide_type: SlideType::Content,
            editable: true,
        }
    }

    /// Whether this is the title slide.
    pub fn is_title(&self) -> bool {
        self.slide_type == SlideType::Title
    }

    /// Bullets of this slide, empty for the title slide.
    pub fn bullets(&self) -> &[String] {
        self.content.as_deref().unwrap_or(&[])
    }
}

/// Coarse domain of a topic, used to steer prompt wording.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TopicCategory {
    Health,
    Technology,
    Business,
    General,
}

impl TopicCategory {
    /// Lowercase name, as used in prompts and responses.
    pub fn as_str(&self) -> &'static str {
        match self {
            TopicCategory::Health => "health",
            TopicCategory::Technology => "technology",
            TopicCategory::Business => "business",
            TopicCategory::General => "general",
        }
    }
}

impl fmt::Display for TopicCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// How slide titles should read.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TitleStyle {
    /// Short, creative titles. Used for decks of up to ten content slides.
    Short,
    /// Longer, structured titles for big decks.
    Descriptive,
}

impl TitleStyle {
    /// Pick the title style for a number of content slides.
    pub fn for_content_count(count: usize) -> Self {
        if count <= 10 {
            TitleStyle::Short
        } else {
            TitleStyle::Descriptive
        }
    }
}

/// How many bullets each generated slide should carry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Detail {
    /// Four bullets per slide.
    #[default]
    Standard,
    /// Five bullets per slide ("more info" mode).
    Extended,
}

impl Detail {
    /// Bullets per content slide at this detail level.
    pub fn bullets_per_slide(&self) -> usize {
        match self {
            Detail::Standard => 4,
            Detail::Extended => 5,
        }
    }
}

impl From<bool> for Detail {
    fn from(more_info: bool) -> Self {
        if more_info {
            Detail::Extended
        } else {
            Detail::Standard
        }
    }
}

/// A validated request to generate a deck.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DeckRequest {
    /// Trimmed, non-empty topic.
    pub topic: String,

    /// Total slides wanted, title slide included.
    pub slide_count: usize,

    /// Bullet density.
    pub detail: Detail,
}

impl DeckRequest {
    /// Validate raw request input.
    pub fn new(topic: &str, slide_count: usize, detail: Detail) -> Result<Self> {
        let topic = topic.trim();
        if topic.is_empty() {
            return Err(Error::InvalidInput("Topic and slide count required".to_string()));
        }
        if !(MIN_SLIDES..=MAX_SLIDES).contains(&slide_count) {
            return Err(Error::InvalidInput(format!(
                "Slide count must be between {} and {}",
                MIN_SLIDES, MAX_SLIDES
            )));
        }

        Ok(Self {
            topic: topic.to_string(),
            slide_count,
            detail,
        })
    }

    /// Number of content slides (everything but the title slide).
    pub fn content_count(&self) -> usize {
        self.slide_count - 1
    }

    /// Title style matching the number of content slides.
    pub fn title_style(&self) -> TitleStyle {
        TitleStyle::for_content_count(self.content_count())
    }
}

/// Short description of a deck shown on its title slide.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TopicSummary {
    /// One-paragraph summary.
    pub summary: String,

    /// Headline points covered by the deck.
    #[serde(default)]
    pub key_points: Vec<String>,
}

impl TopicSummary {
    /// Build the standard summary for a deck.
    pub fn for_deck(topic: &str, slide_count: usize) -> Self {
        Self {
            summary: format!(
                "Comprehensive {}-slide presentation about {} with detailed analysis, \
                 real-world applications, and expert insights for professional development \
                 and strategic implementation.",
                slide_count, topic
            ),
            key_points: vec![
                format!("In-depth coverage of {} concepts and principles", topic),
                "Technical implementation details and best practices".to_string(),
                "Real-world applications and industry case studies".to_string(),
                "Performance optimization and strategic recommendations".to_string(),
            ],
        }
    }

    /// Summary used when re-rendering an edited deck.
    pub fn for_edited(topic: &str) -> Self {
        Self {
            summary: format!("Updated presentation for {}", topic),
            key_points: Vec::new(),
        }
    }
}

/// State of the generative-text credential for this process.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum UpstreamStatus {
    /// No credential configured.
    Missing,
    /// Credential present but malformed.
    Invalid,
    /// Credential verified against the live service.
    Valid,
    /// The service rejected the credential (403).
    PermissionDenied,
    /// Quota exhausted (429).
    QuotaExceeded,
    /// The service is down (503).
    ServiceUnavailable,
    /// Any other verification failure.
    Error,
}

impl UpstreamStatus {
    /// Upper-snake name, as reported to clients.
    pub fn as_str(&self) -> &'static str {
        match self {
            UpstreamStatus::Missing => "MISSING",
            UpstreamStatus::Invalid => "INVALID",
            UpstreamStatus::Valid => "VALID",
            UpstreamStatus::PermissionDenied => "PERMISSION_DENIED",
            UpstreamStatus::QuotaExceeded => "QUOTA_EXCEEDED",
            UpstreamStatus::ServiceUnavailable => "SERVICE_UNAVAILABLE",
            UpstreamStatus::Error => "ERROR",
        }
    }

    /// Map an HTTP status from the service to a credential status.
    pub fn from_http_status(status: u16) -> Self {
        match status {
            403 => UpstreamStatus::PermissionDenied,
            429 => UpstreamStatus::QuotaExceeded,
            503 => UpstreamStatus::ServiceUnavailable,
            _ => UpstreamStatus::Error,
        }
    }
}

impl fmt::Display for UpstreamStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Which path produced a deck.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GenerationMethod {
    /// Slides came from the generative service.
    Generated,
    /// The service was tried but its output was unusable.
    FallbackAfterGeneration,
    /// The service was never usable for this process.
    FallbackUnavailable(UpstreamStatus),
}

impl fmt::Display for GenerationMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            GenerationMethod::Generated => f.write_str("GEMINI_AI_SUCCESS"),
            GenerationMethod::FallbackAfterGeneration => {
                f.write_str("HIGH_QUALITY_FALLBACK_AFTER_GEMINI")
            }
            GenerationMethod::FallbackUnavailable(status) => {
                write!(f, "HIGH_QUALITY_FALLBACK_{}", status)
            }
        }
    }
}

impl Serialize for GenerationMethod {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

/// A finished deck plus how it was produced.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Deck {
    /// Slides in order; index 0 is the title slide.
    pub slides: Vec<Slide>,

    /// Which path produced the slides.
    pub generation_method: GenerationMethod,

    /// Category the topic was classified into.
    pub topic_category: TopicCategory,

    /// Summary shown on the title slide.
    pub topic_summary: TopicSummary,
}

impl Deck {
    /// Number of content slides.
    pub fn content_count(&self) -> usize {
        self.slides.iter().filter(|s| !s.is_title()).count()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_request_rejects_out_of_range_counts() {
        assert!(DeckRequest::new("Rust", 2, Detail::Standard).is_err());
        assert!(DeckRequest::new("Rust", 21, Detail::Standard).is_err());
        assert!(DeckRequest::new("Rust", 3, Detail::Standard).is_ok());
        assert!(DeckRequest::new("Rust", 20, Detail::Standard).is_ok());
    }

    #[test]
    fn test_request_trims_topic() {
        let request = DeckRequest::new("  urban beekeeping \n", 5, Detail::Standard).unwrap();
        assert_eq!(request.topic, "urban beekeeping");
        assert_eq!(request.content_count(), 4);

        let err = DeckRequest::new("   ", 5, Detail::Standard).unwrap_err();
        assert!(matches!(err, Error::InvalidInput(_)));
    }

    #[test]
    fn test_title_style_threshold() {
        assert_eq!(TitleStyle::for_content_count(10), TitleStyle::Short);
        assert_eq!(TitleStyle::for_content_count(11), TitleStyle::Descriptive);
    }

    #[test]
    fn test_slide_serializes_camel_case() {
        let json = serde_json::to_value(Slide::title("Rust")).unwrap();
        assert_eq!(json["slideType"], "title");
        assert_eq!(json["editable"], false);
        assert!(json["content"].is_null());

        let json = serde_json::to_value(Slide::content("A", vec!["b".to_string()])).unwrap();
        assert_eq!(json["slideType"], "content");
        assert_eq!(json["content"][0], "b");
    }

    #[test]
    fn test_generation_method_names() {
        assert_eq!(GenerationMethod::Generated.to_string(), "GEMINI_AI_SUCCESS");
        assert_eq!(
            GenerationMethod::FallbackUnavailable(UpstreamStatus::Missing).to_string(),
            "HIGH_QUALITY_FALLBACK_MISSING"
        );
        let json = serde_json::to_value(GenerationMethod::FallbackAfterGeneration).unwrap();
        assert_eq!(json, "HIGH_QUALITY_FALLBACK_AFTER_GEMINI");
    }

    #[test]
    fn test_upstream_status_from_http() {
        assert_eq!(UpstreamStatus::from_http_status(403), UpstreamStatus::PermissionDenied);
        assert_eq!(UpstreamStatus::from_http_status(429), UpstreamStatus::QuotaExceeded);
        assert_eq!(UpstreamStatus::from_http_status(503), UpstreamStatus::ServiceUnavailable);
        assert_eq!(UpstreamStatus::from_http_status(500), UpstreamStatus::Error);
    }
}
