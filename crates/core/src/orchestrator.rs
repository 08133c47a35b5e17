//! Deck orchestration: try the generative service, fall back when needed,
//! and always hand back exactly the requested number of slides.

use crate::classify::classify_topic;
use crate::error::{Error, Result};
use crate::fallback::FallbackEngine;
use crate::parser::{ParseOptions, ResponseParser};
use crate::prompt::{PromptBuilder, Sampling};
use crate::types::{Deck, DeckRequest, GenerationMethod, Slide, TopicCategory, TopicSummary, UpstreamStatus};
use async_trait::async_trait;
use log::{info, warn};
use std::fmt;
use std::sync::{Arc, RwLock};

/// Responses shorter than this many characters are treated as unavailable.
pub const MIN_RESPONSE_CHARS: usize = 500;

/// A generative-text backend.
#[async_trait]
pub trait TextGenerator: Send + Sync {
    /// Complete a prompt, returning the raw text.
    async fn generate(&self, prompt: &str, sampling: &Sampling) -> Result<String>;
}

/// Whether the generative service may be used, decided once at startup.
#[derive(Clone)]
pub struct Capability {
    status: UpstreamStatus,
    generator: Option<Arc<dyn TextGenerator>>,
}

impl Capability {
    /// A verified generator.
    pub fn verified(generator: Arc<dyn TextGenerator>) -> Self {
        Self {
            status: UpstreamStatus::Valid,
            generator: Some(generator),
        }
    }

    /// No usable generator, for the given reason.
    pub fn unavailable(status: UpstreamStatus) -> Self {
        Self {
            status,
            generator: None,
        }
    }

    pub fn status(&self) -> UpstreamStatus {
        self.status
    }

    /// Whether generation will be attempted.
    pub fn is_ready(&self) -> bool {
        self.generator().is_some()
    }

    fn generator(&self) -> Option<&Arc<dyn TextGenerator>> {
        if self.status == UpstreamStatus::Valid {
            self.generator.as_ref()
        } else {
            None
        }
    }
}

impl fmt::Debug for Capability {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Capability")
            .field("status", &self.status)
            .field("generator", &self.generator.is_some())
            .finish()
    }
}

/// Produces decks for validated requests.
#[derive(Debug)]
pub struct Orchestrator {
    capability: RwLock<Capability>,
    fallback: FallbackEngine,
    parser: ResponseParser,
    sampling: Sampling,
}

impl Orchestrator {
    pub fn new(capability: Capability) -> Self {
        Self {
            capability: RwLock::new(capability),
            fallback: FallbackEngine::default(),
            parser: ResponseParser::new(),
            sampling: Sampling::default(),
        }
    }

    /// Snapshot of the current capability.
    pub fn capability(&self) -> Capability {
        self.capability
            .read()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .clone()
    }

    /// Swap in a re-verified capability.
    pub fn replace_capability(&self, capability: Capability) {
        info!("Generative service status is now {}", capability.status());
        *self
            .capability
            .write()
            .unwrap_or_else(|poisoned| poisoned.into_inner()) = capability;
    }

    /// Generate a deck. Never fails: every generator problem ends in the
    /// fallback path.
    pub async fn generate(&self, request: &DeckRequest) -> Deck {
        let topic = request.topic.as_str();
        let category = classify_topic(topic);
        let capability = self.capability();

        let generated = match capability.generator() {
            Some(generator) => match self.attempt(request, category, generator.as_ref()).await {
                Ok(slides) => Some(slides),
                Err(e) => {
                    warn!("Generation for {:?} failed, using fallback: {}", topic, e);
                    None
                }
            },
            None => {
                info!(
                    "Generative service {}, using fallback for {:?}",
                    capability.status(),
                    topic
                );
                None
            }
        };

        let (mut slides, generation_method) = match generated {
            Some(content) => {
                info!("Generated {} content slides for {:?}", content.len(), topic);
                let mut slides = Vec::with_capacity(request.slide_count);
                slides.push(Slide::title(topic));
                slides.extend(content);
                (slides, GenerationMethod::Generated)
            }
            None => {
                let method = if capability.is_ready() {
                    GenerationMethod::FallbackAfterGeneration
                } else {
                    GenerationMethod::FallbackUnavailable(capability.status())
                };
                (
                    self.fallback.deck(topic, request.slide_count, request.detail),
                    method,
                )
            }
        };

        self.normalize_length(&mut slides, request);

        Deck {
            slides,
            generation_method,
            topic_category: category,
            topic_summary: TopicSummary::for_deck(topic, request.slide_count),
        }
    }

    /// One generation attempt: prompt, call, length check, parse, validate.
    async fn attempt(
        &self,
        request: &DeckRequest,
        category: TopicCategory,
        generator: &dyn TextGenerator,
    ) -> Result<Vec<Slide>> {
        let topic = request.topic.as_str();
        let content_count = request.content_count();
        let library = self.fallback.libraries().lookup(topic);

        let prompt = PromptBuilder::new(topic, content_count, category)
            .with_detail(request.detail)
            .with_title_style(request.title_style())
            .build(library);
        let text = generator.generate(&prompt, &self.sampling).await?;

        let chars = text.trim().chars().count();
        if chars < MIN_RESPONSE_CHARS {
            return Err(Error::UpstreamUnavailable(format!(
                "response too short ({} chars)",
                chars
            )));
        }

        let options = ParseOptions {
            expected: content_count,
            title_style: request.title_style(),
        };
        let slides = self.parser.parse(&text, topic, &options, library);

        let needed = content_count.min(3);
        if slides.len() < needed {
            return Err(Error::ParseFailure(format!(
                "parsed {} slides, need at least {}",
                slides.len(),
                needed
            )));
        }
        Ok(slides)
    }

    /// Truncate a long deck or top it up with fallback content slides.
    fn normalize_length(&self, slides: &mut Vec<Slide>, request: &DeckRequest) {
        let target = request.slide_count;
        if slides.len() < target {
            let present = slides.iter().filter(|s| !s.is_title()).count();
            let missing = target - slides.len();
            info!("Topping up {:?} with {} fallback slides", request.topic, missing);
            slides.extend(self.fallback.content_slides(
                &request.topic,
                present,
                missing,
                request.title_style(),
                request.detail,
            ));
        }
        slides.truncate(target);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::Detail;
    use std::sync::atomic::{AtomicUsize, Ordering};

    #[derive(Debug, Default)]
    struct StaticGenerator {
        text: String,
        calls: AtomicUsize,
    }

    impl StaticGenerator {
        fn new(text: impl Into<String>) -> Arc<Self> {
            Arc::new(Self {
                text: text.into(),
                calls: AtomicUsize::new(0),
            })
        }
    }

    #[async_trait]
    impl TextGenerator for StaticGenerator {
        async fn generate(&self, _prompt: &str, _sampling: &Sampling) -> Result<String> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            Ok(self.text.clone())
        }
    }

    #[derive(Default)]
    struct RecordingGenerator {
        prompts: std::sync::Mutex<Vec<String>>,
    }

    #[async_trait]
    impl TextGenerator for RecordingGenerator {
        async fn generate(&self, prompt: &str, _sampling: &Sampling) -> Result<String> {
            self.prompts.lock().unwrap().push(prompt.to_string());
            Err(Error::UpstreamUnavailable("recorded only".to_string()))
        }
    }

    struct FailingGenerator;

    #[async_trait]
    impl TextGenerator for FailingGenerator {
        async fn generate(&self, _prompt: &str, _sampling: &Sampling) -> Result<String> {
            Err(Error::UpstreamUnavailable("HTTP 500".to_string()))
        }
    }

    fn response(titles: &[&str]) -> String {
        let mut text = String::from("Here is the presentation you asked for.\n\n");
        for (i, title) in titles.iter().enumerate() {
            text.push_str(&format!("SLIDE {}: CONTENT\nTitle: {}\n", i + 2, title));
            for n in 0..4 {
                text.push_str(&format!(
                    "• Point {} about {} with concrete figures, named examples and a clear takeaway.\n",
                    n, title
                ));
            }
            text.push('\n');
        }
        text
    }

    #[tokio::test]
    async fn test_unavailable_apriori_deck() {
        let orchestrator = Orchestrator::new(Capability::unavailable(UpstreamStatus::Missing));
        let request = DeckRequest::new("Apriori algorithm", 5, Detail::Standard).unwrap();

        let deck = orchestrator.generate(&request).await;

        assert_eq!(deck.slides.len(), 5);
        assert!(deck.slides[0].is_title());
        assert_eq!(deck.content_count(), 4);
        assert!(deck.slides[1..].iter().all(|s| s.bullets().len() == 4));
        assert_eq!(deck.slides[1].title, "Understanding the Apriori Principle Foundation");
        assert_eq!(
            deck.generation_method,
            GenerationMethod::FallbackUnavailable(UpstreamStatus::Missing)
        );
        assert_eq!(deck.generation_method.to_string(), "HIGH_QUALITY_FALLBACK_MISSING");
        assert_eq!(deck.topic_category, TopicCategory::Technology);
    }

    #[tokio::test]
    async fn test_generated_deck_accepted() {
        let titles = ["Hive Placement on Rooftops", "Seasonal Colony Care", "Selling City Honey", "Neighbour Relations"];
        let generator = StaticGenerator::new(response(&titles));
        let orchestrator = Orchestrator::new(Capability::verified(generator.clone()));
        let request = DeckRequest::new("urban beekeeping", 5, Detail::Standard).unwrap();

        let deck = orchestrator.generate(&request).await;

        assert_eq!(deck.generation_method, GenerationMethod::Generated);
        assert_eq!(deck.slides.len(), 5);
        for (slide, title) in deck.slides[1..].iter().zip(titles) {
            assert_eq!(slide.title, title);
        }
        assert_eq!(generator.calls.load(Ordering::SeqCst), 1);
        assert_eq!(deck.topic_category, TopicCategory::General);
    }

    #[tokio::test]
    async fn test_short_generated_deck_is_topped_up() {
        let titles = ["Ownership and Borrowing", "Traits and Generics", "Async Runtimes Compared"];
        let orchestrator = Orchestrator::new(Capability::verified(StaticGenerator::new(response(&titles))));
        let request = DeckRequest::new("Rust", 6, Detail::Standard).unwrap();

        let deck = orchestrator.generate(&request).await;

        assert_eq!(deck.generation_method, GenerationMethod::Generated);
        assert_eq!(deck.slides.len(), 6);
        assert_eq!(deck.slides[3].title, "Async Runtimes Compared");
        assert_eq!(deck.slides[4].title, "Rust: Performance and Optimization");
        assert_eq!(deck.slides[5].title, "Rust: Advanced Features and Benefits");
    }

    #[tokio::test]
    async fn test_extra_generated_slides_are_dropped() {
        let titles = ["First Generated Slide", "Second Generated Slide", "Third Generated Slide", "Fourth Generated Slide"];
        let orchestrator = Orchestrator::new(Capability::verified(StaticGenerator::new(response(&titles))));
        let request = DeckRequest::new("Rust", 3, Detail::Standard).unwrap();

        let deck = orchestrator.generate(&request).await;

        assert_eq!(deck.slides.len(), 3);
        assert_eq!(deck.slides[2].title, "Second Generated Slide");
    }

    #[tokio::test]
    async fn test_too_few_parsed_slides_falls_back() {
        let titles = ["Only One Slide Parsed", "And Only Two Of Them"];
        let orchestrator = Orchestrator::new(Capability::verified(StaticGenerator::new(response(&titles))));
        let request = DeckRequest::new("Rust", 5, Detail::Standard).unwrap();

        let deck = orchestrator.generate(&request).await;

        assert_eq!(deck.generation_method, GenerationMethod::FallbackAfterGeneration);
        assert_eq!(deck.slides[1].title, "Rust: Introduction and Key Concepts");
        assert_eq!(deck.slides.len(), 5);
    }

    #[tokio::test]
    async fn test_short_response_is_unavailable() {
        let orchestrator = Orchestrator::new(Capability::verified(StaticGenerator::new("Sure!")));
        let request = DeckRequest::new("urban beekeeping", 3, Detail::Standard).unwrap();

        let deck = orchestrator.generate(&request).await;

        assert_eq!(deck.generation_method, GenerationMethod::FallbackAfterGeneration);
        assert_eq!(deck.slides.len(), 3);
        assert_eq!(deck.slides[1].title, "urban beekeeping: Introduction and Key Concepts");
        assert_eq!(deck.slides[2].title, "urban beekeeping: Technical Implementation Details");
        assert!(deck.slides[1..].iter().all(|s| s.bullets().len() == 4));
    }

    #[tokio::test]
    async fn test_generator_error_falls_back() {
        let orchestrator = Orchestrator::new(Capability::verified(Arc::new(FailingGenerator)));
        let request = DeckRequest::new("Rust", 4, Detail::Extended).unwrap();

        let deck = orchestrator.generate(&request).await;

        assert_eq!(deck.generation_method, GenerationMethod::FallbackAfterGeneration);
        assert!(deck.slides[1..].iter().all(|s| s.bullets().len() == 5));
    }

    #[tokio::test]
    async fn test_replace_capability() {
        let generator = StaticGenerator::new(response(&["One Slide", "Two Slide", "Three Slide"]));
        let orchestrator = Orchestrator::new(Capability::unavailable(UpstreamStatus::QuotaExceeded));
        assert!(!orchestrator.capability().is_ready());

        orchestrator.replace_capability(Capability::verified(generator.clone()));
        let request = DeckRequest::new("Rust", 4, Detail::Standard).unwrap();
        let deck = orchestrator.generate(&request).await;

        assert_eq!(generator.calls.load(Ordering::SeqCst), 1);
        assert_eq!(deck.slides.len(), 4);
    }

    #[tokio::test]
    async fn test_prompt_follows_request_title_style() {
        let generator = Arc::new(RecordingGenerator::default());
        let orchestrator = Orchestrator::new(Capability::verified(generator.clone()));

        for count in [5, 15] {
            let request = DeckRequest::new("urban beekeeping", count, Detail::Standard).unwrap();
            orchestrator.generate(&request).await;
        }

        let prompts = generator.prompts.lock().unwrap();
        assert!(prompts[0].contains("creative and engaging"));
        assert!(prompts[1].contains("professional and structured"));
    }
}
