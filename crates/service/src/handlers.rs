//! Transport-agnostic handlers for the deck generator.

use crate::api::{
    GenerateRequest, GenerateResponse, RegenerateRequest, RegenerateResponse, StatusResponse,
    ThemesResponse,
};
use crate::config::Config;
use crate::error::ApiError;
use chrono::Utc;
use deckgen_core::{
    Capability, DeckRequest, Detail, Orchestrator, ThemeDefinition, ThemeSummary, TopicSummary,
    UpstreamStatus,
};
use deckgen_gemini::bootstrap_capability;
use deckgen_pptx::{DeckWriter, OutputKind, RenderedDeck};
use log::{error, info};

/// URL prefix rendered files are served under.
pub const DOWNLOADS_ROUTE: &str = "/downloads";

const FEATURES: &[&str] = &[
    "Gemini text generation with startup verification",
    "Topic-specific content libraries",
    "Deterministic fallback when generation is unavailable",
    "Response parsing with validation and padding",
    "Five visual themes",
    "Edit and re-render without regeneration",
];

/// Generates, renders and re-renders decks.
#[derive(Debug)]
pub struct DeckService {
    orchestrator: Orchestrator,
    writer: DeckWriter,
}

impl DeckService {
    pub fn new(capability: Capability, writer: DeckWriter) -> Self {
        Self {
            orchestrator: Orchestrator::new(capability),
            writer,
        }
    }

    /// Bootstrap the generative capability and output directory from config.
    pub async fn from_config(config: &Config) -> Self {
        let capability =
            bootstrap_capability(config.api_key.as_deref(), config.gemini(), config.verify).await;
        info!("Generative service status: {}", capability.status());
        Self::new(capability, DeckWriter::new(&config.downloads_dir))
    }

    /// Re-run credential verification and swap in the result.
    pub async fn reverify(&self, config: &Config) -> UpstreamStatus {
        let capability = bootstrap_capability(config.api_key.as_deref(), config.gemini(), true).await;
        let status = capability.status();
        self.orchestrator.replace_capability(capability);
        status
    }

    pub fn api_status(&self) -> UpstreamStatus {
        self.orchestrator.capability().status()
    }

    /// Generate a deck and render it.
    pub async fn generate(&self, request: GenerateRequest) -> Result<GenerateResponse, ApiError> {
        let topic = request.topic.as_deref().unwrap_or_default();
        let slide_count = request.slide_count.unwrap_or(0);
        if topic.trim().is_empty() || slide_count == 0 {
            return Err(ApiError::bad_request("Topic and slide count required"));
        }
        let deck_request = DeckRequest::new(topic, slide_count, Detail::from(request.more_info_mode))
            .map_err(|e| ApiError::from_core(e, "Failed to generate presentation"))?;

        info!(
            "Generating {:?} ({} slides)",
            deck_request.topic, deck_request.slide_count
        );
        let deck = self.orchestrator.generate(&deck_request).await;

        let rendered = self
            .writer
            .write(
                &deck.slides,
                request.theme.as_deref(),
                &deck_request.topic,
                &deck.topic_summary.summary,
                OutputKind::Generated { slide_count },
            )
            .map_err(|e| {
                error!("Render failed for {:?}: {}", deck_request.topic, e);
                ApiError::from_core(e, "Failed to generate presentation")
            })?;
        info!("Created {} using {}", rendered.filename, deck.generation_method);

        Ok(GenerateResponse {
            success: true,
            slide_count: deck.slides.len(),
            download_url: download_url(&rendered),
            filename: rendered.filename,
            generation_method: deck.generation_method,
            api_status: self.api_status(),
            topic_category: deck.topic_category,
            topic_summary: deck.topic_summary,
            slides: deck.slides,
        })
    }

    /// Render an edited slide list without generating anything.
    pub fn regenerate_with_edits(
        &self,
        request: RegenerateRequest,
    ) -> Result<RegenerateResponse, ApiError> {
        let slides = match request.slides {
            Some(slides) if !slides.is_empty() => slides,
            _ => return Err(ApiError::bad_request("Valid slides array required")),
        };

        let topic = request
            .topic
            .filter(|topic| !topic.trim().is_empty())
            .unwrap_or_else(|| slides[0].title.clone());
        let summary = request
            .topic_summary
            .unwrap_or_else(|| TopicSummary::for_edited(&topic));

        let rendered = self
            .writer
            .write(
                &slides,
                request.theme.as_deref(),
                &topic,
                &summary.summary,
                OutputKind::Edited,
            )
            .map_err(|e| {
                error!("Re-render failed for {:?}: {}", topic, e);
                ApiError::from_core(e, "Failed to regenerate presentation")
            })?;

        Ok(RegenerateResponse {
            success: true,
            download_url: download_url(&rendered),
            filename: rendered.filename,
        })
    }

    /// List the available themes.
    pub fn themes(&self) -> ThemesResponse {
        ThemesResponse {
            success: true,
            themes: ThemeDefinition::all().iter().map(ThemeSummary::from).collect(),
        }
    }

    /// Service metadata.
    pub fn status(&self) -> StatusResponse {
        let api_status = self.api_status();
        StatusResponse {
            message: "Deck generator",
            api_status,
            recommendation: if api_status == UpstreamStatus::Valid {
                "Optimal generation active"
            } else {
                "Using high-quality fallback system"
            },
            features: FEATURES,
            timestamp: Utc::now(),
        }
    }
}

fn download_url(rendered: &RenderedDeck) -> String {
    format!("{}/{}", DOWNLOADS_ROUTE, rendered.filename)
}
