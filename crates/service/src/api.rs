//! Request and response bodies exchanged with clients.

use chrono::{DateTime, Utc};
use deckgen_core::{
    EditedDeck, GenerationMethod, Slide, ThemeSummary, TopicCategory, TopicSummary, UpstreamStatus,
};
use serde::{Deserialize, Serialize};

/// Body of a generate call.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GenerateRequest {
    #[serde(default)]
    pub topic: Option<String>,
    #[serde(default)]
    pub slide_count: Option<usize>,
    #[serde(default)]
    pub theme: Option<String>,
    #[serde(default)]
    pub more_info_mode: bool,
}

/// Result of a successful generate call.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GenerateResponse {
    pub success: bool,
    pub slides: Vec<Slide>,
    pub slide_count: usize,
    pub download_url: String,
    pub filename: String,
    pub generation_method: GenerationMethod,
    pub api_status: UpstreamStatus,
    pub topic_category: TopicCategory,
    pub topic_summary: TopicSummary,
}

/// Body of a regenerate-with-edits call.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RegenerateRequest {
    #[serde(default)]
    pub slides: Option<Vec<Slide>>,
    #[serde(default)]
    pub theme: Option<String>,
    #[serde(default)]
    pub topic: Option<String>,
    #[serde(default)]
    pub topic_summary: Option<TopicSummary>,
}

impl RegenerateRequest {
    /// Request re-rendering of an edited deck.
    pub fn from_edited(deck: EditedDeck, theme: Option<String>) -> Self {
        Self {
            slides: Some(deck.slides),
            theme,
            topic: Some(deck.topic),
            topic_summary: Some(deck.topic_summary),
        }
    }
}

/// Result of a successful regenerate-with-edits call.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RegenerateResponse {
    pub success: bool,
    pub download_url: String,
    pub filename: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct ThemesResponse {
    pub success: bool,
    pub themes: Vec<ThemeSummary>,
}

/// Service metadata.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct StatusResponse {
    pub message: &'static str,
    pub api_status: UpstreamStatus,
    pub recommendation: &'static str,
    pub features: &'static [&'static str],
    pub timestamp: DateTime<Utc>,
}
