//! Gemini `generateContent` client.

use crate::credential::Credential;
use crate::error::{GeminiError, Result};
use async_trait::async_trait;
use deckgen_core::{Capability, Sampling, TextGenerator, UpstreamStatus};
use log::{debug, info, warn};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use std::time::Duration;

/// Gemini REST base URL.
pub const GEMINI_API_BASE_URL: &str = "https://generativelanguage.googleapis.com/v1beta";

pub const DEFAULT_MODEL: &str = "gemini-1.5-flash";

pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(60);

/// Header carrying the API key, so it never appears in a URL.
const API_KEY_HEADER: &str = "x-goog-api-key";

/// Prompt sent once at startup to prove the key works.
const PROBE_PROMPT: &str = "Generate exactly 3 words about data mining";

/// Connection settings for [`GeminiClient`].
#[derive(Debug, Clone)]
pub struct GeminiConfig {
    pub base_url: String,
    pub model: String,
    pub timeout: Duration,
}

impl Default for GeminiConfig {
    fn default() -> Self {
        Self {
            base_url: GEMINI_API_BASE_URL.to_string(),
            model: DEFAULT_MODEL.to_string(),
            timeout: DEFAULT_TIMEOUT,
        }
    }
}

impl GeminiConfig {
    /// Override the REST base URL.
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    pub fn with_model(mut self, model: impl Into<String>) -> Self {
        self.model = model.into();
        self
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    fn endpoint(&self) -> String {
        let model = self.model.trim_start_matches("models/");
        format!(
            "{}/models/{}:generateContent",
            self.base_url.trim_end_matches('/'),
            model
        )
    }
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct GenerateRequest<'a> {
    contents: [Content<'a>; 1],
    generation_config: &'a Sampling,
}

#[derive(Debug, Serialize)]
struct Content<'a> {
    role: &'static str,
    parts: [Part<'a>; 1],
}

#[derive(Debug, Serialize)]
struct Part<'a> {
    text: &'a str,
}

impl<'a> GenerateRequest<'a> {
    fn new(prompt: &'a str, sampling: &'a Sampling) -> Self {
        Self {
            contents: [Content {
                role: "user",
                parts: [Part { text: prompt }],
            }],
            generation_config: sampling,
        }
    }
}

#[derive(Debug, Default, Deserialize)]
struct GenerateResponse {
    #[serde(default)]
    candidates: Vec<Candidate>,
}

#[derive(Debug, Deserialize)]
struct Candidate {
    content: Option<CandidateContent>,
}

#[derive(Debug, Deserialize)]
struct CandidateContent {
    #[serde(default)]
    parts: Vec<ResponsePart>,
}

#[derive(Debug, Deserialize)]
struct ResponsePart {
    text: Option<String>,
}

impl GenerateResponse {
    /// Concatenated text of the first candidate.
    fn text(&self) -> Option<String> {
        let content = self.candidates.first()?.content.as_ref()?;
        let text: String = content
            .parts
            .iter()
            .filter_map(|part| part.text.as_deref())
            .collect();
        if text.trim().is_empty() {
            None
        } else {
            Some(text)
        }
    }
}

/// Client for Gemini text generation.
#[derive(Debug, Clone)]
pub struct GeminiClient {
    http: reqwest::Client,
    credential: Credential,
    config: GeminiConfig,
}

impl GeminiClient {
    pub fn new(credential: Credential, config: GeminiConfig) -> Result<Self> {
        let http = reqwest::Client::builder().timeout(config.timeout).build()?;
        Ok(Self {
            http,
            credential,
            config,
        })
    }

    /// Send one prompt and return the generated text.
    pub async fn generate_text(&self, prompt: &str, sampling: &Sampling) -> Result<String> {
        let body = GenerateRequest::new(prompt, sampling);
        debug!(
            "POST {} ({} prompt chars)",
            self.config.endpoint(),
            prompt.len()
        );

        let response = self
            .http
            .post(self.config.endpoint())
            .header(API_KEY_HEADER, self.credential.expose())
            .json(&body)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let message = response.text().await.unwrap_or_default();
            return Err(GeminiError::Status {
                status: status.as_u16(),
                message,
            });
        }

        let text = response.text().await?;
        let parsed: GenerateResponse =
            serde_json::from_str(&text).map_err(|e| GeminiError::Payload(e.to_string()))?;
        parsed.text().ok_or(GeminiError::EmptyResponse)
    }

    /// Run the startup probe, returning the credential status it implies.
    pub async fn verify(&self) -> UpstreamStatus {
        match self.generate_text(PROBE_PROMPT, &Sampling::default()).await {
            Ok(text) => {
                info!("Gemini verified, probe answered {:?}", text.trim());
                UpstreamStatus::Valid
            }
            Err(e) => {
                let status = e.upstream_status();
                warn!("Gemini verification failed ({}): {}", status, e);
                status
            }
        }
    }
}

#[async_trait]
impl TextGenerator for GeminiClient {
    async fn generate(&self, prompt: &str, sampling: &Sampling) -> deckgen_core::Result<String> {
        Ok(self.generate_text(prompt, sampling).await?)
    }
}

/// Validate the key, optionally probe the service, and build the capability
/// the orchestrator runs with.
pub async fn bootstrap_capability(
    raw_key: Option<&str>,
    config: GeminiConfig,
    verify: bool,
) -> Capability {
    let credential = match Credential::parse(raw_key) {
        Ok(credential) => credential,
        Err(status) => {
            warn!("Gemini API key {}, generation disabled", status);
            return Capability::unavailable(status);
        }
    };

    let client = match GeminiClient::new(credential, config) {
        Ok(client) => client,
        Err(e) => {
            warn!("Could not build HTTP client: {}", e);
            return Capability::unavailable(UpstreamStatus::Error);
        }
    };

    if verify {
        let status = client.verify().await;
        if status != UpstreamStatus::Valid {
            return Capability::unavailable(status);
        }
    } else {
        info!("Skipping Gemini verification");
    }

    Capability::verified(Arc::new(client))
}
