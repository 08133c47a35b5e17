//! Service configuration from the environment.

use deckgen_gemini::{GeminiConfig, DEFAULT_MODEL, GEMINI_API_BASE_URL};
use log::debug;
use std::env;
use std::path::PathBuf;
use std::time::Duration;

pub const ENV_API_KEY: &str = "GEMINI_API_KEY";
pub const ENV_MODEL: &str = "DECKGEN_MODEL";
pub const ENV_BASE_URL: &str = "DECKGEN_GEMINI_BASE_URL";
pub const ENV_DOWNLOADS_DIR: &str = "DECKGEN_DOWNLOADS_DIR";
pub const ENV_TIMEOUT_SECS: &str = "DECKGEN_TIMEOUT_SECS";
pub const ENV_SKIP_VERIFY: &str = "DECKGEN_SKIP_VERIFY";

const DEFAULT_DOWNLOADS_DIR: &str = "downloads";
const DEFAULT_TIMEOUT_SECS: u64 = 60;

/// Runtime settings for the deck service.
#[derive(Debug, Clone)]
pub struct Config {
    /// Raw API key, validated at bootstrap.
    pub api_key: Option<String>,
    pub model: String,
    pub base_url: String,
    /// Directory rendered decks are written to.
    pub downloads_dir: PathBuf,
    /// Bound on a single generation call.
    pub timeout: Duration,
    /// Whether to probe the service at startup.
    pub verify: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            api_key: None,
            model: DEFAULT_MODEL.to_string(),
            base_url: GEMINI_API_BASE_URL.to_string(),
            downloads_dir: PathBuf::from(DEFAULT_DOWNLOADS_DIR),
            timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
            verify: true,
        }
    }
}

impl Config {
    /// Load from the process environment, reading a `.env` file first if
    /// one exists.
    pub fn load() -> Self {
        if let Ok(path) = dotenv::dotenv() {
            debug!("Loaded environment from {}", path.display());
        }
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Build from any key lookup. Unparseable values fall back to defaults.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let defaults = Self::default();
        let timeout_secs = lookup(ENV_TIMEOUT_SECS)
            .and_then(|v| v.trim().parse::<u64>().ok())
            .filter(|secs| *secs > 0)
            .unwrap_or(DEFAULT_TIMEOUT_SECS);
        let skip_verify = lookup(ENV_SKIP_VERIFY)
            .map(|v| matches!(v.trim().to_ascii_lowercase().as_str(), "1" | "true" | "yes"))
            .unwrap_or(false);

        Self {
            api_key: lookup(ENV_API_KEY),
            model: lookup(ENV_MODEL).unwrap_or(defaults.model),
            base_url: lookup(ENV_BASE_URL).unwrap_or(defaults.base_url),
            downloads_dir: lookup(ENV_DOWNLOADS_DIR)
                .map(PathBuf::from)
                .unwrap_or(defaults.downloads_dir),
            timeout: Duration::from_secs(timeout_secs),
            verify: !skip_verify,
        }
    }

    /// Settings for the Gemini client.
    pub fn gemini(&self) -> GeminiConfig {
        GeminiConfig::default()
            .with_base_url(&self.base_url)
            .with_model(&self.model)
            .with_timeout(self.timeout)
    }
}
