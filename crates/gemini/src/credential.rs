//! API key validation.

use deckgen_core::UpstreamStatus;
use std::fmt;

/// Placeholder value shipped in sample `.env` files.
const PLACEHOLDER: &str = "GEMINI_API_KEY";

const KEY_PREFIX: &str = "AIza";

const MIN_KEY_LEN: usize = 30;

/// A well-formed Gemini API key. Never printed in full.
#[derive(Clone, PartialEq, Eq)]
pub struct Credential(String);

impl Credential {
    /// Validate a raw key.
    ///
    /// An unset or empty value is `Missing`. A value that is the placeholder,
    /// too short, or lacks the `AIza` prefix after trimming is `Invalid`.
    pub fn parse(raw: Option<&str>) -> Result<Self, UpstreamStatus> {
        let raw = match raw {
            Some(raw) if !raw.is_empty() => raw,
            _ => return Err(UpstreamStatus::Missing),
        };

        let key = raw.trim();
        if key.is_empty() || key == PLACEHOLDER || key.len() < MIN_KEY_LEN || !key.starts_with(KEY_PREFIX)
        {
            return Err(UpstreamStatus::Invalid);
        }
        Ok(Self(key.to_string()))
    }

    pub fn expose(&self) -> &str {
        &self.0
    }
}

impl fmt::Debug for Credential {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Credential({}…)", &self.0[..KEY_PREFIX.len()])
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const GOOD_KEY: &str = "AIzaSyA-0123456789abcdefghijklmnopqr";

    #[test]
    fn test_missing() {
        assert_eq!(Credential::parse(None), Err(UpstreamStatus::Missing));
        assert_eq!(Credential::parse(Some("")), Err(UpstreamStatus::Missing));
    }

    #[test]
    fn test_invalid_formats() {
        for raw in ["   ", "GEMINI_API_KEY", "AIzaShort", "sk-0123456789abcdefghijklmnopqrstuvwxyz"] {
            assert_eq!(Credential::parse(Some(raw)), Err(UpstreamStatus::Invalid), "{}", raw);
        }
    }

    #[test]
    fn test_valid_key_is_trimmed() {
        let credential = Credential::parse(Some(&format!("  {}\n", GOOD_KEY))).unwrap();
        assert_eq!(credential.expose(), GOOD_KEY);
        assert_eq!(format!("{:?}", credential), "Credential(AIza…)");
    }
}
