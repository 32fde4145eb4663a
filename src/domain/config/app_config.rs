//! Application configuration value object

use serde::{Deserialize, Serialize};

/// Default base URL of the coach service
pub const DEFAULT_SERVICE_URL: &str = "http://localhost:8000";

/// Application configuration.
/// All fields are optional to support partial configs and merging.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AppConfig {
    /// Base URL of the coach service
    pub service_url: Option<String>,
    /// API key for the remote speech recognizer; live transcription is
    /// unavailable without it
    pub transcribe_api_key: Option<String>,
    /// Play start/stop tones around recording
    pub audio_cues: Option<bool>,
}

impl AppConfig {
    /// Create config with default values
    pub fn defaults() -> Self {
        Self {
            service_url: Some(DEFAULT_SERVICE_URL.to_string()),
            transcribe_api_key: None,
            audio_cues: Some(false),
        }
    }

    /// Create an empty config (all None)
    pub fn empty() -> Self {
        Self::default()
    }

    /// Merge this config with another, where other takes precedence.
    /// Only non-None values from other will override this.
    pub fn merge(self, other: Self) -> Self {
        Self {
            service_url: other.service_url.or(self.service_url),
            transcribe_api_key: other.transcribe_api_key.or(self.transcribe_api_key),
            audio_cues: other.audio_cues.or(self.audio_cues),
        }
    }

    /// Get the service URL, or the default if not set
    pub fn service_url_or_default(&self) -> String {
        self.service_url
            .clone()
            .unwrap_or_else(|| DEFAULT_SERVICE_URL.to_string())
    }

    /// Get the audio cues setting, or false if not set
    pub fn audio_cues_or_default(&self) -> bool {
        self.audio_cues.unwrap_or(false)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_set_service_url() {
        let config = AppConfig::defaults();
        assert_eq!(config.service_url.as_deref(), Some(DEFAULT_SERVICE_URL));
        assert_eq!(config.audio_cues, Some(false));
        assert!(config.transcribe_api_key.is_none());
    }

    #[test]
    fn merge_prefers_other() {
        let base = AppConfig {
            service_url: Some("http://base".to_string()),
            transcribe_api_key: Some("base-key".to_string()),
            audio_cues: Some(false),
        };
        let other = AppConfig {
            service_url: Some("http://other".to_string()),
            transcribe_api_key: None,
            audio_cues: Some(true),
        };

        let merged = base.merge(other);
        assert_eq!(merged.service_url.as_deref(), Some("http://other"));
        assert_eq!(merged.transcribe_api_key.as_deref(), Some("base-key"));
        assert_eq!(merged.audio_cues, Some(true));
    }

    #[test]
    fn accessors_fall_back_to_defaults() {
        let config = AppConfig::empty();
        assert_eq!(config.service_url_or_default(), DEFAULT_SERVICE_URL);
        assert!(!config.audio_cues_or_default());
    }
}
