// Configuration structs

use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use std::time::Duration;

use crate::crisis::HotlineRegion;

pub const DEFAULT_ENDPOINT: &str =
    "https://api-inference.huggingface.co/models/microsoft/DialoGPT-medium";

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    pub generation: GenerationSettings,
    pub crisis: CrisisSettings,
    pub server: ServerSettings,

    /// JSON pattern catalog to use instead of the built-in tables
    #[serde(skip_serializing_if = "Option::is_none")]
    pub catalog_path: Option<PathBuf>,
}

/// External generation client settings
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct GenerationSettings {
    pub endpoint: String,

    /// Bearer token; absent means rule-based mode only
    #[serde(skip_serializing_if = "Option::is_none")]
    pub api_token: Option<String>,

    /// Per-attempt request timeout
    pub timeout_secs: u64,

    /// Total attempts per call (1 initial + retries)
    pub max_attempts: u32,

    /// Sleep before retrying after HTTP 503
    pub warmup_backoff_ms: u64,

    /// Sleep before retrying after a timeout
    pub timeout_backoff_ms: u64,

    /// Completions this short or shorter are rejected
    pub min_response_chars: usize,

    pub max_new_tokens: u32,
    pub temperature: f32,

    /// History messages embedded in the prompt (0 disables)
    pub context_turns: usize,
}

impl Default for GenerationSettings {
    fn default() -> Self {
        Self {
            endpoint: DEFAULT_ENDPOINT.to_string(),
            api_token: None,
            timeout_secs: 10,
            max_attempts: 3,
            warmup_backoff_ms: 2000,
            timeout_backoff_ms: 1000,
            min_response_chars: 10,
            max_new_tokens: 150,
            temperature: 0.7,
            context_turns: 0,
        }
    }
}

impl GenerationSettings {
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }

    /// The credential, if one is configured and non-blank
    pub fn credential(&self) -> Option<&str> {
        self.api_token
            .as_deref()
            .map(str::trim)
            .filter(|token| !token.is_empty())
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct CrisisSettings {
    pub region: HotlineRegion,
}

/// HTTP host settings
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ServerSettings {
    pub bind_address: String,
    pub max_sessions: usize,
    pub session_timeout_minutes: u64,
}

impl Default for ServerSettings {
    fn default() -> Self {
        Self {
            bind_address: "127.0.0.1:8000".to_string(),
            max_sessions: 100,
            session_timeout_minutes: 30,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_blank_token_is_no_credential() {
        let mut settings = GenerationSettings::default();
        assert!(settings.credential().is_none());

        settings.api_token = Some("   ".to_string());
        assert!(settings.credential().is_none());

        settings.api_token = Some(" hf_abc ".to_string());
        assert_eq!(settings.credential(), Some("hf_abc"));
    }

    #[test]
    fn test_defaults() {
        let settings = Settings::default();
        assert_eq!(settings.generation.max_attempts, 3);
        assert_eq!(settings.generation.timeout(), Duration::from_secs(10));
        assert_eq!(settings.crisis.region, HotlineRegion::Us);
        assert_eq!(settings.server.bind_address, "127.0.0.1:8000");
    }
}
