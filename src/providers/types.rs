// Wire types for the text generation endpoint

use serde::{Deserialize, Serialize};

use crate::config::GenerationSettings;

/// Request body: `{"inputs": ..., "parameters": {...}}`
#[derive(Debug, Clone, Serialize)]
pub struct GenerationRequest<'a> {
    pub inputs: &'a str,
    pub parameters: GenerationParameters,
}

#[derive(Debug, Clone, Copy, Serialize)]
pub struct GenerationParameters {
    pub max_new_tokens: u32,
    pub temperature: f32,
    pub do_sample: bool,

    /// Always false: the prompt should not be echoed back
    pub return_full_text: bool,
}

impl GenerationParameters {
    pub fn from_settings(settings: &GenerationSettings) -> Self {
        Self {
            max_new_tokens: settings.max_new_tokens,
            temperature: settings.temperature,
            do_sample: true,
            return_full_text: false,
        }
    }
}

/// One element of the response array
#[derive(Debug, Clone, Deserialize)]
pub struct GeneratedText {
    pub generated_text: String,
}

/// Quality gate for a raw completion.
///
/// Strips an echoed prompt prefix, trims, and keeps the text only if it is
/// longer than `min_chars` characters.
pub fn accept_completion(prompt: &str, raw: &str, min_chars: usize) -> Option<String> {
    let text = raw.strip_prefix(prompt).unwrap_or(raw).trim();

    if text.chars().count() > min_chars {
        Some(text.to_string())
    } else {
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_request_serialization() {
        let settings = GenerationSettings::default();
        let request = GenerationRequest {
            inputs: "hello",
            parameters: GenerationParameters::from_settings(&settings),
        };

        let json = serde_json::to_value(&request).unwrap();
        assert_eq!(json["inputs"], "hello");
        assert_eq!(json["parameters"]["max_new_tokens"], 150);
        assert_eq!(json["parameters"]["return_full_text"], false);
        assert_eq!(json["parameters"]["do_sample"], true);
    }

    #[test]
    fn test_accept_strips_echoed_prompt() {
        let prompt = "User: hi\nTherapist:";
        let raw = "User: hi\nTherapist: It's good to hear from you today.";
        assert_eq!(
            accept_completion(prompt, raw, 10).as_deref(),
            Some("It's good to hear from you today.")
        );
    }

    #[test]
    fn test_accept_rejects_degenerate_output() {
        let prompt = "User: hi\nTherapist:";
        assert!(accept_completion(prompt, prompt, 10).is_none());
        assert!(accept_completion(prompt, "   ", 10).is_none());
        assert!(accept_completion(prompt, "ok", 10).is_none());
        // Exactly at the threshold is still rejected
        assert!(accept_completion(prompt, "0123456789", 10).is_none());
        assert!(accept_completion(prompt, "0123456789a", 10).is_some());
    }
}
