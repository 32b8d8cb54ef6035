// Hugging Face inference endpoint client

use anyhow::{Context, Result};
use async_trait::async_trait;
use reqwest::{Client, StatusCode};
use std::time::Duration;

use super::retry::{with_retry, RetryPolicy};
use super::types::{accept_completion, GeneratedText, GenerationParameters, GenerationRequest};
use super::TextGenerator;
use crate::config::GenerationSettings;
use crate::errors::GenerationError;

/// Client for a hosted text-generation model.
///
/// Owns the per-request timeout, the retry budget for warm-up (503) and
/// timeout failures, and the quality gate on completions. Without a
/// credential it never touches the network.
#[derive(Clone)]
pub struct HuggingFaceClient {
    client: Client,
    endpoint: String,
    api_token: Option<String>,
    timeout: Duration,
    policy: RetryPolicy,
    parameters: GenerationParameters,
    min_response_chars: usize,
}

impl HuggingFaceClient {
    pub fn new(settings: &GenerationSettings) -> Result<Self> {
        let client = Client::builder()
            .timeout(settings.timeout())
            .build()
            .context("Failed to create HTTP client")?;

        Ok(Self {
            client,
            endpoint: settings.endpoint.clone(),
            api_token: settings.credential().map(str::to_string),
            timeout: settings.timeout(),
            policy: RetryPolicy::from_settings(settings),
            parameters: GenerationParameters::from_settings(settings),
            min_response_chars: settings.min_response_chars,
        })
    }

    /// Generate with retries, reporting why nothing came back.
    ///
    /// `Ok(None)` means the service answered but the completion failed the
    /// quality gate; that case is never retried.
    pub async fn try_generate(&self, prompt: &str) -> Result<Option<String>, GenerationError> {
        let token = self
            .api_token
            .as_deref()
            .ok_or(GenerationError::MissingCredential)?;

        let raw = with_retry(&self.policy, |attempt| {
            tracing::debug!(attempt, endpoint = %self.endpoint, "Sending generation request");
            self.send_once(token, prompt)
        })
        .await?;

        let accepted = accept_completion(prompt, &raw, self.min_response_chars);
        if accepted.is_none() {
            tracing::info!(
                chars = raw.chars().count(),
                "Rejected degenerate completion"
            );
        }
        Ok(accepted)
    }

    /// Send a single request (no retry)
    async fn send_once(&self, token: &str, prompt: &str) -> Result<String, GenerationError> {
        let request = GenerationRequest {
            inputs: prompt,
            parameters: self.parameters,
        };

        let response = self
            .client
            .post(&self.endpoint)
            .bearer_auth(token)
            .json(&request)
            .send()
            .await
            .map_err(|e| self.transport_error(e))?;

        let status = response.status();

        if status == StatusCode::SERVICE_UNAVAILABLE {
            return Err(GenerationError::WarmingUp);
        }

        if status != StatusCode::OK {
            let body = response.text().await.unwrap_or_default();
            return Err(GenerationError::Status {
                status: status.as_u16(),
                body,
            });
        }

        let body = response.text().await.map_err(|e| self.transport_error(e))?;
        tracing::debug!("Received generation response: {}", body);

        let completions: Vec<GeneratedText> = serde_json::from_str(&body)
            .map_err(|e| GenerationError::MalformedPayload(e.to_string()))?;

        completions
            .into_iter()
            .next()
            .map(|completion| completion.generated_text)
            .ok_or_else(|| GenerationError::MalformedPayload("empty completion array".to_string()))
    }

    fn transport_error(&self, error: reqwest::Error) -> GenerationError {
        if error.is_timeout() {
            GenerationError::Timeout(self.timeout)
        } else {
            GenerationError::Transport(error.to_string())
        }
    }
}

#[async_trait]
impl TextGenerator for HuggingFaceClient {
    async fn generate(&self, prompt: &str) -> Option<String> {
        match self.try_generate(prompt).await {
            Ok(text) => text,
            Err(GenerationError::MissingCredential) => {
                tracing::debug!("No generation credential, using rule-based replies");
                None
            }
            Err(e) => {
                tracing::warn!(
                    code = e.code(),
                    transient = e.is_transient(),
                    "Generation unavailable: {}",
                    e
                );
                None
            }
        }
    }

    fn name(&self) -> &str {
        "huggingface"
    }

    fn is_enabled(&self) -> bool {
        self.api_token.is_some()
    }
}
