// External text generation
//
// The orchestrator talks to a generation backend only through the
// `TextGenerator` trait, so tests and hosts can inject fakes. The one real
// backend is the Hugging Face inference endpoint client.

use async_trait::async_trait;

pub mod huggingface;
pub mod prompt;
pub mod retry;
pub mod types;

pub use huggingface::HuggingFaceClient;
pub use prompt::{build_prompt, PERSONA_PREAMBLE};
pub use retry::{with_retry, RetryPolicy};
pub use types::{accept_completion, GeneratedText, GenerationParameters, GenerationRequest};

/// Trait for text generation backends
///
/// Implementations never fail: every failure resolves to `None`, meaning
/// "no usable generation", and the caller falls back to rule-based replies.
#[async_trait]
pub trait TextGenerator: Send + Sync {
    /// Generate a completion for the prompt, or `None` if nothing usable came back
    async fn generate(&self, prompt: &str) -> Option<String>;

    /// Backend name for logs (e.g., "huggingface")
    fn name(&self) -> &str;

    /// Whether the backend is configured to make calls at all
    fn is_enabled(&self) -> bool {
        true
    }
}
