// Error types and user-facing error messages
//
// `GenerationError` and `CatalogError` are typed so callers can branch on
// them (the generation client retries only transient variants). The helpers
// at the bottom turn configuration failures into actionable messages for
// the terminal host.

use anyhow::{Context, Result};
use std::fmt;
use std::time::Duration;

use crate::catalog::EmotionLabel;

/// Stable codes for generation failures, used in logs and metrics labels
pub mod error_codes {
    pub const MISSING_CREDENTIAL: &str = "MISSING_CREDENTIAL";
    pub const WARMING_UP: &str = "WARMING_UP";
    pub const TIMEOUT: &str = "TIMEOUT";
    pub const HTTP_STATUS: &str = "HTTP_STATUS";
    pub const MALFORMED_PAYLOAD: &str = "MALFORMED_PAYLOAD";
    pub const TRANSPORT: &str = "TRANSPORT";
}

/// Failure of a single call to the generation endpoint
#[derive(Debug, thiserror::Error)]
pub enum GenerationError {
    /// No credential configured; no request was sent
    #[error("[{}] no generation credential configured", error_codes::MISSING_CREDENTIAL)]
    MissingCredential,

    /// HTTP 503: the hosted model is still loading
    #[error("[{}] generation service is warming up (HTTP 503)", error_codes::WARMING_UP)]
    WarmingUp,

    #[error("[{}] request timed out after {:?}", error_codes::TIMEOUT, .0)]
    Timeout(Duration),

    /// Any other non-success status
    #[error("[{}] unexpected status {status}: {body}", error_codes::HTTP_STATUS)]
    Status { status: u16, body: String },

    #[error("[{}] malformed response payload: {}", error_codes::MALFORMED_PAYLOAD, .0)]
    MalformedPayload(String),

    #[error("[{}] transport error: {}", error_codes::TRANSPORT, .0)]
    Transport(String),
}

impl GenerationError {
    pub fn code(&self) -> &'static str {
        match self {
            GenerationError::MissingCredential => error_codes::MISSING_CREDENTIAL,
            GenerationError::WarmingUp => error_codes::WARMING_UP,
            GenerationError::Timeout(_) => error_codes::TIMEOUT,
            GenerationError::Status { .. } => error_codes::HTTP_STATUS,
            GenerationError::MalformedPayload(_) => error_codes::MALFORMED_PAYLOAD,
            GenerationError::Transport(_) => error_codes::TRANSPORT,
        }
    }

    /// Only warm-up and timeout failures are worth another attempt
    pub fn is_transient(&self) -> bool {
        matches!(self, GenerationError::WarmingUp | GenerationError::Timeout(_))
    }
}

/// Failure to load or validate a pattern catalog
#[derive(Debug, thiserror::Error)]
pub enum CatalogError {
    #[error("failed to read catalog file {path}: {source}")]
    Read {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse catalog: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("invalid crisis pattern '{pattern}': {source}")]
    InvalidPattern {
        pattern: String,
        #[source]
        source: regex::Error,
    },

    #[error("catalog text '{0}' must not be empty")]
    EmptyText(&'static str),

    #[error("emotion '{0}' is listed more than once")]
    DuplicateEmotion(EmotionLabel),
}

/// Wrap an error with user-friendly context
pub trait UserFriendlyError {
    /// Add user-friendly context with a suggestion
    fn user_context_with_suggestion(self, problem: &str, suggestion: &str) -> Self;
}

impl<T> UserFriendlyError for Result<T> {
    fn user_context_with_suggestion(self, problem: &str, suggestion: &str) -> Self {
        self.with_context(|| wrap_error_with_suggestion(problem, suggestion))
    }
}

/// Format a config parse error with helpful suggestions
pub fn config_parse_error(path: &str, error: &str) -> String {
    format!(
        "Failed to load config file {}\n\n\
        \x1b[1;33mError:\x1b[0m {}\n\n\
        \x1b[1;32mTry:\x1b[0m\n\
        1. Check config file syntax:\n\
           \x1b[36mcat {}\x1b[0m\n\n\
        2. Regenerate the defaults:\n\
           \x1b[36msafespace init-config --force\x1b[0m\n\n\
        3. Common mistakes:\n\
           • Missing quotes around strings\n\
           • Unknown crisis region (use \"us\" or \"india\")\n\
           • Negative numbers for timeouts or attempts",
        path, error, path
    )
}

/// Format a catalog load error with helpful suggestions
pub fn catalog_load_error(path: &str, error: &CatalogError) -> String {
    format!(
        "Failed to load pattern catalog {}\n\n\
        \x1b[1;33mError:\x1b[0m {}\n\n\
        \x1b[1;32mTry:\x1b[0m\n\
        1. Validate the JSON:\n\
           \x1b[36mpython3 -m json.tool {}\x1b[0m\n\n\
        2. Remove `catalog_path` from the config to use the built-in catalog",
        path, error, path
    )
}

/// Wrap a generic error with a suggestion
pub fn wrap_error_with_suggestion(error: impl fmt::Display, suggestion: &str) -> String {
    format!("{}\n\n\x1b[1;33mSuggestion:\x1b[0m {}", error, suggestion)
}
