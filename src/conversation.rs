// Conversation log for one session
//
// Append-only: messages are never edited or removed individually; `reset`
// replaces the whole log with an empty one. Nothing here is persisted.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::catalog::EmotionSet;
use crate::pipeline::{ResponseResult, ResponseTool};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    User,
    Assistant,
}

/// One immutable turn entry
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Message {
    pub role: Role,
    pub text: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub emotions: Option<EmotionSet>,

    /// Which pipeline path produced an assistant message
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tool: Option<ResponseTool>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub timestamp: Option<DateTime<Utc>>,
}

impl Message {
    pub fn user(text: impl Into<String>) -> Self {
        Self {
            role: Role::User,
            text: text.into(),
            emotions: None,
            tool: None,
            timestamp: Some(Utc::now()),
        }
    }

    /// Assistant message carrying the result's text and tool tag
    pub fn assistant(result: &ResponseResult) -> Self {
        Self {
            role: Role::Assistant,
            text: result.response.clone(),
            emotions: None,
            tool: Some(result.tool),
            timestamp: Some(Utc::now()),
        }
    }

    pub fn with_emotions(mut self, emotions: EmotionSet) -> Self {
        self.emotions = Some(emotions);
        self
    }
}

impl From<&str> for Message {
    fn from(text: &str) -> Self {
        Message::user(text)
    }
}

/// Ordered, append-only record of a session's turns
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Conversation {
    messages: Vec<Message>,
}

impl Conversation {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a message; insertion order is the conversation order
    pub fn push(&mut self, message: Message) {
        self.messages.push(message);
    }

    /// Append a user message and the assistant reply to it
    pub fn record_turn(&mut self, user: impl Into<Message>, result: &ResponseResult) {
        self.push(user.into());
        self.push(Message::assistant(result));
    }

    /// Replace the whole log with an empty one
    pub fn reset(&mut self) {
        self.messages = Vec::new();
    }

    pub fn messages(&self) -> &[Message] {
        &self.messages
    }

    /// The `n` most recent messages, oldest first
    pub fn recent(&self, n: usize) -> &[Message] {
        let start = self.messages.len().saturating_sub(n);
        &self.messages[start..]
    }

    pub fn last(&self) -> Option<&Message> {
        self.messages.last()
    }

    pub fn is_empty(&self) -> bool {
        self.messages.is_empty()
    }

    pub fn message_count(&self) -> usize {
        self.messages.len()
    }

    /// Number of complete turns (user + assistant pairs)
    pub fn turn_count(&self) -> usize {
        self.messages.len() / 2
    }
}
