// Session management for concurrent HTTP clients
//
// Sessions are in-memory only and independent of each other. Each one owns a
// Conversation; expired sessions are swept by a background task.

use chrono::{DateTime, Utc};
use dashmap::DashMap;
use std::sync::{Arc, Weak};
use std::time::Duration;
use thiserror::Error;
use tokio::time;
use uuid::Uuid;

use crate::conversation::{Conversation, Message};
use crate::pipeline::ResponseResult;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum SessionError {
    #[error("Maximum session limit reached ({active}/{max})")]
    LimitReached { active: usize, max: usize },

    #[error("Session not found: {0}")]
    NotFound(String),
}

/// Per-session state
#[derive(Debug, Clone)]
pub struct SessionState {
    pub id: String,
    pub conversation: Conversation,
    pub last_activity: DateTime<Utc>,
    pub created_at: DateTime<Utc>,
}

impl SessionState {
    pub fn new() -> Self {
        let now = Utc::now();
        Self {
            id: Uuid::new_v4().to_string(),
            conversation: Conversation::new(),
            last_activity: now,
            created_at: now,
        }
    }

    pub fn touch(&mut self) {
        self.last_activity = Utc::now();
    }

    pub fn is_expired(&self, timeout_minutes: u64) -> bool {
        let elapsed = Utc::now().signed_duration_since(self.last_activity);
        elapsed.num_minutes() >= timeout_minutes as i64
    }
}

impl Default for SessionState {
    fn default() -> Self {
        Self::new()
    }
}

/// Concurrent session manager using DashMap
pub struct SessionManager {
    sessions: Arc<DashMap<String, SessionState>>,
    max_sessions: usize,
    timeout_minutes: u64,
}

impl SessionManager {
    /// Create a manager and start its cleanup task (requires a Tokio runtime)
    pub fn new(max_sessions: usize, timeout_minutes: u64) -> Self {
        let manager = Self {
            sessions: Arc::new(DashMap::new()),
            max_sessions,
            timeout_minutes,
        };

        manager.start_cleanup_task();
        manager
    }

    /// Resolve a session for a chat request.
    ///
    /// A known id is touched and returned; an unknown or absent id starts a
    /// new session. Returns the session id and a snapshot of its history.
    pub fn get_or_create(
        &self,
        session_id: Option<&str>,
    ) -> Result<(String, Vec<Message>), SessionError> {
        if let Some(id) = session_id {
            if let Some(mut session) = self.sessions.get_mut(id) {
                session.touch();
                return Ok((session.id.clone(), session.conversation.messages().to_vec()));
            }
        }

        if self.sessions.len() >= self.max_sessions {
            return Err(SessionError::LimitReached {
                active: self.sessions.len(),
                max: self.max_sessions,
            });
        }

        let session = SessionState::new();
        let id = session.id.clone();
        self.sessions.insert(id.clone(), session);

        tracing::info!(session_id = %id, "Created new session");
        Ok((id, Vec::new()))
    }

    /// Append a user message and its reply to a session
    pub fn record_turn(
        &self,
        session_id: &str,
        user: impl Into<Message>,
        result: &ResponseResult,
    ) -> Result<(), SessionError> {
        let mut session = self
            .sessions
            .get_mut(session_id)
            .ok_or_else(|| SessionError::NotFound(session_id.to_string()))?;

        session.conversation.record_turn(user, result);
        session.touch();
        Ok(())
    }

    /// Snapshot of a session
    pub fn get(&self, session_id: &str) -> Option<SessionState> {
        self.sessions.get(session_id).map(|entry| entry.clone())
    }

    pub fn delete(&self, session_id: &str) -> bool {
        self.sessions.remove(session_id).is_some()
    }

    pub fn active_count(&self) -> usize {
        self.sessions.len()
    }

    /// Remove expired sessions now; returns how many were removed
    pub fn cleanup_expired(&self) -> usize {
        cleanup_expired(&self.sessions, self.timeout_minutes)
    }

    /// Sweep once a minute until the manager is dropped
    fn start_cleanup_task(&self) {
        let sessions: Weak<DashMap<String, SessionState>> = Arc::downgrade(&self.sessions);
        let timeout_minutes = self.timeout_minutes;

        tokio::spawn(async move {
            let mut interval = time::interval(Duration::from_secs(60));

            loop {
                interval.tick().await;

                let Some(sessions) = sessions.upgrade() else {
                    break;
                };
                cleanup_expired(&sessions, timeout_minutes);
            }
        });
    }
}

fn cleanup_expired(sessions: &DashMap<String, SessionState>, timeout_minutes: u64) -> usize {
    let expired: Vec<String> = sessions
        .iter()
        .filter(|entry| entry.value().is_expired(timeout_minutes))
        .map(|entry| entry.key().clone())
        .collect();

    let mut removed = 0;
    for session_id in expired {
        if sessions.remove(&session_id).is_some() {
            removed += 1;
            tracing::debug!(session_id = %session_id, "Removed expired session");
        }
    }

    if removed > 0 {
        tracing::info!(
            removed,
            active = sessions.len(),
            "Cleaned up expired sessions"
        );
    }

    removed
}
