// Rule-based fallback tree
//
// Used whenever external generation yields nothing. Categories are tried in
// an explicit priority order and the first match supplies both the reply
// and its tool tag.

use anyhow::{Context, Result};
use std::sync::Arc;

use super::types::{ResponseResult, ResponseStatus, ResponseTool};
use crate::catalog::{normalize_text, EmotionLabel, EmotionSet, PatternCatalog};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FallbackCategory {
    Greeting,
    Emotion(EmotionLabel),
    Gratitude,
    CheckIn,
    /// Always matches; last in every priority list
    ActiveListening,
}

impl FallbackCategory {
    pub fn tool(&self) -> ResponseTool {
        match self {
            FallbackCategory::Greeting => ResponseTool::Greeting,
            FallbackCategory::Emotion(label) => ResponseTool::for_emotion(*label),
            FallbackCategory::Gratitude => ResponseTool::GratitudeResponse,
            FallbackCategory::CheckIn => ResponseTool::CheckIn,
            FallbackCategory::ActiveListening => ResponseTool::ActiveListening,
        }
    }
}

#[derive(Clone)]
pub struct FallbackTree {
    catalog: Arc<PatternCatalog>,
    priority: Vec<FallbackCategory>,
}

impl FallbackTree {
    /// Greeting, then the catalog's emotion priority, then gratitude,
    /// check-in and active listening
    pub fn new(catalog: Arc<PatternCatalog>) -> Self {
        let mut priority = vec![FallbackCategory::Greeting];
        priority.extend(
            catalog
                .fallback_priority
                .iter()
                .map(|label| FallbackCategory::Emotion(*label)),
        );
        priority.extend([
            FallbackCategory::Gratitude,
            FallbackCategory::CheckIn,
            FallbackCategory::ActiveListening,
        ]);

        Self { catalog, priority }
    }

    pub fn priority(&self) -> &[FallbackCategory] {
        &self.priority
    }

    /// First category in priority order that matches the message
    pub fn select(&self, text: &str, labels: &EmotionSet) -> FallbackCategory {
        let text_lower = normalize_text(text);

        self.priority
            .iter()
            .copied()
            .find(|category| self.matches(*category, &text_lower, labels))
            .unwrap_or(FallbackCategory::ActiveListening)
    }

    fn matches(&self, category: FallbackCategory, text_lower: &str, labels: &EmotionSet) -> bool {
        match category {
            FallbackCategory::Greeting => self.catalog.greeting.matches(text_lower),
            FallbackCategory::Emotion(label) => labels.contains(&label),
            FallbackCategory::Gratitude => self.catalog.gratitude.matches(text_lower),
            FallbackCategory::CheckIn => self.catalog.check_in.matches(text_lower),
            FallbackCategory::ActiveListening => true,
        }
    }

    /// Rule-based reply for the message
    pub fn respond(&self, text: &str, labels: &EmotionSet) -> Result<ResponseResult> {
        let category = self.select(text, labels);
        tracing::info!(category = ?category, "Fallback tree selected category");

        let response = match category {
            FallbackCategory::Greeting => self.catalog.greeting.reply.clone(),
            FallbackCategory::Emotion(label) => self.emotion_reply(label)?,
            FallbackCategory::Gratitude => self.catalog.gratitude.reply.clone(),
            FallbackCategory::CheckIn => self.catalog.check_in.reply.clone(),
            FallbackCategory::ActiveListening => self.catalog.default_reply.clone(),
        };

        Ok(ResponseResult::new(
            response,
            category.tool(),
            ResponseStatus::Degraded,
        ))
    }

    /// Emotion reply with that emotion's coping text under its callout
    fn emotion_reply(&self, label: EmotionLabel) -> Result<String> {
        let entry = self
            .catalog
            .entry(label)
            .with_context(|| format!("Catalog has no entry for emotion '{}'", label))?;

        let reply = entry
            .reply
            .as_deref()
            .filter(|reply| !reply.trim().is_empty())
            .with_context(|| format!("Catalog has no fallback reply for emotion '{}'", label))?;

        Ok(match self.catalog.coping(label) {
            Some(coping) => format!("{}\n\n{} {}", reply, entry.callout, coping),
            None => reply.to_string(),
        })
    }
}
