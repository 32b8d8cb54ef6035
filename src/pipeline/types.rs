// Pipeline result types

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::catalog::EmotionLabel;

/// Which path produced a reply
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ResponseTool {
    CrisisIntervention,
    AiTherapyConversation,
    Greeting,
    AnxietySupport,
    DepressionSupport,
    AngerManagement,
    StressManagement,
    LonelinessSupport,
    GriefSupport,
    ConfusionSupport,
    GratitudeResponse,
    CheckIn,
    ActiveListening,
    TechnicalFallback,
}

impl ResponseTool {
    pub fn as_str(&self) -> &'static str {
        match self {
            ResponseTool::CrisisIntervention => "crisis_intervention",
            ResponseTool::AiTherapyConversation => "ai_therapy_conversation",
            ResponseTool::Greeting => "greeting",
            ResponseTool::AnxietySupport => "anxiety_support",
            ResponseTool::DepressionSupport => "depression_support",
            ResponseTool::AngerManagement => "anger_management",
            ResponseTool::StressManagement => "stress_management",
            ResponseTool::LonelinessSupport => "loneliness_support",
            ResponseTool::GriefSupport => "grief_support",
            ResponseTool::ConfusionSupport => "confusion_support",
            ResponseTool::GratitudeResponse => "gratitude_response",
            ResponseTool::CheckIn => "check_in",
            ResponseTool::ActiveListening => "active_listening",
            ResponseTool::TechnicalFallback => "technical_fallback",
        }
    }

    /// Tool tag of the rule-based reply for an emotion
    pub fn for_emotion(label: EmotionLabel) -> Self {
        match label {
            EmotionLabel::Anxiety => ResponseTool::AnxietySupport,
            EmotionLabel::Depression => ResponseTool::DepressionSupport,
            EmotionLabel::Anger => ResponseTool::AngerManagement,
            EmotionLabel::Stress => ResponseTool::StressManagement,
            EmotionLabel::Loneliness => ResponseTool::LonelinessSupport,
            EmotionLabel::Grief => ResponseTool::GriefSupport,
            EmotionLabel::Confusion => ResponseTool::ConfusionSupport,
        }
    }
}

impl fmt::Display for ResponseTool {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ResponseStatus {
    /// Crisis reply or external generation
    Success,
    /// Rule-based reply because generation was unavailable
    Degraded,
    /// Technical fallback after an internal fault
    Error,
}

impl ResponseStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            ResponseStatus::Success => "success",
            ResponseStatus::Degraded => "degraded",
            ResponseStatus::Error => "error",
        }
    }
}

/// The pipeline's output for one turn
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ResponseResult {
    /// Never empty
    pub response: String,
    pub tool: ResponseTool,
    pub status: ResponseStatus,
}

impl ResponseResult {
    pub fn new(response: impl Into<String>, tool: ResponseTool, status: ResponseStatus) -> Self {
        Self {
            response: response.into(),
            tool,
            status,
        }
    }

    pub fn is_crisis(&self) -> bool {
        self.tool == ResponseTool::CrisisIntervention
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_serialized_tags_match_as_str() {
        let tools = [
            ResponseTool::CrisisIntervention,
            ResponseTool::AiTherapyConversation,
            ResponseTool::GratitudeResponse,
            ResponseTool::TechnicalFallback,
        ];
        for tool in tools {
            let json = serde_json::to_string(&tool).unwrap();
            assert_eq!(json, format!("\"{}\"", tool.as_str()));
        }
    }

    #[test]
    fn test_every_emotion_has_distinct_tool() {
        let mut seen = std::collections::HashSet::new();
        for label in EmotionLabel::ALL {
            assert!(seen.insert(ResponseTool::for_emotion(label)));
        }
    }
}
