// Keyword-based multi-label emotion classifier

use std::sync::Arc;

use crate::catalog::{normalize_text, EmotionSet, PatternCatalog};

/// Tags a message with every emotion whose keyword list it contains
#[derive(Clone)]
pub struct EmotionClassifier {
    catalog: Arc<PatternCatalog>,
}

impl EmotionClassifier {
    pub fn new(catalog: Arc<PatternCatalog>) -> Self {
        Self { catalog }
    }

    /// Case-insensitive substring match of each label's keywords
    pub fn classify(&self, text: &str) -> EmotionSet {
        let text_lower = normalize_text(text);

        self.catalog
            .emotions
            .iter()
            .filter(|entry| {
                entry.keywords.iter().any(|keyword| {
                    !keyword.is_empty() && text_lower.contains(&normalize_text(keyword))
                })
            })
            .map(|entry| entry.label)
            .collect()
    }
}
