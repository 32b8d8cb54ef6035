// Coping strategy selection

use std::sync::Arc;

use crate::catalog::{EmotionSet, PatternCatalog};

/// Turns a set of emotion labels into combined advisory text
#[derive(Clone)]
pub struct CopingAdvisor {
    catalog: Arc<PatternCatalog>,
}

impl CopingAdvisor {
    pub fn new(catalog: Arc<PatternCatalog>) -> Self {
        Self { catalog }
    }

    /// Space-joined techniques in catalog order, or the generic sentence
    /// when no label has advice configured
    pub fn advise(&self, labels: &EmotionSet) -> String {
        let techniques: Vec<&str> = labels
            .iter()
            .filter_map(|label| self.catalog.coping(*label))
            .collect();

        if techniques.is_empty() {
            return self.catalog.generic_coping.clone();
        }

        techniques.join(" ")
    }

    pub fn generic(&self) -> &str {
        &self.catalog.generic_coping
    }
}
