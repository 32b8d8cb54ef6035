// Pattern catalog
//
// Static tables the classifiers and the fallback tree read from: crisis
// regexes, per-emotion keywords and coping text, and the phrase sets of the
// non-emotional fallback categories. The catalog is plain data: the built-in
// tables are the default, and an alternative catalog can be loaded from JSON.

mod builtin;

use regex::Regex;
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::fmt;
use std::fs;
use std::path::Path;

use crate::errors::CatalogError;

/// Emotion labels the classifier can emit.
///
/// Declaration order is the catalog order: `EmotionSet` iterates in this
/// order, which decides which coping text comes first when labels combine.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EmotionLabel {
    Anxiety,
    Depression,
    Anger,
    Stress,
    Loneliness,
    Grief,
    Confusion,
}

impl EmotionLabel {
    pub const ALL: [EmotionLabel; 7] = [
        EmotionLabel::Anxiety,
        EmotionLabel::Depression,
        EmotionLabel::Anger,
        EmotionLabel::Stress,
        EmotionLabel::Loneliness,
        EmotionLabel::Grief,
        EmotionLabel::Confusion,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            EmotionLabel::Anxiety => "anxiety",
            EmotionLabel::Depression => "depression",
            EmotionLabel::Anger => "anger",
            EmotionLabel::Stress => "stress",
            EmotionLabel::Loneliness => "loneliness",
            EmotionLabel::Grief => "grief",
            EmotionLabel::Confusion => "confusion",
        }
    }
}

impl fmt::Display for EmotionLabel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Set of labels detected for one message, iterated in catalog order
pub type EmotionSet = BTreeSet<EmotionLabel>;

/// Everything the catalog knows about one emotion
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EmotionEntry {
    pub label: EmotionLabel,

    /// Lower-case substrings that signal this emotion
    pub keywords: Vec<String>,

    /// One or two sentences of coping technique (optional for new labels)
    #[serde(default)]
    pub coping: Option<String>,

    /// Rule-based reply used by the fallback tree
    #[serde(default)]
    pub reply: Option<String>,

    /// Callout that introduces the coping text in the rule-based reply
    #[serde(default = "default_callout")]
    pub callout: String,
}

fn default_callout() -> String {
    "💡 **Try this:**".to_string()
}

/// A non-emotional fallback category: trigger phrases plus its reply
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PhraseCategory {
    pub phrases: Vec<String>,
    pub reply: String,
}

impl PhraseCategory {
    /// True if any phrase occurs in `text_lower` as whole words
    pub fn matches(&self, text_lower: &str) -> bool {
        self.phrases
            .iter()
            .any(|phrase| contains_phrase(text_lower, &phrase.to_lowercase()))
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PatternCatalog {
    /// Regexes matched against lower-cased text; any match flags a crisis
    pub crisis_patterns: Vec<String>,

    pub emotions: Vec<EmotionEntry>,

    /// Advice given when no emotion was detected
    pub generic_coping: String,

    pub greeting: PhraseCategory,
    pub gratitude: PhraseCategory,
    pub check_in: PhraseCategory,

    /// Active-listening reply when no category matches
    pub default_reply: String,

    /// Order in which emotion categories are tried by the fallback tree
    pub fallback_priority: Vec<EmotionLabel>,
}

impl Default for PatternCatalog {
    fn default() -> Self {
        builtin::catalog()
    }
}

impl PatternCatalog {
    /// Load a catalog from a JSON file and validate it
    pub fn load_from_file(path: &Path) -> Result<Self, CatalogError> {
        let contents = fs::read_to_string(path).map_err(|source| CatalogError::Read {
            path: path.display().to_string(),
            source,
        })?;

        let catalog: PatternCatalog = serde_json::from_str(&contents)?;
        catalog.validate()?;

        tracing::info!(
            path = %path.display(),
            crisis_patterns = catalog.crisis_patterns.len(),
            emotions = catalog.emotions.len(),
            "Loaded pattern catalog"
        );

        Ok(catalog)
    }

    /// Check the invariants the pipeline relies on
    pub fn validate(&self) -> Result<(), CatalogError> {
        for pattern in &self.crisis_patterns {
            Regex::new(pattern).map_err(|source| CatalogError::InvalidPattern {
                pattern: pattern.clone(),
                source,
            })?;
        }

        if self.generic_coping.trim().is_empty() {
            return Err(CatalogError::EmptyText("generic_coping"));
        }
        if self.default_reply.trim().is_empty() {
            return Err(CatalogError::EmptyText("default_reply"));
        }
        for (name, category) in [
            ("greeting.reply", &self.greeting),
            ("gratitude.reply", &self.gratitude),
            ("check_in.reply", &self.check_in),
        ] {
            if category.reply.trim().is_empty() {
                return Err(CatalogError::EmptyText(name));
            }
        }

        let mut seen = BTreeSet::new();
        for entry in &self.emotions {
            if !seen.insert(entry.label) {
                return Err(CatalogError::DuplicateEmotion(entry.label));
            }
        }

        Ok(())
    }

    pub fn entry(&self, label: EmotionLabel) -> Option<&EmotionEntry> {
        self.emotions.iter().find(|entry| entry.label == label)
    }

    pub fn coping(&self, label: EmotionLabel) -> Option<&str> {
        self.entry(label)
            .and_then(|entry| entry.coping.as_deref())
            .filter(|text| !text.trim().is_empty())
    }
}

/// Lower-case and fold typographic apostrophes so "can’t" matches "can't"
pub fn normalize_text(text: &str) -> String {
    text.to_lowercase().replace(['\u{2019}', '\u{2018}'], "'")
}

/// Whole-word phrase containment: the match must not be glued to
/// alphanumeric characters on either side ("hi" does not match "this").
pub(crate) fn contains_phrase(haystack: &str, phrase: &str) -> bool {
    if phrase.is_empty() {
        return false;
    }

    haystack.match_indices(phrase).any(|(start, matched)| {
        let end = start + matched.len();
        let before_ok = haystack[..start]
            .chars()
            .next_back()
            .map_or(true, |c| !c.is_alphanumeric());
        let after_ok = haystack[end..]
            .chars()
            .next()
            .map_or(true, |c| !c.is_alphanumeric());
        before_ok && after_ok
    })
}
