// Crisis pattern detector

use anyhow::{Context, Result};
use regex::{Regex, RegexBuilder};

use crate::catalog::{normalize_text, PatternCatalog};

/// Regex classifier for language associated with imminent self-harm risk.
///
/// Patterns come from the catalog and are compiled once. `.` also matches
/// line breaks, so co-occurrence checks span the whole message.
#[derive(Clone)]
pub struct CrisisDetector {
    patterns: Vec<Regex>,
}

impl CrisisDetector {
    /// Compile the catalog's crisis patterns
    pub fn new(catalog: &PatternCatalog) -> Result<Self> {
        let patterns = catalog
            .crisis_patterns
            .iter()
            .map(|pattern| {
                RegexBuilder::new(pattern)
                    .dot_matches_new_line(true)
                    .build()
                    .with_context(|| format!("Failed to compile crisis pattern: {}", pattern))
            })
            .collect::<Result<Vec<_>>>()?;

        Ok(Self { patterns })
    }

    /// Returns true if any crisis pattern matches the message
    pub fn detect(&self, text: &str) -> bool {
        self.matched_pattern(text).is_some()
    }

    /// First pattern that matches the message, if any
    pub fn matched_pattern(&self, text: &str) -> Option<&str> {
        let normalized = normalize_text(text);

        let hit = self
            .patterns
            .iter()
            .find(|pattern| pattern.is_match(&normalized))
            .map(|pattern| pattern.as_str());

        if let Some(pattern) = hit {
            tracing::warn!("Crisis detected: pattern '{}'", pattern);
        }
        hit
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn create_test_detector() -> CrisisDetector {
        CrisisDetector::new(&PatternCatalog::default()).unwrap()
    }

    #[test]
    fn test_crisis_detection() {
        let detector = create_test_detector();

        assert!(detector.detect("I'm thinking about suicide"));
        assert!(detector.detect("I want to kill myself"));
        assert!(detector.detect("sometimes I hurt myself"));
        assert!(detector.detect("I want to end my life"));
        assert!(!detector.detect("What is the meaning of life?"));
        assert!(!detector.detect("I'm feeling anxious and worried"));
    }

    #[test]
    fn test_case_insensitive() {
        let detector = create_test_detector();

        assert!(detector.detect("SUICIDE"));
        assert!(detector.detect("SuIcIdE"));
        assert!(detector.detect("I Want To Die"));
    }

    #[test]
    fn test_method_plus_intent() {
        let detector = create_test_detector();

        assert!(detector.detect("I keep looking at the bridge and thinking I should just die"));
        assert!(detector.detect("I bought a rope to end this"));
        // Instrument without an ending-life verb
        assert!(!detector.detect("I cut bread with a knife today"));
    }

    #[test]
    fn test_method_plus_intent_across_lines() {
        let detector = create_test_detector();

        assert!(detector.detect("I bought a rope.\nI am going to end this"));
        assert!(detector.detect("the bridge\r\n\r\nI just want to die"));
    }

    #[test]
    fn test_loaded_patterns_span_lines() {
        let mut catalog = PatternCatalog::default();
        catalog.crisis_patterns = vec![r"\bpills\b.*\btonight\b".to_string()];
        let detector = CrisisDetector::new(&catalog).unwrap();

        assert!(detector.detect("I saved up the pills\nand tonight is the night"));
    }

    #[test]
    fn test_hopelessness_idioms() {
        let detector = create_test_detector();

        assert!(detector.detect("There's no point anymore"));
        assert!(detector.detect("I can't go on like this"));
        assert!(detector.detect("I can\u{2019}t go on like this"));
        assert!(detector.detect("everyone would be better off without me"));
    }

    #[test]
    fn test_matched_pattern_reports_source() {
        let detector = create_test_detector();

        let pattern = detector.matched_pattern("I want to kill myself").unwrap();
        assert!(pattern.contains("kill myself"));
        assert!(detector.matched_pattern("hello").is_none());
    }

    #[test]
    fn test_total_on_odd_input() {
        let detector = create_test_detector();

        assert!(!detector.detect(""));
        assert!(!detector.detect("?!?!...,,,"));
        assert!(!detector.detect(&"a".repeat(100_000)));
    }

    #[test]
    fn test_invalid_pattern_fails_construction() {
        let mut catalog = PatternCatalog::default();
        catalog.crisis_patterns = vec!["(".to_string()];
        assert!(CrisisDetector::new(&catalog).is_err());
    }
}
