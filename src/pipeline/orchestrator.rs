// Response orchestrator
//
// Per turn: CrisisCheck -> (CrisisReply | EmotionDetect -> GenerationAttempt
// -> (Enhance | FallbackTree)). Errors and panics after the crisis check are
// caught here and turned into the technical fallback reply, so a turn always
// yields exactly one non-empty ResponseResult.

use anyhow::{Context, Result};
use futures::FutureExt;
use std::any::Any;
use std::panic::AssertUnwindSafe;
use std::sync::Arc;

use super::fallback::FallbackTree;
use super::types::{ResponseResult, ResponseStatus, ResponseTool};
use crate::catalog::{EmotionSet, PatternCatalog};
use crate::config::Settings;
use crate::conversation::Message;
use crate::crisis::{crisis_reply, CrisisDetector, HotlineRegion};
use crate::emotion::{CopingAdvisor, EmotionClassifier};
use crate::metrics::{GenerationOutcome, PipelineMetrics};
use crate::providers::{build_prompt, HuggingFaceClient, TextGenerator};

pub const TECHNICAL_FALLBACK_REPLY: &str = "I'm here to listen and support you. Sometimes \
technical issues happen, but that doesn't change my commitment to being here for you. \
How are you feeling right now?";

const STRATEGY_CALLOUT: &str = "💡 **Helpful strategy:**";

pub struct ResponseOrchestrator {
    crisis: CrisisDetector,
    classifier: EmotionClassifier,
    advisor: CopingAdvisor,
    fallback: FallbackTree,
    generator: Arc<dyn TextGenerator>,
    region: HotlineRegion,
    context_turns: usize,
    metrics: Option<Arc<PipelineMetrics>>,
}

impl ResponseOrchestrator {
    /// Build a pipeline over a catalog and a generation backend
    pub fn new(catalog: PatternCatalog, generator: Arc<dyn TextGenerator>) -> Result<Self> {
        let crisis = CrisisDetector::new(&catalog)?;
        let catalog = Arc::new(catalog);

        Ok(Self {
            crisis,
            classifier: EmotionClassifier::new(Arc::clone(&catalog)),
            advisor: CopingAdvisor::new(Arc::clone(&catalog)),
            fallback: FallbackTree::new(catalog),
            generator,
            region: HotlineRegion::default(),
            context_turns: 0,
            metrics: None,
        })
    }

    /// Build the pipeline described by the settings: catalog file (or the
    /// built-in tables), Hugging Face client, crisis region
    pub fn from_settings(settings: &Settings) -> Result<Self> {
        let catalog = match &settings.catalog_path {
            Some(path) => PatternCatalog::load_from_file(path).map_err(|e| {
                anyhow::anyhow!(crate::errors::catalog_load_error(
                    &path.display().to_string(),
                    &e
                ))
            })?,
            None => PatternCatalog::default(),
        };

        let client = HuggingFaceClient::new(&settings.generation)
            .context("Failed to create generation client")?;

        Ok(Self::new(catalog, Arc::new(client))?
            .with_region(settings.crisis.region)
            .with_context_turns(settings.generation.context_turns))
    }

    pub fn with_region(mut self, region: HotlineRegion) -> Self {
        self.region = region;
        self
    }

    pub fn with_context_turns(mut self, context_turns: usize) -> Self {
        self.context_turns = context_turns;
        self
    }

    pub fn with_metrics(mut self, metrics: Arc<PipelineMetrics>) -> Self {
        self.metrics = Some(metrics);
        self
    }

    /// Whether external generation is configured (false means degraded mode)
    pub fn is_ai_enabled(&self) -> bool {
        self.generator.is_enabled()
    }

    /// Emotion labels the pipeline sees in `text`, for annotating history
    pub fn detect_emotions(&self, text: &str) -> EmotionSet {
        self.classifier.classify(text)
    }

    pub fn region(&self) -> HotlineRegion {
        self.region
    }

    /// Process one user message into exactly one reply.
    ///
    /// `history` holds the prior messages of the session (not including
    /// `text`); it is only used as optional generation context.
    pub async fn process(&self, text: &str, history: &[Message]) -> ResponseResult {
        let result = if self.crisis.detect(text) {
            self.record_generation(GenerationOutcome::Skipped);
            ResponseResult::new(
                crisis_reply(self.region),
                ResponseTool::CrisisIntervention,
                ResponseStatus::Success,
            )
        } else {
            match AssertUnwindSafe(self.respond(text, history))
                .catch_unwind()
                .await
            {
                Ok(Ok(result)) => result,
                Ok(Err(e)) => {
                    tracing::error!("Pipeline error, using technical fallback: {:#}", e);
                    technical_fallback()
                }
                Err(panic) => {
                    tracing::error!(
                        "Pipeline panicked, using technical fallback: {}",
                        panic_message(panic.as_ref())
                    );
                    technical_fallback()
                }
            }
        };

        tracing::info!(tool = %result.tool, status = result.status.as_str(), "Turn processed");
        if let Some(metrics) = &self.metrics {
            metrics.record_turn(&result);
        }

        result
    }

    /// EmotionDetect -> GenerationAttempt -> (Enhance | FallbackTree)
    async fn respond(&self, text: &str, history: &[Message]) -> Result<ResponseResult> {
        let labels = self.classifier.classify(text);
        tracing::debug!(emotions = ?labels, "Detected emotions");

        if let Some(generated) = self.attempt_generation(text, history).await {
            return Ok(ResponseResult::new(
                self.enhance(generated, &labels),
                ResponseTool::AiTherapyConversation,
                ResponseStatus::Success,
            ));
        }

        self.fallback.respond(text, &labels)
    }

    async fn attempt_generation(&self, text: &str, history: &[Message]) -> Option<String> {
        if text.trim().is_empty() || !self.generator.is_enabled() {
            let outcome = if text.trim().is_empty() {
                GenerationOutcome::Skipped
            } else {
                GenerationOutcome::Unavailable
            };
            self.record_generation(outcome);
            return None;
        }

        let prompt = build_prompt(text, history, self.context_turns);
        let generated = self
            .generator
            .generate(&prompt)
            .await
            .filter(|text| !text.trim().is_empty());

        match &generated {
            Some(_) => {
                tracing::debug!(backend = self.generator.name(), "Using generated reply");
                self.record_generation(GenerationOutcome::Generated);
            }
            None => {
                tracing::info!(
                    backend = self.generator.name(),
                    "No usable generation, falling back to rules"
                );
                self.record_generation(GenerationOutcome::Unavailable);
            }
        }

        generated
    }

    /// Append the coping addendum when emotions were detected
    fn enhance(&self, base: String, labels: &EmotionSet) -> String {
        if labels.is_empty() {
            return base;
        }

        format!("{}\n\n{} {}", base, STRATEGY_CALLOUT, self.advisor.advise(labels))
    }

    fn record_generation(&self, outcome: GenerationOutcome) {
        if let Some(metrics) = &self.metrics {
            metrics.record_generation(outcome);
        }
    }
}

fn technical_fallback() -> ResponseResult {
    ResponseResult::new(
        TECHNICAL_FALLBACK_REPLY,
        ResponseTool::TechnicalFallback,
        ResponseStatus::Error,
    )
}

fn panic_message(panic: &(dyn Any + Send)) -> &str {
    panic
        .downcast_ref::<&str>()
        .copied()
        .or_else(|| panic.downcast_ref::<String>().map(String::as_str))
        .unwrap_or("unknown panic")
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use std::sync::atomic::{AtomicUsize, Ordering};

    struct FixedGenerator {
        reply: Option<String>,
        calls: AtomicUsize,
    }

    impl FixedGenerator {
        fn new(reply: Option<&str>) -> Self {
            Self {
                reply: reply.map(str::to_string),
                calls: AtomicUsize::new(0),
            }
        }
    }

    #[async_trait]
    impl TextGenerator for FixedGenerator {
        async fn generate(&self, _prompt: &str) -> Option<String> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            self.reply.clone()
        }

        fn name(&self) -> &str {
            "fixed"
        }
    }

    struct PanickingGenerator;

    #[async_trait]
    impl TextGenerator for PanickingGenerator {
        async fn generate(&self, _prompt: &str) -> Option<String> {
            panic!("backend exploded");
        }

        fn name(&self) -> &str {
            "panicking"
        }
    }

    fn orchestrator(generator: Arc<dyn TextGenerator>) -> ResponseOrchestrator {
        ResponseOrchestrator::new(PatternCatalog::default(), generator).unwrap()
    }

    #[tokio::test]
    async fn test_crisis_short_circuits_generation() {
        let generator = Arc::new(FixedGenerator::new(Some("A generated reply that is long")));
        let pipeline = orchestrator(generator.clone());

        let result = pipeline.process("I'm anxious and I want to die", &[]).await;

        assert_eq!(result.tool, ResponseTool::CrisisIntervention);
        assert_eq!(result.status, ResponseStatus::Success);
        assert!(!result.response.contains("deep breathing"));
        assert_eq!(generator.calls.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn test_multi_line_crisis_message() {
        let generator = Arc::new(FixedGenerator::new(Some("A generated reply that is long")));
        let pipeline = orchestrator(generator.clone());

        let result = pipeline
            .process("I bought a rope.\nI am going to end this", &[])
            .await;

        assert_eq!(result.tool, ResponseTool::CrisisIntervention);
        assert_eq!(generator.calls.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn test_generated_reply_is_enhanced() {
        let generator = Arc::new(FixedGenerator::new(Some("That sounds really hard to carry.")));
        let pipeline = orchestrator(generator);

        let result = pipeline.process("I'm so nervous about tomorrow", &[]).await;

        assert_eq!(result.tool, ResponseTool::AiTherapyConversation);
        assert_eq!(result.status, ResponseStatus::Success);
        assert!(result.response.starts_with("That sounds really hard to carry."));
        assert!(result.response.contains("Helpful strategy"));
        assert!(result.response.contains("deep breathing"));
    }

    #[tokio::test]
    async fn test_generated_reply_without_emotions_is_unchanged() {
        let generator = Arc::new(FixedGenerator::new(Some("Tell me more about your day.")));
        let pipeline = orchestrator(generator);

        let result = pipeline.process("I went for a walk", &[]).await;
        assert_eq!(result.response, "Tell me more about your day.");
    }

    #[tokio::test]
    async fn test_empty_generation_falls_back() {
        let pipeline = orchestrator(Arc::new(FixedGenerator::new(None)));

        let result = pipeline.process("I feel so stressed", &[]).await;
        assert_eq!(result.tool, ResponseTool::StressManagement);
        assert_eq!(result.status, ResponseStatus::Degraded);
    }

    #[tokio::test]
    async fn test_blank_generation_falls_back() {
        let pipeline = orchestrator(Arc::new(FixedGenerator::new(Some("   "))));

        let result = pipeline.process("hello", &[]).await;
        assert_eq!(result.tool, ResponseTool::Greeting);
    }

    #[tokio::test]
    async fn test_panic_becomes_technical_fallback() {
        let pipeline = orchestrator(Arc::new(PanickingGenerator));

        let result = pipeline.process("hello there", &[]).await;
        assert_eq!(result.tool, ResponseTool::TechnicalFallback);
        assert_eq!(result.status, ResponseStatus::Error);
        assert_eq!(result.response, TECHNICAL_FALLBACK_REPLY);
    }

    #[tokio::test]
    async fn test_crisis_still_answered_when_backend_panics() {
        let pipeline = orchestrator(Arc::new(PanickingGenerator));

        let result = pipeline.process("I want to kill myself", &[]).await;
        assert_eq!(result.tool, ResponseTool::CrisisIntervention);
    }

    #[tokio::test]
    async fn test_catalog_fault_becomes_technical_fallback() {
        let mut catalog = PatternCatalog::default();
        for entry in catalog.emotions.iter_mut() {
            if entry.label == crate::catalog::EmotionLabel::Grief {
                entry.reply = None;
            }
        }
        let pipeline =
            ResponseOrchestrator::new(catalog, Arc::new(FixedGenerator::new(None))).unwrap();

        let result = pipeline.process("I'm grieving my dad", &[]).await;
        assert_eq!(result.tool, ResponseTool::TechnicalFallback);
        assert!(!result.response.is_empty());
    }

    #[tokio::test]
    async fn test_region_changes_crisis_reply() {
        let pipeline =
            orchestrator(Arc::new(FixedGenerator::new(None))).with_region(HotlineRegion::India);

        let result = pipeline.process("I want to end my life", &[]).await;
        assert!(result.response.contains("1800-121-3667"));
    }

    #[tokio::test]
    async fn test_metrics_recorded() {
        let metrics = Arc::new(PipelineMetrics::new().unwrap());
        let pipeline =
            orchestrator(Arc::new(FixedGenerator::new(None))).with_metrics(Arc::clone(&metrics));

        pipeline.process("hello", &[]).await;
        pipeline.process("I want to die", &[]).await;

        assert_eq!(metrics.turn_count("greeting", "degraded"), 1);
        assert_eq!(metrics.turn_count("crisis_intervention", "success"), 1);
    }
}
