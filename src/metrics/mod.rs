// Metrics module
// Prometheus counters for pipeline turns and generation outcomes

use anyhow::{Context, Result};
use prometheus::{Encoder, IntCounterVec, Opts, Registry, TextEncoder};

use crate::pipeline::ResponseResult;

/// Outcome of the generation step for one turn
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GenerationOutcome {
    /// A completion passed the quality gate
    Generated,
    /// Backend disabled, failed, or returned nothing usable
    Unavailable,
    /// Not attempted (crisis short-circuit or blank message)
    Skipped,
}

impl GenerationOutcome {
    pub fn as_str(&self) -> &'static str {
        match self {
            GenerationOutcome::Generated => "generated",
            GenerationOutcome::Unavailable => "unavailable",
            GenerationOutcome::Skipped => "skipped",
        }
    }
}

/// Registry-backed counters, owned by whoever hosts the pipeline
pub struct PipelineMetrics {
    registry: Registry,
    turns: IntCounterVec,
    generations: IntCounterVec,
}

impl PipelineMetrics {
    pub fn new() -> Result<Self> {
        let registry = Registry::new();

        let turns = IntCounterVec::new(
            Opts::new("safespace_turns_total", "Turns processed, by reply tool and status"),
            &["tool", "status"],
        )
        .context("Failed to create turns counter")?;

        let generations = IntCounterVec::new(
            Opts::new(
                "safespace_generation_total",
                "Generation step outcomes per turn",
            ),
            &["outcome"],
        )
        .context("Failed to create generation counter")?;

        registry
            .register(Box::new(turns.clone()))
            .context("Failed to register turns counter")?;
        registry
            .register(Box::new(generations.clone()))
            .context("Failed to register generation counter")?;

        Ok(Self {
            registry,
            turns,
            generations,
        })
    }

    pub fn record_turn(&self, result: &ResponseResult) {
        self.turns
            .with_label_values(&[result.tool.as_str(), result.status.as_str()])
            .inc();
    }

    pub fn record_generation(&self, outcome: GenerationOutcome) {
        self.generations.with_label_values(&[outcome.as_str()]).inc();
    }

    pub fn turn_count(&self, tool: &str, status: &str) -> u64 {
        self.turns.with_label_values(&[tool, status]).get()
    }

    /// Prometheus text exposition format
    pub fn render(&self) -> Result<String> {
        let mut buffer = Vec::new();
        TextEncoder::new()
            .encode(&self.registry.gather(), &mut buffer)
            .context("Failed to encode metrics")?;
        String::from_utf8(buffer).context("Metrics output was not UTF-8")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pipeline::{ResponseStatus, ResponseTool};

    #[test]
    fn test_record_and_render() {
        let metrics = PipelineMetrics::new().unwrap();
        let result = ResponseResult::new("hi", ResponseTool::Greeting, ResponseStatus::Degraded);

        metrics.record_turn(&result);
        metrics.record_turn(&result);
        metrics.record_generation(GenerationOutcome::Unavailable);

        assert_eq!(metrics.turn_count("greeting", "degraded"), 2);

        let text = metrics.render().unwrap();
        assert!(text.contains("safespace_turns_total"));
        assert!(text.contains("tool=\"greeting\""));
        assert!(text.contains("outcome=\"unavailable\""));
    }
}
