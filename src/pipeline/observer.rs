//! Pipeline observer — hooks for logging, profiling, and debugging.
//!
//! Observers receive notifications at stage boundaries without coupling to
//! stage logic.

use std::time::{Duration, Instant};

use tracing::debug;

use crate::pipeline::artifacts::TokenStream;

pub const STAGE_CLEAN: &str = "clean";
pub const STAGE_TOKENIZE: &str = "tokenize";
pub const STAGE_LEMMATIZE: &str = "lemmatize";
pub const STAGE_STOPWORDS: &str = "stopwords";
pub const STAGE_PREPROCESS: &str = "preprocess";

/// Measures the wall-clock time of a single stage.
#[derive(Debug, Clone, Copy)]
pub struct StageClock {
    started: Instant,
}

impl StageClock {
    pub fn start() -> Self {
        Self {
            started: Instant::now(),
        }
    }

    pub fn elapsed(&self) -> Duration {
        self.started.elapsed()
    }
}

/// What happened during one stage.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StageReport {
    pub elapsed: Duration,
    /// Tokens entering the stage (0 for the cleaning stage)
    pub tokens_in: usize,
    /// Tokens leaving the stage
    pub tokens_out: usize,
}

impl StageReport {
    pub fn new(elapsed: Duration, tokens_in: usize, tokens_out: usize) -> Self {
        Self {
            elapsed,
            tokens_in,
            tokens_out,
        }
    }
}

/// Receives stage-boundary callbacks from [`super::runner::TextPipeline`].
///
/// All methods default to no-ops so implementors override only what they need.
pub trait PipelineObserver {
    fn on_stage_start(&mut self, _stage: &'static str) {}

    fn on_stage_end(&mut self, _stage: &'static str, _report: &StageReport) {}

    fn on_tokens(&mut self, _tokens: &TokenStream) {}
}

/// Zero-cost observer.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoopObserver;

impl PipelineObserver for NoopObserver {}

/// Emits one `debug!` event per finished stage.
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingObserver;

impl PipelineObserver for TracingObserver {
    fn on_stage_end(&mut self, stage: &'static str, report: &StageReport) {
        debug!(
            stage,
            elapsed_us = report.elapsed.as_micros() as u64,
            tokens_in = report.tokens_in,
            tokens_out = report.tokens_out,
            "stage finished"
        );
    }
}

/// Records every stage report in order; handy for tests and profiling.
#[derive(Debug, Clone, Default)]
pub struct RecordingObserver {
    pub started: Vec<&'static str>,
    pub reports: Vec<(&'static str, StageReport)>,
}

impl PipelineObserver for RecordingObserver {
    fn on_stage_start(&mut self, stage: &'static str) {
        self.started.push(stage);
    }

    fn on_stage_end(&mut self, stage: &'static str, report: &StageReport) {
        self.reports.push((stage, *report));
    }
}
