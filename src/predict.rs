//! Genre prediction
//!
//! Runs a title and description through the preprocessing pipeline and the
//! trained model, then selects every genre whose probability reaches the
//! threshold.

use std::cmp::Ordering;

use tracing::debug;

use crate::error::{ClassifierError, Result};
use crate::model::GenreModel;
use crate::pipeline::observer::TracingObserver;
use crate::pipeline::runner::TextPipeline;
use crate::pipeline::traits::{NoopPreprocessor, Preprocessor};
use crate::types::{ClassifierConfig, GenreScore, Prediction, DEFAULT_THRESHOLD};

/// Pick the threshold to use: explicit override, then the model's stored
/// value, then [`DEFAULT_THRESHOLD`].
pub fn resolve_threshold(explicit: Option<f64>, model: &GenreModel) -> f64 {
    explicit
        .or_else(|| model.threshold())
        .unwrap_or(DEFAULT_THRESHOLD)
}

/// Select genres at or above `threshold`, keeping model order.
///
/// When nothing qualifies and `fallback_to_top` is set, the single most
/// probable genre is returned instead (the first one on ties).
pub fn select_genres(scores: &[GenreScore], threshold: f64, fallback_to_top: bool) -> Vec<String> {
    let selected: Vec<String> = scores
        .iter()
        .filter(|s| s.probability >= threshold)
        .map(|s| s.genre.clone())
        .collect();

    if !selected.is_empty() || !fallback_to_top {
        return selected;
    }

    scores
        .iter()
        .reduce(|best, s| if s.probability > best.probability { s } else { best })
        .map(|s| vec![s.genre.clone()])
        .unwrap_or_default()
}

/// Scores sorted by descending probability
fn ranked(mut scores: Vec<GenreScore>) -> Vec<GenreScore> {
    scores.sort_by(|a, b| {
        b.probability
            .partial_cmp(&a.probability)
            .unwrap_or(Ordering::Equal)
    });
    scores
}

/// Predicts genres for movies with a loaded model
#[derive(Debug, Clone)]
pub struct GenrePredictor<Pre = NoopPreprocessor> {
    model: GenreModel,
    pipeline: TextPipeline<Pre>,
}

impl GenrePredictor {
    /// Build a predictor with the standard pipeline for `cfg`.
    pub fn new(model: GenreModel, cfg: ClassifierConfig) -> Result<Self> {
        Self::with_pipeline(model, TextPipeline::new(cfg))
    }
}

impl<Pre: Preprocessor> GenrePredictor<Pre> {
    /// Build a predictor around a custom pipeline (it must match the one the
    /// model was trained with).
    pub fn with_pipeline(model: GenreModel, pipeline: TextPipeline<Pre>) -> Result<Self> {
        let threshold = pipeline.config().threshold;
        if !(0.0..=1.0).contains(&threshold) {
            return Err(ClassifierError::invalid_input(format!(
                "threshold must be between 0 and 1, got {threshold}"
            )));
        }
        Ok(Self { model, pipeline })
    }

    pub fn model(&self) -> &GenreModel {
        &self.model
    }

    pub fn config(&self) -> &ClassifierConfig {
        self.pipeline.config()
    }

    /// Predict the genres of one movie.
    pub fn predict(&self, title: &str, description: &str) -> Result<Prediction> {
        if title.trim().is_empty() {
            return Err(ClassifierError::invalid_input("title must not be empty"));
        }
        if description.trim().is_empty() {
            return Err(ClassifierError::invalid_input(
                "description must not be empty",
            ));
        }

        let cfg = self.pipeline.config();
        let processed = self
            .pipeline
            .transform_observed(title, description, &mut TracingObserver);
        debug!(text = processed.text.as_str(), "preprocessed input");

        let scores = self.model.score(&processed.text);
        let genre = select_genres(&scores, cfg.threshold, cfg.fallback_to_top);
        debug!(?genre, threshold = cfg.threshold, "genres selected");

        Ok(Prediction {
            title: title.to_string(),
            description: description.to_string(),
            genre,
            scores: cfg.include_scores.then(|| ranked(scores)),
        })
    }
}
