//! Command-line argument definitions and output rendering.

use std::path::PathBuf;

use clap::{Parser, ValueEnum};

use crate::model::train::TrainOptions;
use crate::model::vectorizer::FitOptions;
use crate::types::{ClassifierConfig, Prediction, DEFAULT_MIN_TOKEN_LEN};

pub const DEFAULT_MODEL_PATH: &str = "model/genre_model.json";

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    Json,
    Text,
}

/// Predict a movie's genres from its title and description.
#[derive(Debug, Parser)]
#[command(name = "movie_classifier", version, about)]
pub struct PredictCli {
    /// The name of the movie
    #[arg(long)]
    pub title: String,

    /// The description of the movie
    #[arg(long)]
    pub description: String,

    /// Path to the trained model
    #[arg(long, env = "MOVIE_CLASSIFIER_MODEL", default_value = DEFAULT_MODEL_PATH)]
    pub model: PathBuf,

    /// Minimum probability for a genre to be selected [default: model's, else 0.5]
    #[arg(long, env = "MOVIE_CLASSIFIER_THRESHOLD")]
    pub threshold: Option<f64>,

    /// Return no genre instead of the most probable one when none reaches the threshold
    #[arg(long)]
    pub no_fallback: bool,

    /// Include per-genre probabilities
    #[arg(long)]
    pub scores: bool,

    #[arg(long, value_enum, default_value_t = OutputFormat::Json)]
    pub format: OutputFormat,
}

impl PredictCli {
    /// Build the runtime config once the threshold has been resolved.
    pub fn to_config(&self, threshold: f64) -> ClassifierConfig {
        ClassifierConfig::default()
            .with_threshold(threshold)
            .with_fallback_to_top(!self.no_fallback)
            .with_scores(self.scores)
    }
}

/// Train a genre model from a JSON Lines file of labelled movies.
#[derive(Debug, Parser)]
#[command(name = "train_genre_model", version, about)]
pub struct TrainCli {
    /// JSON Lines file with `title`, `description` and `genres` per line
    #[arg(long)]
    pub data: PathBuf,

    /// Where to write the model
    #[arg(long, default_value = DEFAULT_MODEL_PATH)]
    pub output: PathBuf,

    #[arg(long, default_value_t = 300)]
    pub epochs: usize,

    #[arg(long, default_value_t = 1.0)]
    pub learning_rate: f64,

    /// L2 regularization strength
    #[arg(long, default_value_t = 1e-4)]
    pub l2: f64,

    /// Ignore terms that appear in fewer documents
    #[arg(long, default_value_t = 1)]
    pub min_df: usize,

    /// Keep only the most frequent terms
    #[arg(long)]
    pub max_features: Option<usize>,

    /// Largest n-gram size
    #[arg(long, default_value_t = 1)]
    pub ngram_max: usize,

    /// Use 1 + ln(tf) term frequencies
    #[arg(long)]
    pub sublinear_tf: bool,

    /// Ignore shorter tokens when building the vocabulary
    #[arg(long, default_value_t = DEFAULT_MIN_TOKEN_LEN)]
    pub min_token_len: usize,

    /// Default threshold stored in the model
    #[arg(long)]
    pub threshold: Option<f64>,
}

impl TrainCli {
    /// Preprocessing config shared by the pipeline and the vectorizer.
    pub fn to_config(&self) -> ClassifierConfig {
        ClassifierConfig::default().with_min_token_len(self.min_token_len)
    }

    pub fn to_options(&self) -> TrainOptions {
        TrainOptions {
            epochs: self.epochs,
            learning_rate: self.learning_rate,
            l2: self.l2,
            fit: FitOptions {
                ngram_range: (1, self.ngram_max.max(1)),
                min_df: self.min_df,
                max_features: self.max_features,
                sublinear_tf: self.sublinear_tf,
                ..FitOptions::from_config(&self.to_config())
            },
            threshold: self.threshold,
        }
    }
}

/// Human-readable rendering of a prediction
pub fn render_text(prediction: &Prediction) -> String {
    let mut out = format!(
        "Title: {}\nDescription: {}\nGenre: {}",
        prediction.title,
        prediction.description,
        prediction.genre.join(", ")
    );
    if let Some(scores) = &prediction.scores {
        for s in scores {
            out.push_str(&format!("\n  {:<20} {:.3}", s.genre, s.probability));
        }
    }
    out
}
