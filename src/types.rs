//! Core types shared across the crate.

use serde::{Deserialize, Serialize};

/// Probability a genre must reach to be selected when nothing else says otherwise.
pub const DEFAULT_THRESHOLD: f64 = 0.5;

/// Shortest token the vectorizer keeps when none is configured.
pub const DEFAULT_MIN_TOKEN_LEN: usize = 2;

/// A single token produced by the preprocessing pipeline
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Token {
    /// The cleaned surface form
    pub text: String,
    /// The lemma (equal to `text` until the lemmatizer runs)
    pub lemma: String,
    /// Position in the token stream
    pub index: usize,
    /// Whether the stopword filter flagged this token
    pub is_stopword: bool,
}

impl Token {
    /// Create a new token whose lemma is initially its surface form
    pub fn new(text: impl Into<String>, index: usize) -> Self {
        let text = text.into();
        Self {
            lemma: text.clone(),
            text,
            index,
            is_stopword: false,
        }
    }
}

/// Runtime configuration for preprocessing and genre selection
#[derive(Debug, Clone, PartialEq)]
pub struct ClassifierConfig {
    /// Minimum probability for a genre to be selected
    pub threshold: f64,
    /// Return the single most probable genre when none reaches the threshold
    pub fallback_to_top: bool,
    /// Stopword language code (e.g. "en")
    pub language: String,
    /// Include per-genre probabilities in the prediction
    pub include_scores: bool,
    /// Shortest token fed to a vectorizer being fitted. A loaded model keeps
    /// the value it was trained with.
    pub min_token_len: usize,
}

impl Default for ClassifierConfig {
    fn default() -> Self {
        Self {
            threshold: DEFAULT_THRESHOLD,
            fallback_to_top: true,
            language: "en".to_string(),
            include_scores: false,
            min_token_len: DEFAULT_MIN_TOKEN_LEN,
        }
    }
}

impl ClassifierConfig {
    pub fn with_threshold(mut self, threshold: f64) -> Self {
        self.threshold = threshold;
        self
    }

    pub fn with_fallback_to_top(mut self, fallback: bool) -> Self {
        self.fallback_to_top = fallback;
        self
    }

    pub fn with_language(mut self, language: impl Into<String>) -> Self {
        self.language = language.into();
        self
    }

    pub fn with_scores(mut self, include: bool) -> Self {
        self.include_scores = include;
        self
    }

    pub fn with_min_token_len(mut self, min_token_len: usize) -> Self {
        self.min_token_len = min_token_len;
        self
    }
}

/// Probability assigned to one genre
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GenreScore {
    pub genre: String,
    pub probability: f64,
}

/// The public-facing prediction: inputs echoed back with the selected genres.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Prediction {
    pub title: String,
    pub description: String,
    pub genre: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub scores: Option<Vec<GenreScore>>,
}
