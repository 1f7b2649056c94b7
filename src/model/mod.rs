//! Trained genre model
//!
//! Ties together the artifact ([`spec`]), its validation, the TF-IDF
//! [`vectorizer`] and the one-vs-rest [`classifier`].

pub mod classifier;
pub mod spec;
pub mod train;
pub mod validation;
pub mod vectorizer;

use std::collections::HashMap;
use std::fs;
use std::path::Path;

use tracing::{debug, info, warn};

use crate::error::{ClassifierError, Result};
use crate::types::GenreScore;
use classifier::OneVsRestClassifier;
use spec::{ModelSpec, MODEL_VERSION};
use validation::ValidationEngine;
use vectorizer::TfidfVectorizer;

/// A validated, ready-to-use genre model
#[derive(Debug, Clone)]
pub struct GenreModel {
    genres: Vec<String>,
    vectorizer: TfidfVectorizer,
    classifier: OneVsRestClassifier,
    threshold: Option<f64>,
}

impl GenreModel {
    /// Assemble a model from fitted parts without going through an artifact.
    pub fn new(
        genres: Vec<String>,
        vectorizer: TfidfVectorizer,
        classifier: OneVsRestClassifier,
        threshold: Option<f64>,
    ) -> Self {
        Self {
            genres,
            vectorizer,
            classifier,
            threshold,
        }
    }

    /// Validate an artifact and build the model from it.
    ///
    /// Warnings are logged; any error aborts with every problem listed.
    pub fn from_spec(spec: &ModelSpec) -> Result<Self> {
        let report = ValidationEngine::with_defaults().validate(spec);
        for warning in report.warnings() {
            warn!(%warning, "model artifact warning");
        }
        if report.has_errors() {
            return Err(ClassifierError::InvalidModel {
                problems: report.errors().map(ToString::to_string).collect(),
            });
        }

        Ok(Self {
            genres: spec.genres.clone(),
            vectorizer: TfidfVectorizer::from_spec(&spec.vectorizer),
            classifier: OneVsRestClassifier::from_spec(&spec.classifier),
            threshold: spec.threshold,
        })
    }

    /// Load and validate a model artifact from disk.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        if !path.exists() {
            return Err(ClassifierError::ModelNotFound(path.to_path_buf()));
        }
        let raw = fs::read_to_string(path)?;
        let spec: ModelSpec = serde_json::from_str(&raw)?;
        let model = Self::from_spec(&spec)?;
        info!(
            path = %path.display(),
            genres = model.genres.len(),
            features = model.vectorizer.vocabulary_len(),
            "model loaded"
        );
        Ok(model)
    }

    /// Write the model as pretty-printed JSON.
    pub fn save(&self, path: impl AsRef<Path>) -> Result<()> {
        let path = path.as_ref();
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent)?;
        }
        let json = serde_json::to_string_pretty(&self.to_spec())?;
        fs::write(path, json)?;
        debug!(path = %path.display(), "model saved");
        Ok(())
    }

    pub fn to_spec(&self) -> ModelSpec {
        ModelSpec {
            v: MODEL_VERSION,
            genres: self.genres.clone(),
            vectorizer: self.vectorizer.to_spec(),
            classifier: self.classifier.to_spec(),
            threshold: self.threshold,
            strict: false,
            unknown_fields: HashMap::new(),
        }
    }

    /// Probability per genre for preprocessed text, in genre order.
    pub fn score(&self, processed_text: &str) -> Vec<GenreScore> {
        let x = self.vectorizer.transform(processed_text);
        debug!(nnz = x.nnz(), "vectorized input");
        self.genres
            .iter()
            .zip(self.classifier.predict_proba(&x))
            .map(|(genre, probability)| GenreScore {
                genre: genre.clone(),
                probability,
            })
            .collect()
    }

    pub fn genres(&self) -> &[String] {
        &self.genres
    }

    /// Threshold stored in the artifact, if any
    pub fn threshold(&self) -> Option<f64> {
        self.threshold
    }

    pub fn vectorizer(&self) -> &TfidfVectorizer {
        &self.vectorizer
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tiny_spec() -> ModelSpec {
        serde_json::from_str(
            r#"{
                "v": 1,
                "genres": ["Action", "Romance"],
                "vectorizer": { "vocabulary": { "fight": 0, "love": 1 }, "idf": [1.0, 1.0] },
                "classifier": { "coef": [[5.0, -5.0], [-5.0, 5.0]], "intercept": [0.0, 0.0] },
                "threshold": 0.4
            }"#,
        )
        .unwrap()
    }

    #[test]
    fn test_score_follows_weights() {
        let model = GenreModel::from_spec(&tiny_spec()).unwrap();
        let scores = model.score("fight fight");
        assert_eq!(scores[0].genre, "Action");
        assert!(scores[0].probability > 0.99);
        assert!(scores[1].probability < 0.01);
        assert_eq!(model.threshold(), Some(0.4));
    }

    #[test]
    fn test_invalid_spec_is_rejected_with_all_problems() {
        let mut spec = tiny_spec();
        spec.classifier.intercept.pop();
        spec.threshold = Some(-1.0);
        let err = GenreModel::from_spec(&spec).unwrap_err();
        match err {
            ClassifierError::InvalidModel { problems } => assert_eq!(problems.len(), 2),
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_save_and_load() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("model.json");

        let model = GenreModel::from_spec(&tiny_spec()).unwrap();
        model.save(&path).unwrap();
        let loaded = GenreModel::load(&path).unwrap();

        assert_eq!(loaded.genres(), model.genres());
        assert_eq!(loaded.score("love"), model.score("love"));
    }

    #[test]
    fn test_missing_file() {
        let err = GenreModel::load("/definitely/not/here.json").unwrap_err();
        assert!(matches!(err, ClassifierError::ModelNotFound(_)));
    }

    #[test]
    fn test_malformed_json() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("model.json");
        std::fs::write(&path, "{ not json").unwrap();
        assert!(matches!(
            GenreModel::load(&path).unwrap_err(),
            ClassifierError::Json(_)
        ));
    }
}
