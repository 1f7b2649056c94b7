//! Model training
//!
//! Fits the TF-IDF vectorizer on preprocessed documents, then trains one
//! L2-regularized logistic regression per genre with full-batch gradient
//! descent. Genres are independent, so they train in parallel.

use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;

use rayon::prelude::*;
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use super::classifier::{sigmoid, OneVsRestClassifier};
use super::vectorizer::{FitOptions, SparseVector, TfidfVectorizer};
use super::GenreModel;
use crate::error::{ClassifierError, Result};
use crate::pipeline::runner::TextPipeline;
use crate::pipeline::traits::Preprocessor;

/// One labelled movie
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TrainingExample {
    pub title: String,
    pub description: String,
    pub genres: Vec<String>,
}

/// Read training examples from a JSON Lines file. Blank lines are skipped.
pub fn load_jsonl(path: impl AsRef<Path>) -> Result<Vec<TrainingExample>> {
    let reader = BufReader::new(File::open(path.as_ref())?);
    let mut examples = Vec::new();
    for (line_no, line) in reader.lines().enumerate() {
        let line = line?;
        if line.trim().is_empty() {
            continue;
        }
        let example: TrainingExample = serde_json::from_str(&line).map_err(|e| {
            ClassifierError::training(format!("line {}: {e}", line_no + 1))
        })?;
        examples.push(example);
    }
    Ok(examples)
}

/// Hyperparameters for [`Trainer`]
#[derive(Debug, Clone)]
pub struct TrainOptions {
    pub epochs: usize,
    pub learning_rate: f64,
    /// L2 penalty strength
    pub l2: f64,
    pub fit: FitOptions,
    /// Threshold to store in the artifact
    pub threshold: Option<f64>,
}

impl Default for TrainOptions {
    fn default() -> Self {
        Self {
            epochs: 300,
            learning_rate: 1.0,
            l2: 1e-4,
            fit: FitOptions::default(),
            threshold: None,
        }
    }
}

/// Trains a [`GenreModel`] from labelled examples
pub struct Trainer<'a, Pre> {
    pipeline: &'a TextPipeline<Pre>,
    opts: TrainOptions,
}

impl<'a, Pre: Preprocessor> Trainer<'a, Pre> {
    pub fn new(pipeline: &'a TextPipeline<Pre>, opts: TrainOptions) -> Self {
        Self { pipeline, opts }
    }

    pub fn train(&self, examples: &[TrainingExample]) -> Result<GenreModel> {
        if examples.is_empty() {
            return Err(ClassifierError::training("training set is empty"));
        }
        if let Some(threshold) = self.opts.threshold {
            if !(0.0..=1.0).contains(&threshold) {
                return Err(ClassifierError::training(format!(
                    "threshold must be between 0 and 1, got {threshold}"
                )));
            }
        }
        if let Some(i) = examples.iter().position(|e| e.genres.is_empty()) {
            return Err(ClassifierError::training(format!(
                "example {i} (\"{}\") has no genres",
                examples[i].title
            )));
        }

        let documents: Vec<String> = examples
            .par_iter()
            .map(|e| self.pipeline.transform(&e.title, &e.description).text)
            .collect();

        let vectorizer = TfidfVectorizer::fit(&documents, &self.opts.fit);
        if vectorizer.vocabulary_len() == 0 {
            return Err(ClassifierError::training(
                "vocabulary is empty after preprocessing",
            ));
        }
        let features: Vec<SparseVector> =
            documents.iter().map(|d| vectorizer.transform(d)).collect();

        let mut genres: Vec<String> = examples
            .iter()
            .flat_map(|e| e.genres.iter().cloned())
            .collect();
        genres.sort();
        genres.dedup();

        info!(
            examples = examples.len(),
            genres = genres.len(),
            features = vectorizer.vocabulary_len(),
            "training genre model"
        );

        let n_features = vectorizer.vocabulary_len();
        let (coef, intercept): (Vec<Vec<f64>>, Vec<f64>) = genres
            .par_iter()
            .map(|genre| {
                let labels: Vec<f64> = examples
                    .iter()
                    .map(|e| if e.genres.contains(genre) { 1.0 } else { 0.0 })
                    .collect();
                let (w, b, loss) = self.fit_binary(&features, &labels, n_features);
                debug!(genre = genre.as_str(), loss, "genre classifier trained");
                (w, b)
            })
            .unzip();

        let model = GenreModel::new(
            genres,
            vectorizer,
            OneVsRestClassifier::new(coef, intercept),
            self.opts.threshold,
        );

        // the artifact must load back; diverging weights show up here as non-finite values
        GenreModel::from_spec(&model.to_spec()).map_err(|e| {
            ClassifierError::training(format!("trained model does not validate: {e}"))
        })
    }

    /// Full-batch gradient descent on the L2-regularized log loss.
    ///
    /// Returns weights, bias and the final mean log loss.
    fn fit_binary(
        &self,
        features: &[SparseVector],
        labels: &[f64],
        n_features: usize,
    ) -> (Vec<f64>, f64, f64) {
        let n = features.len() as f64;
        let mut w = vec![0.0; n_features];
        let mut b = 0.0;
        let mut grad = vec![0.0; n_features];

        for _ in 0..self.opts.epochs {
            grad.iter_mut().for_each(|g| *g = 0.0);
            let mut grad_b = 0.0;

            for (x, &y) in features.iter().zip(labels) {
                let err = sigmoid(x.dot(&w) + b) - y;
                for &(col, value) in &x.entries {
                    grad[col] += err * value;
                }
                grad_b += err;
            }

            for (wj, gj) in w.iter_mut().zip(&grad) {
                *wj -= self.opts.learning_rate * (gj / n + self.opts.l2 * *wj);
            }
            b -= self.opts.learning_rate * grad_b / n;
        }

        let loss = features
            .iter()
            .zip(labels)
            .map(|(x, &y)| {
                let p = sigmoid(x.dot(&w) + b).clamp(1e-12, 1.0 - 1e-12);
                -(y * p.ln() + (1.0 - y) * (1.0 - p).ln())
            })
            .sum::<f64>()
            / n;

        (w, b, loss)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::nlp::stopwords::StopwordFilter;

    fn example(title: &str, description: &str, genres: &[&str]) -> TrainingExample {
        TrainingExample {
            title: title.to_string(),
            description: description.to_string(),
            genres: genres.iter().map(|g| g.to_string()).collect(),
        }
    }

    fn corpus() -> Vec<TrainingExample> {
        vec![
            example("Blast", "soldiers fight explosions guns", &["Action"]),
            example("Gunpoint", "guns chase fight soldiers", &["Action"]),
            example("Vows", "wedding love kiss heart", &["Romance"]),
            example("Sweetheart", "love letters heart kiss", &["Romance"]),
        ]
    }

    #[test]
    fn test_trained_model_separates_genres() {
        let pipeline = TextPipeline::default().with_stopwords(StopwordFilter::empty());
        let model = Trainer::new(&pipeline, TrainOptions::default())
            .train(&corpus())
            .unwrap();

        assert_eq!(model.genres(), ["Action", "Romance"]);

        let action = model.score(&pipeline.transform("", "guns and a fight").text);
        assert!(action[0].probability > 0.5);
        assert!(action[1].probability < 0.5);

        let romance = model.score(&pipeline.transform("", "a kiss of love").text);
        assert!(romance[0].probability < 0.5);
        assert!(romance[1].probability > 0.5);
    }

    #[test]
    fn test_trained_model_passes_validation() {
        let pipeline = TextPipeline::default();
        let opts = TrainOptions {
            threshold: Some(0.4),
            ..TrainOptions::default()
        };
        let model = Trainer::new(&pipeline, opts).train(&corpus()).unwrap();
        let spec = model.to_spec();
        assert_eq!(spec.threshold, Some(0.4));
        assert!(GenreModel::from_spec(&spec).is_ok());
    }

    #[test]
    fn test_out_of_range_threshold_is_rejected_before_training() {
        let pipeline = TextPipeline::default();
        let opts = TrainOptions {
            threshold: Some(1.5),
            ..TrainOptions::default()
        };
        let err = Trainer::new(&pipeline, opts).train(&corpus()).unwrap_err();
        assert!(matches!(err, ClassifierError::Training(_)));
        assert!(err.to_string().contains("threshold must be between 0 and 1"));
    }

    #[test]
    fn test_diverging_weights_are_reported() {
        let pipeline = TextPipeline::default();
        let opts = TrainOptions {
            learning_rate: 1e308,
            ..TrainOptions::default()
        };
        let err = Trainer::new(&pipeline, opts).train(&corpus()).unwrap_err();
        assert!(matches!(err, ClassifierError::Training(_)));
        assert!(err.to_string().contains("does not validate"));
    }

    #[test]
    fn test_identical_runs_write_identical_artifacts() {
        let pipeline = TextPipeline::default();
        let first = Trainer::new(&pipeline, TrainOptions::default())
            .train(&corpus())
            .unwrap();
        let second = Trainer::new(&pipeline, TrainOptions::default())
            .train(&corpus())
            .unwrap();
        assert_eq!(
            serde_json::to_string_pretty(&first.to_spec()).unwrap(),
            serde_json::to_string_pretty(&second.to_spec()).unwrap()
        );
    }

    #[test]
    fn test_empty_training_set() {
        let pipeline = TextPipeline::default();
        let err = Trainer::new(&pipeline, TrainOptions::default())
            .train(&[])
            .unwrap_err();
        assert!(err.to_string().contains("empty"));
    }

    #[test]
    fn test_example_without_genres() {
        let pipeline = TextPipeline::default();
        let err = Trainer::new(&pipeline, TrainOptions::default())
            .train(&[example("Nothing", "no labels here", &[])])
            .unwrap_err();
        assert!(err.to_string().contains("has no genres"));
    }

    #[test]
    fn test_empty_vocabulary() {
        let pipeline = TextPipeline::default();
        let err = Trainer::new(&pipeline, TrainOptions::default())
            .train(&[example("!!!", "42 ...", &["Drama"])])
            .unwrap_err();
        assert!(err.to_string().contains("vocabulary is empty"));
    }

    #[test]
    fn test_load_jsonl() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("movies.jsonl");
        std::fs::write(
            &path,
            "{\"title\":\"Up\",\"description\":\"balloons\",\"genres\":[\"Animation\"]}\n\n\
             {\"title\":\"Heat\",\"description\":\"heist\",\"genres\":[\"Crime\",\"Action\"]}\n",
        )
        .unwrap();

        let examples = load_jsonl(&path).unwrap();
        assert_eq!(examples.len(), 2);
        assert_eq!(examples[1].genres, vec!["Crime", "Action"]);
    }

    #[test]
    fn test_load_jsonl_reports_bad_line() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("movies.jsonl");
        std::fs::write(&path, "{\"title\":\"Up\"}\n").unwrap();
        let err = load_jsonl(&path).unwrap_err();
        assert!(err.to_string().contains("line 1"));
    }
}
