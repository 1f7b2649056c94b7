//! Model artifact types.
//!
//! A [`ModelSpec`] is the serialized form of a trained genre model. It is
//! checked by [`super::validation::ValidationEngine`] before use.
//!
//! # JSON shape
//!
//! ```json
//! {
//!   "v": 1,
//!   "genres": ["Action", "Drama"],
//!   "vectorizer": {
//!     "vocabulary": { "alien": 0, "love": 1 },
//!     "idf": [1.4, 1.4],
//!     "ngram_range": [1, 1],
//!     "sublinear_tf": false,
//!     "min_token_len": 2
//!   },
//!   "classifier": {
//!     "coef": [[2.1, -1.3], [-1.8, 2.4]],
//!     "intercept": [-0.2, -0.1]
//!   },
//!   "threshold": 0.5
//! }
//! ```

use std::collections::{BTreeMap, HashMap};

use serde::{Deserialize, Serialize};

/// Current artifact version.
pub const MODEL_VERSION: u32 = 1;

/// Top-level model artifact (v1).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ModelSpec {
    /// Artifact version (currently `1`).
    pub v: u32,

    /// Genre labels, in classifier row order.
    pub genres: Vec<String>,

    pub vectorizer: VectorizerSpec,

    pub classifier: ClassifierSpec,

    /// Default selection threshold stored alongside the weights.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub threshold: Option<f64>,

    /// If `true`, unrecognized fields are errors; if `false`, warnings.
    #[serde(default)]
    pub strict: bool,

    /// Captures any fields not recognized by the schema.
    #[serde(flatten)]
    pub unknown_fields: HashMap<String, serde_json::Value>,
}

/// TF-IDF vectorizer parameters.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VectorizerSpec {
    /// Term -> feature column, kept sorted so saved artifacts are stable.
    pub vocabulary: BTreeMap<String, usize>,

    /// Inverse document frequency per feature column.
    pub idf: Vec<f64>,

    /// Inclusive `(min, max)` n-gram sizes.
    #[serde(default = "default_ngram_range")]
    pub ngram_range: (usize, usize),

    /// Use `1 + ln(tf)` instead of raw counts.
    #[serde(default)]
    pub sublinear_tf: bool,

    /// Tokens shorter than this are ignored.
    #[serde(default = "default_min_token_len")]
    pub min_token_len: usize,

    #[serde(flatten)]
    pub unknown_fields: HashMap<String, serde_json::Value>,
}

/// One-vs-rest logistic regression weights.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ClassifierSpec {
    /// One row per genre, one column per vocabulary feature.
    pub coef: Vec<Vec<f64>>,

    /// One bias per genre.
    pub intercept: Vec<f64>,

    #[serde(flatten)]
    pub unknown_fields: HashMap<String, serde_json::Value>,
}

fn default_ngram_range() -> (usize, usize) {
    (1, 1)
}

fn default_min_token_len() -> usize {
    2
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_deserialize_minimal_model() {
        let json = r#"{
            "v": 1,
            "genres": ["Action"],
            "vectorizer": { "vocabulary": { "alien": 0 }, "idf": [1.0] },
            "classifier": { "coef": [[1.0]], "intercept": [0.0] }
        }"#;
        let spec: ModelSpec = serde_json::from_str(json).unwrap();
        assert_eq!(spec.v, 1);
        assert_eq!(spec.vectorizer.ngram_range, (1, 1));
        assert_eq!(spec.vectorizer.min_token_len, 2);
        assert!(!spec.vectorizer.sublinear_tf);
        assert!(spec.threshold.is_none());
        assert!(!spec.strict);
    }

    #[test]
    fn test_unknown_fields_captured() {
        let json = r#"{
            "v": 1,
            "genres": ["Action"],
            "trained_on": "imdb",
            "vectorizer": { "vocabulary": {}, "idf": [], "lowercase": true },
            "classifier": { "coef": [[]], "intercept": [0.0], "solver": "lbfgs" }
        }"#;
        let spec: ModelSpec = serde_json::from_str(json).unwrap();
        assert!(spec.unknown_fields.contains_key("trained_on"));
        assert!(spec.vectorizer.unknown_fields.contains_key("lowercase"));
        assert!(spec.classifier.unknown_fields.contains_key("solver"));
    }

    #[test]
    fn test_vocabulary_serializes_in_term_order() {
        let json = r#"{
            "v": 1,
            "genres": ["Action"],
            "vectorizer": { "vocabulary": { "zombie": 0, "alien": 1, "love": 2 }, "idf": [1.0, 1.0, 1.0] },
            "classifier": { "coef": [[1.0, 1.0, 1.0]], "intercept": [0.0] }
        }"#;
        let spec: ModelSpec = serde_json::from_str(json).unwrap();
        let out = serde_json::to_string(&spec.vectorizer.vocabulary).unwrap();
        assert_eq!(out, r#"{"alien":1,"love":2,"zombie":0}"#);
    }

    #[test]
    fn test_ngram_range_serializes_as_pair() {
        let json = r#"{
            "v": 1,
            "genres": ["Action"],
            "vectorizer": { "vocabulary": {}, "idf": [], "ngram_range": [1, 2] },
            "classifier": { "coef": [[]], "intercept": [0.0] }
        }"#;
        let spec: ModelSpec = serde_json::from_str(json).unwrap();
        assert_eq!(spec.vectorizer.ngram_range, (1, 2));
        let back = serde_json::to_value(&spec).unwrap();
        assert_eq!(back["vectorizer"]["ngram_range"], serde_json::json!([1, 2]));
    }
}
