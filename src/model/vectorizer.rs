//! TF-IDF feature extraction
//!
//! Converts normalized text into an L2-normalized sparse TF-IDF vector over a
//! fixed vocabulary. Fitting uses smooth idf: `ln((1 + n) / (1 + df)) + 1`.

use std::collections::HashMap;

use rustc_hash::FxHashMap;

use super::spec::VectorizerSpec;
use crate::types::{ClassifierConfig, DEFAULT_MIN_TOKEN_LEN};

/// Sparse vector as `(column, value)` pairs sorted by column.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SparseVector {
    pub entries: Vec<(usize, f64)>,
}

impl SparseVector {
    /// Dot product with a dense weight row
    pub fn dot(&self, dense: &[f64]) -> f64 {
        self.entries
            .iter()
            .map(|&(col, value)| dense.get(col).copied().unwrap_or(0.0) * value)
            .sum()
    }

    pub fn norm(&self) -> f64 {
        self.entries.iter().map(|(_, v)| v * v).sum::<f64>().sqrt()
    }

    /// Number of non-zero entries
    pub fn nnz(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// Options for [`TfidfVectorizer::fit`]
#[derive(Debug, Clone)]
pub struct FitOptions {
    /// Inclusive `(min, max)` n-gram sizes
    pub ngram_range: (usize, usize),
    /// Minimum number of documents a term must appear in
    pub min_df: usize,
    /// Keep only the most frequent terms
    pub max_features: Option<usize>,
    pub sublinear_tf: bool,
    pub min_token_len: usize,
}

impl Default for FitOptions {
    fn default() -> Self {
        Self {
            ngram_range: (1, 1),
            min_df: 1,
            max_features: None,
            sublinear_tf: false,
            min_token_len: DEFAULT_MIN_TOKEN_LEN,
        }
    }
}

impl FitOptions {
    /// Defaults with the token length taken from the runtime config
    pub fn from_config(cfg: &ClassifierConfig) -> Self {
        Self {
            min_token_len: cfg.min_token_len,
            ..Self::default()
        }
    }
}

/// A fitted TF-IDF vectorizer
#[derive(Debug, Clone)]
pub struct TfidfVectorizer {
    vocabulary: FxHashMap<String, usize>,
    idf: Vec<f64>,
    ngram_range: (usize, usize),
    sublinear_tf: bool,
    min_token_len: usize,
}

impl TfidfVectorizer {
    /// Build from a validated artifact section
    pub fn from_spec(spec: &VectorizerSpec) -> Self {
        Self {
            vocabulary: spec
                .vocabulary
                .iter()
                .map(|(term, &col)| (term.clone(), col))
                .collect(),
            idf: spec.idf.clone(),
            ngram_range: spec.ngram_range,
            sublinear_tf: spec.sublinear_tf,
            min_token_len: spec.min_token_len,
        }
    }

    pub fn to_spec(&self) -> VectorizerSpec {
        VectorizerSpec {
            vocabulary: self
                .vocabulary
                .iter()
                .map(|(term, &col)| (term.clone(), col))
                .collect(),
            idf: self.idf.clone(),
            ngram_range: self.ngram_range,
            sublinear_tf: self.sublinear_tf,
            min_token_len: self.min_token_len,
            unknown_fields: HashMap::new(),
        }
    }

    /// Learn vocabulary and idf weights from preprocessed documents.
    ///
    /// Columns are assigned in alphabetical term order.
    pub fn fit<S: AsRef<str>>(documents: &[S], opts: &FitOptions) -> Self {
        let mut df: FxHashMap<String, usize> = FxHashMap::default();
        for doc in documents {
            let mut terms = analyze(doc.as_ref(), opts.ngram_range, opts.min_token_len);
            terms.sort_unstable();
            terms.dedup();
            for term in terms {
                *df.entry(term).or_insert(0) += 1;
            }
        }

        let mut kept: Vec<(String, usize)> = df
            .into_iter()
            .filter(|(_, count)| *count >= opts.min_df)
            .collect();

        if let Some(max) = opts.max_features {
            kept.sort_by(|a, b| b.1.cmp(&a.1).then_with(|| a.0.cmp(&b.0)));
            kept.truncate(max);
        }
        kept.sort_by(|a, b| a.0.cmp(&b.0));

        let n = documents.len() as f64;
        let idf = kept
            .iter()
            .map(|(_, count)| ((1.0 + n) / (1.0 + *count as f64)).ln() + 1.0)
            .collect();
        let vocabulary = kept
            .into_iter()
            .enumerate()
            .map(|(col, (term, _))| (term, col))
            .collect();

        Self {
            vocabulary,
            idf,
            ngram_range: opts.ngram_range,
            sublinear_tf: opts.sublinear_tf,
            min_token_len: opts.min_token_len,
        }
    }

    /// Vectorize one preprocessed document
    pub fn transform(&self, text: &str) -> SparseVector {
        let mut counts: FxHashMap<usize, f64> = FxHashMap::default();
        for term in analyze(text, self.ngram_range, self.min_token_len) {
            if let Some(&col) = self.vocabulary.get(&term) {
                *counts.entry(col).or_insert(0.0) += 1.0;
            }
        }

        let mut entries: Vec<(usize, f64)> = counts
            .into_iter()
            .map(|(col, tf)| {
                let tf = if self.sublinear_tf { 1.0 + tf.ln() } else { tf };
                (col, tf * self.idf.get(col).copied().unwrap_or(0.0))
            })
            .collect();
        entries.sort_by_key(|&(col, _)| col);

        let norm = entries.iter().map(|(_, v)| v * v).sum::<f64>().sqrt();
        if norm > 0.0 {
            for (_, value) in &mut entries {
                *value /= norm;
            }
        }

        SparseVector { entries }
    }

    pub fn vocabulary_len(&self) -> usize {
        self.idf.len()
    }

    pub fn column(&self, term: &str) -> Option<usize> {
        self.vocabulary.get(term).copied()
    }
}

/// Split text into the terms the vocabulary is keyed on.
///
/// Unigrams shorter than `min_token_len` are dropped before n-grams are
/// formed; n-grams are space-joined.
pub fn analyze(text: &str, ngram_range: (usize, usize), min_token_len: usize) -> Vec<String> {
    let words: Vec<&str> = text
        .split_whitespace()
        .filter(|w| w.chars().count() >= min_token_len)
        .collect();

    let (min_n, max_n) = ngram_range;
    let mut terms = Vec::new();
    for n in min_n.max(1)..=max_n {
        if n > words.len() {
            break;
        }
        terms.extend(words.windows(n).map(|w| w.join(" ")));
    }
    terms
}

#[cfg(test)]
mod tests {
    use super::*;

    fn approx(a: f64, b: f64) -> bool {
        (a - b).abs() < 1e-9
    }

    #[test]
    fn test_analyze_drops_short_tokens_and_builds_ngrams() {
        let terms = analyze("a hero saves a city", (1, 2), 2);
        assert_eq!(
            terms,
            vec!["hero", "saves", "city", "hero saves", "saves city"]
        );
    }

    #[test]
    fn test_fit_assigns_alphabetical_columns_and_smooth_idf() {
        let docs = ["alien army", "alien love", "love story"];
        let v = TfidfVectorizer::fit(&docs, &FitOptions::default());

        assert_eq!(v.vocabulary_len(), 4);
        assert_eq!(v.column("alien"), Some(0));
        assert_eq!(v.column("army"), Some(1));
        assert_eq!(v.column("love"), Some(2));
        assert_eq!(v.column("story"), Some(3));

        // df(alien) = 2 of 3 docs
        assert!(approx(v.idf[0], (4.0f64 / 3.0).ln() + 1.0));
        // df(army) = 1
        assert!(approx(v.idf[1], 2.0f64.ln() + 1.0));
    }

    #[test]
    fn test_min_df_and_max_features() {
        let docs = ["alien army", "alien love", "love story", "alien"];
        let opts = FitOptions {
            min_df: 2,
            ..FitOptions::default()
        };
        let v = TfidfVectorizer::fit(&docs, &opts);
        assert_eq!(v.vocabulary_len(), 2);
        assert!(v.column("army").is_none());

        let opts = FitOptions {
            max_features: Some(1),
            ..FitOptions::default()
        };
        let v = TfidfVectorizer::fit(&docs, &opts);
        assert_eq!(v.vocabulary_len(), 1);
        assert_eq!(v.column("alien"), Some(0));
    }

    #[test]
    fn test_configured_min_token_len_is_fitted() {
        let cfg = ClassifierConfig::default().with_min_token_len(4);
        let v = TfidfVectorizer::fit(&["war of the alien army"], &FitOptions::from_config(&cfg));
        assert!(v.column("war").is_none());
        assert!(v.column("alien").is_some());
        assert_eq!(v.to_spec().min_token_len, 4);
    }

    #[test]
    fn test_transform_is_unit_length() {
        let v = TfidfVectorizer::fit(&["alien army", "love story"], &FitOptions::default());
        let x = v.transform("alien alien army");
        assert_eq!(x.nnz(), 2);
        assert!(approx(x.norm(), 1.0));
        // the repeated term dominates
        assert!(x.entries[0].1 > x.entries[1].1);
    }

    #[test]
    fn test_out_of_vocabulary_is_zero_vector() {
        let v = TfidfVectorizer::fit(&["alien army"], &FitOptions::default());
        let x = v.transform("romance wedding");
        assert!(x.is_empty());
        assert_eq!(x.dot(&[1.0, 1.0]), 0.0);
    }

    #[test]
    fn test_sublinear_tf_dampens_repeats() {
        let opts = FitOptions {
            sublinear_tf: true,
            ..FitOptions::default()
        };
        let v = TfidfVectorizer::fit(&["alien army"], &opts);
        let x = v.transform("alien alien alien alien army");
        let ratio = x.entries[0].1 / x.entries[1].1;
        assert!(approx(ratio, 1.0 + 4.0f64.ln()));
    }

    #[test]
    fn test_spec_round_trip_preserves_behavior() {
        let v = TfidfVectorizer::fit(&["alien army", "love story"], &FitOptions::default());
        let restored = TfidfVectorizer::from_spec(&v.to_spec());
        assert_eq!(v.transform("alien love"), restored.transform("alien love"));
    }
}
