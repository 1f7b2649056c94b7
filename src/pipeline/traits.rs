//! Stage trait definitions for the pipeline.

use crate::pipeline::artifacts::TokenStream;
use crate::types::ClassifierConfig;

// ============================================================================
// Preprocessor — optional token normalization after stopword removal
// ============================================================================

/// Optional hook that runs after the built-in stages.
///
/// # Contract
///
/// - **Input**: a mutable [`TokenStream`] of lemmatized, stopword-free tokens.
/// - **Output**: none — the stream is mutated.
/// - **Idempotent**: calling `preprocess` twice should produce the same
///   result as calling it once.
///
/// Anything a preprocessor changes must be applied identically at training
/// and prediction time, otherwise the vocabulary will not line up.
pub trait Preprocessor: Send + Sync {
    fn preprocess(&self, tokens: &mut TokenStream, cfg: &ClassifierConfig);
}

/// No-op preprocessor — the default.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoopPreprocessor;

impl Preprocessor for NoopPreprocessor {
    #[inline]
    fn preprocess(&self, _tokens: &mut TokenStream, _cfg: &ClassifierConfig) {}
}

/// Drops tokens whose lemma is shorter than `min_len` characters.
#[derive(Debug, Clone, Copy)]
pub struct MinLengthPreprocessor {
    pub min_len: usize,
}

impl Preprocessor for MinLengthPreprocessor {
    fn preprocess(&self, tokens: &mut TokenStream, _cfg: &ClassifierConfig) {
        tokens
            .tokens_mut()
            .retain(|t| t.lemma.chars().count() >= self.min_len);
    }
}
