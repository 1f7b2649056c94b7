//! Text preprocessing pipeline
//!
//! Turns a title and description into the normalized lemma string the
//! vectorizer consumes: clean, tokenize, lemmatize, drop stopwords, then run
//! any custom [`traits::Preprocessor`] hook.

pub mod artifacts;
pub mod observer;
pub mod runner;
pub mod traits;
