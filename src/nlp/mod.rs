//! Natural Language Processing components
//!
//! This module provides text cleaning, tokenization, lemmatization and
//! stopword filtering.

pub mod cleaner;
pub mod lemmatizer;
pub mod stopwords;
pub mod tokenizer;
