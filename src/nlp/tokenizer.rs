//! Tokenization
//!
//! Cleaned text contains only lowercase letters and single spaces, so word
//! boundaries are whitespace boundaries.

use crate::types::Token;

/// Split cleaned text into tokens
#[derive(Debug, Clone, Copy, Default)]
pub struct Tokenizer;

impl Tokenizer {
    pub fn new() -> Self {
        Self
    }

    /// Tokenize text into a vector of tokens
    pub fn tokenize(&self, text: &str) -> Vec<Token> {
        text.split_whitespace()
            .enumerate()
            .map(|(index, word)| Token::new(word, index))
            .collect()
    }
}
