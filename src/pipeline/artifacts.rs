//! Typed intermediate results flowing between pipeline stages.

use crate::types::Token;

/// Token stream produced by the tokenizer and refined by later stages.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TokenStream {
    tokens: Vec<Token>,
}

impl TokenStream {
    pub fn from_tokens(tokens: Vec<Token>) -> Self {
        Self { tokens }
    }

    pub fn tokens(&self) -> &[Token] {
        &self.tokens
    }

    /// Mutable access for preprocessors that rewrite lemmas in place.
    pub fn tokens_mut(&mut self) -> &mut Vec<Token> {
        &mut self.tokens
    }

    pub fn into_tokens(self) -> Vec<Token> {
        self.tokens
    }

    /// Lemmas in stream order
    pub fn lemmas(&self) -> impl Iterator<Item = &str> {
        self.tokens.iter().map(|t| t.lemma.as_str())
    }

    pub fn len(&self) -> usize {
        self.tokens.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tokens.is_empty()
    }
}

/// Final output of the preprocessing pipeline.
///
/// `text` is the space-joined lemma sequence; it is the only thing the
/// vectorizer sees.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ProcessedText {
    pub text: String,
    pub tokens: Vec<Token>,
}

impl ProcessedText {
    pub fn from_stream(stream: TokenStream) -> Self {
        let text = stream.lemmas().collect::<Vec<_>>().join(" ");
        Self {
            text,
            tokens: stream.into_tokens(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.tokens.is_empty()
    }
}
