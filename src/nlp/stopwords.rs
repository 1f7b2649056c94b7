//! Stopword filtering
//!
//! Stopword lists come from the `stop-words` crate, with support for custom
//! lists. Filtering runs on lemmas, after lemmatization.

use rustc_hash::FxHashSet;
use stop_words::{get, LANGUAGE};
use tracing::warn;

use crate::types::Token;

/// A filter for removing stopwords from text
#[derive(Debug, Clone)]
pub struct StopwordFilter {
    /// Set of stopwords (lowercase)
    stopwords: FxHashSet<String>,
    /// Whether the filter is case-sensitive
    case_sensitive: bool,
}

impl Default for StopwordFilter {
    fn default() -> Self {
        Self::new("en")
    }
}

impl StopwordFilter {
    /// Create a new stopword filter for the given language
    ///
    /// Cleaned text is ASCII-only, so only Latin-script languages are offered:
    /// en, de, fr, es, it, pt, nl, sv, no, da, fi
    pub fn new(language: &str) -> Self {
        Self {
            stopwords: Self::load_stopwords(language),
            case_sensitive: false,
        }
    }

    /// Create an empty stopword filter (no filtering)
    pub fn empty() -> Self {
        Self {
            stopwords: FxHashSet::default(),
            case_sensitive: false,
        }
    }

    /// Create a stopword filter from a custom list
    pub fn from_list(words: &[&str]) -> Self {
        Self {
            stopwords: words.iter().map(|w| w.to_lowercase()).collect(),
            case_sensitive: false,
        }
    }

    /// Set case sensitivity
    pub fn with_case_sensitive(mut self, case_sensitive: bool) -> Self {
        self.case_sensitive = case_sensitive;
        self
    }

    /// Add additional stopwords to the filter
    pub fn add_stopwords(&mut self, words: &[&str]) {
        for word in words {
            self.stopwords.insert(word.to_lowercase());
        }
    }

    /// Remove stopwords from the filter
    pub fn remove_stopwords(&mut self, words: &[&str]) {
        for word in words {
            self.stopwords.remove(&word.to_lowercase());
        }
    }

    /// Check if a word is a stopword
    pub fn is_stopword(&self, word: &str) -> bool {
        if self.case_sensitive {
            self.stopwords.contains(word)
        } else {
            self.stopwords.contains(&word.to_lowercase())
        }
    }

    /// Flag stopword tokens (by lemma) and drop them, preserving order
    pub fn filter_tokens(&self, tokens: Vec<Token>) -> Vec<Token> {
        tokens
            .into_iter()
            .filter_map(|mut token| {
                token.is_stopword = self.is_stopword(&token.lemma);
                (!token.is_stopword).then_some(token)
            })
            .collect()
    }

    /// Remove stopwords from a list of words
    pub fn filter_words<S: AsRef<str>>(&self, words: &[S]) -> Vec<String> {
        let mut kept = Vec::with_capacity(words.len());
        for word in words {
            let word: &str = word.as_ref();
            if !self.is_stopword(word) {
                kept.push(word.to_string());
            }
        }
        kept
    }

    /// Get the number of stopwords in the filter
    pub fn len(&self) -> usize {
        self.stopwords.len()
    }

    /// Check if the filter is empty
    pub fn is_empty(&self) -> bool {
        self.stopwords.is_empty()
    }

    /// Load stopwords for a language
    fn load_stopwords(language: &str) -> FxHashSet<String> {
        let lang = match language.to_lowercase().as_str() {
            "en" | "english" => LANGUAGE::English,
            "de" | "german" => LANGUAGE::German,
            "fr" | "french" => LANGUAGE::French,
            "es" | "spanish" => LANGUAGE::Spanish,
            "it" | "italian" => LANGUAGE::Italian,
            "pt" | "portuguese" => LANGUAGE::Portuguese,
            "nl" | "dutch" => LANGUAGE::Dutch,
            "sv" | "swedish" => LANGUAGE::Swedish,
            "no" | "norwegian" => LANGUAGE::Norwegian,
            "da" | "danish" => LANGUAGE::Danish,
            "fi" | "finnish" => LANGUAGE::Finnish,
            other => {
                warn!(language = other, "unsupported stopword language, using English");
                LANGUAGE::English
            }
        };

        get(lang).iter().map(|s| s.to_string()).collect()
    }
}

/// Remove common English stopwords from a list of words
pub fn filter_stopword<S: AsRef<str>>(words: &[S]) -> Vec<String> {
    StopwordFilter::default().filter_words(words)
}
