//! Basic text cleaning
//!
//! Reduces free text to lowercase ASCII words separated by single spaces.

/// Clean a piece of text.
///
/// Underscores become spaces and apostrophes are dropped (so contractions and
/// possessives stay one word). Every remaining character that is not an ASCII
/// letter becomes a space, whitespace runs collapse, and the result is
/// lowercased.
pub fn clean_text(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    let mut pending_space = false;

    for ch in text.chars() {
        if ch == '\'' {
            continue;
        }
        if ch.is_ascii_alphabetic() {
            if pending_space && !out.is_empty() {
                out.push(' ');
            }
            pending_space = false;
            out.push(ch.to_ascii_lowercase());
        } else {
            pending_space = true;
        }
    }

    out
}
