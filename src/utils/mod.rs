// src/utils/mod.rs

//! Utility functions and helpers.

pub mod http;

/// Truncate `text` to at most `max_chars` characters.
pub fn preview(text: &str, max_chars: usize) -> &str {
    match text.char_indices().nth(max_chars) {
        Some((idx, _)) => &text[..idx],
        None => text,
    }
}
