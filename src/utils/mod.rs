//! Utility functions and helpers.

pub mod http;

use unicode_segmentation::UnicodeSegmentation;

/// Length as the posting service counts it (Unicode scalar values).
pub fn char_len(s: &str) -> usize {
    s.chars().count()
}

/// Truncate to at most `max` characters without splitting a grapheme.
pub fn truncate_graphemes(s: &str, max: usize) -> String {
    let mut out = String::new();
    let mut len = 0;
    for grapheme in s.graphemes(true) {
        let g_len = char_len(grapheme);
        if len + g_len > max {
            break;
        }
        out.push_str(grapheme);
        len += g_len;
    }
    out
}
