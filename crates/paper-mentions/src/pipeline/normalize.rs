//! Text normalization for overlap comparison.

use std::collections::HashSet;
use std::sync::LazyLock;

use regex::Regex;

/// Everything except word characters, whitespace, and `@`.
static PUNCTUATION: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[^\w\s@]").expect("valid punctuation regex"));

/// Convert free text into a set of significant tokens.
///
/// Lowercases, strips punctuation, splits on whitespace, and drops hashtag
/// and handle tokens; those are structural, not topical, so they carry no
/// signal for overlap comparison. Pure and deterministic.
#[must_use]
pub fn normalize(text: &str) -> HashSet<String> {
    let lowered = text.to_lowercase();
    let stripped = PUNCTUATION.replace_all(&lowered, "");
    stripped
        .split_whitespace()
        .filter(|w| !w.starts_with('#') && !w.starts_with('@'))
        .map(str::to_string)
        .collect()
}
