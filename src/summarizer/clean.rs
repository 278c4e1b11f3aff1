//! Text normalization applied before any summarization strategy runs.
//!
//! News search providers cut article bodies short and append a marker such as
//! `[+2345 chars]`. Those markers, stray symbols, and irregular whitespace are
//! removed here so that sentence segmentation and token counting see plain
//! prose.

use once_cell::sync::Lazy;
use regex::Regex;

/// `[+123 chars]`, `[+ 1 char]`, `[+40 characters]` and friends.
static TRUNCATION_MARKER: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"\[\+\s*\d+\s*(?:characters?|chars?)\]")
        .expect("valid truncation marker regex")
});

/// Anything that is not a word character, whitespace, or `. , ! ? -`.
static DISALLOWED: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"[^\w\s.,!?-]").expect("valid disallowed-character regex"));

static WHITESPACE_RUN: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\s+").expect("valid whitespace regex"));

/// Normalize raw article text.
///
/// Steps, in order:
/// 1. remove truncation markers
/// 2. drop characters outside the allowed set
/// 3. collapse whitespace runs to a single space
/// 4. trim
///
/// Whitespace is collapsed after symbols are dropped so that removing a
/// symbol between two spaces cannot leave a double space behind. The result
/// is a fixed point: cleaning it again returns it unchanged.
///
/// # Examples
///
/// ```ignore
/// assert_eq!(clean("[+150 chars]Breaking news today."), "Breaking news today.");
/// ```
pub fn clean(text: &str) -> String {
    let text = TRUNCATION_MARKER.replace_all(text, "");
    let text = DISALLOWED.replace_all(&text, "");
    let text = WHITESPACE_RUN.replace_all(&text, " ");
    text.trim().to_string()
}

/// True when `text` still carries a provider truncation marker.
pub fn has_truncation_marker(text: &str) -> bool {
    TRUNCATION_MARKER.is_match(text)
}
