//! Fail-soft validation predicates and small formatting helpers
//!
//! The record setters reject bad input by keeping the prior value instead of
//! signalling an error; these predicates decide whether a candidate value is
//! accepted.

use regex::Regex;
use std::sync::OnceLock;

/// True when `value` lies in `[min, max]`, both bounds inclusive.
pub fn valid_range<T: PartialOrd>(value: T, min: T, max: T) -> bool {
    value >= min && value <= max
}

/// True when `index` addresses an element of a collection of `len` items.
pub fn valid_index(index: usize, len: usize) -> bool {
    index < len
}

/// Render a boolean as the single char `Y` or `N`.
pub fn bool_to_yn(value: bool) -> char {
    if value {
        'Y'
    } else {
        'N'
    }
}

/// Truncate a number to two decimal places. Truncates, does not round:
/// `3.339` becomes `3.33`.
pub fn to_two_decimal_places(number: f64) -> f64 {
    (number * 100.0).trunc() / 100.0
}

/// Truncate a string to at most `length` chars, returning it unchanged when
/// already short enough.
pub fn truncate_string(text: &str, length: usize) -> &str {
    match text.char_indices().nth(length) {
        Some((idx, _)) => &text[..idx],
        None => text,
    }
}

/// Check whether `url` looks like a plausible http(s) website URL.
pub fn is_valid_url(url: &str) -> bool {
    static URL_RE: OnceLock<Regex> = OnceLock::new();
    let re = URL_RE.get_or_init(|| {
        Regex::new(
            r"^(https?://)(www\.)?[a-zA-Z0-9@:%._+~#?&/=]{2,256}\.[a-z]{2,6}\b[-a-zA-Z0-9@:%._+~#?&/=]*$",
        )
        .expect("url pattern is valid")
    });
    re.is_match(url)
}
