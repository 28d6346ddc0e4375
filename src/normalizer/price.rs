//! Minimum / maximum extraction from free-text display prices.
//!
//! Handles the shapes agents actually type: `"$950,000 - $1,050,000"`,
//! `"950,000-1,050,000"`, `"950 ,000-1,050,000"` and
//! `"$1,300,000 to $1,400,000"`.

use crate::error::ParseError;
use regex::Regex;
use std::sync::LazyLock;

// ASCII only: `\d` would also take other scripts' digits into the run.
static DIGIT_RUN: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"[0-9]+").unwrap());

/// Drop currency symbols, thousands separators and whitespace.
fn clean(text: &str) -> String {
    text.chars()
        .filter(|c| *c != '$' && *c != ',' && !c.is_whitespace())
        .collect()
}

/// The `position`-th digit run of the cleaned text.
///
/// Runs are counted across the whole string rather than per `-` segment, so
/// ranges written with "to" resolve the same way as dashed ranges.
fn nth_price(text: &str, position: usize) -> Result<u64, ParseError> {
    let cleaned = clean(text);
    let run = DIGIT_RUN
        .find_iter(&cleaned)
        .nth(position)
        .ok_or_else(|| ParseError::NoPrice {
            text: text.to_string(),
            position,
        })?;
    run.as_str().parse().map_err(|_| ParseError::Overflow {
        text: text.to_string(),
        digits: run.as_str().to_string(),
    })
}

/// Lower bound of a display price; the only price for single-price text.
pub fn minimum(text: &str) -> Result<u64, ParseError> {
    nth_price(text, 0)
}

/// Upper bound of a display price range.
pub fn maximum(text: &str) -> Result<u64, ParseError> {
    nth_price(text, 1)
}

pub fn min_max(text: &str) -> Result<(u64, u64), ParseError> {
    Ok((minimum(text)?, maximum(text)?))
}
