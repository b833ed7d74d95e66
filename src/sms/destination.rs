//! Syntactic destination checks.
//!
//! This is a sanity check on the shape of a phone number, not a lookup:
//! whitespace is stripped, then the remainder must be an optional leading `+`
//! followed by at least ten digits, hyphens, or parentheses.

use lazy_static::lazy_static;
use regex::Regex;

lazy_static! {
    static ref PHONE_PATTERN: Regex =
        Regex::new(r"^\+?[0-9\-()]{10,}$").expect("phone pattern is a valid regex");
}

/// Check whether `destination` looks like a phone number
pub fn is_valid_phone_number(destination: &str) -> bool {
    let compact: String = destination.chars().filter(|c| !c.is_whitespace()).collect();
    PHONE_PATTERN.is_match(&compact)
}
