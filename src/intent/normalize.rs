//! Input normalization.
// Allow expect() on static regex patterns - these are guaranteed to compile
#![allow(clippy::expect_used)]

use regex::Regex;
use std::sync::LazyLock;

static WHITESPACE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\s+").expect("static regex: whitespace run"));

/// Trims and collapses internal whitespace runs to single spaces.
#[must_use]
pub fn normalize(input: &str) -> String {
    WHITESPACE.replace_all(input.trim(), " ").into_owned()
}

/// Title-cases a phrase.
///
/// A letter is upper-cased when it follows a non-letter (or starts the
/// string) and lower-cased otherwise, so `shaquille o'neal` becomes
/// `Shaquille O'Neal` and `LEBRON` becomes `Lebron`.
#[must_use]
pub fn title_case(input: &str) -> String {
    let mut out = String::with_capacity(input.len());
    let mut after_letter = false;
    for c in input.chars() {
        if c.is_alphabetic() {
            if after_letter {
                out.extend(c.to_lowercase());
            } else {
                out.extend(c.to_uppercase());
            }
            after_letter = true;
        } else {
            out.push(c);
            after_letter = false;
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use test_case::test_case;

    #[test_case("  LeBron   James ", "LeBron James" ; "outer and inner spaces")]
    #[test_case("who\thas\nthe most points", "who has the most points" ; "mixed whitespace")]
    #[test_case("", "" ; "empty")]
    #[test_case("   ", "" ; "blank")]
    fn test_normalize(input: &str, expected: &str) {
        assert_eq!(normalize(input), expected);
    }

    #[test_case("lebron james", "Lebron James" ; "lowercase")]
    #[test_case("LOS ANGELES LAKERS", "Los Angeles Lakers" ; "uppercase")]
    #[test_case("shaquille o'neal", "Shaquille O'Neal" ; "apostrophe")]
    #[test_case("karl-anthony towns", "Karl-Anthony Towns" ; "hyphen")]
    #[test_case("76ers", "76Ers" ; "leading digits")]
    fn test_title_case(input: &str, expected: &str) {
        assert_eq!(title_case(input), expected);
    }
}
