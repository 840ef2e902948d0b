//! Scraped-text to rate-value parsing.
//!
//! Provider pages surface a rate inside free-form text (`"1 USD = 10.0521
//! MAD"`, `"0,2950"`). Parsing is two steps: capture the first numeric token
//! for the entry's declared decimal style, then normalize it into a
//! [`Decimal`]. Anything that does not yield a well-formed positive number
//! is a [`FetchError::ParseFailure`]; deeper plausibility checks are out of
//! scope.

use lazy_static::lazy_static;
use regex::Regex;
use rust_decimal::Decimal;

use crate::errors::FetchError;
use crate::models::{DecimalStyle, RateKey};

lazy_static! {
    /// First numeric token where `.` separates decimals and `,` groups
    /// thousands, e.g. `1,052.75`.
    static ref DOT_STYLE_TOKEN: Regex =
        Regex::new(r"\d+(?:,\d{3})*(?:\.\d+)?").expect("Invalid regex pattern");

    /// First numeric token where `,` separates decimals and `.` groups
    /// thousands, e.g. `1.052,75`.
    static ref COMMA_STYLE_TOKEN: Regex =
        Regex::new(r"\d+(?:\.\d{3})*(?:,\d+)?").expect("Invalid regex pattern");
}

/// Extracts the rate from one corridor's scraped text.
///
/// `text` is whatever the provider page exposed around the rate; the first
/// numeric token matching the entry's decimal style is taken. The result
/// must be a positive number: zero, negative and empty matches are all
/// rejected so that "no value" can never masquerade as `0`.
pub fn parse_rate(key: &RateKey, text: &str, style: DecimalStyle) -> Result<Decimal, FetchError> {
    let token = match style {
        DecimalStyle::Dot => DOT_STYLE_TOKEN.find(text),
        DecimalStyle::Comma => COMMA_STYLE_TOKEN.find(text),
    }
    .map(|m| m.as_str())
    .ok_or_else(|| FetchError::ParseFailure {
        corridor: key.to_string(),
        detail: format!("no numeric token in {:?}", truncate(text)),
    })?;

    let normalized = normalize_token(token, style);
    let value: Decimal = normalized
        .parse()
        .map_err(|_| FetchError::ParseFailure {
            corridor: key.to_string(),
            detail: format!("token '{}' is not a number", token),
        })?;

    if value <= Decimal::ZERO {
        return Err(FetchError::ParseFailure {
            corridor: key.to_string(),
            detail: format!("non-positive rate '{}'", token),
        });
    }
    Ok(value)
}

/// Strips grouping characters and rewrites the decimal separator to `.` so
/// the token parses as a standard decimal literal.
fn normalize_token(token: &str, style: DecimalStyle) -> String {
    match style {
        DecimalStyle::Dot => token.replace(',', ""),
        DecimalStyle::Comma => token.replace('.', "").replace(',', "."),
    }
}

/// Keeps scraped text loggable; selector misconfiguration can hand back
/// whole page sections.
fn truncate(text: &str) -> String {
    const MAX: usize = 60;
    if text.chars().count() <= MAX {
        text.to_string()
    } else {
        let cut: String = text.chars().take(MAX).collect();
        format!("{cut}…")
    }
}
