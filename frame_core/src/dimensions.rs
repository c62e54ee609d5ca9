//! # Dimension Parsing
//!
//! Customers type measurements the way a tape measure reads them:
//! `"16 1/2"`, `"16.5"`, `"16"` or just `"1/2"`. This module normalizes those
//! strings to real-number inches and formats inches back as a mixed eighth
//! when the value is one, or as the shortest exact decimal otherwise.
//!
//! Malformed input parses to `0.0`. Callers treat zero as "no valid value",
//! never as a literal zero-inch measurement.
//!
//! ## Example
//!
//! ```rust
//! use frame_core::dimensions::{format_dimension, parse_dimension};
//!
//! assert_eq!(parse_dimension("16 1/2"), parse_dimension("16.5"));
//! assert_eq!(format_dimension(12.5), "12 1/2");
//! assert_eq!(format_dimension(11.69), "11.69");
//! assert_eq!(format_dimension(10.1875), "10.1875");
//! ```

use serde::{Deserialize, Serialize};

/// Minimum artwork dimension accepted for user-sized layouts (inches)
pub const MIN_ARTWORK_IN: f64 = 4.0;

/// Minimum interior (artwork + mat) dimension (inches)
pub const MIN_INTERIOR_IN: f64 = 4.0;

/// Eighth-inch fractions a framer reads off a tape
const COMMON_FRACTIONS: [(u32, &str); 7] = [
    (1, "1/8"),
    (2, "1/4"),
    (3, "3/8"),
    (4, "1/2"),
    (5, "5/8"),
    (6, "3/4"),
    (7, "7/8"),
];

/// Parse a user-entered measurement into inches.
///
/// Accepts whole numbers, decimals, mixed fractions and bare fractions.
/// Anything else (including zero or negative denominators and negative
/// values) yields `0.0`.
pub fn parse_dimension(input: &str) -> f64 {
    let value = parse_parts(input.trim()).unwrap_or(0.0);
    if value.is_finite() && value > 0.0 {
        value
    } else {
        0.0
    }
}

fn parse_parts(cleaned: &str) -> Option<f64> {
    // Trailing inch mark as written in cart attributes
    let cleaned = cleaned.trim_end_matches('"').trim();
    if cleaned.is_empty() {
        return None;
    }

    let parts: Vec<&str> = cleaned.split_whitespace().collect();
    match parts.as_slice() {
        [single] if single.contains('/') => parse_fraction(single),
        [single] => parse_number(single),
        [whole, fraction] => {
            if !whole.chars().all(|c| c.is_ascii_digit()) {
                return None;
            }
            let whole: f64 = whole.parse().ok()?;
            Some(whole + parse_fraction(fraction)?)
        }
        _ => None,
    }
}

fn parse_number(s: &str) -> Option<f64> {
    // Reject forms f64::from_str accepts but a tape never shows
    if !s.chars().all(|c| c.is_ascii_digit() || c == '.') {
        return None;
    }
    s.parse::<f64>().ok()
}

fn parse_fraction(s: &str) -> Option<f64> {
    let (num, den) = s.split_once('/')?;
    let num: u32 = num.trim().parse().ok()?;
    let den: u32 = den.trim().parse().ok()?;
    if den == 0 {
        return None;
    }
    Some(f64::from(num) / f64::from(den))
}

/// Format inches as a framer would write them.
///
/// Whole numbers print bare and exact eighth-inch remainders print as a
/// mixed fraction. Anything else prints as the shortest decimal that parses
/// back to the same value, so `parse_dimension(&format_dimension(v)) == v`
/// for every positive finite `v`.
pub fn format_dimension(value: f64) -> String {
    if !value.is_finite() {
        return "0".to_string();
    }
    let whole = value.floor();
    let remainder = value - whole;
    if remainder == 0.0 {
        return format!("{}", whole);
    }

    let eighths = remainder * 8.0;
    if eighths == eighths.round() {
        let eighths = eighths as u32;
        if let Some((_, fraction)) = COMMON_FRACTIONS.iter().find(|(n, _)| *n == eighths) {
            return if whole == 0.0 {
                (*fraction).to_string()
            } else {
                format!("{} {}", whole, fraction)
            };
        }
    }

    format!("{}", value)
}

/// Format inches with a trailing inch mark for line-item attributes
/// (`12.5"`). Uses the shortest decimal representation.
pub fn format_inches(value: f64) -> String {
    format!("{}\"", value)
}

/// Outcome of checking artwork against the minimum size.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SizeCheck {
    pub valid: bool,
    pub message: Option<String>,
}

/// Validate artwork dimensions against a minimum.
pub fn validate_artwork_size(width_in: f64, height_in: f64, min_in: f64) -> SizeCheck {
    let width_ok = width_in >= min_in;
    let height_ok = height_in >= min_in;
    let min = format_dimension(min_in);

    let message = match (width_ok, height_ok) {
        (true, true) => None,
        (false, false) => Some(format!(
            "Artwork must be at least {min}\u{d7}{min} inches. Current: {}\u{d7}{}\"",
            format_dimension(width_in),
            format_dimension(height_in)
        )),
        (false, true) => Some(format!(
            "Width must be at least {min} inches. Current: {}\"",
            format_dimension(width_in)
        )),
        (true, false) => Some(format!(
            "Height must be at least {min} inches. Current: {}\"",
            format_dimension(height_in)
        )),
    };

    SizeCheck {
        valid: message.is_none(),
        message,
    }
}

/// Mat border needed to bring small artwork up to the minimum interior,
/// rounded up to the nearest 1/8".
pub fn required_mat_border(width_in: f64, height_in: f64) -> f64 {
    let width_deficit = (MIN_INTERIOR_IN - width_in).max(0.0);
    let height_deficit = (MIN_INTERIOR_IN - height_in).max(0.0);
    let border = width_deficit.max(height_deficit) / 2.0;
    (border * 8.0).ceil() / 8.0
}
