//! Numeric comparison with tolerance.
//!
//! A tolerance is a signed float:
//! - `t >= 0`: absolute, `|actual - expected| <= t`
//! - `t < 0`: relative, `|actual - expected| <= |t| * |expected|`
//!
//! Special values only match themselves: NaN matches NaN, +inf matches +inf,
//! -inf matches -inf, and a finite value never matches an infinite one.

use crate::config::RELATIVE_TOLERANCE_SUFFIXES;
use crate::error::ToleranceError;
use crate::literal::Literal;

/// Compare two numbers under a tolerance.
pub fn values_match(expected: f64, actual: f64, tolerance: f64) -> bool {
    if expected.is_nan() || actual.is_nan() {
        return expected.is_nan() && actual.is_nan();
    }
    if expected.is_infinite() || actual.is_infinite() {
        return expected == actual;
    }

    let difference = (actual - expected).abs();
    if tolerance >= 0.0 {
        difference <= tolerance
    } else {
        difference <= tolerance.abs() * expected.abs()
    }
}

/// Compare an expected value against an observed one.
///
/// Numbers (integers and floats mixed freely) go through [`values_match`];
/// booleans and text must be exactly equal and ignore the tolerance.
pub fn literal_matches(expected: &Literal, actual: &Literal, tolerance: f64) -> bool {
    match (expected.as_f64(), actual.as_f64()) {
        (Some(expected), Some(actual)) => values_match(expected, actual, tolerance),
        _ => expected == actual,
    }
}

/// Parse scenario tolerance text.
///
/// `"0.1"` is absolute, `"0.1r"` and `"0.1%"` are relative and come back
/// negative (`-0.1`); the percent form keeps the same magnitude.
/// Empty text means no tolerance was given.
pub fn parse_tolerance(text: &str) -> Result<Option<f64>, ToleranceError> {
    let text = text.trim();
    if text.is_empty() {
        return Ok(None);
    }

    let (number, relative) = match text.strip_suffix(RELATIVE_TOLERANCE_SUFFIXES) {
        Some(number) => (number.trim(), true),
        None => (text, false),
    };

    let value: f64 = number
        .parse()
        .map_err(|_| ToleranceError::Invalid(text.to_owned()))?;
    if !value.is_finite() {
        return Err(ToleranceError::NotFinite(text.to_owned()));
    }

    Ok(Some(if relative { -value.abs() } else { value }))
}
