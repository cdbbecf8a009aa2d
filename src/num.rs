//! Exact coordinates.
//!
//! Every coordinate that goes into a boolean operation is a
//! [`malachite::Rational`], so that orientation tests and intersection points
//! are computed without rounding. Floating point only shows up at the edges:
//! when printing, and when handing paths to a renderer.

use malachite::num::conversion::traits::RoundingFrom;
use malachite::rounding_modes::RoundingMode;
use malachite::{Integer, Rational};

/// The input couldn't be understood as an exact coordinate.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum ParseCoordError {
    /// Not an integer, decimal, or fraction.
    #[error("invalid coordinate {0:?}")]
    Invalid(String),
    /// A fraction with a zero denominator.
    #[error("zero denominator in {0:?}")]
    ZeroDenominator(String),
    /// A point that wasn't of the form `x,y`.
    #[error("expected a point of the form `x,y`, found {0:?}")]
    MalformedPoint(String),
    /// A float that was infinite or NaN.
    #[error("coordinate is not finite")]
    NotFinite,
}

/// Parses an exact rational.
///
/// Accepts integers (`-3`), decimals (`3.5`, `.25`), and fractions whose
/// numerator and denominator are themselves integers or decimals (`7/2`,
/// `1.5/3`). Decimals are parsed exactly, so `0.1` really is one tenth.
pub fn parse_exact(s: &str) -> Result<Rational, ParseCoordError> {
    let s = s.trim();
    match s.split_once('/') {
        Some((num, den)) => {
            let num = parse_decimal(num.trim(), s)?;
            let den = parse_decimal(den.trim(), s)?;
            if den == Rational::from(0) {
                return Err(ParseCoordError::ZeroDenominator(s.to_owned()));
            }
            Ok(num / den)
        }
        None => parse_decimal(s, s),
    }
}

fn parse_decimal(s: &str, whole: &str) -> Result<Rational, ParseCoordError> {
    let invalid = || ParseCoordError::Invalid(whole.to_owned());

    let (negative, unsigned) = match s.strip_prefix('-') {
        Some(rest) => (true, rest),
        None => (false, s.strip_prefix('+').unwrap_or(s)),
    };
    let (int_part, frac_part) = unsigned.split_once('.').unwrap_or((unsigned, ""));
    if int_part.is_empty() && frac_part.is_empty() {
        return Err(invalid());
    }

    let ten = Integer::from(10u32);
    let mut numerator = Integer::from(0u32);
    for c in int_part.chars().chain(frac_part.chars()) {
        let digit = c.to_digit(10).ok_or_else(invalid)?;
        numerator = numerator * &ten + Integer::from(digit);
    }
    let mut denominator = Integer::from(1u32);
    for _ in 0..frac_part.len() {
        denominator *= &ten;
    }

    let value = Rational::from(numerator) / Rational::from(denominator);
    Ok(if negative { -value } else { value })
}

/// Converts a float to the rational with exactly the same value.
pub fn exact_from_f64(x: f64) -> Result<Rational, ParseCoordError> {
    Rational::try_from(x).map_err(|_| ParseCoordError::NotFinite)
}

/// The `f64` nearest to `x`.
pub fn to_f64(x: &Rational) -> f64 {
    f64::rounding_from(x, RoundingMode::Nearest).0
}
