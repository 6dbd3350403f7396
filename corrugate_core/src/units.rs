//! # Unit Types
//!
//! Lightweight wrappers for the weight units flowing between the box
//! specification calculator (grams) and the cost estimator (kilograms), plus
//! the numeric coercion helpers used to read form-style text input.
//!
//! Dimensions stay plain `u32` millimetres: they are integers by input
//! convention and every sheet-size formula works on whole millimetres.
//!
//! ## Example
//!
//! ```rust
//! use corrugate_core::units::{Grams, Kilograms, parse_or_zero};
//!
//! let box_weight = Grams(500.0);
//! let kg: Kilograms = box_weight.into();
//! assert_eq!(kg.0, 0.5);
//!
//! assert_eq!(parse_or_zero(" 150 "), 150);
//! assert_eq!(parse_or_zero("n/a"), 0);
//! ```

use serde::de::IgnoredAny;
use serde::{Deserialize, Deserializer, Serialize};
use std::iter::Sum;
use std::ops::{Add, Div, Mul, Sub};

// ============================================================================
// Weight Units
// ============================================================================

/// Weight in grams
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Grams(pub f64);

/// Weight in kilograms
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Kilograms(pub f64);

impl From<Grams> for Kilograms {
    fn from(g: Grams) -> Self {
        Kilograms(g.0 / 1000.0)
    }
}

impl From<Kilograms> for Grams {
    fn from(kg: Kilograms) -> Self {
        Grams(kg.0 * 1000.0)
    }
}

// ============================================================================
// Arithmetic Implementations (macro to reduce boilerplate)
// ============================================================================

macro_rules! impl_arithmetic {
    ($type:ty) => {
        impl Add for $type {
            type Output = Self;
            fn add(self, rhs: Self) -> Self::Output {
                Self(self.0 + rhs.0)
            }
        }

        impl Sub for $type {
            type Output = Self;
            fn sub(self, rhs: Self) -> Self::Output {
                Self(self.0 - rhs.0)
            }
        }

        impl Mul<f64> for $type {
            type Output = Self;
            fn mul(self, rhs: f64) -> Self::Output {
                Self(self.0 * rhs)
            }
        }

        impl Div<f64> for $type {
            type Output = Self;
            fn div(self, rhs: f64) -> Self::Output {
                Self(self.0 / rhs)
            }
        }

        impl Sum for $type {
            fn sum<I: Iterator<Item = Self>>(iter: I) -> Self {
                Self(iter.map(|v| v.0).sum())
            }
        }

        impl $type {
            /// Get the raw f64 value
            pub fn value(self) -> f64 {
                self.0
            }

            /// Create from raw f64 value
            pub fn new(value: f64) -> Self {
                Self(value)
            }
        }
    };
}

impl_arithmetic!(Grams);
impl_arithmetic!(Kilograms);

// ============================================================================
// Form Input Coercion
// ============================================================================

/// Parse an integer form field, treating missing or non-numeric text as 0.
///
/// Surrounding whitespace is ignored. Negative or fractional text is not a
/// valid GSM/BF/dimension entry and also collapses to 0.
pub fn parse_or_zero(text: &str) -> u32 {
    text.trim().parse().unwrap_or(0)
}

/// Parse a decimal form field, treating missing or non-numeric text as 0.0.
///
/// Non-finite values (`"inf"`, `"NaN"`) are rejected the same way.
pub fn parse_decimal_or_zero(text: &str) -> f64 {
    match text.trim().parse::<f64>() {
        Ok(v) if v.is_finite() => v,
        _ => 0.0,
    }
}

/// Serde helper for integer form fields (GSM, BF, dimensions).
///
/// Accepts a JSON number, a numeric string, `null` or anything else; every
/// value that is not a whole number in `u32` range becomes 0 instead of a
/// deserialization error.
///
/// ```rust
/// use serde::Deserialize;
///
/// #[derive(Deserialize)]
/// struct Paper {
///     #[serde(default, deserialize_with = "corrugate_core::units::lenient_u32")]
///     gsm: u32,
/// }
///
/// let p: Paper = serde_json::from_str(r#"{ "gsm": "150" }"#).unwrap();
/// assert_eq!(p.gsm, 150);
/// let p: Paper = serde_json::from_str(r#"{ "gsm": "heavy" }"#).unwrap();
/// assert_eq!(p.gsm, 0);
/// ```
pub fn lenient_u32<'de, D>(deserializer: D) -> Result<u32, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Raw {
        Int(u64),
        Float(f64),
        Text(String),
        Other(IgnoredAny),
    }

    let value = match Option::<Raw>::deserialize(deserializer)? {
        Some(Raw::Int(v)) => u32::try_from(v).unwrap_or(0),
        Some(Raw::Float(v)) if v.fract() == 0.0 && v >= 0.0 && v <= u32::MAX as f64 => v as u32,
        Some(Raw::Text(text)) => parse_or_zero(&text),
        Some(Raw::Float(_)) | Some(Raw::Other(_)) | None => 0,
    };
    Ok(value)
}
