//! # Unit Types
//!
//! Type-safe wrappers for the units the framing engine moves between:
//! physical inches on the bench, square inches/feet for glazing and print
//! pricing, and screen pixels for the preview.
//!
//! Wrappers serialize as bare numbers so JSON stays clean.
//!
//! ## Example
//!
//! ```rust
//! use frame_core::units::{Inches, SqFt, SqIn};
//!
//! let area = SqIn(144.0);
//! let sqft: SqFt = area.into();
//! assert_eq!(sqft.0, 1.0);
//!
//! let face = Inches(1.25) * 2.0;
//! assert_eq!(face.value(), 2.5);
//! ```

use serde::{Deserialize, Serialize};
use std::ops::{Add, Div, Mul, Sub};

// ============================================================================
// Length Units
// ============================================================================

/// Length in inches
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Inches(pub f64);

/// Length in screen pixels
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Pixels(pub f64);

impl Inches {
    /// Project onto the screen at `scale` pixels per inch.
    pub fn to_pixels(self, scale: f64) -> Pixels {
        Pixels(self.0 * scale)
    }
}

// ============================================================================
// Area Units
// ============================================================================

/// Area in square inches
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SqIn(pub f64);

/// Area in square feet
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SqFt(pub f64);

impl From<SqFt> for SqIn {
    fn from(sqft: SqFt) -> Self {
        SqIn(sqft.0 * 144.0)
    }
}

impl From<SqIn> for SqFt {
    fn from(sqin: SqIn) -> Self {
        SqFt(sqin.0 / 144.0)
    }
}

// ============================================================================
// Money
// ============================================================================

/// US dollars
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Usd(pub f64);

impl Usd {
    pub const ZERO: Usd = Usd(0.0);

    /// Round to whole cents. Negative amounts clamp to zero.
    pub fn to_cents(self) -> Self {
        if !self.0.is_finite() || self.0 <= 0.0 {
            return Usd::ZERO;
        }
        Usd((self.0 * 100.0).round() / 100.0)
    }
}

impl std::fmt::Display for Usd {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "${:.2}", self.0)
    }
}

impl std::iter::Sum for Usd {
    fn sum<I: Iterator<Item = Usd>>(iter: I) -> Self {
        Usd(iter.map(|u| u.0).sum())
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

impl_arithmetic!(Inches);
impl_arithmetic!(Pixels);
impl_arithmetic!(SqIn);
impl_arithmetic!(SqFt);
impl_arithmetic!(Usd);

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sqin_to_sqft() {
        let sqft: SqFt = SqIn(288.0).into();
        assert_eq!(sqft.0, 2.0);
        let back: SqIn = sqft.into();
        assert_eq!(back.0, 288.0);
    }

    #[test]
    fn test_arithmetic() {
        let a = Inches(10.0);
        let b = Inches(2.5);
        assert_eq!((a + b).0, 12.5);
        assert_eq!((a - b).0, 7.5);
        assert_eq!((a * 2.0).0, 20.0);
        assert_eq!((a / 4.0).0, 2.5);
        assert_eq!(a.to_pixels(3.0), Pixels(30.0));
    }

    #[test]
    fn test_usd_cents() {
        assert_eq!(Usd(12.345).to_cents(), Usd(12.35));
        assert_eq!(Usd(-3.0).to_cents(), Usd::ZERO);
        assert_eq!(Usd(f64::NAN).to_cents(), Usd::ZERO);
        assert_eq!(format!("{}", Usd(8.95)), "$8.95");
    }

    #[test]
    fn test_serialization() {
        let inches = Inches(12.5);
        let json = serde_json::to_string(&inches).unwrap();
        assert_eq!(json, "12.5");

        let roundtrip: Inches = serde_json::from_str(&json).unwrap();
        assert_eq!(inches, roundtrip);
    }
}
