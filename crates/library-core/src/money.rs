//! # Money Module
//!
//! Provides the `Money` type for late fees and the `Multiplier` type for the
//! fee adjustments applied to them.
//!
//! ## Why Integer Money?
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  THE FLOATING POINT PROBLEM                                             │
//! │                                                                         │
//! │    7 × 0.50 × 1.50 × 0.80 in f64 = 4.199999999999999  ❌               │
//! │                                                                         │
//! │  OUR SOLUTION: Integer Cents + Basis Points                             │
//! │    7 × 50¢ × 15000bps × 8000bps / 10⁸ = 420¢  (exact)                  │
//! │    Round once, at the very end                                          │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Usage
//! ```rust
//! use library_core::money::{Money, Multiplier};
//!
//! // 3 days × 50¢ × 1.50, in cents × bps over the bps scale
//! let scale = i128::from(Multiplier::SCALE);
//! let bestseller = i128::from(Multiplier::from_bps(15000).bps());
//! let fee = Money::from_fraction_half_up(3 * 50 * bestseller, scale).unwrap();
//! assert_eq!(fee.to_string(), "$2.25");
//! ```

use serde::{Deserialize, Serialize};
use std::fmt;

// =============================================================================
// Money Type
// =============================================================================

/// A monetary value in the smallest currency unit (cents).
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct Money(i64);

impl Money {
    /// Creates a Money value from cents.
    ///
    /// ## Example
    /// ```rust
    /// use library_core::money::Money;
    ///
    /// let fee = Money::from_cents(375); // $3.75
    /// assert_eq!(fee.cents(), 375);
    /// ```
    #[inline]
    pub const fn from_cents(cents: i64) -> Self {
        Money(cents)
    }

    /// Builds Money from an exact fraction of cents, rounding half away
    /// from zero.
    ///
    /// Returns `None` if the denominator is zero or the rounded value does
    /// not fit in `i64` cents.
    ///
    /// ## Example
    /// ```rust
    /// use library_core::money::Money;
    ///
    /// // 112.5¢ → 113¢
    /// assert_eq!(Money::from_fraction_half_up(1125, 10), Some(Money::from_cents(113)));
    /// // 112.4¢ → 112¢
    /// assert_eq!(Money::from_fraction_half_up(1124, 10), Some(Money::from_cents(112)));
    /// ```
    pub fn from_fraction_half_up(numerator: i128, denominator: i128) -> Option<Self> {
        if denominator == 0 {
            return None;
        }

        let (numerator, denominator) = if denominator < 0 {
            (numerator.checked_neg()?, denominator.checked_neg()?)
        } else {
            (numerator, denominator)
        };

        let magnitude = numerator.checked_abs()?;
        let rounded = magnitude.checked_add(denominator / 2)? / denominator;
        let signed = if numerator < 0 { -rounded } else { rounded };

        i64::try_from(signed).ok().map(Money)
    }

    /// Returns the value in cents.
    #[inline]
    pub const fn cents(&self) -> i64 {
        self.0
    }

    /// Returns the whole-dollar portion.
    #[inline]
    pub const fn dollars(&self) -> i64 {
        self.0 / 100
    }

    /// Returns the cents portion (always 0-99).
    ///
    /// ## Example
    /// ```rust
    /// use library_core::money::Money;
    ///
    /// assert_eq!(Money::from_cents(375).cents_part(), 75);
    /// assert_eq!(Money::from_cents(-550).cents_part(), 50);
    /// ```
    #[inline]
    pub const fn cents_part(&self) -> i64 {
        (self.0 % 100).abs()
    }

    /// Returns zero money value.
    #[inline]
    pub const fn zero() -> Self {
        Money(0)
    }

    /// Checks if the value is zero.
    #[inline]
    pub const fn is_zero(&self) -> bool {
        self.0 == 0
    }
}

/// Shows money as `$D.CC`.
impl fmt::Display for Money {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let sign = if self.0 < 0 { "-" } else { "" };
        write!(
            f,
            "{}${}.{:02}",
            sign,
            self.dollars().abs(),
            self.cents_part()
        )
    }
}

impl Default for Money {
    fn default() -> Self {
        Money::zero()
    }
}

// =============================================================================
// Multiplier
// =============================================================================

/// A fee multiplier in basis points.
///
/// ## Why Basis Points?
/// 1 basis point = 0.01% = 1/10000
/// 15000 bps = ×1.50 (bestseller surcharge)
/// 8000 bps  = ×0.80 (premium member discount)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Multiplier(u32);

impl Multiplier {
    /// Basis points in a ×1.00 multiplier.
    pub const SCALE: u32 = 10_000;

    /// Creates a multiplier from basis points.
    #[inline]
    pub const fn from_bps(bps: u32) -> Self {
        Multiplier(bps)
    }

    /// The ×1.00 multiplier.
    #[inline]
    pub const fn identity() -> Self {
        Multiplier(Self::SCALE)
    }

    /// Returns the multiplier in basis points.
    #[inline]
    pub const fn bps(&self) -> u32 {
        self.0
    }
}

impl Default for Multiplier {
    fn default() -> Self {
        Multiplier::identity()
    }
}

/// Shows the multiplier as `xW.FF`, keeping every significant basis point
/// (15050 bps is `x1.505`).
impl fmt::Display for Multiplier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let fraction = format!("{:04}", self.0 % Self::SCALE);
        let significant = fraction.trim_end_matches('0');
        let shown = if significant.len() < 2 {
            &fraction[..2]
        } else {
            significant
        };
        write!(f, "x{}.{}", self.0 / Self::SCALE, shown)
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
