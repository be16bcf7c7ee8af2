//! # Late Fees
//!
//! The dynamic late-return fee formula.
//!
//! ## Formula
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  fee = overdue_days × daily_rate                                        │
//! │        × bestseller multiplier   (if bestseller,  default ×1.50)        │
//! │        × premium multiplier      (if premium,     default ×0.80)        │
//! │        rounded half-up to whole cents, once, at the end                 │
//! │                                                                         │
//! │  (2 days, bestseller, premium) = 2 × 50¢ × 1.50 × 0.80 = $1.20          │
//! │  (5 days, bestseller)          = 5 × 50¢ × 1.50        = $3.75          │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! The whole product is carried in `i128` cents × bps × bps, so the only
//! rounding step is the final division.

use serde::{Deserialize, Serialize};

use crate::config::FeeSettings;
use crate::error::{CoreError, CoreResult};
use crate::money::{Money, Multiplier};
use crate::validation::validate_overdue_days;

/// Default charge per overdue day, in cents.
pub const DEFAULT_DAILY_RATE_CENTS: u32 = 50;

/// Default bestseller surcharge (×1.50).
pub const DEFAULT_BESTSELLER_MULTIPLIER_BPS: u32 = 15_000;

/// Default premium member discount (×0.80).
pub const DEFAULT_PREMIUM_MULTIPLIER_BPS: u32 = 8_000;

/// Rates used by the late-fee formula.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct LateFeePolicy {
    pub daily_rate: Money,
    pub bestseller: Multiplier,
    pub premium: Multiplier,
}

impl LateFeePolicy {
    /// Computes the fee for a late return.
    ///
    /// Fails with [`ValidationError::NegativeOverdueDays`](crate::ValidationError)
    /// when `overdue_days < 0`.
    ///
    /// ## Example
    /// ```rust
    /// use library_core::fees::LateFeePolicy;
    /// use library_core::money::Money;
    ///
    /// let policy = LateFeePolicy::default();
    /// assert_eq!(policy.calculate(2, true, true).unwrap(), Money::from_cents(120));
    /// assert_eq!(policy.calculate(7, false, false).unwrap(), Money::from_cents(350));
    /// assert!(policy.calculate(-1, true, false).is_err());
    /// ```
    pub fn calculate(
        &self,
        overdue_days: i64,
        is_bestseller: bool,
        is_premium_member: bool,
    ) -> CoreResult<Money> {
        validate_overdue_days(overdue_days)?;

        let bestseller = if is_bestseller {
            self.bestseller
        } else {
            Multiplier::identity()
        };
        let premium = if is_premium_member {
            self.premium
        } else {
            Multiplier::identity()
        };

        let overflow = || CoreError::FeeOverflow { overdue_days };

        // Bestseller before premium. Order only matters to integer overflow
        // here since nothing is rounded until the division.
        let numerator = i128::from(overdue_days)
            .checked_mul(i128::from(self.daily_rate.cents()))
            .and_then(|n| n.checked_mul(i128::from(bestseller.bps())))
            .and_then(|n| n.checked_mul(i128::from(premium.bps())))
            .ok_or_else(overflow)?;

        let scale = i128::from(Multiplier::SCALE);
        Money::from_fraction_half_up(numerator, scale * scale).ok_or_else(overflow)
    }
}

impl Default for LateFeePolicy {
    fn default() -> Self {
        LateFeePolicy {
            daily_rate: Money::from_cents(i64::from(DEFAULT_DAILY_RATE_CENTS)),
            bestseller: Multiplier::from_bps(DEFAULT_BESTSELLER_MULTIPLIER_BPS),
            premium: Multiplier::from_bps(DEFAULT_PREMIUM_MULTIPLIER_BPS),
        }
    }
}

impl From<&FeeSettings> for LateFeePolicy {
    fn from(settings: &FeeSettings) -> Self {
        LateFeePolicy {
            daily_rate: Money::from_cents(i64::from(settings.daily_rate_cents)),
            bestseller: Multiplier::from_bps(settings.bestseller_multiplier_bps),
            premium: Multiplier::from_bps(settings.premium_multiplier_bps),
        }
    }
}

/// Computes a late fee with the default rates.
///
/// ```rust
/// use library_core::fees::calculate_dynamic_late_fee;
///
/// assert_eq!(calculate_dynamic_late_fee(5, true, false).unwrap().to_string(), "$3.75");
/// ```
pub fn calculate_dynamic_late_fee(
    overdue_days: i64,
    is_bestseller: bool,
    is_premium_member: bool,
) -> CoreResult<Money> {
    LateFeePolicy::default().calculate(overdue_days, is_bestseller, is_premium_member)
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ValidationError;

    #[test]
    fn test_reference_fees() {
        let cases = [
            (2, true, true, 120),
            (3, false, true, 120),
            (5, true, false, 375),
            (7, false, false, 350),
        ];

        for (days, bestseller, premium, expected_cents) in cases {
            let fee = calculate_dynamic_late_fee(days, bestseller, premium).unwrap();
            assert_eq!(
                fee.cents(),
                expected_cents,
                "days={days} bestseller={bestseller} premium={premium}"
            );
        }
    }

    #[test]
    fn test_zero_days_is_free() {
        let fee = calculate_dynamic_late_fee(0, true, true).unwrap();
        assert!(fee.is_zero());
    }

    #[test]
    fn test_negative_days_rejected() {
        let err = calculate_dynamic_late_fee(-1, true, false).unwrap_err();
        assert!(matches!(
            err,
            CoreError::Validation(ValidationError::NegativeOverdueDays { days: -1 })
        ));
        assert_eq!(err.to_string(), "Overdue days cannot be negative.");
    }

    #[test]
    fn test_rounds_half_up_once_at_the_end() {
        // 1 day × 5¢ × 1.50 × 0.70 = 5.25¢ → 5¢
        // Rounding after the surcharge would give 8¢ × 0.70 = 5.6¢ → 6¢
        let policy = LateFeePolicy {
            daily_rate: Money::from_cents(5),
            bestseller: Multiplier::from_bps(15_000),
            premium: Multiplier::from_bps(7_000),
        };
        assert_eq!(policy.calculate(1, true, true).unwrap().cents(), 5);

        // 1 day × 5¢ × 1.50 = 7.5¢ → 8¢
        assert_eq!(policy.calculate(1, true, false).unwrap().cents(), 8);
    }

    #[test]
    fn test_policy_from_settings() {
        let settings = FeeSettings {
            daily_rate_cents: 100,
            bestseller_multiplier_bps: 20_000,
            premium_multiplier_bps: 5_000,
        };
        let policy = LateFeePolicy::from(&settings);

        // 3 × $1.00 × 2.0 × 0.5 = $3.00
        assert_eq!(policy.calculate(3, true, true).unwrap(), Money::from_cents(300));
    }

    #[test]
    fn test_overflow_is_reported() {
        let policy = LateFeePolicy {
            daily_rate: Money::from_cents(i64::from(u32::MAX)),
            bestseller: Multiplier::from_bps(u32::MAX),
            premium: Multiplier::from_bps(u32::MAX),
        };
        let err = policy.calculate(i64::MAX, true, true).unwrap_err();
        assert!(matches!(err, CoreError::FeeOverflow { overdue_days: i64::MAX }));

        // Fits in i128 but not in i64 cents
        let err = calculate_dynamic_late_fee(i64::MAX, false, false).unwrap_err();
        assert!(matches!(err, CoreError::FeeOverflow { .. }));
    }
}
