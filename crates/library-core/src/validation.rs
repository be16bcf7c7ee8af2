//! # Validation Module
//!
//! Input validation for the lending domain.
//!
//! Only one rule exists: overdue days fed to the fee formula must not be
//! negative. Everything else is total over its input. Unknown titles count as
//! zero copies, and copy counts are unsigned so they cannot go negative.
//!
//! ## Usage
//! ```rust
//! use library_core::validation::validate_overdue_days;
//!
//! assert!(validate_overdue_days(0).is_ok());
//! assert!(validate_overdue_days(-1).is_err());
//! ```

use crate::error::ValidationError;

/// Result type for validation operations.
pub type ValidationResult<T> = Result<T, ValidationError>;

/// Validates the overdue day count for a late fee.
///
/// ## Rules
/// - Must be >= 0
/// - Zero is allowed (returned on time, no fee)
pub fn validate_overdue_days(days: i64) -> ValidationResult<()> {
    if days < 0 {
        return Err(ValidationError::NegativeOverdueDays { days });
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_overdue_days() {
        assert!(validate_overdue_days(0).is_ok());
        assert!(validate_overdue_days(7).is_ok());
        assert!(validate_overdue_days(i64::MAX).is_ok());

        assert_eq!(
            validate_overdue_days(-1),
            Err(ValidationError::NegativeOverdueDays { days: -1 })
        );
        assert!(validate_overdue_days(i64::MIN).is_err());
    }
}
