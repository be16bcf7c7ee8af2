//! # Error Types
//!
//! Domain-specific error types for library-core.
//!
//! ## Error Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Error Types                                     │
//! │                                                                         │
//! │  CoreError              - What lending operations return               │
//! │  ├── ValidationError    - Rejected input (negative overdue days)       │
//! │  ├── NotificationError  - Raised by the host's NotificationSink        │
//! │  └── FeeOverflow        - Fee does not fit in i64 cents                │
//! │                                                                         │
//! │  ConfigError            - Loading/validating LibraryConfig             │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Borrow and return refusals are NOT errors. They come back as `Ok(false)`.
//! Only failures the caller must react to are modeled here.

use thiserror::Error;

// =============================================================================
// Core Error
// =============================================================================

/// Errors returned by [`LibraryManager`](crate::LibraryManager) operations.
#[derive(Debug, Error)]
pub enum CoreError {
    /// Input rejected by a domain rule.
    ///
    /// Transparent so the caller sees the validation message verbatim.
    #[error(transparent)]
    Validation(#[from] ValidationError),

    /// The notification sink failed.
    ///
    /// ## When This Occurs
    /// ```text
    /// borrow_book("Dune", "alice")
    ///      │
    ///      ├── copies 1 → 0, loan recorded
    ///      │
    ///      ▼
    /// sink.notify(..) → Err
    ///      │
    ///      ▼
    /// Err(CoreError::Notification) (inventory change is kept)
    /// ```
    #[error(transparent)]
    Notification(#[from] NotificationError),

    /// The computed fee exceeds the representable range.
    #[error("Late fee for {overdue_days} overdue days overflows")]
    FeeOverflow { overdue_days: i64 },
}

// =============================================================================
// Validation Error
// =============================================================================

/// Input validation errors.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    /// Overdue days passed to the fee formula were below zero.
    #[error("Overdue days cannot be negative.")]
    NegativeOverdueDays { days: i64 },
}

// =============================================================================
// Notification Error
// =============================================================================

/// Failure reported by a [`NotificationSink`](crate::NotificationSink).
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("Failed to notify {user_id}: {reason}")]
pub struct NotificationError {
    pub user_id: String,
    pub reason: String,
}

impl NotificationError {
    pub fn new(user_id: impl Into<String>, reason: impl Into<String>) -> Self {
        NotificationError {
            user_id: user_id.into(),
            reason: reason.into(),
        }
    }
}

// =============================================================================
// Config Error
// =============================================================================

/// Errors raised while loading or validating configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// Config file could not be read.
    #[error("Failed to read config: {0}")]
    Io(#[from] std::io::Error),

    /// Config file is not valid TOML for [`LibraryConfig`](crate::LibraryConfig).
    #[error("Failed to parse config: {0}")]
    Parse(#[from] toml::de::Error),

    /// A value parsed but breaks a rule.
    #[error("Invalid library configuration: {0}")]
    Invalid(String),
}

// =============================================================================
// Result Type Aliases
// =============================================================================

/// Convenience type alias for Results with CoreError.
pub type CoreResult<T> = Result<T, CoreError>;

/// Convenience type alias for Results with ConfigError.
pub type ConfigResult<T> = Result<T, ConfigError>;

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_negative_days_message_is_exact() {
        let err = ValidationError::NegativeOverdueDays { days: -1 };
        assert_eq!(err.to_string(), "Overdue days cannot be negative.");
    }

    #[test]
    fn test_validation_message_survives_conversion() {
        let core_err: CoreError = ValidationError::NegativeOverdueDays { days: -3 }.into();
        assert!(matches!(core_err, CoreError::Validation(_)));
        assert_eq!(core_err.to_string(), "Overdue days cannot be negative.");
    }

    #[test]
    fn test_notification_error_message() {
        let err = NotificationError::new("alice", "mailbox full");
        assert_eq!(err.to_string(), "Failed to notify alice: mailbox full");

        let core_err: CoreError = err.clone().into();
        assert_eq!(core_err.to_string(), err.to_string());
    }

    #[test]
    fn test_config_invalid_message() {
        let err = ConfigError::Invalid("premium_multiplier_bps must be greater than 0".into());
        assert_eq!(
            err.to_string(),
            "Invalid library configuration: premium_multiplier_bps must be greater than 0"
        );
    }
}
