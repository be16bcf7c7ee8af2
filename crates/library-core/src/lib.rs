//! # library-core: Lending Logic for the Library Tracker
//!
//! Per-title copy inventory, borrow/return transactions gated by a user
//! activity check, lending notifications, and the dynamic late-fee formula.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                     Library Lending Architecture                        │
//! │                                                                         │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │                     Host application                            │   │
//! │  │    user service, mailer, whatever surface calls into us         │   │
//! │  └───────────┬─────────────────────────────────────┬───────────────┘   │
//! │              │ implements                          │ calls              │
//! │  ┌───────────▼──────────────┐   ┌──────────────────▼──────────────┐    │
//! │  │  UserActivityOracle      │   │                                 │    │
//! │  │  NotificationSink        ├──►│    ★ LibraryManager ★           │    │
//! │  └──────────────────────────┘   │  inventory │ loans │ late fees  │    │
//! │                                 └─────────────────────────────────┘    │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Modules
//!
//! - [`manager`] - `LibraryManager`: inventory and borrow/return
//! - [`fees`] - Late-fee formula
//! - [`money`] - Integer-cent `Money` and basis-point `Multiplier`
//! - [`collaborators`] - Host-supplied capability traits and simple adapters
//! - [`config`] - Fee rates and lending behavior, from TOML and environment
//! - [`types`] - `Loan` and `InventorySnapshot`
//! - [`error`] - Error types
//! - [`validation`] - Input rules
//!
//! ## Example Usage
//!
//! ```rust
//! use std::sync::Arc;
//! use library_core::{AllowListOracle, LibraryManager, TracingNotificationSink};
//!
//! let library = LibraryManager::new(
//!     Arc::new(AllowListOracle::new(["alice"])),
//!     Arc::new(TracingNotificationSink),
//! );
//!
//! library.add_book("Dune", 1);
//! assert!(library.borrow_book("Dune", "alice").unwrap());
//! assert_eq!(library.get_available_copies("Dune"), 0);
//!
//! assert!(library.return_book("Dune", "alice").unwrap());
//! assert!(!library.return_book("Dune", "alice").unwrap());
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod collaborators;
pub mod config;
pub mod error;
pub mod fees;
pub mod manager;
pub mod money;
pub mod types;
pub mod validation;

// =============================================================================
// Re-exports for Convenience
// =============================================================================

pub use collaborators::{
    AllowListOracle, NotificationSink, TracingNotificationSink, UserActivityOracle,
};
pub use config::{FeeSettings, LendingSettings, LibraryConfig};
pub use error::{ConfigError, CoreError, CoreResult, NotificationError, ValidationError};
pub use fees::{calculate_dynamic_late_fee, LateFeePolicy};
pub use manager::{LibraryManager, BORROWED_MESSAGE_PREFIX, RETURNED_MESSAGE_PREFIX};
pub use money::{Money, Multiplier};
pub use types::{InventorySnapshot, Loan};
