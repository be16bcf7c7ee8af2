//! # Library Manager
//!
//! Copy inventory, borrow/return transactions and late-fee pricing.
//!
//! ## Borrow Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  borrow_book(book, user)                                                │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  users.is_user_active(user)   ◄── always called, exactly once           │
//! │       │                                                                 │
//! │       ├── inactive? ──────────────► Ok(false)                           │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  copies(book) > 0 ?                                                     │
//! │       │                                                                 │
//! │       ├── no (or unknown) ────────► Ok(false)                           │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  copies -= 1, last_loan = (book, user)                                  │
//! │  notifier.notify(user, "You have borrowed the book: <book>")            │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  Ok(true)                                                               │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Return Flow
//! `return_book` succeeds only for the exact pair held in the last-loan slot.
//! It clears the slot and sends the return message. The available count is
//! left alone unless [`LendingSettings::restock_on_return`] is set.
//!
//! ## Thread Safety
//! Inventory and the last-loan slot share one `Mutex`. It is held for the
//! whole transaction, collaborator calls included.
//!
//! [`LendingSettings::restock_on_return`]: crate::config::LendingSettings

use std::collections::HashMap;
use std::fmt;
use std::sync::{Arc, Mutex, PoisonError};

use chrono::Utc;
use tracing::{debug, info};

use crate::collaborators::{NotificationSink, UserActivityOracle};
use crate::config::LibraryConfig;
use crate::error::{ConfigResult, CoreResult};
use crate::fees::LateFeePolicy;
use crate::money::Money;
use crate::types::{InventorySnapshot, Loan};

/// Prefix of the message sent after a successful borrow.
pub const BORROWED_MESSAGE_PREFIX: &str = "You have borrowed the book: ";

/// Prefix of the message sent after a successful return.
pub const RETURNED_MESSAGE_PREFIX: &str = "You have returned the book: ";

/// Everything guarded by the manager's lock.
#[derive(Debug, Default)]
struct LendingState {
    inventory: HashMap<String, u32>,
    last_loan: Option<Loan>,
}

/// Tracks copies per title and mediates borrow/return.
pub struct LibraryManager {
    users: Arc<dyn UserActivityOracle>,
    notifier: Arc<dyn NotificationSink>,
    config: LibraryConfig,
    fee_policy: LateFeePolicy,
    state: Mutex<LendingState>,
}

impl LibraryManager {
    /// Creates a manager with an empty inventory and default configuration.
    pub fn new(users: Arc<dyn UserActivityOracle>, notifier: Arc<dyn NotificationSink>) -> Self {
        Self::build(users, notifier, LibraryConfig::default())
    }

    /// Creates a manager with an empty inventory.
    ///
    /// ## Errors
    /// [`ConfigError::Invalid`](crate::ConfigError) if `config` breaks the
    /// same rules [`LibraryConfig::validate`] enforces when loading.
    pub fn with_config(
        users: Arc<dyn UserActivityOracle>,
        notifier: Arc<dyn NotificationSink>,
        config: LibraryConfig,
    ) -> ConfigResult<Self> {
        config.validate()?;
        Ok(Self::build(users, notifier, config))
    }

    fn build(
        users: Arc<dyn UserActivityOracle>,
        notifier: Arc<dyn NotificationSink>,
        config: LibraryConfig,
    ) -> Self {
        let fee_policy = LateFeePolicy::from(&config.fees);
        LibraryManager {
            users,
            notifier,
            config,
            fee_policy,
            state: Mutex::new(LendingState::default()),
        }
    }

    /// Runs `f` with exclusive access to the lending state.
    fn with_state<F, R>(&self, f: F) -> R
    where
        F: FnOnce(&mut LendingState) -> R,
    {
        let mut state = self.state.lock().unwrap_or_else(PoisonError::into_inner);
        f(&mut state)
    }

    // =========================================================================
    // Inventory
    // =========================================================================

    /// Adds copies of a title, creating the entry if it is new.
    ///
    /// Saturates at `u32::MAX`. Makes no collaborator calls.
    pub fn add_book(&self, book_id: &str, copies: u32) {
        self.with_state(|state| {
            let available = state.inventory.entry(book_id.to_string()).or_insert(0);
            *available = available.saturating_add(copies);
            debug!(book_id = %book_id, added = copies, available = *available, "Stocked title");
        });
    }

    /// Available copies of a title, 0 if it has never been stocked.
    pub fn get_available_copies(&self, book_id: &str) -> u32 {
        self.with_state(|state| state.inventory.get(book_id).copied().unwrap_or(0))
    }

    // =========================================================================
    // Transactions
    // =========================================================================

    /// Lends one copy of `book_id` to `user_id`.
    ///
    /// Returns `Ok(false)` if the user is inactive or no copy is available.
    /// The user check always runs first, even for unknown titles.
    ///
    /// ## Errors
    /// [`CoreError::Notification`](crate::CoreError) if the sink fails. The
    /// decrement and loan record made before the call are kept.
    pub fn borrow_book(&self, book_id: &str, user_id: &str) -> CoreResult<bool> {
        self.with_state(|state| -> CoreResult<bool> {
            if !self.users.is_user_active(user_id) {
                debug!(book_id = %book_id, user_id = %user_id, "Borrow refused: user inactive");
                return Ok(false);
            }

            let Some(available) = state.inventory.get_mut(book_id).filter(|n| **n > 0) else {
                debug!(book_id = %book_id, user_id = %user_id, "Borrow refused: no copies available");
                return Ok(false);
            };

            *available -= 1;
            let remaining = *available;
            state.last_loan = Some(Loan::now(book_id, user_id));

            info!(book_id = %book_id, user_id = %user_id, remaining, "Book borrowed");
            self.notifier
                .notify(user_id, &format!("{BORROWED_MESSAGE_PREFIX}{book_id}"))?;

            Ok(true)
        })
    }

    /// Acknowledges the return of the most recently borrowed copy.
    ///
    /// Returns `Ok(true)` only if `(book_id, user_id)` is exactly the last
    /// successful borrow, which is then cleared. Never consults the user
    /// oracle.
    ///
    /// ## Errors
    /// [`CoreError::Notification`](crate::CoreError) if the sink fails. The
    /// loan is already cleared at that point.
    pub fn return_book(&self, book_id: &str, user_id: &str) -> CoreResult<bool> {
        self.with_state(|state| -> CoreResult<bool> {
            let is_last_loan = state
                .last_loan
                .as_ref()
                .is_some_and(|loan| loan.matches(book_id, user_id));

            if !is_last_loan {
                debug!(book_id = %book_id, user_id = %user_id, "Return refused: not the last loan");
                return Ok(false);
            }

            state.last_loan = None;

            if self.config.lending.restock_on_return {
                let available = state.inventory.entry(book_id.to_string()).or_insert(0);
                *available = available.saturating_add(1);
            }

            info!(book_id = %book_id, user_id = %user_id, "Book returned");
            self.notifier
                .notify(user_id, &format!("{RETURNED_MESSAGE_PREFIX}{book_id}"))?;

            Ok(true)
        })
    }

    // =========================================================================
    // Fees
    // =========================================================================

    /// Late fee under this manager's configured rates.
    ///
    /// ## Example
    /// ```rust
    /// use std::sync::Arc;
    /// use library_core::{AllowListOracle, LibraryManager, Money, TracingNotificationSink};
    ///
    /// let manager = LibraryManager::new(
    ///     Arc::new(AllowListOracle::default()),
    ///     Arc::new(TracingNotificationSink),
    /// );
    /// assert_eq!(manager.calculate_dynamic_late_fee(3, false, true).unwrap(), Money::from_cents(120));
    /// assert_eq!(
    ///     manager.calculate_dynamic_late_fee(-1, false, false).unwrap_err().to_string(),
    ///     "Overdue days cannot be negative."
    /// );
    /// ```
    pub fn calculate_dynamic_late_fee(
        &self,
        overdue_days: i64,
        is_bestseller: bool,
        is_premium_member: bool,
    ) -> CoreResult<Money> {
        self.fee_policy
            .calculate(overdue_days, is_bestseller, is_premium_member)
    }

    // =========================================================================
    // Inspection
    // =========================================================================

    /// The last successful borrow that has not been returned.
    pub fn current_loan(&self) -> Option<Loan> {
        self.with_state(|state| state.last_loan.clone())
    }

    /// Consistent copy of inventory and loan slot.
    pub fn snapshot(&self) -> InventorySnapshot {
        self.with_state(|state| InventorySnapshot {
            copies: state
                .inventory
                .iter()
                .map(|(book, &n)| (book.clone(), n))
                .collect(),
            last_loan: state.last_loan.clone(),
            taken_at: Utc::now(),
        })
    }

    /// Configuration this manager was built with.
    pub fn config(&self) -> &LibraryConfig {
        &self.config
    }

    /// Rates used by [`calculate_dynamic_late_fee`](Self::calculate_dynamic_late_fee),
    /// derived from `config().fees`.
    pub fn fee_policy(&self) -> &LateFeePolicy {
        &self.fee_policy
    }
}

impl fmt::Debug for LibraryManager {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let state = self.state.lock().unwrap_or_else(PoisonError::into_inner);
        f.debug_struct("LibraryManager")
            .field("config", &self.config)
            .field("titles", &state.inventory.len())
            .field("last_loan", &state.last_loan)
            .finish_non_exhaustive()
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
