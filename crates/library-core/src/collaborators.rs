//! # Collaborators
//!
//! Capabilities the lending manager needs from its host.
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                                                                         │
//! │   host user service ──impl──► UserActivityOracle ─┐                     │
//! │                                                   ├──► LibraryManager   │
//! │   host mailer/push  ──impl──► NotificationSink  ──┘                     │
//! │                                                                         │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Both are called synchronously while the manager holds its state lock, so
//! implementations must not call back into the same manager.

use std::collections::HashSet;
use std::sync::{PoisonError, RwLock};

use tracing::info;

use crate::error::NotificationError;

/// Answers whether a user may transact.
pub trait UserActivityOracle: Send + Sync {
    /// Called exactly once per borrow attempt. Never cached.
    fn is_user_active(&self, user_id: &str) -> bool;
}

/// Receives fire-and-forget lending messages.
pub trait NotificationSink: Send + Sync {
    /// Errors are propagated to the caller of the lending operation as-is.
    fn notify(&self, user_id: &str, message: &str) -> Result<(), NotificationError>;
}

// =============================================================================
// Allow-List Oracle
// =============================================================================

/// Oracle backed by an in-memory set of active user ids.
#[derive(Debug, Default)]
pub struct AllowListOracle {
    active: RwLock<HashSet<String>>,
}

impl AllowListOracle {
    pub fn new<I, S>(users: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        AllowListOracle {
            active: RwLock::new(users.into_iter().map(Into::into).collect()),
        }
    }

    pub fn activate(&self, user_id: &str) {
        self.active
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .insert(user_id.to_string());
    }

    pub fn deactivate(&self, user_id: &str) {
        self.active
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .remove(user_id);
    }
}

impl UserActivityOracle for AllowListOracle {
    fn is_user_active(&self, user_id: &str) -> bool {
        self.active
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .contains(user_id)
    }
}

// =============================================================================
// Tracing Sink
// =============================================================================

/// Sink that emits each message as an `info` event and never fails.
#[derive(Debug, Default, Clone, Copy)]
pub struct TracingNotificationSink;

impl NotificationSink for TracingNotificationSink {
    fn notify(&self, user_id: &str, message: &str) -> Result<(), NotificationError> {
        info!(user_id = %user_id, message = %message, "Lending notification");
        Ok(())
    }
}
