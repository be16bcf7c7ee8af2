//! # Domain Types
//!
//! Value types shared by the lending manager and its callers.
//!
//! ## Type Overview
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Domain Types                                    │
//! │                                                                         │
//! │  ┌─────────────────┐           ┌──────────────────────────┐            │
//! │  │      Loan       │           │    InventorySnapshot     │            │
//! │  │  ─────────────  │           │  ──────────────────────  │            │
//! │  │  book_id        │           │  copies: book → count    │            │
//! │  │  user_id        │           │  last_loan: Option<Loan> │            │
//! │  │  borrowed_at    │           │  taken_at                │            │
//! │  └─────────────────┘           └──────────────────────────┘            │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Copies are fungible counters. There is no per-copy identity and users are
//! only ever referenced by id.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

// =============================================================================
// Loan
// =============================================================================

/// The most recent successful borrow.
///
/// A manager holds at most one. It is overwritten by every successful borrow
/// and cleared by a successful return.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Loan {
    /// Title that was borrowed.
    pub book_id: String,

    /// User who borrowed it.
    pub user_id: String,

    /// When the borrow succeeded. Not used for matching.
    pub borrowed_at: DateTime<Utc>,
}

impl Loan {
    /// Records a borrow happening now.
    pub fn now(book_id: &str, user_id: &str) -> Self {
        Loan {
            book_id: book_id.to_string(),
            user_id: user_id.to_string(),
            borrowed_at: Utc::now(),
        }
    }

    /// Checks whether this loan is for exactly this book and user.
    #[inline]
    pub fn matches(&self, book_id: &str, user_id: &str) -> bool {
        self.book_id == book_id && self.user_id == user_id
    }
}

// =============================================================================
// Inventory Snapshot
// =============================================================================

/// Point-in-time copy of a manager's lending state.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InventorySnapshot {
    /// Available copies per title, ordered by title.
    pub copies: BTreeMap<String, u32>,

    /// Most recent successful borrow still awaiting return.
    pub last_loan: Option<Loan>,

    /// When the snapshot was taken.
    pub taken_at: DateTime<Utc>,
}

impl InventorySnapshot {
    /// Available copies of a title, 0 if unknown.
    pub fn available(&self, book_id: &str) -> u32 {
        self.copies.get(book_id).copied().unwrap_or(0)
    }

    /// Sum of available copies over all titles.
    pub fn total_available(&self) -> u64 {
        self.copies.values().map(|&n| u64::from(n)).sum()
    }

    /// Number of titles ever stocked, including those at zero.
    pub fn title_count(&self) -> usize {
        self.copies.len()
    }
}
