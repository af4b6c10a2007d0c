//! The inventory state projection.
//!
//! Derived quantities and status are pure functions of the stored rows,
//! recomputed on every read. Nothing here is cached or persisted, so there
//! is no invalidation to worry about.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::item::Item;

/// Remaining quantity at or below this counts as low stock.
pub const LOW_STOCK_THRESHOLD: i64 = 2;

/// Tri-state item status.
///
/// Expiry takes priority: an item whose expiration date has passed (or is
/// today) is `Expired` no matter how much of it remains.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ItemStatus {
    Expired,
    Low,
    Good,
}

impl ItemStatus {
    /// Apply the status rule for one item.
    pub fn derive(expiration_date: NaiveDate, remaining_quantity: i64, today: NaiveDate) -> Self {
        if expiration_date <= today {
            ItemStatus::Expired
        } else if remaining_quantity <= LOW_STOCK_THRESHOLD {
            ItemStatus::Low
        } else {
            ItemStatus::Good
        }
    }
}

/// One item joined with its aggregated usage, as read from the store.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ItemUsage {
    pub item: Item,
    /// Sum of `quantity_used` over the item's usage logs; 0 when none exist.
    pub used_quantity: i64,
}

/// An item with its derived fields, as served to callers.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ItemState {
    #[serde(flatten)]
    pub item: Item,
    pub used_quantity: i64,
    /// May be negative when usage exceeds the total; never clamped.
    pub remaining_quantity: i64,
    pub status: ItemStatus,
}

impl ItemState {
    pub fn derive(row: ItemUsage, today: NaiveDate) -> Self {
        let remaining_quantity = row.item.quantity_total - row.used_quantity;
        let status = ItemStatus::derive(row.item.expiration_date, remaining_quantity, today);
        Self {
            item: row.item,
            used_quantity: row.used_quantity,
            remaining_quantity,
            status,
        }
    }

    /// Whether this item belongs in the restock digest.
    ///
    /// Equivalent to `remaining_quantity <= 2 OR expired`: exactly the items
    /// whose status is not `Good`.
    pub fn needs_attention(&self) -> bool {
        self.status != ItemStatus::Good
    }
}

/// Project aggregated store rows into derived item states.
///
/// Ordering is preserved from the input (the store orders by name).
pub fn project(rows: Vec<ItemUsage>, today: NaiveDate) -> Vec<ItemState> {
    rows.into_iter()
        .map(|row| ItemState::derive(row, today))
        .collect()
}
