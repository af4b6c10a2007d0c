//! Inventory domain module.
//!
//! This crate contains the business rules for grocery inventory, implemented
//! purely as deterministic domain logic (no IO, no HTTP, no storage): item
//! and usage-log records, validated constructors for incoming mutations, the
//! derived-state projection (used/remaining quantities and the tri-state
//! status), and the restock digest composition.

pub mod digest;
pub mod item;
pub mod state;

pub use digest::{compose_digest, restock_reason, RestockReason, DIGEST_SUBJECT};
pub use item::{ContactEmail, Item, NewItem, NewUsage, UsageLog};
pub use state::{project, ItemState, ItemStatus, ItemUsage, LOW_STOCK_THRESHOLD};
