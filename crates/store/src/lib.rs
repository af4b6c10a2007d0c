//! `larder-store` — SQLite-backed persistence for the inventory domain.
//!
//! Three relations: `items`, `usage_logs` (FK to `items`, enforced), and the
//! singleton `users` contact row. Derived inventory state is never stored
//! here; this crate only provides the raw rows and the one aggregate query
//! (per-item usage sum with outer-join semantics) the state projection
//! needs.

pub mod error;
pub mod store;

pub use error::{StoreError, StoreResult};
pub use store::{connect, connect_memory, InventoryStore};
