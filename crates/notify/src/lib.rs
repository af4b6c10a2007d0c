//! `larder-notify` — restock digest delivery.
//!
//! One digest code path ([`DigestService::run`]) shared by the weekly
//! scheduler and the manual API trigger: read the inventory, keep items
//! whose status is not good, compose a plain-text shopping list, and hand
//! it to the configured mail transport. Delivery is best effort; transport
//! failures are logged and swallowed.

pub mod digest;
pub mod mail;
pub mod scheduler;

pub use digest::{DigestOutcome, DigestService};
pub use mail::{MailError, MailMessage, MailTransport, NoopMailer, SmtpConfig, SmtpMailer};
pub use scheduler::{next_run_after, spawn_weekly};
