//! The TriggerDigest operation.

use std::sync::Arc;

use chrono::{NaiveDate, Utc};
use tokio::sync::Mutex;
use tracing::{info, warn};

use larder_inventory::{compose_digest, project, ItemState, DIGEST_SUBJECT};
use larder_store::{InventoryStore, StoreResult};

use crate::mail::{MailMessage, MailTransport};

/// What a digest run did.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub struct DigestOutcome {
    /// Number of items flagged for restock or expiry attention.
    pub flagged: usize,
    /// Whether a message was handed to the transport successfully.
    pub sent: bool,
}

/// The one digest code path, shared by the weekly scheduler and the manual
/// trigger endpoint.
///
/// Runs are serialized by an in-process mutex so an overlapping scheduled
/// and manual trigger cannot interleave; back-to-back triggers still send
/// twice (no dedup, matching the reference behavior).
pub struct DigestService {
    store: InventoryStore,
    transport: Arc<dyn MailTransport>,
    from: String,
    running: Mutex<()>,
}

impl DigestService {
    pub fn new(store: InventoryStore, transport: Arc<dyn MailTransport>, from: String) -> Self {
        Self {
            store,
            transport,
            from,
            running: Mutex::new(()),
        }
    }

    /// Run the digest against today's date.
    pub async fn run(&self) -> StoreResult<DigestOutcome> {
        self.run_for_date(Utc::now().date_naive()).await
    }

    /// Run the digest against an explicit date (injected for determinism).
    ///
    /// Store errors propagate; mail transport errors are logged and
    /// swallowed. No candidates or no configured contact is a silent no-op.
    pub async fn run_for_date(&self, today: NaiveDate) -> StoreResult<DigestOutcome> {
        let _guard = self.running.lock().await;

        let rows = self.store.list_items_with_usage().await?;
        let flagged: Vec<ItemState> = project(rows, today)
            .into_iter()
            .filter(ItemState::needs_attention)
            .collect();

        if flagged.is_empty() {
            info!("no items need restocking");
            return Ok(DigestOutcome {
                flagged: 0,
                sent: false,
            });
        }

        // No recipient means the whole run is a silent no-op: nothing is
        // reported as flagged either.
        let Some(to) = self.store.get_contact().await? else {
            info!(candidates = flagged.len(), "no contact email configured; skipping digest");
            return Ok(DigestOutcome {
                flagged: 0,
                sent: false,
            });
        };

        let Some(body) = compose_digest(&flagged) else {
            return Ok(DigestOutcome {
                flagged: 0,
                sent: false,
            });
        };

        let message = MailMessage {
            from: self.from.clone(),
            to,
            subject: DIGEST_SUBJECT.to_string(),
            body,
        };

        // SMTP is blocking; keep it off the async workers.
        let transport = Arc::clone(&self.transport);
        let sent = match tokio::task::spawn_blocking(move || transport.send(&message)).await {
            Ok(Ok(())) => {
                info!(flagged = flagged.len(), "digest email sent");
                true
            }
            Ok(Err(e)) => {
                warn!(error = %e, "digest email delivery failed");
                false
            }
            Err(e) => {
                warn!(error = %e, "digest send task panicked");
                false
            }
        };

        Ok(DigestOutcome {
            flagged: flagged.len(),
            sent,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Mutex as StdMutex;

    use chrono::NaiveDate;
    use larder_inventory::{ContactEmail, NewItem, NewUsage};
    use larder_store::connect_memory;

    use crate::mail::MailError;

    /// Records sent messages; optionally fails every send.
    #[derive(Default)]
    struct RecordingMailer {
        sent: StdMutex<Vec<MailMessage>>,
        fail: bool,
    }

    impl MailTransport for RecordingMailer {
        fn send(&self, message: &MailMessage) -> Result<(), MailError> {
            if self.fail {
                return Err(MailError::Address(
                    "not an address".parse::<lettre::Address>().unwrap_err(),
                ));
            }
            self.sent.lock().unwrap().push(message.clone());
            Ok(())
        }
    }

    fn date(s: &str) -> NaiveDate {
        s.parse().unwrap()
    }

    async fn store_with_items() -> InventoryStore {
        let store = InventoryStore::new(connect_memory().await.unwrap());
        store.init_schema().await.unwrap();

        // Healthy, low, and expired items.
        let pasta =
            NewItem::new("Pasta", 10, "boxes", date("2024-01-01"), date("2025-01-01")).unwrap();
        store.insert_item(&pasta).await.unwrap();

        let milk = NewItem::new("Milk", 4, "gal", date("2024-01-01"), date("2025-01-01")).unwrap();
        let milk_id = store.insert_item(&milk).await.unwrap();
        store
            .insert_usage(&NewUsage::new(milk_id, 3).unwrap())
            .await
            .unwrap();

        let yogurt =
            NewItem::new("Yogurt", 6, "cups", date("2024-01-01"), date("2024-01-03")).unwrap();
        store.insert_item(&yogurt).await.unwrap();

        store
    }

    fn service(store: InventoryStore, mailer: Arc<RecordingMailer>) -> DigestService {
        DigestService::new(store, mailer, "larder@example.com".to_string())
    }

    #[tokio::test]
    async fn no_candidates_means_no_send() {
        let store = InventoryStore::new(connect_memory().await.unwrap());
        store.init_schema().await.unwrap();
        store
            .upsert_contact(&ContactEmail::new("home@example.com").unwrap())
            .await
            .unwrap();

        let mailer = Arc::new(RecordingMailer::default());
        let svc = service(store, Arc::clone(&mailer));

        let outcome = svc.run_for_date(date("2024-01-05")).await.unwrap();
        assert_eq!(outcome, DigestOutcome { flagged: 0, sent: false });
        assert!(mailer.sent.lock().unwrap().is_empty());
    }

    #[tokio::test]
    async fn no_contact_is_a_silent_no_op_with_zero_flagged() {
        // Two items would qualify, but without a recipient the run reports
        // nothing flagged and sends nothing.
        let store = store_with_items().await;
        let mailer = Arc::new(RecordingMailer::default());
        let svc = service(store, Arc::clone(&mailer));

        let outcome = svc.run_for_date(date("2024-01-05")).await.unwrap();
        assert_eq!(outcome, DigestOutcome { flagged: 0, sent: false });
        assert!(mailer.sent.lock().unwrap().is_empty());
    }

    #[tokio::test]
    async fn digest_sends_one_line_per_flagged_item() {
        let store = store_with_items().await;
        store
            .upsert_contact(&ContactEmail::new("home@example.com").unwrap())
            .await
            .unwrap();

        let mailer = Arc::new(RecordingMailer::default());
        let svc = service(store, Arc::clone(&mailer));

        let outcome = svc.run_for_date(date("2024-01-05")).await.unwrap();
        assert_eq!(outcome, DigestOutcome { flagged: 2, sent: true });

        let sent = mailer.sent.lock().unwrap();
        assert_eq!(sent.len(), 1);
        assert_eq!(sent[0].to, "home@example.com");
        assert_eq!(sent[0].subject, "Weekly Grocery Shopping List");
        // Store ordering (by name) carries into the digest.
        assert_eq!(
            sent[0].body,
            "Weekly Grocery Shopping List:\n\n\
             • Milk - Low stock (1 gal left)\n\
             • Yogurt - Expired\n"
        );
    }

    #[tokio::test]
    async fn mail_failure_is_swallowed() {
        let store = store_with_items().await;
        store
            .upsert_contact(&ContactEmail::new("home@example.com").unwrap())
            .await
            .unwrap();

        let mailer = Arc::new(RecordingMailer {
            fail: true,
            ..RecordingMailer::default()
        });
        let svc = service(store, Arc::clone(&mailer));

        let outcome = svc.run_for_date(date("2024-01-05")).await.unwrap();
        assert_eq!(outcome.flagged, 2);
        assert!(!outcome.sent);
    }

    #[tokio::test]
    async fn running_twice_sends_twice() {
        let store = store_with_items().await;
        store
            .upsert_contact(&ContactEmail::new("home@example.com").unwrap())
            .await
            .unwrap();

        let mailer = Arc::new(RecordingMailer::default());
        let svc = service(store, Arc::clone(&mailer));

        svc.run_for_date(date("2024-01-05")).await.unwrap();
        svc.run_for_date(date("2024-01-05")).await.unwrap();
        assert_eq!(mailer.sent.lock().unwrap().len(), 2);
    }
}
