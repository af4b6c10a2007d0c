//! Restock digest composition.
//!
//! The digest is a plain-text shopping list: one bullet line per item that
//! needs attention, with the reason it was flagged.

use crate::state::{ItemState, LOW_STOCK_THRESHOLD};

/// Subject line used for every digest email.
pub const DIGEST_SUBJECT: &str = "Weekly Grocery Shopping List";

/// Why an item appears in the digest.
///
/// Classification checks stock before expiry: a fully consumed item reads
/// "out of stock" even when it has also expired.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RestockReason {
    OutOfStock,
    LowStock { remaining: i64, unit: String },
    Expired,
}

impl core::fmt::Display for RestockReason {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            RestockReason::OutOfStock => f.write_str("Out of stock"),
            RestockReason::LowStock { remaining, unit } => {
                write!(f, "Low stock ({remaining} {unit} left)")
            }
            RestockReason::Expired => f.write_str("Expired"),
        }
    }
}

/// Classify a flagged item.
///
/// Callers are expected to pass items that need attention; a healthy item
/// would be misreported as expired here, so filter first.
pub fn restock_reason(state: &ItemState) -> RestockReason {
    if state.remaining_quantity <= 0 {
        RestockReason::OutOfStock
    } else if state.remaining_quantity <= LOW_STOCK_THRESHOLD {
        RestockReason::LowStock {
            remaining: state.remaining_quantity,
            unit: state.item.unit.clone(),
        }
    } else {
        RestockReason::Expired
    }
}

/// Compose the plain-text digest body for the given flagged items.
///
/// Returns `None` when nothing is flagged (no email should be sent).
pub fn compose_digest(flagged: &[ItemState]) -> Option<String> {
    if flagged.is_empty() {
        return None;
    }

    let mut body = String::from("Weekly Grocery Shopping List:\n\n");
    for state in flagged {
        body.push_str(&format!("• {} - {}\n", state.item.name, restock_reason(state)));
    }
    Some(body)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::item::Item;
    use crate::state::{ItemStatus, ItemUsage};
    use chrono::NaiveDate;
    use larder_core::ItemId;

    fn date(s: &str) -> NaiveDate {
        s.parse().unwrap()
    }

    fn state(name: &str, total: i64, used: i64, expiration: &str, today: &str) -> ItemState {
        ItemState::derive(
            ItemUsage {
                item: Item {
                    id: ItemId::from_raw(1),
                    name: name.to_string(),
                    quantity_total: total,
                    unit: "gal".to_string(),
                    date_bought: date("2024-01-01"),
                    expiration_date: date(expiration),
                },
                used_quantity: used,
            },
            date(today),
        )
    }

    #[test]
    fn out_of_stock_beats_expired_in_classification() {
        let s = state("Milk", 4, 4, "2024-01-02", "2024-01-05");
        assert_eq!(s.status, ItemStatus::Expired);
        assert_eq!(restock_reason(&s), RestockReason::OutOfStock);
    }

    #[test]
    fn low_stock_reason_carries_remaining_and_unit() {
        let s = state("Milk", 4, 3, "2024-02-01", "2024-01-05");
        assert_eq!(
            restock_reason(&s),
            RestockReason::LowStock {
                remaining: 1,
                unit: "gal".to_string()
            }
        );
    }

    #[test]
    fn expired_with_stock_left_reads_expired() {
        let s = state("Yogurt", 10, 2, "2024-01-02", "2024-01-05");
        assert_eq!(restock_reason(&s), RestockReason::Expired);
    }

    #[test]
    fn compose_digest_is_none_for_empty_input() {
        assert_eq!(compose_digest(&[]), None);
    }

    #[test]
    fn compose_digest_writes_one_line_per_item() {
        let flagged = vec![
            state("Eggs", 12, 12, "2024-02-01", "2024-01-05"),
            state("Milk", 4, 3, "2024-02-01", "2024-01-05"),
        ];
        let body = compose_digest(&flagged).unwrap();
        assert_eq!(
            body,
            "Weekly Grocery Shopping List:\n\n\
             • Eggs - Out of stock\n\
             • Milk - Low stock (1 gal left)\n"
        );
    }
}
