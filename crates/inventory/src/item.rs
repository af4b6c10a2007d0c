use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

use larder_core::{DomainError, DomainResult, ItemId, UsageLogId};

/// A tracked purchased good with a fixed total quantity and expiration date.
///
/// `quantity_total` is set at creation and never edited afterwards; there is
/// no restock operation. Consumption is recorded separately as [`UsageLog`]
/// rows and never mutates the item row.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Item {
    pub id: ItemId,
    pub name: String,
    pub quantity_total: i64,
    pub unit: String,
    pub date_bought: NaiveDate,
    pub expiration_date: NaiveDate,
}

/// An immutable record of quantity consumed from a specific item.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UsageLog {
    pub id: UsageLogId,
    pub item_id: ItemId,
    pub quantity_used: i64,
    pub timestamp: DateTime<Utc>,
}

/// Validated input for the add-item operation.
///
/// Duplicate names are allowed; the only constraints are a non-blank name
/// and a non-negative total.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewItem {
    pub name: String,
    pub quantity_total: i64,
    pub unit: String,
    pub date_bought: NaiveDate,
    pub expiration_date: NaiveDate,
}

impl NewItem {
    pub fn new(
        name: impl Into<String>,
        quantity_total: i64,
        unit: impl Into<String>,
        date_bought: NaiveDate,
        expiration_date: NaiveDate,
    ) -> DomainResult<Self> {
        let name = name.into();
        if name.trim().is_empty() {
            return Err(DomainError::validation("name cannot be empty"));
        }
        if quantity_total < 0 {
            return Err(DomainError::validation("quantity_total cannot be negative"));
        }
        Ok(Self {
            name,
            quantity_total,
            unit: unit.into(),
            date_bought,
            expiration_date,
        })
    }
}

/// Validated input for the log-usage operation.
///
/// Negative usage is rejected; usage exceeding the remaining stock is not
/// (remaining quantity is allowed to go negative).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewUsage {
    pub item_id: ItemId,
    pub quantity_used: i64,
}

impl NewUsage {
    pub fn new(item_id: ItemId, quantity_used: i64) -> DomainResult<Self> {
        if quantity_used < 0 {
            return Err(DomainError::validation("quantity_used cannot be negative"));
        }
        Ok(Self {
            item_id,
            quantity_used,
        })
    }
}

/// Validated contact email for the singleton notification recipient.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ContactEmail(String);

impl ContactEmail {
    pub fn new(email: impl Into<String>) -> DomainResult<Self> {
        let email = email.into();
        let trimmed = email.trim();
        if trimmed.is_empty() {
            return Err(DomainError::validation("email cannot be empty"));
        }
        if !trimmed.contains('@') {
            return Err(DomainError::validation("email must contain '@'"));
        }
        Ok(Self(trimmed.to_string()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl core::fmt::Display for ContactEmail {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(&self.0)
    }
}
