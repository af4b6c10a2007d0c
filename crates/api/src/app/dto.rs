use chrono::NaiveDate;
use serde::Deserialize;

// -------------------------
// Request DTOs
// -------------------------

#[derive(Debug, Deserialize)]
pub struct CreateItemRequest {
    pub name: String,
    pub quantity_total: i64,
    pub unit: String,
    pub date_bought: NaiveDate,
    pub expiration_date: NaiveDate,
}

#[derive(Debug, Deserialize)]
pub struct LogUsageRequest {
    pub item_id: i64,
    pub quantity_used: i64,
}

#[derive(Debug, Deserialize)]
pub struct SetContactRequest {
    pub email: String,
}
