use std::sync::Arc;

use axum::{extract::Extension, http::StatusCode, response::IntoResponse, Json};

use larder_core::ItemId;
use larder_inventory::NewUsage;

use crate::app::services::AppServices;
use crate::app::{dto, errors};

pub async fn log_usage(
    Extension(services): Extension<Arc<AppServices>>,
    Json(body): Json<dto::LogUsageRequest>,
) -> axum::response::Response {
    let usage = match NewUsage::new(ItemId::from_raw(body.item_id), body.quantity_used) {
        Ok(usage) => usage,
        Err(e) => return errors::domain_error_to_response(e),
    };

    match services.store().insert_usage(&usage).await {
        Ok(log) => (
            StatusCode::CREATED,
            Json(serde_json::json!({ "id": log.id, "timestamp": log.timestamp })),
        )
            .into_response(),
        Err(e) => errors::store_error_to_response(e),
    }
}
