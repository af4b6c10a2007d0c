use std::sync::Arc;

use axum::{
    extract::{Extension, Path},
    http::StatusCode,
    response::IntoResponse,
    Json,
};
use chrono::Utc;

use larder_core::ItemId;
use larder_inventory::{project, NewItem};

use crate::app::{dto, errors};
use crate::app::services::AppServices;

/// All items with their derived state, ordered by name.
pub async fn list_items(
    Extension(services): Extension<Arc<AppServices>>,
) -> axum::response::Response {
    let rows = match services.store().list_items_with_usage().await {
        Ok(rows) => rows,
        Err(e) => return errors::store_error_to_response(e),
    };

    let states = project(rows, Utc::now().date_naive());
    (StatusCode::OK, Json(states)).into_response()
}

pub async fn create_item(
    Extension(services): Extension<Arc<AppServices>>,
    Json(body): Json<dto::CreateItemRequest>,
) -> axum::response::Response {
    let new_item = match NewItem::new(
        body.name,
        body.quantity_total,
        body.unit,
        body.date_bought,
        body.expiration_date,
    ) {
        Ok(item) => item,
        Err(e) => return errors::domain_error_to_response(e),
    };

    let id = match services.store().insert_item(&new_item).await {
        Ok(id) => id,
        Err(e) => return errors::store_error_to_response(e),
    };

    (
        StatusCode::CREATED,
        Json(serde_json::json!({ "id": id })),
    )
        .into_response()
}

pub async fn delete_item(
    Extension(services): Extension<Arc<AppServices>>,
    Path(id): Path<String>,
) -> axum::response::Response {
    let id: ItemId = match id.parse() {
        Ok(v) => v,
        Err(e) => return errors::domain_error_to_response(e),
    };

    match services.store().delete_item(id).await {
        Ok(()) => (
            StatusCode::OK,
            Json(serde_json::json!({ "deleted": id })),
        )
            .into_response(),
        Err(e) => errors::store_error_to_response(e),
    }
}
