use std::sync::Arc;

use axum::{extract::Extension, http::StatusCode, response::IntoResponse, Json};

use larder_inventory::ContactEmail;

use crate::app::services::AppServices;
use crate::app::{dto, errors};

/// The configured contact email, or empty when none is set.
pub async fn get_contact(
    Extension(services): Extension<Arc<AppServices>>,
) -> axum::response::Response {
    match services.store().get_contact().await {
        Ok(email) => (
            StatusCode::OK,
            Json(serde_json::json!({ "email": email.unwrap_or_default() })),
        )
            .into_response(),
        Err(e) => errors::store_error_to_response(e),
    }
}

pub async fn set_contact(
    Extension(services): Extension<Arc<AppServices>>,
    Json(body): Json<dto::SetContactRequest>,
) -> axum::response::Response {
    let email = match ContactEmail::new(body.email) {
        Ok(email) => email,
        Err(e) => return errors::domain_error_to_response(e),
    };

    match services.store().upsert_contact(&email).await {
        Ok(()) => (
            StatusCode::OK,
            Json(serde_json::json!({ "email": email.as_str() })),
        )
            .into_response(),
        Err(e) => errors::store_error_to_response(e),
    }
}
