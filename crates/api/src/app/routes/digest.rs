use std::sync::Arc;

use axum::{extract::Extension, http::StatusCode, response::IntoResponse, Json};

use crate::app::errors;
use crate::app::services::AppServices;

/// Manual digest trigger; shares the weekly scheduler's code path.
///
/// Mail failures never surface here (fire-and-forget); only store failures
/// produce an error response.
pub async fn trigger_digest(
    Extension(services): Extension<Arc<AppServices>>,
) -> axum::response::Response {
    match services.digest().run().await {
        Ok(outcome) => (
            StatusCode::OK,
            Json(serde_json::json!({
                "flagged": outcome.flagged,
                "sent": outcome.sent,
            })),
        )
            .into_response(),
        Err(e) => errors::store_error_to_response(e),
    }
}
