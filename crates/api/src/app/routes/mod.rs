use axum::{
    routing::{get, post},
    Router,
};

pub mod contact;
pub mod digest;
pub mod items;
pub mod system;
pub mod usage;

/// Router for all `/api` endpoints.
pub fn router() -> Router {
    Router::new()
        .route("/items", get(items::list_items).post(items::create_item))
        .route("/items/:id", axum::routing::delete(items::delete_item))
        .route("/usage", post(usage::log_usage))
        .route("/user", get(contact::get_contact).post(contact::set_contact))
        .route("/send-email", post(digest::trigger_digest))
}
