//! `larder-api` — HTTP transport for the grocery inventory service.

pub mod app;
