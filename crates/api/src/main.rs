use std::sync::Arc;

use larder_api::app::services::AppServices;
use larder_notify::{DigestService, MailTransport, NoopMailer, SmtpConfig, SmtpMailer};
use larder_store::InventoryStore;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    larder_observability::init();

    let database_url = std::env::var("DATABASE_URL").unwrap_or_else(|_| {
        tracing::warn!("DATABASE_URL not set; using ./larder.db");
        "sqlite://larder.db".to_string()
    });

    let pool = larder_store::connect(&database_url).await?;
    let store = InventoryStore::new(pool);
    store.init_schema().await?;

    let from = std::env::var("SMTP_FROM").unwrap_or_else(|_| "larder@localhost".to_string());
    let digest = Arc::new(DigestService::new(store.clone(), mailer_from_env(), from));
    larder_notify::spawn_weekly(Arc::clone(&digest));

    let services = Arc::new(AppServices::new(store, digest));
    let app = larder_api::app::build_app(services);

    let port: u16 = std::env::var("PORT")
        .ok()
        .and_then(|p| p.parse().ok())
        .unwrap_or(3000);
    let listener = tokio::net::TcpListener::bind(("0.0.0.0", port)).await?;
    tracing::info!("listening on {}", listener.local_addr()?);

    axum::serve(listener, app).await?;
    Ok(())
}

/// SMTP transport from SMTP_HOST/SMTP_USERNAME/SMTP_PASSWORD, or a no-op
/// transport when unconfigured (digest runs still count flagged items).
fn mailer_from_env() -> Arc<dyn MailTransport> {
    let host = std::env::var("SMTP_HOST");
    let username = std::env::var("SMTP_USERNAME");
    let password = std::env::var("SMTP_PASSWORD");

    match (host, username, password) {
        (Ok(host), Ok(username), Ok(password)) => {
            match SmtpMailer::new(&SmtpConfig {
                host,
                username,
                password,
            }) {
                Ok(mailer) => {
                    tracing::info!("smtp transport configured");
                    Arc::new(mailer)
                }
                Err(e) => {
                    tracing::warn!(error = %e, "smtp configuration invalid; digest emails disabled");
                    Arc::new(NoopMailer)
                }
            }
        }
        _ => {
            tracing::warn!("SMTP not configured; digest emails disabled");
            Arc::new(NoopMailer)
        }
    }
}
