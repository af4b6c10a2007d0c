//! Mail transport abstraction and the SMTP implementation.

use lettre::message::Message;
use lettre::transport::smtp::authentication::Credentials;
use lettre::{SmtpTransport, Transport};
use thiserror::Error;
use tracing::info;

/// Mail delivery error. Always non-fatal to the digest caller.
#[derive(Debug, Error)]
pub enum MailError {
    #[error("invalid mail address: {0}")]
    Address(#[from] lettre::address::AddressError),

    #[error("failed to compose message: {0}")]
    Compose(#[from] lettre::error::Error),

    #[error("smtp failure: {0}")]
    Smtp(#[from] lettre::transport::smtp::Error),
}

/// A plain-text message ready for delivery.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MailMessage {
    pub from: String,
    pub to: String,
    pub subject: String,
    pub body: String,
}

/// External mail collaborator.
///
/// `send` is synchronous and may block (SMTP round trip); async callers run
/// it on a blocking task.
pub trait MailTransport: Send + Sync + 'static {
    fn send(&self, message: &MailMessage) -> Result<(), MailError>;
}

/// SMTP relay configuration, typically read from the environment.
#[derive(Debug, Clone)]
pub struct SmtpConfig {
    pub host: String,
    pub username: String,
    pub password: String,
}

/// SMTP-backed transport (lettre).
pub struct SmtpMailer {
    transport: SmtpTransport,
}

impl SmtpMailer {
    pub fn new(config: &SmtpConfig) -> Result<Self, MailError> {
        let transport = SmtpTransport::relay(&config.host)?
            .credentials(Credentials::new(
                config.username.clone(),
                config.password.clone(),
            ))
            .build();
        Ok(Self { transport })
    }
}

impl MailTransport for SmtpMailer {
    fn send(&self, message: &MailMessage) -> Result<(), MailError> {
        let email = Message::builder()
            .from(message.from.parse()?)
            .to(message.to.parse()?)
            .subject(&message.subject)
            .body(message.body.clone())?;

        self.transport.send(&email)?;
        Ok(())
    }
}

/// Transport used when SMTP is not configured: logs instead of sending.
#[derive(Debug, Default)]
pub struct NoopMailer;

impl MailTransport for NoopMailer {
    fn send(&self, message: &MailMessage) -> Result<(), MailError> {
        info!(to = %message.to, subject = %message.subject, "mail not configured; dropping message");
        Ok(())
    }
}
