use std::sync::Arc;

use async_trait::async_trait;
use lettre::transport::smtp::authentication::Credentials;
use lettre::transport::stub::StubTransport;
use lettre::{AsyncSmtpTransport, AsyncTransport, Message, Tokio1Executor, Transport};
use thiserror::Error;
use tracing::{debug, info, warn};

use shared_config::AppConfig;

#[derive(Error, Debug)]
pub enum MailError {
    #[error("Mail delivery is not configured")]
    NotConfigured,

    #[error("Invalid mail address: {0}")]
    Address(#[from] lettre::address::AddressError),

    #[error("Invalid content type: {0}")]
    ContentType(#[from] lettre::message::header::ContentTypeErr),

    #[error("Could not build message: {0}")]
    Message(#[from] lettre::error::Error),

    #[error("Could not read attachment: {0}")]
    Attachment(#[from] std::io::Error),

    #[error("SMTP delivery failed: {0}")]
    Smtp(#[from] lettre::transport::smtp::Error),

    #[error("Mail transport rejected message: {0}")]
    Rejected(String),
}

/// Outbound mail seam. The server talks SMTP; tests swap in lettre's stub.
#[async_trait]
pub trait MailTransport: Send + Sync {
    async fn deliver(&self, message: Message) -> Result<(), MailError>;
}

/// STARTTLS relay authenticated with the mail host credentials.
#[derive(Debug)]
pub struct SmtpMailer {
    transport: AsyncSmtpTransport<Tokio1Executor>,
}

impl SmtpMailer {
    pub fn from_config(config: &AppConfig) -> Result<Self, MailError> {
        if !config.is_mail_configured() {
            return Err(MailError::NotConfigured);
        }

        let credentials = Credentials::new(config.mail_username.clone(), config.mail_password.clone());
        let transport = AsyncSmtpTransport::<Tokio1Executor>::starttls_relay(&config.mail_server)?
            .port(config.mail_port)
            .credentials(credentials)
            .build();

        info!("SMTP relay {}:{} ready", config.mail_server, config.mail_port);
        Ok(Self { transport })
    }
}

#[async_trait]
impl MailTransport for SmtpMailer {
    async fn deliver(&self, message: Message) -> Result<(), MailError> {
        self.transport.send(message).await?;
        Ok(())
    }
}

#[async_trait]
impl MailTransport for StubTransport {
    async fn deliver(&self, message: Message) -> Result<(), MailError> {
        debug!("Stub transport recording message");
        Transport::send(self, &message)
            .map(|_| ())
            .map_err(|e| MailError::Rejected(e.to_string()))
    }
}

/// The transport for this process, or `None` when mail is switched off.
pub fn connect(config: &AppConfig) -> Option<Arc<dyn MailTransport>> {
    if !config.is_mail_configured() {
        return None;
    }

    match SmtpMailer::from_config(config) {
        Ok(mailer) => Some(Arc::new(mailer)),
        Err(e) => {
            warn!("Mail disabled, SMTP relay could not be set up: {}", e);
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use assert_matches::assert_matches;
    use crate::test_utils::TestConfig;

    fn message() -> Message {
        Message::builder()
            .from("clinic@example.com".parse().unwrap())
            .to("ravi@example.com".parse().unwrap())
            .subject("Hello")
            .body("Body".to_string())
            .unwrap()
    }

    #[test]
    fn unconfigured_mail_has_no_transport() {
        let config = TestConfig::default().to_app_config();

        assert!(connect(&config).is_none());
        assert_matches!(SmtpMailer::from_config(&config), Err(MailError::NotConfigured));
    }

    #[tokio::test]
    async fn configured_mail_builds_a_relay() {
        let mut config = TestConfig::default().to_app_config();
        config.mail_username = "clinic@example.com".to_string();
        config.mail_password = "app-password".to_string();

        assert!(connect(&config).is_some());
    }

    #[tokio::test]
    async fn stub_transport_records_and_fails_on_request() {
        let ok = StubTransport::new_ok();
        ok.deliver(message()).await.unwrap();
        assert_eq!(ok.messages().len(), 1);

        let failing = StubTransport::new_error();
        assert_matches!(failing.deliver(message()).await, Err(MailError::Rejected(_)));
    }
}
