//! Email sender using Gmail SMTP.

use async_trait::async_trait;
use lettre::message::{header::ContentType, Mailbox};
use lettre::transport::smtp::authentication::Credentials;
use lettre::{AsyncSmtpTransport, AsyncTransport, Message, Tokio1Executor};
use std::time::Duration;

use super::config::MailConfig;
use crate::error::NotifyError;

/// Upper bound on each SMTP command round-trip.
const SMTP_TIMEOUT: Duration = Duration::from_secs(30);

/// Delivers a plain-text message to the configured recipient.
#[async_trait]
pub trait MailTransport: Send + Sync {
    /// Send one message.
    async fn send(&self, subject: &str, body: &str) -> Result<(), NotifyError>;
}

/// SMTP sender for job digests.
pub struct EmailSender {
    config: MailConfig,
}

impl EmailSender {
    /// Create a new email sender with the given configuration.
    #[must_use]
    pub const fn new(config: MailConfig) -> Self {
        Self { config }
    }

    /// Create from environment variables.
    pub fn from_env() -> Result<Self, NotifyError> {
        MailConfig::from_env().map(Self::new)
    }

    /// Recipient address.
    #[must_use]
    pub fn recipient(&self) -> &str {
        &self.config.to_email
    }

    /// Build the plain-text message without sending it.
    pub fn build_message(&self, subject: &str, body: &str) -> Result<Message, NotifyError> {
        let from = parse_mailbox(&self.config.from_email)?;
        let to = parse_mailbox(&self.config.to_email)?;

        let message = Message::builder()
            .from(from)
            .to(to)
            .subject(subject)
            .header(ContentType::TEXT_PLAIN)
            .body(body.to_string())?;

        Ok(message)
    }

    /// Send a fixed test message to verify configuration.
    pub async fn send_test(&self) -> Result<(), NotifyError> {
        let subject = "Daily Job Alert - Test Email";
        let body = "\
Daily Job Alert - Test Email

Email configuration is working!

If you're seeing this, SMTP credentials and the recipient address are
configured correctly.
";

        self.send(subject, body).await
    }
}

#[async_trait]
impl MailTransport for EmailSender {
    async fn send(&self, subject: &str, body: &str) -> Result<(), NotifyError> {
        let email = self.build_message(subject, body)?;

        let creds = Credentials::new(
            self.config.smtp_username.clone(),
            self.config.smtp_password.clone(),
        );

        // Implicit TLS. Built per send: the connection closes when the
        // transport drops at the end of this call, on success or failure.
        let mailer: AsyncSmtpTransport<Tokio1Executor> =
            AsyncSmtpTransport::<Tokio1Executor>::relay(&self.config.smtp_host)?
                .port(self.config.smtp_port)
                .credentials(creds)
                .timeout(Some(SMTP_TIMEOUT))
                .build();

        mailer.send(email).await?;

        tracing::info!(
            to = %self.config.to_email,
            subject = subject,
            "Email sent successfully"
        );

        Ok(())
    }
}

fn parse_mailbox(address: &str) -> Result<Mailbox, NotifyError> {
    address.parse().map_err(|source| NotifyError::Address {
        address: address.to_string(),
        source,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config(from: &str, to: &str) -> MailConfig {
        MailConfig {
            smtp_host: "smtp.gmail.com".to_string(),
            smtp_port: 465,
            smtp_username: from.to_string(),
            smtp_password: "secret".to_string(),
            to_email: to.to_string(),
            from_email: from.to_string(),
        }
    }

    #[test]
    fn test_build_message_headers() {
        let sender = EmailSender::new(config("alerts@gmail.com", "me@example.com"));
        let message = sender
            .build_message("Daily Job Alert - 2026-10-17", "Found 1 jobs")
            .unwrap();

        let raw = String::from_utf8(message.formatted()).unwrap();
        assert!(raw.contains("From: alerts@gmail.com"));
        assert!(raw.contains("To: me@example.com"));
        assert!(raw.contains("Subject: Daily Job Alert - 2026-10-17"));
        assert!(raw.contains("Content-Type: text/plain"));
    }

    #[test]
    fn test_build_message_invalid_recipient() {
        let sender = EmailSender::new(config("alerts@gmail.com", "not an address"));
        let err = sender.build_message("subject", "body").unwrap_err();
        assert!(matches!(err, NotifyError::Address { ref address, .. } if address == "not an address"));
    }

    #[test]
    fn test_recipient() {
        let sender = EmailSender::new(config("alerts@gmail.com", "me@example.com"));
        assert_eq!(sender.recipient(), "me@example.com");
    }
}
