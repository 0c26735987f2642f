//! Configuration for digest email delivery.

use crate::error::NotifyError;

/// Default Gmail SMTP host.
pub const DEFAULT_SMTP_HOST: &str = "smtp.gmail.com";

/// Default Gmail SMTP port (implicit TLS).
pub const DEFAULT_SMTP_PORT: u16 = 465;

/// Mail account address; also used as the sender.
pub const ENV_EMAIL_USER: &str = "EMAIL_USER";

/// Mail account app password.
pub const ENV_EMAIL_PASS: &str = "EMAIL_PASS";

/// Digest recipient.
pub const ENV_EMAIL_RECEIVER: &str = "EMAIL_RECEIVER";

const ENV_SMTP_HOST: &str = "SMTP_HOST";
const ENV_SMTP_PORT: &str = "SMTP_PORT";

/// Configuration for the digest mailer.
#[derive(Clone)]
pub struct MailConfig {
    /// SMTP server hostname.
    pub smtp_host: String,
    /// SMTP server port.
    pub smtp_port: u16,
    /// SMTP username (Gmail address).
    pub smtp_username: String,
    /// SMTP password (Gmail app password).
    pub smtp_password: String,
    /// Recipient email address.
    pub to_email: String,
    /// Sender email address (same as username).
    pub from_email: String,
}

impl MailConfig {
    /// Create configuration from environment variables.
    ///
    /// # Required Environment Variables
    /// - `EMAIL_USER`: Gmail address for sending
    /// - `EMAIL_PASS`: Gmail app password (not regular password)
    /// - `EMAIL_RECEIVER`: Recipient address
    ///
    /// # Optional Environment Variables
    /// - `SMTP_HOST`: SMTP server (default: smtp.gmail.com)
    /// - `SMTP_PORT`: SMTP port (default: 465)
    pub fn from_env() -> Result<Self, NotifyError> {
        let smtp_username = required(ENV_EMAIL_USER)?;
        let smtp_password = required(ENV_EMAIL_PASS)?;
        let to_email = required(ENV_EMAIL_RECEIVER)?;

        let smtp_host = std::env::var(ENV_SMTP_HOST)
            .ok()
            .filter(|v| !v.is_empty())
            .unwrap_or_else(|| DEFAULT_SMTP_HOST.to_string());

        let smtp_port = std::env::var(ENV_SMTP_PORT)
            .ok()
            .and_then(|v| v.parse().ok())
            .unwrap_or(DEFAULT_SMTP_PORT);

        Ok(Self {
            smtp_host,
            smtp_port,
            smtp_username: smtp_username.clone(),
            smtp_password,
            to_email,
            from_email: smtp_username,
        })
    }
}

// Keeps the password out of logs.
impl std::fmt::Debug for MailConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("MailConfig")
            .field("smtp_host", &self.smtp_host)
            .field("smtp_port", &self.smtp_port)
            .field("smtp_username", &self.smtp_username)
            .field("smtp_password", &"<redacted>")
            .field("to_email", &self.to_email)
            .field("from_email", &self.from_email)
            .finish()
    }
}

fn required(name: &str) -> Result<String, NotifyError> {
    std::env::var(name)
        .ok()
        .filter(|v| !v.is_empty())
        .ok_or_else(|| NotifyError::NotConfigured(name.to_string()))
}
