//! Digest formatting and email delivery.

mod config;
mod email;
mod generator;
mod notifier;

pub use config::{MailConfig, DEFAULT_SMTP_HOST, DEFAULT_SMTP_PORT};
pub use email::{EmailSender, MailTransport};
pub use generator::DigestGenerator;
pub use notifier::{NotifyOutcome, Notifier};
