//! Digest delivery with graceful degradation.
//!
//! Failing to email never fails the run: errors are logged and reported as
//! an outcome instead of propagated.

use chrono::NaiveDate;
use std::fmt;
use std::sync::Arc;
use tracing::{debug, error, info, warn};

use super::email::{EmailSender, MailTransport};
use super::generator::DigestGenerator;
use crate::search::JobPosting;

/// Result of a delivery attempt.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NotifyOutcome {
    /// Nothing to send.
    Skipped,
    /// Message accepted by the mail server.
    Sent,
    /// Delivery failed; carries the underlying cause.
    Failed(String),
    /// Delivery turned off for this run.
    Disabled,
}

impl fmt::Display for NotifyOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Skipped => write!(f, "No new jobs found to email."),
            Self::Sent => write!(f, "Email sent successfully!"),
            Self::Failed(cause) => write!(f, "Failed to send email: {cause}"),
            Self::Disabled => write!(f, "Email delivery disabled for this run."),
        }
    }
}

enum Delivery {
    Ready(Arc<dyn MailTransport>),
    Unconfigured(String),
    Disabled,
}

/// Sends the digest to the configured recipient.
pub struct Notifier {
    delivery: Delivery,
}

impl Notifier {
    /// Create a notifier from the mail environment variables.
    ///
    /// Missing settings are logged here and reported again as a failed
    /// outcome when a digest would have been sent.
    #[must_use]
    pub fn from_env() -> Self {
        match EmailSender::from_env() {
            Ok(sender) => {
                info!(to = %sender.recipient(), "Email notifications enabled");
                Self::new(Arc::new(sender))
            }
            Err(e) => {
                warn!(error = %e, "Email notifications unavailable");
                Self {
                    delivery: Delivery::Unconfigured(e.to_string()),
                }
            }
        }
    }

    /// Create a notifier with a specific transport.
    #[must_use]
    pub fn new(transport: Arc<dyn MailTransport>) -> Self {
        Self {
            delivery: Delivery::Ready(transport),
        }
    }

    /// Create a notifier that never sends.
    #[must_use]
    pub const fn disabled() -> Self {
        Self {
            delivery: Delivery::Disabled,
        }
    }

    /// Email the digest for `postings`, dated with the local `today`.
    ///
    /// An empty list is a no-op. Errors are logged and returned as
    /// [`NotifyOutcome::Failed`], never propagated.
    pub async fn notify(
        &self,
        postings: &[JobPosting],
        digest: &str,
        today: NaiveDate,
    ) -> NotifyOutcome {
        if postings.is_empty() {
            debug!("No postings, skipping email");
            return NotifyOutcome::Skipped;
        }

        let transport = match &self.delivery {
            Delivery::Ready(transport) => transport,
            Delivery::Unconfigured(reason) => {
                error!(error = %reason, "Failed to send email");
                return NotifyOutcome::Failed(reason.clone());
            }
            Delivery::Disabled => {
                debug!(postings = postings.len(), "Email disabled, skipping");
                return NotifyOutcome::Disabled;
            }
        };

        let subject = DigestGenerator::subject(today);
        match transport.send(&subject, digest).await {
            Ok(()) => NotifyOutcome::Sent,
            Err(e) => {
                error!(error = %e, "Failed to send email");
                NotifyOutcome::Failed(e.to_string())
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::NotifyError;
    use async_trait::async_trait;
    use chrono::{DateTime, TimeZone, Utc};
    use std::sync::Mutex;

    /// Records sent messages; optionally fails every send.
    #[derive(Default)]
    struct RecordingTransport {
        sent: Mutex<Vec<(String, String)>>,
        fail: bool,
    }

    #[async_trait]
    impl MailTransport for RecordingTransport {
        async fn send(&self, subject: &str, body: &str) -> Result<(), NotifyError> {
            self.sent
                .lock()
                .unwrap()
                .push((subject.to_string(), body.to_string()));
            if self.fail {
                Err(NotifyError::NotConfigured("EMAIL_PASS".to_string()))
            } else {
                Ok(())
            }
        }
    }

    fn now() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2026, 10, 17, 12, 0, 0).unwrap()
    }

    fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2026, 10, 17).unwrap()
    }

    fn posting() -> JobPosting {
        JobPosting {
            title: "SDE".to_string(),
            company: "Acme".to_string(),
            location: "Austin".to_string(),
            employment_type: "FULLTIME".to_string(),
            posted_at: now(),
            link: "https://acme.example/apply".to_string(),
            description: String::new(),
        }
    }

    #[tokio::test]
    async fn test_empty_postings_skip_delivery() {
        let transport = Arc::new(RecordingTransport::default());
        let notifier = Notifier::new(transport.clone());

        let outcome = notifier.notify(&[], "Found 0 jobs", today()).await;
        assert_eq!(outcome, NotifyOutcome::Skipped);
        assert_eq!(outcome.to_string(), "No new jobs found to email.");
        assert!(transport.sent.lock().unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_sends_subject_and_body() {
        let transport = Arc::new(RecordingTransport::default());
        let notifier = Notifier::new(transport.clone());

        let outcome = notifier.notify(&[posting()], "digest body", today()).await;
        assert_eq!(outcome, NotifyOutcome::Sent);

        let sent = transport.sent.lock().unwrap();
        assert_eq!(sent.len(), 1);
        assert_eq!(sent[0].0, "Daily Job Alert - 2026-10-17");
        assert_eq!(sent[0].1, "digest body");
    }

    #[tokio::test]
    async fn test_transport_failure_is_swallowed() {
        let transport = Arc::new(RecordingTransport {
            fail: true,
            ..RecordingTransport::default()
        });
        let notifier = Notifier::new(transport);

        let outcome = notifier.notify(&[posting()], "digest", today()).await;
        match &outcome {
            NotifyOutcome::Failed(cause) => assert!(cause.contains("EMAIL_PASS")),
            other => panic!("expected failure, got {other:?}"),
        }
        assert!(outcome.to_string().starts_with("Failed to send email: "));
    }

    #[tokio::test]
    async fn test_unconfigured_reports_failure() {
        let notifier = Notifier {
            delivery: Delivery::Unconfigured(
                NotifyError::NotConfigured("EMAIL_USER".to_string()).to_string(),
            ),
        };

        let outcome = notifier.notify(&[posting()], "digest", today()).await;
        assert_eq!(
            outcome,
            NotifyOutcome::Failed(
                "Mail not configured: EMAIL_USER environment variable not set".to_string()
            )
        );
    }

    #[tokio::test]
    async fn test_disabled_never_sends() {
        let notifier = Notifier::disabled();
        assert_eq!(
            notifier.notify(&[posting()], "digest", today()).await,
            NotifyOutcome::Disabled
        );
        assert_eq!(
            notifier.notify(&[], "digest", today()).await,
            NotifyOutcome::Skipped
        );
    }
}
