//! Daily job alert digest.
//!
//! This crate provides:
//! - A JSearch (RapidAPI) client issuing one query per role keyword
//! - A recency filter keeping postings inside the alert window
//! - Plain-text digest generation for the console and email
//! - Gmail SMTP delivery that degrades gracefully on failure
//!
//! A run is all-or-nothing on the fetch side: if any keyword's search fails,
//! nothing is printed or emailed.

pub mod config;
pub mod digest;
pub mod error;
pub mod pipeline;
pub mod search;

// Re-export main types
pub use config::{AlertConfig, ApiConfig};
pub use digest::{DigestGenerator, EmailSender, MailConfig, Notifier, NotifyOutcome};
pub use error::{FetchError, NotifyError, RunError};
pub use pipeline::{Aggregator, Pipeline, RunSummary};
pub use search::{JSearchClient, JobPosting, JobSource, RecencyFilter};
