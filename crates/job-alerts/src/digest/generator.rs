//! Digest content generator.
//!
//! Builds the plain-text report from accepted postings. The email body and
//! the console report share a header and numbering; only the console variant
//! shows when each job was posted.

use chrono::{NaiveDate, SecondsFormat};
use std::fmt::Write;

use crate::search::JobPosting;

/// Generates digest content from postings.
pub struct DigestGenerator;

impl DigestGenerator {
    /// Header line stating the count and the advertised window.
    #[must_use]
    pub fn header(count: usize, window_label: &str) -> String {
        format!("Found {count} jobs posted in the last {window_label}:")
    }

    /// Email subject for a run on the operator's local `date`.
    #[must_use]
    pub fn subject(date: NaiveDate) -> String {
        format!("Daily Job Alert - {}", date.format("%Y-%m-%d"))
    }

    /// Generate the plain-text email body.
    #[must_use]
    pub fn generate_text(postings: &[JobPosting], window_label: &str) -> String {
        let mut text = Self::header(postings.len(), window_label);
        text.push_str("\n\n");

        for (idx, job) in postings.iter().enumerate() {
            let _ = write!(
                text,
                "{num}. {title} - {company}\n   Location: {location}\n   Link: {link}\n\n",
                num = idx + 1,
                title = job.title,
                company = job.company,
                location = job.location,
                link = job.link,
            );
        }

        text
    }

    /// Generate the console report, which also lists posting times.
    #[must_use]
    pub fn generate_console(postings: &[JobPosting], window_label: &str) -> String {
        let mut text = format!("\n{}\n\n", Self::header(postings.len(), window_label));

        for (idx, job) in postings.iter().enumerate() {
            let _ = write!(
                text,
                "{num}. {title} - {company}\n   Location: {location}\n   Posted: {posted}\n   Link: {link}\n\n",
                num = idx + 1,
                title = job.title,
                company = job.company,
                location = job.location,
                posted = job.posted_at.to_rfc3339_opts(SecondsFormat::Secs, true),
                link = job.link,
            );
        }

        text
    }
}
