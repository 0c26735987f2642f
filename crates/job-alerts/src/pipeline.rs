//! Alert pipeline - orchestrates the fetch-filter-report-notify flow.

use chrono::{DateTime, NaiveDate, Utc};
use std::io::Write;
use std::sync::Arc;

use crate::config::AlertConfig;
use crate::digest::{DigestGenerator, Notifier, NotifyOutcome};
use crate::error::{FetchError, RunError};
use crate::search::{parse_posted_at, JobPosting, JobSource, RecencyFilter};

/// Runs one search per keyword and keeps recent postings.
pub struct Aggregator<'a> {
    config: &'a AlertConfig,
    source: &'a dyn JobSource,
    filter: RecencyFilter,
}

impl<'a> Aggregator<'a> {
    #[must_use]
    pub fn new(config: &'a AlertConfig, source: &'a dyn JobSource) -> Self {
        Self {
            config,
            source,
            filter: RecencyFilter::new(config.recency_window),
        }
    }

    /// Collect postings in keyword-then-response order.
    ///
    /// Keywords are searched one at a time. The first failed search aborts
    /// the whole collection.
    pub async fn collect(&self, now: DateTime<Utc>) -> Result<Vec<JobPosting>, FetchError> {
        let mut postings = Vec::new();

        for keyword in &self.config.keywords {
            let query = self.config.query_for(keyword);
            let records = self.source.search(&query).await?;
            let fetched = records.len();
            let before = postings.len();

            for record in records {
                let Some(raw_posted) = record.job_posted_at_datetime_utc.clone() else {
                    tracing::debug!(keyword = %keyword, "Record has no posted-at timestamp, skipping");
                    continue;
                };

                let posted_at = match parse_posted_at(&raw_posted) {
                    Ok(ts) => ts,
                    Err(e) => {
                        tracing::warn!(
                            keyword = %keyword,
                            posted_at = %raw_posted,
                            error = %e,
                            "Unparseable posted-at timestamp, skipping record"
                        );
                        continue;
                    }
                };

                if self.filter.accepts(posted_at, now) {
                    postings.push(JobPosting::from_raw(record, posted_at));
                }
            }

            tracing::info!(
                keyword = %keyword,
                fetched,
                accepted = postings.len() - before,
                "Keyword searched"
            );
        }

        Ok(postings)
    }
}

/// Result of a single run.
#[derive(Debug)]
pub struct RunSummary {
    /// Postings that made it into the digest.
    pub postings: Vec<JobPosting>,
    /// Email body that was (or would have been) sent.
    pub digest: String,
    /// What happened to the email.
    pub notify: NotifyOutcome,
}

/// Alert pipeline orchestrator.
pub struct Pipeline {
    config: AlertConfig,
    source: Arc<dyn JobSource>,
    notifier: Notifier,
}

impl Pipeline {
    /// Create a new pipeline.
    #[must_use]
    pub fn new(config: AlertConfig, source: Arc<dyn JobSource>, notifier: Notifier) -> Self {
        Self {
            config,
            source,
            notifier,
        }
    }

    /// Run once: fetch, print the console report to `console`, then email.
    ///
    /// `now` drives the recency filter; `today` is the operator's local date
    /// used in the email subject.
    ///
    /// Fetch failures end the run before anything is printed or sent.
    /// Email failures are reported in the summary and on `console`.
    pub async fn run<W: Write>(
        &self,
        now: DateTime<Utc>,
        today: NaiveDate,
        console: &mut W,
    ) -> Result<RunSummary, RunError> {
        tracing::info!(keywords = self.config.keywords.len(), "Starting alert run");

        let postings = Aggregator::new(&self.config, self.source.as_ref())
            .collect(now)
            .await?;

        let report = DigestGenerator::generate_console(&postings, &self.config.window_label);
        console.write_all(report.as_bytes())?;

        let digest = DigestGenerator::generate_text(&postings, &self.config.window_label);
        let notify = self.notifier.notify(&postings, &digest, today).await;
        writeln!(console, "{notify}")?;

        tracing::info!(postings = postings.len(), outcome = ?notify, "Alert run complete");

        Ok(RunSummary {
            postings,
            digest,
            notify,
        })
    }
}
