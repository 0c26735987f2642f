//! Search API data types.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::config::DESCRIPTION_LIMIT;

/// Placeholder for text fields the upstream record left empty.
const MISSING: &str = "N/A";

/// Parameters of one upstream search request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchQuery {
    /// Free-text role keyword.
    pub keyword: String,
    /// Location filter.
    pub location: String,
    /// Result page.
    pub page: u32,
    /// Number of pages.
    pub num_pages: u32,
    /// Upstream freshness filter.
    pub date_posted: String,
    /// Upstream experience filter.
    pub job_requirements: String,
}

impl SearchQuery {
    /// Query-string pairs in the order the API documents them.
    #[must_use]
    pub fn params(&self) -> Vec<(&'static str, String)> {
        vec![
            ("query", self.keyword.clone()),
            ("location", self.location.clone()),
            ("page", self.page.to_string()),
            ("num_pages", self.num_pages.to_string()),
            ("date_posted", self.date_posted.clone()),
            ("job_requirements", self.job_requirements.clone()),
        ]
    }
}

/// Response body of the search endpoint.
#[derive(Debug, Default, Deserialize)]
pub struct SearchResponse {
    /// Job records; absent means no results.
    #[serde(default)]
    pub data: Vec<RawJob>,
}

/// A job record as returned upstream. Every field may be missing or null.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RawJob {
    #[serde(default)]
    pub job_title: Option<String>,
    #[serde(default)]
    pub employer_name: Option<String>,
    #[serde(default)]
    pub job_city: Option<String>,
    #[serde(default)]
    pub job_employment_type: Option<String>,
    #[serde(default)]
    pub job_posted_at_datetime_utc: Option<String>,
    #[serde(default)]
    pub job_apply_link: Option<String>,
    #[serde(default)]
    pub job_description: Option<String>,
}

/// A posting accepted into the digest.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct JobPosting {
    pub title: String,
    pub company: String,
    pub location: String,
    pub employment_type: String,
    pub posted_at: DateTime<Utc>,
    pub link: String,
    /// At most [`DESCRIPTION_LIMIT`] characters.
    pub description: String,
}

impl JobPosting {
    /// Build a posting from an upstream record whose timestamp already parsed.
    #[must_use]
    pub fn from_raw(raw: RawJob, posted_at: DateTime<Utc>) -> Self {
        Self {
            title: or_missing(raw.job_title),
            company: or_missing(raw.employer_name),
            location: or_missing(raw.job_city),
            employment_type: or_missing(raw.job_employment_type),
            posted_at,
            link: or_missing(raw.job_apply_link),
            description: truncate_chars(
                raw.job_description.as_deref().unwrap_or_default(),
                DESCRIPTION_LIMIT,
            ),
        }
    }
}

fn or_missing(value: Option<String>) -> String {
    value
        .filter(|v| !v.trim().is_empty())
        .unwrap_or_else(|| MISSING.to_string())
}

/// Keep the first `limit` characters of `text`, never splitting a character.
#[must_use]
pub fn truncate_chars(text: &str, limit: usize) -> String {
    match text.char_indices().nth(limit) {
        Some((idx, _)) => text[..idx].to_string(),
        None => text.to_string(),
    }
}
