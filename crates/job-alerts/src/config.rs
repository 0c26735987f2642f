//! Run configuration for the job alert pipeline.
//!
//! Built once at process entry and passed by reference to every component.

use chrono::TimeDelta;
use std::time::Duration;

use crate::search::SearchQuery;

/// Default JSearch search endpoint.
pub const DEFAULT_API_URL: &str = "https://jsearch.p.rapidapi.com/search";

/// Host identifier RapidAPI expects alongside the key.
pub const DEFAULT_API_HOST: &str = "jsearch.p.rapidapi.com";

/// Role titles searched on every run, in digest order.
pub const DEFAULT_KEYWORDS: &[&str] = &[
    "Software Engineer",
    "Backend Engineer",
    "Full Stack Engineer",
    "SDE",
    "Machine Learning Engineer",
];

/// Default search location.
pub const DEFAULT_LOCATION: &str = "United States";

/// Upstream freshness filter.
pub const DEFAULT_DATE_POSTED: &str = "3days";

/// Upstream experience filter.
pub const DEFAULT_JOB_REQUIREMENTS: &str = "under_3_years_experience";

/// Acceptance threshold for posting age, in hours.
///
/// Wider than the advertised window to absorb upstream reporting lag.
pub const DEFAULT_WINDOW_HOURS: u32 = 48;

/// Window quoted in digest headers.
pub const DEFAULT_WINDOW_LABEL: &str = "36 hours";

/// Descriptions are cut to this many characters.
pub const DESCRIPTION_LIMIT: usize = 500;

/// Default per-request timeout for the search API.
pub const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// Connection settings for the search API.
#[derive(Debug, Clone)]
pub struct ApiConfig {
    /// Search endpoint URL.
    pub base_url: String,
    /// Value of the `X-RapidAPI-Host` header.
    pub host: String,
    /// Value of the `X-RapidAPI-Key` header.
    pub api_key: String,
    /// Per-request timeout.
    pub timeout: Duration,
}

impl ApiConfig {
    /// Create API settings with default endpoint and timeout.
    #[must_use]
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            base_url: DEFAULT_API_URL.to_string(),
            host: DEFAULT_API_HOST.to_string(),
            api_key: api_key.into(),
            timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
        }
    }
}

/// Configuration for one alert run.
#[derive(Debug, Clone)]
pub struct AlertConfig {
    /// Keywords searched in order; one request each.
    pub keywords: Vec<String>,
    /// Location sent with every query.
    pub location: String,
    /// Result page requested.
    pub page: u32,
    /// Number of pages requested.
    pub num_pages: u32,
    /// Upstream `date_posted` filter.
    pub date_posted: String,
    /// Upstream `job_requirements` filter.
    pub job_requirements: String,
    /// Maximum posting age accepted by the recency filter.
    pub recency_window: TimeDelta,
    /// Window description used in digest headers.
    pub window_label: String,
    /// Search API connection settings.
    pub api: ApiConfig,
}

impl AlertConfig {
    /// Create the default configuration for the given API key.
    #[must_use]
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            keywords: DEFAULT_KEYWORDS.iter().map(ToString::to_string).collect(),
            location: DEFAULT_LOCATION.to_string(),
            page: 1,
            num_pages: 1,
            date_posted: DEFAULT_DATE_POSTED.to_string(),
            job_requirements: DEFAULT_JOB_REQUIREMENTS.to_string(),
            recency_window: TimeDelta::hours(i64::from(DEFAULT_WINDOW_HOURS)),
            window_label: DEFAULT_WINDOW_LABEL.to_string(),
            api: ApiConfig::new(api_key),
        }
    }

    /// Replace the keyword list. An empty list keeps the defaults.
    #[must_use]
    pub fn with_keywords(mut self, keywords: Vec<String>) -> Self {
        if !keywords.is_empty() {
            self.keywords = keywords;
        }
        self
    }

    /// Build the query issued for a single keyword.
    #[must_use]
    pub fn query_for(&self, keyword: &str) -> SearchQuery {
        SearchQuery {
            keyword: keyword.to_string(),
            location: self.location.clone(),
            page: self.page,
            num_pages: self.num_pages,
            date_posted: self.date_posted.clone(),
            job_requirements: self.job_requirements.clone(),
        }
    }
}
