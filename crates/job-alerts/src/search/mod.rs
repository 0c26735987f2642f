//! Upstream job search: API client, record types, and the recency filter.

mod client;
mod recency;
mod types;

pub use client::{JSearchClient, JobSource};
pub use recency::{parse_posted_at, RecencyFilter};
pub use types::{truncate_chars, JobPosting, RawJob, SearchQuery, SearchResponse};
