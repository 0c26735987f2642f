//! Posting age filter.

use chrono::{DateTime, ParseError, TimeDelta, Utc};

/// Parse an upstream posted-at timestamp into UTC.
///
/// Accepts RFC 3339 with either a `Z` suffix or an explicit offset.
/// Timestamps without an offset are rejected.
pub fn parse_posted_at(raw: &str) -> Result<DateTime<Utc>, ParseError> {
    DateTime::parse_from_rfc3339(raw.trim()).map(|dt| dt.with_timezone(&Utc))
}

/// Accepts postings no older than a fixed window.
#[derive(Debug, Clone, Copy)]
pub struct RecencyFilter {
    window: TimeDelta,
}

impl RecencyFilter {
    #[must_use]
    pub const fn new(window: TimeDelta) -> Self {
        Self { window }
    }

    #[must_use]
    pub const fn window(&self) -> TimeDelta {
        self.window
    }

    /// True when `now - posted_at` is at most the window. Future timestamps pass.
    #[must_use]
    pub fn accepts(&self, posted_at: DateTime<Utc>, now: DateTime<Utc>) -> bool {
        now.signed_duration_since(posted_at) <= self.window
    }

    /// Parse `raw` and check it against the window.
    pub fn accepts_raw(&self, raw: &str, now: DateTime<Utc>) -> Result<bool, ParseError> {
        parse_posted_at(raw).map(|posted_at| self.accepts(posted_at, now))
    }
}
