//! Error types for the job alert pipeline.

use thiserror::Error;

/// Errors raised while fetching postings from the search API.
///
/// These abort the whole run: nothing gathered for earlier keywords is
/// reported once one of these surfaces.
#[derive(Debug, Error)]
pub enum FetchError {
    /// HTTP client could not be constructed
    #[error("Failed to build HTTP client: {0}")]
    Client(#[source] reqwest::Error),

    /// Request failed before a response arrived (connect, TLS, timeout)
    #[error("Search request for '{keyword}' failed: {source}")]
    Http {
        keyword: String,
        #[source]
        source: reqwest::Error,
    },

    /// Search API answered with a non-success status
    #[error("Search API returned {status} for '{keyword}': {body}")]
    Status {
        keyword: String,
        status: reqwest::StatusCode,
        body: String,
    },

    /// Response body was not the expected JSON shape
    #[error("Malformed search response for '{keyword}': {source}")]
    Decode {
        keyword: String,
        #[source]
        source: serde_json::Error,
    },
}

impl FetchError {
    /// Keyword whose request failed, if the failure is tied to one.
    #[must_use]
    pub fn keyword(&self) -> Option<&str> {
        match self {
            Self::Client(_) => None,
            Self::Http { keyword, .. }
            | Self::Status { keyword, .. }
            | Self::Decode { keyword, .. } => Some(keyword),
        }
    }
}

/// Errors that can occur when emailing the digest.
///
/// The notifier swallows these after logging them.
#[derive(Debug, Error)]
pub enum NotifyError {
    /// Required mail setting is absent
    #[error("Mail not configured: {0} environment variable not set")]
    NotConfigured(String),

    /// Sender or recipient is not a valid mailbox
    #[error("Invalid email address '{address}': {source}")]
    Address {
        address: String,
        #[source]
        source: lettre::address::AddressError,
    },

    /// Message could not be assembled
    #[error("Failed to build email message: {0}")]
    Message(#[from] lettre::error::Error),

    /// SMTP connection, TLS, authentication or delivery failure
    #[error("SMTP error: {0}")]
    Transport(#[from] lettre::transport::smtp::Error),
}

/// Errors that end a pipeline run.
#[derive(Debug, Error)]
pub enum RunError {
    /// Fetch phase failed
    #[error(transparent)]
    Fetch(#[from] FetchError),

    /// Console report could not be written
    #[error("Failed to write console report: {0}")]
    Console(#[from] std::io::Error),
}
