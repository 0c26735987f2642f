//! JSearch API client.

use async_trait::async_trait;
use reqwest::Client;
use tracing::debug;

use super::types::{RawJob, SearchQuery, SearchResponse};
use crate::config::ApiConfig;
use crate::error::FetchError;

/// Source of upstream job records, one call per query.
#[async_trait]
pub trait JobSource: Send + Sync {
    /// Run a single search and return its raw records in response order.
    async fn search(&self, query: &SearchQuery) -> Result<Vec<RawJob>, FetchError>;
}

/// RapidAPI-hosted JSearch client.
pub struct JSearchClient {
    config: ApiConfig,
    client: Client,
}

impl JSearchClient {
    /// Create a new client with the configured request timeout.
    pub fn new(config: ApiConfig) -> Result<Self, FetchError> {
        let client = Client::builder()
            .timeout(config.timeout)
            .build()
            .map_err(FetchError::Client)?;

        Ok(Self { config, client })
    }
}

#[async_trait]
impl JobSource for JSearchClient {
    async fn search(&self, query: &SearchQuery) -> Result<Vec<RawJob>, FetchError> {
        debug!(keyword = %query.keyword, url = %self.config.base_url, "Sending search request");

        let response = self
            .client
            .get(&self.config.base_url)
            .header("X-RapidAPI-Key", &self.config.api_key)
            .header("X-RapidAPI-Host", &self.config.host)
            .query(&query.params())
            .send()
            .await
            .map_err(|source| FetchError::Http {
                keyword: query.keyword.clone(),
                source,
            })?;

        let status = response.status();
        if !status.is_success() {
            let body = response
                .text()
                .await
                .unwrap_or_else(|_| "Unknown error".into());
            return Err(FetchError::Status {
                keyword: query.keyword.clone(),
                status,
                body,
            });
        }

        let body = response.text().await.map_err(|source| FetchError::Http {
            keyword: query.keyword.clone(),
            source,
        })?;

        let parsed: SearchResponse =
            serde_json::from_str(&body).map_err(|source| FetchError::Decode {
                keyword: query.keyword.clone(),
                source,
            })?;

        debug!(keyword = %query.keyword, records = parsed.data.len(), "Search response received");

        Ok(parsed.data)
    }
}
