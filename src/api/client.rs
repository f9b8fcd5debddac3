//! Statistics API client
//!
//! HTTP client for the public COVID statistics REST API. Every call is a
//! single attempt: no retries, no backoff.

use async_trait::async_trait;
use reqwest::Client;
use serde::de::DeserializeOwned;
use std::time::Duration;

use super::dto::{CountryStatusDto, SummaryResponse};
use super::error::ApiError;
use super::StatsSource;
use crate::stats::{CountryDaySeries, GlobalSummary, Metric};

/// Default public endpoint
pub const DEFAULT_BASE_URL: &str = "https://ts-covid-api.vercel.app";

/// Configuration for the statistics API client
#[derive(Debug, Clone)]
pub struct ApiClientConfig {
    /// Base URL without trailing slash (e.g., "https://ts-covid-api.vercel.app")
    pub base_url: String,
    /// Per-request timeout; `None` waits as long as the server does
    pub request_timeout: Option<Duration>,
    /// User-Agent header sent with every request
    pub user_agent: String,
}

impl Default for ApiClientConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            request_timeout: None,
            user_agent: format!("covid-dashboard/{}", env!("CARGO_PKG_VERSION")),
        }
    }
}

/// Statistics API client
pub struct CovidApiClient {
    client: Client,
    config: ApiClientConfig,
}

impl CovidApiClient {
    /// Create a new client with the given configuration
    pub fn new(mut config: ApiClientConfig) -> Result<Self, ApiError> {
        config.base_url = config.base_url.trim_end_matches('/').to_string();

        let mut builder = Client::builder().user_agent(config.user_agent.clone());
        if let Some(timeout) = config.request_timeout {
            builder = builder.timeout(timeout);
        }
        let client = builder
            .build()
            .map_err(|e| ApiError::Config(e.to_string()))?;

        Ok(Self { client, config })
    }

    /// Get the current configuration
    pub fn config(&self) -> &ApiClientConfig {
        &self.config
    }

    /// URL of the worldwide summary
    pub fn summary_url(&self) -> String {
        format!("{}/api/summary", self.config.base_url)
    }

    /// URL of one country's day series for a metric
    pub fn country_status_url(&self, country_slug: &str, metric: Metric) -> String {
        format!(
            "{}/api/country/{}/status/{}",
            self.config.base_url,
            urlencoding::encode(country_slug),
            metric.as_str()
        )
    }

    /// Fetch the worldwide summary
    pub async fn fetch_global_summary(&self) -> Result<GlobalSummary, ApiError> {
        let url = self.summary_url();
        let resp: SummaryResponse = self.get_json(&url).await?;
        Ok(resp.into())
    }

    /// Fetch a country's chronological day series for one metric
    pub async fn fetch_country_series(
        &self,
        country_slug: &str,
        metric: Metric,
    ) -> Result<CountryDaySeries, ApiError> {
        let url = self.country_status_url(country_slug, metric);
        let rows: Vec<CountryStatusDto> = self.get_json(&url).await?;
        Ok(rows.into_iter().map(Into::into).collect())
    }

    /// Issue a GET and decode the body
    async fn get_json<T: DeserializeOwned>(&self, url: &str) -> Result<T, ApiError> {
        tracing::debug!(url, "GET");

        let response = self.client.get(url).send().await.map_err(|e| {
            if e.is_timeout() {
                ApiError::Timeout {
                    url: url.to_string(),
                }
            } else {
                ApiError::Request(e)
            }
        })?;

        let status = response.status();
        if !status.is_success() {
            tracing::warn!(url, status = status.as_u16(), "API returned error status");
            return Err(ApiError::Status {
                status: status.as_u16(),
                url: url.to_string(),
            });
        }

        let body = response.bytes().await?;
        tracing::debug!(url, bytes = body.len(), "response received");

        serde_json::from_slice(&body).map_err(|source| ApiError::Malformed {
            url: url.to_string(),
            source,
        })
    }
}

#[async_trait]
impl StatsSource for CovidApiClient {
    async fn fetch_global_summary(&self) -> Result<GlobalSummary, ApiError> {
        CovidApiClient::fetch_global_summary(self).await
    }

    async fn fetch_country_series(
        &self,
        country_slug: &str,
        metric: Metric,
    ) -> Result<CountryDaySeries, ApiError> {
        CovidApiClient::fetch_country_series(self, country_slug, metric).await
    }
}
