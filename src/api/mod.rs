//! Statistics API access
//!
//! - **client**: reqwest client for the public REST API
//! - **dto**: Upstream JSON shapes and their mapping to domain types
//! - **error**: Error types
//!
//! The controller only sees the [`StatsSource`] trait, so it can run
//! against the live API or an in-memory source.

mod client;
mod dto;
mod error;

pub use client::{ApiClientConfig, CovidApiClient, DEFAULT_BASE_URL};
pub use error::ApiError;

use async_trait::async_trait;

use crate::stats::{CountryDaySeries, GlobalSummary, Metric};

/// Anything that can answer the two statistics queries
#[async_trait]
pub trait StatsSource: Send + Sync {
    /// Worldwide snapshot with per-country totals
    async fn fetch_global_summary(&self) -> Result<GlobalSummary, ApiError>;

    /// Chronological day series for one country and metric
    async fn fetch_country_series(
        &self,
        country_slug: &str,
        metric: Metric,
    ) -> Result<CountryDaySeries, ApiError>;
}
