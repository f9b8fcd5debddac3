//! Core data types for COVID statistics
//!
//! This module defines the domain types produced by the API layer and
//! consumed by the transformer and the view:
//! - `GlobalSummary`: worldwide snapshot with per-country totals
//! - `CountryTotals`: cumulative counts for one country
//! - `DayCount`: one day of a country-day series
//! - `Metric`: which count a series or total refers to

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Worldwide snapshot returned by the summary endpoint
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct GlobalSummary {
    /// When the upstream data was last refreshed
    pub date: DateTime<Utc>,
    /// Per-country cumulative totals, in upstream order
    pub countries: Vec<CountryTotals>,
}

/// Cumulative totals for a single country
///
/// Identity is `country_slug`. The upstream API is trusted to keep
/// `total_confirmed >= total_deaths + total_recovered`; nothing here checks it.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct CountryTotals {
    pub country_slug: String,
    pub country_name: String,
    pub total_confirmed: u64,
    pub total_deaths: u64,
    pub total_recovered: u64,
}

impl CountryTotals {
    /// Create a country entry with only a confirmed count
    pub fn new(slug: impl Into<String>, name: impl Into<String>, confirmed: u64) -> Self {
        Self {
            country_slug: slug.into(),
            country_name: name.into(),
            total_confirmed: confirmed,
            total_deaths: 0,
            total_recovered: 0,
        }
    }

    /// Builder method: set deaths
    pub fn deaths(mut self, deaths: u64) -> Self {
        self.total_deaths = deaths;
        self
    }

    /// Builder method: set recovered
    pub fn recovered(mut self, recovered: u64) -> Self {
        self.total_recovered = recovered;
        self
    }

    /// Value of the given metric for this country
    pub fn total(&self, metric: Metric) -> u64 {
        match metric {
            Metric::Confirmed => self.total_confirmed,
            Metric::Deaths => self.total_deaths,
            Metric::Recovered => self.total_recovered,
        }
    }
}

/// One day of a country-day series
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct DayCount {
    pub date: DateTime<Utc>,
    pub cases: u64,
}

impl DayCount {
    pub fn new(date: DateTime<Utc>, cases: u64) -> Self {
        Self { date, cases }
    }
}

/// Per-day counts for one country and one metric, chronological
pub type CountryDaySeries = Vec<DayCount>;

/// Which count a total or a series refers to
///
/// The lowercase name doubles as the `status` path segment of the
/// per-country endpoint.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase")]
pub enum Metric {
    Confirmed,
    Recovered,
    Deaths,
}

impl Metric {
    /// Path segment used by the per-country status endpoint
    pub fn as_str(&self) -> &'static str {
        match self {
            Metric::Confirmed => "confirmed",
            Metric::Recovered => "recovered",
            Metric::Deaths => "deaths",
        }
    }
}

impl std::fmt::Display for Metric {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_metric_wire_names() {
        assert_eq!(Metric::Deaths.as_str(), "deaths");
        assert_eq!(Metric::Recovered.to_string(), "recovered");
        assert_eq!(
            serde_json::to_string(&Metric::Confirmed).unwrap(),
            "\"confirmed\""
        );
    }

    #[test]
    fn test_country_total_by_metric() {
        let c = CountryTotals::new("spain", "Spain", 250).deaths(20).recovered(100);
        assert_eq!(c.total(Metric::Confirmed), 250);
        assert_eq!(c.total(Metric::Deaths), 20);
        assert_eq!(c.total(Metric::Recovered), 100);
    }
}
