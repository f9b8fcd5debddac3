//! # Covid Dashboard
//!
//! Worldwide COVID-19 statistics dashboard: fetches the public statistics
//! API and renders worldwide totals, a country ranking, and a two-week trend
//! chart for a selected country.
//!
//! ## Modules
//!
//! - [`api`]: HTTP client for the statistics API
//! - [`stats`]: Domain types and pure transformations
//! - [`view`]: View model, chart canvas, and text rendering
//! - [`dashboard`]: Controller wiring fetch → transform → render
//! - [`config`]: TOML configuration with environment overrides
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use covid_dashboard::api::{ApiClientConfig, CovidApiClient};
//! use covid_dashboard::dashboard::{Dashboard, DashboardOptions};
//! use covid_dashboard::view::{render_text, RenderOptions, ViewModel};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let client = CovidApiClient::new(ApiClientConfig::default())?;
//!     let dash = Dashboard::new(client, ViewModel::new(), DashboardOptions::default());
//!
//!     dash.load_summary().await?;
//!     dash.select_country("spain").await?;
//!
//!     let text = dash
//!         .with_view(|vm| render_text(vm, &RenderOptions::default()))
//!         .await;
//!     println!("{}", text);
//!
//!     Ok(())
//! }
//! ```

pub mod api;
pub mod config;
pub mod dashboard;
pub mod stats;
pub mod view;

// Re-export top-level types for convenience
pub use api::{ApiClientConfig, ApiError, CovidApiClient, StatsSource};

pub use stats::{
    last_n_days, rank_by_confirmed, totals_by_metric, CountryDaySeries, CountryTotals, DayCount,
    GlobalSummary, Metric, WorldTotals,
};

pub use view::{Canvas, DetailPanel, LineChart, RenderOptions, View, ViewModel};

pub use dashboard::{Dashboard, DashboardError, DashboardOptions, Phase, SelectOutcome};

pub use config::{Config, ConfigError, LoggingConfig};
