//! Dashboard presentation
//!
//! - **model**: `ViewModel`, the in-memory stand-in for the page
//! - **chart**: Line chart and the canvas holding it
//! - **terminal**: Text rendering of a `ViewModel`
//!
//! The controller only talks to the [`View`] trait.

mod chart;
mod model;
mod terminal;

pub use chart::{Canvas, LineChart, CHART_COLOR, CHART_LABEL, LINE_CHART_ID};
pub use model::{DetailItem, DetailList, RankItem, Spinner, ViewModel};
pub use terminal::{render_text, RenderOptions};

use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::stats::{CountryTotals, DayCount, Metric, WorldTotals};

/// Side panels listing one country's daily deaths or recoveries
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum DetailPanel {
    Deaths,
    Recovered,
}

impl DetailPanel {
    pub fn all() -> &'static [DetailPanel] {
        &[DetailPanel::Deaths, DetailPanel::Recovered]
    }

    /// Metric whose series feeds this panel
    pub fn metric(&self) -> Metric {
        match self {
            DetailPanel::Deaths => Metric::Deaths,
            DetailPanel::Recovered => Metric::Recovered,
        }
    }

    /// Element id of the panel's loading spinner
    pub fn spinner_id(&self) -> &'static str {
        match self {
            DetailPanel::Deaths => "deaths-spinner",
            DetailPanel::Recovered => "recovered-spinner",
        }
    }
}

/// Rendering capabilities the dashboard controller needs
pub trait View: Send {
    /// Headline worldwide totals
    fn render_totals(&mut self, totals: &WorldTotals);

    /// When the upstream data was last refreshed
    fn render_last_updated(&mut self, date: &DateTime<Utc>);

    /// Replace the ranked country list
    fn render_ranked_list(&mut self, ranked: &[CountryTotals]);

    /// Replace the trend chart
    fn render_series(&mut self, values: &[u64], labels: &[String]);

    /// Add the loading spinners to both detail panels
    fn show_loading(&mut self);

    /// Remove the loading spinners
    fn hide_loading(&mut self);

    /// Empty both detail panels
    fn clear_details(&mut self);

    /// Replace one detail panel's rows
    fn render_detail_list(&mut self, panel: DetailPanel, series: &[DayCount]);

    /// Country-level total shown above a detail panel
    fn render_detail_total(&mut self, panel: DetailPanel, cases: u64);

    /// Show a user-visible error message
    fn render_error(&mut self, message: &str);

    fn clear_error(&mut self);
}
