//! View model
//!
//! Plain data mirroring the dashboard page. Field names follow the page
//! elements they replace (`confirmed_total`, `rank_list`, `line_chart`, ...).

use chrono::{DateTime, Utc};
use serde::Serialize;

use super::chart::{Canvas, LineChart};
use super::{DetailPanel, View};
use crate::stats::{
    format_detail_date, format_last_updated, newest_first, CountryTotals, DayCount, WorldTotals,
};

/// One row of the ranked country list
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct RankItem {
    /// Country slug; selecting this row requests this country
    pub id: String,
    pub cases: u64,
    pub country: String,
}

/// One row of a detail panel
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct DetailItem {
    pub cases: u64,
    pub date: String,
}

/// Loading indicator placed inside a detail panel
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct Spinner {
    pub id: String,
}

/// A detail panel: rows plus an optional spinner
#[derive(Debug, Clone, Default, Serialize, PartialEq, Eq)]
pub struct DetailList {
    pub items: Vec<DetailItem>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub spinner: Option<Spinner>,
}

impl DetailList {
    pub fn is_loading(&self) -> bool {
        self.spinner.is_some()
    }
}

/// Everything the dashboard displays
#[derive(Debug, Clone, Default, Serialize, PartialEq)]
pub struct ViewModel {
    pub confirmed_total: String,
    pub deaths: String,
    pub recovered: String,
    pub last_updated_time: String,
    pub rank_list: Vec<RankItem>,
    pub deaths_list: DetailList,
    pub recovered_list: DetailList,
    pub line_chart: Canvas,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl ViewModel {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of spinners currently on the page
    pub fn spinner_count(&self) -> usize {
        [&self.deaths_list, &self.recovered_list]
            .iter()
            .filter(|l| l.is_loading())
            .count()
    }

    /// The chart currently drawn on `line_chart`
    pub fn chart(&self) -> Option<&LineChart> {
        self.line_chart.chart()
    }

    pub fn detail_list(&self, panel: DetailPanel) -> &DetailList {
        match panel {
            DetailPanel::Deaths => &self.deaths_list,
            DetailPanel::Recovered => &self.recovered_list,
        }
    }

    fn detail_list_mut(&mut self, panel: DetailPanel) -> &mut DetailList {
        match panel {
            DetailPanel::Deaths => &mut self.deaths_list,
            DetailPanel::Recovered => &mut self.recovered_list,
        }
    }
}

impl View for ViewModel {
    fn render_totals(&mut self, totals: &WorldTotals) {
        self.confirmed_total = totals.confirmed.to_string();
        self.deaths = totals.deaths.to_string();
        self.recovered = totals.recovered.to_string();
    }

    fn render_last_updated(&mut self, date: &DateTime<Utc>) {
        self.last_updated_time = format_last_updated(date);
    }

    fn render_ranked_list(&mut self, ranked: &[CountryTotals]) {
        self.rank_list = ranked
            .iter()
            .map(|c| RankItem {
                id: c.country_slug.clone(),
                cases: c.total_confirmed,
                country: c.country_name.clone(),
            })
            .collect();
    }

    fn render_series(&mut self, values: &[u64], labels: &[String]) {
        self.line_chart
            .draw(LineChart::new(values.to_vec(), labels.to_vec()));
    }

    fn show_loading(&mut self) {
        for panel in DetailPanel::all() {
            self.detail_list_mut(*panel).spinner = Some(Spinner {
                id: panel.spinner_id().to_string(),
            });
        }
    }

    fn hide_loading(&mut self) {
        for panel in DetailPanel::all() {
            self.detail_list_mut(*panel).spinner = None;
        }
    }

    fn clear_details(&mut self) {
        for panel in DetailPanel::all() {
            self.detail_list_mut(*panel).items.clear();
        }
    }

    fn render_detail_list(&mut self, panel: DetailPanel, series: &[DayCount]) {
        self.detail_list_mut(panel).items = newest_first(series)
            .into_iter()
            .map(|d| DetailItem {
                cases: d.cases,
                date: format_detail_date(&d.date),
            })
            .collect();
    }

    fn render_detail_total(&mut self, panel: DetailPanel, cases: u64) {
        let text = cases.to_string();
        match panel {
            DetailPanel::Deaths => self.deaths = text,
            DetailPanel::Recovered => self.recovered = text,
        }
    }

    fn render_error(&mut self, message: &str) {
        self.error = Some(message.to_string());
    }

    fn clear_error(&mut self) {
        self.error = None;
    }
}
