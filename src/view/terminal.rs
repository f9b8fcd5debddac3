//! Plain-text rendering of the dashboard

use super::model::{DetailList, ViewModel};
use super::DetailPanel;

/// Knobs for [`render_text`]
#[derive(Debug, Clone)]
pub struct RenderOptions {
    /// Only print the first `n` ranking rows
    pub top: Option<usize>,
    /// Rows of the plotted chart area
    pub chart_height: usize,
    /// Print the deaths/recovered panels
    pub show_details: bool,
}

impl Default for RenderOptions {
    fn default() -> Self {
        Self {
            top: None,
            chart_height: 8,
            show_details: false,
        }
    }
}

/// Render the whole dashboard as text
pub fn render_text(vm: &ViewModel, opts: &RenderOptions) -> String {
    let mut lines = vec!["COVID-19 Dashboard".to_string(), "=".repeat(18)];

    if let Some(error) = &vm.error {
        lines.push(format!("! {}", error));
        lines.push(String::new());
    }

    lines.push(format!("{:<17}{}", "Total confirmed:", or_dash(&vm.confirmed_total)));
    lines.push(format!("{:<17}{}", "Total deaths:", or_dash(&vm.deaths)));
    lines.push(format!("{:<17}{}", "Total recovered:", or_dash(&vm.recovered)));
    lines.push(format!("{:<17}{}", "Last updated:", or_dash(&vm.last_updated_time)));

    if !vm.rank_list.is_empty() {
        lines.push(String::new());
        lines.push(format!(
            "{:<6}{:>12}  {:<32}{}",
            "Rank", "Confirmed", "Country", "Id"
        ));
        lines.push("-".repeat(72));

        let limit = opts.top.unwrap_or(vm.rank_list.len());
        for (idx, item) in vm.rank_list.iter().take(limit).enumerate() {
            lines.push(format!(
                "{:<6}{:>12}  {:<32}{}",
                idx + 1,
                item.cases,
                item.country,
                item.id
            ));
        }
        if limit < vm.rank_list.len() {
            lines.push(format!("... {} more", vm.rank_list.len() - limit));
        }
    }

    if vm.spinner_count() > 0 {
        lines.push(String::new());
        lines.push("Loading...".to_string());
    }

    if opts.show_details {
        for panel in DetailPanel::all() {
            render_detail(&mut lines, *panel, vm.detail_list(*panel));
        }
    }

    if let Some(chart) = vm.chart() {
        lines.push(String::new());
        lines.push(format!("{} ({})", chart.label, chart.color));
        lines.extend(chart.plot(opts.chart_height));
    }

    let mut out = lines.join("\n");
    out.push('\n');
    out
}

fn render_detail(lines: &mut Vec<String>, panel: DetailPanel, list: &DetailList) {
    let title = match panel {
        DetailPanel::Deaths => "Deaths",
        DetailPanel::Recovered => "Recovered",
    };
    lines.push(String::new());
    lines.push(title.to_string());
    if list.items.is_empty() {
        lines.push("  -".to_string());
        return;
    }
    for item in &list.items {
        lines.push(format!("  {:>10}  {}", item.cases, item.date));
    }
}

fn or_dash(s: &str) -> &str {
    if s.is_empty() {
        "-"
    } else {
        s
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::stats::{CountryTotals, DayCount, WorldTotals};
    use crate::view::View;
    use chrono::{TimeZone, Utc};

    fn populated() -> ViewModel {
        let mut vm = ViewModel::new();
        vm.render_totals(&WorldTotals {
            confirmed: 350,
            deaths: 15,
            recovered: 130,
        });
        vm.render_ranked_list(&[
            CountryTotals::new("spain", "Spain", 250),
            CountryTotals::new("korea-south", "South Korea", 100),
        ]);
        vm
    }

    #[test]
    fn test_empty_model_renders_placeholders() {
        let text = render_text(&ViewModel::new(), &RenderOptions::default());
        assert!(text.contains("Total confirmed: -"));
        assert!(!text.contains("Rank"));
    }

    #[test]
    fn test_ranking_and_top_limit() {
        let vm = populated();
        let text = render_text(&vm, &RenderOptions::default());
        assert!(text.contains("Total confirmed: 350"));
        let spain = text.find("Spain").unwrap();
        let korea = text.find("South Korea").unwrap();
        assert!(spain < korea);

        let opts = RenderOptions {
            top: Some(1),
            ..Default::default()
        };
        let text = render_text(&vm, &opts);
        assert!(text.contains("Spain"));
        assert!(!text.contains("South Korea"));
        assert!(text.contains("... 1 more"));
    }

    #[test]
    fn test_error_loading_and_chart_sections() {
        let mut vm = populated();
        vm.render_error("Could not load spain");
        vm.show_loading();
        vm.render_series(&[1, 5], &["03/01".into(), "03/02".into()]);

        let text = render_text(&vm, &RenderOptions::default());
        assert!(text.contains("! Could not load spain"));
        assert!(text.contains("Loading..."));
        assert!(text.contains("Confirmed for the last two weeks (#feb72b)"));
        assert!(text.contains("03/02"));
    }

    #[test]
    fn test_detail_panels_only_when_requested() {
        let mut vm = populated();
        let date = Utc.with_ymd_and_hms(2022, 3, 1, 0, 0, 0).unwrap();
        vm.render_detail_list(DetailPanel::Deaths, &[DayCount::new(date, 4)]);

        let hidden = render_text(&vm, &RenderOptions::default());
        assert!(!hidden.contains("2022-03-01"));

        let opts = RenderOptions {
            show_details: true,
            ..Default::default()
        };
        let shown = render_text(&vm, &opts);
        assert!(shown.contains("2022-03-01"));
        assert!(shown.find("Deaths").unwrap() < shown.find("Recovered").unwrap());
    }
}
