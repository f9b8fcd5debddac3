//! COVID statistics domain
//!
//! - **types**: Summary, per-country totals, day series, metric selector
//! - **transform**: Pure reduce/sort/slice helpers feeding the view

mod transform;
mod types;

pub use transform::{
    chart_points, format_chart_label, format_detail_date, format_last_updated, last_n_days,
    latest_cases, newest_first, rank_by_confirmed, totals_by_metric, world_totals, WorldTotals,
    DEFAULT_CHART_DAYS,
};
pub use types::{CountryDaySeries, CountryTotals, DayCount, GlobalSummary, Metric};
