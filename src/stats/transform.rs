//! Pure transformations from API payloads to display-ready values
//!
//! Nothing in here touches the network or the view.

use chrono::{DateTime, Utc};
use serde::Serialize;

use super::types::{CountryTotals, DayCount, Metric};

/// Number of trailing days plotted on the trend chart
pub const DEFAULT_CHART_DAYS: usize = 14;

/// Sum a metric across all countries
///
/// Saturates instead of overflowing; order of `countries` does not matter.
pub fn totals_by_metric(countries: &[CountryTotals], metric: Metric) -> u64 {
    countries
        .iter()
        .fold(0u64, |total, c| total.saturating_add(c.total(metric)))
}

/// Worldwide totals for the three headline metrics
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct WorldTotals {
    pub confirmed: u64,
    pub deaths: u64,
    pub recovered: u64,
}

/// Headline totals summed over every country
pub fn world_totals(countries: &[CountryTotals]) -> WorldTotals {
    WorldTotals {
        confirmed: totals_by_metric(countries, Metric::Confirmed),
        deaths: totals_by_metric(countries, Metric::Deaths),
        recovered: totals_by_metric(countries, Metric::Recovered),
    }
}

/// Rank countries by confirmed cases, highest first
///
/// Equal counts are ordered by ascending slug so the output does not depend
/// on the input order.
pub fn rank_by_confirmed(countries: &[CountryTotals]) -> Vec<CountryTotals> {
    let mut ranked = countries.to_vec();
    ranked.sort_by(|a, b| {
        b.total_confirmed
            .cmp(&a.total_confirmed)
            .then_with(|| a.country_slug.cmp(&b.country_slug))
    });
    ranked
}

/// The final `n` entries of a chronological series
///
/// Shorter series are returned whole.
pub fn last_n_days(series: &[DayCount], n: usize) -> &[DayCount] {
    let start = series.len().saturating_sub(n);
    &series[start..]
}

/// Chart axis label: `MM/DD`
pub fn format_chart_label(date: &DateTime<Utc>) -> String {
    date.format("%m/%d").to_string()
}

/// Values and labels for the trend chart, oldest to newest
pub fn chart_points(series: &[DayCount], days: usize) -> (Vec<u64>, Vec<String>) {
    let window = last_n_days(series, days);
    let values = window.iter().map(|d| d.cases).collect();
    let labels = window.iter().map(|d| format_chart_label(&d.date)).collect();
    (values, labels)
}

/// Series ordered newest day first; equal dates keep their input order
pub fn newest_first(series: &[DayCount]) -> Vec<DayCount> {
    let mut sorted = series.to_vec();
    sorted.sort_by(|a, b| b.date.cmp(&a.date));
    sorted
}

/// Case count of the most recent day in the series
pub fn latest_cases(series: &[DayCount]) -> Option<u64> {
    series.iter().max_by_key(|d| d.date).map(|d| d.cases)
}

/// Timestamp shown next to "last updated"
pub fn format_last_updated(date: &DateTime<Utc>) -> String {
    date.format("%Y-%m-%d %H:%M:%S UTC").to_string()
}

/// Date shown on a detail-list row
pub fn format_detail_date(date: &DateTime<Utc>) -> String {
    date.format("%Y-%m-%d").to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn day(d: u32, cases: u64) -> DayCount {
        DayCount::new(Utc.with_ymd_and_hms(2022, 3, d, 0, 0, 0).unwrap(), cases)
    }

    fn sample_countries() -> Vec<CountryTotals> {
        vec![
            CountryTotals::new("korea-south", "South Korea", 100).deaths(3).recovered(40),
            CountryTotals::new("spain", "Spain", 250).deaths(12).recovered(90),
        ]
    }

    #[test]
    fn test_totals_example() {
        let countries = sample_countries();
        assert_eq!(totals_by_metric(&countries, Metric::Confirmed), 350);
        assert_eq!(totals_by_metric(&countries, Metric::Deaths), 15);
        assert_eq!(totals_by_metric(&countries, Metric::Recovered), 130);
        assert_eq!(totals_by_metric(&[], Metric::Confirmed), 0);
    }

    #[test]
    fn test_world_totals() {
        let totals = world_totals(&sample_countries());
        assert_eq!(
            totals,
            WorldTotals {
                confirmed: 350,
                deaths: 15,
                recovered: 130
            }
        );
    }

    #[test]
    fn test_totals_order_independent() {
        let mut countries = sample_countries();
        countries.push(CountryTotals::new("italy", "Italy", 175));
        let forward = totals_by_metric(&countries, Metric::Confirmed);
        countries.reverse();
        assert_eq!(totals_by_metric(&countries, Metric::Confirmed), forward);
        countries.swap(0, 1);
        assert_eq!(totals_by_metric(&countries, Metric::Confirmed), forward);
    }

    #[test]
    fn test_totals_saturate() {
        let countries = vec![
            CountryTotals::new("a", "A", u64::MAX),
            CountryTotals::new("b", "B", 10),
        ];
        assert_eq!(totals_by_metric(&countries, Metric::Confirmed), u64::MAX);
    }

    #[test]
    fn test_rank_example() {
        let ranked = rank_by_confirmed(&sample_countries());
        let names: Vec<_> = ranked.iter().map(|c| c.country_name.as_str()).collect();
        assert_eq!(names, vec!["Spain", "South Korea"]);
        assert_eq!(ranked[0].total_confirmed, 250);
    }

    #[test]
    fn test_rank_idempotent() {
        let mut countries = sample_countries();
        countries.push(CountryTotals::new("italy", "Italy", 175));
        let once = rank_by_confirmed(&countries);
        let twice = rank_by_confirmed(&once);
        assert_eq!(once, twice);
    }

    #[test]
    fn test_rank_ties_broken_by_slug() {
        let a = vec![
            CountryTotals::new("switzerland", "Switzerland", 50),
            CountryTotals::new("austria", "Austria", 50),
            CountryTotals::new("peru", "Peru", 80),
        ];
        let mut b = a.clone();
        b.reverse();

        let slugs = |v: Vec<CountryTotals>| -> Vec<String> {
            v.into_iter().map(|c| c.country_slug).collect()
        };
        assert_eq!(slugs(rank_by_confirmed(&a)), vec!["peru", "austria", "switzerland"]);
        assert_eq!(rank_by_confirmed(&a), rank_by_confirmed(&b));
    }

    #[test]
    fn test_last_n_days_short_series() {
        let series = vec![day(1, 1), day(2, 2), day(3, 3)];
        assert_eq!(last_n_days(&series, DEFAULT_CHART_DAYS), series.as_slice());
        assert!(last_n_days(&[], DEFAULT_CHART_DAYS).is_empty());
    }

    #[test]
    fn test_last_n_days_suffix() {
        let series: Vec<DayCount> = (1..=20).map(|d| day(d, d as u64 * 10)).collect();
        let window = last_n_days(&series, 14);
        assert_eq!(window.len(), 14);
        assert_eq!(window, &series[6..]);
        assert_eq!(window.first().unwrap().cases, 70);
        assert_eq!(window.last().unwrap().cases, 200);

        for n in [0, 1, 13, 20, 25] {
            assert_eq!(last_n_days(&series, n).len(), n.min(series.len()));
        }
    }

    #[test]
    fn test_chart_label_format() {
        let date = Utc.with_ymd_and_hms(2022, 1, 5, 23, 59, 0).unwrap();
        assert_eq!(format_chart_label(&date), "01/05");
    }

    #[test]
    fn test_chart_points() {
        let series: Vec<DayCount> = (1..=16).map(|d| day(d, d as u64)).collect();
        let (values, labels) = chart_points(&series, 14);
        assert_eq!(values, (3..=16).collect::<Vec<u64>>());
        assert_eq!(labels.first().unwrap(), "03/03");
        assert_eq!(labels.last().unwrap(), "03/16");
    }

    #[test]
    fn test_newest_first_and_latest() {
        let series = vec![day(1, 5), day(3, 9), day(2, 7)];
        let sorted = newest_first(&series);
        let cases: Vec<u64> = sorted.iter().map(|d| d.cases).collect();
        assert_eq!(cases, vec![9, 7, 5]);
        assert_eq!(latest_cases(&series), Some(9));
        assert_eq!(latest_cases(&[]), None);
    }

    #[test]
    fn test_timestamp_formats() {
        let date = Utc.with_ymd_and_hms(2023, 3, 10, 4, 5, 6).unwrap();
        assert_eq!(format_last_updated(&date), "2023-03-10 04:05:06 UTC");
        assert_eq!(format_detail_date(&date), "2023-03-10");
    }
}
