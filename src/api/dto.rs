//! Wire shapes of the statistics API
//!
//! Field names follow the upstream PascalCase JSON. Unknown fields are
//! ignored; missing ones fail decoding.

use chrono::{DateTime, Utc};
use serde::Deserialize;

use crate::stats::{CountryTotals, DayCount, GlobalSummary};

/// `GET /api/summary`
#[derive(Debug, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub(crate) struct SummaryResponse {
    pub date: DateTime<Utc>,
    pub countries: Vec<CountryDto>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub(crate) struct CountryDto {
    pub slug: String,
    pub country: String,
    pub total_confirmed: u64,
    pub total_deaths: u64,
    pub total_recovered: u64,
}

/// One element of `GET /api/country/{slug}/status/{status}`
#[derive(Debug, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub(crate) struct CountryStatusDto {
    pub date: DateTime<Utc>,
    pub cases: u64,
}

impl From<SummaryResponse> for GlobalSummary {
    fn from(resp: SummaryResponse) -> Self {
        GlobalSummary {
            date: resp.date,
            countries: resp.countries.into_iter().map(CountryTotals::from).collect(),
        }
    }
}

impl From<CountryDto> for CountryTotals {
    fn from(dto: CountryDto) -> Self {
        CountryTotals {
            country_slug: dto.slug,
            country_name: dto.country,
            total_confirmed: dto.total_confirmed,
            total_deaths: dto.total_deaths,
            total_recovered: dto.total_recovered,
        }
    }
}

impl From<CountryStatusDto> for DayCount {
    fn from(dto: CountryStatusDto) -> Self {
        DayCount::new(dto.date, dto.cases)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_summary_decodes_and_ignores_extra_fields() {
        let body = r#"{
            "ID": "abc",
            "Date": "2022-03-10T04:05:06.123Z",
            "Countries": [{
                "ID": "x1",
                "Country": "South Korea",
                "CountryCode": "KR",
                "Slug": "korea-south",
                "NewConfirmed": 5,
                "TotalConfirmed": 100,
                "NewDeaths": 0,
                "TotalDeaths": 2,
                "NewRecovered": 0,
                "TotalRecovered": 50,
                "Date": "2022-03-10T04:05:06.123Z"
            }]
        }"#;

        let resp: SummaryResponse = serde_json::from_str(body).unwrap();
        let summary = GlobalSummary::from(resp);
        assert_eq!(summary.countries.len(), 1);
        let korea = &summary.countries[0];
        assert_eq!(korea.country_slug, "korea-south");
        assert_eq!(korea.country_name, "South Korea");
        assert_eq!(korea.total_confirmed, 100);
        assert_eq!(korea.total_deaths, 2);
        assert_eq!(korea.total_recovered, 50);
    }

    #[test]
    fn test_summary_missing_field_fails() {
        let body = r#"{ "Date": "2022-03-10T00:00:00Z", "Countries": [{ "Slug": "spain" }] }"#;
        assert!(serde_json::from_str::<SummaryResponse>(body).is_err());
    }

    #[test]
    fn test_status_with_offset_normalized_to_utc() {
        let body = r#"[{ "Country": "Spain", "Cases": 7, "Status": "confirmed", "Date": "2022-03-10T02:00:00+02:00" }]"#;
        let rows: Vec<CountryStatusDto> = serde_json::from_str(body).unwrap();
        let day = DayCount::from(rows.into_iter().next().unwrap());
        assert_eq!(day.cases, 7);
        assert_eq!(day.date.to_rfc3339(), "2022-03-10T00:00:00+00:00");
    }
}
