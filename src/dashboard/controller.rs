//! Dashboard controller
//!
//! Owns the data source, the view and the state machine. The summary load
//! populates totals and the ranking; each country selection fetches that
//! country's series and repaints the chart.

use std::sync::{PoisonError, RwLock, RwLockWriteGuard};
use tokio::sync::Mutex;

use super::error::DashboardError;
use super::state::{Phase, SelectOutcome, SessionState};
use crate::api::{ApiError, StatsSource};
use crate::stats::{
    chart_points, latest_cases, rank_by_confirmed, world_totals, CountryDaySeries, Metric,
    DEFAULT_CHART_DAYS,
};
use crate::view::{DetailPanel, View};

/// Controller settings
#[derive(Debug, Clone)]
pub struct DashboardOptions {
    /// Trailing days plotted on the chart
    pub chart_days: usize,
    /// Also fetch deaths/recovered series and fill the detail panels
    pub detail_panels: bool,
}

impl Default for DashboardOptions {
    fn default() -> Self {
        Self {
            chart_days: DEFAULT_CHART_DAYS,
            detail_panels: false,
        }
    }
}

/// Series fetched for one selection
struct CountryDetail {
    confirmed: CountryDaySeries,
    panels: Vec<(DetailPanel, CountryDaySeries)>,
}

/// The dashboard application controller
///
/// The session state sits behind a std lock: it is never held across an
/// await, and the loading guard has to reach it from `Drop`.
pub struct Dashboard<S, V> {
    source: S,
    view: Mutex<V>,
    state: RwLock<SessionState>,
    options: DashboardOptions,
}

impl<S: StatsSource, V: View> Dashboard<S, V> {
    /// Create a controller; nothing is fetched until [`load_summary`](Self::load_summary)
    pub fn new(source: S, view: V, options: DashboardOptions) -> Self {
        Self {
            source,
            view: Mutex::new(view),
            state: RwLock::new(SessionState::new()),
            options,
        }
    }

    pub fn source(&self) -> &S {
        &self.source
    }

    pub fn options(&self) -> &DashboardOptions {
        &self.options
    }

    /// Current phase of the state machine
    pub fn phase(&self) -> Phase {
        self.state
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .phase
    }

    /// Run a closure against the view
    pub async fn with_view<R>(&self, f: impl FnOnce(&V) -> R) -> R {
        let view = self.view.lock().await;
        f(&*view)
    }

    /// Consume the controller and hand back the view
    pub fn into_view(self) -> V {
        self.view.into_inner()
    }

    fn state_mut(&self) -> RwLockWriteGuard<'_, SessionState> {
        write_state(&self.state)
    }

    /// Fetch the worldwide summary and paint totals, ranking and timestamp
    ///
    /// Returns the number of countries rendered. The first successful load
    /// moves the controller from `Uninitialized` to `Idle`.
    pub async fn load_summary(&self) -> Result<usize, DashboardError> {
        tracing::debug!("loading summary");

        let summary = match self.source.fetch_global_summary().await {
            Ok(summary) => summary,
            Err(e) => {
                let err = DashboardError::from(e);
                tracing::error!("Failed to load summary: {}", err);
                self.view
                    .lock()
                    .await
                    .render_error(&format!("Could not load summary: {}", err));
                return Err(err);
            }
        };

        let ranked = rank_by_confirmed(&summary.countries);
        let totals = world_totals(&summary.countries);

        {
            let mut view = self.view.lock().await;
            view.clear_error();
            view.render_totals(&totals);
            view.render_ranked_list(&ranked);
            view.render_last_updated(&summary.date);
        }

        {
            let mut state = self.state_mut();
            state.countries = ranked.iter().map(|c| c.country_slug.clone()).collect();
            if state.phase == Phase::Uninitialized {
                state.phase = Phase::Idle;
                tracing::debug!("phase: uninitialized -> idle");
            }
        }

        tracing::info!(
            "Summary loaded: {} countries, {} confirmed",
            ranked.len(),
            totals.confirmed
        );
        Ok(ranked.len())
    }

    /// Handle a country selection
    ///
    /// While another selection is loading this is a no-op and returns
    /// [`SelectOutcome::Ignored`] without touching the network. Slugs that
    /// are not in the rendered ranking are rejected before any request.
    /// Spinners are removed and the controller returns to `Idle` whether
    /// the fetch succeeds, fails, or the returned future is dropped
    /// mid-flight; failures are also shown on the view.
    pub async fn select_country(&self, slug: &str) -> Result<SelectOutcome, DashboardError> {
        let rejection = {
            let mut state = self.state_mut();
            match state.phase {
                Phase::Uninitialized => Some(DashboardError::NotReady),
                Phase::Loading => {
                    tracing::warn!(country = slug, "request in flight, selection ignored");
                    return Ok(SelectOutcome::Ignored);
                }
                Phase::Idle if !state.countries.contains(slug) => {
                    tracing::warn!(country = slug, "selection is not in the ranking");
                    Some(DashboardError::UnknownCountry(slug.to_string()))
                }
                Phase::Idle => {
                    state.phase = Phase::Loading;
                    tracing::debug!(country = slug, "phase: idle -> loading");
                    None
                }
            }
        };
        if let Some(err) = rejection {
            self.view.lock().await.render_error(&err.to_string());
            return Err(err);
        }

        let guard = LoadingGuard {
            view: &self.view,
            state: &self.state,
            country: slug,
            settled: false,
        };

        {
            let mut view = self.view.lock().await;
            view.clear_details();
            view.clear_error();
            view.show_loading();
        }

        let result = self.fetch_country(slug).await;

        let outcome = {
            let mut view = self.view.lock().await;
            view.hide_loading();
            match result {
                Ok(detail) => Ok(self.paint_country(&mut *view, &detail)),
                Err(e) => {
                    let err = DashboardError::from(e);
                    view.render_error(&format!("Could not load {}: {}", slug, err));
                    Err(err)
                }
            }
        };

        guard.settle();

        match &outcome {
            Ok(SelectOutcome::Rendered { points }) => {
                tracing::info!(country = slug, points, "country rendered")
            }
            Ok(SelectOutcome::Ignored) => {}
            Err(e) => tracing::error!(country = slug, "Failed to load country: {}", e),
        }
        outcome
    }

    async fn fetch_country(&self, slug: &str) -> Result<CountryDetail, ApiError> {
        if !self.options.detail_panels {
            let confirmed = self
                .source
                .fetch_country_series(slug, Metric::Confirmed)
                .await?;
            return Ok(CountryDetail {
                confirmed,
                panels: Vec::new(),
            });
        }

        let (deaths, recovered, confirmed) = tokio::try_join!(
            self.source
                .fetch_country_series(slug, DetailPanel::Deaths.metric()),
            self.source
                .fetch_country_series(slug, DetailPanel::Recovered.metric()),
            self.source.fetch_country_series(slug, Metric::Confirmed),
        )?;
        Ok(CountryDetail {
            confirmed,
            panels: vec![
                (DetailPanel::Deaths, deaths),
                (DetailPanel::Recovered, recovered),
            ],
        })
    }

    fn paint_country(&self, view: &mut V, detail: &CountryDetail) -> SelectOutcome {
        for (panel, series) in &detail.panels {
            view.render_detail_list(*panel, series);
            if let Some(cases) = latest_cases(series) {
                view.render_detail_total(*panel, cases);
            }
        }

        let (values, labels) = chart_points(&detail.confirmed, self.options.chart_days);
        view.render_series(&values, &labels);
        SelectOutcome::Rendered {
            points: values.len(),
        }
    }
}

fn write_state(state: &RwLock<SessionState>) -> RwLockWriteGuard<'_, SessionState> {
    state.write().unwrap_or_else(PoisonError::into_inner)
}

/// Holds a selection in `Loading`
///
/// Settling or dropping it returns the controller to `Idle`. A drop before
/// the fetch resolves also takes the spinners down, so a cancelled
/// selection cannot leave the dashboard ignoring every later one.
struct LoadingGuard<'a, V: View> {
    view: &'a Mutex<V>,
    state: &'a RwLock<SessionState>,
    country: &'a str,
    settled: bool,
}

impl<V: View> LoadingGuard<'_, V> {
    /// The fetch settled and the view is painted
    fn settle(mut self) {
        write_state(self.state).phase = Phase::Idle;
        tracing::debug!(country = self.country, "phase: loading -> idle");
        self.settled = true;
    }
}

impl<V: View> Drop for LoadingGuard<'_, V> {
    fn drop(&mut self) {
        if self.settled {
            return;
        }
        match self.view.try_lock() {
            Ok(mut view) => view.hide_loading(),
            Err(_) => tracing::warn!(country = self.country, "view busy, spinners left up"),
        }
        write_state(self.state).phase = Phase::Idle;
        tracing::debug!(country = self.country, "selection dropped, phase: loading -> idle");
    }
}
