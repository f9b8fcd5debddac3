//! Controller state machine

use serde::Serialize;
use std::collections::HashSet;

/// Phase of the dashboard controller
///
/// ```text
/// Uninitialized --(summary loaded)--> Idle
/// Idle --(country selected)--> Loading
/// Loading --(fetch settled, ok or err)--> Idle
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Phase {
    /// No summary rendered yet; selections are rejected
    Uninitialized,
    /// Ready for a selection
    Idle,
    /// A country request is in flight; further selections are ignored
    Loading,
}

impl std::fmt::Display for Phase {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Phase::Uninitialized => write!(f, "uninitialized"),
            Phase::Idle => write!(f, "idle"),
            Phase::Loading => write!(f, "loading"),
        }
    }
}

/// What happened to a country selection
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SelectOutcome {
    /// Data fetched and the chart repainted with `points` points
    Rendered { points: usize },
    /// Another request was in flight; nothing was fetched
    Ignored,
}

/// Mutable controller state, guarded as one unit
#[derive(Debug)]
pub(crate) struct SessionState {
    pub phase: Phase,
    /// Slugs of the countries currently in the ranked list
    pub countries: HashSet<String>,
}

impl SessionState {
    pub fn new() -> Self {
        Self {
            phase: Phase::Uninitialized,
            countries: HashSet::new(),
        }
    }
}
