//! Dashboard application controller
//!
//! ## Data Flow
//!
//! ```text
//! load_summary:   StatsSource → rank/sum → View (totals, ranking, timestamp)
//! select_country: guard → spinners on → StatsSource → spinners off → View (chart)
//! ```
//!
//! At most one country request is in flight; selections made meanwhile are
//! ignored.

mod controller;
mod error;
mod state;

pub use controller::{Dashboard, DashboardOptions};
pub use error::DashboardError;
pub use state::{Phase, SelectOutcome};
