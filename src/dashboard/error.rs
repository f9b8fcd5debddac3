//! Dashboard controller errors

use thiserror::Error;

use crate::api::ApiError;

/// Errors surfaced by the dashboard controller
#[derive(Error, Debug)]
pub enum DashboardError {
    /// Request rejected, timed out, or answered with a non-2xx status
    #[error("Network failure: {0}")]
    NetworkFailure(#[source] ApiError),

    /// Server answered but the payload lacked expected fields
    #[error("Malformed response: {0}")]
    MalformedResponse(#[source] ApiError),

    /// Selected slug is not in the rendered ranking
    #[error("Unknown country: {0}")]
    UnknownCountry(String),

    /// A country was selected before the summary loaded
    #[error("Summary not loaded yet")]
    NotReady,
}

impl From<ApiError> for DashboardError {
    fn from(err: ApiError) -> Self {
        if err.is_malformed() {
            DashboardError::MalformedResponse(err)
        } else {
            DashboardError::NetworkFailure(err)
        }
    }
}
