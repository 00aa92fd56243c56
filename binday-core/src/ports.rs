//! Traits describing schedule sources and their error type.

use async_trait::async_trait;
use reqwest::Error as ReqwestError;

use crate::model::{CouncilMeta, Location, RawSchedule, ResolutionFailure};

#[derive(thiserror::Error, Debug)]
/// Errors that can occur while talking to schedule backends.
pub enum PortError {
    /// Network layer failed or the backend answered with an error status.
    #[error("Network error: {0}")]
    Network(#[from] ReqwestError),
    /// The council has no registered plugin.
    #[error("Unsupported council: {0}")]
    UnsupportedCouncil(String),
    /// The location cannot be expressed in the backend's terms.
    #[error("Invalid location: {0}")]
    InvalidLocation(String),
    /// Internal provider error.
    #[error("Internal error: {0}")]
    Internal(String),
}

impl From<PortError> for ResolutionFailure {
    fn from(err: PortError) -> Self {
        ResolutionFailure::upstream_unavailable(err.to_string())
    }
}

#[async_trait]
/// Trait for council-specific schedule backends.
pub trait SchedulePort: Send + Sync {
    /// Metadata describing the council handled by this port.
    fn council(&self) -> &CouncilMeta;

    /// Fetch the raw collection schedule for a location.
    ///
    /// # Errors
    ///
    /// Returns a [`PortError`] when the backend request fails.
    async fn fetch(&self, location: &Location) -> Result<RawSchedule, PortError>;
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::FailureKind;

    #[test]
    fn port_errors_are_upstream_unavailable() {
        let failure = ResolutionFailure::from(PortError::Internal("boom".to_owned()));
        assert_eq!(failure.kind(), FailureKind::UpstreamUnavailable);
        assert_eq!(failure.detail(), Some("Internal error: boom"));
    }
}
