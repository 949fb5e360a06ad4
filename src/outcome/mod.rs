//! # Mission outcome estimation
//!
//! The [`OutcomeEstimator`] produces the metrics of one simulation run. It first delegates
//! to a [`RemoteEstimator`]; if delegation fails for any reason it computes the local
//! [`fallback`] heuristic instead. The caller always receives a usable [`MissionOutcome`].
//!
//! ## Degraded mode
//!
//! The result is an [`Estimate`], which tells the two paths apart without exposing error
//! objects:
//!
//! - [`Estimate::Remote`]: the service answered, its metrics are adopted verbatim.
//! - [`Estimate::Fallback`]: metrics were computed locally. The variant carries the reason
//!   delegation failed, so the presentation layer can display a "degraded mode" advisory.
//!
//! A remote answer that breaks the outcome invariants (negative metrics, a probability
//! outside [0, 1], non-finite numbers or an unknown status) is rejected and counts as a
//! failed delegation.
//!
//! ## Example
//!
//! ```rust
//! use intercept::mission::MissionParameters;
//! use intercept::outcome::OutcomeEstimator;
//! use intercept::remote::OfflineEstimator;
//!
//! let runtime = tokio::runtime::Runtime::new().unwrap();
//! let estimator = OutcomeEstimator::new(OfflineEstimator);
//! let params = MissionParameters::parse("2025-10-29", "ion", "medium").unwrap();
//!
//! let estimate = runtime.block_on(estimator.estimate(&params));
//! assert!(estimate.is_degraded());
//! assert_eq!(estimate.outcome().delta_v.round(), 12.0);
//! ```
use std::fmt;
use std::str::FromStr;

use crate::constants::{KmPerSecond, Years};
use crate::intercept_errors::InterceptError;
use crate::mission::MissionParameters;
use crate::remote::{EstimateRequest, EstimateResponse, RemoteEstimator};

pub mod fallback;

/// Overall verdict of a run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum MissionStatus {
    #[default]
    Pending,
    Success,
    Warning,
    Failure,
}

impl MissionStatus {
    pub fn label(&self) -> &'static str {
        match self {
            MissionStatus::Pending => "pending",
            MissionStatus::Success => "success",
            MissionStatus::Warning => "warning",
            MissionStatus::Failure => "failure",
        }
    }
}

impl fmt::Display for MissionStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for MissionStatus {
    type Err = InterceptError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "pending" => Ok(MissionStatus::Pending),
            "success" => Ok(MissionStatus::Success),
            "warning" => Ok(MissionStatus::Warning),
            "failure" => Ok(MissionStatus::Failure),
            _ => Err(InterceptError::MalformedRemoteResponse(format!(
                "unknown mission status {s:?}"
            ))),
        }
    }
}

/// Metrics of one simulation run.
///
/// Built in one piece, either from a remote answer or by the fallback heuristic, and replaced
/// wholesale by the next run. The [`Default`] value is the empty pending outcome shown while
/// no run has settled.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct MissionOutcome {
    pub transit_years: Years,
    pub delta_v: KmPerSecond,
    pub success_probability: f64,
    pub propellant_cost: f64,
    pub log: Vec<String>,
    pub status: MissionStatus,
}

fn non_negative(name: &str, value: f64) -> Result<f64, InterceptError> {
    if value.is_finite() && value >= 0.0 {
        Ok(value)
    } else {
        Err(InterceptError::MalformedRemoteResponse(format!(
            "{name} must be a finite non-negative number, got {value}"
        )))
    }
}

impl TryFrom<EstimateResponse> for MissionOutcome {
    type Error = InterceptError;

    /// Field-for-field translation; values are checked, never rescaled.
    fn try_from(response: EstimateResponse) -> Result<Self, Self::Error> {
        let success_probability = non_negative("success_probability", response.success_probability)?;
        if success_probability > 1.0 {
            return Err(InterceptError::MalformedRemoteResponse(format!(
                "success_probability must lie in [0, 1], got {success_probability}"
            )));
        }

        Ok(MissionOutcome {
            transit_years: non_negative("travel_time", response.travel_time)?,
            delta_v: non_negative("delta_v", response.delta_v)?,
            success_probability,
            propellant_cost: non_negative("fuel_cost", response.fuel_cost)?,
            log: response.mission_log,
            status: response.mission_status.parse()?,
        })
    }
}

/// Result of one estimation, tagged with the path that produced it.
#[derive(Debug, Clone, PartialEq)]
pub enum Estimate {
    Remote(MissionOutcome),
    Fallback {
        outcome: MissionOutcome,
        reason: String,
    },
}

impl Estimate {
    pub fn outcome(&self) -> &MissionOutcome {
        match self {
            Estimate::Remote(outcome) => outcome,
            Estimate::Fallback { outcome, .. } => outcome,
        }
    }

    pub fn into_outcome(self) -> MissionOutcome {
        match self {
            Estimate::Remote(outcome) => outcome,
            Estimate::Fallback { outcome, .. } => outcome,
        }
    }

    /// True when the metrics were computed locally.
    pub fn is_degraded(&self) -> bool {
        matches!(self, Estimate::Fallback { .. })
    }

    /// Why delegation failed, if it did.
    pub fn degraded_reason(&self) -> Option<&str> {
        match self {
            Estimate::Remote(_) => None,
            Estimate::Fallback { reason, .. } => Some(reason),
        }
    }
}

/// Delegates mission estimation to a remote collaborator and falls back locally on failure.
#[derive(Debug, Clone)]
pub struct OutcomeEstimator<R> {
    remote: R,
}

impl<R: RemoteEstimator> OutcomeEstimator<R> {
    pub fn new(remote: R) -> Self {
        OutcomeEstimator { remote }
    }

    pub fn remote(&self) -> &R {
        &self.remote
    }

    /// Estimate the outcome of a mission.
    ///
    /// Argument
    /// --------
    /// * `params`: the mission parameters of the run
    ///
    /// Return
    /// ------
    /// * [`Estimate::Remote`] with the service metrics, or [`Estimate::Fallback`] with the
    ///   local heuristic and the failure reason. This function never fails.
    pub async fn estimate(&self, params: &MissionParameters) -> Estimate {
        let request = EstimateRequest::from(params);

        let delegated = self
            .remote
            .request_estimate(&request)
            .await
            .and_then(MissionOutcome::try_from);

        match delegated {
            Ok(outcome) => {
                log::debug!(
                    "remote estimate: status {}, delta-v {} km/s",
                    outcome.status,
                    outcome.delta_v
                );
                Estimate::Remote(outcome)
            }
            Err(err) => {
                log::warn!("delegation failed, using local fallback: {err}");
                Estimate::Fallback {
                    outcome: fallback::fallback_outcome(params),
                    reason: err.to_string(),
                }
            }
        }
    }
}

#[cfg(test)]
mod outcome_test {
    use super::*;
    use crate::remote::OfflineEstimator;
    use approx::assert_relative_eq;

    struct FixedEstimator(Result<EstimateResponse, u16>);

    impl RemoteEstimator for FixedEstimator {
        async fn request_estimate(
            &self,
            _request: &EstimateRequest,
        ) -> Result<EstimateResponse, InterceptError> {
            self.0.clone().map_err(InterceptError::RemoteStatus)
        }
    }

    fn response() -> EstimateResponse {
        EstimateResponse {
            travel_time: 3.75,
            delta_v: 21.4,
            success_probability: 0.42,
            mission_log: vec!["Trajectory solved".into(), "Margins thin".into()],
            fuel_cost: 17.12,
            mission_status: "warning".into(),
        }
    }

    fn params() -> MissionParameters {
        MissionParameters::parse("2025-10-29", "ion", "medium").unwrap()
    }

    #[test]
    fn test_response_maps_field_for_field() {
        let outcome = MissionOutcome::try_from(response()).unwrap();
        assert_eq!(
            outcome,
            MissionOutcome {
                transit_years: 3.75,
                delta_v: 21.4,
                success_probability: 0.42,
                propellant_cost: 17.12,
                log: vec!["Trajectory solved".into(), "Margins thin".into()],
                status: MissionStatus::Warning,
            }
        );
    }

    #[test]
    fn test_response_violating_invariants_is_rejected() {
        let mut bad = response();
        bad.success_probability = 1.2;
        assert!(MissionOutcome::try_from(bad).is_err());

        let mut bad = response();
        bad.delta_v = -1.0;
        assert!(MissionOutcome::try_from(bad).is_err());

        let mut bad = response();
        bad.travel_time = f64::NAN;
        assert!(MissionOutcome::try_from(bad).is_err());

        let mut bad = response();
        bad.mission_status = "exploded".into();
        assert_eq!(
            MissionOutcome::try_from(bad),
            Err(InterceptError::MalformedRemoteResponse(
                "unknown mission status \"exploded\"".into()
            ))
        );
    }

    #[tokio::test]
    async fn test_remote_success_is_adopted() {
        let estimator = OutcomeEstimator::new(FixedEstimator(Ok(response())));
        let estimate = estimator.estimate(&params()).await;

        assert!(!estimate.is_degraded());
        assert_eq!(estimate.degraded_reason(), None);
        assert_eq!(estimate.outcome().delta_v, 21.4);
        assert_eq!(estimate.outcome().status, MissionStatus::Warning);
    }

    #[tokio::test]
    async fn test_http_error_falls_back() {
        let estimator = OutcomeEstimator::new(FixedEstimator(Err(503)));
        let estimate = estimator.estimate(&params()).await;

        assert!(estimate.is_degraded());
        assert_eq!(
            estimate.degraded_reason(),
            Some("Remote estimation service answered with HTTP status 503")
        );
        assert_relative_eq!(estimate.outcome().delta_v, 12.0, epsilon = 1e-12);
    }

    #[tokio::test]
    async fn test_malformed_response_falls_back() {
        let mut bad = response();
        bad.success_probability = -0.5;
        let estimator = OutcomeEstimator::new(FixedEstimator(Ok(bad)));
        let estimate = estimator.estimate(&params()).await;

        assert!(estimate.is_degraded());
        assert_eq!(estimate.into_outcome(), fallback::fallback_outcome(&params()));
    }

    #[tokio::test]
    async fn test_offline_always_degraded() {
        let estimator = OutcomeEstimator::new(OfflineEstimator);
        let estimate = estimator.estimate(&params()).await;
        assert!(estimate.is_degraded());
        assert_eq!(estimate.outcome().status, MissionStatus::Success);
    }

    #[test]
    fn test_default_outcome_is_pending() {
        let outcome = MissionOutcome::default();
        assert_eq!(outcome.status, MissionStatus::Pending);
        assert!(outcome.log.is_empty());
        assert_eq!(outcome.delta_v, 0.0);
    }
}
