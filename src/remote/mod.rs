//! # Remote estimation collaborator
//!
//! The authoritative mission metrics come from an external estimation service. This module
//! holds the seam to that service:
//!
//! - [`EstimateRequest`] / [`EstimateResponse`]: the JSON wire contract.
//! - [`RemoteEstimator`]: the trait the outcome estimator delegates to.
//! - [`http::HttpEstimator`]: the `reqwest` implementation used in production.
//! - [`OfflineEstimator`]: an estimator that never answers, which forces the local fallback.
//!
//! Any error returned by a [`RemoteEstimator`] is treated the same way by the caller:
//! delegation failed, compute locally.
use std::future::Future;

use serde::{Deserialize, Serialize};

use crate::intercept_errors::InterceptError;
use crate::mission::{MissionParameters, PayloadClass, PropulsionVariant};
use crate::time::to_local_datetime;

pub mod http;

/// Body of the request sent to the estimation service.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EstimateRequest {
    pub launch_date: String,
    pub propulsion_type: PropulsionVariant,
    pub payload_size: PayloadClass,
}

impl From<&MissionParameters> for EstimateRequest {
    fn from(params: &MissionParameters) -> Self {
        EstimateRequest {
            launch_date: to_local_datetime(&params.launch_epoch()),
            propulsion_type: params.propulsion(),
            payload_size: params.payload(),
        }
    }
}

/// Body of the estimation service answer.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EstimateResponse {
    pub travel_time: f64,
    pub delta_v: f64,
    pub success_probability: f64,
    pub mission_log: Vec<String>,
    pub fuel_cost: f64,
    pub mission_status: String,
}

/// Anything able to produce mission metrics for a request, usually over the network.
pub trait RemoteEstimator {
    fn request_estimate(
        &self,
        request: &EstimateRequest,
    ) -> impl Future<Output = Result<EstimateResponse, InterceptError>> + Send;
}

/// Estimator used when no service is reachable by design (offline builds, demos).
/// Every call fails with [`InterceptError::RemoteUnavailable`].
#[derive(Debug, Clone, Copy, Default)]
pub struct OfflineEstimator;

impl RemoteEstimator for OfflineEstimator {
    async fn request_estimate(
        &self,
        _request: &EstimateRequest,
    ) -> Result<EstimateResponse, InterceptError> {
        Err(InterceptError::RemoteUnavailable)
    }
}
