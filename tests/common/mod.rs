use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use intercept::intercept_errors::InterceptError;
use intercept::remote::{EstimateRequest, EstimateResponse, RemoteEstimator};
use tokio::sync::Notify;

/// Remote estimator answering a fixed result and counting the calls it receives.
pub struct ScriptedEstimator {
    answer: Result<EstimateResponse, u16>,
    pub calls: AtomicUsize,
}

impl ScriptedEstimator {
    pub fn answering(response: EstimateResponse) -> Self {
        ScriptedEstimator {
            answer: Ok(response),
            calls: AtomicUsize::new(0),
        }
    }

    pub fn failing_with(status: u16) -> Self {
        ScriptedEstimator {
            answer: Err(status),
            calls: AtomicUsize::new(0),
        }
    }
}

impl RemoteEstimator for ScriptedEstimator {
    async fn request_estimate(
        &self,
        _request: &EstimateRequest,
    ) -> Result<EstimateResponse, InterceptError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.answer.clone().map_err(InterceptError::RemoteStatus)
    }
}

/// Remote estimator that blocks until its gate is opened, then fails.
pub struct GatedEstimator {
    pub gate: Arc<Notify>,
    pub calls: AtomicUsize,
}

impl GatedEstimator {
    pub fn new(gate: Arc<Notify>) -> Self {
        GatedEstimator {
            gate,
            calls: AtomicUsize::new(0),
        }
    }
}

impl RemoteEstimator for GatedEstimator {
    async fn request_estimate(
        &self,
        _request: &EstimateRequest,
    ) -> Result<EstimateResponse, InterceptError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.gate.notified().await;
        Err(InterceptError::RemoteStatus(504))
    }
}

pub fn remote_response() -> EstimateResponse {
    EstimateResponse {
        travel_time: 7.25,
        delta_v: 9.8,
        success_probability: 0.73,
        mission_log: vec![
            "Launch window confirmed".into(),
            "Gravity assist at Jupiter".into(),
            "Intercept achieved".into(),
        ],
        fuel_cost: 6.5,
        mission_status: "success".into(),
    }
}
