//! Local heuristic used when the estimation service cannot be reached.
//!
//! ```text
//! deltaV      = 15 km/s × propulsion.delta_v × payload.multiplier
//! transit     = 5 yr    × propulsion.time    × payload.multiplier
//! success     = clamp(propulsion.success_base + payload.success_delta, 0.1, 0.95)
//! propellant  = 0.8 × deltaV
//! status      = success if success > 0.7, warning otherwise
//! ```
use crate::constants::{
    KmPerSecond, Years, BASE_DELTA_V, BASE_TRANSIT_YEARS, PROPELLANT_COST_PER_DELTA_V,
    SUCCESS_PROBABILITY_BOUNDS, SUCCESS_THRESHOLD,
};
use crate::mission::{MissionParameters, PayloadClass, PropulsionVariant};

use super::{MissionOutcome, MissionStatus};

/// Multipliers of one propulsion technology.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PropulsionProfile {
    pub delta_v_multiplier: f64,
    pub time_multiplier: f64,
    pub success_base: f64,
}

/// Correction of one payload class: scales both multipliers and shifts the success base.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PayloadAdjustment {
    pub multiplier: f64,
    pub success_delta: f64,
}

impl PropulsionVariant {
    pub fn profile(&self) -> PropulsionProfile {
        let (delta_v_multiplier, time_multiplier, success_base) = match self {
            PropulsionVariant::Chemical => (1.2, 0.8, 0.6),
            PropulsionVariant::Ion => (0.8, 1.2, 0.8),
            PropulsionVariant::SolarSail => (0.3, 2.0, 0.5),
        };
        PropulsionProfile {
            delta_v_multiplier,
            time_multiplier,
            success_base,
        }
    }
}

impl PayloadClass {
    pub fn adjustment(&self) -> PayloadAdjustment {
        let (multiplier, success_delta) = match self {
            PayloadClass::Small => (0.9, 0.1),
            PayloadClass::Medium => (1.0, 0.0),
            PayloadClass::Large => (1.3, -0.1),
        };
        PayloadAdjustment {
            multiplier,
            success_delta,
        }
    }
}

/// Fallback metrics before they are wrapped into a [`MissionOutcome`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FallbackMetrics {
    pub delta_v: KmPerSecond,
    pub transit_years: Years,
    pub success_probability: f64,
    pub propellant_cost: f64,
}

impl FallbackMetrics {
    pub fn compute(propulsion: PropulsionVariant, payload: PayloadClass) -> Self {
        let profile = propulsion.profile();
        let adjustment = payload.adjustment();

        let delta_v = BASE_DELTA_V * (profile.delta_v_multiplier * adjustment.multiplier);
        let transit_years = BASE_TRANSIT_YEARS * (profile.time_multiplier * adjustment.multiplier);
        let (low, high) = SUCCESS_PROBABILITY_BOUNDS;
        let success_probability = (profile.success_base + adjustment.success_delta).clamp(low, high);

        FallbackMetrics {
            delta_v,
            transit_years,
            success_probability,
            propellant_cost: delta_v * PROPELLANT_COST_PER_DELTA_V,
        }
    }

    pub fn status(&self) -> MissionStatus {
        if self.success_probability > SUCCESS_THRESHOLD {
            MissionStatus::Success
        } else {
            MissionStatus::Warning
        }
    }
}

/// Compute the local outcome of a mission.
///
/// The narrative log lists, in order: the fallback notice, the chosen propulsion and
/// payload, the velocity change, the transit time and the success percentage.
pub fn fallback_outcome(params: &MissionParameters) -> MissionOutcome {
    let metrics = FallbackMetrics::compute(params.propulsion(), params.payload());

    let log = vec![
        "Estimation service unavailable, running local fallback model".to_string(),
        format!(
            "Propulsion: {}, payload: {}",
            params.propulsion(),
            params.payload()
        ),
        format!("Required delta-v: {:.2} km/s", metrics.delta_v),
        format!("Estimated transit time: {:.1} years", metrics.transit_years),
        format!(
            "Success probability: {:.0}%",
            metrics.success_probability * 100.0
        ),
    ];

    MissionOutcome {
        transit_years: metrics.transit_years,
        delta_v: metrics.delta_v,
        success_probability: metrics.success_probability,
        propellant_cost: metrics.propellant_cost,
        log,
        status: metrics.status(),
    }
}
