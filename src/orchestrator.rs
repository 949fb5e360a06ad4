//! # Simulation orchestrator
//!
//! [`SimulationOrchestrator`] owns the lifecycle of simulation runs and is the entry point
//! used by the presentation layer.
//!
//! ## Lifecycle
//!
//! ```text
//!            simulate()                estimate settles
//!   Idle ───────────────▶ Running ─────────────────────▶ Settled
//!    ▲                      │                               │
//!    │        reset()       │            reset()            │
//!    └──────────────────────┴───────────────────────────────┘
//!                           ▲                               │
//!                           └────────── simulate() ─────────┘
//! ```
//!
//! - At most one run is in flight: `simulate` while `Running` fails with
//!   [`InterceptError::RunInFlight`] and produces no outcome.
//! - There is no failed state. A failed delegation settles through the local fallback and
//!   is flagged as degraded.
//! - `reset` is accepted in any state. A run reset while in flight is discarded when its
//!   estimate arrives, and its `simulate` call resolves to [`InterceptError::RunSuperseded`].
//!   The remote call still counts as in flight until then: `simulate` keeps failing with
//!   [`InterceptError::RunInFlight`] even though the phase already reads `Idle`.
//! - Dropping a pending `simulate` future returns the orchestrator to `Idle`.
//!
//! Readers (`phase`, `outcome`, `is_degraded`, ...) never suspend; they take a short lock
//! that is never held across an `.await`.
use std::num::NonZeroUsize;
use std::sync::{Mutex, MutexGuard, PoisonError};

use crate::config::EngineConfig;
use crate::intercept_errors::InterceptError;
use crate::mission::MissionParameters;
use crate::outcome::{Estimate, MissionOutcome, OutcomeEstimator};
use crate::position_model::{positions, BodyPositions};
use crate::remote::http::HttpEstimator;
use crate::remote::{OfflineEstimator, RemoteEstimator};
use crate::trajectory::{curve, Trajectory};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RunPhase {
    Idle,
    Running,
    Settled,
}

/// A settled simulation run: its inputs, its estimate and the flight path to draw.
#[derive(Debug, Clone, PartialEq)]
pub struct SimulationRun {
    parameters: MissionParameters,
    estimate: Estimate,
    trajectory: Trajectory,
}

impl SimulationRun {
    pub fn parameters(&self) -> &MissionParameters {
        &self.parameters
    }

    pub fn estimate(&self) -> &Estimate {
        &self.estimate
    }

    pub fn outcome(&self) -> &MissionOutcome {
        self.estimate.outcome()
    }

    pub fn trajectory(&self) -> &Trajectory {
        &self.trajectory
    }

    pub fn is_degraded(&self) -> bool {
        self.estimate.is_degraded()
    }
}

#[derive(Debug)]
enum RunState {
    Idle,
    Running,
    Settled(SimulationRun),
}

#[derive(Debug)]
struct Lifecycle {
    state: RunState,
    // bumped on every simulate and reset, a run may only settle under its own generation
    generation: u64,
    // generation of the delegation still pending, survives a reset
    in_flight: Option<u64>,
}

fn lock(lifecycle: &Mutex<Lifecycle>) -> MutexGuard<'_, Lifecycle> {
    lifecycle.lock().unwrap_or_else(PoisonError::into_inner)
}

/// Returns the orchestrator to `Idle` if the run it tracks is dropped before settling.
struct InFlightRun<'a> {
    lifecycle: &'a Mutex<Lifecycle>,
    generation: u64,
    armed: bool,
}

impl InFlightRun<'_> {
    fn settle(mut self, run: SimulationRun) -> Result<SimulationRun, InterceptError> {
        self.armed = false;
        let mut lifecycle = lock(self.lifecycle);
        lifecycle.in_flight = None;

        if lifecycle.generation != self.generation || !matches!(lifecycle.state, RunState::Running)
        {
            log::warn!("discarding simulation run {} after reset", self.generation);
            return Err(InterceptError::RunSuperseded);
        }

        lifecycle.state = RunState::Settled(run.clone());
        Ok(run)
    }
}

impl Drop for InFlightRun<'_> {
    fn drop(&mut self) {
        if !self.armed {
            return;
        }
        let mut lifecycle = lock(self.lifecycle);
        if lifecycle.in_flight == Some(self.generation) {
            lifecycle.in_flight = None;
        }
        if lifecycle.generation == self.generation && matches!(lifecycle.state, RunState::Running) {
            log::warn!("simulation run {} cancelled before settling", self.generation);
            lifecycle.state = RunState::Idle;
        }
    }
}

pub struct SimulationOrchestrator<R> {
    estimator: OutcomeEstimator<R>,
    segment_count: NonZeroUsize,
    lifecycle: Mutex<Lifecycle>,
}

impl SimulationOrchestrator<HttpEstimator> {
    /// Orchestrator delegating to the HTTP estimation service named in `config`.
    pub fn from_config(config: &EngineConfig) -> Result<Self, InterceptError> {
        Ok(Self::new(HttpEstimator::new(config)?, config))
    }
}

impl SimulationOrchestrator<OfflineEstimator> {
    /// Orchestrator without a remote service: every run settles in degraded mode.
    pub fn offline(config: &EngineConfig) -> Self {
        Self::new(OfflineEstimator, config)
    }
}

impl<R: RemoteEstimator> SimulationOrchestrator<R> {
    pub fn new(remote: R, config: &EngineConfig) -> Self {
        SimulationOrchestrator {
            estimator: OutcomeEstimator::new(remote),
            segment_count: config.segment_count(),
            lifecycle: Mutex::new(Lifecycle {
                state: RunState::Idle,
                generation: 0,
                in_flight: None,
            }),
        }
    }

    pub fn estimator(&self) -> &OutcomeEstimator<R> {
        &self.estimator
    }

    /// Run one simulation.
    ///
    /// Moves to `Running`, awaits the outcome estimator, builds the trajectory for the
    /// launch epoch, then settles.
    ///
    /// Argument
    /// --------
    /// * `parameters`: the mission parameters of the run
    ///
    /// Return
    /// ------
    /// * the settled [`SimulationRun`]
    /// * [`InterceptError::RunInFlight`] if a remote delegation is still pending, including one
    ///   whose run was reset
    /// * [`InterceptError::RunSuperseded`] if [`reset`](Self::reset) was called while this run was in flight
    pub async fn simulate(
        &self,
        parameters: MissionParameters,
    ) -> Result<SimulationRun, InterceptError> {
        let generation = {
            let mut lifecycle = lock(&self.lifecycle);
            if let Some(pending) = lifecycle.in_flight {
                log::warn!("simulation rejected, run {pending} is in flight");
                return Err(InterceptError::RunInFlight);
            }
            lifecycle.generation += 1;
            lifecycle.state = RunState::Running;
            lifecycle.in_flight = Some(lifecycle.generation);
            lifecycle.generation
        };
        let in_flight = InFlightRun {
            lifecycle: &self.lifecycle,
            generation,
            armed: true,
        };

        log::info!(
            "simulation run {generation}: {} propulsion, {} payload",
            parameters.propulsion(),
            parameters.payload()
        );

        let estimate = self.estimator.estimate(&parameters).await;

        let BodyPositions { origin, target } = positions(&parameters.launch_epoch());
        let trajectory = curve(&origin, &target, parameters.propulsion(), self.segment_count);

        log::info!(
            "simulation run {generation} settled: {}{}",
            estimate.outcome().status,
            if estimate.is_degraded() { " (degraded)" } else { "" }
        );

        in_flight.settle(SimulationRun {
            parameters,
            estimate,
            trajectory,
        })
    }

    /// Drop the current run, whatever its phase, and go back to `Idle`.
    ///
    /// A pending remote call is not cancelled: its result is discarded on arrival and no new
    /// run is accepted before then.
    pub fn reset(&self) {
        let mut lifecycle = lock(&self.lifecycle);
        lifecycle.generation += 1;
        lifecycle.state = RunState::Idle;
        log::info!("simulation reset");
    }

    pub fn phase(&self) -> RunPhase {
        match lock(&self.lifecycle).state {
            RunState::Idle => RunPhase::Idle,
            RunState::Running => RunPhase::Running,
            RunState::Settled(_) => RunPhase::Settled,
        }
    }

    pub fn current_run(&self) -> Option<SimulationRun> {
        match &lock(&self.lifecycle).state {
            RunState::Settled(run) => Some(run.clone()),
            _ => None,
        }
    }

    /// True while a remote delegation is pending, even after a reset.
    pub fn is_in_flight(&self) -> bool {
        lock(&self.lifecycle).in_flight.is_some()
    }

    /// Outcome of the settled run, or the empty pending outcome.
    pub fn outcome(&self) -> MissionOutcome {
        match &lock(&self.lifecycle).state {
            RunState::Settled(run) => run.outcome().clone(),
            _ => MissionOutcome::default(),
        }
    }

    pub fn log(&self) -> Vec<String> {
        match &lock(&self.lifecycle).state {
            RunState::Settled(run) => run.outcome().log.clone(),
            _ => Vec::new(),
        }
    }

    pub fn is_degraded(&self) -> bool {
        match &lock(&self.lifecycle).state {
            RunState::Settled(run) => run.is_degraded(),
            _ => false,
        }
    }

    pub fn degraded_reason(&self) -> Option<String> {
        match &lock(&self.lifecycle).state {
            RunState::Settled(run) => run.estimate.degraded_reason().map(str::to_string),
            _ => None,
        }
    }
}
