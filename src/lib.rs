//! # Intercept: mission feasibility engine for interstellar object flybys
//!
//! Given a launch epoch, a propulsion technology and a payload class, the crate:
//!
//! 1. places the origin planet and the interstellar object in a shared scene
//!    ([`position_model`]),
//! 2. draws a propulsion-specific flight path between them ([`trajectory`]),
//! 3. estimates transit time, delta-v, success probability and propellant cost, asking a
//!    remote service first and falling back to a local heuristic ([`outcome`], [`remote`]),
//! 4. coordinates runs through a single-flight state machine ([`orchestrator`]).
//!
//! ## Example
//!
//! ```rust,no_run
//! use intercept::config::EngineConfig;
//! use intercept::mission::MissionParameters;
//! use intercept::orchestrator::SimulationOrchestrator;
//!
//! # async fn run() -> Result<(), intercept::intercept_errors::InterceptError> {
//! let config = EngineConfig::from_file("intercept.toml")?;
//! let orchestrator = SimulationOrchestrator::from_config(&config)?;
//!
//! let params = MissionParameters::parse("2026-03-01T09:00", "ion", "medium")?;
//! let run = orchestrator.simulate(params).await?;
//!
//! if run.is_degraded() {
//!     println!("offline estimate");
//! }
//! for line in &run.outcome().log {
//!     println!("{line}");
//! }
//! # Ok(())
//! # }
//! ```
pub mod config;
pub mod constants;
pub mod intercept_errors;
pub mod mission;
pub mod orchestrator;
pub mod outcome;
pub mod position_model;
pub mod remote;
pub mod time;
pub mod trajectory;
