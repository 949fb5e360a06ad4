//! # Constants and type definitions for the mission engine
//!
//! This module centralizes the **time constants**, the **scene anchors** used by the
//! position model, and the **shape constants** of the trajectory curves.
//!
//! ## Overview
//!
//! - Calendar and time-scale constants (day length, sidereal year)
//! - The reference epoch of the interstellar object (closest approach)
//! - Fixed anchor points of the shared scene coordinate system
//! - Fallback estimator base values
//! - Common type aliases used across the crate
//!
//! Scene coordinates are not physical units: the position model is a stylized
//! approximation meant for display, not an ephemeris.

use nalgebra::Vector3;

// -------------------------------------------------------------------------------------------------
// Time constants
// -------------------------------------------------------------------------------------------------

/// 2π, useful for trigonometric conversions
pub const DPI: f64 = 2. * std::f64::consts::PI;

/// Number of seconds in a day
pub const SECONDS_PER_DAY: f64 = 86_400.0;

/// Length of the sidereal year in days
pub const SIDEREAL_YEAR_DAYS: f64 = 365.256_363_004;

/// Length of the Julian year in days
pub const JULIAN_YEAR_DAYS: f64 = 365.25;

/// Reference epoch (UTC calendar date): perihelion passage of the interstellar object
pub const REFERENCE_EPOCH_YMD: (i32, u8, u8) = (2025, 10, 29);

// -------------------------------------------------------------------------------------------------
// Scene anchors
// -------------------------------------------------------------------------------------------------

/// Fixed anchor of the origin body (the launch planet)
pub const ORIGIN_ANCHOR: [f64; 3] = [-3.0, 0.0, 0.0];

/// Radius of the circular wobble of the origin body around its anchor
pub const ORIGIN_WOBBLE_RADIUS: f64 = 0.6;

/// Central anchor (the star) the target recedes from
pub const CENTRAL_ANCHOR: [f64; 3] = [0.0, 0.0, 0.0];

/// Perihelion distance of the target, in AU
pub const TARGET_PERIHELION_OFFSET: f64 = 1.36;

/// Growth of the target distance per year away from the reference epoch, in AU/yr
pub const TARGET_RECESSION_PER_YEAR: f64 = 2.0;

/// Inclination of the target path: vertical drift per year of offset
pub const TARGET_INCLINATION_SLOPE: f64 = 0.35;

/// Depth drift of the target path per year of offset
pub const TARGET_DEPTH_SLOPE: f64 = -0.2;

/// Scene units per AU
pub const SCENE_SCALE: f64 = 3.0;

// -------------------------------------------------------------------------------------------------
// Trajectory curve shapes
// -------------------------------------------------------------------------------------------------

/// Height of the sinusoidal bump of a chemical burn profile
pub const CHEMICAL_ARC_AMPLITUDE: f64 = 2.0;

/// Elevation of the ion quadratic control point above the higher endpoint
pub const ION_CONTROL_LIFT: f64 = 5.0;

/// Positions of the two solar sail control points along the horizontal span
pub const SAIL_CONTROL_FRACTIONS: (f64, f64) = (0.3, 0.7);

/// Elevations of the two solar sail control points above the higher endpoint
pub const SAIL_CONTROL_LIFTS: (f64, f64) = (10.0, 6.0);

// -------------------------------------------------------------------------------------------------
// Fallback estimator
// -------------------------------------------------------------------------------------------------

/// Base velocity change before propulsion and payload multipliers, in km/s
pub const BASE_DELTA_V: KmPerSecond = 15.0;

/// Base transit duration before propulsion and payload multipliers, in years
pub const BASE_TRANSIT_YEARS: Years = 5.0;

/// Propellant cost per km/s of velocity change
pub const PROPELLANT_COST_PER_DELTA_V: f64 = 0.8;

/// Bounds applied to the fallback success probability
pub const SUCCESS_PROBABILITY_BOUNDS: (f64, f64) = (0.1, 0.95);

/// A fallback run strictly above this probability is reported as a success
pub const SUCCESS_THRESHOLD: f64 = 0.7;

// -------------------------------------------------------------------------------------------------
// Type aliases
// -------------------------------------------------------------------------------------------------

/// Duration in years
pub type Years = f64;

/// Velocity in km/s
pub type KmPerSecond = f64;

/// Angle in radians
pub type Radian = f64;

/// A point in the shared scene coordinate system
pub type SpatialPosition = Vector3<f64>;
