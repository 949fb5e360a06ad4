//! # Position model
//!
//! Maps a launch epoch to the scene positions of the **origin body** (the launch planet)
//! and the **target body** (the interstellar object).
//!
//! ## Model
//!
//! - The phase angle is the signed day offset from the reference epoch divided by one
//!   sidereal year, in radians.
//! - The origin wobbles on a small circle around its fixed anchor, driven by the phase angle.
//! - The target recedes along a stylized hyperbola: its distance from the central anchor is
//!   the perihelion offset plus a term linear in the absolute year offset. The signed year
//!   offset tilts the inbound and outbound legs apart.
//!
//! This is **not** an ephemeris solver. The functions are pure: the rendering layer
//! recomputes positions on every frame and expects bit-identical results for identical inputs.
use hifitime::Epoch;

use crate::constants::{
    Radian, SpatialPosition, CENTRAL_ANCHOR, DPI, ORIGIN_ANCHOR, ORIGIN_WOBBLE_RADIUS,
    SCENE_SCALE, SIDEREAL_YEAR_DAYS, TARGET_DEPTH_SLOPE, TARGET_INCLINATION_SLOPE,
    TARGET_PERIHELION_OFFSET, TARGET_RECESSION_PER_YEAR,
};
use crate::time::{day_offset, year_offset};

/// Origin and target positions at one epoch.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BodyPositions {
    pub origin: SpatialPosition,
    pub target: SpatialPosition,
}

/// Orbital phase of the origin body at `epoch`.
pub fn phase_angle(epoch: &Epoch) -> Radian {
    day_offset(epoch) / SIDEREAL_YEAR_DAYS * DPI
}

/// Position of the origin body at `epoch`.
pub fn origin_position(epoch: &Epoch) -> SpatialPosition {
    let phase = phase_angle(epoch);
    SpatialPosition::from(ORIGIN_ANCHOR)
        + SpatialPosition::new(
            ORIGIN_WOBBLE_RADIUS * phase.cos(),
            0.0,
            ORIGIN_WOBBLE_RADIUS * phase.sin(),
        )
}

/// Distance of the target from the central anchor at `epoch`, in AU.
pub fn target_distance(epoch: &Epoch) -> f64 {
    TARGET_PERIHELION_OFFSET + TARGET_RECESSION_PER_YEAR * year_offset(epoch).abs()
}

/// Position of the target body at `epoch`.
pub fn target_position(epoch: &Epoch) -> SpatialPosition {
    let years = year_offset(epoch);
    let distance = target_distance(epoch);
    SpatialPosition::from(CENTRAL_ANCHOR)
        + SCENE_SCALE
            * SpatialPosition::new(
                distance,
                TARGET_INCLINATION_SLOPE * years,
                TARGET_DEPTH_SLOPE * years,
            )
}

/// Compute both body positions for a launch epoch.
///
/// Argument
/// --------
/// * `launch_epoch`: the epoch to evaluate
///
/// Return
/// ------
/// * the [`BodyPositions`] of origin and target in scene coordinates
pub fn positions(launch_epoch: &Epoch) -> BodyPositions {
    BodyPositions {
        origin: origin_position(launch_epoch),
        target: target_position(launch_epoch),
    }
}

#[cfg(test)]
mod position_model_test {
    use super::*;
    use crate::time::{parse_launch_epoch, reference_epoch};
    use approx::assert_relative_eq;

    #[test]
    fn test_positions_at_reference_epoch() {
        let BodyPositions { origin, target } = positions(&reference_epoch());

        assert_eq!(origin, SpatialPosition::new(-3.0 + ORIGIN_WOBBLE_RADIUS, 0.0, 0.0));
        assert_relative_eq!(target.x, TARGET_PERIHELION_OFFSET * SCENE_SCALE, epsilon = 1e-12);
        assert_eq!(target.y, 0.0);
        assert_eq!(target.z, 0.0);
    }

    #[test]
    fn test_positions_are_deterministic() {
        let epoch = parse_launch_epoch("2031-07-04T12:47").unwrap();
        let first = positions(&epoch);
        for _ in 0..10 {
            assert_eq!(positions(&epoch), first);
        }
    }

    #[test]
    fn test_origin_wobble_radius() {
        for date in ["2020-01-01", "2025-10-29", "2026-04-29", "2040-12-31T23:59"] {
            let epoch = parse_launch_epoch(date).unwrap();
            let offset = origin_position(&epoch) - SpatialPosition::from(ORIGIN_ANCHOR);
            assert_relative_eq!(offset.norm(), ORIGIN_WOBBLE_RADIUS, epsilon = 1e-12);
            assert_eq!(offset.y, 0.0);
        }
    }

    #[test]
    fn test_target_recession_is_symmetric() {
        let before = parse_launch_epoch("2023-10-29").unwrap();
        let after = parse_launch_epoch("2027-10-30").unwrap();

        // 731 days on both sides of closest approach
        assert_eq!(target_distance(&before), target_distance(&after));
        assert!(target_distance(&after) > TARGET_PERIHELION_OFFSET);

        let p_before = target_position(&before);
        let p_after = target_position(&after);
        assert_eq!(p_before.x, p_after.x);
        assert_eq!(p_before.y, -p_after.y);
        assert!(p_after.y > 0.0);
    }

    #[test]
    fn test_phase_angle_after_one_year() {
        let epoch = parse_launch_epoch("2026-10-29").unwrap();
        assert_relative_eq!(phase_angle(&epoch), 365.0 / SIDEREAL_YEAR_DAYS * DPI, epsilon = 1e-12);
    }
}
