//! # Trajectory curve generator
//!
//! Synthesizes the flight path drawn between the origin and the target. The curve family
//! depends on the propulsion variant:
//!
//! | Variant      | Curve                                   | Control geometry                                 |
//! |--------------|-----------------------------------------|--------------------------------------------------|
//! | `chemical`   | straight line + one sinusoidal bump     | bump of fixed amplitude on the vertical axis     |
//! | `ion`        | quadratic Bézier                        | one control point above the horizontal midpoint  |
//! | `solar-sail` | cubic Bézier                            | two control points at 30% / 70% of the span      |
//! | unknown      | straight line                           | none                                             |
//!
//! The Bézier shapes live in the (x, y) plane; the depth axis (z) is always linearly
//! interpolated.
//!
//! A generated [`Trajectory`] is immutable. A new run produces a new one.
use std::f64::consts::PI;
use std::num::NonZeroUsize;

use itertools::Itertools;
use nalgebra::Vector2;

use crate::constants::{
    SpatialPosition, CHEMICAL_ARC_AMPLITUDE, ION_CONTROL_LIFT, SAIL_CONTROL_FRACTIONS,
    SAIL_CONTROL_LIFTS,
};
use crate::mission::PropulsionVariant;

/// One sample of a trajectory, tagged with its progress fraction in [0, 1].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TrajectoryPoint {
    pub progress: f64,
    pub position: SpatialPosition,
}

/// Ordered flight path from origin (progress 0) to target (progress 1).
#[derive(Debug, Clone, PartialEq)]
pub struct Trajectory {
    variant: Option<PropulsionVariant>,
    points: Vec<TrajectoryPoint>,
}

impl Trajectory {
    /// Propulsion variant that shaped this path, `None` for the linear fallback.
    pub fn variant(&self) -> Option<PropulsionVariant> {
        self.variant
    }

    pub fn points(&self) -> &[TrajectoryPoint] {
        &self.points
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    /// Always false: a trajectory holds at least two points.
    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    pub fn origin(&self) -> SpatialPosition {
        self.points[0].position
    }

    pub fn target(&self) -> SpatialPosition {
        self.points[self.points.len() - 1].position
    }

    /// Arc length of the polyline through all points, in scene units.
    pub fn length(&self) -> f64 {
        self.points
            .iter()
            .tuple_windows()
            .map(|(a, b)| (b.position - a.position).norm())
            .sum()
    }

    /// Position at a progress fraction, linearly interpolated between neighbouring samples.
    ///
    /// `progress` is clamped to [0, 1], so an animation clock may overshoot safely.
    pub fn sample(&self, progress: f64) -> SpatialPosition {
        let last = self.points.len() - 1;
        let scaled = progress.clamp(0.0, 1.0) * last as f64;
        let index = scaled.floor() as usize;
        if index >= last {
            return self.target();
        }

        let local = scaled - index as f64;
        let a = self.points[index].position;
        let b = self.points[index + 1].position;
        a * (1.0 - local) + b * local
    }
}

#[inline]
fn lerp(a: f64, b: f64, t: f64) -> f64 {
    (1.0 - t) * a + t * b
}

fn quadratic_bezier(p0: Vector2<f64>, c: Vector2<f64>, p1: Vector2<f64>, t: f64) -> Vector2<f64> {
    let u = 1.0 - t;
    p0 * (u * u) + c * (2.0 * u * t) + p1 * (t * t)
}

fn cubic_bezier(
    p0: Vector2<f64>,
    c1: Vector2<f64>,
    c2: Vector2<f64>,
    p1: Vector2<f64>,
    t: f64,
) -> Vector2<f64> {
    let u = 1.0 - t;
    p0 * (u * u * u) + c1 * (3.0 * u * u * t) + c2 * (3.0 * u * t * t) + p1 * (t * t * t)
}

/// Position along the curve of `variant` at progress `t`.
fn point_at(
    origin: &SpatialPosition,
    target: &SpatialPosition,
    variant: Option<PropulsionVariant>,
    t: f64,
) -> SpatialPosition {
    let p0 = origin.xy();
    let p1 = target.xy();
    let top = origin.y.max(target.y);

    let plane = match variant {
        Some(PropulsionVariant::Chemical) => Vector2::new(
            lerp(p0.x, p1.x, t),
            lerp(p0.y, p1.y, t) + CHEMICAL_ARC_AMPLITUDE * (PI * t).sin(),
        ),
        Some(PropulsionVariant::Ion) => {
            let control = Vector2::new((p0.x + p1.x) / 2.0, top + ION_CONTROL_LIFT);
            quadratic_bezier(p0, control, p1, t)
        }
        Some(PropulsionVariant::SolarSail) => {
            let span = p1.x - p0.x;
            let (near, far) = SAIL_CONTROL_FRACTIONS;
            let (near_lift, far_lift) = SAIL_CONTROL_LIFTS;
            let c1 = Vector2::new(p0.x + near * span, top + near_lift);
            let c2 = Vector2::new(p0.x + far * span, top + far_lift);
            cubic_bezier(p0, c1, c2, p1, t)
        }
        None => Vector2::new(lerp(p0.x, p1.x, t), lerp(p0.y, p1.y, t)),
    };

    SpatialPosition::new(plane.x, plane.y, lerp(origin.z, target.z, t))
}

fn build(
    origin: &SpatialPosition,
    target: &SpatialPosition,
    variant: Option<PropulsionVariant>,
    segment_count: NonZeroUsize,
) -> Trajectory {
    let n = segment_count.get();
    let degenerate = origin == target;

    let points = (0..=n)
        .map(|i| {
            let progress = i as f64 / n as f64;
            let position = if degenerate {
                *origin
            } else {
                point_at(origin, target, variant, progress)
            };
            TrajectoryPoint { progress, position }
        })
        .collect();

    Trajectory { variant, points }
}

/// Generate the flight path between two positions.
///
/// Arguments
/// ---------
/// * `origin`: start of the path (progress 0)
/// * `target`: end of the path (progress 1)
/// * `variant`: propulsion variant selecting the curve family
/// * `segment_count`: number of segments, the path holds `segment_count + 1` points
///
/// Return
/// ------
/// * the [`Trajectory`]; when `origin == target` every point is the origin
pub fn curve(
    origin: &SpatialPosition,
    target: &SpatialPosition,
    variant: PropulsionVariant,
    segment_count: NonZeroUsize,
) -> Trajectory {
    build(origin, target, Some(variant), segment_count)
}

/// Same as [`curve`] for a raw propulsion label. Unknown labels get a straight line.
pub fn curve_for_label(
    origin: &SpatialPosition,
    target: &SpatialPosition,
    label: &str,
    segment_count: NonZeroUsize,
) -> Trajectory {
    let variant = label.parse::<PropulsionVariant>().ok();
    if variant.is_none() {
        log::debug!("unknown propulsion label {label:?}, drawing a straight trajectory");
    }
    build(origin, target, variant, segment_count)
}

#[cfg(test)]
mod trajectory_test {
    use super::*;
    use approx::assert_relative_eq;

    fn segments(n: usize) -> NonZeroUsize {
        NonZeroUsize::new(n).unwrap()
    }

    fn endpoints() -> (SpatialPosition, SpatialPosition) {
        (
            SpatialPosition::new(-2.4, 0.0, 0.0),
            SpatialPosition::new(16.08, 2.1, -1.2),
        )
    }

    fn assert_close(a: &SpatialPosition, b: &SpatialPosition) {
        assert_relative_eq!(a.x, b.x, epsilon = 1e-12);
        assert_relative_eq!(a.y, b.y, epsilon = 1e-12);
        assert_relative_eq!(a.z, b.z, epsilon = 1e-12);
    }

    #[test]
    fn test_curve_length_and_endpoints() {
        let (origin, target) = endpoints();
        for variant in PropulsionVariant::ALL {
            for n in [1, 2, 7, 64, 500] {
                let path = curve(&origin, &target, variant, segments(n));
                assert_eq!(path.len(), n + 1);
                assert_close(&path.origin(), &origin);
                assert_close(&path.target(), &target);
                assert_eq!(path.points()[0].progress, 0.0);
                assert_eq!(path.points()[n].progress, 1.0);
            }
        }
    }

    #[test]
    fn test_progress_is_monotonic() {
        let (origin, target) = endpoints();
        let path = curve(&origin, &target, PropulsionVariant::Ion, segments(10));
        assert!(path
            .points()
            .iter()
            .tuple_windows()
            .all(|(a, b)| a.progress < b.progress));
    }

    #[test]
    fn test_curve_is_deterministic() {
        let (origin, target) = endpoints();
        for variant in PropulsionVariant::ALL {
            let first = curve(&origin, &target, variant, segments(32));
            let second = curve(&origin, &target, variant, segments(32));
            assert_eq!(first, second);
        }
    }

    #[test]
    fn test_chemical_midpoint_bump() {
        let origin = SpatialPosition::new(0.0, 0.0, 0.0);
        let target = SpatialPosition::new(10.0, 4.0, 2.0);
        let path = curve(&origin, &target, PropulsionVariant::Chemical, segments(2));
        let mid = path.points()[1].position;
        assert_relative_eq!(mid.x, 5.0, epsilon = 1e-12);
        assert_relative_eq!(mid.y, 2.0 + CHEMICAL_ARC_AMPLITUDE, epsilon = 1e-12);
        assert_relative_eq!(mid.z, 1.0, epsilon = 1e-12);
    }

    #[test]
    fn test_ion_quadratic_midpoint() {
        let origin = SpatialPosition::new(0.0, 0.0, 0.0);
        let target = SpatialPosition::new(10.0, 4.0, 2.0);
        let path = curve(&origin, &target, PropulsionVariant::Ion, segments(2));
        let mid = path.points()[1].position;

        // B(1/2) = p0/4 + c/2 + p1/4 with c = (5, 4 + lift)
        assert_relative_eq!(mid.x, 5.0, epsilon = 1e-12);
        assert_relative_eq!(mid.y, 1.0 + (4.0 + ION_CONTROL_LIFT) / 2.0, epsilon = 1e-12);
        assert_relative_eq!(mid.z, 1.0, epsilon = 1e-12);
    }

    #[test]
    fn test_solar_sail_cubic_midpoint() {
        let origin = SpatialPosition::new(0.0, 0.0, 0.0);
        let target = SpatialPosition::new(10.0, 4.0, 2.0);
        let path = curve(&origin, &target, PropulsionVariant::SolarSail, segments(2));
        let mid = path.points()[1].position;

        // B(1/2) = (p0 + 3 c1 + 3 c2 + p1) / 8
        let (near_lift, far_lift) = SAIL_CONTROL_LIFTS;
        let expected_x = (0.0 + 3.0 * 3.0 + 3.0 * 7.0 + 10.0) / 8.0;
        let expected_y = (0.0 + 3.0 * (4.0 + near_lift) + 3.0 * (4.0 + far_lift) + 4.0) / 8.0;
        assert_relative_eq!(mid.x, expected_x, epsilon = 1e-12);
        assert_relative_eq!(mid.y, expected_y, epsilon = 1e-12);
        assert_relative_eq!(mid.z, 1.0, epsilon = 1e-12);
    }

    #[test]
    fn test_depth_axis_is_linear() {
        let (origin, target) = endpoints();
        for variant in PropulsionVariant::ALL {
            let path = curve(&origin, &target, variant, segments(8));
            for point in path.points() {
                assert_relative_eq!(
                    point.position.z,
                    lerp(origin.z, target.z, point.progress),
                    epsilon = 1e-12
                );
            }
        }
    }

    #[test]
    fn test_degenerate_curve() {
        let origin = SpatialPosition::new(1.0, 2.0, 3.0);
        for variant in PropulsionVariant::ALL {
            let path = curve(&origin, &origin, variant, segments(5));
            assert_eq!(path.len(), 6);
            assert!(path.points().iter().all(|p| p.position == origin));
            assert_eq!(path.length(), 0.0);
        }
    }

    #[test]
    fn test_unknown_label_is_linear() {
        let (origin, target) = endpoints();
        let path = curve_for_label(&origin, &target, "antimatter", segments(4));
        assert_eq!(path.variant(), None);
        assert_relative_eq!(path.length(), (target - origin).norm(), epsilon = 1e-9);

        let sail = curve_for_label(&origin, &target, "solar-sail", segments(4));
        assert_eq!(sail, curve(&origin, &target, PropulsionVariant::SolarSail, segments(4)));
    }

    #[test]
    fn test_sample_along_path() {
        let origin = SpatialPosition::new(0.0, 0.0, 0.0);
        let target = SpatialPosition::new(8.0, 0.0, 4.0);
        let path = curve_for_label(&origin, &target, "linear", segments(4));

        assert_eq!(path.sample(-1.0), path.origin());
        assert_eq!(path.sample(2.0), path.target());
        let quarter = path.sample(0.375);
        assert_relative_eq!(quarter.x, 3.0, epsilon = 1e-12);
        assert_relative_eq!(quarter.z, 1.5, epsilon = 1e-12);
    }
}
