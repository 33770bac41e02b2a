//! Ring-versus-ring relations built on the 2D primitives.

use serde::{Deserialize, Serialize};

use super::core::Tolerance;
use super::polygon2d::{contains_point, rings_cross};
use super::projection::Point2;

/// How two rings are tested for intersection.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum IntersectionStrategy {
    /// Rings intersect when the vertices of one ring fall both inside and
    /// outside the other. Misses crossings whose vertices all land on one
    /// side.
    #[default]
    SampledContainment,
    /// Rings intersect when any pair of edges properly crosses.
    ExactSegments,
}

/// Containment of every point of `points` in `container`.
#[must_use]
pub fn containment_flags(container: &[Point2], points: &[Point2], tol: Tolerance) -> Vec<bool> {
    points
        .iter()
        .map(|p| contains_point(container, *p, tol))
        .collect()
}

/// Whether `b` intersects `a` under the chosen strategy.
///
/// With `SampledContainment` only `b`'s vertices are sampled against `a`.
#[must_use]
pub fn rings_intersect(
    a: &[Point2],
    b: &[Point2],
    strategy: IntersectionStrategy,
    tol: Tolerance,
) -> bool {
    match strategy {
        IntersectionStrategy::SampledContainment => {
            let flags = containment_flags(a, b, tol);
            flags.iter().any(|f| *f) && flags.iter().any(|f| !*f)
        }
        IntersectionStrategy::ExactSegments => rings_cross(a, b, tol),
    }
}

/// `inner` lies inside `outer` when every vertex of `inner` is contained.
#[must_use]
pub fn ring_nested_in(inner: &[Point2], outer: &[Point2], tol: Tolerance) -> bool {
    !inner.is_empty() && inner.iter().all(|p| contains_point(outer, *p, tol))
}

/// `inner` lies fully outside `outer` when none of its vertices is contained.
#[must_use]
pub fn ring_outside(inner: &[Point2], outer: &[Point2], tol: Tolerance) -> bool {
    !inner.iter().any(|p| contains_point(outer, *p, tol))
}
