use serde::Serialize;

use super::ring::RingRef;

/// Errors raised by the geometric kernel.
///
/// Rules never let these escape: a rule that hits one reports it as its own
/// outcome and the remaining rules still run.
#[derive(Debug, Clone, PartialEq, Serialize, thiserror::Error)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum GeomError {
    #[error("ring requires at least 3 distinct points, got {count}")]
    NotEnoughPoints { count: usize },
    #[error("ring contains non-finite coordinates at point {index}")]
    NonFinitePoint { index: usize },
    #[error("ring has fewer than 3 non-collinear points; no projection frame can be built")]
    DegenerateRing,
    #[error("points are collinear; plane normal is undefined")]
    DegenerateNormal,
    #[error("triangulation of {ring} failed: {reason}")]
    TriangulationFailed { ring: RingRef, reason: String },
    #[error("polygon requires exactly one exterior ring, got {count}")]
    MalformedExterior { count: usize },
}
