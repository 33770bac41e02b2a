//! Polygon rule catalogue and validation report.
//!
//! Every rule reads the same immutable [`Polygon`] and yields exactly one
//! [`RuleOutcome`]. Internal failures (degenerate rings, triangulation
//! errors) are reported as that rule's outcome and never abort the others.

mod orientation;
mod planarity;
mod ring_relations;
mod validator;

use std::fmt;

use serde::{Serialize, Serializer};

use crate::geom::{GeomError, Point2, Point3, Polygon, RingRef, project};

pub use orientation::check_orientation;
pub use planarity::{check_distance_to_plane, check_normals_deviation};
pub use ring_relations::{
    check_duplicated_rings, check_hole_outside, check_inner_rings_nested, check_intersection,
};
pub use validator::{ValidationOptions, Validator, validate_polygon};

/// Polygon-level rules, in catalogue order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum RuleId {
    IntersectionRings,
    DuplicatedRings,
    NonPlanarDistancePlane,
    NonPlanarNormalsDeviation,
    InteriorDisconnected,
    HoleOutside,
    InnerRingsNested,
    OrientationRingsSame,
}

impl RuleId {
    /// Catalogue order; reports list outcomes in this order.
    pub const ALL: [Self; 8] = [
        Self::IntersectionRings,
        Self::DuplicatedRings,
        Self::NonPlanarDistancePlane,
        Self::NonPlanarNormalsDeviation,
        Self::InteriorDisconnected,
        Self::HoleOutside,
        Self::InnerRingsNested,
        Self::OrientationRingsSame,
    ];

    /// Stable identifier consumed by downstream report readers.
    #[must_use]
    pub const fn code(self) -> &'static str {
        match self {
            Self::IntersectionRings => "GE_P_INTERSECTION_RINGS",
            Self::DuplicatedRings => "GE_P_DUPLICATED_RINGS",
            Self::NonPlanarDistancePlane => "GE_P_NON_PLANAR_POLYGON_DISTANCE_PLANE",
            Self::NonPlanarNormalsDeviation => "GE_P_NON_PLANAR_POLYGON_NORMALS_DEVIATION",
            Self::InteriorDisconnected => "GE_P_INTERIOR_DISCONNECTED",
            Self::HoleOutside => "GE_P_HOLE_OUTSIDE",
            Self::InnerRingsNested => "GE_P_INNER_RINGS_NESTED",
            Self::OrientationRingsSame => "GE_P_ORIENTATION_RINGS_SAME",
        }
    }

    /// Numeric catalogue entry (201..=208).
    #[must_use]
    pub const fn number(self) -> u16 {
        match self {
            Self::IntersectionRings => 201,
            Self::DuplicatedRings => 202,
            Self::NonPlanarDistancePlane => 203,
            Self::NonPlanarNormalsDeviation => 204,
            Self::InteriorDisconnected => 205,
            Self::HoleOutside => 206,
            Self::InnerRingsNested => 207,
            Self::OrientationRingsSame => 208,
        }
    }

    #[must_use]
    pub fn from_code(code: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|rule| rule.code() == code)
    }
}

impl fmt::Display for RuleId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

impl Serialize for RuleId {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.code())
    }
}

/// Two rings involved in one finding, with their points.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RingPair {
    pub first: RingRef,
    pub second: RingRef,
    pub first_points: Vec<Point3>,
    pub second_points: Vec<Point3>,
}

impl RingPair {
    pub(crate) fn new(polygon: &Polygon, first: RingRef, second: RingRef) -> Self {
        let points = |which| {
            polygon
                .ring(which)
                .map(|ring| ring.points().to_vec())
                .unwrap_or_default()
        };
        Self {
            first,
            second,
            first_points: points(first),
            second_points: points(second),
        }
    }
}

/// A point that lies too far from the reference plane.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct PointDistance {
    pub ring: RingRef,
    pub point: Point3,
    pub distance: f64,
}

/// A ring whose triangle normals disagree.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RingDeviation {
    pub ring: RingRef,
    pub points: Vec<Point3>,
    /// Largest angle to the first triangle's normal, in degrees.
    pub max_deviation: f64,
}

/// Rule-specific supporting data for a violation.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "kind", content = "items", rename_all = "snake_case")]
pub enum Evidence {
    RingPairs(Vec<RingPair>),
    PointDistances(Vec<PointDistance>),
    Rings(Vec<RingDeviation>),
}

impl Evidence {
    #[must_use]
    pub fn len(&self) -> usize {
        match self {
            Self::RingPairs(items) => items.len(),
            Self::PointDistances(items) => items.len(),
            Self::Rings(items) => items.len(),
        }
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Violation {
    pub rule: RuleId,
    pub message: String,
    pub evidence: Evidence,
}

impl Violation {
    #[must_use]
    pub fn new(rule: RuleId, message: impl Into<String>, evidence: Evidence) -> Self {
        Self {
            rule,
            message: message.into(),
            evidence,
        }
    }
}

/// Result of running one rule.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "status", content = "detail", rename_all = "snake_case")]
pub enum RuleOutcome {
    Pass,
    /// The rule is part of the catalogue but has no check behind it.
    NotImplemented,
    Violation(Violation),
    /// The rule could not be evaluated on this input.
    Failed(GeomError),
}

impl RuleOutcome {
    /// Pass and not-implemented both count as passing.
    #[must_use]
    pub fn is_pass(&self) -> bool {
        matches!(self, Self::Pass | Self::NotImplemented)
    }

    #[must_use]
    pub fn violation(&self) -> Option<&Violation> {
        match self {
            Self::Violation(v) => Some(v),
            _ => None,
        }
    }

    #[must_use]
    pub fn error(&self) -> Option<&GeomError> {
        match self {
            Self::Failed(e) => Some(e),
            _ => None,
        }
    }

    /// `Pass` when `evidence` is empty, otherwise a violation carrying it.
    pub(crate) fn from_evidence(rule: RuleId, message: &str, evidence: Evidence) -> Self {
        if evidence.is_empty() {
            Self::Pass
        } else {
            Self::Violation(Violation::new(rule, message, evidence))
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RuleReport {
    pub rule: RuleId,
    pub outcome: RuleOutcome,
}

/// One outcome per catalogue rule, in catalogue order.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(transparent)]
pub struct ValidationReport {
    entries: Vec<RuleReport>,
}

impl ValidationReport {
    pub(crate) fn new(entries: Vec<RuleReport>) -> Self {
        Self { entries }
    }

    #[must_use]
    pub fn entries(&self) -> &[RuleReport] {
        &self.entries
    }

    /// True when every rule passed.
    #[must_use]
    pub fn is_valid(&self) -> bool {
        self.entries.iter().all(|entry| entry.outcome.is_pass())
    }

    #[must_use]
    pub fn outcome(&self, rule: RuleId) -> Option<&RuleOutcome> {
        self.entries
            .iter()
            .find(|entry| entry.rule == rule)
            .map(|entry| &entry.outcome)
    }

    pub fn violations(&self) -> impl Iterator<Item = &Violation> {
        self.entries.iter().filter_map(|entry| entry.outcome.violation())
    }

    pub fn failures(&self) -> impl Iterator<Item = (RuleId, &GeomError)> {
        self.entries
            .iter()
            .filter_map(|entry| entry.outcome.error().map(|e| (entry.rule, e)))
    }
}

impl fmt::Display for ValidationReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for entry in &self.entries {
            write!(f, "{} {}: ", entry.rule.number(), entry.rule.code())?;
            match &entry.outcome {
                RuleOutcome::Pass => writeln!(f, "pass")?,
                RuleOutcome::NotImplemented => writeln!(f, "not implemented")?,
                RuleOutcome::Violation(v) => {
                    writeln!(f, "{} ({} item(s))", v.message, v.evidence.len())?;
                }
                RuleOutcome::Failed(e) => writeln!(f, "failed: {e}")?,
            }
        }
        Ok(())
    }
}

/// All rings of a polygon projected into the exterior ring's frame.
#[derive(Debug, Clone)]
pub(crate) struct ProjectedPolygon {
    pub exterior: Vec<Point2>,
    pub interiors: Vec<Vec<Point2>>,
}

impl ProjectedPolygon {
    pub fn new(polygon: &Polygon) -> Result<Self, GeomError> {
        let (exterior, frame) = project(polygon.exterior(), None)?;
        let interiors = polygon
            .interiors()
            .iter()
            .map(|ring| frame.project_points(ring.points()))
            .collect();
        Ok(Self {
            exterior,
            interiors,
        })
    }

    /// Projected points of any ring, exterior included.
    pub fn ring(&self, which: RingRef) -> &[Point2] {
        match which {
            RingRef::Exterior => &self.exterior,
            RingRef::Interior(index) => {
                self.interiors.get(index).map(Vec::as_slice).unwrap_or(&[])
            }
        }
    }
}

/// Unordered pairs `(i, j)` with `i < j` over `0..n`.
pub(crate) fn index_pairs(n: usize) -> impl Iterator<Item = (usize, usize)> {
    (0..n).flat_map(move |i| (i + 1..n).map(move |j| (i, j)))
}

/// Report an internal failure as the rule's outcome.
pub(crate) fn failed(rule: RuleId, err: GeomError) -> RuleOutcome {
    log::warn!("{rule} could not be evaluated: {err}");
    RuleOutcome::Failed(err)
}
