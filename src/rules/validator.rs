//! Rule driver: runs the catalogue over one polygon and collects a report.

use serde::{Deserialize, Serialize};

#[cfg(feature = "parallel")]
use rayon::prelude::*;

use crate::geom::{
    EarClipTriangulator, IntersectionStrategy, PlaneFitStrategy, Polygon, Tolerance, Triangulator,
};

use super::{
    RuleId, RuleOutcome, RuleReport, ValidationReport, check_distance_to_plane,
    check_duplicated_rings, check_hole_outside, check_inner_rings_nested, check_intersection,
    check_normals_deviation, check_orientation,
};

/// Thresholds and strategy choices for polygon validation.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ValidationOptions {
    /// Largest allowed point distance to the reference plane, in model units.
    pub planarity_tolerance: f64,
    /// Largest allowed angle between triangle normals, in degrees.
    pub normal_deviation_tolerance: f64,
    /// Coincidence tolerance for point equality and boundary tests.
    pub coincidence: Tolerance,
    pub plane_fit: PlaneFitStrategy,
    pub intersection: IntersectionStrategy,
}

impl Default for ValidationOptions {
    fn default() -> Self {
        Self {
            planarity_tolerance: 0.001,
            normal_deviation_tolerance: 1.0,
            coincidence: Tolerance::DEFAULT,
            plane_fit: PlaneFitStrategy::FirstThreePoints,
            intersection: IntersectionStrategy::SampledContainment,
        }
    }
}

impl ValidationOptions {
    /// Options fitting the reference plane to every exterior point.
    #[must_use]
    pub fn least_squares() -> Self {
        Self {
            plane_fit: PlaneFitStrategy::LeastSquares,
            ..Default::default()
        }
    }

    /// Options testing ring intersection edge against edge.
    #[must_use]
    pub fn exact_intersections() -> Self {
        Self {
            intersection: IntersectionStrategy::ExactSegments,
            ..Default::default()
        }
    }

    /// Options with both planarity thresholds replaced.
    #[must_use]
    pub fn with_planarity(distance: f64, normal_degrees: f64) -> Self {
        Self {
            planarity_tolerance: distance,
            normal_deviation_tolerance: normal_degrees,
            ..Default::default()
        }
    }
}

/// Runs every catalogue rule against a polygon.
///
/// The polygon is only read, so one validator can check many polygons and
/// rules can be evaluated in any order.
#[derive(Debug, Clone)]
pub struct Validator<T: Triangulator = EarClipTriangulator> {
    options: ValidationOptions,
    triangulator: T,
}

impl Validator {
    /// Validator using the built-in ear-clipping triangulator.
    #[must_use]
    pub fn new(options: ValidationOptions) -> Self {
        let triangulator = EarClipTriangulator::new(options.coincidence);
        Self {
            options,
            triangulator,
        }
    }
}

impl Default for Validator {
    fn default() -> Self {
        Self::new(ValidationOptions::default())
    }
}

impl<T: Triangulator> Validator<T> {
    #[must_use]
    pub fn with_triangulator(options: ValidationOptions, triangulator: T) -> Self {
        Self {
            options,
            triangulator,
        }
    }

    #[must_use]
    pub fn options(&self) -> &ValidationOptions {
        &self.options
    }

    /// Evaluate a single rule.
    #[must_use]
    pub fn check(&self, rule: RuleId, polygon: &Polygon) -> RuleOutcome {
        let options = &self.options;
        match rule {
            RuleId::IntersectionRings => check_intersection(polygon, options),
            RuleId::DuplicatedRings => check_duplicated_rings(polygon, options),
            RuleId::NonPlanarDistancePlane => check_distance_to_plane(polygon, options),
            RuleId::NonPlanarNormalsDeviation => {
                check_normals_deviation(polygon, options, &self.triangulator)
            }
            RuleId::InteriorDisconnected => RuleOutcome::NotImplemented,
            RuleId::HoleOutside => check_hole_outside(polygon, options),
            RuleId::InnerRingsNested => check_inner_rings_nested(polygon, options),
            RuleId::OrientationRingsSame => check_orientation(polygon, options),
        }
    }

    /// Evaluate the whole catalogue. The report lists one entry per rule in
    /// catalogue order regardless of how the rules were scheduled.
    #[must_use]
    pub fn validate(&self, polygon: &Polygon) -> ValidationReport {
        log::debug!(
            "validating polygon with {} interior ring(s)",
            polygon.interiors().len()
        );
        let report = ValidationReport::new(self.run_rules(polygon));
        log::debug!(
            "validation finished: {} violation(s), {} failure(s)",
            report.violations().count(),
            report.failures().count()
        );
        report
    }

    #[cfg(feature = "parallel")]
    fn run_rules(&self, polygon: &Polygon) -> Vec<RuleReport> {
        RuleId::ALL
            .as_slice()
            .par_iter()
            .map(|&rule| RuleReport {
                rule,
                outcome: self.check(rule, polygon),
            })
            .collect()
    }

    #[cfg(not(feature = "parallel"))]
    fn run_rules(&self, polygon: &Polygon) -> Vec<RuleReport> {
        RuleId::ALL
            .iter()
            .map(|&rule| RuleReport {
                rule,
                outcome: self.check(rule, polygon),
            })
            .collect()
    }
}

/// Validate with default options and the built-in triangulator.
#[must_use]
pub fn validate_polygon(polygon: &Polygon) -> ValidationReport {
    Validator::default().validate(polygon)
}
