//! Planarity rules: distance to a fitted plane and triangle normal deviation.

use crate::geom::{
    GeomError, Polygon, Triangulator, Vec3, angle_between_degrees, triangle_normal,
};

use super::validator::ValidationOptions;
use super::{Evidence, PointDistance, RingDeviation, RuleId, RuleOutcome, failed};

/// `GE_P_NON_PLANAR_POLYGON_DISTANCE_PLANE`
///
/// Fits a plane to the exterior ring and reports every point of every ring
/// whose distance to it exceeds `options.planarity_tolerance`.
#[must_use]
pub fn check_distance_to_plane(polygon: &Polygon, options: &ValidationOptions) -> RuleOutcome {
    let rule = RuleId::NonPlanarDistancePlane;
    let plane = match options.plane_fit.fit(polygon.exterior()) {
        Ok(plane) => plane,
        Err(err) => return failed(rule, err),
    };

    let mut offenders = Vec::new();
    for (which, ring) in polygon.rings() {
        for point in ring.points() {
            let distance = plane.distance(*point);
            if distance > options.planarity_tolerance {
                offenders.push(PointDistance {
                    ring: which,
                    point: *point,
                    distance,
                });
            }
        }
    }

    if !offenders.is_empty() {
        log::debug!(
            "{rule}: {} point(s) farther than {} from the plane",
            offenders.len(),
            options.planarity_tolerance
        );
    }

    RuleOutcome::from_evidence(
        rule,
        "Polygon points deviate from the fitted plane",
        Evidence::PointDistances(offenders),
    )
}

/// `GE_P_NON_PLANAR_POLYGON_NORMALS_DEVIATION`
///
/// Each ring is triangulated on its own and the normal of every triangle is
/// compared with the normal of the first. A triangulation failure ends the
/// rule with that failure; rings already found to deviate are dropped.
#[must_use]
pub fn check_normals_deviation(
    polygon: &Polygon,
    options: &ValidationOptions,
    triangulator: &dyn Triangulator,
) -> RuleOutcome {
    let rule = RuleId::NonPlanarNormalsDeviation;

    let mut deviating = Vec::new();
    for (which, ring) in polygon.rings() {
        let points = ring.points();
        let triangles = match triangulator.triangulate(points) {
            Ok(triangles) => triangles,
            Err(reason) => {
                return failed(rule, GeomError::TriangulationFailed { ring: which, reason });
            }
        };

        let normals: Vec<Vec3> = triangles
            .iter()
            .filter_map(|[a, b, c]| {
                let (pa, pb, pc) = (points.get(*a)?, points.get(*b)?, points.get(*c)?);
                match triangle_normal(*pa, *pb, *pc) {
                    Ok(n) => Some(n),
                    Err(_) => {
                        log::trace!("{rule}: skipping degenerate triangle {a}/{b}/{c} of {which}");
                        None
                    }
                }
            })
            .collect();

        let Some((first, rest)) = normals.split_first() else {
            continue;
        };
        let max_deviation = rest
            .iter()
            .map(|n| angle_between_degrees(*first, *n))
            .fold(0.0, f64::max);

        if max_deviation > options.normal_deviation_tolerance {
            log::debug!("{rule}: {which} deviates by {max_deviation:.3} degrees");
            deviating.push(RingDeviation {
                ring: which,
                points: points.to_vec(),
                max_deviation,
            });
        }
    }

    RuleOutcome::from_evidence(
        rule,
        "Triangle normals of the polygon deviate",
        Evidence::Rings(deviating),
    )
}
