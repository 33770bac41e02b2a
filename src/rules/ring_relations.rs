//! Rules relating rings of one polygon to each other: intersection,
//! duplication, holes outside the exterior and nested holes.

use crate::geom::{Polygon, RingRef, ring_nested_in, ring_outside, rings_equal, rings_intersect};

use super::validator::ValidationOptions;
use super::{Evidence, ProjectedPolygon, RingPair, RuleId, RuleOutcome, failed, index_pairs};

/// `GE_P_INTERSECTION_RINGS`
///
/// Every interior ring is tested against the exterior, then every unordered
/// pair of interior rings is tested once. All intersecting pairs are
/// reported together.
#[must_use]
pub fn check_intersection(polygon: &Polygon, options: &ValidationOptions) -> RuleOutcome {
    let rule = RuleId::IntersectionRings;
    let projected = match ProjectedPolygon::new(polygon) {
        Ok(projected) => projected,
        Err(err) => return failed(rule, err),
    };
    let tol = options.coincidence;

    let mut pairs = Vec::new();
    for (index, interior) in projected.interiors.iter().enumerate() {
        if rings_intersect(&projected.exterior, interior, options.intersection, tol) {
            log::trace!("{rule}: interior ring {index} intersects the exterior ring");
            pairs.push(RingPair::new(polygon, RingRef::Exterior, RingRef::Interior(index)));
        }
    }

    for (i, j) in index_pairs(projected.interiors.len()) {
        if rings_intersect(
            &projected.interiors[i],
            &projected.interiors[j],
            options.intersection,
            tol,
        ) {
            log::trace!("{rule}: interior rings {i} and {j} intersect");
            pairs.push(RingPair::new(polygon, RingRef::Interior(i), RingRef::Interior(j)));
        }
    }

    RuleOutcome::from_evidence(rule, "Rings of the polygon intersect", Evidence::RingPairs(pairs))
}

/// `GE_P_DUPLICATED_RINGS`
///
/// All rings, exterior first, are projected into the exterior's frame and
/// every unordered pair is compared for geometric equality.
#[must_use]
pub fn check_duplicated_rings(polygon: &Polygon, options: &ValidationOptions) -> RuleOutcome {
    let rule = RuleId::DuplicatedRings;
    let projected = match ProjectedPolygon::new(polygon) {
        Ok(projected) => projected,
        Err(err) => return failed(rule, err),
    };

    let refs: Vec<RingRef> = polygon.rings().map(|(which, _)| which).collect();
    let pairs: Vec<RingPair> = index_pairs(refs.len())
        .filter(|&(i, j)| {
            rings_equal(
                projected.ring(refs[i]),
                projected.ring(refs[j]),
                options.coincidence,
            )
        })
        .map(|(i, j)| RingPair::new(polygon, refs[i], refs[j]))
        .collect();

    RuleOutcome::from_evidence(rule, "Polygon has duplicated rings", Evidence::RingPairs(pairs))
}

/// `GE_P_HOLE_OUTSIDE`
///
/// An interior ring none of whose points lies in the exterior ring. A ring
/// that is only partly outside is left to the intersection rule.
#[must_use]
pub fn check_hole_outside(polygon: &Polygon, options: &ValidationOptions) -> RuleOutcome {
    let rule = RuleId::HoleOutside;
    let projected = match ProjectedPolygon::new(polygon) {
        Ok(projected) => projected,
        Err(err) => return failed(rule, err),
    };

    let pairs: Vec<RingPair> = projected
        .interiors
        .iter()
        .enumerate()
        .filter(|(_, interior)| ring_outside(interior, &projected.exterior, options.coincidence))
        .map(|(index, _)| RingPair::new(polygon, RingRef::Exterior, RingRef::Interior(index)))
        .collect();

    RuleOutcome::from_evidence(
        rule,
        "Interior ring lies outside the exterior ring",
        Evidence::RingPairs(pairs),
    )
}

/// `GE_P_INNER_RINGS_NESTED`
///
/// Each unordered pair of interior rings is tested in both directions. A
/// pair is reported as `(container, nested)`; two identical rings produce
/// one entry per direction.
#[must_use]
pub fn check_inner_rings_nested(polygon: &Polygon, options: &ValidationOptions) -> RuleOutcome {
    let rule = RuleId::InnerRingsNested;
    let projected = match ProjectedPolygon::new(polygon) {
        Ok(projected) => projected,
        Err(err) => return failed(rule, err),
    };
    let tol = options.coincidence;

    let mut pairs = Vec::new();
    for (i, j) in index_pairs(projected.interiors.len()) {
        let a = &projected.interiors[i];
        let b = &projected.interiors[j];
        if ring_nested_in(b, a, tol) {
            pairs.push(RingPair::new(polygon, RingRef::Interior(i), RingRef::Interior(j)));
        }
        if ring_nested_in(a, b, tol) {
            pairs.push(RingPair::new(polygon, RingRef::Interior(j), RingRef::Interior(i)));
        }
    }

    RuleOutcome::from_evidence(
        rule,
        "Interior ring lies inside another interior ring",
        Evidence::RingPairs(pairs),
    )
}
