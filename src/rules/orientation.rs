use crate::geom::{Polygon, RingRef, winding};

use super::validator::ValidationOptions;
use super::{Evidence, ProjectedPolygon, RingPair, RuleId, RuleOutcome, failed};

/// `GE_P_ORIENTATION_RINGS_SAME`
///
/// Interior rings must wind opposite to the exterior ring. Windings are
/// compared in the exterior's frame so that the hole's orientation relative
/// to the exterior survives projection. Rings with no measurable area have
/// no winding and never match.
#[must_use]
pub fn check_orientation(polygon: &Polygon, options: &ValidationOptions) -> RuleOutcome {
    let rule = RuleId::OrientationRingsSame;
    let projected = match ProjectedPolygon::new(polygon) {
        Ok(projected) => projected,
        Err(err) => return failed(rule, err),
    };
    let tol = options.coincidence;

    let Some(exterior) = winding(&projected.exterior, tol) else {
        log::debug!("{rule}: exterior ring has no winding, skipping");
        return RuleOutcome::Pass;
    };

    let mut pairs = Vec::new();
    for (index, interior) in projected.interiors.iter().enumerate() {
        match winding(interior, tol) {
            Some(w) if w == exterior => {
                log::trace!("{rule}: interior ring {index} winds {w:?} like the exterior");
                pairs.push(RingPair::new(polygon, RingRef::Exterior, RingRef::Interior(index)));
            }
            Some(_) => {}
            None => log::debug!("{rule}: interior ring {index} has no winding"),
        }
    }

    RuleOutcome::from_evidence(
        rule,
        "Interior ring has the same orientation as the exterior ring",
        Evidence::RingPairs(pairs),
    )
}
