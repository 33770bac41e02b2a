mod core;
mod error;
mod plane;
mod polygon2d;
mod projection;
mod ring;
mod topology;
mod triangulation;

pub use self::core::{Point3, Tolerance, Vec3};
pub use error::GeomError;
pub use plane::{Plane, PlaneFitStrategy, fit_plane, fit_plane_least_squares, newell_normal};
pub use polygon2d::{
    Winding, contains_point, orient2d, point_on_segment, rings_cross, rings_equal,
    segments_cross, signed_area, winding,
};
pub use projection::{Point2, ProjectionFrame, project};
pub use ring::{ExtractedRings, Polygon, Ring, RingRef};
pub use topology::{
    IntersectionStrategy, containment_flags, ring_nested_in, ring_outside, rings_intersect,
};
pub use triangulation::{
    EarClipTriangulator, Triangle, Triangulator, angle_between_degrees, triangle_normal,
};

#[cfg(test)]
mod tests;
