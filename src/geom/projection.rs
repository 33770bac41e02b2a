//! 3D to 2D projection of rings into a shared planar frame.
//!
//! Rings that are compared with each other (containment, intersection,
//! winding) must be projected with the same [`ProjectionFrame`]. The frame
//! is derived once from a reference ring and then passed explicitly into
//! every further projection.

use super::core::{Point3, Tolerance, Vec3};
use super::error::GeomError;
use super::plane::newell_normal;
use super::ring::Ring;

/// A point in a projection frame's 2D coordinate system.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Point2 {
    pub x: f64,
    pub y: f64,
}

impl Point2 {
    #[must_use]
    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    #[must_use]
    pub fn distance_squared(&self, other: Point2) -> f64 {
        let dx = self.x - other.x;
        let dy = self.y - other.y;
        dx * dx + dy * dy
    }
}

/// Origin plus an orthonormal in-plane basis.
///
/// `u_axis × v_axis == normal`, so a loop that runs counter-clockwise when
/// seen from the tip of `normal` projects to a counter-clockwise 2D loop.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ProjectionFrame {
    pub origin: Point3,
    pub u_axis: Vec3,
    pub v_axis: Vec3,
    pub normal: Vec3,
}

impl ProjectionFrame {
    /// Derive a frame from a ring's own orientation.
    ///
    /// The normal is the ring's Newell normal; when that vanishes (for
    /// example a self-overlapping loop) the first non-collinear point triple
    /// is used instead.
    ///
    /// # Errors
    /// `DegenerateRing` when the ring has no three non-collinear points.
    pub fn from_ring(ring: &Ring) -> Result<Self, GeomError> {
        Self::from_points(ring.points())
    }

    /// Same as [`ProjectionFrame::from_ring`] for a bare point loop.
    ///
    /// # Errors
    /// `DegenerateRing` when the loop has no three non-collinear points.
    pub fn from_points(points: &[Point3]) -> Result<Self, GeomError> {
        let origin = *points.first().ok_or(GeomError::DegenerateRing)?;
        let scale = extent(points);
        if scale <= 0.0 {
            return Err(GeomError::DegenerateRing);
        }
        let min_len = Tolerance::ZERO_LENGTH.eps * scale * scale;

        let newell = newell_normal(points);
        let normal = if newell.length() > min_len {
            newell
        } else {
            first_triple_normal(points, min_len).ok_or(GeomError::DegenerateRing)?
        };

        Self::from_origin_normal(origin, normal)
    }

    /// # Errors
    /// `DegenerateRing` when `normal` has no direction.
    pub fn from_origin_normal(origin: Point3, normal: Vec3) -> Result<Self, GeomError> {
        let normal = normal.normalized().ok_or(GeomError::DegenerateRing)?;
        let axis = if normal.x.abs() < 0.9 { Vec3::X } else { Vec3::Y };
        let u_axis = normal
            .cross(axis)
            .normalized()
            .ok_or(GeomError::DegenerateRing)?;
        let v_axis = normal.cross(u_axis);
        Ok(Self {
            origin,
            u_axis,
            v_axis,
            normal,
        })
    }

    #[must_use]
    pub fn project_point(&self, p: Point3) -> Point2 {
        let d = p.sub_point(self.origin);
        Point2::new(d.dot(self.u_axis), d.dot(self.v_axis))
    }

    #[must_use]
    pub fn project_points(&self, points: &[Point3]) -> Vec<Point2> {
        points.iter().map(|p| self.project_point(*p)).collect()
    }

    /// Map a frame point back onto the frame plane in 3D.
    #[must_use]
    pub fn lift(&self, p: Point2) -> Point3 {
        self.origin
            .add_vec(self.u_axis.mul_scalar(p.x) + self.v_axis.mul_scalar(p.y))
    }
}

/// Project a ring into `frame`, or into a frame derived from the ring itself
/// when none is given. The frame used is returned for reuse.
///
/// # Errors
/// `DegenerateRing` when no frame is supplied and none can be derived.
pub fn project(
    ring: &Ring,
    frame: Option<&ProjectionFrame>,
) -> Result<(Vec<Point2>, ProjectionFrame), GeomError> {
    let frame = match frame {
        Some(frame) => *frame,
        None => ProjectionFrame::from_ring(ring)?,
    };
    Ok((frame.project_points(ring.points()), frame))
}

fn extent(points: &[Point3]) -> f64 {
    let Some(first) = points.first() else {
        return 0.0;
    };
    points
        .iter()
        .map(|p| p.distance_to(*first))
        .fold(0.0, f64::max)
}

fn first_triple_normal(points: &[Point3], min_len: f64) -> Option<Vec3> {
    let origin = *points.first()?;
    for i in 1..points.len() {
        let a = points[i] - origin;
        for p in &points[i + 1..] {
            let n = a.cross(*p - origin);
            if n.length() > min_len {
                return Some(n);
            }
        }
    }
    None
}
