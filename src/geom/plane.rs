//! Plane fitting for ring planarity checks.

use serde::{Deserialize, Serialize};

use super::core::{Point3, Tolerance, Vec3};
use super::error::GeomError;
use super::ring::Ring;

/// Plane in Hessian normal form: `normal · p + offset = 0`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Plane {
    /// Unit normal.
    pub normal: Vec3,
    pub offset: f64,
}

impl Plane {
    /// Build a plane through `point` with the given normal.
    ///
    /// # Errors
    /// `DegenerateNormal` when `normal` has no direction.
    pub fn from_point_normal(point: Point3, normal: Vec3) -> Result<Self, GeomError> {
        if Tolerance::ZERO_LENGTH.is_zero_vec3(normal) {
            return Err(GeomError::DegenerateNormal);
        }
        let normal = normal.normalized().ok_or(GeomError::DegenerateNormal)?;
        Ok(Self {
            normal,
            offset: -normal.dot(point.to_vec3()),
        })
    }

    #[must_use]
    pub fn signed_distance(&self, p: Point3) -> f64 {
        self.normal.dot(p.to_vec3()) + self.offset
    }

    #[must_use]
    pub fn distance(&self, p: Point3) -> f64 {
        self.signed_distance(p).abs()
    }
}

/// Plane through three points.
///
/// The normal is `(p2 - p1) × (p3 - p1)` normalized, so it follows the
/// winding of the three points.
///
/// # Errors
/// `DegenerateNormal` when the points are collinear or coincident.
pub fn fit_plane(p1: Point3, p2: Point3, p3: Point3) -> Result<Plane, GeomError> {
    let normal = (p2 - p1).cross(p3 - p1);
    Plane::from_point_normal(p1, normal)
}

/// Least-squares plane through all points.
///
/// The plane passes through the centroid; its normal is the direction of
/// least variance, oriented to agree with the loop's Newell normal.
///
/// # Errors
/// `DegenerateNormal` for fewer than 3 points or collinear input.
pub fn fit_plane_least_squares(points: &[Point3]) -> Result<Plane, GeomError> {
    if points.len() < 3 {
        return Err(GeomError::DegenerateNormal);
    }

    let centroid = centroid(points);
    let (mut xx, mut xy, mut xz, mut yy, mut yz, mut zz) = (0.0, 0.0, 0.0, 0.0, 0.0, 0.0);
    for p in points {
        let r = p.sub_point(centroid);
        xx += r.x * r.x;
        xy += r.x * r.y;
        xz += r.x * r.z;
        yy += r.y * r.y;
        yz += r.y * r.z;
        zz += r.z * r.z;
    }

    // Each determinant solves for the normal with one component pinned to 1;
    // the largest one is the best conditioned.
    let det_x = yy * zz - yz * yz;
    let det_y = xx * zz - xz * xz;
    let det_z = xx * yy - xy * xy;

    let det_max = det_x.max(det_y).max(det_z);
    if !det_max.is_finite() || det_max <= Tolerance::ZERO_LENGTH.eps_squared() {
        return Err(GeomError::DegenerateNormal);
    }

    let mut normal = if det_max == det_x {
        Vec3::new(det_x, xz * yz - xy * zz, xy * yz - xz * yy)
    } else if det_max == det_y {
        Vec3::new(xz * yz - xy * zz, det_y, xy * xz - yz * xx)
    } else {
        Vec3::new(xy * yz - xz * yy, xy * xz - yz * xx, det_z)
    };

    if normal.dot(newell_normal(points)) < 0.0 {
        normal = -normal;
    }

    Plane::from_point_normal(centroid, normal)
}

/// How the distance-to-plane rule derives its reference plane.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PlaneFitStrategy {
    /// Plane through the first three ring points.
    #[default]
    FirstThreePoints,
    /// Least-squares plane over every ring point.
    LeastSquares,
}

impl PlaneFitStrategy {
    /// # Errors
    /// `DegenerateNormal` when the selected points do not span a plane.
    pub fn fit(self, ring: &Ring) -> Result<Plane, GeomError> {
        match self {
            Self::FirstThreePoints => match ring.points() {
                [p1, p2, p3, ..] => fit_plane(*p1, *p2, *p3),
                _ => Err(GeomError::DegenerateNormal),
            },
            Self::LeastSquares => fit_plane_least_squares(ring.points()),
        }
    }
}

/// Newell's area-weighted loop normal. Its length is twice the loop area.
#[must_use]
pub fn newell_normal(points: &[Point3]) -> Vec3 {
    if points.len() < 3 {
        return Vec3::ZERO;
    }

    let mut n = Vec3::ZERO;
    for i in 0..points.len() {
        let a = points[i];
        let b = points[(i + 1) % points.len()];
        n.x += (a.y - b.y) * (a.z + b.z);
        n.y += (a.z - b.z) * (a.x + b.x);
        n.z += (a.x - b.x) * (a.y + b.y);
    }
    n
}

fn centroid(points: &[Point3]) -> Point3 {
    if points.is_empty() {
        return Point3::ORIGIN;
    }

    let (mut sx, mut sy, mut sz) = (0.0, 0.0, 0.0);
    for p in points {
        sx += p.x;
        sy += p.y;
        sz += p.z;
    }
    let inv = 1.0 / points.len() as f64;
    Point3::new(sx * inv, sy * inv, sz * inv)
}
