//! Ring triangulation used by the normal-deviation check.
//!
//! The check only depends on the [`Triangulator`] contract: a point loop in,
//! triangle index triples out, or an error. [`EarClipTriangulator`] is the
//! built-in implementation; hosts can plug in their own.

use super::core::{Point3, Tolerance, Vec3};
use super::error::GeomError;
use super::plane::fit_plane;
use super::polygon2d::orient2d;
use super::projection::{Point2, ProjectionFrame};

/// Index triple into the triangulated point slice.
pub type Triangle = [usize; 3];

/// Maps a closed point loop to triangles over its vertices.
pub trait Triangulator: Send + Sync {
    /// # Errors
    /// A human-readable reason when the loop cannot be triangulated.
    fn triangulate(&self, points: &[Point3]) -> Result<Vec<Triangle>, String>;
}

/// Ear clipping in the loop's own projection plane.
///
/// Output triangles are wound like the input loop, so their normals agree
/// with the loop normal for a planar loop.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct EarClipTriangulator {
    pub tol: Tolerance,
}

impl EarClipTriangulator {
    #[must_use]
    pub const fn new(tol: Tolerance) -> Self {
        Self { tol }
    }
}

impl Default for EarClipTriangulator {
    fn default() -> Self {
        Self::new(Tolerance::DEFAULT)
    }
}

impl Triangulator for EarClipTriangulator {
    fn triangulate(&self, points: &[Point3]) -> Result<Vec<Triangle>, String> {
        if points.len() < 3 {
            return Err(format!("loop has {} points, at least 3 required", points.len()));
        }
        if points.iter().any(|p| !p.is_finite()) {
            return Err("triangulation vertices must be finite".to_string());
        }

        let frame = ProjectionFrame::from_points(points).map_err(|e| e.to_string())?;
        let projected = frame.project_points(points);

        let mut nodes = build_ring_nodes(points, &projected);
        earclip_polygon(0, &mut nodes, self.tol)
    }
}

/// Unit normal of a triangle, wound `a → b → c`.
///
/// # Errors
/// `DegenerateNormal` for a zero-area triangle.
pub fn triangle_normal(a: Point3, b: Point3, c: Point3) -> Result<Vec3, GeomError> {
    fit_plane(a, b, c).map(|plane| plane.normal)
}

/// Angle between two unit vectors, in degrees.
#[must_use]
pub fn angle_between_degrees(a: Vec3, b: Vec3) -> f64 {
    a.dot(b).clamp(-1.0, 1.0).acos().to_degrees()
}

#[derive(Debug, Clone, Copy)]
struct Node {
    idx: usize,
    pos: Point3,
    point: Point2,
    prev: usize,
    next: usize,
}

fn build_ring_nodes(points: &[Point3], projected: &[Point2]) -> Vec<Node> {
    let len = points.len();
    points
        .iter()
        .zip(projected)
        .enumerate()
        .map(|(i, (pos, point))| Node {
            idx: i,
            pos: *pos,
            point: *point,
            prev: (i + len - 1) % len,
            next: (i + 1) % len,
        })
        .collect()
}

fn ring_len(start: usize, nodes: &[Node]) -> usize {
    let mut count = 0usize;
    let mut cur = start;
    loop {
        count += 1;
        cur = nodes[cur].next;
        if cur == start || count > nodes.len() {
            break;
        }
    }
    count
}

/// Unlink duplicate and collinear vertices. Both tests run on the 3D
/// positions, so a vertex that only projects onto its neighbours' edge
/// stays. Returns the new start node, or `None` when fewer than 3 vertices
/// survive.
fn filter_ring_points(start: usize, nodes: &mut [Node], tol: Tolerance) -> Option<usize> {
    if ring_len(start, nodes) < 3 {
        return None;
    }

    let mut start = start;
    let mut cur = start;
    let mut guard = 0usize;

    loop {
        guard += 1;
        if guard > nodes.len().saturating_mul(4).max(16) {
            break;
        }

        let prev = nodes[cur].prev;
        let next = nodes[cur].next;
        if cur == next || cur == prev || prev == next {
            break;
        }

        let p = nodes[prev].pos;
        let c = nodes[cur].pos;
        let n = nodes[next].pos;

        let dup = tol.approx_eq_point3(p, c) || tol.approx_eq_point3(c, n);
        let collinear = distance_point_to_line_3d(p, c, n) <= tol.eps;

        if dup || collinear {
            if cur == start {
                start = next;
            }
            remove_node(cur, nodes);
            cur = prev;
            if ring_len(start, nodes) < 3 {
                return None;
            }
        } else {
            cur = next;
        }

        if cur == start {
            break;
        }
    }

    Some(start)
}

fn earclip_polygon(
    start: usize,
    nodes: &mut [Node],
    tol: Tolerance,
) -> Result<Vec<Triangle>, String> {
    let mut start = filter_ring_points(start, nodes, tol)
        .ok_or_else(|| "polygon degenerates after filtering".to_string())?;

    let is_ccw = signed_area_ring(start, nodes) > 0.0;
    let mut remaining = ring_len(start, nodes);

    let mut ear = start;
    let mut stop = start;
    let mut triangles = Vec::with_capacity(remaining.saturating_sub(2));
    let mut passes_without_clip = 0usize;

    while remaining > 2 {
        let prev = nodes[ear].prev;
        let next = nodes[ear].next;
        // The last three vertices close the loop even when they project onto
        // one line; their 3D triangle still carries a normal.
        if remaining == 3 || is_ear(prev, ear, next, nodes, is_ccw, tol) {
            triangles.push([nodes[prev].idx, nodes[ear].idx, nodes[next].idx]);

            if ear == start {
                start = next;
            }
            remove_node(ear, nodes);
            remaining -= 1;
            ear = next;
            stop = next;
            passes_without_clip = 0;
            continue;
        }

        ear = next;
        if ear == stop {
            passes_without_clip += 1;
            if passes_without_clip > 2 {
                return Err("failed to triangulate polygon (no ears found)".to_string());
            }
            start = filter_ring_points(start, nodes, tol)
                .ok_or_else(|| "polygon degenerates during triangulation".to_string())?;
            remaining = ring_len(start, nodes);
            ear = start;
            stop = start;
        }
    }

    if triangles.is_empty() {
        return Err("triangulation produced no triangles".to_string());
    }
    Ok(triangles)
}

fn is_ear(
    prev: usize,
    ear: usize,
    next: usize,
    nodes: &[Node],
    is_ccw: bool,
    tol: Tolerance,
) -> bool {
    let a = nodes[prev].point;
    let b = nodes[ear].point;
    let c = nodes[next].point;

    if distance_point_to_line_2d(a, b, c) <= tol.eps {
        return false;
    }

    let cross = orient2d(a, b, c);
    if (is_ccw && cross <= 0.0) || (!is_ccw && cross >= 0.0) {
        return false;
    }

    let mut p = nodes[next].next;
    let mut guard = 0usize;
    while p != prev {
        guard += 1;
        if guard > nodes.len() {
            break;
        }
        let pt = nodes[p].point;
        if point_in_triangle(a, b, c, pt, is_ccw, tol) {
            let cross_p = orient2d(nodes[nodes[p].prev].point, pt, nodes[nodes[p].next].point);
            let is_reflex = if is_ccw {
                cross_p <= tol.eps
            } else {
                cross_p >= -tol.eps
            };
            if is_reflex {
                return false;
            }
        }
        p = nodes[p].next;
    }

    true
}

fn signed_area_ring(start: usize, nodes: &[Node]) -> f64 {
    let mut area = 0.0;
    let mut p = start;
    loop {
        let q = nodes[p].next;
        let a = nodes[p].point;
        let b = nodes[q].point;
        area += a.x * b.y - b.x * a.y;
        p = q;
        if p == start {
            break;
        }
    }
    0.5 * area
}

fn remove_node(node: usize, nodes: &mut [Node]) {
    let prev = nodes[node].prev;
    let next = nodes[node].next;
    nodes[prev].next = next;
    nodes[next].prev = prev;
}

fn point_in_triangle(
    a: Point2,
    b: Point2,
    c: Point2,
    p: Point2,
    is_ccw: bool,
    tol: Tolerance,
) -> bool {
    let ab = orient2d(a, b, p);
    let bc = orient2d(b, c, p);
    let ca = orient2d(c, a, p);

    if is_ccw {
        ab >= -tol.eps && bc >= -tol.eps && ca >= -tol.eps
    } else {
        ab <= tol.eps && bc <= tol.eps && ca <= tol.eps
    }
}

fn distance_point_to_line_2d(a: Point2, p: Point2, b: Point2) -> f64 {
    let ab_x = b.x - a.x;
    let ab_y = b.y - a.y;
    let denom2 = ab_x * ab_x + ab_y * ab_y;
    if !denom2.is_finite() || denom2 <= 0.0 {
        return p.distance_squared(a).sqrt();
    }

    orient2d(a, b, p).abs() / denom2.sqrt()
}

fn distance_point_to_line_3d(a: Point3, p: Point3, b: Point3) -> f64 {
    let ab = b - a;
    let ap = p - a;
    let denom2 = ab.length_squared();
    if !denom2.is_finite() || denom2 <= 0.0 {
        return ap.length();
    }

    ab.cross(ap).length() / denom2.sqrt()
}
