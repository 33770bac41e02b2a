//! Planar polygon primitives over projected rings.
//!
//! All functions take loops of [`Point2`] that share one projection frame.
//! Loops are implicitly closed.

use serde::Serialize;

use super::core::Tolerance;
use super::projection::Point2;

/// Traversal direction of a 2D loop.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Winding {
    Clockwise,
    CounterClockwise,
}

#[must_use]
pub fn orient2d(a: Point2, b: Point2, c: Point2) -> f64 {
    (b.x - a.x) * (c.y - a.y) - (b.y - a.y) * (c.x - a.x)
}

/// Shoelace area; positive for counter-clockwise loops.
#[must_use]
pub fn signed_area(points: &[Point2]) -> f64 {
    if points.len() < 3 {
        return 0.0;
    }

    let mut area = 0.0;
    for i in 0..points.len() {
        let a = points[i];
        let b = points[(i + 1) % points.len()];
        area += a.x * b.y - b.x * a.y;
    }
    0.5 * area
}

/// Winding from the sign of the signed area, `None` for a zero-area loop.
#[must_use]
pub fn winding(points: &[Point2], tol: Tolerance) -> Option<Winding> {
    let area = signed_area(points);
    if area > tol.eps_squared() {
        Some(Winding::CounterClockwise)
    } else if area < -tol.eps_squared() {
        Some(Winding::Clockwise)
    } else {
        None
    }
}

#[must_use]
pub fn point_on_segment(p: Point2, a: Point2, b: Point2, tol: Tolerance) -> bool {
    let ab_x = b.x - a.x;
    let ab_y = b.y - a.y;
    let ap_x = p.x - a.x;
    let ap_y = p.y - a.y;

    let ab_len2 = ab_x * ab_x + ab_y * ab_y;
    if ab_len2 <= tol.eps_squared() {
        return p.distance_squared(a) <= tol.eps_squared();
    }

    // Distance from the supporting line, not the raw cross product, so the
    // tolerance stays in length units.
    let cross = ab_x * ap_y - ab_y * ap_x;
    if cross.abs() > tol.eps * ab_len2.sqrt() {
        return false;
    }

    let dot = ap_x * ab_x + ap_y * ab_y;
    dot >= -tol.eps * ab_len2.sqrt() && dot <= ab_len2 + tol.eps * ab_len2.sqrt()
}

/// Point-in-polygon by ray casting.
///
/// Boundary-inclusive: a point within `tol` of any edge counts as contained.
#[must_use]
pub fn contains_point(polygon: &[Point2], p: Point2, tol: Tolerance) -> bool {
    if polygon.len() < 3 {
        return false;
    }

    let n = polygon.len();
    if (0..n).any(|i| point_on_segment(p, polygon[i], polygon[(i + 1) % n], tol)) {
        return true;
    }

    let mut inside = false;
    for i in 0..n {
        let a = polygon[i];
        let b = polygon[(i + 1) % n];

        if (a.y > p.y) == (b.y > p.y) {
            continue;
        }

        let t = (p.y - a.y) / (b.y - a.y);
        let x = a.x + t * (b.x - a.x);
        if p.x < x {
            inside = !inside;
        }
    }

    inside
}

/// Geometric equality of two loops.
///
/// Loops are equal when they visit the same vertices (within `tol`) in the
/// same cyclic order, regardless of start vertex or direction.
#[must_use]
pub fn rings_equal(a: &[Point2], b: &[Point2], tol: Tolerance) -> bool {
    let n = a.len();
    if n != b.len() || n == 0 {
        return false;
    }

    let eq = |p: Point2, q: Point2| p.distance_squared(q) <= tol.eps_squared();

    (0..n).filter(|&k| eq(a[0], b[k])).any(|k| {
        let forward = (0..n).all(|i| eq(a[i], b[(k + i) % n]));
        forward || (0..n).all(|i| eq(a[i], b[(k + n - i) % n]))
    })
}

/// Proper crossing of segments `ab` and `cd`.
///
/// Touching at an endpoint or running along each other does not count.
#[must_use]
pub fn segments_cross(a: Point2, b: Point2, c: Point2, d: Point2, tol: Tolerance) -> bool {
    let o1 = orient2d(a, b, c);
    let o2 = orient2d(a, b, d);
    let o3 = orient2d(c, d, a);
    let o4 = orient2d(c, d, b);

    let eps = tol.eps_squared();
    let ab = (o1 > eps && o2 < -eps) || (o1 < -eps && o2 > eps);
    let cd = (o3 > eps && o4 < -eps) || (o3 < -eps && o4 > eps);
    ab && cd
}

/// Whether any edge of `a` properly crosses any edge of `b`.
#[must_use]
pub fn rings_cross(a: &[Point2], b: &[Point2], tol: Tolerance) -> bool {
    if a.len() < 2 || b.len() < 2 {
        return false;
    }

    for i in 0..a.len() {
        let a0 = a[i];
        let a1 = a[(i + 1) % a.len()];
        for j in 0..b.len() {
            let b0 = b[j];
            let b1 = b[(j + 1) % b.len()];
            if segments_cross(a0, a1, b0, b1, tol) {
                return true;
            }
        }
    }

    false
}

#[cfg(test)]
mod tests {
    use super::*;

    fn square(min: f64, max: f64) -> Vec<Point2> {
        vec![
            Point2::new(min, min),
            Point2::new(max, min),
            Point2::new(max, max),
            Point2::new(min, max),
        ]
    }

    #[test]
    fn signed_area_sign_follows_winding() {
        let ccw = square(0.0, 2.0);
        assert!((signed_area(&ccw) - 4.0).abs() < 1e-12);

        let mut cw = ccw.clone();
        cw.reverse();
        assert!((signed_area(&cw) + 4.0).abs() < 1e-12);

        let tol = Tolerance::DEFAULT;
        assert_eq!(winding(&ccw, tol), Some(Winding::CounterClockwise));
        assert_eq!(winding(&cw, tol), Some(Winding::Clockwise));
    }

    #[test]
    fn winding_of_flat_loop_is_none() {
        let flat = vec![
            Point2::new(0.0, 0.0),
            Point2::new(1.0, 0.0),
            Point2::new(2.0, 0.0),
        ];
        assert_eq!(winding(&flat, Tolerance::DEFAULT), None);
    }

    #[test]
    fn contains_point_interior_exterior_and_boundary() {
        let tol = Tolerance::DEFAULT;
        let poly = square(0.0, 2.0);
        assert!(contains_point(&poly, Point2::new(1.0, 1.0), tol));
        assert!(!contains_point(&poly, Point2::new(3.0, 1.0), tol));
        assert!(contains_point(&poly, Point2::new(2.0, 1.0), tol));
        assert!(contains_point(&poly, Point2::new(0.0, 0.0), tol));
        assert!(!contains_point(&poly, Point2::new(2.0 + 1e-6, 1.0), tol));
    }

    #[test]
    fn contains_point_concave() {
        let tol = Tolerance::DEFAULT;
        // U shape opening upwards.
        let poly = vec![
            Point2::new(0.0, 0.0),
            Point2::new(3.0, 0.0),
            Point2::new(3.0, 3.0),
            Point2::new(2.0, 3.0),
            Point2::new(2.0, 1.0),
            Point2::new(1.0, 1.0),
            Point2::new(1.0, 3.0),
            Point2::new(0.0, 3.0),
        ];
        assert!(contains_point(&poly, Point2::new(0.5, 2.0), tol));
        assert!(!contains_point(&poly, Point2::new(1.5, 2.0), tol));
        assert!(contains_point(&poly, Point2::new(1.5, 0.5), tol));
    }

    #[test]
    fn rings_equal_ignores_start_and_direction() {
        let tol = Tolerance::DEFAULT;
        let a = square(0.0, 1.0);
        let mut shifted = a.clone();
        shifted.rotate_left(2);
        let mut reversed = a.clone();
        reversed.reverse();

        assert!(rings_equal(&a, &shifted, tol));
        assert!(rings_equal(&a, &reversed, tol));
        assert!(!rings_equal(&a, &square(0.0, 1.5), tol));
        assert!(!rings_equal(&a, &a[..3], tol));
    }

    #[test]
    fn segments_cross_excludes_touching() {
        let tol = Tolerance::DEFAULT;
        let a = Point2::new(0.0, 0.0);
        let b = Point2::new(2.0, 2.0);
        assert!(segments_cross(a, b, Point2::new(0.0, 2.0), Point2::new(2.0, 0.0), tol));
        assert!(!segments_cross(a, b, Point2::new(2.0, 2.0), Point2::new(3.0, 0.0), tol));
        assert!(!segments_cross(a, b, Point2::new(1.0, 1.0), Point2::new(3.0, 3.0), tol));
    }

    #[test]
    fn rings_cross_detects_overlapping_squares() {
        let tol = Tolerance::DEFAULT;
        assert!(rings_cross(&square(0.0, 2.0), &square(1.0, 3.0), tol));
        assert!(!rings_cross(&square(0.0, 4.0), &square(1.0, 2.0), tol));
    }
}
