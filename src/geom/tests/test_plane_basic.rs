use crate::geom::{
    GeomError, Point3, PlaneFitStrategy, Ring, Vec3, fit_plane, fit_plane_least_squares,
};

#[test]
fn fit_plane_returns_unit_normal_through_inputs() {
    let p1 = Point3::new(1.0, 2.0, 3.0);
    let p2 = Point3::new(4.0, -1.0, 2.5);
    let p3 = Point3::new(-2.0, 0.5, 7.0);
    let plane = fit_plane(p1, p2, p3).unwrap();

    assert!((plane.normal.length() - 1.0).abs() <= 1e-9);
    for p in [p1, p2, p3] {
        assert!(plane.distance(p) <= 1e-9, "distance {}", plane.distance(p));
    }
}

#[test]
fn fit_plane_normal_follows_point_order() {
    let a = Point3::new(0.0, 0.0, 0.0);
    let b = Point3::new(1.0, 0.0, 0.0);
    let c = Point3::new(0.0, 1.0, 0.0);

    assert_eq!(fit_plane(a, b, c).unwrap().normal, Vec3::Z);
    assert_eq!(fit_plane(a, c, b).unwrap().normal, -Vec3::Z);
}

#[test]
fn fit_plane_rejects_collinear_points() {
    let err = fit_plane(
        Point3::new(0.0, 0.0, 0.0),
        Point3::new(1.0, 1.0, 1.0),
        Point3::new(2.0, 2.0, 2.0),
    )
    .unwrap_err();
    assert_eq!(err, GeomError::DegenerateNormal);

    let p = Point3::new(5.0, 5.0, 5.0);
    assert_eq!(fit_plane(p, p, p).unwrap_err(), GeomError::DegenerateNormal);
}

#[test]
fn signed_distance_is_positive_on_normal_side() {
    let plane = fit_plane(
        Point3::new(0.0, 0.0, 0.0),
        Point3::new(1.0, 0.0, 0.0),
        Point3::new(0.0, 1.0, 0.0),
    )
    .unwrap();
    assert!((plane.signed_distance(Point3::new(3.0, 3.0, 0.25)) - 0.25).abs() < 1e-12);
    assert!((plane.signed_distance(Point3::new(3.0, 3.0, -0.5)) + 0.5).abs() < 1e-12);
}

#[test]
fn least_squares_plane_averages_out_noise() {
    let points = vec![
        Point3::new(0.0, 0.0, 0.001),
        Point3::new(10.0, 0.0, -0.001),
        Point3::new(10.0, 10.0, 0.001),
        Point3::new(0.0, 10.0, -0.001),
    ];
    let plane = fit_plane_least_squares(&points).unwrap();

    assert!((plane.normal.z - 1.0).abs() < 1e-6);
    for p in &points {
        assert!(plane.distance(*p) <= 0.0011);
    }
}

#[test]
fn least_squares_plane_follows_ring_winding() {
    let ccw = vec![
        Point3::new(0.0, 0.0, 2.0),
        Point3::new(1.0, 0.0, 2.0),
        Point3::new(1.0, 1.0, 2.0),
        Point3::new(0.0, 1.0, 2.0),
    ];
    let mut cw = ccw.clone();
    cw.reverse();

    let up = fit_plane_least_squares(&ccw).unwrap();
    let down = fit_plane_least_squares(&cw).unwrap();
    assert!((up.normal.z - 1.0).abs() < 1e-12);
    assert!((down.normal.z + 1.0).abs() < 1e-12);
    assert!((up.offset + 2.0).abs() < 1e-12);
}

#[test]
fn least_squares_plane_rejects_collinear_points() {
    let points: Vec<Point3> = (0..5).map(|i| Point3::new(f64::from(i), 0.0, 0.0)).collect();
    assert_eq!(
        fit_plane_least_squares(&points).unwrap_err(),
        GeomError::DegenerateNormal
    );
}

#[test]
fn plane_fit_strategies_agree_on_flat_ring() {
    let ring = Ring::new(vec![
        Point3::new(0.0, 0.0, 0.0),
        Point3::new(2.0, 0.0, 1.0),
        Point3::new(2.0, 2.0, 1.0),
        Point3::new(0.0, 2.0, 0.0),
    ])
    .unwrap();

    let first = PlaneFitStrategy::FirstThreePoints.fit(&ring).unwrap();
    let least = PlaneFitStrategy::LeastSquares.fit(&ring).unwrap();
    assert!((first.normal.dot(least.normal) - 1.0).abs() < 1e-9);
    for p in ring.points() {
        assert!(first.distance(*p) < 1e-9);
        assert!(least.distance(*p) < 1e-9);
    }
}
