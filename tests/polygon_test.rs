use approx::assert_relative_eq;
use helisdf::polygon::{nagon, Polygon, PolygonBuilder};
use helisdf::primitives::segment_distance;
use helisdf::SdfError;
use nalgebra::Vector2;

fn square(side: f64) -> PolygonBuilder {
    let mut b = PolygonBuilder::new();
    b.add(0.0, 0.0);
    b.add(side, 0.0);
    b.add(side, side);
    b.add(0.0, side);
    b
}

#[test]
fn plain_vertices_pass_through() {
    let p = square(2.0).freeze().unwrap();
    assert_eq!(p.vertices().len(), 4);
    assert_eq!(p.vertices()[2], Vector2::new(2.0, 2.0));
    assert_relative_eq!(p.evaluate(Vector2::new(1.0, 1.0)), -1.0, epsilon = 1e-12);
}

#[test]
fn rounding_adds_facets_plus_one_points() {
    let mut r = PolygonBuilder::new();
    r.add(0.0, 0.0);
    r.add(4.0, 0.0).smooth(1.0, 8);
    r.add(4.0, 4.0);
    r.add(0.0, 4.0);
    let plain = square(4.0).freeze().unwrap();
    let rounded = r.freeze().unwrap();
    assert_eq!(rounded.vertices().len(), plain.vertices().len() - 1 + 9);
}

#[test]
fn right_angle_fillet_geometry() {
    let mut b = PolygonBuilder::new();
    b.add(0.0, 0.0);
    b.add(4.0, 0.0).smooth(1.0, 4);
    b.add(4.0, 4.0);
    b.add(0.0, 4.0);
    let p = b.freeze().unwrap();
    let arc = &p.vertices()[1..6];
    // tangent points lie on the adjacent edges, one radius from the corner
    assert_relative_eq!(arc[0], Vector2::new(3.0, 0.0), epsilon = 1e-12);
    assert_relative_eq!(arc[4], Vector2::new(4.0, 1.0), epsilon = 1e-12);
    // every arc point is one radius from the fillet center
    let center = Vector2::new(3.0, 1.0);
    for v in arc {
        assert_relative_eq!((v - center).norm(), 1.0, epsilon = 1e-12);
    }
    // the corner is cut away
    assert!(p.evaluate(Vector2::new(3.95, 0.05)) > 0.0);
}

#[test]
fn fillet_on_acute_corner_is_tangent() {
    let mut b = PolygonBuilder::new();
    b.add(0.0, 0.0).smooth(0.5, 6);
    b.add(10.0, 0.0);
    b.add(0.0, 5.0);
    let p = b.freeze().unwrap();
    let v = p.vertices();
    assert_eq!(v.len(), 7 + 2);
    // first and last arc points sit on the two edges through the corner
    let a = Vector2::new(0.0, 5.0);
    let c = Vector2::new(10.0, 0.0);
    let o = Vector2::zeros();
    assert!(segment_distance(v[0], o, a) < 1e-12);
    assert!(segment_distance(v[6], o, c) < 1e-12);
}

#[test]
fn oversize_radius_is_clamped_not_rejected() {
    let mut b = PolygonBuilder::new();
    b.add(0.0, 0.0);
    b.add(1.0, 0.0).smooth(10.0, 4);
    b.add(1.0, 1.0);
    b.add(0.0, 1.0);
    let p = b.freeze().unwrap();
    let arc = &p.vertices()[1..6];
    // tangent length limited to half the shorter edge
    assert_relative_eq!(arc[0], Vector2::new(0.5, 0.0), epsilon = 1e-12);
    assert_relative_eq!(arc[4], Vector2::new(1.0, 0.5), epsilon = 1e-12);
}

#[test]
fn collinear_vertex_passes_through() {
    let mut b = PolygonBuilder::new();
    b.add(0.0, 0.0);
    b.add(1.0, 0.0).smooth(0.2, 5);
    b.add(2.0, 0.0);
    b.add(1.0, 1.0);
    let p = b.freeze().unwrap();
    assert_eq!(p.vertices().len(), 4);
    assert_eq!(p.vertices()[1], Vector2::new(1.0, 0.0));
}

#[test]
fn zero_length_edge_vertex_passes_through() {
    let mut b = PolygonBuilder::new();
    b.add(0.0, 0.0);
    b.add(1.0, 0.0);
    b.add(1.0, 0.0).smooth(0.2, 5);
    b.add(1.0, 1.0);
    let p = b.freeze().unwrap();
    assert_eq!(p.vertices().len(), 4);
}

#[test]
fn freeze_rejects_bad_input() {
    let mut b = PolygonBuilder::new();
    b.add(0.0, 0.0);
    b.add(1.0, 0.0);
    assert_eq!(b.freeze().unwrap_err(), SdfError::TooFewVertices { min: 3, got: 2 });

    let mut b = square(1.0);
    b.add(f64::NAN, 0.0);
    assert!(matches!(b.freeze(), Err(SdfError::InvalidParameter { .. })));

    let mut b = square(1.0);
    b.add(0.5, -0.5).smooth(-1.0, 3);
    assert!(matches!(b.freeze(), Err(SdfError::InvalidParameter { .. })));

    let mut b = square(1.0);
    b.add(0.5, -0.5).smooth(0.1, 0);
    assert!(matches!(b.freeze(), Err(SdfError::InvalidParameter { .. })));
}

#[test]
fn polygon_new_checks_vertices() {
    assert!(Polygon::new(vec![Vector2::zeros(), Vector2::x()]).is_err());
    let p = Polygon::new(vec![Vector2::zeros(), Vector2::x(), Vector2::y()]).unwrap();
    assert_eq!(p.bounding_box().max, Vector2::new(1.0, 1.0));
}

#[test]
fn regular_nagon() {
    let hex = nagon(6, 2.0).unwrap();
    assert_eq!(hex.len(), 6);
    assert_relative_eq!(hex[0], Vector2::new(2.0, 0.0), epsilon = 1e-12);
    for v in &hex {
        assert_relative_eq!(v.norm(), 2.0, epsilon = 1e-12);
    }
    assert!(nagon(2, 1.0).is_err());
    assert!(nagon(5, 0.0).is_err());
}
