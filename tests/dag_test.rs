use approx::assert_relative_eq;
use helisdf::dag::{SdfNode, SdfNode2d};
use helisdf::{BBox3, Sdf};
use nalgebra::{Isometry2, Isometry3, Vector2, Vector3};
use std::sync::Arc;

fn sphere(r: f64) -> Arc<SdfNode> {
    Arc::new(SdfNode::Sphere { radius: r })
}

fn moved(inner: Arc<SdfNode>, x: f64, y: f64, z: f64) -> Arc<SdfNode> {
    let transform = Isometry3::translation(x, y, z);
    Arc::new(SdfNode::Transform { inner, transform, inverse: transform.inverse() })
}

#[test]
fn nodes_are_send_and_sync() {
    fn assert_send_sync<T: Send + Sync>() {}
    assert_send_sync::<SdfNode>();
    assert_send_sync::<SdfNode2d>();
}

#[test]
fn shared_subtree_evaluates_in_both_places() {
    let s = sphere(1.0);
    let pair = SdfNode::Union(s.clone(), moved(s.clone(), 3.0, 0.0, 0.0));
    assert_relative_eq!(pair.evaluate(Vector3::zeros()), -1.0);
    assert_relative_eq!(pair.evaluate(Vector3::new(3.0, 0.0, 0.0)), -1.0, epsilon = 1e-12);
    assert_eq!(Arc::strong_count(&s), 3);
}

#[test]
fn union_box_covers_both() {
    let u = SdfNode::Union(sphere(1.0), moved(sphere(1.0), 3.0, 0.0, 0.0));
    let bb = u.bounding_box();
    assert_relative_eq!(bb.min.x, -1.0);
    assert_relative_eq!(bb.max.x, 4.0, epsilon = 1e-12);
}

#[test]
fn intersection_box_is_overlap() {
    let i = SdfNode::Intersection(sphere(1.0), moved(sphere(1.0), 1.0, 0.0, 0.0));
    let bb = i.bounding_box();
    assert_relative_eq!(bb.min.x, 0.0, epsilon = 1e-12);
    assert_relative_eq!(bb.max.x, 1.0, epsilon = 1e-12);
}

#[test]
fn disjoint_intersection_box_is_degenerate() {
    let i = SdfNode::Intersection(sphere(1.0), moved(sphere(1.0), 5.0, 0.0, 0.0));
    let bb = i.bounding_box();
    assert!(bb.size().x <= 0.0);
    assert!(i.evaluate(Vector3::zeros()) > 0.0);
}

#[test]
fn difference_keeps_first_box() {
    let d = SdfNode::Difference(sphere(2.0), sphere(1.0));
    let bb = d.bounding_box();
    assert_eq!(bb, BBox3::new(Vector3::repeat(-2.0), Vector3::repeat(2.0)));
    assert_relative_eq!(d.evaluate(Vector3::zeros()), 1.0);
    assert_relative_eq!(d.evaluate(Vector3::new(1.5, 0.0, 0.0)), -0.5);
}

#[test]
fn smooth_union_box_grows_by_k() {
    let s = SdfNode::SmoothUnion(sphere(1.0), sphere(1.0), 0.25);
    assert_relative_eq!(s.bounding_box().max.x, 1.25);
}

#[test]
fn negative_offset_keeps_box() {
    let s = SdfNode::Offset(sphere(1.0), -0.5);
    assert_relative_eq!(s.bounding_box().max.x, 1.0);
    assert_relative_eq!(s.evaluate(Vector3::new(0.5, 0.0, 0.0)), 0.0);
}

#[test]
fn transform_box_encloses_rotated_corners() {
    let b = Arc::new(SdfNode::Box3 { half_extents: Vector3::new(1.0, 1.0, 1.0), round: 0.0 });
    let transform = Isometry3::rotation(Vector3::z() * std::f64::consts::FRAC_PI_4);
    let t = SdfNode::Transform { inner: b, transform, inverse: transform.inverse() };
    let bb = t.bounding_box();
    assert_relative_eq!(bb.max.x, 2f64.sqrt(), epsilon = 1e-12);
    assert_relative_eq!(bb.max.z, 1.0, epsilon = 1e-12);
    // nearest face is one unit out along the diagonal
    let expected = 1.4 * std::f64::consts::FRAC_1_SQRT_2 - 1.0;
    assert_relative_eq!(t.evaluate(Vector3::new(1.4, 0.0, 0.0)), expected, epsilon = 1e-9);
}

#[test]
fn profile_nodes() {
    let circle = Arc::new(SdfNode2d::Circle { radius: 1.0 });
    let rect = Arc::new(SdfNode2d::Rect { half_extents: Vector2::new(2.0, 0.5), round: 0.0 });
    let u = SdfNode2d::Union(circle.clone(), rect.clone());
    assert_relative_eq!(u.evaluate(Vector2::new(1.5, 0.0)), -0.5);
    assert_relative_eq!(u.bounding_box().max, Vector2::new(2.0, 1.0));
    let d = SdfNode2d::Difference(rect, circle.clone());
    assert!(d.evaluate(Vector2::zeros()) > 0.0);
    let o = SdfNode2d::Offset(circle.clone(), 1.0);
    assert_relative_eq!(o.evaluate(Vector2::new(2.0, 0.0)), 0.0);
    let transform = Isometry2::translation(5.0, 0.0);
    let t = SdfNode2d::Transform { inner: circle, transform, inverse: transform.inverse() };
    assert_relative_eq!(t.evaluate(Vector2::new(5.0, 0.0)), -1.0);
    assert_relative_eq!(t.bounding_box().min, Vector2::new(4.0, -1.0));
}

#[test]
fn extrude_and_revolve_nodes() {
    let rect = Arc::new(SdfNode2d::Rect { half_extents: Vector2::new(1.0, 2.0), round: 0.0 });
    let e = SdfNode::Extrude(rect.clone(), 0.5);
    assert_relative_eq!(e.evaluate(Vector3::new(0.0, 0.0, 1.0)), 0.5);
    assert_relative_eq!(e.bounding_box().max, Vector3::new(1.0, 2.0, 0.5));
    // a rect centered on the axis revolves into a cylinder
    let r = SdfNode::Revolve(rect);
    assert_relative_eq!(r.evaluate(Vector3::new(0.0, 1.5, 0.0)), 0.5);
    assert_relative_eq!(r.bounding_box().max, Vector3::new(1.0, 1.0, 2.0));
}

#[test]
fn trait_objects_dispatch() {
    let nodes: Vec<Box<dyn Sdf>> = vec![
        Box::new(SdfNode::Sphere { radius: 1.0 }),
        Box::new(SdfNode::Cylinder { radius: 1.0, half_height: 1.0, round: 0.0 }),
    ];
    for n in &nodes {
        assert!(n.evaluate(Vector3::zeros()) < 0.0);
    }
}
