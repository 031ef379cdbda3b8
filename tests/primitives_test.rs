use approx::assert_relative_eq;
use helisdf::primitives::*;
use nalgebra::{Vector2, Vector3};

#[test]
fn sphere_distance() {
    assert_relative_eq!(sdf_sphere(Vector3::zeros(), 2.0), -2.0);
    assert_relative_eq!(sdf_sphere(Vector3::new(0.0, 3.0, 0.0), 2.0), 1.0);
}

#[test]
fn box_faces_and_corners() {
    let h = Vector3::new(1.0, 2.0, 3.0);
    assert_relative_eq!(sdf_box(Vector3::new(1.0, 0.0, 0.0), h, 0.0), 0.0);
    assert_relative_eq!(sdf_box(Vector3::zeros(), h, 0.0), -1.0);
    assert_relative_eq!(sdf_box(Vector3::new(2.0, 3.0, 3.0), h, 0.0), 2f64.sqrt(), epsilon = 1e-12);
}

#[test]
fn rounded_box_keeps_outer_faces() {
    let h = Vector3::new(1.0, 1.0, 1.0);
    assert_relative_eq!(sdf_box(Vector3::new(1.0, 0.0, 0.0), h, 0.25), 0.0, epsilon = 1e-12);
    assert!(sdf_box(Vector3::new(1.0, 1.0, 1.0), h, 0.25) > 0.0);
}

#[test]
fn cylinder_side_and_caps() {
    assert_relative_eq!(sdf_cylinder(Vector3::new(3.0, 0.0, 0.0), 2.0, 1.0, 0.0), 1.0);
    assert_relative_eq!(sdf_cylinder(Vector3::new(0.0, 0.0, 1.5), 2.0, 1.0, 0.0), 0.5);
    assert_relative_eq!(sdf_cylinder(Vector3::zeros(), 2.0, 1.0, 0.0), -1.0);
    // radial symmetry
    let a = sdf_cylinder(Vector3::new(1.2, 0.0, 0.3), 2.0, 1.0, 0.2);
    let b = sdf_cylinder(Vector3::new(0.0, -1.2, 0.3), 2.0, 1.0, 0.2);
    assert_relative_eq!(a, b, epsilon = 1e-12);
}

#[test]
fn cone_radii_at_ends() {
    // r0 = 2 at the bottom, r1 = 1 at the top
    let bottom = sdf_cone(Vector3::new(2.0, 0.0, -1.0), 1.0, 2.0, 1.0, 0.0);
    let top = sdf_cone(Vector3::new(1.0, 0.0, 1.0), 1.0, 2.0, 1.0, 0.0);
    assert_relative_eq!(bottom, 0.0, epsilon = 1e-9);
    assert_relative_eq!(top, 0.0, epsilon = 1e-9);
    assert!(sdf_cone(Vector3::new(1.8, 0.0, 0.9), 1.0, 2.0, 1.0, 0.0) > 0.0);
    assert!(sdf_cone(Vector3::zeros(), 1.0, 2.0, 1.0, 0.0) < 0.0);
}

#[test]
fn pointed_cone_is_finite() {
    let d = sdf_cone(Vector3::new(0.0, 0.0, 2.0), 1.0, 1.0, 0.0, 0.0);
    assert_relative_eq!(d, 1.0, epsilon = 1e-9);
}

#[test]
fn rounded_cone_keeps_height_and_box() {
    let bottom = sdf_cone(Vector3::new(0.0, 0.0, -1.0), 1.0, 2.0, 1.0, 0.2);
    let top = sdf_cone(Vector3::new(0.0, 0.0, 1.0), 1.0, 2.0, 1.0, 0.2);
    assert_relative_eq!(bottom, 0.0, epsilon = 1e-9);
    assert_relative_eq!(top, 0.0, epsilon = 1e-9);
    for i in 0..36 {
        let a = i as f64 * 10f64.to_radians();
        let p = Vector3::new(2.01 * a.cos(), 2.01 * a.sin(), 0.1 * (i % 7) as f64 - 0.3);
        assert!(sdf_cone(p, 1.0, 2.0, 1.0, 0.2) > 0.0);
    }
}

#[test]
fn rounded_cone_only_removes_material() {
    // (half_height, r0, r1, round)
    let cones = [
        (1.0, 1.0, 0.0, 0.2),
        (1.0, 2.0, 1.0, 0.2),
        (1.0, 1.0, 0.1, 0.3),
        (0.5, 0.4, 1.5, 0.25),
    ];
    for (h, r0, r1, round) in cones {
        for i in -12..=12 {
            for k in -12..=12 {
                let p = Vector3::new(0.2 * i as f64, 0.05, 0.1 * k as f64);
                let sharp = sdf_cone(p, h, r0, r1, 0.0);
                let rounded = sdf_cone(p, h, r0, r1, round);
                assert!(rounded >= sharp - 1e-9, "{p:?}: sharp {sharp} rounded {rounded}");
            }
        }
    }
}

#[test]
fn rounded_cone_keeps_mid_slant() {
    // (0.5, 0, 0) lies halfway up the slant of a unit cone of height 2
    let sharp = sdf_cone(Vector3::new(0.5, 0.0, 0.0), 1.0, 1.0, 0.0, 0.0);
    let rounded = sdf_cone(Vector3::new(0.5, 0.0, 0.0), 1.0, 1.0, 0.0, 0.2);
    assert_relative_eq!(sharp, 0.0, epsilon = 1e-9);
    assert_relative_eq!(rounded, 0.0, epsilon = 1e-9);
}

#[test]
fn rounded_cone_core_trims_at_axis() {
    let (z0, z1, c0, c1) = rounded_cone_core(1.0, 1.0, 0.0, 0.2).unwrap();
    assert_relative_eq!(z0, -0.8, epsilon = 1e-12);
    assert!(z1 < 0.8);
    assert!(c0 > 0.0);
    assert_eq!(c1, 0.0);
    assert!(rounded_cone_core(1.0, 1.0, 0.1, 0.9).is_none());
}

#[test]
fn circle_and_rect() {
    assert_relative_eq!(sdf_circle(Vector2::new(3.0, 4.0), 1.0), 4.0);
    assert_relative_eq!(sdf_rect(Vector2::new(0.0, 0.0), Vector2::new(2.0, 1.0)), -1.0);
    assert_relative_eq!(sdf_rect(Vector2::new(3.0, 0.0), Vector2::new(2.0, 1.0)), 1.0);
}

#[test]
fn polygon_unit_square() {
    let sq = [
        Vector2::new(0.0, 0.0),
        Vector2::new(1.0, 0.0),
        Vector2::new(1.0, 1.0),
        Vector2::new(0.0, 1.0),
    ];
    assert_relative_eq!(sdf_polygon(Vector2::new(0.5, 0.5), &sq), -0.5, epsilon = 1e-12);
    assert_relative_eq!(sdf_polygon(Vector2::new(2.0, 0.5), &sq), 1.0, epsilon = 1e-12);
    assert_relative_eq!(sdf_polygon(Vector2::new(1.0, 0.3), &sq), 0.0, epsilon = 1e-12);
}

#[test]
fn polygon_sign_ignores_winding() {
    let ccw = [Vector2::new(0.0, 0.0), Vector2::new(2.0, 0.0), Vector2::new(0.0, 2.0)];
    let cw = [ccw[2], ccw[1], ccw[0]];
    let p = Vector2::new(0.4, 0.4);
    assert_relative_eq!(sdf_polygon(p, &ccw), sdf_polygon(p, &cw), epsilon = 1e-12);
    assert!(sdf_polygon(p, &ccw) < 0.0);
}

#[test]
fn polygon_with_duplicate_vertices_is_finite() {
    let v = [
        Vector2::new(0.0, 0.0),
        Vector2::new(1.0, 0.0),
        Vector2::new(1.0, 0.0),
        Vector2::new(1.0, 1.0),
        Vector2::new(0.0, 1.0),
    ];
    for p in [Vector2::new(0.5, 0.5), Vector2::new(1.0, 0.0), Vector2::new(3.0, -2.0)] {
        assert!(sdf_polygon(p, &v).is_finite());
    }
    assert_relative_eq!(sdf_polygon(Vector2::new(0.5, 0.5), &v), -0.5, epsilon = 1e-12);
}

#[test]
fn self_intersecting_polygon_is_finite() {
    let bowtie = [
        Vector2::new(0.0, 0.0),
        Vector2::new(1.0, 1.0),
        Vector2::new(1.0, 0.0),
        Vector2::new(0.0, 1.0),
    ];
    for i in 0..10 {
        let p = Vector2::new(0.1 * i as f64, 0.37);
        assert!(sdf_polygon(p, &bowtie).is_finite());
    }
}
