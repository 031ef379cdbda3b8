//! Closed-form signed distance functions.
//!
//! Every function works in the primitive's local frame: shapes are centered
//! on the origin and solids of revolution use +Z as their axis. Placement is
//! the job of the transform operators.

use nalgebra::{Vector2, Vector3};
use crate::math::cross2;

/// Signed distance to a sphere of `radius` centered at the origin.
pub fn sdf_sphere(point: Vector3<f64>, radius: f64) -> f64 {
    point.norm() - radius
}

/// Signed distance to a 2D rectangle with the given half extents.
pub fn sdf_rect(point: Vector2<f64>, half_extents: Vector2<f64>) -> f64 {
    let d = point.abs() - half_extents;
    let outside = Vector2::new(d.x.max(0.0), d.y.max(0.0)).norm();
    let inside = d.x.max(d.y).min(0.0);
    outside + inside
}

/// 2D rectangle with rounded corners. `half_extents` is the outer size; the
/// corners are rounded inward by `round`.
pub fn sdf_rounded_rect(point: Vector2<f64>, half_extents: Vector2<f64>, round: f64) -> f64 {
    sdf_rect(point, half_extents - Vector2::repeat(round)) - round
}

/// Signed distance to a box with rounded edges. `half_extents` is the outer
/// half size, so the box never grows with `round`.
pub fn sdf_box(point: Vector3<f64>, half_extents: Vector3<f64>, round: f64) -> f64 {
    let d = point.abs() - (half_extents - Vector3::repeat(round));
    let outside = Vector3::new(d.x.max(0.0), d.y.max(0.0), d.z.max(0.0)).norm();
    let inside = d.x.max(d.y).max(d.z).min(0.0);
    outside + inside - round
}

/// Signed distance to a 2D circle centered at the origin.
pub fn sdf_circle(point: Vector2<f64>, radius: f64) -> f64 {
    point.norm() - radius
}

/// Z-aligned cylinder with rounded rims.
///
/// Combines the radial distance `|xy| - radius` and the axial distance
/// `|z| - half_height` as a rounded 2D box in the `(|xy|, z)` plane.
pub fn sdf_cylinder(point: Vector3<f64>, radius: f64, half_height: f64, round: f64) -> f64 {
    let q = Vector2::new(point.xy().norm(), point.z);
    sdf_rounded_rect(q, Vector2::new(radius, half_height), round)
}

/// Exact signed distance to a capped cone (or truncated cone).
///
/// Connects a disc at `a` with radius `ra` to a disc at `b` with radius
/// `rb`. Set either radius to zero for a pointed cone.
pub fn sdf_capped_cone(
    point: Vector3<f64>,
    a: Vector3<f64>,
    b: Vector3<f64>,
    ra: f64,
    rb: f64,
) -> f64 {
    let rba = rb - ra;
    let ba = b - a;
    let baba = ba.dot(&ba);
    let pa = point - a;
    let papa = pa.dot(&pa);
    let paba = pa.dot(&ba) / baba;
    let x = (papa - paba * paba * baba).max(0.0).sqrt();
    let cax = (x - if paba < 0.5 { ra } else { rb }).max(0.0);
    let cay = (paba - 0.5).abs() - 0.5;
    let k = rba * rba + baba;
    let f = ((rba * (x - ra) + paba * baba) / k).clamp(0.0, 1.0);
    let cbx = x - ra - f * rba;
    let cby = paba - f;
    let s = if cbx < 0.0 && cay < 0.0 { -1.0 } else { 1.0 };
    s * (cax * cax + cay * cay * baba)
        .min(cbx * cbx + cby * cby * baba)
        .sqrt()
}

/// Z-aligned truncated cone with radius `r0` at `z = -half_height` and
/// `r1` at `z = +half_height`, optionally rounded.
///
/// Rounding insets the caps and the slant by `round` and re-inflates the
/// core, so material is only removed at the rims.
pub fn sdf_cone(point: Vector3<f64>, half_height: f64, r0: f64, r1: f64, round: f64) -> f64 {
    if round <= 0.0 {
        let a = Vector3::new(0.0, 0.0, -half_height);
        let b = Vector3::new(0.0, 0.0, half_height);
        return sdf_capped_cone(point, a, b, r0, r1);
    }
    let (z0, z1, c0, c1) = rounded_cone_core(half_height, r0, r1, round)
        .unwrap_or((-half_height + round, half_height - round, 0.0, 0.0));
    let a = Vector3::new(0.0, 0.0, z0);
    let b = Vector3::new(0.0, 0.0, z1.max(z0 + 1e-12));
    sdf_capped_cone(point, a, b, c0, c1) - round
}

/// Core of a rounded cone as `(z0, z1, r0, r1)`: the sharp cone with its caps
/// and slant moved inward by `round`. Where the inset slant crosses the axis
/// the core ends in a point. `None` when nothing is left.
pub fn rounded_cone_core(
    half_height: f64,
    r0: f64,
    r1: f64,
    round: f64,
) -> Option<(f64, f64, f64, f64)> {
    let h = (half_height - round).max(0.0);
    let u = Vector2::new(r1 - r0, 2.0 * half_height).normalize();
    // outward slant normal
    let n = Vector2::new(u.y, -u.x);
    let ofs = round / n.x;
    let c0 = r0 - (1.0 + n.y) * ofs;
    let c1 = r1 - (1.0 - n.y) * ofs;
    if c0 < 0.0 && c1 < 0.0 {
        return None;
    }
    if c1 < 0.0 {
        let t = c0 / (c0 - c1);
        Some((-h, -h + 2.0 * h * t, c0, 0.0))
    } else if c0 < 0.0 {
        let t = c0 / (c0 - c1);
        Some((-h + 2.0 * h * t, h, 0.0, c1))
    } else {
        Some((-h, h, c0, c1))
    }
}

/// Unsigned distance from `point` to the segment `a`–`b`.
///
/// A zero-length segment degrades to the distance to `a`.
pub fn segment_distance(point: Vector2<f64>, a: Vector2<f64>, b: Vector2<f64>) -> f64 {
    let e = b - a;
    let w = point - a;
    let ee = e.dot(&e);
    let t = if ee > 0.0 { (w.dot(&e) / ee).clamp(0.0, 1.0) } else { 0.0 };
    (w - e * t).norm()
}

/// Signed distance to a closed polygon.
///
/// The magnitude is the distance to the nearest edge; the sign comes from a
/// crossing test, negative inside. Zero-length edges are harmless.
/// Self-intersecting outlines give a finite but not meaningful field.
pub fn sdf_polygon(point: Vector2<f64>, vertices: &[Vector2<f64>]) -> f64 {
    let n = vertices.len();
    if n == 0 {
        return f64::INFINITY;
    }
    let mut d2 = f64::INFINITY;
    let mut s = 1.0;
    let mut j = n - 1;
    for i in 0..n {
        let vi = vertices[i];
        let vj = vertices[j];
        let e = vj - vi;
        let w = point - vi;
        let ee = e.dot(&e);
        let t = if ee > 0.0 { (w.dot(&e) / ee).clamp(0.0, 1.0) } else { 0.0 };
        let b = w - e * t;
        d2 = d2.min(b.dot(&b));
        // edge straddles the horizontal ray through the point
        let c0 = point.y >= vi.y;
        let c1 = point.y < vj.y;
        let c2 = cross2(e, w) > 0.0;
        if (c0 && c1 && c2) || (!c0 && !c1 && !c2) {
            s = -s;
        }
        j = i;
    }
    s * d2.sqrt()
}
