//! SdfNode expression tree: closed enums for 2D and 3D signed distance
//! functions.
//!
//! Children sit behind `Arc` so subtrees can be shared and the whole tree is
//! `Send + Sync`. Nodes are never mutated after construction, so a tree can
//! be evaluated from any number of threads at once.
//!
//! Variants are plain data; parameter validation lives in the constructors
//! of `builder::Shape` / `builder::Profile`, `screw::Screw` and
//! `polygon::Polygon`.

use std::f64::consts::TAU;
use std::sync::Arc;
use nalgebra::{Isometry2, Isometry3, Point2, Point3, Vector2, Vector3};
use crate::math::fold_angle;
use crate::polygon::Polygon;
use crate::screw::Screw;
use crate::shape::{Sdf, Sdf2d};
use crate::types::{BBox2, BBox3};
use crate::{csg, primitives};

// ---------------------------------------------------------------------------
// SdfNode2d: 2D profiles
// ---------------------------------------------------------------------------

/// A 2D signed distance function node, used as the cross-section for
/// `SdfNode::Extrude`, `SdfNode::Revolve` and `Screw`.
pub enum SdfNode2d {
    /// Circle of `radius` at the origin.
    Circle { radius: f64 },
    /// Rectangle with outer `half_extents` and rounded corners.
    Rect { half_extents: Vector2<f64>, round: f64 },
    /// Frozen polygon outline.
    Polygon(Polygon),
    Union(Arc<SdfNode2d>, Arc<SdfNode2d>),
    Intersection(Arc<SdfNode2d>, Arc<SdfNode2d>),
    /// A minus B.
    Difference(Arc<SdfNode2d>, Arc<SdfNode2d>),
    /// Grow (`> 0`) or shrink (`< 0`) by a distance.
    Offset(Arc<SdfNode2d>, f64),
    /// Rigid placement; `inverse` is cached for evaluation.
    Transform { inner: Arc<SdfNode2d>, transform: Isometry2<f64>, inverse: Isometry2<f64> },
    /// Opaque 2D SDF wrapping any `Sdf2d` trait object.
    Custom(Arc<dyn Sdf2d>),
}

impl SdfNode2d {
    /// Evaluate the 2D signed distance at a point.
    pub fn evaluate(&self, point: Vector2<f64>) -> f64 {
        match self {
            SdfNode2d::Circle { radius } => primitives::sdf_circle(point, *radius),
            SdfNode2d::Rect { half_extents, round } => {
                primitives::sdf_rounded_rect(point, *half_extents, *round)
            }
            SdfNode2d::Polygon(polygon) => polygon.evaluate(point),
            SdfNode2d::Union(a, b) => csg::union(a.evaluate(point), b.evaluate(point)),
            SdfNode2d::Intersection(a, b) => {
                csg::intersection(a.evaluate(point), b.evaluate(point))
            }
            SdfNode2d::Difference(a, b) => csg::difference(a.evaluate(point), b.evaluate(point)),
            SdfNode2d::Offset(inner, delta) => csg::offset(inner.evaluate(point), *delta),
            SdfNode2d::Transform { inner, inverse, .. } => {
                inner.evaluate(inverse.transform_point(&Point2::from(point)).coords)
            }
            SdfNode2d::Custom(sdf) => sdf.evaluate(point),
        }
    }

    /// Conservative bounding box, computed by walking the tree.
    pub fn bounding_box(&self) -> BBox2 {
        match self {
            SdfNode2d::Circle { radius } => {
                BBox2::new(Vector2::repeat(-radius), Vector2::repeat(*radius))
            }
            SdfNode2d::Rect { half_extents, .. } => BBox2::new(-half_extents, *half_extents),
            SdfNode2d::Polygon(polygon) => polygon.bounding_box(),
            SdfNode2d::Union(a, b) => a.bounding_box().union(&b.bounding_box()),
            SdfNode2d::Intersection(a, b) => a.bounding_box().intersection(&b.bounding_box()),
            SdfNode2d::Difference(a, _) => a.bounding_box(),
            SdfNode2d::Offset(inner, delta) => inner.bounding_box().enlarge(delta.max(0.0)),
            SdfNode2d::Transform { inner, transform, .. } => {
                inner.bounding_box().transform(transform)
            }
            SdfNode2d::Custom(sdf) => sdf.bounding_box(),
        }
    }
}

impl Sdf2d for SdfNode2d {
    fn evaluate(&self, point: Vector2<f64>) -> f64 {
        SdfNode2d::evaluate(self, point)
    }
    fn bounding_box(&self) -> BBox2 {
        SdfNode2d::bounding_box(self)
    }
}

// ---------------------------------------------------------------------------
// SdfNode: the main 3D tree
// ---------------------------------------------------------------------------

/// An expression tree node representing a 3D signed distance function.
///
/// Primitives are centered on the origin with +Z as the axis of symmetry.
pub enum SdfNode {
    // -- Primitives --------------------------------------------------------

    /// Sphere of `radius`.
    Sphere { radius: f64 },

    /// Box with outer `half_extents` and rounded edges.
    Box3 { half_extents: Vector3<f64>, round: f64 },

    /// Z-aligned cylinder with rounded rims.
    Cylinder { radius: f64, half_height: f64, round: f64 },

    /// Z-aligned truncated cone, radius `r0` at the bottom, `r1` at the top.
    Cone { half_height: f64, r0: f64, r1: f64, round: f64 },

    // -- CSG -----------------------------------------------------------------

    /// Boolean union, min of children.
    Union(Arc<SdfNode>, Arc<SdfNode>),

    /// Boolean intersection, max of children.
    Intersection(Arc<SdfNode>, Arc<SdfNode>),

    /// Boolean difference: A minus B.
    Difference(Arc<SdfNode>, Arc<SdfNode>),

    /// Smooth union with blending radius `k`.
    SmoothUnion(Arc<SdfNode>, Arc<SdfNode>, f64),

    /// Smooth intersection with blending radius `k`.
    SmoothIntersection(Arc<SdfNode>, Arc<SdfNode>, f64),

    /// Smooth difference with blending radius `k`.
    SmoothDifference(Arc<SdfNode>, Arc<SdfNode>, f64),

    // -- Unary ---------------------------------------------------------------

    /// Grow or shrink the surface by a distance.
    Offset(Arc<SdfNode>, f64),

    /// Rigid placement; `inverse` is cached for evaluation.
    Transform { inner: Arc<SdfNode>, transform: Isometry3<f64>, inverse: Isometry3<f64> },

    /// `copies` instances of `inner` evenly spaced about the Z axis.
    /// `inner` should stay inside the sector `|angle| < PI / copies`.
    RotateCopy { inner: Arc<SdfNode>, copies: usize },

    // -- 2D → 3D ---------------------------------------------------------

    /// Extrude a 2D profile along Z by `half_height` each way.
    Extrude(Arc<SdfNode2d>, f64),

    /// Revolve a 2D profile about Z; profile x is the radius, profile y is z.
    Revolve(Arc<SdfNode2d>),

    /// Helical sweep of a thread profile.
    Screw(Screw),

    // -- Opaque --------------------------------------------------------------

    /// Wraps any `Sdf` trait object.
    Custom(Arc<dyn Sdf>),
}

impl SdfNode {
    /// Evaluate the signed distance at a 3D point.
    pub fn evaluate(&self, point: Vector3<f64>) -> f64 {
        match self {
            SdfNode::Sphere { radius } => primitives::sdf_sphere(point, *radius),
            SdfNode::Box3 { half_extents, round } => {
                primitives::sdf_box(point, *half_extents, *round)
            }
            SdfNode::Cylinder { radius, half_height, round } => {
                primitives::sdf_cylinder(point, *radius, *half_height, *round)
            }
            SdfNode::Cone { half_height, r0, r1, round } => {
                primitives::sdf_cone(point, *half_height, *r0, *r1, *round)
            }

            SdfNode::Union(a, b) => csg::union(a.evaluate(point), b.evaluate(point)),
            SdfNode::Intersection(a, b) => {
                csg::intersection(a.evaluate(point), b.evaluate(point))
            }
            SdfNode::Difference(a, b) => csg::difference(a.evaluate(point), b.evaluate(point)),
            SdfNode::SmoothUnion(a, b, k) => {
                csg::smooth_union(a.evaluate(point), b.evaluate(point), *k)
            }
            SdfNode::SmoothIntersection(a, b, k) => {
                csg::smooth_intersection(a.evaluate(point), b.evaluate(point), *k)
            }
            SdfNode::SmoothDifference(a, b, k) => {
                csg::smooth_difference(a.evaluate(point), b.evaluate(point), *k)
            }

            SdfNode::Offset(inner, delta) => csg::offset(inner.evaluate(point), *delta),
            SdfNode::Transform { inner, inverse, .. } => {
                inner.evaluate(inverse.transform_point(&Point3::from(point)).coords)
            }
            SdfNode::RotateCopy { inner, copies } => {
                let r = point.xy().norm();
                let theta = fold_angle(point.y.atan2(point.x), TAU / *copies as f64);
                inner.evaluate(Vector3::new(r * theta.cos(), r * theta.sin(), point.z))
            }

            SdfNode::Extrude(profile, half_height) => {
                let d = profile.evaluate(point.xy());
                d.max(point.z.abs() - half_height)
            }
            SdfNode::Revolve(profile) => {
                profile.evaluate(Vector2::new(point.xy().norm(), point.z))
            }
            SdfNode::Screw(screw) => screw.evaluate(point),

            SdfNode::Custom(sdf) => sdf.evaluate(point),
        }
    }

    /// Conservative axis-aligned bounding box, computed by walking the tree.
    pub fn bounding_box(&self) -> BBox3 {
        match self {
            SdfNode::Sphere { radius } => {
                BBox3::new(Vector3::repeat(-radius), Vector3::repeat(*radius))
            }
            SdfNode::Box3 { half_extents, .. } => BBox3::new(-half_extents, *half_extents),
            SdfNode::Cylinder { radius, half_height, .. } => {
                let h = Vector3::new(*radius, *radius, *half_height);
                BBox3::new(-h, h)
            }
            SdfNode::Cone { half_height, r0, r1, .. } => {
                let r = r0.max(*r1);
                let h = Vector3::new(r, r, *half_height);
                BBox3::new(-h, h)
            }

            SdfNode::Union(a, b) => a.bounding_box().union(&b.bounding_box()),
            SdfNode::Intersection(a, b) | SdfNode::SmoothIntersection(a, b, _) => {
                a.bounding_box().intersection(&b.bounding_box())
            }
            SdfNode::Difference(a, _) | SdfNode::SmoothDifference(a, _, _) => a.bounding_box(),
            SdfNode::SmoothUnion(a, b, k) => {
                a.bounding_box().union(&b.bounding_box()).enlarge(*k)
            }

            SdfNode::Offset(inner, delta) => inner.bounding_box().enlarge(delta.max(0.0)),
            SdfNode::Transform { inner, transform, .. } => {
                inner.bounding_box().transform(transform)
            }
            SdfNode::RotateCopy { inner, .. } => {
                let b = inner.bounding_box();
                let r = b
                    .corners()
                    .iter()
                    .map(|c| c.xy().norm())
                    .fold(0.0, f64::max);
                BBox3::new(Vector3::new(-r, -r, b.min.z), Vector3::new(r, r, b.max.z))
            }

            SdfNode::Extrude(profile, half_height) => {
                profile.bounding_box().extend_z(-half_height, *half_height)
            }
            SdfNode::Revolve(profile) => {
                let b = profile.bounding_box();
                let r = b.min.x.abs().max(b.max.x.abs());
                BBox3::new(Vector3::new(-r, -r, b.min.y), Vector3::new(r, r, b.max.y))
            }
            SdfNode::Screw(screw) => screw.bounding_box(),

            SdfNode::Custom(sdf) => sdf.bounding_box(),
        }
    }
}

impl Sdf for SdfNode {
    fn evaluate(&self, point: Vector3<f64>) -> f64 {
        SdfNode::evaluate(self, point)
    }
    fn bounding_box(&self) -> BBox3 {
        SdfNode::bounding_box(self)
    }
}
