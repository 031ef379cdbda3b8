//! Declarative builder API.
//!
//! `Shape` (3D) and `Profile` (2D) are the user-facing entry points for
//! composing SDF geometry. Each wraps an `Arc` node so it is cheaply
//! cloneable and immutable. Constructors that take dimensions validate them
//! and return `Result`; combinators cannot fail.
//!
//! # Example
//!
//! ```rust
//! use helisdf::builder::Shape;
//! use nalgebra::Vector3;
//!
//! let washer = Shape::cylinder(2.0, 6.0, 0.0)?
//!     .subtract(Shape::cylinder(2.0, 3.0, 0.0)?);
//! assert!(washer.contains(Vector3::new(4.5, 0.0, 0.0)));
//! assert!(!washer.contains(Vector3::new(2.0, 0.0, 0.0)));
//! # Ok::<(), helisdf::SdfError>(())
//! ```

use std::sync::Arc;
use nalgebra::{Isometry2, Isometry3, Translation3, UnitQuaternion, Vector2, Vector3};
use crate::dag::{SdfNode, SdfNode2d};
use crate::error::{invalid, require_non_negative, require_positive, Result};
use crate::polygon::{nagon, Polygon};
use crate::primitives;
use crate::screw::Screw;
use crate::shape::{Sdf, Sdf2d};
use crate::types::{BBox2, BBox3};

/// A composable, immutable 3D shape backed by an SDF expression tree.
#[derive(Clone)]
pub struct Shape {
    node: Arc<SdfNode>,
}

/// A composable, immutable 2D profile.
#[derive(Clone)]
pub struct Profile {
    node: Arc<SdfNode2d>,
}

fn check_round(round: f64, smallest_half: f64) -> Result<f64> {
    require_non_negative("round", round)?;
    if round > smallest_half {
        return Err(invalid(
            "round",
            format!("{round} exceeds half the smallest dimension ({smallest_half})"),
        ));
    }
    Ok(round)
}

// ---------------------------------------------------------------------------
// 3D primitives: centered at the origin, +Z is the axis
// ---------------------------------------------------------------------------

impl Shape {
    pub fn from_node(node: SdfNode) -> Self {
        Self { node: Arc::new(node) }
    }

    /// Wrap a user-defined SDF.
    pub fn custom(sdf: Arc<dyn Sdf>) -> Self {
        Self::from_node(SdfNode::Custom(sdf))
    }

    pub fn sphere(radius: f64) -> Result<Self> {
        require_positive("radius", radius)?;
        Ok(Self::from_node(SdfNode::Sphere { radius }))
    }

    /// Box of the given full `size`, edges rounded by `round`.
    pub fn box3(size: Vector3<f64>, round: f64) -> Result<Self> {
        require_positive("size.x", size.x)?;
        require_positive("size.y", size.y)?;
        require_positive("size.z", size.z)?;
        let half_extents = size * 0.5;
        let round = check_round(round, half_extents.min())?;
        Ok(Self::from_node(SdfNode::Box3 { half_extents, round }))
    }

    /// Cylinder of `height` along Z with rims rounded by `round`.
    pub fn cylinder(height: f64, radius: f64, round: f64) -> Result<Self> {
        require_positive("height", height)?;
        require_positive("radius", radius)?;
        let round = check_round(round, radius.min(0.5 * height))?;
        Ok(Self::from_node(SdfNode::Cylinder { radius, half_height: 0.5 * height, round }))
    }

    /// Truncated cone of `height`: radius `r0` at the bottom, `r1` at the top.
    pub fn cone(height: f64, r0: f64, r1: f64, round: f64) -> Result<Self> {
        require_positive("height", height)?;
        require_non_negative("r0", r0)?;
        require_non_negative("r1", r1)?;
        if r0 == 0.0 && r1 == 0.0 {
            return Err(invalid("r0", "cone needs at least one non-zero radius"));
        }
        let round = check_round(round, r0.max(r1).min(0.5 * height))?;
        if round > 0.0 && primitives::rounded_cone_core(0.5 * height, r0, r1, round).is_none() {
            return Err(invalid("round", format!("{round} leaves no cone core")));
        }
        Ok(Self::from_node(SdfNode::Cone { half_height: 0.5 * height, r0, r1, round }))
    }
}

// ---------------------------------------------------------------------------
// CSG operations: consume self, return new Shape
// ---------------------------------------------------------------------------

impl Shape {
    /// Boolean union: the volume of either shape.
    pub fn union(self, other: Shape) -> Self {
        Self::from_node(SdfNode::Union(self.node, other.node))
    }

    /// Boolean subtraction: self minus other.
    pub fn subtract(self, other: Shape) -> Self {
        Self::from_node(SdfNode::Difference(self.node, other.node))
    }

    /// Boolean intersection: the volume shared by both shapes.
    pub fn intersect(self, other: Shape) -> Self {
        Self::from_node(SdfNode::Intersection(self.node, other.node))
    }

    /// Smooth union (fillet blend) with blending radius `k`.
    pub fn smooth_union(self, other: Shape, k: f64) -> Result<Self> {
        require_non_negative("k", k)?;
        Ok(Self::from_node(SdfNode::SmoothUnion(self.node, other.node, k)))
    }

    /// Smooth intersection with blending radius `k`.
    pub fn smooth_intersect(self, other: Shape, k: f64) -> Result<Self> {
        require_non_negative("k", k)?;
        Ok(Self::from_node(SdfNode::SmoothIntersection(self.node, other.node, k)))
    }

    /// Smooth subtraction with blending radius `k`.
    pub fn smooth_subtract(self, other: Shape, k: f64) -> Result<Self> {
        require_non_negative("k", k)?;
        Ok(Self::from_node(SdfNode::SmoothDifference(self.node, other.node, k)))
    }

    /// Grow (`delta > 0`) or shrink (`delta < 0`) the surface.
    pub fn offset(self, delta: f64) -> Self {
        Self::from_node(SdfNode::Offset(self.node, delta))
    }
}

// ---------------------------------------------------------------------------
// Transforms
// ---------------------------------------------------------------------------

impl Shape {
    /// Place the shape with a rigid transform.
    pub fn transform(self, transform: Isometry3<f64>) -> Self {
        let inverse = transform.inverse();
        Self::from_node(SdfNode::Transform { inner: self.node, transform, inverse })
    }

    /// Translate by `(x, y, z)`.
    pub fn translate(self, x: f64, y: f64, z: f64) -> Self {
        self.transform(Isometry3::from_parts(
            Translation3::new(x, y, z),
            UnitQuaternion::identity(),
        ))
    }

    /// Rotate around the X axis by `angle` radians.
    pub fn rotate_x(self, angle: f64) -> Self {
        self.rotate(&Vector3::x_axis(), angle)
    }

    /// Rotate around the Y axis by `angle` radians.
    pub fn rotate_y(self, angle: f64) -> Self {
        self.rotate(&Vector3::y_axis(), angle)
    }

    /// Rotate around the Z axis by `angle` radians.
    pub fn rotate_z(self, angle: f64) -> Self {
        self.rotate(&Vector3::z_axis(), angle)
    }

    fn rotate(self, axis: &nalgebra::Unit<Vector3<f64>>, angle: f64) -> Self {
        self.transform(Isometry3::from_parts(
            Translation3::identity(),
            UnitQuaternion::from_axis_angle(axis, angle),
        ))
    }

    /// `copies` instances evenly spaced about Z. The shape should fit in the
    /// sector within `PI / copies` of the +X axis.
    pub fn rotate_copy(self, copies: usize) -> Result<Self> {
        if copies == 0 {
            return Err(invalid("copies", "must be at least 1"));
        }
        Ok(Self::from_node(SdfNode::RotateCopy { inner: self.node, copies }))
    }
}

// ---------------------------------------------------------------------------
// Query
// ---------------------------------------------------------------------------

impl Shape {
    /// Signed distance at `point`: negative inside, zero on the surface.
    pub fn distance(&self, point: Vector3<f64>) -> f64 {
        self.node.evaluate(point)
    }

    /// Returns `true` if `point` is inside the shape (SDF < 0).
    pub fn contains(&self, point: Vector3<f64>) -> bool {
        self.node.evaluate(point) < 0.0
    }

    /// Conservative axis-aligned bounding box.
    pub fn bounding_box(&self) -> BBox3 {
        self.node.bounding_box()
    }

    pub fn node(&self) -> &Arc<SdfNode> {
        &self.node
    }
}

impl Sdf for Shape {
    fn evaluate(&self, point: Vector3<f64>) -> f64 {
        self.node.evaluate(point)
    }
    fn bounding_box(&self) -> BBox3 {
        self.node.bounding_box()
    }
}

// ---------------------------------------------------------------------------
// 2D profiles
// ---------------------------------------------------------------------------

impl Profile {
    pub fn from_node(node: SdfNode2d) -> Self {
        Self { node: Arc::new(node) }
    }

    pub fn custom(sdf: Arc<dyn Sdf2d>) -> Self {
        Self::from_node(SdfNode2d::Custom(sdf))
    }

    pub fn circle(radius: f64) -> Result<Self> {
        require_positive("radius", radius)?;
        Ok(Self::from_node(SdfNode2d::Circle { radius }))
    }

    /// Rectangle of the given full `size` with corners rounded by `round`.
    pub fn rect(size: Vector2<f64>, round: f64) -> Result<Self> {
        require_positive("size.x", size.x)?;
        require_positive("size.y", size.y)?;
        let half_extents = size * 0.5;
        let round = check_round(round, half_extents.min())?;
        Ok(Self::from_node(SdfNode2d::Rect { half_extents, round }))
    }

    pub fn polygon(polygon: Polygon) -> Self {
        Self::from_node(SdfNode2d::Polygon(polygon))
    }

    /// Regular `n`-gon with circumradius `radius`.
    pub fn nagon(n: usize, radius: f64) -> Result<Self> {
        Ok(Self::polygon(Polygon::new(nagon(n, radius)?)?))
    }

    pub fn union(self, other: Profile) -> Self {
        Self::from_node(SdfNode2d::Union(self.node, other.node))
    }

    pub fn subtract(self, other: Profile) -> Self {
        Self::from_node(SdfNode2d::Difference(self.node, other.node))
    }

    pub fn intersect(self, other: Profile) -> Self {
        Self::from_node(SdfNode2d::Intersection(self.node, other.node))
    }

    pub fn offset(self, delta: f64) -> Self {
        Self::from_node(SdfNode2d::Offset(self.node, delta))
    }

    pub fn transform(self, transform: Isometry2<f64>) -> Self {
        let inverse = transform.inverse();
        Self::from_node(SdfNode2d::Transform { inner: self.node, transform, inverse })
    }

    pub fn translate(self, x: f64, y: f64) -> Self {
        self.transform(Isometry2::translation(x, y))
    }

    /// Rotate about the origin by `angle` radians.
    pub fn rotate(self, angle: f64) -> Self {
        self.transform(Isometry2::rotation(angle))
    }

    /// Extrude along Z to a total `height`, centered on z = 0.
    pub fn extrude(self, height: f64) -> Result<Shape> {
        require_positive("height", height)?;
        Ok(Shape::from_node(SdfNode::Extrude(self.node, 0.5 * height)))
    }

    /// Revolve about Z. Profile x is the radius, profile y becomes z.
    pub fn revolve(self) -> Shape {
        Shape::from_node(SdfNode::Revolve(self.node))
    }

    /// Sweep this thread profile into a helix. See [`Screw::new`].
    pub fn screw(self, length: f64, pitch: f64, starts: i32) -> Result<Shape> {
        Ok(Shape::from_node(SdfNode::Screw(Screw::new(self.node, length, pitch, starts)?)))
    }

    pub fn distance(&self, point: Vector2<f64>) -> f64 {
        self.node.evaluate(point)
    }

    pub fn contains(&self, point: Vector2<f64>) -> bool {
        self.node.evaluate(point) < 0.0
    }

    pub fn bounding_box(&self) -> BBox2 {
        self.node.bounding_box()
    }

    pub fn node(&self) -> &Arc<SdfNode2d> {
        &self.node
    }
}

impl Sdf2d for Profile {
    fn evaluate(&self, point: Vector2<f64>) -> f64 {
        self.node.evaluate(point)
    }
    fn bounding_box(&self) -> BBox2 {
        self.node.bounding_box()
    }
}
