use std::sync::Arc;
use nalgebra::{Vector2, Vector3};
use crate::types::{BBox2, BBox3};

/// Anything that can report a signed distance in 3D.
///
/// `evaluate` is negative inside, zero on the surface and positive outside.
/// `bounding_box` must enclose every point where `evaluate` is negative.
pub trait Sdf: Send + Sync {
    fn evaluate(&self, point: Vector3<f64>) -> f64;
    fn bounding_box(&self) -> BBox3;
}

/// A 2D signed distance function.
/// Used as the cross-section for extrude, revolve and screw.
pub trait Sdf2d: Send + Sync {
    fn evaluate(&self, point: Vector2<f64>) -> f64;
    fn bounding_box(&self) -> BBox2;
}

impl<T: Sdf + ?Sized> Sdf for Arc<T> {
    fn evaluate(&self, point: Vector3<f64>) -> f64 {
        (**self).evaluate(point)
    }
    fn bounding_box(&self) -> BBox3 {
        (**self).bounding_box()
    }
}

impl<T: Sdf + ?Sized> Sdf for &T {
    fn evaluate(&self, point: Vector3<f64>) -> f64 {
        (**self).evaluate(point)
    }
    fn bounding_box(&self) -> BBox3 {
        (**self).bounding_box()
    }
}

impl<T: Sdf2d + ?Sized> Sdf2d for Arc<T> {
    fn evaluate(&self, point: Vector2<f64>) -> f64 {
        (**self).evaluate(point)
    }
    fn bounding_box(&self) -> BBox2 {
        (**self).bounding_box()
    }
}

impl<T: Sdf2d + ?Sized> Sdf2d for &T {
    fn evaluate(&self, point: Vector2<f64>) -> f64 {
        (**self).evaluate(point)
    }
    fn bounding_box(&self) -> BBox2 {
        (**self).bounding_box()
    }
}

// ---------------------------------------------------------------------------
// Closure-based SDFs (for user-defined shapes)
// ---------------------------------------------------------------------------

/// An SDF defined by a closure plus a caller-supplied bounding box.
/// The caller is responsible for the box being conservative.
pub struct FnSdf<F: Fn(Vector3<f64>) -> f64 + Send + Sync> {
    pub func: F,
    pub bbox: BBox3,
}

impl<F: Fn(Vector3<f64>) -> f64 + Send + Sync> FnSdf<F> {
    pub fn new(func: F, bbox: BBox3) -> Self {
        Self { func, bbox }
    }
}

impl<F: Fn(Vector3<f64>) -> f64 + Send + Sync> Sdf for FnSdf<F> {
    fn evaluate(&self, point: Vector3<f64>) -> f64 {
        (self.func)(point)
    }
    fn bounding_box(&self) -> BBox3 {
        self.bbox
    }
}

/// A 2D SDF defined by a closure.
pub struct FnSdf2d<F: Fn(Vector2<f64>) -> f64 + Send + Sync> {
    pub func: F,
    pub bbox: BBox2,
}

impl<F: Fn(Vector2<f64>) -> f64 + Send + Sync> FnSdf2d<F> {
    pub fn new(func: F, bbox: BBox2) -> Self {
        Self { func, bbox }
    }
}

impl<F: Fn(Vector2<f64>) -> f64 + Send + Sync> Sdf2d for FnSdf2d<F> {
    fn evaluate(&self, point: Vector2<f64>) -> f64 {
        (self.func)(point)
    }
    fn bounding_box(&self) -> BBox2 {
        self.bbox
    }
}
