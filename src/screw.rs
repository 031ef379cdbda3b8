//! Helical sweep of a 2D thread profile.
//!
//! The thread profile is drawn in "unrolled" coordinates: profile x runs
//! along the screw axis and covers at least one pitch period centered on
//! zero, profile y is the distance from the axis. No geometry is ever
//! generated; every query point is mapped into the profile plane:
//!
//! ```text
//! ry = |xy|
//! z' = z + lead * atan2(y, x) / 2PI     (lead = -pitch * starts)
//! d  = max(profile(sawtooth(z', pitch), ry), |z| - length/2)
//! ```
//!
//! After a full turn `z'` has moved by `lead`, a whole number of pitches, so
//! the sawtooth lands on the same profile point and the field has no seam at
//! the `atan2` branch cut.

use std::f64::consts::TAU;
use std::sync::Arc;
use nalgebra::{Vector2, Vector3};
use tracing::debug;
use crate::dag::SdfNode2d;
use crate::error::{invalid, require_positive, Result};
use crate::math::sawtooth;
use crate::shape::Sdf;
use crate::types::BBox3;

/// A multi-start screw thread (or one half of a knurl).
#[derive(Clone)]
pub struct Screw {
    profile: Arc<SdfNode2d>,
    pitch: f64,
    lead: f64,
    half_length: f64,
    starts: i32,
    bbox: BBox3,
}

impl Screw {
    /// Sweep `profile` into a screw of total `length` along Z.
    ///
    /// `pitch` is the crest-to-crest distance, `starts` the number of
    /// interleaved threads; a negative `starts` gives a left-hand thread.
    pub fn new(profile: Arc<SdfNode2d>, length: f64, pitch: f64, starts: i32) -> Result<Self> {
        require_positive("length", length)?;
        require_positive("pitch", pitch)?;
        if starts == 0 {
            return Err(invalid("starts", "a screw needs at least one thread start"));
        }
        let half_length = 0.5 * length;
        // the profile's max y is the thread's outer radius
        let r = profile.bounding_box().max.y.max(0.0);
        let bbox = BBox3::new(
            Vector3::new(-r, -r, -half_length),
            Vector3::new(r, r, half_length),
        );
        let lead = -pitch * starts as f64;
        debug!(length, pitch, starts, lead, radius = r, "built screw");
        Ok(Self { profile, pitch, lead, half_length, starts, bbox })
    }

    pub fn pitch(&self) -> f64 {
        self.pitch
    }

    /// Axial advance per full turn; the sign encodes handedness.
    pub fn lead(&self) -> f64 {
        self.lead
    }

    pub fn starts(&self) -> i32 {
        self.starts
    }

    pub fn length(&self) -> f64 {
        2.0 * self.half_length
    }

    pub fn profile(&self) -> &Arc<SdfNode2d> {
        &self.profile
    }

    /// Map a 3D point into the profile plane.
    pub fn profile_point(&self, point: Vector3<f64>) -> Vector2<f64> {
        let ry = point.xy().norm();
        let theta = point.y.atan2(point.x);
        let z = point.z + self.lead * theta / TAU;
        Vector2::new(sawtooth(z, self.pitch), ry)
    }

    pub fn evaluate(&self, point: Vector3<f64>) -> f64 {
        let d0 = self.profile.evaluate(self.profile_point(point));
        let d1 = point.z.abs() - self.half_length;
        d0.max(d1)
    }

    pub fn bounding_box(&self) -> BBox3 {
        self.bbox
    }
}

impl Sdf for Screw {
    fn evaluate(&self, point: Vector3<f64>) -> f64 {
        Screw::evaluate(self, point)
    }
    fn bounding_box(&self) -> BBox3 {
        self.bbox
    }
}

impl std::fmt::Debug for Screw {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Screw")
            .field("pitch", &self.pitch)
            .field("lead", &self.lead)
            .field("length", &self.length())
            .field("starts", &self.starts)
            .field("bbox", &self.bbox)
            .finish()
    }
}

/// Number of knurl starts giving a helix angle of about `helix_angle`
/// (radians) on a cylinder of `radius`. Never less than one.
pub fn knurl_starts(radius: f64, pitch: f64, helix_angle: f64) -> i32 {
    let n = (TAU * radius * helix_angle.tan() / pitch).floor();
    if n.is_finite() {
        (n as i32).max(1)
    } else {
        1
    }
}
