//! Scalar and planar helpers shared by the evaluators.

use std::f64::consts::TAU;

pub type Vector2 = nalgebra::Vector2<f64>;

/// Tolerance for geometric coincidence tests (distance in model units).
pub const TOLERANCE: f64 = 1e-9;

/// Convert degrees to radians.
pub fn deg_to_rad(degrees: f64) -> f64 {
    degrees.to_radians()
}

/// Sawtooth fold of `x` with the given `period`.
///
/// The result lies in `[-period/2, period/2)` and is zero whenever `x` is a
/// multiple of `period`. `period` must be positive.
pub fn sawtooth(x: f64, period: f64) -> f64 {
    let t = (x + 0.5 * period) / period;
    period * (t - t.floor()) - 0.5 * period
}

/// Fold a polar angle into the sector `[-sector/2, sector/2)`.
pub fn fold_angle(theta: f64, sector: f64) -> f64 {
    sawtooth(theta, sector)
}

/// z component of the 3D cross product of two planar vectors.
pub fn cross2(a: Vector2, b: Vector2) -> f64 {
    a.x * b.y - a.y * b.x
}

/// Point at `radius` and angle `theta` about the origin.
pub fn polar(radius: f64, theta: f64) -> Vector2 {
    Vector2::new(radius * theta.cos(), radius * theta.sin())
}

/// Wrap an angle into `(-PI, PI]`.
pub fn wrap_angle(theta: f64) -> f64 {
    let w = sawtooth(theta, TAU);
    if w <= -std::f64::consts::PI {
        w + TAU
    } else {
        w
    }
}

/// True when every component is finite.
pub fn is_finite2(v: Vector2) -> bool {
    v.x.is_finite() && v.y.is_finite()
}
