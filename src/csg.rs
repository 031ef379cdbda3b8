//! Scalar combinators for signed distance values.
//!
//! The sharp operators keep the field conservative: |gradient| <= 1 with a
//! crease where the children swap. The smooth variants blend the crease over
//! a band of width `k` and are only used when asked for by name.

/// Boolean union: the nearer of the two surfaces.
pub fn union(d1: f64, d2: f64) -> f64 {
    d1.min(d2)
}

/// Boolean intersection: inside only where both are inside.
pub fn intersection(d1: f64, d2: f64) -> f64 {
    d1.max(d2)
}

/// Shape A minus shape B.
pub fn difference(d1: f64, d2: f64) -> f64 {
    d1.max(-d2)
}

/// Grow (`delta > 0`) or shrink (`delta < 0`) a shape.
pub fn offset(d: f64, delta: f64) -> f64 {
    d - delta
}

/// Polynomial smooth minimum with blend radius `k`. Degenerates to `union`
/// for `k <= 0`.
pub fn smooth_union(d1: f64, d2: f64, k: f64) -> f64 {
    if k <= 0.0 {
        return union(d1, d2);
    }
    let h = (0.5 + 0.5 * (d2 - d1) / k).clamp(0.0, 1.0);
    d2 * (1.0 - h) + d1 * h - k * h * (1.0 - h)
}

/// Polynomial smooth maximum with blend radius `k`.
pub fn smooth_intersection(d1: f64, d2: f64, k: f64) -> f64 {
    if k <= 0.0 {
        return intersection(d1, d2);
    }
    let h = (0.5 - 0.5 * (d2 - d1) / k).clamp(0.0, 1.0);
    d2 * (1.0 - h) + d1 * h + k * h * (1.0 - h)
}

/// Smooth A minus B.
pub fn smooth_difference(d1: f64, d2: f64, k: f64) -> f64 {
    smooth_intersection(d1, -d2, k)
}
