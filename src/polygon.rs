//! 2D polygon outlines with per-vertex rounding.
//!
//! A `PolygonBuilder` collects vertices in order. Any vertex can ask for a
//! circular fillet; `freeze()` resolves the fillets into arcs and returns an
//! immutable `Polygon` that evaluates as a 2D signed distance field.
//!
//! ```rust
//! use helisdf::polygon::PolygonBuilder;
//!
//! let mut b = PolygonBuilder::new();
//! b.add(0.0, 0.0);
//! b.add(4.0, 0.0).smooth(0.5, 6);
//! b.add(4.0, 3.0);
//! let triangle = b.freeze().unwrap();
//! assert_eq!(triangle.vertices().len(), 2 + 7);
//! ```

use std::f64::consts::{PI, TAU};
use nalgebra::Vector2;
use tracing::warn;
use crate::error::{invalid, require_non_negative, require_positive, Result, SdfError};
use crate::math::{is_finite2, polar, wrap_angle, TOLERANCE};
use crate::primitives::sdf_polygon;
use crate::types::BBox2;

/// Fillet request attached to a single vertex.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Rounding {
    pub radius: f64,
    /// Number of line segments in the resulting arc.
    pub facets: usize,
}

/// A vertex held by the builder.
#[derive(Clone, Debug, PartialEq)]
pub struct PolygonVertex {
    pub position: Vector2<f64>,
    pub rounding: Option<Rounding>,
}

impl PolygonVertex {
    /// Round this vertex with a fillet of `radius` made of `facets` segments.
    pub fn smooth(&mut self, radius: f64, facets: usize) -> &mut Self {
        self.rounding = Some(Rounding { radius, facets });
        self
    }
}

/// Append-only polygon builder.
#[derive(Clone, Debug, Default)]
pub struct PolygonBuilder {
    vertices: Vec<PolygonVertex>,
}

impl PolygonBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a vertex. The returned handle can request rounding for it.
    pub fn add(&mut self, x: f64, y: f64) -> &mut PolygonVertex {
        self.add_vertex(Vector2::new(x, y))
    }

    pub fn add_vertex(&mut self, position: Vector2<f64>) -> &mut PolygonVertex {
        self.vertices.push(PolygonVertex { position, rounding: None });
        let last = self.vertices.len() - 1;
        &mut self.vertices[last]
    }

    /// Append several unrounded vertices.
    pub fn extend(&mut self, points: impl IntoIterator<Item = Vector2<f64>>) -> &mut Self {
        for p in points {
            self.add_vertex(p);
        }
        self
    }

    pub fn len(&self) -> usize {
        self.vertices.len()
    }

    pub fn is_empty(&self) -> bool {
        self.vertices.is_empty()
    }

    /// Resolve rounding requests and produce the final outline.
    pub fn freeze(self) -> Result<Polygon> {
        let n = self.vertices.len();
        if n < 3 {
            return Err(SdfError::TooFewVertices { min: 3, got: n });
        }
        for v in &self.vertices {
            if !is_finite2(v.position) {
                return Err(invalid("vertex", format!("non-finite coordinate {:?}", v.position)));
            }
            if let Some(r) = v.rounding {
                require_non_negative("rounding radius", r.radius)?;
                if r.facets == 0 {
                    return Err(invalid("rounding facets", "must be at least 1"));
                }
            }
        }

        let mut out = Vec::with_capacity(n);
        for (i, v) in self.vertices.iter().enumerate() {
            match v.rounding {
                Some(r) if r.radius > 0.0 => {
                    let prev = self.vertices[(i + n - 1) % n].position;
                    let next = self.vertices[(i + 1) % n].position;
                    out.extend(round_vertex(prev, v.position, next, r));
                }
                _ => out.push(v.position),
            }
        }
        Polygon::new(out)
    }
}

/// Replace `v` by an arc tangent to the edges `prev`–`v` and `v`–`next`.
///
/// The tangent length is limited to half the shorter adjacent edge so
/// neighbouring fillets cannot overlap; the radius shrinks to match.
fn round_vertex(
    prev: Vector2<f64>,
    v: Vector2<f64>,
    next: Vector2<f64>,
    r: Rounding,
) -> Vec<Vector2<f64>> {
    let a = prev - v;
    let b = next - v;
    let (la, lb) = (a.norm(), b.norm());
    if la <= TOLERANCE || lb <= TOLERANCE {
        warn!(vertex = ?v, "cannot round vertex with a zero-length edge");
        return vec![v];
    }
    let (ua, ub) = (a / la, b / lb);
    // angle between the two edges at the vertex
    let theta = ua.dot(&ub).clamp(-1.0, 1.0).acos();
    if PI - theta < 1e-9 {
        // collinear, nothing to round
        return vec![v];
    }
    let half = 0.5 * theta;
    let limit = 0.5 * la.min(lb);
    let mut radius = r.radius;
    let mut tangent = radius / half.tan();
    if tangent > limit {
        tangent = limit;
        radius = limit * half.tan();
        warn!(
            vertex = ?v,
            requested = r.radius,
            clamped = radius,
            "rounding radius clamped to fit edges"
        );
    }
    if radius <= TOLERANCE {
        return vec![v];
    }
    let center = v + (ua + ub).normalize() * (radius / half.sin());
    let t0 = v + ua * tangent;
    let t1 = v + ub * tangent;
    let a0 = (t0.y - center.y).atan2(t0.x - center.x);
    let a1 = (t1.y - center.y).atan2(t1.x - center.x);
    let sweep = wrap_angle(a1 - a0);
    let step = sweep / r.facets as f64;

    let mut arc = Vec::with_capacity(r.facets + 1);
    arc.push(t0);
    for k in 1..r.facets {
        arc.push(center + polar(radius, a0 + step * k as f64));
    }
    arc.push(t1);
    arc
}

/// A frozen polygon outline and its 2D signed distance field.
#[derive(Clone, Debug, PartialEq)]
pub struct Polygon {
    vertices: Vec<Vector2<f64>>,
    bbox: BBox2,
}

impl Polygon {
    /// Wrap an already-resolved vertex list.
    pub fn new(vertices: Vec<Vector2<f64>>) -> Result<Self> {
        if vertices.len() < 3 {
            return Err(SdfError::TooFewVertices { min: 3, got: vertices.len() });
        }
        if let Some(bad) = vertices.iter().find(|v| !is_finite2(**v)) {
            return Err(invalid("vertex", format!("non-finite coordinate {bad:?}")));
        }
        let bbox = BBox2::from_points(&vertices)
            .ok_or(SdfError::TooFewVertices { min: 3, got: 0 })?;
        Ok(Self { vertices, bbox })
    }

    pub fn vertices(&self) -> &[Vector2<f64>] {
        &self.vertices
    }

    pub fn evaluate(&self, point: Vector2<f64>) -> f64 {
        sdf_polygon(point, &self.vertices)
    }

    pub fn bounding_box(&self) -> BBox2 {
        self.bbox
    }
}

/// Vertices of a regular `n`-gon with circumradius `radius`, first vertex on
/// the +X axis, counter-clockwise.
pub fn nagon(n: usize, radius: f64) -> Result<Vec<Vector2<f64>>> {
    if n < 3 {
        return Err(SdfError::TooFewVertices { min: 3, got: n });
    }
    require_positive("radius", radius)?;
    let step = TAU / n as f64;
    Ok((0..n).map(|i| polar(radius, step * i as f64)).collect())
}
