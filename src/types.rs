use nalgebra::{Isometry2, Isometry3, Point2, Point3, Vector2, Vector3};
use rand::Rng;

/// Axis-aligned bounding box in 3D.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct BBox3 {
    pub min: Vector3<f64>,
    pub max: Vector3<f64>,
}

impl BBox3 {
    pub fn new(min: Vector3<f64>, max: Vector3<f64>) -> Self {
        Self { min, max }
    }

    /// Box of the given `size` centered on `center`.
    pub fn from_center_size(center: Vector3<f64>, size: Vector3<f64>) -> Self {
        let half = size * 0.5;
        Self { min: center - half, max: center + half }
    }

    /// Smallest box enclosing every point. `None` for an empty slice.
    pub fn from_points(points: &[Vector3<f64>]) -> Option<Self> {
        let (first, rest) = points.split_first()?;
        let mut b = BBox3::new(*first, *first);
        for p in rest {
            b.min = b.min.inf(p);
            b.max = b.max.sup(p);
        }
        Some(b)
    }

    pub fn center(&self) -> Vector3<f64> {
        (self.min + self.max) * 0.5
    }
    pub fn size(&self) -> Vector3<f64> {
        self.max - self.min
    }

    pub fn contains(&self, p: Vector3<f64>) -> bool {
        p.x >= self.min.x
            && p.x <= self.max.x
            && p.y >= self.min.y
            && p.y <= self.max.y
            && p.z >= self.min.z
            && p.z <= self.max.z
    }

    pub fn union(&self, other: &BBox3) -> BBox3 {
        BBox3::new(self.min.inf(&other.min), self.max.sup(&other.max))
    }

    /// Overlap of two boxes. Disjoint boxes collapse to a degenerate box
    /// (`min == max`) so the ordering invariant still holds.
    pub fn intersection(&self, other: &BBox3) -> BBox3 {
        let min = self.min.sup(&other.min);
        let max = self.max.inf(&other.max);
        BBox3::new(min, max.sup(&min))
    }

    /// Grow every side by `d`.
    pub fn enlarge(&self, d: f64) -> BBox3 {
        let ext = Vector3::repeat(d);
        BBox3::new(self.min - ext, self.max + ext)
    }

    /// Same center, size multiplied by `k`.
    pub fn scale_size(&self, k: f64) -> BBox3 {
        BBox3::from_center_size(self.center(), self.size() * k)
    }

    pub fn corners(&self) -> [Vector3<f64>; 8] {
        let (a, b) = (self.min, self.max);
        [
            Vector3::new(a.x, a.y, a.z),
            Vector3::new(b.x, a.y, a.z),
            Vector3::new(a.x, b.y, a.z),
            Vector3::new(b.x, b.y, a.z),
            Vector3::new(a.x, a.y, b.z),
            Vector3::new(b.x, a.y, b.z),
            Vector3::new(a.x, b.y, b.z),
            Vector3::new(b.x, b.y, b.z),
        ]
    }

    /// Box enclosing this box after a rigid transform.
    pub fn transform(&self, iso: &Isometry3<f64>) -> BBox3 {
        let moved = self.corners().map(|c| iso.transform_point(&Point3::from(c)).coords);
        // corners() is never empty
        BBox3::from_points(&moved).unwrap_or(*self)
    }

    /// Uniformly distributed point inside the box.
    pub fn random_point<R: Rng + ?Sized>(&self, rng: &mut R) -> Vector3<f64> {
        Vector3::new(
            lerp(self.min.x, self.max.x, rng.gen::<f64>()),
            lerp(self.min.y, self.max.y, rng.gen::<f64>()),
            lerp(self.min.z, self.max.z, rng.gen::<f64>()),
        )
    }

    pub fn random_set<R: Rng + ?Sized>(&self, rng: &mut R, n: usize) -> Vec<Vector3<f64>> {
        (0..n).map(|_| self.random_point(rng)).collect()
    }
}

/// Axis-aligned bounding box in 2D.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct BBox2 {
    pub min: Vector2<f64>,
    pub max: Vector2<f64>,
}

impl BBox2 {
    pub fn new(min: Vector2<f64>, max: Vector2<f64>) -> Self {
        Self { min, max }
    }

    pub fn from_center_size(center: Vector2<f64>, size: Vector2<f64>) -> Self {
        let half = size * 0.5;
        Self { min: center - half, max: center + half }
    }

    pub fn from_points(points: &[Vector2<f64>]) -> Option<Self> {
        let (first, rest) = points.split_first()?;
        let mut b = BBox2::new(*first, *first);
        for p in rest {
            b.min = b.min.inf(p);
            b.max = b.max.sup(p);
        }
        Some(b)
    }

    pub fn center(&self) -> Vector2<f64> {
        (self.min + self.max) * 0.5
    }
    pub fn size(&self) -> Vector2<f64> {
        self.max - self.min
    }

    pub fn contains(&self, p: Vector2<f64>) -> bool {
        p.x >= self.min.x && p.x <= self.max.x && p.y >= self.min.y && p.y <= self.max.y
    }

    pub fn union(&self, other: &BBox2) -> BBox2 {
        BBox2::new(self.min.inf(&other.min), self.max.sup(&other.max))
    }

    pub fn intersection(&self, other: &BBox2) -> BBox2 {
        let min = self.min.sup(&other.min);
        let max = self.max.inf(&other.max);
        BBox2::new(min, max.sup(&min))
    }

    pub fn enlarge(&self, d: f64) -> BBox2 {
        let ext = Vector2::repeat(d);
        BBox2::new(self.min - ext, self.max + ext)
    }

    pub fn scale_size(&self, k: f64) -> BBox2 {
        BBox2::from_center_size(self.center(), self.size() * k)
    }

    pub fn corners(&self) -> [Vector2<f64>; 4] {
        let (a, b) = (self.min, self.max);
        [
            Vector2::new(a.x, a.y),
            Vector2::new(b.x, a.y),
            Vector2::new(a.x, b.y),
            Vector2::new(b.x, b.y),
        ]
    }

    pub fn transform(&self, iso: &Isometry2<f64>) -> BBox2 {
        let moved = self.corners().map(|c| iso.transform_point(&Point2::from(c)).coords);
        BBox2::from_points(&moved).unwrap_or(*self)
    }

    /// Extend to 3D with the given z range.
    pub fn extend_z(&self, z_min: f64, z_max: f64) -> BBox3 {
        BBox3::new(
            Vector3::new(self.min.x, self.min.y, z_min),
            Vector3::new(self.max.x, self.max.y, z_max),
        )
    }

    pub fn random_point<R: Rng + ?Sized>(&self, rng: &mut R) -> Vector2<f64> {
        Vector2::new(
            lerp(self.min.x, self.max.x, rng.gen::<f64>()),
            lerp(self.min.y, self.max.y, rng.gen::<f64>()),
        )
    }

    pub fn random_set<R: Rng + ?Sized>(&self, rng: &mut R, n: usize) -> Vec<Vector2<f64>> {
        (0..n).map(|_| self.random_point(rng)).collect()
    }
}

fn lerp(a: f64, b: f64, t: f64) -> f64 {
    a + (b - a) * t
}
