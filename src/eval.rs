//! Batch evaluation and a throughput benchmark.
//!
//! SDF trees are immutable and `Send + Sync`, so a batch can be split across
//! the rayon pool with no locking.

use std::time::{Duration, Instant};
use nalgebra::Vector3;
use rand::rngs::StdRng;
use rand::SeedableRng;
use rayon::prelude::*;
use serde::{Deserialize, Serialize};
use tracing::info;
use crate::error::{invalid, require_positive, Result};
use crate::shape::{Sdf, Sdf2d};

/// Evaluate `sdf` at every point, in order.
pub fn evaluate_batch<S: Sdf + ?Sized>(sdf: &S, points: &[Vector3<f64>]) -> Vec<f64> {
    points.iter().map(|p| sdf.evaluate(*p)).collect()
}

/// Evaluate `sdf` at every point on the rayon pool. Output order matches
/// `points`.
pub fn evaluate_batch_parallel<S: Sdf + ?Sized>(sdf: &S, points: &[Vector3<f64>]) -> Vec<f64> {
    points.par_iter().map(|p| sdf.evaluate(*p)).collect()
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BenchmarkConfig {
    /// Number of evaluations to time.
    pub samples: usize,
    /// Scale applied to the bounding box before sampling, so some points
    /// fall outside the shape.
    pub box_scale: f64,
    pub seed: u64,
}

impl Default for BenchmarkConfig {
    fn default() -> Self {
        Self { samples: 1_000_000, box_scale: 1.2, seed: 0 }
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct BenchmarkReport {
    pub description: String,
    pub samples: usize,
    pub elapsed: Duration,
    pub evals_per_sec: f64,
}

impl std::fmt::Display for BenchmarkReport {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} evaluations ({})", self.description, format_rate(self.evals_per_sec))
    }
}

/// Time `config.samples` evaluations at random points in the (scaled)
/// bounding box of `sdf`.
pub fn benchmark<S: Sdf + ?Sized>(
    description: &str,
    sdf: &S,
    config: &BenchmarkConfig,
) -> Result<BenchmarkReport> {
    check_config(config)?;
    let bbox = sdf.bounding_box().scale_size(config.box_scale);
    let mut rng = StdRng::seed_from_u64(config.seed);
    let points = bbox.random_set(&mut rng, config.samples);
    Ok(time_evaluations(description, &points, |p| sdf.evaluate(*p)))
}

/// [`benchmark`] for a 2D profile.
pub fn benchmark_2d<S: Sdf2d + ?Sized>(
    description: &str,
    sdf: &S,
    config: &BenchmarkConfig,
) -> Result<BenchmarkReport> {
    check_config(config)?;
    let bbox = sdf.bounding_box().scale_size(config.box_scale);
    let mut rng = StdRng::seed_from_u64(config.seed);
    let points = bbox.random_set(&mut rng, config.samples);
    Ok(time_evaluations(description, &points, |p| sdf.evaluate(*p)))
}

fn check_config(config: &BenchmarkConfig) -> Result<()> {
    if config.samples == 0 {
        return Err(invalid("samples", "must be at least 1"));
    }
    require_positive("box_scale", config.box_scale)?;
    Ok(())
}

fn time_evaluations<P>(
    description: &str,
    points: &[P],
    eval: impl Fn(&P) -> f64,
) -> BenchmarkReport {
    let start = Instant::now();
    let mut sink = 0.0;
    for p in points {
        sink += eval(p);
    }
    let elapsed = start.elapsed();
    std::hint::black_box(sink);

    let samples = points.len();
    let evals_per_sec = samples as f64 / elapsed.as_secs_f64().max(f64::MIN_POSITIVE);
    info!(
        description,
        samples,
        elapsed_ms = elapsed.as_secs_f64() * 1e3,
        rate = %format_rate(evals_per_sec),
        "benchmark finished"
    );
    BenchmarkReport {
        description: description.to_string(),
        samples,
        elapsed,
        evals_per_sec,
    }
}

/// Human-readable throughput, e.g. `"12.50 M evals/sec"`.
pub fn format_rate(evals_per_sec: f64) -> String {
    if evals_per_sec > 1e9 {
        format!("{:.2} G evals/sec", evals_per_sec / 1e9)
    } else if evals_per_sec > 1e6 {
        format!("{:.2} M evals/sec", evals_per_sec / 1e6)
    } else if evals_per_sec > 1e3 {
        format!("{:.2} K evals/sec", evals_per_sec / 1e3)
    } else {
        format!("{evals_per_sec:.2} evals/sec")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rate_units() {
        assert_eq!(format_rate(2.5e9), "2.50 G evals/sec");
        assert_eq!(format_rate(12.5e6), "12.50 M evals/sec");
        assert_eq!(format_rate(4_000.0), "4.00 K evals/sec");
        assert_eq!(format_rate(10.0), "10.00 evals/sec");
    }
}
