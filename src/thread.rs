//! Standard screw thread profiles and the thread size registry.
//!
//! Profiles are drawn in the unrolled screw frame used by [`Screw`]:
//! x along the screw axis with one thread centered on x = 0, y the distance
//! from the axis. Each profile spans more than one pitch so the sawtooth
//! fold never leaves it.
//!
//! No tolerancing is applied. For a working fit, adjust `radius` up or down
//! before building the profile.
//!
//! [`Screw`]: crate::screw::Screw

use std::collections::HashMap;
use std::fmt;
use std::str::FromStr;
use std::sync::OnceLock;
use serde::{Deserialize, Serialize};
use crate::builder::Profile;
use crate::error::{invalid, require_positive, Result, SdfError};
use crate::math::deg_to_rad;
use crate::polygon::PolygonBuilder;

/// Which side of the mating pair a thread profile is cut for.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ThreadMode {
    /// Nut side: the profile is the shape removed from the part.
    Internal,
    /// Bolt side.
    External,
}

impl FromStr for ThreadMode {
    type Err = SdfError;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "internal" => Ok(ThreadMode::Internal),
            "external" => Ok(ThreadMode::External),
            other => Err(SdfError::UnknownThreadMode(other.to_string())),
        }
    }
}

impl fmt::Display for ThreadMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            ThreadMode::Internal => "internal",
            ThreadMode::External => "external",
        })
    }
}

fn check_thread(radius: f64, pitch: f64) -> Result<()> {
    require_positive("radius", radius)?;
    require_positive("pitch", pitch)?;
    Ok(())
}

/// ACME thread profile (29 degree included angle).
pub fn acme(radius: f64, pitch: f64) -> Result<Profile> {
    check_thread(radius, pitch)?;
    let h = radius - 0.5 * pitch;
    if h <= 0.0 {
        return Err(invalid("pitch", format!("ACME pitch {pitch} too coarse for radius {radius}")));
    }
    let delta = 0.25 * pitch * deg_to_rad(29.0 / 2.0).tan();
    let x0 = 0.25 * pitch - delta;
    let x1 = 0.25 * pitch + delta;

    let mut p = PolygonBuilder::new();
    p.add(radius, 0.0);
    p.add(radius, h);
    p.add(x1, h);
    p.add(x0, radius);
    p.add(-x0, radius);
    p.add(-x1, h);
    p.add(-radius, h);
    p.add(-radius, 0.0);
    Ok(Profile::polygon(p.freeze()?))
}

/// ISO metric / Unified thread profile (60 degree flanks).
///
/// External profiles get a rounded root, internal ones a rounded crest.
pub fn iso(radius: f64, pitch: f64, mode: ThreadMode) -> Result<Profile> {
    check_thread(radius, pitch)?;
    let theta = deg_to_rad(30.0);
    // height of the fundamental triangle
    let h = pitch / (2.0 * theta.tan());
    let r_major = radius;
    let r0 = r_major - (7.0 / 8.0) * h;
    if r0 <= 0.0 {
        return Err(invalid("pitch", format!("ISO pitch {pitch} too coarse for radius {radius}")));
    }

    let mut p = PolygonBuilder::new();
    match mode {
        ThreadMode::External => {
            let r_root = (pitch / 8.0) / theta.cos();
            let x_ofs = pitch / 16.0;
            p.add(pitch, 0.0);
            p.add(pitch, r0 + h);
            p.add(pitch / 2.0, r0).smooth(r_root, 5);
            p.add(x_ofs, r_major);
            p.add(-x_ofs, r_major);
            p.add(-pitch / 2.0, r0).smooth(r_root, 5);
            p.add(-pitch, r0 + h);
            p.add(-pitch, 0.0);
        }
        ThreadMode::Internal => {
            let r_minor = r0 + h / 4.0;
            let r_crest = (pitch / 16.0) / theta.cos();
            let x_ofs = pitch / 8.0;
            p.add(pitch, 0.0);
            p.add(pitch, r_minor);
            p.add(pitch / 2.0 - x_ofs, r_minor);
            p.add(0.0, r0 + h).smooth(r_crest, 5);
            p.add(-pitch / 2.0 + x_ofs, r_minor);
            p.add(-pitch, r_minor);
            p.add(-pitch, 0.0);
        }
    }
    Ok(Profile::polygon(p.freeze()?))
}

struct Buttress {
    h0: f64,
    h1: f64,
    hp: f64,
    t0: f64,
    t1: f64,
}

/// 45/7 buttress geometry shared by the ANSI and plastic forms.
fn buttress(radius: f64, pitch: f64) -> Result<Buttress> {
    check_thread(radius, pitch)?;
    let t0 = deg_to_rad(45.0).tan();
    let t1 = deg_to_rad(7.0).tan();
    // thread engagement
    let b = 0.6;
    let h0 = pitch / (t0 + t1);
    let h1 = (b / 2.0) * pitch + 0.5 * h0;
    if radius <= h1 {
        return Err(invalid(
            "pitch",
            format!("buttress pitch {pitch} too coarse for radius {radius}"),
        ));
    }
    Ok(Buttress { h0, h1, hp: pitch / 2.0, t0, t1 })
}

/// ANSI 45/7 buttress thread (ASME B1.9).
pub fn ansi_buttress(radius: f64, pitch: f64) -> Result<Profile> {
    let Buttress { h0, h1, hp, t0, t1 } = buttress(radius, pitch)?;
    let mut p = PolygonBuilder::new();
    p.add(pitch, 0.0);
    p.add(pitch, radius);
    p.add(hp - (h0 - h1) * t1, radius);
    p.add(t0 * h0 - hp, radius - h1).smooth(0.0714 * pitch, 5);
    p.add((h0 - h1) * t0 - hp, radius);
    p.add(-pitch, radius);
    p.add(-pitch, 0.0);
    Ok(Profile::polygon(p.freeze()?))
}

/// Screw-top style plastic buttress thread. Same flanks as the ANSI form
/// with generous rounding on every corner.
pub fn plastic_buttress(radius: f64, pitch: f64) -> Result<Profile> {
    let Buttress { h0, h1, hp, t0, t1 } = buttress(radius, pitch)?;
    let mut p = PolygonBuilder::new();
    p.add(pitch, 0.0);
    p.add(pitch, radius);
    p.add(hp - (h0 - h1) * t1, radius).smooth(0.05 * pitch, 5);
    p.add(t0 * h0 - hp, radius - h1).smooth(0.15 * pitch, 5);
    p.add((h0 - h1) * t0 - hp, radius).smooth(0.15 * pitch, 5);
    p.add(-pitch, radius);
    p.add(-pitch, 0.0);
    Ok(Profile::polygon(p.freeze()?))
}

// ---------------------------------------------------------------------------
// Registry
// ---------------------------------------------------------------------------

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum Units {
    #[serde(rename = "inch")]
    Inch,
    #[serde(rename = "mm")]
    Millimetre,
}

/// Nominal dimensions of a named thread size.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ThreadParameters {
    pub name: String,
    /// Nominal major radius.
    pub radius: f64,
    /// Thread-to-thread distance.
    pub pitch: f64,
    /// Hex head flat-to-flat size, if the size has a standard hex.
    pub hex_flat_to_flat: Option<f64>,
    pub units: Units,
}

impl ThreadParameters {
    /// Unified Thread Standard size from major diameter and threads per inch.
    pub fn uts(name: &str, diameter: f64, tpi: f64, hex_flat_to_flat: Option<f64>) -> Result<Self> {
        require_positive("diameter", diameter)?;
        require_positive("tpi", tpi)?;
        Ok(Self::uts_unchecked(name, diameter, tpi, hex_flat_to_flat))
    }

    /// ISO metric size from major diameter and pitch.
    pub fn iso(
        name: &str,
        diameter: f64,
        pitch: f64,
        hex_flat_to_flat: Option<f64>,
    ) -> Result<Self> {
        require_positive("diameter", diameter)?;
        require_positive("pitch", pitch)?;
        Ok(Self::iso_unchecked(name, diameter, pitch, hex_flat_to_flat))
    }

    fn uts_unchecked(name: &str, diameter: f64, tpi: f64, hex: Option<f64>) -> Self {
        Self {
            name: name.to_string(),
            radius: diameter / 2.0,
            pitch: 1.0 / tpi,
            hex_flat_to_flat: hex,
            units: Units::Inch,
        }
    }

    fn iso_unchecked(name: &str, diameter: f64, pitch: f64, hex: Option<f64>) -> Self {
        Self {
            name: name.to_string(),
            radius: diameter / 2.0,
            pitch,
            hex_flat_to_flat: hex,
            units: Units::Millimetre,
        }
    }

    /// Corner radius of the standard hex head.
    pub fn hex_radius(&self) -> Result<f64> {
        let f2f = self
            .hex_flat_to_flat
            .ok_or_else(|| SdfError::NoHexHead(self.name.clone()))?;
        Ok(f2f / (2.0 * deg_to_rad(30.0).cos()))
    }

    /// Hex head height (empirical: 5/12 of the corner diameter).
    pub fn hex_height(&self) -> Result<f64> {
        Ok(2.0 * self.hex_radius()? * (5.0 / 12.0))
    }

    /// ISO/UTS profile for this size.
    pub fn profile(&self, mode: ThreadMode) -> Result<Profile> {
        iso(self.radius, self.pitch, mode)
    }
}

/// Name → thread size lookup.
///
/// Build one with [`ThreadRegistry::new`] and fill it, or use the shared
/// table of common UTS and ISO sizes from [`ThreadRegistry::standard`].
#[derive(Clone, Debug, Default)]
pub struct ThreadRegistry {
    threads: HashMap<String, ThreadParameters>,
}

// (name, diameter in inches, threads per inch, hex flat-to-flat in inches)
const UTS_SIZES: &[(&str, f64, f64, f64)] = &[
    // coarse
    ("unc_1/4", 1.0 / 4.0, 20.0, 7.0 / 16.0),
    ("unc_5/16", 5.0 / 16.0, 18.0, 1.0 / 2.0),
    ("unc_3/8", 3.0 / 8.0, 16.0, 9.0 / 16.0),
    ("unc_7/16", 7.0 / 16.0, 14.0, 5.0 / 8.0),
    ("unc_1/2", 1.0 / 2.0, 13.0, 3.0 / 4.0),
    ("unc_9/16", 9.0 / 16.0, 12.0, 13.0 / 16.0),
    ("unc_5/8", 5.0 / 8.0, 11.0, 15.0 / 16.0),
    ("unc_3/4", 3.0 / 4.0, 10.0, 9.0 / 8.0),
    ("unc_7/8", 7.0 / 8.0, 9.0, 21.0 / 16.0),
    ("unc_1", 1.0, 8.0, 3.0 / 2.0),
    // fine
    ("unf_1/4", 1.0 / 4.0, 28.0, 7.0 / 16.0),
    ("unf_5/16", 5.0 / 16.0, 24.0, 1.0 / 2.0),
    ("unf_3/8", 3.0 / 8.0, 24.0, 9.0 / 16.0),
    ("unf_7/16", 7.0 / 16.0, 20.0, 5.0 / 8.0),
    ("unf_1/2", 1.0 / 2.0, 20.0, 3.0 / 4.0),
    ("unf_9/16", 9.0 / 16.0, 18.0, 13.0 / 16.0),
    ("unf_5/8", 5.0 / 8.0, 18.0, 15.0 / 16.0),
    ("unf_3/4", 3.0 / 4.0, 16.0, 9.0 / 8.0),
    ("unf_7/8", 7.0 / 8.0, 14.0, 21.0 / 16.0),
    ("unf_1", 1.0, 12.0, 3.0 / 2.0),
];

// (name, diameter mm, pitch mm, hex flat-to-flat mm if standard)
const ISO_SIZES: &[(&str, f64, f64, Option<f64>)] = &[
    // coarse
    ("M1x0.25", 1.0, 0.25, None),
    ("M1.2x0.25", 1.2, 0.25, None),
    ("M1.6x0.35", 1.6, 0.35, Some(3.2)),
    ("M2x0.4", 2.0, 0.4, Some(4.0)),
    ("M2.5x0.45", 2.5, 0.45, Some(5.0)),
    ("M3x0.5", 3.0, 0.5, Some(6.0)),
    ("M4x0.7", 4.0, 0.7, Some(7.0)),
    ("M5x0.8", 5.0, 0.8, Some(8.0)),
    ("M6x1", 6.0, 1.0, Some(10.0)),
    ("M8x1.25", 8.0, 1.25, Some(13.0)),
    ("M10x1.5", 10.0, 1.5, Some(17.0)),
    ("M12x1.75", 12.0, 1.75, Some(19.0)),
    ("M16x2", 16.0, 2.0, Some(24.0)),
    ("M20x2.5", 20.0, 2.5, Some(30.0)),
    ("M24x3", 24.0, 3.0, Some(36.0)),
    ("M30x3.5", 30.0, 3.5, Some(46.0)),
    ("M36x4", 36.0, 4.0, Some(55.0)),
    ("M42x4.5", 42.0, 4.5, Some(65.0)),
    ("M48x5", 48.0, 5.0, Some(75.0)),
    ("M56x5.5", 56.0, 5.5, Some(85.0)),
    ("M64x6", 64.0, 6.0, Some(95.0)),
    // fine
    ("M1x0.2", 1.0, 0.2, None),
    ("M1.2x0.2", 1.2, 0.2, None),
    ("M1.6x0.2", 1.6, 0.2, Some(3.2)),
    ("M2x0.25", 2.0, 0.25, Some(4.0)),
    ("M2.5x0.35", 2.5, 0.35, Some(5.0)),
    ("M3x0.35", 3.0, 0.35, Some(6.0)),
    ("M4x0.5", 4.0, 0.5, Some(7.0)),
    ("M5x0.5", 5.0, 0.5, Some(8.0)),
    ("M6x0.75", 6.0, 0.75, Some(10.0)),
    ("M8x1", 8.0, 1.0, Some(13.0)),
    ("M10x1.25", 10.0, 1.25, Some(17.0)),
    ("M12x1.5", 12.0, 1.5, Some(19.0)),
    ("M16x1.5", 16.0, 1.5, Some(24.0)),
    ("M20x2", 20.0, 2.0, Some(30.0)),
    ("M24x2", 24.0, 2.0, Some(36.0)),
    ("M30x2", 30.0, 2.0, Some(46.0)),
    ("M36x3", 36.0, 3.0, Some(55.0)),
    ("M42x3", 42.0, 3.0, Some(65.0)),
    ("M48x3", 48.0, 3.0, Some(75.0)),
    ("M56x4", 56.0, 4.0, Some(85.0)),
    ("M64x4", 64.0, 4.0, Some(95.0)),
];

impl ThreadRegistry {
    /// An empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// The shared table of UNC/UNF and ISO coarse/fine sizes.
    /// Built on first use and immutable afterwards.
    pub fn standard() -> &'static ThreadRegistry {
        static STANDARD: OnceLock<ThreadRegistry> = OnceLock::new();
        STANDARD.get_or_init(|| {
            let mut reg = ThreadRegistry::new();
            for &(name, dia, tpi, hex) in UTS_SIZES {
                reg.insert(ThreadParameters::uts_unchecked(name, dia, tpi, Some(hex)));
            }
            for &(name, dia, pitch, hex) in ISO_SIZES {
                reg.insert(ThreadParameters::iso_unchecked(name, dia, pitch, hex));
            }
            tracing::debug!(sizes = reg.len(), "built standard thread registry");
            reg
        })
    }

    /// Add or replace a size.
    pub fn insert(&mut self, params: ThreadParameters) -> &mut Self {
        self.threads.insert(params.name.clone(), params);
        self
    }

    /// Add a Unified Thread Standard size.
    pub fn insert_uts(
        &mut self,
        name: &str,
        diameter: f64,
        tpi: f64,
        hex_flat_to_flat: Option<f64>,
    ) -> Result<&mut Self> {
        let params = ThreadParameters::uts(name, diameter, tpi, hex_flat_to_flat)?;
        Ok(self.insert(params))
    }

    /// Add an ISO metric size.
    pub fn insert_iso(
        &mut self,
        name: &str,
        diameter: f64,
        pitch: f64,
        hex_flat_to_flat: Option<f64>,
    ) -> Result<&mut Self> {
        let params = ThreadParameters::iso(name, diameter, pitch, hex_flat_to_flat)?;
        Ok(self.insert(params))
    }

    pub fn get(&self, name: &str) -> Result<&ThreadParameters> {
        self.threads
            .get(name)
            .ok_or_else(|| SdfError::UnknownThread(name.to_string()))
    }

    pub fn contains(&self, name: &str) -> bool {
        self.threads.contains_key(name)
    }

    /// Registered names in sorted order.
    pub fn names(&self) -> Vec<&str> {
        let mut names: Vec<&str> = self.threads.keys().map(String::as_str).collect();
        names.sort_unstable();
        names
    }

    pub fn len(&self) -> usize {
        self.threads.len()
    }

    pub fn is_empty(&self) -> bool {
        self.threads.is_empty()
    }
}
