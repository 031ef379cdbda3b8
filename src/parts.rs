//! Ready-made mechanical parts built from the primitive and screw nodes:
//! washers, bolt heads, knurls, holes, board standoffs and threaded rods.

use std::fmt;
use std::str::FromStr;
use nalgebra::Vector2;
use serde::{Deserialize, Serialize};
use tracing::{debug, instrument};
use crate::builder::{Profile, Shape};
use crate::error::{invalid, require_positive, Result, SdfError};
use crate::math::deg_to_rad;
use crate::polygon::{Polygon, PolygonBuilder};
use crate::screw::knurl_starts;
use crate::thread::{ThreadMode, ThreadRegistry};

/// Flat washer of `thickness` between `r_inner` and `r_outer`.
pub fn washer(thickness: f64, r_inner: f64, r_outer: f64) -> Result<Shape> {
    require_positive("thickness", thickness)?;
    require_positive("r_inner", r_inner)?;
    if r_inner >= r_outer {
        return Err(invalid(
            "r_inner",
            format!("inner radius {r_inner} must be less than outer radius {r_outer}"),
        ));
    }
    let outer = Shape::cylinder(thickness, r_outer, 0.0)?;
    Ok(outer.subtract(Shape::cylinder(thickness, r_inner, 0.0)?))
}

// ---------------------------------------------------------------------------
// Heads
// ---------------------------------------------------------------------------

/// Which faces of a hex head are crowned.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum HeadRounding {
    #[default]
    None,
    Top,
    Bottom,
    Both,
}

impl HeadRounding {
    fn top(self) -> bool {
        matches!(self, HeadRounding::Top | HeadRounding::Both)
    }

    fn bottom(self) -> bool {
        matches!(self, HeadRounding::Bottom | HeadRounding::Both)
    }
}

impl FromStr for HeadRounding {
    type Err = SdfError;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "" => Ok(HeadRounding::None),
            "t" => Ok(HeadRounding::Top),
            "b" => Ok(HeadRounding::Bottom),
            "tb" => Ok(HeadRounding::Both),
            other => Err(SdfError::UnknownHeadRounding(other.to_string())),
        }
    }
}

impl fmt::Display for HeadRounding {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            HeadRounding::None => "",
            HeadRounding::Top => "t",
            HeadRounding::Bottom => "b",
            HeadRounding::Both => "tb",
        })
    }
}

/// Hex head for a nut or bolt: corner radius `radius`, total `height`.
///
/// Corners get a small fillet; crowned faces are cut by a large sphere so
/// the edge chamfer meets the flats.
pub fn hex_head(radius: f64, height: f64, rounding: HeadRounding) -> Result<Shape> {
    require_positive("radius", radius)?;
    require_positive("height", height)?;
    let corner_round = radius * 0.08;
    let hex = Profile::nagon(6, radius - corner_round)?.offset(corner_round);
    let mut head = hex.extrude(height)?;

    if rounding != HeadRounding::None {
        let top_round = radius * 1.6;
        // flat-to-center distance
        let d = radius * deg_to_rad(30.0).cos();
        let z_ofs = (top_round * top_round - d * d).sqrt() - 0.5 * height;
        let sphere = Shape::sphere(top_round)?;
        if rounding.top() {
            head = head.intersect(sphere.clone().translate(0.0, 0.0, -z_ofs));
        }
        if rounding.bottom() {
            head = head.intersect(sphere.translate(0.0, 0.0, z_ofs));
        }
    }
    Ok(head)
}

// ---------------------------------------------------------------------------
// Knurls
// ---------------------------------------------------------------------------

/// Triangular knurl tooth in the unrolled screw frame.
pub fn knurl_profile(radius: f64, pitch: f64, height: f64) -> Result<Profile> {
    require_positive("radius", radius)?;
    require_positive("pitch", pitch)?;
    require_positive("height", height)?;
    let mut p = PolygonBuilder::new();
    p.add(pitch / 2.0, 0.0);
    p.add(pitch / 2.0, radius);
    p.add(0.0, radius + height);
    p.add(-pitch / 2.0, radius);
    p.add(-pitch / 2.0, 0.0);
    Ok(Profile::polygon(p.freeze()?))
}

/// Knurled cylinder settings.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct KnurlParams {
    /// Length along Z.
    pub length: f64,
    /// Radius of the underlying cylinder.
    pub radius: f64,
    pub pitch: f64,
    /// Tooth height above `radius`.
    pub height: f64,
    /// Helix angle in radians.
    pub helix_angle: f64,
}

impl Default for KnurlParams {
    fn default() -> Self {
        Self {
            length: 10.0,
            radius: 5.0,
            pitch: 1.0,
            height: 0.3,
            helix_angle: deg_to_rad(45.0),
        }
    }
}

/// Diamond knurl: the intersection of a left-hand and a right-hand
/// multi-start thread with the same tooth profile.
#[instrument(level = "debug")]
pub fn knurl(params: &KnurlParams) -> Result<Shape> {
    let profile = knurl_profile(params.radius, params.pitch, params.height)?;
    let n = knurl_starts(params.radius, params.pitch, params.helix_angle);
    debug!(starts = n, "knurl starts");
    let right = profile.clone().screw(params.length, params.pitch, n)?;
    let left = profile.screw(params.length, params.pitch, -n)?;
    Ok(right.intersect(left))
}

/// Thumb-screw head: a rounded cylinder wrapped in a 45 degree knurl. Heads
/// shorter than one knurl pitch come back as the plain cylinder.
#[instrument(level = "debug")]
pub fn knurled_head(radius: f64, height: f64, pitch: f64) -> Result<Shape> {
    require_positive("radius", radius)?;
    require_positive("height", height)?;
    require_positive("pitch", pitch)?;
    let cylinder_round = radius * 0.05;
    // whole number of knurl pitches that fit under the rounded rim
    let length = pitch * ((height - cylinder_round) / pitch).floor();
    let cylinder = Shape::cylinder(height, radius, cylinder_round)?;
    if length <= 0.0 {
        debug!(height, pitch, "head too short for a knurl pitch, leaving it plain");
        return Ok(cylinder);
    }
    let knurl = knurl(&KnurlParams {
        length,
        radius,
        pitch,
        height: pitch * 0.3,
        helix_angle: deg_to_rad(45.0),
    })?;
    Ok(cylinder.union(knurl))
}

// ---------------------------------------------------------------------------
// Holes
// ---------------------------------------------------------------------------

/// Through hole of `length` and `radius` with a counterbore of `cb_radius`
/// and `cb_depth` at the top.
pub fn counterbored_hole(length: f64, radius: f64, cb_radius: f64, cb_depth: f64) -> Result<Shape> {
    let hole = Shape::cylinder(length, radius, 0.0)?;
    let bore = Shape::cylinder(cb_depth, cb_radius, 0.0)?
        .translate(0.0, 0.0, 0.5 * (length - cb_depth));
    Ok(hole.union(bore))
}

/// Through hole with a 45 degree chamfer `ch_radius` wide at the top.
pub fn chamfered_hole(length: f64, radius: f64, ch_radius: f64) -> Result<Shape> {
    let hole = Shape::cylinder(length, radius, 0.0)?;
    let chamfer = Shape::cone(ch_radius, radius, radius + ch_radius, 0.0)?
        .translate(0.0, 0.0, 0.5 * (length - ch_radius));
    Ok(hole.union(chamfer))
}

/// Through hole with a 45 degree countersink for a flat head screw.
pub fn countersunk_hole(length: f64, radius: f64) -> Result<Shape> {
    chamfered_hole(length, radius, radius)
}

// ---------------------------------------------------------------------------
// Board standoffs
// ---------------------------------------------------------------------------

/// PCB standoff settings. A zero `number_webs` gives a plain pillar; a zero
/// `hole_radius` or `hole_depth` leaves it solid.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct StandoffParams {
    pub pillar_height: f64,
    pub pillar_radius: f64,
    pub hole_depth: f64,
    pub hole_radius: f64,
    pub number_webs: usize,
    pub web_height: f64,
    pub web_radius: f64,
    pub web_width: f64,
}

impl Default for StandoffParams {
    fn default() -> Self {
        Self {
            pillar_height: 10.0,
            pillar_radius: 3.0,
            hole_depth: 8.0,
            hole_radius: 1.0,
            number_webs: 4,
            web_height: 6.0,
            web_radius: 6.0,
            web_width: 1.5,
        }
    }
}

/// One triangular web standing on the pillar's base plane along +X.
fn pillar_web(p: &StandoffParams) -> Result<Shape> {
    require_positive("web_radius", p.web_radius)?;
    require_positive("web_height", p.web_height)?;
    let web = Polygon::new(vec![
        Vector2::new(0.0, 0.0),
        Vector2::new(p.web_radius, 0.0),
        Vector2::new(0.0, p.web_height),
    ])?;
    Ok(Profile::polygon(web)
        .extrude(p.web_width)?
        .rotate_x(deg_to_rad(90.0))
        .translate(0.0, 0.0, -0.5 * p.pillar_height))
}

fn pillar_hole(p: &StandoffParams) -> Result<Option<Shape>> {
    if p.hole_radius == 0.0 || p.hole_depth == 0.0 {
        return Ok(None);
    }
    let hole = Shape::cylinder(p.hole_depth, p.hole_radius, 0.0)?
        .translate(0.0, 0.0, 0.5 * (p.pillar_height - p.hole_depth));
    Ok(Some(hole))
}

/// Board standoff: a pillar with optional stiffening webs and an optional
/// blind hole in the top.
#[instrument(level = "debug")]
pub fn standoff(p: &StandoffParams) -> Result<Shape> {
    let mut s = Shape::cylinder(p.pillar_height, p.pillar_radius, 0.0)?;
    if p.number_webs > 0 {
        s = s.union(pillar_web(p)?.rotate_copy(p.number_webs)?);
    }
    if let Some(hole) = pillar_hole(p)? {
        s = s.subtract(hole);
    }
    if p.number_webs > 0 {
        // trim webs that would poke above the pillar
        s = s.intersect(Shape::cylinder(p.pillar_height, 2.0 * p.web_radius, 0.0)?);
    }
    Ok(s)
}

// ---------------------------------------------------------------------------
// Finger button
// ---------------------------------------------------------------------------

/// Flexure push button cut into a panel: a rounded button on a finger,
/// surrounded by a `gap`.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FingerButtonParams {
    /// Button width (x) and height (y).
    pub size: [f64; 2],
    /// Gap between the button and the panel.
    pub gap: f64,
    /// Length of the flexure finger.
    pub length: f64,
    /// Panel thickness, used by [`finger_button_cutout`].
    pub thickness: f64,
}

impl Default for FingerButtonParams {
    fn default() -> Self {
        Self { size: [10.0, 10.0], gap: 0.6, length: 15.0, thickness: 2.0 }
    }
}

/// 2D outline of the slot that frees the button and its finger.
pub fn finger_button(k: &FingerButtonParams) -> Result<Profile> {
    let [sx, sy] = k.size;
    require_positive("size.x", sx)?;
    require_positive("size.y", sy)?;
    require_positive("gap", k.gap)?;
    require_positive("length", k.length)?;

    let r0 = 0.4 * sx.min(sy);
    let r1 = r0 + k.gap;
    let finger_width = 0.7 * sx;
    let finger_ofs = 0.5 * (k.length + sy);

    let button = Profile::rect(Vector2::new(sx, sy), r0)?;
    let surround = Profile::rect(Vector2::new(sx + 2.0 * k.gap, sy + 2.0 * k.gap), r1)?;
    let finger = Profile::rect(Vector2::new(finger_width, k.length), 0.0)?
        .translate(0.0, finger_ofs);
    let fx_size = Vector2::new(finger_width + 2.0 * k.gap, k.length);
    let finger_surround = Profile::rect(fx_size, r0.min(0.5 * fx_size.min()))?
        .translate(0.0, finger_ofs);

    Ok(surround.union(finger_surround).subtract(button.union(finger)))
}

/// The button slot extruded through a panel of `thickness`.
pub fn finger_button_cutout(k: &FingerButtonParams) -> Result<Shape> {
    finger_button(k)?.extrude(k.thickness)
}

// ---------------------------------------------------------------------------
// Threads
// ---------------------------------------------------------------------------

/// Single-start threaded rod of `length` for the named size.
#[instrument(level = "debug", skip(registry))]
pub fn threaded_rod(
    registry: &ThreadRegistry,
    name: &str,
    length: f64,
    mode: ThreadMode,
) -> Result<Shape> {
    let thread = registry.get(name)?;
    thread.profile(mode)?.screw(length, thread.pitch, 1)
}

/// Bolt: a hex head on top of a threaded shank of `length`.
#[instrument(level = "debug", skip(registry))]
pub fn bolt(
    registry: &ThreadRegistry,
    name: &str,
    length: f64,
    rounding: HeadRounding,
) -> Result<Shape> {
    let thread = registry.get(name)?;
    let hex_r = thread.hex_radius()?;
    let hex_h = thread.hex_height()?;
    let head = hex_head(hex_r, hex_h, rounding)?.translate(0.0, 0.0, 0.5 * (length + hex_h));
    let shank = thread.profile(ThreadMode::External)?.screw(length, thread.pitch, 1)?;
    Ok(head.union(shank))
}

/// Hex nut of the named size with an internal thread cut through it.
#[instrument(level = "debug", skip(registry))]
pub fn nut(registry: &ThreadRegistry, name: &str, rounding: HeadRounding) -> Result<Shape> {
    let thread = registry.get(name)?;
    let hex_r = thread.hex_radius()?;
    let hex_h = thread.hex_height()?;
    let body = hex_head(hex_r, hex_h, rounding)?;
    let bore = thread.profile(ThreadMode::Internal)?.screw(hex_h, thread.pitch, 1)?;
    Ok(body.subtract(bore))
}
