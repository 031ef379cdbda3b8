//! Signed distance field modelling with helical sweeps.
//!
//! Shapes are immutable expression trees ([`dag::SdfNode`]) built through
//! [`builder::Shape`] and [`builder::Profile`]. Thread profiles, the thread
//! size registry and common hardware live in [`thread`] and [`parts`].

pub mod builder;
pub mod csg;
pub mod dag;
pub mod error;
pub mod eval;
pub mod math;
pub mod parts;
pub mod polygon;
pub mod primitives;
pub mod screw;
pub mod shape;
pub mod thread;
pub mod types;

pub use builder::{Profile, Shape};
pub use error::{Result, SdfError};
pub use shape::{Sdf, Sdf2d};
pub use types::{BBox2, BBox3};
