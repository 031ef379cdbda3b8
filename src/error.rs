use thiserror::Error;

/// Errors raised while constructing SDF nodes.
///
/// Evaluation never fails; everything that can go wrong is caught when the
/// tree is built.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum SdfError {
    /// A numeric parameter is out of range.
    #[error("invalid parameter `{name}`: {reason}")]
    InvalidParameter { name: &'static str, reason: String },

    /// A polygon was frozen with too few vertices.
    #[error("polygon needs at least {min} vertices, got {got}")]
    TooFewVertices { min: usize, got: usize },

    /// Thread name missing from the registry.
    #[error("unknown thread: {0}")]
    UnknownThread(String),

    /// Thread has no hex head flat-to-flat size.
    #[error("thread {0} has no hex head size")]
    NoHexHead(String),

    #[error("unknown thread mode: {0:?} (expected \"internal\" or \"external\")")]
    UnknownThreadMode(String),

    #[error("unknown head rounding: {0:?} (expected \"\", \"t\", \"b\" or \"tb\")")]
    UnknownHeadRounding(String),
}

pub type Result<T> = std::result::Result<T, SdfError>;

pub(crate) fn invalid(name: &'static str, reason: impl Into<String>) -> SdfError {
    SdfError::InvalidParameter { name, reason: reason.into() }
}

/// Reject non-finite or non-positive values.
pub(crate) fn require_positive(name: &'static str, value: f64) -> Result<f64> {
    if value.is_finite() && value > 0.0 {
        Ok(value)
    } else {
        Err(invalid(name, format!("must be finite and > 0, got {value}")))
    }
}

/// Reject non-finite or negative values.
pub(crate) fn require_non_negative(name: &'static str, value: f64) -> Result<f64> {
    if value.is_finite() && value >= 0.0 {
        Ok(value)
    } else {
        Err(invalid(name, format!("must be finite and >= 0, got {value}")))
    }
}
