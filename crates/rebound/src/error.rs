//! Error types for the motion models.

use thiserror::Error;

/// Errors returned when configuring a motion model.
///
/// Evaluating a model (`x`, `dx`, `done`) never fails; only constructing or
/// reconfiguring one can.
///
/// # Example
///
/// ```rust
/// use rebound::{Error, Spring};
///
/// let err = Spring::new(0.0, 90.0, 20.0).unwrap_err();
/// assert!(matches!(err, Error::InvalidPhysicalParameters { .. }));
/// ```
#[derive(Error, Debug, Clone, PartialEq)]
pub enum Error {
    /// Spring constants that cannot describe a damped oscillator.
    ///
    /// Mass must be strictly positive; every constant must be finite and
    /// non-negative.
    #[error(
        "invalid physical parameters: mass={mass}, spring_constant={spring_constant}, damping={damping}"
    )]
    InvalidPhysicalParameters {
        /// Requested mass.
        mass: f64,
        /// Requested spring constant.
        spring_constant: f64,
        /// Requested damping coefficient.
        damping: f64,
    },

    /// Drag coefficient outside the open interval `(0, 1)`.
    #[error("invalid drag coefficient: {0} (expected 0 < drag < 1)")]
    InvalidDrag(f64),

    /// A tuning write named a parameter the model does not expose.
    #[error("unknown parameter: {0:?}")]
    UnknownParameter(String),
}

/// A specialized [`Result`] type for rebound operations.
pub type Result<T> = std::result::Result<T, Error>;
