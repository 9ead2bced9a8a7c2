//! Tunable-parameter descriptors.
//!
//! Models expose the constants a tuning tool may adjust as a flat list of
//! [`Parameter`] values. Reading is the `value` snapshot taken when the list
//! was built; writing goes back through [`Tunable::set_parameter`].

use tracing::warn;

use crate::error::Result;

/// Describes one adjustable constant of a motion model.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Parameter {
    /// Human-readable label, also used as the key for writes.
    pub label: &'static str,
    /// Current value.
    pub value: f64,
    /// Lowest value a tuning tool should offer.
    pub min: f64,
    /// Highest value a tuning tool should offer.
    pub max: f64,
}

impl Parameter {
    /// Creates a descriptor.
    #[inline]
    pub const fn new(label: &'static str, value: f64, min: f64, max: f64) -> Self {
        Self {
            label,
            value,
            min,
            max,
        }
    }

    /// Returns `true` if `value` lies inside `[min, max]`.
    #[inline]
    pub fn contains(&self, value: f64) -> bool {
        (self.min..=self.max).contains(&value)
    }
}

/// Logs a warning if `value` lies outside the advertised range of `label`.
///
/// Out-of-range writes are still applied when physically valid.
pub(crate) fn warn_if_out_of_range(parameters: &[Parameter], label: &str, value: f64) {
    if let Some(param) = parameters
        .iter()
        .find(|p| p.label == label && !p.contains(value))
    {
        warn!(
            label,
            value,
            min = param.min,
            max = param.max,
            "tuning value outside advertised range"
        );
    }
}

/// A model whose constants can be read and written by an external tuning tool.
pub trait Tunable {
    /// Lists the adjustable constants with their current values.
    fn parameters(&self) -> Vec<Parameter>;

    /// Writes the parameter named `label`.
    ///
    /// `now` is the instant of the write on the model's timeline; models that
    /// are in motion re-seed themselves from their state at that instant so
    /// the change introduces no jump.
    ///
    /// # Errors
    ///
    /// Returns [`Error::UnknownParameter`](crate::Error::UnknownParameter) if
    /// the model has no such parameter, or the model's validation error if
    /// `value` is not physically meaningful.
    fn set_parameter(&mut self, label: &str, value: f64, now: f64) -> Result<()>;

    /// Returns `true` if this model exposes a parameter named `label`.
    fn has_parameter(&self, label: &str) -> bool {
        self.parameters().iter().any(|p| p.label == label)
    }
}
