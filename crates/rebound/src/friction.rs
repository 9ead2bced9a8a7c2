//! Free deceleration under exponential drag.
//!
//! [`Deceleration`] is the contract [`Scroll`](crate::Scroll) consumes for
//! in-bounds motion; [`Friction`] is the standard model shipped with the
//! crate.
//!
//! # Example
//!
//! ```rust
//! use rebound::{Deceleration, Friction};
//!
//! let mut friction = Friction::new(0.01)?;
//! friction.set(0.0, -100.0);
//!
//! // Velocity decays by a factor of `drag` every second.
//! assert!((friction.dx(1.0) + 1.0).abs() < 1e-9);
//! assert!(friction.x(1.0) < 0.0);
//! # Ok::<(), rebound::Error>(())
//! ```

use tracing::warn;

use crate::error::{Error, Result};
use crate::param::{self, Parameter, Tunable};

/// Label of the drag coefficient in [`Friction::parameters`].
pub const DRAG: &str = "Friction";

/// Speed below which friction motion counts as finished.
const STOP_SPEED: f64 = 1.0;

/// A free-deceleration model.
///
/// Times passed to `x`, `dx` and `done` are seconds elapsed since the last
/// [`set`](Deceleration::set).
pub trait Deceleration: Tunable {
    /// Begins decelerating from `position` with `velocity`.
    fn set(&mut self, position: f64, velocity: f64);

    /// Position at elapsed time `t`.
    fn x(&self, t: f64) -> f64;

    /// Velocity at elapsed time `t`.
    fn dx(&self, t: f64) -> f64;

    /// Returns `true` once the velocity has decayed to near zero.
    fn done(&self, t: f64) -> bool;
}

/// Exponential drag: velocity is multiplied by `drag` every second.
///
/// With `k = −ln(drag)`:
///
/// - `dx(t) = v0·e^(−k·t)`
/// - `x(t) = x0 + (v0 / k)·(1 − e^(−k·t))`
#[derive(Debug, Clone, PartialEq)]
pub struct Friction {
    drag: f64,
    drag_log: f64,
    x0: f64,
    v0: f64,
    origin: f64,
}

impl Friction {
    /// Creates a friction model with the given drag coefficient.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidDrag`] unless `0 < drag < 1`.
    pub fn new(drag: f64) -> Result<Self> {
        let drag_log = Self::checked_log(drag)?;
        Ok(Self {
            drag,
            drag_log,
            x0: 0.0,
            v0: 0.0,
            origin: 0.0,
        })
    }

    fn checked_log(drag: f64) -> Result<f64> {
        if drag > 0.0 && drag < 1.0 {
            Ok(drag.ln())
        } else {
            Err(Error::InvalidDrag(drag))
        }
    }

    /// The drag coefficient.
    #[inline]
    pub fn drag(&self) -> f64 {
        self.drag
    }

    /// Replaces the drag coefficient, re-seeding the motion from its state at
    /// elapsed time `t` so the change introduces no jump.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidDrag`] and leaves the model untouched unless
    /// `0 < drag < 1`.
    pub fn reconfigure(&mut self, drag: f64, t: f64) -> Result<()> {
        let drag_log = Self::checked_log(drag)?;
        let (x, v) = (self.x(t), self.dx(t));
        self.drag = drag;
        self.drag_log = drag_log;
        self.x0 = x;
        self.v0 = v;
        self.origin = t;
        Ok(())
    }

    #[inline]
    fn decay(&self, t: f64) -> f64 {
        self.drag.powf(t - self.origin)
    }
}

impl Default for Friction {
    /// Drag of `0.01`: a flick keeps 1% of its speed after one second.
    fn default() -> Self {
        Self {
            drag: 0.01,
            drag_log: 0.01_f64.ln(),
            x0: 0.0,
            v0: 0.0,
            origin: 0.0,
        }
    }
}

impl Deceleration for Friction {
    fn set(&mut self, position: f64, velocity: f64) {
        self.x0 = position;
        self.v0 = velocity;
        self.origin = 0.0;
    }

    fn x(&self, t: f64) -> f64 {
        self.x0 + self.v0 * (self.decay(t) - 1.0) / self.drag_log
    }

    fn dx(&self, t: f64) -> f64 {
        self.v0 * self.decay(t)
    }

    fn done(&self, t: f64) -> bool {
        self.dx(t).abs() < STOP_SPEED
    }
}

impl Tunable for Friction {
    fn parameters(&self) -> Vec<Parameter> {
        vec![Parameter::new(DRAG, self.drag, 0.001, 0.1)]
    }

    fn set_parameter(&mut self, label: &str, value: f64, now: f64) -> Result<()> {
        if label != DRAG {
            return Err(Error::UnknownParameter(label.to_string()));
        }
        param::warn_if_out_of_range(&self.parameters(), label, value);
        self.reconfigure(value, now).inspect_err(|err| {
            warn!(label, value, %err, "friction reconfigure rejected");
        })
    }
}
