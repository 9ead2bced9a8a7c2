//! Closed-form damped harmonic oscillator (spring).
//!
//! The spring solves `m·x'' + c·x' + k·x = 0` analytically, where `x` is the
//! displacement from a movable equilibrium. Instead of stepping the motion
//! frame by frame, each (re)configuration produces closed-form position and velocity
//! functions that can be evaluated at any elapsed time.
//!
//! Moving the equilibrium mid-flight ([`Spring::set_end`]) or changing the
//! constants ([`Spring::reconfigure`]) re-derives the solution from the
//! position and velocity the spring has *at that instant*, so the motion stays
//! continuous across the change.
//!
//! # Example
//!
//! ```rust
//! use rebound::Spring;
//!
//! let mut spring = Spring::new(1.0, 90.0, 20.0)?;
//! spring.snap(0.0, 0.0);
//! spring.set_end(100.0, 0.0, 0.0);
//!
//! assert!(spring.x(0.0).abs() < 1e-9);
//! assert!(spring.done(5.0));
//! assert!((spring.x(5.0) - 100.0).abs() < 0.4);
//! # Ok::<(), rebound::Error>(())
//! ```

use tracing::{trace, warn};

use crate::error::{Error, Result};
use crate::param::{self, Parameter, Tunable};

/// Tolerance for treating positions and velocities as equal or zero.
///
/// Expressed in the caller's units (pixels for scrolling), shared by position
/// and velocity comparisons.
pub const SETTLE_EPSILON: f64 = 0.4;

/// Label of the spring constant in [`Spring::parameters`].
pub const SPRING_CONSTANT: &str = "Spring Constant";

/// Label of the damping coefficient in [`Spring::parameters`].
pub const DAMPING: &str = "Damping";

#[inline]
pub(crate) fn almost_equal(a: f64, b: f64) -> bool {
    a > b - SETTLE_EPSILON && a < b + SETTLE_EPSILON
}

#[inline]
pub(crate) fn almost_zero(a: f64) -> bool {
    almost_equal(a, 0.0)
}

/// Damping regime of a spring, determined by the sign of `c² − 4mk`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Regime {
    /// `c² = 4mk`: fastest return without oscillation.
    CriticallyDamped,
    /// `c² > 4mk`: slow return, no oscillation.
    Overdamped,
    /// `c² < 4mk`: oscillates around equilibrium with decay.
    Underdamped,
}

/// Physical constants of a spring.
///
/// # Example
///
/// ```rust
/// use rebound::{Regime, SpringParams};
///
/// let params = SpringParams::default();
/// assert_eq!(params.regime(), Regime::Overdamped);
/// assert!(params.validate().is_ok());
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SpringParams {
    /// Mass `m`. Must be strictly positive.
    pub mass: f64,
    /// Spring constant (stiffness) `k`.
    pub spring_constant: f64,
    /// Damping coefficient `c`.
    pub damping: f64,
}

impl SpringParams {
    /// Creates a parameter set without validating it.
    #[inline]
    pub const fn new(mass: f64, spring_constant: f64, damping: f64) -> Self {
        Self {
            mass,
            spring_constant,
            damping,
        }
    }

    /// Checks that the constants describe a damped oscillator.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidPhysicalParameters`] if `mass <= 0` or any
    /// constant is negative or not finite.
    pub fn validate(&self) -> Result<()> {
        let finite = self.mass.is_finite()
            && self.spring_constant.is_finite()
            && self.damping.is_finite();
        if !finite || self.mass <= 0.0 || self.spring_constant < 0.0 || self.damping < 0.0 {
            return Err(Error::InvalidPhysicalParameters {
                mass: self.mass,
                spring_constant: self.spring_constant,
                damping: self.damping,
            });
        }
        Ok(())
    }

    /// The discriminant `c² − 4mk` of the characteristic equation.
    #[inline]
    pub fn discriminant(&self) -> f64 {
        self.damping * self.damping - 4.0 * self.mass * self.spring_constant
    }

    /// Classifies the damping regime.
    ///
    /// A discriminant within rounding error of zero counts as critical
    /// damping, so `(1, 100, 20)` is critically damped even though the two
    /// products are computed separately.
    pub fn regime(&self) -> Regime {
        let cc = self.damping * self.damping;
        let mk = 4.0 * self.mass * self.spring_constant;
        let disc = cc - mk;
        if disc.abs() <= 4.0 * f64::EPSILON * cc.max(mk) {
            Regime::CriticallyDamped
        } else if disc > 0.0 {
            Regime::Overdamped
        } else {
            Regime::Underdamped
        }
    }
}

impl Default for SpringParams {
    /// `m = 1`, `k = 90`, `c = 20`: a stiff, slightly overdamped bounce.
    fn default() -> Self {
        Self::new(1.0, 90.0, 20.0)
    }
}

/// Closed-form displacement-from-equilibrium as a function of elapsed time.
#[derive(Debug, Clone, Copy, PartialEq)]
pub(crate) enum Solution {
    /// Motionless at equilibrium.
    Rest,
    /// `x(t) = (c1 + c2·t)·e^(r·t)`
    Critical { r: f64, c1: f64, c2: f64 },
    /// `x(t) = c1·e^(r1·t) + c2·e^(r2·t)`
    Over { r1: f64, r2: f64, c1: f64, c2: f64 },
    /// `x(t) = e^(r·t)·(c1·cos(ω·t) + c2·sin(ω·t))`
    Under { r: f64, w: f64, c1: f64, c2: f64 },
}

impl Solution {
    /// Solves for initial displacement `x0` and velocity `v0` at `t = 0`.
    fn solve(params: SpringParams, x0: f64, v0: f64) -> Self {
        let SpringParams {
            mass: m,
            spring_constant: k,
            damping: c,
        } = params;

        match params.regime() {
            Regime::CriticallyDamped => {
                // x(0) = c1, x'(0) = r·c1 + c2. Not c2 = v0/(r·x0), which is
                // undefined at x0 = 0 and misses x'(0) = v0.
                let r = -c / (2.0 * m);
                Self::Critical {
                    r,
                    c1: x0,
                    c2: v0 - r * x0,
                }
            }
            Regime::Overdamped => {
                let root = params.discriminant().sqrt();
                let r1 = (-c - root) / (2.0 * m);
                let r2 = (-c + root) / (2.0 * m);
                let c2 = (v0 - r1 * x0) / (r2 - r1);
                Self::Over {
                    r1,
                    r2,
                    c1: x0 - c2,
                    c2,
                }
            }
            Regime::Underdamped => {
                let w = (4.0 * m * k - c * c).sqrt() / (2.0 * m);
                let r = -c / (2.0 * m);
                Self::Under {
                    r,
                    w,
                    c1: x0,
                    c2: (v0 - r * x0) / w,
                }
            }
        }
    }

    fn x(&self, t: f64) -> f64 {
        match *self {
            Self::Rest => 0.0,
            Self::Critical { r, c1, c2 } => (c1 + c2 * t) * (r * t).exp(),
            Self::Over { r1, r2, c1, c2 } => c1 * (r1 * t).exp() + c2 * (r2 * t).exp(),
            Self::Under { r, w, c1, c2 } => {
                (r * t).exp() * (c1 * (w * t).cos() + c2 * (w * t).sin())
            }
        }
    }

    fn dx(&self, t: f64) -> f64 {
        match *self {
            Self::Rest => 0.0,
            Self::Critical { r, c1, c2 } => {
                let e = (r * t).exp();
                r * (c1 + c2 * t) * e + c2 * e
            }
            Self::Over { r1, r2, c1, c2 } => {
                c1 * r1 * (r1 * t).exp() + c2 * r2 * (r2 * t).exp()
            }
            Self::Under { r, w, c1, c2 } => {
                let e = (r * t).exp();
                let (sin, cos) = (w * t).sin_cos();
                e * (c2 * w * cos - c1 * w * sin) + r * e * (c2 * sin + c1 * cos)
            }
        }
    }

    fn name(&self) -> &'static str {
        match self {
            Self::Rest => "rest",
            Self::Critical { .. } => "critically-damped",
            Self::Over { .. } => "overdamped",
            Self::Under { .. } => "underdamped",
        }
    }
}

/// A damped spring pulling toward a movable equilibrium.
///
/// All timestamps (`now`) are seconds on the caller's monotonic timeline.
/// The spring remembers when its current solution started and evaluates it
/// at `now - start_time`.
///
/// A fresh spring has no motion: it sits at equilibrium `0` until the first
/// [`snap`](Spring::snap) or [`set_end`](Spring::set_end).
///
/// # Example
///
/// ```rust
/// use rebound::Spring;
///
/// let mut spring = Spring::new(1.0, 100.0, 20.0)?;
///
/// // Pin at 40 with no momentum, then pull toward 0.
/// spring.snap(40.0, 0.0);
/// spring.set_end(0.0, 0.0, 0.0);
///
/// let mut t = 0.0;
/// while !spring.done(t) {
///     t += 1.0 / 60.0;
/// }
/// assert!(spring.x(t).abs() < 0.4);
/// # Ok::<(), rebound::Error>(())
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct Spring {
    params: SpringParams,
    end_position: f64,
    solution: Option<Solution>,
    start_time: f64,
}

impl Spring {
    /// Creates a spring with the given mass, spring constant and damping.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidPhysicalParameters`] if `mass <= 0` or any
    /// constant is negative or not finite.
    pub fn new(mass: f64, spring_constant: f64, damping: f64) -> Result<Self> {
        Self::with_params(SpringParams::new(mass, spring_constant, damping))
    }

    /// Creates a spring from a parameter set.
    ///
    /// # Errors
    ///
    /// See [`SpringParams::validate`].
    pub fn with_params(params: SpringParams) -> Result<Self> {
        params.validate()?;
        Ok(Self::from_valid(params))
    }

    const fn from_valid(params: SpringParams) -> Self {
        Self {
            params,
            end_position: 0.0,
            solution: None,
            start_time: 0.0,
        }
    }

    /// Current physical constants.
    #[inline]
    pub fn params(&self) -> SpringParams {
        self.params
    }

    /// Damping regime of the current constants.
    #[inline]
    pub fn regime(&self) -> Regime {
        self.params.regime()
    }

    /// The equilibrium the spring currently pulls toward.
    #[inline]
    pub fn end_position(&self) -> f64 {
        self.end_position
    }

    /// Time origin of the current solution.
    #[inline]
    pub fn start_time(&self) -> f64 {
        self.start_time
    }

    /// Returns `true` once the spring has been snapped or given a target.
    #[inline]
    pub fn is_moving(&self) -> bool {
        self.solution.is_some()
    }

    /// Moves the equilibrium to `target`, carrying the current motion over.
    ///
    /// `velocity` is the velocity to start the new motion with. A velocity
    /// within [`SETTLE_EPSILON`] of zero means "keep whatever momentum the
    /// spring already has" rather than "stop".
    ///
    /// Nothing changes if the target is unchanged and no velocity is
    /// supplied, or if the spring is already resting at `target`.
    pub fn set_end(&mut self, target: f64, velocity: f64, now: f64) {
        if target == self.end_position && almost_zero(velocity) {
            trace!(target, "spring target unchanged");
            return;
        }

        let mut velocity = velocity;
        let mut position = self.end_position;
        if let Some(solution) = self.solution {
            let elapsed = now - self.start_time;
            if almost_zero(velocity) {
                velocity = solution.dx(elapsed);
            }
            position = solution.x(elapsed);
            if almost_zero(velocity) {
                velocity = 0.0;
            }
            if almost_zero(position) {
                position = 0.0;
            }
            position += self.end_position;

            if almost_zero(position - target) && almost_zero(velocity) {
                trace!(target, position, "spring already settled at target");
                return;
            }
        }

        self.end_position = target;
        self.resolve(position - target, velocity, now);
    }

    /// Pins the spring at `position` with no motion.
    pub fn snap(&mut self, position: f64, now: f64) {
        self.end_position = position;
        self.solution = Some(Solution::Rest);
        self.start_time = now;
    }

    /// Position at `now`.
    pub fn x(&self, now: f64) -> f64 {
        self.solution
            .map_or(0.0, |s| s.x(now - self.start_time))
            + self.end_position
    }

    /// Velocity at `now`.
    pub fn dx(&self, now: f64) -> f64 {
        self.solution.map_or(0.0, |s| s.dx(now - self.start_time))
    }

    /// Returns `true` if the spring is within [`SETTLE_EPSILON`] of its
    /// equilibrium and nearly motionless at `now`.
    pub fn done(&self, now: f64) -> bool {
        almost_equal(self.x(now), self.end_position) && almost_zero(self.dx(now))
    }

    /// Replaces the physical constants.
    ///
    /// A settled spring just takes the new constants. A moving spring
    /// re-derives its motion from its position and velocity at `now`, so the
    /// change causes no jump, and restarts its clock at `now`.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidPhysicalParameters`] and leaves the spring
    /// untouched if `params` is invalid.
    pub fn reconfigure(&mut self, params: SpringParams, now: f64) -> Result<()> {
        params.validate()?;

        if self.done(now) {
            self.params = params;
            return Ok(());
        }

        let x0 = self.x(now) - self.end_position;
        let v0 = self.dx(now);
        self.params = params;
        self.resolve(x0, v0, now);
        Ok(())
    }

    fn resolve(&mut self, x0: f64, v0: f64, now: f64) {
        let solution = Solution::solve(self.params, x0, v0);
        trace!(regime = solution.name(), x0, v0, now, "spring solution derived");
        self.solution = Some(solution);
        self.start_time = now;
    }
}

impl Default for Spring {
    fn default() -> Self {
        Self::from_valid(SpringParams::default())
    }
}

impl Tunable for Spring {
    fn parameters(&self) -> Vec<Parameter> {
        vec![
            Parameter::new(SPRING_CONSTANT, self.params.spring_constant, 100.0, 1000.0),
            Parameter::new(DAMPING, self.params.damping, 1.0, 500.0),
        ]
    }

    fn set_parameter(&mut self, label: &str, value: f64, now: f64) -> Result<()> {
        let params = match label {
            SPRING_CONSTANT => SpringParams {
                spring_constant: value,
                ..self.params
            },
            DAMPING => SpringParams {
                damping: value,
                ..self.params
            },
            _ => return Err(Error::UnknownParameter(label.to_string())),
        };
        param::warn_if_out_of_range(&self.parameters(), label, value);
        self.reconfigure(params, now).inspect_err(|err| {
            warn!(label, value, %err, "spring reconfigure rejected");
        })
    }
}
