//! Flick-with-bounce scrolling.
//!
//! [`Scroll`] combines a [`Deceleration`] model with a [`Spring`]: inside
//! `[-extent, 0]` the content coasts under friction; once it moves past an
//! edge (and keeps heading outward) the spring takes over and pulls it back.
//!
//! The spring is seeded from the friction's position and velocity at the
//! crossing instant, so there is no jump at the handoff.
//!
//! # Example
//!
//! ```rust
//! use rebound::{Bound, Scroll, ScrollMode};
//!
//! let mut scroll = Scroll::new(300.0);
//! scroll.set(-290.0, -50.0);
//!
//! let mut t = 0.0;
//! while !scroll.done(t) {
//!     t += 1.0 / 60.0;
//!     let _position = scroll.x(t);
//! }
//!
//! assert_eq!(scroll.mode(), ScrollMode::Springing(Bound::Trailing));
//! assert!((scroll.x(t) + 300.0).abs() < 0.4);
//! ```

use std::time::Duration;

use tracing::debug;

use crate::clock::{Clock, MonotonicClock};
use crate::error::Result;
use crate::friction::{Deceleration, Friction};
use crate::param::{Parameter, Tunable};
use crate::spring::{Spring, SpringParams};

/// One edge of the scrollable range.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Bound {
    /// The upper edge at `0`.
    Leading,
    /// The lower edge at `-extent`.
    Trailing,
}

impl Bound {
    /// Position of this edge for a range of the given extent.
    #[inline]
    pub fn position(self, extent: f64) -> f64 {
        match self {
            Self::Leading => 0.0,
            Self::Trailing => -extent,
        }
    }
}

/// Which model is driving the motion.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ScrollMode {
    /// No gesture has started yet.
    #[default]
    Idle,
    /// Coasting under the deceleration model.
    Friction,
    /// Pulled back toward the given edge by the spring.
    Springing(Bound),
}

/// Construction-time settings for a [`Scroll`].
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct ScrollConfig {
    /// Magnitude of the lower bound; positions are valid in `[-extent, 0]`.
    pub extent: f64,
    /// Friction drag coefficient, `0 < drag < 1`.
    pub drag: f64,
    /// Spring constants for the overscroll bounce.
    pub spring: SpringParams,
}

impl Default for ScrollConfig {
    fn default() -> Self {
        Self {
            extent: 0.0,
            drag: 0.01,
            spring: SpringParams::default(),
        }
    }
}

/// Bounded flick-with-bounce motion along one axis.
///
/// Call [`set`](Scroll::set) when a gesture ends with the release position
/// and velocity, then sample [`x`](Scroll::x) every frame with the seconds
/// elapsed since `set` until [`done`](Scroll::done) reports `true`. Sample
/// times within one gesture must not decrease.
///
/// `set` also records the owned [`Clock`]'s reading, so a frame loop can
/// sample with [`x_now`](Scroll::x_now) instead of tracking time itself.
#[derive(Debug, Clone)]
pub struct Scroll<F = Friction, C = MonotonicClock> {
    extent: f64,
    friction: F,
    spring: Spring,
    mode: ScrollMode,
    clock: C,
    anchor: Duration,
    last_dx: Option<(f64, f64)>,
}

impl Scroll<Friction> {
    /// Creates a scroller over `[-extent, 0]` with the default friction and
    /// spring constants.
    ///
    /// Negative extents are clamped to `0`.
    pub fn new(extent: f64) -> Self {
        Self::with_models(extent, Friction::default(), Spring::default())
    }

    /// Creates a scroller from a configuration.
    ///
    /// # Errors
    ///
    /// Returns an error if the drag coefficient or spring constants are
    /// invalid.
    pub fn with_config(config: ScrollConfig) -> Result<Self> {
        let friction = Friction::new(config.drag)?;
        let spring = Spring::with_params(config.spring)?;
        Ok(Self::with_models(config.extent, friction, spring))
    }
}

impl<F: Deceleration> Scroll<F> {
    /// Creates a scroller from explicit models, timed by a
    /// [`MonotonicClock`].
    pub fn with_models(extent: f64, friction: F, spring: Spring) -> Self {
        let clock = MonotonicClock::new();
        Self {
            extent: extent.max(0.0),
            friction,
            spring,
            mode: ScrollMode::Idle,
            anchor: clock.now(),
            clock,
            last_dx: None,
        }
    }
}

impl<F: Deceleration, C: Clock> Scroll<F, C> {
    /// Replaces the time source used by the `*_now` methods.
    ///
    /// The current gesture, if any, is re-anchored at the new clock's
    /// reading.
    pub fn with_clock<D: Clock>(self, clock: D) -> Scroll<F, D> {
        Scroll {
            extent: self.extent,
            friction: self.friction,
            spring: self.spring,
            mode: self.mode,
            anchor: clock.now(),
            clock,
            last_dx: self.last_dx,
        }
    }

    /// Magnitude of the lower bound.
    #[inline]
    pub fn extent(&self) -> f64 {
        self.extent
    }

    /// Changes the scrollable range, e.g. after the content was resized.
    ///
    /// Takes effect from the next sample on. A spring pulling toward the
    /// lower edge follows the edge to its new position.
    pub fn set_extent(&mut self, extent: f64) {
        self.extent = extent.max(0.0);
    }

    /// Which model is currently driving the motion.
    #[inline]
    pub fn mode(&self) -> ScrollMode {
        self.mode
    }

    /// The deceleration model.
    #[inline]
    pub fn friction(&self) -> &F {
        &self.friction
    }

    /// The overscroll spring.
    #[inline]
    pub fn spring(&self) -> &Spring {
        &self.spring
    }

    /// Starts a gesture at `position` moving with `velocity`.
    ///
    /// A gesture that starts past an edge and keeps heading outward is handed
    /// straight to the spring, pinned where it is with no momentum. One that
    /// starts past an edge but already moves back inside stays under friction.
    pub fn set(&mut self, position: f64, velocity: f64) {
        self.friction.set(position, velocity);
        self.last_dx = None;
        self.anchor = self.clock.now();

        self.mode = match self.crossed_bound(position, velocity) {
            Some(bound) => {
                let offset = bound.position(self.extent);
                self.spring.snap(position - offset, 0.0);
                self.spring.set_end(0.0, 0.0, 0.0);
                debug!(position, velocity, ?bound, "gesture starts in overscroll");
                ScrollMode::Springing(bound)
            }
            None => {
                debug!(position, velocity, "gesture starts under friction");
                ScrollMode::Friction
            }
        };
    }

    /// Position at `t` seconds after [`set`](Scroll::set).
    ///
    /// Returns `0` if no gesture has started. While under friction, the first
    /// sample past an edge (still heading outward) switches to the spring for
    /// the rest of the gesture.
    pub fn x(&mut self, t: f64) -> f64 {
        match self.mode {
            ScrollMode::Idle => 0.0,
            ScrollMode::Springing(bound) => self.spring.x(t) + bound.position(self.extent),
            ScrollMode::Friction => {
                let x = self.friction.x(t);
                let dx = self.dx(t);
                match self.crossed_bound(x, dx) {
                    Some(bound) => {
                        self.hand_off(bound, x, dx, t);
                        self.spring.x(t) + bound.position(self.extent)
                    }
                    None => x,
                }
            }
        }
    }

    /// Velocity at `t` seconds after [`set`](Scroll::set).
    ///
    /// Repeated queries at the same `t` return the previous answer without
    /// consulting the models again.
    pub fn dx(&mut self, t: f64) -> f64 {
        match self.last_dx {
            Some((time, dx)) if time == t => return dx,
            _ => {}
        }

        let dx = match self.mode {
            ScrollMode::Idle => 0.0,
            ScrollMode::Friction => self.friction.dx(t),
            ScrollMode::Springing(_) => self.spring.dx(t),
        };
        self.last_dx = Some((t, dx));
        dx
    }

    /// Returns `true` once the active model has settled at `t`.
    pub fn done(&self, t: f64) -> bool {
        match self.mode {
            ScrollMode::Idle => true,
            ScrollMode::Friction => self.friction.done(t),
            ScrollMode::Springing(_) => self.spring.done(t),
        }
    }

    /// [`x`](Scroll::x) at the time elapsed on the clock since the last
    /// [`set`](Scroll::set).
    pub fn x_now(&mut self) -> f64 {
        let t = self.elapsed();
        self.x(t)
    }

    /// [`dx`](Scroll::dx) at the time elapsed on the clock since the last
    /// [`set`](Scroll::set).
    pub fn dx_now(&mut self) -> f64 {
        let t = self.elapsed();
        self.dx(t)
    }

    /// [`done`](Scroll::done) at the time elapsed on the clock since the
    /// last [`set`](Scroll::set).
    pub fn done_now(&self) -> bool {
        self.done(self.elapsed())
    }

    /// The owned time source.
    pub fn clock(&self) -> &C {
        &self.clock
    }

    fn elapsed(&self) -> f64 {
        self.clock.now().saturating_sub(self.anchor).as_secs_f64()
    }

    fn crossed_bound(&self, x: f64, dx: f64) -> Option<Bound> {
        if x > 0.0 && dx >= 0.0 {
            Some(Bound::Leading)
        } else if x < -self.extent && dx <= 0.0 {
            Some(Bound::Trailing)
        } else {
            None
        }
    }

    fn hand_off(&mut self, bound: Bound, x: f64, dx: f64, t: f64) {
        let offset = bound.position(self.extent);
        self.spring.snap(x - offset, t);
        self.spring.set_end(0.0, dx, t);
        self.mode = ScrollMode::Springing(bound);
        debug!(position = x, velocity = dx, ?bound, t, "friction handed off to spring");
    }
}

impl<F: Deceleration, C: Clock> Tunable for Scroll<F, C> {
    /// Friction's parameters followed by the spring's.
    fn parameters(&self) -> Vec<Parameter> {
        let mut params = self.friction.parameters();
        params.extend(self.spring.parameters());
        params
    }

    fn set_parameter(&mut self, label: &str, value: f64, now: f64) -> Result<()> {
        if self.friction.has_parameter(label) {
            self.friction.set_parameter(label, value, now)
        } else {
            self.spring.set_parameter(label, value, now)
        }
    }
}
