#![forbid(unsafe_code)]
// Allow these clippy lints for physics/math code readability
#![allow(clippy::must_use_candidate)]
#![allow(clippy::suboptimal_flops)]
#![allow(clippy::doc_markdown)]
#![allow(clippy::float_cmp)]
#![allow(clippy::many_single_char_names)]
#![allow(clippy::missing_const_for_fn)]
#![allow(clippy::module_name_repetitions)]

//! # Rebound
//!
//! Flick-with-bounce motion for scrollable surfaces.
//!
//! Rebound provides:
//! - **Spring**: a closed-form damped harmonic oscillator with a movable
//!   equilibrium that keeps position and velocity continuous when retargeted
//! - **Friction**: free deceleration under exponential drag
//! - **Scroll**: a coordinator that coasts under friction inside
//!   `[-extent, 0]` and hands the motion to the spring past either edge
//!
//! Every model takes time explicitly, so an animation loop (or a test) owns
//! the clock. Each scrollable axis gets its own [`Scroll`].
//!
//! ## Scroll Example
//!
//! ```rust
//! use rebound::Scroll;
//!
//! // 300 units of content beyond the viewport.
//! let mut scroll = Scroll::new(300.0);
//!
//! // Released at -250 while flicking further down.
//! scroll.set(-250.0, -800.0);
//!
//! // Sample once per frame until settled.
//! let mut t = 0.0;
//! let mut deepest: f64 = 0.0;
//! while !scroll.done(t) {
//!     t += 1.0 / 60.0;
//!     deepest = deepest.min(scroll.x(t));
//! }
//!
//! // Overscrolled past the lower edge, then bounced back to it.
//! assert!(deepest < -300.0);
//! assert!((scroll.x(t) + 300.0).abs() < 0.4);
//! ```
//!
//! ## Spring Example
//!
//! ```rust
//! use rebound::Spring;
//!
//! let mut spring = Spring::new(1.0, 90.0, 20.0)?;
//! spring.snap(60.0, 0.0);
//! spring.set_end(0.0, 0.0, 0.0);
//!
//! // Retarget mid-flight; the motion continues from where it is.
//! let before = spring.x(0.1);
//! spring.set_end(-40.0, 0.0, 0.1);
//! assert!((spring.x(0.1) - before).abs() < 1e-9);
//! # Ok::<(), rebound::Error>(())
//! ```
//!
//! ## Damping Regimes
//!
//! The sign of `c² − 4mk` determines the spring's behavior:
//!
//! - **Overdamped (`c² > 4mk`)**: No oscillation, slow return to equilibrium
//! - **Critically damped (`c² = 4mk`)**: Fastest return without oscillation
//! - **Underdamped (`c² < 4mk`)**: Oscillates around equilibrium with decay

mod clock;
mod error;
mod friction;
mod param;
mod scroll;
mod spring;

pub use clock::{Clock, ManualClock, MonotonicClock};
pub use error::{Error, Result};
pub use friction::{Deceleration, Friction, DRAG};
pub use param::{Parameter, Tunable};
pub use scroll::{Bound, Scroll, ScrollConfig, ScrollMode};
pub use spring::{Regime, Spring, SpringParams, DAMPING, SETTLE_EPSILON, SPRING_CONSTANT};

/// Prelude module for convenient imports.
pub mod prelude {
    pub use crate::clock::{Clock, ManualClock, MonotonicClock};
    pub use crate::friction::{Deceleration, Friction};
    pub use crate::param::{Parameter, Tunable};
    pub use crate::scroll::{Bound, Scroll, ScrollConfig, ScrollMode};
    pub use crate::spring::{Regime, Spring, SpringParams};
}
