#![allow(clippy::cast_precision_loss)]
#![allow(clippy::cast_lossless)]
#![allow(clippy::suboptimal_flops)]

//! Additional unit tests for rebound covering degenerate constants,
//! long-duration stability, and extreme initial conditions.

use rebound::{
    Deceleration, Error, Friction, Regime, Scroll, ScrollConfig, Spring, SpringParams, Tunable,
};

fn pulled(params: SpringParams, from: f64, to: f64) -> Spring {
    let mut spring = Spring::with_params(params).unwrap();
    spring.snap(from, 0.0);
    spring.set_end(to, 0.0, 0.0);
    spring
}

// =============================================================================
// Spring: degenerate constants
// =============================================================================

#[test]
fn spring_zero_mass_is_an_error() {
    let err = Spring::new(0.0, 90.0, 20.0).unwrap_err();
    assert_eq!(
        err,
        Error::InvalidPhysicalParameters {
            mass: 0.0,
            spring_constant: 90.0,
            damping: 20.0,
        }
    );
    assert!(err.to_string().contains("mass=0"));
}

#[test]
fn spring_infinite_constants_rejected() {
    assert!(Spring::new(f64::INFINITY, 90.0, 20.0).is_err());
    assert!(Spring::new(1.0, f64::INFINITY, 20.0).is_err());
    assert!(Spring::new(1.0, 90.0, f64::NEG_INFINITY).is_err());
}

#[test]
fn spring_without_stiffness_drifts_to_rest() {
    // k = 0 leaves only damping: overdamped with one root at zero.
    let mut spring = Spring::new(1.0, 0.0, 10.0).unwrap();
    assert_eq!(spring.regime(), Regime::Overdamped);
    spring.snap(0.0, 0.0);
    spring.set_end(0.0, 50.0, 0.0);
    let x = spring.x(10.0);
    assert!(x.is_finite());
    assert!((x - 5.0).abs() < 1e-6, "coasts v0/c = 5, got {x}");
    assert!(spring.dx(10.0).abs() < 1e-6);
}

#[test]
fn spring_without_damping_or_stiffness_is_free_motion() {
    let mut spring = Spring::new(1.0, 0.0, 0.0).unwrap();
    assert_eq!(spring.regime(), Regime::CriticallyDamped);
    spring.snap(0.0, 0.0);
    spring.set_end(0.0, 3.0, 0.0);
    assert!((spring.x(2.0) - 6.0).abs() < 1e-9);
    assert!((spring.dx(2.0) - 3.0).abs() < 1e-9);
}

#[test]
fn spring_critical_with_zero_displacement() {
    // Zero initial displacement with incoming velocity must not divide by zero.
    let mut spring = Spring::new(2.0, 50.0, 20.0).unwrap();
    assert_eq!(spring.regime(), Regime::CriticallyDamped);
    spring.snap(100.0, 0.0);
    spring.set_end(100.0, -30.0, 0.0);
    for i in 0..200 {
        let t = i as f64 / 100.0;
        assert!(spring.x(t).is_finite());
        assert!(spring.dx(t).is_finite());
    }
    assert!(spring.x(0.1) < 100.0);
    assert!(spring.done(10.0));
}

#[test]
fn spring_nearly_critical_from_both_sides() {
    for damping in [20.0 - 1e-7, 20.0 + 1e-7] {
        let spring = pulled(SpringParams::new(1.0, 100.0, damping), 100.0, 0.0);
        let critical = pulled(SpringParams::new(1.0, 100.0, 20.0), 100.0, 0.0);
        for i in 0..100 {
            let t = i as f64 / 50.0;
            assert!(
                (spring.x(t) - critical.x(t)).abs() < 1e-3,
                "damping={damping} t={t}"
            );
        }
    }
}

// =============================================================================
// Spring: long-duration stability
// =============================================================================

#[test]
fn spring_stability_1000_seconds() {
    let spring = pulled(SpringParams::new(1.0, 225.0, 12.0), -500.0, 5.0);
    for i in 0..60_000 {
        let t = i as f64 / 60.0;
        assert!(spring.x(t).is_finite(), "pos became non-finite at {t}");
        assert!(spring.dx(t).is_finite(), "vel became non-finite at {t}");
    }
    assert!((spring.x(1000.0) - 5.0).abs() < 0.01);
    assert!(spring.dx(1000.0).abs() < 0.01);
}

#[test]
fn spring_critical_damping_fastest_convergence() {
    let critical = pulled(SpringParams::new(1.0, 400.0, 40.0), 1.0, 0.0);
    let over = pulled(SpringParams::new(1.0, 400.0, 120.0), 1.0, 0.0);

    let settle = |spring: &Spring| {
        (0..600)
            .find(|&i| spring.x(i as f64 / 60.0).abs() < 0.01)
            .expect("should converge")
    };
    let cf = settle(&critical);
    let of = settle(&over);
    assert!(cf <= of, "critical ({cf}) should be <= over-damped ({of})");
}

#[test]
fn spring_many_retargets_stay_continuous() {
    let mut spring = pulled(SpringParams::default(), 0.0, 100.0);
    for i in 1..200 {
        let t = i as f64 / 60.0;
        let x = spring.x(t);
        let target = if i % 2 == 0 { 100.0 } else { -100.0 };
        spring.set_end(target, 0.0, t);
        assert!((spring.x(t) - x).abs() < 1e-6, "jump at frame {i}");
    }
}

// =============================================================================
// Spring: extreme inputs
// =============================================================================

#[test]
fn spring_large_displacement() {
    let spring = pulled(SpringParams::default(), -1e6, 1e6);
    assert!(spring.x(0.5).is_finite());
    assert!(spring.dx(0.5).is_finite());
    assert!(spring.done(20.0));
}

#[test]
fn spring_opposing_velocity() {
    // Velocity pointing away from the target: still converges.
    let mut spring = Spring::default();
    spring.snap(0.0, 0.0);
    spring.set_end(1.0, -100.0, 0.0);
    assert!(spring.x(0.05) < 0.0);
    assert!((spring.x(10.0) - 1.0).abs() < 0.1);
}

#[test]
fn spring_evaluated_before_start_is_finite() {
    let mut spring = Spring::default();
    spring.snap(10.0, 5.0);
    spring.set_end(0.0, 0.0, 5.0);
    assert!(spring.x(4.5).is_finite());
}

// =============================================================================
// Friction and Scroll edge cases
// =============================================================================

#[test]
fn friction_at_rest_is_done() {
    let mut friction = Friction::default();
    friction.set(-42.0, 0.0);
    assert!(friction.done(0.0));
    assert!((friction.x(100.0) + 42.0).abs() < 1e-12);
}

#[test]
fn scroll_zero_extent() {
    // A range of a single point: every flick overscrolls.
    let mut scroll = Scroll::new(0.0);
    scroll.set(0.0, -100.0);
    let _ = scroll.x(0.05);
    assert!(scroll.x(5.0).abs() < 0.4);
}

#[test]
fn scroll_config_rejects_bad_spring() {
    let config = ScrollConfig {
        spring: SpringParams::new(-1.0, 90.0, 20.0),
        ..ScrollConfig::default()
    };
    assert!(matches!(
        Scroll::with_config(config),
        Err(Error::InvalidPhysicalParameters { .. })
    ));
}

#[test]
fn scroll_rejected_tuning_keeps_motion() {
    let mut scroll = Scroll::new(300.0);
    scroll.set(80.0, 0.0);
    let before = scroll.x(0.1);
    assert!(scroll.set_parameter("Damping", -5.0, 0.1).is_err());
    assert!((scroll.x(0.1) - before).abs() < 1e-12);
}

#[test]
fn scroll_tuning_mid_bounce_is_continuous() {
    let mut scroll = Scroll::new(300.0);
    scroll.set(80.0, 0.0);
    let before = scroll.x(0.1);
    scroll.set_parameter("Spring Constant", 600.0, 0.1).unwrap();
    assert!((scroll.x(0.1) - before).abs() < 1e-9);
    assert_eq!(scroll.spring().regime(), Regime::Underdamped);
}

#[cfg(feature = "serde")]
#[test]
fn scroll_config_from_json() {
    let config: ScrollConfig =
        serde_json::from_str(r#"{ "extent": 640.0, "spring": { "mass": 1.0, "spring_constant": 169.0, "damping": 26.0 } }"#)
            .unwrap();
    assert!((config.drag - 0.01).abs() < 1e-12);
    let scroll = Scroll::with_config(config).unwrap();
    assert!((scroll.extent() - 640.0).abs() < 1e-12);
    assert_eq!(scroll.spring().regime(), Regime::CriticallyDamped);
}
