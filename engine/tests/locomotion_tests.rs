//! Locomotion Tests - Integration, Turning, Jumping and Gravity
//!
//! Tests for the locomotion integrator driven through full input snapshots.

use std::f32::consts::{PI, TAU};

use glam::Vec3;
use orbit_walker_engine::config::{CollisionConfig, LocomotionConfig, SmoothingMode};
use orbit_walker_engine::input::{ControlState, InputSnapshot, JoystickState};
use orbit_walker_engine::player::{LocomotionIntegrator, Unit, wrap_angle};

fn spawn() -> Unit {
    Unit::new(Vec3::ZERO, &CollisionConfig::default())
}

fn keys(controls: ControlState) -> InputSnapshot {
    InputSnapshot {
        controls,
        joystick: JoystickState::default(),
    }
}

// ============================================================================
// Angle Wrapping
// ============================================================================

#[test]
fn test_wrap_keeps_turn_within_half_circle() {
    let integrator = LocomotionIntegrator::default();
    let input = keys(ControlState {
        left: true,
        ..Default::default()
    });

    for start in [-50.0f32, -3.5, 0.0, 3.1, 9.0, 100.0] {
        let mut unit = spawn();
        unit.heading = start;
        let before = wrap_angle(unit.heading);
        integrator.step(&mut unit, &input, 0.7, 0.016);
        let turned = wrap_angle(unit.heading - before);
        assert!(turned > -PI && turned <= PI);
        // 15% of at most half a turn
        assert!(turned.abs() <= 0.15 * PI + 1e-4, "start {start}: turned {turned}");
    }
}

#[test]
fn test_three_half_turns_same_as_one() {
    for theta in [-2.0f32, 0.0, 0.4, 2.9] {
        let a = wrap_angle(theta + 3.0 * PI);
        let b = wrap_angle(theta + PI);
        let diff = wrap_angle(a - b).abs();
        assert!(diff < 1e-4 || (TAU - diff) < 1e-4, "theta {theta}: {a} vs {b}");
    }
}

// ============================================================================
// Jump and Gravity
// ============================================================================

#[test]
fn test_jump_impulse_ignores_horizontal_input() {
    let integrator = LocomotionIntegrator::default();
    let inputs = [
        ControlState {
            jump: true,
            ..Default::default()
        },
        ControlState {
            jump: true,
            forward: true,
            run: true,
            ..Default::default()
        },
        ControlState {
            jump: true,
            left: true,
            backward: true,
            ..Default::default()
        },
    ];

    for controls in inputs {
        let mut unit = spawn();
        let step = integrator.step(&mut unit, &keys(controls), 1.2, 0.0);
        assert!(step.jumped);
        assert_eq!(unit.velocity.y, 13.0);
        assert!(!unit.is_grounded);
    }
}

#[test]
fn test_no_jump_while_airborne() {
    let integrator = LocomotionIntegrator::default();
    let mut unit = spawn();
    unit.is_grounded = false;
    unit.velocity.y = 2.0;
    let step = integrator.step(
        &mut unit,
        &keys(ControlState {
            jump: true,
            ..Default::default()
        }),
        0.0,
        0.0,
    );
    assert!(!step.jumped);
    assert_eq!(unit.velocity.y, 2.0);
}

#[test]
fn test_gravity_linear_over_ten_ticks() {
    let integrator = LocomotionIntegrator::default();
    let mut unit = Unit::new(Vec3::new(0.0, 500.0, 0.0), &CollisionConfig::default());
    unit.is_grounded = false;

    for tick in 1..=10 {
        integrator.step(&mut unit, &InputSnapshot::default(), 0.0, 0.1);
        let expected = -3.2 * tick as f32;
        assert!(
            (unit.velocity.y - expected).abs() < 1e-4,
            "tick {tick}: {} vs {expected}",
            unit.velocity.y
        );
    }
}

// ============================================================================
// Planar Movement
// ============================================================================

#[test]
fn test_movement_is_camera_relative() {
    let integrator = LocomotionIntegrator::default();
    let input = keys(ControlState {
        forward: true,
        ..Default::default()
    });

    // Camera on the +X side looking toward -X
    let mut unit = spawn();
    for _ in 0..60 {
        integrator.step(&mut unit, &input, PI / 2.0, 0.016);
    }
    assert!(unit.velocity.x < -5.5);
    assert!(unit.velocity.z.abs() < 1e-3);
    // Facing converges on the movement direction
    assert!((unit.facing() - Vec3::NEG_X).length() < 0.05);
}

#[test]
fn test_joystick_magnitude_scales_speed() {
    let integrator = LocomotionIntegrator::default();
    let input = InputSnapshot {
        controls: ControlState::default(),
        joystick: JoystickState {
            x: 0.0,
            y: -0.5,
            active: true,
        },
    };
    let mut unit = spawn();
    for _ in 0..120 {
        integrator.step(&mut unit, &input, 0.0, 0.016);
    }
    assert!((unit.horizontal_speed() - 3.0).abs() < 0.01);
}

#[test]
fn test_inactive_joystick_ignored() {
    let integrator = LocomotionIntegrator::default();
    let input = InputSnapshot {
        controls: ControlState::default(),
        joystick: JoystickState {
            x: 1.0,
            y: 0.0,
            active: false,
        },
    };
    let mut unit = spawn();
    integrator.step(&mut unit, &input, 0.0, 0.016);
    assert_eq!(unit.velocity, Vec3::ZERO);
}

#[test]
fn test_time_corrected_smoothing_is_rate_independent() {
    let config = LocomotionConfig::default();
    let mode = SmoothingMode::TimeCorrected { reference_hz: 60.0 };
    let integrator = LocomotionIntegrator::new(config, mode);
    let input = keys(ControlState {
        forward: true,
        ..Default::default()
    });

    let mut at_60 = spawn();
    for _ in 0..30 {
        integrator.step(&mut at_60, &input, 0.0, 1.0 / 60.0);
    }
    let mut at_120 = spawn();
    for _ in 0..60 {
        integrator.step(&mut at_120, &input, 0.0, 1.0 / 120.0);
    }
    assert!((at_60.horizontal_speed() - at_120.horizontal_speed()).abs() < 1e-3);

    // At the reference rate the result matches per-tick smoothing
    let per_tick = LocomotionIntegrator::new(config, SmoothingMode::PerTick);
    let mut reference = spawn();
    for _ in 0..30 {
        per_tick.step(&mut reference, &input, 0.0, 1.0 / 60.0);
    }
    assert!((reference.horizontal_speed() - at_60.horizontal_speed()).abs() < 1e-3);
}
