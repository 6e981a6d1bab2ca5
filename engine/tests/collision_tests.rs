//! Collision Tests - Floor Contact, Box Push-Out and Landing Events
//!
//! Tests for the collision resolver, alone and chained after the locomotion
//! integrator the way a simulation tick runs them.

use glam::Vec3;
use orbit_walker_engine::config::CollisionConfig;
use orbit_walker_engine::input::{ControlState, InputSnapshot, JoystickState};
use orbit_walker_engine::physics::{CollisionResolver, Obstacle};
use orbit_walker_engine::player::{LocomotionIntegrator, Unit};

fn unit_at(position: Vec3) -> Unit {
    Unit::new(position, &CollisionConfig::default())
}

fn crate_box() -> Obstacle {
    Obstacle::new(Vec3::new(2.0, 0.0, -1.0), Vec3::new(4.0, 2.0, 1.0)).unwrap()
}

// ============================================================================
// Penetration Response
// ============================================================================

#[test]
fn test_penetration_resolved_along_normal() {
    let resolver = CollisionResolver::default();
    // Radius 0.5, centre 0.4 from the -X face: 0.1 deep
    let mut unit = unit_at(Vec3::new(1.6, 0.0, 0.0));
    unit.velocity = Vec3::new(5.0, 0.0, -1.5);

    let report = resolver.resolve(&mut unit, &[crate_box()], &mut |_| {});
    assert_eq!(report.contacts.len(), 1);
    let contact = report.contacts[0];
    assert_eq!(contact.normal, Vec3::NEG_X);
    assert!((contact.depth - 0.1).abs() < 1e-5);
    assert!((unit.position.x - 1.5).abs() < 1e-5);
    assert_eq!(unit.position.z, 0.0);
    assert!(unit.velocity.x.abs() < 1e-6);
    assert_eq!(unit.velocity.z, -1.5);
}

#[test]
fn test_edge_contact_uses_diagonal_normal() {
    let resolver = CollisionResolver::default();
    let mut unit = unit_at(Vec3::new(1.8, 0.0, 1.2));
    resolver.resolve(&mut unit, &[crate_box()], &mut |_| {});
    let corner = Vec3::new(2.0, 0.0, 1.0);
    assert!((unit.position.distance(corner) - 0.5).abs() < 1e-5);
}

#[test]
fn test_resolve_twice_does_not_move() {
    let resolver = CollisionResolver::default();
    let obstacles = [
        crate_box(),
        Obstacle::new(Vec3::new(-8.0, 0.0, -8.0), Vec3::new(-6.0, 1.0, -6.0)).unwrap(),
    ];
    let starts = [
        Vec3::new(1.6, 0.0, 0.0),
        Vec3::new(3.0, 0.5, 0.95),
        Vec3::new(1.8, 0.0, 1.2),
        Vec3::new(-5.7, -0.2, -7.0),
        Vec3::new(0.0, 0.0, 0.0),
        Vec3::new(0.0, 3.0, 0.0),
    ];

    for start in starts {
        let mut unit = unit_at(start);
        unit.velocity = Vec3::new(1.0, -2.0, 3.0);
        resolver.resolve(&mut unit, &obstacles, &mut |_| {});
        let resolved = unit.clone();

        let report = resolver.resolve(&mut unit, &obstacles, &mut |_| {});
        assert!(report.contacts.is_empty(), "start {start:?}");
        assert_eq!(unit.position, resolved.position, "start {start:?}");
        assert_eq!(unit.velocity, resolved.velocity, "start {start:?}");
    }
}

#[test]
fn test_feet_inside_floor_box_stay_on_floor() {
    let resolver = CollisionResolver::default();
    let floor_box = Obstacle::new(Vec3::new(-1.0, 0.0, -1.0), Vec3::new(1.0, 2.0, 1.0)).unwrap();
    for start in [
        Vec3::new(0.2, 0.0, 0.3),
        Vec3::new(-0.9, 0.0, 0.0),
        Vec3::new(0.0, 0.0, -0.6),
    ] {
        let mut unit = unit_at(start);
        let report = resolver.resolve(&mut unit, &[floor_box], &mut |_| {});
        assert_eq!(unit.position.y, 0.0, "start {start:?}");
        assert!(unit.is_grounded);
        assert_eq!(report.contacts[0].normal.y, 0.0, "start {start:?}");
        assert!(!floor_box.intersects_sphere(unit.position, 0.5 - 1e-4));
    }
}

#[test]
fn test_box_does_not_ground_unit() {
    let resolver = CollisionResolver::default();
    // Standing on top of the box
    let mut unit = unit_at(Vec3::new(3.0, 2.3, 0.0));
    unit.is_grounded = false;
    unit.velocity.y = -4.0;
    let report = resolver.resolve(&mut unit, &[crate_box()], &mut |_| {});
    assert!(!report.landed);
    assert!(!unit.is_grounded);
    assert!((unit.position.y - 2.5).abs() < 1e-5);
    assert!(unit.velocity.y.abs() < 1e-6);
}

#[test]
fn test_custom_floor_height() {
    let resolver = CollisionResolver::new(-2.0);
    let mut unit = unit_at(Vec3::new(0.0, -1.0, 0.0));
    resolver.resolve(&mut unit, &[], &mut |_| {});
    assert!(!unit.is_grounded);

    unit.position.y = -2.5;
    resolver.resolve(&mut unit, &[], &mut |_| {});
    assert!(unit.is_grounded);
    assert_eq!(unit.position.y, -2.0);
}

// ============================================================================
// Landing Events
// ============================================================================

#[test]
fn test_single_landing_event_per_jump() {
    let integrator = LocomotionIntegrator::default();
    let resolver = CollisionResolver::default();
    let mut unit = unit_at(Vec3::ZERO);
    let mut landings: Vec<Vec3> = Vec::new();

    let jump = InputSnapshot {
        controls: ControlState {
            jump: true,
            forward: true,
            ..Default::default()
        },
        joystick: JoystickState::default(),
    };
    let idle = InputSnapshot::default();

    let mut landed_tick = None;
    for tick in 0..200 {
        let input = if tick == 0 { &jump } else { &idle };
        integrator.step(&mut unit, input, 0.0, 0.016);
        let report = resolver.resolve(&mut unit, &[], &mut |at| landings.push(at));
        if report.landed {
            landed_tick = Some(tick);
        }
    }

    assert_eq!(landings.len(), 1);
    assert_eq!(landings[0].y, 0.0);
    // 13 / 32 * 2 seconds of flight, roughly 51 ticks
    let tick = landed_tick.unwrap();
    assert!((45..60).contains(&tick), "landed on tick {tick}");
    assert!(unit.is_grounded);
}

#[test]
fn test_no_landing_event_while_standing() {
    let integrator = LocomotionIntegrator::default();
    let resolver = CollisionResolver::default();
    let mut unit = unit_at(Vec3::ZERO);
    let mut count = 0;
    for _ in 0..30 {
        integrator.step(&mut unit, &InputSnapshot::default(), 0.0, 0.016);
        resolver.resolve(&mut unit, &[], &mut |_| count += 1);
    }
    assert_eq!(count, 0);
}
