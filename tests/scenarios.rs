use ballfield::core::{Body, FieldConfig, ParticleField};
use ballfield::error::Result;

const EPS: f64 = 1e-9;

fn empty_field(config: FieldConfig) -> Result<ParticleField> {
    ParticleField::with_seed(
        FieldConfig {
            num_pinned: 0,
            ..config
        },
        Some(0),
    )
}

/// A resting body picks up one tick of gravity, damped once by friction.
#[test]
fn single_body_falls_one_step() -> Result<()> {
    let config = FieldConfig::default();
    let mut field = empty_field(config.clone())?;
    field.add_body(Body::dynamic([320.0, 240.0], [0.0, 0.0]))?;

    field.step();

    let expected_v = config.gravity * config.friction;
    let body = field.body(0).expect("body 0 exists");
    assert!(body.velocity[0].abs() < EPS);
    assert!((body.velocity[1] - expected_v).abs() < EPS);
    assert!((body.position[0] - 320.0).abs() < EPS);
    assert!((body.position[1] - (240.0 + expected_v)).abs() < EPS);
    Ok(())
}

/// A body pushed through the left wall is clamped and bounced with damping.
#[test]
fn left_wall_clamps_and_damps() -> Result<()> {
    let config = FieldConfig {
        friction: 1.0,
        ..FieldConfig::default()
    };
    let mut field = empty_field(config.clone())?;
    field.add_body(Body::dynamic([config.radius - 1.0, 240.0], [-5.0, 0.0]))?;

    field.apply_motion();

    let body = field.body(0).expect("body 0 exists");
    assert_eq!(body.position[0], config.radius);
    assert!((body.velocity[0] - 5.0 * config.wall_damping).abs() < EPS);
    Ok(())
}

/// With friction the rebound speed is scaled by both coefficients.
#[test]
fn left_wall_rebound_includes_friction() -> Result<()> {
    let config = FieldConfig::default();
    let mut field = empty_field(config.clone())?;
    field.add_body(Body::dynamic([config.radius - 1.0, 240.0], [-5.0, 0.0]))?;

    field.apply_motion();

    let v = field.velocities()[0];
    assert!((v[0] - 5.0 * config.friction * config.wall_damping).abs() < EPS);
    Ok(())
}

/// Two equal bodies closing head-on bounce apart and split the overlap evenly.
#[test]
fn head_on_dynamic_pair() -> Result<()> {
    let config = FieldConfig::default();
    let r = config.radius;
    let mut field = empty_field(config.clone())?;
    let speed = 3.0;
    field.add_body(Body::dynamic([100.0, 240.0], [speed, 0.0]))?;
    field.add_body(Body::dynamic([100.0 + 2.0 * r - 1.0, 240.0], [-speed, 0.0]))?;

    let resolved = field.resolve_collisions();
    assert_eq!(resolved, 1, "the return visit sees a separating pair");

    // v' = v - e * 2v along the line of centres
    let expected = speed * (1.0 - 2.0 * config.restitution);
    let (v0, v1) = (field.velocities()[0], field.velocities()[1]);
    assert!((v0[0] - expected).abs() < EPS, "v0 = {v0:?}");
    assert!((v1[0] + expected).abs() < EPS, "v1 = {v1:?}");
    assert!(v0[0] < 0.0 && v1[0] > 0.0);
    assert_eq!(v0[1], 0.0);
    assert_eq!(v1[1], 0.0);

    let (p0, p1) = (field.positions()[0], field.positions()[1]);
    assert!((p0[0] - 99.5).abs() < EPS);
    assert!((p1[0] - (100.0 + 2.0 * r - 0.5)).abs() < EPS);
    assert!((p1[0] - p0[0] - 2.0 * r).abs() < EPS);
    Ok(())
}

/// Only the dynamic body reacts when it runs into a pinned one.
#[test]
fn dynamic_hits_pinned() -> Result<()> {
    let config = FieldConfig::default();
    let mut field = empty_field(config.clone())?;
    field.add_body(Body::dynamic([100.0, 125.0], [0.0, -4.0]))?;
    field.add_body(Body::pinned([100.0, 100.0]))?;

    field.resolve_collisions();

    // Full impulse on the dynamic body: -4 - e * 2 * (-4)
    let v = field.velocities()[0];
    assert!(v[0].abs() < EPS);
    assert!((v[1] - (-4.0 + 8.0 * config.restitution)).abs() < EPS, "v = {v:?}");
    assert!((field.positions()[0][1] - 127.5).abs() < EPS);

    assert_eq!(field.positions()[1], [100.0, 100.0]);
    assert_eq!(field.velocities()[1], [0.0, 0.0]);
    Ok(())
}

/// Overlapping pinned bodies never interact.
#[test]
fn overlapping_pinned_pair_untouched() -> Result<()> {
    let mut field = empty_field(FieldConfig::default())?;
    field.add_body(Body::pinned([100.0, 100.0]))?;
    field.add_body(Body::pinned([110.0, 100.0]))?;

    assert_eq!(field.resolve_collisions(), 0);
    field.step();

    assert_eq!(field.positions(), &[[100.0, 100.0], [110.0, 100.0]]);
    assert_eq!(field.velocities(), &[[0.0, 0.0], [0.0, 0.0]]);
    Ok(())
}

/// Clicks are accepted only on free spots; the pile then settles on the floor.
#[test]
fn click_loop_settles_inside_the_box() -> Result<()> {
    let config = FieldConfig::default();
    let mut field = ParticleField::with_seed(config.clone(), Some(2024))?;
    let pinned_before = field.positions().to_vec();

    let mut accepted = 0;
    for k in 0..20 {
        let click = [40.0 + 25.0 * k as f64, 420.0];
        if field.try_place(click)?.is_some() {
            accepted += 1;
        }
    }
    // 25 px apart is closer than 2 * radius, so every other click is refused.
    assert_eq!(accepted, 10);

    for _ in 0..600 {
        field.step();
    }

    assert_eq!(field.steps(), 600);
    assert_eq!(&field.positions()[..config.num_pinned], &pinned_before[..]);
    // The collision pass may nudge a body past a wall; the next motion pass pulls it back.
    field.apply_motion();
    for p in field.positions() {
        assert!(p[0] >= config.radius && p[0] <= config.width - config.radius);
        assert!(p[1] >= config.radius && p[1] <= config.height - config.radius);
    }
    assert!(field.kinetic_energy().is_finite());
    Ok(())
}
