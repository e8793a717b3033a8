mod common;

use common::{entity_at, quiet_config, WorldBuilder};
use expanse_lib::model::data::{ActivationKind, HazardKind, Role, Velocity};
use expanse_lib::model::world::World;

#[test]
fn test_steady_state_rust_count_is_bounded() {
    let config = quiet_config(31, 0);
    let rust = config.hazards.rust.clone();
    let bound = rust.max_lifetime_ticks().div_ceil(rust.period_ticks) as usize + 1;
    let mut world = World::new(config).unwrap();
    for _ in 0..20_000 {
        world.step();
        assert!(world.hazards.count(HazardKind::Rust) <= bound);
    }
}

#[test]
fn test_scheduled_spawns_follow_periods() {
    let mut world = World::new(quiet_config(32, 0)).unwrap();
    world.run(299);
    assert!(world.hazards.is_empty());
    world.step();
    assert_eq!(world.hazards.count(HazardKind::Rust), 1);
    let h = &world.hazards.hazards()[0];
    assert_eq!(h.spawn_tick, 300);
    let spec = &world.config.hazards.rust;
    // spawned inside the range, then decayed once
    assert!(h.radius >= spec.spawn_radius_min - spec.decay - 1e-9);
    assert!(h.radius <= spec.spawn_radius_max - spec.decay + 1e-9);
    world.run(180);
    assert_eq!(world.hazards.count(HazardKind::Gray), 1);
}

#[test]
fn test_gray_zone_slows_entity() {
    let mut entity = entity_at(1, 500.0, 500.0, Role::Lesser, 0.2);
    entity.velocity = Velocity { vx: 0.01, vy: 0.0 };
    let mut world = WorldBuilder::new()
        .with_seed(33)
        .with_deity("SYNAPSE", 50.0, 50.0, ActivationKind::Dormant)
        .with_entity(entity)
        .with_hazard(HazardKind::Gray, 500.0, 500.0, 70.0)
        .build();
    world.run(10);
    let vx = world.entities[0].velocity.vx;
    assert!((vx - 0.01 * 0.95f64.powi(10)).abs() < 1e-12);
    assert_eq!(world.entities[0].trust, 0.2);
}

#[test]
fn test_user_zone_radius_is_clamped() {
    let mut world = World::new(quiet_config(34, 0)).unwrap();
    let big = world.spawn_hazard(HazardKind::Rust, 100.0, 100.0, 1000.0);
    let tiny = world.spawn_hazard(HazardKind::Gray, 100.0, 100.0, 0.5);
    let radius = |w: &World, id| w.hazards.iter().find(|h| h.id == id).map(|h| h.radius);
    assert_eq!(radius(&world, big), Some(40.0));
    assert_eq!(radius(&world, tiny), Some(10.0));
    world.step();
    assert_eq!(radius(&world, tiny), None);
    assert!(radius(&world, big).is_some());
}

#[test]
fn test_cleanse_leaves_ring_and_clears_rust() {
    let mut world = WorldBuilder::new()
        .with_seed(35)
        .with_hazard(HazardKind::Rust, 200.0, 200.0, 30.0)
        .with_hazard(HazardKind::Rust, 260.0, 200.0, 30.0)
        .with_hazard(HazardKind::Gray, 200.0, 200.0, 60.0)
        .build();
    assert_eq!(world.cleanse(210.0, 200.0, 100.0), 2);
    assert_eq!(world.hazards.count(HazardKind::Rust), 0);
    assert_eq!(world.hazards.count(HazardKind::Gray), 1);
    assert_eq!(world.resonances.len(), 1);
    assert_eq!(world.resonances[0].radius, 100.0);
    let life = world.config.events.cleanse_life as u64;
    world.run(life - 1);
    assert_eq!(world.resonances.len(), 1);
    assert_eq!(world.resonances[0].life, 1);
    world.step();
    assert!(world.resonances.is_empty());
}
