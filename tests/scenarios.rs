mod common;

use common::{entity_at, WorldBuilder};
use expanse_lib::model::data::{ActivationKind, HazardKind, Position, Role};
use expanse_lib::model::persistence::LoadOutcome;
use expanse_lib::model::world::World;

#[test]
fn test_empty_world_grows_rust_and_decays_deity() {
    let mut world = WorldBuilder::new()
        .with_seed(1)
        .with_deity("AEGIS", 600.0, 400.0, ActivationKind::Dormant)
        .with_config(|c| c.hazards.rust.period_ticks = 5)
        .build();

    world.run(100);

    assert!(world.entities.is_empty());
    let rust = world.config.hazards.rust.clone();
    assert!(rust.decay * 100.0 < rust.max_radius - rust.floor);
    assert!(world.hazards.count(HazardKind::Rust) >= 1);
    let bound = 1.0 * world.config.deities.trust_decay.powi(100);
    assert!(world.deities[0].aggregate_trust <= bound + 1e-12);
    assert_world_invariants!(world);
}

#[test]
fn test_single_curious_question_cadence() {
    let mut world = WorldBuilder::new()
        .with_seed(2)
        .with_deity("QUERENS", 1000.0, 700.0, ActivationKind::Inquiry)
        .with_config(|c| {
            c.entities.question_chance = 1.0;
            c.entities.question_cooldown = 10;
            c.entities.question_ttl = 5;
            c.entities.adoption_chance = 0.0;
        })
        .with_entity(entity_at(1, 50.0, 50.0, Role::Curious, 0.1))
        .build();

    let mut emitted = 0;
    for tick in 1..=100u64 {
        world.step();
        emitted += world.questions.iter().filter(|q| q.spawn_tick == tick).count();
        let alive = !world.questions.is_empty();
        let phase = (tick - 1) % 10;
        assert_eq!(alive, phase < 5, "question liveness at tick {tick}");
        if alive {
            assert_eq!(world.questions.len(), 1);
            assert_eq!(world.questions[0].position, Position::new(50.0, 50.0));
        }
        assert_world_invariants!(world);
    }
    assert_eq!(emitted, 10);
}

#[test]
fn test_follower_pipeline_fills_trust() {
    let mut world = WorldBuilder::new()
        .with_seed(3)
        .with_deity("AEGIS", 10.0, 10.0, ActivationKind::Dormant)
        .with_config(|c| {
            c.entities.follower_trust_gain = 0.1;
            c.entities.contribute_chance = 1.0;
        })
        .with_entity(entity_at(1, 10.0, 10.0, Role::Follower, 0.0))
        .build();
    let before = world.deities[0].aggregate_trust;

    world.run(10);

    let id = world.entities[0].id;
    assert_trust!(world, id, 1.0);
    assert!(world.deities[0].aggregate_trust > before);
    assert_eq!(world.deities[0].nearby_followers, 1);
    assert_eq!(world.entities[0].patron, Some(world.deities[0].id));
}

#[test]
fn test_rust_zone_erodes_follower_trust() {
    let builder = || {
        WorldBuilder::new()
            .with_seed(4)
            .with_deity("AEGIS", 1100.0, 700.0, ActivationKind::Dormant)
            .with_config(|c| {
                c.hazards.rust_trust_erosion = 0.05;
                c.hazards.rust.max_radius = 60.0;
                c.entities.follower_trust_gain = 0.0;
            })
            .with_entity(entity_at(1, 300.0, 300.0, Role::Follower, 1.0))
            .with_hazard(HazardKind::Rust, 300.0, 300.0, 50.0)
    };

    let mut world = builder().build();
    world.run(20);
    assert_trust!(world, world.entities[0].id, 0.0);

    let mut world = builder().build();
    world.run(10);
    world.entities[0].position = Position::new(600.0, 300.0);
    world.run(10);
    assert_trust!(world, world.entities[0].id, 0.5);
}

#[test]
fn test_save_load_matches_uninterrupted_run() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("world.json");
    let config = common::quiet_config(55, 200);

    let mut straight = World::new(config.clone()).unwrap();
    straight.run(2000);

    let mut first = World::new(config.clone()).unwrap();
    first.run(1000);
    first.save(&path).unwrap();
    drop(first);

    let mut resumed = World::load(&path, &config)
        .unwrap()
        .into_world()
        .expect("save should load");
    resumed.run(1000);

    assert_eq!(resumed.tick(), 2000);
    let a = resumed.snapshot();
    let b = straight.snapshot();
    assert_eq!(a, b);
    assert_eq!(
        serde_json::to_string(&a).unwrap(),
        serde_json::to_string(&b).unwrap()
    );
}

#[test]
fn test_truncated_save_is_corrupt_and_new_is_canonical() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("world.json");
    let config = common::quiet_config(66, 50);

    let mut world = World::new(config.clone()).unwrap();
    world.run(100);
    world.save(&path).unwrap();

    let bytes = std::fs::read(&path).unwrap();
    std::fs::write(&path, &bytes[..bytes.len() / 2]).unwrap();

    let outcome = World::load(&path, &config).unwrap();
    assert!(matches!(outcome, LoadOutcome::Corrupt(_)));

    let fresh = World::new(config.clone()).unwrap();
    let canonical = World::new(config).unwrap();
    assert_eq!(fresh.snapshot(), canonical.snapshot());
    assert_eq!(fresh.tick(), 0);
}
