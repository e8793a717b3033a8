/// Asserts that two floats are within `1e-9` of each other.
#[macro_export]
macro_rules! assert_approx {
    ($left:expr, $right:expr) => {
        let (l, r): (f64, f64) = ($left, $right);
        assert!((l - r).abs() < 1e-9, "{} is not approximately {}", l, r);
    };
}

/// Asserts that the entity with the given id has approximately `trust`.
#[macro_export]
macro_rules! assert_trust {
    ($world:expr, $id:expr, $trust:expr) => {
        let entity = $world.entity($id).expect("Entity not found in world");
        assert!(
            (entity.trust - $trust).abs() < 1e-9,
            "Entity {} trust {} is not {}",
            $id,
            entity.trust,
            $trust
        );
    };
}

/// Asserts every per-step invariant of a world.
#[macro_export]
macro_rules! assert_world_invariants {
    ($world:expr) => {
        let w = &$world;
        for e in &w.entities {
            assert!((0.0..=1.0).contains(&e.trust), "trust {} out of range", e.trust);
            assert!(e.position.x >= 0.0 && e.position.x < w.width, "x {} outside", e.position.x);
            assert!(e.position.y >= 0.0 && e.position.y < w.height, "y {} outside", e.position.y);
        }
        for h in w.hazards.iter() {
            let floor = w.config.hazards.kind(h.kind).floor;
            assert!(h.radius > floor, "hazard {} radius {} at floor", h.id, h.radius);
        }
        assert!(w.questions.iter().all(|q| q.ttl > 0), "question with ttl 0");
        for r in &w.resonances {
            assert!(r.life <= w.config.events.resonance_life);
        }
        assert!(w.deities.iter().all(|d| d.aggregate_trust >= 0.0));
    };
}
