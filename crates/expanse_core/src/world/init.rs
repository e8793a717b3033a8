use crate::clock::WorldClock;
use crate::config::AppConfig;
use crate::error::Result;
use crate::hazard::HazardField;
use crate::snapshot::WorldMetrics;
use crate::world::World;
use expanse_data::{Deity, Entity, Position, Role, Velocity};
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use std::collections::VecDeque;
use uuid::Uuid;

impl World {
    /// Builds a fresh world from a validated configuration.
    ///
    /// Deities are created first, in roster order, then the initial
    /// population: Lesser entities followed by Curious ones.
    pub fn new(config: AppConfig) -> Result<Self> {
        config.validate()?;
        let width = config.world.width;
        let height = config.world.height;
        let mut rng = ChaCha8Rng::seed_from_u64(config.world.seed);

        let deities = config
            .deities
            .roster
            .iter()
            .map(|spec| Deity {
                id: draw_uuid(&mut rng),
                name: spec.name.clone(),
                domain: spec.domain.clone(),
                position: Position::new(spec.x, spec.y),
                aggregate_trust: spec.initial_trust,
                nearby_followers: 0,
                activation_ticks: 0,
                activation_kind: spec.kind,
            })
            .collect();

        let total = config.world.initial_population;
        let curious = ((total as f64) * config.world.curious_fraction).round() as usize;
        let curious = curious.min(total);
        let mut entities = Vec::with_capacity(total);
        for i in 0..total {
            let role = if i < total - curious {
                Role::Lesser
            } else {
                Role::Curious
            };
            let position = Position::new(
                rng.gen_range(0.0..width),
                rng.gen_range(0.0..height),
            );
            let trust_max = config.entities.initial_trust_max;
            let trust = if trust_max > 0.0 {
                rng.gen_range(0.0..trust_max)
            } else {
                0.0
            };
            entities.push(create_entity(&mut rng, &config, position, role, trust));
        }

        let mut world = Self {
            clock: WorldClock::new(config.world.ticks_per_second),
            rng,
            width,
            height,
            entities,
            deities,
            hazards: HazardField::new(width, height),
            questions: Vec::new(),
            resonances: Vec::new(),
            metrics: WorldMetrics::default(),
            history: VecDeque::new(),
            last_persistence_error: None,
            config,
        };
        world.refresh_metrics();
        tracing::info!(
            seed = world.config.world.seed,
            entities = world.entities.len(),
            deities = world.deities.len(),
            "World created"
        );
        Ok(world)
    }
}

/// Uuid built from 16 bytes of the world stream, so a seed reproduces ids.
pub fn draw_uuid(rng: &mut ChaCha8Rng) -> Uuid {
    uuid::Builder::from_random_bytes(rng.gen()).into_uuid()
}

/// Creates an entity at `position`. Draws id, velocity and size from `rng`.
pub fn create_entity(
    rng: &mut ChaCha8Rng,
    config: &AppConfig,
    position: Position,
    role: Role,
    trust: f64,
) -> Entity {
    let id = draw_uuid(rng);
    let speed = config.entities.initial_speed;
    let velocity = if speed > 0.0 {
        Velocity {
            vx: rng.gen_range(-speed..speed),
            vy: rng.gen_range(-speed..speed),
        }
    } else {
        Velocity::default()
    };
    let mut entity = Entity::new(id, position, velocity, role, trust);
    entity.size = rng.gen_range(Entity::MIN_SIZE..=Entity::MAX_SIZE);
    entity
}

#[cfg(test)]
mod tests {
    use super::*;
    use expanse_data::ActivationKind;

    fn config(seed: u64, population: usize) -> AppConfig {
        let mut config = AppConfig::default();
        config.world.seed = seed;
        config.world.initial_population = population;
        config.persistence.autosave_path = None;
        config
    }

    #[test]
    fn test_population_split() {
        let world = World::new(config(1, 200)).unwrap();
        assert_eq!(world.metrics.lesser, 150);
        assert_eq!(world.metrics.curious, 50);
        assert_eq!(world.metrics.followers, 0);
    }

    #[test]
    fn test_initial_entities_are_in_range() {
        let world = World::new(config(2, 100)).unwrap();
        for e in &world.entities {
            assert!((0.0..1200.0).contains(&e.position.x));
            assert!((0.0..800.0).contains(&e.position.y));
            assert!((0.0..0.3).contains(&e.trust));
            assert!(e.velocity.vx.abs() < 0.5 && e.velocity.vy.abs() < 0.5);
            assert!((Entity::MIN_SIZE..=Entity::MAX_SIZE).contains(&e.size));
        }
    }

    #[test]
    fn test_roster_order_and_trust() {
        let world = World::new(config(3, 0)).unwrap();
        let names: Vec<_> = world.deities.iter().map(|d| d.name.as_str()).collect();
        assert_eq!(names, ["AEGIS", "SYNAPSE", "QUERENS"]);
        assert_eq!(world.deities[0].activation_kind, ActivationKind::Shield);
        assert!(world.deities.iter().all(|d| d.aggregate_trust == 1.0));
    }

    #[test]
    fn test_same_seed_same_ids() {
        let a = World::new(config(9, 20)).unwrap();
        let b = World::new(config(9, 20)).unwrap();
        let c = World::new(config(10, 20)).unwrap();
        assert_eq!(a.entities[5].id, b.entities[5].id);
        assert_ne!(a.entities[5].id, c.entities[5].id);
    }

    #[test]
    fn test_invalid_config_is_rejected() {
        let mut cfg = config(1, 10);
        cfg.world.height = -1.0;
        assert!(World::new(cfg).is_err());
    }
}
