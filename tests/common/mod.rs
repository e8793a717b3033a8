pub mod macros;

use expanse_lib::model::config::{AppConfig, DeitySpec};
use expanse_lib::model::data::{ActivationKind, Entity, HazardKind, Position, Role, Velocity};
use expanse_lib::model::world::World;
use uuid::Uuid;

#[allow(dead_code)]
pub struct WorldBuilder {
    config: AppConfig,
    roster: Vec<DeitySpec>,
    entities: Vec<Entity>,
    hazards: Vec<(HazardKind, f64, f64, f64)>,
}

#[allow(dead_code)]
impl WorldBuilder {
    /// Empty world, default roster, autosave off.
    pub fn new() -> Self {
        let mut config = AppConfig::default();
        config.world.initial_population = 0;
        config.persistence.autosave_path = None;
        Self {
            config,
            roster: Vec::new(),
            entities: Vec::new(),
            hazards: Vec::new(),
        }
    }

    pub fn with_seed(mut self, seed: u64) -> Self {
        self.config.world.seed = seed;
        self
    }

    pub fn with_population(mut self, count: usize) -> Self {
        self.config.world.initial_population = count;
        self
    }

    pub fn with_config<F>(mut self, modifier: F) -> Self
    where
        F: FnOnce(&mut AppConfig),
    {
        modifier(&mut self.config);
        self
    }

    /// Replaces the default roster with the deities added through this call.
    pub fn with_deity(mut self, name: &str, x: f64, y: f64, kind: ActivationKind) -> Self {
        self.roster.push(DeitySpec {
            name: name.to_string(),
            domain: "Test".to_string(),
            x,
            y,
            kind,
            initial_trust: 1.0,
        });
        self
    }

    pub fn with_entity(mut self, entity: Entity) -> Self {
        self.entities.push(entity);
        self
    }

    pub fn with_hazard(mut self, kind: HazardKind, x: f64, y: f64, radius: f64) -> Self {
        self.hazards.push((kind, x, y, radius));
        self
    }

    pub fn config(&self) -> AppConfig {
        let mut config = self.config.clone();
        if !self.roster.is_empty() {
            config.deities.roster = self.roster.clone();
        }
        config
    }

    pub fn build(self) -> World {
        let config = self.config();
        let mut world = World::new(config).expect("Failed to create world");
        world.entities.extend(self.entities);
        for (kind, x, y, radius) in self.hazards {
            world.spawn_hazard(kind, x, y, radius);
        }
        world.refresh_metrics();
        world
    }
}

/// A motionless entity with a deterministic id.
#[allow(dead_code)]
pub fn entity_at(n: u128, x: f64, y: f64, role: Role, trust: f64) -> Entity {
    Entity::new(
        Uuid::from_u128(n),
        Position::new(x, y),
        Velocity::default(),
        role,
        trust,
    )
}

/// Default configuration with autosave off.
#[allow(dead_code)]
pub fn quiet_config(seed: u64, population: usize) -> AppConfig {
    let mut config = AppConfig::default();
    config.world.seed = seed;
    config.world.initial_population = population;
    config.persistence.autosave_path = None;
    config
}
