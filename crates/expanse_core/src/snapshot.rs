//! Read-only views of a world for renderers and determinism checks.

use expanse_data::{Deity, Entity, Hazard, Question, Resonance};
use serde::{Deserialize, Serialize};

/// Aggregates derived from a world at the end of a step.
#[derive(Serialize, Deserialize, Clone, Debug, Default, PartialEq)]
pub struct WorldMetrics {
    pub lesser: usize,
    pub curious: usize,
    pub followers: usize,
    pub rust_hazards: usize,
    pub gray_hazards: usize,
    pub questions: usize,
    pub resonances: usize,
    pub mean_trust: f64,
    pub total_aggregate_trust: f64,
    pub nearby_follower_total: u32,
}

impl WorldMetrics {
    #[must_use]
    pub fn population(&self) -> usize {
        self.lesser + self.curious + self.followers
    }
}

/// Owned, read-only copy of everything a renderer needs.
///
/// Two snapshots compare equal exactly when they serialize to the same
/// bytes, which makes them the unit of determinism checks.
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
pub struct WorldSnapshot {
    pub tick: u64,
    pub width: f64,
    pub height: f64,
    pub entities: Vec<Entity>,
    pub deities: Vec<Deity>,
    pub hazards: Vec<Hazard>,
    pub questions: Vec<Question>,
    pub resonances: Vec<Resonance>,
    pub metrics: WorldMetrics,
}

#[cfg(test)]
mod tests {
    use crate::config::AppConfig;
    use crate::world::World;

    #[test]
    fn test_equal_snapshots_serialize_identically() {
        let mut config = AppConfig::default();
        config.world.initial_population = 30;
        config.persistence.autosave_path = None;
        let mut a = World::new(config.clone()).unwrap();
        let mut b = World::new(config).unwrap();
        a.run(120);
        b.run(120);
        let (sa, sb) = (a.snapshot(), b.snapshot());
        assert_eq!(sa, sb);
        assert_eq!(
            serde_json::to_string(&sa).unwrap(),
            serde_json::to_string(&sb).unwrap()
        );
        assert_eq!(sa.metrics.population(), 30);
    }
}
