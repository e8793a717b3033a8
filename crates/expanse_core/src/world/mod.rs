use crate::clock::WorldClock;
use crate::config::AppConfig;
use crate::hazard::HazardField;
use crate::snapshot::WorldMetrics;
use expanse_data::{Deity, Entity, MetricsSample, Question, Resonance};
use rand_chacha::ChaCha8Rng;
use std::collections::VecDeque;

pub mod init;
pub mod interventions;
pub mod state;
pub mod update;

/// The whole simulated world.
///
/// One value owns every collection. Hosts that render from another thread
/// wrap it in a lock; nothing inside is shared.
#[derive(Debug, Clone)]
pub struct World {
    pub config: AppConfig,
    pub width: f64,
    pub height: f64,
    pub clock: WorldClock,
    pub rng: ChaCha8Rng,
    pub entities: Vec<Entity>,
    pub deities: Vec<Deity>,
    pub hazards: HazardField,
    pub questions: Vec<Question>,
    pub resonances: Vec<Resonance>,
    pub metrics: WorldMetrics,
    pub history: VecDeque<MetricsSample>,
    /// Most recent autosave failure; cleared by the next successful autosave.
    pub last_persistence_error: Option<String>,
}

impl PartialEq for World {
    fn eq(&self, other: &Self) -> bool {
        self.config == other.config
            && self.width == other.width
            && self.height == other.height
            && self.clock == other.clock
            && self.rng == other.rng
            && self.entities == other.entities
            && self.deities == other.deities
            && self.hazards == other.hazards
            && self.questions == other.questions
            && self.resonances == other.resonances
            && self.metrics == other.metrics
            && self.history == other.history
    }
}
