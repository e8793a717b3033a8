use crate::config::AppConfig;
use crate::error::Result;
use crate::persistence::{self, LoadOutcome};
use crate::snapshot::{WorldMetrics, WorldSnapshot};
use crate::world::World;
use expanse_data::Entity;
use std::path::Path;
use uuid::Uuid;

impl World {
    #[must_use]
    pub fn tick(&self) -> u64 {
        self.clock.tick()
    }

    #[must_use]
    pub fn metrics(&self) -> &WorldMetrics {
        &self.metrics
    }

    #[must_use]
    pub fn entity(&self, id: Uuid) -> Option<&Entity> {
        self.entities.iter().find(|e| e.id == id)
    }

    /// Owned copy of the renderable state.
    #[must_use]
    pub fn snapshot(&self) -> WorldSnapshot {
        WorldSnapshot {
            tick: self.tick(),
            width: self.width,
            height: self.height,
            entities: self.entities.clone(),
            deities: self.deities.clone(),
            hazards: self.hazards.hazards().to_vec(),
            questions: self.questions.clone(),
            resonances: self.resonances.clone(),
            metrics: self.metrics.clone(),
        }
    }

    /// Saves to `path` atomically. See [`persistence::save_world`].
    pub fn save(&self, path: impl AsRef<Path>) -> Result<()> {
        persistence::save_world(self, path)
    }

    /// Saves to the configured primary save path.
    pub fn save_primary(&self) -> Result<()> {
        let path = self.config.persistence.save_path.clone();
        self.save(path)
    }

    /// Loads a world. See [`persistence::load_world`].
    pub fn load(path: impl AsRef<Path>, config: &AppConfig) -> Result<LoadOutcome> {
        persistence::load_world(path, config)
    }
}
