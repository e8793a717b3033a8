//! Headless host: loads or creates a world, steps it and reports progress.

use anyhow::{Context, Result};
use std::path::Path;
use std::time::Instant;

use crate::model::config::AppConfig;
use crate::model::metrics::Metrics;
use crate::model::persistence::LoadOutcome;
use crate::model::world::World;

pub struct App {
    pub running: bool,
    pub world: World,
    pub metrics: Metrics,
    /// Set when `resume` found a save it could not use.
    pub load_warning: Option<String>,
}

impl App {
    pub fn with_config(config: AppConfig) -> Result<Self> {
        let world = World::new(config).context("Failed to create world")?;
        Ok(Self::from_world(world))
    }

    /// Loads the world at the configured save path.
    ///
    /// A missing save starts fresh. A corrupt save is reported and also
    /// starts fresh; the bad file is left in place.
    pub fn resume(config: AppConfig) -> Result<Self> {
        let path = config.persistence.save_path.clone();
        let outcome = World::load(&path, &config)
            .with_context(|| format!("Failed to read save file {}", path))?;
        match outcome {
            LoadOutcome::Loaded(world) => {
                tracing::info!(path = %path, tick = world.tick(), "Resumed saved world");
                Ok(Self::from_world(*world))
            }
            LoadOutcome::Missing => {
                tracing::info!(path = %path, "No save found, starting fresh");
                Self::with_config(config)
            }
            LoadOutcome::Corrupt(reason) => {
                tracing::warn!(path = %path, reason = %reason, "Save file is corrupt, starting fresh");
                let mut app = Self::with_config(config)?;
                app.load_warning = Some(reason);
                Ok(app)
            }
        }
    }

    fn from_world(world: World) -> Self {
        Self {
            running: true,
            world,
            metrics: Metrics::new(),
            load_warning: None,
        }
    }

    /// Steps the world `ticks` times, recording timings.
    pub fn run_for(&mut self, ticks: u64) {
        for _ in 0..ticks {
            if !self.running {
                break;
            }
            self.step_once();
        }
    }

    fn step_once(&mut self) {
        let start = Instant::now();
        self.world.step();
        self.metrics
            .record_tick(self.world.tick(), start.elapsed(), self.world.metrics());
        // a due autosave always clears or sets the error
        if self.world.autosave_due() && self.world.last_persistence_error.is_some() {
            self.metrics.increment_counter("autosave_failed");
        }
    }

    /// Saves to the configured primary save path.
    pub fn save(&self) -> Result<()> {
        self.world
            .save_primary()
            .with_context(|| format!("Failed to save to {}", self.world.config.persistence.save_path))
    }

    /// Writes the current snapshot as pretty JSON.
    pub fn write_snapshot(&self, path: impl AsRef<Path>) -> Result<()> {
        let path = path.as_ref();
        let json = expanse_io::to_json_pretty(&self.world.snapshot())?;
        expanse_io::write_atomic(path, json.as_bytes())
            .with_context(|| format!("Failed to write snapshot {}", path.display()))?;
        Ok(())
    }
}
