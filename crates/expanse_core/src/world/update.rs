use crate::systems::entity::{self, EntityContext};
use crate::systems::{deity, events, stats};
use crate::world::World;
use expanse_data::{HazardKind, Position};
use rand::Rng;

impl World {
    /// Advances the simulation by exactly one tick.
    ///
    /// Order is fixed: interval hazard spawns, entities, deities, event bus,
    /// hazard decay, metrics and history, autosave. Random draws follow the
    /// same order, so a seed and a starting state reproduce the run.
    pub fn step(&mut self) {
        let tick = self.clock.advance();

        self.spawn_scheduled_hazards(tick);

        let report = {
            let mut ctx = EntityContext {
                config: &self.config,
                hazards: &self.hazards,
                deities: &mut self.deities,
                questions: &mut self.questions,
                width: self.width,
                height: self.height,
                tick,
            };
            entity::update_entities(&mut self.entities, &mut ctx, &mut self.rng)
        };

        let questions_present = !self.questions.is_empty();
        deity::update_deities(
            &mut self.deities,
            &self.entities,
            questions_present,
            &self.config.deities,
            &mut self.rng,
        );

        events::update_events(
            &mut self.questions,
            &mut self.resonances,
            &self.config.events,
            tick,
            &mut self.rng,
        );

        let expired = self.hazards.decay_step(&self.config.hazards);

        self.refresh_metrics();
        let interval = self.config.history.interval_ticks;
        if self.clock.is_due(interval) {
            stats::record_sample(
                &mut self.history,
                &self.metrics,
                tick,
                self.config.history.capacity,
            );
        }

        tracing::trace!(
            tick,
            contributions = report.contributions,
            questions = report.questions,
            conversions = report.conversions,
            expired_hazards = expired,
            "Step complete"
        );

        self.autosave_if_due();
    }

    /// Runs `ticks` steps.
    pub fn run(&mut self, ticks: u64) {
        for _ in 0..ticks {
            self.step();
        }
    }

    fn spawn_scheduled_hazards(&mut self, tick: u64) {
        for kind in HazardKind::ALL {
            let spec = self.config.hazards.kind(kind);
            if !self.clock.is_due(spec.period_ticks) {
                continue;
            }
            let position = Position::new(
                self.rng.gen_range(0.0..self.width),
                self.rng.gen_range(0.0..self.height),
            );
            let radius = self
                .rng
                .gen_range(spec.spawn_radius_min..=spec.spawn_radius_max);
            let id = self
                .hazards
                .spawn(&self.config.hazards, kind, position, radius, tick);
            tracing::debug!(tick, id, kind = kind.label(), radius, "Scheduled hazard");
        }
    }

    /// Recomputes [`World::metrics`] from the current collections.
    pub fn refresh_metrics(&mut self) {
        self.metrics = stats::compute_metrics(&stats::StatsContext {
            entities: &self.entities,
            deities: &self.deities,
            hazards: &self.hazards,
            questions: &self.questions,
            resonances: &self.resonances,
        });
    }

    /// True when the current tick is one on which `step` attempts an
    /// autosave.
    #[must_use]
    pub fn autosave_due(&self) -> bool {
        self.config.persistence.autosave_path.is_some()
            && self
                .clock
                .is_due(self.config.persistence.auto_save_interval_ticks)
    }

    fn autosave_if_due(&mut self) {
        if !self.autosave_due() {
            return;
        }
        let Some(path) = self.config.persistence.autosave_path.clone() else {
            return;
        };
        match self.save(&path) {
            Ok(()) => {
                self.last_persistence_error = None;
                tracing::info!(tick = self.tick(), path = %path, "Autosave complete");
            }
            Err(e) => {
                tracing::warn!(tick = self.tick(), path = %path, error = %e, "Autosave failed");
                self.last_persistence_error = Some(e.to_string());
            }
        }
    }
}
