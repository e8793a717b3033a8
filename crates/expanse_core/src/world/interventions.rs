//! Host interventions: the clicks and buttons of an interactive front end.

use crate::world::init::create_entity;
use crate::world::World;
use expanse_data::{HazardKind, Position, Resonance, Role};
use uuid::Uuid;

impl World {
    /// Places a zone at (x, y). The radius is clamped to the kind's range.
    pub fn spawn_hazard(&mut self, kind: HazardKind, x: f64, y: f64, radius: f64) -> u64 {
        let tick = self.tick();
        let id = self
            .hazards
            .spawn(&self.config.hazards, kind, Position::new(x, y), radius, tick);
        self.refresh_metrics();
        id
    }

    /// Removes a zone by id. Unknown ids return `false`.
    pub fn remove_hazard(&mut self, id: u64) -> bool {
        let removed = self.hazards.remove(id);
        if removed {
            self.refresh_metrics();
        }
        removed
    }

    /// Turns an entity into a follower.
    ///
    /// Returns `false` if the id is unknown or the entity already follows.
    pub fn convert_to_follower(&mut self, id: Uuid) -> bool {
        let Some(entity) = self.entities.iter_mut().find(|e| e.id == id) else {
            return false;
        };
        if entity.role.is_follower() {
            return false;
        }
        entity.role = Role::Follower;
        self.refresh_metrics();
        true
    }

    /// Creates an entity at (x, y); velocity, size and id come from the
    /// world stream.
    pub fn spawn_entity(&mut self, x: f64, y: f64, role: Role, trust: f64) -> Uuid {
        let position = self.world_position(x, y);
        let entity = create_entity(&mut self.rng, &self.config, position, role, trust);
        let id = entity.id;
        self.entities.push(entity);
        self.refresh_metrics();
        id
    }

    /// Purges Rust zones centred within `radius` of (x, y) and leaves a
    /// resonance ring. Returns the number of zones removed.
    pub fn cleanse(&mut self, x: f64, y: f64, radius: f64) -> usize {
        let radius = if radius.is_finite() { radius.max(0.0) } else { 0.0 };
        let centre = self.world_position(x, y);
        let removed = self.hazards.purge_within(HazardKind::Rust, &centre, radius);
        self.resonances.push(Resonance {
            position: centre,
            radius,
            life: self.config.events.cleanse_life,
        });
        self.refresh_metrics();
        tracing::debug!(x, y, radius, removed, "Cleanse");
        removed
    }

    /// Wraps a host coordinate into the world. Non-finite input maps to the
    /// origin.
    fn world_position(&self, x: f64, y: f64) -> Position {
        if x.is_finite() && y.is_finite() {
            Position::new(x, y).wrapped(self.width, self.height)
        } else {
            Position::default()
        }
    }
}
