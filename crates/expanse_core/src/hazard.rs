//! The hazard field: circular Rust and Gray zones that shrink every tick.

use crate::config::HazardConfig;
use expanse_data::{Hazard, HazardKind, Position};

/// Ordered collection of live hazard zones.
///
/// Zones are kept in spawn order. Ids are sequential per field and never
/// reused, so a host can refer to a zone across ticks.
#[derive(Clone, Debug, PartialEq)]
pub struct HazardField {
    hazards: Vec<Hazard>,
    next_id: u64,
    width: f64,
    height: f64,
}

impl HazardField {
    #[must_use]
    pub fn new(width: f64, height: f64) -> Self {
        Self {
            hazards: Vec::new(),
            next_id: 0,
            width,
            height,
        }
    }

    /// Rebuilds a field from persisted parts.
    ///
    /// `next_id` is raised past every existing id so a stale counter can
    /// never hand out a duplicate.
    #[must_use]
    pub fn from_parts(hazards: Vec<Hazard>, next_id: Option<u64>, width: f64, height: f64) -> Self {
        let floor = hazards.iter().map(|h| h.id + 1).max().unwrap_or(0);
        Self {
            hazards,
            next_id: next_id.unwrap_or(floor).max(floor),
            width,
            height,
        }
    }

    /// Appends a zone and returns its id.
    ///
    /// The radius is clamped to the kind's `[floor, max_radius]` and the
    /// position is wrapped into the world.
    pub fn spawn(
        &mut self,
        config: &HazardConfig,
        kind: HazardKind,
        position: Position,
        radius: f64,
        tick: u64,
    ) -> u64 {
        let id = self.next_id;
        self.next_id += 1;
        let position = if position.x.is_finite() && position.y.is_finite() {
            position.wrapped(self.width, self.height)
        } else {
            Position::default()
        };
        let radius = config.kind(kind).clamp_radius(radius);
        tracing::trace!(id, kind = kind.label(), radius, "Hazard spawned");
        self.hazards.push(Hazard {
            id,
            kind,
            position,
            radius,
            spawn_tick: tick,
        });
        id
    }

    /// Shrinks every zone by its kind's decay and drops those at or below
    /// the floor. Returns the number removed.
    pub fn decay_step(&mut self, config: &HazardConfig) -> usize {
        let before = self.hazards.len();
        self.hazards.retain_mut(|h| {
            let kind = config.kind(h.kind);
            h.radius -= kind.decay;
            h.radius > kind.floor
        });
        before - self.hazards.len()
    }

    /// Zones strictly containing `position`.
    pub fn containing<'a>(&'a self, position: &'a Position) -> impl Iterator<Item = &'a Hazard> {
        self.hazards.iter().filter(move |h| h.contains(position))
    }

    /// Every zone containing `position` with its overlap depth
    /// (`radius - distance`, always positive).
    #[must_use]
    pub fn query_at(&self, position: &Position) -> Vec<(HazardKind, f64)> {
        self.containing(position)
            .map(|h| (h.kind, h.radius - h.position.distance(position)))
            .collect()
    }

    /// Removes a zone by id. Unknown ids are a no-op.
    pub fn remove(&mut self, id: u64) -> bool {
        match self.hazards.iter().position(|h| h.id == id) {
            Some(idx) => {
                self.hazards.remove(idx);
                true
            }
            None => false,
        }
    }

    /// Removes every zone of `kind` whose centre lies within `radius` of
    /// `centre`. Returns the number removed.
    pub fn purge_within(&mut self, kind: HazardKind, centre: &Position, radius: f64) -> usize {
        let before = self.hazards.len();
        self.hazards
            .retain(|h| !(h.kind == kind && h.position.distance(centre) <= radius));
        before - self.hazards.len()
    }

    #[must_use]
    pub fn count(&self, kind: HazardKind) -> usize {
        self.hazards.iter().filter(|h| h.kind == kind).count()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.hazards.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.hazards.is_empty()
    }

    #[must_use]
    pub fn hazards(&self) -> &[Hazard] {
        &self.hazards
    }

    #[must_use]
    pub fn next_id(&self) -> u64 {
        self.next_id
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Hazard> {
        self.hazards.iter()
    }
}
