//! Save document format and the load/save contract.
//!
//! A save is one self-describing JSON document (optionally gzip framed)
//! carrying the full world: collections, tick and the PRNG state, so a
//! loaded world continues the exact random stream it was saved with.

use crate::clock::WorldClock;
use crate::config::AppConfig;
use crate::error::{Result, SimError};
use crate::hazard::HazardField;
use crate::snapshot::WorldMetrics;
use crate::world::World;
use expanse_data::{Deity, Entity, Hazard, MetricsSample, Position, Question, Resonance};
use rand_chacha::ChaCha8Rng;
use serde::{Deserialize, Serialize};
use std::collections::VecDeque;
use std::path::Path;

pub const CURRENT_SAVE_VERSION: u32 = 1;

/// Borrowed view used for writing, so saving never clones the world.
#[derive(Serialize)]
pub struct SaveDocumentRef<'a> {
    pub version: u32,
    pub tick: u64,
    pub rng_state: &'a ChaCha8Rng,
    pub width: f64,
    pub height: f64,
    pub entities: &'a [Entity],
    pub deities: &'a [Deity],
    pub hazards: &'a [Hazard],
    pub questions: &'a [Question],
    pub resonances: &'a [Resonance],
    pub next_hazard_id: u64,
    pub history: &'a VecDeque<MetricsSample>,
    pub config: &'a AppConfig,
    pub config_fingerprint: String,
    pub saved_at: String,
}

/// Owned document used for reading. Unknown fields are ignored.
#[derive(Deserialize)]
pub struct SaveDocument {
    pub version: u32,
    pub tick: u64,
    pub rng_state: ChaCha8Rng,
    pub width: f64,
    pub height: f64,
    pub entities: Vec<Entity>,
    pub deities: Vec<Deity>,
    pub hazards: Vec<Hazard>,
    pub questions: Vec<Question>,
    pub resonances: Vec<Resonance>,
    #[serde(default)]
    pub next_hazard_id: Option<u64>,
    #[serde(default)]
    pub history: VecDeque<MetricsSample>,
    #[serde(default)]
    pub config: Option<AppConfig>,
    #[serde(default)]
    pub config_fingerprint: Option<String>,
    #[serde(default)]
    pub saved_at: Option<String>,
}

#[derive(Deserialize)]
struct VersionProbe {
    version: u32,
}

/// Result of [`load_world`].
#[derive(Debug)]
pub enum LoadOutcome {
    Loaded(Box<World>),
    /// No file at the path.
    Missing,
    /// The file exists but is not a usable save. Carries the reason.
    Corrupt(String),
}

impl LoadOutcome {
    #[must_use]
    pub fn is_loaded(&self) -> bool {
        matches!(self, Self::Loaded(_))
    }

    /// The loaded world, if any.
    #[must_use]
    pub fn into_world(self) -> Option<World> {
        match self {
            Self::Loaded(world) => Some(*world),
            _ => None,
        }
    }
}

/// Writes `world` to `path` atomically.
///
/// Paths ending in `.gz` are gzip-compressed. On failure the previous file at
/// `path` is left untouched.
pub fn save_world(world: &World, path: impl AsRef<Path>) -> Result<()> {
    let path = path.as_ref();
    let doc = SaveDocumentRef {
        version: CURRENT_SAVE_VERSION,
        tick: world.tick(),
        rng_state: &world.rng,
        width: world.width,
        height: world.height,
        entities: &world.entities,
        deities: &world.deities,
        hazards: world.hazards.hazards(),
        questions: &world.questions,
        resonances: &world.resonances,
        next_hazard_id: world.hazards.next_id(),
        history: &world.history,
        config: &world.config,
        config_fingerprint: world.config.fingerprint(),
        saved_at: chrono::Utc::now().to_rfc3339(),
    };

    let json = expanse_io::to_json(&doc)?;
    expanse_io::write_document(path, &json)?;
    tracing::debug!(path = %path.display(), tick = world.tick(), bytes = json.len(), "World saved");
    Ok(())
}

/// Loads a world from `path`.
///
/// The world's config comes from the document when it carries one, otherwise
/// from `config`. I/O failures other than a missing file are returned as
/// errors; anything that reads but does not decode is [`LoadOutcome::Corrupt`].
pub fn load_world(path: impl AsRef<Path>, config: &AppConfig) -> Result<LoadOutcome> {
    let path = path.as_ref();
    let text = match expanse_io::read_document(path) {
        Ok(text) => text,
        Err(e) if e.is_not_found() => return Ok(LoadOutcome::Missing),
        Err(e) if e.is_decode_failure() => return Ok(LoadOutcome::Corrupt(e.to_string())),
        Err(e) => return Err(SimError::Persistence(e)),
    };

    let probe: VersionProbe = match expanse_io::from_json(&text) {
        Ok(p) => p,
        Err(e) => return Ok(LoadOutcome::Corrupt(e.to_string())),
    };
    match probe.version {
        CURRENT_SAVE_VERSION => {}
        v if v > CURRENT_SAVE_VERSION => {
            return Ok(LoadOutcome::Corrupt(format!(
                "Save file version {} is newer than supported version {}",
                v, CURRENT_SAVE_VERSION
            )));
        }
        v => {
            return Ok(LoadOutcome::Corrupt(format!(
                "Unsupported save version: {}",
                v
            )));
        }
    }

    let doc: SaveDocument = match expanse_io::from_json(&text) {
        Ok(doc) => doc,
        Err(e) => return Ok(LoadOutcome::Corrupt(e.to_string())),
    };

    match restore(doc, config) {
        Ok(world) => {
            tracing::info!(path = %path.display(), tick = world.tick(), "World loaded");
            Ok(LoadOutcome::Loaded(Box::new(world)))
        }
        Err(reason) => Ok(LoadOutcome::Corrupt(reason)),
    }
}

fn restore(mut doc: SaveDocument, caller: &AppConfig) -> std::result::Result<World, String> {
    if let Some(saved) = &doc.config_fingerprint {
        if *saved != caller.fingerprint() {
            tracing::warn!("Save was written with a different configuration; using the saved one");
        }
    }

    let mut config = doc.config.take().unwrap_or_else(|| caller.clone());
    config.world.width = doc.width;
    config.world.height = doc.height;
    config
        .validate()
        .map_err(|e| format!("Saved world is inconsistent: {}", e))?;

    let width = doc.width;
    let height = doc.height;
    check_records(&doc, &config)?;

    let mut world = World {
        clock: WorldClock::at(doc.tick, config.world.ticks_per_second),
        rng: doc.rng_state,
        width,
        height,
        entities: doc.entities,
        deities: doc.deities,
        hazards: HazardField::from_parts(doc.hazards, doc.next_hazard_id, width, height),
        questions: doc.questions,
        resonances: doc.resonances,
        metrics: WorldMetrics::default(),
        history: doc.history,
        last_persistence_error: None,
        config,
    };
    world.refresh_metrics();
    Ok(world)
}

/// Rejects records that no sequence of steps and interventions can produce.
fn check_records(doc: &SaveDocument, config: &AppConfig) -> std::result::Result<(), String> {
    let inside = |p: &Position| (0.0..doc.width).contains(&p.x) && (0.0..doc.height).contains(&p.y);

    for e in &doc.entities {
        if !inside(&e.position) {
            return Err(format!("Entity {} position outside the world", e.id));
        }
        if !(0.0..=1.0).contains(&e.trust) {
            return Err(format!("Entity {} trust {} outside [0, 1]", e.id, e.trust));
        }
        if !(Entity::MIN_SIZE..=Entity::MAX_SIZE).contains(&e.size) {
            return Err(format!("Entity {} size {} outside [2, 5]", e.id, e.size));
        }
        if !e.velocity.vx.is_finite() || !e.velocity.vy.is_finite() {
            return Err(format!("Entity {} velocity is not finite", e.id));
        }
    }

    for d in &doc.deities {
        if !inside(&d.position) {
            return Err(format!("Deity {} position outside the world", d.name));
        }
        if !d.aggregate_trust.is_finite() || d.aggregate_trust < 0.0 {
            return Err(format!("Deity {} aggregate trust is negative", d.name));
        }
    }

    for h in &doc.hazards {
        let spec = config.hazards.kind(h.kind);
        // a user-placed zone may sit exactly on the floor until the next decay
        if !inside(&h.position) || !(spec.floor..=spec.max_radius).contains(&h.radius) {
            return Err(format!(
                "Hazard {} radius {} outside [{}, {}] or centre outside the world",
                h.id, h.radius, spec.floor, spec.max_radius
            ));
        }
    }

    for q in &doc.questions {
        if q.ttl == 0 || !inside(&q.position) {
            return Err(format!("Question spawned at tick {} is expired or misplaced", q.spawn_tick));
        }
    }

    let max_life = config.events.resonance_life;
    for r in &doc.resonances {
        if r.life == 0 || r.life > max_life || !r.radius.is_finite() {
            return Err(format!("Resonance life {} outside [1, {}]", r.life, max_life));
        }
    }

    Ok(())
}
