use super::entity::Position;
use serde::{Deserialize, Serialize};

/// The two kinds of hazard zone.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum HazardKind {
    /// Erodes the trust of entities inside it.
    Rust,
    /// Dampens the velocity of entities inside it.
    Gray,
}

impl HazardKind {
    pub const ALL: [HazardKind; 2] = [HazardKind::Rust, HazardKind::Gray];

    #[must_use]
    pub fn label(&self) -> &'static str {
        match self {
            HazardKind::Rust => "rust",
            HazardKind::Gray => "gray",
        }
    }
}

/// A circular zone of effect that shrinks every tick.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Hazard {
    pub id: u64,
    pub kind: HazardKind,
    pub position: Position,
    pub radius: f64,
    pub spawn_tick: u64,
}

impl Hazard {
    /// Strict containment: a point on the rim is outside.
    #[must_use]
    pub fn contains(&self, point: &Position) -> bool {
        self.position.distance(point) < self.radius
    }
}

/// Ephemeral marker emitted by a curious entity.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Question {
    pub position: Position,
    pub ttl: u32,
    pub spawn_tick: u64,
}

/// Growing, short-lived ring. Presentational only.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Resonance {
    pub position: Position,
    pub radius: f64,
    pub life: u32,
}

/// One point of the world's metric history.
#[derive(Clone, Debug, PartialEq, Default, Serialize, Deserialize)]
pub struct MetricsSample {
    pub tick: u64,
    pub followers: usize,
    pub mean_trust: f64,
    pub total_aggregate_trust: f64,
}
