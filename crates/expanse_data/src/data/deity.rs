use super::entity::Position;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// How a deity expresses activation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum ActivationKind {
    /// Raises a shield at random while idle (the firewall deity).
    Shield,
    /// Responds whenever a question exists anywhere in the world.
    Inquiry,
    /// No scheduled activation.
    #[default]
    Dormant,
}

/// A named actor that gathers followers and aggregate trust.
///
/// Deities are never removed from a world.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Deity {
    pub id: Uuid,
    pub name: String,
    pub domain: String,
    pub position: Position,
    pub aggregate_trust: f64,
    /// Recomputed every tick.
    pub nearby_followers: u32,
    pub activation_ticks: u32,
    pub activation_kind: ActivationKind,
}

impl Deity {
    #[must_use]
    pub fn is_active(&self) -> bool {
        self.activation_ticks > 0
    }

    /// Adds trust, ignoring anything that would make the total negative.
    pub fn contribute(&mut self, amount: f64) {
        self.aggregate_trust = (self.aggregate_trust + amount).max(0.0);
    }
}
