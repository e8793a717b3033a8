use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// World position. Always inside `[0, width) x [0, height)` after a step.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Position {
    pub x: f64,
    pub y: f64,
}

impl Position {
    #[must_use]
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    /// Euclidean distance. The world wraps for movement only; proximity is
    /// measured on the plane.
    #[must_use]
    pub fn distance(&self, other: &Position) -> f64 {
        let dx = self.x - other.x;
        let dy = self.y - other.y;
        (dx * dx + dy * dy).sqrt()
    }

    /// Wraps the position into `[0, width) x [0, height)`.
    #[must_use]
    pub fn wrapped(self, width: f64, height: f64) -> Self {
        Self {
            x: wrap_axis(self.x, width),
            y: wrap_axis(self.y, height),
        }
    }
}

fn wrap_axis(value: f64, extent: f64) -> f64 {
    let v = value.rem_euclid(extent);
    // rem_euclid can round up to exactly `extent` for tiny negative inputs
    if v >= extent {
        0.0
    } else {
        v
    }
}

/// Per-tick displacement of an entity.
#[derive(Clone, Copy, Debug, PartialEq, Default, Serialize, Deserialize)]
pub struct Velocity {
    pub vx: f64,
    pub vy: f64,
}

impl Velocity {
    #[must_use]
    pub fn scaled(self, factor: f64) -> Self {
        Self {
            vx: self.vx * factor,
            vy: self.vy * factor,
        }
    }
}

/// Behavioural class of an entity.
///
/// `Follower` is terminal: nothing in the simulation turns a follower back.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum Role {
    #[default]
    Lesser,
    Curious,
    Follower,
}

impl Role {
    #[must_use]
    pub fn label(&self) -> &'static str {
        match self {
            Role::Lesser => "lesser",
            Role::Curious => "curious",
            Role::Follower => "follower",
        }
    }

    #[must_use]
    pub fn is_follower(&self) -> bool {
        matches!(self, Role::Follower)
    }
}

/// A lightweight agent of the expanse.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Entity {
    pub id: Uuid,
    pub position: Position,
    pub velocity: Velocity,
    pub role: Role,
    /// Always within `[0, 1]`; use [`Entity::set_trust`] to mutate.
    pub trust: f64,
    /// Cosmetic radius in `[2, 5]`, fixed at creation.
    pub size: u8,
    pub question_cooldown: u32,
    /// Deity this follower most recently contributed to.
    #[serde(default)]
    pub patron: Option<Uuid>,
}

impl Entity {
    pub const MIN_SIZE: u8 = 2;
    pub const MAX_SIZE: u8 = 5;

    #[must_use]
    pub fn new(id: Uuid, position: Position, velocity: Velocity, role: Role, trust: f64) -> Self {
        Self {
            id,
            position,
            velocity,
            role,
            trust: clamp_trust(trust),
            size: Self::MIN_SIZE,
            question_cooldown: 0,
            patron: None,
        }
    }

    /// Sets trust, clamping into `[0, 1]`. NaN collapses to zero.
    pub fn set_trust(&mut self, value: f64) {
        self.trust = clamp_trust(value);
    }

    pub fn adjust_trust(&mut self, delta: f64) {
        self.set_trust(self.trust + delta);
    }
}

fn clamp_trust(value: f64) -> f64 {
    if value.is_nan() {
        0.0
    } else {
        value.clamp(0.0, 1.0)
    }
}
