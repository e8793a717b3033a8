//! Configuration management for simulation parameters.
//!
//! This module provides strongly-typed configuration structures that map to
//! the `config.toml` file. Every section has working defaults (a 1200x800
//! plane at 60 ticks per second), so a partial file only needs to name what
//! it changes.
//!
//! ## Example `config.toml`
//!
//! ```toml
//! [world]
//! width = 1200.0
//! height = 800.0
//! seed = 42
//! initial_population = 200
//!
//! [hazards.rust]
//! period_ticks = 300
//! decay = 0.1
//!
//! [[deities.roster]]
//! name = "AEGIS"
//! domain = "Firewall"
//! x = 400.0
//! y = 400.0
//! kind = "Shield"
//! ```

use crate::error::{Result, SimError};
use expanse_data::{ActivationKind, HazardKind};
use serde::{Deserialize, Serialize};
use std::fs;
use std::io;
use std::path::Path;

macro_rules! ensure_config {
    ($cond:expr, $($arg:tt)+) => {
        if !($cond) {
            return Err(SimError::ConfigInvalid(format!($($arg)+)));
        }
    };
}

/// World-level simulation configuration.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(default)]
pub struct WorldConfig {
    pub width: f64,
    pub height: f64,
    pub seed: u64,
    pub initial_population: usize,
    /// Share of initial entities created Curious; the rest are Lesser.
    pub curious_fraction: f64,
    /// Conversion factor between ticks and simulated seconds.
    pub ticks_per_second: u32,
}

impl Default for WorldConfig {
    fn default() -> Self {
        Self {
            width: 1200.0,
            height: 800.0,
            seed: 0,
            initial_population: 200,
            curious_fraction: 0.25,
            ticks_per_second: 60,
        }
    }
}

/// Spawn and decay parameters of one hazard kind.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct HazardKindConfig {
    /// A zone spawns on every tick that is a multiple of this period.
    pub period_ticks: u64,
    pub spawn_radius_min: f64,
    pub spawn_radius_max: f64,
    /// Upper clamp for any radius, including user-placed zones.
    pub max_radius: f64,
    /// A zone whose radius falls to or below this value is removed.
    pub floor: f64,
    /// Radius lost per tick.
    pub decay: f64,
}

impl HazardKindConfig {
    #[must_use]
    pub fn clamp_radius(&self, radius: f64) -> f64 {
        if radius.is_nan() {
            self.floor
        } else {
            radius.clamp(self.floor, self.max_radius)
        }
    }

    /// Upper bound on the number of ticks a zone can survive.
    #[must_use]
    pub fn max_lifetime_ticks(&self) -> u64 {
        ((self.max_radius - self.floor) / self.decay).ceil() as u64
    }
}

/// Hazard field configuration.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(default)]
pub struct HazardConfig {
    /// Trust lost per tick inside a Rust zone.
    pub rust_trust_erosion: f64,
    /// Velocity multiplier per tick inside a Gray zone, in (0, 1).
    pub gray_velocity_damping: f64,
    pub rust: HazardKindConfig,
    pub gray: HazardKindConfig,
}

impl Default for HazardConfig {
    fn default() -> Self {
        Self {
            rust_trust_erosion: 0.01,
            gray_velocity_damping: 0.95,
            rust: HazardKindConfig {
                period_ticks: 300,
                spawn_radius_min: 15.0,
                spawn_radius_max: 30.0,
                max_radius: 40.0,
                floor: 2.0,
                decay: 0.1,
            },
            gray: HazardKindConfig {
                period_ticks: 480,
                spawn_radius_min: 40.0,
                spawn_radius_max: 70.0,
                max_radius: 80.0,
                floor: 10.0,
                decay: 0.05,
            },
        }
    }
}

impl HazardConfig {
    #[must_use]
    pub fn kind(&self, kind: HazardKind) -> &HazardKindConfig {
        match kind {
            HazardKind::Rust => &self.rust,
            HazardKind::Gray => &self.gray,
        }
    }
}

/// Entity behaviour configuration.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(default)]
pub struct EntityConfig {
    /// Initial velocity components are drawn from `[-initial_speed, initial_speed)`.
    pub initial_speed: f64,
    /// Initial trust is drawn from `[0, initial_trust_max)`.
    pub initial_trust_max: f64,
    /// Passive trust gained by a follower each tick.
    pub follower_trust_gain: f64,
    pub contribute_chance: f64,
    /// Aggregate trust added to a deity per contribution.
    pub contribution: f64,
    pub question_chance: f64,
    pub question_ttl: u32,
    pub question_cooldown: u32,
    pub adoption_radius: f64,
    pub adoption_chance: f64,
}

impl Default for EntityConfig {
    fn default() -> Self {
        Self {
            initial_speed: 0.5,
            initial_trust_max: 0.3,
            follower_trust_gain: 0.001,
            contribute_chance: 0.02,
            contribution: 0.05,
            question_chance: 0.01,
            question_ttl: 100,
            question_cooldown: 60,
            adoption_radius: 150.0,
            adoption_chance: 0.3,
        }
    }
}

/// One named deity of the roster.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct DeitySpec {
    pub name: String,
    pub domain: String,
    pub x: f64,
    pub y: f64,
    #[serde(default)]
    pub kind: ActivationKind,
    #[serde(default = "default_initial_trust")]
    pub initial_trust: f64,
}

fn default_initial_trust() -> f64 {
    1.0
}

/// Deity behaviour configuration and roster.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(default)]
pub struct DeityConfig {
    /// Followers within this distance count as nearby.
    pub domain_radius: f64,
    /// Multiplicative decay of aggregate trust per tick, in (0, 1].
    pub trust_decay: f64,
    pub shield_chance: f64,
    pub shield_ticks: u32,
    pub inquiry_ticks: u32,
    pub roster: Vec<DeitySpec>,
}

impl Default for DeityConfig {
    fn default() -> Self {
        Self {
            domain_radius: 200.0,
            trust_decay: 0.999,
            shield_chance: 0.02,
            shield_ticks: 30,
            inquiry_ticks: 25,
            roster: vec![
                DeitySpec {
                    name: "AEGIS".to_string(),
                    domain: "Firewall".to_string(),
                    x: 400.0,
                    y: 400.0,
                    kind: ActivationKind::Shield,
                    initial_trust: 1.0,
                },
                DeitySpec {
                    name: "SYNAPSE".to_string(),
                    domain: "Connection".to_string(),
                    x: 800.0,
                    y: 800.0 / 3.0,
                    kind: ActivationKind::Dormant,
                    initial_trust: 1.0,
                },
                DeitySpec {
                    name: "QUERENS".to_string(),
                    domain: "Inquiry".to_string(),
                    x: 600.0,
                    y: 1600.0 / 3.0,
                    kind: ActivationKind::Inquiry,
                    initial_trust: 1.0,
                },
            ],
        }
    }
}

/// Question and resonance configuration.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(default)]
pub struct EventConfig {
    pub resonance_chance: f64,
    /// Life of a resonance spawned from a question.
    pub resonance_life: u32,
    pub resonance_radius: f64,
    /// Radius gained by a resonance per tick.
    pub resonance_growth: f64,
    /// Life of the ring left behind by a cleanse.
    pub cleanse_life: u32,
}

impl Default for EventConfig {
    fn default() -> Self {
        Self {
            resonance_chance: 0.1,
            resonance_life: 100,
            resonance_radius: 10.0,
            resonance_growth: 0.3,
            cleanse_life: 60,
        }
    }
}

/// Save locations and autosave cadence.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(default)]
pub struct PersistenceConfig {
    /// Zero disables autosave.
    pub auto_save_interval_ticks: u64,
    pub autosave_path: Option<String>,
    pub save_path: String,
}

impl Default for PersistenceConfig {
    fn default() -> Self {
        Self {
            auto_save_interval_ticks: 3600,
            autosave_path: Some("expanse.autosave.json".to_string()),
            save_path: "expanse.save.json".to_string(),
        }
    }
}

/// Metric history sampling.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(default)]
pub struct HistoryConfig {
    /// Zero disables sampling.
    pub interval_ticks: u64,
    pub capacity: usize,
}

impl Default for HistoryConfig {
    fn default() -> Self {
        Self {
            interval_ticks: 60,
            capacity: 600,
        }
    }
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Default)]
#[serde(default)]
pub struct AppConfig {
    pub world: WorldConfig,
    pub hazards: HazardConfig,
    pub entities: EntityConfig,
    pub deities: DeityConfig,
    pub events: EventConfig,
    pub persistence: PersistenceConfig,
    pub history: HistoryConfig,
}

fn is_probability(p: f64) -> bool {
    (0.0..=1.0).contains(&p)
}

impl AppConfig {
    /// Validates all configuration parameters.
    ///
    /// Returns `Ok(())` if all parameters are valid, or
    /// [`SimError::ConfigInvalid`] describing the first failure.
    pub fn validate(&self) -> Result<()> {
        let w = &self.world;
        ensure_config!(
            w.width.is_finite() && w.width > 0.0,
            "World width must be positive and finite"
        );
        ensure_config!(
            w.height.is_finite() && w.height > 0.0,
            "World height must be positive and finite"
        );
        ensure_config!(
            is_probability(w.curious_fraction),
            "Curious fraction must be in [0.0, 1.0]"
        );
        ensure_config!(w.ticks_per_second > 0, "Ticks per second must be positive");

        for kind in HazardKind::ALL {
            let h = self.hazards.kind(kind);
            let label = kind.label();
            ensure_config!(h.period_ticks > 0, "{label} period must be positive");
            ensure_config!(
                h.decay.is_finite() && h.decay > 0.0,
                "{label} decay must be positive"
            );
            ensure_config!(
                h.floor.is_finite() && h.floor >= 0.0,
                "{label} floor must be non-negative"
            );
            ensure_config!(
                h.spawn_radius_min > h.floor,
                "{label} spawn radius must exceed the floor"
            );
            ensure_config!(
                h.spawn_radius_max >= h.spawn_radius_min,
                "{label} spawn radius range is inverted"
            );
            ensure_config!(
                h.max_radius.is_finite() && h.max_radius >= h.spawn_radius_max,
                "{label} max radius must cover the spawn range"
            );
        }
        ensure_config!(
            self.hazards.rust_trust_erosion >= 0.0,
            "Rust trust erosion must be non-negative"
        );
        ensure_config!(
            self.hazards.gray_velocity_damping > 0.0 && self.hazards.gray_velocity_damping < 1.0,
            "Gray velocity damping must be in (0.0, 1.0)"
        );

        let e = &self.entities;
        ensure_config!(
            e.initial_speed.is_finite() && e.initial_speed >= 0.0,
            "Initial speed must be non-negative"
        );
        ensure_config!(
            (0.0..=1.0).contains(&e.initial_trust_max),
            "Initial trust max must be in [0.0, 1.0]"
        );
        ensure_config!(
            e.follower_trust_gain >= 0.0,
            "Follower trust gain must be non-negative"
        );
        ensure_config!(
            is_probability(e.contribute_chance),
            "Contribute chance must be in [0.0, 1.0]"
        );
        ensure_config!(e.contribution >= 0.0, "Contribution must be non-negative");
        ensure_config!(
            is_probability(e.question_chance),
            "Question chance must be in [0.0, 1.0]"
        );
        ensure_config!(e.question_ttl > 0, "Question ttl must be positive");
        ensure_config!(
            e.adoption_radius >= 0.0,
            "Adoption radius must be non-negative"
        );
        ensure_config!(
            is_probability(e.adoption_chance),
            "Adoption chance must be in [0.0, 1.0]"
        );

        let d = &self.deities;
        ensure_config!(!d.roster.is_empty(), "Deity roster must not be empty");
        ensure_config!(d.domain_radius >= 0.0, "Domain radius must be non-negative");
        ensure_config!(
            d.trust_decay > 0.0 && d.trust_decay <= 1.0,
            "Trust decay must be in (0.0, 1.0]"
        );
        ensure_config!(
            is_probability(d.shield_chance),
            "Shield chance must be in [0.0, 1.0]"
        );
        for spec in &d.roster {
            ensure_config!(
                (0.0..w.width).contains(&spec.x) && (0.0..w.height).contains(&spec.y),
                "Deity {} lies outside the world",
                spec.name
            );
            ensure_config!(
                spec.initial_trust.is_finite() && spec.initial_trust >= 0.0,
                "Deity {} initial trust must be non-negative",
                spec.name
            );
        }

        let ev = &self.events;
        ensure_config!(
            is_probability(ev.resonance_chance),
            "Resonance chance must be in [0.0, 1.0]"
        );
        ensure_config!(ev.resonance_life > 0, "Resonance life must be positive");
        ensure_config!(
            ev.resonance_radius >= 0.0,
            "Resonance radius must be non-negative"
        );
        ensure_config!(
            ev.resonance_growth >= 0.0,
            "Resonance growth must be non-negative"
        );
        ensure_config!(
            ev.cleanse_life > 0 && ev.cleanse_life <= ev.resonance_life,
            "Cleanse life must be in [1, resonance_life]"
        );

        Ok(())
    }

    /// Parses and validates configuration from TOML text.
    pub fn from_toml(content: &str) -> Result<Self> {
        let config = toml::from_str::<Self>(content)?;
        config.validate()?;
        Ok(config)
    }

    /// Loads `path`, falling back to defaults.
    ///
    /// A missing file is created with the default configuration. A file that
    /// cannot be read or parsed is reported and left as it is.
    pub fn load_or_default(path: impl AsRef<Path>) -> Self {
        let path = path.as_ref();
        match fs::read_to_string(path) {
            Ok(content) => match Self::from_toml(&content) {
                Ok(config) => return config,
                Err(e) => {
                    tracing::warn!(path = %path.display(), error = %e, "Ignoring invalid config");
                }
            },
            Err(e) if e.kind() == io::ErrorKind::NotFound => {
                let default = Self::default();
                if let Ok(text) = toml::to_string(&default) {
                    if let Err(e) = fs::write(path, text) {
                        tracing::debug!(error = %e, "Could not write default config");
                    }
                }
                return default;
            }
            Err(e) => {
                tracing::warn!(path = %path.display(), error = %e, "Cannot read config, using defaults");
            }
        }
        Self::default()
    }

    /// SHA-256 over every section that changes simulation behaviour.
    ///
    /// Save locations, history sampling and the seed are excluded: two worlds
    /// with the same fingerprint follow the same rules.
    #[must_use]
    pub fn fingerprint(&self) -> String {
        use sha2::{Digest, Sha256};
        let mut hasher = Sha256::new();
        hasher.update(format!("{:?}", self.hazards).as_bytes());
        hasher.update(format!("{:?}", self.entities).as_bytes());
        hasher.update(format!("{:?}", self.deities).as_bytes());
        hasher.update(format!("{:?}", self.events).as_bytes());
        hex::encode(hasher.finalize())
    }
}
