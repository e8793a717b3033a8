//! # Expanse Core
//!
//! The simulation engine of Expanse: a 2D world of lightweight entities that
//! drift, gather trust, suffer hazard zones and gather around a small roster
//! of deities.
//!
//! This crate contains the deterministic simulation logic, including:
//! - Strongly-typed configuration with validation
//! - The world clock and the single seeded PRNG stream
//! - The hazard field (Rust and Gray zones)
//! - Entity, deity and event-bus systems driven by a fixed step order
//! - Read-only snapshots and aggregate metrics
//! - Atomic persistence of the whole world to one document
//!
//! ## Example
//!
//! ```
//! use expanse_core::config::AppConfig;
//! use expanse_core::world::World;
//!
//! let mut config = AppConfig::default();
//! config.world.seed = 42;
//! config.persistence.autosave_path = None;
//!
//! let mut world = World::new(config).unwrap();
//! for _ in 0..10 {
//!     world.step();
//! }
//! assert_eq!(world.tick(), 10);
//! ```

/// Monotonic tick counter and tick/second conversion
pub mod clock;
/// Configuration management for simulation parameters
pub mod config;
/// Error types for configuration and persistence
pub mod error;
/// Circular Rust and Gray zones with metered decay
pub mod hazard;
/// Host-side tick metrics and structured logging setup
pub mod metrics;
/// Save document format and the load/save contract
pub mod persistence;
/// Read-only world views for rendering and comparison
pub mod snapshot;
/// Per-tick systems (entities, deities, event bus, stats)
pub mod systems;
/// The world value and its step scheduler
pub mod world;

pub use clock::WorldClock;
pub use config::AppConfig;
pub use error::SimError;
pub use hazard::HazardField;
pub use metrics::{init_logging, Metrics};
pub use persistence::LoadOutcome;
pub use snapshot::{WorldMetrics, WorldSnapshot};
pub use world::World;
