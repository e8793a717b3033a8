//! Core data records for the Expanse simulation.
//!
//! Every type in this crate is a plain serializable record. Behaviour lives in
//! `expanse_core`; these records only carry state, so that a world can be
//! saved, loaded and rendered without pulling in the simulation systems.

pub mod data;

pub use data::deity::{ActivationKind, Deity};
pub use data::entity::{Entity, Position, Role, Velocity};
pub use data::environment::{Hazard, HazardKind, MetricsSample, Question, Resonance};
