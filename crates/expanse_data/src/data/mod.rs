//! Core data structures for the Expanse simulation.

pub mod deity;
pub mod entity;
pub mod environment;
