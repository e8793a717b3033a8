//! Per-tick systems. Each runs once per step, in the order the world
//! scheduler calls them, over collections the world owns.

pub mod deity;
pub mod entity;
pub mod events;
pub mod stats;
