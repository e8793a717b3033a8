//! Expanse: a headless host and library facade over the simulation crates.

pub mod app;
pub mod model;

pub use app::App;
