//! Re-exports of the simulation model, so hosts depend on one crate.

pub mod config {
    pub use expanse_core::config::*;
}
pub mod clock {
    pub use expanse_core::clock::*;
}
pub mod hazard {
    pub use expanse_core::hazard::*;
}
pub mod metrics {
    pub use expanse_core::metrics::*;
}
pub mod persistence {
    pub use expanse_core::persistence::*;
}
pub mod snapshot {
    pub use expanse_core::snapshot::*;
}
pub mod systems {
    pub use expanse_core::systems::*;
}
pub mod world {
    pub use expanse_core::world::*;
}
pub mod data {
    pub use expanse_data::*;
}

pub use expanse_core::{SimError, World};
