//! Host-side performance metrics and logging setup.
//!
//! [`Metrics`] tracks wall-clock cost of steps with atomics so a host can
//! share it with a monitoring thread. Simulation aggregates live in
//! [`crate::snapshot::WorldMetrics`] instead.

use crate::snapshot::WorldMetrics;
use std::collections::HashMap;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Mutex;
use std::time::{Duration, Instant};
use tracing_subscriber::EnvFilter;

/// How often a progress line is logged at `info`.
pub const LOG_EVERY_TICKS: u64 = 1000;

/// Collector for host-observed step statistics.
pub struct Metrics {
    tick_count: AtomicU64,
    entity_count: AtomicU64,
    hazard_count: AtomicU64,
    total_step_nanos: AtomicU64,
    pub counters: Mutex<HashMap<String, AtomicU64>>,
    start_time: Instant,
}

impl Default for Metrics {
    fn default() -> Self {
        Self::new()
    }
}

impl Metrics {
    #[must_use]
    pub fn new() -> Self {
        Self {
            tick_count: AtomicU64::new(0),
            entity_count: AtomicU64::new(0),
            hazard_count: AtomicU64::new(0),
            total_step_nanos: AtomicU64::new(0),
            counters: Mutex::new(HashMap::new()),
            start_time: Instant::now(),
        }
    }

    /// Records a completed step with its duration.
    pub fn record_tick(&self, tick: u64, duration: Duration, world: &WorldMetrics) {
        self.tick_count.fetch_add(1, Ordering::Relaxed);
        self.entity_count
            .store(world.population() as u64, Ordering::Relaxed);
        self.hazard_count.store(
            (world.rust_hazards + world.gray_hazards) as u64,
            Ordering::Relaxed,
        );
        self.total_step_nanos
            .fetch_add(duration.as_nanos() as u64, Ordering::Relaxed);

        if tick.is_multiple_of(LOG_EVERY_TICKS) {
            tracing::info!(
                tick,
                entities = world.population(),
                followers = world.followers,
                rust = world.rust_hazards,
                gray = world.gray_hazards,
                mean_trust = world.mean_trust,
                duration_us = duration.as_micros() as u64,
                "Simulation tick"
            );
        }
    }

    /// Increments a named counter.
    pub fn increment_counter(&self, name: &str) {
        let mut counters = self.counters.lock().unwrap_or_else(|e| e.into_inner());
        counters
            .entry(name.to_string())
            .or_insert_with(|| AtomicU64::new(0))
            .fetch_add(1, Ordering::Relaxed);
    }

    #[must_use]
    pub fn counter(&self, name: &str) -> u64 {
        let counters = self.counters.lock().unwrap_or_else(|e| e.into_inner());
        counters
            .get(name)
            .map_or(0, |c| c.load(Ordering::Relaxed))
    }

    #[must_use]
    pub fn tick_count(&self) -> u64 {
        self.tick_count.load(Ordering::Relaxed)
    }

    #[must_use]
    pub fn entity_count(&self) -> u64 {
        self.entity_count.load(Ordering::Relaxed)
    }

    #[must_use]
    pub fn hazard_count(&self) -> u64 {
        self.hazard_count.load(Ordering::Relaxed)
    }

    /// Mean wall-clock duration of the recorded steps.
    #[must_use]
    pub fn mean_step(&self) -> Duration {
        let ticks = self.tick_count();
        if ticks == 0 {
            return Duration::ZERO;
        }
        Duration::from_nanos(self.total_step_nanos.load(Ordering::Relaxed) / ticks)
    }

    #[must_use]
    pub fn elapsed(&self) -> Duration {
        self.start_time.elapsed()
    }
}

/// Installs the global fmt subscriber. `RUST_LOG` overrides the `info`
/// default. Calling it twice is harmless.
pub fn init_logging() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing::subscriber::set_global_default(
        tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_target(false)
            .finish(),
    )
    .ok();
}
