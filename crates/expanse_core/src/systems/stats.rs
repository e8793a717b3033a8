//! Aggregate metrics derived from world collections. No random draws.

use crate::hazard::HazardField;
use crate::snapshot::WorldMetrics;
use expanse_data::{Deity, Entity, HazardKind, MetricsSample, Question, Resonance, Role};
use std::collections::VecDeque;

pub struct StatsContext<'a> {
    pub entities: &'a [Entity],
    pub deities: &'a [Deity],
    pub hazards: &'a HazardField,
    pub questions: &'a [Question],
    pub resonances: &'a [Resonance],
}

#[must_use]
pub fn compute_metrics(ctx: &StatsContext<'_>) -> WorldMetrics {
    let mut metrics = WorldMetrics::default();
    let mut trust_sum = 0.0;
    for e in ctx.entities {
        match e.role {
            Role::Lesser => metrics.lesser += 1,
            Role::Curious => metrics.curious += 1,
            Role::Follower => metrics.followers += 1,
        }
        trust_sum += e.trust;
    }
    metrics.mean_trust = if ctx.entities.is_empty() {
        0.0
    } else {
        trust_sum / ctx.entities.len() as f64
    };
    metrics.rust_hazards = ctx.hazards.count(HazardKind::Rust);
    metrics.gray_hazards = ctx.hazards.count(HazardKind::Gray);
    metrics.questions = ctx.questions.len();
    metrics.resonances = ctx.resonances.len();
    metrics.total_aggregate_trust = ctx.deities.iter().map(|d| d.aggregate_trust).sum();
    metrics.nearby_follower_total = ctx.deities.iter().map(|d| d.nearby_followers).sum();
    metrics
}

/// Pushes a sample, evicting the oldest once `capacity` is reached.
pub fn record_sample(
    history: &mut VecDeque<MetricsSample>,
    metrics: &WorldMetrics,
    tick: u64,
    capacity: usize,
) {
    if capacity == 0 {
        return;
    }
    while history.len() >= capacity {
        history.pop_front();
    }
    history.push_back(MetricsSample {
        tick,
        followers: metrics.followers,
        mean_trust: metrics.mean_trust,
        total_aggregate_trust: metrics.total_aggregate_trust,
    });
}
