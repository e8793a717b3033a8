//! Deity update: follower census, trust decay and activation.

use crate::config::DeityConfig;
use expanse_data::{ActivationKind, Deity, Entity};
use rand::Rng;
use rand_chacha::ChaCha8Rng;

/// Runs one tick for every deity, in roster order.
///
/// `questions_present` is whether any question is live this tick; questions
/// are observed here, never consumed.
pub fn update_deities(
    deities: &mut [Deity],
    entities: &[Entity],
    questions_present: bool,
    config: &DeityConfig,
    rng: &mut ChaCha8Rng,
) {
    for deity in deities.iter_mut() {
        deity.nearby_followers = count_nearby_followers(deity, entities, config.domain_radius);
        deity.aggregate_trust = (deity.aggregate_trust * config.trust_decay).max(0.0);

        match deity.activation_kind {
            ActivationKind::Shield => {
                if !deity.is_active() && rng.gen_bool(config.shield_chance) {
                    deity.activation_ticks = config.shield_ticks;
                    tracing::trace!(deity = %deity.name, "Shield raised");
                }
            }
            ActivationKind::Inquiry => {
                if questions_present {
                    deity.activation_ticks = config.inquiry_ticks;
                }
            }
            ActivationKind::Dormant => {}
        }

        deity.activation_ticks = deity.activation_ticks.saturating_sub(1);
    }
}

fn count_nearby_followers(deity: &Deity, entities: &[Entity], radius: f64) -> u32 {
    entities
        .iter()
        .filter(|e| e.role.is_follower() && e.position.distance(&deity.position) < radius)
        .count() as u32
}
