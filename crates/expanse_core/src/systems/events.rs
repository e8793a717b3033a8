//! The event bus: questions spawn resonances, resonances grow and fade,
//! questions age out.

use crate::config::EventConfig;
use expanse_data::{Question, Resonance};
use rand::Rng;
use rand_chacha::ChaCha8Rng;

/// Runs one tick of the event bus.
///
/// Resonances spawned this tick are aged along with the rest. Questions
/// emitted during `tick` are not aged until the next one.
pub fn update_events(
    questions: &mut Vec<Question>,
    resonances: &mut Vec<Resonance>,
    config: &EventConfig,
    tick: u64,
    rng: &mut ChaCha8Rng,
) {
    for q in questions.iter() {
        if rng.gen_bool(config.resonance_chance) {
            resonances.push(Resonance {
                position: q.position,
                radius: config.resonance_radius,
                life: config.resonance_life,
            });
        }
    }

    resonances.retain_mut(|r| {
        r.radius += config.resonance_growth;
        r.life = r.life.saturating_sub(1);
        r.life > 0
    });

    questions.retain_mut(|q| {
        if q.spawn_tick != tick {
            q.ttl = q.ttl.saturating_sub(1);
        }
        q.ttl > 0
    });
}
