//! Entity update: movement, hazard effects, passive trust, questions and
//! role transitions.

use crate::config::AppConfig;
use crate::hazard::HazardField;
use expanse_data::{Deity, Entity, HazardKind, Question, Role};
use rand::Rng;
use rand_chacha::ChaCha8Rng;

/// Shared state the entity pass reads from or appends to.
pub struct EntityContext<'a> {
    pub config: &'a AppConfig,
    pub hazards: &'a HazardField,
    pub deities: &'a mut [Deity],
    pub questions: &'a mut Vec<Question>,
    pub width: f64,
    pub height: f64,
    pub tick: u64,
}

/// What happened during one entity pass. Used for debug logging.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct EntityTickReport {
    pub contributions: usize,
    pub questions: usize,
    pub conversions: usize,
}

/// Runs one tick for every entity, in insertion order.
pub fn update_entities(
    entities: &mut [Entity],
    ctx: &mut EntityContext<'_>,
    rng: &mut ChaCha8Rng,
) -> EntityTickReport {
    let mut report = EntityTickReport::default();
    for entity in entities.iter_mut() {
        update_entity(entity, ctx, rng, &mut report);
    }
    report
}

fn update_entity(
    entity: &mut Entity,
    ctx: &mut EntityContext<'_>,
    rng: &mut ChaCha8Rng,
    report: &mut EntityTickReport,
) {
    let cfg = ctx.config;

    handle_movement(entity, ctx.width, ctx.height);
    apply_hazards(entity, ctx.hazards, cfg);

    if entity.role.is_follower() {
        entity.adjust_trust(cfg.entities.follower_trust_gain);
        if rng.gen_bool(cfg.entities.contribute_chance) && !ctx.deities.is_empty() {
            let idx = rng.gen_range(0..ctx.deities.len());
            let deity = &mut ctx.deities[idx];
            deity.contribute(cfg.entities.contribution);
            entity.patron = Some(deity.id);
            report.contributions += 1;
        }
    }

    entity.question_cooldown = entity.question_cooldown.saturating_sub(1);
    if entity.role == Role::Curious
        && entity.question_cooldown == 0
        && rng.gen_bool(cfg.entities.question_chance)
    {
        ctx.questions.push(Question {
            position: entity.position,
            ttl: cfg.entities.question_ttl,
            spawn_tick: ctx.tick,
        });
        entity.question_cooldown = cfg.entities.question_cooldown;
        report.questions += 1;
    }

    if !entity.role.is_follower() {
        let radius = cfg.entities.adoption_radius;
        let near_deity = ctx
            .deities
            .iter()
            .any(|d| d.position.distance(&entity.position) < radius);
        if near_deity && rng.gen_bool(cfg.entities.adoption_chance) {
            entity.role = Role::Follower;
            report.conversions += 1;
        }
    }
}

/// Moves by one velocity step and wraps into the world.
pub fn handle_movement(entity: &mut Entity, width: f64, height: f64) {
    entity.position.x += entity.velocity.vx;
    entity.position.y += entity.velocity.vy;
    entity.position = entity.position.wrapped(width, height);
}

/// Applies the effect of every zone containing the entity.
pub fn apply_hazards(entity: &mut Entity, hazards: &HazardField, config: &AppConfig) {
    let position = entity.position;
    for hazard in hazards.containing(&position) {
        match hazard.kind {
            HazardKind::Rust => entity.adjust_trust(-config.hazards.rust_trust_erosion),
            HazardKind::Gray => {
                entity.velocity = entity.velocity.scaled(config.hazards.gray_velocity_damping);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use expanse_data::{ActivationKind, Position, Velocity};
    use rand::SeedableRng;
    use uuid::Uuid;

    fn entity(role: Role, trust: f64) -> Entity {
        Entity::new(
            Uuid::nil(),
            Position::new(10.0, 10.0),
            Velocity::default(),
            role,
            trust,
        )
    }

    fn deity_at(x: f64, y: f64) -> Deity {
        Deity {
            id: Uuid::from_u128(7),
            name: "AEGIS".to_string(),
            domain: "Firewall".to_string(),
            position: Position::new(x, y),
            aggregate_trust: 1.0,
            nearby_followers: 0,
            activation_ticks: 0,
            activation_kind: ActivationKind::Shield,
        }
    }

    #[test]
    fn test_movement_wraps_at_edge() {
        let mut e = entity(Role::Lesser, 0.0);
        e.position = Position::new(1199.8, 0.1);
        e.velocity = Velocity { vx: 0.4, vy: -0.3 };
        handle_movement(&mut e, 1200.0, 800.0);
        assert!((e.position.x - 0.2).abs() < 1e-9);
        assert!((e.position.y - 799.8).abs() < 1e-9);
    }

    #[test]
    fn test_overlapping_rust_zones_stack() {
        let config = AppConfig::default();
        let mut hazards = HazardField::new(1200.0, 800.0);
        hazards.spawn(&config.hazards, HazardKind::Rust, Position::new(10.0, 10.0), 20.0, 0);
        hazards.spawn(&config.hazards, HazardKind::Rust, Position::new(12.0, 10.0), 20.0, 0);
        let mut e = entity(Role::Lesser, 0.5);
        apply_hazards(&mut e, &hazards, &config);
        assert!((e.trust - 0.48).abs() < 1e-12);
    }

    #[test]
    fn test_gray_zone_damps_velocity() {
        let config = AppConfig::default();
        let mut hazards = HazardField::new(1200.0, 800.0);
        hazards.spawn(&config.hazards, HazardKind::Gray, Position::new(10.0, 10.0), 50.0, 0);
        let mut e = entity(Role::Lesser, 0.5);
        e.velocity = Velocity { vx: 1.0, vy: -0.5 };
        apply_hazards(&mut e, &hazards, &config);
        assert!((e.velocity.vx - 0.95).abs() < 1e-12);
        assert!((e.velocity.vy + 0.475).abs() < 1e-12);
        assert_eq!(e.trust, 0.5);
    }

    #[test]
    fn test_certain_contribution_sets_patron() {
        let mut config = AppConfig::default();
        config.entities.contribute_chance = 1.0;
        config.entities.adoption_chance = 0.0;
        let hazards = HazardField::new(1200.0, 800.0);
        let mut deities = vec![deity_at(600.0, 400.0)];
        let mut questions = Vec::new();
        let mut entities = vec![entity(Role::Follower, 0.2)];
        let mut rng = ChaCha8Rng::seed_from_u64(1);
        let mut ctx = EntityContext {
            config: &config,
            hazards: &hazards,
            deities: &mut deities,
            questions: &mut questions,
            width: 1200.0,
            height: 800.0,
            tick: 1,
        };
        let report = update_entities(&mut entities, &mut ctx, &mut rng);
        assert_eq!(report.contributions, 1);
        assert_eq!(entities[0].patron, Some(Uuid::from_u128(7)));
        assert!((deities[0].aggregate_trust - 1.05).abs() < 1e-12);
        assert!((entities[0].trust - 0.201).abs() < 1e-12);
    }

    #[test]
    fn test_curious_near_deity_converts_with_certainty() {
        let mut config = AppConfig::default();
        config.entities.adoption_chance = 1.0;
        config.entities.question_chance = 0.0;
        let hazards = HazardField::new(1200.0, 800.0);
        let mut deities = vec![deity_at(20.0, 10.0)];
        let mut questions = Vec::new();
        let mut entities = vec![entity(Role::Curious, 0.2)];
        let mut rng = ChaCha8Rng::seed_from_u64(1);
        let mut ctx = EntityContext {
            config: &config,
            hazards: &hazards,
            deities: &mut deities,
            questions: &mut questions,
            width: 1200.0,
            height: 800.0,
            tick: 1,
        };
        let report = update_entities(&mut entities, &mut ctx, &mut rng);
        assert_eq!(report.conversions, 1);
        assert_eq!(entities[0].role, Role::Follower);
    }

    #[test]
    fn test_question_resets_cooldown() {
        let mut config = AppConfig::default();
        config.entities.question_chance = 1.0;
        config.entities.question_cooldown = 10;
        config.entities.adoption_chance = 0.0;
        let hazards = HazardField::new(1200.0, 800.0);
        let mut deities = vec![deity_at(600.0, 400.0)];
        let mut questions = Vec::new();
        let mut entities = vec![entity(Role::Curious, 0.2)];
        let mut rng = ChaCha8Rng::seed_from_u64(1);
        let mut ctx = EntityContext {
            config: &config,
            hazards: &hazards,
            deities: &mut deities,
            questions: &mut questions,
            width: 1200.0,
            height: 800.0,
            tick: 4,
        };
        update_entities(&mut entities, &mut ctx, &mut rng);
        assert_eq!(questions.len(), 1);
        assert_eq!(questions[0].spawn_tick, 4);
        assert_eq!(entities[0].question_cooldown, 10);
    }
}
