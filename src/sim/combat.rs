//! Damage, deaths and scoring
//!
//! Stale ids are expected here: an enemy killed by one projectile may still be
//! listed in a later hit pair of the same frame. Such pairs are ignored.

use super::collision::enemies_in_reach;
use super::pool::EntityId;
use super::state::{GameEvent, GameOverReason, GameState};
use crate::consts::*;

/// Outcome of applying damage to one enemy
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum DamageOutcome {
    /// Enemy survives with this much health
    Wounded(f32),
    /// Enemy died and awarded these points
    Killed(u64),
    /// Id no longer refers to an active enemy
    Missed,
}

/// Subtract `damage` from an enemy, killing and scoring it at zero health
pub fn damage_enemy(state: &mut GameState, id: EntityId, damage: f32) -> DamageOutcome {
    let Some(enemy) = state.enemies.get_mut(id) else {
        return DamageOutcome::Missed;
    };

    enemy.health -= damage;
    if enemy.health > 0.0 {
        let health = enemy.health;
        state.events.push(GameEvent::EnemyHit { id, health });
        return DamageOutcome::Wounded(health);
    }

    let kind = enemy.kind;
    state.enemies.deactivate(id);
    let points =
        (state.tuning.points(kind) as f32 * state.tuning.score_multiplier).round() as u64;
    state.player.score += points;
    state.player.kill_count += 1;
    state.events.push(GameEvent::EnemyKilled { id, kind, points });
    DamageOutcome::Killed(points)
}

/// Apply projectile/enemy hit pairs from the collision pass
///
/// Each projectile is consumed by its first pair, hit or not.
pub fn resolve_projectile_hits(state: &mut GameState, hits: &[(EntityId, EntityId)]) {
    for &(projectile_id, enemy_id) in hits {
        let Some(damage) = state.projectiles.get(projectile_id).map(|p| p.damage) else {
            continue;
        };
        state.projectiles.deactivate(projectile_id);
        damage_enemy(state, enemy_id, damage);
    }
}

/// Deactivate projectiles older than the fixed time-to-live
pub fn expire_projectiles(state: &mut GameState) {
    let now = state.clock_ms;
    for p in state.projectiles.iter_active_mut() {
        if now - p.created_at_ms >= PROJECTILE_TTL_MS {
            p.active = false;
            state.events.push(GameEvent::ProjectileExpired { id: p.id });
        }
    }
}

/// Enemies in reach strike the player, each on its own cooldown
///
/// Ends the run when the player's health is used up.
pub fn resolve_enemy_attacks(state: &mut GameState) {
    let now = state.clock_ms;
    for id in enemies_in_reach(&state.enemies, state.player.position) {
        let Some(enemy) = state.enemies.get_mut(id) else {
            continue;
        };
        let ready = enemy
            .last_attack_ms
            .is_none_or(|t| now - t >= ENEMY_ATTACK_COOLDOWN_MS);
        if !ready {
            continue;
        }
        enemy.last_attack_ms = Some(now);

        let damage = enemy.damage;
        state.player.health -= damage;
        state.events.push(GameEvent::PlayerHit {
            by: id,
            damage,
            health: state.player.health,
        });

        if state.player.is_dead() {
            state.end_run(GameOverReason::Killed);
            return;
        }
    }
}

/// Drop enemies that wandered implausibly far outside the arena
pub fn cull_stray_enemies(state: &mut GameState) {
    let bounds = state.tuning.bounds;
    for enemy in state.enemies.iter_active_mut() {
        if bounds.far_outside(enemy.position, ENEMY_CLEANUP_MARGIN) {
            log::warn!("Culling stray enemy {}", enemy.id);
            enemy.active = false;
            state.events.push(GameEvent::EnemyCulled { id: enemy.id });
        }
    }
}
