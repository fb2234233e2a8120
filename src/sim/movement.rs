//! Kinematic movement on the horizontal plane
//!
//! Player, enemies and projectiles all move at constant velocity:
//! `position += direction * speed * dt` on x/z. Only the source of the
//! direction differs.

use glam::{Vec2, Vec3};

use super::state::GameState;
use crate::plane;

/// Per-frame movement intent from the input provider
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct MoveIntent {
    pub forward: bool,
    pub back: bool,
    pub left: bool,
    pub right: bool,
}

/// Advance `position` along `direction` on the x/z plane; y is untouched
#[inline]
pub fn integrate(position: &mut Vec3, direction: Vec3, speed: f32, dt: f32) {
    position.x += direction.x * speed * dt;
    position.z += direction.z * speed * dt;
}

/// Unit vector from `from` toward `to` on the horizontal plane
///
/// Zero when the two positions coincide.
pub fn chase_direction(from: Vec3, to: Vec3) -> Vec3 {
    let d = plane(to) - plane(from);
    let dist = d.length();
    if dist == 0.0 {
        return Vec3::ZERO;
    }
    Vec3::new(d.x / dist, 0.0, d.y / dist)
}

/// Normalised direction for a movement intent (forward = -z, right = +x)
pub fn intent_direction(intent: MoveIntent) -> Vec3 {
    let mut d = Vec2::ZERO;
    if intent.forward {
        d.y -= 1.0;
    }
    if intent.back {
        d.y += 1.0;
    }
    if intent.left {
        d.x -= 1.0;
    }
    if intent.right {
        d.x += 1.0;
    }
    let d = d.normalize_or_zero();
    Vec3::new(d.x, 0.0, d.y)
}

pub fn move_player(state: &mut GameState, intent: MoveIntent, dt: f32) {
    let dir = intent_direction(intent);
    let speed = state.settings.player_speed;
    integrate(&mut state.player.position, dir, speed, dt);
}

/// Every active enemy steps straight at the player
pub fn move_enemies(state: &mut GameState, dt: f32) {
    let target = state.player.position;
    for enemy in state.enemies.iter_active_mut() {
        let dir = chase_direction(enemy.position, target);
        integrate(&mut enemy.position, dir, enemy.speed, dt);
    }
}

pub fn move_projectiles(state: &mut GameState, dt: f32) {
    for p in state.projectiles.iter_active_mut() {
        integrate(&mut p.position, p.direction, p.speed, dt);
    }
}
