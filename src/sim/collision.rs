//! Proximity tests between entity sets
//!
//! Brute force over every active pair. Entity counts stay in the tens, so no
//! spatial partitioning.

use glam::Vec3;

use super::pool::{EntityId, EntityPool, Poolable};
use super::state::{Enemy, Projectile};
use crate::consts::{ENEMY_ATTACK_REACH, HIT_RADIUS_SCALE};
use crate::plane_distance;

/// Something with a position and a collision radius
pub trait Body {
    fn position(&self) -> Vec3;
    fn radius(&self) -> f32;
}

impl Body for Projectile {
    fn position(&self) -> Vec3 {
        self.position
    }
    fn radius(&self) -> f32 {
        self.size
    }
}

impl Body for Enemy {
    fn position(&self) -> Vec3 {
        self.position
    }
    fn radius(&self) -> f32 {
        self.size
    }
}

/// Strict overlap test with the target radius scaled by [`HIT_RADIUS_SCALE`]
#[inline]
pub fn overlaps(mover: &impl Body, target: &impl Body) -> bool {
    plane_distance(mover.position(), target.position())
        < mover.radius() + target.radius() * HIT_RADIUS_SCALE
}

/// `(mover, target)` pairs that overlap this frame
///
/// A mover reports only its first overlapping target, in slot order.
pub fn find_hits<M, T>(movers: &EntityPool<M>, targets: &EntityPool<T>) -> Vec<(EntityId, EntityId)>
where
    M: Poolable + Body,
    T: Poolable + Body,
{
    let mut hits = Vec::new();
    for mover in movers.iter_active() {
        if let Some(target) = targets.iter_active().find(|t| overlaps(mover, *t)) {
            hits.push((mover.id(), target.id()));
        }
    }
    hits
}

/// Enemies close enough to strike a player at `player_pos`
pub fn enemies_in_reach(enemies: &EntityPool<Enemy>, player_pos: Vec3) -> Vec<EntityId> {
    enemies
        .iter_active()
        .filter(|e| plane_distance(e.position, player_pos) < e.size + ENEMY_ATTACK_REACH)
        .map(|e| e.id)
        .collect()
}
