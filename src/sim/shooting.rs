//! Player aim and trigger

use glam::Vec2;

use super::pool::EntityId;
use super::state::{GameEvent, GameState, ProjectileSpawn};
use crate::{facing, rotation_toward};

/// Turn the player toward an (x, z) aim direction; zero vectors are ignored
pub fn aim(state: &mut GameState, dir: Vec2) {
    if dir.length_squared() > 0.0 {
        state.player.rotation = rotation_toward(dir);
    }
}

/// Fire one projectile along the player's facing, ignoring the cooldown
///
/// A saturated pool drops the shot and returns `None`.
pub fn fire_projectile(state: &mut GameState) -> Option<EntityId> {
    let weapon = state.tuning.weapon_stats();
    let spawn = ProjectileSpawn {
        kind: state.tuning.weapon,
        position: state.player.position,
        direction: facing(state.player.rotation),
        speed: weapon.speed,
        size: weapon.size,
        damage: weapon.damage,
        created_at_ms: state.clock_ms,
    };

    match state.projectiles.activate(spawn) {
        Some(id) => {
            state.events.push(GameEvent::ShotFired { id });
            Some(id)
        }
        None => {
            state.events.push(GameEvent::ShotDropped);
            None
        }
    }
}

/// Count down the fire cooldown and shoot while the trigger is held
pub fn update_trigger(state: &mut GameState, trigger: bool, dt: f32) {
    state.player.fire_cooldown = (state.player.fire_cooldown - dt).max(0.0);
    if trigger && state.player.fire_cooldown <= 0.0 {
        // A dropped shot still spends the cooldown
        fire_projectile(state);
        state.player.fire_cooldown = state.settings.fire_interval();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::consts::PROJECTILE_POOL_SIZE;
    use crate::settings::Settings;
    use crate::tuning::Tuning;
    use std::collections::HashSet;

    fn playing() -> GameState {
        let mut state = GameState::with_seed(21);
        state.start_game();
        state
    }

    #[test]
    fn test_fire_while_saturated() {
        let mut state = playing();
        let mut ids = HashSet::new();
        for _ in 0..PROJECTILE_POOL_SIZE {
            ids.insert(fire_projectile(&mut state).unwrap());
        }
        assert_eq!(state.projectiles.active_count(), PROJECTILE_POOL_SIZE);

        assert_eq!(fire_projectile(&mut state), None);
        assert_eq!(state.projectiles.active_count(), PROJECTILE_POOL_SIZE);
        let now: HashSet<_> = state.projectiles.iter_active().map(|p| p.id).collect();
        assert_eq!(now, ids);
        assert_eq!(state.events.last(), Some(&GameEvent::ShotDropped));
    }

    #[test]
    fn test_projectile_follows_aim() {
        let mut state = playing();
        aim(&mut state, Vec2::new(1.0, 0.0));
        let id = fire_projectile(&mut state).unwrap();
        let p = state.projectiles.get(id).unwrap();
        assert!((p.direction.x - 1.0).abs() < 1e-6);
        assert!(p.direction.z.abs() < 1e-6);
        assert_eq!(p.position, state.player.position);
        assert_eq!(p.damage, state.tuning.weapon_stats().damage);
    }

    #[test]
    fn test_zero_aim_keeps_rotation() {
        let mut state = playing();
        aim(&mut state, Vec2::new(0.0, -1.0));
        let r = state.player.rotation;
        aim(&mut state, Vec2::ZERO);
        assert_eq!(state.player.rotation, r);
    }

    #[test]
    fn test_trigger_respects_fire_rate() {
        let mut state = GameState::new(
            3,
            Tuning::default(),
            Settings {
                player_fire_rate: 4.0,
                ..Default::default()
            },
        );
        state.start_game();
        // Held for one second at 0.05s frames: shots at 0, 0.25, 0.5, 0.75
        for _ in 0..20 {
            update_trigger(&mut state, true, 0.05);
        }
        assert_eq!(state.projectiles.active_count(), 4);
    }

    #[test]
    fn test_released_trigger_does_not_fire() {
        let mut state = playing();
        for _ in 0..10 {
            update_trigger(&mut state, false, 0.1);
        }
        assert_eq!(state.projectiles.active_count(), 0);
    }
}
