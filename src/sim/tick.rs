//! Per-frame simulation step
//!
//! Core game loop that advances the simulation by one rendered frame.

use glam::Vec2;

use super::collision::find_hits;
use super::combat::{
    cull_stray_enemies, expire_projectiles, resolve_enemy_attacks, resolve_projectile_hits,
};
use super::movement::{MoveIntent, move_enemies, move_player, move_projectiles};
use super::shooting::{aim, update_trigger};
use super::spawner::tick_spawner;
use super::state::{GameOverReason, GameState};

/// Input for a single frame
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct TickInput {
    pub movement: MoveIntent,
    /// Aim direction on the (x, z) plane
    pub aim: Option<Vec2>,
    /// Trigger held
    pub fire: bool,
}

/// Advance the game by `dt` seconds
///
/// Does nothing unless a run is in progress, so pausing via the settings
/// screen is lossless.
pub fn tick(state: &mut GameState, input: &TickInput, dt: f32) {
    if !state.phase.is_playing() {
        return;
    }
    let dt = dt.max(0.0);
    state.clock_ms += dt as f64 * 1000.0;

    tick_spawner(state, dt);

    move_player(state, input.movement, dt);
    if let Some(dir) = input.aim {
        aim(state, dir);
    }
    move_enemies(state, dt);
    move_projectiles(state, dt);
    update_trigger(state, input.fire, dt);
    cull_stray_enemies(state);

    if !state.tuning.bounds.contains(state.player.position) {
        state.end_run(GameOverReason::OutOfBounds);
        return;
    }

    expire_projectiles(state);
    let hits = find_hits(&state.projectiles, &state.enemies);
    resolve_projectile_hits(state, &hits);
    resolve_enemy_attacks(state);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::settings::Settings;
    use crate::sim::{GameEvent, GamePhase};
    use crate::tuning::Tuning;
    use glam::Vec3;
    use proptest::prelude::*;

    /// Spawner effectively idle for the first ~100s
    fn quiet_settings() -> Settings {
        Settings {
            enemy_spawn_rate: 0.1,
            difficulty_multiplier: 0.1,
            ..Default::default()
        }
    }

    fn count(events: &[GameEvent], f: impl Fn(&GameEvent) -> bool) -> usize {
        events.iter().filter(|e| f(e)).count()
    }

    #[test]
    fn test_menu_does_not_tick() {
        let mut state = GameState::with_seed(1);
        let input = TickInput {
            fire: true,
            ..Default::default()
        };
        tick(&mut state, &input, 5.0);
        assert_eq!(state.clock_ms, 0.0);
        assert_eq!(state.projectiles.active_count(), 0);
        assert!(state.enemies.is_empty());
    }

    #[test]
    fn test_settings_pause_is_lossless() {
        let mut state = GameState::with_seed(2);
        state.start_game();
        tick(&mut state, &TickInput::default(), 0.5);
        let before_clock = state.clock_ms;
        let before_spawner = state.spawner.clone();

        state.open_settings();
        for _ in 0..100 {
            tick(&mut state, &TickInput::default(), 0.1);
        }
        assert_eq!(state.clock_ms, before_clock);
        assert_eq!(state.spawner, before_spawner);

        state.close_settings();
        assert_eq!(state.phase(), GamePhase::Playing);
    }

    #[test]
    fn test_player_moves_with_input() {
        let mut state = GameState::new(3, Tuning::default(), quiet_settings());
        state.start_game();
        let input = TickInput {
            movement: MoveIntent {
                right: true,
                ..Default::default()
            },
            ..Default::default()
        };
        tick(&mut state, &input, 0.5);
        let expected = state.settings.player_speed * 0.5;
        assert!((state.player.position.x - expected).abs() < 1e-5);
    }

    #[test]
    fn test_boundary_game_over_once() {
        let mut state = GameState::new(4, Tuning::default(), quiet_settings());
        state.start_game();
        let max_x = state.tuning.bounds.max_x;
        state.player.position = Vec3::new(max_x + 0.5, 0.5, 0.0);

        for _ in 0..10 {
            tick(&mut state, &TickInput::default(), 0.1);
        }

        assert_eq!(state.phase(), GamePhase::GameOver);
        let events = state.drain_events();
        let overs = count(&events, |e| {
            matches!(e, GameEvent::GameOver { reason: GameOverReason::OutOfBounds })
        });
        assert_eq!(overs, 1);
    }

    #[test]
    fn test_walking_out_of_arena() {
        let mut state = GameState::new(5, Tuning::default(), quiet_settings());
        state.start_game();
        let input = TickInput {
            movement: MoveIntent {
                forward: true,
                ..Default::default()
            },
            ..Default::default()
        };
        // 50 units at 10 u/s is 5 seconds; give it 6
        for _ in 0..60 {
            tick(&mut state, &input, 0.1);
        }
        assert_eq!(state.phase(), GamePhase::GameOver);
    }

    #[test]
    fn test_fired_shot_kills_enemy() {
        use crate::sim::state::EnemySpawn;
        use crate::tuning::{EnemyKind, EnemyStats};

        let mut state = GameState::new(6, Tuning::default(), quiet_settings());
        state.start_game();
        let stats = EnemyStats {
            health: 5.0,
            speed: 0.0,
            ..EnemyKind::Grunt.base_stats()
        };
        let target = state
            .enemies
            .activate(EnemySpawn {
                kind: EnemyKind::Grunt,
                position: Vec3::new(0.0, 0.5, 10.0),
                stats,
            })
            .unwrap();

        let fire = TickInput {
            aim: Some(Vec2::new(0.0, 1.0)),
            fire: true,
            ..Default::default()
        };
        tick(&mut state, &fire, 1.0 / 60.0);
        for _ in 0..60 {
            tick(&mut state, &TickInput::default(), 1.0 / 60.0);
        }

        assert!(state.enemies.get(target).is_none());
        assert_eq!(state.player.kill_count, 1);
        assert_eq!(state.player.score, 10);
        assert_eq!(state.projectiles.active_count(), 0);
    }

    #[test]
    fn test_reset_after_game_over() {
        let mut state = GameState::new(8, Tuning::default(), quiet_settings());
        state.start_game();
        state.player.position.x = 1000.0;
        tick(&mut state, &TickInput::default(), 0.1);
        assert_eq!(state.phase(), GamePhase::GameOver);

        state.start_game();
        assert_eq!(state.phase(), GamePhase::Playing);
        assert_eq!(state.player.position, Vec3::new(0.0, 0.5, 0.0));
        tick(&mut state, &TickInput::default(), 0.1);
        assert_eq!(state.phase(), GamePhase::Playing);
    }

    #[test]
    fn test_determinism() {
        let run = || {
            let mut state = GameState::with_seed(99999);
            state.start_game();
            let input = TickInput {
                aim: Some(Vec2::new(0.3, 0.7)),
                fire: true,
                ..Default::default()
            };
            for _ in 0..600 {
                tick(&mut state, &input, 1.0 / 60.0);
            }
            state.snapshot()
        };
        let a = serde_json::to_string(&run()).unwrap();
        let b = serde_json::to_string(&run()).unwrap();
        assert_eq!(a, b);
    }

    proptest! {
        #[test]
        fn prop_ttl_fires_once_at_five_seconds(dt in 0.005f32..0.2) {
            let mut state = GameState::new(10, Tuning::default(), quiet_settings());
            state.start_game();

            let fire = TickInput { fire: true, ..Default::default() };
            tick(&mut state, &fire, dt);
            let shot = state.projectiles.iter_active().next().map(|p| (p.id, p.created_at_ms));
            prop_assert!(shot.is_some());
            let (id, created) = shot.unwrap_or_default();

            let mut expired = 0;
            while state.clock_ms < created + 5000.0 + 1000.0 {
                tick(&mut state, &TickInput::default(), dt);
                let age = state.clock_ms - created;
                expired += state
                    .drain_events()
                    .iter()
                    .filter(|e| matches!(e, GameEvent::ProjectileExpired { id: x } if *x == id))
                    .count();
                if age < 5000.0 {
                    prop_assert!(state.projectiles.get(id).is_some());
                    prop_assert_eq!(expired, 0);
                } else {
                    prop_assert!(state.projectiles.get(id).is_none());
                }
            }
            prop_assert_eq!(expired, 1);
        }
    }
}
