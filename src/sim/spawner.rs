//! Enemy spawning and difficulty ramp
//!
//! Two accumulators drive everything: one meters spawn attempts, the other
//! steps a difficulty multiplier that shortens the spawn interval for as long
//! as the run lasts.

use glam::Vec3;
use rand::Rng;
use rand::seq::IndexedRandom;

use super::pool::EntityId;
use super::state::{EnemySpawn, GameEvent, GameState};
use crate::consts::*;
use crate::settings::Settings;
use crate::tuning::WorldBounds;

/// Frame sums this close to a threshold count as reaching it
const TIMER_EPSILON: f64 = 1e-6;

/// Spawn and difficulty timers
#[derive(Debug, Clone, PartialEq)]
pub struct EnemySpawner {
    /// Seconds since the last spawn attempt
    pub spawn_timer: f64,
    /// Seconds since the last difficulty step
    pub difficulty_timer: f64,
    /// Starts at 1.0, grows by `step_factor` every `increase_interval`
    pub dynamic_difficulty: f32,
    pub step_factor: f32,
    pub increase_interval: f32,
    pub base_interval: f32,
}

impl Default for EnemySpawner {
    fn default() -> Self {
        Self::new()
    }
}

impl EnemySpawner {
    pub fn new() -> Self {
        Self {
            spawn_timer: 0.0,
            difficulty_timer: 0.0,
            dynamic_difficulty: 1.0,
            step_factor: DIFFICULTY_STEP_FACTOR,
            increase_interval: DIFFICULTY_INCREASE_INTERVAL,
            base_interval: BASE_SPAWN_INTERVAL,
        }
    }

    pub fn reset(&mut self) {
        self.spawn_timer = 0.0;
        self.difficulty_timer = 0.0;
        self.dynamic_difficulty = 1.0;
    }

    /// Seconds of budget required per spawn; every multiplier shortens it
    pub fn required_interval(&self, settings: &Settings) -> f32 {
        self.base_interval
            / (self.dynamic_difficulty * settings.enemy_spawn_rate * settings.difficulty_multiplier)
    }
}

/// Spawn position `radius` from `center` at `angle`, kept inside the arena
pub fn spawn_position(center: Vec3, angle: f32, radius: f32, bounds: &WorldBounds) -> Vec3 {
    let raw = Vec3::new(
        center.x + angle.cos() * radius,
        GROUND_HEIGHT,
        center.z + angle.sin() * radius,
    );
    bounds.clamp_inset(raw, SPAWN_EDGE_MARGIN)
}

/// Advance the spawner by `dt` seconds
pub fn tick_spawner(state: &mut GameState, dt: f32) {
    let spawner = &mut state.spawner;
    spawner.spawn_timer += dt as f64;
    spawner.difficulty_timer += dt as f64;

    let required = spawner.required_interval(&state.settings) as f64;
    if spawner.spawn_timer + TIMER_EPSILON >= required {
        spawner.spawn_timer = 0.0;
        try_spawn(state);
    }

    let spawner = &mut state.spawner;
    if spawner.difficulty_timer + TIMER_EPSILON >= spawner.increase_interval as f64 {
        spawner.difficulty_timer = 0.0;
        spawner.dynamic_difficulty *= spawner.step_factor;
        let multiplier = spawner.dynamic_difficulty;
        log::debug!("Difficulty increased to {:.3}", multiplier);
        state
            .events
            .push(GameEvent::DifficultyIncreased { multiplier });
    }
}

/// One spawn attempt. Skipped silently at the population cap.
pub fn try_spawn(state: &mut GameState) -> Option<EntityId> {
    if state.enemies.active_count() >= state.max_enemies() {
        return None;
    }

    let tuning = &state.tuning;
    let kind = *tuning
        .enabled_enemies
        .choose_weighted(&mut state.rng, |k| {
            tuning.enemy_stats(*k).map(|s| s.spawn_weight).unwrap_or(0.0)
        })
        .ok()?;
    let Some(mut stats) = tuning.enemy_stats(kind).copied() else {
        log::warn!("Enemy kind {} has no stats, spawn skipped", kind.as_str());
        return None;
    };
    stats.speed *= state.settings.enemy_speed_multiplier;

    let angle = state.rng.random_range(0.0..std::f32::consts::TAU);
    let position = spawn_position(state.player.position, angle, SPAWN_RADIUS, &tuning.bounds);

    let id = state.enemies.activate(EnemySpawn {
        kind,
        position,
        stats,
    })?;
    log::debug!("Spawned {} {} at ({:.1}, {:.1})", kind.as_str(), id, position.x, position.z);
    state.events.push(GameEvent::EnemySpawned { id, kind });
    Some(id)
}
