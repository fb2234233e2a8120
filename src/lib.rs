//! Arena Blitz - A top-down arena shooter
//!
//! Core modules:
//! - `sim`: Deterministic simulation (pools, movement, collisions, combat, spawning)
//! - `tuning`: Data-driven game balance (themes, enemy and weapon stat tables)
//! - `settings`: Player-adjustable parameters consumed by the simulation
//! - `highscores`: Leaderboard of finished runs
//! - `web`: Browser bindings for a JavaScript renderer (wasm32 only)

pub mod highscores;
pub mod settings;
pub mod sim;
pub mod tuning;

#[cfg(target_arch = "wasm32")]
pub mod web;

pub use highscores::HighScores;
pub use settings::Settings;
pub use tuning::{ThemeId, Tuning, TuningError};

use glam::{Vec2, Vec3};

/// Game configuration constants
pub mod consts {
    /// Projectile pool slots (fixed, never grows)
    pub const PROJECTILE_POOL_SIZE: usize = 15;
    /// Projectile time-to-live in milliseconds
    pub const PROJECTILE_TTL_MS: f64 = 5000.0;

    /// Minimum time between two attacks of the same enemy (ms)
    pub const ENEMY_ATTACK_COOLDOWN_MS: f64 = 500.0;
    /// Extra reach added to an enemy's radius for melee attacks
    pub const ENEMY_ATTACK_REACH: f32 = 1.0;

    /// Scale applied to the target radius in projectile/enemy hit tests
    pub const HIT_RADIUS_SCALE: f32 = 1.0;

    /// Seconds of accumulated budget per spawn at multiplier 1.0
    pub const BASE_SPAWN_INTERVAL: f32 = 1.0;
    /// Distance from the player at which enemies appear
    pub const SPAWN_RADIUS: f32 = 20.0;
    /// Spawn positions stay this far inside every arena edge
    pub const SPAWN_EDGE_MARGIN: f32 = 5.0;
    /// Seconds between difficulty steps
    pub const DIFFICULTY_INCREASE_INTERVAL: f32 = 30.0;
    /// Factor applied to the dynamic difficulty on every step
    pub const DIFFICULTY_STEP_FACTOR: f32 = 1.2;

    /// Enemies further than this outside the arena are culled without score
    pub const ENEMY_CLEANUP_MARGIN: f32 = 50.0;

    /// Score for an enemy kind missing from the theme's table
    pub const DEFAULT_ENEMY_POINTS: u32 = 10;

    /// Height at which ground entities and projectiles travel
    pub const GROUND_HEIGHT: f32 = 0.5;

    /// Largest frame delta accepted by the frame drivers (seconds)
    pub const MAX_FRAME_DT: f32 = 0.1;
}

/// Project a position onto the horizontal (x, z) movement plane
#[inline]
pub fn plane(pos: Vec3) -> Vec2 {
    Vec2::new(pos.x, pos.z)
}

/// Distance between two positions ignoring height
#[inline]
pub fn plane_distance(a: Vec3, b: Vec3) -> f32 {
    plane(a).distance(plane(b))
}

/// Facing direction for a rotation around the vertical axis
#[inline]
pub fn facing(rotation: f32) -> Vec3 {
    Vec3::new(rotation.sin(), 0.0, rotation.cos())
}

/// Rotation around the vertical axis that faces along an (x, z) direction
#[inline]
pub fn rotation_toward(dir: Vec2) -> f32 {
    dir.x.atan2(dir.y)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_plane_distance_ignores_height() {
        let a = Vec3::new(0.0, 0.0, 0.0);
        let b = Vec3::new(3.0, 100.0, 4.0);
        assert!((plane_distance(a, b) - 5.0).abs() < 1e-5);
    }

    #[test]
    fn test_facing_roundtrip() {
        let dir = Vec2::new(1.0, 1.0).normalize();
        let f = facing(rotation_toward(dir));
        assert!((f.x - dir.x).abs() < 1e-5);
        assert!((f.z - dir.y).abs() < 1e-5);
        assert_eq!(f.y, 0.0);
    }
}
