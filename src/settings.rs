//! Game settings and preferences
//!
//! Persisted separately from run data in LocalStorage. These values are
//! consumed by the simulation but are not simulation state.

use serde::{Deserialize, Serialize};

/// Player-adjustable game parameters
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    // === Player ===
    /// Movement speed (units/second)
    pub player_speed: f32,
    /// Health at the start of a run
    pub player_max_health: f32,
    /// Shots per second while the trigger is held
    pub player_fire_rate: f32,

    // === Enemies ===
    /// Multiplier applied to every enemy's base speed at spawn
    pub enemy_speed_multiplier: f32,
    /// Multiplier compressing the spawn interval
    pub enemy_spawn_rate: f32,
    /// Overall difficulty, also compresses the spawn interval
    pub difficulty_multiplier: f32,
    /// Concurrent enemy cap; `None` defers to the theme's cap
    pub max_enemies: Option<usize>,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            player_speed: 10.0,
            player_max_health: 100.0,
            player_fire_rate: 5.0,

            enemy_speed_multiplier: 1.0,
            enemy_spawn_rate: 1.0,
            difficulty_multiplier: 1.0,
            max_enemies: None,
        }
    }
}

impl Settings {
    /// Copy of these settings with every value forced into its usable range
    ///
    /// Multipliers divide the spawn interval, so they must stay positive.
    pub fn sanitized(&self) -> Self {
        Self {
            player_speed: self.player_speed.clamp(1.0, 50.0),
            player_max_health: self.player_max_health.clamp(1.0, 10_000.0),
            player_fire_rate: self.player_fire_rate.clamp(0.5, 30.0),
            enemy_speed_multiplier: self.enemy_speed_multiplier.clamp(0.1, 5.0),
            enemy_spawn_rate: self.enemy_spawn_rate.clamp(0.1, 10.0),
            difficulty_multiplier: self.difficulty_multiplier.clamp(0.1, 10.0),
            max_enemies: self.max_enemies.map(|n| n.clamp(1, 200)),
        }
    }

    /// Seconds between shots at the configured fire rate
    pub fn fire_interval(&self) -> f32 {
        1.0 / self.player_fire_rate.max(0.01)
    }

    /// LocalStorage key
    #[allow(dead_code)]
    const STORAGE_KEY: &'static str = "arena_blitz_settings";

    /// Load settings from LocalStorage (WASM only)
    #[cfg(target_arch = "wasm32")]
    pub fn load() -> Self {
        let storage = web_sys::window()
            .and_then(|w| w.local_storage().ok())
            .flatten();

        if let Some(storage) = storage {
            if let Ok(Some(json)) = storage.get_item(Self::STORAGE_KEY) {
                if let Ok(settings) = serde_json::from_str::<Settings>(&json) {
                    log::info!("Loaded settings from LocalStorage");
                    return settings.sanitized();
                }
            }
        }

        log::info!("Using default settings");
        Self::default()
    }

    /// Save settings to LocalStorage (WASM only)
    #[cfg(target_arch = "wasm32")]
    pub fn save(&self) {
        let storage = web_sys::window()
            .and_then(|w| w.local_storage().ok())
            .flatten();

        if let Some(storage) = storage {
            if let Ok(json) = serde_json::to_string(self) {
                let _ = storage.set_item(Self::STORAGE_KEY, &json);
                log::info!("Settings saved");
            }
        }
    }

    /// Native stubs
    #[cfg(not(target_arch = "wasm32"))]
    pub fn load() -> Self {
        Self::default()
    }

    #[cfg(not(target_arch = "wasm32"))]
    pub fn save(&self) {
        // No-op for native
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sanitized_clamps_multipliers() {
        let settings = Settings {
            enemy_spawn_rate: 0.0,
            difficulty_multiplier: -3.0,
            player_fire_rate: 1000.0,
            max_enemies: Some(0),
            ..Default::default()
        };
        let s = settings.sanitized();
        assert!(s.enemy_spawn_rate > 0.0);
        assert!(s.difficulty_multiplier > 0.0);
        assert_eq!(s.player_fire_rate, 30.0);
        assert_eq!(s.max_enemies, Some(1));
    }

    #[test]
    fn test_partial_json_uses_defaults() {
        let s: Settings = serde_json::from_str(r#"{"player_speed": 14.0}"#).unwrap();
        assert_eq!(s.player_speed, 14.0);
        assert_eq!(s.player_max_health, Settings::default().player_max_health);
        assert_eq!(s.max_enemies, None);
    }

    #[test]
    fn test_fire_interval() {
        let s = Settings {
            player_fire_rate: 4.0,
            ..Default::default()
        };
        assert!((s.fire_interval() - 0.25).abs() < 1e-6);
    }
}
