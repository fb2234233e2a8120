//! Data-driven game balance
//!
//! A theme picks which enemy kinds appear, their stat tables, the player's
//! weapon and the arena size. Built-in themes cover normal play; custom tables
//! can be loaded from JSON and are validated before use.

use std::collections::BTreeMap;
use std::str::FromStr;

use glam::Vec3;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::consts::DEFAULT_ENEMY_POINTS;

/// Enemy archetypes
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EnemyKind {
    #[default]
    Grunt,
    Fast,
    Tank,
    Swarmer,
}

impl EnemyKind {
    pub const ALL: [EnemyKind; 4] = [
        EnemyKind::Grunt,
        EnemyKind::Fast,
        EnemyKind::Tank,
        EnemyKind::Swarmer,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            EnemyKind::Grunt => "grunt",
            EnemyKind::Fast => "fast",
            EnemyKind::Tank => "tank",
            EnemyKind::Swarmer => "swarmer",
        }
    }

    /// Reference stats, used by the classic theme
    pub fn base_stats(&self) -> EnemyStats {
        match self {
            EnemyKind::Grunt => EnemyStats {
                speed: 3.0,
                health: 20.0,
                damage: 10.0,
                size: 0.8,
                points: 10,
                spawn_weight: 1.0,
            },
            EnemyKind::Fast => EnemyStats {
                speed: 6.0,
                health: 10.0,
                damage: 5.0,
                size: 0.6,
                points: 15,
                spawn_weight: 1.0,
            },
            EnemyKind::Tank => EnemyStats {
                speed: 1.5,
                health: 60.0,
                damage: 25.0,
                size: 1.4,
                points: 30,
                spawn_weight: 1.0,
            },
            EnemyKind::Swarmer => EnemyStats {
                speed: 4.5,
                health: 5.0,
                damage: 3.0,
                size: 0.4,
                points: 5,
                spawn_weight: 1.0,
            },
        }
    }
}

/// Per-kind enemy stat bundle
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct EnemyStats {
    pub speed: f32,
    pub health: f32,
    pub damage: f32,
    pub size: f32,
    pub points: u32,
    /// Relative spawn probability among the enabled kinds
    #[serde(default = "default_weight")]
    pub spawn_weight: f32,
}

fn default_weight() -> f32 {
    1.0
}

/// Player weapon profiles
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum WeaponKind {
    #[default]
    Bullet,
    Plasma,
    Laser,
}

impl WeaponKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            WeaponKind::Bullet => "bullet",
            WeaponKind::Plasma => "plasma",
            WeaponKind::Laser => "laser",
        }
    }

    pub fn base_stats(&self) -> WeaponStats {
        match self {
            WeaponKind::Bullet => WeaponStats {
                speed: 30.0,
                size: 0.2,
                damage: 10.0,
                color: 0xffd54a,
            },
            WeaponKind::Plasma => WeaponStats {
                speed: 22.0,
                size: 0.45,
                damage: 18.0,
                color: 0x4af2ff,
            },
            WeaponKind::Laser => WeaponStats {
                speed: 45.0,
                size: 0.15,
                damage: 7.0,
                color: 0xff3d6e,
            },
        }
    }
}

/// Per-weapon projectile stat bundle
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct WeaponStats {
    pub speed: f32,
    pub size: f32,
    pub damage: f32,
    /// 0xRRGGBB, for the renderer
    pub color: u32,
}

/// Rectangular arena on the horizontal plane
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct WorldBounds {
    pub min_x: f32,
    pub max_x: f32,
    pub min_z: f32,
    pub max_z: f32,
}

impl WorldBounds {
    /// Square arena centred on the origin
    pub fn square(half_extent: f32) -> Self {
        Self {
            min_x: -half_extent,
            max_x: half_extent,
            min_z: -half_extent,
            max_z: half_extent,
        }
    }

    pub fn contains(&self, pos: Vec3) -> bool {
        pos.x >= self.min_x && pos.x <= self.max_x && pos.z >= self.min_z && pos.z <= self.max_z
    }

    /// True when `pos` is further than `margin` outside the arena on any axis
    pub fn far_outside(&self, pos: Vec3, margin: f32) -> bool {
        pos.x < self.min_x - margin
            || pos.x > self.max_x + margin
            || pos.z < self.min_z - margin
            || pos.z > self.max_z + margin
    }

    /// Clamp `pos` into the arena shrunk by `margin` on every edge
    ///
    /// An axis too narrow for the margin collapses to its centre line.
    pub fn clamp_inset(&self, pos: Vec3, margin: f32) -> Vec3 {
        Vec3::new(
            clamp_axis(pos.x, self.min_x + margin, self.max_x - margin),
            pos.y,
            clamp_axis(pos.z, self.min_z + margin, self.max_z - margin),
        )
    }
}

fn clamp_axis(v: f32, lo: f32, hi: f32) -> f32 {
    if lo > hi {
        (lo + hi) * 0.5
    } else {
        v.clamp(lo, hi)
    }
}

/// Built-in themes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ThemeId {
    #[default]
    Classic,
    Neon,
    Swarm,
}

impl ThemeId {
    pub fn as_str(&self) -> &'static str {
        match self {
            ThemeId::Classic => "classic",
            ThemeId::Neon => "neon",
            ThemeId::Swarm => "swarm",
        }
    }
}

impl FromStr for ThemeId {
    type Err = TuningError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "classic" => Ok(ThemeId::Classic),
            "neon" => Ok(ThemeId::Neon),
            "swarm" => Ok(ThemeId::Swarm),
            _ => Err(TuningError::UnknownTheme(s.to_string())),
        }
    }
}

/// Errors raised while loading or validating a tuning table
#[derive(Debug, Error)]
pub enum TuningError {
    #[error("invalid tuning JSON: {0}")]
    Parse(#[from] serde_json::Error),
    #[error("world bounds are empty or inverted (x {min_x}..{max_x}, z {min_z}..{max_z})")]
    InvalidBounds {
        min_x: f32,
        max_x: f32,
        min_z: f32,
        max_z: f32,
    },
    #[error("theme enables no enemy kinds")]
    NoEnemies,
    #[error("enemy kind {0} is enabled but has no stats")]
    MissingEnemyStats(&'static str),
    #[error("{kind} has a non-positive {field}")]
    InvalidStat {
        kind: &'static str,
        field: &'static str,
    },
    #[error("unknown theme {0:?}")]
    UnknownTheme(String),
    #[error("weapon {0} has no stats")]
    MissingWeapon(&'static str),
}

/// Complete balance table for one theme
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Tuning {
    pub theme: ThemeId,
    /// Kinds the spawner picks from
    pub enabled_enemies: Vec<EnemyKind>,
    pub enemies: BTreeMap<EnemyKind, EnemyStats>,
    /// Weapon the player fires
    pub weapon: WeaponKind,
    pub weapons: BTreeMap<WeaponKind, WeaponStats>,
    pub bounds: WorldBounds,
    /// Concurrent enemy cap unless the player overrides it
    pub max_enemies: usize,
    pub score_multiplier: f32,
}

impl Default for Tuning {
    fn default() -> Self {
        Self::for_theme(ThemeId::Classic)
    }
}

impl Tuning {
    /// Stat table for a built-in theme
    pub fn for_theme(theme: ThemeId) -> Self {
        let weapons: BTreeMap<_, _> = [WeaponKind::Bullet, WeaponKind::Plasma, WeaponKind::Laser]
            .into_iter()
            .map(|w| (w, w.base_stats()))
            .collect();

        match theme {
            ThemeId::Classic => {
                let enabled = vec![EnemyKind::Grunt, EnemyKind::Fast, EnemyKind::Tank];
                Self {
                    theme,
                    enemies: enabled.iter().map(|k| (*k, k.base_stats())).collect(),
                    enabled_enemies: enabled,
                    weapon: WeaponKind::Bullet,
                    weapons,
                    bounds: WorldBounds::square(50.0),
                    max_enemies: 20,
                    score_multiplier: 1.0,
                }
            }
            ThemeId::Neon => {
                // Faster, flimsier enemies in a tighter arena
                let enabled = vec![EnemyKind::Fast, EnemyKind::Swarmer, EnemyKind::Grunt];
                let enemies = enabled
                    .iter()
                    .map(|k| {
                        let mut s = k.base_stats();
                        s.speed *= 1.25;
                        s.health *= 0.8;
                        (*k, s)
                    })
                    .collect();
                Self {
                    theme,
                    enabled_enemies: enabled,
                    enemies,
                    weapon: WeaponKind::Plasma,
                    weapons,
                    bounds: WorldBounds::square(40.0),
                    max_enemies: 25,
                    score_multiplier: 1.5,
                }
            }
            ThemeId::Swarm => {
                let enabled = vec![EnemyKind::Swarmer, EnemyKind::Grunt, EnemyKind::Tank];
                let mut enemies: BTreeMap<_, _> =
                    enabled.iter().map(|k| (*k, k.base_stats())).collect();
                // Swarmers dominate, tanks are rare
                if let Some(s) = enemies.get_mut(&EnemyKind::Swarmer) {
                    s.spawn_weight = 4.0;
                }
                if let Some(s) = enemies.get_mut(&EnemyKind::Tank) {
                    s.spawn_weight = 0.5;
                }
                Self {
                    theme,
                    enabled_enemies: enabled,
                    enemies,
                    weapon: WeaponKind::Laser,
                    weapons,
                    bounds: WorldBounds::square(60.0),
                    max_enemies: 40,
                    score_multiplier: 1.0,
                }
            }
        }
    }

    /// Parse and validate a custom table
    pub fn from_json(json: &str) -> Result<Self, TuningError> {
        let tuning: Tuning = serde_json::from_str(json)?;
        tuning.validate()?;
        Ok(tuning)
    }

    pub fn validate(&self) -> Result<(), TuningError> {
        let b = self.bounds;
        if !(b.min_x < b.max_x && b.min_z < b.max_z) {
            return Err(TuningError::InvalidBounds {
                min_x: b.min_x,
                max_x: b.max_x,
                min_z: b.min_z,
                max_z: b.max_z,
            });
        }

        if self.enabled_enemies.is_empty() {
            return Err(TuningError::NoEnemies);
        }

        for kind in &self.enabled_enemies {
            let stats = self
                .enemies
                .get(kind)
                .ok_or(TuningError::MissingEnemyStats(kind.as_str()))?;
            let checks = [
                ("speed", stats.speed),
                ("health", stats.health),
                ("size", stats.size),
                ("spawn_weight", stats.spawn_weight),
            ];
            for (field, value) in checks {
                if value <= 0.0 {
                    return Err(TuningError::InvalidStat {
                        kind: kind.as_str(),
                        field,
                    });
                }
            }
        }

        let weapon = self
            .weapons
            .get(&self.weapon)
            .ok_or(TuningError::MissingWeapon(self.weapon.as_str()))?;
        if weapon.speed <= 0.0 || weapon.size <= 0.0 {
            return Err(TuningError::InvalidStat {
                kind: self.weapon.as_str(),
                field: "speed/size",
            });
        }

        Ok(())
    }

    pub fn enemy_stats(&self, kind: EnemyKind) -> Option<&EnemyStats> {
        self.enemies.get(&kind)
    }

    /// Score for killing `kind`, with a fallback for kinds missing from the table
    pub fn points(&self, kind: EnemyKind) -> u32 {
        self.enemies
            .get(&kind)
            .map(|s| s.points)
            .unwrap_or(DEFAULT_ENEMY_POINTS)
    }

    /// Stats of the equipped weapon
    pub fn weapon_stats(&self) -> WeaponStats {
        self.weapons
            .get(&self.weapon)
            .copied()
            .unwrap_or_else(|| self.weapon.base_stats())
    }
}
