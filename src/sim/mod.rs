//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - Delta-time accumulation only, never wall-clock time
//! - Seeded RNG only
//! - Stable iteration order (by pool slot)
//! - No rendering or platform dependencies

pub mod collision;
pub mod combat;
pub mod movement;
pub mod phase;
pub mod pool;
pub mod shooting;
pub mod spawner;
pub mod state;
pub mod tick;

pub use collision::{Body, enemies_in_reach, find_hits};
pub use combat::{DamageOutcome, damage_enemy};
pub use movement::MoveIntent;
pub use phase::{GamePhase, PhaseMachine};
pub use pool::{EntityId, EntityPool, PoolCapacity, Poolable};
pub use shooting::fire_projectile;
pub use spawner::EnemySpawner;
pub use state::{
    Enemy, GameEvent, GameOverReason, GameState, Player, Projectile, Snapshot,
};
pub use tick::{TickInput, tick};
