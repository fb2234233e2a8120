//! Game state and core simulation types
//!
//! Everything the per-frame systems read or mutate lives in [`GameState`],
//! owned by the frame driver.

use glam::Vec3;
use rand::SeedableRng;
use rand_pcg::Pcg32;
use serde::Serialize;

use super::phase::{GamePhase, PhaseMachine};
use super::pool::{EntityId, EntityPool, Poolable};
use super::spawner::EnemySpawner;
use crate::consts::*;
use crate::settings::Settings;
use crate::tuning::{EnemyKind, EnemyStats, Tuning, WeaponKind};

/// A projectile fired by the player
#[derive(Debug, Clone, Default)]
pub struct Projectile {
    pub id: EntityId,
    pub active: bool,
    pub kind: WeaponKind,
    pub position: Vec3,
    /// Unit vector, fixed for the projectile's lifetime
    pub direction: Vec3,
    pub speed: f32,
    pub size: f32,
    pub damage: f32,
    /// Sim clock at activation (ms)
    pub created_at_ms: f64,
}

#[derive(Debug, Clone, Copy)]
pub struct ProjectileSpawn {
    pub kind: WeaponKind,
    pub position: Vec3,
    pub direction: Vec3,
    pub speed: f32,
    pub size: f32,
    pub damage: f32,
    pub created_at_ms: f64,
}

impl Poolable for Projectile {
    type Spawn = ProjectileSpawn;

    fn id(&self) -> EntityId {
        self.id
    }

    fn is_active(&self) -> bool {
        self.active
    }

    fn activate(&mut self, id: EntityId, s: ProjectileSpawn) {
        *self = Projectile {
            id,
            active: true,
            kind: s.kind,
            position: s.position,
            direction: s.direction.normalize_or_zero(),
            speed: s.speed,
            size: s.size,
            damage: s.damage,
            created_at_ms: s.created_at_ms,
        };
    }

    fn deactivate(&mut self) {
        self.active = false;
    }
}

/// A hostile chasing the player
#[derive(Debug, Clone, Default)]
pub struct Enemy {
    pub id: EntityId,
    pub active: bool,
    pub kind: EnemyKind,
    pub position: Vec3,
    pub health: f32,
    pub max_health: f32,
    /// Already scaled by the enemy speed multiplier
    pub speed: f32,
    pub damage: f32,
    pub size: f32,
    /// Sim clock of the last successful attack (ms)
    pub last_attack_ms: Option<f64>,
}

#[derive(Debug, Clone, Copy)]
pub struct EnemySpawn {
    pub kind: EnemyKind,
    pub position: Vec3,
    pub stats: EnemyStats,
}

impl Poolable for Enemy {
    type Spawn = EnemySpawn;

    fn id(&self) -> EntityId {
        self.id
    }

    fn is_active(&self) -> bool {
        self.active
    }

    fn activate(&mut self, id: EntityId, s: EnemySpawn) {
        *self = Enemy {
            id,
            active: true,
            kind: s.kind,
            position: s.position,
            health: s.stats.health,
            max_health: s.stats.health,
            speed: s.stats.speed,
            damage: s.stats.damage,
            size: s.stats.size,
            last_attack_ms: None,
        };
    }

    fn deactivate(&mut self) {
        self.active = false;
    }
}

/// The player avatar
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Player {
    pub position: Vec3,
    /// Radians around the vertical axis
    pub rotation: f32,
    pub health: f32,
    pub max_health: f32,
    pub score: u64,
    pub kill_count: u32,
    /// Seconds until the trigger can fire again
    #[serde(skip)]
    pub fire_cooldown: f32,
}

impl Player {
    pub fn new(max_health: f32) -> Self {
        Self {
            position: Vec3::new(0.0, GROUND_HEIGHT, 0.0),
            rotation: 0.0,
            health: max_health,
            max_health,
            score: 0,
            kill_count: 0,
            fire_cooldown: 0.0,
        }
    }

    pub fn is_dead(&self) -> bool {
        self.health <= 0.0
    }
}

/// Why a run ended
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum GameOverReason {
    Killed,
    OutOfBounds,
}

/// Things that happened during a tick, for audio and effects
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "type", rename_all = "camelCase")]
pub enum GameEvent {
    ShotFired { id: EntityId },
    /// Projectile pool was saturated
    ShotDropped,
    EnemySpawned { id: EntityId, kind: EnemyKind },
    EnemyHit { id: EntityId, health: f32 },
    EnemyKilled { id: EntityId, kind: EnemyKind, points: u64 },
    /// Removed for drifting out of the arena, no score
    EnemyCulled { id: EntityId },
    ProjectileExpired { id: EntityId },
    PlayerHit { by: EntityId, damage: f32, health: f32 },
    DifficultyIncreased { multiplier: f32 },
    GameOver { reason: GameOverReason },
}

/// Complete simulation state
#[derive(Debug, Clone)]
pub struct GameState {
    /// Run seed for reproducibility
    pub seed: u64,
    pub rng: Pcg32,
    pub phase: PhaseMachine,
    pub settings: Settings,
    pub tuning: Tuning,
    pub player: Player,
    pub projectiles: EntityPool<Projectile>,
    pub enemies: EntityPool<Enemy>,
    pub spawner: EnemySpawner,
    /// Sum of all `dt` spent playing this run (ms)
    pub clock_ms: f64,
    /// Events since the last drain
    pub events: Vec<GameEvent>,
}

impl GameState {
    /// Create a new game in the menu
    pub fn new(seed: u64, tuning: Tuning, settings: Settings) -> Self {
        let settings = settings.sanitized();
        Self {
            seed,
            rng: Pcg32::seed_from_u64(seed),
            phase: PhaseMachine::new(),
            player: Player::new(settings.player_max_health),
            settings,
            tuning,
            projectiles: EntityPool::fixed(PROJECTILE_POOL_SIZE),
            enemies: EntityPool::growable(),
            spawner: EnemySpawner::new(),
            clock_ms: 0.0,
            events: Vec::new(),
        }
    }

    /// Classic theme, default settings
    pub fn with_seed(seed: u64) -> Self {
        Self::new(seed, Tuning::default(), Settings::default())
    }

    pub fn phase(&self) -> GamePhase {
        self.phase.current()
    }

    /// Start or restart a run: fresh player, empty pools, reset difficulty
    pub fn start_game(&mut self) {
        self.player = Player::new(self.settings.player_max_health);
        self.projectiles.reset();
        self.enemies.reset();
        self.spawner.reset();
        self.clock_ms = 0.0;
        self.events.clear();
        self.phase.start();
        log::info!(
            "Run started (seed {}, theme {})",
            self.seed,
            self.tuning.theme.as_str()
        );
    }

    pub fn open_settings(&mut self) {
        self.phase.open_settings();
    }

    pub fn close_settings(&mut self) {
        self.phase.close_settings();
    }

    pub fn return_to_menu(&mut self) {
        self.phase.to_menu();
    }

    /// Replace the settings; player stats pick them up on the next start
    pub fn apply_settings(&mut self, settings: Settings) {
        self.settings = settings.sanitized();
    }

    /// Effective concurrent enemy cap
    pub fn max_enemies(&self) -> usize {
        self.settings.max_enemies.unwrap_or(self.tuning.max_enemies)
    }

    /// Seconds survived in the current run
    pub fn elapsed_secs(&self) -> f32 {
        (self.clock_ms / 1000.0) as f32
    }

    pub(crate) fn end_run(&mut self, reason: GameOverReason) -> bool {
        if !self.phase.game_over() {
            return false;
        }
        log::info!(
            "Game over ({:?}): score {}, kills {}, survived {:.1}s",
            reason,
            self.player.score,
            self.player.kill_count,
            self.elapsed_secs()
        );
        self.events.push(GameEvent::GameOver { reason });
        true
    }

    pub fn drain_events(&mut self) -> Vec<GameEvent> {
        std::mem::take(&mut self.events)
    }

    /// Read-only view for the presentation layer
    pub fn snapshot(&self) -> Snapshot {
        let color = self.tuning.weapon_stats().color;
        Snapshot {
            phase: self.phase(),
            player: self.player.clone(),
            enemies: self
                .enemies
                .iter_active()
                .map(|e| EnemyView {
                    id: e.id.to_string(),
                    kind: e.kind,
                    position: e.position,
                    size: e.size,
                    health: e.health,
                    max_health: e.max_health,
                })
                .collect(),
            projectiles: self
                .projectiles
                .iter_active()
                .map(|p| ProjectileView {
                    id: p.id.to_string(),
                    kind: p.kind,
                    position: p.position,
                    size: p.size,
                    color,
                })
                .collect(),
            difficulty: self.spawner.dynamic_difficulty,
            elapsed_secs: self.elapsed_secs(),
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct EnemyView {
    pub id: String,
    pub kind: EnemyKind,
    pub position: Vec3,
    pub size: f32,
    pub health: f32,
    pub max_health: f32,
}

#[derive(Debug, Clone, Serialize)]
pub struct ProjectileView {
    pub id: String,
    pub kind: WeaponKind,
    pub position: Vec3,
    pub size: f32,
    pub color: u32,
}

/// Per-frame render input
#[derive(Debug, Clone, Serialize)]
pub struct Snapshot {
    pub phase: GamePhase,
    pub player: Player,
    pub enemies: Vec<EnemyView>,
    pub projectiles: Vec<ProjectileView>,
    pub difficulty: f32,
    pub elapsed_secs: f32,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tuning::ThemeId;

    fn spawn_enemy(state: &mut GameState, x: f32, z: f32) -> EntityId {
        let stats = EnemyKind::Grunt.base_stats();
        state
            .enemies
            .activate(EnemySpawn {
                kind: EnemyKind::Grunt,
                position: Vec3::new(x, GROUND_HEIGHT, z),
                stats,
            })
            .unwrap()
    }

    fn spawn_projectile(state: &mut GameState) -> Option<EntityId> {
        state.projectiles.activate(ProjectileSpawn {
            kind: WeaponKind::Bullet,
            position: Vec3::ZERO,
            direction: Vec3::X,
            speed: 10.0,
            size: 0.2,
            damage: 10.0,
            created_at_ms: state.clock_ms,
        })
    }

    #[test]
    fn test_new_state_in_menu() {
        let state = GameState::with_seed(1);
        assert_eq!(state.phase(), GamePhase::Menu);
        assert_eq!(state.projectiles.len(), PROJECTILE_POOL_SIZE);
        assert!(state.enemies.is_empty());
        assert_eq!(state.player.health, Settings::default().player_max_health);
    }

    #[test]
    fn test_reset_clears_world() {
        let mut state = GameState::with_seed(7);
        state.start_game();
        for i in 0..5 {
            spawn_enemy(&mut state, i as f32 * 3.0, 10.0);
        }
        for _ in 0..3 {
            spawn_projectile(&mut state);
        }
        state.player.position = Vec3::new(12.0, GROUND_HEIGHT, -4.0);
        state.player.health = 17.0;
        state.player.score = 450;
        state.player.kill_count = 9;
        state.spawner.dynamic_difficulty = 2.0;

        state.start_game();

        assert_eq!(state.enemies.active_count(), 0);
        assert_eq!(state.projectiles.active_count(), 0);
        assert_eq!(state.enemies.len(), 5);
        assert_eq!(state.player, Player::new(state.settings.player_max_health));
        assert_eq!(state.spawner.dynamic_difficulty, 1.0);
        assert_eq!(state.phase(), GamePhase::Playing);
    }

    #[test]
    fn test_end_run_once() {
        let mut state = GameState::with_seed(3);
        state.start_game();
        assert!(state.end_run(GameOverReason::Killed));
        assert!(!state.end_run(GameOverReason::OutOfBounds));
        let overs = state
            .drain_events()
            .into_iter()
            .filter(|e| matches!(e, GameEvent::GameOver { .. }))
            .count();
        assert_eq!(overs, 1);
        assert!(state.events.is_empty());
    }

    #[test]
    fn test_settings_cap_overrides_theme() {
        let mut state = GameState::new(1, Tuning::for_theme(ThemeId::Swarm), Settings::default());
        assert_eq!(state.max_enemies(), 40);
        state.apply_settings(Settings {
            max_enemies: Some(3),
            ..Default::default()
        });
        assert_eq!(state.max_enemies(), 3);
    }

    #[test]
    fn test_snapshot_lists_only_active() {
        let mut state = GameState::with_seed(5);
        state.start_game();
        let a = spawn_enemy(&mut state, 5.0, 5.0);
        spawn_enemy(&mut state, -5.0, 5.0);
        state.enemies.deactivate(a);
        spawn_projectile(&mut state);

        let snap = state.snapshot();
        assert_eq!(snap.enemies.len(), 1);
        assert_eq!(snap.projectiles.len(), 1);
        assert_eq!(snap.phase, GamePhase::Playing);

        let json = serde_json::to_value(&snap).unwrap();
        assert_eq!(json["phase"], "playing");
        assert_eq!(json["enemies"][0]["kind"], "grunt");
    }
}
