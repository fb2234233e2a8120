//! Arena Blitz entry point
//!
//! The browser build is driven from JavaScript through `arena_blitz::web`.
//! Natively this runs a headless scripted session: a bot circles the arena
//! centre and fires at the nearest enemy until it dies or time runs out.
//!
//! Usage: `arena-blitz [seconds] [seed] [theme]`

#[cfg(not(target_arch = "wasm32"))]
fn main() {
    use arena_blitz::sim::{GameEvent, GamePhase, GameState, tick};
    use arena_blitz::{HighScores, Settings, ThemeId, Tuning};

    env_logger::init();

    let mut args = std::env::args().skip(1);
    let seconds: f32 = args.next().and_then(|s| s.parse().ok()).unwrap_or(120.0);
    let seed: u64 = args.next().and_then(|s| s.parse().ok()).unwrap_or(12345);
    let theme = args
        .next()
        .and_then(|s| s.parse::<ThemeId>().ok())
        .unwrap_or_default();

    log::info!(
        "Arena Blitz (native) headless run: {}s, seed {}, theme {}",
        seconds,
        seed,
        theme.as_str()
    );

    let mut state = GameState::new(seed, Tuning::for_theme(theme), Settings::load());
    state.start_game();

    let dt = 1.0 / 60.0_f32;
    let frames = (seconds / dt) as u32;

    for _ in 0..frames {
        let input = bot::decide(&state);
        tick(&mut state, &input, dt);

        for event in state.drain_events() {
            match event {
                GameEvent::EnemyKilled { kind, points, .. } => {
                    log::debug!("Killed {} (+{})", kind.as_str(), points);
                }
                GameEvent::PlayerHit { damage, health, .. } => {
                    log::debug!("Player hit for {} ({} left)", damage, health);
                }
                GameEvent::DifficultyIncreased { multiplier } => {
                    log::info!("Difficulty x{:.3}", multiplier);
                }
                _ => {}
            }
        }

        if state.phase() != GamePhase::Playing {
            break;
        }
    }

    let mut high_scores = HighScores::load();
    let rank = high_scores.record_run(&state, 0.0);
    high_scores.save();

    println!(
        "phase={:?} score={} kills={} survived={:.1}s difficulty={:.3} rank={:?}",
        state.phase(),
        state.player.score,
        state.player.kill_count,
        state.elapsed_secs(),
        state.spawner.dynamic_difficulty,
        rank
    );
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // WASM entry point is arena_blitz::web::WebArena, this is just to satisfy the compiler
}

#[cfg(not(target_arch = "wasm32"))]
mod bot {
    use arena_blitz::sim::{GameState, MoveIntent, TickInput};
    use arena_blitz::{plane, plane_distance};

    /// Keep away from the edges, strafe around the centre, shoot the closest enemy
    pub fn decide(state: &GameState) -> TickInput {
        let me = state.player.position;
        let bounds = state.tuning.bounds;
        let center_x = (bounds.min_x + bounds.max_x) * 0.5;
        let center_z = (bounds.min_z + bounds.max_z) * 0.5;
        let dx = me.x - center_x;
        let dz = me.z - center_z;

        // Orbit radius well inside the arena
        let orbit = (bounds.max_x - bounds.min_x).min(bounds.max_z - bounds.min_z) * 0.2;
        let movement = if (dx * dx + dz * dz).sqrt() > orbit {
            MoveIntent {
                forward: dz > 1.0,
                back: dz < -1.0,
                left: dx > 1.0,
                right: dx < -1.0,
            }
        } else {
            // Tangential strafe
            MoveIntent {
                forward: dx > 0.0,
                back: dx <= 0.0,
                left: dz <= 0.0,
                right: dz > 0.0,
            }
        };

        let target = state.enemies.iter_active().min_by(|a, b| {
            plane_distance(a.position, me)
                .partial_cmp(&plane_distance(b.position, me))
                .unwrap_or(std::cmp::Ordering::Equal)
        });

        TickInput {
            movement,
            aim: target.map(|e| plane(e.position) - plane(me)),
            fire: target.is_some(),
        }
    }
}
