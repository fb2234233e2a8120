//! Browser bindings
//!
//! The page owns rendering, screens and raw input capture. It forwards input
//! here, calls `tick` once per animation frame and draws from `snapshot_json`.

use wasm_bindgen::prelude::*;

use crate::consts::MAX_FRAME_DT;
use crate::highscores::HighScores;
use crate::settings::Settings;
use crate::sim::{GamePhase, GameState, MoveIntent, TickInput, tick};
use crate::tuning::{ThemeId, Tuning};

#[wasm_bindgen]
pub struct WebArena {
    state: GameState,
    input: TickInput,
    high_scores: HighScores,
}

#[wasm_bindgen]
impl WebArena {
    /// Create a game for a built-in theme name (unknown names fall back to classic)
    #[wasm_bindgen(constructor)]
    pub fn new(theme: &str) -> WebArena {
        console_error_panic_hook::set_once();
        // Ignore "already initialised" when the page creates a second arena
        let _ = console_log::init_with_level(log::Level::Info);

        let theme = theme.parse::<ThemeId>().unwrap_or_default();
        let seed = js_sys::Date::now() as u64;
        log::info!("Arena Blitz starting (theme {}, seed {})", theme.as_str(), seed);

        WebArena {
            state: GameState::new(seed, Tuning::for_theme(theme), Settings::load()),
            input: TickInput::default(),
            high_scores: HighScores::load(),
        }
    }

    pub fn set_movement(&mut self, forward: bool, back: bool, left: bool, right: bool) {
        self.input.movement = MoveIntent {
            forward,
            back,
            left,
            right,
        };
    }

    /// Aim along (x, z); a zero vector keeps the current facing
    pub fn set_aim(&mut self, x: f32, z: f32) {
        self.input.aim = Some(glam::Vec2::new(x, z));
    }

    pub fn set_fire(&mut self, held: bool) {
        self.input.fire = held;
    }

    /// Advance one animation frame of `dt` seconds
    pub fn tick(&mut self, dt: f32) {
        let dt = dt.clamp(0.0, MAX_FRAME_DT);
        let was_playing = self.state.phase() == GamePhase::Playing;
        tick(&mut self.state, &self.input, dt);

        if was_playing && self.state.phase() == GamePhase::GameOver {
            if let Some(rank) = self.high_scores.record_run(&self.state, js_sys::Date::now()) {
                log::info!("New high score, rank {}", rank);
                self.high_scores.save();
            }
        }
    }

    pub fn start(&mut self) {
        self.input = TickInput::default();
        self.state.start_game();
    }

    pub fn open_settings(&mut self) {
        self.state.open_settings();
    }

    pub fn close_settings(&mut self) {
        self.state.close_settings();
    }

    pub fn to_menu(&mut self) {
        self.state.return_to_menu();
    }

    pub fn phase(&self) -> String {
        match self.state.phase() {
            GamePhase::Menu => "menu",
            GamePhase::Playing => "playing",
            GamePhase::GameOver => "gameOver",
            GamePhase::Settings => "settings",
        }
        .to_string()
    }

    pub fn snapshot_json(&self) -> String {
        serde_json::to_string(&self.state.snapshot()).unwrap_or_default()
    }

    /// Events since the last call, for audio and effects
    pub fn drain_events_json(&mut self) -> String {
        serde_json::to_string(&self.state.drain_events()).unwrap_or_default()
    }

    pub fn settings_json(&self) -> String {
        serde_json::to_string(&self.state.settings).unwrap_or_default()
    }

    pub fn apply_settings(&mut self, json: &str) -> Result<(), JsValue> {
        let settings: Settings =
            serde_json::from_str(json).map_err(|e| JsValue::from_str(&e.to_string()))?;
        self.state.apply_settings(settings);
        self.state.settings.save();
        Ok(())
    }

    /// Replace the balance table; only allowed from the menu or game over screen
    pub fn load_tuning(&mut self, json: &str) -> Result<(), JsValue> {
        if !matches!(self.state.phase(), GamePhase::Menu | GamePhase::GameOver) {
            return Err(JsValue::from_str("cannot change tuning during a run"));
        }
        let tuning = Tuning::from_json(json).map_err(|e| JsValue::from_str(&e.to_string()))?;
        log::info!("Loaded custom tuning");
        self.state.tuning = tuning;
        Ok(())
    }

    pub fn high_scores_json(&self) -> String {
        serde_json::to_string(&self.high_scores).unwrap_or_default()
    }
}
