//! Top-level game phase
//!
//! Only `Playing` runs the simulation. `Settings` is an overlay that remembers
//! the phase it was opened from.

use serde::{Deserialize, Serialize};

/// Current phase of the game
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum GamePhase {
    /// Start screen
    #[default]
    Menu,
    /// Active gameplay
    Playing,
    /// Run ended
    GameOver,
    /// Settings screen over whatever phase preceded it
    Settings,
}

/// Phase plus the single saved phase to return to from `Settings`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct PhaseMachine {
    current: GamePhase,
    previous: Option<GamePhase>,
}

impl PhaseMachine {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn current(&self) -> GamePhase {
        self.current
    }

    pub fn is_playing(&self) -> bool {
        self.current == GamePhase::Playing
    }

    /// Enter `Playing` (start or restart)
    pub fn start(&mut self) {
        self.current = GamePhase::Playing;
        self.previous = None;
    }

    /// `Playing` -> `GameOver`. Returns false if not playing.
    pub fn game_over(&mut self) -> bool {
        if self.current != GamePhase::Playing {
            return false;
        }
        self.current = GamePhase::GameOver;
        true
    }

    pub fn to_menu(&mut self) {
        self.current = GamePhase::Menu;
        self.previous = None;
    }

    pub fn open_settings(&mut self) {
        if self.current == GamePhase::Settings {
            return;
        }
        self.previous = Some(self.current);
        self.current = GamePhase::Settings;
    }

    /// Leave `Settings` for the phase it was opened from
    pub fn close_settings(&mut self) {
        if self.current != GamePhase::Settings {
            return;
        }
        self.current = self.previous.take().unwrap_or(GamePhase::Menu);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_initial_phase_is_menu() {
        assert_eq!(PhaseMachine::new().current(), GamePhase::Menu);
    }

    #[test]
    fn test_game_over_only_from_playing() {
        let mut m = PhaseMachine::new();
        assert!(!m.game_over());
        m.start();
        assert!(m.game_over());
        assert!(!m.game_over());
        assert_eq!(m.current(), GamePhase::GameOver);
    }

    #[test]
    fn test_settings_returns_to_previous() {
        let mut m = PhaseMachine::new();
        m.start();
        m.open_settings();
        assert_eq!(m.current(), GamePhase::Settings);
        assert!(!m.is_playing());
        // Opening twice keeps the original return target
        m.open_settings();
        m.close_settings();
        assert_eq!(m.current(), GamePhase::Playing);

        m.to_menu();
        m.open_settings();
        m.close_settings();
        assert_eq!(m.current(), GamePhase::Menu);
    }

    #[test]
    fn test_close_settings_outside_settings_is_noop() {
        let mut m = PhaseMachine::new();
        m.start();
        m.close_settings();
        assert_eq!(m.current(), GamePhase::Playing);
    }
}
