//! Game settings
//!
//! Values coming from the settings panel are clamped to their bounds and
//! snapped to the panel's step size, never rejected.

use serde::{Deserialize, Serialize};

use crate::consts::*;

/// Play mode
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum GameMode {
    /// Two teams take turns against a countdown
    #[default]
    Team,
    /// One player clears the boards, no turns or timer
    Individual,
}

impl GameMode {
    pub fn as_str(&self) -> &'static str {
        match self {
            GameMode::Team => "Team",
            GameMode::Individual => "Individual",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s.trim().to_lowercase().as_str() {
            "team" | "teams" => Some(GameMode::Team),
            "individual" | "solo" => Some(GameMode::Individual),
            _ => None,
        }
    }

    /// Whether turns, team scores and the countdown apply
    pub fn uses_teams(&self) -> bool {
        matches!(self, GameMode::Team)
    }
}

/// A numeric setting adjustable with the panel's plus/minus controls
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SettingField {
    Rounds,
    Timer,
}

impl SettingField {
    pub fn from_str(s: &str) -> Option<Self> {
        match s.trim().to_lowercase().as_str() {
            "rounds" | "rounds_per_game" => Some(SettingField::Rounds),
            "timer" | "timer_duration" => Some(SettingField::Timer),
            _ => None,
        }
    }

    /// (min, max, step)
    pub fn bounds(&self) -> (u32, u32, u32) {
        match self {
            SettingField::Rounds => (ROUNDS_MIN, ROUNDS_MAX, ROUNDS_STEP),
            SettingField::Timer => (TIMER_MIN_SECS, TIMER_MAX_SECS, TIMER_STEP_SECS),
        }
    }

    /// Clamp to bounds and snap to the nearest step
    pub fn clamp(&self, value: u32) -> u32 {
        let (min, max, step) = self.bounds();
        let value = value.clamp(min, max);
        let steps = (value - min + step / 2) / step;
        (min + steps * step).min(max)
    }
}

/// Game settings
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    pub mode: GameMode,
    /// Boards to clear before the game ends
    pub rounds_per_game: u32,
    /// Seconds per turn (Team mode)
    pub timer_duration: u32,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            mode: GameMode::Team,
            rounds_per_game: 2,
            timer_duration: 15,
        }
    }
}

impl Settings {
    /// Build settings from raw panel values
    pub fn new(mode: GameMode, rounds_per_game: u32, timer_duration: u32) -> Self {
        Self {
            mode,
            rounds_per_game: SettingField::Rounds.clamp(rounds_per_game),
            timer_duration: SettingField::Timer.clamp(timer_duration),
        }
    }

    /// Re-apply bounds (e.g. after deserializing host-provided JSON)
    pub fn clamped(self) -> Self {
        Self::new(self.mode, self.rounds_per_game, self.timer_duration)
    }

    pub fn get(&self, field: SettingField) -> u32 {
        match field {
            SettingField::Rounds => self.rounds_per_game,
            SettingField::Timer => self.timer_duration,
        }
    }

    fn set(&mut self, field: SettingField, value: u32) {
        let value = field.clamp(value);
        match field {
            SettingField::Rounds => self.rounds_per_game = value,
            SettingField::Timer => self.timer_duration = value,
        }
    }

    /// Plus button: one step up, saturating at the maximum
    pub fn increment(&mut self, field: SettingField) {
        let (_, _, step) = field.bounds();
        self.set(field, self.get(field).saturating_add(step));
    }

    /// Minus button: one step down, saturating at the minimum
    pub fn decrement(&mut self, field: SettingField) {
        let (_, _, step) = field.bounds();
        self.set(field, self.get(field).saturating_sub(step));
    }
}
