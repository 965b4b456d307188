//! Word Match - a classroom vocabulary matching game
//!
//! Core modules:
//! - `sim`: Pure game logic (board layout, card selection, turn timer)
//! - `controller`: Game lifecycle orchestration and side effects
//! - `words`: Word pair data (sample set and uploaded text)
//! - `settings`: Player-facing configuration with bounded values
//! - `scheduler`: Cancellable deferred/repeating tasks
//! - `render`: Rendering contract implemented by the host page

pub mod controller;
pub mod error;
pub mod render;
pub mod scheduler;
pub mod settings;
pub mod sim;
pub mod words;

#[cfg(target_arch = "wasm32")]
pub mod web;

pub use controller::GameController;
pub use error::{GameError, Result};
pub use render::Renderer;
pub use scheduler::{ManualScheduler, Scheduler, TaskHandle};
pub use settings::{GameMode, SettingField, Settings};
pub use words::{WordPair, WordPairSource};

/// Game configuration constants
pub mod consts {
    /// Cards per side on a full board (3x3 grid)
    pub const WORDS_PER_GAME: usize = 9;

    /// Turn timer bounds (seconds)
    pub const TIMER_MIN_SECS: u32 = 10;
    pub const TIMER_MAX_SECS: u32 = 120;
    pub const TIMER_STEP_SECS: u32 = 5;

    /// Rounds per game bounds
    pub const ROUNDS_MIN: u32 = 1;
    pub const ROUNDS_MAX: u32 = 5;
    pub const ROUNDS_STEP: u32 = 1;

    /// Timer tick period
    pub const TICK_MS: u32 = 1000;
    /// Delay before the board changes after the last match of a round
    pub const ROUND_ADVANCE_DELAY_MS: u32 = 1000;
    /// How long a mismatched pair stays face up
    pub const MISMATCH_HIDE_DELAY_MS: u32 = 1000;
    /// Delay before the final result is announced
    pub const GAME_OVER_DELAY_MS: u32 = 500;
}
