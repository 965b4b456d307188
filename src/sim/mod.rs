//! Game logic module
//!
//! Everything that decides what a click or a tick means lives here. This
//! module must stay pure:
//! - No rendering or platform dependencies
//! - No scheduling; timers are advanced by the caller
//! - Randomness only through `Shuffler`

pub mod board;
pub mod selection;
pub mod shuffle;
pub mod state;
pub mod timer;

pub use board::{BoardCard, Card, RoundBoard, Side, build_board};
pub use selection::{MatchResult, Selection, check_match, select_card};
pub use shuffle::Shuffler;
pub use state::{GamePhase, GameState, Team};
pub use timer::{TimerState, TimerTick, TurnTimer};
