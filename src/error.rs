//! Error types

use thiserror::Error;

/// Errors surfaced by game setup and host input
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum GameError {
    /// Board construction was asked to draw from an empty pool
    #[error("word pool is empty")]
    EmptyPool,

    /// Uploaded text contained no usable `term,translation` lines
    #[error("no valid word pairs found in input")]
    NoValidPairs,

    /// Host passed a card side the game does not know
    #[error("unknown card side: {0}")]
    UnknownSide(String),

    /// Host passed a play mode the game does not know
    #[error("unknown game mode: {0}")]
    UnknownMode(String),

    /// Host named a setting the panel does not have
    #[error("unknown setting: {0}")]
    UnknownSetting(String),
}

pub type Result<T> = std::result::Result<T, GameError>;
