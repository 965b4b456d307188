//! Rendering contract
//!
//! The controller pushes deltas through this trait and never reads layout
//! back. The browser implementation forwards to the page's JavaScript.

use log::info;

use crate::sim::{BoardCard, Card, RoundBoard, Side, Team};

pub trait Renderer {
    /// Card turned face up (`true`) or back down
    fn card_selected(&mut self, card: Card, selected: bool);
    fn cards_matched(&mut self, cards: &[Card]);
    fn score_changed(&mut self, team: Team, value: u32);
    fn turn_changed(&mut self, team: Team);
    fn timer_changed(&mut self, seconds_remaining: u32);
    /// Clear the grid and lay out a new board
    fn board_reset(&mut self, board: &RoundBoard);
    fn round_label_changed(&mut self, text: &str);
    fn announce(&mut self, message: &str);
}

/// Renderer that writes every delta to the log
#[derive(Debug, Default)]
pub struct LogRenderer;

impl Renderer for LogRenderer {
    fn card_selected(&mut self, card: Card, selected: bool) {
        info!(
            "{} card {} {}",
            card.side.as_str(),
            card.index,
            if selected { "selected" } else { "deselected" }
        );
    }

    fn cards_matched(&mut self, cards: &[Card]) {
        info!("Matched {:?}", cards);
    }

    fn score_changed(&mut self, team: Team, value: u32) {
        info!("{} score: {}", team.label(), value);
    }

    fn turn_changed(&mut self, team: Team) {
        info!("{}'s Turn", team.label());
    }

    fn timer_changed(&mut self, seconds_remaining: u32) {
        info!("Timer: {}s", seconds_remaining);
    }

    fn board_reset(&mut self, board: &RoundBoard) {
        let words = |cards: &[BoardCard]| cards.iter().map(|c| c.word.as_str()).collect::<Vec<_>>().join(" | ");
        info!(
            "Board: [{}] / [{}]",
            words(board.side(Side::Term)),
            words(board.side(Side::Translation))
        );
    }

    fn round_label_changed(&mut self, text: &str) {
        info!("{}", text);
    }

    fn announce(&mut self, message: &str) {
        info!("*** {} ***", message);
    }
}
