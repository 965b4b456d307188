//! Game state and core types
//!
//! `GameState` is the single mutable aggregate for a game. The controller
//! owns it; the selection rules and round transitions mutate it.

use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

use super::board::{Card, RoundBoard};
use crate::consts::WORDS_PER_GAME;
use crate::settings::{GameMode, Settings};
use crate::words::WordPair;

/// One of the two competing teams
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum Team {
    #[default]
    One,
    Two,
}

impl Team {
    /// Slot in the score array
    pub fn index(&self) -> usize {
        match self {
            Team::One => 0,
            Team::Two => 1,
        }
    }

    /// 1-based number for display
    pub fn number(&self) -> u8 {
        match self {
            Team::One => 1,
            Team::Two => 2,
        }
    }

    pub fn other(&self) -> Team {
        match self {
            Team::One => Team::Two,
            Team::Two => Team::One,
        }
    }

    pub fn label(&self) -> String {
        format!("Team {}", self.number())
    }
}

/// Current phase of a game
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum GamePhase {
    /// Accepting clicks
    #[default]
    Playing,
    /// Board finished, waiting for the deferred round advance or result
    Transition,
    /// Result announced
    GameOver,
}

/// Complete state of one game
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GameState {
    pub mode: GameMode,
    pub phase: GamePhase,
    /// Team whose turn it is (Team mode)
    pub current_team: Team,
    /// Scores indexed by `Team::index`
    pub scores: [u32; 2],
    /// Face-up, unmatched cards in click order
    pub selected_cards: Vec<Card>,
    /// Pair-indices matched on the current board
    pub matched_pairs: BTreeSet<usize>,
    /// Active pool the boards are drawn from
    pub word_pairs: Vec<WordPair>,
    pub board: RoundBoard,
    /// Zero-based
    pub current_round: u32,
    /// Seconds left in the current turn (Team mode)
    pub time_remaining: u32,
    /// Board size requested by the game; the board may be smaller
    pub words_per_game: usize,
    pub timer_duration: u32,
    pub rounds_per_game: u32,
}

impl GameState {
    /// Fresh game from settings and a pool. The board is filled by the caller.
    pub fn new(settings: &Settings, word_pairs: Vec<WordPair>) -> Self {
        Self {
            mode: settings.mode,
            phase: GamePhase::Playing,
            current_team: Team::One,
            scores: [0; 2],
            selected_cards: Vec::with_capacity(2),
            matched_pairs: BTreeSet::new(),
            word_pairs,
            board: RoundBoard::default(),
            current_round: 0,
            time_remaining: settings.timer_duration,
            words_per_game: WORDS_PER_GAME,
            timer_duration: settings.timer_duration,
            rounds_per_game: settings.rounds_per_game,
        }
    }

    pub fn score_for(&self, team: Team) -> u32 {
        self.scores[team.index()]
    }

    pub fn score_for_mut(&mut self, team: Team) -> &mut u32 {
        &mut self.scores[team.index()]
    }

    /// Pairs that must be matched to clear the current board
    pub fn board_size(&self) -> usize {
        self.board.size().min(self.words_per_game)
    }

    pub fn is_matched(&self, index: usize) -> bool {
        self.matched_pairs.contains(&index)
    }

    pub fn is_board_complete(&self) -> bool {
        self.board_size() > 0 && self.matched_pairs.len() == self.board_size()
    }

    pub fn is_last_round(&self) -> bool {
        self.current_round + 1 >= self.rounds_per_game
    }

    pub fn is_game_complete(&self) -> bool {
        self.is_board_complete() && self.is_last_round()
    }

    pub fn accepts_clicks(&self) -> bool {
        self.phase == GamePhase::Playing
    }

    /// Clear the board for the next round, keeping scores and config
    pub fn advance_round(&mut self, board: RoundBoard) {
        self.current_round += 1;
        self.reset_board(board);
    }

    /// Replace the board and forget all selections and matches on it
    pub fn reset_board(&mut self, board: RoundBoard) {
        self.board = board;
        self.matched_pairs.clear();
        self.selected_cards.clear();
        self.phase = GamePhase::Playing;
    }

    /// "Round 1 of 3"
    pub fn round_label(&self) -> String {
        format!("Round {} of {}", self.current_round + 1, self.rounds_per_game)
    }

    /// Winner by score, `None` on a tie
    pub fn leader(&self) -> Option<Team> {
        let (one, two) = (self.score_for(Team::One), self.score_for(Team::Two));
        match one.cmp(&two) {
            std::cmp::Ordering::Greater => Some(Team::One),
            std::cmp::Ordering::Less => Some(Team::Two),
            std::cmp::Ordering::Equal => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::board::build_board;
    use crate::sim::shuffle::Shuffler;
    use crate::words::sample_pairs;

    fn state_with_board(rounds: u32) -> GameState {
        let settings = Settings::new(GameMode::Team, rounds, 15);
        let mut state = GameState::new(&settings, sample_pairs());
        let board = build_board(&state.word_pairs, WORDS_PER_GAME, &mut Shuffler::with_seed(1)).unwrap();
        state.reset_board(board);
        state
    }

    #[test]
    fn test_new_state() {
        let state = state_with_board(3);
        assert_eq!(state.current_round, 0);
        assert_eq!(state.scores, [0, 0]);
        assert_eq!(state.current_team, Team::One);
        assert_eq!(state.time_remaining, 15);
        assert_eq!(state.board_size(), 9);
        assert!(!state.is_board_complete());
        assert_eq!(state.round_label(), "Round 1 of 3");
    }

    #[test]
    fn test_completion_flags() {
        let mut state = state_with_board(2);
        state.matched_pairs.extend(0..9);
        assert!(state.is_board_complete());
        assert!(!state.is_game_complete());

        state.current_round = 1;
        assert!(state.is_game_complete());
    }

    #[test]
    fn test_advance_round_keeps_scores() {
        let mut state = state_with_board(3);
        state.matched_pairs.extend(0..9);
        *state.score_for_mut(Team::Two) = 4;
        state.selected_cards.push(Card::term(0));

        let next = build_board(&state.word_pairs, 9, &mut Shuffler::with_seed(2)).unwrap();
        state.advance_round(next);

        assert_eq!(state.current_round, 1);
        assert!(state.matched_pairs.is_empty());
        assert!(state.selected_cards.is_empty());
        assert_eq!(state.score_for(Team::Two), 4);
        assert_eq!(state.round_label(), "Round 2 of 3");
    }

    #[test]
    fn test_leader() {
        let mut state = state_with_board(1);
        assert_eq!(state.leader(), None);
        state.scores = [3, 5];
        assert_eq!(state.leader(), Some(Team::Two));
        state.scores = [6, 5];
        assert_eq!(state.leader(), Some(Team::One));
    }

    #[test]
    fn test_team_helpers() {
        assert_eq!(Team::One.other(), Team::Two);
        assert_eq!(Team::Two.other(), Team::One);
        assert_eq!(Team::Two.index(), 1);
        assert_eq!(Team::Two.label(), "Team 2");
    }
}
