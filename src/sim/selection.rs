//! Card selection rules
//!
//! Pure transitions on `GameState`. A rejected click leaves the state
//! untouched and says so through the return value.

use serde::{Deserialize, Serialize};

use super::board::Card;
use super::state::GameState;

/// Result of a card click
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Selection {
    /// Nothing changed
    Rejected,
    /// The card was added to the selection
    Selected,
    /// The card replaced the previous pick from the same column
    Replaced { previous: Card },
}

impl Selection {
    pub fn changed(&self) -> bool {
        !matches!(self, Selection::Rejected)
    }
}

/// Result of comparing two selected cards
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum MatchResult {
    Match { pair: usize, cards: [Card; 2] },
    Mismatch { cards: [Card; 2] },
}

impl MatchResult {
    pub fn cards(&self) -> [Card; 2] {
        match *self {
            MatchResult::Match { cards, .. } | MatchResult::Mismatch { cards } => cards,
        }
    }

    pub fn is_match(&self) -> bool {
        matches!(self, MatchResult::Match { .. })
    }
}

/// Apply a click to the selection.
///
/// Matched cards, cards off the board and a repeat click on the current
/// pick are rejected. A second pick from the same column swaps out the
/// first. Otherwise the card is added while fewer than two are up.
pub fn select_card(state: &mut GameState, card: Card) -> Selection {
    if !state.board.contains(&card) || state.is_matched(card.index) {
        return Selection::Rejected;
    }

    if let [previous] = state.selected_cards[..] {
        if previous == card {
            return Selection::Rejected;
        }
        if previous.side == card.side {
            state.selected_cards[0] = card;
            return Selection::Replaced { previous };
        }
    }

    if state.selected_cards.len() >= 2 {
        return Selection::Rejected;
    }

    state.selected_cards.push(card);
    Selection::Selected
}

/// Resolve a full selection.
///
/// Returns `None` unless exactly two cards are up. A match records the pair
/// and, in Team mode, scores it for the team on turn. Either way the
/// selection is cleared and the turn is left alone.
pub fn check_match(state: &mut GameState) -> Option<MatchResult> {
    let cards: [Card; 2] = state.selected_cards.as_slice().try_into().ok()?;
    state.selected_cards.clear();

    let [first, second] = cards;
    if !first.is_partner_of(&second) {
        return Some(MatchResult::Mismatch { cards });
    }

    state.matched_pairs.insert(first.index);
    if state.mode.uses_teams() {
        *state.score_for_mut(state.current_team) += 1;
    }
    Some(MatchResult::Match {
        pair: first.index,
        cards,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::settings::{GameMode, Settings};
    use crate::sim::board::{RoundBoard, Side, build_board};
    use crate::sim::shuffle::Shuffler;
    use crate::sim::state::Team;
    use crate::words::WordPair;
    use proptest::prelude::*;

    fn two_pair_state(mode: GameMode) -> GameState {
        let pool = vec![WordPair::new("house", "casa"), WordPair::new("water", "água")];
        let mut state = GameState::new(&Settings::new(mode, 1, 15), pool.clone());
        state.words_per_game = 2;
        // Pool order, so pair-index 0 is house/casa
        state.reset_board(RoundBoard::unshuffled(pool));
        state
    }

    fn click_pair(state: &mut GameState, a: Card, b: Card) -> Option<MatchResult> {
        select_card(state, a);
        select_card(state, b);
        check_match(state)
    }

    #[test]
    fn test_matching_pair_scores_for_team() {
        let mut state = two_pair_state(GameMode::Team);
        assert_eq!(state.board.word(&Card::term(0)), Some("house"));
        assert_eq!(state.board.word(&Card::translation(0)), Some("casa"));

        let result = click_pair(&mut state, Card::term(0), Card::translation(0));
        assert!(result.unwrap().is_match());
        assert_eq!(state.score_for(Team::One), 1);
        assert_eq!(state.score_for(Team::Two), 0);
        assert_eq!(state.matched_pairs.iter().copied().collect::<Vec<_>>(), vec![0]);
        assert!(state.selected_cards.is_empty());
        assert_eq!(state.current_team, Team::One);
    }

    #[test]
    fn test_mismatch_changes_nothing_but_selection() {
        let mut state = two_pair_state(GameMode::Team);
        let result = click_pair(&mut state, Card::term(0), Card::translation(1));
        assert_eq!(
            result,
            Some(MatchResult::Mismatch {
                cards: [Card::term(0), Card::translation(1)]
            })
        );
        assert!(state.matched_pairs.is_empty());
        assert!(state.selected_cards.is_empty());
        assert_eq!(state.scores, [0, 0]);
        assert_eq!(state.current_team, Team::One);
    }

    #[test]
    fn test_individual_mode_does_not_score() {
        let mut state = two_pair_state(GameMode::Individual);
        click_pair(&mut state, Card::translation(1), Card::term(1));
        assert!(state.is_matched(1));
        assert_eq!(state.scores, [0, 0]);
    }

    #[test]
    fn test_same_side_click_replaces_first_pick() {
        let mut state = two_pair_state(GameMode::Team);
        assert_eq!(select_card(&mut state, Card::term(0)), Selection::Selected);
        assert_eq!(
            select_card(&mut state, Card::term(1)),
            Selection::Replaced {
                previous: Card::term(0)
            }
        );
        assert_eq!(state.selected_cards, vec![Card::term(1)]);
        assert_eq!(check_match(&mut state), None);
    }

    #[test]
    fn test_matched_card_click_is_noop() {
        let mut state = two_pair_state(GameMode::Team);
        click_pair(&mut state, Card::term(0), Card::translation(0));

        let before = state.clone();
        assert_eq!(select_card(&mut state, Card::term(0)), Selection::Rejected);
        assert_eq!(select_card(&mut state, Card::translation(0)), Selection::Rejected);
        assert_eq!(state.selected_cards, before.selected_cards);
        assert_eq!(state.matched_pairs, before.matched_pairs);

        // Also rejected as a would-be replacement
        select_card(&mut state, Card::term(1));
        assert_eq!(select_card(&mut state, Card::term(0)), Selection::Rejected);
        assert_eq!(state.selected_cards, vec![Card::term(1)]);
    }

    #[test]
    fn test_third_card_rejected_until_checked() {
        let mut state = two_pair_state(GameMode::Team);
        select_card(&mut state, Card::term(0));
        select_card(&mut state, Card::translation(1));
        assert_eq!(select_card(&mut state, Card::term(1)), Selection::Rejected);
        assert_eq!(select_card(&mut state, Card::translation(0)), Selection::Rejected);
        assert_eq!(state.selected_cards.len(), 2);
    }

    #[test]
    fn test_repeat_click_and_off_board_rejected() {
        let mut state = two_pair_state(GameMode::Team);
        select_card(&mut state, Card::term(0));
        assert_eq!(select_card(&mut state, Card::term(0)), Selection::Rejected);
        assert_eq!(select_card(&mut state, Card::translation(5)), Selection::Rejected);
        assert_eq!(state.selected_cards, vec![Card::term(0)]);
    }

    #[test]
    fn test_check_match_requires_two_cards() {
        let mut state = two_pair_state(GameMode::Team);
        assert_eq!(check_match(&mut state), None);
        select_card(&mut state, Card::term(0));
        assert_eq!(check_match(&mut state), None);
        assert_eq!(state.selected_cards.len(), 1);
    }

    fn arb_card() -> impl Strategy<Value = Card> {
        (0usize..10, any::<bool>()).prop_map(|(index, term)| {
            Card::new(index, if term { Side::Term } else { Side::Translation })
        })
    }

    proptest! {
        #[test]
        fn prop_selection_invariants_hold(clicks in prop::collection::vec(arb_card(), 0..60)) {
            let pool = crate::words::sample_pairs();
            let mut state = GameState::new(&Settings::default(), pool);
            let board = build_board(&state.word_pairs, 9, &mut Shuffler::with_seed(21)).unwrap();
            state.reset_board(board);

            for card in clicks {
                let matched_before = state.matched_pairs.len();
                let was_matched = state.is_matched(card.index);
                let selection = select_card(&mut state, card);
                if was_matched {
                    prop_assert_eq!(selection, Selection::Rejected);
                }
                if state.selected_cards.len() == 2 {
                    let [a, b] = [state.selected_cards[0], state.selected_cards[1]];
                    prop_assert_ne!(a.side, b.side);
                    match check_match(&mut state) {
                        Some(MatchResult::Match { pair, .. }) => {
                            prop_assert_eq!(state.matched_pairs.len(), matched_before + 1);
                            prop_assert!(state.is_matched(pair));
                        }
                        _ => {
                            prop_assert_eq!(state.matched_pairs.len(), matched_before);
                        }
                    }
                }
                prop_assert!(state.selected_cards.len() <= 2);
                prop_assert!(state.matched_pairs.len() <= state.board_size());
                let total: u32 = state.scores.iter().sum();
                prop_assert_eq!(total as usize, state.matched_pairs.len());
            }
        }
    }
}
