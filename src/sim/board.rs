//! Round board layout
//!
//! A board draws `count` pairs from the pool and lays each side out in its
//! own random order, so a card's grid position says nothing about its
//! partner's.

use log::warn;
use serde::{Deserialize, Serialize};

use super::shuffle::Shuffler;
use crate::error::{GameError, Result};
use crate::words::WordPair;

/// Which column a card sits in
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Side {
    /// Source-language word
    #[serde(rename = "english")]
    Term,
    #[serde(rename = "translation")]
    Translation,
}

impl Side {
    pub fn as_str(&self) -> &'static str {
        match self {
            Side::Term => "english",
            Side::Translation => "translation",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s.trim().to_lowercase().as_str() {
            "english" | "term" => Some(Side::Term),
            "translation" => Some(Side::Translation),
            _ => None,
        }
    }

    pub fn opposite(&self) -> Side {
        match self {
            Side::Term => Side::Translation,
            Side::Translation => Side::Term,
        }
    }
}

/// A card reference: pair-index plus side
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Card {
    pub index: usize,
    pub side: Side,
}

impl Card {
    pub fn new(index: usize, side: Side) -> Self {
        Self { index, side }
    }

    pub fn term(index: usize) -> Self {
        Self::new(index, Side::Term)
    }

    pub fn translation(index: usize) -> Self {
        Self::new(index, Side::Translation)
    }

    /// Same pair, opposite column
    pub fn is_partner_of(&self, other: &Card) -> bool {
        self.index == other.index && self.side != other.side
    }
}

/// One grid slot as the renderer draws it
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BoardCard {
    pub word: String,
    pub pair_index: usize,
}

impl BoardCard {
    pub fn card(&self, side: Side) -> Card {
        Card::new(self.pair_index, side)
    }
}

/// The current round's cards
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RoundBoard {
    /// Pairs on this board, addressed by pair-index
    pub pairs: Vec<WordPair>,
    /// Term column in grid order
    pub terms: Vec<BoardCard>,
    /// Translation column in grid order
    pub translations: Vec<BoardCard>,
}

impl RoundBoard {
    /// Both columns in pool order
    pub fn unshuffled(pairs: Vec<WordPair>) -> Self {
        let order: Vec<usize> = (0..pairs.len()).collect();
        Self {
            terms: layout(&pairs, order.clone(), Side::Term),
            translations: layout(&pairs, order, Side::Translation),
            pairs,
        }
    }

    /// Number of pairs on the board
    pub fn size(&self) -> usize {
        self.pairs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pairs.is_empty()
    }

    pub fn side(&self, side: Side) -> &[BoardCard] {
        match side {
            Side::Term => &self.terms,
            Side::Translation => &self.translations,
        }
    }

    pub fn contains(&self, card: &Card) -> bool {
        card.index < self.size()
    }

    /// The word printed on a card
    pub fn word(&self, card: &Card) -> Option<&str> {
        let pair = self.pairs.get(card.index)?;
        Some(match card.side {
            Side::Term => pair.term.as_str(),
            Side::Translation => pair.translation.as_str(),
        })
    }
}

/// Build one round's board.
///
/// Draws `count` pairs without replacement. A pool smaller than `count`
/// shrinks the board to the pool size.
pub fn build_board(pool: &[WordPair], count: usize, shuffler: &mut Shuffler) -> Result<RoundBoard> {
    if pool.is_empty() {
        return Err(GameError::EmptyPool);
    }
    let count = if pool.len() < count {
        warn!(
            "Only {} word pairs available, shrinking board from {}",
            pool.len(),
            count
        );
        pool.len()
    } else {
        count
    };

    let mut drawn: Vec<&WordPair> = pool.iter().collect();
    shuffler.shuffle(&mut drawn);
    let pairs: Vec<WordPair> = drawn.into_iter().take(count).cloned().collect();

    let terms = layout(&pairs, shuffler.permutation(count), Side::Term);
    let translations = layout(&pairs, shuffler.permutation(count), Side::Translation);

    Ok(RoundBoard {
        pairs,
        terms,
        translations,
    })
}

fn layout(pairs: &[WordPair], order: Vec<usize>, side: Side) -> Vec<BoardCard> {
    order
        .into_iter()
        .map(|pair_index| {
            let pair = &pairs[pair_index];
            let word = match side {
                Side::Term => pair.term.clone(),
                Side::Translation => pair.translation.clone(),
            };
            BoardCard { word, pair_index }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::words::sample_pairs;

    fn sorted_indices(cards: &[BoardCard]) -> Vec<usize> {
        let mut indices: Vec<usize> = cards.iter().map(|c| c.pair_index).collect();
        indices.sort_unstable();
        indices
    }

    #[test]
    fn test_build_board_is_permutation_per_side() {
        let pool = sample_pairs();
        assert_eq!(pool.len(), 15);
        let mut shuffler = Shuffler::with_seed(42);
        let board = build_board(&pool, 9, &mut shuffler).unwrap();

        assert_eq!(board.size(), 9);
        assert_eq!(sorted_indices(&board.terms), (0..9).collect::<Vec<_>>());
        assert_eq!(sorted_indices(&board.translations), (0..9).collect::<Vec<_>>());
    }

    #[test]
    fn test_build_board_words_line_up_with_pairs() {
        let pool = sample_pairs();
        let mut shuffler = Shuffler::with_seed(3);
        let board = build_board(&pool, 9, &mut shuffler).unwrap();

        for side in [Side::Term, Side::Translation] {
            for slot in board.side(side) {
                assert_eq!(board.word(&slot.card(side)), Some(slot.word.as_str()));
            }
        }
        for card in &board.translations {
            assert_eq!(card.word, board.pairs[card.pair_index].translation);
        }
        // Drawn without replacement
        for (i, a) in board.pairs.iter().enumerate() {
            assert!(board.pairs[i + 1..].iter().all(|b| b != a));
            assert!(pool.contains(a));
        }
    }

    #[test]
    fn test_sides_are_laid_out_independently() {
        let pool = sample_pairs();
        let mut shuffler = Shuffler::with_seed(11);
        // With 9! orderings per side, identical layouts on every one of
        // several boards would mean the sides share one permutation.
        let differs = (0..8).any(|_| {
            let board = build_board(&pool, 9, &mut shuffler).unwrap();
            let terms: Vec<usize> = board.terms.iter().map(|c| c.pair_index).collect();
            let translations: Vec<usize> = board.translations.iter().map(|c| c.pair_index).collect();
            terms != translations
        });
        assert!(differs);
    }

    #[test]
    fn test_small_pool_shrinks_board() {
        let pool = vec![WordPair::new("house", "casa"), WordPair::new("water", "água")];
        let mut shuffler = Shuffler::with_seed(5);
        let board = build_board(&pool, 9, &mut shuffler).unwrap();
        assert_eq!(board.size(), 2);
        assert_eq!(board.terms.len(), 2);
        assert_eq!(board.translations.len(), 2);
    }

    #[test]
    fn test_empty_pool_is_an_error() {
        let mut shuffler = Shuffler::with_seed(5);
        assert_eq!(build_board(&[], 9, &mut shuffler), Err(GameError::EmptyPool));
    }

    #[test]
    fn test_card_lookup() {
        let pool = vec![WordPair::new("house", "casa")];
        let board = build_board(&pool, 1, &mut Shuffler::with_seed(0)).unwrap();
        assert_eq!(board.word(&Card::term(0)), Some("house"));
        assert_eq!(board.word(&Card::translation(0)), Some("casa"));
        assert_eq!(board.word(&Card::term(1)), None);
        assert!(Card::term(0).is_partner_of(&Card::translation(0)));
        assert!(!Card::term(0).is_partner_of(&Card::term(0)));
    }

    #[test]
    fn test_side_from_str() {
        assert_eq!(Side::from_str("english"), Some(Side::Term));
        assert_eq!(Side::from_str("Translation"), Some(Side::Translation));
        assert_eq!(Side::from_str("left"), None);
        assert_eq!(Side::Term.opposite(), Side::Translation);
    }
}
