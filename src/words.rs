//! Word pair data
//!
//! Pairs come either from the built-in sample set or from uploaded text in
//! `term,translation` lines.

use serde::{Deserialize, Serialize};

use crate::error::{GameError, Result};

/// A term and its translation
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WordPair {
    pub term: String,
    pub translation: String,
}

impl WordPair {
    pub fn new(term: impl Into<String>, translation: impl Into<String>) -> Self {
        Self {
            term: term.into(),
            translation: translation.into(),
        }
    }
}

/// Built-in English/Portuguese demo set
const SAMPLE_PAIRS: [(&str, &str); 15] = [
    ("house", "casa"),
    ("water", "água"),
    ("friend", "amigo"),
    ("book", "livro"),
    ("cat", "gato"),
    ("dog", "cachorro"),
    ("bread", "pão"),
    ("milk", "leite"),
    ("coffee", "café"),
    ("sun", "sol"),
    ("moon", "lua"),
    ("beach", "praia"),
    ("tree", "árvore"),
    ("food", "comida"),
    ("door", "porta"),
];

pub fn sample_pairs() -> Vec<WordPair> {
    SAMPLE_PAIRS
        .iter()
        .map(|&(term, translation)| WordPair::new(term, translation))
        .collect()
}

/// Parse newline-delimited `term,translation` text.
///
/// Lines without a comma are dropped, as are lines whose first two fields
/// are empty after trimming. Fields past the second are ignored. There is no
/// quoting, so a term cannot contain a comma.
pub fn parse_word_pairs(text: &str) -> Vec<WordPair> {
    text.lines()
        .map(str::trim)
        .filter(|line| line.contains(','))
        .filter_map(|line| {
            let mut fields = line.split(',').map(str::trim);
            let term = fields.next()?;
            let translation = fields.next()?;
            if term.is_empty() || translation.is_empty() {
                return None;
            }
            Some(WordPair::new(term, translation))
        })
        .collect()
}

/// Where the active pool comes from
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum WordPairSource {
    #[default]
    Sample,
    Custom(Vec<WordPair>),
}

impl WordPairSource {
    /// Parse uploaded text, failing if nothing usable was found
    pub fn from_text(text: &str) -> Result<Self> {
        let pairs = parse_word_pairs(text);
        if pairs.is_empty() {
            return Err(GameError::NoValidPairs);
        }
        Ok(WordPairSource::Custom(pairs))
    }

    /// The pairs this source supplies
    pub fn pairs(&self) -> Vec<WordPair> {
        match self {
            WordPairSource::Sample => sample_pairs(),
            WordPairSource::Custom(pairs) if !pairs.is_empty() => pairs.clone(),
            WordPairSource::Custom(_) => sample_pairs(),
        }
    }

    pub fn is_sample(&self) -> bool {
        matches!(self, WordPairSource::Sample)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_skips_bad_lines_and_extra_fields() {
        let pairs = parse_word_pairs("cat,gato\nbad-line\ndog,cachorro,extra");
        assert_eq!(
            pairs,
            vec![WordPair::new("cat", "gato"), WordPair::new("dog", "cachorro")]
        );
    }

    #[test]
    fn test_parse_trims_fields_and_handles_crlf() {
        let pairs = parse_word_pairs("  sun ,  sol \r\n\r\n\tmoon,lua\r\n");
        assert_eq!(
            pairs,
            vec![WordPair::new("sun", "sol"), WordPair::new("moon", "lua")]
        );
    }

    #[test]
    fn test_parse_drops_empty_fields() {
        let pairs = parse_word_pairs(",casa\nwater,\n , \nbook,livro");
        assert_eq!(pairs, vec![WordPair::new("book", "livro")]);
    }

    #[test]
    fn test_from_text_rejects_unusable_input() {
        assert_eq!(
            WordPairSource::from_text("no commas here\n\n"),
            Err(GameError::NoValidPairs)
        );
        assert_eq!(WordPairSource::from_text(""), Err(GameError::NoValidPairs));
    }

    #[test]
    fn test_sample_set() {
        let pairs = WordPairSource::Sample.pairs();
        assert_eq!(pairs.len(), 15);
        assert_eq!(pairs[0], WordPair::new("house", "casa"));
        assert!(pairs.iter().all(|p| !p.term.is_empty() && !p.translation.is_empty()));
    }
}
