//! Shuffling for pair selection and card layout

use rand::SeedableRng;
use rand::seq::SliceRandom;
use rand_pcg::Pcg32;

/// Uniform shuffler.
///
/// Play only needs layouts a human cannot predict; the seed is exposed so
/// tests can pin a sequence.
#[derive(Debug, Clone)]
pub struct Shuffler {
    rng: Pcg32,
}

impl Default for Shuffler {
    fn default() -> Self {
        Self::from_entropy()
    }
}

impl Shuffler {
    pub fn with_seed(seed: u64) -> Self {
        Self {
            rng: Pcg32::seed_from_u64(seed),
        }
    }

    pub fn from_entropy() -> Self {
        Self::with_seed(rand::random())
    }

    /// Fisher-Yates shuffle in place
    pub fn shuffle<T>(&mut self, items: &mut [T]) {
        items.shuffle(&mut self.rng);
    }

    /// A random permutation of `0..len`
    pub fn permutation(&mut self, len: usize) -> Vec<usize> {
        let mut order: Vec<usize> = (0..len).collect();
        self.shuffle(&mut order);
        order
    }
}
