//! Scoring guesses by how they split the remaining solutions.
//!
//! For a guess, every remaining solution produces a *signature*: which
//! positions the guess matches exactly, and for each distinct letter of the
//! guess, how many of that letter the solution has (never more than the
//! guess has, just as Wordle never reports more matches for a letter than
//! the guess contains). Solutions with the same signature cannot be told
//! apart after the guess, so they form a *cluster*. A guess is good when its
//! clusters are small.

use std::collections::HashMap;

use log::trace;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::{words::Word, CorpusError};

/// The quality of a guess. Lower is better.
///
/// [`f64::INFINITY`] marks a final guess that cannot be the answer.
pub type Score = f64;

/// Signatures are packed into a `u64`: one match bit per position, then a
/// count field per distinct letter of the guess. This is the longest word
/// length for which the packing still fits.
pub const MAX_WORD_LENGTH: usize = 12;

/// The bit layout of a signature for one word length.
///
/// # Examples
///
/// ```rust
/// use wordle_solver::judge::SignatureLayout;
///
/// let layout = SignatureLayout::new(5)?;
/// assert_eq!(layout.count_bits(), 3);
/// assert_eq!(layout.total_bits(), 20);
///
/// assert!(SignatureLayout::new(13).is_err());
/// # Ok::<_, wordle_solver::CorpusError>(())
/// ```
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct SignatureLayout {
    length: usize,
    count_bits: u32,
}

impl SignatureLayout {
    /// Computes the layout for words of `length` characters.
    ///
    /// Count fields hold `0..=length`. A guess has at most `length`
    /// distinct letters, so the signature needs
    /// `length * (1 + count_bits)` bits at most.
    pub fn new(length: usize) -> Result<Self, CorpusError> {
        let count_bits = usize::BITS - length.leading_zeros();
        let layout = SignatureLayout { length, count_bits };

        if layout.total_bits() > u64::BITS as usize {
            return Err(CorpusError::WordTooLong {
                length,
                max: MAX_WORD_LENGTH,
            });
        }

        Ok(layout)
    }

    /// Width of one letter count field.
    pub fn count_bits(&self) -> u32 {
        self.count_bits
    }

    /// Width of the widest possible signature.
    pub fn total_bits(&self) -> usize {
        self.length * (1 + self.count_bits as usize)
    }

    /// The signature `solution` produces for `guess`.
    pub fn signature(&self, guess: &Word, solution: &Word) -> u64 {
        let mut key = 0_u64;
        for (g, s) in guess.chars().iter().zip(solution.chars()) {
            key = (key << 1) | u64::from(g == s);
        }
        for &(c, n) in guess.letters() {
            key = (key << self.count_bits) | u64::from(solution.count(c).min(n));
        }
        key
    }

    /// The signature a guess produces against itself.
    pub fn self_signature(&self, guess: &Word) -> u64 {
        let mut key = 0_u64;
        for _ in 0..guess.len() {
            key = (key << 1) | 1;
        }
        for &(_, n) in guess.letters() {
            key = (key << self.count_bits) | u64::from(n);
        }
        key
    }
}

/// What a score measures.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Default)]
#[cfg_attr(
    feature = "serde",
    derive(Serialize, Deserialize),
    serde(crate = "serde_crate")
)]
pub enum Objective {
    /// The expected number of solutions left after the guess, with every
    /// remaining solution equally likely.
    #[default]
    Expected,

    /// The number of solutions left after the guess in the worst case.
    Adversarial,
}

/// A word and its score.
#[derive(Clone, Debug, PartialEq)]
pub struct Judgement<'c> {
    pub word: &'c Word,
    pub score: Score,
}

/// Scores guesses against a pool of solutions.
///
/// The cluster map is kept between calls so a pass over many guesses does
/// not allocate for each one.
///
/// # Examples
///
/// ```rust
/// use wordle_solver::{Corpus, Judge, Objective};
///
/// let corpus = Corpus::new(["abcde", "abcdf"], Vec::<&str>::new())?;
/// let pool: Vec<_> = corpus.solutions().iter().collect();
///
/// let mut judge = Judge::new(corpus.layout(), Objective::Expected);
/// // one cluster is the guess itself (counted as 0), the other holds "abcdf"
/// assert_eq!(judge.score(&corpus.solutions()[0], &pool), 0.5);
/// #
/// # Ok::<_, wordle_solver::WordleError>(())
/// ```
#[derive(Debug, Clone)]
pub struct Judge {
    layout: SignatureLayout,
    objective: Objective,
    clusters: HashMap<u64, u32>,
}

impl Judge {
    /// Creates a judge for signatures laid out by `layout`.
    pub fn new(layout: SignatureLayout, objective: Objective) -> Self {
        Judge {
            layout,
            objective,
            clusters: HashMap::new(),
        }
    }

    /// What this judge's scores measure.
    pub fn objective(&self) -> Objective {
        self.objective
    }

    /// Splits `pool` into clusters for `guess` and returns the cluster
    /// sizes, with the cluster of solutions equal to `guess` counted as 0.
    pub fn clusters(&mut self, guess: &Word, pool: &[&Word]) -> Vec<u32> {
        self.fill(guess, pool);
        self.clusters.values().copied().collect()
    }

    /// Scores `guess` against `pool`.
    ///
    /// An empty pool scores 0.
    pub fn score(&mut self, guess: &Word, pool: &[&Word]) -> Score {
        if pool.is_empty() {
            return 0.;
        }

        self.fill(guess, pool);
        let sizes = self.clusters.values().copied();
        let score = match self.objective {
            Objective::Adversarial => sizes.max().unwrap_or(0) as Score,
            Objective::Expected => {
                let sum: u64 = sizes.map(|n| u64::from(n) * u64::from(n)).sum();
                sum as Score / pool.len() as Score
            }
        };

        trace!("{} scores {}", guess, score);
        score
    }

    fn fill(&mut self, guess: &Word, pool: &[&Word]) {
        self.clusters.clear();
        for solution in pool {
            *self
                .clusters
                .entry(self.layout.signature(guess, solution))
                .or_insert(0) += 1;
        }
        // guessing the answer solves the puzzle, which is better than
        // narrowing it down to one
        self.clusters.insert(self.layout.self_signature(guess), 0);
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::Corpus;
    use itertools::Itertools;
    use proptest::prelude::*;

    fn words(list: &[&str]) -> Vec<Word> {
        list.iter().map(|w| Word::new(w)).collect()
    }

    fn score(objective: Objective, guess: &str, pool: &[Word]) -> Score {
        let layout = SignatureLayout::new(Word::new(guess).len()).unwrap();
        let pool: Vec<&Word> = pool.iter().collect();
        Judge::new(layout, objective).score(&Word::new(guess), &pool)
    }

    #[test]
    fn layout_bound_matches_constant() {
        assert!(SignatureLayout::new(MAX_WORD_LENGTH).is_ok());
        assert!(SignatureLayout::new(MAX_WORD_LENGTH + 1).is_err());
        assert!(SignatureLayout::new(MAX_WORD_LENGTH).unwrap().total_bits() <= 64);
        // 0..=7 fits in three bits, 0..=8 does not
        assert_eq!(SignatureLayout::new(7).unwrap().count_bits(), 3);
        assert_eq!(SignatureLayout::new(8).unwrap().count_bits(), 4);
    }

    #[test]
    fn two_word_example() {
        let pool = words(&["abcde", "abcdf"]);
        assert_eq!(score(Objective::Expected, "abcde", &pool), 0.5);
        assert_eq!(score(Objective::Adversarial, "abcde", &pool), 1.);
    }

    #[test]
    fn unique_candidate_scores_zero() {
        let pool = words(&["crane"]);
        assert_eq!(score(Objective::Expected, "crane", &pool), 0.);
        assert_eq!(score(Objective::Adversarial, "crane", &pool), 0.);
    }

    #[test]
    fn empty_pool_scores_zero() {
        assert_eq!(score(Objective::Expected, "crane", &[]), 0.);
        assert_eq!(score(Objective::Adversarial, "crane", &[]), 0.);
    }

    #[test]
    fn uninformative_guess_keeps_one_cluster() {
        let pool = words(&["abcde", "abcdf", "abcdg", "abcdh"]);
        // 'z' never appears and the first four letters match everywhere
        assert_eq!(score(Objective::Expected, "abcdz", &pool), 4.);
        assert_eq!(score(Objective::Adversarial, "abcdz", &pool), 4.);
    }

    #[test]
    fn duplicate_letters_are_clamped() {
        // "llama" only has two l's, so the extra l in "lolly" and "lilly"
        // is invisible and the two share a signature
        let layout = SignatureLayout::new(5).unwrap();
        let guess = Word::new("llama");
        let a = layout.signature(&guess, &Word::new("lolly"));
        let b = layout.signature(&guess, &Word::new("lilly"));
        assert_eq!(a, b);
        let c = layout.signature(&guess, &Word::new("hello"));
        assert_ne!(a, c);
    }

    #[test]
    fn repeated_letter_counts_do_not_collide() {
        // counts up to the full word length must stay distinct
        let layout = SignatureLayout::new(5).unwrap();
        let guess = Word::new("aaaaa");
        let sigs: Vec<u64> = ["bbbbb", "abbbb", "aabbb", "aaabb", "aaaab", "aaaaa"]
            .iter()
            .map(|w| layout.signature(&guess, &Word::new(w)))
            .collect();
        assert!(sigs.iter().all_unique());
        assert_eq!(sigs[5], layout.self_signature(&guess));
    }

    #[test]
    fn self_cluster_is_counted_as_zero() -> crate::Result<()> {
        let corpus = Corpus::new(["crane", "crate", "trace"], Vec::<&str>::new())?;
        let pool: Vec<&Word> = corpus.solutions().iter().collect();
        let mut judge = Judge::new(corpus.layout(), Objective::Expected);
        let sizes = judge.clusters(&corpus.solutions()[0], &pool);
        assert_eq!(sizes.iter().sum::<u32>(), 2);
        assert!(sizes.contains(&0));
        Ok(())
    }

    fn pool_strategy() -> impl Strategy<Value = (String, Vec<String>)> {
        (
            "[abc]{4}",
            proptest::collection::vec("[abc]{4}", 1..30),
        )
    }

    proptest! {
        #[test]
        fn adversarial_bounds(input in pool_strategy()) {
            let (guess, pool) = input;
            let guess = Word::new(&guess);
            let pool: Vec<Word> = pool.iter().map(|w| Word::new(w)).collect();
            let refs: Vec<&Word> = pool.iter().collect();
            let layout = SignatureLayout::new(4).unwrap();

            let mut judge = Judge::new(layout, Objective::Adversarial);
            let worst = judge.score(&guess, &refs);
            let sizes = judge.clusters(&guess, &refs);
            prop_assert_eq!(worst, f64::from(*sizes.iter().max().unwrap()));

            // the guess itself is the only solution the self cluster can hold
            let hits = refs.iter().filter(|w| ***w == guess).count();
            let counted = refs.len() - hits;
            let distinct = refs
                .iter()
                .filter(|w| ***w != guess)
                .map(|w| layout.signature(&guess, w))
                .unique()
                .count();
            if distinct > 0 {
                prop_assert!(worst as usize >= (counted + distinct - 1) / distinct);
            }

            let mut expected = Judge::new(layout, Objective::Expected);
            let mean = expected.score(&guess, &refs);
            prop_assert!(mean >= 0.);
            prop_assert!(mean <= worst);
        }
    }
}
