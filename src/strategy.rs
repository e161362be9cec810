//! Playing whole games against known answers.
//!
//! The [test harness](crate::Harness) hands each [`Strategy`] a [`Puzzle`]
//! and an empty [`Attempts`], and afterwards reads off how many guesses the
//! strategy needed.

use std::fmt::{Debug, Display};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::{
    feedback::{grade, Constraint, Grade},
    words::{Corpus, Word},
    PuzzleError, Result,
};

mod clustering;
pub use clustering::Clustering;

/// The number of guesses Wordle allows.
pub const DEFAULT_MAX_GUESSES: usize = 6;

/// A specific puzzle to solve.
///
/// # Examples
///
/// ```rust
/// use wordle_solver::{strategy::{Attempts, Puzzle}, Grade::*, Word};
///
/// let answer = Word::new("earth");
/// let puzzle = Puzzle::new(&answer);
/// let mut attempts = Attempts::new(6);
///
/// let (grades, correct) = puzzle.check("ratio", &mut attempts)?;
/// assert!(!correct);
/// assert_eq!(grades, [Present, Correct, Present, Absent, Absent]);
/// assert_eq!(attempts.inner(), ["ratio"]);
/// #
/// # Ok::<_, wordle_solver::WordleError>(())
/// ```
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct Puzzle<'c> {
    answer: &'c Word,
}

impl<'c> Puzzle<'c> {
    pub fn new(answer: &'c Word) -> Self {
        Puzzle { answer }
    }

    /// Grades a guess and records it in `attempts`.
    ///
    /// Returns the grades and whether the guess was the answer. Fails
    /// without grading when `attempts` is already full, or when `attempts`
    /// is in hard mode and the guess does not match the feedback of every
    /// earlier guess.
    pub fn check(&self, guess: &str, attempts: &mut Attempts) -> Result<(Vec<Grade>, bool)> {
        let word = Word::new(guess);

        if attempts.hard && !attempts.finished() {
            for previous in attempts.inner() {
                let previous = Word::new(previous);
                let constraint = Constraint::new(&previous, &grade(&previous, self.answer));
                if !constraint.matches(&word) {
                    return Err(PuzzleError::InvalidHardmodeGuess {
                        guess: guess.to_string(),
                        previous: previous.to_string(),
                    }
                    .into());
                }
            }
        }

        attempts.push(guess)?;

        let correct = word == *self.answer;
        Ok((grade(&word, self.answer), correct))
    }

    pub(crate) fn answer(&self) -> &'c Word {
        self.answer
    }
}

/// The guesses made on one puzzle.
#[derive(Clone, Debug, Hash, PartialEq, Eq, PartialOrd, Ord, Default)]
#[cfg_attr(
    feature = "serde",
    derive(Serialize, Deserialize),
    serde(crate = "serde_crate")
)]
pub struct Attempts {
    inner: Vec<String>,
    max: usize,
    hard: bool,
}

impl Attempts {
    /// Creates an empty list allowing `max` guesses.
    pub fn new(max: usize) -> Self {
        Attempts {
            inner: Vec::new(),
            max,
            hard: false,
        }
    }

    /// Makes [`Puzzle::check()`] enforce hard mode rules on these attempts.
    pub fn hard_mode(self, hard: bool) -> Self {
        Attempts { hard, ..self }
    }

    pub fn is_hard_mode(&self) -> bool {
        self.hard
    }

    pub(crate) fn push(&mut self, word: &str) -> Result<usize> {
        if self.finished() {
            return Err(PuzzleError::OutOfGuesses(self.max).into());
        }
        self.inner.push(word.to_string());
        Ok(self.inner.len() - 1)
    }

    /// Returns a slice into the underlying data.
    pub fn inner(&self) -> &[String] {
        self.inner.as_slice()
    }

    /// Returns true if no more guesses are allowed.
    pub fn finished(&self) -> bool {
        self.inner.len() >= self.max
    }

    /// The number of guesses still allowed.
    pub fn remaining(&self) -> usize {
        self.max.saturating_sub(self.inner.len())
    }

    /// Returns true if the last guess was `word`.
    pub fn solved(&self, word: &str) -> bool {
        matches!(self.inner.last(), Some(s) if s == word)
    }
}

impl Display for Attempts {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        if let Some((last, rest)) = self.inner.split_last() {
            for word in rest {
                writeln!(f, "{}", word)?;
            }
            write!(f, "{}", last)?;
        }
        Ok(())
    }
}

/// Trait defining a way of playing Wordle.
///
/// [`Display`] names the strategy in reports, so do not use linebreaks.
pub trait Strategy: Display + Debug + Sync {
    /// Plays `puzzle` until it is solved or `attempts` is full.
    ///
    /// Every guess goes through [`Puzzle::check()`]. Running out of guesses
    /// is not an error; anything else that goes wrong is.
    fn solve(&self, corpus: &Corpus, puzzle: &Puzzle, attempts: &mut Attempts) -> Result<()>;

    /// Provides a version for this strategy.
    ///
    /// This should change whenever the way the strategy plays does.
    fn version(&self) -> &'static str;

    /// Describes if this strategy plays by hard mode rules.
    ///
    /// The [test harness](crate::Harness) checks every guess of a hard mode
    /// strategy against the feedback it has already received.
    fn hardmode(&self) -> bool;
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::WordleError;

    #[test]
    fn attempts_fill_up() -> Result<()> {
        let answer = Word::new("crimp");
        let puzzle = Puzzle::new(&answer);
        let mut attempts = Attempts::new(2);

        let (_, correct) = puzzle.check("props", &mut attempts)?;
        assert!(!correct);
        assert!(!attempts.finished());
        let (grades, correct) = puzzle.check("primp", &mut attempts)?;
        assert!(!correct);
        assert_eq!(grades[0], Grade::Absent);
        assert!(attempts.finished());

        match puzzle.check("crimp", &mut attempts) {
            Err(WordleError::Puzzle {
                kind: PuzzleError::OutOfGuesses(2),
            }) => {}
            other => panic!("unexpected {:?}", other),
        }
        assert_eq!(attempts.inner(), ["props", "primp"]);
        assert!(!attempts.solved("crimp"));
        Ok(())
    }

    #[test]
    fn hard_mode_rejects_ignored_feedback() -> Result<()> {
        let answer = Word::new("crimp");
        let puzzle = Puzzle::new(&answer);
        let mut attempts = Attempts::new(DEFAULT_MAX_GUESSES).hard_mode(true);

        puzzle.check("props", &mut attempts)?;
        // "lints" drops the 'r' that "props" found in place
        match puzzle.check("lints", &mut attempts) {
            Err(WordleError::Puzzle {
                kind: PuzzleError::InvalidHardmodeGuess { guess, previous },
            }) => {
                assert_eq!(guess, "lints");
                assert_eq!(previous, "props");
            }
            other => panic!("unexpected {:?}", other),
        }
        assert_eq!(attempts.inner(), ["props"]);

        puzzle.check("trump", &mut attempts)?;
        let (_, correct) = puzzle.check("crimp", &mut attempts)?;
        assert!(correct);
        Ok(())
    }

    #[test]
    fn easy_mode_allows_anything() -> Result<()> {
        let answer = Word::new("crimp");
        let puzzle = Puzzle::new(&answer);
        let mut attempts = Attempts::new(DEFAULT_MAX_GUESSES);
        puzzle.check("props", &mut attempts)?;
        puzzle.check("lints", &mut attempts)?;
        puzzle.check("props", &mut attempts)?;
        assert_eq!(attempts.inner().len(), 3);
        Ok(())
    }

    #[test]
    fn solved_checks_last_guess() -> Result<()> {
        let answer = Word::new("crimp");
        let puzzle = Puzzle::new(&answer);
        let mut attempts = Attempts::new(DEFAULT_MAX_GUESSES);
        puzzle.check("props", &mut attempts)?;
        let (_, correct) = puzzle.check("crimp", &mut attempts)?;
        assert!(correct);
        assert!(attempts.solved("crimp"));
        assert_eq!(attempts.to_string(), "props\ncrimp");
        Ok(())
    }
}
