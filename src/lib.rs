#![doc = include_str!("../README.md")]

// Required to rename serde
#[cfg(feature = "serde")]
extern crate serde_crate as serde;

use thiserror::Error;

pub mod words;
pub use words::{Corpus, Word};

pub mod feedback;
pub use feedback::{Constraint, Grade};

pub mod judge;
pub use judge::{Judge, Judgement, Objective, Score};

pub mod session;
pub use session::{Session, SessionOptions};

pub mod select;
pub use select::{FastPath, GuessOptions};

pub mod strategy;
pub use strategy::Strategy;

pub mod harness;
pub use harness::{Harness, Record};

pub mod perf;
pub use perf::{Perf, Summary};

#[cfg(test)]
mod mock;

/// The result type used throughout `wordle_solver`.
pub type Result<T, E = WordleError> = std::result::Result<T, E>;

/// The errors that `wordle_solver` can produce.
#[derive(Debug, Error)]
pub enum WordleError {
    #[error("word lists could not be turned into a corpus")]
    Corpus {
        #[from]
        kind: CorpusError,
    },

    #[error("the game session rejected the request")]
    Session {
        #[from]
        kind: SessionError,
    },

    #[error("puzzle encountered error")]
    Puzzle {
        #[from]
        kind: PuzzleError,
    },

    #[error("general IO error")]
    Printing(#[from] std::io::Error),

    #[error("cannot compare a strategy with itself")]
    SelfComparison,

    #[error("the test harness encountered an error")]
    Harness {
        #[from]
        kind: HarnessError,
    },
}

/// Problems with the word lists handed to [`Corpus::new()`].
///
/// None of these produce a partial corpus.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum CorpusError {
    /// The solution list was empty.
    #[error("no possible solutions")]
    NoSolutions,

    /// A word does not have the same length as the first solution.
    #[error("the word \"{word}\" has {found} letters, but all words must have {expected}")]
    LengthMismatch {
        word: String,
        expected: usize,
        found: usize,
    },

    /// The words are too long for an exact cluster signature.
    #[error("unable to calculate exact clusters for {length} letter words (at most {max})")]
    WordTooLong { length: usize, max: usize },
}

/// Usage errors reported by a [`Session`].
///
/// A session that returns one of these has not changed.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum SessionError {
    /// The word is not (or no longer) an allowed guess.
    #[error("\"{0}\" is not an allowed guess")]
    InvalidGuess(String),

    /// The attempt or its feedback does not match the corpus word length.
    #[error("feedback for a {attempt} letter attempt with {grades} grades, but words have {expected} letters")]
    FeedbackLength {
        expected: usize,
        attempt: usize,
        grades: usize,
    },

    /// A feedback string contained a character with no grade.
    #[error("unknown feedback value: {0:?}")]
    UnknownGrade(char),

    /// Every candidate solution has been ruled out.
    #[error("no possible solutions")]
    NoCandidates,
}

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum PuzzleError {
    /// The puzzle has already evaluated the maximum number of guesses.
    #[error("the puzzle has already evaluated {0} guesses")]
    OutOfGuesses(usize),

    /// A hard mode guess ignored feedback from an earlier guess.
    #[error("\"{guess}\" is not consistent with the feedback for \"{previous}\"")]
    InvalidHardmodeGuess { guess: String, previous: String },
}

#[derive(Debug, Error)]
pub enum HarnessError {
    #[error("no strategies have been added to the harness")]
    NoStrategiesAdded,

    /// A strategy returned an error while solving a puzzle.
    #[error("the strategy {name} failed on \"{answer}\"")]
    Strategy {
        name: String,
        answer: String,
        #[source]
        source: Box<WordleError>,
    },

    #[cfg(feature = "serde")]
    #[error("trouble serializing or deserializing a record")]
    Serde(#[from] serde_json::Error),
}
