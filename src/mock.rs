use std::fmt::Display;

use crate::{
    strategy::{Attempts, Puzzle, Strategy},
    Corpus, Result, SessionError,
};

/// Plays a fixed list of guesses, or fails when asked to.
#[derive(Debug, Clone)]
pub(crate) struct Mock {
    guesses: Vec<&'static str>,
    fail: bool,
    hard: bool,
}

impl Mock {
    pub(crate) fn new(guesses: Vec<&'static str>) -> Self {
        Self {
            guesses,
            fail: false,
            hard: false,
        }
    }

    pub(crate) fn hard(self) -> Self {
        Self { hard: true, ..self }
    }

    pub(crate) fn failing() -> Self {
        Self {
            guesses: Vec::new(),
            fail: true,
            hard: false,
        }
    }
}

impl Strategy for Mock {
    fn solve(&self, _corpus: &Corpus, puzzle: &Puzzle, attempts: &mut Attempts) -> Result<()> {
        if self.fail {
            return Err(SessionError::NoCandidates.into());
        }

        for guess in &self.guesses {
            if attempts.finished() {
                break;
            }
            let (_, correct) = puzzle.check(guess, attempts)?;
            if correct {
                break;
            }
        }

        Ok(())
    }

    fn version(&self) -> &'static str {
        "1.2.4"
    }

    fn hardmode(&self) -> bool {
        self.hard
    }
}

impl Display for Mock {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Mock {:?}", self.guesses)
    }
}
