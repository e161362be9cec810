//! The session-based solver as a [`Strategy`].

use std::fmt::Display;

use crate::{
    select::GuessOptions,
    session::SessionOptions,
    strategy::{Attempts, Puzzle, Strategy},
    words::Corpus,
    Result,
};

/// A Wordle strategy that guesses whatever best splits the remaining
/// solutions into small clusters.
///
/// Each turn it asks a [`Session`](crate::Session) for a guess and feeds the
/// puzzle's grades back into it. On the last allowed guess it only
/// considers words that could still be the answer.
///
/// # Examples
///
/// ```rust
/// use wordle_solver::{
///     strategy::{Attempts, Clustering, Puzzle},
///     Corpus, SessionOptions, Strategy,
/// };
///
/// let corpus = Corpus::new(["crane", "crate", "trace", "grace"], Vec::<&str>::new())?;
/// let strategy = Clustering::new(SessionOptions::new().hard_mode(true));
///
/// let puzzle = Puzzle::new(&corpus.solutions()[3]);
/// let mut attempts = Attempts::new(6);
/// strategy.solve(&corpus, &puzzle, &mut attempts)?;
/// assert!(attempts.solved("grace"));
/// #
/// # Ok::<_, wordle_solver::WordleError>(())
/// ```
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Clustering {
    session: SessionOptions,
    guess: GuessOptions,
    first_word: Option<String>,
}

impl Clustering {
    pub fn new(session: SessionOptions) -> Self {
        Clustering {
            session,
            ..Self::default()
        }
    }

    /// Sets the options used for every guess but the last.
    pub fn guess_options(self, guess: GuessOptions) -> Self {
        Clustering { guess, ..self }
    }

    /// Always opens with `word` instead of scoring the full pool.
    pub fn first_word(self, word: &str) -> Self {
        Clustering {
            first_word: Some(word.to_string()),
            ..self
        }
    }
}

impl Strategy for Clustering {
    fn solve(&self, corpus: &Corpus, puzzle: &Puzzle, attempts: &mut Attempts) -> Result<()> {
        let mut game = corpus.game(self.session.clone());

        while !attempts.finished() {
            let guess = match &self.first_word {
                Some(word) if attempts.inner().is_empty() => word.as_str(),
                _ => {
                    let last = attempts.remaining() == 1;
                    let options = self.guess.final_guess(last || self.guess.is_final_guess());
                    game.guess(options)?.as_str()
                }
            };

            let (grades, correct) = puzzle.check(guess, attempts)?;
            if correct {
                break;
            }
            game.feedback(guess, &grades)?;
        }

        Ok(())
    }

    fn version(&self) -> &'static str {
        "0.3.0"
    }

    fn hardmode(&self) -> bool {
        self.session.is_hard_mode()
    }
}

impl Display for Clustering {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "wordle_solver::Clustering")?;
        if self.session.is_adversarial() {
            write!(f, " (adversarial)")?;
        }
        if self.session.is_hard_mode() {
            write!(f, " (hard)")?;
        }
        if let Some(word) = &self.first_word {
            write!(f, " (start: {})", word)?;
        }
        Ok(())
    }
}
