//! A single game against an unknown answer.

use log::debug;

use crate::{
    feedback::{parse_grades, Constraint, Grade},
    judge::{Judge, Objective},
    select::FastPath,
    words::{Corpus, Word},
    Result, SessionError,
};

/// How a [`Session`] plays.
///
/// Configuration methods consume the options and return new ones.
///
/// # Examples
///
/// ```rust
/// use wordle_solver::SessionOptions;
///
/// let options = SessionOptions::new().hard_mode(true).adversarial(true);
/// assert!(options.is_hard_mode());
/// ```
#[derive(Clone, Debug, Default, PartialEq)]
pub struct SessionOptions {
    hard_mode: bool,
    adversarial: bool,
    fast_path: Option<FastPath>,
}

impl SessionOptions {
    /// Creates options with default configuration.
    ///
    /// Defaults:
    /// 1. easy mode: any allowed word can be guessed
    /// 2. guesses minimize the expected number of remaining solutions
    /// 3. every guess is scored exactly
    pub fn new() -> Self {
        Self::default()
    }

    /// Restricts guesses to words consistent with all feedback so far.
    pub fn hard_mode(self, hard_mode: bool) -> Self {
        Self { hard_mode, ..self }
    }

    /// Scores guesses by their worst case instead of their expected case.
    pub fn adversarial(self, adversarial: bool) -> Self {
        Self {
            adversarial,
            ..self
        }
    }

    /// Skips scoring while many solutions remain. See [`FastPath`].
    pub fn fast_path(self, fast_path: FastPath) -> Self {
        Self {
            fast_path: Some(fast_path),
            ..self
        }
    }

    /// Whether guesses must be consistent with all feedback so far.
    pub fn is_hard_mode(&self) -> bool {
        self.hard_mode
    }

    /// Whether guesses are scored by their worst case.
    pub fn is_adversarial(&self) -> bool {
        self.adversarial
    }

    /// The [`Objective`] guesses are scored with.
    pub fn objective(&self) -> Objective {
        if self.adversarial {
            Objective::Adversarial
        } else {
            Objective::Expected
        }
    }

    pub(crate) fn fast_path_options(&self) -> Option<&FastPath> {
        self.fast_path.as_ref()
    }
}

/// One game in progress.
///
/// A session keeps two pools of words from its [`Corpus`]: the solutions
/// that are still consistent with the feedback received, and the words that
/// may still be guessed. Feedback always narrows the solutions; it narrows
/// the guessable words only in hard mode.
///
/// # Examples
///
/// ```rust
/// use wordle_solver::{Corpus, GuessOptions, SessionOptions};
///
/// let corpus = Corpus::new(["crane", "crate", "slate", "grace"], ["sling"])?;
/// let mut game = corpus.game(SessionOptions::new());
///
/// let first = game.guess(GuessOptions::new())?.to_string();
/// game.feedback_str("crane", "~cc-c")?;
/// assert_eq!(game.possible_solutions(), ["grace"]);
/// assert_eq!(game.guess(GuessOptions::new())?.as_str(), "grace");
/// #
/// # let _ = first;
/// # Ok::<_, wordle_solver::WordleError>(())
/// ```
#[derive(Clone, Debug)]
pub struct Session<'c> {
    corpus: &'c Corpus,
    options: SessionOptions,
    pub(crate) solutions: Vec<&'c Word>,
    pub(crate) allowed: Vec<&'c Word>,
}

impl<'c> Session<'c> {
    /// Starts a game with every solution possible and every word allowed.
    pub fn new(corpus: &'c Corpus, options: SessionOptions) -> Self {
        Session {
            corpus,
            options,
            solutions: corpus.solutions().iter().collect(),
            allowed: corpus.guessable().iter().collect(),
        }
    }

    pub fn corpus(&self) -> &'c Corpus {
        self.corpus
    }

    pub fn options(&self) -> &SessionOptions {
        &self.options
    }

    /// The length of every word in this game.
    pub fn word_length(&self) -> usize {
        self.corpus.word_length()
    }

    /// The number of solutions consistent with all feedback so far.
    pub fn possible_solutions_count(&self) -> usize {
        self.solutions.len()
    }

    /// The solutions consistent with all feedback so far.
    pub fn possible_solutions(&self) -> Vec<&'c str> {
        self.solutions.iter().map(|w| w.as_str()).collect()
    }

    /// The words that may still be guessed.
    pub fn allowed_guesses(&self) -> &[&'c Word] {
        &self.allowed
    }

    pub(crate) fn judge(&self) -> Judge {
        Judge::new(self.corpus.layout(), self.options.objective())
    }

    /// Narrows the pools with the feedback `grades` received for `attempt`.
    ///
    /// `attempt` does not need to be a known word, but it and `grades` must
    /// both have the corpus word length. On error nothing changes.
    pub fn feedback(&mut self, attempt: &str, grades: &[Grade]) -> Result<()> {
        let attempt = Word::new(attempt);
        let expected = self.word_length();
        if attempt.len() != expected || grades.len() != expected {
            return Err(SessionError::FeedbackLength {
                expected,
                attempt: attempt.len(),
                grades: grades.len(),
            }
            .into());
        }

        let constraint = Constraint::new(&attempt, grades);
        let before = self.solutions.len();
        self.solutions.retain(|w| constraint.matches(w));
        if self.options.hard_mode {
            self.allowed.retain(|w| constraint.matches(w));
        }

        debug!(
            "{} ({}) left {} of {} solutions and {} allowed guesses",
            attempt,
            constraint,
            self.solutions.len(),
            before,
            self.allowed.len()
        );

        Ok(())
    }

    /// Like [`feedback()`](Self::feedback()), but reads the grades from text.
    ///
    /// See [`Grade::from_char()`] for the characters understood.
    pub fn feedback_str(&mut self, attempt: &str, grades: &str) -> Result<()> {
        let grades = parse_grades(grades)?;
        self.feedback(attempt, &grades)
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::{feedback::grade, WordleError};
    use proptest::prelude::*;

    fn corpus() -> Corpus {
        Corpus::new(
            ["crane", "crate", "trace", "grace", "slate", "hello"],
            ["sling", "hilly", "cater"],
        )
        .unwrap()
    }

    fn session_error(result: Result<()>) -> SessionError {
        match result {
            Err(WordleError::Session { kind }) => kind,
            other => panic!("expected a session error, got {:?}", other),
        }
    }

    #[test]
    fn new_session_holds_everything() {
        let corpus = corpus();
        let game = corpus.game(SessionOptions::new());
        assert_eq!(game.possible_solutions_count(), 6);
        assert_eq!(game.allowed_guesses().len(), 9);
        assert_eq!(game.word_length(), 5);
    }

    #[test]
    fn easy_mode_keeps_allowed() -> Result<()> {
        let corpus = corpus();
        let mut game = corpus.game(SessionOptions::new());
        game.feedback_str("sling", "-----")?;
        assert_eq!(game.possible_solutions(), ["crate", "trace"]);
        assert_eq!(game.allowed_guesses().len(), 9);
        Ok(())
    }

    #[test]
    fn hard_mode_narrows_allowed() -> Result<()> {
        let corpus = corpus();
        let mut game = corpus.game(SessionOptions::new().hard_mode(true));
        game.feedback_str("sling", "-----")?;
        let allowed: Vec<&str> = game.allowed_guesses().iter().map(|w| w.as_str()).collect();
        assert_eq!(allowed, ["crate", "trace", "cater"]);
        Ok(())
    }

    #[test]
    fn wrong_lengths_change_nothing() {
        let corpus = corpus();
        let mut game = corpus.game(SessionOptions::new().hard_mode(true));

        let kind = session_error(game.feedback_str("hell", "----"));
        assert_eq!(
            kind,
            SessionError::FeedbackLength {
                expected: 5,
                attempt: 4,
                grades: 4
            }
        );
        let kind = session_error(game.feedback_str("hello", "---"));
        assert!(matches!(kind, SessionError::FeedbackLength { grades: 3, .. }));
        let kind = session_error(game.feedback_str("hello", "--?--"));
        assert_eq!(kind, SessionError::UnknownGrade('?'));

        assert_eq!(game.possible_solutions_count(), 6);
        assert_eq!(game.allowed_guesses().len(), 9);
    }

    #[test]
    fn hello_example() -> Result<()> {
        let corpus = Corpus::new(["hello", "hilly", "hilum", "halal"], Vec::<&str>::new())?;
        let mut game = corpus.game(SessionOptions::new());
        game.feedback_str("hello", "c-c--")?;
        assert_eq!(game.possible_solutions(), ["hilum"]);
        Ok(())
    }

    #[test]
    fn contradictory_feedback_empties_solutions() -> Result<()> {
        let corpus = corpus();
        let mut game = corpus.game(SessionOptions::new());
        game.feedback_str("zzzzz", "ccccc")?;
        assert_eq!(game.possible_solutions_count(), 0);
        Ok(())
    }

    proptest! {
        #[test]
        fn feedback_shrinks_soundly(
            answer in 0_usize..27,
            guesses in proptest::collection::vec(0_usize..27, 1..4),
            hard in any::<bool>(),
        ) {
            let all: Vec<String> = itertools::iproduct!("abc".chars(), "abc".chars(), "abc".chars())
                .map(|(a, b, c)| [a, b, c].iter().collect())
                .collect();
            let corpus = Corpus::new(&all, Vec::<&str>::new()).unwrap();
            let answer = &corpus.solutions()[answer];
            let mut game = corpus.game(SessionOptions::new().hard_mode(hard));

            for g in guesses {
                let guess = &corpus.solutions()[g];
                let before = game.possible_solutions();
                game.feedback(guess, &grade(guess, answer)).unwrap();
                let after = game.possible_solutions();

                prop_assert!(after.iter().all(|w| before.contains(w)));
                prop_assert!(after.contains(&answer.as_str()));
                if hard {
                    prop_assert!(game.allowed_guesses().contains(&answer));
                } else {
                    prop_assert_eq!(game.allowed_guesses().len(), all.len());
                }
            }
        }
    }
}
