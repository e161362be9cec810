//! Choosing what to guess.

use log::debug;
use rand::{seq::SliceRandom, Rng};

use crate::{
    judge::{Judgement, Score},
    session::Session,
    words::Word,
    Result, SessionError,
};

/// Options for a single guess.
///
/// # Examples
///
/// ```rust
/// use wordle_solver::GuessOptions;
///
/// // anything within a quarter of a word of the best expected outcome
/// let options = GuessOptions::new().inferior_score_threshold(0.25);
/// // the last guess should be able to win
/// let last = GuessOptions::new().final_guess(true);
/// ```
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct GuessOptions {
    inferior_score_threshold: Score,
    final_guess: bool,
}

impl GuessOptions {
    /// Creates options that always pick one of the best scoring guesses
    /// from all allowed words.
    pub fn new() -> Self {
        Self::default()
    }

    /// Allows picking any guess scoring at most this much worse than the
    /// best one.
    pub fn inferior_score_threshold(self, inferior_score_threshold: Score) -> Self {
        Self {
            inferior_score_threshold,
            ..self
        }
    }

    /// Only considers words that could be the answer.
    pub fn final_guess(self, final_guess: bool) -> Self {
        Self {
            final_guess,
            ..self
        }
    }

    pub fn is_final_guess(&self) -> bool {
        self.final_guess
    }
}

/// An approximate shortcut for large solution pools.
///
/// Scoring every allowed guess against every remaining solution is the
/// expensive step of a turn. While more than `pool_threshold` solutions
/// remain, a session with a fast path does not score at all: it guesses the
/// opening word if one is set and still allowed, and a random remaining
/// solution otherwise. This trades the quality of early guesses for
/// latency. A final guess only takes the opening word when it could still be
/// the answer. [`Session::judge_guess()`] and [`Session::judge_guesses()`]
/// always score exactly.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct FastPath {
    pool_threshold: usize,
    opening: Option<String>,
}

impl FastPath {
    pub fn new(pool_threshold: usize) -> Self {
        FastPath {
            pool_threshold,
            opening: None,
        }
    }

    /// Sets a precomputed word to guess while the pool is large.
    pub fn opening(self, word: &str) -> Self {
        FastPath {
            opening: Some(word.to_string()),
            ..self
        }
    }

    pub fn pool_threshold(&self) -> usize {
        self.pool_threshold
    }
}

impl<'c> Session<'c> {
    /// Scores a single guess against the remaining solutions.
    ///
    /// Fails if `word` may not be guessed. When `final_guess` is set and
    /// `word` cannot be the answer, the score is [`f64::INFINITY`].
    ///
    /// # Examples
    ///
    /// ```rust
    /// use wordle_solver::{Corpus, SessionOptions};
    ///
    /// let corpus = Corpus::new(["abcde", "abcdf"], ["zzzzz"])?;
    /// let game = corpus.game(SessionOptions::new());
    ///
    /// assert_eq!(game.judge_guess("abcde", false)?, 0.5);
    /// assert_eq!(game.judge_guess("zzzzz", false)?, 2.0);
    /// assert_eq!(game.judge_guess("zzzzz", true)?, f64::INFINITY);
    /// assert!(game.judge_guess("qqqqq", false).is_err());
    /// # Ok::<_, wordle_solver::WordleError>(())
    /// ```
    pub fn judge_guess(&self, word: &str, final_guess: bool) -> Result<Score> {
        let check = self
            .allowed
            .iter()
            .find(|w| w.as_str() == word)
            .ok_or_else(|| SessionError::InvalidGuess(word.to_string()))?;

        if final_guess && !self.solutions.contains(check) {
            return Ok(f64::INFINITY);
        }

        Ok(self.judge().score(check, &self.solutions))
    }

    /// Scores every candidate guess, best first.
    ///
    /// The candidates are the remaining solutions for a final guess and all
    /// allowed words otherwise. Equal scores keep the candidates' order.
    pub fn judge_guesses(&self, final_guess: bool) -> Vec<Judgement<'c>> {
        let candidates = if final_guess {
            &self.solutions
        } else {
            &self.allowed
        };

        let mut judge = self.judge();
        let mut judged: Vec<Judgement<'c>> = candidates
            .iter()
            .map(|&word| Judgement {
                word,
                score: judge.score(word, &self.solutions),
            })
            .collect();
        judged.sort_by(|a, b| a.score.total_cmp(&b.score));
        judged
    }

    /// Picks a guess at random from the ones scoring within the threshold.
    ///
    /// Fails if no solution is consistent with the feedback so far.
    pub fn guess_with<R: Rng + ?Sized>(
        &self,
        rng: &mut R,
        options: GuessOptions,
    ) -> Result<&'c Word> {
        if self.solutions.is_empty() {
            return Err(SessionError::NoCandidates.into());
        }

        if let Some(word) = self.fast_guess(rng, options) {
            return Ok(word);
        }

        let judged = self.judge_guesses(options.final_guess);
        let threshold = judged[0].score + options.inferior_score_threshold;
        let num = judged
            .iter()
            .position(|j| j.score > threshold)
            .unwrap_or(judged.len())
            .max(1);

        let choice = &judged[rng.gen_range(0..num)];
        debug!(
            "guessing {} (score {}, best {}, {} within threshold)",
            choice.word, choice.score, judged[0].score, num
        );
        Ok(choice.word)
    }

    /// [`guess_with()`](Self::guess_with()) using the thread-local random
    /// number generator.
    pub fn guess(&self, options: GuessOptions) -> Result<&'c Word> {
        self.guess_with(&mut rand::thread_rng(), options)
    }

    fn fast_guess<R: Rng + ?Sized>(
        &self,
        rng: &mut R,
        options: GuessOptions,
    ) -> Option<&'c Word> {
        let fast_path = self.options().fast_path_options()?;
        if self.solutions.len() <= fast_path.pool_threshold {
            return None;
        }

        // a final guess has to be able to win
        let pool = if options.final_guess {
            &self.solutions
        } else {
            &self.allowed
        };
        let opening = fast_path
            .opening
            .as_deref()
            .and_then(|o| pool.iter().find(|w| w.as_str() == o));
        let word = match opening {
            Some(&word) => word,
            None => *self.solutions.choose(rng)?,
        };

        debug!(
            "{} solutions left, guessing {} without scoring",
            self.solutions.len(),
            word
        );
        Some(word)
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::{Corpus, SessionOptions, WordleError};
    use rand::{rngs::StdRng, SeedableRng};

    fn corpus() -> Corpus {
        Corpus::new(
            ["crane", "crate", "trace", "grace", "brace", "slate"],
            ["zzzzz", "tarte"],
        )
        .unwrap()
    }

    #[test]
    fn invalid_guess_rejected() {
        let corpus = corpus();
        let game = corpus.game(SessionOptions::new());
        match game.judge_guess("qqqqq", false) {
            Err(WordleError::Session {
                kind: SessionError::InvalidGuess(word),
            }) => assert_eq!(word, "qqqqq"),
            other => panic!("unexpected {:?}", other),
        }
    }

    #[test]
    fn hard_mode_forbids_inconsistent_guesses() -> Result<()> {
        let corpus = corpus();
        let mut game = corpus.game(SessionOptions::new().hard_mode(true));
        assert!(game.judge_guess("zzzzz", false).is_ok());
        game.feedback_str("zzzzz", "-----")?;
        assert!(game.judge_guess("zzzzz", false).is_err());
        assert!(game.judge_guess("crane", false).is_ok());
        Ok(())
    }

    #[test]
    fn judge_guesses_sorted() {
        let corpus = corpus();
        for adversarial in [false, true] {
            let game = corpus.game(SessionOptions::new().adversarial(adversarial));
            for final_guess in [false, true] {
                let judged = game.judge_guesses(final_guess);
                assert_eq!(judged.len(), if final_guess { 6 } else { 8 });
                assert!(judged.windows(2).all(|w| w[0].score <= w[1].score));
                for j in &judged {
                    assert_eq!(game.judge_guess(j.word, final_guess).unwrap(), j.score);
                }
            }
        }
    }

    #[test]
    fn useless_guess_scores_worst() {
        let corpus = corpus();
        let game = corpus.game(SessionOptions::new());
        let judged = game.judge_guesses(false);
        let last = judged.last().unwrap();
        assert_eq!(last.word.as_str(), "zzzzz");
        assert_eq!(last.score, 6.);

        let game = corpus.game(SessionOptions::new().adversarial(true));
        assert_eq!(game.judge_guess("zzzzz", false).unwrap(), 6.);
    }

    #[test]
    fn guess_stays_within_threshold() {
        let corpus = corpus();
        let game = corpus.game(SessionOptions::new());
        let judged = game.judge_guesses(false);
        let best = judged[0].score;
        let mut rng = StdRng::seed_from_u64(218);

        for threshold in [0., 0.5, 10.] {
            let options = GuessOptions::new().inferior_score_threshold(threshold);
            for _ in 0..20 {
                let word = game.guess_with(&mut rng, options).unwrap();
                let score = game.judge_guess(word, false).unwrap();
                assert!(score <= best + threshold);
            }
        }
    }

    #[test]
    fn seeded_guesses_repeat() {
        let corpus = corpus();
        let game = corpus.game(SessionOptions::new());
        let options = GuessOptions::new().inferior_score_threshold(10.);
        let a: Vec<&str> = {
            let mut rng = StdRng::seed_from_u64(7);
            (0..10)
                .map(|_| game.guess_with(&mut rng, options).unwrap().as_str())
                .collect()
        };
        let b: Vec<&str> = {
            let mut rng = StdRng::seed_from_u64(7);
            (0..10)
                .map(|_| game.guess_with(&mut rng, options).unwrap().as_str())
                .collect()
        };
        assert_eq!(a, b);
    }

    #[test]
    fn final_guess_is_a_solution() -> Result<()> {
        let corpus = corpus();
        let mut game = corpus.game(SessionOptions::new());
        game.feedback_str("slate", "--c-c")?;
        let options = GuessOptions::new().final_guess(true).inferior_score_threshold(100.);
        for _ in 0..10 {
            let word = game.guess(options)?;
            assert!(game.possible_solutions().contains(&word.as_str()));
        }
        Ok(())
    }

    #[test]
    fn no_candidates_is_an_error() -> Result<()> {
        let corpus = corpus();
        let mut game = corpus.game(SessionOptions::new());
        game.feedback_str("zzzzz", "ccccc")?;
        match game.guess(GuessOptions::new()) {
            Err(WordleError::Session {
                kind: SessionError::NoCandidates,
            }) => {}
            other => panic!("unexpected {:?}", other),
        }
        Ok(())
    }

    #[test]
    fn last_candidate_is_guessed() -> Result<()> {
        let corpus = corpus();
        let mut game = corpus.game(SessionOptions::new());
        game.feedback_str("crate", "ccc-c")?;
        assert_eq!(game.possible_solutions(), ["crane"]);
        assert_eq!(game.judge_guess("crane", false)?, 0.);
        assert_eq!(game.guess(GuessOptions::new())?.as_str(), "crane");
        Ok(())
    }

    #[test]
    fn fast_path_skips_scoring_for_large_pools() -> Result<()> {
        let corpus = corpus();
        let options = SessionOptions::new().fast_path(FastPath::new(3).opening("zzzzz"));
        let mut game = corpus.game(options);
        let mut rng = StdRng::seed_from_u64(1);

        // six solutions: above the threshold, so the opening is used even
        // though it is the worst guess
        assert_eq!(game.guess_with(&mut rng, GuessOptions::new())?.as_str(), "zzzzz");

        game.feedback_str("slate", "--c-c")?;
        assert!(game.possible_solutions_count() <= 3);
        let word = game.guess_with(&mut rng, GuessOptions::new())?;
        let best = game.judge_guesses(false)[0].score;
        assert_eq!(game.judge_guess(word, false)?, best);
        Ok(())
    }

    #[test]
    fn fast_path_final_guess_stays_in_solutions() -> Result<()> {
        let corpus = Corpus::new(["crane", "crate", "trace", "grace"], ["zzzzz"])?;
        let options = SessionOptions::new().fast_path(FastPath::new(1).opening("zzzzz"));
        let game = corpus.game(options);
        let mut rng = StdRng::seed_from_u64(5);

        assert_eq!(game.guess_with(&mut rng, GuessOptions::new())?.as_str(), "zzzzz");
        for _ in 0..10 {
            let word = game.guess_with(&mut rng, GuessOptions::new().final_guess(true))?;
            assert!(game.possible_solutions().contains(&word.as_str()));
            assert!(game.judge_guess(word, true)?.is_finite());
        }

        // an opening that can still win is kept for the final guess
        let options = SessionOptions::new().fast_path(FastPath::new(1).opening("trace"));
        let game = corpus.game(options);
        let word = game.guess_with(&mut rng, GuessOptions::new().final_guess(true))?;
        assert_eq!(word.as_str(), "trace");
        Ok(())
    }

    #[test]
    fn fast_path_falls_back_to_a_solution() -> Result<()> {
        let corpus = corpus();
        let options = SessionOptions::new().fast_path(FastPath::new(0).opening("qqqqq"));
        let game = corpus.game(options);
        let mut rng = StdRng::seed_from_u64(3);
        for _ in 0..10 {
            let word = game.guess_with(&mut rng, GuessOptions::new())?;
            assert!(game.possible_solutions().contains(&word.as_str()));
        }
        Ok(())
    }
}
