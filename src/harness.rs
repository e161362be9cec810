//! The test harness for running Wordle strategies.

use std::ops::Deref;

use either::Either;
#[cfg(feature = "fancy")]
use indicatif::ProgressBar;
use log::info;
use rand::seq::index::sample;
#[cfg(feature = "parallel")]
use rayon::prelude::*;

use crate::{
    perf::Perf,
    strategy::{Attempts, Puzzle, Strategy, DEFAULT_MAX_GUESSES},
    words::Corpus,
    HarnessError, Result, Summary, WordleError,
};

/// A test harness that can run many strategies on many puzzles.
///
/// When you want to test your strategies, create a new test harness
/// with [`new()`](Harness::new()). You can then configure it using various
/// methods. Note that these configuration methods consume the existing
/// [`Harness`] and return a new one.
///
/// # Examples
///
/// ```rust
/// use wordle_solver::{strategy::Clustering, Corpus, Harness, SessionOptions};
///
/// let corpus = Corpus::new(["crane", "crate", "trace", "grace"], ["slate"])?;
/// let harness = Harness::new()
///     .quiet()
///     .add_strategy(Box::new(Clustering::new(SessionOptions::new())))
///     .test_num(3);
///
/// let record = harness.run(&corpus)?;
/// assert_eq!(record[0].num_tried(), 3);
/// #
/// # Ok::<_, wordle_solver::WordleError>(())
/// ```
#[derive(Debug)]
pub struct Harness {
    strategies: Vec<Box<dyn Strategy>>,
    verbose: bool,
    num_puzzles: Option<usize>,
    baseline: Option<usize>,
    max_guesses: usize,
}

impl Default for Harness {
    fn default() -> Self {
        Harness {
            strategies: Vec::new(),
            verbose: false,
            num_puzzles: Some(100),
            baseline: None,
            max_guesses: DEFAULT_MAX_GUESSES,
        }
    }
}

impl Harness {
    /// Creates a new test harness with default configuration.
    ///
    /// Defaults:
    /// 1. tests no strategies
    /// 2. quiet mode
    /// 3. runs each strategy on 100 puzzles chosen at random
    /// 4. does not compare against a baseline
    /// 5. allows six guesses per puzzle
    pub fn new() -> Self {
        Self::default()
    }

    /// Makes the harness verbose while testing.
    ///
    /// With the `fancy` feature this shows a progress bar.
    pub fn verbose(self) -> Self {
        Harness {
            verbose: true,
            ..self
        }
    }

    /// Makes the harness silent while testing.
    pub fn quiet(self) -> Self {
        Harness {
            verbose: false,
            ..self
        }
    }

    /// Adds a strategy to the harness for testing.
    pub fn add_strategy(self, strat: Box<dyn Strategy>) -> Self {
        let mut strategies = self.strategies;
        strategies.push(strat);
        Harness { strategies, ..self }
    }

    /// Adds a [`Vec`] of strategies to the harness for testing.
    pub fn add_strategies(self, strats: Vec<Box<dyn Strategy>>) -> Self {
        let mut strategies = self.strategies;
        strategies.extend(strats);
        Harness { strategies, ..self }
    }

    /// Adds a strategy to the harness for testing and sets it as the baseline
    /// for comparison.
    pub fn add_baseline(self, strat: Box<dyn Strategy>) -> Self {
        self.add_strategy(strat).and_baseline()
    }

    /// Sets the most recently added strategy as the baseline for comparisons.
    ///
    /// Does nothing if no strategy has been added yet.
    pub fn and_baseline(self) -> Self {
        Self {
            baseline: self.strategies.len().checked_sub(1),
            ..self
        }
    }

    /// Sets the harness to test each strategy on every solution in the corpus.
    pub fn test_all(self) -> Self {
        Harness {
            num_puzzles: None,
            ..self
        }
    }

    /// Sets the harness to test each strategy on `n` random solutions.
    ///
    /// `n` is capped at the number of solutions when the harness runs.
    pub fn test_num(self, n: usize) -> Self {
        Harness {
            num_puzzles: Some(n),
            ..self
        }
    }

    /// Sets how many guesses each strategy gets per puzzle.
    pub fn max_guesses(self, max_guesses: usize) -> Self {
        Harness {
            max_guesses,
            ..self
        }
    }

    /// Runs the harness and produces performances for each strategy.
    ///
    /// The [`Perf`]s will be in the same order as the strategies were added
    /// to the harness. The first error a strategy returns stops the run,
    /// including a hard mode strategy making a guess that ignores earlier
    /// feedback.
    pub fn run(&self, corpus: &Corpus) -> Result<Record> {
        if self.strategies.is_empty() {
            return Err(HarnessError::NoStrategiesAdded.into());
        }

        let total = corpus.solutions().len();
        let answers: Vec<usize> = match self.num_puzzles {
            Some(n) => Either::Left(sample(&mut rand::thread_rng(), total, n.min(total)).into_iter()),
            None => Either::Right(0..total),
        }
        .collect();

        info!(
            "running {} strategies on {} of {} solutions",
            self.strategies.len(),
            answers.len(),
            total
        );

        let progress = Progress::new(self.verbose, answers.len());
        let run = |&i: &usize| -> Result<Vec<Attempts>> {
            let attempts = self.run_inner(corpus, i);
            progress.inc();
            attempts
        };

        #[cfg(feature = "parallel")]
        let results = answers.par_iter().map(run).collect::<Result<Vec<_>>>()?;
        #[cfg(not(feature = "parallel"))]
        let results = answers.iter().map(run).collect::<Result<Vec<_>>>()?;

        progress.finish();

        let mut perfs: Vec<Perf> = self
            .strategies
            .iter()
            .map(|strat| Perf::new(strat.as_ref(), self.max_guesses))
            .collect();
        for (&i, attempts) in answers.iter().zip(results) {
            let answer = corpus.solutions()[i].to_string();
            for (perf, attempts) in perfs.iter_mut().zip(attempts) {
                perf.tries.push((answer.clone(), attempts));
            }
        }

        Ok(Record::new(perfs, self.baseline))
    }

    fn run_inner(&self, corpus: &Corpus, index: usize) -> Result<Vec<Attempts>> {
        let puzzle = Puzzle::new(&corpus.solutions()[index]);

        self.strategies
            .iter()
            .map(|strategy| {
                let mut attempts =
                    Attempts::new(self.max_guesses).hard_mode(strategy.hardmode());
                strategy
                    .solve(corpus, &puzzle, &mut attempts)
                    .map_err(|e| HarnessError::Strategy {
                        name: strategy.to_string(),
                        answer: puzzle.answer().to_string(),
                        source: Box::new(e),
                    })?;
                Ok(attempts)
            })
            .collect()
    }
}

/// A progress bar when the `fancy` feature is on, nothing otherwise.
struct Progress {
    #[cfg(feature = "fancy")]
    bar: ProgressBar,
}

impl Progress {
    #[cfg(feature = "fancy")]
    fn new(verbose: bool, len: usize) -> Self {
        let bar = if verbose {
            ProgressBar::new(len as u64)
        } else {
            ProgressBar::hidden()
        };
        Progress { bar }
    }

    #[cfg(not(feature = "fancy"))]
    fn new(_verbose: bool, _len: usize) -> Self {
        Progress {}
    }

    fn inc(&self) {
        #[cfg(feature = "fancy")]
        self.bar.inc(1);
    }

    fn finish(&self) {
        #[cfg(feature = "fancy")]
        self.bar.finish_and_clear();
    }
}

/// The performances of every strategy from one harness run.
#[derive(Debug, Clone, Default)]
pub struct Record {
    perfs: Vec<Perf>,
    baseline: Option<usize>,
}

impl Deref for Record {
    type Target = [Perf];

    fn deref(&self) -> &Self::Target {
        &self.perfs
    }
}

impl Record {
    fn new(perfs: Vec<Perf>, baseline: impl Into<Option<usize>>) -> Self {
        Self {
            perfs,
            baseline: baseline.into(),
        }
    }

    /// The performance every other strategy is compared against, if any.
    pub fn baseline(&self) -> Option<&Perf> {
        self.baseline.and_then(|n| self.perfs.get(n))
    }

    /// Summarizes every performance, in the order the strategies were added.
    pub fn summaries(&self) -> Vec<Summary<'_>> {
        self.perfs.iter().map(Perf::to_summary).collect()
    }

    pub fn print_report(&self) -> Result<()> {
        let summaries = self.summaries();
        let baseline = self.baseline.and_then(|n| summaries.get(n));

        for (i, summary) in summaries.iter().enumerate() {
            let options = Summary::print_options().histogram(true);
            match baseline {
                Some(baseline) if Some(i) != self.baseline => {
                    match summary.print(options.clone().compare(baseline)) {
                        Err(WordleError::SelfComparison) => summary.print(options)?,
                        other => other?,
                    }
                }
                _ => summary.print(options)?,
            }
        }

        Ok(())
    }

    /// Serializes every summary as a JSON array.
    #[cfg(feature = "serde")]
    pub fn to_json(&self) -> Result<String> {
        serde_json::to_string_pretty(&self.summaries())
            .map_err(|e| WordleError::from(HarnessError::from(e)))
    }
}
