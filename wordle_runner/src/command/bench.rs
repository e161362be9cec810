use std::{fs, path::PathBuf};

use anyhow::Context;
use wordle_solver::{strategy::Clustering, Harness, SessionOptions, Strategy};

use crate::util::WordListArg;

#[derive(Debug, Clone, clap::Args)]
pub(crate) struct BenchArg {
    #[clap(flatten)]
    words: WordListArg,
    /// Number of random solutions to play
    #[arg(long, default_value_t = 100, conflicts_with = "all")]
    num: usize,
    /// Play every solution
    #[arg(long)]
    all: bool,
    /// Guesses allowed per puzzle
    #[arg(long, default_value_t = 6)]
    max_guesses: usize,
    /// Word every strategy opens with
    #[arg(long)]
    first_word: Option<String>,
    /// Write the summaries as JSON to this file
    #[arg(long)]
    json: Option<PathBuf>,
    /// Also print every strategy's guesses for each puzzle
    #[arg(long)]
    table: bool,
}

pub(crate) fn run(arg: &BenchArg) -> anyhow::Result<()> {
    let corpus = arg.words.load()?;

    let strategy = |options: SessionOptions| {
        let strategy = Clustering::new(options);
        match &arg.first_word {
            Some(word) => strategy.first_word(word),
            None => strategy,
        }
    };

    let others: Vec<Box<dyn Strategy>> = vec![
        Box::new(strategy(SessionOptions::new().adversarial(true))),
        Box::new(strategy(SessionOptions::new().hard_mode(true))),
    ];
    let mut harness = Harness::new()
        .verbose()
        .max_guesses(arg.max_guesses)
        .add_baseline(Box::new(strategy(SessionOptions::new())))
        .add_strategies(others);
    harness = if arg.all {
        harness.test_all()
    } else {
        harness.test_num(arg.num)
    };

    let record = harness.run(&corpus)?;
    if arg.table {
        for perf in record.iter() {
            perf.print();
        }
    }
    record.print_report()?;

    if let Some(path) = &arg.json {
        fs::write(path, record.to_json()?)
            .with_context(|| format!("failed to write {}", path.display()))?;
    }

    Ok(())
}
