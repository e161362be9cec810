use std::{fs, path::PathBuf};

use anyhow::Context;
use log::info;
use wordle_solver::Corpus;

/// Where the word lists come from.
#[derive(Debug, Clone, clap::Args)]
pub(crate) struct WordListArg {
    /// File of possible solutions, one word per line
    #[arg(long)]
    solutions: PathBuf,
    /// File of extra allowed guesses, one word per line
    #[arg(long)]
    allowed: Option<PathBuf>,
}

impl WordListArg {
    pub(crate) fn load(&self) -> anyhow::Result<Corpus> {
        let solutions = read_words(&self.solutions)?;
        let allowed = match &self.allowed {
            Some(path) => read_words(path)?,
            None => Vec::new(),
        };
        info!(
            "loaded {} solutions and {} allowed words",
            solutions.len(),
            allowed.len()
        );
        Ok(Corpus::new(&solutions, &allowed)?)
    }
}

/// Reads one lower-cased word per line, skipping blank lines.
fn read_words(path: &PathBuf) -> anyhow::Result<Vec<String>> {
    let text = fs::read_to_string(path)
        .with_context(|| format!("failed to read word list {}", path.display()))?;
    Ok(text
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .map(str::to_lowercase)
        .collect())
}
