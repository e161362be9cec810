use clap::{Parser, Subcommand};

use self::{bench::BenchArg, play::PlayArg};

mod bench;
mod play;

#[derive(Debug, Clone, Parser)]
#[command(author, version, about, long_about = None)]
pub struct CommandArgs {
    /// What mode to run the program in
    #[command(subcommand)]
    mode: Mode,
}

#[derive(Debug, Clone, Subcommand)]
enum Mode {
    /// Suggest guesses for a game played elsewhere
    Play(#[clap(flatten)] PlayArg),
    /// Measure the solver against every known solution
    Bench(#[clap(flatten)] BenchArg),
}

pub fn run() -> anyhow::Result<()> {
    let args = CommandArgs::parse();
    match args.mode {
        Mode::Play(arg) => play::run(&arg)?,
        Mode::Bench(arg) => bench::run(&arg)?,
    }
    Ok(())
}
