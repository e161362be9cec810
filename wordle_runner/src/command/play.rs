use std::io::{self, BufRead, Write};

use anyhow::bail;
use wordle_solver::{feedback::parse_grades, FastPath, Grade, GuessOptions, SessionOptions};

use crate::util::WordListArg;

/// Solutions are listed one by one below this count.
const LIST_LIMIT: usize = 50;

#[derive(Debug, Clone, clap::Args)]
pub(crate) struct PlayArg {
    #[clap(flatten)]
    words: WordListArg,
    /// Only suggest guesses consistent with all feedback
    #[arg(long)]
    hard: bool,
    /// Minimize the worst case instead of the expected case
    #[arg(long)]
    adversarial: bool,
    /// How much worse than the best a random guess may score
    #[arg(long, default_value_t = 0.0)]
    threshold: f64,
    /// Skip scoring while more than this many solutions remain
    #[arg(long)]
    fast_path: Option<usize>,
    /// Opening word used by the fast path
    #[arg(long, requires = "fast_path")]
    opening: Option<String>,
}

pub(crate) fn run(arg: &PlayArg) -> anyhow::Result<()> {
    let corpus = arg.words.load()?;

    let mut options = SessionOptions::new()
        .hard_mode(arg.hard)
        .adversarial(arg.adversarial);
    if let Some(pool_threshold) = arg.fast_path {
        let mut fast_path = FastPath::new(pool_threshold);
        if let Some(word) = &arg.opening {
            fast_path = fast_path.opening(word);
        }
        options = options.fast_path(fast_path);
    }
    let guess_options = GuessOptions::new().inferior_score_threshold(arg.threshold);
    let mut game = corpus.game(options);

    println!(
        "Enter feedback as {} characters: '-' absent, '~' present, 'c' correct.",
        game.word_length()
    );
    println!("Prefix it with a word if you played something else. An empty line quits.");

    let stdin = io::stdin();
    let mut lines = stdin.lock().lines();
    loop {
        let n = game.possible_solutions_count();
        if n < LIST_LIMIT {
            println!("Possible: {}", game.possible_solutions().join(" "));
        } else {
            println!("{} possible solutions", n);
        }

        let guess = game.guess(guess_options)?.to_string();
        let (word, grades) = loop {
            print!("Guess {}: ", guess);
            io::stdout().flush()?;

            let line = match lines.next() {
                Some(line) => line?,
                None => return Ok(()),
            };
            match read_input(&line, &guess, game.word_length()) {
                Ok(Input::Quit) => return Ok(()),
                Ok(Input::Feedback { word, grades }) => break (word, grades),
                Err(e) => eprintln!("{:#}", e),
            }
        };

        if grades.iter().all(|&g| g == Grade::Correct) {
            println!("Solved with {}!", word);
            return Ok(());
        }
        if let Err(e) = game.feedback(&word, &grades) {
            eprintln!("{:#}", e);
        }
    }
}

/// One line typed by the player.
#[derive(Debug, PartialEq)]
enum Input {
    Quit,
    Feedback { word: String, grades: Vec<Grade> },
}

/// Reads feedback for `guess`, or for another word typed before it.
fn read_input(line: &str, guess: &str, length: usize) -> anyhow::Result<Input> {
    let (word, feedback) = match line.split_whitespace().collect::<Vec<_>>()[..] {
        [] => return Ok(Input::Quit),
        [feedback] => (guess.to_string(), feedback),
        [word, feedback] => (word.to_lowercase(), feedback),
        _ => bail!("expected feedback, optionally after a word"),
    };

    let grades = parse_grades(feedback)?;
    if grades.len() != length {
        bail!("expected {} grades, got {}", length, grades.len());
    }
    if word.chars().count() != length {
        bail!("\"{}\" does not have {} letters", word, length);
    }

    Ok(Input::Feedback { word, grades })
}
