//! Feedback for guesses and what it says about the answer.

use std::fmt::Display;

use itertools::Itertools;
#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::{words::Word, Result, SessionError};

/// A Wordle "grade" that indicates the correctness of a letter in a guess.
///
/// `Correct` means that the letter is in the correct position. `Present`
/// means that the answer contains the letter, but not in that position.
/// `Absent` means that the answer has no more of that letter than the guess
/// already accounted for.
#[derive(Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Debug, Hash)]
#[cfg_attr(
    feature = "serde",
    derive(Serialize, Deserialize),
    serde(crate = "serde_crate")
)]
pub enum Grade {
    /// The answer does not have this letter here, or anywhere not already
    /// accounted for.
    Absent,

    /// The answer has this letter in a different position.
    Present,

    /// The answer has this letter in this position.
    Correct,
}

impl Grade {
    /// Reads a grade from a feedback character.
    ///
    /// `-`, `a`, `n` and `x` mean [`Grade::Absent`], `~` and `p` mean
    /// [`Grade::Present`], `c` and `y` mean [`Grade::Correct`]. Case is
    /// ignored.
    pub fn from_char(c: char) -> Option<Self> {
        match c.to_ascii_lowercase() {
            '-' | 'a' | 'n' | 'x' => Some(Grade::Absent),
            '~' | 'p' => Some(Grade::Present),
            'c' | 'y' => Some(Grade::Correct),
            _ => None,
        }
    }

    /// The canonical feedback character for this grade.
    pub fn to_char(self) -> char {
        match self {
            Grade::Absent => '-',
            Grade::Present => '~',
            Grade::Correct => 'c',
        }
    }
}

impl Display for Grade {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.to_char())
    }
}

/// Decodes a line of textual feedback, one character per letter.
///
/// Surrounding whitespace is ignored. The length is not checked here; a
/// [`Session`](crate::Session) checks it against its word length.
///
/// # Examples
///
/// ```rust
/// use wordle_solver::{feedback::parse_grades, Grade::*};
///
/// assert_eq!(parse_grades(" C-p~n\n")?, [Correct, Absent, Present, Present, Absent]);
/// assert!(parse_grades("cc?cc").is_err());
/// # Ok::<_, wordle_solver::WordleError>(())
/// ```
pub fn parse_grades(text: &str) -> Result<Vec<Grade>> {
    text.trim()
        .chars()
        .map(|c| Grade::from_char(c).ok_or_else(|| SessionError::UnknownGrade(c).into()))
        .collect()
}

/// Formats grades as feedback text that [`parse_grades()`] reads back.
pub fn format_grades(grades: &[Grade]) -> String {
    grades.iter().map(|g| g.to_char()).collect()
}

/// Grades `guess` against `answer` the way Wordle does.
///
/// Letters in the right position are graded first. The remaining letters
/// of the guess, from left to right, are [`Grade::Present`] while the answer
/// still has unmatched copies of them and [`Grade::Absent`] after that.
/// Both words must have the same length.
///
/// # Examples
///
/// ```rust
/// use wordle_solver::{feedback::grade, Grade::*, Word};
///
/// let grades = grade(&Word::new("spool"), &Word::new("sober"));
/// assert_eq!(grades, [Correct, Absent, Present, Absent, Absent]);
/// ```
pub fn grade(guess: &Word, answer: &Word) -> Vec<Grade> {
    debug_assert_eq!(guess.len(), answer.len());

    let mut res = vec![Grade::Absent; guess.len()];
    let mut unmatched: Vec<(char, u32)> = Vec::new();

    for (i, (&g, &a)) in guess.chars().iter().zip(answer.chars()).enumerate() {
        if g == a {
            res[i] = Grade::Correct;
        } else {
            match unmatched.iter_mut().find(|(c, _)| *c == a) {
                Some((_, n)) => *n += 1,
                None => unmatched.push((a, 1)),
            }
        }
    }

    for (i, &g) in guess.chars().iter().enumerate() {
        if res[i] == Grade::Correct {
            continue;
        }
        if let Some((_, n)) = unmatched.iter_mut().find(|(c, n)| *c == g && *n > 0) {
            *n -= 1;
            res[i] = Grade::Present;
        }
    }

    res
}

#[derive(Clone, Debug, PartialEq, Eq)]
struct LetterBound {
    letter: char,
    min: u32,
    exact: bool,
}

/// What one guess and its feedback say about the answer.
///
/// A word *matches* the constraint when it could have been the answer that
/// produced the feedback:
///
/// 1. positions graded [`Grade::Correct`] hold the guessed letter, and the
///    other positions do not;
/// 2. each letter of the guess occurs at least as many times as it was
///    graded [`Grade::Present`] or [`Grade::Correct`];
/// 3. when some copy of a letter was graded [`Grade::Absent`], the answer
///    has exactly that many, no more.
///
/// # Examples
///
/// ```rust
/// use wordle_solver::{feedback::parse_grades, Constraint, Word};
///
/// let grades = parse_grades("c-c--")?;
/// let constraint = Constraint::new(&Word::new("hello"), &grades);
///
/// assert!(constraint.matches(&Word::new("hilum")));
/// // only one 'l' was graded, and another was graded absent
/// assert!(!constraint.matches(&Word::new("hilly")));
/// # Ok::<_, wordle_solver::WordleError>(())
/// ```
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Constraint {
    positions: Vec<(char, bool)>,
    letters: Vec<LetterBound>,
}

impl Constraint {
    /// Builds the constraint for `attempt` graded with `grades`.
    ///
    /// `grades` should have one entry per letter of `attempt`; extra entries
    /// on either side are ignored.
    pub fn new(attempt: &Word, grades: &[Grade]) -> Self {
        let mut letters: Vec<LetterBound> = Vec::new();
        let positions = attempt
            .chars()
            .iter()
            .zip(grades)
            .map(|(&c, &grade)| {
                let index = match letters.iter().position(|b| b.letter == c) {
                    Some(index) => index,
                    None => {
                        letters.push(LetterBound {
                            letter: c,
                            min: 0,
                            exact: false,
                        });
                        letters.len() - 1
                    }
                };
                let bound = &mut letters[index];
                match grade {
                    Grade::Absent => bound.exact = true,
                    Grade::Present | Grade::Correct => bound.min += 1,
                }
                (c, grade == Grade::Correct)
            })
            .collect();

        Constraint { positions, letters }
    }

    /// Returns true if `word` could be the answer.
    pub fn matches(&self, word: &Word) -> bool {
        self.positions
            .iter()
            .zip(word.chars())
            .all(|(&(c, correct), &w)| (w == c) == correct)
            && self.letters.iter().all(|b| {
                let n = word.count(b.letter);
                n >= b.min && (!b.exact || n == b.min)
            })
    }
}

impl Display for Constraint {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let bounds = self
            .letters
            .iter()
            .map(|b| format!("{}{}{}", b.letter, if b.exact { "=" } else { ">=" }, b.min))
            .join(" ");
        let pattern: String = self
            .positions
            .iter()
            .map(|&(c, correct)| if correct { c } else { '.' })
            .collect();
        write!(f, "{} [{}]", pattern, bounds)
    }
}
