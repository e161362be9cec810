//! Word lists and their encoded form.

use std::{collections::HashSet, fmt::Display, hash::Hash, ops::Deref};

use log::debug;

use crate::{
    judge::SignatureLayout,
    session::{Session, SessionOptions},
    CorpusError, Result,
};

/// A word together with its letter multiset.
///
/// The multiset lists each distinct letter once, in the order the letters
/// first appear, with the number of times it occurs. It is computed when the
/// word is created and never again.
///
/// # Examples
///
/// ```rust
/// use wordle_solver::Word;
///
/// let word = Word::new("hello");
/// assert_eq!(word.len(), 5);
/// assert_eq!(word.letters(), &[('h', 1), ('e', 1), ('l', 2), ('o', 1)]);
/// assert_eq!(word.count('l'), 2);
/// assert_eq!(word.count('z'), 0);
/// ```
#[derive(Clone, Debug)]
pub struct Word {
    text: String,
    chars: Box<[char]>,
    letters: Box<[(char, u32)]>,
}

impl Word {
    /// Encodes a word.
    pub fn new(text: &str) -> Self {
        let chars: Box<[char]> = text.chars().collect();

        let mut letters: Vec<(char, u32)> = Vec::new();
        for &c in chars.iter() {
            match letters.iter_mut().find(|(l, _)| *l == c) {
                Some((_, n)) => *n += 1,
                None => letters.push((c, 1)),
            }
        }

        Word {
            text: text.to_string(),
            chars,
            letters: letters.into_boxed_slice(),
        }
    }

    /// The word as a string slice.
    pub fn as_str(&self) -> &str {
        &self.text
    }

    /// The number of characters in the word.
    #[allow(clippy::len_without_is_empty)]
    pub fn len(&self) -> usize {
        self.chars.len()
    }

    /// The characters of the word, by position.
    pub fn chars(&self) -> &[char] {
        &self.chars
    }

    /// The distinct letters of the word with their counts.
    pub fn letters(&self) -> &[(char, u32)] {
        &self.letters
    }

    /// The number of times `c` occurs in the word.
    pub fn count(&self, c: char) -> u32 {
        self.letters
            .iter()
            .find(|(l, _)| *l == c)
            .map_or(0, |&(_, n)| n)
    }
}

impl PartialEq for Word {
    fn eq(&self, other: &Self) -> bool {
        self.text == other.text
    }
}

impl Eq for Word {}

impl PartialOrd for Word {
    fn partial_cmp(&self, other: &Self) -> Option<std::cmp::Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Word {
    fn cmp(&self, other: &Self) -> std::cmp::Ordering {
        self.text.cmp(&other.text)
    }
}

impl Hash for Word {
    fn hash<H: std::hash::Hasher>(&self, state: &mut H) {
        self.text.hash(state)
    }
}

impl Deref for Word {
    type Target = str;

    fn deref(&self) -> &Self::Target {
        &self.text
    }
}

impl Display for Word {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.text)
    }
}

/// The validated, encoded word lists a game is played over.
///
/// A corpus is built once and then only read. Any number of
/// [`Session`]s, on any number of threads, can borrow the same corpus.
///
/// # Examples
///
/// ```rust
/// use wordle_solver::{Corpus, CorpusError, WordleError};
///
/// let corpus = Corpus::new(["crane", "slate"], ["aahed"])?;
/// assert_eq!(corpus.word_length(), 5);
/// assert_eq!(corpus.guessable().len(), 3);
///
/// assert!(matches!(
///     Corpus::new(["crane", "tea"], Vec::<&str>::new()),
///     Err(WordleError::Corpus { kind: CorpusError::LengthMismatch { .. } })
/// ));
/// #
/// # Ok::<_, wordle_solver::WordleError>(())
/// ```
#[derive(Debug, Clone)]
pub struct Corpus {
    length: usize,
    layout: SignatureLayout,
    solutions: Vec<Word>,
    allowed: Vec<Word>,
    // solutions first, then allowed words not already listed
    guessable: Vec<Word>,
}

impl Corpus {
    /// Validates and encodes the solution and allowed-guess lists.
    ///
    /// Fails if there are no solutions, if the words do not all have the
    /// same length, or if that length is longer than
    /// [`MAX_WORD_LENGTH`](crate::judge::MAX_WORD_LENGTH).
    pub fn new<S, A>(solutions: S, allowed: A) -> Result<Self>
    where
        S: IntoIterator,
        S::Item: AsRef<str>,
        A: IntoIterator,
        A::Item: AsRef<str>,
    {
        let solutions: Vec<Word> = solutions
            .into_iter()
            .map(|w| Word::new(w.as_ref()))
            .collect();
        let allowed: Vec<Word> = allowed
            .into_iter()
            .map(|w| Word::new(w.as_ref()))
            .collect();

        let length = solutions.first().ok_or(CorpusError::NoSolutions)?.len();
        let layout = SignatureLayout::new(length)?;

        if let Some(word) = solutions
            .iter()
            .chain(allowed.iter())
            .find(|w| w.len() != length)
        {
            return Err(CorpusError::LengthMismatch {
                word: word.to_string(),
                expected: length,
                found: word.len(),
            }
            .into());
        }

        let mut seen = HashSet::new();
        let guessable: Vec<Word> = solutions
            .iter()
            .chain(allowed.iter())
            .filter(|w| seen.insert(w.as_str()))
            .cloned()
            .collect();

        debug!(
            "corpus of {} letter words: {} solutions, {} guessable",
            length,
            solutions.len(),
            guessable.len()
        );

        Ok(Corpus {
            length,
            layout,
            solutions,
            allowed,
            guessable,
        })
    }

    /// The length every word in the corpus has.
    pub fn word_length(&self) -> usize {
        self.length
    }

    /// The signature layout for words of this corpus.
    pub fn layout(&self) -> SignatureLayout {
        self.layout
    }

    /// The words that can be the answer.
    pub fn solutions(&self) -> &[Word] {
        &self.solutions
    }

    /// The extra words that can be guessed but are never the answer.
    pub fn allowed(&self) -> &[Word] {
        &self.allowed
    }

    /// Every distinct word that can be guessed, solutions first.
    pub fn guessable(&self) -> &[Word] {
        &self.guessable
    }

    /// Looks up a guessable word by its text.
    pub fn find(&self, text: &str) -> Option<&Word> {
        self.guessable.iter().find(|w| w.as_str() == text)
    }

    /// Starts a new game over this corpus.
    pub fn game(&self, options: SessionOptions) -> Session<'_> {
        Session::new(self, options)
    }
}
