use std::{collections::HashMap, fmt, ops::Index, str::FromStr};

use thiserror::Error;
use tracing::trace;

use super::{letters, Guess, Letter, LetterState, WORD_LEN};

/// The answer word, with a count of how often each letter occurs so
/// duplicate letters in a guess can be scored without double-counting.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Word {
    letters: Vec<Letter>,
    letter_counts: HashMap<Letter, usize>,
}

impl Word {
    /// Scores a guess against this word.
    ///
    /// Two passes over a mutable copy of the letter counts: the first
    /// claims every exact position, the second hands out `Present` only
    /// while unclaimed occurrences remain. The first pass must finish
    /// before the second starts, or a green match later in the word could
    /// be counted again as yellow by an earlier position.
    pub fn guess(&self, word: &str) -> Guess {
        let mut guess = Guess::new(word);
        debug_assert_eq!(guess.len(), self.len());

        let mut remaining = self.letter_counts.clone();

        for (index, (letter, state)) in guess.iter_mut().enumerate() {
            if self[index] == *letter {
                *state = LetterState::Correct;

                let count = remaining.get_mut(letter).expect("answer has letter");
                *count = count.saturating_sub(1);
            }
        }

        for (letter, state) in guess.iter_mut() {
            if *state != LetterState::Correct
                && remaining.get(letter).is_some_and(|count| *count > 0)
            {
                *state = LetterState::Present;
                *remaining.get_mut(letter).expect("answer has letter") -= 1;
            }
        }

        trace!(%guess, answer = %self, "scored guess");

        guess
    }

    pub fn len(&self) -> usize {
        self.letters.len()
    }
}

#[derive(Debug, Error)]
#[error("word `{0}` must have {WORD_LEN} letters but has {}", letters(.0).count())]
pub struct ParseWordError(String);

impl FromStr for Word {
    type Err = ParseWordError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let letters: Vec<Letter> = letters(s).collect();

        if letters.len() != WORD_LEN {
            return Err(ParseWordError(s.to_owned()));
        }

        let mut letter_counts: HashMap<Letter, usize> = HashMap::new();
        for letter in &letters {
            *letter_counts.entry(letter.clone()).or_insert(0) += 1;
        }

        Ok(Self {
            letters,
            letter_counts,
        })
    }
}

impl fmt::Display for Word {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.letters
            .iter()
            .try_for_each(|letter| write!(f, "{letter}"))
    }
}

impl Index<usize> for Word {
    type Output = Letter;

    fn index(&self, index: usize) -> &Self::Output {
        self.letters.index(index)
    }
}
