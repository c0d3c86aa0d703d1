use std::{borrow::Cow, convert::Infallible, fmt, str::FromStr};

use serde::{Deserialize, Serialize};

use super::{letters, AsEmoji, Letter};

/// A submitted guess: every letter paired with how it scored against the
/// answer.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct Guess {
    letters: Vec<(Letter, LetterState)>,
}

impl Guess {
    pub(crate) fn new(word: &str) -> Self {
        let letters = letters(word)
            .map(|letter| (letter, LetterState::Absent))
            .collect();

        Self { letters }
    }

    pub(crate) fn from_parts(letters: Vec<Letter>, states: Vec<LetterState>) -> Self {
        Self {
            letters: letters.into_iter().zip(states).collect(),
        }
    }

    pub fn word(&self) -> String {
        self.letters
            .iter()
            .map(|(letter, _)| letter.as_str())
            .collect()
    }

    pub fn pattern(&self) -> Vec<LetterState> {
        self.letters.iter().map(|(_, state)| *state).collect()
    }

    pub fn is_correct(&self) -> bool {
        self.letters
            .iter()
            .all(|(_, state)| *state == LetterState::Correct)
    }

    pub fn len(&self) -> usize {
        self.letters.len()
    }

    pub fn iter(&self) -> impl Iterator<Item = &(Letter, LetterState)> + '_ {
        self.letters.iter()
    }

    pub(crate) fn iter_mut(&mut self) -> impl Iterator<Item = &mut (Letter, LetterState)> + '_ {
        self.letters.iter_mut()
    }
}

impl AsEmoji for Guess {
    fn as_emoji(&self) -> Cow<str> {
        self.letters
            .iter()
            .map(|(_, state)| state.as_emoji())
            .collect::<String>()
            .into()
    }
}

impl fmt::Display for Guess {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.letters
            .iter()
            .try_for_each(|(_, state)| write!(f, "{state}"))
    }
}

impl PartialEq<&str> for Guess {
    fn eq(&self, other: &&str) -> bool {
        &self.to_string() == other
    }
}

/// How one letter of a guess scored. Variant order doubles as the
/// cumulative keyboard ranking: a later state never replaces a greater one.
#[derive(
    Debug, Default, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize,
)]
#[serde(rename_all = "lowercase")]
pub enum LetterState {
    /// Does not occur, or every occurrence is already claimed.
    #[default]
    Absent,
    /// Occurs elsewhere in the word.
    Present,
    /// Right letter, right position.
    Correct,
}

impl AsEmoji for LetterState {
    fn as_emoji(&self) -> Cow<str> {
        match self {
            Self::Correct => "🟩", // green square
            Self::Present => "🟨", // yellow square
            Self::Absent => "⬜",  // empty square
        }
        .into()
    }
}

impl FromStr for LetterState {
    type Err = Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(match s {
            "O" => Self::Correct,
            "o" => Self::Present,
            "." => Self::Absent,
            _ => Self::default(),
        })
    }
}

impl fmt::Display for LetterState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let notation = match self {
            Self::Correct => "O",
            Self::Present => "o",
            Self::Absent => ".",
        };

        write!(f, "{notation}")
    }
}

#[cfg(test)]
mod tests {
    use std::str::FromStr;

    use paste::paste;
    use pretty_assertions::assert_eq;

    use super::super::Word;
    use super::LetterState;

    macro_rules! string_match {
        ($($name:ident: $word:literal, $guess:literal => $result:expr;)+) => {
            paste! {
                $(
                    #[test]
                    fn [<matches_ $name>]() {
                        let word = Word::from_str($word).unwrap();
                        let guess = word.guess($guess);
                        assert_eq!(guess, $result)
                    }
                )+
            }
        };
    }

    string_match! {
        amber_amber: "amber", "amber" => "OOOOO";
        amber_arbor: "amber", "arbor" => "O.O.O";
        amber_handy: "amber", "handy" => ".o...";
        addra_opals: "addra", "opals" => "..o..";
        mummy_tummy: "mummy", "tummy" => ".OOOO";
        spend_super: "spend", "super" => "O.oo.";
        solve_shoot: "solve", "shoot" => "O.o..";
        event_dealt: "event", "dealt" => ".o..O";

        // a green later in the word claims its letter before any yellow can
        aabbc_ababa: "aabbc", "ababa" => "OooO.";
        // both a's claimed by pass one, so the stray third a scores nothing
        aabbc_aaabb: "aabbc", "aaabb" => "OO.Oo";

        urdu_exact: "آبادی", "آبادی" => "OOOOO";
        // the answer has one alif-nun-ye each; repeats score absent
        urdu_repeats: "کہانی", "انانی" => "..OOO";
        // the answer's single alif goes to the first of the guess's two
        urdu_shifted: "کتابی", "بازار" => "oo...";
    }

    #[test]
    fn notation_round_trips() {
        for state in [
            LetterState::Correct,
            LetterState::Present,
            LetterState::Absent,
        ] {
            assert_eq!(
                LetterState::from_str(&state.to_string()).unwrap(),
                state
            );
        }
    }
}
