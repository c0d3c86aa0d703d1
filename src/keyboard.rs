use std::collections::HashMap;

use crate::core::{Guess, Letter, LetterState};

/// Best status ever observed for each letter, across every accepted guess.
///
/// Purely a fold over the attempts list: recomputing it from scratch gives
/// the same map as recording guesses one at a time, so a restored session
/// colors its keyboard identically without replaying anything. Entries only
/// upgrade; a letter that reached `Correct` stays `Correct`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct KeyboardStatus {
    keys: HashMap<Letter, LetterState>,
}

impl KeyboardStatus {
    pub fn from_guesses(guesses: &[Guess]) -> Self {
        let mut keyboard = Self::default();

        for guess in guesses {
            keyboard.record(guess);
        }

        keyboard
    }

    pub fn record(&mut self, guess: &Guess) {
        for (letter, state) in guess.iter() {
            self.keys
                .entry(letter.clone())
                .and_modify(|best| *best = (*best).max(*state))
                .or_insert(*state);
        }
    }

    /// Every letter played so far with its best status, in no particular
    /// order. This is the whole rendering contract: the display layer
    /// colors keys from this map and never inspects individual guesses.
    pub fn iter(&self) -> impl Iterator<Item = (&Letter, LetterState)> + '_ {
        self.keys.iter().map(|(letter, state)| (letter, *state))
    }
}
