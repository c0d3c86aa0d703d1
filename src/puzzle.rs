use std::str::FromStr;

use chrono::{Datelike, Local, NaiveDate};
use rand::{rngs::StdRng, seq::SliceRandom, SeedableRng};
use tracing::debug;

use crate::{core::Word, words_list::WordsList};

/// The shared puzzle for one calendar day.
///
/// The answer is drawn with a date-seeded RNG, so every player (and every
/// reload) lands on the same word for the same day without any server
/// coordination.
#[derive(Debug, Clone)]
pub struct DailyPuzzle {
    date: NaiveDate,
    answer: Word,
}

impl DailyPuzzle {
    pub fn today(words: &WordsList) -> Self {
        Self::for_date(Local::now().date_naive(), words)
    }

    pub fn for_date(date: NaiveDate, words: &WordsList) -> Self {
        let seed = i64::from(date.year()) * 10_000
            + i64::from(date.month()) * 100
            + i64::from(date.day());

        let mut rng = StdRng::seed_from_u64(seed as u64);

        let word = words
            .words()
            .choose(&mut rng)
            .expect("words list is never empty once loaded");

        let answer = Word::from_str(word).expect("loader keeps only words of the right length");

        debug!(%date, "picked the daily word");

        Self { date, answer }
    }

    pub fn date(&self) -> NaiveDate {
        self.date
    }

    pub fn answer(&self) -> &Word {
        &self.answer
    }
}
