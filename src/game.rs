use std::ops::Not;

use tracing::{debug, warn};

use crate::{
    core::{Guess, Letter, Word, MAX_ROWS, WORD_LEN},
    keyboard::KeyboardStatus,
    validity::Validity,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GameStatus {
    InProgress,
    Won,
    Lost,
}

impl GameStatus {
    pub fn is_over(self) -> bool {
        matches!(self, Self::Won | Self::Lost)
    }
}

/// The row being typed. Letters are kept in reading order; the cursor is
/// the classic countdown of the right-to-left board, `WORD_LEN - 1` for an
/// empty row down to `-1` when every cell is filled.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Row {
    letters: Vec<Letter>,
}

impl Row {
    /// Rebuilds a row from saved letters. Restored rows are capped one
    /// short of full (cursor clamped at zero) so a reload never hands back
    /// a row that could be submitted without fresh input.
    pub(crate) fn from_letters(mut letters: Vec<Letter>) -> Self {
        letters.truncate(WORD_LEN - 1);

        Self { letters }
    }

    pub fn cursor(&self) -> isize {
        WORD_LEN as isize - self.letters.len() as isize - 1
    }

    pub fn is_complete(&self) -> bool {
        self.cursor() == -1
    }

    pub fn letters(&self) -> &[Letter] {
        &self.letters
    }

    pub fn word(&self) -> String {
        self.letters.iter().map(Letter::as_str).collect()
    }

    fn push(&mut self, letter: Letter) -> bool {
        if self.is_complete() {
            return false;
        }

        self.letters.push(letter);
        true
    }

    fn pop(&mut self) -> Option<Letter> {
        self.letters.pop()
    }

    fn clear(&mut self) {
        self.letters.clear();
    }
}

/// What came of a call to [`Game::submit_guess`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SubmitOutcome {
    /// The guess consumed an attempt.
    Accepted { guess: Guess, status: GameStatus },
    /// The validity gate turned the candidate down; nothing consumed.
    NotInWordList,
    /// The validity gate itself failed, which counts as a rejection (fail
    /// closed) but deserves its own notice.
    Unverifiable,
    /// Preconditions not met: game already over, row incomplete, or a
    /// submission still in flight. Silently ignored.
    Ignored,
}

/// One player's game for one answer, and the only owner of its state:
/// every mutation goes through [`Self::input_letter`], [`Self::backspace`]
/// or [`Self::submit_guess`].
#[derive(Debug, Clone)]
pub struct Game {
    answer: Word,
    attempts: Vec<Guess>,
    row: Row,
    keyboard: KeyboardStatus,
    status: GameStatus,
    processing: bool,
}

impl Game {
    pub fn new(answer: Word) -> Self {
        Self {
            answer,
            attempts: Vec::with_capacity(MAX_ROWS),
            row: Row::default(),
            keyboard: KeyboardStatus::default(),
            status: GameStatus::InProgress,
            processing: false,
        }
    }

    /// Rebuilds a game from persisted parts. Status and keyboard are
    /// derived from the attempts, never trusted from storage.
    pub(crate) fn restore(answer: Word, attempts: Vec<Guess>, row: Vec<Letter>) -> Self {
        let status = Self::status_for(&attempts);
        let keyboard = KeyboardStatus::from_guesses(&attempts);
        let row = if status.is_over() {
            Row::default()
        } else {
            Row::from_letters(row)
        };

        Self {
            answer,
            attempts,
            row,
            keyboard,
            status,
            processing: false,
        }
    }

    fn status_for(attempts: &[Guess]) -> GameStatus {
        if attempts.last().is_some_and(Guess::is_correct) {
            GameStatus::Won
        } else if attempts.len() == MAX_ROWS {
            GameStatus::Lost
        } else {
            GameStatus::InProgress
        }
    }

    pub fn answer(&self) -> &Word {
        &self.answer
    }

    pub fn attempts(&self) -> &[Guess] {
        &self.attempts
    }

    /// Index of the row currently being typed.
    pub fn current_row(&self) -> usize {
        self.attempts.len()
    }

    pub fn row(&self) -> &Row {
        &self.row
    }

    pub const fn status(&self) -> GameStatus {
        self.status
    }

    pub const fn keyboard(&self) -> &KeyboardStatus {
        &self.keyboard
    }

    pub const fn is_processing(&self) -> bool {
        self.processing
    }

    /// Puts a letter in the next open cell. Returns whether the letter was
    /// taken: input on a finished game, during a submission, or on a full
    /// row is dropped.
    pub fn input_letter(&mut self, letter: Letter) -> bool {
        if self.status.is_over() || self.is_processing() {
            return false;
        }

        self.row.push(letter)
    }

    /// Clears the most recently filled cell. Returns whether anything was
    /// cleared.
    pub fn backspace(&mut self) -> bool {
        if self.status.is_over() || self.is_processing() {
            return false;
        }

        self.row.pop().is_some()
    }

    /// Submits the typed row as a guess, asking the validity gate first.
    ///
    /// Only one submission can be in flight: the `processing` flag is held
    /// across the gate call and re-entrant submissions (or typing) are
    /// ignored until it drops. Whatever the gate says, input is fully
    /// unlocked afterwards.
    pub async fn submit_guess<V: Validity>(&mut self, validity: &V) -> SubmitOutcome {
        if self.status.is_over() || self.is_processing() || self.row.is_complete().not() {
            return SubmitOutcome::Ignored;
        }

        self.processing = true;
        let candidate = self.row.word();
        let verdict = validity.check(&candidate).await;
        self.processing = false;

        match verdict {
            Ok(true) => self.accept(&candidate),
            Ok(false) => {
                debug!(%candidate, "guess is not a word");
                SubmitOutcome::NotInWordList
            }
            Err(err) => {
                warn!(%err, "validity gate failed, treating the guess as invalid");
                SubmitOutcome::Unverifiable
            }
        }
    }

    fn accept(&mut self, candidate: &str) -> SubmitOutcome {
        let guess = self.answer.guess(candidate);

        self.keyboard.record(&guess);
        self.attempts.push(guess.clone());
        self.row.clear();
        self.status = Self::status_for(&self.attempts);

        debug!(attempt = self.attempts.len(), status = ?self.status, "guess accepted");

        SubmitOutcome::Accepted {
            guess,
            status: self.status,
        }
    }
}

#[cfg(test)]
mod tests {
    use std::{convert::Infallible, str::FromStr, sync::atomic::AtomicUsize};

    use pretty_assertions::assert_eq;

    use crate::{
        core::{letters, Letter, Word, MAX_ROWS, WORD_LEN},
        validity::Validity,
    };

    use super::{Game, GameStatus, SubmitOutcome};

    struct AlwaysValid;

    impl Validity for AlwaysValid {
        type Error = Infallible;

        async fn check(&self, _guess: &str) -> Result<bool, Self::Error> {
            Ok(true)
        }
    }

    struct NeverValid;

    impl Validity for NeverValid {
        type Error = Infallible;

        async fn check(&self, _guess: &str) -> Result<bool, Self::Error> {
            Ok(false)
        }
    }

    struct Offline;

    impl Validity for Offline {
        type Error = std::io::Error;

        async fn check(&self, _guess: &str) -> Result<bool, Self::Error> {
            Err(std::io::Error::from(std::io::ErrorKind::ConnectionRefused))
        }
    }

    /// Counts calls so tests can prove the gate was never consulted.
    #[derive(Default)]
    struct Counting(AtomicUsize);

    impl Counting {
        fn calls(&self) -> usize {
            self.0.load(std::sync::atomic::Ordering::SeqCst)
        }
    }

    impl Validity for Counting {
        type Error = Infallible;

        async fn check(&self, _guess: &str) -> Result<bool, Self::Error> {
            self.0.fetch_add(1, std::sync::atomic::Ordering::SeqCst);
            Ok(true)
        }
    }

    fn game(answer: &str) -> Game {
        Game::new(Word::from_str(answer).unwrap())
    }

    fn type_word(game: &mut Game, word: &str) {
        for letter in letters(word) {
            game.input_letter(letter);
        }
    }

    #[test]
    fn cursor_counts_down_from_right() {
        let mut game = game("آبادی");

        assert_eq!(game.row().cursor(), WORD_LEN as isize - 1);

        game.input_letter(Letter::from("ا"));
        assert_eq!(game.row().cursor(), 3);

        type_word(&mut game, "بجدی");
        assert_eq!(game.row().cursor(), -1);
        assert!(game.row().is_complete());

        // the row is full; further letters fall on the floor
        assert!(!game.input_letter(Letter::from("ا")));

        assert!(game.backspace());
        assert_eq!(game.row().cursor(), 0);
    }

    #[test]
    fn backspace_on_empty_row_does_nothing() {
        let mut game = game("آبادی");

        assert!(!game.backspace());
    }

    #[tokio::test]
    async fn rejected_guess_consumes_no_attempt() {
        let mut game = game("آبادی");

        type_word(&mut game, "ابجدی");
        assert_eq!(game.submit_guess(&NeverValid).await, SubmitOutcome::NotInWordList);

        assert_eq!(game.attempts().len(), 0);
        assert_eq!(game.status(), GameStatus::InProgress);
        // the typed row is untouched; clearing it is the driver's call
        assert_eq!(game.row().word(), "ابجدی");
    }

    #[tokio::test]
    async fn winning_guess_after_a_rejection() {
        let mut game = game("آبادی");

        type_word(&mut game, "ابجدی");
        assert_eq!(game.submit_guess(&NeverValid).await, SubmitOutcome::NotInWordList);

        while game.backspace() {}

        type_word(&mut game, "آبادی");
        let outcome = game.submit_guess(&AlwaysValid).await;

        let SubmitOutcome::Accepted { guess, status } = outcome else {
            panic!("guess should be accepted");
        };

        assert_eq!(guess, "OOOOO");
        assert_eq!(status, GameStatus::Won);
        assert_eq!(game.attempts().len(), 1);
    }

    #[tokio::test]
    async fn gate_failure_is_fail_closed_and_unlocks_input() {
        let mut game = game("آبادی");

        type_word(&mut game, "ابجدی");
        assert_eq!(game.submit_guess(&Offline).await, SubmitOutcome::Unverifiable);

        assert_eq!(game.attempts().len(), 0);
        assert!(!game.is_processing());

        // typing still works afterwards
        assert!(game.backspace());
        assert!(game.input_letter(Letter::from("ی")));
    }

    #[tokio::test]
    async fn incomplete_row_never_reaches_the_gate() {
        let mut game = game("آبادی");
        let gate = Counting::default();

        type_word(&mut game, "ابج");
        assert_eq!(game.submit_guess(&gate).await, SubmitOutcome::Ignored);
        assert_eq!(gate.calls(), 0);
    }

    #[tokio::test]
    async fn sixth_miss_loses_the_game() {
        let mut game = game("آبادی");

        for attempt in 1..=MAX_ROWS {
            type_word(&mut game, "کتابی");
            let outcome = game.submit_guess(&AlwaysValid).await;

            let SubmitOutcome::Accepted { status, .. } = outcome else {
                panic!("guess should be accepted");
            };

            if attempt < MAX_ROWS {
                assert_eq!(status, GameStatus::InProgress);
            } else {
                assert_eq!(status, GameStatus::Lost);
            }
        }

        // terminal: everything is a no-op now
        assert!(!game.input_letter(Letter::from("ا")));
        assert!(!game.backspace());

        type_word(&mut game, "آبادی");
        assert_eq!(game.submit_guess(&AlwaysValid).await, SubmitOutcome::Ignored);
        assert_eq!(game.attempts().len(), MAX_ROWS);
    }

    #[tokio::test]
    async fn won_game_accepts_nothing_further() {
        let mut game = game("آبادی");

        type_word(&mut game, "آبادی");
        game.submit_guess(&AlwaysValid).await;
        assert_eq!(game.status(), GameStatus::Won);

        let gate = Counting::default();
        type_word(&mut game, "کتابی");
        assert_eq!(game.submit_guess(&gate).await, SubmitOutcome::Ignored);
        assert_eq!(gate.calls(), 0);
    }
}
