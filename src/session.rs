use std::{
    collections::HashMap,
    fs, io,
    ops::Not,
    path::PathBuf,
};

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::{debug, instrument, trace, warn};

use crate::{
    core::{Guess, Letter, LetterState, Word},
    game::Game,
    keyboard::KeyboardStatus,
};

const FILE_PREFIX: &str = "session-";
const FILE_SUFFIX: &str = ".json";

/// Cumulative flags for one keyboard key, in the shape the web client
/// keeps them.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct KeyFlags {
    pub correct: bool,
    pub present: bool,
    pub used: bool,
}

impl From<LetterState> for KeyFlags {
    fn from(state: LetterState) -> Self {
        Self {
            correct: state == LetterState::Correct,
            present: state == LetterState::Present,
            used: true,
        }
    }
}

/// One day's saved game, in the record shape the web client keeps in
/// browser storage: completed rows first in `board`, then (for a live
/// game) whatever was typed into the current row.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SavedSession {
    pub date: NaiveDate,
    pub word: String,
    pub current_row: usize,
    pub game_over: bool,
    pub results_grid: Vec<Vec<LetterState>>,
    pub board: Vec<Vec<String>>,
    pub keyboard: HashMap<String, KeyFlags>,
    pub completed_rows: usize,
}

impl SavedSession {
    pub fn of_game(game: &Game, date: NaiveDate) -> Self {
        let results_grid = game.attempts().iter().map(Guess::pattern).collect();

        let mut board: Vec<Vec<String>> = game
            .attempts()
            .iter()
            .map(|guess| {
                guess
                    .iter()
                    .map(|(letter, _)| letter.as_str().to_owned())
                    .collect()
            })
            .collect();

        let game_over = game.status().is_over();

        if game_over.not() && game.row().letters().is_empty().not() {
            board.push(
                game.row()
                    .letters()
                    .iter()
                    .map(|letter| letter.as_str().to_owned())
                    .collect(),
            );
        }

        let keyboard = keyboard_flags(game.keyboard());

        Self {
            date,
            word: game.answer().to_string(),
            current_row: game.current_row(),
            game_over,
            results_grid,
            board,
            keyboard,
            completed_rows: game.attempts().len(),
        }
    }

    /// Rebuilds the live game. The keyboard map and status are recomputed
    /// from the restored attempts rather than read back, so the coloring
    /// always agrees with what the grid shows.
    pub fn into_game(self, answer: Word) -> Game {
        let attempts: Vec<Guess> = self
            .board
            .iter()
            .take(self.completed_rows)
            .zip(self.results_grid)
            .map(|(cells, states)| {
                let letters = cells
                    .iter()
                    .map(|cell| Letter::from(cell.as_str()))
                    .collect();

                Guess::from_parts(letters, states)
            })
            .collect();

        let row: Vec<Letter> = if self.game_over {
            Vec::new()
        } else {
            self.board
                .get(self.completed_rows)
                .map(|cells| cells.iter().map(|cell| Letter::from(cell.as_str())).collect())
                .unwrap_or_default()
        };

        Game::restore(answer, attempts, row)
    }
}

fn keyboard_flags(keyboard: &KeyboardStatus) -> HashMap<String, KeyFlags> {
    keyboard
        .iter()
        .map(|(letter, state)| (letter.as_str().to_owned(), KeyFlags::from(state)))
        .collect()
}

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("writing session file: {0}")]
    Io(#[from] io::Error),

    #[error("encoding session: {0}")]
    Serialize(#[from] serde_json::Error),
}

/// Same-day progress cache on disk, one JSON file per calendar day.
///
/// The running game owns the live state; the stored copy is advisory.
/// Anything missing, unreadable, from another day or for another word is
/// treated as "no snapshot", and files from past days are deleted rather
/// than reported.
#[derive(Debug, Clone)]
pub struct SessionStore {
    dir: PathBuf,
}

impl SessionStore {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    fn file_name(date: NaiveDate) -> String {
        format!("{FILE_PREFIX}{date}{FILE_SUFFIX}")
    }

    fn path_for(&self, date: NaiveDate) -> PathBuf {
        self.dir.join(Self::file_name(date))
    }

    #[instrument(skip_all, fields(date = %session.date))]
    pub fn save(&self, session: &SavedSession) -> Result<(), StoreError> {
        fs::create_dir_all(&self.dir)?;

        let json = serde_json::to_string(session)?;
        fs::write(self.path_for(session.date), json)?;

        trace!("session saved");

        Ok(())
    }

    /// Today's snapshot for the given answer, if a usable one exists.
    #[instrument(skip_all, fields(%today))]
    pub fn load(&self, today: NaiveDate, answer: &Word) -> Option<SavedSession> {
        self.purge_stale(today);

        let raw = fs::read_to_string(self.path_for(today)).ok()?;

        let session: SavedSession = match serde_json::from_str(&raw) {
            Ok(session) => session,
            Err(err) => {
                warn!(%err, "discarding unreadable session file");
                return None;
            }
        };

        if session.date != today {
            trace!("session file is for another day");
            return None;
        }

        if session.word != answer.to_string() {
            debug!("session file is for another word");
            return None;
        }

        if session.results_grid.len() != session.completed_rows
            || session.board.len() < session.completed_rows
        {
            warn!("discarding inconsistent session file");
            return None;
        }

        debug!(
            rows = session.completed_rows,
            over = session.game_over,
            "found today's session"
        );

        Some(session)
    }

    fn purge_stale(&self, today: NaiveDate) {
        let Ok(entries) = fs::read_dir(&self.dir) else {
            return;
        };

        let keep = Self::file_name(today);

        for entry in entries.flatten() {
            let name = entry.file_name();
            let Some(name) = name.to_str() else { continue };

            let is_session = name.starts_with(FILE_PREFIX) && name.ends_with(FILE_SUFFIX);

            if is_session && name != keep {
                trace!(name, "purging stale session file");
                let _ = fs::remove_file(entry.path());
            }
        }
    }
}
