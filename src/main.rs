#![warn(clippy::perf)]
#![warn(clippy::unwrap_used)]

mod cli;
mod config;
mod core;
mod errors;
mod game;
mod keyboard;
mod logging;
mod puzzle;
mod session;
mod share;
mod validity;
mod words_list;

use tracing::{debug, info};

use crate::{
    config::Config, errors::Error, game::Game, puzzle::DailyPuzzle, session::SessionStore,
    validity::CheckWordApi, words_list::WordsList,
};

#[tokio::main]
async fn main() -> Result<(), Error> {
    logging::init_tracing();

    let config = Config::load()?;

    let words = WordsList::load(config.words.path())?;
    let store = SessionStore::new(config.store.dir());

    let puzzle = DailyPuzzle::today(&words);
    let today = puzzle.date();

    let mut game = match store.load(today, puzzle.answer()) {
        Some(saved) => {
            info!("resuming today's session");
            saved.into_game(puzzle.answer().clone())
        }
        None => Game::new(puzzle.answer().clone()),
    };

    match config.api.check_word_url() {
        Some(url) => {
            debug!(%url, "checking guesses against the dictionary backend");
            cli::run(&mut game, &CheckWordApi::new(url.clone()), &store, today).await
        }
        None => {
            debug!("checking guesses against the local words list");
            cli::run(&mut game, &words, &store, today).await
        }
    }
}
