use thiserror::Error;

use crate::words_list::WordsError;

/// Startup and terminal i/o failures, the only errors that can end the
/// process. Gameplay-level trouble (a rejected word, a gate outage, an
/// unreadable session file) is handled where it happens and the player
/// keeps typing.
#[derive(Debug, Error)]
pub enum Error {
    #[error("configuration error: {0}")]
    Config(#[from] config::ConfigError),

    #[error(transparent)]
    Words(#[from] WordsError),

    #[error("terminal i/o error: {0}")]
    Io(#[from] std::io::Error),
}
