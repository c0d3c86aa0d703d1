use std::ops::Not;

use chrono::NaiveDate;
use tokio::io::{self, AsyncBufReadExt, AsyncWriteExt, BufReader};
use tracing::warn;

use crate::{
    core::{letters, AsEmoji, Letter, LetterState, MAX_ROWS, WORD_LEN},
    errors::Error,
    game::{Game, GameStatus, SubmitOutcome},
    keyboard::KeyboardStatus,
    session::{SavedSession, SessionStore},
    share::share_text,
    validity::Validity,
};

/// Line-oriented driver. Each line of input is fed through the engine one
/// letter at a time and whatever the engine reports is printed back; every
/// rule lives in [`Game`], this loop only does i/o and decides when to
/// clear a refused row.
pub async fn run<V: Validity>(
    game: &mut Game,
    validity: &V,
    store: &SessionStore,
    today: NaiveDate,
) -> Result<(), Error> {
    let mut stdout = io::stdout();
    let mut lines = BufReader::new(io::stdin()).lines();

    if game.status().is_over() {
        let text = format!(
            "you already finished today's urdle!\n\n{}\n",
            share_text(game)
        );
        stdout.write_all(text.as_bytes()).await?;

        return Ok(());
    }

    if game.attempts().is_empty().not() {
        let text = format!(
            "resuming today's game:\n{}\n{}\n",
            game.attempts().as_emoji(),
            keyboard_line(game.keyboard())
        );
        stdout.write_all(text.as_bytes()).await?;
    }

    while game.status() == GameStatus::InProgress {
        let prompt = format!("guess {}/{}: ", game.current_row() + 1, MAX_ROWS);
        stdout.write_all(prompt.as_bytes()).await?;
        stdout.flush().await?;

        let Some(line) = lines.next_line().await? else {
            // stdin closed mid-game; progress is already saved
            return Ok(());
        };

        for letter in letters(line.trim()) {
            if game.input_letter(letter).not() {
                // row is full; extra letters fall on the floor
                break;
            }
        }

        if game.row().is_complete().not() {
            clear_row(game);
            let notice = format!("a guess needs exactly {WORD_LEN} letters\n");
            stdout.write_all(notice.as_bytes()).await?;
            continue;
        }

        match game.submit_guess(validity).await {
            SubmitOutcome::Accepted { guess, .. } => {
                let text = format!(
                    "{}  {}\n{}\n",
                    guess.word(),
                    guess.as_emoji(),
                    keyboard_line(game.keyboard())
                );
                stdout.write_all(text.as_bytes()).await?;

                if let Err(err) = store.save(&SavedSession::of_game(game, today)) {
                    warn!(%err, "could not save the session");
                }
            }
            SubmitOutcome::NotInWordList => {
                clear_row(game);
                stdout.write_all("that's not in the word list\n".as_bytes()).await?;
            }
            SubmitOutcome::Unverifiable => {
                clear_row(game);
                stdout
                    .write_all("couldn't check that word, try again\n".as_bytes())
                    .await?;
            }
            SubmitOutcome::Ignored => {}
        }
    }

    let closing = match game.status() {
        GameStatus::Won => "you win!",
        _ => "game over!",
    };

    let text = format!("{closing}\n\n{}\n", share_text(game));
    stdout.write_all(text.as_bytes()).await?;

    Ok(())
}

fn clear_row(game: &mut Game) {
    while game.backspace() {}
}

/// One line of cumulative keyboard state, best letters first.
fn keyboard_line(keyboard: &KeyboardStatus) -> String {
    let mut keys: Vec<(&Letter, LetterState)> = keyboard.iter().collect();
    keys.sort_by(|a, b| b.1.cmp(&a.1).then_with(|| a.0.cmp(b.0)));

    keys.iter()
        .map(|(letter, state)| format!("{}{letter}", state.as_emoji()))
        .collect::<Vec<_>>()
        .join(" ")
}
