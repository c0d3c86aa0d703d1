use crate::{
    core::{AsEmoji, MAX_ROWS},
    game::{Game, GameStatus},
};

/// Where the share block sends new players.
const CALL_TO_ACTION: &str = "https://urdle.app";

/// Formats a finished game as the block players paste into chat: a result
/// header, one glyph row per attempt in reading order, and the link.
///
/// A loss reveals the answer; a win only brags about the attempt count.
pub fn share_text(game: &Game) -> String {
    let header = match game.status() {
        GameStatus::Won => format!("Urdle {}/{}", game.attempts().len(), MAX_ROWS),
        GameStatus::Lost => format!("Urdle X/{} (the word was {})", MAX_ROWS, game.answer()),
        GameStatus::InProgress => {
            format!("Urdle (in progress, {}/{})", game.attempts().len(), MAX_ROWS)
        }
    };

    format!(
        "{header}\n\n{}\n\n{CALL_TO_ACTION}",
        game.attempts().as_emoji()
    )
}

#[cfg(test)]
mod tests {
    use std::str::FromStr;

    use pretty_assertions::assert_eq;

    use crate::{
        core::{Word, MAX_ROWS},
        game::Game,
    };

    use super::{share_text, CALL_TO_ACTION};

    fn answer() -> Word {
        Word::from_str("کتابی").unwrap()
    }

    #[test]
    fn win_counts_attempts() {
        let answer = answer();
        let attempts = vec![answer.guess("بازار"), answer.guess("کتابی")];
        let game = Game::restore(answer, attempts, Vec::new());

        let text = share_text(&game);
        let mut lines = text.lines();

        assert_eq!(lines.next(), Some("Urdle 2/6"));
        assert_eq!(lines.next(), Some(""));
        assert_eq!(lines.next(), Some("🟨🟨⬜⬜⬜"));
        assert_eq!(lines.next(), Some("🟩🟩🟩🟩🟩"));
        assert_eq!(lines.next(), Some(""));
        assert_eq!(lines.next(), Some(CALL_TO_ACTION));
        assert_eq!(lines.next(), None);
    }

    #[test]
    fn loss_reveals_the_answer() {
        let answer = answer();
        let attempts = vec![answer.guess("بازار"); MAX_ROWS];
        let game = Game::restore(answer, attempts, Vec::new());

        let text = share_text(&game);

        assert!(text.starts_with("Urdle X/6"));
        assert!(text.contains("کتابی"));
        assert!(text.ends_with(CALL_TO_ACTION));
    }

    #[test]
    fn glyph_rows_follow_reading_order() {
        let answer = answer();
        // matches at the first, third and fifth letters of the answer
        let attempts = vec![answer.guess("کہانی")];
        let game = Game::restore(answer, attempts, Vec::new());

        let text = share_text(&game);

        assert!(text.contains("🟩⬜🟩⬜🟩"));
    }
}
