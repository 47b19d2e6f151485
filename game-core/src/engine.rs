use std::collections::HashSet;

use game_types::{DEFAULT_ATTEMPTS, Game, GameStatus, Move, PLACEHOLDER, Verdict};
use tracing::debug;
use uuid::Uuid;

use crate::words::contains_letter;

/// Result of feeding one raw guess through the state machine.
#[derive(Debug, Clone, PartialEq)]
pub enum GuessOutcome {
    /// Nothing changed; the message explains why.
    Unchanged { message: &'static str },
    /// The guess was accepted. `record` is the ledger entry to append and
    /// `finished` is `Some(won)` when this guess ended the game.
    Applied {
        record: Move,
        finished: Option<bool>,
        message: &'static str,
    },
}

impl GuessOutcome {
    pub fn message(&self) -> &'static str {
        match self {
            GuessOutcome::Unchanged { message } => message,
            GuessOutcome::Applied { message, .. } => message,
        }
    }
}

/// Create a fresh game around a secret word drawn by the caller.
/// Non-positive attempt budgets fall back to the default.
pub fn new_game(user_id: Uuid, secret_word: String, attempts_allowed: i32) -> Game {
    let attempts = if attempts_allowed > 0 {
        attempts_allowed
    } else {
        DEFAULT_ATTEMPTS
    };
    let word_status = PLACEHOLDER.to_string().repeat(secret_word.len());

    Game {
        id: Uuid::new_v4(),
        user_id,
        secret_word,
        word_status,
        attempts_allowed: attempts,
        attempts_remaining: attempts,
        current_move: 0,
        status: GameStatus::InProgress,
        created_at: chrono::Utc::now().to_rfc3339(),
    }
}

/// Apply one raw guess to a game.
///
/// `prior_guesses` holds the letters already recorded in the game's move
/// ledger. Terminal games return unchanged before the ledger is consulted,
/// so a guess on a finished game is never duplicate-checked.
pub fn apply_guess(
    game: &mut Game,
    raw_guess: &str,
    prior_guesses: &HashSet<char>,
) -> GuessOutcome {
    match game.status {
        GameStatus::Won | GameStatus::Lost => {
            return GuessOutcome::Unchanged {
                message: "Game already over!",
            };
        }
        GameStatus::Cancelled => {
            return GuessOutcome::Unchanged {
                message: "Game cancelled.",
            };
        }
        GameStatus::InProgress => {}
    }

    let normalized = raw_guess.to_lowercase();
    let mut chars = normalized.chars();
    let letter = match (chars.next(), chars.next()) {
        (Some(c), None) if c.is_alphabetic() => c,
        _ => {
            return GuessOutcome::Unchanged {
                message: "Guess a letter.",
            };
        }
    };

    if prior_guesses.contains(&letter) {
        return GuessOutcome::Unchanged {
            message: "Guess another letter.",
        };
    }

    let verdict = Verdict::from_hit(contains_letter(&game.secret_word, letter));
    match verdict {
        Verdict::Hit => {
            game.word_status = reveal_letter(&game.secret_word, letter, &game.word_status);
        }
        Verdict::Miss => {
            game.attempts_remaining -= 1;
        }
    }

    let move_index = game.current_move;
    game.current_move += 1;

    let finished = if verdict.is_hit() && solved(&game.word_status) {
        game.status = GameStatus::Won;
        Some(true)
    } else if game.attempts_remaining < 1 {
        game.status = GameStatus::Lost;
        Some(false)
    } else {
        None
    };

    if let Some(won) = finished {
        debug!(game_id = %game.id, won, "game finished");
    }

    let message = match (finished, verdict) {
        (Some(true), _) => "You win!",
        (Some(false), _) => "Game over!",
        (None, Verdict::Hit) => "Guess",
        (None, Verdict::Miss) => "Miss",
    };

    GuessOutcome::Applied {
        record: Move {
            game_id: game.id,
            move_index,
            guess: letter.to_string(),
            word_status: game.word_status.clone(),
            verdict,
        },
        finished,
        message,
    }
}

/// Cancel an in-progress game. Returns whether a transition happened;
/// terminal games are left untouched.
pub fn cancel_game(game: &mut Game) -> bool {
    if game.status == GameStatus::InProgress {
        game.status = GameStatus::Cancelled;
        debug!(game_id = %game.id, "game cancelled");
        true
    } else {
        false
    }
}

/// Merge newly matched positions into the template, keeping everything the
/// player has already uncovered.
fn reveal_letter(secret: &str, letter: char, template: &str) -> String {
    secret
        .chars()
        .zip(template.chars())
        .map(|(s, t)| if s == letter { s } else { t })
        .collect()
}

fn solved(template: &str) -> bool {
    !template.contains(PLACEHOLDER)
}
