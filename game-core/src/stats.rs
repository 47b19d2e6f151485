use game_types::{Game, Score, User};

/// Fold a finished game into the owner's running totals. Losses are floored
/// at 1 when computing the ratio so fresh accounts never divide by zero.
pub fn record_outcome(user: &mut User, won: bool) {
    if won {
        user.wins += 1;
    } else {
        user.losses += 1;
    }
    user.win_loss_ratio = f64::from(user.wins) / f64::from(user.losses.max(1));
}

/// Scoreboard entry for a game that just ended in a win or a loss.
pub fn build_score(game: &Game, won: bool) -> Score {
    Score {
        user_id: game.user_id,
        date: chrono::Utc::now().date_naive().to_string(),
        won,
        misses: game.attempts_remaining - game.attempts_allowed,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::new_game;
    use game_types::GameStatus;
    use std::collections::HashSet;
    use uuid::Uuid;

    fn test_user() -> User {
        User {
            id: Uuid::new_v4(),
            name: "alice".to_string(),
            email: None,
            wins: 0,
            losses: 0,
            win_loss_ratio: 0.0,
            created_at: chrono::Utc::now().to_rfc3339(),
        }
    }

    #[test]
    fn test_ratio_with_no_losses_divides_by_one() {
        let mut user = test_user();
        record_outcome(&mut user, true);
        record_outcome(&mut user, true);
        assert_eq!(user.wins, 2);
        assert_eq!(user.losses, 0);
        assert_eq!(user.win_loss_ratio, 2.0);
    }

    #[test]
    fn test_ratio_tracks_wins_over_losses() {
        let mut user = test_user();
        record_outcome(&mut user, true);
        record_outcome(&mut user, false);
        record_outcome(&mut user, false);
        assert_eq!(user.win_loss_ratio, 0.5);
    }

    #[test]
    fn test_score_misses_counts_spent_attempts() {
        let mut game = new_game(Uuid::new_v4(), "dog".to_string(), 6);
        crate::engine::apply_guess(&mut game, "x", &HashSet::new());
        crate::engine::apply_guess(&mut game, "y", &HashSet::from(['x']));

        let score = build_score(&game, false);
        assert_eq!(score.misses, -2);
        assert!(!score.won);
        assert_eq!(score.user_id, game.user_id);
    }

    #[test]
    fn test_perfect_game_scores_zero_misses() {
        let mut game = new_game(Uuid::new_v4(), "at".to_string(), 6);
        crate::engine::apply_guess(&mut game, "a", &HashSet::new());
        crate::engine::apply_guess(&mut game, "t", &HashSet::from(['a']));
        assert_eq!(game.status, GameStatus::Won);

        let score = build_score(&game, true);
        assert_eq!(score.misses, 0);
        assert!(score.won);
    }
}
