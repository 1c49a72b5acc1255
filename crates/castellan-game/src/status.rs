//! Game status derived from a position.

use std::fmt;

use castellan_core::{Color, Position, has_any_legal_move, is_king_in_check};

/// The state of play for the side to move. Derived, never stored apart from
/// the position it describes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum GameStatus {
    Ongoing,
    /// The given color is in check and has a way out.
    Check(Color),
    /// The given color has won.
    Checkmate(Color),
    Stalemate,
}

impl GameStatus {
    /// Evaluate the status for the side to move in `position`.
    pub fn of(position: &Position) -> GameStatus {
        let side = position.side_to_move();
        let in_check = is_king_in_check(position, side);
        let can_move = has_any_legal_move(position, side);

        match (in_check, can_move) {
            (true, false) => GameStatus::Checkmate(side.flip()),
            (false, false) => GameStatus::Stalemate,
            (true, true) => GameStatus::Check(side),
            (false, true) => GameStatus::Ongoing,
        }
    }

    /// Return `true` for checkmate and stalemate.
    #[inline]
    pub const fn is_terminal(self) -> bool {
        matches!(self, GameStatus::Checkmate(_) | GameStatus::Stalemate)
    }
}

impl fmt::Display for GameStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            GameStatus::Ongoing => f.write_str("ongoing"),
            GameStatus::Check(color) => write!(f, "{} is in check", color.name()),
            GameStatus::Checkmate(winner) => write!(f, "checkmate, {} wins", winner.name()),
            GameStatus::Stalemate => f.write_str("stalemate"),
        }
    }
}
