//! Move and promotion rejection reasons.

use std::fmt;

use castellan_core::{PieceKind, Square};

/// Why a geometrically-shaped request was refused.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IllegalReason {
    /// Source and destination are the same square.
    SameSquare,
    /// The piece cannot reach the destination: wrong pattern, blocked path,
    /// own piece on the target, or castling preconditions unmet.
    Geometry,
    /// The move would leave the mover's own king attacked.
    KingInCheck,
}

impl fmt::Display for IllegalReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            IllegalReason::SameSquare => f.write_str("source and destination are the same square"),
            IllegalReason::Geometry => f.write_str("the piece cannot move there"),
            IllegalReason::KingInCheck => f.write_str("king would be in check"),
        }
    }
}

/// Errors returned by [`Game`](crate::Game). A rejected request never changes
/// the game.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum MoveError {
    /// No piece of the side to move stands on the source square.
    #[error("no movable piece on {square}")]
    InvalidSelection { square: Square },

    #[error("illegal move {from}{to}: {reason}")]
    IllegalMove {
        from: Square,
        to: Square,
        reason: IllegalReason,
    },

    /// A move was requested while a promotion choice is outstanding.
    #[error("a promotion choice is pending on {square}")]
    PromotionPending { square: Square },

    /// The game has ended in checkmate or stalemate.
    #[error("the game is over")]
    GameOver,

    #[error("no promotion is pending")]
    NotAwaitingPromotion,

    /// Pawns promote to a queen, rook, bishop, or knight only.
    #[error("cannot promote to a {kind}")]
    InvalidPromotionChoice { kind: PieceKind },
}
