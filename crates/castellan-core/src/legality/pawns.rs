//! Pawn pushes, captures, and en passant.

use crate::board::Position;
use crate::color::Color;
use crate::square::Square;

use super::delta;

/// Forward pushes onto empty squares, diagonal captures of enemy pieces, and
/// the diagonal step onto the en passant target.
pub(super) fn pawn_move(position: &Position, color: Color, from: Square, to: Square) -> bool {
    let forward = color.forward();
    let (df, dr) = delta(from, to);

    if df == 0 {
        if dr == forward {
            return !position.is_occupied(to);
        }
        if dr == 2 * forward && from.rank() == color.pawn_rank() {
            let skipped = from.offset(0, forward);
            return skipped.is_some_and(|sq| !position.is_occupied(sq))
                && !position.is_occupied(to);
        }
        return false;
    }

    if df.abs() == 1 && dr == forward {
        return match position.piece_at(to) {
            Some(target) => target.color != color,
            None => position.en_passant() == Some(to),
        };
    }

    false
}

/// A pawn attacks the two squares diagonally in front of it.
#[inline]
pub(super) fn pawn_attacks(color: Color, from: Square, target: Square) -> bool {
    let (df, dr) = delta(from, target);
    df.abs() == 1 && dr == color.forward()
}
