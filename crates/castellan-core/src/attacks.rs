//! Attack and check queries.

use crate::board::Position;
use crate::color::Color;
use crate::legality;
use crate::square::Square;

/// Return `true` if any piece of `by_color` attacks `sq`.
///
/// Scans every square for pieces of `by_color` and asks whether each one
/// reaches `sq` under its attack geometry. Pawns attack their two forward
/// diagonals even when those squares are empty.
pub fn is_square_attacked(position: &Position, sq: Square, by_color: Color) -> bool {
    position
        .pieces()
        .filter(|&(_, piece)| piece.color == by_color)
        .any(|(from, piece)| legality::attacks(position, piece, from, sq))
}

/// Return `true` if `color`'s king is attacked.
///
/// A position without a king of that color reports `false`.
pub fn is_king_in_check(position: &Position, color: Color) -> bool {
    position
        .king_square(color)
        .is_some_and(|king| is_square_attacked(position, king, color.flip()))
}
