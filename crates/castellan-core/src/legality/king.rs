//! King steps and castling.

use crate::attacks::is_square_attacked;
use crate::board::Position;
use crate::castle_rights::CastleSide;
use crate::color::Color;
use crate::piece::Piece;
use crate::piece_kind::PieceKind;
use crate::square::Square;

use super::delta;
use super::sliders::path_clear;

/// One step in any of the eight directions.
#[inline]
pub(super) fn king_step(from: Square, to: Square) -> bool {
    let (df, dr) = delta(from, to);
    df.abs() <= 1 && dr.abs() <= 1 && (df, dr) != (0, 0)
}

/// Return the castling side if `from -> to` is a king's two-file move along
/// its home rank, without judging whether castling is allowed.
pub(crate) fn is_castle_move(color: Color, from: Square, to: Square) -> Option<CastleSide> {
    let side = CastleSide::from_king_target(color, to)?;
    (side.squares(color).king_from == from).then_some(side)
}

/// A two-file castling move.
///
/// Requires: neither the king nor the wing's rook has moved, a rook of the
/// king's color stands on the corner, every square between king and rook is
/// empty, and none of the king's origin, transit, or destination squares is
/// attacked by the opponent.
pub(super) fn castle_move(position: &Position, color: Color, from: Square, to: Square) -> bool {
    let Some(side) = is_castle_move(color, from, to) else {
        return false;
    };
    if !position.castling().has(color, side) {
        return false;
    }

    let squares = side.squares(color);
    if position.piece_at(squares.rook_from) != Some(Piece::new(PieceKind::Rook, color)) {
        return false;
    }
    if !path_clear(position, squares.king_from, squares.rook_from) {
        return false;
    }

    let (df, _) = delta(squares.king_from, squares.king_to);
    let step = df.signum();
    let opponent = color.flip();
    let mut current = Some(squares.king_from);
    while let Some(sq) = current {
        if is_square_attacked(position, sq, opponent) {
            return false;
        }
        if sq == squares.king_to {
            break;
        }
        current = sq.offset(step, 0);
    }
    true
}
