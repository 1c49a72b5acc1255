//! Geometric move legality.
//!
//! Answers "may this piece go from here to there" from the piece's movement
//! pattern, path clearance, capture color and special-move preconditions.
//! Whether the move leaves the mover's own king attacked is decided one layer
//! up, by simulating the move (see [`crate::movegen`]).

mod king;
mod knights;
mod pawns;
mod sliders;

use crate::board::Position;
use crate::piece::Piece;
use crate::piece_kind::PieceKind;
use crate::square::Square;

pub(crate) use self::king::is_castle_move;

/// File and rank distance from `from` to `to`.
#[inline]
pub(crate) fn delta(from: Square, to: Square) -> (i8, i8) {
    (
        to.file() as i8 - from.file() as i8,
        to.rank() as i8 - from.rank() as i8,
    )
}

/// Return `true` if `piece`, standing on `from`, may move to `to` by its own
/// movement rules.
///
/// `piece` must be the piece on `from`; a mismatch, a null move, or a
/// destination holding a piece of the same color is never legal.
pub fn is_legal_geometry(position: &Position, piece: Piece, from: Square, to: Square) -> bool {
    if from == to || position.piece_at(from) != Some(piece) {
        return false;
    }
    if position
        .piece_at(to)
        .is_some_and(|target| target.color == piece.color)
    {
        return false;
    }

    match piece.kind {
        PieceKind::Pawn => pawns::pawn_move(position, piece.color, from, to),
        PieceKind::Knight => knights::knight_reaches(from, to),
        PieceKind::Bishop | PieceKind::Rook | PieceKind::Queen => {
            sliders::slides(position, piece.kind, from, to)
        }
        PieceKind::King => {
            king::king_step(from, to) || king::castle_move(position, piece.color, from, to)
        }
    }
}

/// Return `true` if `piece` on `from` attacks `target`.
///
/// Attack differs from movement for pawns (the two forward diagonals are
/// attacked whether or not anything stands there) and for kings (castling is
/// never an attack). The occupant of `target` is ignored.
pub(crate) fn attacks(position: &Position, piece: Piece, from: Square, target: Square) -> bool {
    if from == target {
        return false;
    }
    match piece.kind {
        PieceKind::Pawn => pawns::pawn_attacks(piece.color, from, target),
        PieceKind::Knight => knights::knight_reaches(from, target),
        PieceKind::Bishop | PieceKind::Rook | PieceKind::Queen => {
            sliders::slides(position, piece.kind, from, target)
        }
        PieceKind::King => king::king_step(from, target),
    }
}
