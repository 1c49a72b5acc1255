//! Bishop, rook, and queen lines.

use crate::board::Position;
use crate::piece_kind::PieceKind;
use crate::square::Square;

use super::delta;

/// Return `true` if `kind` moves along the line from `from` to `to` and every
/// square strictly between them is empty.
pub(super) fn slides(position: &Position, kind: PieceKind, from: Square, to: Square) -> bool {
    let (df, dr) = delta(from, to);
    let orthogonal = (df == 0) != (dr == 0);
    let diagonal = df != 0 && df.abs() == dr.abs();

    let on_line = match kind {
        PieceKind::Bishop => diagonal,
        PieceKind::Rook => orthogonal,
        PieceKind::Queen => diagonal || orthogonal,
        _ => false,
    };

    on_line && path_clear(position, from, to)
}

/// Walk from `from` toward `to` one step at a time; every square before `to`
/// must be empty. `from` and `to` must share a rank, file, or diagonal.
pub(crate) fn path_clear(position: &Position, from: Square, to: Square) -> bool {
    let (df, dr) = delta(from, to);
    let (step_f, step_r) = (df.signum(), dr.signum());

    let mut current = from.offset(step_f, step_r);
    while let Some(sq) = current {
        if sq == to {
            return true;
        }
        if position.is_occupied(sq) {
            return false;
        }
        current = sq.offset(step_f, step_r);
    }
    false
}
