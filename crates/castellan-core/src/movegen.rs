//! Full legality: geometry plus own-king safety, and legal move enumeration.

use crate::attacks::is_king_in_check;
use crate::board::Position;
use crate::color::Color;
use crate::legality::is_legal_geometry;
use crate::square::Square;

/// Return `true` if playing `from -> to` leaves the mover's king unattacked.
///
/// The move is simulated on a copy; `self` is never modified.
pub fn leaves_king_safe(position: &Position, from: Square, to: Square) -> bool {
    match position.play(from, to) {
        Some(played) => !is_king_in_check(&played.position, played.moved.color),
        None => false,
    }
}

/// Return `true` if the piece on `from` may legally move to `to`: the
/// geometry holds and the mover's king is not left attacked.
///
/// Turn order is not considered; the piece's own color is the mover.
pub fn is_legal(position: &Position, from: Square, to: Square) -> bool {
    let Some(piece) = position.piece_at(from) else {
        return false;
    };
    is_legal_geometry(position, piece, from, to) && leaves_king_safe(position, from, to)
}

/// Every square the piece on `from` may legally move to.
pub fn legal_destinations(position: &Position, from: Square) -> Vec<Square> {
    Square::all()
        .filter(|&to| is_legal(position, from, to))
        .collect()
}

/// Every legal `(from, to)` pair for `color`. A promotion counts once.
pub fn legal_moves(position: &Position, color: Color) -> Vec<(Square, Square)> {
    position
        .pieces()
        .filter(|&(_, piece)| piece.color == color)
        .flat_map(|(from, _)| {
            legal_destinations(position, from)
                .into_iter()
                .map(move |to| (from, to))
        })
        .collect()
}

/// Return `true` if `color` has at least one legal move.
///
/// Tries every piece of `color` against every square and stops at the
/// first move that passes geometry and king safety.
pub fn has_any_legal_move(position: &Position, color: Color) -> bool {
    position
        .pieces()
        .filter(|&(_, piece)| piece.color == color)
        .any(|(from, _)| Square::all().any(|to| is_legal(position, from, to)))
}

#[cfg(test)]
mod tests {
    use super::{has_any_legal_move, is_legal, legal_destinations, legal_moves};
    use crate::board::Position;
    use crate::color::Color;
    use crate::square::Square;

    fn sq(s: &str) -> Square {
        Square::from_algebraic(s).unwrap()
    }

    fn pos(fen: &str) -> Position {
        fen.parse().unwrap()
    }

    #[test]
    fn twenty_moves_from_the_start() {
        let position = Position::starting_position();
        assert_eq!(legal_moves(&position, Color::White).len(), 20);
        assert_eq!(legal_moves(&position, Color::Black).len(), 20);
    }

    #[test]
    fn kiwipete_move_count() {
        let position = pos("r3k2r/p1ppqpb1/bn2pnp1/3PN3/1p2P3/2N2Q1p/PPPBBPPP/R3K2R w KQkq - 0 1");
        assert_eq!(legal_moves(&position, Color::White).len(), 48);
    }

    #[test]
    fn pinned_piece_cannot_leave_the_line() {
        // The e2 knight is pinned against e1 by the e8 rook.
        let position = pos("k3r3/8/8/8/8/8/4N3/4K3 w - - 0 1");
        assert!(legal_destinations(&position, sq("e2")).is_empty());
        assert!(is_legal(&position, sq("e1"), sq("d1")));
    }

    #[test]
    fn king_cannot_step_into_attack() {
        let position = pos("k3r3/8/8/8/8/8/8/3K4 w - - 0 1");
        assert!(!is_legal(&position, sq("d1"), sq("e1")));
        assert!(is_legal(&position, sq("d1"), sq("c2")));
    }

    #[test]
    fn en_passant_that_exposes_the_king_is_illegal() {
        // Capturing d6 would empty the fifth rank between the a5 king and the h5 rook.
        let position = pos("4k3/8/8/K2pP2r/8/8/8/8 w - d6 0 1");
        assert!(!is_legal(&position, sq("e5"), sq("d6")));
        assert!(is_legal(&position, sq("e5"), sq("e6")));
    }

    #[test]
    fn empty_square_has_no_moves() {
        let position = Position::starting_position();
        assert!(legal_destinations(&position, sq("e4")).is_empty());
    }

    #[test]
    fn no_legal_moves_in_mate_or_stalemate() {
        let mate = pos("R5k1/5ppp/8/8/8/8/8/6K1 b - - 0 1");
        assert!(!has_any_legal_move(&mate, Color::Black));
        let stalemate = pos("7k/5Q2/6K1/8/8/8/8/8 b - - 0 1");
        assert!(!has_any_legal_move(&stalemate, Color::Black));
        assert!(has_any_legal_move(&Position::starting_position(), Color::White));
    }
}
