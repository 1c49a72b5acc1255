//! Move execution via copy-make.

use crate::board::Position;
use crate::castle_rights::CastleRights;
use crate::legality;
use crate::piece::Piece;
use crate::piece_kind::PieceKind;
use crate::square::Square;

/// What a move did to the board besides moving one piece.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MoveEffect {
    /// A plain move, capture or not.
    Normal,
    /// A pawn advanced two ranks and left an en passant target behind.
    DoubleStep { target: Square },
    /// A pawn captured en passant; the captured pawn stood on `captured`.
    EnPassant { captured: Square },
    /// The king castled; the rook moved from `rook_from` to `rook_to`.
    Castle { rook_from: Square, rook_to: Square },
    /// A pawn reached its last rank and must be promoted.
    ReachedLastRank,
}

/// The result of [`Position::play`]: the new position plus what happened.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Played {
    pub position: Position,
    pub moved: Piece,
    pub captured: Option<Piece>,
    pub effect: MoveEffect,
}

impl Position {
    /// Apply the move `from -> to` and return the resulting position.
    /// Copy-make: `self` is not modified.
    ///
    /// Legality is not checked; callers validate geometry first. Side effects
    /// are applied in full: the en passant victim is removed, a castling rook
    /// is relocated, "moved" flags are set for any king or rook home square
    /// the move leaves, and the en passant target is set after a double step
    /// and cleared otherwise. The side to move is *not* changed, so that a
    /// pending promotion can be resolved first; call [`Position::pass_turn`].
    ///
    /// Returns `None` if `from` is empty.
    pub fn play(&self, from: Square, to: Square) -> Option<Played> {
        let mut p = *self;
        let moved = p.take(from)?;
        let color = moved.color;
        let mut captured = p.take(to);
        let mut effect = MoveEffect::Normal;

        match moved.kind {
            PieceKind::Pawn => {
                let forward = color.forward();
                let rank_diff = to.rank() as i8 - from.rank() as i8;
                if rank_diff == 2 * forward {
                    if let Some(target) = from.offset(0, forward) {
                        effect = MoveEffect::DoubleStep { target };
                    }
                } else if from.file() != to.file()
                    && captured.is_none()
                    && self.en_passant() == Some(to)
                {
                    // The victim stands behind the target and must be an enemy pawn.
                    let enemy_pawn = Piece::new(PieceKind::Pawn, color.flip());
                    if let Some(victim) = to.offset(0, -forward)
                        && p.piece_at(victim) == Some(enemy_pawn)
                    {
                        captured = p.take(victim);
                        effect = MoveEffect::EnPassant { captured: victim };
                    }
                } else if to.rank() == color.promotion_rank() {
                    effect = MoveEffect::ReachedLastRank;
                }
            }
            PieceKind::King => {
                if let Some(side) = legality::is_castle_move(color, from, to) {
                    let squares = side.squares(color);
                    if let Some(rook) = p.take(squares.rook_from) {
                        p.put(squares.rook_to, rook);
                    }
                    effect = MoveEffect::Castle {
                        rook_from: squares.rook_from,
                        rook_to: squares.rook_to,
                    };
                }
            }
            _ => {}
        }

        p.put(to, moved);

        // Flags record pieces leaving home squares. A capture on a home
        // square does not set the flag of the piece captured there.
        let mut castling = p.castling().with(CastleRights::flag_for_origin(from));
        if let MoveEffect::Castle { rook_from, .. } = effect {
            castling = castling.with(CastleRights::flag_for_origin(rook_from));
        }
        p.set_castling(castling);

        p.set_en_passant(match effect {
            MoveEffect::DoubleStep { target } => Some(target),
            _ => None,
        });

        if moved.kind == PieceKind::Pawn || captured.is_some() {
            p.set_halfmove_clock(0);
        } else {
            p.set_halfmove_clock(p.halfmove_clock().saturating_add(1));
        }

        Some(Played {
            position: p,
            moved,
            captured,
            effect,
        })
    }

    /// Replace the pawn on `sq` with a piece of `kind` and clear the en
    /// passant target. Returns `None` if `sq` holds no pawn.
    pub fn promote(&self, sq: Square, kind: PieceKind) -> Option<Position> {
        let mut p = *self;
        let pawn = p.piece_at(sq).filter(|piece| piece.kind == PieceKind::Pawn)?;
        p.put(sq, Piece::new(kind, pawn.color));
        p.set_en_passant(None);
        Some(p)
    }
}
