//! Castling eligibility, tracked as "has this piece ever moved" flags.

use std::fmt;

use crate::color::Color;
use crate::error::FenError;
use crate::square::Square;

/// Which side of the board to castle toward.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CastleSide {
    KingSide,
    QueenSide,
}

impl CastleSide {
    pub const ALL: [CastleSide; 2] = [CastleSide::KingSide, CastleSide::QueenSide];

    /// Squares involved in castling toward this side for `color`.
    pub const fn squares(self, color: Color) -> CastleSquares {
        match (color, self) {
            (Color::White, CastleSide::KingSide) => CastleSquares {
                king_from: Square::E1,
                king_to: Square::G1,
                rook_from: Square::H1,
                rook_to: Square::F1,
            },
            (Color::White, CastleSide::QueenSide) => CastleSquares {
                king_from: Square::E1,
                king_to: Square::C1,
                rook_from: Square::A1,
                rook_to: Square::D1,
            },
            (Color::Black, CastleSide::KingSide) => CastleSquares {
                king_from: Square::E8,
                king_to: Square::G8,
                rook_from: Square::H8,
                rook_to: Square::F8,
            },
            (Color::Black, CastleSide::QueenSide) => CastleSquares {
                king_from: Square::E8,
                king_to: Square::C8,
                rook_from: Square::A8,
                rook_to: Square::D8,
            },
        }
    }

    /// The side a two-file king move toward `king_to` castles on.
    pub fn from_king_target(color: Color, king_to: Square) -> Option<CastleSide> {
        CastleSide::ALL
            .into_iter()
            .find(|side| side.squares(color).king_to == king_to)
    }
}

/// King and rook squares before and after a castling move.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CastleSquares {
    pub king_from: Square,
    pub king_to: Square,
    pub rook_from: Square,
    pub rook_to: Square,
}

/// Six "has moved" flags: each king and each corner rook.
///
/// Bits: 0 = White king, 1 = White a-rook, 2 = White h-rook,
/// 3 = Black king, 4 = Black a-rook, 5 = Black h-rook.
///
/// Flags are only ever added. A rook that is captured without having moved
/// keeps its flag clear; castling legality separately requires the rook to be
/// on its corner.
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
pub struct CastleRights(u8);

impl CastleRights {
    /// Nothing has moved: the starting position.
    pub const UNMOVED: CastleRights = CastleRights(0);
    /// Everything has moved: no castling for either side.
    pub const ALL_MOVED: CastleRights = CastleRights(0b11_1111);

    pub const WHITE_KING_MOVED: CastleRights = CastleRights(0b00_0001);
    pub const WHITE_QUEEN_ROOK_MOVED: CastleRights = CastleRights(0b00_0010);
    pub const WHITE_KING_ROOK_MOVED: CastleRights = CastleRights(0b00_0100);
    pub const BLACK_KING_MOVED: CastleRights = CastleRights(0b00_1000);
    pub const BLACK_QUEEN_ROOK_MOVED: CastleRights = CastleRights(0b01_0000);
    pub const BLACK_KING_ROOK_MOVED: CastleRights = CastleRights(0b10_0000);

    /// Return `true` if every flag in `other` is set.
    #[inline]
    pub const fn contains(self, other: CastleRights) -> bool {
        (self.0 & other.0) == other.0
    }

    /// Return these flags with all of `other` set as well.
    #[inline]
    pub const fn with(self, other: CastleRights) -> CastleRights {
        CastleRights(self.0 | other.0)
    }

    /// The "king moved" flag for `color`.
    pub const fn king_flag(color: Color) -> CastleRights {
        match color {
            Color::White => Self::WHITE_KING_MOVED,
            Color::Black => Self::BLACK_KING_MOVED,
        }
    }

    /// The "rook moved" flag for the rook on `color`'s `side` corner.
    pub const fn rook_flag(color: Color, side: CastleSide) -> CastleRights {
        match (color, side) {
            (Color::White, CastleSide::QueenSide) => Self::WHITE_QUEEN_ROOK_MOVED,
            (Color::White, CastleSide::KingSide) => Self::WHITE_KING_ROOK_MOVED,
            (Color::Black, CastleSide::QueenSide) => Self::BLACK_QUEEN_ROOK_MOVED,
            (Color::Black, CastleSide::KingSide) => Self::BLACK_KING_ROOK_MOVED,
        }
    }

    /// Return `true` if neither `color`'s king nor its `side` rook has moved.
    #[inline]
    pub const fn has(self, color: Color, side: CastleSide) -> bool {
        let flags = Self::king_flag(color).0 | Self::rook_flag(color, side).0;
        self.0 & flags == 0
    }

    /// Flag to set when a piece leaves `square`, if that square is a king or
    /// rook home square. Whatever leaves it, the original piece is gone.
    pub const fn flag_for_origin(square: Square) -> CastleRights {
        match square.index() {
            4 => Self::WHITE_KING_MOVED,
            0 => Self::WHITE_QUEEN_ROOK_MOVED,
            7 => Self::WHITE_KING_ROOK_MOVED,
            60 => Self::BLACK_KING_MOVED,
            56 => Self::BLACK_QUEEN_ROOK_MOVED,
            63 => Self::BLACK_KING_ROOK_MOVED,
            _ => Self::UNMOVED,
        }
    }

    /// Parse the FEN castling field (e.g. "KQkq", "Kq", "-").
    ///
    /// A missing letter marks that wing's rook as moved; a color with no
    /// letters at all also has its king marked as moved.
    pub fn from_fen(s: &str) -> Result<CastleRights, FenError> {
        let mut available = [[false; 2]; 2];
        if s != "-" {
            for c in s.chars() {
                let (color, side) = match c {
                    'K' => (0, 0),
                    'Q' => (0, 1),
                    'k' => (1, 0),
                    'q' => (1, 1),
                    _ => return Err(FenError::InvalidCastlingChar { character: c }),
                };
                available[color][side] = true;
            }
        }

        let mut rights = CastleRights::UNMOVED;
        for (color, wings) in Color::ALL.into_iter().zip(available) {
            for (side, open) in CastleSide::ALL.into_iter().zip(wings) {
                if !open {
                    rights = rights.with(Self::rook_flag(color, side));
                }
            }
            if wings == [false, false] {
                rights = rights.with(Self::king_flag(color));
            }
        }
        Ok(rights)
    }

    /// Serialize to the FEN castling field.
    pub fn to_fen(self) -> String {
        let mut s = String::with_capacity(4);
        for (color, letters) in [(Color::White, ['K', 'Q']), (Color::Black, ['k', 'q'])] {
            for (side, letter) in CastleSide::ALL.into_iter().zip(letters) {
                if self.has(color, side) {
                    s.push(letter);
                }
            }
        }
        if s.is_empty() {
            s.push('-');
        }
        s
    }
}

impl Default for CastleRights {
    fn default() -> Self {
        CastleRights::UNMOVED
    }
}

impl fmt::Display for CastleRights {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.to_fen())
    }
}

impl fmt::Debug for CastleRights {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "CastleRights({:06b})", self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::{CastleRights, CastleSide};
    use crate::color::Color;
    use crate::square::Square;

    #[test]
    fn unmoved_allows_everything() {
        for color in Color::ALL {
            for side in CastleSide::ALL {
                assert!(CastleRights::UNMOVED.has(color, side));
                assert!(!CastleRights::ALL_MOVED.has(color, side));
            }
        }
    }

    #[test]
    fn king_flag_blocks_both_wings() {
        let rights = CastleRights::UNMOVED.with(CastleRights::WHITE_KING_MOVED);
        assert!(!rights.has(Color::White, CastleSide::KingSide));
        assert!(!rights.has(Color::White, CastleSide::QueenSide));
        assert!(rights.has(Color::Black, CastleSide::KingSide));
    }

    #[test]
    fn rook_flag_blocks_one_wing() {
        let rights = CastleRights::UNMOVED.with(CastleRights::BLACK_KING_ROOK_MOVED);
        assert!(!rights.has(Color::Black, CastleSide::KingSide));
        assert!(rights.has(Color::Black, CastleSide::QueenSide));
    }

    #[test]
    fn origin_flags() {
        assert_eq!(CastleRights::flag_for_origin(Square::E1), CastleRights::WHITE_KING_MOVED);
        assert_eq!(CastleRights::flag_for_origin(Square::H8), CastleRights::BLACK_KING_ROOK_MOVED);
        assert_eq!(CastleRights::flag_for_origin(Square::D1), CastleRights::UNMOVED);
    }

    #[test]
    fn with_is_monotonic() {
        let rights = CastleRights::UNMOVED
            .with(CastleRights::WHITE_QUEEN_ROOK_MOVED)
            .with(CastleRights::UNMOVED);
        assert!(rights.contains(CastleRights::WHITE_QUEEN_ROOK_MOVED));
    }

    #[test]
    fn fen_field() {
        assert_eq!(CastleRights::from_fen("KQkq").unwrap(), CastleRights::UNMOVED);
        assert_eq!(CastleRights::from_fen("-").unwrap(), CastleRights::ALL_MOVED);

        let rights = CastleRights::from_fen("Kq").unwrap();
        assert!(rights.has(Color::White, CastleSide::KingSide));
        assert!(!rights.has(Color::White, CastleSide::QueenSide));
        assert!(!rights.has(Color::Black, CastleSide::KingSide));
        assert!(rights.has(Color::Black, CastleSide::QueenSide));
        assert_eq!(rights.to_fen(), "Kq");

        assert_eq!(CastleRights::ALL_MOVED.to_fen(), "-");
        assert!(CastleRights::from_fen("KQxq").is_err());
    }

    #[test]
    fn castle_squares() {
        let squares = CastleSide::KingSide.squares(Color::White);
        assert_eq!(squares.king_to, Square::G1);
        assert_eq!(squares.rook_to, Square::F1);
        assert_eq!(
            CastleSide::from_king_target(Color::Black, Square::C8),
            Some(CastleSide::QueenSide)
        );
        assert_eq!(CastleSide::from_king_target(Color::Black, Square::C1), None);
    }
}
