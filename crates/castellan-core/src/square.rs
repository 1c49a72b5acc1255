//! Board squares.

use std::fmt;

/// A square on the board, stored as `rank * 8 + file` (a1 = 0, h8 = 63).
///
/// Every `Square` value is on the board. Constructors that take raw
/// coordinates return `None` for anything outside 0..8, so "no square" is
/// always expressed as `Option<Square>`.
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
pub struct Square(u8);

impl Square {
    /// Total number of squares.
    pub const COUNT: usize = 64;

    /// Create a square from a file (0 = a) and rank (0 = rank 1).
    #[inline]
    pub const fn from_coords(file: u8, rank: u8) -> Option<Square> {
        if file < 8 && rank < 8 {
            Some(Square(rank * 8 + file))
        } else {
            None
        }
    }

    /// Create a square from screen coordinates, where row 0 is the top of the
    /// board as White sees it (Black's back rank) and column 0 is the a-file.
    ///
    /// A presentation layer maps a pointer position to `(x / size, y / size)`
    /// and hands it here.
    #[inline]
    pub const fn from_screen(col: u8, row: u8) -> Option<Square> {
        if row < 8 {
            Square::from_coords(col, 7 - row)
        } else {
            None
        }
    }

    /// Parse algebraic notation such as `e4`.
    pub fn from_algebraic(s: &str) -> Option<Square> {
        match s.as_bytes() {
            [file @ b'a'..=b'h', rank @ b'1'..=b'8'] => {
                Square::from_coords(file - b'a', rank - b'1')
            }
            _ => None,
        }
    }

    /// Return the zero-based index (0..64).
    #[inline]
    pub const fn index(self) -> usize {
        self.0 as usize
    }

    /// File index, 0 (a) to 7 (h).
    #[inline]
    pub const fn file(self) -> u8 {
        self.0 % 8
    }

    /// Rank index, 0 (rank 1) to 7 (rank 8).
    #[inline]
    pub const fn rank(self) -> u8 {
        self.0 / 8
    }

    /// Row index in screen coordinates (0 = rank 8).
    #[inline]
    pub const fn screen_row(self) -> u8 {
        7 - self.rank()
    }

    /// Return the square `df` files and `dr` ranks away, if it is on the board.
    #[inline]
    pub const fn offset(self, df: i8, dr: i8) -> Option<Square> {
        let file = self.file() as i8 + df;
        let rank = self.rank() as i8 + dr;
        if file < 0 || rank < 0 {
            return None;
        }
        Square::from_coords(file as u8, rank as u8)
    }

    /// Iterate over all 64 squares in index order (a1, b1, ..., h8).
    pub fn all() -> impl Iterator<Item = Square> {
        (0u8..64).map(Square)
    }

    // Squares the castling rules refer to by name.
    pub const A1: Square = Square(0);
    pub const C1: Square = Square(2);
    pub const D1: Square = Square(3);
    pub const E1: Square = Square(4);
    pub const F1: Square = Square(5);
    pub const G1: Square = Square(6);
    pub const H1: Square = Square(7);
    pub const A8: Square = Square(56);
    pub const C8: Square = Square(58);
    pub const D8: Square = Square(59);
    pub const E8: Square = Square(60);
    pub const F8: Square = Square(61);
    pub const G8: Square = Square(62);
    pub const H8: Square = Square(63);
}

impl fmt::Display for Square {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let file = (b'a' + self.file()) as char;
        write!(f, "{}{}", file, self.rank() + 1)
    }
}

impl fmt::Debug for Square {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Square({})", self)
    }
}

#[cfg(test)]
mod tests {
    use super::Square;

    fn sq(s: &str) -> Square {
        Square::from_algebraic(s).unwrap()
    }

    #[test]
    fn coords_roundtrip() {
        for square in Square::all() {
            assert_eq!(Square::from_coords(square.file(), square.rank()), Some(square));
        }
        assert_eq!(Square::all().count(), Square::COUNT);
    }

    #[test]
    fn off_board_is_none() {
        assert!(Square::from_coords(8, 0).is_none());
        assert!(Square::from_coords(0, 8).is_none());
        assert!(Square::from_screen(0, 8).is_none());
        assert!(Square::from_screen(8, 0).is_none());
    }

    #[test]
    fn algebraic_notation() {
        assert_eq!(sq("a1"), Square::A1);
        assert_eq!(sq("h8"), Square::H8);
        assert_eq!(sq("e4").index(), 28);
        assert_eq!(format!("{}", sq("e4")), "e4");
        assert!(Square::from_algebraic("i1").is_none());
        assert!(Square::from_algebraic("a9").is_none());
        assert!(Square::from_algebraic("a").is_none());
        assert!(Square::from_algebraic("a1b").is_none());
    }

    #[test]
    fn screen_coordinates_put_black_on_top() {
        assert_eq!(Square::from_screen(0, 0), Some(Square::A8));
        assert_eq!(Square::from_screen(4, 7), Some(Square::E1));
        assert_eq!(Square::E8.screen_row(), 0);
        assert_eq!(Square::E1.screen_row(), 7);
    }

    #[test]
    fn offsets_stay_on_board() {
        assert_eq!(sq("e4").offset(1, 2), Some(sq("f6")));
        assert_eq!(sq("a1").offset(-1, 0), None);
        assert_eq!(sq("h8").offset(0, 1), None);
        assert_eq!(sq("b2").offset(-1, -1), Some(Square::A1));
    }

    #[test]
    fn debug_shows_algebraic() {
        assert_eq!(format!("{:?}", sq("e4")), "Square(e4)");
    }
}
