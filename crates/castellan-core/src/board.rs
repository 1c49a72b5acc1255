//! The position: piece placement, side to move, castling flags, en passant, and move counters.

use std::fmt;

use crate::attacks::is_king_in_check;
use crate::castle_rights::CastleRights;
use crate::color::Color;
use crate::error::BoardError;
use crate::piece::Piece;
use crate::piece_kind::PieceKind;
use crate::square::Square;

/// Back-rank piece order from the a-file to the h-file.
const BACK_RANK: [PieceKind; 8] = [
    PieceKind::Rook,
    PieceKind::Knight,
    PieceKind::Bishop,
    PieceKind::Queen,
    PieceKind::King,
    PieceKind::Bishop,
    PieceKind::Knight,
    PieceKind::Rook,
];

/// Complete game position.
///
/// `Position` is `Copy`: simulating a move means copying the position and
/// mutating the copy, so the original is never touched by a rejected move.
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
pub struct Position {
    /// One cell per square, indexed by [`Square::index`].
    board: [Option<Piece>; Square::COUNT],
    side_to_move: Color,
    castling: CastleRights,
    /// The square a pawn skipped over on the previous move, if it double-stepped.
    en_passant: Option<Square>,
    /// Halfmove clock, carried for FEN.
    halfmove_clock: u16,
    /// Fullmove number (starts at 1, incremented after Black moves).
    fullmove_number: u16,
}

impl Position {
    /// Return the standard starting position.
    pub fn starting_position() -> Position {
        let mut position = Position::empty(Color::White);
        for color in Color::ALL {
            for (file, kind) in (0u8..).zip(BACK_RANK) {
                if let Some(sq) = Square::from_coords(file, color.back_rank()) {
                    position.put(sq, Piece::new(kind, color));
                }
                if let Some(sq) = Square::from_coords(file, color.pawn_rank()) {
                    position.put(sq, Piece::new(PieceKind::Pawn, color));
                }
            }
        }
        position
    }

    /// An empty board with `side_to_move` to play and every castling flag clear.
    pub fn empty(side_to_move: Color) -> Position {
        Position {
            board: [None; Square::COUNT],
            side_to_move,
            castling: CastleRights::UNMOVED,
            en_passant: None,
            halfmove_clock: 0,
            fullmove_number: 1,
        }
    }

    /// Construct a position from raw components. Used by FEN parsing.
    pub(crate) fn from_raw(
        board: [Option<Piece>; Square::COUNT],
        side_to_move: Color,
        castling: CastleRights,
        en_passant: Option<Square>,
        halfmove_clock: u16,
        fullmove_number: u16,
    ) -> Position {
        Position {
            board,
            side_to_move,
            castling,
            en_passant,
            halfmove_clock,
            fullmove_number,
        }
    }

    /// Return the piece on the given square, if any.
    #[inline]
    pub fn piece_at(&self, sq: Square) -> Option<Piece> {
        self.board[sq.index()]
    }

    /// Return `true` if the given square holds a piece.
    #[inline]
    pub fn is_occupied(&self, sq: Square) -> bool {
        self.board[sq.index()].is_some()
    }

    /// Iterate over every occupied square and its piece.
    pub fn pieces(&self) -> impl Iterator<Item = (Square, Piece)> + '_ {
        Square::all().filter_map(|sq| self.piece_at(sq).map(|piece| (sq, piece)))
    }

    /// Return the square of `color`'s king, or `None` if it has none.
    pub fn king_square(&self, color: Color) -> Option<Square> {
        let king = Piece::new(PieceKind::King, color);
        self.pieces()
            .find(|&(_, piece)| piece == king)
            .map(|(sq, _)| sq)
    }

    #[inline]
    pub fn side_to_move(&self) -> Color {
        self.side_to_move
    }

    #[inline]
    pub fn castling(&self) -> CastleRights {
        self.castling
    }

    #[inline]
    pub fn en_passant(&self) -> Option<Square> {
        self.en_passant
    }

    #[inline]
    pub fn halfmove_clock(&self) -> u16 {
        self.halfmove_clock
    }

    #[inline]
    pub fn fullmove_number(&self) -> u16 {
        self.fullmove_number
    }

    /// Place a piece, replacing whatever was there.
    #[inline]
    pub fn put(&mut self, sq: Square, piece: Piece) {
        self.board[sq.index()] = Some(piece);
    }

    /// Empty a square, returning what stood on it.
    #[inline]
    pub fn take(&mut self, sq: Square) -> Option<Piece> {
        self.board[sq.index()].take()
    }

    /// Builder-style setter for the castling flags.
    pub fn with_castling(mut self, castling: CastleRights) -> Position {
        self.castling = castling;
        self
    }

    /// Builder-style setter for the en passant target.
    pub fn with_en_passant(mut self, sq: Option<Square>) -> Position {
        self.en_passant = sq;
        self
    }

    #[inline]
    pub(crate) fn set_castling(&mut self, rights: CastleRights) {
        self.castling = rights;
    }

    #[inline]
    pub(crate) fn set_en_passant(&mut self, sq: Option<Square>) {
        self.en_passant = sq;
    }

    #[inline]
    pub(crate) fn set_halfmove_clock(&mut self, clock: u16) {
        self.halfmove_clock = clock;
    }

    /// Hand the move to the other side, bumping the fullmove number after Black.
    pub fn pass_turn(&mut self) {
        if self.side_to_move == Color::Black {
            self.fullmove_number = self.fullmove_number.saturating_add(1);
        }
        self.side_to_move = self.side_to_move.flip();
    }

    /// Validate the structural integrity of the position: one king per side,
    /// no pawns on the first or eighth rank, and the side that just moved not
    /// left in check.
    pub fn validate(&self) -> Result<(), BoardError> {
        for color in Color::ALL {
            let king = Piece::new(PieceKind::King, color);
            let count = self.pieces().filter(|&(_, piece)| piece == king).count();
            if count != 1 {
                return Err(BoardError::InvalidKingCount { color, count });
            }
        }

        let pawn_on_back_rank = self
            .pieces()
            .any(|(sq, piece)| piece.kind == PieceKind::Pawn && (sq.rank() == 0 || sq.rank() == 7));
        if pawn_on_back_rank {
            return Err(BoardError::PawnsOnBackRank);
        }

        let waiting = self.side_to_move.flip();
        if is_king_in_check(self, waiting) {
            return Err(BoardError::OpponentInCheck { color: waiting });
        }

        Ok(())
    }

    /// Return a pretty-printable wrapper for this position.
    pub fn pretty(&self) -> PrettyBoard<'_> {
        PrettyBoard(self)
    }
}

impl Default for Position {
    fn default() -> Self {
        Position::starting_position()
    }
}

impl fmt::Debug for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Position(\"{}\")", self)
    }
}

/// Wrapper for pretty-printing a position as an 8x8 grid, rank 8 on top.
pub struct PrettyBoard<'a>(&'a Position);

impl fmt::Display for PrettyBoard<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for row in 0u8..8 {
            write!(f, "{}  ", 8 - row)?;
            for col in 0u8..8 {
                let c = Square::from_screen(col, row)
                    .and_then(|sq| self.0.piece_at(sq))
                    .map_or('.', Piece::fen_char);
                if col < 7 {
                    write!(f, "{c} ")?;
                } else {
                    write!(f, "{c}")?;
                }
            }
            writeln!(f)?;
        }
        write!(f, "   a b c d e f g h")
    }
}
