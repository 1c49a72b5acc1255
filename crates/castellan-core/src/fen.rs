//! FEN string parsing and serialization for [`Position`].

use std::fmt;
use std::str::FromStr;

use tracing::debug;

use crate::board::Position;
use crate::castle_rights::CastleRights;
use crate::color::Color;
use crate::error::FenError;
use crate::piece::Piece;
use crate::piece_kind::PieceKind;
use crate::square::Square;

/// The FEN string for the standard starting position.
pub const STARTING_FEN: &str = "rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR w KQkq - 0 1";

impl FromStr for Position {
    type Err = FenError;

    fn from_str(fen: &str) -> Result<Position, FenError> {
        let fields: Vec<&str> = fen.split_whitespace().collect();
        if fields.len() != 6 {
            return Err(FenError::WrongFieldCount {
                found: fields.len(),
            });
        }

        let ranks: Vec<&str> = fields[0].split('/').collect();
        if ranks.len() != 8 {
            return Err(FenError::WrongRankCount { found: ranks.len() });
        }

        let mut board = [None; Square::COUNT];

        // FEN lists rank 8 first, which is screen row 0.
        for (rank_index, rank_str) in ranks.iter().enumerate() {
            let mut file_index: usize = 0;

            for c in rank_str.chars() {
                if let Some(digit) = c.to_digit(10) {
                    if !(1..=8).contains(&digit) {
                        return Err(FenError::InvalidPieceChar { character: c });
                    }
                    file_index += digit as usize;
                    continue;
                }

                let piece = Piece::from_fen_char(c)
                    .ok_or(FenError::InvalidPieceChar { character: c })?;
                let sq = (file_index < 8)
                    .then(|| Square::from_screen(file_index as u8, rank_index as u8))
                    .flatten()
                    .ok_or(FenError::BadRankLength {
                        rank_index,
                        length: file_index + 1,
                    })?;
                board[sq.index()] = Some(piece);
                file_index += 1;
            }

            if file_index != 8 {
                return Err(FenError::BadRankLength {
                    rank_index,
                    length: file_index,
                });
            }
        }

        let side_to_move = match fields[1] {
            "w" => Color::White,
            "b" => Color::Black,
            other => {
                return Err(FenError::InvalidColor {
                    found: other.to_string(),
                });
            }
        };

        let castling = CastleRights::from_fen(fields[2])?;

        let en_passant = match fields[3] {
            "-" => None,
            field => {
                let sq = Square::from_algebraic(field)
                    .filter(|&sq| en_passant_fits(&board, side_to_move, sq))
                    .ok_or_else(|| FenError::InvalidEnPassant {
                        found: field.to_string(),
                    })?;
                Some(sq)
            }
        };

        let halfmove_clock = fields[4]
            .parse::<u16>()
            .map_err(|_| FenError::InvalidMoveCounter {
                field: "halfmove clock",
                found: fields[4].to_string(),
            })?;

        let fullmove_number = fields[5]
            .parse::<u16>()
            .map_err(|_| FenError::InvalidMoveCounter {
                field: "fullmove number",
                found: fields[5].to_string(),
            })?;

        let position = Position::from_raw(
            board,
            side_to_move,
            castling,
            en_passant,
            halfmove_clock,
            fullmove_number,
        );

        if let Err(error) = position.validate() {
            debug!(%fen, %error, "FEN describes an invalid board");
            return Err(error.into());
        }
        Ok(position)
    }
}

/// An en passant target is the square the opponent's pawn just skipped: on
/// the rank in front of that pawn's home rank, empty, with the pawn one
/// square beyond it and its home square vacated.
fn en_passant_fits(board: &[Option<Piece>; Square::COUNT], side_to_move: Color, target: Square) -> bool {
    let them = side_to_move.flip();
    let forward = them.forward();
    if target.rank() as i8 != them.pawn_rank() as i8 + forward {
        return false;
    }
    let pawn = Piece::new(PieceKind::Pawn, them);
    let at = |sq: Option<Square>| sq.and_then(|sq| board[sq.index()]);
    at(Some(target)).is_none()
        && at(target.offset(0, forward)) == Some(pawn)
        && target.offset(0, -forward).is_some_and(|home| board[home.index()].is_none())
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for row in 0u8..8 {
            let mut empty_count = 0u8;

            for col in 0u8..8 {
                match Square::from_screen(col, row).and_then(|sq| self.piece_at(sq)) {
                    Some(piece) => {
                        if empty_count > 0 {
                            write!(f, "{empty_count}")?;
                            empty_count = 0;
                        }
                        write!(f, "{piece}")?;
                    }
                    None => empty_count += 1,
                }
            }

            if empty_count > 0 {
                write!(f, "{empty_count}")?;
            }
            if row < 7 {
                write!(f, "/")?;
            }
        }

        write!(f, " {} {}", self.side_to_move(), self.castling())?;

        match self.en_passant() {
            Some(sq) => write!(f, " {sq}")?,
            None => write!(f, " -")?,
        }

        write!(f, " {} {}", self.halfmove_clock(), self.fullmove_number())
    }
}
