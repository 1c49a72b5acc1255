//! Core chess types: position representation, move legality, and attack queries.

mod attacks;
mod board;
mod castle_rights;
mod color;
mod error;
mod fen;
mod legality;
mod make_move;
mod movegen;
mod piece;
mod piece_kind;
mod square;

pub use attacks::{is_king_in_check, is_square_attacked};
pub use board::{Position, PrettyBoard};
pub use castle_rights::{CastleRights, CastleSide, CastleSquares};
pub use color::Color;
pub use error::{BoardError, FenError};
pub use fen::STARTING_FEN;
pub use legality::is_legal_geometry;
pub use make_move::{MoveEffect, Played};
pub use movegen::{has_any_legal_move, is_legal, leaves_king_safe, legal_destinations, legal_moves};
pub use piece::Piece;
pub use piece_kind::PieceKind;
pub use square::Square;
