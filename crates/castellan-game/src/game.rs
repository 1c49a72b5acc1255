//! The game driver: validates requests, commits moves, and tracks promotion
//! and game-over state.

use tracing::{debug, info, trace};

use castellan_core::{
    Color, MoveEffect, PieceKind, Position, Square, is_king_in_check, is_legal_geometry,
    legal_destinations,
};

use crate::error::{IllegalReason, MoveError};
use crate::status::GameStatus;

/// A pawn waiting on its last rank for the player to pick a piece.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PendingPromotion {
    pub square: Square,
    pub color: Color,
}

/// Where the driver is in its turn cycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum DriverState {
    /// Waiting for a move request.
    Idle,
    /// Waiting for a promotion choice; the turn has not passed yet.
    PendingPromotion(PendingPromotion),
    /// Checkmate or stalemate was reached. Nothing more is accepted.
    GameOver,
}

/// Result of an accepted move request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MoveOutcome {
    pub position: Position,
    /// Status after the turn passed. While `pending_promotion` is set the turn
    /// has not passed, so this repeats the status from before the move (it may
    /// still read `Check` for the mover) and means nothing until
    /// [`Game::choose_promotion`] returns the real one.
    pub status: GameStatus,
    /// Set when the move put a pawn on its last rank; call
    /// [`Game::choose_promotion`] next.
    pub pending_promotion: Option<PendingPromotion>,
}

/// Result of an accepted promotion choice.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PromotionOutcome {
    pub position: Position,
    pub status: GameStatus,
}

/// A single game: the position it owns and the driver state around it.
///
/// Every request either commits in full or is rejected with the game left
/// exactly as it was.
#[derive(Debug, Clone)]
pub struct Game {
    position: Position,
    status: GameStatus,
    state: DriverState,
}

impl Game {
    /// Start a game from the standard initial setup.
    pub fn new() -> Game {
        Game::from_position(Position::starting_position())
    }

    /// Start a game from an arbitrary position. Its status is evaluated
    /// immediately, so a position that is already mate or stalemate starts
    /// out over.
    pub fn from_position(position: Position) -> Game {
        let status = GameStatus::of(&position);
        let state = if status.is_terminal() {
            DriverState::GameOver
        } else {
            DriverState::Idle
        };
        Game {
            position,
            status,
            state,
        }
    }

    /// Discard the current game and set up a fresh one.
    pub fn new_game(&mut self) {
        *self = Game::new();
        debug!("new game");
    }

    #[inline]
    pub fn position(&self) -> &Position {
        &self.position
    }

    /// The status as of the last turn change.
    #[inline]
    pub fn status(&self) -> GameStatus {
        self.status
    }

    #[inline]
    pub fn is_awaiting_promotion(&self) -> bool {
        matches!(self.state, DriverState::PendingPromotion(_))
    }

    pub fn pending_promotion(&self) -> Option<PendingPromotion> {
        match self.state {
            DriverState::PendingPromotion(pending) => Some(pending),
            _ => None,
        }
    }

    #[inline]
    pub fn is_over(&self) -> bool {
        self.state == DriverState::GameOver
    }

    /// Squares the piece on `from` may move to, for highlighting. Empty if
    /// `from` does not hold a piece of the side to move or the game is not
    /// waiting for a move.
    pub fn legal_destinations(&self, from: Square) -> Vec<Square> {
        let movable = self.state == DriverState::Idle
            && self
                .position
                .piece_at(from)
                .is_some_and(|piece| piece.color == self.position.side_to_move());
        if movable {
            legal_destinations(&self.position, from)
        } else {
            Vec::new()
        }
    }

    /// Move the piece on `from` to `to`.
    ///
    /// # Errors
    ///
    /// - [`MoveError::GameOver`] after checkmate or stalemate.
    /// - [`MoveError::PromotionPending`] while a promotion choice is due.
    /// - [`MoveError::InvalidSelection`] if `from` has no piece of the side to move.
    /// - [`MoveError::IllegalMove`] if the piece cannot go there or the move
    ///   would leave the mover's king in check.
    pub fn request_move(&mut self, from: Square, to: Square) -> Result<MoveOutcome, MoveError> {
        match self.state {
            DriverState::GameOver => return Err(MoveError::GameOver),
            DriverState::PendingPromotion(pending) => {
                return Err(MoveError::PromotionPending {
                    square: pending.square,
                });
            }
            DriverState::Idle => {}
        }

        let us = self.position.side_to_move();
        let piece = self
            .position
            .piece_at(from)
            .filter(|piece| piece.color == us)
            .ok_or(MoveError::InvalidSelection { square: from })?;

        let illegal = |reason: IllegalReason| {
            trace!(%from, %to, %reason, "move rejected");
            MoveError::IllegalMove { from, to, reason }
        };

        if from == to {
            return Err(illegal(IllegalReason::SameSquare));
        }
        if !is_legal_geometry(&self.position, piece, from, to) {
            return Err(illegal(IllegalReason::Geometry));
        }

        // Simulate on a copy; nothing below touches `self` until commit.
        let played = self
            .position
            .play(from, to)
            .ok_or(MoveError::InvalidSelection { square: from })?;
        if is_king_in_check(&played.position, us) {
            return Err(illegal(IllegalReason::KingInCheck));
        }

        self.position = played.position;
        debug!(
            color = us.name(),
            piece = %piece.kind,
            %from,
            %to,
            captured = ?played.captured,
            "move committed"
        );

        if played.effect == MoveEffect::ReachedLastRank {
            let pending = PendingPromotion {
                square: to,
                color: us,
            };
            self.state = DriverState::PendingPromotion(pending);
            debug!(square = %to, "awaiting promotion choice");
            return Ok(MoveOutcome {
                position: self.position,
                status: self.status,
                pending_promotion: Some(pending),
            });
        }

        self.finish_turn();
        Ok(MoveOutcome {
            position: self.position,
            status: self.status,
            pending_promotion: None,
        })
    }

    /// Resolve a pending promotion by replacing the pawn with `kind`.
    ///
    /// # Errors
    ///
    /// - [`MoveError::NotAwaitingPromotion`] if no promotion is pending.
    /// - [`MoveError::InvalidPromotionChoice`] for pawns and kings.
    pub fn choose_promotion(&mut self, kind: PieceKind) -> Result<PromotionOutcome, MoveError> {
        let DriverState::PendingPromotion(pending) = self.state else {
            return Err(MoveError::NotAwaitingPromotion);
        };
        if !kind.is_promotion_choice() {
            return Err(MoveError::InvalidPromotionChoice { kind });
        }

        self.position = self
            .position
            .promote(pending.square, kind)
            .ok_or(MoveError::NotAwaitingPromotion)?;
        debug!(square = %pending.square, piece = %kind, "pawn promoted");

        self.finish_turn();
        Ok(PromotionOutcome {
            position: self.position,
            status: self.status,
        })
    }

    /// Hand the move to the opponent and evaluate where that leaves them.
    fn finish_turn(&mut self) {
        self.position.pass_turn();
        self.status = GameStatus::of(&self.position);
        self.state = if self.status.is_terminal() {
            info!(status = %self.status, "game over");
            DriverState::GameOver
        } else {
            DriverState::Idle
        };
    }
}

impl Default for Game {
    fn default() -> Self {
        Game::new()
    }
}

#[cfg(test)]
mod tests {
    use super::{Game, PendingPromotion};
    use crate::error::{IllegalReason, MoveError};
    use crate::status::GameStatus;
    use castellan_core::{Color, Piece, PieceKind, Position, Square};

    fn sq(s: &str) -> Square {
        Square::from_algebraic(s).unwrap()
    }

    fn game(fen: &str) -> Game {
        Game::from_position(fen.parse::<Position>().unwrap())
    }

    #[test]
    fn opening_move() {
        let mut game = Game::new();
        let outcome = game.request_move(sq("e2"), sq("e4")).unwrap();
        assert_eq!(outcome.status, GameStatus::Ongoing);
        assert_eq!(outcome.pending_promotion, None);
        assert_eq!(outcome.position.side_to_move(), Color::Black);
        assert_eq!(game.position().en_passant(), Some(sq("e3")));
    }

    #[test]
    fn wrong_color_is_invalid_selection() {
        let mut game = Game::new();
        assert_eq!(
            game.request_move(sq("e7"), sq("e5")),
            Err(MoveError::InvalidSelection { square: sq("e7") })
        );
        assert_eq!(
            game.request_move(sq("e4"), sq("e5")),
            Err(MoveError::InvalidSelection { square: sq("e4") })
        );
    }

    #[test]
    fn same_square_is_illegal() {
        let mut game = Game::new();
        assert_eq!(
            game.request_move(sq("g1"), sq("g1")),
            Err(MoveError::IllegalMove {
                from: sq("g1"),
                to: sq("g1"),
                reason: IllegalReason::SameSquare
            })
        );
    }

    #[test]
    fn promotion_flow() {
        let mut game = game("4k3/P7/8/8/8/8/8/4K3 w - - 0 1");
        let outcome = game.request_move(sq("a7"), sq("a8")).unwrap();
        let pending = PendingPromotion {
            square: Square::A8,
            color: Color::White,
        };
        assert_eq!(outcome.pending_promotion, Some(pending));
        assert!(game.is_awaiting_promotion());
        assert_eq!(game.position().side_to_move(), Color::White);

        assert_eq!(
            game.choose_promotion(PieceKind::King),
            Err(MoveError::InvalidPromotionChoice {
                kind: PieceKind::King
            })
        );
        assert!(game.is_awaiting_promotion());

        let outcome = game.choose_promotion(PieceKind::Rook).unwrap();
        assert_eq!(outcome.position.piece_at(Square::A8), Some(Piece::WHITE_ROOK));
        assert_eq!(outcome.status, GameStatus::Check(Color::Black));
        assert!(!game.is_awaiting_promotion());
        assert_eq!(game.choose_promotion(PieceKind::Queen), Err(MoveError::NotAwaitingPromotion));
    }

    #[test]
    fn legal_destinations_for_side_to_move_only() {
        let game = Game::new();
        let mut targets = game.legal_destinations(sq("g1"));
        targets.sort_by_key(|sq| sq.index());
        assert_eq!(targets, vec![sq("f3"), sq("h3")]);
        assert!(game.legal_destinations(sq("g8")).is_empty());
    }

    #[test]
    fn new_game_resets() {
        let mut game = Game::new();
        game.request_move(sq("e2"), sq("e4")).unwrap();
        game.new_game();
        assert_eq!(*game.position(), Position::starting_position());
        assert_eq!(game.status(), GameStatus::Ongoing);
    }

    #[test]
    fn terminal_start_position_is_over() {
        let mut game = game("7k/5Q2/6K1/8/8/8/8/8 b - - 0 1");
        assert!(game.is_over());
        assert_eq!(game.status(), GameStatus::Stalemate);
        assert_eq!(game.request_move(sq("h8"), sq("g8")), Err(MoveError::GameOver));
    }
}
