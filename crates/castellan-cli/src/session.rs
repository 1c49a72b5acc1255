//! Line-oriented game session: reads commands, drives a [`Game`], and prints
//! the board and status.

use std::io::{BufRead, Write};

use tracing::{debug, info, warn};

use castellan_core::Square;
use castellan_game::{Game, GameStatus};

use crate::command::{Command, CoordMode, ShellOption, parse_command};
use crate::error::ShellError;

/// Settings adjustable with `set`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ShellConfig {
    /// Print the board after every accepted move.
    pub show_board: bool,
    pub coords: CoordMode,
}

impl Default for ShellConfig {
    fn default() -> Self {
        Self {
            show_board: true,
            coords: CoordMode::Algebraic,
        }
    }
}

/// Whether the read loop keeps going after a command.
enum Flow {
    Continue,
    Quit,
}

/// A shell session around one [`Game`].
#[derive(Debug, Default)]
pub struct Session {
    game: Game,
    config: ShellConfig,
}

impl Session {
    /// Create a session with a fresh game and default settings.
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_config(config: ShellConfig) -> Self {
        Self {
            game: Game::new(),
            config,
        }
    }

    pub fn game(&self) -> &Game {
        &self.game
    }

    pub fn config(&self) -> ShellConfig {
        self.config
    }

    /// Run the read loop until `quit` or end of input.
    ///
    /// Command errors are written to `out` and the loop continues; only I/O
    /// failures end the session early.
    pub fn run<R: BufRead, W: Write>(&mut self, input: R, out: &mut W) -> Result<(), ShellError> {
        self.print_board(out)?;
        self.print_status(out)?;

        for line in input.lines() {
            let line = line?;
            let trimmed = line.trim();
            if trimmed.is_empty() {
                continue;
            }
            debug!(cmd = %trimmed, "received command");

            let result =
                parse_command(trimmed, self.config.coords).and_then(|cmd| self.execute(cmd, out));
            match result {
                Ok(Flow::Continue) => {}
                Ok(Flow::Quit) => break,
                Err(ShellError::Io { source }) => return Err(ShellError::Io { source }),
                Err(error) => {
                    warn!(%error, "command failed");
                    writeln!(out, "error: {error}")?;
                }
            }
            out.flush()?;
        }

        info!("session closed");
        Ok(())
    }

    fn execute<W: Write>(&mut self, cmd: Command, out: &mut W) -> Result<Flow, ShellError> {
        match cmd {
            Command::Move { from, to } => self.handle_move(from, to, out)?,
            Command::Promote(kind) => {
                self.game.choose_promotion(kind)?;
                self.after_turn(out)?;
            }
            Command::New => {
                self.game.new_game();
                self.print_board(out)?;
                self.print_status(out)?;
            }
            Command::Fen(position) => {
                self.game = Game::from_position(position);
                debug!(fen = %position, "position loaded");
                self.print_board(out)?;
                self.print_status(out)?;
            }
            Command::Show => {
                writeln!(out, "{}", self.game.position().pretty())?;
                writeln!(out, "fen {}", self.game.position())?;
            }
            Command::Status => self.print_status(out)?,
            Command::Moves(from) => self.handle_moves(from, out)?,
            Command::Set(option) => self.handle_set(option, out)?,
            Command::Quit => return Ok(Flow::Quit),
            Command::Empty => {}
        }
        Ok(Flow::Continue)
    }

    fn handle_move<W: Write>(&mut self, from: Square, to: Square, out: &mut W) -> Result<(), ShellError> {
        let outcome = self.game.request_move(from, to)?;
        if let Some(pending) = outcome.pending_promotion {
            self.print_board(out)?;
            writeln!(
                out,
                "{} pawn on {} promotes: choose q, r, b or n",
                pending.color.name(),
                self.config.coords.format_square(pending.square)
            )?;
            return Ok(());
        }
        self.after_turn(out)
    }

    fn handle_moves<W: Write>(&self, from: Square, out: &mut W) -> Result<(), ShellError> {
        let coords = self.config.coords;
        let mut targets = self.game.legal_destinations(from);
        targets.sort_by_key(|sq| sq.index());
        if targets.is_empty() {
            writeln!(out, "no moves from {}", coords.format_square(from))?;
        } else {
            let list: Vec<String> = targets.into_iter().map(|sq| coords.format_square(sq)).collect();
            writeln!(out, "{}", list.join(" "))?;
        }
        Ok(())
    }

    fn handle_set<W: Write>(&mut self, option: ShellOption, out: &mut W) -> Result<(), ShellError> {
        match option {
            ShellOption::Board(on) => {
                self.config.show_board = on;
                writeln!(out, "board {}", if on { "on" } else { "off" })?;
            }
            ShellOption::Coords(mode) => {
                self.config.coords = mode;
                writeln!(out, "coords {mode}")?;
            }
        }
        debug!(config = ?self.config, "settings changed");
        Ok(())
    }

    fn after_turn<W: Write>(&self, out: &mut W) -> Result<(), ShellError> {
        self.print_board(out)?;
        self.print_status(out)
    }

    fn print_board<W: Write>(&self, out: &mut W) -> Result<(), ShellError> {
        if self.config.show_board {
            writeln!(out, "{}", self.game.position().pretty())?;
        }
        Ok(())
    }

    fn print_status<W: Write>(&self, out: &mut W) -> Result<(), ShellError> {
        let side = self.game.position().side_to_move();
        if self.game.is_over() {
            writeln!(out, "game over: {}", self.game.status())?;
        } else if self.game.is_awaiting_promotion() {
            writeln!(out, "{} to choose a promotion piece", side.name())?;
        } else if let GameStatus::Check(_) = self.game.status() {
            writeln!(out, "{} to move, in check", side.name())?;
        } else {
            writeln!(out, "{} to move", side.name())?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use std::io::Cursor;

    use castellan_core::{Piece, Square};
    use castellan_game::GameStatus;

    use super::{Session, ShellConfig};
    use crate::command::CoordMode;

    fn run(session: &mut Session, script: &str) -> String {
        let mut out = Vec::new();
        session.run(Cursor::new(script), &mut out).unwrap();
        String::from_utf8(out).unwrap()
    }

    fn quiet() -> Session {
        Session::with_config(ShellConfig {
            show_board: false,
            ..ShellConfig::default()
        })
    }

    #[test]
    fn plays_moves_and_reports_status() {
        let mut session = quiet();
        let out = run(&mut session, "e2e4\nmove e7 e5\nstatus\n");
        assert!(out.ends_with("white to move\n"), "{out}");
        let position = session.game().position();
        assert_eq!(position.piece_at(Square::from_algebraic("e4").unwrap()), Some(Piece::WHITE_PAWN));
        assert_eq!(position.piece_at(Square::from_algebraic("e5").unwrap()), Some(Piece::BLACK_PAWN));
    }

    #[test]
    fn errors_are_reported_and_the_session_continues() {
        let mut session = quiet();
        let out = run(&mut session, "e2e5\nfly\ne2e4\n");
        assert!(out.contains("error: illegal move e2e5"), "{out}");
        assert!(out.contains("error: unknown command: fly"), "{out}");
        assert!(out.ends_with("black to move\n"), "{out}");
    }

    #[test]
    fn quit_stops_reading() {
        let mut session = quiet();
        run(&mut session, "quit\ne2e4\n");
        assert_eq!(session.game().position().side_to_move(), castellan_core::Color::White);
    }

    #[test]
    fn promotion_through_the_shell() {
        let mut session = quiet();
        let out = run(&mut session, "fen 4k3/P7/8/8/8/8/8/4K3 w - - 0 1\na7a8\ne1e2\npromote q\n");
        assert!(out.contains("white pawn on a8 promotes"), "{out}");
        assert!(out.contains("error: a promotion choice is pending on a8"), "{out}");
        assert_eq!(session.game().status(), GameStatus::Check(castellan_core::Color::Black));
        assert_eq!(
            session.game().position().piece_at(Square::A8),
            Some(Piece::WHITE_QUEEN)
        );
    }

    #[test]
    fn mate_is_announced() {
        let mut session = quiet();
        let out = run(&mut session, "fen 6k1/5ppp/8/8/8/8/8/R5K1 w - - 0 1\na1a8\ng8h8\n");
        assert!(out.contains("game over: checkmate, white wins"), "{out}");
        assert!(out.contains("error: the game is over"), "{out}");
    }

    #[test]
    fn inconsistent_fen_is_refused_and_the_game_kept() {
        let mut session = quiet();
        let out = run(
            &mut session,
            "e2e4\nfen 4k3/8/8/8/8/8/3PP3/4K3 w - e3 0 1\nfen 4k3/8/8/8/8/8/8/4RK2 w - - 0 1\n",
        );
        assert!(out.contains("invalid en passant square: \"e3\""), "{out}");
        assert!(out.contains("black is in check but it is not its turn"), "{out}");
        assert_eq!(
            session.game().position().piece_at(Square::from_algebraic("e4").unwrap()),
            Some(Piece::WHITE_PAWN)
        );
    }

    #[test]
    fn lists_destinations() {
        let mut session = quiet();
        let out = run(&mut session, "moves g1\nmoves e7\n");
        assert!(out.contains("f3 h3\n"), "{out}");
        assert!(out.contains("no moves from e7\n"), "{out}");
    }

    #[test]
    fn screen_coordinates() {
        let mut session = quiet();
        let out = run(&mut session, "set coords screen\n4644\nmoves 60\n");
        assert_eq!(session.config().coords, CoordMode::Screen);
        assert!(out.contains("coords screen\n"), "{out}");
        assert!(out.contains("52 72\n"), "{out}");
        assert_eq!(
            session.game().position().piece_at(Square::from_algebraic("e4").unwrap()),
            Some(Piece::WHITE_PAWN)
        );
    }

    #[test]
    fn board_is_printed_by_default() {
        let mut session = Session::new();
        let out = run(&mut session, "show\n");
        assert!(out.contains("8  r n b q k b n r"), "{out}");
        assert!(out.contains("   a b c d e f g h"), "{out}");
        assert!(out.contains("fen rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR w KQkq - 0 1"), "{out}");
    }
}
