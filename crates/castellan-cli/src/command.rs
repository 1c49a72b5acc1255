//! Shell command parsing.

use std::fmt;

use castellan_core::{PieceKind, Position, Square};

use crate::error::ShellError;

/// How squares are written on the command line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum CoordMode {
    /// File letter and rank digit, e.g. `e2`.
    #[default]
    Algebraic,
    /// Screen column then screen row, both `0..8`, row 0 at the top (rank 8).
    /// `46` is e2.
    Screen,
}

impl CoordMode {
    /// Parse one square token.
    pub fn parse_square(self, token: &str) -> Result<Square, ShellError> {
        let square = match self {
            CoordMode::Algebraic => Square::from_algebraic(token),
            CoordMode::Screen => match token.as_bytes() {
                [col @ b'0'..=b'7', row @ b'0'..=b'7'] => {
                    Square::from_screen(col - b'0', row - b'0')
                }
                _ => None,
            },
        };
        square.ok_or_else(|| ShellError::InvalidSquare {
            token: token.to_string(),
        })
    }

    /// Write a square the way this mode reads it.
    pub fn format_square(self, square: Square) -> String {
        match self {
            CoordMode::Algebraic => square.to_string(),
            CoordMode::Screen => format!("{}{}", square.file(), square.screen_row()),
        }
    }
}

impl fmt::Display for CoordMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CoordMode::Algebraic => f.write_str("algebraic"),
            CoordMode::Screen => f.write_str("screen"),
        }
    }
}

/// A setting changed with `set`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ShellOption {
    /// Print the board after every accepted move.
    Board(bool),
    Coords(CoordMode),
}

/// A parsed shell command.
#[derive(Debug)]
pub enum Command {
    /// `move e2e4`, `move e2 e4`, or a bare `e2e4`.
    Move { from: Square, to: Square },
    /// `promote q` -- finish a pending promotion.
    Promote(PieceKind),
    /// `new` -- start over from the initial setup.
    New,
    /// `fen <fen>` -- load a position.
    Fen(Position),
    /// `show` -- print the board and its FEN.
    Show,
    /// `status` -- print whose turn it is and the game status.
    Status,
    /// `moves e2` -- list where the piece on a square may go.
    Moves(Square),
    /// `set <option> <value>`
    Set(ShellOption),
    Quit,
    /// Blank line.
    Empty,
}

/// Parse a single line of shell input into a [`Command`].
pub fn parse_command(line: &str, coords: CoordMode) -> Result<Command, ShellError> {
    let tokens: Vec<&str> = line.split_whitespace().collect();
    let Some((&head, args)) = tokens.split_first() else {
        return Ok(Command::Empty);
    };

    match head {
        "move" | "m" => parse_move(args, coords),
        "promote" | "p" => parse_promote(args),
        "new" => Ok(Command::New),
        "fen" => parse_fen(args),
        "show" => Ok(Command::Show),
        "status" => Ok(Command::Status),
        "moves" => {
            let token = args.first().ok_or(ShellError::MissingArgument {
                command: "moves",
                usage: "moves <square>",
            })?;
            Ok(Command::Moves(coords.parse_square(token)?))
        }
        "set" => parse_set(args),
        "quit" | "exit" => Ok(Command::Quit),
        // A bare move such as `e2e4`.
        other => parse_move(&[other], coords).map_err(|_| ShellError::UnknownCommand {
            command: other.to_string(),
        }),
    }
}

/// Parse the arguments of `move`: either one joined token or two squares.
fn parse_move(args: &[&str], coords: CoordMode) -> Result<Command, ShellError> {
    let (from, to) = match args {
        [joined] if joined.len() == 4 && joined.is_ascii() => joined.split_at(2),
        [from, to] => (*from, *to),
        [] => {
            return Err(ShellError::MissingArgument {
                command: "move",
                usage: "move <from><to>",
            });
        }
        _ => {
            return Err(ShellError::InvalidSquare {
                token: args.join(" "),
            });
        }
    };
    Ok(Command::Move {
        from: coords.parse_square(from)?,
        to: coords.parse_square(to)?,
    })
}

/// Parse the piece for `promote`. Accepts a letter or the full name.
fn parse_promote(args: &[&str]) -> Result<Command, ShellError> {
    let token = args.first().ok_or(ShellError::MissingArgument {
        command: "promote",
        usage: "promote q|r|b|n",
    })?;
    let lowered = token.to_ascii_lowercase();
    let kind = PieceKind::PROMOTIONS
        .into_iter()
        .find(|kind| lowered == kind.name() || lowered == kind.fen_char().to_string())
        .ok_or_else(|| ShellError::InvalidPromotion {
            token: token.to_string(),
        })?;
    Ok(Command::Promote(kind))
}

/// Parse `fen <six fields>`.
fn parse_fen(args: &[&str]) -> Result<Command, ShellError> {
    if args.is_empty() {
        return Err(ShellError::MissingArgument {
            command: "fen",
            usage: "fen <fen-string>",
        });
    }
    let fen = args.join(" ");
    let position = fen
        .parse::<Position>()
        .map_err(|source| ShellError::InvalidFen {
            fen: fen.clone(),
            source,
        })?;
    Ok(Command::Fen(position))
}

/// Parse `set board on|off` and `set coords algebraic|screen`.
fn parse_set(args: &[&str]) -> Result<Command, ShellError> {
    let [name, value] = args else {
        return Err(ShellError::MissingArgument {
            command: "set",
            usage: "set <option> <value>",
        });
    };

    let option = match *name {
        "board" => match *value {
            "on" | "true" => ShellOption::Board(true),
            "off" | "false" => ShellOption::Board(false),
            _ => {
                return Err(ShellError::InvalidOptionValue {
                    name: "board",
                    value: value.to_string(),
                });
            }
        },
        "coords" => match *value {
            "algebraic" => ShellOption::Coords(CoordMode::Algebraic),
            "screen" => ShellOption::Coords(CoordMode::Screen),
            _ => {
                return Err(ShellError::InvalidOptionValue {
                    name: "coords",
                    value: value.to_string(),
                });
            }
        },
        _ => {
            return Err(ShellError::UnknownOption {
                name: name.to_string(),
            });
        }
    };
    Ok(Command::Set(option))
}
