//! Shell errors.

use castellan_core::FenError;
use castellan_game::MoveError;

/// Errors that can occur while reading or running a shell command.
///
/// Everything except [`ShellError::Io`] is reported to the user and the
/// session carries on.
#[derive(Debug, thiserror::Error)]
pub enum ShellError {
    #[error("unknown command: {command}")]
    UnknownCommand { command: String },

    /// A command was given without the argument it needs.
    #[error("`{command}` needs an argument: {usage}")]
    MissingArgument {
        command: &'static str,
        usage: &'static str,
    },

    /// A token does not name a square in the active coordinate mode.
    #[error("not a square: {token}")]
    InvalidSquare { token: String },

    #[error("not a promotion piece: {token} (use q, r, b or n)")]
    InvalidPromotion { token: String },

    #[error("invalid FEN \"{fen}\": {source}")]
    InvalidFen {
        fen: String,
        #[source]
        source: FenError,
    },

    #[error("unknown option: {name}")]
    UnknownOption { name: String },

    #[error("invalid value for {name}: {value}")]
    InvalidOptionValue { name: &'static str, value: String },

    /// The game refused the request.
    #[error(transparent)]
    Move {
        #[from]
        source: MoveError,
    },

    /// An I/O error occurred while reading input or writing output.
    #[error("I/O error: {source}")]
    Io {
        #[from]
        source: std::io::Error,
    },
}
