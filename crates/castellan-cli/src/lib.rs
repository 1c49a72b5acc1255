//! Text shell for castellan: reads commands line by line and drives a game.

pub mod command;
pub mod error;
pub mod session;

pub use command::{Command, CoordMode, ShellOption, parse_command};
pub use error::ShellError;
pub use session::{Session, ShellConfig};
