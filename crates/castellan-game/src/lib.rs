//! Game driver for castellan: move requests, promotion, and game status.

mod error;
mod game;
mod status;

pub use error::{IllegalReason, MoveError};
pub use game::{Game, MoveOutcome, PendingPromotion, PromotionOutcome};
pub use status::GameStatus;
