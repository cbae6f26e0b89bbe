use thiserror::Error;

use crate::core::types::{Cell, PlayerId};

#[derive(Error, Debug)]
pub enum GameError {
    #[error("cell {cell} is outside the {width}x{height} map")]
    OutOfBounds { cell: Cell, width: u32, height: u32 },

    #[error("player not found: {0:?}")]
    PlayerNotFound(PlayerId),

    #[error("invalid operation: {0}")]
    InvalidOperation(String),

    #[error("invariant violation: {0}")]
    InvariantViolation(String),
}

pub type Result<T> = std::result::Result<T, GameError>;
