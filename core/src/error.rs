use thiserror::Error;

#[derive(Error, Debug, Copy, Clone, PartialEq, Eq)]
pub enum GameError {
    #[error("Coordinates outside the board")]
    OutOfBounds,
    #[error("Board dimensions must be positive")]
    InvalidSize,
}

pub type Result<T> = core::result::Result<T, GameError>;
