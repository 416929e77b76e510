use thiserror::Error;

#[derive(Error, Debug, Copy, Clone, PartialEq, Eq)]
pub enum GameError {
    #[error("Board must have at least one row and one column")]
    InvalidSize,
    #[error("Mine density must be a number between 0 and 1")]
    InvalidDensity,
    #[error("Too many mines, at least one cell must be safe")]
    TooManyMines,
    #[error("Invalid coordinates")]
    InvalidCoords,
    #[error("Board contents do not match its declared size or counts")]
    InvalidBoardShape,
    #[error("Mine layout does not fit the board")]
    InvalidLayout,
    #[error("Board has already been filled")]
    AlreadyFilled,
    #[error("Board has not been filled yet")]
    NotStarted,
    #[error("Game already ended, no new moves are accepted")]
    AlreadyEnded,
}

pub type Result<T> = core::result::Result<T, GameError>;
