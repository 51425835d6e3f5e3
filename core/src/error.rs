use thiserror::Error;

use crate::Phase;

#[derive(Error, Debug, Copy, Clone, PartialEq, Eq)]
pub enum GameError {
    #[error("Coordinates outside of the board")]
    OutOfBounds,
    #[error("Mine count must be at least one and less than the number of cells")]
    InvalidMineCount,
    #[error("Board must have at least one row and one column")]
    InvalidBoardSize,
    #[error("Word list has no candidate words")]
    EmptyWordList,
    #[error("No challenge is pending")]
    NoPendingChallenge,
    #[error("Mines were already placed on this board")]
    MinesAlreadyPlaced,
    #[error("Action not allowed while the session is in the {0:?} phase")]
    WrongPhase(Phase),
}

pub type Result<T> = core::result::Result<T, GameError>;
