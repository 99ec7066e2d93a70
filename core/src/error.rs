use thiserror::Error;

#[derive(Error, Debug, Copy, Clone, PartialEq, Eq)]
pub enum GameError {
    #[error("Invalid slot index")]
    InvalidSlot,
    #[error("Deck must hold an even number of cards")]
    OddDeckSize,
    #[error("Every card value must appear on exactly two cards")]
    UnpairedValue,
    #[error("Game already ended, no new moves are accepted")]
    AlreadyEnded,
}

pub type Result<T> = std::result::Result<T, GameError>;
