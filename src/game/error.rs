use thiserror::Error;

/// Errors raised by the simulation at its API boundary
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum GameError {
    #[error("action must be one-hot of length 3, got {0:?}")]
    InvalidAction(Vec<u8>),
    #[error("action index {0} out of range (expected 0..3)")]
    InvalidActionIndex(usize),
    #[error("invalid game config: {0}")]
    InvalidConfig(String),
}
