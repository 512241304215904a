use thiserror::Error;

/// Errors that can occur at the boundary of the turnplay system
#[derive(Error, Debug, Clone, PartialEq)]
pub enum TurnPlayError {
    #[error("Invalid game parameters: {0}")]
    InvalidParameters(String),

    #[error("Illegal action: {0}")]
    IllegalAction(String),

    #[error("Invalid player index: {0}")]
    InvalidPlayer(usize),
}

/// Convenience Result type for turnplay operations
pub type Result<T> = std::result::Result<T, TurnPlayError>;
