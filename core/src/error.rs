use alloc::string::String;
use thiserror::Error;

#[derive(Error, Debug, Copy, Clone, PartialEq, Eq)]
pub enum BoardError {
    #[error("Board is empty")]
    Empty,
    #[error("Invalid square id {0}")]
    InvalidSquare(u8),
    #[error("Invalid piece symbol {0:?}")]
    InvalidPiece(char),
    #[error("Invalid square notation")]
    InvalidNotation,
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum EngineError {
    #[error("{0}")]
    Rejected(String),
    #[error("Engine unreachable: {0}")]
    Transport(String),
    #[error("Engine sent a malformed board: {0}")]
    Malformed(#[from] BoardError),
    #[error("Engine reply could not be read: {0}")]
    Undecodable(String),
    #[error("Engine answered a different request")]
    UnexpectedReply,
}

pub type Result<T> = core::result::Result<T, BoardError>;
