use std::fmt;
use std::num::{ParseFloatError, ParseIntError};

use crate::card::Card;

pub type Result<T> = std::result::Result<T, Error>;

/// Caller-misuse errors. Everything here is detected synchronously before
/// any work happens, nothing is transient or worth retrying.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Error {
    InvalidCard(String),
    InvalidHandSize(usize),
    InvalidBoardSize(u8),
    DuplicateCard(Card),
    Other(String),
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::InvalidCard(message) => write!(f, "invalid card: {message}"),
            Error::InvalidHandSize(count) => {
                write!(f, "invalid number of cards: {count}")
            }
            Error::InvalidBoardSize(count) => {
                write!(f, "invalid board: expected 0 to 5 cards, got {count}")
            }
            Error::DuplicateCard(card) => write!(f, "duplicate card: {card}"),
            Error::Other(message) => f.write_str(message),
        }
    }
}

impl std::error::Error for Error {}

impl From<String> for Error {
    fn from(message: String) -> Self {
        Error::Other(message)
    }
}

impl From<&str> for Error {
    fn from(message: &str) -> Self {
        Error::Other(message.to_string())
    }
}

impl From<ParseIntError> for Error {
    fn from(err: ParseIntError) -> Self {
        Error::Other(err.to_string())
    }
}

impl From<ParseFloatError> for Error {
    fn from(err: ParseFloatError) -> Self {
        Error::Other(err.to_string())
    }
}
