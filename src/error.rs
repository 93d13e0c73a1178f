//! Crate error type
//!
//! Only the host-facing seams (settings files, score storage) can fail. The
//! simulation itself resolves every edge case by policy and never errors.

use std::fmt;

#[derive(Debug)]
pub enum Error {
    /// Reading or writing a file failed
    Io(std::io::Error),
    /// A settings or score file could not be (de)serialized
    Json(serde_json::Error),
    /// A high score was submitted without a usable name
    InvalidName,
    /// No game-over prompt is waiting for a name
    NoPendingScore,
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Io(e) => write!(f, "i/o error: {e}"),
            Self::Json(e) => write!(f, "malformed json: {e}"),
            Self::InvalidName => write!(f, "a high score needs a non-empty name"),
            Self::NoPendingScore => write!(f, "no finished game is waiting for a name"),
        }
    }
}

impl std::error::Error for Error {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Io(e) => Some(e),
            Self::Json(e) => Some(e),
            Self::InvalidName | Self::NoPendingScore => None,
        }
    }
}

impl From<std::io::Error> for Error {
    fn from(e: std::io::Error) -> Self {
        Self::Io(e)
    }
}

impl From<serde_json::Error> for Error {
    fn from(e: serde_json::Error) -> Self {
        Self::Json(e)
    }
}

pub type Result<T> = std::result::Result<T, Error>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_and_source() {
        let io = Error::from(std::io::Error::new(std::io::ErrorKind::NotFound, "gone"));
        assert!(io.to_string().contains("gone"));
        assert!(std::error::Error::source(&io).is_some());

        assert!(std::error::Error::source(&Error::InvalidName).is_none());
    }
}
