use std::io;

use termion::event::Key;
use thiserror::Error;

use crate::{Pos, Size};

#[derive(Debug, Error)]
pub enum Error {
    #[error("cell {pos} is outside the {size} grid")]
    OutOfBounds { pos: Pos, size: Size },

    #[error("pattern {name} ({pattern}) does not fit in the {grid} grid")]
    PatternTooLarge {
        name: &'static str,
        pattern: Size,
        grid: Size,
    },

    #[error("speed level {0} is out of range")]
    InvalidSpeed(u8),

    #[error("key {0:?} has no meaning here")]
    UnrecognizedInput(Key),

    #[error("no simulation has been seeded")]
    NotSeeded,

    #[error("terminal i/o failed: {0}")]
    Io(#[from] io::Error),
}

impl Error {
    /// errors the interaction loop answers with a re-prompt instead of aborting.
    pub fn is_recoverable(&self) -> bool {
        matches!(
            self,
            Error::PatternTooLarge { .. } | Error::InvalidSpeed(_) | Error::UnrecognizedInput(_)
        )
    }
}

pub type Result<T, E = Error> = std::result::Result<T, E>;

#[test]
fn test_recoverable() {
    assert!(Error::InvalidSpeed(9).is_recoverable());
    assert!(Error::UnrecognizedInput(Key::Char('x')).is_recoverable());
    assert!(!Error::NotSeeded.is_recoverable());
    let out = Error::OutOfBounds {
        pos: crate::pos!(4, 0),
        size: Size::new(4, 4),
    };
    assert!(!out.is_recoverable());
    assert_eq!(out.to_string(), "cell (4, 0) is outside the 4x4 grid");
}
