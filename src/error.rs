use thiserror::Error;

use crate::arg::ArgKind;

pub type Result<T> = core::result::Result<T, Error>;

#[derive(Debug, Error)]
pub enum Error {
    #[error("argument {position} is {found}, but the format expected {expected}")]
    ArgumentMismatch {
        position: usize,
        expected: ArgKind,
        found: ArgKind,
    },
    #[error("format expected {expected} for argument {position}, but no arguments are left")]
    MissingArgument { position: usize, expected: ArgKind },
    #[error("destination buffer of {capacity} bytes is full")]
    BufferFull { capacity: usize },
    #[error("{label} => {expected} expected but got {actual}")]
    AssertionFailed {
        label: String,
        expected: i64,
        actual: i64,
    },
    #[error("{label} => {expected} expected but got {actual}, which is outside the i64 range")]
    OutOfRange {
        label: String,
        expected: String,
        actual: String,
    },
    #[error(transparent)]
    Io(#[from] std::io::Error),
}
