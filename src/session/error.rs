//! Session errors.

use std::io;

use thiserror::Error;

use crate::codec::CsvError;
use crate::store::StoreError;

/// Console I/O errors.
#[derive(Debug, Error)]
pub enum ConsoleError {
    /// Input stream closed while waiting for a line.
    #[error("unexpected end of input")]
    EndOfInput,

    /// Reading or writing the console failed.
    #[error("console I/O error")]
    Io(#[from] io::Error),
}

/// Errors that end a session.
///
/// Validation problems (duplicate name, full store, bad login) are handled
/// inside the session and never show up here.
#[derive(Debug, Error)]
pub enum SessionError {
    /// Console failure.
    #[error(transparent)]
    Console(#[from] ConsoleError),

    /// Member file could not be saved.
    #[error(transparent)]
    Csv(#[from] CsvError),

    /// Store rejected an operation the session considered valid.
    #[error(transparent)]
    Store(#[from] StoreError),
}
