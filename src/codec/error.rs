//! Member file errors.

use std::io;
use std::path::{Path, PathBuf};

use thiserror::Error;

/// What went wrong while parsing a member file.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ParseErrorKind {
    /// Field holds more bytes than its column allows.
    FieldTooLong,
    /// Line ended before the last column.
    MissingField,
    /// Comma after the last column.
    UnexpectedSeparator,
    /// Field bytes are not valid UTF-8.
    InvalidEncoding,
}

impl ParseErrorKind {
    fn message(&self) -> &'static str {
        match self {
            ParseErrorKind::FieldTooLong => "too long field:",
            ParseErrorKind::MissingField => "no field next to:",
            ParseErrorKind::UnexpectedSeparator => "extra comma next to:",
            ParseErrorKind::InvalidEncoding => "invalid UTF-8 in field:",
        }
    }
}

/// Parse error located by line and column, without a file path.
///
/// Produced by [`Parser`](super::Parser); [`ParseError::at`] attaches the
/// path to make a [`CsvError`].
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("line {}: {} {}", .line, .kind.message(), .field)]
pub struct ParseError {
    /// Error category.
    pub kind: ParseErrorKind,
    /// 1-based line number.
    pub line: usize,
    /// Column where the fault was detected.
    pub field: &'static str,
}

impl ParseError {
    /// Creates a new parse error.
    pub fn new(kind: ParseErrorKind, line: usize, field: &'static str) -> Self {
        Self { kind, line, field }
    }

    /// Attaches the source path.
    pub fn at(self, path: &Path) -> CsvError {
        let path = path.to_path_buf();
        let ParseError { kind, line, field } = self;
        match kind {
            ParseErrorKind::FieldTooLong => CsvError::FieldTooLong { path, line, field },
            ParseErrorKind::MissingField => CsvError::MissingField { path, line, field },
            ParseErrorKind::UnexpectedSeparator => {
                CsvError::UnexpectedSeparator { path, line, field }
            }
            ParseErrorKind::InvalidEncoding => CsvError::InvalidEncoding { path, line, field },
        }
    }
}

/// Errors from loading or saving a member file.
///
/// Parse variants render as `<path>(<line>): <message> <field>`.
#[derive(Debug, Error)]
pub enum CsvError {
    /// Field longer than its column maximum.
    #[error("{}({}): too long field: {}", .path.display(), .line, .field)]
    FieldTooLong {
        /// Source file.
        path: PathBuf,
        /// 1-based line number.
        line: usize,
        /// Column name.
        field: &'static str,
    },

    /// Line ended before every column was supplied.
    #[error("{}({}): no field next to: {}", .path.display(), .line, .field)]
    MissingField {
        /// Source file.
        path: PathBuf,
        /// 1-based line number.
        line: usize,
        /// Last column that was read.
        field: &'static str,
    },

    /// Trailing comma after the last column.
    #[error("{}({}): extra comma next to: {}", .path.display(), .line, .field)]
    UnexpectedSeparator {
        /// Source file.
        path: PathBuf,
        /// 1-based line number.
        line: usize,
        /// Column name.
        field: &'static str,
    },

    /// Field is not valid UTF-8.
    #[error("{}({}): invalid UTF-8 in field: {}", .path.display(), .line, .field)]
    InvalidEncoding {
        /// Source file.
        path: PathBuf,
        /// 1-based line number.
        line: usize,
        /// Column name.
        field: &'static str,
    },

    /// File exists but could not be read.
    #[error("failed to read {}", .path.display())]
    Read {
        /// Source file.
        path: PathBuf,
        /// Underlying I/O error.
        #[source]
        source: io::Error,
    },

    /// File could not be created, written or flushed.
    #[error("failed to write {}", .path.display())]
    Write {
        /// Target file.
        path: PathBuf,
        /// Underlying I/O error.
        #[source]
        source: io::Error,
    },
}

impl CsvError {
    pub(crate) fn read(path: &Path, source: io::Error) -> Self {
        CsvError::Read {
            path: path.to_path_buf(),
            source,
        }
    }

    pub(crate) fn write(path: &Path, source: io::Error) -> Self {
        CsvError::Write {
            path: path.to_path_buf(),
            source,
        }
    }

    /// Returns the line number for parse errors.
    pub fn line(&self) -> Option<usize> {
        match self {
            CsvError::FieldTooLong { line, .. }
            | CsvError::MissingField { line, .. }
            | CsvError::UnexpectedSeparator { line, .. }
            | CsvError::InvalidEncoding { line, .. } => Some(*line),
            CsvError::Read { .. } | CsvError::Write { .. } => None,
        }
    }

    /// Returns the column name for parse errors.
    pub fn field(&self) -> Option<&'static str> {
        match self {
            CsvError::FieldTooLong { field, .. }
            | CsvError::MissingField { field, .. }
            | CsvError::UnexpectedSeparator { field, .. }
            | CsvError::InvalidEncoding { field, .. } => Some(*field),
            CsvError::Read { .. } | CsvError::Write { .. } => None,
        }
    }
}
