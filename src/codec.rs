//! Member file codec.
//!
//! The member file holds one `id,name,password` line per store slot:
//!
//! ```text
//! 1001,Alice,secret
//! ,,
//! 1003,Carol,pw
//! ```
//!
//! There is no header and no quoting; values may not contain commas or line
//! breaks. Loading is strict: any malformed line aborts with an error naming
//! the file, the 1-based line and the column. Saving rewrites the whole file.

mod error;
mod parser;
mod writer;

pub use error::{CsvError, ParseError, ParseErrorKind};
pub use parser::{Cursor, Parser, Step};
pub use writer::write_records;

use std::fs::File;
use std::io::{self, BufReader, BufWriter, Read, Write};
use std::path::Path;

use tracing::{debug, warn};

use crate::record::Record;

/// Reads up to `capacity` records from the member file at `path`.
///
/// A missing file yields no records. Lines past `capacity` are ignored.
///
/// # Errors
///
/// - `FieldTooLong`, `MissingField`, `UnexpectedSeparator`,
///   `InvalidEncoding` for malformed content
/// - `Read` if the file exists but cannot be read
pub fn load(path: &Path, capacity: usize) -> Result<Vec<Record>, CsvError> {
    let file = match File::open(path) {
        Ok(file) => file,
        Err(e) if e.kind() == io::ErrorKind::NotFound => {
            debug!(path = %path.display(), "member file not found, starting empty");
            return Ok(Vec::new());
        }
        Err(e) => return Err(CsvError::read(path, e)),
    };
    read_records(path, BufReader::new(file), capacity)
}

fn read_records<R: Read>(
    path: &Path,
    reader: R,
    capacity: usize,
) -> Result<Vec<Record>, CsvError> {
    let mut parser = Parser::new(capacity);
    if parser.is_complete() {
        return Ok(Vec::new());
    }

    let mut bytes = reader.bytes();
    while let Some(byte) = bytes.next() {
        let byte = byte.map_err(|e| CsvError::read(path, e))?;
        if parser.feed(byte).map_err(|e| e.at(path))? == Step::Complete {
            if bytes.next().is_some() {
                warn!(
                    path = %path.display(),
                    capacity,
                    last_line = parser.cursor().line,
                    "ignoring content past the last slot"
                );
            }
            break;
        }
    }
    parser.finish().map_err(|e| e.at(path))
}

/// Writes every record to `path`, replacing the previous contents.
///
/// # Errors
///
/// Returns `CsvError::Write` if the file cannot be created, written or
/// flushed.
pub fn save(path: &Path, records: &[Record]) -> Result<(), CsvError> {
    let file = File::create(path).map_err(|e| CsvError::write(path, e))?;
    let mut out = BufWriter::new(file);
    write_records(&mut out, records).map_err(|e| CsvError::write(path, e))?;
    out.flush().map_err(|e| CsvError::write(path, e))?;
    debug!(path = %path.display(), slots = records.len(), "saved member file");
    Ok(())
}
