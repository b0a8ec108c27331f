//! Member file serialization.

use std::io::{self, Write};

use crate::record::Record;

/// Writes every record as an `id,name,password` line.
///
/// Empty slots are written as `,,` so the line count always equals the store
/// capacity.
pub fn write_records<W: Write>(out: &mut W, records: &[Record]) -> io::Result<()> {
    for record in records {
        let [id, name, password] = record.fields();
        writeln!(out, "{id},{name},{password}")?;
    }
    Ok(())
}
