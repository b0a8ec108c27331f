//! Byte-level member file parser.
//!
//! The [`Parser`] is a small state machine fed one byte at a time. Its state
//! is a [`Cursor`] (record slot, column, bytes written into the column, line)
//! plus the record being assembled. Records are built in the parser's own
//! buffers; callers only see them once parsing succeeds.
//!
//! Transitions:
//!
//! ```text
//! ordinary byte  -> append to column      (FieldTooLong past max_len)
//! ','            -> next column           (UnexpectedSeparator on last column)
//! '\n' / "\r\n"  -> record done, next line (MissingField before last column)
//! EOF            -> see Parser::finish
//! ```

use std::mem;

use super::error::{ParseError, ParseErrorKind};
use crate::record::{FIELDS, FieldSpec, Record};

/// Position of the parser within the input.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Cursor {
    /// Slot the current line is read into.
    pub record: usize,
    /// Index into [`FIELDS`] of the current column.
    pub field: usize,
    /// Bytes written into the current column.
    pub offset: usize,
    /// 1-based line number.
    pub line: usize,
}

/// Outcome of feeding one byte.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Step {
    /// More input is accepted.
    Continue,
    /// Every slot is filled; remaining input is not read.
    Complete,
}

/// Strict parser for `id,name,password` lines.
#[derive(Debug)]
pub struct Parser {
    capacity: usize,
    field: usize,
    line: usize,
    buf: Vec<u8>,
    fields: [String; 3],
    records: Vec<Record>,
    pending_cr: bool,
}

impl Parser {
    /// Creates a parser that reads at most `capacity` lines.
    pub fn new(capacity: usize) -> Self {
        Self {
            capacity,
            field: 0,
            line: 1,
            buf: Vec::with_capacity(FIELDS[0].max_len),
            fields: Default::default(),
            records: Vec::with_capacity(capacity),
            pending_cr: false,
        }
    }

    /// Returns the current position.
    pub fn cursor(&self) -> Cursor {
        Cursor {
            record: self.records.len(),
            field: self.field,
            offset: self.buf.len(),
            line: self.line,
        }
    }

    /// Returns true once every slot has been read.
    pub fn is_complete(&self) -> bool {
        self.records.len() >= self.capacity
    }

    /// Feeds one input byte.
    ///
    /// # Errors
    ///
    /// Returns a [`ParseError`] locating the line and column at fault. The
    /// parser should not be fed again after an error.
    pub fn feed(&mut self, byte: u8) -> Result<Step, ParseError> {
        if self.is_complete() {
            return Ok(Step::Complete);
        }

        if self.pending_cr {
            self.pending_cr = false;
            if byte == b'\n' {
                return self.end_record();
            }
            self.push(b'\r')?;
        }

        match byte {
            b'\r' => {
                self.pending_cr = true;
                Ok(Step::Continue)
            }
            b'\n' => self.end_record(),
            b',' => self.end_field(),
            _ => {
                self.push(byte)?;
                Ok(Step::Continue)
            }
        }
    }

    /// Signals end of input and returns the parsed records.
    ///
    /// Input may stop at the start of a line (fewer lines than slots) or in
    /// the middle of the last column (missing final newline). Stopping in an
    /// earlier column is a `MissingField` error.
    pub fn finish(mut self) -> Result<Vec<Record>, ParseError> {
        if self.is_complete() {
            return Ok(self.records);
        }

        if mem::take(&mut self.pending_cr) {
            self.push(b'\r')?;
        }

        let at_line_start = self.field == 0 && self.buf.is_empty();
        if !at_line_start {
            self.end_record()?;
        }
        Ok(self.records)
    }

    fn spec(&self) -> FieldSpec {
        FIELDS[self.field]
    }

    fn error(&self, kind: ParseErrorKind) -> ParseError {
        ParseError::new(kind, self.line, self.spec().name)
    }

    fn push(&mut self, byte: u8) -> Result<(), ParseError> {
        if self.buf.len() >= self.spec().max_len {
            return Err(self.error(ParseErrorKind::FieldTooLong));
        }
        self.buf.push(byte);
        Ok(())
    }

    /// Terminates the current column and stores its text.
    fn close_field(&mut self) -> Result<(), ParseError> {
        let bytes = mem::take(&mut self.buf);
        let text = String::from_utf8(bytes)
            .map_err(|_| self.error(ParseErrorKind::InvalidEncoding))?;
        self.fields[self.field] = text;
        Ok(())
    }

    fn end_field(&mut self) -> Result<Step, ParseError> {
        if self.spec().is_last() {
            return Err(self.error(ParseErrorKind::UnexpectedSeparator));
        }
        self.close_field()?;
        self.field += 1;
        Ok(Step::Continue)
    }

    fn end_record(&mut self) -> Result<Step, ParseError> {
        if !self.spec().is_last() {
            return Err(self.error(ParseErrorKind::MissingField));
        }
        self.close_field()?;
        let fields = mem::take(&mut self.fields);
        self.records.push(Record::from_fields(fields));

        if self.is_complete() {
            return Ok(Step::Complete);
        }
        self.field = 0;
        self.line += 1;
        Ok(Step::Continue)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn decode(input: &[u8], capacity: usize) -> Result<Vec<Record>, ParseError> {
        let mut parser = Parser::new(capacity);
        for &byte in input {
            if parser.feed(byte)? == Step::Complete {
                break;
            }
        }
        parser.finish()
    }

    fn kind_line_field(err: ParseError) -> (ParseErrorKind, usize, &'static str) {
        (err.kind, err.line, err.field)
    }

    #[test]
    fn test_decode_two_members() {
        let records = decode(b"1001,Alice,secret\n1002,Bob,hunter2\n", 5).unwrap();
        assert_eq!(
            records,
            vec![
                Record::new("1001", "Alice", "secret"),
                Record::new("1002", "Bob", "hunter2"),
            ]
        );
    }

    #[test]
    fn test_decode_empty_slots() {
        let records = decode(b",,\n1002,Bob,hunter2\n,,\n", 5).unwrap();
        assert_eq!(records.len(), 3);
        assert!(records[0].is_empty());
        assert_eq!(records[0], Record::empty());
        assert!(!records[1].is_empty());
        assert!(records[2].is_empty());
    }

    #[test]
    fn test_decode_empty_input() {
        assert_eq!(decode(b"", 5).unwrap(), vec![]);
    }

    #[test]
    fn test_field_at_max_length() {
        let line = format!("1234567,{},{}\n", "n".repeat(30), "p".repeat(15));
        let records = decode(line.as_bytes(), 5).unwrap();
        assert_eq!(records[0].id, "1234567");
        assert_eq!(records[0].name.len(), 30);
        assert_eq!(records[0].password.len(), 15);
    }

    #[test]
    fn test_field_too_long() {
        let err = decode(b"12345678,Alice,secret\n", 5).unwrap_err();
        assert_eq!(
            kind_line_field(err),
            (ParseErrorKind::FieldTooLong, 1, "id")
        );

        let input = format!(
            "1001,Alice,secret\n1002,Bob,hunter2\n1003,{},pw\n",
            "n".repeat(31)
        );
        let err = decode(input.as_bytes(), 5).unwrap_err();
        assert_eq!(
            kind_line_field(err),
            (ParseErrorKind::FieldTooLong, 3, "name")
        );

        let err = decode(b"1001,Alice,0123456789abcdef\n", 5).unwrap_err();
        assert_eq!(
            kind_line_field(err),
            (ParseErrorKind::FieldTooLong, 1, "password")
        );
    }

    #[test]
    fn test_missing_field() {
        let err = decode(b"1001,Alice\n", 5).unwrap_err();
        assert_eq!(
            kind_line_field(err),
            (ParseErrorKind::MissingField, 1, "name")
        );

        let err = decode(b"1001,Alice,secret\n1002\n", 5).unwrap_err();
        assert_eq!(kind_line_field(err), (ParseErrorKind::MissingField, 2, "id"));
    }

    #[test]
    fn test_blank_line_is_missing_field() {
        let err = decode(b"1001,Alice,secret\n\n", 5).unwrap_err();
        assert_eq!(kind_line_field(err), (ParseErrorKind::MissingField, 2, "id"));
    }

    #[test]
    fn test_unexpected_separator() {
        let err = decode(b"1001,Alice,secret,\n", 5).unwrap_err();
        assert_eq!(
            kind_line_field(err),
            (ParseErrorKind::UnexpectedSeparator, 1, "password")
        );
    }

    #[test]
    fn test_invalid_encoding() {
        let err = decode(b"1001,\xff\xfe,secret\n", 5).unwrap_err();
        assert_eq!(
            kind_line_field(err),
            (ParseErrorKind::InvalidEncoding, 1, "name")
        );
    }

    #[test]
    fn test_multibyte_text_passes_through() {
        let input = "1001,山田太郎,パス\n".as_bytes();
        let records = decode(input, 5).unwrap();
        assert_eq!(records[0].name, "山田太郎");
        assert_eq!(records[0].password, "パス");
    }

    #[test]
    fn test_crlf_line_endings() {
        let records = decode(b"1001,Alice,secret\r\n,,\r\n", 5).unwrap();
        assert_eq!(records[0].password, "secret");
        assert!(records[1].is_empty());
    }

    #[test]
    fn test_lone_carriage_return_is_data() {
        let records = decode(b"1001,Al\rice,secret\n", 5).unwrap();
        assert_eq!(records[0].name, "Al\rice");

        // Trailing CR at EOF counts against the column length.
        let records = decode(b"1001,Alice,secret\r", 5).unwrap();
        assert_eq!(records[0].password, "secret\r");
    }

    #[test]
    fn test_eof_without_final_newline() {
        let records = decode(b"1001,Alice,secret", 5).unwrap();
        assert_eq!(records, vec![Record::new("1001", "Alice", "secret")]);

        let err = decode(b"1001,Alice", 5).unwrap_err();
        assert_eq!(
            kind_line_field(err),
            (ParseErrorKind::MissingField, 1, "name")
        );
    }

    #[test]
    fn test_stops_at_capacity() {
        let input = b"1001,A,a\n1002,B,b\nthis line is never read,,,,\n";
        let mut parser = Parser::new(2);
        let mut steps = Vec::new();
        for &byte in input.iter() {
            let step = parser.feed(byte).unwrap();
            steps.push(step);
            if step == Step::Complete {
                break;
            }
        }
        assert_eq!(steps.last(), Some(&Step::Complete));
        // The cursor stays on the last line that was read.
        assert_eq!(parser.cursor().line, 2);
        assert_eq!(parser.finish().unwrap().len(), 2);

        assert_eq!(decode(input, 2).unwrap().len(), 2);
    }

    #[test]
    fn test_cursor_tracks_position() {
        let mut parser = Parser::new(5);
        for &byte in b"1001,Alice,secret\n10" {
            parser.feed(byte).unwrap();
        }
        assert_eq!(
            parser.cursor(),
            Cursor {
                record: 1,
                field: 0,
                offset: 2,
                line: 2,
            }
        );
        parser.feed(b',').unwrap();
        assert_eq!(parser.cursor().field, 1);
        assert_eq!(parser.cursor().offset, 0);
    }
}
