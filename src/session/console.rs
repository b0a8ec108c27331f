//! Line-oriented console input with re-prompting.

use std::io::{BufRead, Write};
use std::str;

use super::error::ConsoleError;
use crate::record::{FieldSpec, FieldViolation, validate_field};

/// Prompt printed before every read.
pub const PROMPT: &str = "> ";

/// Console wrapping an input and an output stream.
///
/// Invalid input never surfaces as an error: the user is told what was wrong
/// and asked again. Only end of input and I/O failures are returned.
pub struct Console<R, W> {
    input: R,
    output: W,
    line: Vec<u8>,
}

impl<R: BufRead, W: Write> Console<R, W> {
    /// Creates a console over the given streams.
    pub fn new(input: R, output: W) -> Self {
        Self {
            input,
            output,
            line: Vec::new(),
        }
    }

    /// Consumes the console, returning the output stream.
    pub fn into_output(self) -> W {
        self.output
    }

    /// Writes one line of text.
    pub fn say(&mut self, text: &str) -> Result<(), ConsoleError> {
        writeln!(self.output, "{text}")?;
        Ok(())
    }

    /// Prompts and reads one line, trimmed of surrounding whitespace.
    ///
    /// Lines that are not UTF-8 are rejected and read again.
    fn next_line(&mut self) -> Result<String, ConsoleError> {
        loop {
            write!(self.output, "{PROMPT}")?;
            self.output.flush()?;

            self.line.clear();
            if self.input.read_until(b'\n', &mut self.line)? == 0 {
                return Err(ConsoleError::EndOfInput);
            }
            match str::from_utf8(&self.line).map(|text| text.trim().to_string()) {
                Ok(text) => return Ok(text),
                Err(_) => self.say("Input must be UTF-8 text. Please try again.")?,
            }
        }
    }

    /// Reads a value that fits the given column.
    ///
    /// Blank lines are skipped. Values that are too long or contain a comma
    /// are rejected with a message and the user is prompted again.
    pub fn read_field(&mut self, spec: &FieldSpec) -> Result<String, ConsoleError> {
        loop {
            let value = self.next_line()?;
            match validate_field(spec, &value) {
                Ok(()) => return Ok(value),
                Err(FieldViolation::Empty) => {}
                Err(FieldViolation::TooLong) => self.say(&format!(
                    "Input is too long. Enter at most {} bytes.",
                    spec.max_len
                ))?,
                Err(FieldViolation::InvalidCharacter) => {
                    self.say("Commas cannot be used. Please try again.")?
                }
            }
        }
    }

    /// Reads an integer, prompting again on anything else.
    pub fn read_number(&mut self) -> Result<i64, ConsoleError> {
        loop {
            if let Ok(number) = self.next_line()?.parse() {
                return Ok(number);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::record::{ID, NAME};
    use std::io::Cursor;

    fn console(input: impl AsRef<[u8]>) -> Console<Cursor<Vec<u8>>, Vec<u8>> {
        Console::new(Cursor::new(input.as_ref().to_vec()), Vec::new())
    }

    fn output(console: Console<Cursor<Vec<u8>>, Vec<u8>>) -> String {
        String::from_utf8(console.into_output()).unwrap()
    }

    #[test]
    fn test_read_field_trims() {
        let mut console = console("  Alice \n");
        assert_eq!(console.read_field(&NAME).unwrap(), "Alice");
        assert_eq!(output(console), "> ");
    }

    #[test]
    fn test_read_field_skips_blank_lines() {
        let mut console = console("\n   \nAlice\n");
        assert_eq!(console.read_field(&NAME).unwrap(), "Alice");
        assert_eq!(output(console), "> > > ");
    }

    #[test]
    fn test_read_field_rejects_long_input() {
        let mut console = console("12345678\n1001\n");
        assert_eq!(console.read_field(&ID).unwrap(), "1001");
        assert_eq!(
            output(console),
            "> Input is too long. Enter at most 7 bytes.\n> "
        );
    }

    #[test]
    fn test_read_field_rejects_commas() {
        let mut console = console("Smith,John\nJohn\n");
        assert_eq!(console.read_field(&NAME).unwrap(), "John");
        assert!(output(console).contains("Commas cannot be used"));
    }

    #[test]
    fn test_read_field_end_of_input() {
        let mut console = console("12345678\n");
        assert!(matches!(
            console.read_field(&ID),
            Err(ConsoleError::EndOfInput)
        ));
    }

    #[test]
    fn test_read_field_reprompts_on_non_utf8() {
        // "山田" in Shift_JIS.
        let mut console = console(b"\x8e\x52\x93\x63\nAlice\n");
        assert_eq!(console.read_field(&NAME).unwrap(), "Alice");
        assert_eq!(
            output(console),
            "> Input must be UTF-8 text. Please try again.\n> "
        );
    }

    #[test]
    fn test_read_number_reprompts_on_non_utf8() {
        let mut console = console(b"\x8e\x52\n1\n");
        assert_eq!(console.read_number().unwrap(), 1);
    }

    #[test]
    fn test_read_number() {
        let mut console = console("abc\n\n 2 \n");
        assert_eq!(console.read_number().unwrap(), 2);
        assert_eq!(output(console), "> > > ");
    }

    #[test]
    fn test_read_number_end_of_input() {
        let mut console = console("abc\n");
        assert!(matches!(
            console.read_number(),
            Err(ConsoleError::EndOfInput)
        ));
    }
}
