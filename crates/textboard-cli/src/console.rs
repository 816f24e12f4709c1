//! Line-oriented terminal I/O
//!
//! Controllers talk to the user only through `Console`, so tests and
//! `--exec` can swap stdin/stdout for buffers.

use std::fmt::Display;
use std::io::{BufRead, Write};

use textboard_core::errors::{io_error, Result};

pub struct Console<'a> {
    input: &'a mut dyn BufRead,
    output: &'a mut dyn Write,
}

impl<'a> Console<'a> {
    pub fn new(input: &'a mut dyn BufRead, output: &'a mut dyn Write) -> Self {
        Self { input, output }
    }

    /// Print `prompt` and read one line without its line terminator
    ///
    /// Returns `Ok(None)` once the input is exhausted.
    ///
    /// # Errors
    ///
    /// `Io` when writing the prompt or reading the line fails.
    pub fn read_line(&mut self, prompt: &str) -> Result<Option<String>> {
        write!(self.output, "{}", prompt).map_err(|e| io_error("console_write", e))?;
        self.output
            .flush()
            .map_err(|e| io_error("console_write", e))?;

        let mut line = String::new();
        let read = self
            .input
            .read_line(&mut line)
            .map_err(|e| io_error("console_read", e))?;
        if read == 0 {
            return Ok(None);
        }

        let trimmed_len = line.trim_end_matches(['\r', '\n']).len();
        line.truncate(trimmed_len);
        Ok(Some(line))
    }

    /// # Errors
    ///
    /// `Io` when the output cannot be written.
    pub fn println(&mut self, text: impl Display) -> Result<()> {
        writeln!(self.output, "{}", text).map_err(|e| io_error("console_write", e))
    }
}
