//! Output abstraction for script-visible printing.
//!
//! Every byte a script writes — the `print` statement and the `print` /
//! `println` natives — goes through a `PrintWriter`, so hosts can capture
//! or discard output and tests can assert on it exactly.

use std::io::{self, Write as _};

/// Destination for script output.
pub trait PrintWriter {
    /// Writes one chunk of text, with no added separators or terminator.
    fn stdout_write(&mut self, output: &str);

    /// Writes a single character, used for separators and newlines.
    fn stdout_push(&mut self, end: char);
}

/// Default `PrintWriter` that writes straight to stdout.
#[derive(Debug, Default)]
pub struct StdPrint;

impl PrintWriter for StdPrint {
    fn stdout_write(&mut self, output: &str) {
        let mut stdout = io::stdout().lock();
        let _ = stdout.write_all(output.as_bytes());
    }

    fn stdout_push(&mut self, end: char) {
        let mut buf = [0u8; 4];
        let mut stdout = io::stdout().lock();
        let _ = stdout.write_all(end.encode_utf8(&mut buf).as_bytes());
    }
}

/// A `PrintWriter` that collects all output into a string.
///
/// Useful for testing or capturing print output programmatically.
#[derive(Debug, Default)]
pub struct CollectStringPrint(String);

impl CollectStringPrint {
    /// Creates a new empty `CollectStringPrint`.
    #[must_use]
    pub fn new() -> Self {
        Self(String::new())
    }

    /// Returns the collected output as a string slice.
    #[must_use]
    pub fn output(&self) -> &str {
        self.0.as_str()
    }

    /// Consumes the writer and returns the collected output.
    #[must_use]
    pub fn into_output(self) -> String {
        self.0
    }
}

impl PrintWriter for CollectStringPrint {
    fn stdout_write(&mut self, output: &str) {
        self.0.push_str(output);
    }

    fn stdout_push(&mut self, end: char) {
        self.0.push(end);
    }
}

/// `PrintWriter` that ignores all output.
#[derive(Debug, Default)]
pub struct NoPrint;

impl PrintWriter for NoPrint {
    fn stdout_write(&mut self, _output: &str) {}

    fn stdout_push(&mut self, _end: char) {}
}
