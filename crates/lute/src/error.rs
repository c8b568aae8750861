//! Error types surfaced by the scanner, parser, and interpreter.
//!
//! All user-visible diagnostics share the `[line L] Error at '<lexeme>':
//! <message>` shape. Errors propagate as values through `Result`; the first
//! runtime error unwinds straight to the top-level statement loop, so a run
//! produces at most one runtime diagnostic and no side effects after it.

use std::fmt;

/// Result alias for operations that can fail with a runtime error.
pub(crate) type RunResult<T> = Result<T, RuntimeError>;

/// Overall outcome of interpreting a program.
///
/// `exit_code` gives the conventional process status for each outcome, which
/// the CLI driver passes straight to the operating system.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InterpretResult {
    /// The program ran to completion.
    Ok,
    /// The source failed to scan or parse; nothing was executed.
    CompileError,
    /// Execution stopped at a runtime error.
    RuntimeError,
}

impl InterpretResult {
    /// Process exit status for this outcome: 0, 65 (data error), or 70
    /// (internal software error), following sysexits conventions.
    #[must_use]
    pub fn exit_code(self) -> u8 {
        match self {
            Self::Ok => 0,
            Self::CompileError => 65,
            Self::RuntimeError => 70,
        }
    }
}

/// A scan- or parse-time error with its source location.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SyntaxError {
    line: u32,
    /// The offending lexeme; `None` means the error is at end of input.
    lexeme: Option<String>,
    message: String,
}

impl SyntaxError {
    pub(crate) fn at(line: u32, lexeme: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            line,
            lexeme: Some(lexeme.into()),
            message: message.into(),
        }
    }

    pub(crate) fn at_end(line: u32, message: impl Into<String>) -> Self {
        Self {
            line,
            lexeme: None,
            message: message.into(),
        }
    }

    /// Line the error was reported on.
    #[must_use]
    pub fn line(&self) -> u32 {
        self.line
    }
}

impl fmt::Display for SyntaxError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.lexeme {
            Some(lexeme) => write!(f, "[line {}] Error at '{}': {}", self.line, lexeme, self.message),
            None => write!(f, "[line {}] Error at end: {}", self.line, self.message),
        }
    }
}

impl std::error::Error for SyntaxError {}

/// A runtime error raised during execution.
///
/// Errors raised by the evaluator carry the line and lexeme of the token
/// they were reported at; errors raised inside native functions have
/// neither and render as a bare `Error: <message>`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RuntimeError {
    line: Option<u32>,
    lexeme: Option<String>,
    message: String,
}

impl RuntimeError {
    /// An error anchored at a specific token.
    pub(crate) fn at(line: u32, lexeme: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            line: Some(line),
            lexeme: Some(lexeme.into()),
            message: message.into(),
        }
    }

    /// An error raised by a native function, with no source location.
    pub(crate) fn native(message: impl Into<String>) -> Self {
        Self {
            line: None,
            lexeme: None,
            message: message.into(),
        }
    }

    /// Line the error was reported at, if it has a source location.
    #[must_use]
    pub fn line(&self) -> Option<u32> {
        self.line
    }

    /// The diagnostic message without the location prefix.
    #[must_use]
    pub fn message(&self) -> &str {
        &self.message
    }
}

impl fmt::Display for RuntimeError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match (self.line, &self.lexeme) {
            (Some(line), Some(lexeme)) => {
                write!(f, "[line {line}] Error at '{lexeme}': {}", self.message)
            }
            (Some(line), None) => write!(f, "[line {line}] Error: {}", self.message),
            _ => write!(f, "Error: {}", self.message),
        }
    }
}

impl std::error::Error for RuntimeError {}
