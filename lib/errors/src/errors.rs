use std::{fmt::Display, io::Write};

use cursor::Line;
use itertools::Itertools;

#[derive(thiserror::Error, Clone, Debug, PartialEq)]
#[error(
    "[line {line}] Error{}: {message}",
    at.as_ref().map(|at| format!(" at {at}")).unwrap_or_default()
)]
pub struct SyntaxError {
    pub line: Line,
    /// `'<lexeme>'`, `end`, or nothing for errors that have no offending token.
    pub at: Option<String>,
    pub message: String,
}

#[derive(thiserror::Error, Debug, Default, PartialEq, derive_more::Deref, derive_more::DerefMut)]
pub struct SyntaxErrors(pub Vec<SyntaxError>);

impl From<SyntaxError> for SyntaxErrors {
    fn from(e: SyntaxError) -> Self {
        Self(vec![e])
    }
}

impl Display for SyntaxErrors {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        write!(f, "{}", self.0.iter().join("\n"))
    }
}

/// Sink for errors found while parsing or evaluating a session's source.
pub trait Report {
    fn syntax_error(&mut self, error: &SyntaxError);
    fn runtime_error(&mut self, line: Line, message: &str);

    fn had_error(&self) -> bool;
    fn had_runtime_error(&self) -> bool;

    /// Clears both flags; call before every independent session.
    fn reset(&mut self);
}

/// Writes every reported error to `out` and remembers what kind of error was seen.
#[derive(Debug)]
pub struct Reporter<W: Write> {
    out: W,
    had_error: bool,
    had_runtime_error: bool,
}

impl<W: Write> Reporter<W> {
    pub fn new(out: W) -> Self {
        Self { out, had_error: false, had_runtime_error: false }
    }

    pub fn into_inner(self) -> W {
        self.out
    }
}

impl<W: Write> Report for Reporter<W> {
    fn syntax_error(&mut self, error: &SyntaxError) {
        self.had_error = true;
        if let Err(e) = writeln!(self.out, "{error}") {
            log::warn!("Failed to report syntax error: {e}");
        }
    }

    fn runtime_error(&mut self, line: Line, message: &str) {
        self.had_runtime_error = true;
        if let Err(e) = writeln!(self.out, "{message}\n[line {line}]") {
            log::warn!("Failed to report runtime error: {e}");
        }
    }

    fn had_error(&self) -> bool {
        self.had_error
    }

    fn had_runtime_error(&self) -> bool {
        self.had_runtime_error
    }

    fn reset(&mut self) {
        self.had_error = false;
        self.had_runtime_error = false;
    }
}
