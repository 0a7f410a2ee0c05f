//! Errors raised while reading dependency text.
//!
//! Parsing is the only fallible step in the engine. Once a [`crate::DependencySet`] exists,
//! every operation on it is total.

use thiserror::Error;

/// A dependency line that could not be read.
///
/// `line` is the 1-based physical line in the supplied text, blank lines included, so it
/// points at the same place an editor would.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("line {line}: {kind} in `{text}`")]
pub struct ParseError {
    pub line: usize,
    pub text: String,
    pub kind: ParseErrorKind,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum ParseErrorKind {
    #[error("missing `->` separator")]
    MissingSeparator,

    #[error("empty left-hand side")]
    EmptyLhs,

    #[error("empty right-hand side")]
    EmptyRhs,

    /// More than one `->` on a line; the extra arrows would otherwise be read as attributes.
    #[error("repeated `->` separator")]
    RepeatedSeparator,
}

impl ParseError {
    pub(crate) fn new(line: usize, text: &str, kind: ParseErrorKind) -> Self {
        Self {
            line,
            text: text.to_string(),
            kind,
        }
    }
}
