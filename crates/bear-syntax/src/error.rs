//! Error handling types and utilities for the BearLang translator.
//!
//! This module provides the unified error type used by every translation
//! stage. Lexical, syntactic and structural failures all carry a
//! human-readable message (Russian-localised, matching the language's
//! audience) and, where known, a 1-based source position.
//!
//! # Error Philosophy
//!
//! - **First error wins**: the pipeline aborts on the first failure and
//!   produces no partial output.
//! - **Precise location information**: line and column numbers whenever the
//!   failing token or character is known.
//! - **Easy propagation**: convenience constructors so stages can bail out
//!   with `?`.
//!
//! # Examples
//!
//! ```rust
//! use bear_syntax::error::{Error, Result, error_at};
//!
//! let located = Error::with_span("Ожидается имя переменной", 3, 7);
//! assert_eq!(located.to_string(), "Ожидается имя переменной at 3:7");
//!
//! fn reject(line: usize, col: usize) -> Result<()> {
//!     error_at(line, col, "Неожиданный отступ")
//! }
//! assert!(reject(1, 1).is_err());
//! ```

use std::fmt;

/// An error produced while translating a BearLang program.
///
/// Both the lexer and the parser report through this type; the code
/// generator is total and never constructs one.
#[derive(Debug, Clone)]
pub struct Error {
    /// Human-readable error message.
    pub msg: String,
    /// 1-based line number in the source, if known.
    pub line: Option<usize>,
    /// 1-based column number in the source, if known.
    pub col: Option<usize>,
}

impl Error {
    /// Creates an error without source location information.
    pub fn new(msg: impl Into<String>) -> Self {
        Self {
            msg: msg.into(),
            line: None,
            col: None,
        }
    }

    /// Creates an error pinned to a source position.
    ///
    /// ```rust
    /// use bear_syntax::Error;
    ///
    /// let err = Error::with_span("Незакрытая строка", 5, 12);
    /// assert_eq!(err.line, Some(5));
    /// ```
    pub fn with_span(msg: impl Into<String>, line: usize, col: usize) -> Self {
        Self {
            msg: msg.into(),
            line: Some(line),
            col: Some(col),
        }
    }
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if let (Some(l), Some(c)) = (self.line, self.col) {
            write!(f, "{} at {}:{}", self.msg, l, c)
        } else {
            write!(f, "{}", self.msg)
        }
    }
}

impl From<String> for Error {
    fn from(s: String) -> Self {
        Error::new(s)
    }
}

impl From<&str> for Error {
    fn from(s: &str) -> Self {
        Error::new(s)
    }
}

/// A specialized `Result` type for translator operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Shorthand for `Err(Error::new(msg))`.
pub fn error<T>(msg: impl Into<String>) -> Result<T> {
    Err(Error::new(msg))
}

/// Shorthand for `Err(Error::with_span(msg, line, col))`.
pub fn error_at<T>(line: usize, col: usize, msg: impl Into<String>) -> Result<T> {
    Err(Error::with_span(msg, line, col))
}
