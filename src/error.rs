//! # Error and Result for this crate
//!
//! Every fallible operation returns the same [Error], whether it comes from the literal parser,
//! from a scalar's validation, or from the coercion helpers that call a scalar for an engine.
//!
//! Errors belong to one of three families, see [`ErrorType`]. Engines usually only report the
//! bare [`Error::message`], which is what ends up in a GraphQL response's `errors` list.

use std::{error, fmt, ops::Range, result};

pub type Result<T> = result::Result<T, Error>;

/// An error with a message, the family it belongs to, and for syntax errors the location and a
/// snippet of the source text it was raised at.
///
/// [`fmt::Display`] prints the family's prefix, the message, and the snippet if there's one.
#[derive(PartialEq, Eq, Clone)]
pub struct Error {
    pub(crate) message: String,
    pub(crate) location: Option<Location>,
    pub(crate) context: Option<String>,
    pub(crate) error_type: ErrorType,
}

#[derive(Debug, PartialEq, Eq, Clone, Copy)]
pub enum ErrorType {
    /// Reported by an engine against a query, e.g. a literal of the wrong kind.
    GraphQL,
    /// Raised while lexing or parsing source text.
    Syntax,
    /// Raised when a value doesn't have the shape or encoding a scalar accepts.
    TypeCheck,
}

impl ErrorType {
    fn prefix(self) -> &'static str {
        match self {
            ErrorType::GraphQL => "GraphQL Error",
            ErrorType::Syntax => "Syntax Error",
            ErrorType::TypeCheck => "Type Error",
        }
    }
}

impl Error {
    /// Create an error from a message. Without an `error_type` it's an [`ErrorType::GraphQL`]
    /// error.
    pub fn new<S: Into<String>>(message: S, error_type: Option<ErrorType>) -> Self {
        Error {
            message: message.into(),
            location: None,
            context: None,
            error_type: error_type.unwrap_or(ErrorType::GraphQL),
        }
    }

    /// Create an error that also carries a location and a context string, usually a snippet of
    /// the source text.
    pub fn new_with_context<S: Into<String>>(
        message: S,
        location: Option<Location>,
        context: S,
        error_type: Option<ErrorType>,
    ) -> Self {
        Error {
            location,
            context: Some(context.into()),
            ..Error::new(message, error_type)
        }
    }

    #[inline]
    pub(crate) fn type_check<S: Into<String>>(message: S) -> Self {
        Error::new(message, Some(ErrorType::TypeCheck))
    }

    pub fn message(&self) -> &str {
        &self.message
    }

    pub fn location(&self) -> &Option<Location> {
        &self.location
    }

    pub fn error_type(&self) -> ErrorType {
        self.error_type
    }

    /// Replace the message, keeping the family. Engines use this to say where a scalar's
    /// rejected value was found.
    pub(crate) fn with_message<S: Into<String>>(self, message: S) -> Self {
        Error {
            message: message.into(),
            ..self
        }
    }

    /// Format the error with its family's prefix. With `include_ctx` the context follows on the
    /// next lines.
    pub fn print(&self, include_ctx: bool) -> String {
        let mut out = format!("{}: {}", self.error_type.prefix(), self.message);
        if let (true, Some(context)) = (include_ctx, &self.context) {
            out.push('\n');
            out.push_str(context);
        }
        out
    }
}

/// A 1-based line and column, counted in characters, in a source text.
#[derive(Debug, PartialEq, Eq, Clone)]
pub struct Location {
    pub line: usize,
    pub column: usize,
}

impl Location {
    /// Locate the byte `offset` in `source`.
    pub(crate) fn of(source: &str, offset: usize) -> Location {
        let before = &source[..offset];
        let line_start = before.rfind('\n').map_or(0, |index| index + 1);
        Location {
            line: before.matches('\n').count() + 1,
            column: before[line_start..].chars().count() + 1,
        }
    }

    /// Print the line that `span` starts on with a gutter, and mark the span below it:
    ///
    /// ```text
    ///  3 |     a: $
    ///    |        ^
    /// ```
    pub(crate) fn snippet(source: &str, span: Range<usize>) -> String {
        let location = Location::of(source, span.start);
        let line = source.lines().nth(location.line - 1).unwrap_or("");
        let marked = source[span.start..span.end.max(span.start)]
            .lines()
            .next()
            .map_or(0, |text| text.chars().count());
        let gutter = location.line.to_string();
        format!(
            " {} | {}\n {} | {}{}",
            gutter,
            line,
            " ".repeat(gutter.len()),
            " ".repeat(location.column - 1),
            "^".repeat(marked.max(1))
        )
    }
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.print(true))
    }
}

impl fmt::Debug for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "\n{}\n", self)
    }
}

impl error::Error for Error {}
