use ariadne::Fmt;
use measure_attrs::ErrorKind;
use measure_error::EXPR;

/// The end of the field was reached unexpectedly.
#[derive(Debug, Clone, ErrorKind, PartialEq)]
#[error(
    message = "unexpected end of field",
    labels = [format!("expected {} here", expected.fg(EXPR))],
)]
pub struct UnexpectedEof {
    /// A description of what was expected.
    pub expected: &'static str,
}

/// The end of the field was expected, but something else was found.
#[derive(Debug, Clone, ErrorKind, PartialEq)]
#[error(
    message = "expected end of field",
    labels = ["I could not understand the rest of the field here"],
    help = format!("join terms with {} or {}", "*".fg(EXPR), "/".fg(EXPR)),
)]
pub struct ExpectedEof;

/// An unexpected token was encountered.
#[derive(Debug, Clone, ErrorKind, PartialEq)]
#[error(
    message = format!("unexpected `{}`", found),
    labels = [format!("expected {} here", expected.fg(EXPR))],
)]
pub struct UnexpectedToken {
    /// A description of what was expected.
    pub expected: &'static str,

    /// The lexeme that was found.
    pub found: String,
}

/// A parenthesis was not closed.
#[derive(Debug, Clone, ErrorKind, PartialEq)]
#[error(
    message = "unclosed parenthesis",
    labels = ["this parenthesis is not closed"],
    help = "add a closing parenthesis `)` somewhere after this",
)]
pub struct UnclosedParenthesis;

/// A number could not be represented.
#[derive(Debug, Clone, ErrorKind, PartialEq)]
#[error(
    message = format!("invalid number `{}`", lexeme),
    labels = ["this number"],
)]
pub struct InvalidNumber {
    /// The lexeme of the number.
    pub lexeme: String,
}
