use measure_units::ConversionError;
use std::{fmt, num::ParseFloatError};

/// Utility enum to package any error that can occur while running a command.
#[derive(Debug)]
pub enum Error {
    /// The conversion was not in the form `<value> <from> <to>`.
    Args,

    /// Invalid value.
    Float(ParseFloatError),

    /// A units expression could not be understood.
    Source {
        /// The error, with spans relative to `input`.
        error: measure_error::Error,

        /// The text the error points into.
        input: String,
    },

    /// No conversion between the two units.
    Conversion(ConversionError),
}

impl Error {
    /// Wraps an error from evaluating the given units expression.
    pub fn source(error: measure_error::Error, input: &str) -> Self {
        Self::Source { error, input: input.to_owned() }
    }

    /// Reports the error to stderr, highlighting the input if there is any.
    pub fn report(&self) {
        match self {
            Self::Source { error, input } => {
                if let Err(err) = error.report_to_stderr("input", input) {
                    eprintln!("{}", err);
                }
            },
            _ => eprintln!("{}", self),
        }
    }
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Args => write!(f, "Format: <value> <from> <to>, or <value> <from> to <to>"),
            Self::Float(err) => write!(f, "{}", err),
            Self::Source { input, .. } => write!(f, "invalid units `{}`", input),
            Self::Conversion(err) => write!(f, "{}", err),
        }
    }
}

impl From<ParseFloatError> for Error {
    fn from(error: ParseFloatError) -> Self {
        Self::Float(error)
    }
}

impl From<ConversionError> for Error {
    fn from(error: ConversionError) -> Self {
        Self::Conversion(error)
    }
}
