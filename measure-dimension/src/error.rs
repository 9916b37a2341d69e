use std::{error::Error, fmt::{self, Display, Formatter}};

/// Error returned when a dimension or one of its components cannot be built or compared.
#[derive(Clone, Debug, PartialEq, Eq)]
#[non_exhaustive]
pub enum DimensionError {
    /// A required argument was missing or malformed, such as an empty name or a non-finite
    /// exponent.
    InvalidArgument {
        /// The name of the offending argument.
        argument: &'static str,

        /// What was wrong with it.
        reason: &'static str,
    },

    /// The components of a derived dimension canceled each other out, or none were supplied. A
    /// dimension with no net components cannot be represented.
    EmptyResult {
        /// The name of the dimension that was being built.
        name: String,
    },

    /// A dimension was compared against a dimension that does not exist.
    NullComparison,
}

impl DimensionError {
    /// Shorthand for the error returned when a dimension is given an empty name.
    pub(crate) fn missing_name() -> Self {
        Self::InvalidArgument { argument: "name", reason: "a dimension name is required" }
    }

    /// Shorthand for the error returned when an exponent is infinite or NaN.
    pub(crate) fn non_finite_exponent() -> Self {
        Self::InvalidArgument {
            argument: "exponent",
            reason: "the exponent of a dimension component must be finite",
        }
    }
}

impl Display for DimensionError {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidArgument { argument, reason } => {
                write!(f, "invalid argument `{}`: {}", argument, reason)
            },
            Self::EmptyResult { name } => {
                write!(f, "derived dimension `{}` has no components left after normalization", name)
            },
            Self::NullComparison => write!(f, "cannot compare a dimension against a missing dimension"),
        }
    }
}

impl Error for DimensionError {}
