use ariadne::Fmt;
use measure_attrs::ErrorKind;
use measure_error::EXPR;
use measure_units::UnitsError;

/// Formats the help message for an unknown name, listing similar names if there are any.
fn suggestion_help(kind: &str, section: &str, suggestions: &[String]) -> String {
    match suggestions {
        [] => format!("{}s must be defined in a {} section before they are used", kind, section.fg(EXPR)),
        [only] => format!("did you mean the `{}` {}?", only.fg(EXPR), kind),
        _ => format!(
            "did you mean one of these {}s? {}",
            kind,
            suggestions
                .iter()
                .map(|s| format!("`{}`", s.fg(EXPR)))
                .collect::<Vec<_>>()
                .join(", "),
        ),
    }
}

/// A section header names a section that does not exist.
#[derive(Debug, Clone, ErrorKind, PartialEq)]
#[error(
    message = format!("unknown section `{}`", name),
    labels = ["this section"],
    help = format!(
        "the available sections are: {}",
        super::Section::ALL
            .iter()
            .map(|section| format!("[{}]", section.header().fg(EXPR)))
            .collect::<Vec<_>>()
            .join(", "),
    ),
)]
pub struct UnknownSection {
    /// The name of the section.
    pub name: String,
}

/// An entry appears before any section header.
#[derive(Debug, Clone, ErrorKind, PartialEq)]
#[error(
    message = "entry outside of a section",
    labels = ["this entry"],
    help = format!("start a section first, such as {}", "[Units]".fg(EXPR)),
)]
pub struct EntryOutsideSection;

/// An entry has the wrong number of fields for its section.
#[derive(Debug, Clone, ErrorKind, PartialEq)]
#[error(
    message = format!("expected {} fields, found {}", expected, found),
    labels = ["this entry"],
    note = format!("entries in the {} section look like: {}", format!("[{}]", section).fg(EXPR), layout),
)]
pub struct FieldCount {
    /// The name of the section the entry is in.
    pub section: &'static str,

    /// The fields expected in the section.
    pub layout: &'static str,

    /// The number of fields expected.
    pub expected: String,

    /// The number of fields found.
    pub found: usize,
}

/// A required name is empty.
#[derive(Debug, Clone, ErrorKind, PartialEq)]
#[error(
    message = "missing name",
    labels = ["a name is required here"],
)]
pub struct EmptyName;

/// The flag of a base dimension is something other than `null`.
#[derive(Debug, Clone, ErrorKind, PartialEq)]
#[error(
    message = format!("invalid flag `{}`", flag),
    labels = ["this flag"],
    help = format!("the only flag a base dimension may have is {}", "null".fg(EXPR)),
)]
pub struct InvalidNullFlag {
    /// The flag that was found.
    pub flag: String,
}

/// A dimension expression refers to a dimension that has not been defined.
#[derive(Debug, Clone, ErrorKind, PartialEq)]
#[error(
    message = format!("unknown dimension `{}`", name),
    labels = ["this dimension"],
    help = suggestion_help("dimension", "[Dimensions/Base] or [Dimensions/Derived]", suggestions),
)]
pub struct UnknownDimension {
    /// The name of the dimension.
    pub name: String,

    /// Names of similar dimensions, if any.
    pub suggestions: Vec<String>,
}

/// A units expression refers to units that have not been defined.
#[derive(Debug, Clone, ErrorKind, PartialEq)]
#[error(
    message = format!("unknown units `{}`", name),
    labels = ["these units"],
    help = suggestion_help("unit", "[Units]", suggestions),
)]
pub struct UnknownUnits {
    /// The name of the units.
    pub name: String,

    /// Names of similar units, if any.
    pub suggestions: Vec<String>,
}

/// A number appears in a dimension expression.
#[derive(Debug, Clone, ErrorKind, PartialEq)]
#[error(
    message = "numbers cannot appear in a dimension",
    labels = ["this number"],
    help = format!("only {} is allowed, to write dimensions like {}", "1".fg(EXPR), "1 / Time".fg(EXPR)),
)]
pub struct NumberInDimension;

/// A field that must be a number refers to dimensions or units.
#[derive(Debug, Clone, ErrorKind, PartialEq)]
#[error(
    message = format!("expected a number, found `{}`", name),
    labels = ["this name"],
    help = format!("numbers may be written as products and powers, such as {}", "1.5 * 10^-3".fg(EXPR)),
)]
pub struct NameInNumber {
    /// The name that was found.
    pub name: String,
}

/// A dimension expression has no net components.
#[derive(Debug, Clone, ErrorKind, PartialEq)]
#[error(
    message = format!("`{}` has no components", name),
    labels = ["everything here cancels out"],
    help = "a dimension must have at least one component with a non-zero exponent",
)]
pub struct EmptyDimension {
    /// The name of the dimension or units being defined.
    pub name: String,
}

/// A dimension expression has an exponent too large to represent.
#[derive(Debug, Clone, ErrorKind, PartialEq)]
#[error(
    message = format!("an exponent of `{}` is too large", name),
    labels = ["in this expression"],
    help = "exponents must be finite",
)]
pub struct ExponentOverflow {
    /// The name of the dimension being defined.
    pub name: String,
}

/// A name is defined twice in the same system.
#[derive(Debug, Clone, ErrorKind, PartialEq)]
#[error(
    message = format!("`{}` is already defined", name),
    labels = ["this name"],
    help = "choose a different name",
)]
pub struct DuplicateDefinition {
    /// The name that was defined twice.
    pub name: String,
}

/// Offset units appear in a units expression.
#[derive(Debug, Clone, ErrorKind, PartialEq)]
#[error(
    message = format!("`{}` are offset units", name),
    labels = ["these units"],
    help = "offset units cannot be combined with other units; use the units they are defined against instead",
)]
pub struct OffsetInExpression {
    /// The name of the offset units.
    pub name: String,
}

/// A prefix or units could not be built from an entry.
#[derive(Debug, Clone, ErrorKind, PartialEq)]
#[error(
    message = format!("invalid definition of `{}`", name),
    labels = [format!("{}", source)],
)]
pub struct InvalidDefinition {
    /// The name of the prefix or units being defined.
    pub name: String,

    /// Why the units could not be built.
    pub source: UnitsError,
}
