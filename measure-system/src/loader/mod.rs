//! Loads a [`MeasurementSystem`] from a text definition file.
//!
//! A definition file is a list of sections, each started by a header in brackets. Every other
//! non-blank line is an entry with comma-separated fields. `#` starts a comment that runs to the
//! end of the line. Entries can only refer to entries that appear before them in the file.
//!
//! ```text
//! [Dimensions/Base]
//! Length, distance along a line
//! Time, duration
//!
//! [Dimensions/Derived]
//! Velocity, rate of change of position, Length / Time
//!
//! [Units]
//! meter, m, Length
//! second, s, Time
//!
//! [Units/Derived]
//! kilometer per hour, kph, 1000 / 3600, meter / second
//! ```
//!
//! | Section | Fields |
//! | --- | --- |
//! | `[Prefixes]` | long form, abbreviation, factor |
//! | `[Dimensions/Base]` | name, description, optional `null` flag |
//! | `[Dimensions/Derived]` | name, description, expression over dimensions |
//! | `[Units]` | name, abbreviation, dimension |
//! | `[Units/Derived]` | name, abbreviation, factor, expression over units |
//! | `[Units/Alias]` | name, abbreviation, units |
//! | `[Units/Offset]` | name, abbreviation, parent units, scale, offset |
//!
//! Abbreviations and descriptions may be left empty. Factors are expressions over numbers, like
//! `1.609344 * 10^3`. Units defined in `[Units/Derived]` take the dimension of the same shape
//! already registered in the system, if there is one.

pub mod error;
mod eval;

use measure_dimension::{BaseDimension, DerivedDimension, Dimension, DimensionError};
use measure_error::Error;
use measure_units::{Prefix, Units, UnitsError};
use eval::UnitsProduct;
use std::ops::{Range, RangeInclusive};
use tracing::debug;
use crate::{
    parser::{expr::{Expr, Name}, Parser},
    system::MeasurementSystem,
};

/// The sections of a definition file.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) enum Section {
    Prefixes,
    BaseDimensions,
    DerivedDimensions,
    Units,
    DerivedUnits,
    AliasUnits,
    OffsetUnits,
}

impl Section {
    pub(crate) const ALL: [Section; 7] = [
        Self::Prefixes,
        Self::BaseDimensions,
        Self::DerivedDimensions,
        Self::Units,
        Self::DerivedUnits,
        Self::AliasUnits,
        Self::OffsetUnits,
    ];

    /// Returns the name of the section as written between brackets.
    pub(crate) fn header(self) -> &'static str {
        match self {
            Self::Prefixes => "Prefixes",
            Self::BaseDimensions => "Dimensions/Base",
            Self::DerivedDimensions => "Dimensions/Derived",
            Self::Units => "Units",
            Self::DerivedUnits => "Units/Derived",
            Self::AliasUnits => "Units/Alias",
            Self::OffsetUnits => "Units/Offset",
        }
    }

    fn layout(self) -> &'static str {
        match self {
            Self::Prefixes => "long form, abbreviation, factor",
            Self::BaseDimensions => "name, description[, null]",
            Self::DerivedDimensions => "name, description, dimensions",
            Self::Units => "name, abbreviation, dimension",
            Self::DerivedUnits => "name, abbreviation, factor, units",
            Self::AliasUnits => "name, abbreviation, units",
            Self::OffsetUnits => "name, abbreviation, parent units, scale, offset",
        }
    }

    fn field_count(self) -> RangeInclusive<usize> {
        match self {
            Self::BaseDimensions => 2..=3,
            Self::Prefixes | Self::DerivedDimensions | Self::Units | Self::AliasUnits => 3..=3,
            Self::DerivedUnits => 4..=4,
            Self::OffsetUnits => 5..=5,
        }
    }

    fn from_header(header: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|section| section.header() == header)
    }
}

/// A single trimmed field of an entry.
#[derive(Debug, Clone, Copy)]
struct Field<'source> {
    /// The trimmed text of the field.
    text: &'source str,

    /// Where the trimmed text starts in the whole source.
    start: usize,
}

impl<'source> Field<'source> {
    fn span(&self) -> Range<usize> {
        self.start..self.start + self.text.len()
    }

    /// Returns the field as a name, with runs of whitespace collapsed to a single space.
    fn name(&self) -> Result<String, Error> {
        let name = self.text.split_whitespace().collect::<Vec<_>>().join(" ");
        if name.is_empty() {
            Err(Error::new(vec![self.span()], error::EmptyName))
        } else {
            Ok(name)
        }
    }

    /// Returns the field as optional text, which is [`None`] if the field is empty.
    fn optional(&self) -> Option<String> {
        (!self.text.is_empty()).then(|| self.text.to_owned())
    }

    /// Parses the field as an expression, then evaluates it with the given function.
    fn eval<T>(&self, f: impl FnOnce(&Expr) -> Result<T, Error>) -> Result<T, Error> {
        Parser::new(self.text)
            .try_parse_full::<Expr>()
            .and_then(|expr| f(&expr))
            .map_err(|err| err.offset(self.start))
    }
}

/// Splits an entry into trimmed fields.
fn split_fields(entry: &str, start: usize) -> Vec<Field<'_>> {
    let mut offset = start;
    entry.split(',')
        .map(|raw| {
            let leading = raw.len() - raw.trim_start().len();
            let field = Field { text: raw.trim(), start: offset + leading };
            offset += raw.len() + 1;
            field
        })
        .collect()
}

/// Where the loader is in the file.
#[derive(Clone, Copy, Debug)]
enum State {
    /// No section header has been seen yet.
    Start,

    /// Inside a known section.
    In(Section),

    /// Inside a section with an unknown name. Its entries are skipped.
    Unknown,
}

/// Reads definitions line by line into a system, collecting errors as it goes.
struct Loader<'a> {
    system: &'a mut MeasurementSystem,
    state: State,
    errors: Vec<Error>,
}

impl Loader<'_> {
    /// Loads a single line, which starts `offset` bytes into the source.
    fn line(&mut self, line: &str, offset: usize) {
        let content = line.split('#').next().unwrap_or_default();
        let text = content.trim();
        if text.is_empty() {
            return;
        }
        let start = offset + content.len() - content.trim_start().len();
        let span = start..start + text.len();

        if let Some(header) = text.strip_prefix('[').and_then(|rest| rest.strip_suffix(']')) {
            let header = header.trim();
            self.state = match Section::from_header(header) {
                Some(section) => {
                    debug!(section = section.header(), "entering section");
                    State::In(section)
                },
                None => {
                    self.errors.push(Error::new(vec![span], error::UnknownSection {
                        name: header.to_owned(),
                    }));
                    State::Unknown
                },
            };
            return;
        }

        match self.state {
            State::Start => self.errors.push(Error::new(vec![span], error::EntryOutsideSection)),
            State::Unknown => {},
            State::In(section) => {
                if let Err(err) = self.entry(section, text, start) {
                    debug!(section = section.header(), entry = text, "invalid entry");
                    self.errors.push(err);
                }
            },
        }
    }

    /// Loads an entry of the given section.
    fn entry(&mut self, section: Section, entry: &str, start: usize) -> Result<(), Error> {
        let fields = split_fields(entry, start);
        if !section.field_count().contains(&fields.len()) {
            let counts = section.field_count();
            let expected = if counts.start() == counts.end() {
                counts.start().to_string()
            } else {
                format!("{} or {}", counts.start(), counts.end())
            };
            return Err(Error::new(vec![start..start + entry.len()], error::FieldCount {
                section: section.header(),
                layout: section.layout(),
                expected,
                found: fields.len(),
            }));
        }

        match section {
            Section::Prefixes => self.prefix(&fields),
            Section::BaseDimensions => self.base_dimension(&fields),
            Section::DerivedDimensions => self.derived_dimension(&fields),
            Section::Units => self.units(&fields),
            Section::DerivedUnits => self.derived_units(&fields),
            Section::AliasUnits => self.alias_units(&fields),
            Section::OffsetUnits => self.offset_units(&fields),
        }
    }

    fn prefix(&mut self, fields: &[Field]) -> Result<(), Error> {
        let long_form = fields[0].name()?;
        let factor = fields[2].eval(eval::number)?;
        let prefix = Prefix::new(long_form.clone(), factor)
            .map_err(|source| invalid_definition(&fields[2], &long_form, source))?
            .with_abbreviation(fields[1].text);

        if !self.system.add_prefix(prefix) {
            return Err(duplicate(&fields[0], long_form));
        }
        Ok(())
    }

    fn base_dimension(&mut self, fields: &[Field]) -> Result<(), Error> {
        let name = fields[0].name()?;
        let is_null = match fields.get(2) {
            None => false,
            Some(flag) if flag.text == "null" => true,
            Some(flag) => {
                return Err(Error::new(vec![flag.span()], error::InvalidNullFlag {
                    flag: flag.text.to_owned(),
                }));
            },
        };

        let dimension = BaseDimension::build(name.clone(), fields[1].optional(), is_null)
            .map_err(|_| Error::new(vec![fields[0].span()], error::EmptyName))?;
        self.add_dimension(&fields[0], name, dimension)
    }

    fn derived_dimension(&mut self, fields: &[Field]) -> Result<(), Error> {
        let name = fields[0].name()?;
        let components = fields[2].eval(|expr| eval::dimension(expr, self.system))?;
        let dimension = DerivedDimension::build(name.clone(), fields[1].optional(), components.into_components())
            .map_err(|err| match err {
                DimensionError::EmptyResult { .. } => {
                    Error::new(vec![fields[2].span()], error::EmptyDimension { name: name.clone() })
                },
                _ => Error::new(vec![fields[2].span()], error::ExponentOverflow { name: name.clone() }),
            })?;
        self.add_dimension(&fields[0], name, dimension)
    }

    fn add_dimension(&mut self, field: &Field, name: String, dimension: impl Into<Dimension>) -> Result<(), Error> {
        if !self.system.add_dimension(dimension) {
            return Err(duplicate(field, name));
        }
        Ok(())
    }

    fn units(&mut self, fields: &[Field]) -> Result<(), Error> {
        let name = fields[0].name()?;
        let dimension_name = fields[2].name()?;
        let dimension = self.system.dimension(&dimension_name)
            .ok_or_else(|| {
                let name = Name { name: dimension_name.clone(), span: 0..fields[2].text.len() };
                eval::unknown_dimension(&name, self.system).offset(fields[2].start)
            })?
            .clone();

        let units = Units::new(name.clone(), dimension)
            .map_err(|source| invalid_definition(&fields[0], &name, source))?
            .with_abbreviation(fields[1].text);
        self.add_units(&fields[0], units)
    }

    fn derived_units(&mut self, fields: &[Field]) -> Result<(), Error> {
        let name = fields[0].name()?;
        let factor = fields[2].eval(eval::number)?;
        let product = fields[3].eval(|expr| eval::units(expr, self.system))?;
        if product.components.is_empty() {
            return Err(Error::new(vec![fields[3].span()], error::EmptyDimension { name }));
        }

        let units = self.system.units_from_product(name.clone(), factor, product)
            .map_err(|source| invalid_definition(&fields[2], &name, source))?
            .with_abbreviation(fields[1].text);
        self.add_units(&fields[0], units)
    }

    fn alias_units(&mut self, fields: &[Field]) -> Result<(), Error> {
        let name = fields[0].name()?;
        let target = self.lookup_units(&fields[2])?;
        let units = target.renamed(name.clone(), fields[1].optional())
            .map_err(|source| invalid_definition(&fields[0], &name, source))?;
        self.add_units(&fields[0], units)
    }

    fn offset_units(&mut self, fields: &[Field]) -> Result<(), Error> {
        let name = fields[0].name()?;
        let parent = self.lookup_units(&fields[2])?;
        let scale = fields[3].eval(eval::number)?;
        let offset = fields[4].eval(eval::number)?;

        let units = Units::offset(name.clone(), &parent, scale, offset)
            .map_err(|source| invalid_definition(&fields[3], &name, source))?
            .with_abbreviation(fields[1].text);
        self.add_units(&fields[0], units)
    }

    /// Looks up the units named by a field, including prefixed units.
    fn lookup_units(&self, field: &Field) -> Result<Units, Error> {
        let name = field.name()?;
        match self.system.units(&name) {
            Some(units) => Ok(units.into_owned()),
            None => {
                let name = Name { name, span: 0..field.text.len() };
                Err(eval::unknown_units(&name, self.system).offset(field.start))
            },
        }
    }

    fn add_units(&mut self, field: &Field, units: Units) -> Result<(), Error> {
        let name = units.name().to_owned();
        if !self.system.add_units(units) {
            return Err(duplicate(field, name));
        }
        Ok(())
    }
}

fn duplicate(field: &Field, name: String) -> Error {
    Error::new(vec![field.span()], error::DuplicateDefinition { name })
}

fn invalid_definition(field: &Field, name: &str, source: UnitsError) -> Error {
    Error::new(vec![field.span()], error::InvalidDefinition { name: name.to_owned(), source })
}

impl MeasurementSystem {
    /// Evaluates a units expression, such as `kg m / s^2`, `km / h`, or `°C`, against the units
    /// of this system.
    ///
    /// A lone name is looked up with [`MeasurementSystem::units`], so offset units can be named
    /// but not combined. The units of any other expression are named after the expression and
    /// take the registered dimension of the same shape, if there is one.
    ///
    /// Units written side by side are multiplied, unless the words together name units: `kg m`
    /// is `kg * m`, but `newton degree` is a single name.
    pub fn parse_units(&self, source: &str) -> Result<Units, Error> {
        let expr = Parser::new(source).try_parse_full::<Expr>()?;
        if let Some(name) = expr.as_name() {
            if let Some(units) = self.units(&name.name) {
                return Ok(units.into_owned());
            }
        }

        let product = eval::units(&expr, self)?;
        let name = source.split_whitespace().collect::<Vec<_>>().join(" ");
        if product.components.is_empty() {
            return Err(Error::new(vec![expr.span.clone()], error::EmptyDimension { name }));
        }
        self.units_from_product(name.clone(), 1.0, product)
            .map_err(|source| Error::new(vec![expr.span.clone()], error::InvalidDefinition { name, source }))
    }

    /// Builds units from an evaluated expression, along the dimension of the same shape already
    /// in this system if there is one.
    fn units_from_product(&self, name: String, factor: f64, product: UnitsProduct) -> Result<Units, UnitsError> {
        let anonymous = DerivedDimension::with_description(
            format!("{} dimension", name),
            format!("dimension of {}", name),
            product.components.into_components(),
        )?;
        let dimension = self.dimensions_like(&anonymous)
            .first()
            .map(|&dimension| dimension.clone())
            .unwrap_or_else(|| anonymous.into());
        Units::with_factor(name, factor * product.factor, dimension)
    }

    /// Loads a new measurement system from the given definition file. See the
    /// [module-level documentation](self) for the format.
    ///
    /// Every line is loaded, even after an error. If there were any errors, all of them are
    /// returned, each pointing at the part of `source` it came from.
    pub fn load(source: &str) -> Result<Self, Vec<Error>> {
        Self::new().load_into(source)
    }

    /// Loads definitions into this system, which may already contain entries or have a parent.
    /// Entries in `source` may refer to entries that are already in the system.
    pub fn load_into(mut self, source: &str) -> Result<Self, Vec<Error>> {
        let mut loader = Loader {
            system: &mut self,
            state: State::Start,
            errors: Vec::new(),
        };

        let mut offset = 0;
        for line in source.split_inclusive('\n') {
            loader.line(line, offset);
            offset += line.len();
        }

        let errors = loader.errors;
        debug!(name = self.name(), errors = errors.len(), "loaded measurement system");
        if errors.is_empty() {
            Ok(self)
        } else {
            Err(errors)
        }
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use super::*;

    #[test]
    fn fields() {
        let fields = split_fields("meter,  m , Length", 10);
        let parts = fields.iter().map(|field| (field.text, field.span())).collect::<Vec<_>>();
        assert_eq!(parts, vec![("meter", 10..15), ("m", 18..19), ("Length", 22..28)]);
    }

    #[test]
    fn empty_fields() {
        let fields = split_fields("meter,,Length", 0);
        assert_eq!(fields[1].text, "");
        assert_eq!(fields[1].span(), 6..6);
        assert_eq!(fields[1].optional(), None);
        assert!(fields[1].name().is_err());
    }

    #[test]
    fn sections() {
        for section in Section::ALL {
            assert_eq!(Section::from_header(section.header()), Some(section));
        }
        assert_eq!(Section::from_header("Constants"), None);
    }
}
