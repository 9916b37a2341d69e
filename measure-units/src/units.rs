use measure_dimension::{
    ComponentIterable,
    ComponentMap,
    Components,
    DerivedDimension,
    Dimension,
    DimensionError,
};
use std::{error::Error, fmt::{self, Display, Formatter}};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Units of measurement along some [`Dimension`].
///
/// Every unit carries a scale factor relative to the coherent unit of its dimension. For example,
/// if the meter is the coherent unit of length, the kilometer has a factor of `1000.0`. Only the
/// ratio of two factors along the same dimension is meaningful, so it isn't important which unit
/// has a factor of `1.0`.
///
/// Units with an offset, such as degrees Celsius, also record the units they are defined against
/// (see [`Offset`]). Those units cannot be scaled, prefixed, or multiplied with other units.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[non_exhaustive]
pub struct Units {
    /// The name of the units, such as `meter`.
    name: String,

    /// The abbreviation of the units, such as `m`.
    abbreviation: Option<String>,

    /// The value to multiply a quantity in these units by to get a quantity in the coherent unit
    /// of the dimension.
    factor: f64,

    /// The dimension these units measure.
    dimension: Dimension,

    /// The affine transformation from the parent units, if these are offset units.
    offset: Option<Offset>,
}

/// The definition of offset units in terms of their parent units.
///
/// A quantity `q` in the offset units is equal to `(q + offset) * scale` in the parent units.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Offset {
    /// The units these units are defined against.
    parent: Box<Units>,

    /// The size of one of these units, in parent units.
    scale: f64,

    /// The offset of the zero point, in these units.
    offset: f64,
}

impl Offset {
    /// Returns the parent units.
    pub fn parent(&self) -> &Units {
        &self.parent
    }

    /// Returns the size of one of the offset units, in parent units.
    pub fn scale(&self) -> f64 {
        self.scale
    }

    /// Returns the offset of the zero point, in the offset units.
    pub fn offset(&self) -> f64 {
        self.offset
    }

    /// Converts a value in the offset units to the parent units.
    pub fn convert_to_parent(&self, quantity: f64) -> f64 {
        (quantity + self.offset) * self.scale
    }

    /// Converts a value in the parent units to the offset units.
    pub fn convert_from_parent(&self, quantity: f64) -> f64 {
        quantity / self.scale - self.offset
    }
}

impl Units {
    /// Creates units with a factor of `1.0` along the given dimension, making them the coherent
    /// unit of that dimension.
    pub fn new(name: impl Into<String>, dimension: impl Into<Dimension>) -> Result<Self, UnitsError> {
        Self::with_factor(name, 1.0, dimension)
    }

    /// Creates units with the given factor along the given dimension.
    pub fn with_factor(
        name: impl Into<String>,
        factor: f64,
        dimension: impl Into<Dimension>,
    ) -> Result<Self, UnitsError> {
        let name = name.into();
        if name.is_empty() {
            return Err(UnitsError::MissingName);
        }
        check_factor(&name, factor)?;

        Ok(Self {
            name,
            abbreviation: None,
            factor,
            dimension: dimension.into(),
            offset: None,
        })
    }

    /// Creates units that are `factor` times the size of `units`.
    ///
    /// Returns [`UnitsError::OffsetUnits`] if `units` are offset units.
    pub fn scaled(name: impl Into<String>, factor: f64, units: &Units) -> Result<Self, UnitsError> {
        units.check_linear()?;
        Self::with_factor(name, factor * units.factor, units.dimension.clone())
    }

    /// Creates units from the product of the `numerator` units divided by the product of the
    /// `denominator` units, times `factor`.
    ///
    /// The dimension of the new units is a [`DerivedDimension`] named after them. Use
    /// [`Units::with_dimension`] to attach a named dimension of the same shape instead.
    ///
    /// Returns [`UnitsError::OffsetUnits`] if any of the inputs are offset units, or
    /// [`UnitsError::Dimension`] if the inputs cancel out completely.
    pub fn derived(
        name: impl Into<String>,
        factor: f64,
        numerator: &[&Units],
        denominator: &[&Units],
    ) -> Result<Self, UnitsError> {
        let name = name.into();
        if name.is_empty() {
            return Err(UnitsError::MissingName);
        }

        let mut components = ComponentMap::new();
        let mut total = factor;
        for units in numerator {
            units.check_linear()?;
            components.multiply(*units);
            total *= units.factor;
        }
        for units in denominator {
            units.check_linear()?;
            components.divide(*units);
            total /= units.factor;
        }

        let dimension = DerivedDimension::with_description(
            format!("{} dimension", name),
            format!("dimension of {}", name),
            components.into_components(),
        )?;
        Self::with_factor(name, total, dimension)
    }

    /// Creates offset units, where a quantity `q` in the new units is `(q + offset) * scale` in
    /// the `parent` units. The parent units may themselves be offset units.
    ///
    /// Returns [`UnitsError::InvalidFactor`] if `scale` is zero or not finite.
    pub fn offset(
        name: impl Into<String>,
        parent: &Units,
        scale: f64,
        offset: f64,
    ) -> Result<Self, UnitsError> {
        let mut units = Self::with_factor(name, scale * parent.factor, parent.dimension.clone())?;
        if !offset.is_finite() {
            return Err(UnitsError::InvalidFactor { units: units.name, factor: offset });
        }
        units.offset = Some(Offset {
            parent: Box::new(parent.clone()),
            scale,
            offset,
        });
        Ok(units)
    }

    /// Returns these units with the given abbreviation.
    pub fn with_abbreviation(mut self, abbreviation: impl Into<String>) -> Self {
        let abbreviation = abbreviation.into();
        self.abbreviation = (!abbreviation.is_empty()).then_some(abbreviation);
        self
    }

    /// Returns these units along a different dimension with the same components, such as a named
    /// `Force` dimension in place of the anonymous dimension of `kg m s^-2`.
    pub fn with_dimension(mut self, dimension: impl Into<Dimension>) -> Result<Self, ConversionError> {
        let dimension = dimension.into();
        if !self.dimension.same_shape(&dimension) {
            return Err(ConversionError {
                units: self.name.clone(),
                target: dimension.name().to_owned(),
            });
        }
        self.dimension = dimension;
        Ok(self)
    }

    /// Returns a copy of these units under a different name and abbreviation.
    pub fn renamed(&self, name: impl Into<String>, abbreviation: Option<String>) -> Result<Self, UnitsError> {
        let name = name.into();
        if name.is_empty() {
            return Err(UnitsError::MissingName);
        }
        Ok(Self {
            name,
            abbreviation: abbreviation.filter(|abbr| !abbr.is_empty()),
            ..self.clone()
        })
    }

    /// Returns the name of these units.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Returns the abbreviation of these units, if there is one.
    pub fn abbreviation(&self) -> Option<&str> {
        self.abbreviation.as_deref()
    }

    /// Returns the abbreviation if there is one, otherwise the name.
    pub fn symbol(&self) -> &str {
        self.abbreviation().unwrap_or(&self.name)
    }

    /// Returns the factor relative to the coherent unit of the dimension.
    pub fn factor(&self) -> f64 {
        self.factor
    }

    /// Returns the dimension these units measure.
    pub fn dimension(&self) -> &Dimension {
        &self.dimension
    }

    /// Returns the offset definition, if these are offset units.
    pub fn offset_from_parent(&self) -> Option<&Offset> {
        self.offset.as_ref()
    }

    /// Returns `true` if these are offset units.
    pub fn is_offset(&self) -> bool {
        self.offset.is_some()
    }

    /// Returns [`UnitsError::OffsetUnits`] if these are offset units.
    pub(crate) fn check_linear(&self) -> Result<(), UnitsError> {
        match self.offset {
            Some(_) => Err(UnitsError::OffsetUnits { units: self.name.clone() }),
            None => Ok(()),
        }
    }
}

/// Returns [`UnitsError::InvalidFactor`] if the factor is zero or not finite.
pub(crate) fn check_factor(name: &str, factor: f64) -> Result<(), UnitsError> {
    if factor.is_finite() && factor != 0.0 {
        Ok(())
    } else {
        Err(UnitsError::InvalidFactor { units: name.to_owned(), factor })
    }
}

impl ComponentIterable for Units {
    fn components(&self) -> Components<'_> {
        self.dimension.components()
    }

    fn component_count(&self) -> usize {
        self.dimension.component_count()
    }
}

impl Display for Units {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.symbol())
    }
}

/// Error returned if a quantity in some units cannot be converted to other units.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ConversionError {
    /// The units that could not be converted.
    pub(crate) units: String,

    /// The target units or dimension.
    pub(crate) target: String,
}

impl Display for ConversionError {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f,
            "cannot convert from `{}` to `{}`: the dimensions are not compatible",
            self.units, self.target
        )
    }
}

impl Error for ConversionError {}

/// Error returned if units cannot be built.
#[derive(Clone, Debug, PartialEq)]
#[non_exhaustive]
pub enum UnitsError {
    /// The dimension of the units could not be built.
    Dimension(DimensionError),

    /// Units were given an empty name.
    MissingName,

    /// A scale factor was zero, infinite, or NaN.
    InvalidFactor {
        /// The name of the units being built.
        units: String,

        /// The invalid factor.
        factor: f64,
    },

    /// Offset units were used where only linear units make sense, such as in a product or with
    /// a prefix.
    OffsetUnits {
        /// The name of the offset units.
        units: String,
    },
}

impl Display for UnitsError {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match self {
            Self::Dimension(err) => write!(f, "{}", err),
            Self::MissingName => write!(f, "units must have a name"),
            Self::InvalidFactor { units, factor } => {
                write!(f, "invalid factor `{}` for `{}`: factors must be finite and non-zero", factor, units)
            },
            Self::OffsetUnits { units } => {
                write!(f, "`{}` are offset units, which cannot be scaled or combined", units)
            },
        }
    }
}

impl Error for UnitsError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Dimension(err) => Some(err),
            _ => None,
        }
    }
}

impl From<DimensionError> for UnitsError {
    fn from(err: DimensionError) -> Self {
        Self::Dimension(err)
    }
}
