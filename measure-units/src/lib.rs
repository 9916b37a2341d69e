#![doc = include_str!("../README.md")]
//!
//! [`assert_float_eq`]: https://crates.io/crates/assert_float_eq
//! [`approx`]: https://crates.io/crates/approx

pub mod convert;
pub mod prefix;
pub mod units;

use measure_dimension::{ComponentIterable, Components};
use std::{fmt::{self, Display, Formatter}, ops::{Add, Div, Mul}};
pub use prefix::Prefix;
pub use units::{ConversionError, Offset, Units, UnitsError};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// A value and the units it is measured in.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Quantity<T> {
    value: T,
    units: Units,
}

impl<T> Quantity<T> {
    /// Create a new quantity.
    pub fn new(value: T, units: Units) -> Self {
        Self { value, units }
    }

    /// Get the value of this quantity.
    pub fn value(&self) -> &T {
        &self.value
    }

    /// Get the units of this quantity.
    pub fn units(&self) -> &Units {
        &self.units
    }

    /// Splits this quantity into its value and units.
    pub fn into_parts(self) -> (T, Units) {
        (self.value, self.units)
    }

    /// Convert this quantity to other units. Returns [`Err`] if the dimensions of the units
    /// don't have the same components.
    ///
    /// Offsets are applied, so `100 °C` converts to `212 °F`.
    pub fn convert(&self, target: &Units) -> Result<Self, ConversionError>
        where T: Copy + Mul<f64, Output = T> + Add<f64, Output = T>,
    {
        Ok(Self {
            value: self.units.convert_value(self.value, target)?,
            units: target.clone(),
        })
    }

    /// Adds another quantity to this one, converting it to the units of `self` first. Both
    /// quantities are treated as differences, so offsets are not applied.
    pub fn try_add(&self, other: &Self) -> Result<Self, ConversionError>
        where T: Copy + Mul<f64, Output = T> + Add<Output = T>,
    {
        let factor = other.units.conversion_factor(&self.units)?;
        Ok(Self {
            value: self.value + other.value * factor,
            units: self.units.clone(),
        })
    }

    /// Multiplies two quantities. The units of the result are the product of both units.
    ///
    /// Returns [`Err`] if either quantity is in offset units, or if the dimensions cancel out.
    pub fn try_mul(&self, other: &Self) -> Result<Self, UnitsError>
        where T: Copy + Mul<Output = T>,
    {
        let name = format!("{} {}", self.units.symbol(), other.units.symbol());
        Ok(Self {
            value: self.value * other.value,
            units: Units::derived(name, 1.0, &[&self.units, &other.units], &[])?,
        })
    }

    /// Divides this quantity by another. The units of the result are the quotient of both
    /// units.
    ///
    /// Returns [`Err`] if either quantity is in offset units, or if the dimensions cancel out.
    pub fn try_div(&self, other: &Self) -> Result<Self, UnitsError>
        where T: Copy + Div<Output = T>,
    {
        let name = format!("{}/{}", self.units.symbol(), other.units.symbol());
        Ok(Self {
            value: self.value / other.value,
            units: Units::derived(name, 1.0, &[&self.units], &[&other.units])?,
        })
    }
}

impl<T> ComponentIterable for Quantity<T> {
    fn components(&self) -> Components<'_> {
        self.units.components()
    }

    fn component_count(&self) -> usize {
        self.units.component_count()
    }
}

impl<T: Display> Display for Quantity<T> {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.value, self.units)
    }
}
