use std::{
    cmp::Ordering,
    fmt::{self, Display, Formatter},
    hash::{Hash, Hasher},
};
use super::{
    base::BaseDimension,
    error::DimensionError,
    iter::{ComponentIterable, Components},
};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// One factor of a dimension: a [`BaseDimension`] raised to an exponent.
///
/// Acceleration, for example, consists of the two components `Length^1` and `Time^-2`. Exponents
/// may be negative or fractional, but must be finite.
///
/// Components are ordered first by exponent, **descending**, then by their base dimension,
/// ascending. This is the order in which every [`ComponentIterable`] yields its components.
///
/// A component is itself a [`ComponentIterable`] that yields exactly one element, itself, so that
/// single components can be mixed freely with whole dimensions when building a
/// [`DerivedDimension`](crate::DerivedDimension).
#[derive(Clone, Debug)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct DimensionComponent {
    /// The base dimension of this component.
    dimension: BaseDimension,

    /// The exponent of the base dimension.
    exponent: f32,
}

impl DimensionComponent {
    /// Creates a component with the given base dimension and exponent.
    ///
    /// The exponent must be finite; use [`DimensionComponent::try_new`] to validate an exponent
    /// that comes from outside the program.
    pub fn new(dimension: BaseDimension, exponent: f32) -> Self {
        debug_assert!(exponent.is_finite(), "exponent of `{}` must be finite, got {}", dimension.name(), exponent);
        Self::unchecked(dimension, exponent)
    }

    /// Creates a component without checking the exponent. Accumulated exponents are checked once
    /// the accumulation is done.
    pub(crate) fn unchecked(dimension: BaseDimension, exponent: f32) -> Self {
        Self { dimension, exponent }
    }

    /// Returns `true` if the exponent is finite.
    pub fn is_finite(&self) -> bool {
        self.exponent.is_finite()
    }

    /// Creates a component that is linear in the given base dimension (exponent `1.0`).
    pub fn linear(dimension: BaseDimension) -> Self {
        Self::new(dimension, 1.0)
    }

    /// Creates a component with the given base dimension and exponent, returning
    /// [`DimensionError::InvalidArgument`] if the exponent is infinite or NaN.
    pub fn try_new(dimension: BaseDimension, exponent: f32) -> Result<Self, DimensionError> {
        if exponent.is_finite() {
            Ok(Self::new(dimension, exponent))
        } else {
            Err(DimensionError::non_finite_exponent())
        }
    }

    /// Returns the base dimension of this component.
    pub fn dimension(&self) -> &BaseDimension {
        &self.dimension
    }

    /// Returns the exponent of this component.
    pub fn exponent(&self) -> f32 {
        self.exponent
    }

    /// Returns a component along the same base dimension, with the exponent multiplied by
    /// `factor`.
    pub fn pow(&self, factor: f32) -> Self {
        Self::new(self.dimension.clone(), self.exponent * factor)
    }

    /// Returns the reciprocal of this component.
    pub fn recip(&self) -> Self {
        self.pow(-1.0)
    }
}

impl ComponentIterable for DimensionComponent {
    fn components(&self) -> Components<'_> {
        Components::single(self.clone())
    }

    fn component_count(&self) -> usize {
        1
    }
}

impl PartialEq for DimensionComponent {
    fn eq(&self, other: &Self) -> bool {
        self.exponent == other.exponent && self.dimension == other.dimension
    }
}

impl Eq for DimensionComponent {}

impl Hash for DimensionComponent {
    fn hash<H: Hasher>(&self, state: &mut H) {
        // `0.0 == -0.0`, so both must hash the same
        let exponent = if self.exponent == 0.0 { 0.0f32 } else { self.exponent };
        exponent.to_bits().hash(state);
        self.dimension.hash(state);
    }
}

impl PartialOrd for DimensionComponent {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for DimensionComponent {
    fn cmp(&self, other: &Self) -> Ordering {
        // larger exponents sort first
        other.exponent
            .partial_cmp(&self.exponent)
            .unwrap_or_else(|| other.exponent.total_cmp(&self.exponent))
            .then_with(|| self.dimension.cmp(&other.dimension))
    }
}

impl Display for DimensionComponent {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.dimension.name())?;
        if self.exponent != 1.0 {
            write!(f, "^{}", self.exponent)?;
        }
        Ok(())
    }
}

impl From<BaseDimension> for DimensionComponent {
    fn from(dimension: BaseDimension) -> Self {
        Self::linear(dimension)
    }
}
