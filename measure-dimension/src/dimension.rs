use std::{
    cmp::Ordering,
    fmt::{self, Display, Formatter},
};
use super::{
    base::BaseDimension,
    derived::DerivedDimension,
    error::DimensionError,
    iter::{compare_components, ComponentIterable, Components},
};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Any dimension in a measurement system: either a [`BaseDimension`], or a [`DerivedDimension`]
/// built from base dimensions.
///
/// Two dimensions are equal when they are the same variant, have the same name and description,
/// and (for base dimensions) the same identity or (for derived dimensions) the same components.
///
/// Dimensions have two total orders, both consistent with equality:
///
/// - [`Dimension::shape_cmp`] orders by components first, so that dimensions of the same shape
///   (such as `Velocity` and `Speed`) are adjacent. Measurement systems use it to look up every
///   dimension matching a shape.
/// - [`Dimension::canonical_cmp`] orders by name first. This is the [`Ord`] implementation.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum Dimension {
    /// A base dimension.
    Base(BaseDimension),

    /// A dimension derived from base dimensions.
    Derived(DerivedDimension),
}

impl Dimension {
    /// Returns the name of this dimension.
    pub fn name(&self) -> &str {
        match self {
            Self::Base(base) => base.name(),
            Self::Derived(derived) => derived.name(),
        }
    }

    /// Returns the description of this dimension, if one was provided.
    pub fn description(&self) -> Option<&str> {
        match self {
            Self::Base(base) => base.description(),
            Self::Derived(derived) => derived.description(),
        }
    }

    /// Returns `true` if this is a base dimension.
    pub fn is_base(&self) -> bool {
        matches!(self, Self::Base(_))
    }

    /// Returns the base dimension, if this is one.
    pub fn as_base(&self) -> Option<&BaseDimension> {
        match self {
            Self::Base(base) => Some(base),
            Self::Derived(_) => None,
        }
    }

    /// Returns the derived dimension, if this is one.
    pub fn as_derived(&self) -> Option<&DerivedDimension> {
        match self {
            Self::Base(_) => None,
            Self::Derived(derived) => Some(derived),
        }
    }

    /// Compares the components of this dimension with the components of `other`, ignoring names
    /// and descriptions. See [`compare_components`].
    pub fn compare_components<C: ComponentIterable + ?Sized>(&self, other: &C) -> Ordering {
        compare_components(self, other)
    }

    /// Compares the components of this dimension with those of a dimension that may not exist,
    /// returning [`DimensionError::NullComparison`] if it doesn't.
    pub fn checked_compare_components(
        &self,
        other: Option<&Dimension>,
    ) -> Result<Ordering, DimensionError> {
        other
            .map(|other| self.compare_components(other))
            .ok_or(DimensionError::NullComparison)
    }

    /// Returns `true` if this dimension has the same components as `other`.
    pub fn same_shape<C: ComponentIterable + ?Sized>(&self, other: &C) -> bool {
        self.compare_components(other) == Ordering::Equal
    }

    /// Orders by components, then name, then description, then variant (base before derived).
    pub fn shape_cmp(&self, other: &Self) -> Ordering {
        self.compare_components(other)
            .then_with(|| self.name().cmp(other.name()))
            .then_with(|| self.description().cmp(&other.description()))
            .then_with(|| self.rank().cmp(&other.rank()))
    }

    /// Orders by name, then description, then variant (base before derived), then by identity
    /// for base dimensions or by components for derived dimensions.
    pub fn canonical_cmp(&self, other: &Self) -> Ordering {
        self.name()
            .cmp(other.name())
            .then_with(|| self.description().cmp(&other.description()))
            .then_with(|| match (self, other) {
                (Self::Base(a), Self::Base(b)) => a.cmp(b),
                (Self::Derived(a), Self::Derived(b)) => compare_components(a, b),
                _ => self.rank().cmp(&other.rank()),
            })
    }

    fn rank(&self) -> u8 {
        match self {
            Self::Base(_) => 0,
            Self::Derived(_) => 1,
        }
    }
}

impl ComponentIterable for Dimension {
    fn components(&self) -> Components<'_> {
        match self {
            Self::Base(base) => base.components(),
            Self::Derived(derived) => derived.components(),
        }
    }

    fn component_count(&self) -> usize {
        match self {
            Self::Base(base) => base.component_count(),
            Self::Derived(derived) => derived.component_count(),
        }
    }
}

impl PartialOrd for Dimension {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Dimension {
    fn cmp(&self, other: &Self) -> Ordering {
        self.canonical_cmp(other)
    }
}

impl Display for Dimension {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match self {
            Self::Base(base) => Display::fmt(base, f),
            Self::Derived(derived) => Display::fmt(derived, f),
        }
    }
}

impl From<BaseDimension> for Dimension {
    fn from(base: BaseDimension) -> Self {
        Self::Base(base)
    }
}

impl From<DerivedDimension> for Dimension {
    fn from(derived: DerivedDimension) -> Self {
        Self::Derived(derived)
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use super::*;

    #[test]
    fn accessors() {
        let l = BaseDimension::with_description("Length", "distance").unwrap();
        let dim = Dimension::from(l.clone());
        assert_eq!(dim.name(), "Length");
        assert_eq!(dim.description(), Some("distance"));
        assert!(dim.is_base());
        assert_eq!(dim.as_base(), Some(&l));
        assert_eq!(dim.as_derived(), None);
    }

    #[test]
    fn null_comparison() {
        let l = Dimension::from(BaseDimension::new("Length").unwrap());
        assert_eq!(l.checked_compare_components(None), Err(DimensionError::NullComparison));
        assert_eq!(l.checked_compare_components(Some(&l)), Ok(Ordering::Equal));
    }

    #[test]
    fn base_and_derived_with_same_shape() {
        let l = BaseDimension::new("Length").unwrap();
        let base = Dimension::from(l.clone());
        let derived = Dimension::from(DerivedDimension::from_base("Length", None, &l).unwrap());

        assert!(base.same_shape(&derived));
        assert_ne!(base, derived);
        assert_eq!(base.shape_cmp(&derived), Ordering::Less);
        assert_eq!(derived.shape_cmp(&base), Ordering::Greater);
        assert_eq!(base.cmp(&derived), Ordering::Less);
    }

    #[test]
    fn shape_order_groups_by_components() {
        let l = BaseDimension::new("Length").unwrap();
        let t = BaseDimension::new("Time").unwrap();
        let velocity = Dimension::from(DerivedDimension::new("Velocity", [l.component(), t.recip()]).unwrap());
        let speed = Dimension::from(DerivedDimension::new("Speed", [l.component(), t.recip()]).unwrap());
        let area = Dimension::from(DerivedDimension::new("Area", [l.squared()]).unwrap());

        let mut by_shape = vec![velocity.clone(), area.clone(), speed.clone()];
        by_shape.sort_by(Dimension::shape_cmp);
        assert_eq!(by_shape, vec![area.clone(), speed.clone(), velocity.clone()]);

        let mut by_name = vec![velocity.clone(), area.clone(), speed.clone()];
        by_name.sort();
        assert_eq!(by_name, vec![area, speed, velocity]);
    }

    #[test]
    fn orders_consistent_with_equality() {
        let l = BaseDimension::new("Length").unwrap();
        let other_l = BaseDimension::new("Length").unwrap();
        let a = Dimension::from(l.clone());
        let b = Dimension::from(other_l);

        assert_ne!(a, b);
        assert_ne!(a.shape_cmp(&b), Ordering::Equal);
        assert_ne!(a.canonical_cmp(&b), Ordering::Equal);
        assert_eq!(a.shape_cmp(&a.clone()), Ordering::Equal);
        assert_eq!(a.canonical_cmp(&a.clone()), Ordering::Equal);
    }

    #[test]
    fn display() {
        let l = BaseDimension::new("Length").unwrap();
        let t = BaseDimension::new("Time").unwrap();
        let velocity = DerivedDimension::new("Velocity", [l.component(), t.recip()]).unwrap();
        assert_eq!(Dimension::from(l).to_string(), "Length");
        assert_eq!(Dimension::from(velocity).to_string(), "Velocity: Length Time^-1");
    }
}
