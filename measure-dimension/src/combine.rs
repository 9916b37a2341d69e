//! Accumulation of components from many sources, the basis of multiplying and dividing anything
//! that lies along a dimension.

use std::collections::{hash_map::{Entry, Values}, HashMap};
use super::{
    base::BaseDimension,
    component::DimensionComponent,
    error::DimensionError,
    iter::ComponentIterable,
};

/// Components accumulated so far, keyed by their base dimension.
///
/// There is at most one component per base dimension, and no component has an exponent of zero.
/// Use [`combine_components`], [`ComponentMap::multiply`], or [`ComponentMap::divide`] to add to
/// the map, then [`ComponentMap::into_components`] to get the components in their natural order.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ComponentMap {
    components: HashMap<BaseDimension, DimensionComponent>,
}

impl ComponentMap {
    /// Creates an empty map.
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the number of base dimensions in the map.
    pub fn len(&self) -> usize {
        self.components.len()
    }

    /// Returns `true` if every component has canceled out, or none were ever added.
    pub fn is_empty(&self) -> bool {
        self.components.is_empty()
    }

    /// Returns the accumulated component along the given base dimension.
    pub fn get(&self, dimension: &BaseDimension) -> Option<&DimensionComponent> {
        self.components.get(dimension)
    }

    /// Returns an iterator over the accumulated components, in arbitrary order.
    pub fn iter(&self) -> Values<'_, BaseDimension, DimensionComponent> {
        self.components.values()
    }

    /// Multiplies the accumulated components by the given components.
    pub fn multiply<C: ComponentIterable + ?Sized>(&mut self, components: &C) -> &mut Self {
        combine_components(self, components, 1.0);
        self
    }

    /// Divides the accumulated components by the given components.
    pub fn divide<C: ComponentIterable + ?Sized>(&mut self, components: &C) -> &mut Self {
        combine_components(self, components, -1.0);
        self
    }

    /// Returns [`DimensionError::InvalidArgument`] if any accumulated exponent is infinite or NaN.
    pub fn check_finite(&self) -> Result<(), DimensionError> {
        if self.components.values().all(DimensionComponent::is_finite) {
            Ok(())
        } else {
            Err(DimensionError::non_finite_exponent())
        }
    }

    /// Consumes the map, returning its components sorted in their natural order.
    pub fn into_components(self) -> Vec<DimensionComponent> {
        let mut components = self.components.into_values().collect::<Vec<_>>();
        components.sort();
        components
    }
}

impl<C: ComponentIterable> FromIterator<C> for ComponentMap {
    /// Multiplies together all of the given items.
    fn from_iter<I: IntoIterator<Item = C>>(iter: I) -> Self {
        let mut map = Self::new();
        for item in iter {
            map.multiply(&item);
        }
        map
    }
}

/// Adds the components of `components` to `map`, with every exponent first multiplied by
/// `exponent_factor`.
///
/// A factor of `1.0` multiplies the map by the components, and `-1.0` divides it; any other
/// factor multiplies by the components raised to that power. For each incoming component:
///
/// - if its base dimension is not in the map yet, it is inserted with the scaled exponent, unless
///   the scaled exponent is exactly zero;
/// - otherwise, the scaled exponent is added to the existing one. If the sum is exactly zero, the
///   entry is removed; otherwise it is replaced.
///
/// Cancellation is exact. Exponents that only come close to zero are kept.
///
/// Exponents are not checked here. A sum that overflows is stored as infinite; use
/// [`ComponentMap::check_finite`] before building anything from the map.
pub fn combine_components<C: ComponentIterable + ?Sized>(
    map: &mut ComponentMap,
    components: &C,
    exponent_factor: f32,
) {
    for component in components.components() {
        let scaled = exponent_factor * component.exponent();
        match map.components.entry(component.dimension().clone()) {
            Entry::Vacant(entry) => {
                if scaled == 0.0 {
                    continue;
                }
                if exponent_factor == 1.0 {
                    // avoid rebuilding the component in the common case
                    entry.insert(component);
                } else {
                    let dimension = entry.key().clone();
                    entry.insert(DimensionComponent::unchecked(dimension, scaled));
                }
            },
            Entry::Occupied(mut entry) => {
                let exponent = entry.get().exponent() + scaled;
                if exponent == 0.0 {
                    entry.remove();
                } else {
                    let dimension = entry.key().clone();
                    entry.insert(DimensionComponent::unchecked(dimension, exponent));
                }
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use super::*;

    struct Dims {
        l: BaseDimension,
        t: BaseDimension,
        m: BaseDimension,
    }

    fn dims() -> Dims {
        Dims {
            l: BaseDimension::new("Length").unwrap(),
            t: BaseDimension::new("Time").unwrap(),
            m: BaseDimension::new("Mass").unwrap(),
        }
    }

    #[test]
    fn merges_same_base() {
        let Dims { l, t, .. } = dims();
        let map = [l.component(), t.recip(), l.component()]
            .into_iter()
            .collect::<ComponentMap>();

        assert_eq!(map.len(), 2);
        assert_eq!(map.into_components(), vec![l.squared(), t.recip()]);
    }

    #[test]
    fn cancellation_removes_entry() {
        let Dims { l, .. } = dims();
        let mut map = ComponentMap::new();
        combine_components(&mut map, &l.component(), 1.0);
        combine_components(&mut map, &l.recip(), 1.0);
        assert!(map.is_empty());
        assert_eq!(map.get(&l), None);
    }

    #[test]
    fn zero_product_is_not_inserted() {
        let Dims { l, t, .. } = dims();
        let mut map = ComponentMap::new();
        combine_components(&mut map, &l.squared(), 0.0);
        combine_components(&mut map, &t.pow(0.0), 1.0);
        assert!(map.is_empty());
    }

    #[test]
    fn divide() {
        let Dims { l, t, .. } = dims();
        let mut map = ComponentMap::new();
        map.multiply(&l).divide(&t).divide(&t);
        assert_eq!(map.into_components(), vec![l.component(), t.pow(-2.0)]);
    }

    #[test]
    fn factor_scales_exponents() {
        let Dims { l, t, .. } = dims();
        let mut map = ComponentMap::new();
        combine_components(&mut map, &l.component(), 3.0);
        combine_components(&mut map, &t.squared(), -0.5);
        assert_eq!(map.get(&l), Some(&l.cubed()));
        assert_eq!(map.get(&t), Some(&t.recip()));
    }

    #[test]
    fn overflow_is_detected() {
        let Dims { l, t, .. } = dims();
        let mut map = ComponentMap::new();
        combine_components(&mut map, &t.recip(), 1.0);
        assert_eq!(map.check_finite(), Ok(()));

        combine_components(&mut map, &l.pow(f32::MAX), 2.0);
        assert_eq!(map.get(&l).map(DimensionComponent::exponent), Some(f32::INFINITY));
        assert_eq!(map.check_finite(), Err(DimensionError::non_finite_exponent()));
    }

    #[test]
    fn round_trip() {
        let Dims { l, t, m } = dims();
        let start = [l.component(), t.pow(-2.0), m.pow(0.5)]
            .into_iter()
            .collect::<ComponentMap>();
        let operands = [l.component(), t.squared(), m.pow(-1.5)];

        for step in -4..=4 {
            let factor = step as f32 * 0.5;
            for operand in &operands {
                let mut map = start.clone();
                combine_components(&mut map, operand, factor);
                combine_components(&mut map, operand, -factor);
                assert_eq!(map, start, "factor {} with {}", factor, operand);
            }
        }
    }

    #[test]
    fn sorted_output() {
        let Dims { l, t, m } = dims();
        let mut map = ComponentMap::new();
        map.multiply(&t.recip()).multiply(&m).multiply(&l.cubed());
        assert_eq!(map.into_components(), vec![l.cubed(), m.component(), t.recip()]);
    }
}
