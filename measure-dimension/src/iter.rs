//! The [`ComponentIterable`] capability shared by dimensions, components, and anything else that
//! lies along a dimension.

use std::{cmp::Ordering, iter::FusedIterator, slice};
use super::component::DimensionComponent;

/// Anything that can be expressed as an ordered, finite sequence of [`DimensionComponent`]s.
///
/// Implementors must uphold two requirements:
///
/// - [`ComponentIterable::components`] yields components in their natural order (descending
///   exponent, then ascending base dimension), and yields the same sequence every time it is
///   called.
/// - [`ComponentIterable::component_count`] is the number of components yielded.
///
/// The trait is object safe, so heterogeneous inputs can be combined through
/// `&dyn ComponentIterable`.
pub trait ComponentIterable {
    /// Returns an iterator over the components, in their natural order.
    fn components(&self) -> Components<'_>;

    /// Returns the number of components yielded by [`ComponentIterable::components`].
    fn component_count(&self) -> usize {
        self.components().len()
    }
}

impl<T: ComponentIterable + ?Sized> ComponentIterable for &T {
    fn components(&self) -> Components<'_> {
        (**self).components()
    }

    fn component_count(&self) -> usize {
        (**self).component_count()
    }
}

impl<T: ComponentIterable + ?Sized> ComponentIterable for Box<T> {
    fn components(&self) -> Components<'_> {
        (**self).components()
    }

    fn component_count(&self) -> usize {
        (**self).component_count()
    }
}

#[derive(Clone, Debug)]
enum Source<'a> {
    /// A single component, produced on demand.
    Single(Option<DimensionComponent>),

    /// Components that are already stored in order.
    Slice(slice::Iter<'a, DimensionComponent>),
}

/// Iterator over the components of a [`ComponentIterable`].
///
/// Components are yielded by value; cloning a component only clones a handle to its base
/// dimension.
#[derive(Clone, Debug)]
pub struct Components<'a> {
    source: Source<'a>,
}

impl<'a> Components<'a> {
    /// Creates an iterator that yields exactly one component.
    pub fn single(component: DimensionComponent) -> Self {
        Self { source: Source::Single(Some(component)) }
    }

    /// Creates an iterator over components that are already sorted in their natural order.
    pub fn from_sorted(components: &'a [DimensionComponent]) -> Self {
        Self { source: Source::Slice(components.iter()) }
    }
}

impl Iterator for Components<'_> {
    type Item = DimensionComponent;

    fn next(&mut self) -> Option<Self::Item> {
        match &mut self.source {
            Source::Single(component) => component.take(),
            Source::Slice(iter) => iter.next().cloned(),
        }
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let len = match &self.source {
            Source::Single(component) => usize::from(component.is_some()),
            Source::Slice(iter) => iter.len(),
        };
        (len, Some(len))
    }
}

impl ExactSizeIterator for Components<'_> {}

impl FusedIterator for Components<'_> {}

/// Compares the components of two [`ComponentIterable`]s in lock-step.
///
/// The first pair of components that differ decides the result. If one sequence runs out before
/// the other, the shorter sequence is less. Returns [`Ordering::Equal`] only if both sequences
/// are identical, regardless of any names or descriptions attached to them.
pub fn compare_components<A, B>(a: &A, b: &B) -> Ordering
where
    A: ComponentIterable + ?Sized,
    B: ComponentIterable + ?Sized,
{
    let mut a = a.components();
    let mut b = b.components();
    loop {
        match (a.next(), b.next()) {
            (Some(left), Some(right)) => match left.cmp(&right) {
                Ordering::Equal => continue,
                ord => return ord,
            },
            (Some(_), None) => return Ordering::Greater,
            (None, Some(_)) => return Ordering::Less,
            (None, None) => return Ordering::Equal,
        }
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use crate::BaseDimension;
    use super::*;

    #[test]
    fn exact_size() {
        let l = BaseDimension::new("Length").unwrap();
        let mut iter = Components::single(l.component());
        assert_eq!(iter.len(), 1);
        iter.next();
        assert_eq!(iter.len(), 0);
        assert_eq!(iter.next(), None);

        let sorted = [l.squared()];
        assert_eq!(Components::from_sorted(&sorted).len(), 1);
    }

    #[test]
    fn shorter_is_less() {
        let l = BaseDimension::new("Length").unwrap();
        let t = BaseDimension::new("Time").unwrap();
        let short = [l.component()];
        let long = [l.component(), t.recip()];

        struct Sorted<'a>(&'a [DimensionComponent]);
        impl ComponentIterable for Sorted<'_> {
            fn components(&self) -> Components<'_> {
                Components::from_sorted(self.0)
            }
        }

        assert_eq!(compare_components(&Sorted(&short), &Sorted(&long)), Ordering::Less);
        assert_eq!(compare_components(&Sorted(&long), &Sorted(&short)), Ordering::Greater);
        assert_eq!(compare_components(&Sorted(&long), &Sorted(&long)), Ordering::Equal);
        assert_eq!(Sorted(&long).component_count(), 2);
    }

    #[test]
    fn through_references() {
        let l = BaseDimension::new("Length").unwrap();
        let boxed: Box<dyn ComponentIterable> = Box::new(l.clone());
        assert_eq!(compare_components(&boxed, &&l), Ordering::Equal);
        assert_eq!(boxed.component_count(), 1);
    }
}
