//! Base dimensions, the orthogonal axes every other dimension is built from.

use std::{
    cmp::Ordering,
    fmt::{self, Debug, Display, Formatter},
    hash::{Hash, Hasher},
    sync::{atomic::{AtomicU64, Ordering as AtomicOrdering}, Arc},
};
use super::{
    component::DimensionComponent,
    error::DimensionError,
    iter::{ComponentIterable, Components},
};

/// Source of the identity given to each newly constructed [`BaseDimension`].
static NEXT_ID: AtomicU64 = AtomicU64::new(0);

#[derive(Debug)]
struct Inner {
    /// Identity of the base dimension. Shared by every clone of the handle.
    id: u64,

    /// The name of the dimension. Never empty.
    name: String,

    /// A brief description of the dimension, if there is one.
    description: Option<String>,

    /// Whether this is a "null" (conceptually unitless) dimension.
    is_null: bool,
}

/// A dimension orthogonal to all other base dimensions in a measurement system, such as `Length`
/// or `Time`.
///
/// A [`BaseDimension`] is a cheap, shareable handle. Within a measurement system it behaves like
/// an enum variant: every call to a constructor creates a **new** dimension, and two base
/// dimensions are equal only if they are clones of the same handle. Defining `Length` twice
/// therefore produces two distinct dimensions, even though their names match:
///
/// ```
/// use measure_dimension::BaseDimension;
///
/// let a = BaseDimension::new("Length").unwrap();
/// let b = BaseDimension::new("Length").unwrap();
/// assert_ne!(a, b);
/// assert_eq!(a, a.clone());
/// ```
///
/// A base dimension may be marked as "null". Null dimensions are placeholders for quantities that
/// are effectively dimensionless, such as angle in SI. Whether two dimensions that differ only by
/// null components are interchangeable is left to the caller (see [`BaseDimension::is_null`]).
///
/// Base dimensions are ordered by name, then by description (a missing description sorts first),
/// then by the order in which they were created. The order is consistent with equality.
#[derive(Clone)]
pub struct BaseDimension(Arc<Inner>);

impl BaseDimension {
    /// Creates a new, non-null base dimension with no description.
    ///
    /// Returns [`DimensionError::InvalidArgument`] if the name is empty.
    pub fn new(name: impl Into<String>) -> Result<Self, DimensionError> {
        Self::build(name, None, false)
    }

    /// Creates a new, non-null base dimension with a description.
    ///
    /// Returns [`DimensionError::InvalidArgument`] if the name is empty.
    pub fn with_description(
        name: impl Into<String>,
        description: impl Into<String>,
    ) -> Result<Self, DimensionError> {
        Self::build(name, Some(description.into()), false)
    }

    /// Creates a new null base dimension with no description. See [`BaseDimension::is_null`].
    ///
    /// Returns [`DimensionError::InvalidArgument`] if the name is empty.
    pub fn null(name: impl Into<String>) -> Result<Self, DimensionError> {
        Self::build(name, None, true)
    }

    /// Creates a new base dimension with every property specified.
    ///
    /// Returns [`DimensionError::InvalidArgument`] if the name is empty.
    pub fn build(
        name: impl Into<String>,
        description: Option<String>,
        is_null: bool,
    ) -> Result<Self, DimensionError> {
        let name = name.into();
        if name.is_empty() {
            return Err(DimensionError::missing_name());
        }

        Ok(Self(Arc::new(Inner {
            id: NEXT_ID.fetch_add(1, AtomicOrdering::Relaxed),
            name,
            description,
            is_null,
        })))
    }

    /// Returns the name of this dimension.
    pub fn name(&self) -> &str {
        &self.0.name
    }

    /// Returns the description of this dimension, if one was provided.
    pub fn description(&self) -> Option<&str> {
        self.0.description.as_deref()
    }

    /// Returns `true` if this is a null dimension.
    ///
    /// A null dimension is dimensionless in practice but still carries conceptual meaning, like
    /// angle or solid angle in SI. Quantities along a null dimension can be treated as scalars
    /// once they have been converted to the base unit along that dimension; for example, `sin(x)`
    /// can take a quantity in radians, but a quantity in degrees must be converted first.
    pub fn is_null(&self) -> bool {
        self.0.is_null
    }

    /// Returns the component that is linear in this dimension, i.e. this dimension with an
    /// exponent of `1.0`.
    pub fn component(&self) -> DimensionComponent {
        DimensionComponent::linear(self.clone())
    }

    /// Creates a [`DimensionComponent`] with this dimension and the specified exponent.
    pub fn pow(&self, exponent: f32) -> DimensionComponent {
        DimensionComponent::new(self.clone(), exponent)
    }

    /// Creates a [`DimensionComponent`] with this dimension and exponent 2.
    pub fn squared(&self) -> DimensionComponent {
        self.pow(2.0)
    }

    /// Creates a [`DimensionComponent`] with this dimension and exponent 3.
    pub fn cubed(&self) -> DimensionComponent {
        self.pow(3.0)
    }

    /// Creates a [`DimensionComponent`] with this dimension and exponent -1.
    pub fn recip(&self) -> DimensionComponent {
        self.pow(-1.0)
    }
}

impl ComponentIterable for BaseDimension {
    /// Yields a single component, linear in this dimension.
    ///
    /// The component is built on each call rather than stored, since a stored component would
    /// hold a handle to this dimension and form an `Arc` cycle. Building one is an `Arc` clone.
    fn components(&self) -> Components<'_> {
        Components::single(self.component())
    }

    fn component_count(&self) -> usize {
        1
    }
}

impl PartialEq for BaseDimension {
    fn eq(&self, other: &Self) -> bool {
        self.0.id == other.0.id
    }
}

impl Eq for BaseDimension {}

impl Hash for BaseDimension {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.0.id.hash(state);
    }
}

impl PartialOrd for BaseDimension {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for BaseDimension {
    fn cmp(&self, other: &Self) -> Ordering {
        self.name()
            .cmp(other.name())
            .then_with(|| self.description().cmp(&other.description()))
            .then_with(|| self.0.id.cmp(&other.0.id))
    }
}

impl Debug for BaseDimension {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.debug_struct("BaseDimension")
            .field("id", &self.0.id)
            .field("name", &self.0.name)
            .field("description", &self.0.description)
            .field("is_null", &self.0.is_null)
            .finish()
    }
}

impl Display for BaseDimension {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name())?;
        if let Some(description) = self.description() {
            write!(f, " ({})", description)?;
        }
        Ok(())
    }
}

#[cfg(feature = "serde")]
mod serde_impl {
    use serde::{de::Error as _, Deserialize, Deserializer, Serialize, Serializer};
    use super::BaseDimension;

    /// The serialized form of a [`BaseDimension`]. Identity cannot be serialized, so every
    /// deserialized base dimension is a new, distinct dimension.
    #[derive(Serialize, Deserialize)]
    struct Repr {
        name: String,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        description: Option<String>,
        #[serde(default)]
        is_null: bool,
    }

    impl Serialize for BaseDimension {
        fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
            Repr {
                name: self.name().to_owned(),
                description: self.description().map(str::to_owned),
                is_null: self.is_null(),
            }.serialize(serializer)
        }
    }

    impl<'de> Deserialize<'de> for BaseDimension {
        fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
            let repr = Repr::deserialize(deserializer)?;
            BaseDimension::build(repr.name, repr.description, repr.is_null)
                .map_err(D::Error::custom)
        }
    }
}
