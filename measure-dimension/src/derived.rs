use std::{
    cmp::Ordering,
    fmt::{self, Display, Formatter},
    hash::{Hash, Hasher},
    sync::Arc,
};
use super::{
    base::BaseDimension,
    combine::{combine_components, ComponentMap},
    component::DimensionComponent,
    error::DimensionError,
    iter::{compare_components, ComponentIterable, Components},
};

/// A dimension built as a product of base dimensions raised to powers, such as `Velocity`
/// (`Length Time^-1`) or `Acceleration` (`Length Time^-2`).
///
/// A derived dimension is built from any number of [`ComponentIterable`]s: single components,
/// base or derived dimensions, or units. The inputs are multiplied together and normalized once,
/// at construction:
///
/// - components along the same base dimension are merged by adding their exponents;
/// - components whose exponents sum to exactly zero are dropped;
/// - the remaining components are sorted in their natural order.
///
/// If nothing is left after normalization, construction fails with
/// [`DimensionError::EmptyResult`].
///
/// ```
/// use measure_dimension::{BaseDimension, ComponentIterable, DerivedDimension};
///
/// let length = BaseDimension::new("Length").unwrap();
/// let time = BaseDimension::new("Time").unwrap();
/// let area = DerivedDimension::new("Area", [length.component(), time.recip(), length.component(), time.component()]).unwrap();
///
/// assert_eq!(area.component_count(), 1);
/// assert_eq!(area.components().next(), Some(length.squared()));
/// ```
#[derive(Clone, Debug)]
pub struct DerivedDimension {
    /// The name of the dimension. Never empty.
    name: String,

    /// A brief description of the dimension, if there is one.
    description: Option<String>,

    /// The normalized components. Never empty, sorted in natural order, with at most one
    /// component per base dimension and no zero exponents.
    components: Arc<[DimensionComponent]>,
}

impl DerivedDimension {
    /// Creates a derived dimension with no description from the product of the given inputs.
    ///
    /// Returns [`DimensionError::InvalidArgument`] if the name is empty, or
    /// [`DimensionError::EmptyResult`] if the inputs have no net components.
    pub fn new<I>(name: impl Into<String>, inputs: I) -> Result<Self, DimensionError>
    where
        I: IntoIterator,
        I::Item: ComponentIterable,
    {
        Self::build(name, None, inputs)
    }

    /// Creates a derived dimension with a description from the product of the given inputs.
    ///
    /// Returns [`DimensionError::InvalidArgument`] if the name is empty, or
    /// [`DimensionError::EmptyResult`] if the inputs have no net components.
    pub fn with_description<I>(
        name: impl Into<String>,
        description: impl Into<String>,
        inputs: I,
    ) -> Result<Self, DimensionError>
    where
        I: IntoIterator,
        I::Item: ComponentIterable,
    {
        Self::build(name, Some(description.into()), inputs)
    }

    /// Creates a derived dimension with every property specified.
    ///
    /// Returns [`DimensionError::InvalidArgument`] if the name is empty or an exponent overflows
    /// to infinity or NaN, or [`DimensionError::EmptyResult`] if the inputs have no net
    /// components.
    pub fn build<I>(
        name: impl Into<String>,
        description: Option<String>,
        inputs: I,
    ) -> Result<Self, DimensionError>
    where
        I: IntoIterator,
        I::Item: ComponentIterable,
    {
        let name = name.into();
        if name.is_empty() {
            return Err(DimensionError::missing_name());
        }

        let mut map = ComponentMap::new();
        for input in inputs {
            combine_components(&mut map, &input, 1.0);
        }
        map.check_finite()?;
        if map.is_empty() {
            return Err(DimensionError::EmptyResult { name });
        }

        Ok(Self {
            name,
            description,
            components: map.into_components().into(),
        })
    }

    /// Creates a derived dimension that is linear in a single base dimension. This gives an
    /// existing base dimension a new name, for example `Distance` for `Length`.
    pub fn from_base(
        name: impl Into<String>,
        description: Option<String>,
        base: &BaseDimension,
    ) -> Result<Self, DimensionError> {
        Self::build(name, description, [base])
    }

    /// Returns the name of this dimension.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Returns the description of this dimension, if one was provided.
    pub fn description(&self) -> Option<&str> {
        self.description.as_deref()
    }

    /// Returns the normalized components of this dimension, in natural order.
    pub fn as_slice(&self) -> &[DimensionComponent] {
        &self.components
    }
}

impl ComponentIterable for DerivedDimension {
    fn components(&self) -> Components<'_> {
        Components::from_sorted(&self.components)
    }

    fn component_count(&self) -> usize {
        self.components.len()
    }
}

impl PartialEq for DerivedDimension {
    fn eq(&self, other: &Self) -> bool {
        self.name == other.name
            && self.description == other.description
            && compare_components(self, other) == Ordering::Equal
    }
}

impl Eq for DerivedDimension {}

impl Hash for DerivedDimension {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.name.hash(state);
        self.description.hash(state);
        self.components.hash(state);
    }
}

impl Display for DerivedDimension {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name)?;
        if let Some(description) = &self.description {
            write!(f, " ({})", description)?;
        }
        write!(f, ":")?;
        for component in self.components.iter() {
            write!(f, " {}", component)?;
        }
        Ok(())
    }
}

#[cfg(feature = "serde")]
mod serde_impl {
    use serde::{de::Error as _, Deserialize, Deserializer, Serialize, Serializer};
    use super::{DerivedDimension, DimensionComponent};

    #[derive(Serialize, Deserialize)]
    struct Repr {
        name: String,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        description: Option<String>,
        components: Vec<DimensionComponent>,
    }

    impl Serialize for DerivedDimension {
        fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
            Repr {
                name: self.name.clone(),
                description: self.description.clone(),
                components: self.components.to_vec(),
            }.serialize(serializer)
        }
    }

    impl<'de> Deserialize<'de> for DerivedDimension {
        /// Deserializes and re-normalizes a derived dimension.
        fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
            let repr = Repr::deserialize(deserializer)?;
            DerivedDimension::build(repr.name, repr.description, repr.components)
                .map_err(D::Error::custom)
        }
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use super::*;

    #[test]
    fn normalizes_inputs() {
        let l = BaseDimension::new("Length").unwrap();
        let t = BaseDimension::new("Time").unwrap();
        let dim = DerivedDimension::new("Odd", [l.component(), t.recip(), l.component()]).unwrap();

        assert_eq!(dim.component_count(), 2);
        assert_eq!(dim.as_slice(), &[l.squared(), t.recip()]);
        assert_eq!(dim.components().collect::<Vec<_>>(), vec![l.squared(), t.recip()]);
    }

    #[test]
    fn empty_inputs() {
        let err = DerivedDimension::new("X", Vec::<DimensionComponent>::new()).unwrap_err();
        assert_eq!(err, DimensionError::EmptyResult { name: "X".to_owned() });
    }

    #[test]
    fn canceling_inputs() {
        let l = BaseDimension::new("Length").unwrap();
        let err = DerivedDimension::new("Nothing", [l.component(), l.recip()]).unwrap_err();
        assert_eq!(err, DimensionError::EmptyResult { name: "Nothing".to_owned() });
    }

    #[test]
    fn overflowing_exponent() {
        let l = BaseDimension::new("Length").unwrap();
        let huge = l.pow(f32::MAX);
        let err = DerivedDimension::new("Huge", [&huge, &huge]).unwrap_err();
        assert_eq!(err, DimensionError::non_finite_exponent());
    }

    #[test]
    fn nan_exponent() {
        let l = BaseDimension::new("Length").unwrap();
        let nan = DimensionComponent::unchecked(l.clone(), f32::NAN);
        let err = DerivedDimension::new("Weird", [nan, l.component()]).unwrap_err();
        assert_eq!(err, DimensionError::non_finite_exponent());
    }

    #[test]
    fn empty_name() {
        let l = BaseDimension::new("Length").unwrap();
        assert_eq!(
            DerivedDimension::new("", [l]).unwrap_err(),
            DimensionError::missing_name(),
        );
    }

    #[test]
    fn heterogeneous_inputs() {
        let l = BaseDimension::new("Length").unwrap();
        let t = BaseDimension::new("Time").unwrap();
        let velocity = DerivedDimension::new("Velocity", [l.component(), t.recip()]).unwrap();
        let inverse_time = t.recip();

        let inputs: [&dyn ComponentIterable; 2] = [&velocity, &inverse_time];
        let acceleration = DerivedDimension::new("Acceleration", inputs).unwrap();
        assert_eq!(acceleration.as_slice(), &[l.component(), t.pow(-2.0)]);
    }

    #[test]
    fn from_base() {
        let l = BaseDimension::new("Length").unwrap();
        let distance = DerivedDimension::from_base("Distance", Some("how far".to_owned()), &l).unwrap();
        assert_eq!(distance.description(), Some("how far"));
        assert_eq!(compare_components(&distance, &l), Ordering::Equal);
    }

    #[test]
    fn equality() {
        let l = BaseDimension::new("Length").unwrap();
        let t = BaseDimension::new("Time").unwrap();
        let a = DerivedDimension::new("Velocity", [l.component(), t.recip()]).unwrap();
        let b = DerivedDimension::new("Velocity", [t.recip(), l.component()]).unwrap();
        let described = DerivedDimension::with_description("Velocity", "speed", [l.component(), t.recip()]).unwrap();
        let renamed = DerivedDimension::new("Speed", [l.component(), t.recip()]).unwrap();
        let different = DerivedDimension::new("Velocity", [l.component(), t.pow(-2.0)]).unwrap();

        assert_eq!(a, b);
        assert_ne!(a, described);
        assert_ne!(a, renamed);
        assert_ne!(a, different);
    }

    #[test]
    fn display() {
        let l = BaseDimension::new("Length").unwrap();
        let t = BaseDimension::new("Time").unwrap();
        let dim = DerivedDimension::with_description("Acceleration", "rate of change of velocity", [l.component(), t.pow(-2.0)]).unwrap();
        assert_eq!(dim.to_string(), "Acceleration (rate of change of velocity): Length Time^-2");
    }
}
