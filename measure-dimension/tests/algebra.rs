use measure_dimension::{
    combine_components,
    compare_components,
    BaseDimension,
    ComponentIterable,
    ComponentMap,
    DerivedDimension,
    Dimension,
    DimensionComponent,
    DimensionError,
};
use pretty_assertions::assert_eq;
use std::cmp::Ordering;

fn length_and_time() -> (BaseDimension, BaseDimension) {
    (
        BaseDimension::with_description("Length", "distance between two points").unwrap(),
        BaseDimension::with_description("Time", "duration").unwrap(),
    )
}

#[test]
fn velocity_and_acceleration() {
    let (l, t) = length_and_time();
    let velocity = DerivedDimension::new("Velocity", [l.component(), t.recip()]).unwrap();

    let inverse_time = t.recip();
    let inputs: Vec<&dyn ComponentIterable> = vec![&velocity, &inverse_time];
    let acceleration = DerivedDimension::new("Acceleration", inputs).unwrap();

    let components = acceleration.components().collect::<Vec<_>>();
    assert_eq!(components, vec![
        DimensionComponent::new(l.clone(), 1.0),
        DimensionComponent::new(t.clone(), -2.0),
    ]);
    assert_eq!(acceleration.component_count(), 2);

    // velocity / time and length / time^2 are the same shape, but not the same dimension
    let direct = DerivedDimension::new("Acceleration2", [l.component(), t.pow(-2.0)]).unwrap();
    assert_eq!(compare_components(&acceleration, &direct), Ordering::Equal);
    assert_ne!(Dimension::from(acceleration.clone()), Dimension::from(direct));
}

#[test]
fn velocity_times_time_is_length() {
    let (l, t) = length_and_time();
    let velocity = DerivedDimension::new("Velocity", [
        DimensionComponent::new(l.clone(), 1.0),
        DimensionComponent::new(t.clone(), -1.0),
    ]).unwrap();
    let acceleration = DerivedDimension::new("Acceleration", [
        DimensionComponent::new(l.clone(), 1.0),
        DimensionComponent::new(t.clone(), -2.0),
    ]).unwrap();

    let velocity = Dimension::from(velocity);
    let acceleration = Dimension::from(acceleration);
    assert_ne!(velocity.compare_components(&acceleration), Ordering::Equal);
    assert_eq!(
        velocity.compare_components(&acceleration),
        acceleration.compare_components(&velocity).reverse(),
    );
    assert_ne!(velocity.checked_compare_components(Some(&acceleration)), Ok(Ordering::Equal));

    // Time^-1 * Time^1 cancels, leaving exactly Length^1
    let mut map = ComponentMap::new();
    combine_components(&mut map, &velocity, 1.0);
    combine_components(&mut map, &t, 1.0);
    assert_eq!(map.len(), 1);
    assert_eq!(map.get(&t), None);
    let length = map.into_components();
    assert_eq!(length, l.components().collect::<Vec<_>>());
    let distance = DerivedDimension::new("Distance", length).unwrap();
    assert_eq!(compare_components(&distance, &l), Ordering::Equal);
}

#[test]
fn mixed_inputs_with_cancellation() {
    let (l, t) = length_and_time();
    let m = BaseDimension::new("Mass").unwrap();
    let velocity = DerivedDimension::new("Velocity", [l.component(), t.recip()]).unwrap();

    // Mass * Velocity * Time / Length = Mass
    let mut map = ComponentMap::new();
    map.multiply(&m).multiply(&velocity).multiply(&t).divide(&l);
    assert_eq!(map.into_components(), vec![m.component()]);
}

#[test]
fn fractional_exponents() {
    let (l, t) = length_and_time();
    let inputs = [l.pow(0.5), t.pow(-0.25), l.pow(0.5), t.pow(0.25)];
    let dim = DerivedDimension::new("Root", inputs).unwrap();
    assert_eq!(dim.as_slice(), &[l.component()]);
}

#[test]
fn everything_cancels() {
    let (l, t) = length_and_time();
    let velocity = DerivedDimension::new("Velocity", [l.component(), t.recip()]).unwrap();
    let inverse = DerivedDimension::new("Pace", [t.component(), l.recip()]).unwrap();

    let err = DerivedDimension::new("Nothing", [&velocity, &inverse]).unwrap_err();
    assert_eq!(err, DimensionError::EmptyResult { name: "Nothing".to_owned() });
    assert!(err.to_string().contains("Nothing"));
}

#[test]
fn combine_with_power() {
    let (l, t) = length_and_time();
    let velocity = DerivedDimension::new("Velocity", [l.component(), t.recip()]).unwrap();

    let mut map = ComponentMap::new();
    combine_components(&mut map, &velocity, 2.0);
    assert_eq!(map.get(&l), Some(&l.squared()));
    assert_eq!(map.get(&t), Some(&t.pow(-2.0)));

    combine_components(&mut map, &velocity, -2.0);
    assert!(map.is_empty());
}

#[test]
fn compare_components_is_antisymmetric() {
    let (l, t) = length_and_time();
    let m = BaseDimension::new("Mass").unwrap();
    let dims: Vec<Dimension> = vec![
        l.clone().into(),
        t.clone().into(),
        DerivedDimension::new("Velocity", [l.component(), t.recip()]).unwrap().into(),
        DerivedDimension::new("Speed", [l.component(), t.recip()]).unwrap().into(),
        DerivedDimension::new("Area", [l.squared()]).unwrap().into(),
        DerivedDimension::new("Momentum", [&m as &dyn ComponentIterable, &l, &t.recip()]).unwrap().into(),
    ];

    for a in &dims {
        assert_eq!(a.compare_components(a), Ordering::Equal);
        for b in &dims {
            assert_eq!(a.compare_components(b), b.compare_components(a).reverse(), "{} vs {}", a, b);
            assert_eq!(a.shape_cmp(b), b.shape_cmp(a).reverse());
            assert_eq!(a.canonical_cmp(b), b.canonical_cmp(a).reverse());
            assert_eq!(a == b, a.shape_cmp(b) == Ordering::Equal);
            assert_eq!(a == b, a.cmp(b) == Ordering::Equal);
        }
    }
}

#[test]
fn shared_across_threads() {
    let (l, t) = length_and_time();
    let velocity = Dimension::from(DerivedDimension::new("Velocity", [l.component(), t.recip()]).unwrap());

    let handle = {
        let velocity = velocity.clone();
        std::thread::spawn(move || velocity.components().collect::<Vec<_>>())
    };
    let components = handle.join().unwrap();
    assert_eq!(components, vec![l.component(), t.recip()]);
}

#[test]
fn null_dimensions_are_ordinary_components() {
    let angle = BaseDimension::build("Angle", Some("plane angle".to_owned()), true).unwrap();
    let t = BaseDimension::new("Time").unwrap();
    let angular_velocity = DerivedDimension::new("Angular velocity", [angle.component(), t.recip()]).unwrap();

    assert!(angle.is_null());
    assert_eq!(angular_velocity.component_count(), 2);
    assert!(angular_velocity.components().any(|c| c.dimension().is_null()));
}

#[cfg(feature = "serde")]
#[test]
fn serde_round_trip() {
    let (l, t) = length_and_time();
    let velocity = DerivedDimension::with_description("Velocity", "speed in a direction", [l.component(), t.recip()]).unwrap();

    let json = serde_json::to_string(&Dimension::from(velocity)).unwrap();
    let back: Dimension = serde_json::from_str(&json).unwrap();

    // base dimensions come back as new dimensions, so only names and exponents survive
    assert_eq!(back.name(), "Velocity");
    assert_eq!(back.description(), Some("speed in a direction"));
    let exponents = back.components()
        .map(|c| (c.dimension().name().to_owned(), c.exponent()))
        .collect::<Vec<_>>();
    assert_eq!(exponents, vec![("Length".to_owned(), 1.0), ("Time".to_owned(), -1.0)]);
}

#[cfg(feature = "serde")]
#[test]
fn serde_rejects_empty_derived() {
    let json = r#"{"Derived":{"name":"Nothing","components":[]}}"#;
    assert!(serde_json::from_str::<Dimension>(json).is_err());
}
