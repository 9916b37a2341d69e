use assert_float_eq::{
    afe_abs,
    afe_relative_error_msg,
    afe_is_relative_eq,
    assert_float_relative_eq,
};
use measure_dimension::ComponentIterable;
use measure_system::{si, InheritanceRule, MeasurementSystem};
use measure_units::Units;
use pretty_assertions::assert_eq;
use std::sync::Arc;

fn units(system: &MeasurementSystem, name: &str) -> Units {
    system.units(name)
        .unwrap_or_else(|| panic!("`{}` should be defined", name))
        .into_owned()
}

/// Converts `value` between the named units of the SI system.
fn convert(value: f64, from: &str, to: &str) -> f64 {
    let si = si().unwrap();
    units(&si, from).convert_value(value, &units(&si, to)).unwrap()
}

#[test]
fn loads_without_errors() {
    let si = si().unwrap();
    assert_eq!(si.name(), Some("SI"));
    assert!(si.parent().is_none());
    assert_eq!(si.prefixes().len(), 20);
    assert!(Arc::ptr_eq(&si, &measure_system::si().unwrap()));
}

#[test]
fn base_dimensions() {
    let si = si().unwrap();
    for name in ["Length", "Mass", "Time", "Current", "Temperature", "Amount", "Luminous intensity"] {
        let dimension = si.dimension(name).unwrap();
        assert!(dimension.is_base(), "{} should be a base dimension", name);
        assert!(!dimension.as_base().unwrap().is_null());
    }
    assert!(si.dimension("Angle").unwrap().as_base().unwrap().is_null());
    assert!(si.dimension("Solid angle").unwrap().as_base().unwrap().is_null());
}

#[test]
fn derived_units_take_registered_dimensions() {
    let si = si().unwrap();
    for (units_name, dimension) in [
        ("N", "Force"),
        ("J", "Energy"),
        ("W", "Power"),
        ("Pa", "Pressure"),
        ("Hz", "Frequency"),
        ("L", "Volume"),
        ("kph", "Velocity"),
        ("rpm", "Angular velocity"),
        ("Ω", "Resistance"),
        ("g", "Mass"),
    ] {
        assert_eq!(units(&si, units_name).dimension().name(), dimension);
    }
}

#[test]
fn shape_lookup() {
    let si = si().unwrap();
    let joule = units(&si, "joule");
    let found = si.dimensions_like(&joule)
        .into_iter()
        .map(|dim| dim.name())
        .collect::<Vec<_>>();
    assert_eq!(found, vec!["Energy"]);

    let acceleration = si.dimension("Acceleration").unwrap();
    assert_eq!(acceleration.component_count(), 2);
    assert!(si.dimensions_like(&units(&si, "mol")).iter().all(|dim| dim.name() == "Amount"));
}

#[test]
fn prefixed_units() {
    let si = si().unwrap();
    assert_float_relative_eq!(units(&si, "km").factor(), 1e3);
    assert_float_relative_eq!(units(&si, "µs").factor(), 1e-6);
    assert_float_relative_eq!(units(&si, "milligram").factor(), 1e-6);
    assert_eq!(units(&si, "kPa").name(), "kilopascal");
    assert_eq!(units(&si, "min").name(), "minute");
    assert_eq!(units(&si, "cd").name(), "candela");
    assert!(si.units("kilo°C").is_none());
    assert!(si.units("furlong").is_none());
}

#[test]
fn side_by_side_units_multiply() {
    let si = si().unwrap();
    let force = si.parse_units("kg m / s^2").unwrap();
    assert_eq!(force.dimension().name(), "Force");
    assert_float_relative_eq!(force.factor(), 1.0);

    // the exponent applies to the last word only
    let squared = si.parse_units("kg m^2").unwrap();
    assert!(squared.is_compatible(&si.parse_units("kg * m^2").unwrap()));
    assert!(!squared.is_compatible(&si.parse_units("(kg * m)^2").unwrap()));
    assert_float_relative_eq!(si.parse_units("km h^-1").unwrap().factor(), 1000.0 / 3600.0);

    // names defined with spaces are not split
    assert_eq!(si.parse_units("newton degree").unwrap().name(), "newton degree");

    let err = si.parse_units("kg furlong").unwrap_err();
    assert_eq!(err.spans, vec![0..10]);
}

#[test]
fn linear_conversions() {
    assert_float_relative_eq!(convert(1.0, "mile", "km"), 1.609344);
    assert_float_relative_eq!(convert(1.0, "gal", "L"), 3.785411784);
    assert_float_relative_eq!(convert(1.0, "kWh", "J"), 3.6e6);
    assert_float_relative_eq!(convert(100.0, "kph", "mph"), 62.13711922373339);
    assert_float_relative_eq!(convert(180.0, "deg", "rad"), std::f64::consts::PI);
    assert_float_relative_eq!(convert(1.0, "atm", "bar"), 1.01325);
    assert_float_relative_eq!(convert(1.0, "week", "h"), 168.0);
}

#[test]
fn temperature_conversions() {
    assert_float_relative_eq!(convert(0.0, "°C", "°F"), 32.0);
    assert_float_relative_eq!(convert(100.0, "celsius", "rømer"), 60.0);
    assert_float_relative_eq!(convert(373.15, "K", "°N"), 33.0);
    assert_float_relative_eq!(convert(0.0, "°C", "°De"), 150.0);
    assert_float_relative_eq!(convert(80.0, "°Ré", "centigrade"), 100.0);
    assert_float_relative_eq!(convert(671.67, "°R", "°C"), 100.0);
}

#[test]
fn incompatible_units() {
    let si = si().unwrap();
    assert!(units(&si, "m").convert_value(1.0, &units(&si, "s")).is_err());
    assert!(!units(&si, "Hz").is_compatible(&units(&si, "rpm")));
}

#[test]
fn extend_with_merge() {
    let si = si().unwrap();
    let child = MeasurementSystem::child_of(si, InheritanceRule::Merge)
        .with_name("imperial extras")
        .load_into("
            [Dimensions/Derived]
            Speed, , Length / Time

            [Units/Derived]
            furlong, fur, 220, yard
            furlong per fortnight, , 1, furlong / (14 * day)
        ")
        .unwrap();

    assert_float_relative_eq!(units(&child, "fur").factor(), 201.168);
    assert_eq!(units(&child, "meter").name(), "meter");
    assert_eq!(units(&child, "furlong per fortnight").dimension().name(), "Speed");

    let speed = child.dimension("Speed").unwrap();
    let found = child.dimensions_like(speed)
        .into_iter()
        .map(|dim| dim.name())
        .collect::<Vec<_>>();
    assert_eq!(found, vec!["Speed", "Velocity"]);
}

#[test]
fn extend_with_override() {
    let si = si().unwrap();
    let child = MeasurementSystem::child_of(si, InheritanceRule::Override)
        .load_into("[Dimensions/Derived]\nSpeed, , Length / Time\n")
        .unwrap();

    let speed = child.dimension("Speed").unwrap();
    let found = child.dimensions_like(speed)
        .into_iter()
        .map(|dim| dim.name())
        .collect::<Vec<_>>();
    assert_eq!(found, vec!["Speed"]);

    let force = child.dimensions_like(&units(&child, "N"))
        .into_iter()
        .map(|dim| dim.name())
        .collect::<Vec<_>>();
    assert_eq!(force, vec!["Force"]);
}
