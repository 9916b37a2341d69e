//! Evaluation of parsed field expressions against the entries loaded so far.
//!
//! Spans in the returned errors are relative to the start of the field.

use measure_dimension::{combine_components, ComponentMap};
use measure_error::Error;
use measure_units::Units;
use std::borrow::Cow;
use crate::{
    parser::expr::{Atom, Expr, Name},
    system::MeasurementSystem,
};
use super::error;

/// Evaluates an expression over dimension names, such as `Mass * Length / Time^2`.
///
/// The number `1` may appear as a placeholder numerator, as in `1 / Time`.
pub fn dimension(expr: &Expr, system: &MeasurementSystem) -> Result<ComponentMap, Error> {
    let mut map = ComponentMap::new();
    add_dimension(&mut map, expr, 1.0, system)?;
    Ok(map)
}

fn add_dimension(
    map: &mut ComponentMap,
    expr: &Expr,
    power: f32,
    system: &MeasurementSystem,
) -> Result<(), Error> {
    for (sign, term) in expr.signed_terms() {
        let power = power * (sign * term.power()) as f32;
        match &term.atom {
            Atom::Name(name) => {
                let dimension = system.dimension(&name.name)
                    .ok_or_else(|| unknown_dimension(name, system))?;
                combine_components(map, dimension, power);
            },
            Atom::Number(number) if number.value == 1.0 => {},
            Atom::Number(number) => {
                return Err(Error::new(vec![number.span.clone()], error::NumberInDimension));
            },
            Atom::Paren(paren) => add_dimension(map, &paren.expr, power, system)?,
        }
    }
    Ok(())
}

/// Builds the error for a dimension that could not be found.
pub fn unknown_dimension(name: &Name, system: &MeasurementSystem) -> Error {
    Error::new(vec![name.span.clone()], error::UnknownDimension {
        name: name.name.clone(),
        suggestions: system.similar_dimension_names(&name.name)
            .into_iter()
            .map(str::to_owned)
            .collect(),
    })
}

/// The factor and components of a units expression.
#[derive(Debug)]
pub struct UnitsProduct {
    /// The product of the factors of every unit and number in the expression.
    pub factor: f64,

    /// The components of the dimensions of every unit in the expression.
    pub components: ComponentMap,
}

/// Evaluates an expression over unit names and numbers, such as `kilogram * meter / second^2`.
///
/// Prefixed units are resolved through the system's prefixes. Offset units are rejected.
///
/// A multi-word name that is not defined as a whole is read as its words multiplied together,
/// with any exponent applying to the last word only. Defined multi-word names, like
/// `newton degree`, take precedence.
pub fn units(expr: &Expr, system: &MeasurementSystem) -> Result<UnitsProduct, Error> {
    let mut product = UnitsProduct { factor: 1.0, components: ComponentMap::new() };
    add_units(&mut product, expr, 1.0, system)?;
    Ok(product)
}

fn add_units(
    product: &mut UnitsProduct,
    expr: &Expr,
    power: f64,
    system: &MeasurementSystem,
) -> Result<(), Error> {
    for (sign, term) in expr.signed_terms() {
        let outer = power * sign;
        let power = outer * term.power();
        match &term.atom {
            Atom::Name(name) => match system.units(&name.name) {
                Some(units) => multiply_units(product, name, &name.name, &units, power)?,
                None => {
                    // `kg m^2` is `kg * m^2`
                    let words = juxtaposed_units(name, system)?;
                    let last = words.len() - 1;
                    for (i, (word, units)) in words.iter().enumerate() {
                        let power = if i == last { power } else { outer };
                        multiply_units(product, name, word, units, power)?;
                    }
                },
            },
            Atom::Number(number) => product.factor *= number.value.powf(power),
            Atom::Paren(paren) => add_units(product, &paren.expr, power, system)?,
        }
    }
    Ok(())
}

/// Multiplies the product by linear units raised to `power`.
fn multiply_units(
    product: &mut UnitsProduct,
    name: &Name,
    written: &str,
    units: &Units,
    power: f64,
) -> Result<(), Error> {
    if units.is_offset() {
        return Err(Error::new(vec![name.span.clone()], error::OffsetInExpression {
            name: written.to_owned(),
        }));
    }
    product.factor *= units.factor().powf(power);
    combine_components(&mut product.components, units, power as f32);
    Ok(())
}

/// Resolves every word of an undefined multi-word name as units on its own, so that units can
/// be written side by side to multiply them.
///
/// If the name is a single word, or any word is not defined, the whole name is reported as
/// unknown.
fn juxtaposed_units<'a, 'n>(
    name: &'n Name,
    system: &'a MeasurementSystem,
) -> Result<Vec<(&'n str, Cow<'a, Units>)>, Error> {
    let words = name.words().collect::<Vec<_>>();
    if words.len() < 2 {
        return Err(unknown_units(name, system));
    }
    words.into_iter()
        .map(|word| Some((word, system.units(word)?)))
        .collect::<Option<Vec<_>>>()
        .ok_or_else(|| unknown_units(name, system))
}

/// Builds the error for units that could not be found.
pub fn unknown_units(name: &Name, system: &MeasurementSystem) -> Error {
    Error::new(vec![name.span.clone()], error::UnknownUnits {
        name: name.name.clone(),
        suggestions: system.similar_units_names(&name.name)
            .into_iter()
            .map(str::to_owned)
            .collect(),
    })
}

/// Evaluates an expression over numbers only, such as `1.66053906660 * 10^-27`.
pub fn number(expr: &Expr) -> Result<f64, Error> {
    let mut value = 1.0;
    for (sign, term) in expr.signed_terms() {
        let power = sign * term.power();
        value *= match &term.atom {
            Atom::Number(literal) => literal.value.powf(power),
            Atom::Paren(paren) => number(&paren.expr)?.powf(power),
            Atom::Name(name) => {
                return Err(Error::new(vec![name.span.clone()], error::NameInNumber {
                    name: name.name.clone(),
                }));
            },
        };
    }
    Ok(value)
}
