//! Conversions between [`Units`] along dimensions of the same shape.

use std::ops::{Add, Mul};
use super::units::{ConversionError, Units};

impl Units {
    /// Returns `true` if quantities in these units can be converted to `target`, i.e. if both
    /// dimensions have the same components.
    pub fn is_compatible(&self, target: &Units) -> bool {
        self.dimension().same_shape(target.dimension())
    }

    /// Returns the value to multiply a quantity in these units by to get a quantity in `target`.
    ///
    /// Offsets are ignored, so for offset units this converts differences rather than absolute
    /// values (a change of 1 °C is a change of 1.8 °F). Use [`Units::convert_value`] or
    /// [`Quantity::convert`](crate::Quantity::convert) to convert absolute values.
    pub fn conversion_factor(&self, target: &Units) -> Result<f64, ConversionError> {
        self.check_compatible(target)?;
        Ok(self.factor() / target.factor())
    }

    /// Converts an absolute value in these units to `target`, applying any offsets along the way.
    pub fn convert_value<T>(&self, value: T, target: &Units) -> Result<T, ConversionError>
        where T: Copy + Mul<f64, Output = T> + Add<f64, Output = T>,
    {
        self.check_compatible(target)?;
        Ok(target.from_coherent(self.to_coherent(value)))
    }

    /// Converts a value in these units to the coherent unit of the dimension.
    pub fn to_coherent<T>(&self, value: T) -> T
        where T: Copy + Mul<f64, Output = T> + Add<f64, Output = T>,
    {
        match self.offset_from_parent() {
            Some(offset) => offset.parent().to_coherent((value + offset.offset()) * offset.scale()),
            None => value * self.factor(),
        }
    }

    /// Converts a value in the coherent unit of the dimension to these units.
    pub fn from_coherent<T>(&self, value: T) -> T
        where T: Copy + Mul<f64, Output = T> + Add<f64, Output = T>,
    {
        match self.offset_from_parent() {
            Some(offset) => offset.parent().from_coherent(value) * offset.scale().recip() + -offset.offset(),
            None => value * self.factor().recip(),
        }
    }

    fn check_compatible(&self, target: &Units) -> Result<(), ConversionError> {
        if self.is_compatible(target) {
            Ok(())
        } else {
            Err(ConversionError {
                units: self.name().to_owned(),
                target: target.name().to_owned(),
            })
        }
    }
}

#[cfg(test)]
mod tests {
    use assert_float_eq::{
        afe_abs,
        afe_relative_error_msg,
        afe_is_relative_eq,
        assert_float_relative_eq,
    };
    use measure_dimension::BaseDimension;
    use super::*;

    struct Temperatures {
        kelvin: Units,
        rankine: Units,
        celsius: Units,
        fahrenheit: Units,
        delisle: Units,
        romer: Units,
    }

    fn temperatures() -> Temperatures {
        let kelvin = Units::new("kelvin", BaseDimension::new("Temperature").unwrap()).unwrap();
        let rankine = Units::scaled("rankine", 5.0 / 9.0, &kelvin).unwrap();
        let celsius = Units::offset("celsius", &kelvin, 1.0, 273.15).unwrap();
        let fahrenheit = Units::offset("fahrenheit", &rankine, 1.0, 459.67).unwrap();
        let delisle = Units::offset("delisle", &kelvin, -2.0 / 3.0, -559.725).unwrap();
        let romer = Units::offset("rømer", &celsius, 40.0 / 21.0, -7.5).unwrap();
        Temperatures { kelvin, rankine, celsius, fahrenheit, delisle, romer }
    }

    #[test]
    fn linear_factor() {
        let length = BaseDimension::new("Length").unwrap();
        let m = Units::new("meter", length).unwrap();
        let mile = Units::scaled("mile", 1609.344, &m).unwrap();
        let dm = Units::scaled("decimeter", 0.1, &m).unwrap();
        assert_float_relative_eq!(mile.conversion_factor(&dm).unwrap() * 2.0, 32186.88);
    }

    #[test]
    fn incompatible() {
        let m = Units::new("meter", BaseDimension::new("Length").unwrap()).unwrap();
        let s = Units::new("second", BaseDimension::new("Time").unwrap()).unwrap();
        let err = m.conversion_factor(&s).unwrap_err();
        assert_eq!(err.to_string(), "cannot convert from `meter` to `second`: the dimensions are not compatible");
        assert!(m.convert_value(1.0, &s).is_err());
    }

    #[test]
    fn boiling_point() {
        let t = temperatures();
        assert_float_relative_eq!(t.celsius.convert_value(100.0, &t.fahrenheit).unwrap(), 212.0);
        assert_float_relative_eq!(t.celsius.convert_value(100.0, &t.kelvin).unwrap(), 373.15);
        assert_float_relative_eq!(t.celsius.convert_value(100.0, &t.rankine).unwrap(), 671.67);
        assert_float_relative_eq!(t.fahrenheit.convert_value(212.0, &t.celsius).unwrap(), 100.0);
    }

    #[test]
    fn freezing_point() {
        let t = temperatures();
        assert_float_relative_eq!(t.celsius.convert_value(0.0, &t.fahrenheit).unwrap(), 32.0);
        assert_float_relative_eq!(t.kelvin.convert_value(273.15, &t.delisle).unwrap(), 150.0);
        assert_float_relative_eq!(t.celsius.convert_value(0.0, &t.romer).unwrap(), 7.5);
    }

    #[test]
    fn interval_factor() {
        let t = temperatures();
        assert_float_relative_eq!(t.celsius.conversion_factor(&t.fahrenheit).unwrap(), 1.8);
    }
}
