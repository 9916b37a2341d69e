use std::{
    cmp::Ordering,
    fmt::{self, Display, Formatter},
    hash::{Hash, Hasher},
};
use super::units::{check_factor, Units, UnitsError};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// A prefix that scales units by a constant factor, such as `kilo` (`k`, `1e3`) or `kibi` (`Ki`,
/// `1024`).
///
/// Prefixes are ordered by factor, then by long form, then by abbreviation, where a missing
/// abbreviation sorts first.
#[derive(Clone, Debug)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Prefix {
    /// The full name of the prefix, such as `kilo`.
    long_form: String,

    /// The abbreviation of the prefix, such as `k`.
    abbreviation: Option<String>,

    /// The factor the prefix multiplies units by.
    factor: f64,
}

impl Prefix {
    /// Creates a prefix with no abbreviation.
    ///
    /// Returns [`UnitsError::MissingName`] if the long form is empty, or
    /// [`UnitsError::InvalidFactor`] if the factor is zero or not finite.
    pub fn new(long_form: impl Into<String>, factor: f64) -> Result<Self, UnitsError> {
        let long_form = long_form.into();
        if long_form.is_empty() {
            return Err(UnitsError::MissingName);
        }
        check_factor(&long_form, factor)?;
        Ok(Self { long_form, abbreviation: None, factor })
    }

    /// Returns this prefix with the given abbreviation. An empty abbreviation removes it.
    pub fn with_abbreviation(mut self, abbreviation: impl Into<String>) -> Self {
        let abbreviation = abbreviation.into();
        self.abbreviation = (!abbreviation.is_empty()).then_some(abbreviation);
        self
    }

    /// Returns the full name of the prefix.
    pub fn long_form(&self) -> &str {
        &self.long_form
    }

    /// Returns the abbreviation of the prefix, if there is one.
    pub fn abbreviation(&self) -> Option<&str> {
        self.abbreviation.as_deref()
    }

    /// Returns the factor of the prefix.
    pub fn factor(&self) -> f64 {
        self.factor
    }

    /// Applies this prefix to the given units, producing, for example, `kilometer` (`km`) from
    /// `meter` (`m`).
    ///
    /// The new units are abbreviated only if both the prefix and the units are.
    pub fn apply(&self, units: &Units) -> Result<Units, UnitsError> {
        let prefixed = Units::scaled(format!("{}{}", self.long_form, units.name()), self.factor, units)?;
        Ok(match (self.abbreviation(), units.abbreviation()) {
            (Some(prefix), Some(abbr)) => prefixed.with_abbreviation(format!("{}{}", prefix, abbr)),
            _ => prefixed,
        })
    }
}

impl PartialEq for Prefix {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for Prefix {}

impl Hash for Prefix {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.factor.to_bits().hash(state);
        self.long_form.hash(state);
        self.abbreviation.hash(state);
    }
}

impl PartialOrd for Prefix {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Prefix {
    fn cmp(&self, other: &Self) -> Ordering {
        self.factor
            .total_cmp(&other.factor)
            .then_with(|| self.long_form.cmp(&other.long_form))
            .then_with(|| self.abbreviation.cmp(&other.abbreviation))
    }
}

impl Display for Prefix {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.long_form)?;
        if let Some(abbreviation) = &self.abbreviation {
            write!(f, " ({})", abbreviation)?;
        }
        Ok(())
    }
}
