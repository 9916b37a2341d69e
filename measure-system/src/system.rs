use levenshtein::levenshtein;
use measure_dimension::{ComponentIterable, Dimension};
use measure_units::{Prefix, Units};
use std::{borrow::Cow, cmp::Ordering, collections::HashMap, sync::Arc};
use tracing::{debug, warn};

/// How a [`MeasurementSystem`] combines its own dimensions with those of its parent when looking
/// up dimensions by shape.
///
/// Lookups by name always fall back to the parent when nothing is found in the child.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum InheritanceRule {
    /// Dimensions of the parent are included alongside those of the child, unless the child
    /// defines a dimension with the same name.
    #[default]
    Merge,

    /// Dimensions of the parent are only used when the child has no dimension of the requested
    /// shape.
    Override,
}

/// A registry of the dimensions, prefixes, and units of a system of measurement, such as SI.
///
/// A measurement system may extend a parent system. Names that are not found in the child are
/// looked up in the parent, and lookups by shape follow the system's [`InheritanceRule`].
#[derive(Clone, Debug, Default)]
pub struct MeasurementSystem {
    /// The system this one extends, if any.
    parent: Option<Arc<MeasurementSystem>>,

    /// How dimensions of the parent are combined with those of this system.
    inheritance_rule: InheritanceRule,

    /// The name of the system, if it has one.
    name: Option<String>,

    /// Dimensions defined in this system, by name.
    dimensions_by_name: HashMap<String, Dimension>,

    /// The same dimensions, sorted with [`Dimension::shape_cmp`] so that dimensions with the same
    /// components are adjacent.
    dimensions_by_shape: Vec<Dimension>,

    /// Prefixes defined in this system, by long form.
    prefixes: HashMap<String, Prefix>,

    /// Units defined in this system, by name.
    units_by_name: HashMap<String, Units>,

    /// Names of units in this system, by abbreviation.
    units_by_abbreviation: HashMap<String, String>,
}

impl MeasurementSystem {
    /// Creates an empty measurement system with no name and no parent.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates an empty measurement system that extends `parent`.
    pub fn child_of(parent: Arc<MeasurementSystem>, inheritance_rule: InheritanceRule) -> Self {
        Self {
            parent: Some(parent),
            inheritance_rule,
            ..Self::default()
        }
    }

    /// Returns this system with the given name.
    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    /// Returns the name of this system, if it has one.
    pub fn name(&self) -> Option<&str> {
        self.name.as_deref()
    }

    /// Returns the parent of this system, if it has one.
    pub fn parent(&self) -> Option<&MeasurementSystem> {
        self.parent.as_deref()
    }

    /// Returns the rule used to combine the dimensions of this system with its parent's.
    pub fn inheritance_rule(&self) -> InheritanceRule {
        self.inheritance_rule
    }

    /// Adds a dimension to this system. Returns `false`, leaving the system unchanged, if this
    /// system already has a dimension with the same name.
    pub fn add_dimension(&mut self, dimension: impl Into<Dimension>) -> bool {
        let dimension = dimension.into();
        if self.dimensions_by_name.contains_key(dimension.name()) {
            return false;
        }

        debug!(name = dimension.name(), "adding dimension");
        let index = match self.dimensions_by_shape.binary_search_by(|probe| probe.shape_cmp(&dimension)) {
            Ok(index) | Err(index) => index,
        };
        self.dimensions_by_shape.insert(index, dimension.clone());
        self.dimensions_by_name.insert(dimension.name().to_owned(), dimension);
        true
    }

    /// Adds a dimension to this system, replacing any dimension with the same name. Returns
    /// `true` if a dimension was replaced.
    pub fn replace_dimension(&mut self, dimension: impl Into<Dimension>) -> bool {
        let dimension = dimension.into();
        let existed = self.remove_dimension(dimension.name()).is_some();
        self.add_dimension(dimension);
        existed
    }

    /// Removes the dimension with the given name from this system, returning it. Dimensions of
    /// the parent system are not affected.
    pub fn remove_dimension(&mut self, name: &str) -> Option<Dimension> {
        let dimension = self.dimensions_by_name.remove(name)?;
        if let Ok(index) = self.dimensions_by_shape.binary_search_by(|probe| probe.shape_cmp(&dimension)) {
            self.dimensions_by_shape.remove(index);
        }
        Some(dimension)
    }

    /// Looks up a dimension by name, in this system and then in its ancestors.
    pub fn dimension(&self, name: &str) -> Option<&Dimension> {
        self.dimensions_by_name
            .get(name)
            .or_else(|| self.parent.as_ref()?.dimension(name))
    }

    /// Returns the dimensions defined directly in this system, ordered by shape.
    pub fn dimensions(&self) -> impl Iterator<Item = &Dimension> {
        self.dimensions_by_shape.iter()
    }

    /// Returns every dimension with the same components as `components`, following the
    /// [`InheritanceRule`] of each system in the chain. Dimensions of this system come first.
    pub fn dimensions_like<C: ComponentIterable + ?Sized>(&self, components: &C) -> Vec<&Dimension> {
        let start = self.dimensions_by_shape
            .partition_point(|dim| dim.compare_components(components) == Ordering::Less);
        let end = self.dimensions_by_shape
            .partition_point(|dim| dim.compare_components(components) != Ordering::Greater);
        let mut found = self.dimensions_by_shape[start..end].iter().collect::<Vec<_>>();

        if let Some(parent) = &self.parent {
            match self.inheritance_rule {
                InheritanceRule::Merge => found.extend(
                    parent.dimensions_like(components)
                        .into_iter()
                        .filter(|dim| !self.dimensions_by_name.contains_key(dim.name())),
                ),
                InheritanceRule::Override if found.is_empty() => {
                    found = parent.dimensions_like(components);
                },
                InheritanceRule::Override => {},
            }
        }

        found
    }

    /// Returns the names of dimensions in this system and its ancestors that are similar to the
    /// given name.
    pub fn similar_dimension_names(&self, name: &str) -> Vec<&str> {
        let mut names = similar(self.dimensions_by_name.keys(), name);
        if let Some(parent) = &self.parent {
            names.extend(parent.similar_dimension_names(name));
        }
        names
    }

    /// Adds a prefix to this system. Returns `false`, leaving the system unchanged, if this system
    /// already has a prefix with the same long form.
    pub fn add_prefix(&mut self, prefix: Prefix) -> bool {
        if self.prefixes.contains_key(prefix.long_form()) {
            return false;
        }
        debug!(long_form = prefix.long_form(), "adding prefix");
        self.prefixes.insert(prefix.long_form().to_owned(), prefix);
        true
    }

    /// Looks up a prefix by long form or abbreviation, in this system and then in its ancestors.
    pub fn prefix(&self, name: &str) -> Option<&Prefix> {
        self.prefixes
            .get(name)
            .or_else(|| self.prefixes.values().find(|prefix| prefix.abbreviation() == Some(name)))
            .or_else(|| self.parent.as_ref()?.prefix(name))
    }

    /// Returns the prefixes defined directly in this system, from smallest to largest factor.
    pub fn prefixes(&self) -> Vec<&Prefix> {
        let mut prefixes = self.prefixes.values().collect::<Vec<_>>();
        prefixes.sort();
        prefixes
    }

    /// Adds units to this system. Returns `false`, leaving the system unchanged, if this system
    /// already has units with the same name.
    ///
    /// If the abbreviation is already taken by other units, the units can only be found by name.
    pub fn add_units(&mut self, units: Units) -> bool {
        if self.units_by_name.contains_key(units.name()) {
            return false;
        }

        debug!(name = units.name(), abbreviation = units.abbreviation(), "adding units");
        if let Some(abbreviation) = units.abbreviation() {
            match self.units_by_abbreviation.get(abbreviation) {
                Some(existing) => warn!(
                    abbreviation,
                    existing = existing.as_str(),
                    ignored = units.name(),
                    "abbreviation is already in use",
                ),
                None => {
                    self.units_by_abbreviation.insert(abbreviation.to_owned(), units.name().to_owned());
                },
            }
        }
        self.units_by_name.insert(units.name().to_owned(), units);
        true
    }

    /// Looks up units by exact name or abbreviation, in this system and then in its ancestors.
    pub fn exact_units(&self, name: &str) -> Option<&Units> {
        self.units_by_name
            .get(name)
            .or_else(|| {
                let name = self.units_by_abbreviation.get(name)?;
                self.units_by_name.get(name)
            })
            .or_else(|| self.parent.as_ref()?.exact_units(name))
    }

    /// Looks up units by name or abbreviation, in this system and then in its ancestors.
    ///
    /// If there are no units with that exact name, the name is split into a prefix and units,
    /// so that `kilometer` and `km` are found when `kilo` (`k`) and `meter` (`m`) are defined.
    /// Long-form prefixes combine with unit names, and abbreviated prefixes with abbreviations.
    pub fn units(&self, name: &str) -> Option<Cow<'_, Units>> {
        if let Some(units) = self.exact_units(name) {
            return Some(Cow::Borrowed(units));
        }

        self.prefixed_units(name).map(Cow::Owned)
    }

    /// Splits `name` into a prefix and the name of linear units.
    ///
    /// When several prefixes match, the longest prefix is tried first, then prefixes closer to
    /// this system, then prefixes in alphabetical order. Prefixes that match only offset units
    /// are skipped.
    fn prefixed_units(&self, name: &str) -> Option<Units> {
        let mut candidates = Vec::new();
        let mut system = Some(self);
        let mut depth = 0;
        while let Some(current) = system {
            for prefix in current.prefixes.values() {
                if let Some(rest) = name.strip_prefix(prefix.long_form()) {
                    if let Some(units) = self.units_by_name_in_chain(rest) {
                        candidates.push((prefix.long_form().len(), depth, prefix, units));
                    }
                }

                let Some(abbreviation) = prefix.abbreviation() else {
                    continue;
                };
                if let Some(rest) = name.strip_prefix(abbreviation) {
                    if let Some(units) = self.units_by_abbreviation_in_chain(rest) {
                        candidates.push((abbreviation.len(), depth, prefix, units));
                    }
                }
            }
            system = current.parent();
            depth += 1;
        }

        candidates.sort_by(|(a_len, a_depth, a, _), (b_len, b_depth, b, _)| {
            b_len.cmp(a_len)
                .then(a_depth.cmp(b_depth))
                .then_with(|| a.long_form().cmp(b.long_form()))
        });
        candidates.into_iter().find_map(|(.., prefix, units)| prefix.apply(units).ok())
    }

    fn units_by_name_in_chain(&self, name: &str) -> Option<&Units> {
        self.units_by_name
            .get(name)
            .or_else(|| self.parent.as_ref()?.units_by_name_in_chain(name))
    }

    fn units_by_abbreviation_in_chain(&self, abbreviation: &str) -> Option<&Units> {
        self.units_by_abbreviation
            .get(abbreviation)
            .and_then(|name| self.units_by_name.get(name))
            .or_else(|| self.parent.as_ref()?.units_by_abbreviation_in_chain(abbreviation))
    }

    /// Returns the units defined directly in this system, in no particular order.
    pub fn all_units(&self) -> impl Iterator<Item = &Units> {
        self.units_by_name.values()
    }

    /// Returns the names and abbreviations of units in this system and its ancestors that are
    /// similar to the given name.
    pub fn similar_units_names(&self, name: &str) -> Vec<&str> {
        let mut names = similar(
            self.units_by_name.keys().chain(self.units_by_abbreviation.keys()),
            name,
        );
        if let Some(parent) = &self.parent {
            names.extend(parent.similar_units_names(name));
        }
        names
    }
}

/// Returns the names within a small edit distance of `name`.
fn similar<'a>(names: impl Iterator<Item = &'a String>, name: &str) -> Vec<&'a str> {
    let mut similar = names
        .filter(|n| n.as_str() != name && levenshtein(n, name) < 3)
        .map(String::as_str)
        .collect::<Vec<_>>();
    similar.sort_unstable();
    similar
}
