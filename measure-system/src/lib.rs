#![doc = include_str!("../README.md")]

pub mod loader;
pub mod parser;
pub mod system;
pub mod tokenizer;

use measure_error::Error;
use once_cell::sync::OnceCell;
use std::sync::Arc;
pub use system::{InheritanceRule, MeasurementSystem};

/// The definition file of the built-in SI system.
pub const SI_DEFINITIONS: &str = include_str!("../systems/si.txt");

static SI: OnceCell<Arc<MeasurementSystem>> = OnceCell::new();

/// Returns the International System of Units, along with common units accepted for use with it,
/// such as the hour, the liter, and degrees Celsius.
///
/// The system is loaded from [`SI_DEFINITIONS`] the first time this is called, and shared
/// afterwards. It can be extended with [`MeasurementSystem::child_of`].
pub fn si() -> Result<Arc<MeasurementSystem>, Vec<Error>> {
    SI.get_or_try_init(|| {
        MeasurementSystem::load(SI_DEFINITIONS)
            .map(|system| Arc::new(system.with_name("SI")))
    })
        .cloned()
}
