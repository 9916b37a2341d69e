#![doc = include_str!("../README.md")]

mod base;
mod combine;
mod component;
mod derived;
mod dimension;
mod error;
mod iter;

pub use base::BaseDimension;
pub use combine::{combine_components, ComponentMap};
pub use component::DimensionComponent;
pub use derived::DerivedDimension;
pub use dimension::Dimension;
pub use error::DimensionError;
pub use iter::{compare_components, ComponentIterable, Components};
