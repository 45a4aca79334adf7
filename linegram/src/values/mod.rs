//! Type-erased value model
//!
//! Parsers expose what they captured as a [`ValueMap`] from identifier to
//! [`Value`]. Unnamed captures use the empty identifier.

pub mod error;
pub mod scalar;
pub mod value_map;

pub use error::{ValueError, ValueResult};
pub use scalar::Scalar;
pub use value_map::{Value, ValueMap};
