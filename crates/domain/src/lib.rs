//! Domain layer for the weather reporter
//!
//! Contains the request-scoped values that flow through the two-stage
//! pipeline: the selectable city, the flattened forecast text and the
//! narrated report. This layer has no I/O.

pub mod entities;
pub mod errors;
pub mod value_objects;

pub use entities::*;
pub use errors::{DomainError, ForecastError};
pub use value_objects::*;
