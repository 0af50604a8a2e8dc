//! Value objects - Immutable domain primitives

mod city;

pub use city::City;
