//! Core abstractions for suit drivers.
//!
//! - [`driver::SuitDriver`]: Trait to implement for new suit hardware
//! - [`types`]: Sensor status, kinds, and math value types

pub mod driver;
pub mod types;
