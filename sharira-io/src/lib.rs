//! ShariraIO - Sensor-access layer for wearable motion-capture suits
//!
//! Presents a suit as a set of named, typed sensors (accelerations,
//! positions, orientations, poses, magnetometers, body-segment and joint
//! kinematics) backed by a single suit driver. Sensor names are stable:
//! `<wearable-name><Kind>::<driver label>`, e.g. `XsensSuit_PoseSensor::Pelvis`.
//!
//! ## Modules
//!
//! - [`suit`]: the [`Suit`] façade (activation, lookups, lifecycle)
//! - [`sensors`]: sensor capability traits and their suit-backed views
//! - [`registry`]: name → view tables built from the driver labels
//! - [`lifecycle`]: calibrate / acquire commands and status broadcast
//! - [`core`]: driver trait and shared data types
//! - [`devices`]: driver implementations (`mock`)
//! - [`config`]: TOML configuration

pub mod config;
pub mod core;
pub mod devices;
pub mod error;
pub mod lifecycle;
pub mod registry;
pub mod sensors;
pub mod suit;

// Re-export commonly used types
pub use config::SuitConfig;
pub use core::driver::{CalibrationQuality, DriverStatus, SuitDriver};
pub use core::types::{Quaternion, SensorKind, SensorStatus, TimeStamp, Vector3};
pub use error::{Error, Result};
pub use suit::Suit;
