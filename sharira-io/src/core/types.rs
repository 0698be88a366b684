//! Core value types shared by drivers, views and the suit façade.
//!
//! Key types:
//! - [`SensorStatus`]: Per-view status broadcast by the lifecycle controller
//! - [`AtomicSensorStatus`]: Lock-free storage for a view's status
//! - [`SensorKind`]: Capability kinds a wearable can expose

use serde::{Deserialize, Serialize};
use std::fmt;
use std::sync::atomic::{AtomicU8, Ordering};

/// 3-vector `[x, y, z]`
pub type Vector3 = [f64; 3];

/// Quaternion `[w, x, y, z]`
pub type Quaternion = [f64; 4];

/// Stable sensor name: `<suit namespace><kind prefix><driver label>`
pub type SensorName = String;

/// Suit timestamp as reported to consumers
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct TimeStamp {
    /// Driver system time (seconds)
    pub time: f64,
    /// Sequence counter (always zero, the driver owns timestamping)
    pub sequence_number: u32,
}

/// Status of a sensor view, or of the suit as a whole
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[repr(u8)]
pub enum SensorStatus {
    #[default]
    Unknown = 0,
    Ok = 1,
    Error = 2,
    Calibrating = 3,
    WaitingForFirstRead = 4,
}

impl SensorStatus {
    fn from_u8(raw: u8) -> Self {
        match raw {
            1 => SensorStatus::Ok,
            2 => SensorStatus::Error,
            3 => SensorStatus::Calibrating,
            4 => SensorStatus::WaitingForFirstRead,
            _ => SensorStatus::Unknown,
        }
    }
}

impl fmt::Display for SensorStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            SensorStatus::Unknown => "Unknown",
            SensorStatus::Ok => "Ok",
            SensorStatus::Error => "Error",
            SensorStatus::Calibrating => "Calibrating",
            SensorStatus::WaitingForFirstRead => "WaitingForFirstRead",
        };
        f.write_str(s)
    }
}

/// Atomic SensorStatus wrapper using AtomicU8
///
/// Written by the lifecycle broadcast, read by any consumer thread.
#[derive(Debug)]
pub struct AtomicSensorStatus(AtomicU8);

impl AtomicSensorStatus {
    pub fn new(status: SensorStatus) -> Self {
        Self(AtomicU8::new(status as u8))
    }

    pub fn load(&self) -> SensorStatus {
        SensorStatus::from_u8(self.0.load(Ordering::Acquire))
    }

    pub fn store(&self, status: SensorStatus) {
        self.0.store(status as u8, Ordering::Release);
    }
}

impl Default for AtomicSensorStatus {
    fn default() -> Self {
        Self::new(SensorStatus::Unknown)
    }
}

/// Capability kinds a wearable can expose
///
/// Only the first seven are backed by a motion-capture suit; the remaining
/// kinds exist for other wearables and are reported as unsupported.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SensorKind {
    FreeBodyAcceleration,
    Position,
    Orientation,
    Pose,
    Magnetometer,
    VirtualLinkKin,
    VirtualSphericalJointKin,
    Accelerometer,
    Gyroscope,
    Emg,
    Force3D,
    Torque3D,
    Force6D,
    Skin,
    Temperature,
}

impl SensorKind {
    /// Kinds served by a suit, in enumeration order
    pub const SUIT_KINDS: [SensorKind; 7] = [
        SensorKind::FreeBodyAcceleration,
        SensorKind::Position,
        SensorKind::Orientation,
        SensorKind::Pose,
        SensorKind::Magnetometer,
        SensorKind::VirtualLinkKin,
        SensorKind::VirtualSphericalJointKin,
    ];

    /// Name segment inserted between the suit namespace and the driver label
    pub fn prefix(self) -> &'static str {
        match self {
            SensorKind::FreeBodyAcceleration => "FreeBodyAccelerationSensor::",
            SensorKind::Position => "PositionSensor::",
            SensorKind::Orientation => "OrientationSensor::",
            SensorKind::Pose => "PoseSensor::",
            SensorKind::Magnetometer => "Magnetometer::",
            SensorKind::VirtualLinkKin => "VirtualLinkKinSensor::",
            SensorKind::VirtualSphericalJointKin => "VirtualSphericalJointKinSensor::",
            SensorKind::Accelerometer => "Accelerometer::",
            SensorKind::Gyroscope => "Gyroscope::",
            SensorKind::Emg => "EmgSensor::",
            SensorKind::Force3D => "Force3DSensor::",
            SensorKind::Torque3D => "Torque3DSensor::",
            SensorKind::Force6D => "Force6DSensor::",
            SensorKind::Skin => "SkinSensor::",
            SensorKind::Temperature => "TemperatureSensor::",
        }
    }

    /// Whether a suit registers views of this kind
    pub fn is_suit_kind(self) -> bool {
        Self::SUIT_KINDS.contains(&self)
    }

    /// Full sensor name for a driver label
    pub fn sensor_name(self, namespace: &str, label: &str) -> SensorName {
        format!("{}{}{}", namespace, self.prefix(), label)
    }
}
