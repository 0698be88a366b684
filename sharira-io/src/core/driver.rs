//! SuitDriver trait definition
//!
//! The driver is the only component talking to suit hardware. It produces one
//! snapshot per cycle for each data stream (sensors, links, joints); the suit
//! façade indexes into those snapshots but never stores them.

use crate::core::types::{Quaternion, SensorStatus, Vector3};
use crate::error::{Error, Result};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;
use std::sync::Arc;

/// Subject body dimensions in meters, keyed by dimension name
pub type BodyDimensions = BTreeMap<String, f64>;

/// Body dimensions a suit driver accepts
pub const ALLOWED_BODY_DIMENSIONS: [&str; 9] = [
    "ankleHeight",
    "armSpan",
    "bodyHeight",
    "footSize",
    "hipHeight",
    "hipWidth",
    "kneeHeight",
    "shoulderWidth",
    "shoeSoleHeight",
];

/// Whether `name` is one of [`ALLOWED_BODY_DIMENSIONS`]
pub fn is_allowed_body_dimension(name: &str) -> bool {
    ALLOWED_BODY_DIMENSIONS.contains(&name)
}

/// Connectivity / recording state of the driver
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum DriverStatus {
    Disconnected,
    Unknown,
    Recording,
    Calibrating,
    CalibratedAndReadyToRecord,
    Connected,
    Scanning,
}

impl From<DriverStatus> for SensorStatus {
    /// Aggregate suit status for a driver state. Only a recording suit is Ok.
    fn from(status: DriverStatus) -> Self {
        match status {
            DriverStatus::Disconnected => SensorStatus::Error,
            DriverStatus::Unknown => SensorStatus::Unknown,
            DriverStatus::Recording => SensorStatus::Ok,
            DriverStatus::Calibrating => SensorStatus::Calibrating,
            DriverStatus::CalibratedAndReadyToRecord => SensorStatus::Error,
            DriverStatus::Connected => SensorStatus::Error,
            DriverStatus::Scanning => SensorStatus::Error,
        }
    }
}

/// Quality grade produced by a calibration routine
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum CalibrationQuality {
    Unknown,
    Good,
    Acceptable,
    Poor,
    Failed,
}

impl CalibrationQuality {
    /// Lower is better; `None` for Unknown
    fn rank(self) -> Option<u8> {
        match self {
            CalibrationQuality::Good => Some(0),
            CalibrationQuality::Acceptable => Some(1),
            CalibrationQuality::Poor => Some(2),
            CalibrationQuality::Failed => Some(3),
            CalibrationQuality::Unknown => None,
        }
    }

    /// Check whether this result satisfies a required minimum.
    ///
    /// A minimum of `Unknown` accepts everything; an `Unknown` result only
    /// satisfies an `Unknown` minimum.
    pub fn satisfies(self, minimum: CalibrationQuality) -> bool {
        match (self.rank(), minimum.rank()) {
            (_, None) => true,
            (None, Some(_)) => false,
            (Some(actual), Some(required)) => actual <= required,
        }
    }
}

impl Default for CalibrationQuality {
    fn default() -> Self {
        CalibrationQuality::Poor
    }
}

impl FromStr for CalibrationQuality {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "Unknown" => Ok(CalibrationQuality::Unknown),
            "Good" => Ok(CalibrationQuality::Good),
            "Acceptable" => Ok(CalibrationQuality::Acceptable),
            "Poor" => Ok(CalibrationQuality::Poor),
            "Failed" => Ok(CalibrationQuality::Failed),
            other => Err(Error::InvalidParameter(format!(
                "unknown calibration quality '{}'",
                other
            ))),
        }
    }
}

impl fmt::Display for CalibrationQuality {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Debug::fmt(self, f)
    }
}

/// Which snapshot streams the driver should produce
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DataStreamConfig {
    pub enable_joint_data: bool,
    pub enable_link_data: bool,
    pub enable_sensor_data: bool,
}

impl Default for DataStreamConfig {
    /// Joints: OFF, Links: ON, Sensors: ON
    fn default() -> Self {
        Self {
            enable_joint_data: false,
            enable_link_data: true,
            enable_sensor_data: true,
        }
    }
}

/// Everything the driver needs to connect, forwarded opaquely
#[derive(Debug, Clone, PartialEq, Default)]
pub struct DriverConfiguration {
    pub rundeps_dir: String,
    pub suit_configuration: String,
    pub acquisition_scenario: String,
    pub default_calibration_type: String,
    pub minimum_calibration_quality: CalibrationQuality,
    /// `None` scans until a suit is found
    pub scan_timeout: Option<std::time::Duration>,
    pub body_dimensions: BodyDimensions,
    pub data_streams: DataStreamConfig,
}

/// Driver-side timestamps of the latest cycle
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct DriverTimeStamps {
    /// Host system time (seconds since UNIX epoch)
    pub system_time: f64,
    /// Time since acquisition start (seconds)
    pub relative_time: f64,
}

/// One record of the sensor-data stream
#[derive(Debug, Clone, PartialEq)]
pub struct SensorData {
    pub name: String,
    pub free_body_acceleration: Vector3,
    pub position: Vector3,
    pub orientation: Quaternion,
    pub magnetic_field: Vector3,
}

/// One record of the link-kinematics stream
#[derive(Debug, Clone, PartialEq)]
pub struct LinkData {
    pub name: String,
    pub position: Vector3,
    pub orientation: Quaternion,
    pub linear_velocity: Vector3,
    pub angular_velocity: Vector3,
    pub linear_acceleration: Vector3,
    pub angular_acceleration: Vector3,
}

/// One record of the joint-kinematics stream
#[derive(Debug, Clone, PartialEq)]
pub struct JointData {
    pub name: String,
    /// Roll / pitch / yaw (rad)
    pub angles: Vector3,
    pub velocities: Vector3,
    pub accelerations: Vector3,
}

/// A named record inside a snapshot
pub trait SnapshotRecord {
    /// Driver label of the record
    fn name(&self) -> &str;
}

impl SnapshotRecord for SensorData {
    fn name(&self) -> &str {
        &self.name
    }
}

impl SnapshotRecord for LinkData {
    fn name(&self) -> &str {
        &self.name
    }
}

impl SnapshotRecord for JointData {
    fn name(&self) -> &str {
        &self.name
    }
}

/// One cycle's worth of records for a stream, in driver order
#[derive(Debug, Clone, PartialEq, Default)]
pub struct DataSample<T> {
    pub timestamps: DriverTimeStamps,
    pub data: Vec<T>,
}

impl<T> DataSample<T> {
    pub fn new(timestamps: DriverTimeStamps, data: Vec<T>) -> Self {
        Self { timestamps, data }
    }
}

/// Suit driver trait for hardware abstraction
///
/// Label lists are fixed once `configure_and_connect` succeeds and their order
/// matches the record order of every later snapshot.
pub trait SuitDriver: Send {
    /// Configure the driver and connect to the suit (scans if needed)
    fn configure_and_connect(&mut self) -> Result<()>;

    /// Labels of physical sensors, in snapshot order
    fn sensor_labels(&self) -> Vec<String>;

    /// Labels of body segments (links), in snapshot order
    fn link_labels(&self) -> Vec<String>;

    /// Labels of joints, in snapshot order
    fn joint_labels(&self) -> Vec<String>;

    /// Latest sensor-data snapshot
    fn sensor_data_sample(&mut self) -> DataSample<SensorData>;

    /// Latest link-kinematics snapshot
    fn link_data_sample(&mut self) -> DataSample<LinkData>;

    /// Latest joint-kinematics snapshot
    fn joint_data_sample(&mut self) -> DataSample<JointData>;

    /// Timestamps of the latest cycle
    fn timestamps(&self) -> DriverTimeStamps;

    /// Current connectivity / recording state
    fn status(&self) -> DriverStatus;

    /// Run a calibration routine; empty `calibration_type` selects the default
    fn calibrate(&mut self, calibration_type: &str) -> Result<()>;

    /// Abort a running calibration
    fn abort_calibration(&mut self) -> Result<()>;

    /// Start streaming data
    fn start_acquisition(&mut self) -> Result<()>;

    /// Stop streaming data
    fn stop_acquisition(&mut self) -> Result<()>;

    /// Update the subject body dimensions
    fn set_body_dimensions(&mut self, dimensions: &BodyDimensions) -> Result<()>;

    /// All body dimensions known to the driver
    fn body_dimensions(&self) -> Result<BodyDimensions>;

    /// A single body dimension
    fn body_dimension(&self, name: &str) -> Result<f64>;
}

/// Shared, serialised access to the suit driver
pub type DriverHandle = Arc<parking_lot::Mutex<Box<dyn SuitDriver>>>;
