//! Sensor capability traits
//!
//! Every registered sensor implements [`Sensor`] plus exactly one capability
//! trait. Capability reads go to the driver on every call and return the
//! fields of the record stored at the sensor's driver index:
//!
//! | Trait | Payload |
//! |-------|---------|
//! | [`FreeBodyAccelerationSensor`] | [`Vector3`] |
//! | [`PositionSensor`] | [`Vector3`] |
//! | [`OrientationSensor`] | [`Quaternion`] |
//! | [`PoseSensor`] | [`Pose`] |
//! | [`Magnetometer`] | [`Vector3`] |
//! | [`VirtualLinkKinSensor`] | [`LinearAngular`] or [`Pose`] |
//! | [`VirtualSphericalJointKinSensor`] | [`Vector3`] |

pub mod views;

use crate::core::types::{Quaternion, SensorKind, SensorStatus, Vector3};
use crate::error::Result;

pub use views::{
    FreeBodyAccelerationView, MagnetometerView, OrientationView, PoseView, PositionView,
    VirtualLinkKinView, VirtualSphericalJointKinView,
};

/// Position and orientation of a body
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Pose {
    pub position: Vector3,
    pub orientation: Quaternion,
}

/// Linear and angular components of a rate (velocity or acceleration)
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LinearAngular {
    pub linear: Vector3,
    pub angular: Vector3,
}

/// Common interface of every sensor
pub trait Sensor: Send + Sync {
    /// Stable sensor name
    fn name(&self) -> &str;

    /// Capability kind
    fn kind(&self) -> SensorKind;

    /// Last status broadcast by the suit
    fn status(&self) -> SensorStatus;
}

pub trait FreeBodyAccelerationSensor: Sensor {
    /// Acceleration without gravity (m/s²)
    fn free_body_acceleration(&self) -> Result<Vector3>;
}

pub trait PositionSensor: Sensor {
    /// Position (m)
    fn position(&self) -> Result<Vector3>;
}

pub trait OrientationSensor: Sensor {
    fn orientation_as_quaternion(&self) -> Result<Quaternion>;
}

pub trait PoseSensor: Sensor {
    fn pose(&self) -> Result<Pose>;
}

pub trait Magnetometer: Sensor {
    /// Magnetic field (normalized a.u.)
    fn magnetic_field(&self) -> Result<Vector3>;
}

/// Kinematics of a body segment
pub trait VirtualLinkKinSensor: Sensor {
    fn link_acceleration(&self) -> Result<LinearAngular>;

    fn link_pose(&self) -> Result<Pose>;

    fn link_velocity(&self) -> Result<LinearAngular>;
}

/// Kinematics of a spherical joint between two segments
pub trait VirtualSphericalJointKinSensor: Sensor {
    /// Joint angles as roll / pitch / yaw (rad)
    fn joint_angles_as_rpy(&self) -> Result<Vector3>;

    fn joint_velocities(&self) -> Result<Vector3>;

    fn joint_accelerations(&self) -> Result<Vector3>;
}
