//! Suit-backed sensor views
//!
//! A view is a name, a driver label and a fixed index into its kind's snapshot.
//! Each read locks the driver just long enough to fetch a fresh snapshot, then
//! checks that the record at the stored index still carries the view's label.

use super::{
    FreeBodyAccelerationSensor, LinearAngular, Magnetometer, OrientationSensor, Pose,
    PoseSensor, PositionSensor, Sensor, VirtualLinkKinSensor, VirtualSphericalJointKinSensor,
};
use crate::core::driver::{DataSample, DriverHandle, SnapshotRecord, SuitDriver};
use crate::core::types::{
    AtomicSensorStatus, Quaternion, SensorKind, SensorName, SensorStatus, Vector3,
};
use crate::error::{Error, Result};
use std::fmt;

/// State shared by every view kind
pub struct ViewCore {
    name: SensorName,
    label: String,
    driver_index: usize,
    status: AtomicSensorStatus,
    driver: DriverHandle,
}

impl ViewCore {
    pub fn new(name: SensorName, label: &str, driver_index: usize, driver: DriverHandle) -> Self {
        Self {
            name,
            label: label.to_string(),
            driver_index,
            status: AtomicSensorStatus::default(),
            driver,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Driver label the name was built from
    pub fn label(&self) -> &str {
        &self.label
    }

    pub fn driver_index(&self) -> usize {
        self.driver_index
    }

    pub fn status(&self) -> SensorStatus {
        self.status.load()
    }

    pub(crate) fn set_status(&self, status: SensorStatus) {
        self.status.store(status);
    }

    /// Fetch a snapshot and extract fields from the record at our index
    fn read<T, R>(
        &self,
        fetch: impl FnOnce(&mut dyn SuitDriver) -> DataSample<T>,
        extract: impl FnOnce(&T) -> R,
    ) -> Result<R>
    where
        T: SnapshotRecord,
    {
        let sample = {
            let mut driver = self.driver.lock();
            fetch(&mut **driver)
        };

        let record = sample
            .data
            .get(self.driver_index)
            .ok_or_else(|| Error::MissingRecord {
                name: self.name.clone(),
                index: self.driver_index,
            })?;

        if record.name() != self.label {
            log::error!(
                "Driver record {} is '{}', expected '{}' for {}",
                self.driver_index,
                record.name(),
                self.label,
                self.name
            );
            return Err(Error::DriverNameMismatch {
                expected: self.label.clone(),
                found: record.name().to_string(),
                index: self.driver_index,
            });
        }

        Ok(extract(record))
    }
}

impl fmt::Debug for ViewCore {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ViewCore")
            .field("name", &self.name)
            .field("label", &self.label)
            .field("driver_index", &self.driver_index)
            .field("status", &self.status.load())
            .finish()
    }
}

/// A concrete view the registry can build and broadcast to
pub trait SuitView: Sensor + Sized + 'static {
    const KIND: SensorKind;

    fn from_core(core: ViewCore) -> Self;

    fn core(&self) -> &ViewCore;
}

/// Declare a view struct with its [`SuitView`] and [`Sensor`] impls
macro_rules! suit_view {
    ($view:ident, $kind:ident) => {
        #[derive(Debug)]
        pub struct $view {
            core: ViewCore,
        }

        impl SuitView for $view {
            const KIND: SensorKind = SensorKind::$kind;

            fn from_core(core: ViewCore) -> Self {
                Self { core }
            }

            fn core(&self) -> &ViewCore {
                &self.core
            }
        }

        impl Sensor for $view {
            fn name(&self) -> &str {
                self.core.name()
            }

            fn kind(&self) -> SensorKind {
                Self::KIND
            }

            fn status(&self) -> SensorStatus {
                self.core.status()
            }
        }
    };
}

// ============================================================================
// Sensor-data views
// ============================================================================

suit_view!(FreeBodyAccelerationView, FreeBodyAcceleration);

impl FreeBodyAccelerationSensor for FreeBodyAccelerationView {
    fn free_body_acceleration(&self) -> Result<Vector3> {
        self.core
            .read(|d| d.sensor_data_sample(), |r| r.free_body_acceleration)
    }
}

suit_view!(PositionView, Position);

impl PositionSensor for PositionView {
    fn position(&self) -> Result<Vector3> {
        self.core.read(|d| d.sensor_data_sample(), |r| r.position)
    }
}

suit_view!(OrientationView, Orientation);

impl OrientationSensor for OrientationView {
    fn orientation_as_quaternion(&self) -> Result<Quaternion> {
        self.core.read(|d| d.sensor_data_sample(), |r| r.orientation)
    }
}

suit_view!(PoseView, Pose);

impl PoseSensor for PoseView {
    fn pose(&self) -> Result<Pose> {
        self.core.read(
            |d| d.sensor_data_sample(),
            |r| Pose {
                position: r.position,
                orientation: r.orientation,
            },
        )
    }
}

suit_view!(MagnetometerView, Magnetometer);

impl Magnetometer for MagnetometerView {
    fn magnetic_field(&self) -> Result<Vector3> {
        self.core.read(|d| d.sensor_data_sample(), |r| r.magnetic_field)
    }
}

// ============================================================================
// Link and joint views
// ============================================================================

suit_view!(VirtualLinkKinView, VirtualLinkKin);

impl VirtualLinkKinSensor for VirtualLinkKinView {
    fn link_acceleration(&self) -> Result<LinearAngular> {
        self.core.read(
            |d| d.link_data_sample(),
            |r| LinearAngular {
                linear: r.linear_acceleration,
                angular: r.angular_acceleration,
            },
        )
    }

    fn link_pose(&self) -> Result<Pose> {
        self.core.read(
            |d| d.link_data_sample(),
            |r| Pose {
                position: r.position,
                orientation: r.orientation,
            },
        )
    }

    fn link_velocity(&self) -> Result<LinearAngular> {
        self.core.read(
            |d| d.link_data_sample(),
            |r| LinearAngular {
                linear: r.linear_velocity,
                angular: r.angular_velocity,
            },
        )
    }
}

suit_view!(VirtualSphericalJointKinView, VirtualSphericalJointKin);

impl VirtualSphericalJointKinSensor for VirtualSphericalJointKinView {
    fn joint_angles_as_rpy(&self) -> Result<Vector3> {
        self.core.read(|d| d.joint_data_sample(), |r| r.angles)
    }

    fn joint_velocities(&self) -> Result<Vector3> {
        self.core.read(|d| d.joint_data_sample(), |r| r.velocities)
    }

    fn joint_accelerations(&self) -> Result<Vector3> {
        self.core.read(|d| d.joint_data_sample(), |r| r.accelerations)
    }
}
