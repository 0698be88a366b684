//! Suit façade
//!
//! [`Suit`] is the single entry point for applications: it activates the
//! driver, builds the sensor registries from the labels the driver reports,
//! and exposes lookups, suit-wide status and lifecycle commands.
//!
//! ```no_run
//! use sharira_io::{Suit, SuitConfig};
//!
//! let config = SuitConfig::load("sharira.toml")?;
//! let mut suit = Suit::new();
//! suit.activate(&config)?;
//! suit.calibrate("")?;
//! suit.start_acquisition()?;
//! # Ok::<(), sharira_io::Error>(())
//! ```

use crate::config::{DEFAULT_WEARABLE_NAME, SuitConfig};
use crate::core::driver::{BodyDimensions, DriverHandle, DriverStatus, SuitDriver};
use crate::core::types::{SensorKind, SensorStatus, TimeStamp};
use crate::devices::create_driver;
use crate::error::{Error, Result};
use crate::lifecycle::LifecycleController;
use crate::registry::{SensorRegistry, SuitRegistry};
use crate::sensors::views::SuitView;
use crate::sensors::{
    FreeBodyAccelerationSensor, Magnetometer, OrientationSensor, PoseSensor, PositionSensor,
    Sensor, VirtualLinkKinSensor, VirtualSphericalJointKinSensor,
};
use parking_lot::Mutex;
use std::sync::Arc;

/// A motion-capture suit seen as a set of named sensors
pub struct Suit {
    wearable_name: String,
    driver: Option<DriverHandle>,
    registry: SuitRegistry,
}

impl Suit {
    /// An inactive suit; see [`Suit::open`] and [`Suit::activate`]
    pub fn new() -> Self {
        Self {
            wearable_name: DEFAULT_WEARABLE_NAME.to_string(),
            driver: None,
            registry: SuitRegistry::default(),
        }
    }

    /// Create the configured driver and open the suit with it
    pub fn activate(&mut self, config: &SuitConfig) -> Result<()> {
        let driver = create_driver(config)?;
        self.open(config, driver)
    }

    /// Connect `driver` and register every sensor it reports.
    ///
    /// Connection failure leaves the suit inactive.
    pub fn open(&mut self, config: &SuitConfig, mut driver: Box<dyn SuitDriver>) -> Result<()> {
        if self.driver.is_some() {
            return Err(Error::AlreadyActive);
        }

        log::info!(
            "Opening suit '{}' ({})",
            config.wearable_name,
            config.suit_configuration
        );
        driver.configure_and_connect().map_err(|e| {
            log::error!("Unable to configure and connect the suit: {}", e);
            match e {
                Error::ConnectionFailed(_) => e,
                other => Error::ConnectionFailed(other.to_string()),
            }
        })?;

        let handle: DriverHandle = Arc::new(Mutex::new(driver));
        let registry = SuitRegistry::build(&handle, &config.wearable_name)?;

        self.wearable_name = config.wearable_name.clone();
        self.registry = registry;
        self.driver = Some(handle);
        log::info!("Suit active with {} sensors", self.registry.total());
        Ok(())
    }

    /// Stop any running acquisition and release the driver
    pub fn close(&mut self) -> Result<()> {
        let driver = self.driver.take().ok_or(Error::DriverUnavailable)?;

        {
            let mut d = driver.lock();
            if d.status() == DriverStatus::Recording {
                if let Err(e) = d.stop_acquisition() {
                    log::warn!("Failed to stop acquisition on close: {}", e);
                }
            }
        }

        self.registry = SuitRegistry::default();
        log::info!("Suit '{}' closed", self.wearable_name);
        Ok(())
    }

    pub fn is_active(&self) -> bool {
        self.driver.is_some()
    }

    /// Namespace prepended to every sensor name
    pub fn wearable_name(&self) -> &str {
        &self.wearable_name
    }

    pub fn registry(&self) -> &SuitRegistry {
        &self.registry
    }

    /// Find a sensor of any kind by name
    pub fn sensor(&self, name: &str) -> Option<Arc<dyn Sensor>> {
        let found = self
            .registry
            .all_sensors()
            .into_iter()
            .find(|s| s.name() == name);
        if found.is_none() {
            log::warn!("Sensor '{}' not found", name);
        }
        found
    }

    /// All sensors of one kind; empty for kinds a suit does not serve
    pub fn sensors(&self, kind: SensorKind) -> Vec<Arc<dyn Sensor>> {
        if !kind.is_suit_kind() {
            log::warn!("Sensor kind {:?} is not supported by the suit", kind);
            return Vec::new();
        }
        self.registry.sensors(kind).unwrap_or_default()
    }

    pub fn free_body_acceleration_sensor(
        &self,
        name: &str,
    ) -> Option<Arc<dyn FreeBodyAccelerationSensor>> {
        typed_lookup(&self.registry.free_body_accelerations, name)
            .map(|v| v as Arc<dyn FreeBodyAccelerationSensor>)
    }

    pub fn position_sensor(&self, name: &str) -> Option<Arc<dyn PositionSensor>> {
        typed_lookup(&self.registry.positions, name).map(|v| v as Arc<dyn PositionSensor>)
    }

    pub fn orientation_sensor(&self, name: &str) -> Option<Arc<dyn OrientationSensor>> {
        typed_lookup(&self.registry.orientations, name).map(|v| v as Arc<dyn OrientationSensor>)
    }

    pub fn pose_sensor(&self, name: &str) -> Option<Arc<dyn PoseSensor>> {
        typed_lookup(&self.registry.poses, name).map(|v| v as Arc<dyn PoseSensor>)
    }

    pub fn magnetometer(&self, name: &str) -> Option<Arc<dyn Magnetometer>> {
        typed_lookup(&self.registry.magnetometers, name).map(|v| v as Arc<dyn Magnetometer>)
    }

    pub fn virtual_link_kin_sensor(&self, name: &str) -> Option<Arc<dyn VirtualLinkKinSensor>> {
        typed_lookup(&self.registry.links, name).map(|v| v as Arc<dyn VirtualLinkKinSensor>)
    }

    pub fn virtual_spherical_joint_kin_sensor(
        &self,
        name: &str,
    ) -> Option<Arc<dyn VirtualSphericalJointKinSensor>> {
        typed_lookup(&self.registry.joints, name)
            .map(|v| v as Arc<dyn VirtualSphericalJointKinSensor>)
    }

    /// Suit-wide status derived from the driver state.
    ///
    /// Reflects connectivity and recording only; calibration outcomes are
    /// visible on the individual sensors.
    pub fn status(&self) -> SensorStatus {
        match &self.driver {
            Some(driver) => SensorStatus::from(driver.lock().status()),
            None => SensorStatus::Unknown,
        }
    }

    /// Driver system time of the latest cycle
    pub fn timestamp(&self) -> Result<TimeStamp> {
        let driver = self.driver.as_ref().ok_or(Error::DriverUnavailable)?;
        let stamps = driver.lock().timestamps();
        Ok(TimeStamp {
            time: stamps.system_time,
            sequence_number: 0,
        })
    }

    pub fn last_input_stamp(&self) -> Result<TimeStamp> {
        self.timestamp()
    }

    pub fn set_body_dimensions(&self, dimensions: &BodyDimensions) -> Result<()> {
        self.with_driver(|d| d.set_body_dimensions(dimensions))
    }

    pub fn body_dimensions(&self) -> Result<BodyDimensions> {
        self.with_driver(|d| d.body_dimensions())
    }

    pub fn body_dimension(&self, name: &str) -> Result<f64> {
        self.with_driver(|d| d.body_dimension(name))
    }

    pub fn calibrate(&self, calibration_type: &str) -> Result<()> {
        self.lifecycle().calibrate(calibration_type)
    }

    pub fn abort_calibration(&self) -> Result<()> {
        self.lifecycle().abort_calibration()
    }

    pub fn start_acquisition(&self) -> Result<()> {
        self.lifecycle().start_acquisition()
    }

    pub fn stop_acquisition(&self) -> Result<()> {
        self.lifecycle().stop_acquisition()
    }

    fn lifecycle(&self) -> LifecycleController<'_> {
        LifecycleController::new(self.driver.as_ref(), &self.registry)
    }

    fn with_driver<R>(&self, f: impl FnOnce(&mut dyn SuitDriver) -> Result<R>) -> Result<R> {
        let driver = self.driver.as_ref().ok_or(Error::DriverUnavailable)?;
        let mut guard = driver.lock();
        f(&mut **guard)
    }
}

impl Default for Suit {
    fn default() -> Self {
        Self::new()
    }
}

impl Drop for Suit {
    fn drop(&mut self) {
        if self.is_active() {
            let _ = self.close();
        }
    }
}

fn typed_lookup<V: SuitView>(registry: &SensorRegistry<V>, name: &str) -> Option<Arc<V>> {
    let found = registry.get(name).cloned();
    if found.is_none() {
        log::error!("{:?} sensor '{}' not found", V::KIND, name);
    }
    found
}
