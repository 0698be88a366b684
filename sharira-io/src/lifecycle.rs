//! Suit lifecycle commands
//!
//! Runs calibrate / abort / start / stop against the driver and broadcasts the
//! resulting status to every registered view:
//!
//! | Command | Before | On success | On failure |
//! |---------|--------|------------|------------|
//! | calibrate | Calibrating | WaitingForFirstRead | Error |
//! | abort_calibration | | Unknown | Error |
//! | start_acquisition | | Ok | WaitingForFirstRead |
//! | stop_acquisition | | WaitingForFirstRead | Ok |
//!
//! Without a driver every command fails with [`Error::DriverUnavailable`]
//! and no status changes. The broadcast completes before the command
//! returns.

use crate::core::driver::{DriverHandle, SuitDriver};
use crate::core::types::SensorStatus;
use crate::error::{Error, Result};
use crate::registry::SuitRegistry;

/// Lifecycle commands over one suit's driver and registries
pub struct LifecycleController<'a> {
    driver: Option<&'a DriverHandle>,
    registry: &'a SuitRegistry,
}

impl<'a> LifecycleController<'a> {
    pub fn new(driver: Option<&'a DriverHandle>, registry: &'a SuitRegistry) -> Self {
        Self { driver, registry }
    }

    /// Run a calibration routine; empty `calibration_type` uses the configured default
    pub fn calibrate(&self, calibration_type: &str) -> Result<()> {
        let driver = self.driver.ok_or(Error::DriverUnavailable)?;

        self.registry.broadcast(SensorStatus::Calibrating);
        let result = driver.lock().calibrate(calibration_type);
        self.finish(
            "calibrate",
            result,
            SensorStatus::WaitingForFirstRead,
            SensorStatus::Error,
        )
    }

    pub fn abort_calibration(&self) -> Result<()> {
        self.run(
            "abort_calibration",
            |d| d.abort_calibration(),
            SensorStatus::Unknown,
            SensorStatus::Error,
        )
    }

    pub fn start_acquisition(&self) -> Result<()> {
        self.run(
            "start_acquisition",
            |d| d.start_acquisition(),
            SensorStatus::Ok,
            SensorStatus::WaitingForFirstRead,
        )
    }

    pub fn stop_acquisition(&self) -> Result<()> {
        self.run(
            "stop_acquisition",
            |d| d.stop_acquisition(),
            SensorStatus::WaitingForFirstRead,
            SensorStatus::Ok,
        )
    }

    fn run(
        &self,
        command: &str,
        invoke: impl FnOnce(&mut dyn SuitDriver) -> Result<()>,
        on_success: SensorStatus,
        on_failure: SensorStatus,
    ) -> Result<()> {
        let driver = self.driver.ok_or(Error::DriverUnavailable)?;
        let result = {
            let mut guard = driver.lock();
            invoke(&mut **guard)
        };
        self.finish(command, result, on_success, on_failure)
    }

    fn finish(
        &self,
        command: &str,
        result: Result<()>,
        on_success: SensorStatus,
        on_failure: SensorStatus,
    ) -> Result<()> {
        match &result {
            Ok(()) => {
                log::info!("{} succeeded", command);
                self.registry.broadcast(on_success);
            }
            Err(e) => {
                log::error!("{} failed: {}", command, e);
                self.registry.broadcast(on_failure);
            }
        }
        result
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::driver::DriverConfiguration;
    use crate::devices::mock::{MockCommand, MockControl, MockSuitConfig, MockSuitDriver};
    use parking_lot::Mutex;
    use std::sync::Arc;

    fn setup() -> (DriverHandle, SuitRegistry, MockControl) {
        let mock = MockSuitConfig {
            sensor_labels: vec!["Pelvis".into(), "Head".into()],
            link_labels: vec!["Pelvis".into()],
            joint_labels: vec!["jL5S1".into()],
            ..MockSuitConfig::default()
        };
        let mut driver = MockSuitDriver::new(DriverConfiguration::default(), mock);
        driver.configure_and_connect().unwrap();
        let control = driver.control();
        let handle: DriverHandle = Arc::new(Mutex::new(Box::new(driver)));
        let registry = SuitRegistry::build(&handle, "Suit_").unwrap();
        (handle, registry, control)
    }

    fn assert_all(registry: &SuitRegistry, status: SensorStatus) {
        let sensors = registry.all_sensors();
        assert_eq!(sensors.len(), 2 * 5 + 1 + 1);
        for sensor in sensors {
            assert_eq!(sensor.status(), status, "{}", sensor.name());
        }
    }

    #[test]
    fn test_full_cycle() {
        let (handle, registry, _control) = setup();
        let lifecycle = LifecycleController::new(Some(&handle), &registry);

        lifecycle.calibrate("Npose").unwrap();
        assert_all(&registry, SensorStatus::WaitingForFirstRead);

        lifecycle.start_acquisition().unwrap();
        assert_all(&registry, SensorStatus::Ok);

        lifecycle.stop_acquisition().unwrap();
        assert_all(&registry, SensorStatus::WaitingForFirstRead);

        lifecycle.abort_calibration().unwrap();
        assert_all(&registry, SensorStatus::Unknown);
    }

    #[test]
    fn test_calibration_failure_broadcasts_error() {
        let (handle, registry, control) = setup();
        let lifecycle = LifecycleController::new(Some(&handle), &registry);

        control.fail_next(MockCommand::Calibrate);
        assert!(lifecycle.calibrate("Npose").is_err());
        assert_all(&registry, SensorStatus::Error);
    }

    #[test]
    fn test_abort_failure_broadcasts_error() {
        let (handle, registry, control) = setup();
        let lifecycle = LifecycleController::new(Some(&handle), &registry);

        control.fail_next(MockCommand::AbortCalibration);
        assert!(lifecycle.abort_calibration().is_err());
        assert_all(&registry, SensorStatus::Error);
    }

    #[test]
    fn test_start_failure_waits_for_first_read() {
        let (handle, registry, control) = setup();
        let lifecycle = LifecycleController::new(Some(&handle), &registry);

        control.fail_next(MockCommand::StartAcquisition);
        assert!(lifecycle.start_acquisition().is_err());
        assert_all(&registry, SensorStatus::WaitingForFirstRead);
    }

    #[test]
    fn test_stop_failure_keeps_ok() {
        let (handle, registry, _control) = setup();
        let lifecycle = LifecycleController::new(Some(&handle), &registry);

        // Not recording, so the driver rejects the stop
        assert!(lifecycle.stop_acquisition().is_err());
        assert_all(&registry, SensorStatus::Ok);
    }

    #[test]
    fn test_no_driver() {
        let (_handle, registry, _control) = setup();
        let lifecycle = LifecycleController::new(None, &registry);

        assert!(matches!(lifecycle.calibrate("Npose"), Err(Error::DriverUnavailable)));
        assert!(matches!(lifecycle.abort_calibration(), Err(Error::DriverUnavailable)));
        assert!(matches!(lifecycle.start_acquisition(), Err(Error::DriverUnavailable)));
        assert!(matches!(lifecycle.stop_acquisition(), Err(Error::DriverUnavailable)));
        assert_all(&registry, SensorStatus::Unknown);
    }
}
