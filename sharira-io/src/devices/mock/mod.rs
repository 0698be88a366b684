//! Mock suit driver for hardware-free development
//!
//! Simulates a full-body motion-capture suit well enough to drive the whole
//! façade: connection, calibration, acquisition and all three snapshot
//! streams.
//!
//! # Status Machine
//!
//! ```text
//! Disconnected ──connect──▶ Scanning ──found──▶ Connected
//! Connected ──calibrate──▶ Calibrating ──quality ok──▶ CalibratedAndReadyToRecord
//!                                      └─quality low─▶ Connected
//! Connected | CalibratedAndReadyToRecord ──start──▶ Recording
//! Recording ──stop──▶ CalibratedAndReadyToRecord
//! Calibrating | CalibratedAndReadyToRecord ──abort──▶ Connected
//! ```
//!
//! # Configuration
//!
//! ```toml
//! [driver]
//! type = "mock"
//!
//! [driver.mock]
//! sensor-labels = ["Pelvis", "Head"]
//! sample-rate-hz = 60.0
//! random-seed = 42          # 0 = random each run
//! suit-present = true
//! calibration-quality = "Good"
//! ```
//!
//! # Thread Model
//!
//! A frame is generated synchronously on connect so snapshots are readable
//! right away. While recording, a simulation thread (`mock-suit-sim`)
//! replaces the shared frame once per tick; it exits when the stop channel
//! fires or disconnects.
//!
//! # Fault Injection
//!
//! [`MockControl`] is a cloneable handle to the driver's fault state, usable
//! after the driver has been boxed and handed to a suit:
//!
//! ```ignore
//! let control = driver.control();
//! control.fail_next(MockCommand::Calibrate);
//! control.swap_records(MockStream::Sensors, 0, 1);
//! ```

pub mod config;
mod motion;
mod noise;

pub use config::MockSuitConfig;

use crate::core::driver::{
    ALLOWED_BODY_DIMENSIONS, BodyDimensions, DataSample, DriverConfiguration, DriverStatus,
    DriverTimeStamps, JointData, LinkData, SensorData, SuitDriver, is_allowed_body_dimension,
};
use crate::error::{Error, Result};

use crossbeam_channel::{RecvTimeoutError, Sender};
use motion::{MockFrame, MotionModel};
use parking_lot::Mutex;
use std::collections::HashSet;
use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};
use std::thread::{self, JoinHandle};
use std::time::{Duration, Instant, SystemTime, UNIX_EPOCH};

/// Body dimensions of the simulated subject before any override (m)
const DEFAULT_BODY_DIMENSIONS: [f64; 9] = [0.08, 1.75, 1.75, 0.27, 0.95, 0.28, 0.52, 0.38, 0.0];

/// Driver commands that can be made to fail
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MockCommand {
    Connect,
    Calibrate,
    AbortCalibration,
    StartAcquisition,
    StopAcquisition,
    SetBodyDimensions,
}

impl MockCommand {
    fn as_str(self) -> &'static str {
        match self {
            MockCommand::Connect => "configure_and_connect",
            MockCommand::Calibrate => "calibrate",
            MockCommand::AbortCalibration => "abort_calibration",
            MockCommand::StartAcquisition => "start_acquisition",
            MockCommand::StopAcquisition => "stop_acquisition",
            MockCommand::SetBodyDimensions => "set_body_dimensions",
        }
    }
}

/// Snapshot streams of the driver
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MockStream {
    Sensors,
    Links,
    Joints,
}

#[derive(Default)]
struct FaultState {
    pending_failures: HashSet<MockCommand>,
    swaps: Vec<(MockStream, usize, usize)>,
}

/// State shared with the simulation thread and [`MockControl`] handles
struct SharedState {
    status: Mutex<DriverStatus>,
    frame: Mutex<MockFrame>,
    frame_count: AtomicU64,
    faults: Mutex<FaultState>,
}

impl SharedState {
    fn new() -> Self {
        Self {
            status: Mutex::new(DriverStatus::Disconnected),
            frame: Mutex::new(MockFrame::default()),
            frame_count: AtomicU64::new(0),
            faults: Mutex::new(FaultState::default()),
        }
    }

    fn status(&self) -> DriverStatus {
        *self.status.lock()
    }

    fn set_status(&self, status: DriverStatus) {
        let mut current = self.status.lock();
        if *current != status {
            log::debug!("Mock suit status {:?} -> {:?}", *current, status);
            *current = status;
        }
    }

    /// Consume a pending injected failure for `command`
    fn take_failure(&self, command: MockCommand) -> Result<()> {
        if self.faults.lock().pending_failures.remove(&command) {
            log::warn!("Injected failure for {}", command.as_str());
            return Err(Error::command_failed(command.as_str(), "injected failure"));
        }
        Ok(())
    }

    fn publish(&self, frame: MockFrame) {
        *self.frame.lock() = frame;
        self.frame_count.fetch_add(1, Ordering::Relaxed);
    }
}

/// Handle for steering a [`MockSuitDriver`] from tests
#[derive(Clone)]
pub struct MockControl {
    shared: Arc<SharedState>,
}

impl MockControl {
    /// Make the next invocation of `command` fail
    pub fn fail_next(&self, command: MockCommand) {
        self.shared.faults.lock().pending_failures.insert(command);
    }

    /// Swap two records in every later snapshot of `stream`
    pub fn swap_records(&self, stream: MockStream, a: usize, b: usize) {
        self.shared.faults.lock().swaps.push((stream, a, b));
    }

    pub fn clear_swaps(&self) {
        self.shared.faults.lock().swaps.clear();
    }

    /// Frames published since the driver was created
    pub fn frame_count(&self) -> u64 {
        self.shared.frame_count.load(Ordering::Relaxed)
    }

    pub fn status(&self) -> DriverStatus {
        self.shared.status()
    }
}

/// Simulated motion-capture suit
pub struct MockSuitDriver {
    driver_config: DriverConfiguration,
    config: MockSuitConfig,
    shared: Arc<SharedState>,
    body_dimensions: BodyDimensions,
    connected: bool,
    stop_tx: Option<Sender<()>>,
    simulation_handle: Option<JoinHandle<()>>,
}

impl MockSuitDriver {
    pub fn new(driver_config: DriverConfiguration, config: MockSuitConfig) -> Self {
        let body_dimensions = ALLOWED_BODY_DIMENSIONS
            .iter()
            .zip(DEFAULT_BODY_DIMENSIONS)
            .map(|(name, value)| (name.to_string(), value))
            .collect();

        Self {
            driver_config,
            config,
            shared: Arc::new(SharedState::new()),
            body_dimensions,
            connected: false,
            stop_tx: None,
            simulation_handle: None,
        }
    }

    pub fn control(&self) -> MockControl {
        MockControl {
            shared: Arc::clone(&self.shared),
        }
    }

    fn require_connected(&self, command: &'static str) -> Result<()> {
        if !self.connected {
            return Err(Error::command_failed(command, "suit not connected"));
        }
        Ok(())
    }

    fn scan(&self) -> Result<()> {
        self.shared.set_status(DriverStatus::Scanning);
        log::info!("Scanning for suit '{}'", self.driver_config.suit_configuration);

        if !self.config.suit_present {
            self.shared.set_status(DriverStatus::Disconnected);
            return Err(Error::ConnectionFailed("no suit found".to_string()));
        }

        let scan = Duration::from_millis(self.config.scan_duration_ms);
        match self.driver_config.scan_timeout {
            Some(timeout) if scan > timeout => {
                thread::sleep(timeout);
                self.shared.set_status(DriverStatus::Disconnected);
                Err(Error::ConnectionFailed(format!(
                    "scan timed out after {:?}",
                    timeout
                )))
            }
            _ => {
                thread::sleep(scan);
                Ok(())
            }
        }
    }

    fn stop_simulation(&mut self) {
        // Dropping the sender also wakes the thread
        if let Some(tx) = self.stop_tx.take() {
            let _ = tx.send(());
        }
        if let Some(handle) = self.simulation_handle.take() {
            let _ = handle.join();
        }
    }

    fn apply_swaps<T: Clone>(&self, stream: MockStream, mut records: Vec<T>) -> Vec<T> {
        let faults = self.shared.faults.lock();
        for &(s, a, b) in &faults.swaps {
            if s == stream && a < records.len() && b < records.len() {
                records.swap(a, b);
            }
        }
        records
    }
}

impl SuitDriver for MockSuitDriver {
    fn configure_and_connect(&mut self) -> Result<()> {
        log::info!(
            "Connecting mock suit (rundeps: '{}', scenario: '{}')",
            self.driver_config.rundeps_dir,
            self.driver_config.acquisition_scenario
        );
        self.shared.take_failure(MockCommand::Connect)?;
        self.scan()?;

        for (name, value) in &self.driver_config.body_dimensions {
            if is_allowed_body_dimension(name) {
                self.body_dimensions.insert(name.clone(), *value);
            }
        }

        let mut motion = MotionModel::new(&self.config);
        self.shared
            .publish(motion.frame(now_stamps(0.0), &self.config));

        self.connected = true;
        self.shared.set_status(DriverStatus::Connected);
        log::info!(
            "Mock suit connected: {} sensors, {} links, {} joints",
            self.config.sensor_labels.len(),
            self.config.link_labels.len(),
            self.config.joint_labels.len()
        );
        Ok(())
    }

    fn sensor_labels(&self) -> Vec<String> {
        if self.connected {
            self.config.sensor_labels.clone()
        } else {
            Vec::new()
        }
    }

    fn link_labels(&self) -> Vec<String> {
        if self.connected {
            self.config.link_labels.clone()
        } else {
            Vec::new()
        }
    }

    fn joint_labels(&self) -> Vec<String> {
        if self.connected {
            self.config.joint_labels.clone()
        } else {
            Vec::new()
        }
    }

    fn sensor_data_sample(&mut self) -> DataSample<SensorData> {
        let (timestamps, records) = {
            let frame = self.shared.frame.lock();
            let records = if self.driver_config.data_streams.enable_sensor_data {
                frame.sensors.clone()
            } else {
                Vec::new()
            };
            (frame.timestamps, records)
        };
        DataSample::new(timestamps, self.apply_swaps(MockStream::Sensors, records))
    }

    fn link_data_sample(&mut self) -> DataSample<LinkData> {
        let (timestamps, records) = {
            let frame = self.shared.frame.lock();
            let records = if self.driver_config.data_streams.enable_link_data {
                frame.links.clone()
            } else {
                Vec::new()
            };
            (frame.timestamps, records)
        };
        DataSample::new(timestamps, self.apply_swaps(MockStream::Links, records))
    }

    fn joint_data_sample(&mut self) -> DataSample<JointData> {
        let (timestamps, records) = {
            let frame = self.shared.frame.lock();
            let records = if self.driver_config.data_streams.enable_joint_data {
                frame.joints.clone()
            } else {
                Vec::new()
            };
            (frame.timestamps, records)
        };
        DataSample::new(timestamps, self.apply_swaps(MockStream::Joints, records))
    }

    fn timestamps(&self) -> DriverTimeStamps {
        self.shared.frame.lock().timestamps
    }

    fn status(&self) -> DriverStatus {
        self.shared.status()
    }

    fn calibrate(&mut self, calibration_type: &str) -> Result<()> {
        const COMMAND: &str = "calibrate";
        self.require_connected(COMMAND)?;
        self.shared.take_failure(MockCommand::Calibrate)?;

        match self.shared.status() {
            DriverStatus::Connected | DriverStatus::CalibratedAndReadyToRecord => {}
            other => {
                return Err(Error::command_failed(
                    COMMAND,
                    format!("cannot calibrate while {:?}", other),
                ));
            }
        }

        let routine = if calibration_type.is_empty() {
            self.driver_config.default_calibration_type.as_str()
        } else {
            calibration_type
        };
        if routine.is_empty() {
            return Err(Error::command_failed(
                COMMAND,
                "no calibration type given and no default configured",
            ));
        }
        if !self.config.calibration_types.iter().any(|t| t == routine) {
            return Err(Error::command_failed(
                COMMAND,
                format!("unsupported calibration type '{}'", routine),
            ));
        }

        self.shared.set_status(DriverStatus::Calibrating);
        log::info!("Running {} calibration", routine);

        let quality = self.config.calibration_quality;
        let minimum = self.driver_config.minimum_calibration_quality;
        if !quality.satisfies(minimum) {
            self.shared.set_status(DriverStatus::Connected);
            return Err(Error::command_failed(
                COMMAND,
                format!("calibration quality {} below required {}", quality, minimum),
            ));
        }

        self.shared
            .set_status(DriverStatus::CalibratedAndReadyToRecord);
        log::info!("{} calibration finished with quality {}", routine, quality);
        Ok(())
    }

    fn abort_calibration(&mut self) -> Result<()> {
        const COMMAND: &str = "abort_calibration";
        self.require_connected(COMMAND)?;
        self.shared.take_failure(MockCommand::AbortCalibration)?;

        match self.shared.status() {
            DriverStatus::Calibrating
            | DriverStatus::CalibratedAndReadyToRecord
            | DriverStatus::Connected => {
                self.shared.set_status(DriverStatus::Connected);
                Ok(())
            }
            other => Err(Error::command_failed(
                COMMAND,
                format!("nothing to abort while {:?}", other),
            )),
        }
    }

    fn start_acquisition(&mut self) -> Result<()> {
        const COMMAND: &str = "start_acquisition";
        self.require_connected(COMMAND)?;
        self.shared.take_failure(MockCommand::StartAcquisition)?;

        match self.shared.status() {
            DriverStatus::Connected | DriverStatus::CalibratedAndReadyToRecord => {}
            other => {
                return Err(Error::command_failed(
                    COMMAND,
                    format!("cannot start while {:?}", other),
                ));
            }
        }

        let rate = self.config.sample_rate_hz;
        let interval = if rate > 0.0 && rate.is_finite() {
            Duration::try_from_secs_f64(1.0 / rate).ok()
        } else {
            None
        }
        .ok_or_else(|| {
            Error::InvalidParameter(format!(
                "sample-rate-hz must give a representable frame interval, got {}",
                rate
            ))
        })?;
        let (stop_tx, stop_rx) = crossbeam_channel::bounded::<()>(1);
        let config = self.config.clone();
        let shared = Arc::clone(&self.shared);

        let handle = thread::Builder::new()
            .name("mock-suit-sim".to_string())
            .spawn(move || {
                let mut motion = MotionModel::new(&config);
                let start = Instant::now();

                log::info!("Simulation loop started: interval={:?}", interval);
                loop {
                    match stop_rx.recv_timeout(interval) {
                        Err(RecvTimeoutError::Timeout) => {
                            let relative = start.elapsed().as_secs_f64();
                            shared.publish(motion.frame(now_stamps(relative), &config));
                        }
                        Ok(()) | Err(RecvTimeoutError::Disconnected) => break,
                    }
                }
                log::info!("Simulation loop stopped");
            })
            .map_err(|e| Error::Other(format!("Failed to spawn simulation thread: {}", e)))?;

        self.stop_tx = Some(stop_tx);
        self.simulation_handle = Some(handle);
        self.shared.set_status(DriverStatus::Recording);
        Ok(())
    }

    fn stop_acquisition(&mut self) -> Result<()> {
        const COMMAND: &str = "stop_acquisition";
        self.require_connected(COMMAND)?;
        self.shared.take_failure(MockCommand::StopAcquisition)?;

        if self.shared.status() != DriverStatus::Recording {
            return Err(Error::command_failed(COMMAND, "not recording"));
        }

        self.stop_simulation();
        self.shared
            .set_status(DriverStatus::CalibratedAndReadyToRecord);
        Ok(())
    }

    fn set_body_dimensions(&mut self, dimensions: &BodyDimensions) -> Result<()> {
        const COMMAND: &str = "set_body_dimensions";
        self.require_connected(COMMAND)?;
        self.shared.take_failure(MockCommand::SetBodyDimensions)?;

        if let Some(name) = dimensions.keys().find(|k| !is_allowed_body_dimension(k)) {
            return Err(Error::InvalidParameter(format!(
                "unknown body dimension '{}'",
                name
            )));
        }

        for (name, value) in dimensions {
            self.body_dimensions.insert(name.clone(), *value);
        }
        log::debug!("Updated {} body dimensions", dimensions.len());
        Ok(())
    }

    fn body_dimensions(&self) -> Result<BodyDimensions> {
        self.require_connected("body_dimensions")?;
        Ok(self.body_dimensions.clone())
    }

    fn body_dimension(&self, name: &str) -> Result<f64> {
        self.require_connected("body_dimension")?;
        self.body_dimensions
            .get(name)
            .copied()
            .ok_or_else(|| Error::InvalidParameter(format!("unknown body dimension '{}'", name)))
    }
}

impl Drop for MockSuitDriver {
    fn drop(&mut self) {
        self.stop_simulation();
    }
}

fn now_stamps(relative_time: f64) -> DriverTimeStamps {
    let system_time = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_secs_f64())
        .unwrap_or(0.0);
    DriverTimeStamps {
        system_time,
        relative_time,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::driver::{CalibrationQuality, DataStreamConfig};

    fn small_config() -> MockSuitConfig {
        MockSuitConfig {
            sensor_labels: vec!["Pelvis".into(), "Head".into()],
            link_labels: vec!["Pelvis".into(), "L5".into()],
            joint_labels: vec!["jL5S1".into()],
            sample_rate_hz: 200.0,
            random_seed: 42,
            ..MockSuitConfig::default()
        }
    }

    fn connected(driver_config: DriverConfiguration) -> MockSuitDriver {
        let mut driver = MockSuitDriver::new(driver_config, small_config());
        driver.configure_and_connect().unwrap();
        driver
    }

    #[test]
    fn test_connect() {
        let mut driver = MockSuitDriver::new(DriverConfiguration::default(), small_config());
        assert_eq!(driver.status(), DriverStatus::Disconnected);
        assert!(driver.sensor_labels().is_empty());

        driver.configure_and_connect().unwrap();
        assert_eq!(driver.status(), DriverStatus::Connected);
        assert_eq!(driver.sensor_labels(), vec!["Pelvis", "Head"]);
        assert_eq!(driver.joint_labels(), vec!["jL5S1"]);
        assert_eq!(driver.control().frame_count(), 1);
    }

    #[test]
    fn test_connect_without_suit() {
        let config = MockSuitConfig {
            suit_present: false,
            ..small_config()
        };
        let mut driver = MockSuitDriver::new(DriverConfiguration::default(), config);
        assert!(matches!(
            driver.configure_and_connect(),
            Err(Error::ConnectionFailed(_))
        ));
        assert_eq!(driver.status(), DriverStatus::Disconnected);
    }

    #[test]
    fn test_scan_timeout() {
        let config = MockSuitConfig {
            scan_duration_ms: 500,
            ..small_config()
        };
        let driver_config = DriverConfiguration {
            scan_timeout: Some(Duration::from_millis(5)),
            ..DriverConfiguration::default()
        };
        let mut driver = MockSuitDriver::new(driver_config, config);
        assert!(matches!(
            driver.configure_and_connect(),
            Err(Error::ConnectionFailed(_))
        ));
    }

    #[test]
    fn test_calibration_default_type() {
        let mut driver = connected(DriverConfiguration {
            default_calibration_type: "Npose".to_string(),
            ..DriverConfiguration::default()
        });
        driver.calibrate("").unwrap();
        assert_eq!(driver.status(), DriverStatus::CalibratedAndReadyToRecord);
    }

    #[test]
    fn test_calibration_rejections() {
        let mut driver = connected(DriverConfiguration::default());
        assert!(driver.calibrate("").is_err());
        assert!(driver.calibrate("T-pose").is_err());
        assert_eq!(driver.status(), DriverStatus::Connected);
        driver.calibrate("Tpose").unwrap();
    }

    #[test]
    fn test_calibration_quality_below_minimum() {
        let config = MockSuitConfig {
            calibration_quality: CalibrationQuality::Poor,
            ..small_config()
        };
        let mut driver = MockSuitDriver::new(
            DriverConfiguration {
                minimum_calibration_quality: CalibrationQuality::Acceptable,
                ..DriverConfiguration::default()
            },
            config,
        );
        driver.configure_and_connect().unwrap();
        assert!(matches!(
            driver.calibrate("Npose"),
            Err(Error::CommandFailed { command: "calibrate", .. })
        ));
        assert_eq!(driver.status(), DriverStatus::Connected);
    }

    #[test]
    fn test_acquisition_produces_frames() {
        let mut driver = connected(DriverConfiguration::default());
        let control = driver.control();
        driver.calibrate("Npose").unwrap();
        driver.start_acquisition().unwrap();
        assert_eq!(driver.status(), DriverStatus::Recording);

        let deadline = Instant::now() + Duration::from_secs(2);
        while control.frame_count() < 4 && Instant::now() < deadline {
            thread::sleep(Duration::from_millis(5));
        }
        assert!(control.frame_count() >= 4);
        assert!(driver.timestamps().relative_time > 0.0);

        driver.stop_acquisition().unwrap();
        assert_eq!(driver.status(), DriverStatus::CalibratedAndReadyToRecord);
        let frozen = control.frame_count();
        thread::sleep(Duration::from_millis(30));
        assert_eq!(control.frame_count(), frozen);

        assert!(driver.stop_acquisition().is_err());
    }

    #[test]
    fn test_unusable_sample_rate_rejected() {
        for rate in [0.0, -60.0, 1e-30, f64::NAN, f64::INFINITY] {
            let config = MockSuitConfig {
                sample_rate_hz: rate,
                ..small_config()
            };
            let mut driver = MockSuitDriver::new(DriverConfiguration::default(), config);
            driver.configure_and_connect().unwrap();
            driver.calibrate("Npose").unwrap();

            assert!(
                matches!(driver.start_acquisition(), Err(Error::InvalidParameter(_))),
                "rate {}",
                rate
            );
            assert_eq!(driver.status(), DriverStatus::CalibratedAndReadyToRecord);
            assert!(driver.simulation_handle.is_none());
        }
    }

    #[test]
    fn test_abort_returns_to_connected() {
        let mut driver = connected(DriverConfiguration::default());
        driver.calibrate("Npose").unwrap();
        driver.abort_calibration().unwrap();
        assert_eq!(driver.status(), DriverStatus::Connected);
    }

    #[test]
    fn test_disabled_stream_is_empty() {
        let mut driver = connected(DriverConfiguration {
            data_streams: DataStreamConfig::default(),
            ..DriverConfiguration::default()
        });
        assert!(driver.joint_data_sample().data.is_empty());
        assert_eq!(driver.link_data_sample().data.len(), 2);
        assert_eq!(driver.sensor_data_sample().data.len(), 2);
    }

    #[test]
    fn test_injected_failure_is_one_shot() {
        let mut driver = connected(DriverConfiguration::default());
        let control = driver.control();
        control.fail_next(MockCommand::Calibrate);
        assert!(driver.calibrate("Npose").is_err());
        driver.calibrate("Npose").unwrap();
    }

    #[test]
    fn test_swap_records() {
        let mut driver = connected(DriverConfiguration::default());
        let control = driver.control();
        control.swap_records(MockStream::Sensors, 0, 1);

        let names: Vec<_> = driver
            .sensor_data_sample()
            .data
            .into_iter()
            .map(|r| r.name)
            .collect();
        assert_eq!(names, vec!["Head", "Pelvis"]);

        let links: Vec<_> = driver.link_data_sample().data.into_iter().map(|r| r.name).collect();
        assert_eq!(links, vec!["Pelvis", "L5"]);

        control.clear_swaps();
        assert_eq!(driver.sensor_data_sample().data[0].name, "Pelvis");
    }

    #[test]
    fn test_body_dimensions() {
        let mut dims = BodyDimensions::new();
        dims.insert("bodyHeight".to_string(), 1.92);
        let mut driver = connected(DriverConfiguration {
            body_dimensions: dims,
            ..DriverConfiguration::default()
        });

        assert_eq!(driver.body_dimension("bodyHeight").unwrap(), 1.92);
        assert_eq!(driver.body_dimensions().unwrap().len(), 9);

        let mut update = BodyDimensions::new();
        update.insert("footSize".to_string(), 0.3);
        driver.set_body_dimensions(&update).unwrap();
        assert_eq!(driver.body_dimension("footSize").unwrap(), 0.3);

        update.insert("wingSpan".to_string(), 2.0);
        assert!(driver.set_body_dimensions(&update).is_err());
        assert!(driver.body_dimension("wingSpan").is_err());
    }

    #[test]
    fn test_commands_require_connection() {
        let mut driver = MockSuitDriver::new(DriverConfiguration::default(), small_config());
        assert!(driver.calibrate("Npose").is_err());
        assert!(driver.start_acquisition().is_err());
        assert!(driver.body_dimensions().is_err());
    }
}
