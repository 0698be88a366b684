//! Sensor registries
//!
//! A [`SensorRegistry`] maps the stable sensor names of one capability kind to
//! their views and driver indices. [`SuitRegistry`] is the typed table of the
//! seven registries a suit exposes. Registries are built once per activation
//! from the labels the driver reports and never change afterwards; only the
//! status stored inside each view is mutated, and only through the
//! crate-internal broadcast the lifecycle controller issues, so every view of
//! every kind always carries the same status.

use crate::core::driver::DriverHandle;
use crate::core::types::{SensorKind, SensorName, SensorStatus};
use crate::error::{Error, Result};
use crate::sensors::Sensor;
use crate::sensors::views::{
    FreeBodyAccelerationView, MagnetometerView, OrientationView, PoseView, PositionView,
    SuitView, ViewCore, VirtualLinkKinView, VirtualSphericalJointKinView,
};
use std::collections::HashMap;
use std::sync::Arc;

/// A registered view and its position in the driver snapshot
#[derive(Debug)]
pub struct RegistryEntry<V> {
    pub view: Arc<V>,
    pub driver_index: usize,
}

/// Registry of one capability kind, in driver order
#[derive(Debug)]
pub struct SensorRegistry<V> {
    entries: Vec<RegistryEntry<V>>,
    by_name: HashMap<SensorName, usize>,
}

impl<V: SuitView> SensorRegistry<V> {
    /// Build a registry from driver labels.
    ///
    /// The driver index of each label is its position in `labels`.
    pub fn build(labels: &[String], namespace: &str, driver: &DriverHandle) -> Result<Self> {
        let mut entries = Vec::with_capacity(labels.len());
        let mut by_name = HashMap::with_capacity(labels.len());

        for (driver_index, label) in labels.iter().enumerate() {
            let name = V::KIND.sensor_name(namespace, label);
            if by_name.insert(name.clone(), driver_index).is_some() {
                return Err(Error::DuplicateSensorName(name));
            }

            let core = ViewCore::new(name, label, driver_index, Arc::clone(driver));
            entries.push(RegistryEntry {
                view: Arc::new(V::from_core(core)),
                driver_index,
            });
        }

        Ok(Self { entries, by_name })
    }

    pub fn get(&self, name: &str) -> Option<&Arc<V>> {
        self.by_name.get(name).map(|&i| &self.entries[i].view)
    }

    pub fn driver_index(&self, name: &str) -> Option<usize> {
        self.by_name.get(name).map(|&i| self.entries[i].driver_index)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn entries(&self) -> &[RegistryEntry<V>] {
        &self.entries
    }

    pub fn views(&self) -> impl Iterator<Item = &Arc<V>> {
        self.entries.iter().map(|e| &e.view)
    }

    /// All views, type-erased
    pub fn sensors(&self) -> Vec<Arc<dyn Sensor>> {
        self.views()
            .map(|v| Arc::clone(v) as Arc<dyn Sensor>)
            .collect()
    }

    /// Set the status of every view
    pub(crate) fn broadcast(&self, status: SensorStatus) {
        for entry in &self.entries {
            entry.view.core().set_status(status);
        }
    }
}

impl<V> Default for SensorRegistry<V> {
    fn default() -> Self {
        Self {
            entries: Vec::new(),
            by_name: HashMap::new(),
        }
    }
}

/// The seven registries of a suit
///
/// Read-only outside the crate: statuses move only through suit lifecycle
/// commands, which always address every kind at once.
///
/// ```compile_fail
/// use sharira_io::{SensorStatus, Suit};
///
/// let suit = Suit::new();
/// suit.registry().broadcast(SensorStatus::Ok);
/// ```
///
/// ```compile_fail
/// use sharira_io::Suit;
///
/// let suit = Suit::new();
/// let _ = suit.registry().poses.len();
/// ```
#[derive(Debug, Default)]
pub struct SuitRegistry {
    pub(crate) free_body_accelerations: SensorRegistry<FreeBodyAccelerationView>,
    pub(crate) positions: SensorRegistry<PositionView>,
    pub(crate) orientations: SensorRegistry<OrientationView>,
    pub(crate) poses: SensorRegistry<PoseView>,
    pub(crate) magnetometers: SensorRegistry<MagnetometerView>,
    pub(crate) links: SensorRegistry<VirtualLinkKinView>,
    pub(crate) joints: SensorRegistry<VirtualSphericalJointKinView>,
}

impl SuitRegistry {
    /// Build every registry from the labels the driver reports.
    ///
    /// Sensor labels feed the five sensor-data kinds; link and joint labels
    /// feed the link and joint registries.
    pub fn build(driver: &DriverHandle, namespace: &str) -> Result<Self> {
        let (sensor_labels, link_labels, joint_labels) = {
            let d = driver.lock();
            (d.sensor_labels(), d.link_labels(), d.joint_labels())
        };

        let registry = Self {
            free_body_accelerations: SensorRegistry::build(&sensor_labels, namespace, driver)?,
            positions: SensorRegistry::build(&sensor_labels, namespace, driver)?,
            orientations: SensorRegistry::build(&sensor_labels, namespace, driver)?,
            poses: SensorRegistry::build(&sensor_labels, namespace, driver)?,
            magnetometers: SensorRegistry::build(&sensor_labels, namespace, driver)?,
            links: SensorRegistry::build(&link_labels, namespace, driver)?,
            joints: SensorRegistry::build(&joint_labels, namespace, driver)?,
        };

        log::info!(
            "Registered {} sensors x 5 kinds, {} links, {} joints",
            sensor_labels.len(),
            link_labels.len(),
            joint_labels.len()
        );

        Ok(registry)
    }

    /// Set the status of every view of every kind
    pub(crate) fn broadcast(&self, status: SensorStatus) {
        log::debug!("Broadcasting sensor status {}", status);
        self.free_body_accelerations.broadcast(status);
        self.positions.broadcast(status);
        self.orientations.broadcast(status);
        self.poses.broadcast(status);
        self.magnetometers.broadcast(status);
        self.links.broadcast(status);
        self.joints.broadcast(status);
    }

    /// Views of one kind; `None` if a suit does not serve that kind
    pub fn sensors(&self, kind: SensorKind) -> Option<Vec<Arc<dyn Sensor>>> {
        match kind {
            SensorKind::FreeBodyAcceleration => Some(self.free_body_accelerations.sensors()),
            SensorKind::Position => Some(self.positions.sensors()),
            SensorKind::Orientation => Some(self.orientations.sensors()),
            SensorKind::Pose => Some(self.poses.sensors()),
            SensorKind::Magnetometer => Some(self.magnetometers.sensors()),
            SensorKind::VirtualLinkKin => Some(self.links.sensors()),
            SensorKind::VirtualSphericalJointKin => Some(self.joints.sensors()),
            _ => None,
        }
    }

    /// Every view of every kind, kinds in [`SensorKind::SUIT_KINDS`] order
    pub fn all_sensors(&self) -> Vec<Arc<dyn Sensor>> {
        SensorKind::SUIT_KINDS
            .iter()
            .filter_map(|&kind| self.sensors(kind))
            .flatten()
            .collect()
    }

    /// Number of views of one kind (zero for unsupported kinds)
    pub fn count(&self, kind: SensorKind) -> usize {
        match kind {
            SensorKind::FreeBodyAcceleration => self.free_body_accelerations.len(),
            SensorKind::Position => self.positions.len(),
            SensorKind::Orientation => self.orientations.len(),
            SensorKind::Pose => self.poses.len(),
            SensorKind::Magnetometer => self.magnetometers.len(),
            SensorKind::VirtualLinkKin => self.links.len(),
            SensorKind::VirtualSphericalJointKin => self.joints.len(),
            _ => 0,
        }
    }

    /// Driver snapshot indices of one kind, in registration order
    pub fn driver_indices(&self, kind: SensorKind) -> Vec<usize> {
        fn indices<V>(registry: &SensorRegistry<V>) -> Vec<usize> {
            registry.entries.iter().map(|e| e.driver_index).collect()
        }

        match kind {
            SensorKind::FreeBodyAcceleration => indices(&self.free_body_accelerations),
            SensorKind::Position => indices(&self.positions),
            SensorKind::Orientation => indices(&self.orientations),
            SensorKind::Pose => indices(&self.poses),
            SensorKind::Magnetometer => indices(&self.magnetometers),
            SensorKind::VirtualLinkKin => indices(&self.links),
            SensorKind::VirtualSphericalJointKin => indices(&self.joints),
            _ => Vec::new(),
        }
    }

    /// Total number of views
    pub fn total(&self) -> usize {
        SensorKind::SUIT_KINDS.iter().map(|&k| self.count(k)).sum()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::devices::mock::{MockSuitConfig, MockSuitDriver};
    use crate::core::driver::{DriverConfiguration, SuitDriver};
    use parking_lot::Mutex;

    fn labels(names: &[&str]) -> Vec<String> {
        names.iter().map(|s| s.to_string()).collect()
    }

    fn mock_handle(sensors: &[&str], links: &[&str], joints: &[&str]) -> DriverHandle {
        let mock = MockSuitConfig {
            sensor_labels: labels(sensors),
            link_labels: labels(links),
            joint_labels: labels(joints),
            ..MockSuitConfig::default()
        };
        let mut driver = MockSuitDriver::new(DriverConfiguration::default(), mock);
        driver.configure_and_connect().unwrap();
        Arc::new(Mutex::new(Box::new(driver)))
    }

    #[test]
    fn test_indices_follow_label_order() {
        let driver = mock_handle(&[], &[], &[]);
        let registry: SensorRegistry<PositionView> =
            SensorRegistry::build(&labels(&["Pelvis", "Head", "T8"]), "Suit_", &driver).unwrap();

        assert_eq!(registry.len(), 3);
        assert_eq!(registry.driver_index("Suit_PositionSensor::Pelvis"), Some(0));
        assert_eq!(registry.driver_index("Suit_PositionSensor::Head"), Some(1));
        assert_eq!(registry.driver_index("Suit_PositionSensor::T8"), Some(2));
        assert_eq!(registry.driver_index("Suit_OrientationSensor::Head"), None);

        for (i, entry) in registry.entries().iter().enumerate() {
            assert_eq!(entry.driver_index, i);
            assert_eq!(entry.view.core().driver_index(), i);
        }
    }

    #[test]
    fn test_duplicate_label_rejected() {
        let driver = mock_handle(&[], &[], &[]);
        let result: Result<SensorRegistry<MagnetometerView>> =
            SensorRegistry::build(&labels(&["Pelvis", "Head", "Pelvis"]), "Suit_", &driver);

        match result {
            Err(Error::DuplicateSensorName(name)) => {
                assert_eq!(name, "Suit_Magnetometer::Pelvis");
            }
            other => panic!("expected duplicate error, got {:?}", other.map(|r| r.len())),
        }
    }

    #[test]
    fn test_suit_registry_counts() {
        let driver = mock_handle(
            &["Pelvis", "Head"],
            &["Pelvis", "L5", "L3"],
            &["jL5S1"],
        );
        let registry = SuitRegistry::build(&driver, "Suit_").unwrap();

        for kind in [
            SensorKind::FreeBodyAcceleration,
            SensorKind::Position,
            SensorKind::Orientation,
            SensorKind::Pose,
            SensorKind::Magnetometer,
        ] {
            assert_eq!(registry.count(kind), 2);
            assert_eq!(registry.sensors(kind).unwrap().len(), 2);
        }
        assert_eq!(registry.count(SensorKind::VirtualLinkKin), 3);
        assert_eq!(registry.count(SensorKind::VirtualSphericalJointKin), 1);
        assert_eq!(registry.total(), 14);
        assert_eq!(registry.all_sensors().len(), 14);
        assert!(registry.sensors(SensorKind::Emg).is_none());
        assert_eq!(registry.count(SensorKind::Skin), 0);
        assert_eq!(registry.driver_indices(SensorKind::VirtualLinkKin), vec![0, 1, 2]);
        assert_eq!(registry.driver_indices(SensorKind::Pose), vec![0, 1]);
        assert!(registry.driver_indices(SensorKind::Emg).is_empty());
    }

    #[test]
    fn test_broadcast_reaches_every_kind() {
        let driver = mock_handle(&["Pelvis", "Head"], &["Pelvis"], &["jL5S1", "jL4L3"]);
        let registry = SuitRegistry::build(&driver, "Suit_").unwrap();

        assert!(
            registry
                .all_sensors()
                .iter()
                .all(|s| s.status() == SensorStatus::Unknown)
        );

        for status in [
            SensorStatus::Calibrating,
            SensorStatus::WaitingForFirstRead,
            SensorStatus::Ok,
            SensorStatus::Error,
        ] {
            registry.broadcast(status);
            for sensor in registry.all_sensors() {
                assert_eq!(sensor.status(), status, "{}", sensor.name());
            }
        }
    }

    #[test]
    fn test_lookup_by_name() {
        let driver = mock_handle(&["Pelvis"], &["Pelvis"], &[]);
        let registry = SuitRegistry::build(&driver, "Suit_").unwrap();

        let link = registry.links.get("Suit_VirtualLinkKinSensor::Pelvis").unwrap();
        assert_eq!(link.name(), "Suit_VirtualLinkKinSensor::Pelvis");
        assert_eq!(link.kind(), SensorKind::VirtualLinkKin);
        assert!(registry.links.get("Suit_PoseSensor::Pelvis").is_none());
    }
}
