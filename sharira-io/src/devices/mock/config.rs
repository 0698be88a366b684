//! Mock suit simulation configuration
//!
//! Every parameter has a default matching a full-body MVN suit, so an empty
//! `[driver.mock]` section (or none at all) gives a working simulated suit.
//!
//! # Default Values
//!
//! | Parameter | Default |
//! |-----------|---------|
//! | sensor-labels | 17 trackers |
//! | link-labels | 23 body segments |
//! | joint-labels | 22 joints |
//! | sample-rate-hz | 60 Hz |
//! | calibration-quality | Good |
//! | sway-frequency-hz | 0.5 Hz |

use crate::core::driver::CalibrationQuality;
use serde::Deserialize;

/// Tracker locations of a full-body suit, in driver order
pub const DEFAULT_SENSOR_LABELS: [&str; 17] = [
    "Pelvis",
    "T8",
    "Head",
    "RightShoulder",
    "RightUpperArm",
    "RightForeArm",
    "RightHand",
    "LeftShoulder",
    "LeftUpperArm",
    "LeftForeArm",
    "LeftHand",
    "RightUpperLeg",
    "RightLowerLeg",
    "RightFoot",
    "LeftUpperLeg",
    "LeftLowerLeg",
    "LeftFoot",
];

/// Body segments of the biomechanical model, in driver order
pub const DEFAULT_LINK_LABELS: [&str; 23] = [
    "Pelvis",
    "L5",
    "L3",
    "T12",
    "T8",
    "Neck",
    "Head",
    "RightShoulder",
    "RightUpperArm",
    "RightForeArm",
    "RightHand",
    "LeftShoulder",
    "LeftUpperArm",
    "LeftForeArm",
    "LeftHand",
    "RightUpperLeg",
    "RightLowerLeg",
    "RightFoot",
    "RightToe",
    "LeftUpperLeg",
    "LeftLowerLeg",
    "LeftFoot",
    "LeftToe",
];

/// Joints of the biomechanical model, in driver order
pub const DEFAULT_JOINT_LABELS: [&str; 22] = [
    "jL5S1",
    "jL4L3",
    "jL1T12",
    "jT9T8",
    "jT1C7",
    "jC1Head",
    "jRightT4Shoulder",
    "jRightShoulder",
    "jRightElbow",
    "jRightWrist",
    "jLeftT4Shoulder",
    "jLeftShoulder",
    "jLeftElbow",
    "jLeftWrist",
    "jRightHip",
    "jRightKnee",
    "jRightAnkle",
    "jRightBallFoot",
    "jLeftHip",
    "jLeftKnee",
    "jLeftAnkle",
    "jLeftBallFoot",
];

/// Calibration routines the simulated suit accepts
pub const DEFAULT_CALIBRATION_TYPES: [&str; 4] = ["Npose", "Tpose", "NposeWalk", "TposeWalk"];

fn to_strings(labels: &[&str]) -> Vec<String> {
    labels.iter().map(|s| s.to_string()).collect()
}

fn default_sensor_labels() -> Vec<String> {
    to_strings(&DEFAULT_SENSOR_LABELS)
}
fn default_link_labels() -> Vec<String> {
    to_strings(&DEFAULT_LINK_LABELS)
}
fn default_joint_labels() -> Vec<String> {
    to_strings(&DEFAULT_JOINT_LABELS)
}
fn default_calibration_types() -> Vec<String> {
    to_strings(&DEFAULT_CALIBRATION_TYPES)
}
fn default_sample_rate_hz() -> f64 {
    60.0
}
fn default_true() -> bool {
    true
}
fn default_calibration_quality() -> CalibrationQuality {
    CalibrationQuality::Good
}
fn default_sway_amplitude() -> f64 {
    0.05
}
fn default_sway_frequency_hz() -> f64 {
    0.5
}
fn default_noise_stddev() -> f64 {
    0.001
}

/// Simulated suit parameters (`[driver.mock]`)
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct MockSuitConfig {
    #[serde(default = "default_sensor_labels")]
    pub sensor_labels: Vec<String>,

    #[serde(default = "default_link_labels")]
    pub link_labels: Vec<String>,

    #[serde(default = "default_joint_labels")]
    pub joint_labels: Vec<String>,

    /// Snapshot rate while acquiring
    #[serde(default = "default_sample_rate_hz")]
    pub sample_rate_hz: f64,

    /// Noise seed; 0 = random each run
    #[serde(default)]
    pub random_seed: u64,

    /// Whether the scan finds a suit at all
    #[serde(default = "default_true")]
    pub suit_present: bool,

    /// Simulated time until the suit shows up during a scan
    #[serde(default)]
    pub scan_duration_ms: u64,

    /// Accepted calibration routines
    #[serde(default = "default_calibration_types")]
    pub calibration_types: Vec<String>,

    /// Grade every calibration ends with
    #[serde(default = "default_calibration_quality")]
    pub calibration_quality: CalibrationQuality,

    /// Amplitude of the synthetic body sway (m)
    #[serde(default = "default_sway_amplitude")]
    pub sway_amplitude: f64,

    #[serde(default = "default_sway_frequency_hz")]
    pub sway_frequency_hz: f64,

    /// Measurement noise: per-axis error (m, m/s², a.u.) and orientation jitter (rad)
    #[serde(default = "default_noise_stddev")]
    pub noise_stddev: f64,
}

impl Default for MockSuitConfig {
    fn default() -> Self {
        Self {
            sensor_labels: default_sensor_labels(),
            link_labels: default_link_labels(),
            joint_labels: default_joint_labels(),
            sample_rate_hz: default_sample_rate_hz(),
            random_seed: 0,
            suit_present: true,
            scan_duration_ms: 0,
            calibration_types: default_calibration_types(),
            calibration_quality: default_calibration_quality(),
            sway_amplitude: default_sway_amplitude(),
            sway_frequency_hz: default_sway_frequency_hz(),
            noise_stddev: default_noise_stddev(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_section_uses_defaults() {
        let config: MockSuitConfig = toml::from_str("").unwrap();
        assert_eq!(config, MockSuitConfig::default());
        assert_eq!(config.sensor_labels.len(), 17);
        assert_eq!(config.link_labels.len(), 23);
        assert_eq!(config.joint_labels.len(), 22);
    }

    #[test]
    fn test_overrides() {
        let config: MockSuitConfig = toml::from_str(
            r#"
sensor-labels = ["Pelvis", "Head"]
suit-present = false
calibration-quality = "Failed"
sample-rate-hz = 240.0
"#,
        )
        .unwrap();
        assert_eq!(config.sensor_labels, vec!["Pelvis", "Head"]);
        assert!(!config.suit_present);
        assert_eq!(config.calibration_quality, CalibrationQuality::Failed);
        assert_eq!(config.sample_rate_hz, 240.0);
        assert_eq!(config.link_labels.len(), 23);
    }

    #[test]
    fn test_default_labels_unique() {
        for labels in [
            &DEFAULT_SENSOR_LABELS[..],
            &DEFAULT_LINK_LABELS[..],
            &DEFAULT_JOINT_LABELS[..],
        ] {
            let mut sorted = labels.to_vec();
            sorted.sort();
            sorted.dedup();
            assert_eq!(sorted.len(), labels.len());
        }
    }
}
