//! Synthetic body motion for the mock suit
//!
//! Every body part sways sinusoidally along X with a small yaw oscillation.
//! Each label gets its own height and phase from its position in the label
//! list, so records are distinguishable and velocities / accelerations are the
//! exact derivatives of the generated poses (before noise).
//!
//! ```text
//! x(t)   = A sin(ωt + φ)          yaw(t) = Y sin(ωt + φ)
//! ẋ(t)   = Aω cos(ωt + φ)         ω_z(t) = Yω cos(ωt + φ)
//! ẍ(t)   = -Aω² sin(ωt + φ)       α_z(t) = -Yω² sin(ωt + φ)
//! ```

use super::config::MockSuitConfig;
use super::noise::MeasurementNoise;
use crate::core::driver::{DriverTimeStamps, JointData, LinkData, SensorData};
use crate::core::types::{Quaternion, Vector3};
use std::f64::consts::TAU;

/// Peak yaw of the sway (rad)
const YAW_AMPLITUDE: f64 = 0.2;

/// Vertical spacing between consecutive body parts (m)
const HEIGHT_STEP: f64 = 0.08;

/// Phase offset between consecutive body parts (rad)
const PHASE_STEP: f64 = 0.3;

/// Peak joint angles per axis (rad)
const JOINT_AMPLITUDE: Vector3 = [0.1, 0.3, 0.05];

/// Horizontal earth field in the world frame (normalized a.u.)
const EARTH_FIELD: Vector3 = [0.45, 0.0, -0.9];

/// One generated cycle of every stream
#[derive(Debug, Clone, Default)]
pub struct MockFrame {
    pub timestamps: DriverTimeStamps,
    pub sensors: Vec<SensorData>,
    pub links: Vec<LinkData>,
    pub joints: Vec<JointData>,
}

/// Kinematic state of one body part at one instant
struct PartState {
    position: Vector3,
    orientation: Quaternion,
    yaw: f64,
    linear_velocity: Vector3,
    angular_velocity: Vector3,
    linear_acceleration: Vector3,
    angular_acceleration: Vector3,
}

/// Generates [`MockFrame`]s for a fixed set of labels
pub struct MotionModel {
    amplitude: f64,
    omega: f64,
    noise: MeasurementNoise,
}

impl MotionModel {
    pub fn new(config: &MockSuitConfig) -> Self {
        Self {
            amplitude: config.sway_amplitude,
            omega: TAU * config.sway_frequency_hz,
            noise: MeasurementNoise::from_config(config),
        }
    }

    /// Generate the frame at `relative_time` seconds after acquisition start
    pub fn frame(
        &mut self,
        timestamps: DriverTimeStamps,
        config: &MockSuitConfig,
    ) -> MockFrame {
        let t = timestamps.relative_time;

        let sensors = config
            .sensor_labels
            .iter()
            .enumerate()
            .map(|(i, label)| self.sensor_record(label, i, t))
            .collect();

        let links = config
            .link_labels
            .iter()
            .enumerate()
            .map(|(i, label)| self.link_record(label, i, t))
            .collect();

        let joints = config
            .joint_labels
            .iter()
            .enumerate()
            .map(|(i, label)| self.joint_record(label, i, t))
            .collect();

        MockFrame {
            timestamps,
            sensors,
            links,
            joints,
        }
    }

    fn part_state(&self, index: usize, t: f64) -> PartState {
        let phase = self.omega * t + PHASE_STEP * index as f64;
        let (s, c) = phase.sin_cos();
        let a = self.amplitude;
        let w = self.omega;

        let yaw = YAW_AMPLITUDE * s;
        PartState {
            position: [a * s, 0.0, HEIGHT_STEP * index as f64],
            orientation: yaw_quaternion(yaw),
            yaw,
            linear_velocity: [a * w * c, 0.0, 0.0],
            angular_velocity: [0.0, 0.0, YAW_AMPLITUDE * w * c],
            linear_acceleration: [-a * w * w * s, 0.0, 0.0],
            angular_acceleration: [0.0, 0.0, -YAW_AMPLITUDE * w * w * s],
        }
    }

    fn sensor_record(&mut self, label: &str, index: usize, t: f64) -> SensorData {
        let state = self.part_state(index, t);
        // World field seen from a frame rotated by yaw
        let (sy, cy) = state.yaw.sin_cos();
        let field = [
            cy * EARTH_FIELD[0] + sy * EARTH_FIELD[1],
            -sy * EARTH_FIELD[0] + cy * EARTH_FIELD[1],
            EARTH_FIELD[2],
        ];

        SensorData {
            name: label.to_string(),
            free_body_acceleration: self.noise.perturb(state.linear_acceleration),
            position: self.noise.perturb(state.position),
            orientation: self.noise.perturb_orientation(state.orientation),
            magnetic_field: self.noise.perturb(field),
        }
    }

    fn link_record(&mut self, label: &str, index: usize, t: f64) -> LinkData {
        let state = self.part_state(index, t);
        LinkData {
            name: label.to_string(),
            position: self.noise.perturb(state.position),
            orientation: self.noise.perturb_orientation(state.orientation),
            linear_velocity: self.noise.perturb(state.linear_velocity),
            angular_velocity: state.angular_velocity,
            linear_acceleration: self.noise.perturb(state.linear_acceleration),
            angular_acceleration: state.angular_acceleration,
        }
    }

    fn joint_record(&mut self, label: &str, index: usize, t: f64) -> JointData {
        let phase = self.omega * t + PHASE_STEP * index as f64;
        let (s, c) = phase.sin_cos();
        let w = self.omega;
        let angles = JOINT_AMPLITUDE.map(|amp| amp * s);
        let velocities = JOINT_AMPLITUDE.map(|amp| amp * w * c);
        let accelerations = JOINT_AMPLITUDE.map(|amp| -amp * w * w * s);

        JointData {
            name: label.to_string(),
            angles: self.noise.perturb(angles),
            velocities,
            accelerations,
        }
    }
}

/// Rotation about Z as a (w, x, y, z) quaternion
fn yaw_quaternion(yaw: f64) -> Quaternion {
    let (s, c) = (yaw / 2.0).sin_cos();
    [c, 0.0, 0.0, s]
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn quiet_config() -> MockSuitConfig {
        MockSuitConfig {
            sensor_labels: vec!["Pelvis".into(), "Head".into()],
            link_labels: vec!["Pelvis".into(), "L5".into(), "L3".into()],
            joint_labels: vec!["jL5S1".into()],
            noise_stddev: 0.0,
            random_seed: 7,
            ..MockSuitConfig::default()
        }
    }

    fn at(t: f64) -> DriverTimeStamps {
        DriverTimeStamps {
            system_time: 1000.0 + t,
            relative_time: t,
        }
    }

    #[test]
    fn test_frame_follows_label_order() {
        let config = quiet_config();
        let mut model = MotionModel::new(&config);
        let frame = model.frame(at(0.0), &config);

        let names: Vec<_> = frame.sensors.iter().map(|r| r.name.as_str()).collect();
        assert_eq!(names, vec!["Pelvis", "Head"]);
        assert_eq!(frame.links.len(), 3);
        assert_eq!(frame.links[2].name, "L3");
        assert_eq!(frame.joints[0].name, "jL5S1");
        assert_eq!(frame.timestamps, at(0.0));
    }

    #[test]
    fn test_parts_stacked_by_index() {
        let config = quiet_config();
        let mut model = MotionModel::new(&config);
        let frame = model.frame(at(0.0), &config);

        assert_relative_eq!(frame.links[0].position[2], 0.0);
        assert_relative_eq!(frame.links[1].position[2], HEIGHT_STEP);
        assert_relative_eq!(frame.links[2].position[2], 2.0 * HEIGHT_STEP);
    }

    #[test]
    fn test_orientation_is_unit_quaternion() {
        let config = quiet_config();
        let mut model = MotionModel::new(&config);

        for t in [0.0, 0.25, 0.8, 3.1] {
            let frame = model.frame(at(t), &config);
            for link in &frame.links {
                let q = link.orientation;
                let norm = (q[0] * q[0] + q[1] * q[1] + q[2] * q[2] + q[3] * q[3]).sqrt();
                assert_relative_eq!(norm, 1.0, epsilon = 1e-12);
            }
        }
    }

    #[test]
    fn test_velocity_matches_position_derivative() {
        let config = quiet_config();
        let mut model = MotionModel::new(&config);
        let dt = 1e-6;

        let before = model.frame(at(0.4), &config);
        let after = model.frame(at(0.4 + dt), &config);

        let numeric = (after.links[1].position[0] - before.links[1].position[0]) / dt;
        assert_relative_eq!(numeric, before.links[1].linear_velocity[0], epsilon = 1e-4);
    }

    #[test]
    fn test_magnetic_field_magnitude_constant() {
        let config = quiet_config();
        let mut model = MotionModel::new(&config);
        let expected = (EARTH_FIELD[0].powi(2) + EARTH_FIELD[2].powi(2)).sqrt();

        for t in [0.0, 0.5, 1.7] {
            let frame = model.frame(at(t), &config);
            let m = frame.sensors[1].magnetic_field;
            let norm = (m[0] * m[0] + m[1] * m[1] + m[2] * m[2]).sqrt();
            assert_relative_eq!(norm, expected, epsilon = 1e-12);
        }
    }
}
