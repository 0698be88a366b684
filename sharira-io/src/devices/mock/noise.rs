//! Measurement noise of the simulated suit
//!
//! Every noisy channel of a frame draws from one seeded stream, so a fixed
//! `random-seed` reproduces the same frames. Vectors get independent
//! zero-mean Gaussian error per axis; orientations are rotated by a small
//! random angle and stay unit quaternions.

use super::config::MockSuitConfig;
use crate::core::types::{Quaternion, Vector3};
use rand::prelude::*;
use rand::rngs::SmallRng;
use rand_distr::StandardNormal;

/// Seeded Gaussian measurement error with a fixed standard deviation
#[derive(Clone)]
pub struct MeasurementNoise {
    rng: SmallRng,
    stddev: f64,
}

impl MeasurementNoise {
    /// `seed == 0` draws from entropy instead of a reproducible stream.
    pub fn new(seed: u64, stddev: f64) -> Self {
        let rng = if seed == 0 {
            SmallRng::from_entropy()
        } else {
            SmallRng::seed_from_u64(seed)
        };
        Self { rng, stddev }
    }

    pub fn from_config(config: &MockSuitConfig) -> Self {
        Self::new(config.random_seed, config.noise_stddev)
    }

    pub fn is_silent(&self) -> bool {
        self.stddev == 0.0
    }

    fn sample(&mut self) -> f64 {
        if self.is_silent() {
            return 0.0;
        }
        let n: f64 = self.rng.sample(StandardNormal);
        n * self.stddev
    }

    /// Add independent error to each axis
    pub fn perturb(&mut self, v: Vector3) -> Vector3 {
        v.map(|x| x + self.sample())
    }

    /// Rotate a (w, x, y, z) orientation by a small random body-frame angle
    pub fn perturb_orientation(&mut self, q: Quaternion) -> Quaternion {
        if self.is_silent() {
            return q;
        }

        // Small-angle rotation [1, θ/2] composed on the right
        let [dx, dy, dz] = [0.0; 3].map(|_: f64| self.sample() / 2.0);
        let [w, x, y, z] = q;
        let rotated = [
            w - x * dx - y * dy - z * dz,
            w * dx + x + y * dz - z * dy,
            w * dy - x * dz + y + z * dx,
            w * dz + x * dy - y * dx + z,
        ];

        let norm = rotated.iter().map(|c| c * c).sum::<f64>().sqrt();
        rotated.map(|c| c / norm)
    }
}
