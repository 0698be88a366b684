//! Suit driver implementations

pub mod mock;

use crate::config::SuitConfig;
use crate::core::driver::SuitDriver;
use crate::error::{Error, Result};
use mock::MockSuitDriver;

/// Create a suit driver based on configuration
pub fn create_driver(config: &SuitConfig) -> Result<Box<dyn SuitDriver>> {
    match config.driver.driver_type.as_str() {
        "mock" => {
            let driver = MockSuitDriver::new(config.driver_configuration(), config.driver.mock.clone());
            Ok(Box::new(driver))
        }
        _ => Err(Error::UnknownDriver(config.driver.driver_type.clone())),
    }
}
