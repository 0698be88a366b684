//! Configuration for ShariraIO
//!
//! Loads the suit configuration from a TOML file. Keys follow the suit vendor
//! naming (kebab-case); only `xsens-rundeps-dir` and `suit-config` are
//! required. Every optional key falls back to a documented default, and an
//! optional key that is present but unusable is logged and replaced by its
//! default rather than failing the load.
//!
//! ```toml
//! xsens-rundeps-dir = "/opt/xsens/rundeps"
//! suit-config = "FullBody"
//! acquisition-scenario = "Single"
//! default-calibration-type = "Npose"
//! minimum-calibration-quality-required = "Good"
//! scan-timeout = 10
//!
//! [body-dimensions]
//! bodyHeight = 1.80
//! footSize = 0.27
//!
//! [output-stream-configuration]
//! enable-joint-data = true
//!
//! [driver]
//! type = "mock"
//! ```

use crate::core::driver::{
    BodyDimensions, CalibrationQuality, DataStreamConfig, DriverConfiguration,
    is_allowed_body_dimension,
};
use crate::devices::mock::MockSuitConfig;
use crate::error::{Error, Result};
use serde::Deserialize;
use std::fs;
use std::path::Path;
use std::time::Duration;
use toml::Value;

/// Suit namespace used when `wearable-name` is not configured
pub const DEFAULT_WEARABLE_NAME: &str = "XsensSuit_";

/// Driver used when no `[driver]` section is given
pub const DEFAULT_DRIVER_TYPE: &str = "mock";

const KEY_RUNDEPS_DIR: &str = "xsens-rundeps-dir";
const KEY_SUIT_CONFIG: &str = "suit-config";
const KEY_ACQUISITION_SCENARIO: &str = "acquisition-scenario";
const KEY_DEFAULT_CALIBRATION: &str = "default-calibration-type";
const KEY_MIN_CALIBRATION_QUALITY: &str = "minimum-calibration-quality-required";
const KEY_SCAN_TIMEOUT: &str = "scan-timeout";
const KEY_WEARABLE_NAME: &str = "wearable-name";
const GROUP_BODY_DIMENSIONS: &str = "body-dimensions";
const GROUP_OUTPUT_STREAMS: &str = "output-stream-configuration";

fn default_driver_type() -> String {
    DEFAULT_DRIVER_TYPE.to_string()
}

/// Driver selection and driver-specific parameters (`[driver]`)
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct DriverSection {
    /// Driver implementation (`"mock"`)
    #[serde(rename = "type", default = "default_driver_type")]
    pub driver_type: String,
    /// Parameters of the simulated suit
    #[serde(default)]
    pub mock: MockSuitConfig,
}

impl Default for DriverSection {
    fn default() -> Self {
        Self {
            driver_type: default_driver_type(),
            mock: MockSuitConfig::default(),
        }
    }
}

/// Configuration document as written, before validation.
///
/// Suit keys stay untyped so a bad optional value can be reported and
/// replaced by its default instead of rejecting the whole file.
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "kebab-case")]
struct RawSuitConfig {
    xsens_rundeps_dir: Option<Value>,
    suit_config: Option<Value>,
    acquisition_scenario: Option<Value>,
    default_calibration_type: Option<Value>,
    minimum_calibration_quality_required: Option<Value>,
    scan_timeout: Option<Value>,
    wearable_name: Option<Value>,
    body_dimensions: Option<Value>,
    output_stream_configuration: Option<Value>,
    driver: Option<DriverSection>,
}

/// Validated suit configuration consumed at activation
#[derive(Debug, Clone, PartialEq)]
pub struct SuitConfig {
    /// Vendor runtime dependencies folder
    pub rundeps_dir: String,
    /// Suit hardware configuration (e.g. `FullBody`, `LowerBody`)
    pub suit_configuration: String,
    /// Acquisition scenario; empty selects the driver default
    pub acquisition_scenario: String,
    /// Calibration routine used when `calibrate("")` is requested
    pub default_calibration_type: String,
    /// Calibrations graded worse than this are rejected
    pub minimum_calibration_quality: CalibrationQuality,
    /// Suit scan timeout; `None` scans endlessly
    pub scan_timeout: Option<Duration>,
    /// Subject body dimensions (allow-listed keys only)
    pub body_dimensions: BodyDimensions,
    /// Snapshot streams to enable
    pub output_streams: DataStreamConfig,
    /// Namespace prepended to every sensor name
    pub wearable_name: String,
    pub driver: DriverSection,
}

impl SuitConfig {
    /// Configuration with the two required values and defaults elsewhere
    pub fn new(rundeps_dir: impl Into<String>, suit_configuration: impl Into<String>) -> Self {
        Self {
            rundeps_dir: rundeps_dir.into(),
            suit_configuration: suit_configuration.into(),
            acquisition_scenario: String::new(),
            default_calibration_type: String::new(),
            minimum_calibration_quality: CalibrationQuality::Poor,
            scan_timeout: None,
            body_dimensions: BodyDimensions::new(),
            output_streams: DataStreamConfig::default(),
            wearable_name: DEFAULT_WEARABLE_NAME.to_string(),
            driver: DriverSection::default(),
        }
    }

    /// Load configuration from TOML file
    ///
    /// # Example
    /// ```no_run
    /// use sharira_io::config::SuitConfig;
    ///
    /// let config = SuitConfig::load("sharira.toml")?;
    /// # Ok::<(), Box<dyn std::error::Error>>(())
    /// ```
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let contents = fs::read_to_string(path)?;
        Self::from_toml_str(&contents)
    }

    /// Parse configuration from a TOML document
    pub fn from_toml_str(contents: &str) -> Result<Self> {
        let raw: RawSuitConfig = toml::from_str(contents)?;
        Self::from_raw(raw)
    }

    fn from_raw(raw: RawSuitConfig) -> Result<Self> {
        let rundeps_dir = required_string(raw.xsens_rundeps_dir.as_ref(), KEY_RUNDEPS_DIR)?;
        let suit_configuration = required_string(raw.suit_config.as_ref(), KEY_SUIT_CONFIG)?;

        let mut config = Self::new(rundeps_dir, suit_configuration);
        config.acquisition_scenario =
            optional_string(raw.acquisition_scenario.as_ref(), KEY_ACQUISITION_SCENARIO, "");
        config.default_calibration_type =
            optional_string(raw.default_calibration_type.as_ref(), KEY_DEFAULT_CALIBRATION, "");
        config.minimum_calibration_quality =
            parse_calibration_quality(raw.minimum_calibration_quality_required.as_ref());
        config.scan_timeout = parse_scan_timeout(raw.scan_timeout.as_ref());
        config.body_dimensions = parse_body_dimensions(raw.body_dimensions.as_ref());
        config.output_streams = parse_output_streams(raw.output_stream_configuration.as_ref());
        config.wearable_name = optional_string(
            raw.wearable_name.as_ref(),
            KEY_WEARABLE_NAME,
            DEFAULT_WEARABLE_NAME,
        );
        config.driver = raw.driver.unwrap_or_else(|| {
            log::info!("No <driver> group, using {} driver", DEFAULT_DRIVER_TYPE);
            DriverSection::default()
        });

        Ok(config)
    }

    /// Configuration forwarded to the driver
    pub fn driver_configuration(&self) -> DriverConfiguration {
        DriverConfiguration {
            rundeps_dir: self.rundeps_dir.clone(),
            suit_configuration: self.suit_configuration.clone(),
            acquisition_scenario: self.acquisition_scenario.clone(),
            default_calibration_type: self.default_calibration_type.clone(),
            minimum_calibration_quality: self.minimum_calibration_quality,
            scan_timeout: self.scan_timeout,
            body_dimensions: self.body_dimensions.clone(),
            data_streams: self.output_streams,
        }
    }
}

fn required_string(value: Option<&Value>, key: &'static str) -> Result<String> {
    match value {
        Some(Value::String(s)) => Ok(s.clone()),
        Some(other) => Err(Error::Config(format!(
            "required parameter <{}> must be a string, got {}",
            key,
            other.type_str()
        ))),
        None => {
            log::error!("REQUIRED parameter <{}> NOT found", key);
            Err(Error::ConfigMissing(key))
        }
    }
}

fn optional_string(value: Option<&Value>, key: &str, default: &str) -> String {
    match value {
        Some(Value::String(s)) => s.clone(),
        Some(other) => {
            log::warn!(
                "OPTIONAL parameter <{}> INVALID ({}), using \"{}\"",
                key,
                other.type_str(),
                default
            );
            default.to_string()
        }
        None => {
            log::warn!("OPTIONAL parameter <{}> NOT found, using \"{}\"", key, default);
            default.to_string()
        }
    }
}

fn parse_calibration_quality(value: Option<&Value>) -> CalibrationQuality {
    let fallback = CalibrationQuality::Poor;
    match value {
        Some(Value::String(label)) => match label.parse() {
            Ok(quality) => quality,
            Err(_) => {
                log::warn!(
                    "OPTIONAL parameter <{}> INVALID ('{}'), using {} as minimum required calibration quality",
                    KEY_MIN_CALIBRATION_QUALITY,
                    label,
                    fallback
                );
                fallback
            }
        },
        Some(other) => {
            log::warn!(
                "OPTIONAL parameter <{}> INVALID ({}), using {} as minimum required calibration quality",
                KEY_MIN_CALIBRATION_QUALITY,
                other.type_str(),
                fallback
            );
            fallback
        }
        None => {
            log::warn!(
                "OPTIONAL parameter <{}> NOT found, using {} as minimum required calibration quality",
                KEY_MIN_CALIBRATION_QUALITY,
                fallback
            );
            fallback
        }
    }
}

fn parse_scan_timeout(value: Option<&Value>) -> Option<Duration> {
    let timeout = match value {
        // -1 is the vendor sentinel for endless scan
        Some(Value::Integer(-1)) => return None,
        Some(Value::Integer(secs)) if *secs >= 0 => Some(Duration::from_secs(*secs as u64)),
        Some(Value::Float(secs)) => Duration::try_from_secs_f64(*secs).ok(),
        Some(_) => None,
        None => {
            log::warn!(
                "OPTIONAL parameter <{}> NOT found, endless scan mode ENABLED",
                KEY_SCAN_TIMEOUT
            );
            return None;
        }
    };

    if let (None, Some(other)) = (timeout, value) {
        log::warn!(
            "OPTIONAL parameter <{}> INVALID ({}), endless scan mode ENABLED",
            KEY_SCAN_TIMEOUT,
            other
        );
    }
    timeout
}

fn parse_body_dimensions(value: Option<&Value>) -> BodyDimensions {
    let mut dimensions = BodyDimensions::new();

    let group = match value {
        Some(Value::Table(group)) => group,
        Some(_) => {
            log::warn!(
                "OPTIONAL parameter group <{}> INVALID, using default body dimensions",
                GROUP_BODY_DIMENSIONS
            );
            return dimensions;
        }
        None => {
            log::warn!(
                "OPTIONAL parameter group <{}> NOT found, using default body dimensions, this may affect estimation quality",
                GROUP_BODY_DIMENSIONS
            );
            return dimensions;
        }
    };

    for (name, value) in group {
        if !is_allowed_body_dimension(name) {
            log::warn!("Ignoring unsupported body dimension <{}>", name);
            continue;
        }
        let meters = match value {
            Value::Float(f) => *f,
            Value::Integer(i) => *i as f64,
            other => {
                log::warn!(
                    "Ignoring body dimension <{}>: expected a number, got {}",
                    name,
                    other.type_str()
                );
                continue;
            }
        };
        dimensions.insert(name.clone(), meters);
    }

    dimensions
}

fn parse_output_streams(value: Option<&Value>) -> DataStreamConfig {
    let defaults = DataStreamConfig::default();

    let group = match value {
        Some(Value::Table(group)) => group,
        _ => {
            log::warn!(
                "OPTIONAL parameters group <{}> NOT found, using default configuration, Joints: OFF, Links: ON, Sensors: ON",
                GROUP_OUTPUT_STREAMS
            );
            return defaults;
        }
    };

    let flag = |key: &str, default: bool| match group.get(key) {
        Some(Value::Boolean(b)) => *b,
        Some(other) => {
            log::warn!(
                "OPTIONAL parameter <{}> INVALID ({}), using {}",
                key,
                other.type_str(),
                default
            );
            default
        }
        None => default,
    };

    DataStreamConfig {
        enable_joint_data: flag("enable-joint-data", defaults.enable_joint_data),
        enable_link_data: flag("enable-link-data", defaults.enable_link_data),
        enable_sensor_data: flag("enable-sensor-data", defaults.enable_sensor_data),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    const FULL: &str = r#"
xsens-rundeps-dir = "/opt/xsens/rundeps"
suit-config = "FullBody"
acquisition-scenario = "Single"
default-calibration-type = "Npose"
minimum-calibration-quality-required = "Good"
scan-timeout = 10
wearable-name = "Lab_"

[body-dimensions]
bodyHeight = 1.80
footSize = 0.27
wingSpan = 2.0

[output-stream-configuration]
enable-joint-data = true
enable-link-data = false

[driver]
type = "mock"

[driver.mock]
sample-rate-hz = 120.0
random-seed = 7
"#;

    #[test]
    fn test_full_config() {
        let config = SuitConfig::from_toml_str(FULL).unwrap();
        assert_eq!(config.rundeps_dir, "/opt/xsens/rundeps");
        assert_eq!(config.suit_configuration, "FullBody");
        assert_eq!(config.acquisition_scenario, "Single");
        assert_eq!(config.default_calibration_type, "Npose");
        assert_eq!(config.minimum_calibration_quality, CalibrationQuality::Good);
        assert_eq!(config.scan_timeout, Some(Duration::from_secs(10)));
        assert_eq!(config.wearable_name, "Lab_");

        assert_eq!(config.body_dimensions.len(), 2);
        assert_eq!(config.body_dimensions["bodyHeight"], 1.80);
        assert_eq!(config.body_dimensions["footSize"], 0.27);
        assert!(!config.body_dimensions.contains_key("wingSpan"));

        assert!(config.output_streams.enable_joint_data);
        assert!(!config.output_streams.enable_link_data);
        assert!(config.output_streams.enable_sensor_data);

        assert_eq!(config.driver.driver_type, "mock");
        assert_eq!(config.driver.mock.sample_rate_hz, 120.0);
        assert_eq!(config.driver.mock.random_seed, 7);
    }

    #[test]
    fn test_minimal_config_defaults() {
        let config = SuitConfig::from_toml_str(
            r#"
xsens-rundeps-dir = "rundeps"
suit-config = "FullBody"
"#,
        )
        .unwrap();

        assert_eq!(config.acquisition_scenario, "");
        assert_eq!(config.default_calibration_type, "");
        assert_eq!(config.minimum_calibration_quality, CalibrationQuality::Poor);
        assert_eq!(config.scan_timeout, None);
        assert!(config.body_dimensions.is_empty());
        assert_eq!(config.output_streams, DataStreamConfig::default());
        assert_eq!(config.wearable_name, DEFAULT_WEARABLE_NAME);
        assert_eq!(config.driver, DriverSection::default());
    }

    #[test]
    fn test_missing_required_keys() {
        let err = SuitConfig::from_toml_str(r#"suit-config = "FullBody""#).unwrap_err();
        assert!(matches!(err, Error::ConfigMissing("xsens-rundeps-dir")));

        let err = SuitConfig::from_toml_str(r#"xsens-rundeps-dir = "rundeps""#).unwrap_err();
        assert!(matches!(err, Error::ConfigMissing("suit-config")));
    }

    #[test]
    fn test_invalid_quality_falls_back_to_poor() {
        let config = SuitConfig::from_toml_str(
            r#"
xsens-rundeps-dir = "rundeps"
suit-config = "FullBody"
minimum-calibration-quality-required = "Bogus"
"#,
        )
        .unwrap();
        assert_eq!(config.minimum_calibration_quality, CalibrationQuality::Poor);
    }

    #[test]
    fn test_calibration_type_independent_of_scenario() {
        let config = SuitConfig::from_toml_str(
            r#"
xsens-rundeps-dir = "rundeps"
suit-config = "FullBody"
default-calibration-type = "Tpose"
"#,
        )
        .unwrap();
        assert_eq!(config.default_calibration_type, "Tpose");
        assert_eq!(config.acquisition_scenario, "");
    }

    #[test]
    fn test_scan_timeout_values() {
        let parse = |value: &str| {
            let doc = format!(
                "xsens-rundeps-dir = \"r\"\nsuit-config = \"s\"\nscan-timeout = {}\n",
                value
            );
            SuitConfig::from_toml_str(&doc).unwrap().scan_timeout
        };

        assert_eq!(parse("5"), Some(Duration::from_secs(5)));
        assert_eq!(parse("0.5"), Some(Duration::from_millis(500)));
        assert_eq!(parse("-1"), None);
        assert_eq!(parse("-7"), None);
        assert_eq!(parse("\"soon\""), None);
        assert_eq!(parse("1e30"), None);
        assert_eq!(parse("-2.5"), None);
        assert_eq!(parse("nan"), None);
    }

    #[test]
    fn test_invalid_optional_types_fall_back() {
        let config = SuitConfig::from_toml_str(
            r#"
xsens-rundeps-dir = "rundeps"
suit-config = "FullBody"
acquisition-scenario = 3
body-dimensions = "tall"

[output-stream-configuration]
enable-sensor-data = "yes"
enable-joint-data = true
"#,
        )
        .unwrap();
        assert_eq!(config.acquisition_scenario, "");
        assert!(config.body_dimensions.is_empty());
        assert!(config.output_streams.enable_sensor_data);
        assert!(config.output_streams.enable_joint_data);
    }

    #[test]
    fn test_wrong_type_for_required_key() {
        let err = SuitConfig::from_toml_str(
            r#"
xsens-rundeps-dir = 42
suit-config = "FullBody"
"#,
        )
        .unwrap_err();
        assert!(matches!(err, Error::Config(_)));
    }

    #[test]
    fn test_invalid_driver_section() {
        let err = SuitConfig::from_toml_str(
            r#"
xsens-rundeps-dir = "rundeps"
suit-config = "FullBody"

[driver.mock]
sample-rate-hz = "fast"
"#,
        )
        .unwrap_err();
        assert!(matches!(err, Error::Config(_)));

        let config = SuitConfig::from_toml_str(
            r#"
xsens-rundeps-dir = "rundeps"
suit-config = "FullBody"

[driver.mock]
random-seed = 3
"#,
        )
        .unwrap();
        assert_eq!(config.driver.driver_type, DEFAULT_DRIVER_TYPE);
        assert_eq!(config.driver.mock.random_seed, 3);
    }

    #[test]
    fn test_syntax_error() {
        let err = SuitConfig::from_toml_str("suit-config = ").unwrap_err();
        assert!(matches!(err, Error::Config(_)));
    }

    #[test]
    fn test_driver_configuration_forwarding() {
        let config = SuitConfig::from_toml_str(FULL).unwrap();
        let driver = config.driver_configuration();
        assert_eq!(driver.rundeps_dir, config.rundeps_dir);
        assert_eq!(driver.suit_configuration, "FullBody");
        assert_eq!(driver.default_calibration_type, "Npose");
        assert_eq!(driver.minimum_calibration_quality, CalibrationQuality::Good);
        assert_eq!(driver.body_dimensions, config.body_dimensions);
        assert_eq!(driver.data_streams, config.output_streams);
    }

    #[test]
    fn test_load_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(FULL.as_bytes()).unwrap();

        let config = SuitConfig::load(file.path()).unwrap();
        assert_eq!(config.suit_configuration, "FullBody");

        assert!(matches!(
            SuitConfig::load("/nonexistent/sharira.toml"),
            Err(Error::Io(_))
        ));
    }
}
