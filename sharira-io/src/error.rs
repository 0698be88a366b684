//! Error types for ShariraIO

/// Result type alias
pub type Result<T> = std::result::Result<T, Error>;

/// ShariraIO error types
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// I/O error
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Required configuration key absent
    #[error("Required configuration parameter <{0}> not found")]
    ConfigMissing(&'static str),

    /// Configuration could not be parsed
    #[error("Configuration error: {0}")]
    Config(String),

    /// Suit used before `open()` or after `close()`
    #[error("Suit driver not available")]
    DriverUnavailable,

    /// `open()` called on an already active suit
    #[error("Suit already active")]
    AlreadyActive,

    /// Snapshot record at the stored index carries another sensor's name
    #[error("Driver record {index} is '{found}', expected '{expected}'")]
    DriverNameMismatch {
        /// Name the view was registered with
        expected: String,
        /// Name found in the snapshot
        found: String,
        /// Stored driver index
        index: usize,
    },

    /// Snapshot has no record at the stored index
    #[error("Driver snapshot has no record {index} for '{name}'")]
    MissingRecord {
        /// Name the view was registered with
        name: String,
        /// Stored driver index
        index: usize,
    },

    /// Same label reported twice for one capability kind
    #[error("Duplicate sensor name: {0}")]
    DuplicateSensorName(String),

    /// Driver rejected a command
    #[error("Driver command '{command}' failed: {reason}")]
    CommandFailed {
        /// Command name
        command: &'static str,
        /// Driver-provided reason
        reason: String,
    },

    /// Could not configure the driver or reach the suit
    #[error("Connection failed: {0}")]
    ConnectionFailed(String),

    /// Invalid parameter
    #[error("Invalid parameter: {0}")]
    InvalidParameter(String),

    /// No driver implementation for the configured type
    #[error("Unknown driver type: {0}")]
    UnknownDriver(String),

    /// Generic error with message
    #[error("{0}")]
    Other(String),
}

impl From<toml::de::Error> for Error {
    fn from(e: toml::de::Error) -> Self {
        Error::Config(e.to_string())
    }
}

impl Error {
    /// Shorthand for a failed driver command
    pub fn command_failed(command: &'static str, reason: impl Into<String>) -> Self {
        Error::CommandFailed {
            command,
            reason: reason.into(),
        }
    }
}
