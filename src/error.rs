//! Error types for spool-winder.
//!
//! Provides unified error handling across configuration, actuator control, and
//! command dispatch.

use core::fmt;

/// Result type alias using the library's Error type.
pub type Result<T> = core::result::Result<T, Error>;

/// Unified error type for all spool-winder operations.
#[derive(Debug, Clone, PartialEq)]
pub enum Error {
    /// Configuration parsing or validation error
    Config(ConfigError),
    /// Actuator operation error
    Motor(MotorError),
    /// Command queue error
    Command(CommandError),
}

/// Configuration-related errors.
#[derive(Debug, Clone, PartialEq)]
pub enum ConfigError {
    /// Failed to parse TOML configuration
    ParseError(heapless::String<128>),
    /// A builder was finalized without a required field
    MissingField(&'static str),
    /// Steps per revolution must be nonzero
    InvalidStepsPerRevolution(u16),
    /// Leadscrew pitch must be finite and > 0
    InvalidLeadscrewPitch(f32),
    /// Spool width must be finite and > 0
    InvalidSpoolWidth(f32),
    /// Wind pitch must be finite and nonzero (strict policy only)
    InvalidWindPitch(f32),
    /// Hysteresis must not be negative (strict policy only)
    NegativeHysteresis(f32),
    /// Hysteresis must be a finite number (strict policy only)
    NonFiniteHysteresis(f32),
    /// Hysteresis must be smaller than the spool width (strict policy only)
    HysteresisExceedsSpoolWidth {
        /// Requested hysteresis in millimeters
        hysteresis: f32,
        /// Configured spool width in millimeters
        spool_width: f32,
    },
    /// File I/O error (std only)
    #[cfg(feature = "std")]
    IoError(heapless::String<128>),
}

/// Actuator operation errors.
#[derive(Debug, Clone, PartialEq)]
pub enum MotorError {
    /// Pin operation failed
    PinError,
}

/// Command dispatch errors.
#[derive(Debug, Clone, PartialEq)]
pub enum CommandError {
    /// The pending command queue is full
    QueueFull,
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::Config(e) => write!(f, "Configuration error: {}", e),
            Error::Motor(e) => write!(f, "Motor error: {}", e),
            Error::Command(e) => write!(f, "Command error: {}", e),
        }
    }
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::ParseError(msg) => write!(f, "Parse error: {}", msg),
            ConfigError::MissingField(field) => write!(f, "{} is required", field),
            ConfigError::InvalidStepsPerRevolution(v) => {
                write!(f, "Invalid steps per revolution: {}. Must be > 0", v)
            }
            ConfigError::InvalidLeadscrewPitch(v) => {
                write!(f, "Invalid leadscrew pitch: {} mm. Must be > 0", v)
            }
            ConfigError::InvalidSpoolWidth(v) => {
                write!(f, "Invalid spool width: {} mm. Must be > 0", v)
            }
            ConfigError::InvalidWindPitch(v) => {
                write!(f, "Invalid wind pitch: {} mm/rev. Must be nonzero", v)
            }
            ConfigError::NegativeHysteresis(v) => {
                write!(f, "Invalid hysteresis: {} mm. Must be >= 0", v)
            }
            ConfigError::NonFiniteHysteresis(v) => {
                write!(f, "Invalid hysteresis: {} mm. Must be finite", v)
            }
            ConfigError::HysteresisExceedsSpoolWidth { hysteresis, spool_width } => {
                write!(
                    f,
                    "Hysteresis {} mm must be smaller than spool width {} mm",
                    hysteresis, spool_width
                )
            }
            #[cfg(feature = "std")]
            ConfigError::IoError(msg) => write!(f, "I/O error: {}", msg),
        }
    }
}

impl fmt::Display for MotorError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MotorError::PinError => write!(f, "GPIO pin operation failed"),
        }
    }
}

impl fmt::Display for CommandError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CommandError::QueueFull => write!(f, "Command queue is full"),
        }
    }
}

// Conversion impls
impl From<ConfigError> for Error {
    fn from(e: ConfigError) -> Self {
        Error::Config(e)
    }
}

impl From<MotorError> for Error {
    fn from(e: MotorError) -> Self {
        Error::Motor(e)
    }
}

impl From<CommandError> for Error {
    fn from(e: CommandError) -> Self {
        Error::Command(e)
    }
}

#[cfg(feature = "std")]
impl std::error::Error for Error {}

#[cfg(feature = "std")]
impl std::error::Error for ConfigError {}

#[cfg(feature = "std")]
impl std::error::Error for MotorError {}

#[cfg(feature = "std")]
impl std::error::Error for CommandError {}
