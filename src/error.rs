//! Unified error types for the entrance indicator firmware.
//!
//! One `Error` enum that every subsystem converts into, so `main` can
//! report any fatal fault the same way. All variants are `Copy`.

use core::fmt;

use crate::app::ports::ConfigError;
use crate::drivers::hw_init::HwInitError;

// ---------------------------------------------------------------------------
// Top-level firmware error
// ---------------------------------------------------------------------------

/// Every fallible operation in the firmware funnels into this type.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Error {
    /// Driving the indicator channels failed.
    Output(OutputError),
    /// The sensing engine rejected a request or failed to process a frame.
    Sensing(SensingError),
    /// Peripheral initialisation failed.
    Init(HwInitError),
    /// A configuration file exists but could not be used.
    Config(ConfigError),
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Output(e) => write!(f, "output: {e}"),
            Self::Sensing(e) => write!(f, "sensing: {e}"),
            Self::Init(e) => write!(f, "init: {e}"),
            Self::Config(e) => write!(f, "config: {e}"),
        }
    }
}

impl std::error::Error for Error {}

// ---------------------------------------------------------------------------
// Output errors
// ---------------------------------------------------------------------------

/// A write to one of the three indicator channels failed.
///
/// There is no retry policy: the render task treats any of these as fatal.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputError {
    RedWriteFailed,
    GreenWriteFailed,
    BlueWriteFailed,
}

impl fmt::Display for OutputError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::RedWriteFailed => write!(f, "red channel write failed"),
            Self::GreenWriteFailed => write!(f, "green channel write failed"),
            Self::BlueWriteFailed => write!(f, "blue channel write failed"),
        }
    }
}

impl std::error::Error for OutputError {}

impl From<OutputError> for Error {
    fn from(e: OutputError) -> Self {
        Self::Output(e)
    }
}

// ---------------------------------------------------------------------------
// Sensing errors
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SensingError {
    /// The sensor front-end did not answer (board not connected?).
    NotConnected,
    /// Processing a frame failed.
    ProcessFailed,
    /// The parameter name is not known to the engine.
    UnknownParameter,
    /// The engine rejected the parameter value.
    InvalidValue,
    /// The value does not fit the fixed-capacity buffer.
    ValueTooLong,
}

impl fmt::Display for SensingError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NotConnected => write!(f, "sensor not connected"),
            Self::ProcessFailed => write!(f, "frame processing failed"),
            Self::UnknownParameter => write!(f, "unknown parameter"),
            Self::InvalidValue => write!(f, "invalid parameter value"),
            Self::ValueTooLong => write!(f, "parameter value too long"),
        }
    }
}

impl std::error::Error for SensingError {}

impl From<SensingError> for Error {
    fn from(e: SensingError) -> Self {
        Self::Sensing(e)
    }
}

impl From<HwInitError> for Error {
    fn from(e: HwInitError) -> Self {
        Self::Init(e)
    }
}

impl From<ConfigError> for Error {
    fn from(e: ConfigError) -> Self {
        Self::Config(e)
    }
}

// ---------------------------------------------------------------------------
// Convenience Result alias
// ---------------------------------------------------------------------------

/// Firmware-wide `Result` alias.
pub type Result<T> = core::result::Result<T, Error>;
