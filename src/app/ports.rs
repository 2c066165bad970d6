//! Port traits: the boundary between indicator logic and the outside world.
//!
//! ```text
//!   Adapter ──▶ Port trait ──▶ controller / loops (domain)
//! ```
//!
//! The radar sensing engine, the LED channels and configuration storage are
//! all reached through these traits, so the domain code runs unchanged on
//! the host against mocks and on the device against real peripherals.

use crate::config::IndicatorConfig;
use crate::error::{OutputError, SensingError};
use crate::events::CounterEventInfo;
use crate::indicator::colour::Colour;

/// Longest parameter value the engine reports or accepts.
pub const PARAM_VALUE_MAX: usize = 256;

/// Fixed-capacity parameter value.
pub type ParamValue = heapless::String<PARAM_VALUE_MAX>;

// ───────────────────────────────────────────────────────────────
// Sensing port (driven adapter: radar engine → domain)
// ───────────────────────────────────────────────────────────────

/// Frame-by-frame access to the sensing engine.
pub trait SensingPort {
    /// Bring the engine up. Fails with
    /// [`SensingError::NotConnected`] when no radar answers.
    fn init(&mut self) -> Result<(), SensingError>;

    /// Pull and classify the next frame. Yields zero or one event.
    fn process(&mut self, now_ms: u64) -> Result<Option<CounterEventInfo>, SensingError>;
}

/// String-typed engine parameters. Parsing and range checks belong to the
/// engine; callers only pass text through.
pub trait ParameterPort {
    fn get_parameter(&self, key: &str) -> Result<ParamValue, SensingError>;

    fn set_parameter(&mut self, key: &str, value: &str) -> Result<(), SensingError>;
}

// ───────────────────────────────────────────────────────────────
// Output port (driven adapter: domain → indicator channels)
// ───────────────────────────────────────────────────────────────

/// The three binary indicator channels.
pub trait OutputPort {
    /// Drive red, green and blue together to `colour`.
    fn set_colour(&mut self, colour: Colour) -> Result<(), OutputError>;
}

// ───────────────────────────────────────────────────────────────
// Configuration port
// ───────────────────────────────────────────────────────────────

/// Loads system configuration.
///
/// Implementations must validate before returning; an invalid stored
/// config is an error, not something to clamp.
pub trait ConfigPort {
    fn load(&self) -> Result<IndicatorConfig, ConfigError>;
}

// ───────────────────────────────────────────────────────────────
// Error types
// ───────────────────────────────────────────────────────────────

/// Errors from [`ConfigPort`] operations.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConfigError {
    /// No config found (first boot).
    NotFound,
    /// Stored config failed to deserialize.
    Corrupted,
    /// A config field failed range validation.
    /// The `&'static str` describes which field and why.
    ValidationFailed(&'static str),
    /// Generic I/O error from the storage backend.
    IoError,
}

impl core::fmt::Display for ConfigError {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            Self::NotFound => write!(f, "config not found"),
            Self::Corrupted => write!(f, "config corrupted"),
            Self::ValidationFailed(msg) => write!(f, "validation failed: {}", msg),
            Self::IoError => write!(f, "I/O error"),
        }
    }
}

impl std::error::Error for ConfigError {}
