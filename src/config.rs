//! System configuration parameters
//!
//! All tunable parameters for the entrance indicator.
//! Values can be overridden through a [`ConfigPort`](crate::app::ports::ConfigPort)
//! (a JSON file on the host).

use serde::{Deserialize, Serialize};

use crate::app::ports::ConfigError;

/// Largest accepted `repeat_threshold`. Keeps one event's schedule finite
/// and the repeat counter far from its type bound.
pub const MAX_REPEAT_THRESHOLD: u16 = 1_000;

/// Blink schedule for one kind of counter event, in render ticks.
///
/// Within one on/off cycle the elapsed counter runs `1..=off_ticks`: the
/// output is lit while `elapsed < on_ticks`, dark until `elapsed ==
/// off_ticks`, where the cycle ends. One pending event is rendered as
/// `repeat_threshold + 2` such cycles.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct BlinkTiming {
    pub on_ticks: u16,
    pub off_ticks: u16,
    pub repeat_threshold: u16,
}

impl BlinkTiming {
    /// Number of ticks needed to drain one pending event.
    pub const fn ticks_per_event(&self) -> u32 {
        self.off_ticks as u32 * (self.repeat_threshold as u32 + 2)
    }

    fn validate(&self, what: &'static str) -> Result<(), ConfigError> {
        if self.on_ticks < 2 {
            return Err(ConfigError::ValidationFailed(what));
        }
        if self.off_ticks <= self.on_ticks {
            return Err(ConfigError::ValidationFailed(what));
        }
        if self.repeat_threshold > MAX_REPEAT_THRESHOLD {
            return Err(ConfigError::ValidationFailed(
                "repeat_threshold must be <= 1000",
            ));
        }
        Ok(())
    }
}

/// Entrance-counter parameters pushed into the sensing engine at boot.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CounterSettings {
    /// "ceiling" or "side"
    pub installation: heapless::String<16>,
    /// "landscape" or "portrait"
    pub orientation: heapless::String<16>,
    /// Entrance width in metres, as the engine expects it (e.g. "1.0")
    pub entrance_width: heapless::String<16>,
    /// Traffic-light zone depth in metres
    pub traffic_light_zone: heapless::String<16>,
}

impl Default for CounterSettings {
    fn default() -> Self {
        Self {
            installation: short("side"),
            orientation: short("landscape"),
            entrance_width: short("1.0"),
            traffic_light_zone: short("0.2"),
        }
    }
}

impl CounterSettings {
    /// `(parameter name, value)` pairs in the order they are applied.
    pub fn parameters(&self) -> [(&'static str, &str); 4] {
        [
            ("radar_counter_installation", self.installation.as_str()),
            ("radar_counter_orientation", self.orientation.as_str()),
            ("radar_counter_entrance_width", self.entrance_width.as_str()),
            ("radar_counter_traffic_light_zone", self.traffic_light_zone.as_str()),
        ]
    }
}

fn short(s: &str) -> heapless::String<16> {
    let mut out = heapless::String::new();
    let _ = out.push_str(s);
    out
}

/// Core system configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct IndicatorConfig {
    // --- Indicator ---
    /// Blink schedule for IN events (fast, short bursts)
    pub in_blink: BlinkTiming,
    /// Blink schedule for OUT events (slow, long bursts)
    pub out_blink: BlinkTiming,
    /// Render tick period (milliseconds)
    pub tick_period_ms: u32,

    // --- Sensing ---
    /// Delay between two sensing-engine process calls (milliseconds)
    pub sensing_interval_ms: u32,
    /// Parameters applied to the counter at boot
    pub counter: CounterSettings,
}

impl Default for IndicatorConfig {
    fn default() -> Self {
        Self {
            in_blink: BlinkTiming {
                on_ticks: 3,
                off_ticks: 20,
                repeat_threshold: 5,
            },
            out_blink: BlinkTiming {
                on_ticks: 3,
                off_ticks: 50,
                repeat_threshold: 2,
            },
            tick_period_ms: 2,
            sensing_interval_ms: 2,
            counter: CounterSettings::default(),
        }
    }
}

impl IndicatorConfig {
    /// Range-check every field. Invalid values are rejected, never clamped.
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.in_blink.validate("in_blink: need 2 <= on_ticks < off_ticks")?;
        self.out_blink
            .validate("out_blink: need 2 <= on_ticks < off_ticks")?;
        if self.tick_period_ms == 0 {
            return Err(ConfigError::ValidationFailed("tick_period_ms must be > 0"));
        }
        if self.sensing_interval_ms == 0 {
            return Err(ConfigError::ValidationFailed(
                "sensing_interval_ms must be > 0",
            ));
        }
        Ok(())
    }
}
