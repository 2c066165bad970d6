//! Simulated radar sensing engine.
//!
//! Stands in for the radar presence/counter engine on the host and on
//! boards without a radar front-end. It replays a fixed event script, one
//! event every `spacing_ms`, and keeps the same cumulative IN/OUT counts
//! and validated parameter table a real engine would.
//!
//! | Parameter                          | Accepts            | Default     |
//! |------------------------------------|--------------------|-------------|
//! | `radar_counter_installation`       | ceiling, side      | side        |
//! | `radar_counter_orientation`        | landscape, portrait| landscape   |
//! | `radar_counter_ceiling_height`     | 0.0 - 3.0          | 2.5         |
//! | `radar_counter_entrance_width`     | 0.0 - 3.0          | 1.0         |
//! | `radar_counter_sensitivity`        | 0.0 - 1.0          | 0.5         |
//! | `radar_counter_traffic_light_zone` | 0.0 - 1.0          | 0.2         |
//! | `radar_counter_reverse`            | true, false        | false       |
//! | `radar_counter_min_person_height`  | 0.0 - 2.0          | 1.0         |

use log::{debug, info};

use crate::app::ports::{ParamValue, ParameterPort, SensingPort};
use crate::error::SensingError;
use crate::events::{CounterEvent, CounterEventInfo};

/// Default script: someone steps into the zone, people pass in both
/// directions, the zone clears.
pub const DEFAULT_SCRIPT: [CounterEvent; 8] = [
    CounterEvent::Occupied,
    CounterEvent::In,
    CounterEvent::In,
    CounterEvent::Free,
    CounterEvent::Out,
    CounterEvent::In,
    CounterEvent::Out,
    CounterEvent::Out,
];

/// Milliseconds between two scripted events by default.
pub const DEFAULT_SPACING_MS: u64 = 1_500;

#[derive(Debug, Clone, Copy)]
enum Domain {
    OneOf(&'static [&'static str]),
    Range(f32, f32),
}

impl Domain {
    fn accepts(self, value: &str) -> bool {
        match self {
            Self::OneOf(options) => options.contains(&value),
            Self::Range(lo, hi) => value
                .parse::<f32>()
                .is_ok_and(|v| v.is_finite() && (lo..=hi).contains(&v)),
        }
    }
}

struct Param {
    name: &'static str,
    domain: Domain,
    value: ParamValue,
}

fn param(name: &'static str, domain: Domain, default: &str) -> Param {
    let mut value = ParamValue::new();
    let _ = value.push_str(default);
    Param {
        name,
        domain,
        value,
    }
}

pub struct SimulatedSensor {
    script: Vec<CounterEvent>,
    spacing_ms: u64,
    next_at_ms: u64,
    cursor: usize,
    in_count: u32,
    out_count: u32,
    params: Vec<Param>,
    connected: bool,
}

impl Default for SimulatedSensor {
    fn default() -> Self {
        Self::new(DEFAULT_SCRIPT.to_vec(), DEFAULT_SPACING_MS)
    }
}

impl SimulatedSensor {
    /// Replay `script` cyclically, one event every `spacing_ms`.
    /// An empty script never reports anything.
    pub fn new(script: Vec<CounterEvent>, spacing_ms: u64) -> Self {
        Self {
            script,
            spacing_ms,
            next_at_ms: spacing_ms,
            cursor: 0,
            in_count: 0,
            out_count: 0,
            params: vec![
                param("radar_counter_installation", Domain::OneOf(&["ceiling", "side"]), "side"),
                param("radar_counter_orientation", Domain::OneOf(&["landscape", "portrait"]), "landscape"),
                param("radar_counter_ceiling_height", Domain::Range(0.0, 3.0), "2.5"),
                param("radar_counter_entrance_width", Domain::Range(0.0, 3.0), "1.0"),
                param("radar_counter_sensitivity", Domain::Range(0.0, 1.0), "0.5"),
                param("radar_counter_traffic_light_zone", Domain::Range(0.0, 1.0), "0.2"),
                param("radar_counter_reverse", Domain::OneOf(&["true", "false"]), "false"),
                param("radar_counter_min_person_height", Domain::Range(0.0, 2.0), "1.0"),
            ],
            connected: true,
        }
    }

    /// A sensor with no radar behind it: `init` and `process` both fail.
    pub fn unplugged() -> Self {
        Self {
            connected: false,
            ..Self::default()
        }
    }

    fn reversed(&self) -> bool {
        self.params
            .iter()
            .any(|p| p.name == "radar_counter_reverse" && p.value.as_str() == "true")
    }
}

impl SensingPort for SimulatedSensor {
    fn init(&mut self) -> Result<(), SensingError> {
        if !self.connected {
            return Err(SensingError::NotConnected);
        }
        info!("sim: scripted sensor, {} events every {}ms", self.script.len(), self.spacing_ms);
        Ok(())
    }

    fn process(&mut self, now_ms: u64) -> Result<Option<CounterEventInfo>, SensingError> {
        if !self.connected {
            return Err(SensingError::NotConnected);
        }
        if self.script.is_empty() || now_ms < self.next_at_ms {
            return Ok(None);
        }
        self.next_at_ms = now_ms.saturating_add(self.spacing_ms);

        let mut event = self.script[self.cursor];
        self.cursor = (self.cursor + 1) % self.script.len();

        if self.reversed() {
            event = match event {
                CounterEvent::In => CounterEvent::Out,
                CounterEvent::Out => CounterEvent::In,
                other => other,
            };
        }
        match event {
            CounterEvent::In => self.in_count = self.in_count.saturating_add(1),
            CounterEvent::Out => self.out_count = self.out_count.saturating_add(1),
            CounterEvent::Occupied | CounterEvent::Free => {}
        }

        Ok(Some(CounterEventInfo {
            event,
            timestamp_ms: now_ms,
            in_count: self.in_count,
            out_count: self.out_count,
        }))
    }
}

impl ParameterPort for SimulatedSensor {
    fn get_parameter(&self, key: &str) -> Result<ParamValue, SensingError> {
        self.params
            .iter()
            .find(|p| p.name == key)
            .map(|p| p.value.clone())
            .ok_or(SensingError::UnknownParameter)
    }

    fn set_parameter(&mut self, key: &str, value: &str) -> Result<(), SensingError> {
        let param = self
            .params
            .iter_mut()
            .find(|p| p.name == key)
            .ok_or(SensingError::UnknownParameter)?;
        if !param.domain.accepts(value) {
            debug!("sim: {} rejects {:?}", key, value);
            return Err(SensingError::InvalidValue);
        }
        let mut v = ParamValue::new();
        v.push_str(value).map_err(|()| SensingError::ValueTooLong)?;
        param.value = v;
        Ok(())
    }
}
