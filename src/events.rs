//! Entrance-counter events.
//!
//! The sensing engine classifies radar frames into at most one of four
//! events per process call:
//!
//! ```text
//! ┌──────────────┐  CounterEventInfo  ┌───────────────┐  CounterEvent  ┌─────────────────────┐
//! │ Sensing Loop │───────────────────▶│   dispatch    │───────────────▶│ IndicatorController │
//! │ (engine)     │                    │ (status line) │                │   post_event()      │
//! └──────────────┘                    └───────────────┘                └─────────────────────┘
//! ```
//!
//! Events are immutable once produced. The timestamp and cumulative
//! counts only matter to the status line; the indicator looks at the kind.

/// Classified entrance-counter event.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(u8)]
pub enum CounterEvent {
    /// A person walked in.
    In = 0,
    /// A person walked out.
    Out = 1,
    /// Something is standing in the traffic-light zone.
    Occupied = 2,
    /// The traffic-light zone is clear again.
    Free = 3,
}

impl CounterEvent {
    /// Word used for this event in the console status line.
    pub const fn label(self) -> &'static str {
        match self {
            Self::In => "IN",
            Self::Out => "OUT",
            Self::Occupied => "occupied",
            Self::Free => "free",
        }
    }
}

/// One detection as reported by the sensing engine.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CounterEventInfo {
    pub event: CounterEvent,
    /// Engine time of the detection (milliseconds).
    pub timestamp_ms: u64,
    /// Cumulative IN count since the engine started.
    pub in_count: u32,
    /// Cumulative OUT count since the engine started.
    pub out_count: u32,
}

impl CounterEventInfo {
    /// Timestamp in seconds, as printed on the console.
    pub fn timestamp_secs(&self) -> f32 {
        self.timestamp_ms as f32 / 1000.0
    }
}
