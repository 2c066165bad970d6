//! Indicator controller.
//!
//! Owns the single [`IndicatorState`] of the system and exposes the two
//! entry points the rest of the firmware uses:
//!
//! - [`IndicatorController::post_event`]: called from the sensing loop.
//!   Holds a short critical section and does no I/O.
//! - [`IndicatorController::tick`] / [`IndicatorController::render_step`]:
//!   called by the periodic render task (see [`task`]).
//!
//! ```text
//!   sensing thread ──post_event──┐
//!                                ▼
//!                  ┌─────────────────────────────┐
//!                  │ Mutex<CriticalSection,      │
//!                  │       RefCell<State>>       │
//!                  └─────────────────────────────┘
//!                                ▲
//!   render thread ───tick────────┘──▶ OutputPort (R, G, B)
//! ```
//!
//! Both sides hold the lock for one whole operation, so the render side
//! never observes a half-applied event.

pub mod colour;
pub mod state;
pub mod task;

use core::cell::RefCell;

use embassy_sync::blocking_mutex::Mutex;
use embassy_sync::blocking_mutex::raw::CriticalSectionRawMutex;

use crate::app::ports::OutputPort;
use crate::config::{BlinkTiming, IndicatorConfig};
use crate::error::OutputError;
use crate::events::CounterEvent;

use colour::Colour;
use state::IndicatorState;

pub struct IndicatorController {
    state: Mutex<CriticalSectionRawMutex, RefCell<IndicatorState>>,
    in_blink: BlinkTiming,
    out_blink: BlinkTiming,
}

impl IndicatorController {
    pub fn new(config: &IndicatorConfig) -> Self {
        Self {
            state: Mutex::new(RefCell::new(IndicatorState::new())),
            in_blink: config.in_blink,
            out_blink: config.out_blink,
        }
    }

    /// Latch a counter event into pending work. Safe from any thread.
    pub fn post_event(&self, event: CounterEvent) {
        self.state.lock(|s| s.borrow_mut().post(event));
    }

    /// Advance one animation step and return the colour to drive, if any.
    pub fn tick(&self) -> Option<Colour> {
        self.state
            .lock(|s| s.borrow_mut().tick(&self.in_blink, &self.out_blink))
    }

    /// One render period: [`tick`](Self::tick), then drive the channels
    /// when the tick yields a level.
    pub fn render_step(&self, output: &mut impl OutputPort) -> Result<(), OutputError> {
        if let Some(colour) = self.tick() {
            output.set_colour(colour)?;
        }
        Ok(())
    }

    /// Copy of the current state (diagnostics and tests).
    pub fn snapshot(&self) -> IndicatorState {
        self.state.lock(|s| *s.borrow())
    }
}
