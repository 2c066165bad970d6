//! Indicator state machine.
//!
//! Pure data and transitions, no locking and no I/O. The
//! [`IndicatorController`](super::IndicatorController) wraps one
//! [`IndicatorState`] in a critical section and feeds it events and ticks.
//!
//! ## Tick priority (first match wins)
//!
//! 1. pending IN  → IN blink schedule
//! 2. pending OUT → OUT blink schedule
//! 3. OCCUPIED / FREE → steady colour, no blinking
//! 4. idle → output untouched

use crate::config::BlinkTiming;
use crate::events::CounterEvent;

use super::colour::Colour;

/// Steady condition reported by the traffic-light zone.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SteadyCondition {
    #[default]
    None,
    Occupied,
    Free,
}

/// Progress through the animation of one pending event.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct BlinkPhase {
    /// Ticks elapsed in the current on/off cycle.
    pub elapsed: u16,
    /// On/off cycles completed for the current pending event.
    pub repeats: u16,
}

/// Outcome of advancing a [`BlinkPhase`] by one tick.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum BlinkStep {
    On,
    Off,
    /// Cycle finished, another one follows.
    Repeat,
    /// Last cycle finished, the pending event is rendered.
    Complete,
}

impl BlinkPhase {
    pub fn reset(&mut self) {
        *self = Self::default();
    }

    pub fn is_idle(&self) -> bool {
        self.elapsed == 0 && self.repeats == 0
    }

    fn advance(&mut self, timing: &BlinkTiming) -> BlinkStep {
        self.elapsed = self.elapsed.saturating_add(1);
        if self.elapsed < timing.on_ticks {
            BlinkStep::On
        } else if self.elapsed < timing.off_ticks {
            BlinkStep::Off
        } else {
            self.elapsed = 0;
            if self.repeats > timing.repeat_threshold {
                self.repeats = 0;
                BlinkStep::Complete
            } else {
                self.repeats = self.repeats.saturating_add(1);
                BlinkStep::Repeat
            }
        }
    }
}

/// The indicator's only mutable entity.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct IndicatorState {
    /// Un-rendered IN events.
    pub pending_in: u32,
    /// Un-rendered OUT events.
    pub pending_out: u32,
    pub phase_in: BlinkPhase,
    pub phase_out: BlinkPhase,
    /// Colour shown when no IN/OUT animation is active.
    pub steady_colour: Colour,
    pub steady_condition: SteadyCondition,
}

impl Default for IndicatorState {
    fn default() -> Self {
        Self::new()
    }
}

impl IndicatorState {
    pub const fn new() -> Self {
        Self {
            pending_in: 0,
            pending_out: 0,
            phase_in: BlinkPhase {
                elapsed: 0,
                repeats: 0,
            },
            phase_out: BlinkPhase {
                elapsed: 0,
                repeats: 0,
            },
            steady_colour: Colour::NEUTRAL,
            steady_condition: SteadyCondition::None,
        }
    }

    /// Latch one counter event into pending work.
    ///
    /// IN and OUT abandon each other's in-flight animation. OCCUPIED and
    /// FREE only change the steady colour.
    pub fn post(&mut self, event: CounterEvent) {
        match event {
            CounterEvent::In => {
                if self.pending_in == 0 {
                    self.phase_in.reset();
                }
                self.pending_in = self.pending_in.saturating_add(1);
                self.pending_out = 0;
                self.phase_out.reset();
            }
            CounterEvent::Out => {
                if self.pending_out == 0 {
                    self.phase_out.reset();
                }
                self.pending_out = self.pending_out.saturating_add(1);
                self.pending_in = 0;
                self.phase_in.reset();
            }
            CounterEvent::Occupied => {
                self.steady_condition = SteadyCondition::Occupied;
                self.steady_colour = Colour::Red;
            }
            CounterEvent::Free => {
                self.steady_condition = SteadyCondition::Free;
                self.steady_colour = Colour::Green;
            }
        }
    }

    /// Advance exactly one animation step.
    ///
    /// Returns the colour to drive, or `None` when the output keeps its
    /// current level.
    pub fn tick(&mut self, in_timing: &BlinkTiming, out_timing: &BlinkTiming) -> Option<Colour> {
        let blink = self.steady_colour;
        let rest = self.steady_output();

        if self.pending_in > 0 {
            animate(&mut self.phase_in, &mut self.pending_in, in_timing, blink, rest)
        } else if self.pending_out > 0 {
            animate(&mut self.phase_out, &mut self.pending_out, out_timing, blink, rest)
        } else if self.steady_condition != SteadyCondition::None {
            Some(self.steady_colour)
        } else {
            None
        }
    }

    /// Output once every animation has drained.
    pub fn steady_output(&self) -> Colour {
        match self.steady_condition {
            SteadyCondition::None => Colour::Off,
            SteadyCondition::Occupied | SteadyCondition::Free => self.steady_colour,
        }
    }

    /// True while an IN or OUT animation owns the output.
    pub fn is_animating(&self) -> bool {
        self.pending_in > 0 || self.pending_out > 0
    }
}

fn animate(
    phase: &mut BlinkPhase,
    pending: &mut u32,
    timing: &BlinkTiming,
    blink: Colour,
    rest: Colour,
) -> Option<Colour> {
    match phase.advance(timing) {
        BlinkStep::On => Some(blink),
        BlinkStep::Off => Some(Colour::Off),
        BlinkStep::Repeat => None,
        BlinkStep::Complete => {
            *pending -= 1;
            Some(rest)
        }
    }
}
