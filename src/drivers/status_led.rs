//! Tri-colour status LED driver.
//!
//! Three binary GPIO channels drive discrete R/G/B LEDs (or a
//! common-cathode RGB LED). Any `embedded-hal` output pin works:
//!
//! - On ESP-IDF: `esp-idf-hal` `PinDriver`s from [`hw_init`](super::hw_init).
//! - On host/test: [`SimPin`](super::hw_init::SimPin)s.
//!
//! After all three pins are written the colour is published into an atomic
//! latch. [`ColourSampler`] reads that latch, so an observer on another
//! thread only ever sees a complete colour, never a half-written one.

use std::sync::Arc;
use std::sync::atomic::{AtomicU8, Ordering};

use embedded_hal::digital::{OutputPin, PinState};

use crate::app::ports::OutputPort;
use crate::error::OutputError;
use crate::indicator::colour::Colour;

pub struct StatusLed<R, G, B> {
    red: R,
    green: G,
    blue: B,
    latched: Arc<AtomicU8>,
}

impl<R, G, B> StatusLed<R, G, B>
where
    R: OutputPin,
    G: OutputPin,
    B: OutputPin,
{
    /// Take the three pins and drive them dark.
    pub fn new(red: R, green: G, blue: B) -> Result<Self, OutputError> {
        let mut led = Self {
            red,
            green,
            blue,
            latched: Arc::new(AtomicU8::new(Colour::Off.bits())),
        };
        led.write(Colour::Off)?;
        Ok(led)
    }

    /// Handle for reading the last fully written colour.
    pub fn sampler(&self) -> ColourSampler {
        ColourSampler(Arc::clone(&self.latched))
    }

    pub fn current_colour(&self) -> Colour {
        Colour::from_bits(self.latched.load(Ordering::Acquire)).unwrap_or_default()
    }

    fn write(&mut self, colour: Colour) -> Result<(), OutputError> {
        let [r, g, b] = colour.channels();
        self.red
            .set_state(PinState::from(r))
            .map_err(|_| OutputError::RedWriteFailed)?;
        self.green
            .set_state(PinState::from(g))
            .map_err(|_| OutputError::GreenWriteFailed)?;
        self.blue
            .set_state(PinState::from(b))
            .map_err(|_| OutputError::BlueWriteFailed)?;
        self.latched.store(colour.bits(), Ordering::Release);
        Ok(())
    }
}

impl<R, G, B> OutputPort for StatusLed<R, G, B>
where
    R: OutputPin,
    G: OutputPin,
    B: OutputPin,
{
    fn set_colour(&mut self, colour: Colour) -> Result<(), OutputError> {
        self.write(colour)
    }
}

/// Read-only view of the colour a [`StatusLed`] last finished writing.
#[derive(Debug, Clone)]
pub struct ColourSampler(Arc<AtomicU8>);

impl ColourSampler {
    pub fn sample(&self) -> Colour {
        Colour::from_bits(self.0.load(Ordering::Acquire)).unwrap_or_default()
    }
}
