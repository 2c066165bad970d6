//! One-shot LED pin bring-up.
//!
//! Hands out the three indicator channel pins. Called once from `main()`
//! before any thread is spawned.
//!
//! - On ESP-IDF the pins are `esp-idf-hal` push-pull outputs on the GPIOs
//!   from [`pins`](crate::pins).
//! - On host they are [`SimPin`]s: a shared level plus an injectable write
//!   failure, so tests can observe and break the output path.

use crate::drivers::status_led::StatusLed;

// ── Error type ────────────────────────────────────────────────

/// Errors during one-shot peripheral initialization.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HwInitError {
    /// Configuring the given GPIO as an output failed.
    GpioConfigFailed(i32),
}

impl core::fmt::Display for HwInitError {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            Self::GpioConfigFailed(gpio) => write!(f, "GPIO{} output config failed", gpio),
        }
    }
}

impl std::error::Error for HwInitError {}

/// Red, green and blue channel pins.
pub struct LedPins {
    pub red: LedPin,
    pub green: LedPin,
    pub blue: LedPin,
}

// ── Device ────────────────────────────────────────────────────

#[cfg(target_os = "espidf")]
pub type LedPin = esp_idf_hal::gpio::PinDriver<'static, esp_idf_hal::gpio::AnyOutputPin, esp_idf_hal::gpio::Output>;

#[cfg(target_os = "espidf")]
fn output_pin(gpio: i32) -> Result<LedPin, HwInitError> {
    // SAFETY: each LED GPIO is claimed exactly once, here, at boot; no
    // other driver in the firmware references these pin numbers.
    let pin = unsafe { esp_idf_hal::gpio::AnyOutputPin::new(gpio) };
    esp_idf_hal::gpio::PinDriver::output(pin).map_err(|_| HwInitError::GpioConfigFailed(gpio))
}

#[cfg(target_os = "espidf")]
pub fn init_led_pins() -> Result<LedPins, HwInitError> {
    use crate::pins;

    let led = LedPins {
        red: output_pin(pins::LED_R_GPIO)?,
        green: output_pin(pins::LED_G_GPIO)?,
        blue: output_pin(pins::LED_B_GPIO)?,
    };
    log::info!(
        "hw_init: LED outputs configured (R={}, G={}, B={})",
        pins::LED_R_GPIO,
        pins::LED_G_GPIO,
        pins::LED_B_GPIO
    );
    Ok(led)
}

/// Bring up the pins and hand them to a [`StatusLed`], driven dark.
pub fn init_status_led() -> crate::error::Result<StatusLed<LedPin, LedPin, LedPin>> {
    let pins = init_led_pins()?;
    Ok(StatusLed::new(pins.red, pins.green, pins.blue)?)
}

// ── Host simulation ───────────────────────────────────────────

#[cfg(not(target_os = "espidf"))]
pub use sim::SimPin;

#[cfg(not(target_os = "espidf"))]
pub type LedPin = SimPin;

#[cfg(not(target_os = "espidf"))]
pub fn init_led_pins() -> Result<LedPins, HwInitError> {
    log::info!("hw_init(sim): LED channels simulated");
    Ok(LedPins {
        red: SimPin::new(),
        green: SimPin::new(),
        blue: SimPin::new(),
    })
}

#[cfg(not(target_os = "espidf"))]
mod sim {
    use std::sync::Arc;
    use std::sync::atomic::{AtomicBool, Ordering};

    use embedded_hal::digital::{ErrorKind, ErrorType, OutputPin};

    #[derive(Debug, Default)]
    struct Line {
        high: AtomicBool,
        failing: AtomicBool,
    }

    /// Simulated output pin. Clones share the same line.
    #[derive(Debug, Clone, Default)]
    pub struct SimPin(Arc<Line>);

    /// Write rejected by a [`SimPin`] with failure injected.
    #[derive(Debug, Clone, Copy, PartialEq, Eq)]
    pub struct SimPinError;

    impl embedded_hal::digital::Error for SimPinError {
        fn kind(&self) -> ErrorKind {
            ErrorKind::Other
        }
    }

    impl SimPin {
        pub fn new() -> Self {
            Self::default()
        }

        pub fn is_high(&self) -> bool {
            self.0.high.load(Ordering::Acquire)
        }

        /// Make every following write fail (or succeed again).
        pub fn fail_writes(&self, failing: bool) {
            self.0.failing.store(failing, Ordering::Release);
        }

        fn drive(&self, high: bool) -> Result<(), SimPinError> {
            if self.0.failing.load(Ordering::Acquire) {
                return Err(SimPinError);
            }
            self.0.high.store(high, Ordering::Release);
            Ok(())
        }
    }

    impl ErrorType for SimPin {
        type Error = SimPinError;
    }

    impl OutputPin for SimPin {
        fn set_low(&mut self) -> Result<(), Self::Error> {
            self.drive(false)
        }

        fn set_high(&mut self) -> Result<(), Self::Error> {
            self.drive(true)
        }
    }
}
