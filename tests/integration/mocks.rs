//! Mock adapters for integration tests.
//!
//! Records every output call and feeds console input from a channel so
//! tests can hold the operator console at a prompt.

use std::sync::mpsc::{self, Receiver, Sender};
use std::time::{Duration, Instant};

use entrance_indicator::app::ports::OutputPort;
use entrance_indicator::console::ui::ConsoleInput;
use entrance_indicator::error::OutputError;
use entrance_indicator::indicator::colour::Colour;

// ── Output recorder ───────────────────────────────────────────

#[derive(Default)]
pub struct RecordingOutput {
    pub colours: Vec<Colour>,
}

#[allow(dead_code)]
impl RecordingOutput {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn last(&self) -> Option<Colour> {
        self.colours.last().copied()
    }
}

impl OutputPort for RecordingOutput {
    fn set_colour(&mut self, colour: Colour) -> Result<(), OutputError> {
        self.colours.push(colour);
        Ok(())
    }
}

// ── Channel-fed console input ─────────────────────────────────

/// Console input that blocks until the test sends bytes. Dropping the
/// sender closes the input.
pub struct ChannelInput(Receiver<u8>);

impl ChannelInput {
    pub fn new() -> (Sender<u8>, Self) {
        let (tx, rx) = mpsc::channel();
        (tx, Self(rx))
    }
}

impl ConsoleInput for ChannelInput {
    fn read_byte(&mut self) -> Option<u8> {
        self.0.recv().ok()
    }
}

// ── Helpers ───────────────────────────────────────────────────

/// Poll `cond` until it holds or two seconds pass.
pub fn wait_until(mut cond: impl FnMut() -> bool) -> bool {
    let deadline = Instant::now() + Duration::from_secs(2);
    while Instant::now() < deadline {
        if cond() {
            return true;
        }
        std::thread::sleep(Duration::from_millis(1));
    }
    false
}
