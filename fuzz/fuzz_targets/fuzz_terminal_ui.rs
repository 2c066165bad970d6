//! Fuzz target: `TerminalUi::run`
//!
//! Drives arbitrary operator keystrokes into the terminal UI backed by
//! the simulated engine and asserts that it never panics, always exits
//! cleanly when the input runs out, and never hands the engine a value
//! longer than the line limit.
//!
//! cargo fuzz run fuzz_terminal_ui

#![no_main]

use std::sync::Arc;

use entrance_indicator::adapters::sim_sensing::SimulatedSensor;
use entrance_indicator::app::ports::{ParamValue, ParameterPort};
use entrance_indicator::console::SharedConsole;
use entrance_indicator::console::ui::{ByteReader, LINE_MAX, TerminalUi};
use entrance_indicator::error::SensingError;
use libfuzzer_sys::fuzz_target;

/// Simulated engine that also checks what the UI passes through.
struct Checked(SimulatedSensor);

impl ParameterPort for Checked {
    fn get_parameter(&self, key: &str) -> Result<ParamValue, SensingError> {
        self.0.get_parameter(key)
    }

    fn set_parameter(&mut self, key: &str, value: &str) -> Result<(), SensingError> {
        assert!(value.len() <= LINE_MAX, "line reader exceeded its limit");
        assert!(value.bytes().all(|b| b.is_ascii_graphic()), "unprintable byte reached the engine");
        self.0.set_parameter(key, value)
    }
}

fuzz_target!(|data: &[u8]| {
    let console = Arc::new(SharedConsole::new(Vec::<u8>::new()));
    let mut ui = TerminalUi::new(
        ByteReader::new(data),
        Checked(SimulatedSensor::default()),
        console.clone(),
    );
    ui.run().expect("in-memory console never fails");
    drop(ui);

    let out = Arc::try_unwrap(console).ok().expect("ui released the console").into_inner();
    assert!(out.ends_with(b"Exiting terminal ui\r\n"));
});
