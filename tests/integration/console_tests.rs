//! Operator console sharing the serial sink with the sensing side.

use std::sync::Arc;

use entrance_indicator::adapters::sim_sensing::SimulatedSensor;
use entrance_indicator::app::dispatch;
use entrance_indicator::app::ports::ParameterPort;
use entrance_indicator::app::sensing::SharedEngine;
use entrance_indicator::config::IndicatorConfig;
use entrance_indicator::console::SharedConsole;
use entrance_indicator::console::ui::TerminalUi;
use entrance_indicator::events::{CounterEvent, CounterEventInfo};
use entrance_indicator::indicator::IndicatorController;

use crate::mocks::{ChannelInput, wait_until};

fn console_text(console: &SharedConsole<Vec<u8>>) -> String {
    let out = console.mute();
    String::from_utf8_lossy(&out).into_owned()
}

fn info(event: CounterEvent) -> CounterEventInfo {
    CounterEventInfo {
        event,
        timestamp_ms: 2_000,
        in_count: 1,
        out_count: 0,
    }
}

#[test]
fn status_lines_are_dropped_while_operator_types() {
    let console = Arc::new(SharedConsole::new(Vec::<u8>::new()));
    let engine = SharedEngine::new(SimulatedSensor::default());
    let ctl = IndicatorController::new(&IndicatorConfig::default());
    let (keys, input) = ChannelInput::new();

    let ui = TerminalUi::new(input, engine.clone(), console.clone())
        .spawn()
        .unwrap();
    assert!(wait_until(|| console_text(&console).contains("Select a setting")));

    keys.send(b'h').unwrap();
    keys.send(b'2').unwrap();
    // The UI now sits in the line reader holding the console.
    assert!(wait_until(|| console.try_acquire().is_none()));

    dispatch::on_counter_event(&info(CounterEvent::In), &ctl, &console);
    assert_eq!(ctl.snapshot().pending_in, 1);

    keys.send(b'\r').unwrap();
    assert!(wait_until(|| console_text(&console).contains("OK\r\n")));

    dispatch::on_counter_event(&info(CounterEvent::Occupied), &ctl, &console);
    drop(keys);
    ui.join().unwrap();

    let text = console_text(&console);
    assert!(!text.contains("Counter IN detected"));
    assert!(text.contains("2.00: Counter occupied detected, IN: 1, OUT: 0\r\n"));
    assert!(text.ends_with("Exiting terminal ui\r\n"));
    assert_eq!(
        engine.get_parameter("radar_counter_ceiling_height").unwrap().as_str(),
        "2"
    );
}

#[test]
fn engine_rejection_is_reported_as_error() {
    let console = Arc::new(SharedConsole::new(Vec::<u8>::new()));
    let engine = SharedEngine::new(SimulatedSensor::default());
    let (keys, input) = ChannelInput::new();
    for b in b"t5.0\r" {
        keys.send(*b).unwrap();
    }
    drop(keys);

    TerminalUi::new(input, engine.clone(), console.clone())
        .run()
        .unwrap();

    let text = console_text(&console);
    assert!(text.contains("Enter counter traffic light zone [0.0-1.0]m, press enter\r\n"));
    assert!(text.contains("ERROR\r\n"));
    assert_eq!(
        engine
            .get_parameter("radar_counter_traffic_light_zone")
            .unwrap()
            .as_str(),
        "0.2"
    );
}

#[test]
fn menu_shows_engine_values_after_a_choice() {
    let console = Arc::new(SharedConsole::new(Vec::<u8>::new()));
    let engine = SharedEngine::new(SimulatedSensor::default());
    let (keys, input) = ChannelInput::new();
    for b in b"o2?" {
        keys.send(*b).unwrap();
    }
    drop(keys);

    TerminalUi::new(input, engine, console.clone()).run().unwrap();

    let text = console_text(&console);
    assert!(text.contains("selected '2': portrait\r\nOK\r\n"));
    assert!(text.contains("'o': orientation (portrait)\r\n"));
}

#[test]
fn sensing_side_is_never_blocked_by_a_held_console() {
    let console = Arc::new(SharedConsole::new(Vec::<u8>::new()));
    let ctl = Arc::new(IndicatorController::new(&IndicatorConfig::default()));

    let held = console.mute();
    let poster = {
        let console = console.clone();
        let ctl = ctl.clone();
        std::thread::spawn(move || {
            for _ in 0..1_000 {
                dispatch::on_counter_event(&info(CounterEvent::Out), &ctl, &console);
            }
        })
    };
    // Completes while the console is still held.
    poster.join().unwrap();
    drop(held);

    assert_eq!(ctl.snapshot().pending_out, 1_000);
    assert!(console_text(&console).is_empty());
}
