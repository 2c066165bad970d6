//! Sensing loop against the simulated engine.

use std::sync::Arc;
use std::time::Duration;

use entrance_indicator::adapters::sim_sensing::SimulatedSensor;
use entrance_indicator::adapters::time::MonotonicClock;
use entrance_indicator::app::ports::ParameterPort;
use entrance_indicator::app::sensing::{SensingLoop, SharedEngine, configure_counter, start_engine};
use entrance_indicator::config::{CounterSettings, IndicatorConfig};
use entrance_indicator::console::SharedConsole;
use entrance_indicator::events::CounterEvent;
use entrance_indicator::indicator::IndicatorController;
use entrance_indicator::indicator::colour::Colour;
use entrance_indicator::indicator::state::SteadyCondition;

fn rig(
    script: Vec<CounterEvent>,
) -> (
    SensingLoop<SimulatedSensor, Vec<u8>>,
    Arc<IndicatorController>,
    Arc<SharedConsole<Vec<u8>>>,
) {
    let ctl = Arc::new(IndicatorController::new(&IndicatorConfig::default()));
    let console = Arc::new(SharedConsole::new(Vec::new()));
    let lp = SensingLoop::new(
        SharedEngine::new(SimulatedSensor::new(script, 100)),
        ctl.clone(),
        console.clone(),
        MonotonicClock::new(),
        Duration::from_millis(1),
    );
    (lp, ctl, console)
}

#[test]
fn scripted_events_reach_indicator_and_console() {
    let (lp, ctl, console) = rig(vec![CounterEvent::Occupied, CounterEvent::In, CounterEvent::Out]);

    let mut now = 0;
    let mut seen = Vec::new();
    while seen.len() < 3 {
        now += 2;
        if let Some(info) = lp.poll_once(now).unwrap() {
            seen.push(info.event);
        }
    }
    assert_eq!(seen, [CounterEvent::Occupied, CounterEvent::In, CounterEvent::Out]);

    let s = ctl.snapshot();
    assert_eq!(s.steady_condition, SteadyCondition::Occupied);
    assert_eq!(s.steady_colour, Colour::Red);
    assert_eq!((s.pending_in, s.pending_out), (0, 1));

    drop(lp);
    let text = String::from_utf8(Arc::try_unwrap(console).ok().unwrap().into_inner()).unwrap();
    let lines: Vec<_> = text.split_terminator("\r\n").collect();
    assert_eq!(
        lines,
        [
            "0.10: Counter occupied detected, IN: 0, OUT: 0",
            "0.20: Counter IN detected, IN: 1, OUT: 0",
            "0.30: Counter OUT detected, IN: 1, OUT: 1",
        ]
    );
}

#[test]
fn default_settings_are_accepted_by_the_engine() {
    let mut engine = SharedEngine::new(SimulatedSensor::default());
    start_engine(&mut engine, &CounterSettings::default()).unwrap();
    assert_eq!(
        engine.get_parameter("radar_counter_entrance_width").unwrap().as_str(),
        "1.0"
    );
}

#[test]
fn invalid_boot_settings_fail_configuration() {
    let mut engine = SharedEngine::new(SimulatedSensor::default());
    let mut settings = CounterSettings::default();
    settings.orientation.clear();
    let _ = settings.orientation.push_str("diagonal");
    assert!(configure_counter(&mut engine, &settings).is_err());
}
