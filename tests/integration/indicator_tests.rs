//! Indicator controller driven against real and recorded outputs.

use std::sync::Arc;
use std::time::Duration;

use entrance_indicator::config::IndicatorConfig;
use entrance_indicator::drivers::hw_init::SimPin;
use entrance_indicator::drivers::status_led::StatusLed;
use entrance_indicator::events::CounterEvent;
use entrance_indicator::indicator::colour::Colour;
use entrance_indicator::indicator::{self, IndicatorController};

use crate::mocks::{RecordingOutput, wait_until};

fn controller() -> IndicatorController {
    IndicatorController::new(&IndicatorConfig::default())
}

fn run_ticks(ctl: &IndicatorController, out: &mut RecordingOutput, n: u32) {
    for _ in 0..n {
        ctl.render_step(out).unwrap();
    }
}

#[test]
fn in_while_occupied_blinks_red_then_holds_red() {
    let ctl = controller();
    let mut out = RecordingOutput::new();
    ctl.post_event(CounterEvent::Occupied);
    ctl.post_event(CounterEvent::In);

    run_ticks(&ctl, &mut out, 140);

    assert!(out.colours.iter().all(|c| matches!(c, Colour::Red | Colour::Off)));
    assert!(out.colours.contains(&Colour::Off));
    assert_eq!(out.last(), Some(Colour::Red));
    assert!(!ctl.snapshot().is_animating());
}

#[test]
fn burst_of_in_events_renders_each_one() {
    let ctl = controller();
    let mut out = RecordingOutput::new();
    for _ in 0..3 {
        ctl.post_event(CounterEvent::In);
    }

    run_ticks(&ctl, &mut out, 3 * 140 - 1);
    assert_eq!(ctl.snapshot().pending_in, 1);
    run_ticks(&ctl, &mut out, 1);
    assert_eq!(ctl.snapshot().pending_in, 0);

    // Seven on-phases per event, each starting with a NEUTRAL write.
    let on_starts = out
        .colours
        .windows(2)
        .filter(|w| w[0] == Colour::Off && w[1] == Colour::NEUTRAL)
        .count()
        + usize::from(out.colours.first() == Some(&Colour::NEUTRAL));
    assert_eq!(on_starts, 3 * 7);
}

#[test]
fn out_animation_is_abandoned_by_in() {
    let ctl = controller();
    let mut out = RecordingOutput::new();
    ctl.post_event(CounterEvent::Free);
    ctl.post_event(CounterEvent::Out);
    run_ticks(&ctl, &mut out, 120);

    ctl.post_event(CounterEvent::In);
    let s = ctl.snapshot();
    assert_eq!((s.pending_in, s.pending_out), (1, 0));

    run_ticks(&ctl, &mut out, 140);
    assert_eq!(out.last(), Some(Colour::Green));
    assert!(!ctl.snapshot().is_animating());
}

#[test]
fn status_led_pins_follow_the_render_steps() {
    let pins = [SimPin::new(), SimPin::new(), SimPin::new()];
    let mut led = StatusLed::new(pins[0].clone(), pins[1].clone(), pins[2].clone()).unwrap();
    let sampler = led.sampler();
    let ctl = controller();

    ctl.post_event(CounterEvent::Free);
    ctl.render_step(&mut led).unwrap();
    assert_eq!(sampler.sample(), Colour::Green);
    assert!(pins[1].is_high());

    ctl.post_event(CounterEvent::Occupied);
    ctl.render_step(&mut led).unwrap();
    assert_eq!(sampler.sample(), Colour::Red);
    assert!(pins[0].is_high() && !pins[1].is_high());
}

#[test]
fn render_thread_drives_the_led() {
    let pins = [SimPin::new(), SimPin::new(), SimPin::new()];
    let led = StatusLed::new(pins[0].clone(), pins[1].clone(), pins[2].clone()).unwrap();
    let sampler = led.sampler();
    let ctl = Arc::new(controller());

    let _render = indicator::task::spawn(ctl.clone(), led, Duration::from_millis(1)).unwrap();

    ctl.post_event(CounterEvent::Free);
    assert!(wait_until(|| sampler.sample() == Colour::Green));

    ctl.post_event(CounterEvent::In);
    assert!(wait_until(|| sampler.sample() == Colour::Off));
    assert!(wait_until(|| !ctl.snapshot().is_animating()));
    assert!(wait_until(|| sampler.sample() == Colour::Green));
}
