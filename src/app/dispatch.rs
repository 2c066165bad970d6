//! Event classification glue.
//!
//! Called by the sensing loop once per detected event. The indicator gets
//! every event; the console gets a status line only when nobody else is
//! writing to it.

use std::io::Write;

use log::{debug, warn};

use crate::console::SharedConsole;
use crate::events::CounterEventInfo;
use crate::indicator::IndicatorController;

/// Forward one event to the indicator and report it on the console.
///
/// Never blocks on the console: if it is held (operator session), the
/// status line for this event is dropped and will not be printed later.
pub fn on_counter_event<W: Write>(
    info: &CounterEventInfo,
    controller: &IndicatorController,
    console: &SharedConsole<W>,
) {
    controller.post_event(info.event);

    let Some(mut out) = console.try_acquire() else {
        debug!("console busy, dropped {} status line", info.event.label());
        return;
    };
    if let Err(e) = write_status_line(&mut *out, info) {
        warn!("status line write failed: {}", e);
    }
}

/// `"12.34: Counter IN detected, IN: 5, OUT: 3\r\n"`
pub fn write_status_line<W: Write + ?Sized>(
    out: &mut W,
    info: &CounterEventInfo,
) -> std::io::Result<()> {
    write!(
        out,
        "{:.2}: Counter {} detected, IN: {}, OUT: {}\r\n",
        info.timestamp_secs(),
        info.event.label(),
        info.in_count,
        info.out_count
    )?;
    out.flush()
}
