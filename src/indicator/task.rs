//! Periodic render task.
//!
//! Runs in its own thread below the sensing loop's priority. Each
//! iteration renders one step and then awaits an `async-io-mini` reactor
//! timer for one period. A late wake-up is not caught up: animation
//! timing is wall-clock approximate.

use core::time::Duration;
use std::sync::Arc;

use log::{error, info};

use crate::app::ports::OutputPort;
use crate::drivers::task_pin::{self, Core};
use crate::error::OutputError;

use super::IndicatorController;

/// Render thread priority (below the sensing loop).
pub const RENDER_PRIORITY: u8 = 4;
const RENDER_STACK_KB: usize = 4;

/// Render until the output fails. Only returns the failure.
pub async fn render_loop<O: OutputPort>(
    controller: &IndicatorController,
    output: &mut O,
    period: Duration,
) -> OutputError {
    loop {
        if let Err(e) = controller.render_step(output) {
            return e;
        }
        async_io_mini::Timer::after(period).await;
    }
}

/// Spawn the render thread. A channel drive failure aborts the process.
pub fn spawn<O>(
    controller: Arc<IndicatorController>,
    output: O,
    period: Duration,
) -> std::io::Result<std::thread::JoinHandle<()>>
where
    O: OutputPort + Send + 'static,
{
    task_pin::spawn_on_core(
        Core::App,
        RENDER_PRIORITY,
        RENDER_STACK_KB,
        "indicator\0",
        move || {
            let mut output = output;
            info!("indicator: rendering every {}ms", period.as_millis());
            let err = futures_lite::future::block_on(render_loop(&controller, &mut output, period));
            error!("indicator: {}, aborting", err);
            std::process::abort();
        },
    )
}
