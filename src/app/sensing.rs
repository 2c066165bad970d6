//! Sensing loop.
//!
//! Highest-priority thread of the system. Each iteration asks the engine
//! to process one frame and dispatches the resulting event, if any:
//!
//! ```text
//!   loop {
//!       lock engine ─▶ process(now) ─▶ unlock
//!       Some(event) ─▶ dispatch::on_counter_event
//!       sleep(interval)
//!   }
//! ```
//!
//! The engine is shared with the operator console (parameter reads and
//! writes) through [`SharedEngine`]. Its lock is never held while
//! dispatching, so a console write cannot delay the indicator.

use core::time::Duration;
use std::io::Write;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use log::{error, info};

use crate::adapters::time::MonotonicClock;
use crate::app::dispatch;
use crate::app::ports::{ParamValue, ParameterPort, SensingPort};
use crate::config::CounterSettings;
use crate::console::SharedConsole;
use crate::drivers::task_pin::{self, Core};
use crate::error::{Result, SensingError};
use crate::events::CounterEventInfo;
use crate::indicator::IndicatorController;

/// Sensing thread priority (above the render task).
pub const SENSING_PRIORITY: u8 = 5;
const SENSING_STACK_KB: usize = 8;

// ───────────────────────────────────────────────────────────────
// Shared engine handle
// ───────────────────────────────────────────────────────────────

/// Engine handle shared between the sensing loop and the console.
pub struct SharedEngine<E>(Arc<Mutex<E>>);

impl<E> Clone for SharedEngine<E> {
    fn clone(&self) -> Self {
        Self(Arc::clone(&self.0))
    }
}

impl<E> SharedEngine<E> {
    pub fn new(engine: E) -> Self {
        Self(Arc::new(Mutex::new(engine)))
    }

    fn lock(&self) -> MutexGuard<'_, E> {
        self.0.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

impl<E: SensingPort> SharedEngine<E> {
    pub fn init(&self) -> core::result::Result<(), SensingError> {
        self.lock().init()
    }

    /// Process one frame with the engine lock held for that call only.
    pub fn process(&self, now_ms: u64) -> core::result::Result<Option<CounterEventInfo>, SensingError> {
        self.lock().process(now_ms)
    }
}

impl<E: ParameterPort> ParameterPort for SharedEngine<E> {
    fn get_parameter(&self, key: &str) -> core::result::Result<ParamValue, SensingError> {
        self.lock().get_parameter(key)
    }

    fn set_parameter(&mut self, key: &str, value: &str) -> core::result::Result<(), SensingError> {
        self.lock().set_parameter(key, value)
    }
}

// ───────────────────────────────────────────────────────────────
// Startup configuration
// ───────────────────────────────────────────────────────────────

/// Push the boot-time counter parameters into the engine.
///
/// Stops at the first rejected parameter.
pub fn configure_counter(params: &mut impl ParameterPort, settings: &CounterSettings) -> Result<()> {
    for (key, value) in settings.parameters() {
        if let Err(e) = params.set_parameter(key, value) {
            error!("sensing: failed to set {}={}: {}", key, value, e);
            return Err(e.into());
        }
        info!("sensing: {} = {}", key, value);
    }
    Ok(())
}

/// Bring the engine up, then apply the boot parameters.
pub fn start_engine<E>(engine: &mut SharedEngine<E>, settings: &CounterSettings) -> Result<()>
where
    E: SensingPort + ParameterPort,
{
    if let Err(e) = engine.init() {
        error!("sensing: init failed ({}), radar not connected?", e);
        return Err(e.into());
    }
    configure_counter(engine, settings)
}

// ───────────────────────────────────────────────────────────────
// Loop
// ───────────────────────────────────────────────────────────────

pub struct SensingLoop<E, W> {
    engine: SharedEngine<E>,
    controller: Arc<IndicatorController>,
    console: Arc<SharedConsole<W>>,
    clock: MonotonicClock,
    interval: Duration,
}

impl<E, W> SensingLoop<E, W>
where
    E: SensingPort,
    W: Write,
{
    pub fn new(
        engine: SharedEngine<E>,
        controller: Arc<IndicatorController>,
        console: Arc<SharedConsole<W>>,
        clock: MonotonicClock,
        interval: Duration,
    ) -> Self {
        Self {
            engine,
            controller,
            console,
            clock,
            interval,
        }
    }

    /// One iteration without the sleep. Returns the dispatched event.
    pub fn poll_once(&self, now_ms: u64) -> core::result::Result<Option<CounterEventInfo>, SensingError> {
        let detected = self.engine.process(now_ms)?;
        if let Some(info) = &detected {
            dispatch::on_counter_event(info, &self.controller, &self.console);
        }
        Ok(detected)
    }

    /// Poll until the engine fails. Only returns the failure.
    pub fn run(self) -> SensingError {
        info!("sensing: polling every {}ms", self.interval.as_millis());
        loop {
            if let Err(e) = self.poll_once(self.clock.uptime_ms()) {
                error!("sensing: {}, stopping", e);
                return e;
            }
            std::thread::sleep(self.interval);
        }
    }
}

impl<E, W> SensingLoop<E, W>
where
    E: SensingPort + Send + 'static,
    W: Write + Send + 'static,
{
    /// Spawn the sensing thread. Joining it yields the fatal error.
    pub fn spawn(self) -> std::io::Result<std::thread::JoinHandle<SensingError>> {
        task_pin::spawn_on_core(
            Core::App,
            SENSING_PRIORITY,
            SENSING_STACK_KB,
            "sensing\0",
            move || self.run(),
        )
    }
}
