//! Entrance Indicator Firmware: Main Entry Point
//!
//! Three threads around one shared indicator state:
//!
//! ```text
//! ┌────────────────────────────────────────────────────────────────┐
//! │                      Adapters (outer ring)                     │
//! │                                                                │
//! │  SimulatedSensor     StatusLed        JsonConfigFile           │
//! │  (Sensing+Parameter) (OutputPort)     (ConfigPort)             │
//! │                                                                │
//! │  ──────────────── Port Trait Boundary ───────────────────      │
//! │                                                                │
//! │  sensing (pri 5) ──post_event──▶ IndicatorController           │
//! │       │                               ▲                        │
//! │       └─ status line ─▶ SharedConsole  │ tick                   │
//! │                              ▲         │                        │
//! │  console (pri 2) ── mute ───┘    indicator (pri 4)             │
//! └────────────────────────────────────────────────────────────────┘
//! ```
#![deny(unused_must_use)]

use core::time::Duration;
use std::io::Write;
use std::sync::Arc;

use anyhow::{Result, anyhow};
use log::{error, info, warn};

use entrance_indicator::adapters::config_file::{self, JsonConfigFile};
use entrance_indicator::adapters::sim_sensing::SimulatedSensor;
use entrance_indicator::adapters::time::MonotonicClock;
use entrance_indicator::app::sensing::{SensingLoop, SharedEngine, start_engine};
use entrance_indicator::config::IndicatorConfig;
use entrance_indicator::console::SharedConsole;
use entrance_indicator::console::ui::{ByteReader, TerminalUi};
use entrance_indicator::drivers::hw_init;
use entrance_indicator::error::Error;
use entrance_indicator::indicator::{self, IndicatorController};

// ── Logging ───────────────────────────────────────────────────

#[cfg(target_os = "espidf")]
fn init_logging() -> Result<()> {
    esp_idf_svc::sys::link_patches();
    esp_idf_logger::init()?;
    Ok(())
}

#[cfg(not(target_os = "espidf"))]
fn init_logging() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).try_init()?;
    Ok(())
}

// ── Main ──────────────────────────────────────────────────────

fn main() -> Result<()> {
    // ── 1. Bootstrap ──────────────────────────────────────────
    init_logging()?;

    info!("╔══════════════════════════════════════╗");
    info!("║  Entrance Indicator v{}           ║", env!("CARGO_PKG_VERSION"));
    info!("╚══════════════════════════════════════╝");

    let config = config_file::load_config(JsonConfigFile::from_env().as_ref())
        .unwrap_or_else(|e| {
            warn!("{}, using defaults", e);
            IndicatorConfig::default()
        });

    // ── 2. Indicator output ───────────────────────────────────
    let led = hw_init::init_status_led()?;
    let controller = Arc::new(IndicatorController::new(&config));

    // ── 3. Console + banner ───────────────────────────────────
    let console = Arc::new(SharedConsole::new(std::io::stdout()));
    {
        let mut out = console.mute();
        write!(out, "\x1b[2J\x1b[;H")?;
        write!(out, "Radar entrance counter with tri-colour indicator\r\n")?;
        write!(out, "Press '?' to list all radar counter settings\r\n\r\n")?;
        out.flush()?;
    }

    // ── 4. Sensing engine ─────────────────────────────────────
    let mut engine = SharedEngine::new(SimulatedSensor::default());
    if let Err(e) = start_engine(&mut engine, &config.counter) {
        error!("sensing engine start failed: {}", e);
        return Err(e.into());
    }

    // ── 5. Threads ────────────────────────────────────────────
    let _render = indicator::task::spawn(
        controller.clone(),
        led,
        Duration::from_millis(u64::from(config.tick_period_ms)),
    )?;

    let sensing = SensingLoop::new(
        engine.clone(),
        controller,
        console.clone(),
        MonotonicClock::new(),
        Duration::from_millis(u64::from(config.sensing_interval_ms)),
    )
    .spawn()?;

    let _ui = TerminalUi::new(ByteReader::new(std::io::stdin()), engine, console).spawn()?;

    info!("System ready.");

    // The sensing loop only returns on a fatal engine failure.
    let fault = sensing
        .join()
        .map_err(|_| anyhow!("sensing thread panicked"))?;
    Err(Error::from(fault).into())
}
