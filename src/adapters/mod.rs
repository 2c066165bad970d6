//! Adapters: concrete implementations of the port traits.
//!
//! | Adapter        | Implements                 | Connects to                 |
//! |----------------|----------------------------|-----------------------------|
//! | `sim_sensing`  | SensingPort, ParameterPort | Scripted counter events     |
//! | `config_file`  | ConfigPort                 | JSON file on disk           |
//! | `time`         | (clock)                    | ESP32 system timer / Instant|
//!
//! The LED [`OutputPort`](crate::app::ports::OutputPort) lives in
//! [`drivers::status_led`](crate::drivers::status_led).

pub mod config_file;
pub mod sim_sensing;
pub mod time;
