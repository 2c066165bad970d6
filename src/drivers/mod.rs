//! Indicator output driver, pin bring-up, and thread helpers.

pub mod hw_init;
pub mod status_led;
pub mod task_pin;
