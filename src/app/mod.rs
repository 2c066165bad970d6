//! Application core: the glue between the sensing engine, the indicator
//! and the console.
//!
//! Hardware is only reached through the **port traits** in [`ports`], so
//! everything here runs on the host against mocks.

pub mod dispatch;
pub mod ports;
pub mod sensing;
