//! Telemetry sampling for ESP32 sensor nodes
//!
//! One fixed-period loop per node: pulse a heartbeat LED, read one analog
//! channel, scale the raw value to a physical unit and log it as a JSON line.
//! Hardware is reached through `embedded-hal` traits and [`AnalogSource`], so
//! the loop runs the same on the board and in host tests.

#![no_std]

mod error;
pub mod heartbeat;
pub mod reading;
pub mod sampler;
pub mod scale;

pub use error::TelemetryError;
pub use heartbeat::Heartbeat;
pub use reading::{SensorReading, TELEMETRY_LINE_CAPACITY};
pub use sampler::{AnalogSource, Sampler, emit};
pub use scale::{AdcScale, LinearProbe};
