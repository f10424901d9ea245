use serde::Serialize;

use crate::TelemetryError;

/// Buffer size that fits any telemetry line.
pub const TELEMETRY_LINE_CAPACITY: usize = 128;

/// One converted sample, logged as `{"sensor":"battery","value":3.97}`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct SensorReading<'a> {
    pub sensor: &'a str,
    pub value: f32,
}

impl<'a> SensorReading<'a> {
    pub const fn new(sensor: &'a str, value: f32) -> Self {
        Self { sensor, value }
    }

    /// Serialize the reading as a JSON object into `buf`.
    pub fn write_json<'b>(&self, buf: &'b mut [u8]) -> Result<&'b str, TelemetryError> {
        let n = serde_json_core::to_slice(self, buf).map_err(|_| TelemetryError::Serialize)?;
        core::str::from_utf8(&buf[..n]).map_err(|_| TelemetryError::Serialize)
    }
}
