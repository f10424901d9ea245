use core::fmt;

/// Errors of a single sampling iteration.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TelemetryError {
    /// The analog channel did not deliver a sample.
    Read,
    /// The heartbeat output could not be driven.
    Indicator,
    /// The reading does not fit the line buffer.
    Serialize,
}

impl fmt::Display for TelemetryError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TelemetryError::Read => write!(f, "analog read failed"),
            TelemetryError::Indicator => write!(f, "heartbeat output failed"),
            TelemetryError::Serialize => write!(f, "telemetry serialization failed"),
        }
    }
}
