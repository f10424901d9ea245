/// Connection mode of the sensor node.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OperatingMode {
    /// Reporting to a master server.
    Online,
    /// Running standalone.
    Offline,
}

impl OperatingMode {
    /// CSS modifier of the status banner.
    pub const fn status_class(self) -> &'static str {
        match self {
            OperatingMode::Online => "good",
            OperatingMode::Offline => "warning",
        }
    }

    pub const fn status_icon(self) -> &'static str {
        match self {
            OperatingMode::Online => "✅",
            OperatingMode::Offline => "⚠️",
        }
    }

    pub const fn status_text(self) -> &'static str {
        match self {
            OperatingMode::Online => "Online (Connected to Master)",
            OperatingMode::Offline => "Offline (Standalone)",
        }
    }
}

/// Snapshot of the device state rendered into the page.
///
/// Values are rendered as given, no range checks are applied.
#[derive(Debug, Clone, Copy)]
pub struct RenderContext<'a> {
    pub sensor_name: &'a str,
    pub sensor_id: &'a str,
    pub sensor_type: &'a str,
    pub mode: OperatingMode,
    pub master_url: &'a str,
    pub firmware_version: &'a str,
    /// Degrees Celsius.
    pub temperature: f32,
    pub relay: bool,
    pub uptime_secs: u64,
}
