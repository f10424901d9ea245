#![allow(clippy::unreadable_literal)]

use log::LevelFilter;
use sensor_node_dashboard::{BoardLayout, ESP32_WROOM_32};
use sensor_node_telemetry::{AdcScale, Heartbeat, LinearProbe};

pub struct WifiConfig {
    pub ssid: &'static str,
    pub password: &'static str,
}

pub struct DeviceConfig {
    pub name: &'static str,
    pub id: &'static str,
    pub sensor_type: &'static str,
    pub hostname: &'static str,
    /// Empty when the node runs standalone.
    pub master_url: &'static str,
    pub board: BoardLayout,
}

pub struct TelemetryConfig {
    pub sensor_name: &'static str,
    pub heartbeat: Heartbeat,
    pub scale: AdcScale,
}

pub struct ProbeConfig {
    pub probe: LinearProbe,
    pub interval_ms: u64,
}

pub struct ControlPin {
    pub gpio: u8,
    pub alias: &'static str,
}

pub struct FirmwareConfig {
    pub version: &'static str,
}

pub const WIFI: WifiConfig = WifiConfig {
    ssid: env!("WIFI_SSID"),
    password: env!("WIFI_PASSWORD"),
};

pub const DEVICE: DeviceConfig = DeviceConfig {
    name: "ESP32 Sensor Node",
    id: "esp32_sensor_node",
    sensor_type: "battery",
    hostname: "esp32-sensor-node",
    master_url: match option_env!("MASTER_URL") {
        Some(url) => url,
        None => "",
    },
    board: ESP32_WROOM_32,
};

pub const TELEMETRY: TelemetryConfig = TelemetryConfig {
    sensor_name: "battery",
    heartbeat: Heartbeat::DEFAULT,
    scale: AdcScale::BATTERY,
};

pub const TEMPERATURE: ProbeConfig = ProbeConfig {
    probe: LinearProbe::TMP36,
    interval_ms: 5000,
};

/// On-board LED.
pub const LED_PIN: ControlPin = ControlPin {
    gpio: 2,
    alias: "LED",
};

pub const RELAY_PIN: ControlPin = ControlPin {
    gpio: 4,
    alias: "Relay",
};

pub const FIRMWARE: FirmwareConfig = FirmwareConfig {
    version: env!("BUILD_VERSION"),
};

/// Level of the dashboard's capturing logger.
pub const LOG_LEVEL: LevelFilter = LevelFilter::Info;

#[macro_export]
macro_rules! led_gpio {
    ($p:expr) => {
        $p.GPIO2
    };
}

#[macro_export]
macro_rules! relay_gpio {
    ($p:expr) => {
        $p.GPIO4
    };
}

/// ADC1 channel 0 (VP), battery through a 1:2 divider.
#[macro_export]
macro_rules! battery_adc_gpio {
    ($p:expr) => {
        $p.GPIO36
    };
}

/// ADC1 channel 3 (VN), TMP36 output.
#[macro_export]
macro_rules! temperature_adc_gpio {
    ($p:expr) => {
        $p.GPIO39
    };
}
