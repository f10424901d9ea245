use embassy_time::{Duration, Timer};
use sensor_node_telemetry::{AnalogSource as _, LinearProbe};

use crate::infrastructure::{drivers::TemperatureAdc, services::set_temperature};

/// Refresh the dashboard temperature every `interval_ms`.
///
/// A failed read keeps the previous value.
#[embassy_executor::task]
pub async fn temperature_probe_task(
    mut channel: TemperatureAdc,
    probe: LinearProbe,
    interval_ms: u64,
) {
    loop {
        match channel.read_raw() {
            Ok(raw) => {
                let celsius = probe.to_value(raw);
                log::debug!("temperature: raw={} {:.1}C", raw, celsius);
                set_temperature(celsius);
            }
            Err(()) => log::warn!("temperature: probe read failed"),
        }
        Timer::after(Duration::from_millis(interval_ms)).await;
    }
}
