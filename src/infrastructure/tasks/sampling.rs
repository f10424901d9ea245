use embassy_time::Delay;
use esp_hal::gpio::Output;
use sensor_node_telemetry::Sampler;

use crate::infrastructure::drivers::BatteryAdc;

pub type BatterySampler = Sampler<Output<'static>, Delay, BatteryAdc>;

#[embassy_executor::task]
pub async fn sampling_task(sampler: BatterySampler) {
    sampler.run().await
}
