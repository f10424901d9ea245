//! Battery sampler firmware
//!
//! Blinks the on-board LED as a heartbeat and logs the battery voltage once
//! per second as a JSON telemetry line.

#![no_std]
#![no_main]

use embassy_executor::Spawner;
use embassy_time::{Delay, Duration, Timer};
use esp_alloc as _;
use esp_backtrace as _;
use esp_hal::{
    analog::adc::{Adc, AdcConfig, Attenuation},
    clock::CpuClock,
    gpio::{Level, Output, OutputConfig},
    timer::timg::TimerGroup,
};
use esp_println::println;
use esp_sensor_node::{
    battery_adc_gpio,
    config::{FIRMWARE, TELEMETRY},
    infrastructure::{drivers::BatteryAdc, tasks::sampling_task},
    led_gpio,
};
use sensor_node_telemetry::Sampler;

esp_bootloader_esp_idf::esp_app_desc!();

#[esp_rtos::main]
async fn main(spawner: Spawner) -> ! {
    esp_println::logger::init_logger_from_env();

    println!("=================================");
    println!("  Sensor node sampler {}", FIRMWARE.version);
    println!("=================================");

    let config = esp_hal::Config::default().with_cpu_clock(CpuClock::max());
    let peripherals = esp_hal::init(config);

    let timg0 = TimerGroup::new(peripherals.TIMG0);
    esp_rtos::start(timg0.timer0);

    let led = Output::new(led_gpio!(peripherals), Level::Low, OutputConfig::default());

    let mut adc_config = AdcConfig::new();
    let battery_pin = adc_config.enable_pin(battery_adc_gpio!(peripherals), Attenuation::_11dB);
    let channel = BatteryAdc::new(Adc::new(peripherals.ADC1, adc_config), battery_pin);

    let mut sampler = Sampler::new(TELEMETRY.sensor_name, led, Delay, channel)
        .with_heartbeat(TELEMETRY.heartbeat)
        .with_scale(TELEMETRY.scale);

    // Startup probe, a failed read here is fatal.
    let probe = sampler.read().expect("battery ADC probe read failed");
    log::info!("sampler: probe {} = {:.2} V", probe.sensor, probe.value);

    spawner.spawn(sampling_task(sampler)).ok();

    loop {
        Timer::after(Duration::from_secs(60)).await;
    }
}
