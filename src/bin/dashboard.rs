//! Dashboard firmware
//!
//! Joins the configured Wi-Fi network and serves the pin-control dashboard
//! on port 80:
//! - `GET /` renders the page from the live node state
//! - `GET /api/pins` and `POST /api/pin-control` expose the LED and relay
//! - `GET /api/serial` returns the most recent log lines

#![no_std]
#![no_main]

use embassy_executor::Spawner;
use embassy_time::{Duration, Timer};
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
    config::{DEVICE, FIRMWARE, LOG_LEVEL, TEMPERATURE, WIFI},
    controllers::{DashboardHttpController, init_dashboard_controller},
    infrastructure::{
        drivers::{Credentials, Hostname, TemperatureAdc, start_wifi_sta},
        services::init_capturing_logger,
        tasks::{http_server_task, temperature_probe_task},
    },
    led_gpio,
    mk_static,
    relay_gpio,
    temperature_adc_gpio,
};

esp_bootloader_esp_idf::esp_app_desc!();

#[esp_rtos::main]
async fn main(spawner: Spawner) -> ! {
    init_capturing_logger(LOG_LEVEL);

    println!("=================================");
    println!("  {} {}", DEVICE.name, FIRMWARE.version);
    println!("=================================");

    let config = esp_hal::Config::default().with_cpu_clock(CpuClock::max());
    let peripherals = esp_hal::init(config);

    // Allocate heap memory (64 + 32 KB)
    esp_alloc::heap_allocator!(
        #[unsafe(link_section = ".dram2_uninit")] size: 64 * 1024
    );
    esp_alloc::heap_allocator!(size: 32 * 1024);

    let timg0 = TimerGroup::new(peripherals.TIMG0);
    esp_rtos::start(timg0.timer0);

    let led = Output::new(led_gpio!(peripherals), Level::Low, OutputConfig::default());
    let relay = Output::new(relay_gpio!(peripherals), Level::Low, OutputConfig::default());

    let mut adc_config = AdcConfig::new();
    let probe_pin = adc_config.enable_pin(temperature_adc_gpio!(peripherals), Attenuation::_11dB);
    let probe_channel = TemperatureAdc::new(Adc::new(peripherals.ADC1, adc_config), probe_pin);
    spawner
        .spawn(temperature_probe_task(
            probe_channel,
            TEMPERATURE.probe,
            TEMPERATURE.interval_ms,
        ))
        .ok();

    let credentials =
        Credentials::new(WIFI.ssid, WIFI.password).expect("Wi-Fi credentials are too long");
    let hostname = Hostname::try_from(DEVICE.hostname).expect("hostname is too long");
    let stack = start_wifi_sta(spawner, peripherals.WIFI, credentials, hostname).await;

    let handler = mk_static!(
        DashboardHttpController,
        init_dashboard_controller(stack, led, relay)
    );
    spawner.spawn(http_server_task(stack, handler)).ok();

    if let Some(config) = stack.config_v4() {
        log::info!("dashboard: open http://{}/", config.address.address());
    }

    loop {
        Timer::after(Duration::from_secs(5)).await;
    }
}
