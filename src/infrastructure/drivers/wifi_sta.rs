use embassy_executor::Spawner;
use embassy_net::{DhcpConfig, Runner, Stack, StackResources};
use embassy_time::{Duration, Timer};
use esp_hal::peripherals::WIFI;
use esp_radio::wifi::{
    AuthMethod,
    ClientConfig,
    Config,
    ModeConfig,
    WifiController,
    WifiDevice,
    WifiEvent,
    WifiStaState,
};
use heapless::String;

use super::random::get_seed;
use crate::mk_static;

const MAX_HOSTNAME_LEN: usize = 32;

/// HTTP server socket plus DHCP and DNS.
const MAX_NETWORK_CONNECTIONS: usize = 3;

pub type Hostname = String<MAX_HOSTNAME_LEN>;

/// Station credentials, copied out of the compile-time config.
pub struct Credentials {
    pub ssid: String<32>,
    pub password: String<64>,
}

impl Credentials {
    /// Returns `None` when a value is longer than the radio accepts.
    pub fn new(ssid: &str, password: &str) -> Option<Self> {
        let mut credentials = Self {
            ssid: String::new(),
            password: String::new(),
        };
        credentials.ssid.push_str(ssid).ok()?;
        credentials.password.push_str(password).ok()?;
        Some(credentials)
    }
}

/// Start the Wi-Fi station and wait until DHCP hands out an address.
///
/// The connection task keeps reconnecting after the link drops.
pub async fn start_wifi_sta(
    spawner: Spawner,
    wifi_device: WIFI<'static>,
    credentials: Credentials,
    hostname: Hostname,
) -> Stack<'static> {
    let radio = mk_static!(
        esp_radio::Controller<'static>,
        esp_radio::init().expect("radio init failed")
    );
    let (controller, interfaces) = esp_radio::wifi::new(radio, wifi_device, Config::default())
        .expect("wifi init failed");

    let mut dhcp_config = DhcpConfig::default();
    dhcp_config.hostname = Some(hostname);
    let net_config = embassy_net::Config::dhcpv4(dhcp_config);

    let resources = mk_static!(
        StackResources<MAX_NETWORK_CONNECTIONS>,
        StackResources::<MAX_NETWORK_CONNECTIONS>::new()
    );
    let (stack, runner) = embassy_net::new(interfaces.sta, net_config, resources, get_seed());

    spawner
        .spawn(wifi_connection_task(controller, credentials))
        .ok();
    spawner.spawn(network_runner_task(runner)).ok();

    let address = wait_for_connection(stack).await;
    log::info!("network: got address {}", address.address);

    stack
}

#[embassy_executor::task]
async fn wifi_connection_task(mut controller: WifiController<'static>, credentials: Credentials) {
    loop {
        if esp_radio::wifi::sta_state() == WifiStaState::Connected {
            controller.wait_for_event(WifiEvent::StaDisconnected).await;
            log::warn!("network: disconnected");
            Timer::after(Duration::from_millis(2000)).await;
        }
        if !matches!(controller.is_started(), Ok(true)) {
            let client_config = if credentials.password.is_empty() {
                ClientConfig::default()
                    .with_ssid(credentials.ssid.as_str().into())
                    .with_auth_method(AuthMethod::None)
            } else {
                ClientConfig::default()
                    .with_ssid(credentials.ssid.as_str().into())
                    .with_password(credentials.password.as_str().into())
            };
            if let Err(e) = controller.set_config(&ModeConfig::Client(client_config)) {
                log::error!("network: invalid station config: {:?}", e);
                Timer::after(Duration::from_millis(5000)).await;
                continue;
            }
            if let Err(e) = controller.start_async().await {
                log::error!("network: radio start failed: {:?}", e);
                Timer::after(Duration::from_millis(5000)).await;
                continue;
            }
        }

        log::info!("network: connecting to {}", credentials.ssid);
        if let Err(e) = controller.connect_async().await {
            log::warn!("network: error connecting: {:?}", e);
            Timer::after(Duration::from_millis(5000)).await;
        }
    }
}

#[embassy_executor::task]
async fn network_runner_task(mut runner: Runner<'static, WifiDevice<'static>>) {
    runner.run().await;
}

/// Wait for link and an IPv4 address.
async fn wait_for_connection(stack: Stack<'_>) -> embassy_net::StaticConfigV4 {
    while !stack.is_link_up() {
        Timer::after(Duration::from_millis(100)).await;
    }

    loop {
        if let Some(config) = stack.config_v4() {
            return config;
        }
        Timer::after(Duration::from_millis(100)).await;
    }
}
