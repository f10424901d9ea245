mod adc;
mod random;
pub mod wifi_sta;

pub use adc::{BatteryAdc, EspAdcChannel, TemperatureAdc};
pub use wifi_sta::{Credentials, Hostname, start_wifi_sta};
