//! One-shot ADC1 channel
//!
//! Wraps the blocking esp-hal ADC driver together with one configured pin so
//! the telemetry sampler can read it through [`AnalogSource`].

use esp_hal::{
    Blocking,
    analog::adc::{Adc, AdcChannel, AdcPin},
    peripherals::{ADC1, GPIO36, GPIO39},
};
use sensor_node_telemetry::AnalogSource;

/// Battery divider input (VP).
pub type BatteryAdc = EspAdcChannel<GPIO36<'static>>;
/// TMP36 output (VN).
pub type TemperatureAdc = EspAdcChannel<GPIO39<'static>>;

pub struct EspAdcChannel<PIN> {
    adc: Adc<'static, ADC1<'static>, Blocking>,
    pin: AdcPin<PIN, ADC1<'static>>,
}

impl<PIN> EspAdcChannel<PIN> {
    pub fn new(
        adc: Adc<'static, ADC1<'static>, Blocking>,
        pin: AdcPin<PIN, ADC1<'static>>,
    ) -> Self {
        Self { adc, pin }
    }
}

impl<PIN: AdcChannel> AnalogSource for EspAdcChannel<PIN> {
    type Error = ();

    fn read_raw(&mut self) -> Result<u16, Self::Error> {
        nb::block!(self.adc.read_oneshot(&mut self.pin))
    }
}
