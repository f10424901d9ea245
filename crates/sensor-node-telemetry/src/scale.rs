//! Raw ADC sample to physical unit conversion.

/// Linear raw-to-volts scale of an ADC channel behind a resistor divider.
///
/// `volts = raw / max_raw * reference_volts * divider`
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AdcScale {
    pub max_raw: u16,
    pub reference_volts: f32,
    pub divider: f32,
}

impl AdcScale {
    /// 12-bit channel at 11 dB attenuation measuring through a 1:2 divider.
    pub const BATTERY: AdcScale = AdcScale {
        max_raw: 4095,
        reference_volts: 3.3,
        divider: 2.0,
    };

    /// 12-bit channel at 11 dB attenuation wired directly.
    pub const DIRECT: AdcScale = AdcScale {
        max_raw: 4095,
        reference_volts: 3.3,
        divider: 1.0,
    };

    pub fn to_volts(&self, raw: u16) -> f32 {
        f32::from(raw) / f32::from(self.max_raw) * self.reference_volts * self.divider
    }
}

/// Analog sensor with a linear volts-to-unit response.
///
/// `value = (volts - offset_volts) / volts_per_unit`
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LinearProbe {
    pub scale: AdcScale,
    pub offset_volts: f32,
    pub volts_per_unit: f32,
}

impl LinearProbe {
    /// TMP36 style temperature sensor: 500 mV at 0 °C, 10 mV per °C.
    pub const TMP36: LinearProbe = LinearProbe {
        scale: AdcScale::DIRECT,
        offset_volts: 0.5,
        volts_per_unit: 0.01,
    };

    pub fn to_value(&self, raw: u16) -> f32 {
        (self.scale.to_volts(raw) - self.offset_volts) / self.volts_per_unit
    }
}
