//! Visible heartbeat: a short high pulse once per period.

use embedded_hal::digital::OutputPin;
use embedded_hal_async::delay::DelayNs;

use crate::TelemetryError;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Heartbeat {
    pub on_ms: u32,
    pub off_ms: u32,
}

impl Default for Heartbeat {
    fn default() -> Self {
        Self::DEFAULT
    }
}

impl Heartbeat {
    /// 100 ms on, 900 ms off.
    pub const DEFAULT: Heartbeat = Heartbeat {
        on_ms: 100,
        off_ms: 900,
    };

    pub const fn new(on_ms: u32, off_ms: u32) -> Self {
        Self { on_ms, off_ms }
    }

    pub const fn period_ms(&self) -> u32 {
        self.on_ms + self.off_ms
    }

    /// Fraction of the period the output is high.
    pub fn duty(&self) -> f32 {
        // Millisecond periods are far below f32's exact integer range.
        #[allow(clippy::cast_precision_loss)]
        let duty = self.on_ms as f32 / self.period_ms() as f32;
        duty
    }

    /// Drive one full period: high for `on_ms`, then low for `off_ms`.
    ///
    /// Both delays always elapse, so a failing output keeps the period.
    pub async fn pulse<P: OutputPin, D: DelayNs>(
        &self,
        pin: &mut P,
        delay: &mut D,
    ) -> Result<(), TelemetryError> {
        let high = pin.set_high();
        delay.delay_ms(self.on_ms).await;
        let low = pin.set_low();
        delay.delay_ms(self.off_ms).await;
        high.and(low).map_err(|_| TelemetryError::Indicator)
    }
}
