//! Fixed-period sampling loop.

use embedded_hal::digital::OutputPin;
use embedded_hal_async::delay::DelayNs;

use crate::{AdcScale, Heartbeat, SensorReading, TELEMETRY_LINE_CAPACITY, TelemetryError};

/// One analog input channel.
pub trait AnalogSource {
    type Error: core::fmt::Debug;

    /// Take one raw sample.
    fn read_raw(&mut self) -> Result<u16, Self::Error>;
}

/// Heartbeat + analog sampling loop.
///
/// Every iteration pulses the indicator for one heartbeat period, then reads
/// the channel once and logs the scaled value as a JSON line.
pub struct Sampler<P, D, S> {
    sensor: &'static str,
    indicator: P,
    delay: D,
    source: S,
    heartbeat: Heartbeat,
    scale: AdcScale,
}

impl<P, D, S> Sampler<P, D, S>
where
    P: OutputPin,
    D: DelayNs,
    S: AnalogSource,
{
    /// Create a sampler with the default heartbeat and the battery scale.
    pub fn new(sensor: &'static str, indicator: P, delay: D, source: S) -> Self {
        Self {
            sensor,
            indicator,
            delay,
            source,
            heartbeat: Heartbeat::DEFAULT,
            scale: AdcScale::BATTERY,
        }
    }

    #[must_use]
    pub fn with_heartbeat(mut self, heartbeat: Heartbeat) -> Self {
        self.heartbeat = heartbeat;
        self
    }

    #[must_use]
    pub fn with_scale(mut self, scale: AdcScale) -> Self {
        self.scale = scale;
        self
    }

    pub fn sensor(&self) -> &'static str {
        self.sensor
    }

    /// Read and convert one sample without pulsing the indicator.
    pub fn read(&mut self) -> Result<SensorReading<'static>, TelemetryError> {
        let raw = self.source.read_raw().map_err(|e| {
            log::debug!("sampler: {} read error: {:?}", self.sensor, e);
            TelemetryError::Read
        })?;
        Ok(SensorReading::new(self.sensor, self.scale.to_volts(raw)))
    }

    /// Run one iteration: heartbeat period, then one sample.
    ///
    /// A failing indicator is only logged, the sample is still taken.
    pub async fn sample_once(&mut self) -> Result<SensorReading<'static>, TelemetryError> {
        if let Err(e) = self
            .heartbeat
            .pulse(&mut self.indicator, &mut self.delay)
            .await
        {
            log::warn!("sampler: {}", e);
        }
        self.read()
    }

    /// Run forever.
    ///
    /// A failed iteration is logged and skipped; the next one starts on the
    /// regular schedule.
    pub async fn run(mut self) -> ! {
        log::info!(
            "sampler: {} every {} ms, heartbeat duty {:.0}%",
            self.sensor,
            self.heartbeat.period_ms(),
            self.heartbeat.duty() * 100.0
        );
        loop {
            match self.sample_once().await {
                Ok(reading) => emit(&reading),
                Err(e) => log::warn!("sampler: {}: {}", self.sensor, e),
            }
        }
    }
}

/// Log a reading as a telemetry line.
pub fn emit(reading: &SensorReading<'_>) {
    let mut buf = [0u8; TELEMETRY_LINE_CAPACITY];
    match reading.write_json(&mut buf) {
        Ok(line) => log::info!("Telemetry: {}", line),
        Err(e) => log::warn!("sampler: {}: {}", reading.sensor, e),
    }
}
