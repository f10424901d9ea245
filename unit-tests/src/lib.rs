//! Host-side fakes shared by the integration tests.

mod browser;

use std::{
    cell::{Cell, RefCell},
    collections::VecDeque,
    convert::Infallible,
    rc::Rc,
};

use embedded_hal::digital::{ErrorType, OutputPin};
use embedded_hal_async::delay::DelayNs;
use sensor_node_telemetry::AnalogSource;

pub use browser::ScriptedPage;

/// Virtual time in nanoseconds, advanced only by [`ClockDelay`].
#[derive(Debug, Clone, Default)]
pub struct Clock(Rc<Cell<u64>>);

impl Clock {
    pub fn now_ms(&self) -> u64 {
        self.0.get() / 1_000_000
    }

    fn advance_ns(&self, ns: u64) {
        self.0.set(self.0.get() + ns);
    }
}

/// Delay that completes immediately and moves the clock forward.
#[derive(Debug, Clone)]
pub struct ClockDelay(pub Clock);

impl DelayNs for ClockDelay {
    async fn delay_ns(&mut self, ns: u32) {
        self.0.advance_ns(u64::from(ns));
    }
}

/// Output pin recording `(time_ms, is_high)` for every level change.
#[derive(Debug, Clone)]
pub struct RecordingPin {
    clock: Clock,
    events: Rc<RefCell<Vec<(u64, bool)>>>,
}

impl RecordingPin {
    pub fn new(clock: Clock) -> Self {
        Self {
            clock,
            events: Rc::default(),
        }
    }

    pub fn events(&self) -> Vec<(u64, bool)> {
        self.events.borrow().clone()
    }

    fn record(&self, high: bool) {
        self.events.borrow_mut().push((self.clock.now_ms(), high));
    }
}

impl ErrorType for RecordingPin {
    type Error = Infallible;
}

impl OutputPin for RecordingPin {
    fn set_low(&mut self) -> Result<(), Self::Error> {
        self.record(false);
        Ok(())
    }

    fn set_high(&mut self) -> Result<(), Self::Error> {
        self.record(true);
        Ok(())
    }
}

/// Output pin whose driver always fails.
#[derive(Debug, Default)]
pub struct BrokenPin;

#[derive(Debug)]
pub struct BrokenPinError;

impl embedded_hal::digital::Error for BrokenPinError {
    fn kind(&self) -> embedded_hal::digital::ErrorKind {
        embedded_hal::digital::ErrorKind::Other
    }
}

impl ErrorType for BrokenPin {
    type Error = BrokenPinError;
}

impl OutputPin for BrokenPin {
    fn set_low(&mut self) -> Result<(), Self::Error> {
        Err(BrokenPinError)
    }

    fn set_high(&mut self) -> Result<(), Self::Error> {
        Err(BrokenPinError)
    }
}

/// Analog channel replaying a fixed script; fails once the script runs out.
#[derive(Debug, Default)]
pub struct ScriptedAdc {
    samples: VecDeque<Option<u16>>,
}

impl ScriptedAdc {
    /// `None` entries fail the corresponding read.
    pub fn new(samples: impl IntoIterator<Item = Option<u16>>) -> Self {
        Self {
            samples: samples.into_iter().collect(),
        }
    }
}

impl AnalogSource for ScriptedAdc {
    type Error = ();

    fn read_raw(&mut self) -> Result<u16, Self::Error> {
        self.samples.pop_front().flatten().ok_or(())
    }
}
