use core::cell::Cell;

use embassy_sync::blocking_mutex::{Mutex, raw::CriticalSectionRawMutex};

/// Latest probe temperature, `None` until the first successful sample.
static TEMPERATURE: Mutex<CriticalSectionRawMutex, Cell<Option<f32>>> = Mutex::new(Cell::new(None));

pub fn set_temperature(celsius: f32) {
    TEMPERATURE.lock(|cell| cell.set(Some(celsius)));
}

/// Latest temperature in °C, `0.0` before the probe reported anything.
pub fn temperature() -> f32 {
    TEMPERATURE.lock(Cell::get).unwrap_or(0.0)
}
