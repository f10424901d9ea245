//! Capturing logger
//!
//! Prints every record on the UART like the `esp-println` logger and keeps
//! the most recent lines for the dashboard log panel.

use core::{cell::RefCell, fmt::Write as _};

use embassy_sync::blocking_mutex::{Mutex, raw::CriticalSectionRawMutex};
use heapless::String;
use log::{LevelFilter, Log, Metadata, Record};
use sensor_node_dashboard::SerialLog;

pub const SERIAL_LINES: usize = 16;
pub const SERIAL_LINE_WIDTH: usize = 96;

pub type SerialLines = SerialLog<SERIAL_LINES, SERIAL_LINE_WIDTH>;

/// Lines longer than this are cut before they reach the ring.
const FORMAT_BUFFER_SIZE: usize = 256;

static SERIAL_LOG: Mutex<CriticalSectionRawMutex, RefCell<SerialLines>> =
    Mutex::new(RefCell::new(SerialLog::new()));

static LOGGER: CapturingLogger = CapturingLogger;

struct CapturingLogger;

impl Log for CapturingLogger {
    fn enabled(&self, metadata: &Metadata<'_>) -> bool {
        metadata.level() <= log::max_level()
    }

    fn log(&self, record: &Record<'_>) {
        if !self.enabled(record.metadata()) {
            return;
        }
        esp_println::println!("{} - {}", record.level(), record.args());

        let mut line = String::<FORMAT_BUFFER_SIZE>::new();
        // Overflow leaves the prefix that fit.
        let _ = write!(line, "{} - {}", record.level(), record.args());
        SERIAL_LOG.lock(|log| log.borrow_mut().push(&line));
    }

    fn flush(&self) {}
}

/// Install the capturing logger as the global `log` backend.
///
/// Must be called once, before the first log record.
pub fn init_capturing_logger(level: LevelFilter) {
    if log::set_logger(&LOGGER).is_ok() {
        log::set_max_level(level);
    }
}

/// Copy of the captured lines, oldest first.
pub fn serial_snapshot() -> SerialLines {
    SERIAL_LOG.lock(|log| log.borrow().clone())
}
