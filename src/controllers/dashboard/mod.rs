mod http;

use core::cell::RefCell;

use embassy_net::Stack;
use embassy_sync::blocking_mutex::{Mutex, raw::CriticalSectionRawMutex};
use esp_hal::gpio::Output;
use sensor_node_dashboard::PinBank;

pub use http::DashboardHttpController;

use crate::config::{DEVICE, LED_PIN, RELAY_PIN};

/// LED and relay outputs driven from the page.
pub type DashboardPins = PinBank<Output<'static>, 2>;

pub(super) static PIN_BANK: Mutex<CriticalSectionRawMutex, RefCell<Option<DashboardPins>>> =
    Mutex::new(RefCell::new(None));

/// Move the controllable outputs into the shared pin bank.
pub fn init_dashboard_controller(
    stack: Stack<'static>,
    led: Output<'static>,
    relay: Output<'static>,
) -> DashboardHttpController {
    let mut bank = DashboardPins::new();
    for (pin, output) in [(&LED_PIN, led), (&RELAY_PIN, relay)] {
        if DEVICE.board.find(pin.gpio).is_none() {
            log::warn!("dashboard: gpio {} is not on the {} layout", pin.gpio, DEVICE.board.name);
        }
        if let Err(e) = bank.add(pin.gpio, pin.alias, output) {
            log::error!("dashboard: gpio {}: {}", pin.gpio, e);
        }
    }
    PIN_BANK.lock(|cell| {
        cell.borrow_mut().replace(bank);
    });

    DashboardHttpController::new(stack)
}
