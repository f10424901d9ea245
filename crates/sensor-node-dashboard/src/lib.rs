//! Pin-control dashboard for ESP32 sensor nodes
//!
//! Renders a self-contained HTML page (inline style and script) from a
//! snapshot of the node state, and provides the data types behind the JSON
//! endpoints the page polls:
//!
//! - `board` - static pin layout embedded into the page
//! - `context` - render context and operating mode
//! - `page` - HTML rendering
//! - `pins` - `/api/pins` and `/api/pin-control` payloads and the [`PinBank`]
//! - `serial` - recent log lines for `/api/serial`

#![no_std]

extern crate alloc;

pub mod board;
pub mod context;
mod escape;
pub mod page;
pub mod pins;
pub mod serial;

pub use board::{BoardLayout, ESP32_WROOM_32, PinDescriptor, Side};
pub use context::{OperatingMode, RenderContext};
pub use page::{render, render_to_string};
pub use pins::{
    PinBank, PinBankError, PinCapability, PinControlRequest, PinLevel, PinStatus, PinsResponse,
};
pub use serial::SerialLog;

/// Poll period of `GET /api/pins` used by the page, in milliseconds.
pub const PINS_POLL_INTERVAL_MS: u32 = 3000;
/// Poll period of `GET /api/serial` used by the page, in milliseconds.
pub const SERIAL_POLL_INTERVAL_MS: u32 = 2000;
