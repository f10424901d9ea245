//! Static board pin layout.
//!
//! The layout is fixed board metadata: pin numbers, silk-screen names and
//! pixel coordinates of each pin on the rendered board outline. It is
//! embedded into the dashboard page as a JSON literal.

use core::fmt::Write;

use serde::Serialize;

/// Capacity of the buffer the layout JSON is serialized into.
pub const LAYOUT_JSON_CAPACITY: usize = 2048;

/// Board edge a pin header sits on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Side {
    Left,
    Right,
}

/// A single pin of the board layout.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct PinDescriptor {
    pub pin: u8,
    pub name: &'static str,
    pub x: u16,
    pub y: u16,
    pub side: Side,
}

impl PinDescriptor {
    const fn left(pin: u8, name: &'static str, y: u16) -> Self {
        Self {
            pin,
            name,
            x: 15,
            y,
            side: Side::Left,
        }
    }

    const fn right(pin: u8, name: &'static str, y: u16) -> Self {
        Self {
            pin,
            name,
            x: 275,
            y,
            side: Side::Right,
        }
    }
}

/// Named board layout.
#[derive(Debug, Clone, Copy, Serialize)]
pub struct BoardLayout {
    pub name: &'static str,
    pub pins: &'static [PinDescriptor],
}

impl BoardLayout {
    /// Find the descriptor of a pin by its GPIO number.
    pub fn find(&self, pin: u8) -> Option<&PinDescriptor> {
        self.pins.iter().find(|descriptor| descriptor.pin == pin)
    }

    /// Serialize the layout as JSON into the writer.
    pub fn write_json(&self, out: &mut impl Write) -> core::fmt::Result {
        let mut buf = [0u8; LAYOUT_JSON_CAPACITY];
        let n = serde_json_core::to_slice(self, &mut buf).map_err(|_| core::fmt::Error)?;
        let json = core::str::from_utf8(&buf[..n]).map_err(|_| core::fmt::Error)?;
        out.write_str(json)
    }
}

/// ESP32-WROOM-32 devkit layout.
pub const ESP32_WROOM_32: BoardLayout = BoardLayout {
    name: "ESP32-WROOM-32",
    pins: &[
        PinDescriptor::left(36, "VP/A0", 60),
        PinDescriptor::left(39, "VN/A3", 75),
        PinDescriptor::left(34, "A6", 90),
        PinDescriptor::left(35, "A7", 105),
        PinDescriptor::left(32, "A4/T9", 120),
        PinDescriptor::left(33, "A5/T8", 135),
        PinDescriptor::left(25, "A18/DAC1", 150),
        PinDescriptor::left(26, "A19/DAC2", 165),
        PinDescriptor::left(27, "A17/T7", 180),
        PinDescriptor::left(14, "A16/T6", 195),
        PinDescriptor::left(12, "A15/T5", 210),
        PinDescriptor::left(13, "A14/T4", 225),
        PinDescriptor::right(2, "A12/T2/LED", 105),
        PinDescriptor::right(15, "A13/T3", 90),
        PinDescriptor::right(0, "BOOT", 120),
        PinDescriptor::right(4, "A10/T0", 135),
        PinDescriptor::right(16, "RX2", 150),
        PinDescriptor::right(17, "TX2", 165),
        PinDescriptor::right(5, "SS", 180),
        PinDescriptor::right(18, "SCK", 195),
        PinDescriptor::right(19, "MISO", 210),
        PinDescriptor::right(21, "SDA", 225),
        PinDescriptor::right(3, "RX0", 240),
        PinDescriptor::right(1, "TX0", 255),
        PinDescriptor::right(22, "SCL", 270),
        PinDescriptor::right(23, "MOSI", 285),
    ],
};

#[cfg(test)]
mod tests {
    use alloc::string::String;

    use super::*;

    #[test]
    fn layout_has_26_unique_pins() {
        let pins = ESP32_WROOM_32.pins;
        assert_eq!(pins.len(), 26);
        for (i, a) in pins.iter().enumerate() {
            assert!(
                pins[i + 1..].iter().all(|b| b.pin != a.pin),
                "pin {} is listed twice",
                a.pin
            );
        }
    }

    #[test]
    fn headers_share_a_column() {
        for descriptor in ESP32_WROOM_32.pins {
            match descriptor.side {
                Side::Left => assert_eq!(descriptor.x, 15),
                Side::Right => assert_eq!(descriptor.x, 275),
            }
        }
    }

    #[test]
    fn find_returns_led_pin() {
        let led = ESP32_WROOM_32.find(2).unwrap();
        assert_eq!(led.name, "A12/T2/LED");
        assert_eq!(led.side, Side::Right);
        assert!(ESP32_WROOM_32.find(6).is_none());
    }

    #[test]
    fn json_fits_buffer_and_uses_lowercase_sides() {
        let mut json = String::new();
        ESP32_WROOM_32.write_json(&mut json).unwrap();

        assert!(json.len() < LAYOUT_JSON_CAPACITY);
        assert!(json.starts_with(r#"{"name":"ESP32-WROOM-32","pins":["#));
        assert!(json.contains(r#"{"pin":36,"name":"VP/A0","x":15,"y":60,"side":"left"}"#));
        assert!(json.contains(r#"{"pin":23,"name":"MOSI","x":275,"y":285,"side":"right"}"#));
    }
}
