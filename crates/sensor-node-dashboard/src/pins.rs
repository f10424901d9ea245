//! Pin runtime state exchanged with the dashboard page.

use core::fmt;

use embedded_hal::digital::StatefulOutputPin;
use heapless::Vec;
use serde::{Deserialize, Serialize};

/// Logic level as carried by the pin API.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum PinLevel {
    High,
    Low,
}

impl From<bool> for PinLevel {
    fn from(high: bool) -> Self {
        if high { PinLevel::High } else { PinLevel::Low }
    }
}

/// What the page may do with a pin.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum PinCapability {
    /// Output driven from the dashboard.
    GpioWrite,
}

/// One entry of the `GET /api/pins` response.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct PinStatus<'a> {
    pub pin: u8,
    pub state: PinLevel,
    #[serde(rename = "type")]
    pub capability: PinCapability,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub alias: Option<&'a str>,
}

/// `GET /api/pins` response body.
#[derive(Debug, Serialize)]
pub struct PinsResponse<'a> {
    pub pins: &'a [PinStatus<'a>],
}

/// `POST /api/pin-control` request body.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
pub struct PinControlRequest {
    pub pin: u8,
    pub value: PinLevel,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PinBankError {
    /// The pin is not part of the bank.
    UnknownPin(u8),
    /// All slots are taken.
    Full,
    /// The driver rejected the operation.
    Driver,
}

impl fmt::Display for PinBankError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PinBankError::UnknownPin(pin) => write!(f, "pin {} is not controllable", pin),
            PinBankError::Full => write!(f, "pin bank is full"),
            PinBankError::Driver => write!(f, "pin driver error"),
        }
    }
}

struct ControlledPin<P> {
    number: u8,
    alias: &'static str,
    output: P,
}

/// Set of output pins the dashboard may drive.
pub struct PinBank<P, const N: usize> {
    pins: Vec<ControlledPin<P>, N>,
}

impl<P: StatefulOutputPin, const N: usize> Default for PinBank<P, N> {
    fn default() -> Self {
        Self::new()
    }
}

impl<P: StatefulOutputPin, const N: usize> PinBank<P, N> {
    pub const fn new() -> Self {
        Self { pins: Vec::new() }
    }

    /// Register an output pin under its GPIO number.
    pub fn add(&mut self, number: u8, alias: &'static str, output: P) -> Result<(), PinBankError> {
        self.pins
            .push(ControlledPin {
                number,
                alias,
                output,
            })
            .map_err(|_| PinBankError::Full)
    }

    /// Drive a pin to the requested level.
    pub fn set(&mut self, number: u8, level: PinLevel) -> Result<(), PinBankError> {
        let pin = self
            .pins
            .iter_mut()
            .find(|pin| pin.number == number)
            .ok_or(PinBankError::UnknownPin(number))?;
        let result = match level {
            PinLevel::High => pin.output.set_high(),
            PinLevel::Low => pin.output.set_low(),
        };
        result.map_err(|_| PinBankError::Driver)?;
        log::info!("pins: gpio {} ({}) set {:?}", number, pin.alias, level);
        Ok(())
    }

    /// Current level of a pin.
    pub fn level(&mut self, number: u8) -> Result<PinLevel, PinBankError> {
        let pin = self
            .pins
            .iter_mut()
            .find(|pin| pin.number == number)
            .ok_or(PinBankError::UnknownPin(number))?;
        pin.output
            .is_set_high()
            .map(PinLevel::from)
            .map_err(|_| PinBankError::Driver)
    }

    /// Snapshot of every pin for the API.
    ///
    /// Pins whose level cannot be read are left out.
    pub fn statuses(&mut self) -> Vec<PinStatus<'static>, N> {
        let mut statuses = Vec::new();
        for pin in &mut self.pins {
            let Ok(high) = pin.output.is_set_high() else {
                continue;
            };
            // Capacities match, the push cannot fail.
            let _ = statuses.push(PinStatus {
                pin: pin.number,
                state: PinLevel::from(high),
                capability: PinCapability::GpioWrite,
                alias: Some(pin.alias),
            });
        }
        statuses
    }
}

#[cfg(test)]
mod tests {
    use core::convert::Infallible;

    use embedded_hal::digital::{ErrorType, OutputPin};

    use super::*;

    #[derive(Default)]
    struct FakePin {
        high: bool,
    }

    impl ErrorType for FakePin {
        type Error = Infallible;
    }

    impl OutputPin for FakePin {
        fn set_low(&mut self) -> Result<(), Self::Error> {
            self.high = false;
            Ok(())
        }

        fn set_high(&mut self) -> Result<(), Self::Error> {
            self.high = true;
            Ok(())
        }
    }

    impl StatefulOutputPin for FakePin {
        fn is_set_high(&mut self) -> Result<bool, Self::Error> {
            Ok(self.high)
        }

        fn is_set_low(&mut self) -> Result<bool, Self::Error> {
            Ok(!self.high)
        }
    }

    fn bank() -> PinBank<FakePin, 2> {
        let mut bank = PinBank::new();
        bank.add(2, "LED", FakePin::default()).unwrap();
        bank.add(4, "Relay", FakePin::default()).unwrap();
        bank
    }

    #[test]
    fn rejects_pins_beyond_capacity() {
        let mut bank = bank();
        assert_eq!(
            bank.add(5, "Extra", FakePin::default()),
            Err(PinBankError::Full)
        );
        assert_eq!(bank.statuses().len(), 2);
    }

    #[test]
    fn set_changes_level() {
        let mut bank = bank();
        bank.set(4, PinLevel::High).unwrap();
        assert_eq!(bank.level(4), Ok(PinLevel::High));
        assert_eq!(bank.level(2), Ok(PinLevel::Low));

        bank.set(4, PinLevel::Low).unwrap();
        assert_eq!(bank.level(4), Ok(PinLevel::Low));
    }

    #[test]
    fn unknown_pin_is_rejected() {
        let mut bank = bank();
        assert_eq!(
            bank.set(13, PinLevel::High),
            Err(PinBankError::UnknownPin(13))
        );
        assert_eq!(bank.level(13), Err(PinBankError::UnknownPin(13)));
    }

    #[test]
    fn statuses_are_writable_pins_in_order() {
        let mut bank = bank();
        bank.set(2, PinLevel::High).unwrap();

        let statuses = bank.statuses();
        assert_eq!(statuses.len(), 2);
        assert_eq!(statuses[0].pin, 2);
        assert_eq!(statuses[0].state, PinLevel::High);
        assert_eq!(statuses[0].alias, Some("LED"));
        assert_eq!(statuses[1].pin, 4);
        assert_eq!(statuses[1].state, PinLevel::Low);
        assert!(
            statuses
                .iter()
                .all(|status| status.capability == PinCapability::GpioWrite)
        );
    }

    #[test]
    fn serializes_pins_response() {
        let statuses = [
            PinStatus {
                pin: 2,
                state: PinLevel::Low,
                capability: PinCapability::GpioWrite,
                alias: Some("LED"),
            },
            PinStatus {
                pin: 4,
                state: PinLevel::High,
                capability: PinCapability::GpioWrite,
                alias: None,
            },
        ];
        let mut buf = [0u8; 256];
        let n = serde_json_core::to_slice(&PinsResponse { pins: &statuses }, &mut buf).unwrap();
        assert_eq!(
            core::str::from_utf8(&buf[..n]).unwrap(),
            r#"{"pins":[{"pin":2,"state":"LOW","type":"gpio_write","alias":"LED"},{"pin":4,"state":"HIGH","type":"gpio_write"}]}"#
        );
    }

    #[test]
    fn parses_pin_control_request() {
        let (request, _) =
            serde_json_core::from_str::<PinControlRequest>(r#"{"pin": 2, "value": "HIGH"}"#)
                .unwrap();
        assert_eq!(
            request,
            PinControlRequest {
                pin: 2,
                value: PinLevel::High
            }
        );
        assert!(
            serde_json_core::from_str::<PinControlRequest>(r#"{"pin": 2, "value": "ON"}"#)
                .is_err()
        );
    }
}
