use std::mem;
use thiserror::Error;

#[cfg(target_os = "espidf")]
use esp_idf_svc::hal::gpio::*;

const PIN_COUNT: usize = 24;
const DIGITAL_PINS_BOUNDS: (usize, usize) = (0, 23);
const UART_COUNT: usize = 2;
const UART_BOUNDS: (usize, usize) = (0, 1);

/// Pin 14 is not bonded out on the ESP32-C6
const UNAVAILABLE_PIN: usize = 14;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum PeripheralError {
    #[error("peripheral is not a pin")]
    NotAPin,
    #[error("peripheral is not an uart")]
    NotAnUart,
}

/// Represents the esp32 Peripheral allowing to instanciate diferent Peripheral Types
#[derive(Debug, Default, PartialEq, Eq)]
pub enum Peripheral {
    Pin(u8),
    Uart(u8),
    #[default]
    None,
}

impl Peripheral {
    fn take(&mut self) -> Peripheral {
        mem::take(self)
    }

    /// Returns true if the peripheral was already taken or never existed
    pub fn is_none(&self) -> bool {
        matches!(self, Peripheral::None)
    }

    /// If the Peripheral is a Pin returns the corresponding AnyIOPin.
    /// If not it returns PeripheralError::NotAPin
    #[cfg(target_os = "espidf")]
    pub fn into_any_io_pin(self) -> Result<AnyIOPin, PeripheralError> {
        let pin = match self {
            Peripheral::Pin(pin_num) => match pin_num {
                0 => unsafe { Gpio0::new().downgrade() },
                1 => unsafe { Gpio1::new().downgrade() },
                2 => unsafe { Gpio2::new().downgrade() },
                3 => unsafe { Gpio3::new().downgrade() },
                4 => unsafe { Gpio4::new().downgrade() },
                5 => unsafe { Gpio5::new().downgrade() },
                6 => unsafe { Gpio6::new().downgrade() },
                7 => unsafe { Gpio7::new().downgrade() },
                8 => unsafe { Gpio8::new().downgrade() },
                9 => unsafe { Gpio9::new().downgrade() },
                10 => unsafe { Gpio10::new().downgrade() },
                11 => unsafe { Gpio11::new().downgrade() },
                12 => unsafe { Gpio12::new().downgrade() },
                13 => unsafe { Gpio13::new().downgrade() },
                15 => unsafe { Gpio15::new().downgrade() },
                16 => unsafe { Gpio16::new().downgrade() },
                17 => unsafe { Gpio17::new().downgrade() },
                18 => unsafe { Gpio18::new().downgrade() },
                19 => unsafe { Gpio19::new().downgrade() },
                20 => unsafe { Gpio20::new().downgrade() },
                21 => unsafe { Gpio21::new().downgrade() },
                22 => unsafe { Gpio22::new().downgrade() },
                23 => unsafe { Gpio23::new().downgrade() },
                _ => return Err(PeripheralError::NotAPin),
            },
            _ => return Err(PeripheralError::NotAPin),
        };
        Ok(pin)
    }

    /// If the Peripheral is an Uart returns its number.
    /// If not it returns PeripheralError::NotAnUart
    pub fn uart_number(&self) -> Result<u8, PeripheralError> {
        match self {
            Peripheral::Uart(uart_num) => Ok(*uart_num),
            _ => Err(PeripheralError::NotAnUart),
        }
    }
}

/// Represents the available peripherals in the esp32C6 and provides a way to get each particular
/// peripheral. Subsequent gets of the same peripheral will return Peripheral::None.
pub struct Peripherals {
    pins: [Peripheral; PIN_COUNT],
    uart: [Peripheral; UART_COUNT],
}

impl Peripherals {
    pub fn new() -> Peripherals {
        let pins: [Peripheral; PIN_COUNT] = std::array::from_fn(|pin_num| {
            if pin_num == UNAVAILABLE_PIN {
                Peripheral::None
            } else {
                Peripheral::Pin(pin_num as u8)
            }
        });
        let uart: [Peripheral; UART_COUNT] = [Peripheral::Uart(0), Peripheral::Uart(1)];
        Peripherals { pins, uart }
    }

    pub fn get_digital_pin(&mut self, pin_num: usize) -> Peripheral {
        if pin_num >= DIGITAL_PINS_BOUNDS.0 && pin_num <= DIGITAL_PINS_BOUNDS.1 {
            return self.pins[pin_num].take();
        }
        Peripheral::None
    }

    pub fn get_uart(&mut self, uart_num: usize) -> Peripheral {
        if uart_num >= UART_BOUNDS.0 && uart_num <= UART_BOUNDS.1 {
            return self.uart[uart_num].take();
        }
        Peripheral::None
    }
}

impl Default for Peripherals {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn test0_pin_can_only_be_taken_once() {
        let mut peripherals = Peripherals::new();
        assert_eq!(peripherals.get_digital_pin(5), Peripheral::Pin(5));
        assert_eq!(peripherals.get_digital_pin(5), Peripheral::None);
    }

    #[test]
    fn test1_out_of_bounds_and_missing_pins_are_none() {
        let mut peripherals = Peripherals::new();
        assert!(peripherals.get_digital_pin(24).is_none());
        assert!(peripherals.get_digital_pin(UNAVAILABLE_PIN).is_none());
    }

    #[test]
    fn test2_uart_bookkeeping() {
        let mut peripherals = Peripherals::new();
        let uart = peripherals.get_uart(1);
        assert_eq!(uart.uart_number(), Ok(1));
        assert!(peripherals.get_uart(1).is_none());
        assert!(peripherals.get_uart(2).is_none());
        assert_eq!(
            peripherals.get_digital_pin(3).uart_number(),
            Err(PeripheralError::NotAnUart)
        );
    }
}
