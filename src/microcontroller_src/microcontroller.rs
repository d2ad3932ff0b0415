use crate::{
    gpio::{DigitalIn, DigitalInError, DigitalOut, DigitalOutError},
    microcontroller_src::peripherals::Peripherals,
    ranger::RangerConfig,
    sensors::{PulseTimer, HCSR04},
    serial::{UARTError, UART},
    utils::{ranger_error::RangerError, timing::EspClock},
};
use esp_idf_svc::hal::delay::Ets;

/// UART used for the ranger text output
pub const RANGER_UART_NUM: usize = 1;
/// TX/RX pins of `RANGER_UART_NUM`
pub const RANGER_UART_TX_PIN: usize = 16;
pub const RANGER_UART_RX_PIN: usize = 17;

/// HC-SR04 wired to the pins of a `RangerConfig`
pub type RangerSensor<'a> = HCSR04<DigitalOut<'a>, PulseTimer<DigitalIn<'a>, EspClock>, Ets>;

/// Primary abstraction for interacting with the microcontroller, providing access to the
/// peripherals required for configuring pins and the serial output.
///
/// - `peripherals`: An instance of `Peripherals`, keeping track of which pins and UARTs
///   were already handed out.
pub struct Microcontroller {
    peripherals: Peripherals,
}

impl Microcontroller {
    /// Creates a new Microcontroller instance
    ///
    /// # Returns
    ///
    /// The new Microcontroller
    pub fn take() -> Self {
        esp_idf_svc::sys::link_patches();
        Microcontroller {
            peripherals: Peripherals::new(),
        }
    }

    /// Creates a DigitalIn on the ESP pin with number 'pin_num' to read digital inputs.
    ///
    /// # Errors
    ///
    /// - `DigitalInError::InvalidPeripheral`: If the pin does not exist or was already taken.
    /// - `DigitalInError::CannotSetPinAsInput`: If the pin cannot work as input.
    pub fn set_pin_as_digital_in<'a>(&mut self, pin_num: usize) -> Result<DigitalIn<'a>, DigitalInError> {
        let pin_peripheral = self.peripherals.get_digital_pin(pin_num);
        DigitalIn::new(pin_peripheral)
    }

    /// Creates a DigitalOut on the ESP pin with number 'pin_num' to write digital outputs.
    ///
    /// # Errors
    ///
    /// - `DigitalOutError::InvalidPeripheral`: If the pin does not exist or was already taken.
    /// - `DigitalOutError::CannotSetPinAsOutput`: If the pin cannot work as output.
    pub fn set_pin_as_digital_out<'a>(&mut self, pin_num: usize) -> Result<DigitalOut<'a>, DigitalOutError> {
        let pin_peripheral = self.peripherals.get_digital_pin(pin_num);
        DigitalOut::new(pin_peripheral)
    }

    /// Configures the specified pins for an UART with the given baudrate,
    /// no parity and one stop bit.
    ///
    /// # Errors
    ///
    /// - `UARTError::InvalidPin`: If a pin does not exist or was already taken.
    /// - `UARTError::InvalidUartNumber`: If the UART does not exist or was already taken.
    /// - `UARTError::InvalidBaudrate`: If the baudrate is zero.
    pub fn set_pins_for_uart<'a>(&mut self, tx_pin: usize, rx_pin: usize, uart_num: usize, baudrate: u32) -> Result<UART<'a>, UARTError> {
        let tx_peripheral = self.peripherals.get_digital_pin(tx_pin);
        let rx_peripheral = self.peripherals.get_digital_pin(rx_pin);
        let uart_peripheral = self.peripherals.get_uart(uart_num);

        UART::new(tx_peripheral, rx_peripheral, uart_peripheral, baudrate)
    }

    /// Sets up the trigger as output, the echo as input and the ranger UART at the
    /// baud rate of `config`.
    ///
    /// # Errors
    ///
    /// - `RangerError::ConfigError`: If the configuration does not validate.
    /// - Any error produced while taking the pins or the UART.
    pub fn set_pins_for_ranger<'a>(&mut self, config: &RangerConfig) -> Result<(RangerSensor<'a>, UART<'a>), RangerError> {
        config.validate()?;
        let trig = self.set_pin_as_digital_out(config.trigger_pin)?;
        let echo = self.set_pin_as_digital_in(config.echo_pin)?;
        let uart = self.set_pins_for_uart(RANGER_UART_TX_PIN, RANGER_UART_RX_PIN, RANGER_UART_NUM, config.baud_rate)?;

        let sensor = HCSR04::new(trig, PulseTimer::new(echo, EspClock), Ets);
        Ok((sensor, uart))
    }
}
