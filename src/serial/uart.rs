use thiserror::Error;

#[cfg(target_os = "espidf")]
use {
    crate::microcontroller_src::peripherals::Peripheral,
    esp_idf_svc::hal::{
        delay::BLOCK,
        gpio::AnyIOPin,
        uart::{config, UartDriver, UART0, UART1},
        units::Hertz,
    },
    std::io,
};

pub const DEFAULT_BAUDRATE: u32 = 9_600;

#[derive(Debug, Error)]
pub enum UARTError {
    #[error("invalid pin")]
    InvalidPin,
    #[error("invalid uart number")]
    InvalidUartNumber,
    #[error("invalid baudrate {0}")]
    InvalidBaudrate(u32),
    #[error("uart driver could not be started")]
    DriverError,
    #[error("write error")]
    WriteError,
}

/// Transmit side of an UART, used as the text output of the ranger.
/// Bytes are written through `std::io::Write`.
#[cfg(target_os = "espidf")]
pub struct UART<'a> {
    driver: UartDriver<'a>,
    baudrate: u32,
}

#[cfg(target_os = "espidf")]
impl<'a> UART<'a> {
    /// Starts the UART `uart_peripheral` on the given pins.
    ///
    /// # Errors
    ///
    /// - `UARTError::InvalidBaudrate`: If the baudrate is zero.
    /// - `UARTError::InvalidPin`: If any of the pins is not available.
    /// - `UARTError::InvalidUartNumber`: If the peripheral is not UART 0 or 1.
    /// - `UARTError::DriverError`: If the ESP driver refuses the configuration.
    pub(crate) fn new(
        tx: Peripheral,
        rx: Peripheral,
        uart_peripheral: Peripheral,
        baudrate: u32,
    ) -> Result<UART<'a>, UARTError> {
        if baudrate == 0 {
            return Err(UARTError::InvalidBaudrate(baudrate));
        }
        let tx_peripheral = tx.into_any_io_pin().map_err(|_| UARTError::InvalidPin)?;
        let rx_peripheral = rx.into_any_io_pin().map_err(|_| UARTError::InvalidPin)?;
        let config = config::Config::new().baudrate(Hertz(baudrate));

        let driver = match uart_peripheral.uart_number() {
            Ok(0) => UartDriver::new(
                unsafe { UART0::new() },
                tx_peripheral,
                rx_peripheral,
                Option::<AnyIOPin>::None,
                Option::<AnyIOPin>::None,
                &config,
            ),
            Ok(1) => UartDriver::new(
                unsafe { UART1::new() },
                tx_peripheral,
                rx_peripheral,
                Option::<AnyIOPin>::None,
                Option::<AnyIOPin>::None,
                &config,
            ),
            _ => return Err(UARTError::InvalidUartNumber),
        }
        .map_err(|_| UARTError::DriverError)?;

        Ok(UART { driver, baudrate })
    }

    pub fn baudrate(&self) -> u32 {
        self.baudrate
    }
}

#[cfg(target_os = "espidf")]
impl io::Write for UART<'_> {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.driver
            .write(buf)
            .map_err(|_| io::Error::other(UARTError::WriteError))
    }

    fn flush(&mut self) -> io::Result<()> {
        self.driver
            .wait_tx_done(BLOCK)
            .map_err(|_| io::Error::other(UARTError::WriteError))
    }
}
