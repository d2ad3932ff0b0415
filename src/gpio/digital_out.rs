use crate::microcontroller_src::peripherals::PeripheralError;
use thiserror::Error;

#[cfg(target_os = "espidf")]
use {
    crate::microcontroller_src::peripherals::Peripheral,
    esp_idf_svc::hal::gpio::{AnyIOPin, Level, Output, PinDriver},
};

/// Enums the different errors possible when working with the digital out
#[derive(Debug, Error)]
pub enum DigitalOutError {
    #[error("pin cannot be set as output")]
    CannotSetPinAsOutput,
    #[error("invalid pin")]
    InvalidPin,
    #[error("invalid peripheral: {0}")]
    InvalidPeripheral(PeripheralError),
}

/// A pin that can be driven `High` or `Low`
pub trait DigitalOutput {
    /// Sets the pin level to `High`.
    fn set_high(&mut self) -> Result<(), DigitalOutError>;

    /// Sets the pin level to `Low`.
    fn set_low(&mut self) -> Result<(), DigitalOutError>;
}

impl<T: DigitalOutput + ?Sized> DigitalOutput for &mut T {
    fn set_high(&mut self) -> Result<(), DigitalOutError> {
        (**self).set_high()
    }

    fn set_low(&mut self) -> Result<(), DigitalOutError> {
        (**self).set_low()
    }
}

/// Driver to handle a digital output for a particular Pin
#[cfg(target_os = "espidf")]
pub struct DigitalOut<'a> {
    pin_driver: PinDriver<'a, AnyIOPin, Output>,
}

#[cfg(target_os = "espidf")]
impl<'a> DigitalOut<'a> {
    /// Creates a new `DigitalOut` for a specified pin.
    ///
    /// # Arguments
    ///
    /// - `per`: A Peripheral that can be transformed into an AnyIOPin.
    ///
    /// # Errors
    ///
    /// - `DigitalOutError::InvalidPeripheral`: If the peripheral cannot be converted into an AnyIOPin.
    /// - `DigitalOutError::CannotSetPinAsOutput`: If the pin cannot be set as an output.
    pub(crate) fn new(per: Peripheral) -> Result<DigitalOut<'a>, DigitalOutError> {
        let gpio = per
            .into_any_io_pin()
            .map_err(DigitalOutError::InvalidPeripheral)?;
        let pin_driver =
            PinDriver::output(gpio).map_err(|_| DigitalOutError::CannotSetPinAsOutput)?;

        Ok(DigitalOut { pin_driver })
    }

    /// Sets the pin level to either `High` or `Low`.
    ///
    /// # Errors
    ///
    /// - `DigitalOutError::InvalidPin`: If the pin level cannot be set.
    pub fn set_level(&mut self, level: Level) -> Result<(), DigitalOutError> {
        self.pin_driver
            .set_level(level)
            .map_err(|_| DigitalOutError::InvalidPin)
    }

    /// Gets the current level of the pin.
    pub fn get_level(&self) -> Level {
        if self.pin_driver.is_set_high() {
            Level::High
        } else {
            Level::Low
        }
    }
}

#[cfg(target_os = "espidf")]
impl DigitalOutput for DigitalOut<'_> {
    fn set_high(&mut self) -> Result<(), DigitalOutError> {
        self.set_level(Level::High)
    }

    fn set_low(&mut self) -> Result<(), DigitalOutError> {
        self.set_level(Level::Low)
    }
}
