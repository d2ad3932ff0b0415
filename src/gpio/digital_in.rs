use crate::microcontroller_src::peripherals::PeripheralError;
use thiserror::Error;

#[cfg(target_os = "espidf")]
use {
    crate::microcontroller_src::peripherals::Peripheral,
    esp_idf_svc::hal::gpio::{AnyIOPin, Input, Level, PinDriver, Pull},
};

/// Enums the different errors possible when working with the digital in
#[derive(Debug, Error)]
pub enum DigitalInError {
    #[error("pin cannot be set as input")]
    CannotSetPinAsInput,
    #[error("pull cannot be set for pin")]
    CannotSetPullForPin,
    #[error("invalid peripheral: {0}")]
    InvalidPeripheral(PeripheralError),
    #[error("invalid pin")]
    InvalidPin,
}

/// A pin whose level can be sampled
pub trait DigitalInput {
    /// Returns true if the pin is currently `High`
    fn is_high(&self) -> bool;

    /// Returns true if the pin is currently `Low`
    fn is_low(&self) -> bool {
        !self.is_high()
    }
}

impl<T: DigitalInput + ?Sized> DigitalInput for &T {
    fn is_high(&self) -> bool {
        (**self).is_high()
    }
}

/// Driver for receiving digital inputs from a particular Pin
#[cfg(target_os = "espidf")]
pub struct DigitalIn<'a> {
    pin_driver: PinDriver<'a, AnyIOPin, Input>,
}

#[cfg(target_os = "espidf")]
impl<'a> DigitalIn<'a> {
    /// Create a new DigitalIn for a Pin, by default pull is set to Down so a
    /// disconnected echo line reads `Low`.
    ///
    /// # Errors
    ///
    /// - `DigitalInError::InvalidPeripheral`: If per parameter is not capable of transforming into an AnyIOPin,
    ///   or pin has already been used for another driver.
    /// - `DigitalInError::CannotSetPinAsInput`: If the per parameter is not capable of supporting input
    /// - `DigitalInError::CannotSetPullForPin`: If the pull down cannot be set
    pub(crate) fn new(per: Peripheral) -> Result<DigitalIn<'a>, DigitalInError> {
        let gpio = per
            .into_any_io_pin()
            .map_err(DigitalInError::InvalidPeripheral)?;
        let pin_driver = PinDriver::input(gpio).map_err(|_| DigitalInError::CannotSetPinAsInput)?;

        let mut digital_in = DigitalIn { pin_driver };
        digital_in.set_pull(Pull::Down)?;
        Ok(digital_in)
    }

    /// Set the pin Pull either to Pull Up or Down
    ///
    /// # Errors
    ///
    /// - `DigitalInError::CannotSetPullForPin`: If the pin driver is unable to support a setting of the pull
    pub fn set_pull(&mut self, pull_type: Pull) -> Result<(), DigitalInError> {
        self.pin_driver
            .set_pull(pull_type)
            .map_err(|_| DigitalInError::CannotSetPullForPin)
    }

    /// Get the current pin level
    pub fn get_level(&self) -> Level {
        self.pin_driver.get_level()
    }
}

#[cfg(target_os = "espidf")]
impl DigitalInput for DigitalIn<'_> {
    fn is_high(&self) -> bool {
        self.pin_driver.is_high()
    }
}
