use crate::serial::DEFAULT_BAUDRATE;
use std::time::Duration;
use thiserror::Error;

pub const DEFAULT_TRIGGER_PIN: usize = 5;
pub const DEFAULT_ECHO_PIN: usize = 6;

/// Time the trigger is held low before the pulse, to get a clean rising edge
pub const TRIGGER_SETTLE_US: u32 = 2;
/// Width of the trigger pulse that fires one ultrasonic burst
pub const TRIGGER_PULSE_US: u32 = 10;
/// Upper bound for the whole echo measurement. 30 ms is beyond the ~4 m range
/// of an HC-SR04, so hitting it means the echo was lost.
pub const ECHO_TIMEOUT: Duration = Duration::from_micros(30_000);
/// Pause between the end of a measurement and the next trigger
pub const MEASUREMENT_INTERVAL: Duration = Duration::from_millis(1000);

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("trigger and echo cannot share pin {0}")]
    SharedPin(usize),
    #[error("baud rate must be greater than zero")]
    ZeroBaudRate,
}

/// Everything that can be chosen about the ranger: which pins the sensor is
/// wired to and the speed of the serial link.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RangerConfig {
    pub trigger_pin: usize,
    pub echo_pin: usize,
    pub baud_rate: u32,
}

impl RangerConfig {
    pub const fn new(trigger_pin: usize, echo_pin: usize, baud_rate: u32) -> Self {
        Self {
            trigger_pin,
            echo_pin,
            baud_rate,
        }
    }

    /// Checks the configuration can be applied to the hardware.
    ///
    /// # Errors
    ///
    /// - `ConfigError::SharedPin`: If trigger and echo are the same pin.
    /// - `ConfigError::ZeroBaudRate`: If the baud rate is zero.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.trigger_pin == self.echo_pin {
            return Err(ConfigError::SharedPin(self.trigger_pin));
        }
        if self.baud_rate == 0 {
            return Err(ConfigError::ZeroBaudRate);
        }
        Ok(())
    }
}

impl Default for RangerConfig {
    fn default() -> Self {
        Self::new(DEFAULT_TRIGGER_PIN, DEFAULT_ECHO_PIN, DEFAULT_BAUDRATE)
    }
}
