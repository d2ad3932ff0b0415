use crate::{
    gpio::{DigitalInError, DigitalOutError},
    ranger::ConfigError,
    sensors::HCSR04Error,
    serial::UARTError,
};
use thiserror::Error;

/// Every error that can stop the ranger from being set up
#[derive(Debug, Error)]
pub enum RangerError {
    #[error(transparent)]
    ConfigError(#[from] ConfigError),
    #[error(transparent)]
    DigitalInError(#[from] DigitalInError),
    #[error(transparent)]
    DigitalOutError(#[from] DigitalOutError),
    #[error(transparent)]
    HCSR04Error(#[from] HCSR04Error),
    #[error(transparent)]
    UARTError(#[from] UARTError),
    #[error("output error: {0}")]
    OutputError(#[from] std::io::Error),
}
