use crate::{
    gpio::{DigitalOutError, DigitalOutput},
    ranger::{Measurement, TRIGGER_PULSE_US, TRIGGER_SETTLE_US},
    sensors::{EchoError, EchoSensor},
    utils::timing::Delay,
};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum HCSR04Error {
    #[error("trigger failed: {0}")]
    TriggerError(#[from] DigitalOutError),
    #[error(transparent)]
    EchoError(#[from] EchoError),
}

/// A sensor that produces one distance measurement per call
pub trait DistanceSensor {
    fn measure(&mut self) -> Result<Measurement, HCSR04Error>;
}

impl<T: DistanceSensor + ?Sized> DistanceSensor for &mut T {
    fn measure(&mut self) -> Result<Measurement, HCSR04Error> {
        (**self).measure()
    }
}

/// Simple abstraction of the HCSR04 that facilitates its handling
/// - `trig`: Output wired to the TRIG pin of the sensor
/// - `echo`: Measures the pulse the sensor puts on its ECHO pin
/// - `delay`: Used for the microsecond holds of the trigger pulse
pub struct HCSR04<O, E, D> {
    trig: O,
    echo: E,
    delay: D,
}

impl<O: DigitalOutput, E: EchoSensor, D: Delay> HCSR04<O, E, D> {
    pub fn new(trig: O, echo: E, delay: D) -> HCSR04<O, E, D> {
        HCSR04 { trig, echo, delay }
    }

    /// Fires one ultrasonic burst.
    ///
    /// First sets the trigger Low for a few micro-seconds to get a clean signal,
    /// then sets it High for 10 micro-seconds. The trigger is always released to Low,
    /// even if raising it failed.
    ///
    /// # Errors
    ///
    /// - `DigitalOutError`: If the trigger pin could not be driven.
    pub fn fire_trigger(&mut self) -> Result<(), DigitalOutError> {
        self.trig.set_low()?;
        self.delay.delay_us(TRIGGER_SETTLE_US);

        let pulse = self.trig.set_high().map(|_| self.delay.delay_us(TRIGGER_PULSE_US));
        let release = self.trig.set_low();
        pulse.and(release)
    }

    /// Returns the distance of the object in front of the sensor
    ///
    /// # Returns
    ///
    /// A `Measurement` with the echo duration and the distance in centimeters
    ///
    /// # Errors
    ///
    /// - `HCSR04Error::TriggerError`: If the burst could not be fired.
    /// - `HCSR04Error::EchoError`: If the echo did not come back in time.
    pub fn get_distance(&mut self) -> Result<Measurement, HCSR04Error> {
        self.fire_trigger()?;
        let duration = self.echo.measure_echo_duration()?;
        Ok(Measurement::from_duration(duration))
    }

    /// Gives back the trigger, echo and delay
    pub fn into_parts(self) -> (O, E, D) {
        (self.trig, self.echo, self.delay)
    }
}

impl<O: DigitalOutput, E: EchoSensor, D: Delay> DistanceSensor for HCSR04<O, E, D> {
    fn measure(&mut self) -> Result<Measurement, HCSR04Error> {
        self.get_distance()
    }
}
