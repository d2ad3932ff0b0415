use crate::{
    gpio::DigitalInput,
    ranger::ECHO_TIMEOUT,
    utils::timing::Clock,
};
use std::time::Duration;
use thiserror::Error;

#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
pub enum EchoError {
    #[error("no echo edge detected within {0:?}")]
    Timeout(Duration),
}

/// Something able to tell how long the echo line stayed high after a trigger
pub trait EchoSensor {
    /// Blocks until the echo pulse ends and returns its high time.
    ///
    /// # Errors
    ///
    /// - `EchoError::Timeout`: If the pulse does not start or does not end within
    ///   the bound of the implementation.
    fn measure_echo_duration(&mut self) -> Result<Duration, EchoError>;
}

impl<T: EchoSensor + ?Sized> EchoSensor for &mut T {
    fn measure_echo_duration(&mut self) -> Result<Duration, EchoError> {
        (**self).measure_echo_duration()
    }
}

/// Times a high pulse on a digital input by polling it against a clock.
/// The timeout covers the whole measurement, from the call until the falling edge.
pub struct PulseTimer<I, C> {
    echo: I,
    clock: C,
    timeout: Duration,
}

impl<I: DigitalInput, C: Clock> PulseTimer<I, C> {
    pub fn new(echo: I, clock: C) -> Self {
        Self::with_timeout(echo, clock, ECHO_TIMEOUT)
    }

    pub fn with_timeout(echo: I, clock: C, timeout: Duration) -> Self {
        Self {
            echo,
            clock,
            timeout,
        }
    }

    pub fn timeout(&self) -> Duration {
        self.timeout
    }

    /// Polls while the echo line stays at `high`, returning the time it changed
    fn wait_while_level(&self, high: bool, deadline_us: u64) -> Result<u64, EchoError> {
        loop {
            let now = self.clock.now_us();
            if self.echo.is_high() != high {
                return Ok(now);
            }
            if now >= deadline_us {
                return Err(EchoError::Timeout(self.timeout));
            }
        }
    }
}

impl<I: DigitalInput, C: Clock> EchoSensor for PulseTimer<I, C> {
    fn measure_echo_duration(&mut self) -> Result<Duration, EchoError> {
        let deadline_us = self.clock.now_us() + self.timeout.as_micros() as u64;

        // A pulse already in progress belongs to a previous trigger
        self.wait_while_level(true, deadline_us)?;
        let rise_us = self.wait_while_level(false, deadline_us)?;
        let fall_us = self.wait_while_level(true, deadline_us)?;

        Ok(Duration::from_micros(fall_us.saturating_sub(rise_us)))
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::sim::{ScriptedEchoPin, VirtualClock};

    fn timer_with_pulse(rise_us: u64, fall_us: u64) -> PulseTimer<ScriptedEchoPin, VirtualClock> {
        let clock = VirtualClock::with_tick(1);
        let echo = ScriptedEchoPin::new(clock.clone());
        echo.schedule_pulse(rise_us, fall_us);
        PulseTimer::new(echo, clock)
    }

    #[test]
    fn test0_measures_high_time() {
        let mut timer = timer_with_pulse(100, 2_100);
        let duration = timer.measure_echo_duration().unwrap();
        assert!(duration.as_micros().abs_diff(2_000) <= 2, "{duration:?}");
    }

    #[test]
    fn test1_times_out_without_rising_edge() {
        let clock = VirtualClock::with_tick(1);
        let echo = ScriptedEchoPin::new(clock.clone());
        let mut timer = PulseTimer::new(echo, clock.clone());
        assert_eq!(
            timer.measure_echo_duration(),
            Err(EchoError::Timeout(ECHO_TIMEOUT))
        );
        assert!(clock.now_us() >= ECHO_TIMEOUT.as_micros() as u64);
    }

    #[test]
    fn test2_times_out_when_pulse_never_ends() {
        let mut timer = timer_with_pulse(10, u64::MAX);
        assert!(matches!(
            timer.measure_echo_duration(),
            Err(EchoError::Timeout(_))
        ));
    }

    #[test]
    fn test3_custom_timeout_is_used() {
        let clock = VirtualClock::with_tick(1);
        let echo = ScriptedEchoPin::new(clock.clone());
        echo.schedule_pulse(500, 700);
        let mut timer = PulseTimer::with_timeout(echo, clock, Duration::from_micros(400));
        assert_eq!(
            timer.measure_echo_duration(),
            Err(EchoError::Timeout(Duration::from_micros(400)))
        );
    }
}
