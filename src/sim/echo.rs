use super::VirtualClock;
use crate::{
    ranger::{ECHO_TIMEOUT, SOUND_SPEED_CM_US},
    sensors::{EchoError, EchoSensor},
};
use std::{collections::VecDeque, time::Duration};

/// Farthest object the simulated sensors answer with, the range of an HC-SR04
pub const MAX_SIMULATED_CM: f64 = 400.0;

/// Echo high time an object at `distance_cm` would produce
pub fn echo_duration_for(distance_cm: f64) -> Duration {
    let micros = (distance_cm.max(0.0) * 2.0 / SOUND_SPEED_CM_US).round();
    Duration::from_micros(micros as u64)
}

/// What the simulated sensor answers to one trigger
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EchoOutcome {
    Pulse(Duration),
    NoEcho,
}

/// Echo sensor that replays a fixed script of outcomes.
///
/// Once the script runs out every measurement times out, unless the script
/// was made cyclic. When a clock is attached, each measurement advances it by
/// the time the real sensor would have taken.
pub struct SimulatedEcho {
    script: VecDeque<EchoOutcome>,
    cyclic: bool,
    clock: Option<VirtualClock>,
}

impl SimulatedEcho {
    pub fn new(outcomes: impl IntoIterator<Item = EchoOutcome>) -> Self {
        Self {
            script: outcomes.into_iter().collect(),
            cyclic: false,
            clock: None,
        }
    }

    /// Answers every trigger with the same pulse
    pub fn constant(duration: Duration) -> Self {
        Self::new([EchoOutcome::Pulse(duration)]).cycled()
    }

    pub fn cycled(mut self) -> Self {
        self.cyclic = true;
        self
    }

    pub fn with_clock(mut self, clock: VirtualClock) -> Self {
        self.clock = Some(clock);
        self
    }

    pub fn remaining(&self) -> usize {
        self.script.len()
    }

    fn next_outcome(&mut self) -> EchoOutcome {
        let outcome = self.script.pop_front().unwrap_or(EchoOutcome::NoEcho);
        if self.cyclic {
            self.script.push_back(outcome);
        }
        outcome
    }

    fn spend(&self, duration: Duration) {
        if let Some(clock) = &self.clock {
            clock.advance(duration);
        }
    }
}

impl EchoSensor for SimulatedEcho {
    fn measure_echo_duration(&mut self) -> Result<Duration, EchoError> {
        match self.next_outcome() {
            EchoOutcome::Pulse(duration) => {
                self.spend(duration);
                Ok(duration)
            }
            EchoOutcome::NoEcho => {
                self.spend(ECHO_TIMEOUT);
                Err(EchoError::Timeout(ECHO_TIMEOUT))
            }
        }
    }
}

/// Echo sensor answering with objects at random distances, used by the mock sender
#[cfg(not(target_os = "espidf"))]
pub struct RandomEcho {
    rng: rand::rngs::StdRng,
    min_cm: f64,
    max_cm: f64,
    dropout: f64,
}

#[cfg(not(target_os = "espidf"))]
impl RandomEcho {
    /// Distances are drawn uniformly from `min_cm..=max_cm`, bounds are swapped if reversed.
    /// Bounds are kept within `0.0..=MAX_SIMULATED_CM`, a NaN bound counts as zero.
    pub fn new(min_cm: f64, max_cm: f64) -> Self {
        use rand::SeedableRng;
        Self::with_rng(rand::rngs::StdRng::from_entropy(), min_cm, max_cm)
    }

    pub fn seeded(seed: u64, min_cm: f64, max_cm: f64) -> Self {
        use rand::SeedableRng;
        Self::with_rng(rand::rngs::StdRng::seed_from_u64(seed), min_cm, max_cm)
    }

    fn with_rng(rng: rand::rngs::StdRng, min_cm: f64, max_cm: f64) -> Self {
        let (min_cm, max_cm) = (in_range_cm(min_cm), in_range_cm(max_cm));
        let (min_cm, max_cm) = if min_cm <= max_cm {
            (min_cm, max_cm)
        } else {
            (max_cm, min_cm)
        };
        Self {
            rng,
            min_cm,
            max_cm,
            dropout: 0.0,
        }
    }

    /// Probability in `0.0..=1.0` of a lost echo on each measurement. NaN disables dropouts.
    pub fn with_dropout(mut self, dropout: f64) -> Self {
        self.dropout = if dropout.is_nan() {
            0.0
        } else {
            dropout.clamp(0.0, 1.0)
        };
        self
    }
}

#[cfg(not(target_os = "espidf"))]
fn in_range_cm(distance_cm: f64) -> f64 {
    if distance_cm.is_nan() {
        0.0
    } else {
        distance_cm.clamp(0.0, MAX_SIMULATED_CM)
    }
}

#[cfg(not(target_os = "espidf"))]
impl EchoSensor for RandomEcho {
    fn measure_echo_duration(&mut self) -> Result<Duration, EchoError> {
        use rand::Rng;
        if self.rng.gen_bool(self.dropout) {
            return Err(EchoError::Timeout(ECHO_TIMEOUT));
        }
        let distance_cm = self.rng.gen_range(self.min_cm..=self.max_cm);
        Ok(echo_duration_for(distance_cm))
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::ranger::distance_cm;

    #[test]
    fn test0_script_is_replayed_then_times_out() {
        let mut echo = SimulatedEcho::new([
            EchoOutcome::Pulse(Duration::from_micros(100)),
            EchoOutcome::NoEcho,
        ]);
        assert_eq!(echo.measure_echo_duration(), Ok(Duration::from_micros(100)));
        assert!(echo.measure_echo_duration().is_err());
        assert_eq!(echo.remaining(), 0);
        assert!(echo.measure_echo_duration().is_err());
    }

    #[test]
    fn test1_constant_echo_never_runs_out() {
        let mut echo = SimulatedEcho::constant(Duration::from_micros(2_000));
        for _ in 0..5 {
            assert_eq!(echo.measure_echo_duration(), Ok(Duration::from_micros(2_000)));
        }
    }

    #[test]
    fn test2_attached_clock_is_advanced() {
        let clock = VirtualClock::new();
        let mut echo = SimulatedEcho::new([EchoOutcome::Pulse(Duration::from_micros(300))])
            .with_clock(clock.clone());
        echo.measure_echo_duration().unwrap();
        assert_eq!(clock.peek_us(), 300);
        echo.measure_echo_duration().unwrap_err();
        assert_eq!(clock.peek_us(), 300 + ECHO_TIMEOUT.as_micros() as u64);
    }

    #[test]
    fn test3_duration_for_distance_inverts_conversion() {
        let duration = echo_duration_for(34.3);
        assert_eq!(duration, Duration::from_micros(2_000));
        assert!((distance_cm(duration) - 34.3).abs() < 1e-9);
        assert_eq!(echo_duration_for(-3.0), Duration::ZERO);
    }

    #[test]
    fn test4_random_echo_stays_in_range() {
        let mut echo = RandomEcho::seeded(7, 40.0, 10.0);
        for _ in 0..100 {
            let distance = distance_cm(echo.measure_echo_duration().unwrap());
            assert!((9.9..=40.1).contains(&distance), "{distance}");
        }
    }

    #[test]
    fn test5_random_echo_full_dropout_always_times_out() {
        let mut echo = RandomEcho::seeded(7, 10.0, 20.0).with_dropout(1.0);
        assert!(echo.measure_echo_duration().is_err());
    }

    #[test]
    fn test6_random_echo_with_nan_dropout_never_drops() {
        let mut echo = RandomEcho::seeded(1, 5.0, 200.0).with_dropout(f64::NAN);
        for _ in 0..20 {
            assert!(echo.measure_echo_duration().is_ok());
        }
    }

    #[test]
    fn test7_random_echo_with_unbounded_range_stays_in_sensor_range() {
        let mut echo = RandomEcho::seeded(1, 5.0, f64::INFINITY);
        for _ in 0..100 {
            let distance = distance_cm(echo.measure_echo_duration().unwrap());
            assert!((4.9..=MAX_SIMULATED_CM + 0.1).contains(&distance), "{distance}");
        }

        let mut echo = RandomEcho::seeded(1, f64::NAN, f64::NEG_INFINITY);
        assert_eq!(echo.measure_echo_duration(), Ok(Duration::ZERO));
    }
}
