use super::VirtualClock;
use crate::{
    gpio::{DigitalInput, DigitalOutError, DigitalOutput},
    utils::auxiliary::{SharableRef, SharableRefExt},
};

/// Level change seen on a [`RecordingPin`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Transition {
    pub at_us: u64,
    pub high: bool,
}

#[derive(Debug, Default)]
struct PinLog {
    transitions: Vec<Transition>,
    fail_next_high: bool,
}

/// Output pin that keeps every level it was driven to, stamped with virtual time.
/// Clones share the same log.
#[derive(Debug, Clone)]
pub struct RecordingPin {
    clock: VirtualClock,
    log: SharableRef<PinLog>,
}

impl RecordingPin {
    pub fn new(clock: VirtualClock) -> Self {
        Self {
            clock,
            log: SharableRef::new_sharable(PinLog::default()),
        }
    }

    pub fn transitions(&self) -> Vec<Transition> {
        self.log.deref().transitions.clone()
    }

    /// Length in microseconds of every High phase that was closed by a Low
    pub fn high_phases(&self) -> Vec<u64> {
        self.transitions()
            .windows(2)
            .filter(|pair| pair[0].high && !pair[1].high)
            .map(|pair| pair[1].at_us - pair[0].at_us)
            .collect()
    }

    pub fn is_set_high(&self) -> bool {
        self.log
            .deref()
            .transitions
            .last()
            .map(|transition| transition.high)
            .unwrap_or(false)
    }

    /// Makes the next `set_high` fail, as a broken pin would
    pub fn fail_next_high(&self) {
        self.log.deref_mut().fail_next_high = true;
    }

    fn record(&self, high: bool) {
        let at_us = self.clock.peek_us();
        self.log.deref_mut().transitions.push(Transition { at_us, high });
    }
}

impl DigitalOutput for RecordingPin {
    fn set_high(&mut self) -> Result<(), DigitalOutError> {
        if std::mem::take(&mut self.log.deref_mut().fail_next_high) {
            return Err(DigitalOutError::InvalidPin);
        }
        self.record(true);
        Ok(())
    }

    fn set_low(&mut self) -> Result<(), DigitalOutError> {
        self.record(false);
        Ok(())
    }
}

/// Output pin that only remembers its level, for long running simulations
#[derive(Debug, Default, Clone, Copy)]
pub struct FloatingPin {
    high: bool,
}

impl FloatingPin {
    pub fn is_set_high(&self) -> bool {
        self.high
    }
}

impl DigitalOutput for FloatingPin {
    fn set_high(&mut self) -> Result<(), DigitalOutError> {
        self.high = true;
        Ok(())
    }

    fn set_low(&mut self) -> Result<(), DigitalOutError> {
        self.high = false;
        Ok(())
    }
}

/// Input pin that is High during scheduled windows of virtual time.
/// Clones share the same schedule.
#[derive(Debug, Clone)]
pub struct ScriptedEchoPin {
    clock: VirtualClock,
    pulses: SharableRef<Vec<(u64, u64)>>,
}

impl ScriptedEchoPin {
    pub fn new(clock: VirtualClock) -> Self {
        Self {
            clock,
            pulses: SharableRef::new_sharable(Vec::new()),
        }
    }

    /// Pin reads High from `rise_us` (inclusive) until `fall_us` (exclusive)
    pub fn schedule_pulse(&self, rise_us: u64, fall_us: u64) {
        self.pulses.deref_mut().push((rise_us, fall_us));
    }

    /// Schedules a pulse starting `after_us` from the current virtual time
    pub fn schedule_pulse_in(&self, after_us: u64, width_us: u64) {
        let rise_us = self.clock.peek_us() + after_us;
        self.schedule_pulse(rise_us, rise_us + width_us);
    }
}

impl DigitalInput for ScriptedEchoPin {
    fn is_high(&self) -> bool {
        let now = self.clock.peek_us();
        self.pulses
            .deref()
            .iter()
            .any(|&(rise, fall)| rise <= now && now < fall)
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::utils::timing::Delay;

    #[test]
    fn test0_recording_pin_stamps_levels() {
        let mut clock = VirtualClock::new();
        let mut pin = RecordingPin::new(clock.clone());
        pin.set_high().unwrap();
        clock.delay_us(10);
        pin.set_low().unwrap();
        assert_eq!(pin.high_phases(), vec![10]);
        assert!(!pin.is_set_high());
    }

    #[test]
    fn test1_scripted_pin_follows_schedule() {
        let mut clock = VirtualClock::new();
        let pin = ScriptedEchoPin::new(clock.clone());
        pin.schedule_pulse_in(5, 10);
        assert!(pin.is_low());
        clock.delay_us(5);
        assert!(pin.is_high());
        clock.delay_us(10);
        assert!(pin.is_low());
    }
}
