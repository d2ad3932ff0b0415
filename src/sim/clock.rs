use crate::utils::{
    auxiliary::{SharableRef, SharableRefExt},
    timing::{Clock, Delay, Scheduler},
};
use std::time::Duration;

#[derive(Debug, Default)]
struct ClockState {
    now_us: u64,
    tick_us: u64,
    waits: Vec<Duration>,
}

/// Virtual time source. Clones share the same time line.
///
/// Every `now_us` read advances time by `tick_us`, which models the cost of a
/// polling iteration and lets busy loops reach their deadlines.
#[derive(Debug, Clone, Default)]
pub struct VirtualClock {
    state: SharableRef<ClockState>,
}

impl VirtualClock {
    pub fn new() -> Self {
        Self::with_tick(0)
    }

    pub fn with_tick(tick_us: u64) -> Self {
        Self {
            state: SharableRef::new_sharable(ClockState {
                tick_us,
                ..Default::default()
            }),
        }
    }

    /// Current time without advancing it
    pub fn peek_us(&self) -> u64 {
        self.state.deref().now_us
    }

    pub fn advance(&self, duration: Duration) {
        self.state.deref_mut().now_us += duration.as_micros() as u64;
    }

    /// Every wait requested through the `Scheduler` implementation, in order
    pub fn waits(&self) -> Vec<Duration> {
        self.state.deref().waits.clone()
    }
}

impl Clock for VirtualClock {
    fn now_us(&self) -> u64 {
        let mut state = self.state.deref_mut();
        let now = state.now_us;
        let tick_us = state.tick_us;
        state.now_us += tick_us;
        now
    }
}

impl Delay for VirtualClock {
    fn delay_us(&mut self, micros: u32) {
        self.advance(Duration::from_micros(micros as u64));
    }
}

impl Scheduler for VirtualClock {
    fn wait(&mut self, duration: Duration) {
        self.state.deref_mut().waits.push(duration);
        self.advance(duration);
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn test0_clones_share_time() {
        let clock = VirtualClock::new();
        let mut other = clock.clone();
        other.delay_us(15);
        assert_eq!(clock.peek_us(), 15);
    }

    #[test]
    fn test1_reads_advance_by_tick() {
        let clock = VirtualClock::with_tick(3);
        assert_eq!(clock.now_us(), 0);
        assert_eq!(clock.now_us(), 3);
        assert_eq!(clock.peek_us(), 6);
    }

    #[test]
    fn test2_waits_are_recorded() {
        let mut clock = VirtualClock::new();
        clock.wait(Duration::from_millis(1000));
        clock.wait(Duration::from_millis(5));
        assert_eq!(
            clock.waits(),
            vec![Duration::from_millis(1000), Duration::from_millis(5)]
        );
        assert_eq!(clock.peek_us(), 1_005_000);
    }
}
