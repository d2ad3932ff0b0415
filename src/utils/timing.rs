//! Time related capabilities used by the ranger.
//!
//! The loop never touches a hardware timer directly: microsecond holds go through
//! [`Delay`], pacing between measurements goes through [`Scheduler`] and echo
//! timing reads a [`Clock`]. The device provides hardware backed implementations,
//! the host and the tests provide [`ThreadScheduler`] and
//! [`VirtualClock`](crate::sim::VirtualClock).

use std::time::Duration;

#[cfg(target_os = "espidf")]
use esp_idf_svc::hal::delay::{Ets, FreeRtos};

/// Monotonic microsecond counter
pub trait Clock {
    /// Microseconds elapsed since an arbitrary, fixed origin
    fn now_us(&self) -> u64;
}

/// Short blocking holds, in the order of microseconds
pub trait Delay {
    fn delay_us(&mut self, micros: u32);
}

/// Blocking wait between loop iterations
pub trait Scheduler {
    fn wait(&mut self, duration: Duration);
}

impl<T: Clock + ?Sized> Clock for &T {
    fn now_us(&self) -> u64 {
        (**self).now_us()
    }
}

impl<T: Delay + ?Sized> Delay for &mut T {
    fn delay_us(&mut self, micros: u32) {
        (**self).delay_us(micros)
    }
}

impl<T: Scheduler + ?Sized> Scheduler for &mut T {
    fn wait(&mut self, duration: Duration) {
        (**self).wait(duration)
    }
}

/// Scheduler that puts the current thread to sleep. On the ESP-IDF std runtime
/// this ends up as a FreeRTOS task delay.
#[derive(Debug, Default, Clone, Copy)]
pub struct ThreadScheduler;

impl Scheduler for ThreadScheduler {
    fn wait(&mut self, duration: Duration) {
        std::thread::sleep(duration)
    }
}

/// Clock based on `std::time::Instant`
#[derive(Debug, Clone, Copy)]
pub struct MonotonicClock {
    origin: std::time::Instant,
}

impl MonotonicClock {
    pub fn new() -> Self {
        Self {
            origin: std::time::Instant::now(),
        }
    }
}

impl Default for MonotonicClock {
    fn default() -> Self {
        Self::new()
    }
}

impl Clock for MonotonicClock {
    fn now_us(&self) -> u64 {
        self.origin.elapsed().as_micros() as u64
    }
}

/// Busy waiting delay that works on every target
#[derive(Debug, Default, Clone, Copy)]
pub struct SpinDelay;

impl Delay for SpinDelay {
    fn delay_us(&mut self, micros: u32) {
        let until = std::time::Instant::now() + Duration::from_micros(micros as u64);
        while std::time::Instant::now() < until {
            std::hint::spin_loop();
        }
    }
}

/// Clock backed by the ESP high resolution timer
#[cfg(target_os = "espidf")]
#[derive(Debug, Default, Clone, Copy)]
pub struct EspClock;

#[cfg(target_os = "espidf")]
impl Clock for EspClock {
    fn now_us(&self) -> u64 {
        // esp_timer counts up from boot and never goes negative
        unsafe { esp_idf_svc::sys::esp_timer_get_time() as u64 }
    }
}

#[cfg(target_os = "espidf")]
impl Delay for Ets {
    fn delay_us(&mut self, micros: u32) {
        Ets::delay_us(micros)
    }
}

/// Scheduler that yields to FreeRTOS for the whole wait
#[cfg(target_os = "espidf")]
#[derive(Debug, Default, Clone, Copy)]
pub struct FreeRtosScheduler;

#[cfg(target_os = "espidf")]
impl Scheduler for FreeRtosScheduler {
    fn wait(&mut self, duration: Duration) {
        FreeRtos::delay_ms(duration.as_millis() as u32)
    }
}
