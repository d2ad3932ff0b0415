//! Ultrasonic ranger for the ESP32-C6.
//!
//! An HC-SR04 is triggered once per second, its echo is timed and the distance is
//! printed as a text line over an UART. The loop is written against small
//! capabilities (pins, delay, clock, scheduler) so it runs the same on the device,
//! on the host against simulated hardware, and in tests.

mod microcontroller_src;
mod utils;

pub mod gpio;
pub mod monitor;
pub mod ranger;
pub mod sensors;
pub mod serial;
pub mod sim;

#[cfg(target_os = "espidf")]
pub use microcontroller_src::Microcontroller;
#[cfg(target_os = "espidf")]
pub use microcontroller_src::microcontroller::RangerSensor;
pub use microcontroller_src::peripherals;
pub use utils::ranger_error;
pub use utils::timing;
