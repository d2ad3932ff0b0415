//! Firmware entry point. Measures the distance every second with the HC-SR04 wired
//! to the default pins and prints it over the ranger UART.
//!
//! Built for the host, the same loop runs against a simulated sensor and prints
//! to stdout.

use esp32ranger::ranger::{RangerConfig, RangerLoop};

#[cfg(target_os = "espidf")]
fn main() -> Result<(), esp32ranger::ranger_error::RangerError> {
    use esp32ranger::{timing::FreeRtosScheduler, Microcontroller};

    let mut micro = Microcontroller::take();
    esp_idf_svc::log::EspLogger::initialize_default();

    let config = RangerConfig::default();
    let (sensor, uart) = micro.set_pins_for_ranger(&config)?;
    let mut ranger = RangerLoop::new(config, sensor, uart, FreeRtosScheduler)?;
    ranger.run()
}

#[cfg(not(target_os = "espidf"))]
fn main() -> Result<(), esp32ranger::ranger_error::RangerError> {
    use esp32ranger::{
        sensors::HCSR04,
        sim::{FloatingPin, RandomEcho},
        timing::{SpinDelay, ThreadScheduler},
    };

    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
    log::info!("not running on an ESP32, measuring a simulated sensor");

    let sensor = HCSR04::new(FloatingPin::default(), RandomEcho::new(5.0, 200.0), SpinDelay);
    let mut ranger = RangerLoop::new(RangerConfig::default(), sensor, std::io::stdout(), ThreadScheduler)?;
    ranger.run()
}
