use super::{ConfigError, Measurement, RangerConfig, MEASUREMENT_INTERVAL};
use crate::{sensors::DistanceSensor, utils::timing::Scheduler};
use log::{debug, info, warn};
use std::io::Write;

pub const BANNER: &str = "Ultrasonic ranger ready";

/// Polling loop of the ranger. Owns the sensor, the text output and the scheduler
/// that paces it.
///
/// Nothing that happens during an iteration stops the loop: a lost echo or a
/// failing trigger become a `0.00 cm` reading, a failed write is dropped. The next
/// iteration is the retry.
pub struct RangerLoop<S, W, C> {
    config: RangerConfig,
    sensor: S,
    output: W,
    scheduler: C,
    cycles: u64,
}

impl<S: DistanceSensor, W: Write, C: Scheduler> RangerLoop<S, W, C> {
    /// Validates the configuration and emits the start up banner.
    ///
    /// The sensor pins and the output are expected to be already configured
    /// according to `config`.
    ///
    /// # Errors
    ///
    /// - `ConfigError`: If `config` does not validate.
    pub fn new(config: RangerConfig, sensor: S, output: W, scheduler: C) -> Result<Self, ConfigError> {
        config.validate()?;
        let mut ranger = Self {
            config,
            sensor,
            output,
            scheduler,
            cycles: 0,
        };
        info!(
            "ranger started: trigger pin {}, echo pin {}, {} baud",
            config.trigger_pin, config.echo_pin, config.baud_rate
        );
        ranger.emit(BANNER);
        Ok(ranger)
    }

    /// Runs one measurement cycle: trigger, echo, convert, print and wait.
    ///
    /// # Returns
    ///
    /// The `Measurement` that was printed
    pub fn iterate(&mut self) -> Measurement {
        let measurement = match self.sensor.measure() {
            Ok(measurement) => measurement,
            Err(err) => {
                warn!("cycle {}: {err}", self.cycles);
                Measurement::degraded()
            }
        };
        debug!(
            "cycle {}: {} us -> {:.2} cm",
            self.cycles,
            measurement.duration.as_micros(),
            measurement.distance_cm
        );

        self.emit(&measurement.to_string());
        self.cycles += 1;
        self.scheduler.wait(MEASUREMENT_INTERVAL);
        measurement
    }

    /// Measures forever
    pub fn run(&mut self) -> ! {
        loop {
            self.iterate();
        }
    }

    pub fn config(&self) -> &RangerConfig {
        &self.config
    }

    /// Amount of completed iterations
    pub fn cycles(&self) -> u64 {
        self.cycles
    }

    pub fn output(&self) -> &W {
        &self.output
    }

    pub fn into_parts(self) -> (S, W, C) {
        (self.sensor, self.output, self.scheduler)
    }

    fn emit(&mut self, line: &str) {
        let written = writeln!(self.output, "{line}").and_then(|_| self.output.flush());
        if let Err(err) = written {
            warn!("could not write `{line}`: {err}");
        }
    }
}
