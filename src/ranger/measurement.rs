use std::{fmt, time::Duration};

/// Centimeters sound travels in one microsecond (343 m/s)
pub const SOUND_SPEED_CM_US: f64 = 0.0343;

/// Converts the echo high time into the one way distance in centimeters.
/// The echo covers the round trip, hence the division by two.
pub fn distance_cm(duration: Duration) -> f64 {
    (duration.as_micros() as f64 * SOUND_SPEED_CM_US) / 2.0
}

/// Result of one ranging cycle
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Measurement {
    pub duration: Duration,
    pub distance_cm: f64,
}

impl Measurement {
    pub fn from_duration(duration: Duration) -> Self {
        Self {
            duration,
            distance_cm: distance_cm(duration),
        }
    }

    /// Reading used for a cycle where the echo never came back
    pub fn degraded() -> Self {
        Self::from_duration(Duration::ZERO)
    }
}

/// Formats the line sent over serial, e.g. `Distance: 34.30 cm`
impl fmt::Display for Measurement {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Distance: {:.2} cm", self.distance_cm)
    }
}
