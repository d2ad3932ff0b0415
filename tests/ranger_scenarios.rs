//! Whole loop scenarios on simulated hardware and virtual time.

use esp32ranger::{
    ranger::{
        Measurement, RangerConfig, RangerLoop, BANNER, ECHO_TIMEOUT, MEASUREMENT_INTERVAL,
        TRIGGER_PULSE_US,
    },
    sensors::{PulseTimer, HCSR04},
    sim::{EchoOutcome, RecordingPin, ScriptedEchoPin, SimulatedEcho, VirtualClock},
};
use std::time::Duration;

fn init_logs() {
    let _ = env_logger::builder().is_test(true).try_init();
}

fn lines(output: &[u8]) -> Vec<String> {
    String::from_utf8(output.to_vec())
        .unwrap()
        .lines()
        .map(String::from)
        .collect()
}

#[test]
fn test0_echo_of_2000_us_prints_34_3_cm() {
    init_logs();
    let clock = VirtualClock::new();
    let sensor = HCSR04::new(
        RecordingPin::new(clock.clone()),
        SimulatedEcho::constant(Duration::from_micros(2_000)),
        clock.clone(),
    );
    let mut ranger = RangerLoop::new(RangerConfig::default(), sensor, Vec::new(), clock.clone()).unwrap();

    ranger.iterate();

    assert_eq!(lines(ranger.output()), vec![BANNER, "Distance: 34.30 cm"]);
}

#[test]
fn test1_polled_echo_pin_end_to_end() {
    init_logs();
    let clock = VirtualClock::with_tick(1);
    let trig = RecordingPin::new(clock.clone());
    let echo_pin = ScriptedEchoPin::new(clock.clone());
    let sensor = HCSR04::new(
        trig.clone(),
        PulseTimer::new(echo_pin.clone(), clock.clone()),
        clock.clone(),
    );
    let mut ranger = RangerLoop::new(RangerConfig::default(), sensor, Vec::new(), clock.clone()).unwrap();

    // the trigger takes 12 us of virtual time, the sensor answers 100 us later
    echo_pin.schedule_pulse_in(112, 2_000);
    let measurement = ranger.iterate();

    assert!((measurement.distance_cm - 34.3).abs() < 0.1, "{measurement:?}");
    assert_eq!(trig.high_phases(), vec![TRIGGER_PULSE_US as u64]);
    assert_eq!(lines(ranger.output())[1], "Distance: 34.30 cm");
}

#[test]
fn test2_echo_timeout_completes_the_iteration() {
    init_logs();
    let clock = VirtualClock::with_tick(1);
    let trig = RecordingPin::new(clock.clone());
    let silent_pin = ScriptedEchoPin::new(clock.clone());
    let sensor = HCSR04::new(trig.clone(), PulseTimer::new(silent_pin, clock.clone()), clock.clone());
    let mut ranger = RangerLoop::new(RangerConfig::default(), sensor, Vec::new(), clock.clone()).unwrap();

    assert_eq!(ranger.iterate(), Measurement::degraded());
    assert_eq!(ranger.iterate(), Measurement::degraded());

    assert_eq!(ranger.cycles(), 2);
    assert_eq!(clock.waits(), vec![MEASUREMENT_INTERVAL; 2]);
    assert_eq!(trig.high_phases(), vec![TRIGGER_PULSE_US as u64; 2]);
    assert_eq!(
        lines(ranger.output()),
        vec![BANNER, "Distance: 0.00 cm", "Distance: 0.00 cm"]
    );
}

#[test]
fn test3_cycles_are_paced_by_the_interval() {
    init_logs();
    let clock = VirtualClock::new();
    let trig = RecordingPin::new(clock.clone());
    let echo = SimulatedEcho::new([
        EchoOutcome::Pulse(Duration::from_micros(2_000)),
        EchoOutcome::NoEcho,
        EchoOutcome::Pulse(Duration::from_micros(1_000)),
    ])
    .with_clock(clock.clone());
    let sensor = HCSR04::new(trig.clone(), echo, clock.clone());
    let mut ranger = RangerLoop::new(RangerConfig::default(), sensor, Vec::new(), clock.clone()).unwrap();

    for _ in 0..3 {
        ranger.iterate();
    }

    let rising_edges: Vec<u64> = trig
        .transitions()
        .iter()
        .filter(|transition| transition.high)
        .map(|transition| transition.at_us)
        .collect();
    let interval_us = MEASUREMENT_INTERVAL.as_micros() as u64;
    let trigger_us = 2 + TRIGGER_PULSE_US as u64;
    assert_eq!(rising_edges.len(), 3);
    assert_eq!(rising_edges[1] - rising_edges[0], interval_us + trigger_us + 2_000);
    assert_eq!(
        rising_edges[2] - rising_edges[1],
        interval_us + trigger_us + ECHO_TIMEOUT.as_micros() as u64
    );
    assert_eq!(clock.waits(), vec![MEASUREMENT_INTERVAL; 3]);
    assert_eq!(
        lines(ranger.output()),
        vec![BANNER, "Distance: 34.30 cm", "Distance: 0.00 cm", "Distance: 17.15 cm"]
    );
}

#[test]
fn test4_borrowed_parts_stay_with_the_caller() {
    init_logs();
    let clock = VirtualClock::new();
    let mut sensor = HCSR04::new(
        RecordingPin::new(clock.clone()),
        SimulatedEcho::constant(Duration::from_micros(1_000)),
        clock.clone(),
    );
    let mut output = Vec::new();
    let mut scheduler = clock.clone();
    {
        let mut ranger =
            RangerLoop::new(RangerConfig::default(), &mut sensor, &mut output, &mut scheduler).unwrap();
        ranger.iterate();
    }
    let (trig, _, _) = sensor.into_parts();
    assert_eq!(trig.high_phases().len(), 1);
    assert_eq!(lines(&output), vec![BANNER, "Distance: 17.15 cm"]);
}
