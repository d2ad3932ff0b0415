//! Stands in for the device: runs the ranger loop against a simulated sensor and
//! writes its lines to a serial port.
//!
//! A virtual port pair can be created with
//! `socat -d -d pty,raw,echo=0 pty,raw,echo=0`; give one end to this program and
//! the other one to `ranger_monitor`.

#[cfg(not(target_os = "espidf"))]
use {
    clap::Parser,
    esp32ranger::{
        monitor::open_port,
        ranger::{RangerConfig, RangerLoop, DEFAULT_ECHO_PIN, DEFAULT_TRIGGER_PIN},
        sensors::HCSR04,
        serial::DEFAULT_BAUDRATE,
        sim::{FloatingPin, RandomEcho, MAX_SIMULATED_CM},
        timing::{SpinDelay, ThreadScheduler},
    },
    log::{error, info},
};

#[cfg(not(target_os = "espidf"))]
#[derive(Parser, Debug)]
#[command(about = "Sends simulated ranger readings over a serial port")]
struct Args {
    /// Serial port to write to
    #[arg(default_value = "/dev/pts/2")]
    port: String,

    #[arg(short, long, default_value_t = DEFAULT_BAUDRATE)]
    baud: u32,

    /// Stop after this many measurements, runs forever when absent
    #[arg(short, long)]
    cycles: Option<u64>,

    #[arg(long, default_value_t = 5.0, value_parser = parse_distance_cm)]
    min_cm: f64,

    #[arg(long, default_value_t = 200.0, value_parser = parse_distance_cm)]
    max_cm: f64,

    /// Probability of a lost echo on each measurement
    #[arg(long, default_value_t = 0.0, value_parser = parse_probability)]
    dropout: f64,

    /// Seed for reproducible readings
    #[arg(long)]
    seed: Option<u64>,
}

#[cfg(not(target_os = "espidf"))]
fn parse_distance_cm(arg: &str) -> Result<f64, String> {
    let distance: f64 = arg.parse().map_err(|err| format!("{err}"))?;
    if !(0.0..=MAX_SIMULATED_CM).contains(&distance) {
        return Err(format!("must be between 0 and {MAX_SIMULATED_CM} cm"));
    }
    Ok(distance)
}

#[cfg(not(target_os = "espidf"))]
fn parse_probability(arg: &str) -> Result<f64, String> {
    let probability: f64 = arg.parse().map_err(|err| format!("{err}"))?;
    if !(0.0..=1.0).contains(&probability) {
        return Err("must be between 0 and 1".to_string());
    }
    Ok(probability)
}

#[cfg(not(target_os = "espidf"))]
fn main() -> Result<(), Box<dyn std::error::Error>> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
    let args = Args::parse();

    info!("opening mock serial port {}", args.port);
    let port = open_port(&args.port, args.baud).inspect_err(|err| {
        error!("{err}");
        error!("is socat running and is {} the right end of the pair?", args.port);
    })?;

    let echo = match args.seed {
        Some(seed) => RandomEcho::seeded(seed, args.min_cm, args.max_cm),
        None => RandomEcho::new(args.min_cm, args.max_cm),
    }
    .with_dropout(args.dropout);
    let sensor = HCSR04::new(FloatingPin::default(), echo, SpinDelay);
    let config = RangerConfig::new(DEFAULT_TRIGGER_PIN, DEFAULT_ECHO_PIN, args.baud);
    let mut ranger = RangerLoop::new(config, sensor, port, ThreadScheduler)?;

    match args.cycles {
        Some(cycles) => {
            for _ in 0..cycles {
                let measurement = ranger.iterate();
                info!("sent: {measurement}");
            }
            info!("sent {} measurements", ranger.cycles());
            Ok(())
        }
        None => ranger.run(),
    }
}

#[cfg(target_os = "espidf")]
fn main() {}

#[cfg(all(test, not(target_os = "espidf")))]
mod test {
    use super::*;

    #[test]
    fn test0_distance_bounds_must_be_finite_and_in_range() {
        assert_eq!(parse_distance_cm("12.5"), Ok(12.5));
        assert!(parse_distance_cm("inf").is_err());
        assert!(parse_distance_cm("NaN").is_err());
        assert!(parse_distance_cm("-1").is_err());
        assert!(parse_distance_cm("401").is_err());
    }

    #[test]
    fn test1_dropout_must_be_a_probability() {
        assert_eq!(parse_probability("0.25"), Ok(0.25));
        assert!(parse_probability("NaN").is_err());
        assert!(parse_probability("1.5").is_err());
    }

    #[test]
    fn test2_cli_rejects_non_finite_values() {
        assert!(Args::try_parse_from(["ranger_mock", "--max-cm", "inf"]).is_err());
        assert!(Args::try_parse_from(["ranger_mock", "--dropout", "NaN"]).is_err());
        let args = Args::try_parse_from(["ranger_mock", "/dev/pts/3", "--min-cm", "10"]).unwrap();
        assert_eq!(args.port, "/dev/pts/3");
        assert_eq!(args.min_cm, 10.0);
    }
}
