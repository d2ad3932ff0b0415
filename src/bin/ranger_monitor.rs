//! Reads the text stream of a ranger from a serial port and prints every distance
//! together with the statistics of the latest samples.
//!
//! On Linux, opening the port may need the user to be in the `dialout` group.

#[cfg(not(target_os = "espidf"))]
use {
    clap::Parser,
    esp32ranger::{
        monitor::{list_ports, open_port, MonitorError, MonitorSession, DEFAULT_WINDOW_SIZE},
        serial::DEFAULT_BAUDRATE,
    },
    log::{error, info},
};

#[cfg(not(target_os = "espidf"))]
#[derive(Parser, Debug)]
#[command(about = "Serial monitor for the ultrasonic ranger")]
struct Args {
    /// Serial port the ranger is connected to, e.g. /dev/ttyUSB0
    #[arg(short, long, required_unless_present = "list")]
    port: Option<String>,

    #[arg(short, long, default_value_t = DEFAULT_BAUDRATE)]
    baud: u32,

    /// Amount of latest samples the statistics are computed over
    #[arg(short, long, default_value_t = DEFAULT_WINDOW_SIZE)]
    window: usize,

    /// Stop after this many distances
    #[arg(short, long)]
    samples: Option<u64>,

    /// Print the available serial ports and exit
    #[arg(short, long)]
    list: bool,
}

#[cfg(not(target_os = "espidf"))]
fn print_ports() -> Result<(), MonitorError> {
    let ports = list_ports()?;
    if ports.is_empty() {
        println!("No serial ports found.");
    }
    for port in ports {
        println!("  {port}");
    }
    Ok(())
}

#[cfg(not(target_os = "espidf"))]
fn main() -> Result<(), MonitorError> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
    let args = Args::parse();

    let port_name = match (&args.port, args.list) {
        (Some(port), false) => port,
        _ => return print_ports(),
    };

    info!("connecting to {port_name} at {} baud", args.baud);
    let port = match open_port(port_name, args.baud) {
        Ok(port) => port,
        Err(err) => {
            error!("{err}");
            println!("Available ports:");
            print_ports()?;
            return Err(err);
        }
    };

    let mut session = MonitorSession::new(args.window);
    if let Some(limit) = args.samples {
        session = session.with_sample_limit(limit);
    }
    let summary = session.run(port, std::io::stdout().lock())?;
    info!(
        "session finished: {} lines, {} distances",
        summary.lines, summary.samples
    );
    Ok(())
}

#[cfg(target_os = "espidf")]
fn main() {}
