use super::MonitorError;
use serialport::{SerialPort, SerialPortInfo, SerialPortType};
use std::time::Duration;

/// How long a read waits before reporting a timeout, so the monitor stays responsive
pub const SERIAL_TIMEOUT: Duration = Duration::from_millis(1000);

/// One line per available serial port, `device: description`, sorted by device
pub fn list_ports() -> Result<Vec<String>, MonitorError> {
    let mut ports = serialport::available_ports().map_err(MonitorError::ListPorts)?;
    ports.sort_by(|a, b| a.port_name.cmp(&b.port_name));
    Ok(ports.iter().map(describe_port).collect())
}

fn describe_port(port: &SerialPortInfo) -> String {
    let description = match &port.port_type {
        SerialPortType::UsbPort(usb) => usb
            .product
            .clone()
            .unwrap_or_else(|| format!("USB {:04x}:{:04x}", usb.vid, usb.pid)),
        SerialPortType::PciPort => "PCI".to_string(),
        SerialPortType::BluetoothPort => "Bluetooth".to_string(),
        SerialPortType::Unknown => "n/a".to_string(),
    };
    format!("{}: {}", port.port_name, description)
}

/// Opens `port` for the text link of the ranger
///
/// # Errors
///
/// - `MonitorError::OpenPort`: If the port does not exist, is busy or access is denied.
pub fn open_port(port: &str, baud_rate: u32) -> Result<Box<dyn SerialPort>, MonitorError> {
    serialport::new(port, baud_rate)
        .timeout(SERIAL_TIMEOUT)
        .open()
        .map_err(|source| MonitorError::OpenPort {
            port: port.to_string(),
            source,
        })
}
