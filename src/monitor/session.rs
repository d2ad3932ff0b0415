use super::{DistanceWindow, LineParser, WindowStats};
use log::{debug, info, warn};
use std::io::{self, ErrorKind, Read, Write};
use thiserror::Error;

const READ_BUFFER_SIZE: usize = 256;
/// Longest partial line kept while waiting for its terminator
pub const MAX_LINE_LENGTH: usize = 4096;

#[derive(Debug, Error)]
pub enum MonitorError {
    #[error("serial link error: {0}")]
    Io(#[from] io::Error),
    #[cfg(not(target_os = "espidf"))]
    #[error("could not open port '{port}': {source}")]
    OpenPort {
        port: String,
        source: serialport::Error,
    },
    #[cfg(not(target_os = "espidf"))]
    #[error("could not list ports: {0}")]
    ListPorts(serialport::Error),
}

/// What a finished session saw
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SessionSummary {
    pub lines: u64,
    pub samples: u64,
    pub stats: Option<WindowStats>,
}

/// Reads the text stream of a ranger, extracting distances into a rolling window.
/// For every distance a report line is written with the window statistics.
pub struct MonitorSession {
    parser: LineParser,
    window: DistanceWindow,
    sample_limit: Option<u64>,
    pending: Vec<u8>,
    lines: u64,
}

impl MonitorSession {
    pub fn new(window_size: usize) -> Self {
        Self {
            parser: LineParser::new(),
            window: DistanceWindow::new(window_size),
            sample_limit: None,
            pending: Vec::new(),
            lines: 0,
        }
    }

    /// Stops the session after `limit` distances
    pub fn with_sample_limit(mut self, limit: u64) -> Self {
        self.sample_limit = Some(limit);
        self
    }

    pub fn window(&self) -> &DistanceWindow {
        &self.window
    }

    /// Drops every sample and partial line seen so far
    pub fn clear(&mut self) {
        self.window.clear();
        self.pending.clear();
        self.lines = 0;
    }

    pub fn summary(&self) -> SessionSummary {
        SessionSummary {
            lines: self.lines,
            samples: self.window.total_pushed(),
            stats: self.window.stats(),
        }
    }

    /// Reads `reader` until it ends, fails, or the sample limit is reached.
    /// Read timeouts are expected on serial ports and are skipped.
    ///
    /// # Errors
    ///
    /// - `MonitorError::Io`: If reading the link or writing the report fails.
    pub fn run<R: Read, W: Write>(
        &mut self,
        mut reader: R,
        mut report: W,
    ) -> Result<SessionSummary, MonitorError> {
        let mut buffer = [0u8; READ_BUFFER_SIZE];
        while !self.limit_reached() {
            match reader.read(&mut buffer) {
                Ok(0) => {
                    self.finish(&mut report)?;
                    break;
                }
                Ok(read) => {
                    if self.feed(&buffer[..read], &mut report)? {
                        break;
                    }
                }
                Err(err)
                    if matches!(
                        err.kind(),
                        ErrorKind::TimedOut | ErrorKind::WouldBlock | ErrorKind::Interrupted
                    ) => {}
                Err(err) => return Err(err.into()),
            }
        }
        report.flush()?;
        Ok(self.summary())
    }

    /// Processes every complete line in `bytes`, keeping the rest for later.
    ///
    /// # Returns
    ///
    /// `true` once the sample limit has been reached
    pub fn feed<W: Write>(&mut self, bytes: &[u8], report: &mut W) -> Result<bool, MonitorError> {
        self.pending.extend_from_slice(bytes);
        while let Some(end) = self.pending.iter().position(|&byte| byte == b'\n') {
            let line: Vec<u8> = self.pending.drain(..=end).collect();
            if self.handle_line(&String::from_utf8_lossy(&line), report)? {
                return Ok(true);
            }
        }
        if self.pending.len() > MAX_LINE_LENGTH {
            warn!(
                "dropping {} bytes without a line break, is the baud rate right?",
                self.pending.len()
            );
            self.pending.clear();
        }
        Ok(self.limit_reached())
    }

    /// Handles a last line that was not terminated
    fn finish<W: Write>(&mut self, report: &mut W) -> Result<bool, MonitorError> {
        let rest = std::mem::take(&mut self.pending);
        self.handle_line(&String::from_utf8_lossy(&rest), report)
    }

    fn handle_line<W: Write>(&mut self, line: &str, report: &mut W) -> Result<bool, MonitorError> {
        if self.limit_reached() {
            return Ok(true);
        }
        let line = line.trim();
        if line.is_empty() {
            return Ok(false);
        }
        self.lines += 1;
        info!(target: "serial", "{line}");

        let Some(distance) = self.parser.parse_distance(line) else {
            debug!("not a distance: '{line}'");
            return Ok(false);
        };
        let index = self.window.push(distance);
        if let Some(stats) = self.window.stats() {
            writeln!(report, "{}", format_report(index, distance, &stats))?;
        }

        Ok(self.limit_reached())
    }

    fn limit_reached(&self) -> bool {
        self.sample_limit
            .is_some_and(|limit| self.window.total_pushed() >= limit)
    }
}

impl Default for MonitorSession {
    fn default() -> Self {
        Self::new(super::DEFAULT_WINDOW_SIZE)
    }
}

/// e.g. `#3 34.30 cm | avg 33.10 min 30.00 max 35.00 sd 1.20`
pub fn format_report(index: u64, distance: f64, stats: &WindowStats) -> String {
    format!(
        "#{index} {distance:.2} cm | avg {:.2} min {:.2} max {:.2} sd {:.2}",
        stats.average, stats.minimum, stats.maximum, stats.std_dev
    )
}
