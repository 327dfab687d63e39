use std::io::{ErrorKind, Read, Write};
use std::time::{Duration, Instant};

use serialport::{ClearBuffer, DataBits, FlowControl, SerialPort, StopBits};
use tracing::{debug, trace};

use crate::error::{Result, TransportError};
use crate::traits::{ByteChannel, ChannelSettings, Parity};

/// Timeout used for the open call itself; reads use their own deadline.
const OPEN_TIMEOUT: Duration = Duration::from_millis(100);

/// Lower bound on the time allowed to push one packet onto the line.
const WRITE_TIMEOUT_FLOOR: Duration = Duration::from_millis(100);

/// Bits on the wire per byte at 8N1: start, eight data, stop.
const BITS_PER_BYTE: u64 = 10;

/// Default port name: the first serial port of the platform.
pub fn default_port_name() -> &'static str {
    if cfg!(windows) {
        "COM1"
    } else {
        "/dev/ttyS0"
    }
}

/// Names of the serial ports present on this system.
pub fn available_ports() -> Result<Vec<String>> {
    let ports = serialport::available_ports()?;
    Ok(ports.into_iter().map(|p| p.port_name).collect())
}

/// OS serial port channel.
///
/// Always 8 data bits, 1 stop bit, no flow control.
pub struct SerialChannel {
    port: Option<Box<dyn SerialPort>>,
    name: String,
    settings: ChannelSettings,
}

impl SerialChannel {
    /// Open the named port with the given line settings.
    pub fn open(name: &str, settings: ChannelSettings) -> Result<Self> {
        let port = serialport::new(name, settings.baud)
            .data_bits(DataBits::Eight)
            .stop_bits(StopBits::One)
            .flow_control(FlowControl::None)
            .parity(to_serialport_parity(settings.parity))
            .timeout(OPEN_TIMEOUT)
            .open()
            .map_err(|source| TransportError::Open {
                port: name.to_string(),
                source,
            })?;

        debug!(port = name, baud = settings.baud, "opened serial channel");

        Ok(Self {
            port: Some(port),
            name: name.to_string(),
            settings,
        })
    }

    fn port_mut(&mut self) -> Result<&mut Box<dyn SerialPort>> {
        self.port.as_mut().ok_or(TransportError::Closed)
    }
}

impl ByteChannel for SerialChannel {
    fn write(&mut self, bytes: &[u8]) -> Result<usize> {
        let baud = self.settings.baud;
        let port = self.port_mut()?;
        // Reads leave the port timeout at whatever was left of their deadline.
        port.set_timeout(write_timeout(bytes.len(), baud))?;

        let mut offset = 0usize;
        while offset < bytes.len() {
            match port.write(&bytes[offset..]) {
                Ok(0) => break,
                Ok(n) => offset += n,
                Err(err) if err.kind() == ErrorKind::Interrupted => continue,
                Err(err) if err.kind() == ErrorKind::TimedOut => break,
                Err(err) => return Err(TransportError::Io(err)),
            }
        }
        port.flush()?;

        trace!(written = offset, requested = bytes.len(), "serial write");
        Ok(offset)
    }

    fn read(&mut self, buf: &mut [u8], timeout: Duration) -> Result<usize> {
        let port = self.port_mut()?;
        let deadline = Instant::now() + timeout;

        let mut filled = 0usize;
        while filled < buf.len() {
            let remaining = deadline.saturating_duration_since(Instant::now());
            if remaining.is_zero() {
                break;
            }
            port.set_timeout(remaining)?;

            match port.read(&mut buf[filled..]) {
                Ok(0) => break,
                Ok(n) => filled += n,
                Err(err) if err.kind() == ErrorKind::Interrupted => continue,
                Err(err) if err.kind() == ErrorKind::TimedOut => break,
                Err(err) => return Err(TransportError::Io(err)),
            }
        }

        trace!(read = filled, requested = buf.len(), "serial read");
        Ok(filled)
    }

    fn flush_input(&mut self) -> Result<()> {
        self.port_mut()?.clear(ClearBuffer::Input)?;
        Ok(())
    }

    fn configure(&mut self, settings: &ChannelSettings) -> Result<()> {
        let port = self.port_mut()?;
        port.set_baud_rate(settings.baud)?;
        port.set_parity(to_serialport_parity(settings.parity))?;
        self.settings = *settings;
        debug!(port = %self.name, baud = settings.baud, parity = ?settings.parity, "reconfigured serial channel");
        Ok(())
    }

    fn settings(&self) -> ChannelSettings {
        self.settings
    }

    fn is_open(&self) -> bool {
        self.port.is_some()
    }

    fn name(&self) -> &str {
        &self.name
    }

    fn close(&mut self) -> Result<()> {
        if self.port.take().is_some() {
            debug!(port = %self.name, "closed serial channel");
        }
        Ok(())
    }
}

impl std::fmt::Debug for SerialChannel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SerialChannel")
            .field("name", &self.name)
            .field("settings", &self.settings)
            .field("open", &self.port.is_some())
            .finish()
    }
}

/// Time allowed to write `len` bytes at `baud`: twice the line time, never
/// less than [`WRITE_TIMEOUT_FLOOR`].
fn write_timeout(len: usize, baud: u32) -> Duration {
    let bits = (len as u64).saturating_mul(BITS_PER_BYTE);
    let line_time = Duration::from_micros(bits.saturating_mul(1_000_000) / u64::from(baud.max(1)));
    WRITE_TIMEOUT_FLOOR.max(line_time.saturating_mul(2))
}

fn to_serialport_parity(parity: Parity) -> serialport::Parity {
    match parity {
        Parity::None => serialport::Parity::None,
        Parity::Odd => serialport::Parity::Odd,
        Parity::Even => serialport::Parity::Even,
    }
}
