use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::error::Result;

/// Default line rate for motion processors in serial mode.
pub const DEFAULT_BAUD: u32 = 57_600;

/// Parity bit setting for a serial line.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Parity {
    #[default]
    None,
    Odd,
    Even,
}

/// Line settings applied to a channel.
///
/// Data bits and stop bits are fixed at 8N1 framing apart from parity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChannelSettings {
    /// Line rate in bits per second.
    pub baud: u32,
    /// Parity bit.
    pub parity: Parity,
}

impl Default for ChannelSettings {
    fn default() -> Self {
        Self {
            baud: DEFAULT_BAUD,
            parity: Parity::None,
        }
    }
}

/// A byte-oriented, half-duplex-or-better connection to a device.
///
/// Implementations own the underlying OS resource. Once [`close`] has been
/// called every other operation returns [`TransportError::Closed`], and
/// further calls to `close` succeed without doing anything.
///
/// [`close`]: ByteChannel::close
/// [`TransportError::Closed`]: crate::TransportError::Closed
pub trait ByteChannel: Send {
    /// Write `bytes` in one logical write. Returns how many bytes the
    /// channel accepted, which may be fewer than requested.
    fn write(&mut self, bytes: &[u8]) -> Result<usize>;

    /// Block until `buf` is full or `timeout` elapses.
    ///
    /// Returns the number of bytes placed in `buf`; a timeout is reported
    /// as a short count (possibly 0), never as an error.
    fn read(&mut self, buf: &mut [u8], timeout: Duration) -> Result<usize>;

    /// Discard any bytes received but not yet read.
    fn flush_input(&mut self) -> Result<()>;

    /// Apply new line settings to the open channel.
    fn configure(&mut self, settings: &ChannelSettings) -> Result<()>;

    /// Settings currently in effect.
    fn settings(&self) -> ChannelSettings;

    /// Whether the channel is still open.
    fn is_open(&self) -> bool;

    /// Human-readable channel name for diagnostics.
    fn name(&self) -> &str;

    /// Release the channel. Idempotent.
    fn close(&mut self) -> Result<()>;
}

impl<C: ByteChannel + ?Sized> ByteChannel for Box<C> {
    fn write(&mut self, bytes: &[u8]) -> Result<usize> {
        (**self).write(bytes)
    }

    fn read(&mut self, buf: &mut [u8], timeout: Duration) -> Result<usize> {
        (**self).read(buf, timeout)
    }

    fn flush_input(&mut self) -> Result<()> {
        (**self).flush_input()
    }

    fn configure(&mut self, settings: &ChannelSettings) -> Result<()> {
        (**self).configure(settings)
    }

    fn settings(&self) -> ChannelSettings {
        (**self).settings()
    }

    fn is_open(&self) -> bool {
        (**self).is_open()
    }

    fn name(&self) -> &str {
        (**self).name()
    }

    fn close(&mut self) -> Result<()> {
        (**self).close()
    }
}
